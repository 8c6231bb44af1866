//! Monthly aggregates: income/expense totals and budget utilization.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Period, ResultEngine, store::TotalsStore};

/// Income and expense totals of one period.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub total_income: f64,
    pub total_expense: f64,
    pub total_remaining: f64,
}

/// Aggregate the totals of `period`.
///
/// Both totals are fetched concurrently. When both fail the income error is
/// the one reported.
pub async fn get_summary<S: TotalsStore>(store: &S, period: Period) -> ResultEngine<MonthlySummary> {
    let (income, expense) = tokio::join!(store.income_total(period), store.expense_total(period));
    let total_income = income?;
    let total_expense = expense?;

    Ok(MonthlySummary {
        total_income,
        total_expense,
        total_remaining: total_income - total_expense,
    })
}

/// How much of a budgeted amount has been spent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetSummary {
    pub total_budgeted: f64,
    pub total_spent: f64,
    pub remaining: f64,
    /// `0` when nothing was budgeted.
    pub percentage_spent: f64,
}

impl BudgetSummary {
    pub fn new(total_budgeted: f64, total_spent: f64) -> Self {
        let percentage_spent = if total_budgeted > 0.0 {
            total_spent / total_budgeted * 100.0
        } else {
            0.0
        };
        Self {
            total_budgeted,
            total_spent,
            remaining: total_budgeted - total_spent,
            percentage_spent,
        }
    }
}

/// Utilization of a single budget in a period.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BudgetUtilization {
    pub budget_id: Uuid,
    pub description: String,
    #[serde(flatten)]
    pub summary: BudgetSummary,
}
