//! Monthly materialization of recurring movements.
//!
//! The job scans for expenses and budgets that have no movement yet in the
//! period of `today`, builds the missing movements and writes them in a single
//! batch. Re-running it within the same period writes nothing, as long as the
//! store's gap scans exclude origins already materialized.

use chrono::NaiveDate;

use crate::{
    Budget, BudgetMovement, Expense, MovementKind, Period, Recurrency, ResultEngine,
    calendar::count_weekday_in_month, store::MovementStore, util::movement_amount,
};

/// Movements a recurring expense owes for `period`.
///
/// Weekly expenses owe one movement per occurrence of their weekday in the
/// month, every other cadence owes exactly one.
pub fn recurring_expense_movements(expense: &Expense, period: Period) -> Vec<BudgetMovement> {
    let Some(budget_id) = expense.budget_id else {
        return Vec::new();
    };

    let count = match (expense.recurrency, expense.weekday) {
        (Some(Recurrency::Weekly), Some(weekday)) => {
            count_weekday_in_month(period.year, period.month, weekday)
        }
        (Some(Recurrency::Weekly), None) => {
            tracing::warn!("weekly expense {} has no weekday, skipping", expense.id);
            0
        }
        _ => 1,
    };

    let amount = movement_amount(expense.amount);
    (0..count)
        .map(|_| {
            BudgetMovement::new(budget_id, expense.id, MovementKind::Expense, period, amount)
        })
        .collect()
}

/// The start movement allocating `budget` for `period`.
pub fn budget_start_movement(budget: &Budget, period: Period) -> BudgetMovement {
    BudgetMovement::new(
        budget.id,
        budget.id,
        MovementKind::Start,
        period,
        movement_amount(budget.amount),
    )
}

/// Fill the gaps of the period containing `today` and persist them in one
/// batch.
///
/// A scan failure aborts before anything is written; a write failure
/// discards the whole batch. Returns the movements that were persisted.
pub async fn create_recurrency_movements<S: MovementStore>(
    store: &S,
    today: NaiveDate,
) -> ResultEngine<Vec<BudgetMovement>> {
    let period = Period::of(today);

    let mut movements: Vec<BudgetMovement> = store
        .expenses_without_movement(period)
        .await?
        .iter()
        .flat_map(|expense| recurring_expense_movements(expense, period))
        .collect();

    let budgets = store.budgets_without_start_movement(period, today).await?;
    movements.extend(
        budgets
            .iter()
            .map(|budget| budget_start_movement(budget, period)),
    );

    if movements.is_empty() {
        tracing::debug!("no movements to materialize for {}/{}", period.month, period.year);
        return Ok(movements);
    }

    store.create_movements(&movements).await?;
    tracing::info!(
        "materialized {} movement(s) for {}/{}",
        movements.len(),
        period.month,
        period.year
    );
    Ok(movements)
}
