//! Expansion of a newly created expense into ledger movements.

use uuid::Uuid;

use crate::{
    BudgetMovement, Expense, MovementKind, Period, ResultEngine, calendar::add_months,
    store::MovementStore, util::movement_amount,
};

/// Movements an expense contributes to `budget_id`.
///
/// With `n` installments the expense yields `n` movements, one per calendar
/// month from the start date, each carrying the full expense amount.
/// Without installments it yields a single movement in the start month.
pub fn expense_movements(expense: &Expense, budget_id: Uuid) -> Vec<BudgetMovement> {
    let amount = movement_amount(expense.amount);
    let count = expense.installments.unwrap_or(1);

    (0..count)
        .map(|i| {
            let period = Period::of(add_months(expense.start_date, i));
            BudgetMovement::new(budget_id, expense.id, MovementKind::Expense, period, amount)
        })
        .collect()
}

/// Materialize and persist the movements of a newly created expense.
///
/// Expenses without a budget produce nothing and touch no storage. When the
/// budget was not loaded with the expense it is resolved through `store`, so
/// a dangling budget id fails the whole call before anything is written.
pub async fn materialize_movements_for_new_expense<S: MovementStore>(
    store: &S,
    expense: &Expense,
) -> ResultEngine<Vec<BudgetMovement>> {
    let Some(budget_id) = expense.budget_id else {
        return Ok(Vec::new());
    };

    let budget_id = match &expense.budget {
        Some(budget) => budget.id,
        None => store.budget(budget_id).await?.id,
    };

    let movements = expense_movements(expense, budget_id);
    store.create_movements(&movements).await?;
    tracing::debug!(
        "materialized {} movement(s) for expense {}",
        movements.len(),
        expense.id
    );
    Ok(movements)
}
