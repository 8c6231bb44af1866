use sea_orm::{TransactionTrait, prelude::*};

use crate::{
    Expense, ExpenseCmd, LedgerEvent, PaymentMethod, ResultEngine,
    calendar::{add_months, shift_to_due_day},
    expenses,
};

use super::{Engine, find_budget, with_tx};

impl Engine {
    /// Create a new expense and announce it on the event bus.
    ///
    /// Credit card purchases are moved onto the configured due day, and when
    /// paid in `n` installments they end `n - 1` months after that. A budget
    /// id must reference an existing budget.
    ///
    /// Movements are not written here: subscribers of
    /// [`LedgerEvent::ExpenseCreated`] materialize them.
    pub async fn create_expense(&self, mut cmd: ExpenseCmd) -> ResultEngine<Expense> {
        if cmd.method == PaymentMethod::CreditCard {
            cmd.start_date = shift_to_due_day(cmd.start_date, self.default_due_day);
            if let Some(installments) = cmd.installments.filter(|n| *n > 0) {
                cmd.end_date = Some(add_months(cmd.start_date, installments - 1));
            }
        }
        let mut expense = Expense::new(cmd)?;

        let stored: ResultEngine<Expense> = with_tx!(self, |db_tx| {
            if let Some(budget_id) = expense.budget_id {
                expense.budget = Some(find_budget(&db_tx, budget_id).await?);
            }
            let model: expenses::ActiveModel = (&expense).into();
            model.insert(&db_tx).await?;
            Ok(expense)
        });
        let expense = stored?;

        tracing::info!("created expense {} ({})", expense.id, expense.description);
        self.events
            .publish(LedgerEvent::ExpenseCreated(expense.clone()));
        Ok(expense)
    }
}
