use sea_orm::{TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{Budget, BudgetCmd, ResultEngine, budgets};

use super::{Engine, find_budget, with_tx};

impl Engine {
    /// Create a new budget.
    ///
    /// The description is stored upper-cased. A budget without end date stays
    /// active forever.
    pub async fn create_budget(&self, cmd: BudgetCmd) -> ResultEngine<Budget> {
        let budget = Budget::new(cmd.amount, &cmd.description, cmd.end_date)?;
        with_tx!(self, |db_tx| {
            let model: budgets::ActiveModel = (&budget).into();
            model.insert(&db_tx).await?;
            tracing::info!("created budget {} ({})", budget.id, budget.description);
            Ok(budget)
        })
    }

    /// Return a budget snapshot from DB.
    pub async fn budget(&self, budget_id: Uuid) -> ResultEngine<Budget> {
        find_budget(&self.database, budget_id).await
    }
}
