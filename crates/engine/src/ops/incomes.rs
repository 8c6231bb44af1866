use sea_orm::{TransactionTrait, prelude::*};

use crate::{Income, IncomeCmd, ResultEngine, incomes};

use super::{Engine, with_tx};

impl Engine {
    /// Create a new income. Variable incomes must carry an end date.
    pub async fn create_income(&self, cmd: IncomeCmd) -> ResultEngine<Income> {
        let income = Income::new(cmd)?;
        with_tx!(self, |db_tx| {
            let model: incomes::ActiveModel = (&income).into();
            model.insert(&db_tx).await?;
            tracing::info!("created income {} ({})", income.id, income.description);
            Ok(income)
        })
    }
}
