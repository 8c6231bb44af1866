use chrono::{NaiveDate, Utc};
use sea_orm::{ConnectionTrait, DatabaseConnection, prelude::*};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    Budget, BudgetMovement, EngineError, EventBus, MonthlySummary, Period, ResultEngine,
    util::validate_due_day,
};

mod budgets;
mod expenses;
mod incomes;
mod movements;
mod store;

pub use movements::{MAX_PAGE_LIMIT, MovementFilter, MovementPage};

/// Due day applied to credit card purchases when none is configured.
pub const DEFAULT_DUE_DAY: u32 = 15;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
    events: EventBus,
    default_due_day: u32,
    /// Held for a whole gap scan + batch write so overlapping runs never
    /// observe the same gaps.
    materialization: Mutex<()>,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// The bus `ExpenseCreated` events are published on.
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn default_due_day(&self) -> u32 {
        self.default_due_day
    }

    /// Materialize the recurring movements missing for the current UTC month.
    pub async fn create_recurrency_movements(&self) -> ResultEngine<Vec<BudgetMovement>> {
        self.create_recurrency_movements_on(Utc::now().date_naive())
            .await
    }

    /// Materialize the recurring movements missing for the month of `today`.
    ///
    /// Runs are serialized: a concurrent call waits and then only sees the
    /// gaps left by the previous one.
    pub async fn create_recurrency_movements_on(
        &self,
        today: NaiveDate,
    ) -> ResultEngine<Vec<BudgetMovement>> {
        let _guard = self.materialization.lock().await;
        crate::recurrence::create_recurrency_movements(self, today).await
    }

    /// Income and expense totals of `period`.
    pub async fn get_summary(&self, period: Period) -> ResultEngine<MonthlySummary> {
        crate::summary::get_summary(self, period).await
    }

    /// Expand an already persisted expense into its movements.
    pub async fn materialize_movements_for_new_expense(
        &self,
        expense: &crate::Expense,
    ) -> ResultEngine<Vec<BudgetMovement>> {
        crate::installments::materialize_movements_for_new_expense(self, expense).await
    }
}

/// Load a budget or fail with `NotFound`.
async fn find_budget<C: ConnectionTrait>(db: &C, budget_id: Uuid) -> ResultEngine<Budget> {
    let model = crate::budgets::Entity::find_by_id(budget_id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| EngineError::NotFound(format!("budget {budget_id}")))?;
    Budget::try_from(model)
}

/// The builder for `Engine`
pub struct EngineBuilder {
    database: DatabaseConnection,
    events: EventBus,
    default_due_day: u32,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            database: DatabaseConnection::default(),
            events: EventBus::default(),
            default_due_day: DEFAULT_DUE_DAY,
        }
    }
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Share an existing event bus instead of a private one.
    pub fn events(mut self, events: EventBus) -> EngineBuilder {
        self.events = events;
        self
    }

    /// Day of the month credit card purchases are billed on.
    pub fn default_due_day(mut self, due_day: u32) -> EngineBuilder {
        self.default_due_day = due_day;
        self
    }

    /// Construct `Engine`. Fails with `Validation` when the default due day
    /// is outside `1..=31`.
    pub async fn build(self) -> ResultEngine<Engine> {
        validate_due_day(self.default_due_day, "default")?;
        Ok(Engine {
            database: self.database,
            events: self.events,
            default_due_day: self.default_due_day,
            materialization: Mutex::new(()),
        })
    }
}
