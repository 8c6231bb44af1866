pub use budgets::{Budget, BudgetStatus};
pub use calendar::Period;
pub use commands::{BudgetCmd, ExpenseCmd, IncomeCmd, MovementCmd};
pub use error::EngineError;
pub use events::{EventBus, LedgerEvent, spawn_expense_created_handler};
pub use expenses::{Expense, ExpenseType, PaymentMethod, Recurrency};
pub use incomes::{Income, IncomeType};
pub use installments::{expense_movements, materialize_movements_for_new_expense};
pub use movements::{BudgetMovement, MovementKind};
pub use ops::{
    DEFAULT_DUE_DAY, Engine, EngineBuilder, MAX_PAGE_LIMIT, MovementFilter, MovementPage,
};
pub use recurrence::create_recurrency_movements;
pub use store::{MovementStore, TotalsStore};
pub use summary::{BudgetSummary, BudgetUtilization, MonthlySummary, get_summary};

mod budgets;
pub mod calendar;
mod commands;
mod error;
mod events;
mod expenses;
mod incomes;
mod installments;
mod movements;
mod ops;
mod recurrence;
mod store;
mod summary;
mod util;

pub type ResultEngine<T> = Result<T, EngineError>;
