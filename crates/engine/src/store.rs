//! Persistence seams used by the materialization engine.
//!
//! The algorithms in [`installments`](crate::installments),
//! [`recurrence`](crate::recurrence) and [`summary`](crate::summary) only
//! talk to storage through these traits. [`Engine`](crate::Engine)
//! implements them on top of the database; tests plug in-memory fakes.

use std::future::Future;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{Budget, BudgetMovement, Expense, Period, ResultEngine};

/// Lookups and batch writes needed to materialize movements.
pub trait MovementStore: Send + Sync {
    /// Fetch a budget, failing with `NotFound` when it does not exist.
    fn budget(&self, id: Uuid) -> impl Future<Output = ResultEngine<Budget>> + Send;

    /// Recurring, non credit card, budget-linked expenses valid during
    /// `period` that have no expense movement in it yet.
    fn expenses_without_movement(
        &self,
        period: Period,
    ) -> impl Future<Output = ResultEngine<Vec<Expense>>> + Send;

    /// Budgets active on `today` without a start movement in `period`.
    fn budgets_without_start_movement(
        &self,
        period: Period,
        today: NaiveDate,
    ) -> impl Future<Output = ResultEngine<Vec<Budget>>> + Send;

    /// Persist all movements or none of them.
    fn create_movements(
        &self,
        movements: &[BudgetMovement],
    ) -> impl Future<Output = ResultEngine<()>> + Send;
}

/// Period totals read by the monthly summary.
pub trait TotalsStore: Send + Sync {
    /// Sum of income amounts whose validity window covers `period`.
    fn income_total(&self, period: Period) -> impl Future<Output = ResultEngine<f64>> + Send;

    /// Sum of expense amounts charged to `period`: recurring and installment
    /// expenses over their validity window, one-off expenses in their start
    /// month.
    fn expense_total(&self, period: Period) -> impl Future<Output = ResultEngine<f64>> + Send;
}
