//! Command structs for engine operations.
//!
//! These types group parameters for write operations (budget, expense,
//! income and manual movement creation), keeping call sites readable and
//! avoiding long argument lists.

use chrono::{NaiveDate, Weekday};
use uuid::Uuid;

use crate::{ExpenseType, IncomeType, MovementKind, PaymentMethod, Recurrency};

/// Create a budget.
#[derive(Clone, Debug)]
pub struct BudgetCmd {
    pub description: String,
    pub amount: f64,
    pub end_date: Option<NaiveDate>,
}

impl BudgetCmd {
    #[must_use]
    pub fn new(description: impl Into<String>, amount: f64) -> Self {
        Self {
            description: description.into(),
            amount,
            end_date: None,
        }
    }

    #[must_use]
    pub fn end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }
}

/// Create an expense.
#[derive(Clone, Debug)]
pub struct ExpenseCmd {
    pub description: String,
    pub amount: f64,
    pub kind: ExpenseType,
    pub method: PaymentMethod,
    pub budget_id: Option<Uuid>,
    pub recurrency: Option<Recurrency>,
    pub installments: Option<u32>,
    pub due_day: u32,
    pub weekday: Option<Weekday>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

impl ExpenseCmd {
    #[must_use]
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        kind: ExpenseType,
        method: PaymentMethod,
        due_day: u32,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            kind,
            method,
            budget_id: None,
            recurrency: None,
            installments: None,
            due_day,
            weekday: None,
            start_date,
            end_date: None,
        }
    }

    #[must_use]
    pub fn budget_id(mut self, budget_id: Uuid) -> Self {
        self.budget_id = Some(budget_id);
        self
    }

    #[must_use]
    pub fn recurrency(mut self, recurrency: Recurrency) -> Self {
        self.recurrency = Some(recurrency);
        self
    }

    #[must_use]
    pub fn installments(mut self, installments: u32) -> Self {
        self.installments = Some(installments);
        self
    }

    #[must_use]
    pub fn weekday(mut self, weekday: Weekday) -> Self {
        self.weekday = Some(weekday);
        self
    }

    #[must_use]
    pub fn end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }
}

/// Create an income.
#[derive(Clone, Debug)]
pub struct IncomeCmd {
    pub description: String,
    pub amount: f64,
    pub kind: IncomeType,
    pub due_day: u32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

impl IncomeCmd {
    #[must_use]
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        kind: IncomeType,
        due_day: u32,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            kind,
            due_day,
            start_date,
            end_date: None,
        }
    }

    #[must_use]
    pub fn end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }
}

/// Manually record a movement.
#[derive(Clone, Debug)]
pub struct MovementCmd {
    pub budget_id: Uuid,
    pub origin: Uuid,
    pub kind: MovementKind,
    pub month: u32,
    pub year: i32,
    pub amount: i64,
}
