//! The module contains the `Expense` type: a recurring or one-off outflow,
//! optionally attributed to a [`Budget`].
//!
//! [`Budget`]: crate::Budget

use chrono::{DateTime, NaiveDate, Utc, Weekday};
use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    Budget, EngineError, ResultEngine,
    commands::ExpenseCmd,
    util::{parse_uuid, required_description, validate_amount, validate_due_day},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseType {
    Recurring,
    Single,
    CreditCard,
}

impl ExpenseType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Recurring => "recurring",
            Self::Single => "single",
            Self::CreditCard => "credit_card",
        }
    }
}

impl TryFrom<&str> for ExpenseType {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "recurring" => Ok(Self::Recurring),
            "single" => Ok(Self::Single),
            "credit_card" => Ok(Self::CreditCard),
            other => Err(EngineError::Validation(format!(
                "invalid expense type: {other}"
            ))),
        }
    }
}

/// Cadence at which a recurring expense regenerates movements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recurrency {
    Monthly,
    Weekly,
    Daily,
}

impl Recurrency {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Weekly => "weekly",
            Self::Daily => "daily",
        }
    }
}

impl TryFrom<&str> for Recurrency {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "monthly" => Ok(Self::Monthly),
            "weekly" => Ok(Self::Weekly),
            "daily" => Ok(Self::Daily),
            other => Err(EngineError::Validation(format!(
                "invalid recurrency: {other}"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    Pix,
    BankSlip,
}

impl PaymentMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreditCard => "credit_card",
            Self::Pix => "pix",
            Self::BankSlip => "bank_slip",
        }
    }
}

impl TryFrom<&str> for PaymentMethod {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "credit_card" => Ok(Self::CreditCard),
            "pix" => Ok(Self::Pix),
            "bank_slip" => Ok(Self::BankSlip),
            other => Err(EngineError::Validation(format!(
                "invalid payment method: {other}"
            ))),
        }
    }
}

/// An expense definition.
///
/// Expenses are never ledger facts themselves: the materialization engine
/// expands them into [`BudgetMovement`]s.
///
/// [`BudgetMovement`]: crate::BudgetMovement
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub description: String,
    pub amount: f64,
    pub kind: ExpenseType,
    /// Expenses without a budget never produce movements.
    pub budget_id: Option<Uuid>,
    /// The owning budget, when it was loaded together with the expense.
    #[serde(skip)]
    pub budget: Option<Budget>,
    pub recurrency: Option<Recurrency>,
    pub method: PaymentMethod,
    pub installments: Option<u32>,
    /// Day of the month the expense is due.
    pub due_day: u32,
    /// Day of the week a weekly expense repeats on.
    pub weekday: Option<Weekday>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    /// Validate `cmd` and build a new expense.
    ///
    /// Dates are taken as given: the credit card due-day shift happens in
    /// [`Engine::create_expense`](crate::Engine::create_expense).
    pub fn new(cmd: ExpenseCmd) -> ResultEngine<Self> {
        if cmd.kind == ExpenseType::Recurring && cmd.recurrency.is_none() {
            return Err(EngineError::Validation(
                "recurring expenses require a recurrency".to_string(),
            ));
        }
        if cmd.recurrency == Some(Recurrency::Weekly) && cmd.weekday.is_none() {
            return Err(EngineError::Validation(
                "weekly expenses require a weekday".to_string(),
            ));
        }
        if cmd.installments == Some(0) {
            return Err(EngineError::Validation(
                "installments must be at least 1".to_string(),
            ));
        }
        if let Some(end) = cmd.end_date
            && end < cmd.start_date
        {
            return Err(EngineError::Validation(
                "end date precedes start date".to_string(),
            ));
        }
        validate_amount(cmd.amount, "expense")?;
        validate_due_day(cmd.due_day, "expense")?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            description: required_description(&cmd.description, "expense")?,
            amount: cmd.amount,
            kind: cmd.kind,
            budget_id: cmd.budget_id,
            budget: None,
            recurrency: cmd.recurrency,
            method: cmd.method,
            installments: cmd.installments,
            due_day: cmd.due_day,
            weekday: cmd.weekday,
            start_date: cmd.start_date,
            end_date: cmd.end_date,
            created_at: now,
            updated_at: now,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub description: String,
    #[sea_orm(column_type = "Double")]
    pub amount: f64,
    #[sea_orm(column_name = "type")]
    pub kind: String,
    pub budget_id: Option<String>,
    pub recurrency: Option<String>,
    pub method: String,
    pub installments: Option<i32>,
    pub due_day: i32,
    /// Days from Monday (`0..=6`).
    pub weekday: Option<i32>,
    pub start_date: Date,
    pub end_date: Option<Date>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::budgets::Entity",
        from = "Column::BudgetId",
        to = "super::budgets::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Budget,
}

impl Related<super::budgets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Budget.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Expense> for ActiveModel {
    fn from(expense: &Expense) -> Self {
        Self {
            id: ActiveValue::Set(expense.id.to_string()),
            description: ActiveValue::Set(expense.description.clone()),
            amount: ActiveValue::Set(expense.amount),
            kind: ActiveValue::Set(expense.kind.as_str().to_string()),
            budget_id: ActiveValue::Set(expense.budget_id.map(|id| id.to_string())),
            recurrency: ActiveValue::Set(expense.recurrency.map(|r| r.as_str().to_string())),
            method: ActiveValue::Set(expense.method.as_str().to_string()),
            installments: ActiveValue::Set(expense.installments.map(|n| n as i32)),
            due_day: ActiveValue::Set(expense.due_day as i32),
            weekday: ActiveValue::Set(
                expense
                    .weekday
                    .map(|day| day.num_days_from_monday() as i32),
            ),
            start_date: ActiveValue::Set(expense.start_date),
            end_date: ActiveValue::Set(expense.end_date),
            created_at: ActiveValue::Set(expense.created_at),
            updated_at: ActiveValue::Set(expense.updated_at),
        }
    }
}

impl TryFrom<Model> for Expense {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let weekday = model
            .weekday
            .map(|day| {
                u8::try_from(day)
                    .ok()
                    .and_then(|day| Weekday::try_from(day).ok())
                    .ok_or_else(|| EngineError::Validation(format!("invalid weekday: {day}")))
            })
            .transpose()?;

        Ok(Self {
            id: parse_uuid(&model.id, "expense")?,
            description: model.description,
            amount: model.amount,
            kind: ExpenseType::try_from(model.kind.as_str())?,
            budget_id: model
                .budget_id
                .as_deref()
                .map(|id| parse_uuid(id, "budget"))
                .transpose()?,
            budget: None,
            recurrency: model
                .recurrency
                .as_deref()
                .map(Recurrency::try_from)
                .transpose()?,
            method: PaymentMethod::try_from(model.method.as_str())?,
            installments: model.installments.map(|n| n.max(0) as u32),
            due_day: model.due_day.max(0) as u32,
            weekday,
            start_date: model.start_date,
            end_date: model.end_date,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
