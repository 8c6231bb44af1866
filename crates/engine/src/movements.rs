//! Ledger movements.
//!
//! A `BudgetMovement` records that an origin (expense, income or budget)
//! affected a budget in a given month. Movements are facts: once stored they
//! are never updated.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, FromQueryResult, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, Period, ResultEngine, commands::MovementCmd, util::parse_uuid};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    Income,
    Expense,
    Transfer,
    /// Initial allocation of a budget for a period.
    Start,
}

impl MovementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Transfer => "transfer",
            Self::Start => "start",
        }
    }
}

impl TryFrom<&str> for MovementKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            "transfer" => Ok(Self::Transfer),
            "start" => Ok(Self::Start),
            other => Err(EngineError::Validation(format!(
                "invalid movement type: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetMovement {
    pub id: Uuid,
    pub budget_id: Uuid,
    /// Id of the expense, income or budget that generated the movement.
    pub origin: Uuid,
    /// Resolved on reads, never written.
    pub origin_description: Option<String>,
    pub month: u32,
    pub year: i32,
    pub kind: MovementKind,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

impl BudgetMovement {
    pub fn new(
        budget_id: Uuid,
        origin: Uuid,
        kind: MovementKind,
        period: Period,
        amount: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            budget_id,
            origin,
            origin_description: None,
            month: period.month,
            year: period.year,
            kind,
            amount,
            created_at: Utc::now(),
        }
    }

    pub fn period(&self) -> Period {
        Period {
            month: self.month,
            year: self.year,
        }
    }
}

impl TryFrom<MovementCmd> for BudgetMovement {
    type Error = EngineError;

    fn try_from(cmd: MovementCmd) -> Result<Self, Self::Error> {
        let period = Period::new(cmd.month, cmd.year)?;
        Ok(Self::new(cmd.budget_id, cmd.origin, cmd.kind, period, cmd.amount))
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "budget_movements")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub budget_id: String,
    pub origin: String,
    pub month: i32,
    pub year: i32,
    #[sea_orm(column_name = "type")]
    pub kind: String,
    pub amount: i64,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::budgets::Entity",
        from = "Column::BudgetId",
        to = "super::budgets::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Budget,
}

impl Related<super::budgets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Budget.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&BudgetMovement> for ActiveModel {
    fn from(movement: &BudgetMovement) -> Self {
        Self {
            id: ActiveValue::Set(movement.id.to_string()),
            budget_id: ActiveValue::Set(movement.budget_id.to_string()),
            origin: ActiveValue::Set(movement.origin.to_string()),
            month: ActiveValue::Set(movement.month as i32),
            year: ActiveValue::Set(movement.year),
            kind: ActiveValue::Set(movement.kind.as_str().to_string()),
            amount: ActiveValue::Set(movement.amount),
            created_at: ActiveValue::Set(movement.created_at),
        }
    }
}

/// A stored movement joined with the description of its origin.
#[derive(Clone, Debug, FromQueryResult)]
pub(crate) struct MovementRow {
    pub id: String,
    pub budget_id: String,
    pub origin: String,
    pub origin_description: Option<String>,
    pub month: i32,
    pub year: i32,
    pub kind: String,
    pub amount: i64,
    pub created_at: DateTimeUtc,
}

impl TryFrom<MovementRow> for BudgetMovement {
    type Error = EngineError;

    fn try_from(row: MovementRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&row.id, "movement")?,
            budget_id: parse_uuid(&row.budget_id, "budget")?,
            origin: parse_uuid(&row.origin, "origin")?,
            origin_description: row.origin_description,
            month: row.month.max(0) as u32,
            year: row.year,
            kind: MovementKind::try_from(row.kind.as_str())?,
            amount: row.amount,
            created_at: row.created_at,
        })
    }
}

impl TryFrom<Model> for BudgetMovement {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Self::try_from(MovementRow {
            id: model.id,
            budget_id: model.budget_id,
            origin: model.origin,
            origin_description: None,
            month: model.month,
            year: model.year,
            kind: model.kind,
            amount: model.amount,
            created_at: model.created_at,
        })
    }
}
