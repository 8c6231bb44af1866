//! The module contains the `Budget` type: a capped allocation of money,
//! optionally bounded in time.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine,
    util::{normalize_description, parse_uuid, validate_amount},
};

/// Derived status of a [`Budget`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    Active,
    Expired,
}

impl BudgetStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Expired => "expired",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: Uuid,
    pub amount: f64,
    /// Upper-cased description.
    pub description: String,
    /// `None` means open-ended.
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    pub fn new(amount: f64, description: &str, end_date: Option<NaiveDate>) -> ResultEngine<Self> {
        validate_amount(amount, "budget")?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            amount,
            description: normalize_description(description, "budget")?,
            end_date,
            created_at: now,
            updated_at: now,
        })
    }

    /// Status as seen on `today`: a budget stays active through its end date.
    pub fn status_on(&self, today: NaiveDate) -> BudgetStatus {
        match self.end_date {
            Some(end) if end < today => BudgetStatus::Expired,
            _ => BudgetStatus::Active,
        }
    }

    pub fn status(&self) -> BudgetStatus {
        self.status_on(Utc::now().date_naive())
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "budgets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(column_type = "Double")]
    pub amount: f64,
    pub description: String,
    pub end_date: Option<Date>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::expenses::Entity")]
    Expenses,
    #[sea_orm(has_many = "super::movements::Entity")]
    Movements,
}

impl Related<super::expenses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl Related<super::movements::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Movements.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Budget> for ActiveModel {
    fn from(budget: &Budget) -> Self {
        Self {
            id: ActiveValue::Set(budget.id.to_string()),
            amount: ActiveValue::Set(budget.amount),
            description: ActiveValue::Set(budget.description.clone()),
            end_date: ActiveValue::Set(budget.end_date),
            created_at: ActiveValue::Set(budget.created_at),
            updated_at: ActiveValue::Set(budget.updated_at),
        }
    }
}

impl TryFrom<Model> for Budget {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "budget")?,
            amount: model.amount,
            description: model.description,
            end_date: model.end_date,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn description_is_upper_cased() {
        let budget = Budget::new(500.0, "  groceries ", None).unwrap();
        assert_eq!(budget.description, "GROCERIES");
    }

    #[test]
    fn open_ended_budget_is_active() {
        let budget = Budget::new(500.0, "rent", None).unwrap();
        assert_eq!(budget.status_on(date(2099, 1, 1)), BudgetStatus::Active);
    }

    #[test]
    fn budget_is_active_through_end_date() {
        let budget = Budget::new(500.0, "rent", Some(date(2024, 6, 30))).unwrap();
        assert_eq!(budget.status_on(date(2024, 6, 30)), BudgetStatus::Active);
        assert_eq!(budget.status_on(date(2024, 7, 1)), BudgetStatus::Expired);
    }

    #[test]
    fn rejects_empty_description() {
        assert_eq!(
            Budget::new(10.0, "   ", None),
            Err(EngineError::Validation(
                "budget description must not be empty".to_string()
            ))
        );
    }

    #[test]
    fn rejects_negative_amount() {
        assert!(matches!(
            Budget::new(-1.0, "rent", None),
            Err(EngineError::Validation(_))
        ));
    }
}
