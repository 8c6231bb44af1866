//! The module contains the `Income` type: a recurring or one-off inflow.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine,
    commands::IncomeCmd,
    util::{normalize_description, parse_uuid, validate_amount, validate_due_day},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeType {
    Fixed,
    Variable,
}

impl IncomeType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Variable => "variable",
        }
    }
}

impl TryFrom<&str> for IncomeType {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "fixed" => Ok(Self::Fixed),
            "variable" => Ok(Self::Variable),
            other => Err(EngineError::Validation(format!(
                "invalid income type: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Income {
    pub id: Uuid,
    pub description: String,
    pub amount: f64,
    pub kind: IncomeType,
    pub due_day: u32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Income {
    pub fn new(cmd: IncomeCmd) -> ResultEngine<Self> {
        if cmd.kind == IncomeType::Variable && cmd.end_date.is_none() {
            return Err(EngineError::Validation(
                "variable incomes require an end date".to_string(),
            ));
        }
        validate_amount(cmd.amount, "income")?;
        validate_due_day(cmd.due_day, "income")?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            description: normalize_description(&cmd.description, "income")?,
            amount: cmd.amount,
            kind: cmd.kind,
            due_day: cmd.due_day,
            start_date: cmd.start_date,
            end_date: cmd.end_date,
            created_at: now,
            updated_at: now,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "incomes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub description: String,
    #[sea_orm(column_type = "Double")]
    pub amount: f64,
    #[sea_orm(column_name = "type")]
    pub kind: String,
    pub due_day: i32,
    pub start_date: Date,
    pub end_date: Option<Date>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Income> for ActiveModel {
    fn from(income: &Income) -> Self {
        Self {
            id: ActiveValue::Set(income.id.to_string()),
            description: ActiveValue::Set(income.description.clone()),
            amount: ActiveValue::Set(income.amount),
            kind: ActiveValue::Set(income.kind.as_str().to_string()),
            due_day: ActiveValue::Set(income.due_day as i32),
            start_date: ActiveValue::Set(income.start_date),
            end_date: ActiveValue::Set(income.end_date),
            created_at: ActiveValue::Set(income.created_at),
            updated_at: ActiveValue::Set(income.updated_at),
        }
    }
}

impl TryFrom<Model> for Income {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "income")?,
            description: model.description,
            amount: model.amount,
            kind: IncomeType::try_from(model.kind.as_str())?,
            due_day: model.due_day.max(0) as u32,
            start_date: model.start_date,
            end_date: model.end_date,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn variable_income_requires_end_date() {
        let cmd = IncomeCmd::new("freelance", 1200.0, IncomeType::Variable, 5, start());
        assert_eq!(
            Income::new(cmd.clone()),
            Err(EngineError::Validation(
                "variable incomes require an end date".to_string()
            ))
        );

        let income = Income::new(cmd.end_date(NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()))
            .unwrap();
        assert_eq!(income.kind, IncomeType::Variable);
        assert_eq!(income.description, "FREELANCE");
    }

    #[test]
    fn fixed_income_is_open_ended() {
        let income = Income::new(IncomeCmd::new("salary", 5000.0, IncomeType::Fixed, 5, start()))
            .unwrap();
        assert_eq!(income.end_date, None);
    }
}
