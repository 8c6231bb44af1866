use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod budget {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum BudgetStatus {
        Active,
        Expired,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetNew {
        pub description: String,
        pub amount: f64,
        /// Last day the budget is active. Absent means open-ended.
        pub end_date: Option<NaiveDate>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetView {
        pub id: Uuid,
        pub description: String,
        pub amount: f64,
        pub end_date: Option<NaiveDate>,
        pub status: BudgetStatus,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }
}

pub mod expense {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum ExpenseType {
        Recurring,
        Single,
        CreditCard,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Recurrency {
        Monthly,
        Weekly,
        Daily,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum PaymentMethod {
        CreditCard,
        Pix,
        BankSlip,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Weekday {
        Monday,
        Tuesday,
        Wednesday,
        Thursday,
        Friday,
        Saturday,
        Sunday,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub description: String,
        pub amount: f64,
        #[serde(rename = "type")]
        pub kind: ExpenseType,
        pub method: PaymentMethod,
        pub budget_id: Option<Uuid>,
        /// Required for `recurring` expenses.
        pub recurrency: Option<Recurrency>,
        pub installments: Option<u32>,
        pub due_day: u32,
        /// Required for `weekly` recurrency.
        pub weekday: Option<Weekday>,
        pub start_date: NaiveDate,
        pub end_date: Option<NaiveDate>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: Uuid,
        pub description: String,
        pub amount: f64,
        #[serde(rename = "type")]
        pub kind: ExpenseType,
        pub method: PaymentMethod,
        pub budget_id: Option<Uuid>,
        pub recurrency: Option<Recurrency>,
        pub installments: Option<u32>,
        pub due_day: u32,
        pub weekday: Option<Weekday>,
        /// For credit card purchases, the billing date.
        pub start_date: NaiveDate,
        pub end_date: Option<NaiveDate>,
        pub created_at: DateTime<Utc>,
    }
}

pub mod income {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum IncomeType {
        Fixed,
        Variable,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct IncomeNew {
        pub description: String,
        pub amount: f64,
        #[serde(rename = "type")]
        pub kind: IncomeType,
        pub due_day: u32,
        pub start_date: NaiveDate,
        /// Required for `variable` incomes.
        pub end_date: Option<NaiveDate>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct IncomeView {
        pub id: Uuid,
        pub description: String,
        pub amount: f64,
        #[serde(rename = "type")]
        pub kind: IncomeType,
        pub due_day: u32,
        pub start_date: NaiveDate,
        pub end_date: Option<NaiveDate>,
        pub created_at: DateTime<Utc>,
    }
}

pub mod movement {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum MovementKind {
        Income,
        Expense,
        Transfer,
        Start,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MovementNew {
        pub budget_id: Uuid,
        pub origin: Uuid,
        #[serde(rename = "type")]
        pub kind: MovementKind,
        pub month: u32,
        pub year: i32,
        /// Signed, whole units.
        pub amount: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MovementView {
        pub id: Uuid,
        pub budget_id: Uuid,
        pub origin: Uuid,
        /// Description of the income, expense or budget behind the movement.
        pub origin_description: Option<String>,
        pub month: u32,
        pub year: i32,
        #[serde(rename = "type")]
        pub kind: MovementKind,
        pub amount: i64,
        pub created_at: DateTime<Utc>,
    }

    /// Query string of `GET /api/movements`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct MovementList {
        pub budget_id: Option<Uuid>,
        #[serde(rename = "type")]
        pub kind: Option<MovementKind>,
        pub origin: Option<Uuid>,
        pub month: Option<u32>,
        pub year: Option<i32>,
        /// 1-based, defaults to 1.
        pub page: Option<u64>,
        /// Defaults to 20.
        pub limit: Option<u64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MovementListResponse {
        pub movements: Vec<MovementView>,
        pub page: u64,
        pub limit: u64,
        pub total: u64,
        pub total_pages: u64,
    }
}

pub mod dashboard {
    use super::*;

    /// Query string selecting a month.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct PeriodQuery {
        pub month: u32,
        pub year: i32,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Summary {
        pub total_income: f64,
        pub total_expense: f64,
        pub total_remaining: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetUtilization {
        pub budget_id: Uuid,
        pub description: String,
        pub total_budgeted: f64,
        pub total_spent: f64,
        pub remaining: f64,
        pub percentage_spent: f64,
    }
}
