use chrono::NaiveDate;
use sea_orm::{
    Condition, QueryFilter, Statement, TransactionTrait, prelude::*, sea_query::Query,
};
use uuid::Uuid;

use crate::{
    Budget, BudgetMovement, Expense, ExpenseType, MovementKind, PaymentMethod, Period, ResultEngine,
    budgets, expenses, movements,
    store::{MovementStore, TotalsStore},
};

use super::{Engine, find_budget, with_tx};

/// Rows per INSERT statement when persisting a batch of movements.
const INSERT_CHUNK: usize = 50;

/// Origins that already own a movement of `kind` in `period`.
fn materialized_origins(period: Period, kind: MovementKind) -> sea_orm::sea_query::SelectStatement {
    Query::select()
        .column(movements::Column::Origin)
        .from(movements::Entity)
        .and_where(movements::Column::Month.eq(period.month as i32))
        .and_where(movements::Column::Year.eq(period.year))
        .and_where(movements::Column::Kind.eq(kind.as_str()))
        .to_owned()
}

impl Engine {
    /// Sum of income amounts whose validity window overlaps `period`.
    async fn income_sum(&self, period: Period) -> ResultEngine<f64> {
        let stmt = Statement::from_sql_and_values(
            self.database.get_database_backend(),
            "SELECT COALESCE(SUM(amount), 0.0) AS sum \
             FROM incomes \
             WHERE start_date <= ? \
               AND (end_date IS NULL OR end_date >= ?)",
            vec![period.last_day().into(), period.first_day().into()],
        );
        self.query_sum(stmt).await
    }

    /// Sum of expense amounts charged to `period`.
    ///
    /// Non card recurring expenses and card purchases split into installments
    /// are charged over their whole window. Everything else is charged once,
    /// in the month of its start date.
    async fn expense_sum(&self, period: Period) -> ResultEngine<f64> {
        let card = PaymentMethod::CreditCard.as_str();
        let stmt = Statement::from_sql_and_values(
            self.database.get_database_backend(),
            "SELECT COALESCE(SUM(amount), 0.0) AS sum \
             FROM expenses \
             WHERE start_date <= ? \
               AND (start_date >= ? \
                    OR (((method = ? AND end_date IS NOT NULL) \
                         OR (method <> ? AND type = ?)) \
                        AND (end_date IS NULL OR end_date >= ?)))",
            vec![
                period.last_day().into(),
                period.first_day().into(),
                card.into(),
                card.into(),
                ExpenseType::Recurring.as_str().into(),
                period.first_day().into(),
            ],
        );
        self.query_sum(stmt).await
    }

    async fn query_sum(&self, stmt: Statement) -> ResultEngine<f64> {
        let row = self.database.query_one(stmt).await?;
        Ok(row.and_then(|r| r.try_get("", "sum").ok()).unwrap_or(0.0))
    }
}

impl MovementStore for Engine {
    async fn budget(&self, id: Uuid) -> ResultEngine<Budget> {
        find_budget(&self.database, id).await
    }

    async fn expenses_without_movement(&self, period: Period) -> ResultEngine<Vec<Expense>> {
        let models = expenses::Entity::find()
            .filter(expenses::Column::Kind.eq(ExpenseType::Recurring.as_str()))
            .filter(expenses::Column::Method.ne(PaymentMethod::CreditCard.as_str()))
            .filter(expenses::Column::BudgetId.is_not_null())
            .filter(expenses::Column::StartDate.lte(period.last_day()))
            .filter(
                Condition::any()
                    .add(expenses::Column::EndDate.is_null())
                    .add(expenses::Column::EndDate.gte(period.first_day())),
            )
            .filter(
                expenses::Column::Id
                    .not_in_subquery(materialized_origins(period, MovementKind::Expense)),
            )
            .all(&self.database)
            .await?;

        models.into_iter().map(Expense::try_from).collect()
    }

    async fn budgets_without_start_movement(
        &self,
        period: Period,
        today: NaiveDate,
    ) -> ResultEngine<Vec<Budget>> {
        let models = budgets::Entity::find()
            .filter(
                Condition::any()
                    .add(budgets::Column::EndDate.is_null())
                    .add(budgets::Column::EndDate.gte(today)),
            )
            .filter(
                budgets::Column::Id
                    .not_in_subquery(materialized_origins(period, MovementKind::Start)),
            )
            .all(&self.database)
            .await?;

        models.into_iter().map(Budget::try_from).collect()
    }

    async fn create_movements(&self, batch: &[BudgetMovement]) -> ResultEngine<()> {
        if batch.is_empty() {
            return Ok(());
        }
        with_tx!(self, |db_tx| {
            for chunk in batch.chunks(INSERT_CHUNK) {
                movements::Entity::insert_many(chunk.iter().map(movements::ActiveModel::from))
                    .exec_without_returning(&db_tx)
                    .await?;
            }
            tracing::debug!("stored {} movement(s)", batch.len());
            Ok(())
        })
    }
}

impl TotalsStore for Engine {
    async fn income_total(&self, period: Period) -> ResultEngine<f64> {
        self.income_sum(period).await
    }

    async fn expense_total(&self, period: Period) -> ResultEngine<f64> {
        self.expense_sum(period).await
    }
}
