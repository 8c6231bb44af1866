use sea_orm::{FromQueryResult, Statement, TransactionTrait, Value, prelude::*};
use uuid::Uuid;

use crate::{
    BudgetMovement, BudgetSummary, BudgetUtilization, EngineError, MovementCmd, MovementKind,
    Period, ResultEngine, movements,
    movements::MovementRow,
    util::parse_uuid,
};

use super::{Engine, find_budget, with_tx};

/// Largest page `list_movements` returns.
pub const MAX_PAGE_LIMIT: u64 = 100;

/// Filters for listing movements. Every field left `None` matches all rows.
#[derive(Clone, Debug, Default)]
pub struct MovementFilter {
    pub budget_id: Option<Uuid>,
    pub kind: Option<MovementKind>,
    pub origin: Option<Uuid>,
    pub month: Option<u32>,
    pub year: Option<i32>,
}

/// One page of movements, newest first.
#[derive(Clone, Debug, PartialEq)]
pub struct MovementPage {
    pub items: Vec<BudgetMovement>,
    /// 1-based.
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl MovementFilter {
    /// `WHERE` clause and its bound values.
    fn where_clause(&self) -> (String, Vec<Value>) {
        let mut clause = String::from(" WHERE 1 = 1");
        let mut values: Vec<Value> = Vec::new();

        if let Some(budget_id) = self.budget_id {
            clause.push_str(" AND bm.budget_id = ?");
            values.push(budget_id.to_string().into());
        }
        if let Some(kind) = self.kind {
            clause.push_str(" AND bm.type = ?");
            values.push(kind.as_str().into());
        }
        if let Some(origin) = self.origin {
            clause.push_str(" AND bm.origin = ?");
            values.push(origin.to_string().into());
        }
        if let Some(month) = self.month {
            clause.push_str(" AND bm.month = ?");
            values.push((month as i32).into());
        }
        if let Some(year) = self.year {
            clause.push_str(" AND bm.year = ?");
            values.push(year.into());
        }
        (clause, values)
    }
}

const MOVEMENTS_FROM: &str = "FROM budget_movements bm \
     LEFT JOIN incomes i ON bm.origin = i.id AND bm.type = 'income' \
     LEFT JOIN expenses e ON bm.origin = e.id AND bm.type = 'expense' \
     LEFT JOIN budgets b ON bm.origin = b.id AND bm.type = 'start'";

#[derive(Debug, FromQueryResult)]
struct UtilizationRow {
    budget_id: String,
    description: String,
    budgeted: i64,
    spent: i64,
}

impl Engine {
    /// Record a movement by hand.
    ///
    /// The target budget must exist; the origin is stored as given.
    pub async fn create_movement(&self, cmd: MovementCmd) -> ResultEngine<BudgetMovement> {
        let movement = BudgetMovement::try_from(cmd)?;
        with_tx!(self, |db_tx| {
            find_budget(&db_tx, movement.budget_id).await?;
            let model: movements::ActiveModel = (&movement).into();
            model.insert(&db_tx).await?;
            tracing::info!(
                "created {} movement {} on budget {}",
                movement.kind.as_str(),
                movement.id,
                movement.budget_id
            );
            Ok(movement)
        })
    }

    /// List movements matching `filter`, newest first.
    ///
    /// `page` is 1-based; `limit` must be between 1 and [`MAX_PAGE_LIMIT`].
    /// Each movement carries the description of its origin.
    pub async fn list_movements(
        &self,
        filter: &MovementFilter,
        page: u64,
        limit: u64,
    ) -> ResultEngine<MovementPage> {
        if page == 0 {
            return Err(EngineError::Validation("page must be >= 1".to_string()));
        }
        if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
            return Err(EngineError::Validation(format!(
                "limit must be between 1 and {MAX_PAGE_LIMIT}"
            )));
        }
        if let Some(month) = filter.month {
            Period::new(month, filter.year.unwrap_or(1))?;
        }

        let backend = self.database.get_database_backend();
        let (clause, values) = filter.where_clause();

        let total: i64 = {
            let stmt = Statement::from_sql_and_values(
                backend,
                format!("SELECT COUNT(1) AS count {MOVEMENTS_FROM}{clause}"),
                values.clone(),
            );
            let row = self.database.query_one(stmt).await?;
            row.and_then(|r| r.try_get("", "count").ok()).unwrap_or(0)
        };

        let mut paged_values = values;
        paged_values.push((limit as i64).into());
        paged_values.push((page.saturating_sub(1).saturating_mul(limit) as i64).into());
        let rows = MovementRow::find_by_statement(Statement::from_sql_and_values(
            backend,
            format!(
                "SELECT bm.id, bm.budget_id, bm.origin, bm.month, bm.year, \
                        bm.type AS kind, bm.amount, bm.created_at, \
                        COALESCE(i.description, e.description, b.description) AS origin_description \
                 {MOVEMENTS_FROM}{clause} \
                 ORDER BY bm.created_at DESC, bm.id \
                 LIMIT ? OFFSET ?"
            ),
            paged_values,
        ))
        .all(&self.database)
        .await?;

        let items = rows
            .into_iter()
            .map(BudgetMovement::try_from)
            .collect::<ResultEngine<Vec<_>>>()?;
        let total = total.max(0) as u64;

        Ok(MovementPage {
            items,
            page,
            limit,
            total,
            total_pages: total.div_ceil(limit),
        })
    }

    /// Budgeted versus spent amounts of every budget with movements in
    /// `period`.
    ///
    /// The budgeted amount is the sum of `start` movements and the spent
    /// amount the sum of `expense` movements.
    pub async fn budget_utilization(&self, period: Period) -> ResultEngine<Vec<BudgetUtilization>> {
        let rows = UtilizationRow::find_by_statement(Statement::from_sql_and_values(
            self.database.get_database_backend(),
            "SELECT b.id AS budget_id, b.description AS description, \
                    COALESCE(SUM(CASE WHEN bm.type = ? THEN bm.amount ELSE 0 END), 0) AS budgeted, \
                    COALESCE(SUM(CASE WHEN bm.type = ? THEN bm.amount ELSE 0 END), 0) AS spent \
             FROM budget_movements bm \
             JOIN budgets b ON b.id = bm.budget_id \
             WHERE bm.month = ? AND bm.year = ? \
             GROUP BY b.id, b.description \
             ORDER BY b.description",
            vec![
                MovementKind::Start.as_str().into(),
                MovementKind::Expense.as_str().into(),
                (period.month as i32).into(),
                period.year.into(),
            ],
        ))
        .all(&self.database)
        .await?;

        rows.into_iter()
            .map(|row| {
                Ok(BudgetUtilization {
                    budget_id: parse_uuid(&row.budget_id, "budget")?,
                    description: row.description,
                    summary: BudgetSummary::new(row.budgeted as f64, row.spent as f64),
                })
            })
            .collect()
    }
}
