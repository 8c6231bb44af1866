//! Dashboard API endpoints

use api_types::dashboard::{BudgetUtilization, PeriodQuery, Summary};
use axum::{
    Json,
    extract::{Query, State},
};
use engine::Period;

use crate::{ServerError, server::ServerState};

/// Income, expense and remaining totals of a month
pub async fn summary(
    State(state): State<ServerState>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<Summary>, ServerError> {
    let period = Period::new(query.month, query.year)?;
    let summary = state.engine.get_summary(period).await?;

    Ok(Json(Summary {
        total_income: summary.total_income,
        total_expense: summary.total_expense,
        total_remaining: summary.total_remaining,
    }))
}

/// Budgeted versus spent amounts of every budget active in a month
pub async fn utilization(
    State(state): State<ServerState>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<Vec<BudgetUtilization>>, ServerError> {
    let period = Period::new(query.month, query.year)?;
    let rows = state.engine.budget_utilization(period).await?;

    Ok(Json(
        rows.into_iter()
            .map(|row| BudgetUtilization {
                budget_id: row.budget_id,
                description: row.description,
                total_budgeted: row.summary.total_budgeted,
                total_spent: row.summary.total_spent,
                remaining: row.summary.remaining,
                percentage_spent: row.summary.percentage_spent,
            })
            .collect(),
    ))
}
