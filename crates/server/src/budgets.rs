//! Budget API endpoints

use api_types::budget::{BudgetNew, BudgetStatus, BudgetView};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

fn view(budget: engine::Budget) -> BudgetView {
    let status = match budget.status() {
        engine::BudgetStatus::Active => BudgetStatus::Active,
        engine::BudgetStatus::Expired => BudgetStatus::Expired,
    };
    BudgetView {
        id: budget.id,
        description: budget.description,
        amount: budget.amount,
        end_date: budget.end_date,
        status,
        created_at: budget.created_at,
        updated_at: budget.updated_at,
    }
}

/// Handle requests for creating new `Budget`
pub async fn budget_new(
    State(state): State<ServerState>,
    Json(payload): Json<BudgetNew>,
) -> Result<(StatusCode, Json<BudgetView>), ServerError> {
    let mut cmd = engine::BudgetCmd::new(payload.description, payload.amount);
    if let Some(end_date) = payload.end_date {
        cmd = cmd.end_date(end_date);
    }
    let budget = state.engine.create_budget(cmd).await?;

    Ok((StatusCode::CREATED, Json(view(budget))))
}

/// Handle requests for a single `Budget`
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BudgetView>, ServerError> {
    let budget = state.engine.budget(id).await?;
    Ok(Json(view(budget)))
}
