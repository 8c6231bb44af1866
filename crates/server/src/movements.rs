//! Ledger movement API endpoints

use api_types::movement::{
    MovementKind, MovementList, MovementListResponse, MovementNew, MovementView,
};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};

use crate::{ServerError, server::ServerState};

const DEFAULT_PAGE_LIMIT: u64 = 20;

fn kind_to_engine(kind: MovementKind) -> engine::MovementKind {
    match kind {
        MovementKind::Income => engine::MovementKind::Income,
        MovementKind::Expense => engine::MovementKind::Expense,
        MovementKind::Transfer => engine::MovementKind::Transfer,
        MovementKind::Start => engine::MovementKind::Start,
    }
}

fn kind_from_engine(kind: engine::MovementKind) -> MovementKind {
    match kind {
        engine::MovementKind::Income => MovementKind::Income,
        engine::MovementKind::Expense => MovementKind::Expense,
        engine::MovementKind::Transfer => MovementKind::Transfer,
        engine::MovementKind::Start => MovementKind::Start,
    }
}

fn view(movement: engine::BudgetMovement) -> MovementView {
    MovementView {
        id: movement.id,
        budget_id: movement.budget_id,
        origin: movement.origin,
        origin_description: movement.origin_description,
        month: movement.month,
        year: movement.year,
        kind: kind_from_engine(movement.kind),
        amount: movement.amount,
        created_at: movement.created_at,
    }
}

/// Materialize the recurring movements missing for the current month.
///
/// Safe to call repeatedly: a second call within the same month creates
/// nothing.
pub async fn recurrent(State(state): State<ServerState>) -> Result<StatusCode, ServerError> {
    state.engine.create_recurrency_movements().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handle requests for recording a movement by hand
pub async fn movement_new(
    State(state): State<ServerState>,
    Json(payload): Json<MovementNew>,
) -> Result<(StatusCode, Json<MovementView>), ServerError> {
    let movement = state
        .engine
        .create_movement(engine::MovementCmd {
            budget_id: payload.budget_id,
            origin: payload.origin,
            kind: kind_to_engine(payload.kind),
            month: payload.month,
            year: payload.year,
            amount: payload.amount,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(view(movement))))
}

/// Handle requests for listing movements, newest first
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<MovementList>,
) -> Result<Json<MovementListResponse>, ServerError> {
    let filter = engine::MovementFilter {
        budget_id: query.budget_id,
        kind: query.kind.map(kind_to_engine),
        origin: query.origin,
        month: query.month,
        year: query.year,
    };
    let page = state
        .engine
        .list_movements(
            &filter,
            query.page.unwrap_or(1),
            query.limit.unwrap_or(DEFAULT_PAGE_LIMIT),
        )
        .await?;

    Ok(Json(MovementListResponse {
        movements: page.items.into_iter().map(view).collect(),
        page: page.page,
        limit: page.limit,
        total: page.total,
        total_pages: page.total_pages,
    }))
}
