//! Income API endpoints

use api_types::income::{IncomeNew, IncomeType, IncomeView};
use axum::{Json, extract::State, http::StatusCode};

use crate::{ServerError, server::ServerState};

/// Handle requests for creating new `Income`
pub async fn income_new(
    State(state): State<ServerState>,
    Json(payload): Json<IncomeNew>,
) -> Result<(StatusCode, Json<IncomeView>), ServerError> {
    let kind = match payload.kind {
        IncomeType::Fixed => engine::IncomeType::Fixed,
        IncomeType::Variable => engine::IncomeType::Variable,
    };
    let mut cmd = engine::IncomeCmd::new(
        payload.description,
        payload.amount,
        kind,
        payload.due_day,
        payload.start_date,
    );
    if let Some(end_date) = payload.end_date {
        cmd = cmd.end_date(end_date);
    }
    let income = state.engine.create_income(cmd).await?;

    Ok((
        StatusCode::CREATED,
        Json(IncomeView {
            id: income.id,
            description: income.description,
            amount: income.amount,
            kind: payload.kind,
            due_day: income.due_day,
            start_date: income.start_date,
            end_date: income.end_date,
            created_at: income.created_at,
        }),
    ))
}
