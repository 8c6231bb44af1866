use axum::{
    Router,
    routing::{get, post},
};

use std::{net::SocketAddr, sync::Arc};

use crate::{budgets, dashboard, expenses, incomes, movements};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// Every route, mounted under `/api`.
pub fn router(state: ServerState) -> Router {
    let api = Router::new()
        .route("/movements", post(movements::movement_new).get(movements::list))
        .route("/movements/recurrent", post(movements::recurrent))
        .route("/dashboard/summary", get(dashboard::summary))
        .route("/dashboard/budget/utilization", get(dashboard::utilization))
        .route("/budgets", post(budgets::budget_new))
        .route("/budgets/{id}", get(budgets::get))
        .route("/expenses", post(expenses::expense_new))
        .route("/incomes", post(incomes::income_new));

    Router::new().nest("/api", api).with_state(state)
}

pub async fn run(engine: Arc<Engine>, addr: SocketAddr) {
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener on {addr}: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Arc<Engine>,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(ServerState { engine })).await
}

pub fn spawn_with_listener(
    engine: Arc<Engine>,
    listener: tokio::net::TcpListener,
) -> Result<SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
