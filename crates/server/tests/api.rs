use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use migration::MigratorTrait;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use engine::Engine;
use server::ServerState;

async fn app() -> (Router, Arc<Engine>) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Arc::new(Engine::builder().database(db).build().await.unwrap());
    let router = server::router(ServerState {
        engine: engine.clone(),
    });
    (router, engine)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn create_budget(app: &Router, description: &str, amount: f64) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/budgets",
        Some(json!({ "description": description, "amount": amount })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn recurrent_route_returns_204_and_is_idempotent() {
    let (app, _) = app().await;
    let budget_id = create_budget(&app, "groceries", 600.0).await;

    let (first, body) = send(&app, "POST", "/api/movements/recurrent", None).await;
    let (second, _) = send(&app, "POST", "/api/movements/recurrent", None).await;

    assert_eq!(first, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);
    assert_eq!(second, StatusCode::NO_CONTENT);

    let (status, page) = send(
        &app,
        "GET",
        &format!("/api/movements?type=start&budget_id={budget_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 1);
    assert_eq!(page["movements"][0]["amount"], 600);
    assert_eq!(page["movements"][0]["origin_description"], "GROCERIES");
}

#[tokio::test]
async fn credit_card_expense_is_billed_and_split() {
    let (app, engine) = app().await;
    let _handler = engine::spawn_expense_created_handler(engine.clone());
    let budget_id = create_budget(&app, "electronics", 3000.0).await;

    let (status, expense) = send(
        &app,
        "POST",
        "/api/expenses",
        Some(json!({
            "description": "Laptop",
            "amount": 900.5,
            "type": "credit_card",
            "method": "credit_card",
            "budget_id": budget_id,
            "installments": 3,
            "due_day": 10,
            "start_date": "2024-11-20",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(expense["start_date"], "2024-12-15");
    assert_eq!(expense["end_date"], "2025-02-15");

    let uri = format!("/api/movements?origin={}", expense["id"].as_str().unwrap());
    let mut page = Value::Null;
    for _ in 0..50 {
        page = send(&app, "GET", &uri, None).await.1;
        if page["total"] == 3 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(page["total"], 3);

    let mut periods: Vec<(i64, i64)> = page["movements"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| (m["year"].as_i64().unwrap(), m["month"].as_i64().unwrap()))
        .collect();
    periods.sort();
    assert_eq!(periods, vec![(2024, 12), (2025, 1), (2025, 2)]);
    assert!(
        page["movements"]
            .as_array()
            .unwrap()
            .iter()
            .all(|m| m["amount"] == 900 && m["origin_description"] == "Laptop")
    );
}

#[tokio::test]
async fn invalid_expense_maps_to_422() {
    let (app, _) = app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/expenses",
        Some(json!({
            "description": "gym",
            "amount": 90.0,
            "type": "recurring",
            "method": "pix",
            "due_day": 5,
            "start_date": "2024-01-01",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("recurrency"));
}

#[tokio::test]
async fn unknown_budget_maps_to_404() {
    let (app, _) = app().await;

    let (status, body) = send(&app, "GET", &format!("/api/budgets/{}", Uuid::new_v4()), None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn budget_can_be_fetched_after_creation() {
    let (app, _) = app().await;
    let budget_id = create_budget(&app, "  rent ", 1500.0).await;

    let (status, body) = send(&app, "GET", &format!("/api/budgets/{budget_id}"), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["description"], "RENT");
    assert_eq!(body["status"], "active");
}

#[tokio::test]
async fn summary_reports_remaining() {
    let (app, _) = app().await;
    let (status, _) = send(
        &app,
        "POST",
        "/api/incomes",
        Some(json!({
            "description": "salary",
            "amount": 5000.0,
            "type": "fixed",
            "due_day": 5,
            "start_date": "2024-01-01",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = send(
        &app,
        "POST",
        "/api/expenses",
        Some(json!({
            "description": "rent",
            "amount": 3200.0,
            "type": "single",
            "method": "bank_slip",
            "due_day": 10,
            "start_date": "2024-06-10",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, summary) = send(&app, "GET", "/api/dashboard/summary?month=6&year=2024", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        summary,
        json!({ "total_income": 5000.0, "total_expense": 3200.0, "total_remaining": 1800.0 })
    );
}

#[tokio::test]
async fn summary_rejects_invalid_month() {
    let (app, _) = app().await;

    let (status, _) = send(&app, "GET", "/api/dashboard/summary?month=13&year=2024", None).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn utilization_compares_start_and_expense_movements() {
    let (app, _) = app().await;
    let budget_id = create_budget(&app, "groceries", 1000.0).await;

    for (kind, amount) in [("start", 1000), ("expense", 250), ("expense", 150)] {
        let (status, movement) = send(
            &app,
            "POST",
            "/api/movements",
            Some(json!({
                "budget_id": budget_id,
                "origin": budget_id,
                "type": kind,
                "month": 6,
                "year": 2024,
                "amount": amount,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(movement["type"], kind);
    }

    let (status, body) = send(
        &app,
        "GET",
        "/api/dashboard/budget/utilization?month=6&year=2024",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["budget_id"], budget_id.as_str());
    assert_eq!(rows[0]["total_budgeted"], 1000.0);
    assert_eq!(rows[0]["total_spent"], 400.0);
    assert_eq!(rows[0]["remaining"], 600.0);
    assert_eq!(rows[0]["percentage_spent"], 40.0);
}

#[tokio::test]
async fn movement_on_unknown_budget_maps_to_404() {
    let (app, _) = app().await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/movements",
        Some(json!({
            "budget_id": Uuid::new_v4(),
            "origin": Uuid::new_v4(),
            "type": "transfer",
            "month": 6,
            "year": 2024,
            "amount": -50,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn movement_list_is_paginated() {
    let (app, _) = app().await;
    let budget_id = create_budget(&app, "misc", 100.0).await;
    for month in 1..=5 {
        let (status, _) = send(
            &app,
            "POST",
            "/api/movements",
            Some(json!({
                "budget_id": budget_id,
                "origin": budget_id,
                "type": "transfer",
                "month": month,
                "year": 2024,
                "amount": 10,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, page) = send(&app, "GET", "/api/movements?page=2&limit=2", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 5);
    assert_eq!(page["total_pages"], 3);
    assert_eq!(page["movements"].as_array().unwrap().len(), 2);

    let (status, _) = send(&app, "GET", "/api/movements?page=0", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}
