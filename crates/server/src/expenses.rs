//! Expense API endpoints

use api_types::expense::{
    ExpenseNew, ExpenseType, ExpenseView, PaymentMethod, Recurrency, Weekday,
};
use axum::{Json, extract::State, http::StatusCode};

use crate::{ServerError, server::ServerState};

fn kind_to_engine(kind: ExpenseType) -> engine::ExpenseType {
    match kind {
        ExpenseType::Recurring => engine::ExpenseType::Recurring,
        ExpenseType::Single => engine::ExpenseType::Single,
        ExpenseType::CreditCard => engine::ExpenseType::CreditCard,
    }
}

fn method_to_engine(method: PaymentMethod) -> engine::PaymentMethod {
    match method {
        PaymentMethod::CreditCard => engine::PaymentMethod::CreditCard,
        PaymentMethod::Pix => engine::PaymentMethod::Pix,
        PaymentMethod::BankSlip => engine::PaymentMethod::BankSlip,
    }
}

fn recurrency_to_engine(recurrency: Recurrency) -> engine::Recurrency {
    match recurrency {
        Recurrency::Monthly => engine::Recurrency::Monthly,
        Recurrency::Weekly => engine::Recurrency::Weekly,
        Recurrency::Daily => engine::Recurrency::Daily,
    }
}

fn weekday_to_chrono(weekday: Weekday) -> chrono::Weekday {
    match weekday {
        Weekday::Monday => chrono::Weekday::Mon,
        Weekday::Tuesday => chrono::Weekday::Tue,
        Weekday::Wednesday => chrono::Weekday::Wed,
        Weekday::Thursday => chrono::Weekday::Thu,
        Weekday::Friday => chrono::Weekday::Fri,
        Weekday::Saturday => chrono::Weekday::Sat,
        Weekday::Sunday => chrono::Weekday::Sun,
    }
}

fn weekday_from_chrono(weekday: chrono::Weekday) -> Weekday {
    match weekday {
        chrono::Weekday::Mon => Weekday::Monday,
        chrono::Weekday::Tue => Weekday::Tuesday,
        chrono::Weekday::Wed => Weekday::Wednesday,
        chrono::Weekday::Thu => Weekday::Thursday,
        chrono::Weekday::Fri => Weekday::Friday,
        chrono::Weekday::Sat => Weekday::Saturday,
        chrono::Weekday::Sun => Weekday::Sunday,
    }
}

/// Handle requests for creating new `Expense`
///
/// The response carries the stored dates: credit card purchases come back
/// moved onto the billing day.
pub async fn expense_new(
    State(state): State<ServerState>,
    Json(payload): Json<ExpenseNew>,
) -> Result<(StatusCode, Json<ExpenseView>), ServerError> {
    let cmd = engine::ExpenseCmd {
        description: payload.description,
        amount: payload.amount,
        kind: kind_to_engine(payload.kind),
        method: method_to_engine(payload.method),
        budget_id: payload.budget_id,
        recurrency: payload.recurrency.map(recurrency_to_engine),
        installments: payload.installments,
        due_day: payload.due_day,
        weekday: payload.weekday.map(weekday_to_chrono),
        start_date: payload.start_date,
        end_date: payload.end_date,
    };
    let expense = state.engine.create_expense(cmd).await?;

    Ok((
        StatusCode::CREATED,
        Json(ExpenseView {
            id: expense.id,
            description: expense.description,
            amount: expense.amount,
            kind: payload.kind,
            method: payload.method,
            budget_id: expense.budget_id,
            recurrency: payload.recurrency,
            installments: expense.installments,
            due_day: expense.due_day,
            weekday: expense.weekday.map(weekday_from_chrono),
            start_date: expense.start_date,
            end_date: expense.end_date,
            created_at: expense.created_at,
        }),
    ))
}
