use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::api::CurrentUser;
use crate::error::ApiResult;
use crate::main_lib::AppState;
use billfold_core::bills::{
    Bill, BillFrequency, BillUpdate, NewBill, ReminderPreferences, ReminderPreferencesUpdate,
};
use billfold_core::errors::ValidationError;
use billfold_core::loans::NewLoanDetails;

/// Accepts RFC 3339 (with offset), a bare `YYYY-MM-DDTHH:MM:SS`, or a plain
/// date, matching what the mobile clients actually send.
fn parse_due_date(raw: &str) -> Result<NaiveDateTime, ValidationError> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt);
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(d.and_time(NaiveTime::MIN));
    }
    Err(ValidationError::InvalidInput(format!(
        "Invalid due date '{raw}'"
    )))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateBillRequest {
    account_name: String,
    name: String,
    amount: Decimal,
    due_date: String,
    category: Option<String>,
    frequency: Option<BillFrequency>,
    notes: Option<String>,
    reminder_preferences: Option<ReminderPreferences>,
    loan_details: Option<NewLoanDetails>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateBillRequest {
    account_name: Option<String>,
    name: Option<String>,
    amount: Option<Decimal>,
    due_date: Option<String>,
    category: Option<String>,
    frequency: Option<BillFrequency>,
    notes: Option<String>,
    reminder_preferences: Option<ReminderPreferencesUpdate>,
}

async fn list_bills(
    CurrentUser(user_id): CurrentUser,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Bill>>> {
    let bills = state.bill_service.list_bills(&user_id)?;
    Ok(Json(bills))
}

async fn create_bill(
    CurrentUser(user_id): CurrentUser,
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateBillRequest>,
) -> ApiResult<(StatusCode, Json<Bill>)> {
    let new_bill = NewBill {
        account_name: request.account_name,
        name: request.name,
        amount: request.amount,
        due_date: parse_due_date(&request.due_date)?,
        category: request.category,
        frequency: request.frequency,
        notes: request.notes,
        reminder_preferences: request.reminder_preferences,
        loan_details: request.loan_details,
    };
    let bill = state.bill_service.create_bill(&user_id, new_bill).await?;
    Ok((StatusCode::CREATED, Json(bill)))
}

async fn update_bill(
    CurrentUser(user_id): CurrentUser,
    Path(bill_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<UpdateBillRequest>,
) -> ApiResult<Json<Bill>> {
    let due_date = request.due_date.as_deref().map(parse_due_date).transpose()?;
    let update = BillUpdate {
        account_name: request.account_name,
        name: request.name,
        amount: request.amount,
        due_date,
        category: request.category,
        frequency: request.frequency,
        notes: request.notes,
        reminder_preferences: request.reminder_preferences,
    };
    let bill = state
        .bill_service
        .update_bill(&user_id, &bill_id, update)
        .await?;
    Ok(Json(bill))
}

async fn delete_bill(
    CurrentUser(user_id): CurrentUser,
    Path(bill_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.bill_service.delete_bill(&user_id, &bill_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn mark_bill_paid(
    CurrentUser(user_id): CurrentUser,
    Path(bill_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Bill>> {
    let bill = state.bill_service.mark_paid(&user_id, &bill_id).await?;
    Ok(Json(bill))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/bills", get(list_bills).post(create_bill))
        .route(
            "/bills/{id}",
            axum::routing::put(update_bill).delete(delete_bill),
        )
        .route("/bills/{id}/pay", post(mark_bill_paid))
}
