use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::api::CurrentUser;
use crate::error::ApiResult;
use crate::main_lib::AppState;
use billfold_core::reminders::{ChannelOutcome, ReminderChannel};
use billfold_core::settings::{ReminderSettings, ReminderSettingsUpdate};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TestReminderRequest {
    #[serde(rename = "type")]
    channel: ReminderChannel,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendReminderRequest {
    bill_id: String,
    #[serde(rename = "type")]
    channel: ReminderChannel,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SendReminderResponse {
    status: &'static str,
    channel: ReminderChannel,
    outcome: ChannelOutcome,
}

fn outcome_response(channel: ReminderChannel, outcome: ChannelOutcome) -> impl IntoResponse {
    let status = if outcome.success {
        StatusCode::OK
    } else {
        StatusCode::BAD_GATEWAY
    };
    let body = SendReminderResponse {
        status: if outcome.success { "success" } else { "error" },
        channel,
        outcome,
    };
    (status, Json(body))
}

async fn get_settings(
    CurrentUser(user_id): CurrentUser,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ReminderSettings>> {
    let settings = state.settings_service.get_or_create(&user_id).await?;
    Ok(Json(settings))
}

async fn update_settings(
    CurrentUser(user_id): CurrentUser,
    State(state): State<Arc<AppState>>,
    Json(update): Json<ReminderSettingsUpdate>,
) -> ApiResult<Json<ReminderSettings>> {
    let settings = state
        .settings_service
        .update_settings(&user_id, update)
        .await?;
    Ok(Json(settings))
}

async fn send_test_reminder(
    CurrentUser(user_id): CurrentUser,
    State(state): State<Arc<AppState>>,
    Json(request): Json<TestReminderRequest>,
) -> ApiResult<impl IntoResponse> {
    let outcome = state
        .reminder_service
        .send_test_message(&user_id, request.channel)
        .await?;
    Ok(outcome_response(request.channel, outcome))
}

async fn send_reminder(
    CurrentUser(user_id): CurrentUser,
    State(state): State<Arc<AppState>>,
    Json(request): Json<SendReminderRequest>,
) -> ApiResult<impl IntoResponse> {
    let outcome = state
        .reminder_service
        .send_manual_reminder(&user_id, &request.bill_id, request.channel)
        .await?;
    Ok(outcome_response(request.channel, outcome))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/reminders/settings",
            get(get_settings).put(update_settings),
        )
        .route("/reminders/test", post(send_test_reminder))
        .route("/reminders/send", post(send_reminder))
}
