//! HTTP API surface.

mod bills;
mod loans;
mod reminders;

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::main_lib::AppState;

/// Authenticated caller identity.
///
/// Authentication itself is out of scope: the session layer in front of this
/// service resolves the caller and forwards the id in the `x-user-id` header.
pub struct CurrentUser(pub String);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get("x-user-id")
            .and_then(|value| value.to_str().ok())
            .filter(|id| !id.is_empty())
            .map(|id| CurrentUser(id.to_string()))
            .ok_or((
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "Missing user identity" })),
            ))
    }
}

pub fn app_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .merge(bills::router())
        .merge(loans::router())
        .merge(reminders::router());

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
