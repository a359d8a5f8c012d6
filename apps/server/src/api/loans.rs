use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};

use crate::api::CurrentUser;
use crate::error::ApiResult;
use crate::main_lib::AppState;
use billfold_core::loans::{LoanDetails, LoanSummary};

async fn list_loans(
    CurrentUser(user_id): CurrentUser,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<LoanSummary>>> {
    let loans = state.loan_service.list_active_loans(&user_id)?;
    Ok(Json(loans))
}

async fn pay_installment(
    CurrentUser(user_id): CurrentUser,
    Path(loan_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<LoanDetails>> {
    let loan = state
        .loan_service
        .pay_installment(&user_id, &loan_id)
        .await?;
    Ok(Json(loan))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/loans", get(list_loans))
        .route("/loans/{id}/pay", post(pay_installment))
}
