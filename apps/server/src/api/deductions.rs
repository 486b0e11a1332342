use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
    Extension, Json, Router,
};
use lockbox_core::{
    deductions::{DeductionPatch, DeductionSummary, NewScheduledDeduction, ScheduledDeduction},
    OwnerScope,
};

use crate::{
    error::{ApiJson, ApiResult},
    main_lib::AppState,
};

async fn list_deductions(
    Path(wallet_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(owner): Extension<OwnerScope>,
) -> ApiResult<Json<Vec<ScheduledDeduction>>> {
    let deductions = state.deduction_service.list_deductions(&wallet_id, &owner)?;
    Ok(Json(deductions))
}

async fn get_summary(
    Path(wallet_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(owner): Extension<OwnerScope>,
) -> ApiResult<Json<DeductionSummary>> {
    let summary = state.deduction_service.get_summary(&wallet_id, &owner)?;
    Ok(Json(summary))
}

async fn create_deduction(
    Path(wallet_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(owner): Extension<OwnerScope>,
    ApiJson(new_deduction): ApiJson<NewScheduledDeduction>,
) -> ApiResult<(StatusCode, Json<ScheduledDeduction>)> {
    let deduction = state
        .deduction_service
        .create_deduction(&wallet_id, &owner, new_deduction)
        .await?;
    Ok((StatusCode::CREATED, Json(deduction)))
}

async fn update_deduction(
    Path((wallet_id, deduction_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    Extension(owner): Extension<OwnerScope>,
    ApiJson(changes): ApiJson<DeductionPatch>,
) -> ApiResult<Json<ScheduledDeduction>> {
    let deduction = state
        .deduction_service
        .update_deduction(&deduction_id, &wallet_id, &owner, changes)
        .await?;
    Ok(Json(deduction))
}

async fn delete_deduction(
    Path((wallet_id, deduction_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    Extension(owner): Extension<OwnerScope>,
) -> ApiResult<StatusCode> {
    state
        .deduction_service
        .delete_deduction(&deduction_id, &wallet_id, &owner)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/wallets/{id}/deductions",
            get(list_deductions).post(create_deduction),
        )
        .route("/wallets/{id}/deductions/summary", get(get_summary))
        .route(
            "/wallets/{id}/deductions/{deduction_id}",
            patch(update_deduction).delete(delete_deduction),
        )
}
