use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use lockbox_core::{
    wallets::{NewWallet, WalletPatch, WalletView, WithdrawalReceipt},
    OwnerScope,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    error::{ApiJson, ApiResult},
    main_lib::AppState,
};

#[derive(Deserialize)]
struct AmountRequest {
    amount: Decimal,
}

async fn list_wallets(
    State(state): State<Arc<AppState>>,
    Extension(owner): Extension<OwnerScope>,
) -> ApiResult<Json<Vec<WalletView>>> {
    let wallets = state.wallet_service.list_wallets(&owner)?;
    Ok(Json(wallets))
}

async fn get_wallet(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(owner): Extension<OwnerScope>,
) -> ApiResult<Json<WalletView>> {
    let wallet = state.wallet_service.get_wallet(&id, &owner)?;
    Ok(Json(wallet))
}

async fn create_wallet(
    State(state): State<Arc<AppState>>,
    Extension(owner): Extension<OwnerScope>,
    ApiJson(new_wallet): ApiJson<NewWallet>,
) -> ApiResult<(StatusCode, Json<WalletView>)> {
    let wallet = state.wallet_service.create_wallet(&owner, new_wallet).await?;
    Ok((StatusCode::CREATED, Json(wallet)))
}

async fn update_wallet(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(owner): Extension<OwnerScope>,
    ApiJson(patch): ApiJson<WalletPatch>,
) -> ApiResult<Json<WalletView>> {
    let wallet = state.wallet_service.update_wallet(&id, &owner, patch).await?;
    Ok(Json(wallet))
}

async fn delete_wallet(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(owner): Extension<OwnerScope>,
) -> ApiResult<StatusCode> {
    state.wallet_service.delete_wallet(&id, &owner).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn deposit(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(owner): Extension<OwnerScope>,
    ApiJson(body): ApiJson<AmountRequest>,
) -> ApiResult<Json<WalletView>> {
    let wallet = state.wallet_service.deposit(&id, &owner, body.amount).await?;
    Ok(Json(wallet))
}

async fn withdraw(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(owner): Extension<OwnerScope>,
    ApiJson(body): ApiJson<AmountRequest>,
) -> ApiResult<Json<WithdrawalReceipt>> {
    let receipt = state.wallet_service.withdraw(&id, &owner, body.amount).await?;
    Ok(Json(receipt))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/wallets", get(list_wallets).post(create_wallet))
        .route(
            "/wallets/{id}",
            get(get_wallet).patch(update_wallet).delete(delete_wallet),
        )
        .route("/wallets/{id}/deposit", post(deposit))
        .route("/wallets/{id}/withdraw", post(withdraw))
}
