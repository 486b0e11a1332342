use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Extension, Json, Router,
};
use lockbox_core::{
    linked_accounts::{LinkedAccount, NewLinkedAccount},
    OwnerScope,
};

use crate::{
    error::{ApiJson, ApiResult},
    main_lib::AppState,
};

async fn list_linked_accounts(
    State(state): State<Arc<AppState>>,
    Extension(owner): Extension<OwnerScope>,
) -> ApiResult<Json<Vec<LinkedAccount>>> {
    let accounts = state.linked_account_service.list_linked_accounts(&owner)?;
    Ok(Json(accounts))
}

async fn link_account(
    State(state): State<Arc<AppState>>,
    Extension(owner): Extension<OwnerScope>,
    ApiJson(account): ApiJson<NewLinkedAccount>,
) -> ApiResult<(StatusCode, Json<LinkedAccount>)> {
    let linked = state
        .linked_account_service
        .link_account(&owner, account)
        .await?;
    Ok((StatusCode::CREATED, Json(linked)))
}

async fn unlink_account(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(owner): Extension<OwnerScope>,
) -> ApiResult<StatusCode> {
    state
        .linked_account_service
        .unlink_account(&id, &owner)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/linked-accounts",
            get(list_linked_accounts).post(link_account),
        )
        .route("/linked-accounts/{id}", delete(unlink_account))
}
