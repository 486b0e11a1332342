use std::sync::Arc;

use crate::{auth::AuthManager, config::Config};
use lockbox_core::{
    deductions::{DeductionService, DeductionServiceTrait},
    linked_accounts::{LinkedAccountService, LinkedAccountServiceTrait},
    wallets::{WalletService, WalletServiceTrait},
};
use lockbox_storage_sqlite::{
    db, DeductionRepository, LinkedAccountRepository, WalletRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub wallet_service: Arc<dyn WalletServiceTrait + Send + Sync>,
    pub deduction_service: Arc<dyn DeductionServiceTrait + Send + Sync>,
    pub linked_account_service: Arc<dyn LinkedAccountServiceTrait + Send + Sync>,
    pub auth: Arc<AuthManager>,
}

pub fn init_tracing() {
    let log_format = std::env::var("LB_LOG_FORMAT").unwrap_or_else(|_| "json".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let wallet_repo = Arc::new(WalletRepository::new(pool.clone(), writer.clone()));
    let mut wallet_service = WalletService::new(wallet_repo);
    if let Some(penalty) = config.default_penalty_percentage {
        tracing::info!("Default penalty percentage overridden to {}", penalty);
        wallet_service = wallet_service.with_default_penalty(penalty);
    }

    let deduction_repo = Arc::new(DeductionRepository::new(pool.clone(), writer.clone()));
    let deduction_service = Arc::new(DeductionService::new(deduction_repo));

    let linked_account_repo = Arc::new(LinkedAccountRepository::new(pool.clone(), writer));
    let linked_account_service = Arc::new(LinkedAccountService::new(linked_account_repo));

    Ok(Arc::new(AppState {
        wallet_service: Arc::new(wallet_service),
        deduction_service,
        linked_account_service,
        auth: Arc::new(AuthManager::new(&config.jwt_secret)),
    }))
}
