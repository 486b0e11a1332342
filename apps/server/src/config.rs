use std::{net::SocketAddr, time::Duration};

use anyhow::{bail, Context};
use rust_decimal::Decimal;

use crate::auth::decode_secret_key;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// HS256 key used to verify caller tokens. Always 32 bytes.
    pub jwt_secret: Vec<u8>,
    /// Penalty applied to new wallets that do not specify one.
    pub default_penalty_percentage: Option<Decimal>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("LB_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid LB_LISTEN_ADDR")?;
        let db_path = std::env::var("LB_DB_PATH").unwrap_or_else(|_| "./db/app.db".into());
        let cors_allow = std::env::var("LB_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("LB_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        let jwt_secret = std::env::var("LB_JWT_SECRET")
            .context("LB_JWT_SECRET must be set")
            .and_then(|raw| decode_secret_key(&raw))?;
        let default_penalty_percentage = match std::env::var("LB_DEFAULT_PENALTY_PERCENTAGE") {
            Ok(raw) => Some(parse_penalty(&raw)?),
            Err(_) => None,
        };

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            jwt_secret,
            default_penalty_percentage,
        })
    }
}

fn parse_penalty(raw: &str) -> anyhow::Result<Decimal> {
    let value: Decimal = raw
        .trim()
        .parse()
        .context("Invalid LB_DEFAULT_PENALTY_PERCENTAGE")?;
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        bail!("LB_DEFAULT_PENALTY_PERCENTAGE must be between 0 and 100");
    }
    Ok(value)
}
