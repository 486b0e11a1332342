use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use jsonwebtoken::{encode, EncodingKey, Header};
use lockbox_server::{api::app_router, auth::Claims, build_state, config::Config};
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

const SECRET: &[u8; 32] = b"lockbox-test-secret-0123456789ab";

async fn build_test_router() -> (Router, TempDir) {
    let tmp = tempdir().unwrap();
    let config = Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path: tmp.path().join("test.db").to_string_lossy().to_string(),
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(30),
        jwt_secret: SECRET.to_vec(),
        default_penalty_percentage: None,
    };
    let state = build_state(&config).await.unwrap();
    (app_router(state, &config), tmp)
}

fn token_for(owner: &str) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize;
    let claims = Claims {
        sub: owner.to_string(),
        exp: now + 3600,
        iat: Some(now),
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET)).unwrap()
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    owner: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(owner) = owner {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token_for(owner)));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).to_string())
        })
    };
    (status, value)
}

async fn create_wallet(app: &Router, owner: &str, body: Value) -> Value {
    let (status, wallet) = send(app, Method::POST, "/api/v1/wallets", Some(owner), Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {wallet}");
    wallet
}

#[tokio::test]
async fn healthz_is_public() {
    let (app, _tmp) = build_test_router().await;
    let (status, body) = send(&app, Method::GET, "/api/v1/healthz", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("ok".to_string()));
}

#[tokio::test]
async fn requests_without_token_are_rejected() {
    let (app, _tmp) = build_test_router().await;

    let (status, body) = send(&app, Method::GET, "/api/v1/wallets", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 401);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/wallets")
                .header(header::AUTHORIZATION, "Bearer not-a-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_returns_enriched_wallet() {
    let (app, _tmp) = build_test_router().await;
    let wallet = create_wallet(
        &app,
        "alice",
        json!({ "name": "  Emergency fund ", "targetAmount": 1000, "targetDate": "2099-01-01" }),
    )
    .await;

    assert_eq!(wallet["name"], "Emergency fund");
    assert_eq!(wallet["currentAmount"], json!(0.0));
    assert_eq!(wallet["isLocked"], true);
    assert_eq!(wallet["penaltyPercentage"], json!(10.0));
    assert_eq!(wallet["lockStatus"], "locked");
    assert_eq!(wallet["canWithdrawWithoutPenalty"], false);
    assert_eq!(wallet["progressPercentage"], json!(0.0));
    assert_eq!(wallet["deductionCount"], 0);
    assert!(wallet["daysRemaining"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn invalid_create_is_bad_request_and_stores_nothing() {
    let (app, _tmp) = build_test_router().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/wallets",
        Some("alice"),
        Some(json!({ "name": "Car", "targetAmount": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/wallets",
        Some("alice"),
        Some(json!({ "targetAmount": 100 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, list) = send(&app, Method::GET, "/api/v1/wallets", Some("alice"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn wallets_are_owner_scoped() {
    let (app, _tmp) = build_test_router().await;
    let wallet = create_wallet(&app, "alice", json!({ "name": "Car", "targetAmount": 500 })).await;
    let uri = format!("/api/v1/wallets/{}", wallet["id"].as_str().unwrap());

    let (status, _) = send(&app, Method::GET, &uri, Some("mallory"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &uri, Some("mallory"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, list) = send(&app, Method::GET, "/api/v1/wallets", Some("mallory"), None).await;
    assert_eq!(list, json!([]));

    let (status, _) = send(&app, Method::GET, &uri, Some("alice"), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn patch_semantics() {
    let (app, _tmp) = build_test_router().await;
    let wallet = create_wallet(
        &app,
        "alice",
        json!({ "name": "House", "targetAmount": 1000, "targetDate": "2099-01-01" }),
    )
    .await;
    let uri = format!("/api/v1/wallets/{}", wallet["id"].as_str().unwrap());

    let (status, body) = send(&app, Method::PATCH, &uri, Some("alice"), Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("no fields to update"));

    let (status, renamed) = send(
        &app,
        Method::PATCH,
        &uri,
        Some("alice"),
        Some(json!({ "name": "Bigger house" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(renamed["name"], "Bigger house");
    assert_eq!(renamed["targetAmount"], wallet["targetAmount"]);
    assert_eq!(renamed["targetDate"], "2099-01-01");

    let (status, cleared) = send(
        &app,
        Method::PATCH,
        &uri,
        Some("alice"),
        Some(json!({ "targetDate": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cleared["targetDate"], Value::Null);
    assert_eq!(cleared["lockStatus"], "locked");
    assert_eq!(cleared["daysRemaining"], 0);
}

#[tokio::test]
async fn balance_and_delete_lifecycle() {
    let (app, _tmp) = build_test_router().await;
    let wallet = create_wallet(
        &app,
        "alice",
        json!({ "name": "Bike", "targetAmount": 1000, "targetDate": "2099-01-01" }),
    )
    .await;
    let id = wallet["id"].as_str().unwrap();
    let uri = format!("/api/v1/wallets/{id}");

    let (status, deposited) = send(
        &app,
        Method::POST,
        &format!("{uri}/deposit"),
        Some("alice"),
        Some(json!({ "amount": 250 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deposited["progressPercentage"], json!(25.0));
    assert_eq!(deposited["potentialPenalty"], json!(25.0));

    let (status, body) = send(&app, Method::DELETE, &uri, Some("alice"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 409);

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("{uri}/withdraw"),
        Some("alice"),
        Some(json!({ "amount": 300 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, receipt) = send(
        &app,
        Method::POST,
        &format!("{uri}/withdraw"),
        Some("alice"),
        Some(json!({ "amount": 250 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(receipt["penalty"], json!(25.0));
    assert_eq!(receipt["netAmount"], json!(225.0));
    assert_eq!(receipt["wallet"]["currentAmount"], json!(0.0));

    let (status, _) = send(&app, Method::DELETE, &uri, Some("alice"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, list) = send(&app, Method::GET, "/api/v1/wallets", Some("alice"), None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn deductions_feed_wallet_aggregate() {
    let (app, _tmp) = build_test_router().await;
    let wallet = create_wallet(&app, "alice", json!({ "name": "Payroll", "targetAmount": 900 })).await;
    let base = format!("/api/v1/wallets/{}", wallet["id"].as_str().unwrap());

    let (status, weekly) = send(
        &app,
        Method::POST,
        &format!("{base}/deductions"),
        Some("alice"),
        Some(json!({ "amount": 40, "frequency": "weekly" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(weekly["isActive"], true);

    let (status, paused) = send(
        &app,
        Method::POST,
        &format!("{base}/deductions"),
        Some("alice"),
        Some(json!({ "amount": 60, "isActive": false })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(paused["frequency"], "monthly");

    let (status, summary) = send(
        &app,
        Method::GET,
        &format!("{base}/deductions/summary"),
        Some("alice"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["deductionCount"], 2);
    assert_eq!(summary["activeDeductionTotal"], json!(40.0));

    let (_, view) = send(&app, Method::GET, &base, Some("alice"), None).await;
    assert_eq!(view["deductionCount"], 2);
    assert_eq!(view["activeDeductionTotal"], json!(40.0));

    let (status, _) = send(
        &app,
        Method::PATCH,
        &format!("{base}/deductions/{}", paused["id"].as_str().unwrap()),
        Some("alice"),
        Some(json!({ "isActive": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("{base}/deductions/{}", weekly["id"].as_str().unwrap()),
        Some("alice"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, summary) = send(
        &app,
        Method::GET,
        &format!("{base}/deductions/summary"),
        Some("alice"),
        None,
    )
    .await;
    assert_eq!(summary["deductionCount"], 1);
    assert_eq!(summary["activeDeductionTotal"], json!(60.0));

    let (status, _) = send(
        &app,
        Method::GET,
        &format!("{base}/deductions"),
        Some("mallory"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn linking_same_account_twice_conflicts() {
    let (app, _tmp) = build_test_router().await;
    let account = json!({
        "externalAccountId": "acc_123",
        "institutionName": "First Bank",
        "accountName": "Everyday Checking",
        "accountType": "depository",
        "mask": "0042",
        "provider": "plaid"
    });

    let (status, linked) = send(
        &app,
        Method::POST,
        "/api/v1/linked-accounts",
        Some("alice"),
        Some(account.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/linked-accounts",
        Some("alice"),
        Some(account.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/linked-accounts",
        Some("bob"),
        Some(account),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/v1/linked-accounts/{}", linked["id"].as_str().unwrap()),
        Some("alice"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, list) = send(&app, Method::GET, "/api/v1/linked-accounts", Some("alice"), None).await;
    assert_eq!(list, json!([]));
}
