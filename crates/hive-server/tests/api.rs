//! End-to-end tests over the router with the in-memory store.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use chrono::Duration;
use hive_audit::AuditRecorder;
use hive_core::{BotDefaults, BotStatus};
use hive_lifecycle::{AdminService, BotService, NullNotifier};
use hive_server::AppState;
use hive_store::{BotStore, MemoryStore};
use hive_token::{private_key_from_pem, public_key_from_pem, TokenIssuer, TokenVerifier};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

const PRIVATE_PEM: &str = include_str!("../../hive-token/testdata/jwt_test.pem");
const PUBLIC_PEM: &str = include_str!("../../hive-token/testdata/jwt_test.pub.pem");
const ISSUER: &str = "hive-test";

fn app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let audit = AuditRecorder::new(store.clone());
    let verifier = Arc::new(TokenVerifier::new(
        public_key_from_pem(PUBLIC_PEM.as_bytes()).unwrap(),
        ISSUER,
    ));
    let state = AppState {
        verifier,
        admins: AdminService::new(store.clone(), audit.clone()),
        bots: BotService::new(
            store.clone(),
            audit.clone(),
            Arc::new(NullNotifier),
            BotDefaults::default(),
        ),
        audit,
        environment: "test".into(),
    };
    (hive_server::router(state), store)
}

fn token(permissions: &[&str], ttl: Duration) -> String {
    let key = private_key_from_pem(PRIVATE_PEM.as_bytes()).unwrap();
    let issuer = TokenIssuer::new(Some(key), ISSUER);
    let permissions: Vec<String> = permissions.iter().map(|s| s.to_string()).collect();
    issuer
        .issue(&Uuid::new_v4().to_string(), &permissions, ttl)
        .unwrap()
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

fn post(uri: &str, token: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn delete(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn settle() {
    tokio::time::sleep(std::time::Duration::from_millis(25)).await;
}

#[tokio::test]
async fn status_is_open() {
    let (app, _) = app();
    let response = app.oneshot(get("/status", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["ok"], json!(true));
}

#[tokio::test]
async fn public_listing_is_anonymous() {
    let (app, _) = app();
    let response = app.oneshot(get("/public", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn missing_token_is_unauthenticated() {
    let (app, _) = app();
    let response = app.oneshot(get("/admin", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("Unauthenticated"));
}

#[tokio::test]
async fn expired_token_is_unauthenticated() {
    let (app, _) = app();
    let stale = token(&["super"], Duration::seconds(-60));
    let response = app.oneshot(get("/admin", Some(&stale))).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn insufficient_permission_is_forbidden() {
    let (app, _) = app();
    let admin = token(&["admin"], Duration::days(1));
    let response = app.oneshot(get("/admin", Some(&admin))).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("InvalidPermissions"));
    assert_eq!(body["message"], json!("Not allowed"));
}

#[tokio::test]
async fn token_in_query_parameter_is_accepted() {
    let (app, _) = app();
    let superuser = token(&["super"], Duration::days(1));
    let response = app
        .oneshot(get(&format!("/admin?token={superuser}"), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn admin_create_list_and_duplicate() {
    let (app, _) = app();
    let superuser = token(&["super"], Duration::days(1));

    let response = app
        .clone()
        .oneshot(post(
            "/admin/add",
            &superuser,
            json!({ "email": "ops@x.com", "permissions": ["admin"] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert!(body["password"].as_str().unwrap().starts_with("CHANGE-"));

    // Duplicate email: 200 with success false and no password.
    let response = app
        .clone()
        .oneshot(post(
            "/admin/add",
            &superuser,
            json!({ "email": "ops@x.com" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["password"], json!(""));

    let response = app.oneshot(get("/admin", Some(&superuser))).await.unwrap();
    let body = body_json(response).await;
    let listed = body.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["email"], json!("ops@x.com"));
    assert!(listed[0].get("passwordHash").is_none());
}

#[tokio::test]
async fn invalid_email_gets_the_validation_envelope() {
    let (app, _) = app();
    let superuser = token(&["super"], Duration::days(1));

    let response = app
        .oneshot(post("/admin/add", &superuser, json!({ "email": "nope" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("ValidatingError"));
    assert_eq!(body["errors"][0]["field"], json!("email"));
}

#[tokio::test]
async fn super_holder_can_grant_super() {
    let (app, _) = app();
    let superuser = token(&["super"], Duration::days(1));

    let response = app
        .oneshot(post(
            "/admin/add",
            &superuser,
            json!({ "email": "ops@x.com", "permissions": ["super"] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["success"], json!(true));
}

#[tokio::test]
async fn unknown_admin_is_not_found() {
    let (app, _) = app();
    let superuser = token(&["super"], Duration::days(1));

    let response = app
        .oneshot(delete(&format!("/admin/{}", Uuid::new_v4()), &superuser))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("NotFound"));
}

#[tokio::test]
async fn malformed_id_is_a_validation_error() {
    let (app, _) = app();
    let superuser = token(&["super"], Duration::days(1));

    let response = app
        .oneshot(delete("/admin/not-an-id", &superuser))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn bot_lifecycle_over_http() {
    let (app, store) = app();
    let admin = token(&["admin"], Duration::days(1));

    let response = app
        .clone()
        .oneshot(post(
            "/bots/add",
            &admin,
            json!({ "name": "Helper Bot", "desc": "support", "ownerEmail": "owner@x.com" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["slug"], json!("helper-bot"));
    let id: Uuid = body["id"].as_str().unwrap().parse().unwrap();
    assert_eq!(body["password"].as_str().unwrap().len(), 10);

    // Still provisioning: removal is refused as a non-error.
    let response = app
        .clone()
        .oneshot(delete(&format!("/bots/{id}"), &admin))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["success"], json!(false));

    let response = app
        .clone()
        .oneshot(get(&format!("/bot-creds/status/{id}"), Some(&admin)))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["status"], json!("provisioning"));

    // Orchestration reports the deployment; removal now goes through.
    let mut bot = store.find_by_id(id).await.unwrap().unwrap();
    bot.status = BotStatus::Deployed;
    store.save(&bot).await.unwrap();

    let response = app
        .clone()
        .oneshot(delete(&format!("/bots/{id}"), &admin))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["success"], json!(true));

    let response = app
        .oneshot(get(&format!("/bot-creds/{id}"), Some(&admin)))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["status"], json!("removing"));
    assert_eq!(body["tombstoned"], json!(true));
    for cred in body["credentials"]["databases"]
        .as_array()
        .unwrap()
        .iter()
        .chain(body["credentials"]["accounts"].as_array().unwrap())
    {
        assert_eq!(cred["passwordHash"], json!(""));
    }
}

#[tokio::test]
async fn save_creds_patches_a_deployed_bot() {
    let (app, store) = app();
    let admin = token(&["admin"], Duration::days(1));

    let response = app
        .clone()
        .oneshot(post(
            "/bots/add",
            &admin,
            json!({ "name": "Helper Bot", "ownerEmail": "owner@x.com" }),
        ))
        .await
        .unwrap();
    let id: Uuid = body_json(response).await["id"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();

    let mut bot = store.find_by_id(id).await.unwrap().unwrap();
    bot.status = BotStatus::Deployed;
    store.save(&bot).await.unwrap();

    let response = app
        .clone()
        .oneshot(post(
            &format!("/bot-creds/save-creds/{id}"),
            &admin,
            json!({ "projectId": "pW2WEr9JJoWauvFge", "desc": "support" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["success"], json!(true));

    let response = app
        .oneshot(get(&format!("/bot-creds/{id}"), Some(&admin)))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["projectId"], json!("pW2WEr9JJoWauvFge"));
    assert_eq!(body["desc"], json!("support"));
}

#[tokio::test]
async fn deployed_public_bot_appears_in_the_public_listing() {
    let (app, store) = app();
    let admin = token(&["admin"], Duration::days(1));

    let response = app
        .clone()
        .oneshot(post(
            "/bots/add",
            &admin,
            json!({ "name": "Helper Bot", "ownerEmail": "owner@x.com" }),
        ))
        .await
        .unwrap();
    let id: Uuid = body_json(response).await["id"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();

    let mut bot = store.find_by_id(id).await.unwrap().unwrap();
    bot.status = BotStatus::Deployed;
    store.save(&bot).await.unwrap();

    let response = app.oneshot(get("/public", None)).await.unwrap();
    let body = body_json(response).await;
    let listed = body.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["name"], json!("Helper Bot"));
    assert!(listed[0].get("credentials").is_none());
}

#[tokio::test]
async fn bot_status_listing_requires_admin() {
    let (app, _) = app();

    let response = app
        .clone()
        .oneshot(get("/bots/bot-status", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let admin = token(&["admin"], Duration::days(1));
    let response = app
        .oneshot(get("/bots/bot-status", Some(&admin)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn audit_trail_reads_require_super_and_are_themselves_audited() {
    let (app, store) = app();
    let superuser = token(&["super"], Duration::days(1));
    let admin = token(&["admin"], Duration::days(1));

    app.clone()
        .oneshot(post(
            "/admin/add",
            &superuser,
            json!({ "email": "ops@x.com" }),
        ))
        .await
        .unwrap();
    settle().await;

    let response = app
        .clone()
        .oneshot(get("/audits", Some(&admin)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .clone()
        .oneshot(get("/audits?limit=50", Some(&superuser)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["action"], json!("admin-created"));
    // Admin targets come back labeled with the account's email.
    assert_eq!(records[0]["targetEmail"], json!("ops@x.com"));

    settle().await;
    assert!(store
        .audit_log()
        .iter()
        .any(|r| r.action.to_string() == "audit-list"));
}
