//! services/api/tests/api_flow.rs
//!
//! End-to-end tests that drive the API router the way a browser client
//! would: register, build a draft through the wizard, launch it, and read
//! the analytics back.

use api_lib::adapters::{
    FixtureContactParser, JsonStoreAdapter, SimulatedDialer, TemplateScriptAdapter,
};
use api_lib::config::Config;
use api_lib::web::{
    self,
    state::{AppState, DraftRegistry},
};
use axum::body::Body;
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

const MULTIPART_BOUNDARY: &str = "callhub-test-boundary";

async fn test_app() -> (Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let store_path = dir.path().join("store.json");
    let store = JsonStoreAdapter::open(&store_path).await.unwrap();
    let config = Config {
        bind_address: "127.0.0.1:0".parse().unwrap(),
        store_path,
        log_level: tracing::Level::INFO,
        session_ttl_days: 30,
        dial_delay_ms: 0,
        cors_origin: "http://localhost:3000".to_string(),
    };
    let state = Arc::new(AppState {
        store: Arc::new(store),
        contacts: Arc::new(FixtureContactParser),
        dialer: Arc::new(SimulatedDialer::new(Duration::ZERO)),
        scripts: Arc::new(TemplateScriptAdapter),
        config: Arc::new(config),
        drafts: Arc::new(DraftRegistry::default()),
        shutdown: CancellationToken::new(),
    });
    (web::api_router(state), dir)
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, headers, body)
}

fn json_request(method: &str, uri: &str, cookie: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn upload_request(cookie: &str) -> Request<Body> {
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"contacts.csv\"\r\n\
         Content-Type: text/csv\r\n\r\nname,phone,email\r\n--{b}--\r\n",
        b = MULTIPART_BOUNDARY
    );
    Request::builder()
        .method("POST")
        .uri("/campaigns/draft/contacts")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", MULTIPART_BOUNDARY),
        )
        .header(header::COOKIE, cookie)
        .body(Body::from(body))
        .unwrap()
}

fn session_cookie(headers: &HeaderMap) -> String {
    headers
        .get(header::SET_COOKIE)
        .expect("response should set a session cookie")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

fn register_body(email: &str) -> Value {
    json!({
        "name": "Asha Rao",
        "email": email,
        "phone": "+911234567890",
        "company": "Acme Widgets",
        "password": "hunter2!",
        "confirm_password": "hunter2!",
    })
}

async fn register(app: &Router, email: &str) -> String {
    let (status, headers, body) =
        send(app, json_request("POST", "/auth/register", None, &register_body(email))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], email);
    session_cookie(&headers)
}

/// Builds a launch-ready draft: details set and the mock contacts attached.
async fn prepare_draft(app: &Router, cookie: &str, name: &str) {
    let (status, _, _) = send(
        app,
        json_request(
            "PUT",
            "/campaigns/draft",
            Some(cookie),
            &json!({"name": name, "type": "sales"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, body) = send(app, upload_request(cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["contact_count"], 3);
}

#[tokio::test]
async fn registration_logs_the_user_in() {
    let (app, _dir) = test_app().await;
    let cookie = register(&app, "asha@example.com").await;

    let (status, _, profile) =
        send(&app, empty_request("GET", "/account/profile", Some(&cookie))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["name"], "Asha Rao");
    assert_eq!(profile["email"], "asha@example.com");
    assert_eq!(profile["role"], "user");
}

#[tokio::test]
async fn duplicate_email_registration_is_rejected() {
    let (app, _dir) = test_app().await;
    register(&app, "asha@example.com").await;

    let (status, headers, _) =
        send(&app, json_request("POST", "/auth/register", None, &register_body("asha@example.com"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(headers.get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn mismatched_confirmation_stores_nothing() {
    let (app, _dir) = test_app().await;
    let mut body = register_body("asha@example.com");
    body["confirm_password"] = json!("something-else");

    let (status, _, _) = send(&app, json_request("POST", "/auth/register", None, &body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // The rejected registration left no account behind.
    let (status, _, _) = send(
        &app,
        json_request(
            "POST",
            "/auth/login",
            None,
            &json!({"email": "asha@example.com", "password": "hunter2!"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_accepts_only_matching_credentials() {
    let (app, _dir) = test_app().await;
    register(&app, "asha@example.com").await;

    let attempts = [
        ("asha@example.com", "wrong-password"),
        ("unknown@example.com", "hunter2!"),
    ];
    for (email, password) in attempts {
        let (status, headers, _) = send(
            &app,
            json_request(
                "POST",
                "/auth/login",
                None,
                &json!({"email": email, "password": password}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(headers.get(header::SET_COOKIE).is_none());
    }

    let (status, headers, body) = send(
        &app,
        json_request(
            "POST",
            "/auth/login",
            None,
            &json!({"email": "asha@example.com", "password": "hunter2!"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "asha@example.com");

    let cookie = session_cookie(&headers);
    let (status, _, _) = send(&app, empty_request("GET", "/campaigns", Some(&cookie))).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn protected_routes_require_a_valid_session() {
    let (app, _dir) = test_app().await;

    let (status, _, _) = send(&app, empty_request("GET", "/campaigns", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, _) = send(
        &app,
        empty_request("GET", "/campaigns", Some("session=not-a-real-session")),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_invalidates_the_session() {
    let (app, _dir) = test_app().await;
    let cookie = register(&app, "asha@example.com").await;

    let (status, _, _) = send(&app, empty_request("POST", "/auth/logout", Some(&cookie))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, _) =
        send(&app, empty_request("GET", "/account/profile", Some(&cookie))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wizard_steps_are_clamped() {
    let (app, _dir) = test_app().await;
    let cookie = register(&app, "asha@example.com").await;

    let (_, _, draft) = send(&app, empty_request("GET", "/campaigns/draft", Some(&cookie))).await;
    assert_eq!(draft["step"], 1);
    assert_eq!(draft["language"], "english");
    assert_eq!(draft["tone"], "professional");

    let mut last = Value::Null;
    for _ in 0..5 {
        let (_, _, body) =
            send(&app, empty_request("POST", "/campaigns/draft/advance", Some(&cookie))).await;
        last = body;
    }
    assert_eq!(last["step"], 4);
    assert_eq!(last["step_title"], "Review & Launch");

    for _ in 0..5 {
        let (_, _, body) =
            send(&app, empty_request("POST", "/campaigns/draft/back", Some(&cookie))).await;
        last = body;
    }
    assert_eq!(last["step"], 1);
    assert_eq!(last["step_title"], "Campaign Details");
}

#[tokio::test]
async fn unknown_draft_values_change_nothing() {
    let (app, _dir) = test_app().await;
    let cookie = register(&app, "asha@example.com").await;

    let (status, _, _) = send(
        &app,
        json_request(
            "PUT",
            "/campaigns/draft",
            Some(&cookie),
            &json!({"name": "Renewals", "type": "carrier-pigeon"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, _, draft) = send(&app, empty_request("GET", "/campaigns/draft", Some(&cookie))).await;
    assert_eq!(draft["name"], "");
    assert_eq!(draft["type"], Value::Null);
}

#[tokio::test]
async fn script_generation_follows_the_campaign_type() {
    let (app, _dir) = test_app().await;
    let cookie = register(&app, "asha@example.com").await;

    // Without a type the draft gets the generic greeting.
    let (status, _, body) =
        send(&app, empty_request("POST", "/campaigns/draft/script", Some(&cookie))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["script"], "Hello {name}, thank you for your time.");

    send(
        &app,
        json_request(
            "PUT",
            "/campaigns/draft",
            Some(&cookie),
            &json!({"type": "survey"}),
        ),
    )
    .await;
    let (_, _, body) =
        send(&app, empty_request("POST", "/campaigns/draft/script", Some(&cookie))).await;
    let script = body["script"].as_str().unwrap();
    assert!(script.contains("{name}"));
    assert!(script.contains("survey"));
}

#[tokio::test]
async fn saving_an_incomplete_draft_leaves_the_collection_alone() {
    let (app, _dir) = test_app().await;
    let cookie = register(&app, "asha@example.com").await;

    let (status, _, _) = send(&app, empty_request("POST", "/campaigns", Some(&cookie))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, _, campaigns) = send(&app, empty_request("GET", "/campaigns", Some(&cookie))).await;
    assert_eq!(campaigns.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn saved_drafts_carry_no_call_metrics() {
    let (app, _dir) = test_app().await;
    let cookie = register(&app, "asha@example.com").await;
    prepare_draft(&app, &cookie, "Quarterly outreach").await;

    let (status, _, saved) = send(&app, empty_request("POST", "/campaigns", Some(&cookie))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(saved["status"], "draft");
    assert_eq!(saved["contacts"], 3);
    assert_eq!(saved["calls_made"], 0);
    assert_eq!(saved["successful"], 0);
    assert_eq!(saved["success_rate"], 0);
}

#[tokio::test]
async fn launch_fabricates_bounded_metrics_and_spends_the_draft() {
    let (app, _dir) = test_app().await;
    let cookie = register(&app, "asha@example.com").await;

    // A draft without contacts cannot launch.
    send(
        &app,
        json_request(
            "PUT",
            "/campaigns/draft",
            Some(&cookie),
            &json!({"name": "Renewals", "type": "reminder"}),
        ),
    )
    .await;
    let (status, _, _) = send(&app, empty_request("POST", "/campaigns/launch", Some(&cookie))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, _, body) = send(&app, upload_request(&cookie)).await;
    assert_eq!(body["contact_count"], 3);

    let (status, _, launched) =
        send(&app, empty_request("POST", "/campaigns/launch", Some(&cookie))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(launched["status"], "active");

    // Three contacts: calls_made <= 3, successful <= 3/2. There is no
    // guarantee that successful <= calls_made.
    let calls_made = launched["calls_made"].as_u64().unwrap();
    let successful = launched["successful"].as_u64().unwrap();
    assert!(calls_made <= 3);
    assert!(successful * 2 <= 3);

    // The wizard is spent after a launch.
    let (_, _, draft) = send(&app, empty_request("GET", "/campaigns/draft", Some(&cookie))).await;
    assert_eq!(draft["name"], "");
    assert_eq!(draft["contact_count"], 0);
}

#[tokio::test]
async fn analytics_aggregate_and_filter() {
    let (app, _dir) = test_app().await;
    let cookie = register(&app, "asha@example.com").await;

    prepare_draft(&app, &cookie, "Launched run").await;
    let (_, _, launched) =
        send(&app, empty_request("POST", "/campaigns/launch", Some(&cookie))).await;

    prepare_draft(&app, &cookie, "Parked draft").await;
    let (_, _, parked) = send(&app, empty_request("POST", "/campaigns", Some(&cookie))).await;

    let (status, _, summary) = send(&app, empty_request("GET", "/analytics", Some(&cookie))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["active_campaigns"], 1);
    assert_eq!(summary["total_contacts"], 6);
    assert_eq!(
        summary["total_calls"].as_u64().unwrap(),
        launched["calls_made"].as_u64().unwrap()
    );
    assert_eq!(summary["avg_call_duration"], "2:34");

    // Narrowed to the parked draft, everything is zero and the guarded
    // division keeps the rate at 0 instead of dividing by zero.
    let uri = format!("/analytics?campaign_id={}", parked["id"].as_str().unwrap());
    let (_, _, filtered) = send(&app, empty_request("GET", &uri, Some(&cookie))).await;
    assert_eq!(filtered["total_calls"], 0);
    assert_eq!(filtered["success_rate"], 0);
    assert_eq!(filtered["total_contacts"], 3);
    assert_eq!(filtered["active_campaigns"], 0);
}

#[tokio::test]
async fn campaigns_can_be_fetched_by_id() {
    let (app, _dir) = test_app().await;
    let cookie = register(&app, "asha@example.com").await;
    prepare_draft(&app, &cookie, "Quarterly outreach").await;
    let (_, _, saved) = send(&app, empty_request("POST", "/campaigns", Some(&cookie))).await;

    let uri = format!("/campaigns/{}", saved["id"].as_str().unwrap());
    let (status, _, fetched) = send(&app, empty_request("GET", &uri, Some(&cookie))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "Quarterly outreach");

    // Another account cannot see it.
    let other = register(&app, "vikram@example.com").await;
    let (status, _, _) = send(&app, empty_request("GET", &uri, Some(&other))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn profile_and_settings_round_trip() {
    let (app, _dir) = test_app().await;
    let cookie = register(&app, "asha@example.com").await;

    let (_, _, settings) =
        send(&app, empty_request("GET", "/account/settings", Some(&cookie))).await;
    assert_eq!(settings["language"], "english");
    assert_eq!(settings["notifications"], true);
    assert_eq!(settings["email_updates"], true);
    assert_eq!(settings["sms_alerts"], false);

    let (status, _, updated) = send(
        &app,
        json_request(
            "PUT",
            "/account/settings",
            Some(&cookie),
            &json!({"language": "hindi", "notifications": false, "email_updates": false, "sms_alerts": true}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["language"], "hindi");

    let (status, _, profile) = send(
        &app,
        json_request(
            "PUT",
            "/account/profile",
            Some(&cookie),
            &json!({"name": "Asha R.", "email": "asha@acme.example", "phone": "+911234567890", "company": "Acme Widgets Pvt Ltd"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["email"], "asha@acme.example");

    let (_, _, fetched) =
        send(&app, empty_request("GET", "/account/profile", Some(&cookie))).await;
    assert_eq!(fetched["company"], "Acme Widgets Pvt Ltd");
}

#[tokio::test]
async fn unfinished_features_answer_not_implemented() {
    let (app, _dir) = test_app().await;
    let cookie = register(&app, "asha@example.com").await;

    let (status, _, _) =
        send(&app, empty_request("POST", "/analytics/export", Some(&cookie))).await;
    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);

    let (status, _, _) =
        send(&app, empty_request("POST", "/account/api-keys", Some(&cookie))).await;
    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
}
