#![allow(dead_code)]

use axum_test::TestServer;
use bright_aid::core::AppState;
use bright_aid::core::db::{connect, connect_in_memory};
use serde_json::{Value, json};
use std::sync::Arc;
use tempfile::TempDir;

/// Crea un AppState per i test su un database SQLite in memoria
pub async fn create_test_state() -> Arc<AppState> {
    let pool = connect_in_memory()
        .await
        .expect("Failed to open in-memory database");
    Arc::new(AppState::new(pool))
}

/// Crea un TestServer per i test
pub fn create_test_server(state: Arc<AppState>) -> TestServer {
    let app = bright_aid::create_router(state);
    TestServer::new(app).expect("Failed to create test server")
}

pub async fn create_server() -> TestServer {
    create_test_server(create_test_state().await)
}

/// TestServer su un database su file con piu' connessioni, per i test di concorrenza
///
/// Il `TempDir` va tenuto in vita per tutta la durata del test.
pub async fn create_file_backed_server(max_connections: u32) -> (TestServer, TempDir) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let url = format!("sqlite://{}", temp_dir.path().join("bright_aid.db").display());
    let pool = connect(&url, max_connections)
        .await
        .expect("Failed to open file database");
    let server = create_test_server(Arc::new(AppState::new(pool)));
    (server, temp_dir)
}

/// Avvia il router su una porta locale e restituisce il base URL delle API
pub async fn spawn_app() -> String {
    let state = create_test_state().await;
    let app = bright_aid::create_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("No local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server failed");
    });
    format!("http://{addr}/api")
}

// ============================================================
// Seed helpers
// ============================================================

pub async fn seed_ngo(server: &TestServer, name: &str) -> i64 {
    let response = server
        .post("/api/ngos")
        .json(&json!({ "ngoName": name, "userId": 1 }))
        .await;
    response.assert_status(axum_test::http::StatusCode::CREATED);
    response.json::<Value>()["ngoId"].as_i64().expect("ngoId")
}

pub async fn seed_school(server: &TestServer, name: &str, district: &str) -> i64 {
    let response = server
        .post("/api/schools")
        .json(&json!({
            "schoolName": name,
            "district": district,
            "upazila": "Savar",
            "userId": 2
        }))
        .await;
    response.assert_status(axum_test::http::StatusCode::CREATED);
    response.json::<Value>()["schoolId"].as_i64().expect("schoolId")
}

pub async fn seed_campaign(server: &TestServer, ngo_id: i64, name: &str, budget: f64) -> i64 {
    let response = server
        .post("/api/ngo-projects")
        .json(&json!({
            "ngoId": ngo_id,
            "projectName": name,
            "projectDescription": format!("{name} for rural schools"),
            "budget": budget,
            "status": "ACTIVE"
        }))
        .await;
    response.assert_status(axum_test::http::StatusCode::CREATED);
    response.json::<Value>()["ngoProjectId"]
        .as_i64()
        .expect("ngoProjectId")
}

pub async fn invite(server: &TestServer, campaign_id: i64, school_id: i64) -> axum_test::TestResponse {
    server
        .post("/api/ngo-project-requests")
        .json(&json!({
            "ngoProjectId": campaign_id,
            "schoolId": school_id,
            "requestMessage": "We invite you to join our campaign",
            "requestedBudget": 2500.0,
            "requestedByUserId": 1
        }))
        .await
}

pub async fn respond(
    server: &TestServer,
    request_id: i64,
    action: &str,
    message: Option<&str>,
) -> axum_test::TestResponse {
    server
        .post(&format!("/api/ngo-project-requests/{request_id}/{action}"))
        .json(&json!({ "responseMessage": message, "respondedByUserId": 2 }))
        .await
}
