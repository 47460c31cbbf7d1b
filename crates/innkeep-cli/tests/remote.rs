//! CLI integration tests for `bookings --remote` against a mock endpoint.

mod common;

use std::path::PathBuf;
use std::process::Output;

use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{ids, records, run_cli};

/// Run the CLI off the async runtime so the mock server keeps serving.
async fn run(data_dir: PathBuf, args: &[&str]) -> Output {
    let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
    tokio::task::spawn_blocking(move || {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        run_cli(&data_dir, &args)
    })
    .await
    .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn remote_bookings() -> Value {
    json!([
        {"id": 1, "name": "John Doe", "room": "Deluxe", "date": "2024-03-15", "status": "Confirmed"},
        {"id": 2, "name": "Jane Smith", "room": "Suite", "date": "2024-03-16", "status": "Pending"},
        {"id": 3, "name": "Alice Brown", "room": "Standard", "date": "2024-03-17", "status": "Cancelled"}
    ])
}

async fn serve_bookings(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/booking"))
        .respond_with(ResponseTemplate::new(200).set_body_json(remote_bookings()))
        .mount(server)
        .await;
}

fn url(server: &MockServer) -> String {
    format!("{}/api/booking", server.uri())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_remote_list_queries_the_fetched_collection() {
    let server = MockServer::start().await;
    serve_bookings(&server).await;
    let temp_dir = TempDir::new().unwrap();

    let output = run(
        temp_dir.path().to_path_buf(),
        &["bookings", "list", "--remote", &url(&server), "--status", "Pending"],
    )
    .await;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(ids(&stdout(&output)), vec![2]);
    assert!(stderr(&output).contains("Page 1 of 1 (1 matching)"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_remote_list_degrades_to_empty_on_bad_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;
    let temp_dir = TempDir::new().unwrap();

    let output = run(
        temp_dir.path().to_path_buf(),
        &["bookings", "list", "--remote", &url(&server)],
    )
    .await;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(output.stdout.is_empty());
    let stderr = stderr(&output);
    assert!(stderr.contains("Could not load bookings"), "stderr: {}", stderr);
    assert!(stderr.contains("Page 1 of 1 (0 matching)"), "stderr: {}", stderr);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_remote_create_lets_the_server_pick_the_id() {
    let server = MockServer::start().await;
    serve_bookings(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/booking"))
        .and(body_json(json!({
            "name": "Bob Lee",
            "room": "101",
            "date": "2024-04-01",
            "status": "Pending"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 1711929600000u64,
            "name": "Bob Lee",
            "room": "101",
            "date": "2024-04-01",
            "status": "Pending"
        })))
        .expect(1)
        .mount(&server)
        .await;
    let temp_dir = TempDir::new().unwrap();

    let output = run(
        temp_dir.path().to_path_buf(),
        &[
            "bookings", "create", "--remote", &url(&server),
            "--set", "name=Bob Lee", "--set", "room=101", "--set", "date=2024-04-01",
        ],
    )
    .await;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(records(&stdout(&output))[0]["id"], 1_711_929_600_000u64);
    assert!(!temp_dir.path().join("bookings.json").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_remote_create_keeps_a_requested_id() {
    let server = MockServer::start().await;
    serve_bookings(&server).await;
    Mock::given(method("POST"))
        .and(body_json(json!({
            "id": 10,
            "name": "Bob Lee",
            "room": "Suite",
            "date": "2024-04-01",
            "status": "Confirmed"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 10,
            "name": "Bob Lee",
            "room": "Suite",
            "date": "2024-04-01",
            "status": "Confirmed"
        })))
        .expect(1)
        .mount(&server)
        .await;
    let temp_dir = TempDir::new().unwrap();

    let output = run(
        temp_dir.path().to_path_buf(),
        &[
            "bookings", "create", "--remote", &url(&server),
            "--set", "id=10", "--set", "name=Bob Lee", "--set", "room=Suite",
            "--set", "date=2024-04-01", "--set", "status=Confirmed",
        ],
    )
    .await;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(records(&stdout(&output))[0]["id"], 10);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_remote_create_validates_before_posting() {
    let server = MockServer::start().await;
    serve_bookings(&server).await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;
    let temp_dir = TempDir::new().unwrap();

    let taken = run(
        temp_dir.path().to_path_buf(),
        &[
            "bookings", "create", "--remote", &url(&server),
            "--set", "id=2", "--set", "name=Bob Lee", "--set", "room=Suite",
            "--set", "date=2024-04-01",
        ],
    )
    .await;
    assert!(!taken.status.success());
    assert!(stderr(&taken).contains("duplicate record id 2"), "stderr: {}", stderr(&taken));

    let bad_status = run(
        temp_dir.path().to_path_buf(),
        &[
            "bookings", "create", "--remote", &url(&server),
            "--set", "name=Bob Lee", "--set", "room=Suite",
            "--set", "date=2024-04-01", "--set", "status=Booked",
        ],
    )
    .await;
    assert!(!bad_status.status.success());
    assert!(stderr(&bad_status).contains("Booked"), "stderr: {}", stderr(&bad_status));
}
