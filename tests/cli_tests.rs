use assert_cmd::Command;
use clap::Parser;
use mirai::cli::{self, CliArgs};
use mirai::errors::AppError;
use mirai::Config;
use mockito::{Mock, Server, ServerGuard};
use predicates::prelude::*;
use serde_json::json;
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;
use tokio_util::sync::CancellationToken;

// Helper function to set up a test Command instance
fn set_up_command(base_url: &str) -> Command {
    let mut cmd = Command::cargo_bin("mirai").unwrap();
    cmd.env_clear()
        .env("HOME", "/tmp")
        .env("MIRAI_API_BASE_URL", base_url)
        .env("MIRAI_TIMEOUT_SECS", "5");
    cmd
}

fn mock_journal(server: &mut ServerGuard) -> Vec<Mock> {
    let diaries = server
        .mock("GET", "/api/v1/diaries")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([
                {"id": 1, "user_id": 1, "body": "クリスマスの準備", "score": 75, "is_deleted": false, "date": 20241215},
                {"id": 2, "user_id": 1, "body": "大掃除", "score": 20, "is_deleted": false, "date": 20241230},
                {"id": 3, "user_id": 1, "body": "消した日", "score": 50, "is_deleted": true, "date": 20241210}
            ])
            .to_string(),
        )
        .create();
    let images = server
        .mock("GET", "/api/v1/all_images")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([{"id": 8, "diary_id": 1, "uri": "https://img/8.png", "is_deleted": false}])
                .to_string(),
        )
        .create();
    vec![diaries, images]
}

#[test]
fn test_cli_help() {
    let mut cmd = set_up_command("http://127.0.0.1:1");
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("calendar"))
        .stdout(predicate::str::contains("gallery"));
}

#[test]
fn test_cli_invalid_date() {
    let mut cmd = set_up_command("http://127.0.0.1:1");
    cmd.args(["show", "--date", "not-a-date"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date format"));
}

#[test]
fn test_cli_list_newest_first() {
    let mut server = Server::new();
    let _mocks = mock_journal(&mut server);

    let mut cmd = set_up_command(&server.url());
    cmd.arg("list");

    cmd.assert()
        .success()
        .stdout(predicate::str::is_match("(?s)2024-12-30.*大掃除.*2024-12-15.*クリスマスの準備").unwrap())
        .stdout(predicate::str::contains("消した日").not());
}

#[test]
fn test_cli_list_search() {
    let mut server = Server::new();
    let _mocks = mock_journal(&mut server);

    let mut cmd = set_up_command(&server.url());
    cmd.args(["list", "--search", "掃除"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("大掃除"))
        .stdout(predicate::str::contains("クリスマス").not());
}

#[test]
fn test_cli_calendar_marks_entries() {
    let mut server = Server::new();
    let _mocks = mock_journal(&mut server);

    let mut cmd = set_up_command(&server.url());
    cmd.args(["calendar", "--month", "2024-12", "--select", "2024-12-15"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("2024年 12月"))
        .stdout(predicate::str::contains("[15*"))
        .stdout(predicate::str::contains(" 30*"))
        .stdout(predicate::str::contains("クリスマスの準備"));
}

#[test]
fn test_cli_gallery_shows_image() {
    let mut server = Server::new();
    let _mocks = mock_journal(&mut server);

    let mut cmd = set_up_command(&server.url());
    cmd.args(["gallery", "--index", "0"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("2024年12月15日 ... 2024年12月30日"))
        .stdout(predicate::str::contains("image: https://img/8.png"));
}

#[test]
fn test_cli_write_refuses_existing_date() {
    let mut server = Server::new();
    let _existing = server
        .mock("GET", "/api/v1/diaries/date/20241215")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"id": 1, "user_id": 1, "body": "既存", "is_deleted": false, "date": 20241215})
                .to_string(),
        )
        .create();
    let create = server.mock("POST", "/api/v1/diaries").expect(0).create();

    let mut cmd = set_up_command(&server.url());
    cmd.args(["write", "--date", "2024-12-15", "--body", "二回目"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("mirai edit"));
    create.assert();
}

#[test]
fn test_cli_write_blank_body_fails_before_posting() {
    let mut server = Server::new();
    let _missing = server
        .mock("GET", "/api/v1/diaries/date/20241216")
        .with_status(404)
        .create();
    let create = server.mock("POST", "/api/v1/diaries").expect(0).create();

    let mut cmd = set_up_command(&server.url());
    cmd.args(["write", "--date", "20241216", "--body", "   "]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Validation error"));
    create.assert();
}

#[test]
fn test_cli_show_empty_date_prompts_for_new_entry() {
    let mut server = Server::new();
    let _missing = server
        .mock("GET", "/api/v1/diaries/date/20241216")
        .with_status(404)
        .with_body(r#"{"detail": "Diary not found"}"#)
        .create();
    let _images = server
        .mock("GET", "/api/v1/all_images")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create();

    let mut cmd = set_up_command(&server.url());
    cmd.args(["show", "--date", "2024-12-16"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("新しい日記を書く"))
        .stdout(predicate::str::contains("mirai write --date 2024-12-16"))
        .stderr(predicate::str::contains("Error:").not());
}

#[test]
fn test_cli_edit_empty_date_prompts_without_saving() {
    let mut server = Server::new();
    let _missing = server
        .mock("GET", "/api/v1/diaries/date/20241216")
        .with_status(404)
        .create();
    let create = server.mock("POST", "/api/v1/diaries").expect(0).create();

    let mut cmd = set_up_command(&server.url());
    cmd.args(["edit", "--date", "2024-12-16", "--body", "書き直し"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("新しい日記を書く"))
        .stdout(predicate::str::contains("mirai write --date 2024-12-16"));
    create.assert();
}

fn parse_command(args: &[&str]) -> cli::Command {
    let mut argv = vec!["mirai"];
    argv.extend_from_slice(args);
    CliArgs::parse_from(argv).command
}

#[tokio::test]
async fn test_cancelled_token_stops_single_diary_commands() {
    let mut server = Server::new_async().await;
    let lookup = server
        .mock("GET", "/api/v1/diaries/date/20241216")
        .expect(0)
        .create_async()
        .await;
    let config = Config::with_base_url(server.url());

    let token = CancellationToken::new();
    token.cancel();
    let command = parse_command(&["show", "--date", "2024-12-16"]);
    let result = cli::execute(command, &config, &token).await;

    assert!(matches!(result, Err(AppError::Cancelled)));
    lookup.assert_async().await;
}

#[tokio::test]
async fn test_cancel_interrupts_request_in_flight() {
    // Accepts the connection but never answers.
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let config = Config::with_base_url(format!("http://{}", listener.local_addr().unwrap()));

    let token = CancellationToken::new();
    let canceller = token.clone();
    let (done_tx, done_rx) = mpsc::channel::<()>();
    let stalled = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        canceller.cancel();
        let _ = done_rx.recv();
        drop(stream);
    });

    let command = parse_command(&["delete", "--id", "3"]);
    let result = cli::execute(command, &config, &token).await;

    assert!(matches!(result, Err(AppError::Cancelled)));
    done_tx.send(()).unwrap();
    stalled.join().unwrap();
}

#[test]
fn test_cli_unreachable_service() {
    let mut cmd = set_up_command("http://127.0.0.1:1");
    cmd.arg("list");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}
