//! CLI 集成测试：启动错误的退出码与无网络路径

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use tempfile::TempDir;

fn cmd(temp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("site-monitor").unwrap();
    cmd.current_dir(temp.path())
        .env_remove("DISCORD_WEBHOOK_URL")
        .env_remove("CONFIG_PATH")
        .env_remove("STATE_DIR")
        .env_remove("HTTP_PROXY")
        .env_remove("http_proxy")
        .env_remove("ALL_PROXY")
        .env_remove("all_proxy")
        .env("NO_PROXY", "127.0.0.1")
        .env("NO_COLOR", "1");
    cmd
}

fn write_config(temp: &TempDir, content: &str) -> std::path::PathBuf {
    let path = temp.path().join("sites.json");
    fs::write(&path, content).unwrap();
    path
}

/// 在本地端口上返回一次固定 HTML，返回页面地址
fn serve_page(html: &'static str) -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream);
        let mut line = String::new();
        while reader.read_line(&mut line).unwrap() > 0 && line != "\r\n" {
            line.clear();
        }

        let mut stream = reader.into_inner();
        write!(
            stream,
            "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            html.len(),
            html
        )
        .unwrap();
    });

    (url, handle)
}

#[test]
fn test_missing_webhook_is_fatal() {
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp, "[]");

    cmd(&temp)
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("DISCORD_WEBHOOK_URL"));
}

#[test]
fn test_missing_config_is_fatal() {
    let temp = TempDir::new().unwrap();

    cmd(&temp)
        .env("DISCORD_WEBHOOK_URL", "http://127.0.0.1:9/hook")
        .arg("run")
        .arg("--config")
        .arg(temp.path().join("missing.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn test_invalid_config_is_fatal() {
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp, "{ \"name\": ");

    cmd(&temp)
        .env("DISCORD_WEBHOOK_URL", "http://127.0.0.1:9/hook")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse configuration file"));
}

#[test]
fn test_site_without_url_exits_zero() {
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp, r#"[{"name": "Draft", "url": ""}]"#);
    let state_dir = temp.path().join("state");

    cmd(&temp)
        .env("DISCORD_WEBHOOK_URL", "http://127.0.0.1:9/hook")
        .env("STATE_DIR", &state_dir)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Changes detected: 0/1"))
        .stderr(predicate::str::contains("Skipping Draft: No URL specified"));

    // 状态目录被创建，但不会写入任何记录
    assert!(state_dir.is_dir());
    assert_eq!(fs::read_dir(&state_dir).unwrap().count(), 0);
}

#[test]
fn test_status_lists_sites_and_orphans() {
    let temp = TempDir::new().unwrap();
    let config = write_config(
        &temp,
        r#"[{"name": "Example", "url": "https://example.test"}, {"name": "New Site", "url": "https://new.test"}]"#,
    );
    let state_dir = temp.path().join("data");
    fs::create_dir_all(&state_dir).unwrap();
    fs::write(
        state_dir.join("Example.json"),
        r#"{"hash": "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad", "last_checked": "2025-03-01T12:00:00Z", "url": "https://example.test"}"#,
    )
    .unwrap();
    fs::write(
        state_dir.join("Retired.json"),
        r#"{"hash": "00", "last_checked": "2024-01-01T00:00:00", "url": "https://retired.test"}"#,
    )
    .unwrap();

    // status 不需要 Webhook
    cmd(&temp)
        .arg("status")
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("ba7816bf8f01cfea..."))
        .stdout(predicate::str::contains("New Site"))
        .stdout(predicate::str::contains("not checked yet"))
        .stdout(predicate::str::contains("Retired"));
}

#[test]
fn test_corrupt_state_is_reported_and_reseeded() {
    let temp = TempDir::new().unwrap();
    let (url, server) = serve_page("<html><body>A</body></html>");
    let config = write_config(
        &temp,
        &format!(r#"[{{"name": "Example", "url": "{}"}}]"#, url),
    );
    let state_dir = temp.path().join("state");
    fs::create_dir_all(&state_dir).unwrap();
    fs::write(state_dir.join("Example.json"), "{ corrupted").unwrap();

    cmd(&temp)
        .env("DISCORD_WEBHOOK_URL", "http://127.0.0.1:9/hook")
        .env("STATE_DIR", &state_dir)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("First check for Example"))
        .stdout(predicate::str::contains("Changes detected: 0/1"))
        .stderr(predicate::str::contains("Ignoring corrupt state for Example"));
    server.join().unwrap();

    // 损坏的文件被新的有效状态覆盖
    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(state_dir.join("Example.json")).unwrap()).unwrap();
    assert_eq!(
        saved["hash"],
        "559aead08264d5795d3909718cdd05abd49572e84fe55590eef31a88a08fdffd"
    );
}
