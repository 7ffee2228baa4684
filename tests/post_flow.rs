use std::process::Command;

use httpmock::prelude::*;
use serde_json::json;

fn vigil() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_vigil"));
    cmd.env_remove("GEMINI_API_KEY")
        .env_remove("GITHUB_PAT")
        .env_remove("GITHUB_REPOSITORY")
        .env_remove("PR_NUMBER")
        .env_remove("GEMINI_API_ENDPOINT")
        .env_remove("GITHUB_API_URL")
        .env_remove("RUST_LOG");
    cmd
}

const REPORT: &str =
    r#"{"results":{"failed_checks":[{"check_id":"CKV_AWS_1","resource":"aws_s3_bucket.x"}]}}"#;

fn mock_gemini(server: &MockServer) -> httpmock::Mock<'_> {
    server.mock(|when, then| {
        when.method(POST)
            .path("/v1beta/models/gemini-2.5-flash:generateContent")
            .query_param("key", "test-key");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "candidates": [{
                    "content": {
                        "role": "model",
                        "parts": [{"text": "# Review\nS3 버킷 설정을 점검하세요."}]
                    }
                }]
            }));
    })
}

#[test]
#[ignore = "requires loopback networking"]
fn end_to_end_prints_review_posts_comment_and_exits_zero() {
    let gemini = MockServer::start();
    let github = MockServer::start();
    let gemini_mock = mock_gemini(&gemini);
    let github_mock = github.mock(|when, then| {
        when.method(POST)
            .path("/repos/acme/widgets/issues/3/comments")
            .header("authorization", "token test-token")
            .json_body_partial(r##"{"body": "# Review\nS3 버킷 설정을 점검하세요."}"##);
        then.status(201)
            .header("content-type", "application/json")
            .body("{}");
    });

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("findings.json"), REPORT).unwrap();

    let output = vigil()
        .env("GEMINI_API_KEY", "test-key")
        .env("GITHUB_PAT", "test-token")
        .env("GITHUB_REPOSITORY", "acme/widgets")
        .env("PR_NUMBER", "3")
        .env("GEMINI_API_ENDPOINT", gemini.base_url())
        .env("GITHUB_API_URL", github.base_url())
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("# Review"), "stdout: {stdout}");
    gemini_mock.assert();
    github_mock.assert();
}

#[test]
#[ignore = "requires loopback networking"]
fn failed_post_still_prints_review_and_exits_zero() {
    let gemini = MockServer::start();
    let github = MockServer::start();
    mock_gemini(&gemini);
    github.mock(|when, then| {
        when.method(POST);
        then.status(404).body(r#"{"message": "Not Found"}"#);
    });

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("findings.json"), REPORT).unwrap();

    let output = vigil()
        .env("GEMINI_API_KEY", "test-key")
        .env("GITHUB_PAT", "test-token")
        .env("GITHUB_REPOSITORY", "acme/widgets")
        .env("GEMINI_API_ENDPOINT", gemini.base_url())
        .env("GITHUB_API_URL", github.base_url())
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("# Review"), "stdout: {stdout}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("404"), "stderr: {stderr}");
}

#[test]
#[ignore = "requires loopback networking"]
fn dry_run_never_touches_github() {
    let gemini = MockServer::start();
    let github = MockServer::start();
    mock_gemini(&gemini);
    let github_mock = github.mock(|when, then| {
        when.method(POST);
        then.status(201).body("{}");
    });

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("findings.json"), REPORT).unwrap();

    let output = vigil()
        .env("GEMINI_API_KEY", "test-key")
        .env("GITHUB_PAT", "test-token")
        .env("GEMINI_API_ENDPOINT", gemini.base_url())
        .env("GITHUB_API_URL", github.base_url())
        .arg("--dry-run")
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("# Review"), "stdout: {stdout}");
    github_mock.assert_hits(0);
}
