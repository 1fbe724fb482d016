//! CLI integration tests against a mock API.
//!
//! Each test runs the built `itd` binary with an isolated session file.

mod common;

use serde_json::{Value, json};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use common::{Env, profile};

#[tokio::test(flavor = "multi_thread")]
async fn test_version() {
    let env = Env::start().await;
    let stdout = env.run_success(&["--version"]).await;
    assert!(stdout.starts_with("itd "));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_saves_session() {
    let env = Env::start().await;

    Mock::given(method("GET"))
        .and(path("/users/me"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile()))
        .expect(1)
        .mount(&env.server)
        .await;

    let stdout = env
        .run_success(&["login", "--token", "tok", "--cookies", "refresh_token=r1"])
        .await;

    assert!(stdout.contains("alice"));
    assert_eq!(
        env.read_session(),
        json!({"token": "tok", "cookies": "refresh_token=r1"})
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_requires_token_when_not_interactive() {
    let env = Env::start().await;

    let stderr = env.run_failure(&["login"]).await;

    assert!(stderr.contains("--token"));
    assert!(!env.session_file().exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_whoami_prints_profile_json() {
    let env = Env::start().await;
    env.seed_session("tok", "");

    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile()))
        .mount(&env.server)
        .await;

    let stdout = env.run_success(&["whoami"]).await;
    let me: Value = serde_json::from_str(stdout.trim()).unwrap();

    assert_eq!(me["username"], "alice");
    assert_eq!(me["displayName"], "Alice");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_session_fails_without_requests() {
    let env = Env::start().await;

    let stderr = env.run_failure(&["whoami"]).await;

    assert!(stderr.contains("itd login"));
    assert!(env.server.received_requests().await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_session_exits_with_session_status() {
    let env = Env::start().await;

    let output = env.run(&["whoami"]).await;

    assert_eq!(output.status.code(), Some(2));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_closed_stdin_is_not_a_cancel() {
    let env = Env::start().await;

    let output = env.run_interactive(&["whoami"]).await;
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("stdin closed"));
    assert!(env.server.received_requests().await.unwrap().is_empty());
}

#[cfg(unix)]
#[tokio::test(flavor = "multi_thread")]
async fn test_login_helper_gets_email_and_password() {
    let env = Env::start().await;
    let helper = env.login_helper(
        r#"[ "$ITD_EMAIL" = "a@b.c" ] && [ "$ITD_PASSWORD" = "pw" ] && printf '{"token": "helped", "cookies": "refresh_token=h1"}'"#,
    );

    Mock::given(method("GET"))
        .and(path("/users/me"))
        .and(header("authorization", "Bearer helped"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile()))
        .expect(1)
        .mount(&env.server)
        .await;

    let output = env
        .run_interactive(&[
            "--login-command",
            helper.to_str().unwrap(),
            "--email",
            "a@b.c",
            "--password",
            "pw",
            "whoami",
        ])
        .await;

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        env.read_session(),
        json!({"token": "helped", "cookies": "refresh_token=h1"})
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_expired_token_is_refreshed_and_saved() {
    let env = Env::start().await;
    env.seed_session("old", "refresh_token=r1");

    Mock::given(method("GET"))
        .and(path("/users/me"))
        .and(header("authorization", "Bearer old"))
        .respond_with(ResponseTemplate::new(401).set_body_string("UNAUTHORIZED"))
        .mount(&env.server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .and(header("cookie", "refresh_token=r1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "refresh_token=r2; Path=/; HttpOnly")
                .set_body_json(json!({"accessToken": "new"})),
        )
        .expect(1)
        .mount(&env.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users/me"))
        .and(header("authorization", "Bearer new"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile()))
        .mount(&env.server)
        .await;

    env.run_success(&["whoami"]).await;

    assert_eq!(
        env.read_session(),
        json!({"token": "new", "cookies": "refresh_token=r2"})
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_feed_sends_tab() {
    let env = Env::start().await;
    env.seed_session("tok", "");

    Mock::given(method("GET"))
        .and(path("/posts"))
        .and(query_param("tab", "following"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "posts": [],
            "pagination": {"limit": 5, "nextCursor": "abc", "hasMore": true}
        })))
        .expect(1)
        .mount(&env.server)
        .await;

    let output = env.run(&["feed", "--tab", "following", "--limit", "5"]).await;
    assert!(output.status.success());

    let feed: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(feed["pagination"]["hasMore"], true);
    assert!(String::from_utf8_lossy(&output.stderr).contains("abc"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_api_error_is_reported() {
    let env = Env::start().await;
    env.seed_session("tok", "");

    Mock::given(method("GET"))
        .and(path("/users/ghost"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"code": "NOT_FOUND", "message": "User not found"}
        })))
        .mount(&env.server)
        .await;

    let stderr = env.run_failure(&["user", "@ghost"]).await;

    assert!(stderr.contains("Failed to fetch user 'ghost'"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_logout_local_removes_session() {
    let env = Env::start().await;
    env.seed_session("tok", "refresh_token=r1");

    env.run_success(&["logout", "--local"]).await;

    assert!(!env.session_file().exists());
    assert!(env.server.received_requests().await.unwrap().is_empty());
}
