//! GitHub client against a local mock server.

use std::time::Duration;

use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use codecv::adapters::github::{GitHubClient, GitHubClientConfig};
use codecv::domain::foundation::{DomainError, ErrorCode, Timestamp};
use codecv::ports::{GitHubError, GitHubSource};

fn client(server: &MockServer) -> GitHubClient {
    GitHubClient::new(
        GitHubClientConfig::new()
            .with_base_url(server.uri())
            .with_timeout(Duration::from_secs(2)),
    )
    .unwrap()
}

fn repo(id: u64, language: Option<&str>) -> Value {
    json!({
        "id": id,
        "name": format!("repo-{}", id),
        "full_name": format!("octocat/repo-{}", id),
        "html_url": format!("https://github.com/octocat/repo-{}", id),
        "description": null,
        "language": language,
        "stargazers_count": 3,
        "forks_count": 1,
        "updated_at": "2026-01-15T10:00:00Z"
    })
}

fn repos(range: std::ops::Range<u64>) -> Value {
    Value::Array(range.map(|id| repo(id, Some("Rust"))).collect())
}

#[tokio::test]
async fn fetch_user_decodes_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .and(header("Accept", "application/vnd.github.v3+json"))
        .and(header("User-Agent", "CodeCV-App"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "login": "octocat",
            "id": 583231,
            "html_url": "https://github.com/octocat",
            "name": "The Octocat",
            "public_repos": 8,
            "followers": 100,
            "following": 9
        })))
        .expect(1)
        .mount(&server)
        .await;

    let user = client(&server).fetch_user("octocat").await.unwrap();

    assert_eq!(user.login, "octocat");
    assert_eq!(user.name.as_deref(), Some("The Octocat"));
    assert_eq!(user.public_repos, Some(8));
}

#[tokio::test]
async fn token_is_sent_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .and(header("Authorization", "token ghp_secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "login": "octocat",
            "id": 1,
            "html_url": "https://github.com/octocat"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GitHubClient::new(
        GitHubClientConfig::new()
            .with_base_url(server.uri())
            .with_token("ghp_secret"),
    )
    .unwrap();

    assert!(client.fetch_user("octocat").await.is_ok());
}

#[tokio::test]
async fn repositories_follow_pages_until_short_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "100"))
        .and(query_param("sort", "updated"))
        .respond_with(ResponseTemplate::new(200).set_body_json(repos(0..100)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(repos(100..120)))
        .expect(1)
        .mount(&server)
        .await;

    let result = client(&server).fetch_repositories("octocat", 150).await.unwrap();

    assert_eq!(result.len(), 120);
    assert_eq!(result[0].id, 0);
    assert_eq!(result[119].id, 119);
}

#[tokio::test]
async fn repositories_are_truncated_to_limit() {
    let server = MockServer::start().await;
    // Server ignores per_page and returns more than asked.
    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .and(query_param("per_page", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(repos(0..12)))
        .expect(1)
        .mount(&server)
        .await;

    let result = client(&server).fetch_repositories("octocat", 10).await.unwrap();

    assert_eq!(result.len(), 10);
}

#[tokio::test]
async fn zero_limit_issues_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let result = client(&server).fetch_repositories("octocat", 0).await.unwrap();
    assert!(result.is_empty());
}

#[tokio::test]
async fn missing_user_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/ghost/repos"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
        .mount(&server)
        .await;

    let err = client(&server).fetch_repositories("ghost", 10).await.unwrap_err();

    assert!(matches!(err, GitHubError::NotFound { ref resource } if resource == "ghost"));
    let domain: DomainError = err.into();
    assert_eq!(domain.code, ErrorCode::GitHubUserNotFound);
    assert!(domain.message.contains("ghost"));
}

#[tokio::test]
async fn exhausted_quota_reports_retry_after() {
    let server = MockServer::start().await;
    let reset = Timestamp::now().as_unix_secs() + 120;
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("X-RateLimit-Remaining", "0")
                .insert_header("X-RateLimit-Reset", reset.to_string().as_str())
                .set_body_json(json!({"message": "API rate limit exceeded"})),
        )
        .mount(&server)
        .await;

    let err = client(&server).fetch_user("octocat").await.unwrap_err();

    match &err {
        GitHubError::RateLimited { retry_after } => {
            assert!((118..=120).contains(&retry_after.as_secs()), "got {:?}", retry_after);
        }
        other => panic!("expected RateLimited, got {:?}", other),
    }
    // 118..=120 seconds rounds down to one or two whole minutes.
    assert!(matches!(err.retry_after_minutes(), Some(1) | Some(2)));

    let domain: DomainError = err.into();
    assert_eq!(domain.code, ErrorCode::RateLimited);
    assert!(domain.details.contains_key("retry_after_secs"));
}

#[tokio::test]
async fn forbidden_without_quota_headers_is_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let err = client(&server).fetch_user("octocat").await.unwrap_err();
    assert!(matches!(err, GitHubError::Upstream { status: 403 }));
}

#[tokio::test]
async fn server_error_is_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = client(&server).fetch_user("octocat").await.unwrap_err();
    assert!(matches!(err, GitHubError::Upstream { status: 502 }));
    assert_eq!(DomainError::from(err).code, ErrorCode::UpstreamError);
}

#[tokio::test]
async fn malformed_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": true})))
        .mount(&server)
        .await;

    let err = client(&server).fetch_user("octocat").await.unwrap_err();
    assert!(matches!(err, GitHubError::InvalidResponse(_)));
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(1500)))
        .mount(&server)
        .await;

    let client = GitHubClient::new(
        GitHubClientConfig::new()
            .with_base_url(server.uri())
            .with_timeout(Duration::from_millis(200)),
    )
    .unwrap();

    let err = client.fetch_user("octocat").await.unwrap_err();
    assert!(matches!(err, GitHubError::Timeout { .. }));
    assert!(err.is_transient());
    assert_eq!(DomainError::from(err).code, ErrorCode::UpstreamUnavailable);
}

#[tokio::test]
async fn repo_languages_keep_byte_counts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octocat/hello/languages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Rust": 12000, "Shell": 300})))
        .mount(&server)
        .await;

    let languages = client(&server).fetch_repo_languages("octocat", "hello").await.unwrap();

    assert_eq!(languages.get("Rust"), Some(12000));
    assert_eq!(languages.get("Shell"), Some(300));
}
