//! REST API behaviour over the in-memory store.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use codecv::adapters::auth::MockSessionValidator;
use codecv::adapters::github::MockGitHubSource;
use codecv::adapters::http::{api_router, AppState};
use codecv::adapters::memory::InMemoryStore;
use codecv::application::SyncPolicy;

const ALICE: &str = "alice-token";
const BOB: &str = "bob-token";
const STAFF: &str = "staff-token";

struct TestApp {
    router: Router,
    store: InMemoryStore,
}

impl TestApp {
    fn new() -> Self {
        let store = InMemoryStore::new();
        let state = AppState::new(
            Arc::new(store.profiles()),
            Arc::new(store.skills()),
            Arc::new(MockGitHubSource::new()),
            SyncPolicy::default(),
        );
        let validator = MockSessionValidator::new()
            .with_test_user(ALICE, "alice")
            .with_test_user(BOB, "bob")
            .with_staff_user(STAFF, "admin");
        Self {
            router: api_router(state, Arc::new(validator)),
            store,
        }
    }

    async fn send(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self.router.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, uri, token, None).await
    }

    /// Creates the caller's profile and returns its id.
    async fn my_profile(&self, token: &str) -> String {
        let (status, body) = self.get("/api/profiles/my-profile/", Some(token)).await;
        assert_eq!(status, StatusCode::OK);
        body["id"].as_str().unwrap().to_string()
    }

    async fn make_private(&self, token: &str, id: &str) {
        let (status, _) = self
            .send(
                Method::PATCH,
                &format!("/api/profiles/{}/", id),
                Some(token),
                Some(json!({"is_public": false})),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }
}

fn usernames(list: &Value) -> Vec<String> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|p| p["username"].as_str().unwrap().to_string())
        .collect()
}

// ════════════════════════════════════════════════════════════════════════════
// Profiles
// ════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn health_check() {
    let app = TestApp::new();
    let (status, body) = app.get("/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn my_profile_is_created_once_and_aliased() {
    let app = TestApp::new();

    let first = app.my_profile(ALICE).await;
    let (status, alias) = app.get("/api/my-profile/", Some(ALICE)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(alias["id"], first.as_str());
    assert_eq!(alias["username"], "alice");
    assert_eq!(alias["theme"], "github-dark");
    assert_eq!(app.store.profile_count().await, 1);
}

#[tokio::test]
async fn my_profile_requires_authentication() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/my-profile/", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");

    let (status, _) = app.get("/api/my-profile/", Some("forged-token")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn explicit_create_then_conflict() {
    let app = TestApp::new();
    let body = json!({"headline": "Rust developer", "location": "Lisbon", "theme": "monokai"});

    let (status, created) = app.send(Method::POST, "/api/profiles/", Some(ALICE), Some(body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["headline"], "Rust developer");
    assert_eq!(created["theme"], "monokai");

    let (status, err) = app.send(Method::POST, "/api/profiles/", Some(ALICE), Some(body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(err["code"], "CONFLICT");
}

#[tokio::test]
async fn list_shows_public_and_own_profiles() {
    let app = TestApp::new();
    app.my_profile(ALICE).await;
    let bob = app.my_profile(BOB).await;
    app.make_private(BOB, &bob).await;

    let (status, anonymous) = app.get("/api/profiles/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(usernames(&anonymous), vec!["alice"]);

    let (_, as_bob) = app.get("/api/profiles/", Some(BOB)).await;
    assert_eq!(usernames(&as_bob), vec!["alice", "bob"]);

    let (_, as_staff) = app.get("/api/profiles/", Some(STAFF)).await;
    assert_eq!(usernames(&as_staff), vec!["alice", "bob"]);
}

#[tokio::test]
async fn private_profile_is_hidden_from_others() {
    let app = TestApp::new();
    let bob = app.my_profile(BOB).await;
    app.make_private(BOB, &bob).await;
    let uri = format!("/api/profiles/{}/", bob);

    let (status, body) = app.get(&uri, Some(ALICE)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "PROFILE_NOT_FOUND");

    assert_eq!(app.get(&uri, None).await.0, StatusCode::NOT_FOUND);
    assert_eq!(app.get(&uri, Some(BOB)).await.0, StatusCode::OK);
    assert_eq!(app.get(&uri, Some(STAFF)).await.0, StatusCode::OK);
}

#[tokio::test]
async fn malformed_profile_id_is_not_found() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/profiles/not-a-uuid/", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "PROFILE_NOT_FOUND");
}

#[tokio::test]
async fn update_validates_fields() {
    let app = TestApp::new();
    let id = app.my_profile(ALICE).await;
    let uri = format!("/api/profiles/{}/", id);

    let (status, body) = app
        .send(Method::PATCH, &uri, Some(ALICE), Some(json!({"website": "ftp://example.com"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
    assert_eq!(body["details"]["field"], "website");

    let (status, body) = app
        .send(Method::PATCH, &uri, Some(ALICE), Some(json!({"github_username": "-bad-"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "github_username");

    let (status, body) = app
        .send(Method::PATCH, &uri, Some(ALICE), Some(json!({"headline": "x".repeat(201)})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "headline");

    let (status, body) = app.send(Method::PATCH, &uri, Some(ALICE), Some(json!({"theme": "neon"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn put_and_patch_apply_given_fields() {
    let app = TestApp::new();
    let id = app.my_profile(ALICE).await;
    let uri = format!("/api/profiles/{}/", id);

    let (status, body) = app
        .send(
            Method::PUT,
            &uri,
            Some(ALICE),
            Some(json!({"bio": "Systems programmer", "website": "https://alice.dev"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bio"], "Systems programmer");

    let (_, body) = app.send(Method::PATCH, &uri, Some(ALICE), Some(json!({"location": "Porto"}))).await;
    assert_eq!(body["location"], "Porto");
    assert_eq!(body["website"], "https://alice.dev");
}

#[tokio::test]
async fn editing_someone_elses_profile() {
    let app = TestApp::new();
    let bob = app.my_profile(BOB).await;
    let uri = format!("/api/profiles/{}/", bob);
    let change = json!({"bio": "hacked"});

    let (status, body) = app.send(Method::PATCH, &uri, Some(ALICE), Some(change.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");

    let (status, body) = app.send(Method::PATCH, &uri, Some(STAFF), Some(json!({"bio": "moderated"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bio"], "moderated");

    app.make_private(BOB, &bob).await;
    let (status, _) = app.send(Method::PATCH, &uri, Some(ALICE), Some(change)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_cascades_to_skills() {
    let app = TestApp::new();
    let id = app.my_profile(ALICE).await;
    app.send(
        Method::POST,
        "/api/skills/",
        Some(ALICE),
        Some(json!({"name": "Rust", "category": "backend"})),
    )
    .await;
    assert_eq!(app.store.skill_count().await, 1);
    let uri = format!("/api/profiles/{}/", id);

    let (status, _) = app.send(Method::DELETE, &uri, Some(BOB), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.send(Method::DELETE, &uri, Some(ALICE), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());
    assert_eq!(app.store.skill_count().await, 0);
    assert_eq!(app.get(&uri, Some(ALICE)).await.0, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn public_profile_counts_views() {
    let app = TestApp::new();
    app.my_profile(ALICE).await;

    let (status, first) = app.get("/api/public/profile/alice/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["views"], 1);

    let (_, second) = app.get("/api/public/profile/alice/", None).await;
    assert_eq!(second["views"], 2);

    // Regular reads do not count.
    let (_, own) = app.get("/api/my-profile/", Some(ALICE)).await;
    assert_eq!(own["views"], 2);
}

#[tokio::test]
async fn private_or_unknown_public_profile_is_404() {
    let app = TestApp::new();
    let id = app.my_profile(ALICE).await;
    app.make_private(ALICE, &id).await;

    let (status, body) = app.get("/api/public/profile/alice/", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "PROFILE_NOT_FOUND");

    assert_eq!(app.get("/api/public/profile/nobody/", None).await.0, StatusCode::NOT_FOUND);
}

// ════════════════════════════════════════════════════════════════════════════
// Skills
// ════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn skills_require_authentication() {
    let app = TestApp::new();
    assert_eq!(app.get("/api/skills/", None).await.0, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn list_skills_without_profile_is_empty() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/skills/", Some(ALICE)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
    assert_eq!(app.store.profile_count().await, 0);
}

#[tokio::test]
async fn skill_lifecycle() {
    let app = TestApp::new();

    let (status, created) = app
        .send(
            Method::POST,
            "/api/skills/",
            Some(ALICE),
            Some(json!({"name": "Rust", "category": "backend"})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["level"], 3);
    assert_eq!(created["category_display"], "Backend");
    // The first skill creates the profile.
    assert_eq!(app.store.profile_count().await, 1);

    let uri = format!("/api/skills/{}/", created["id"].as_str().unwrap());

    let (status, updated) = app
        .send(Method::PATCH, &uri, Some(ALICE), Some(json!({"level": 5, "order": 1})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["level"], 5);
    assert_eq!(updated["name"], "Rust");

    let (status, fetched) = app.get(&uri, Some(ALICE)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["order"], 1);

    let (status, _) = app.send(Method::DELETE, &uri, Some(ALICE), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(app.get(&uri, Some(ALICE)).await.0, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn skill_validation_and_conflicts() {
    let app = TestApp::new();
    let rust = json!({"name": "Rust", "category": "backend"});
    app.send(Method::POST, "/api/skills/", Some(ALICE), Some(rust.clone())).await;

    let (status, body) = app.send(Method::POST, "/api/skills/", Some(ALICE), Some(rust)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");

    let (status, body) = app
        .send(
            Method::POST,
            "/api/skills/",
            Some(ALICE),
            Some(json!({"name": "Go", "category": "backend", "level": 9})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "level");

    let (status, body) = app.send(Method::POST, "/api/skills/", Some(ALICE), Some(json!({"name": "Go"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");

    let (status, _) = app.send(Method::POST, "/api/skills/", Some(ALICE), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn skills_of_other_users_are_invisible() {
    let app = TestApp::new();
    let (_, created) = app
        .send(
            Method::POST,
            "/api/skills/",
            Some(BOB),
            Some(json!({"name": "Haskell", "category": "other"})),
        )
        .await;
    let uri = format!("/api/skills/{}/", created["id"].as_str().unwrap());

    let (status, body) = app.get(&uri, Some(ALICE)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "SKILL_NOT_FOUND");

    // Staff act on their own profile as well.
    assert_eq!(app.get(&uri, Some(STAFF)).await.0, StatusCode::NOT_FOUND);
    assert_eq!(
        app.send(Method::DELETE, &uri, Some(ALICE), None).await.0,
        StatusCode::NOT_FOUND
    );
    assert_eq!(app.get(&uri, Some(BOB)).await.0, StatusCode::OK);
}

#[tokio::test]
async fn skills_are_listed_by_order_then_name() {
    let app = TestApp::new();
    for (name, order) in [("Zig", 1), ("Bash", 2), ("Ada", 1)] {
        app.send(
            Method::POST,
            "/api/skills/",
            Some(ALICE),
            Some(json!({"name": name, "category": "other", "order": order})),
        )
        .await;
    }

    let (_, body) = app.get("/api/skills/", Some(ALICE)).await;
    let names: Vec<&str> = body.as_array().unwrap().iter().map(|s| s["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Ada", "Zig", "Bash"]);
}
