use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    extract::Request,
    http::StatusCode,
};
use shibble_auth::axum::{AuthorizedProfiles, authorization_middleware};
use shibble_auth::credentials::CredentialStore;
use shibble_auth::definitions::FileSource;
use shibble_auth::errors::LookupError;
use shibble_auth::provider::{AuthorizationProvider, ShibbleAuthProvider};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

const DEFINITIONS: &str = r#"
<configs>
  <config name="desktop" protocol="rdp">
    <param name="hostname" value="rdp-host" />
  </config>
</configs>
"#;

struct StubStore {
    rows: HashMap<String, Vec<String>>,
    fail: bool,
}

#[async_trait]
impl CredentialStore for StubStore {
    async fn passwords_for(&self, normalized_email: &str) -> Result<Vec<String>, LookupError> {
        if self.fail {
            return Err(LookupError::Timeout(Duration::from_secs(1)));
        }
        Ok(self
            .rows
            .get(normalized_email)
            .cloned()
            .unwrap_or_default())
    }
}

async fn provider_with_store(
    dir: &tempfile::TempDir,
    store: StubStore,
    init: bool,
) -> Arc<dyn AuthorizationProvider> {
    let path = dir.path().join("shibble-config.xml");
    std::fs::write(&path, DEFINITIONS).expect("write definitions");

    let provider = ShibbleAuthProvider::with_source(
        Arc::new(FileSource::new(path)),
        Arc::new(store),
        "remote_user".to_string(),
    );
    if init {
        provider.init().await.expect("init");
    }
    Arc::new(provider)
}

fn app(provider: Arc<dyn AuthorizationProvider>) -> Router {
    Router::new()
        .route(
            "/session",
            axum::routing::get(|req: Request| async move {
                let profiles = req
                    .extensions()
                    .get::<AuthorizedProfiles>()
                    .expect("authorized profiles");
                assert_eq!(
                    profiles.0["desktop"].parameter("username"),
                    Some("user@example.com")
                );
                "ok"
            }),
        )
        .layer(axum::middleware::from_fn(move |req, next| {
            authorization_middleware(provider.clone(), req, next)
        }))
}

#[tokio::test]
async fn test_authorized_request_reaches_handler() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = StubStore {
        rows: HashMap::from([("user@example.com".to_string(), vec!["secret".to_string()])]),
        fail: false,
    };
    let app = app(provider_with_store(&dir, store, true).await);

    let request = Request::builder()
        .uri("/session")
        .header("remote_user", "User@Example.com")
        .body(Body::empty())
        .expect("build request");

    let response = app.oneshot(request).await.expect("call service");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_missing_identity_header() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = StubStore {
        rows: HashMap::new(),
        fail: false,
    };
    let app = app(provider_with_store(&dir, store, true).await);

    let request = Request::builder()
        .uri("/session")
        .body(Body::empty())
        .expect("build request");

    let response = app.oneshot(request).await.expect("call service");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_uninitialized_provider() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = StubStore {
        rows: HashMap::new(),
        fail: false,
    };
    let app = app(provider_with_store(&dir, store, false).await);

    let request = Request::builder()
        .uri("/session")
        .header("remote_user", "user@example.com")
        .body(Body::empty())
        .expect("build request");

    let response = app.oneshot(request).await.expect("call service");
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_lookup_failure() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = StubStore {
        rows: HashMap::new(),
        fail: true,
    };
    let app = app(provider_with_store(&dir, store, true).await);

    let request = Request::builder()
        .uri("/session")
        .header("remote_user", "user@example.com")
        .body(Body::empty())
        .expect("build request");

    let response = app.oneshot(request).await.expect("call service");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
