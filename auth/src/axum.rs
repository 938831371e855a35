//! Axum middleware integration.
//!
//! Boundary glue between an HTTP host application and the authorization
//! provider:
//! 1. Captures the request parts
//! 2. Runs the provider
//! 3. Injects the authorized profile map into request extensions
//! 4. Maps failures onto HTTP status codes

use crate::errors::AuthError;
use crate::identity::HttpRequestParts;
use crate::provider::AuthorizationProvider;
use crate::types::ProfileMap;
use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{error, warn};

/// The authorized profile set, injected into request extensions for
/// downstream handlers.
#[derive(Clone)]
pub struct AuthorizedProfiles(pub Arc<ProfileMap>);

/// Axum middleware running session authorization.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, middleware};
/// use shibble_auth::axum::authorization_middleware;
/// use std::sync::Arc;
///
/// let app = Router::new()
///     .layer(middleware::from_fn(move |req, next| {
///         authorization_middleware(provider.clone(), req, next)
///     }));
/// ```
pub async fn authorization_middleware(
    provider: Arc<dyn AuthorizationProvider>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthorizeError> {
    let parts = HttpRequestParts {
        headers: req.headers().clone(),
        method: req.method().clone(),
        uri: req.uri().clone(),
    };

    match provider.authorize(&parts).await {
        Ok(Some(profiles)) => {
            req.extensions_mut()
                .insert(AuthorizedProfiles(Arc::new(profiles)));
            Ok(next.run(req).await)
        }
        Ok(None) => Err(AuthorizeError::NoIdentity),
        Err(AuthError::ConfigurationUnavailable) => Err(AuthorizeError::Unavailable),
        Err(e @ AuthError::CacheLoad(_)) => {
            error!("definition reload failed: {e}");
            Err(AuthorizeError::Unavailable)
        }
        Err(e) => {
            warn!("authorization failed: {e}");
            Err(AuthorizeError::Failed)
        }
    }
}

/// Authorization errors for HTTP responses
#[derive(Debug)]
pub enum AuthorizeError {
    /// No externally authenticated identity on the request
    NoIdentity,
    /// Profile definitions missing or unloadable
    Unavailable,
    /// Credential lookup failed
    Failed,
}

impl IntoResponse for AuthorizeError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthorizeError::NoIdentity => {
                (StatusCode::UNAUTHORIZED, "No authenticated identity")
            }
            AuthorizeError::Unavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Connection definitions unavailable",
            ),
            AuthorizeError::Failed => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Authorization failed")
            }
        };

        (status, message).into_response()
    }
}
