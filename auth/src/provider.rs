//! Authorization provider orchestration.

use crate::cache::ProfileCache;
use crate::credentials::CredentialStore;
use crate::definitions::{DefinitionSource, FileSource};
use crate::errors::AuthError;
use crate::identity::{RequestParts, resolve_identity};
use crate::merge::merge_credentials;
use crate::settings::Settings;
use crate::types::ProfileMap;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

/// Authorizes a request to a set of connection profiles.
#[async_trait]
pub trait AuthorizationProvider: Send + Sync {
    /// Authorizes one request.
    ///
    /// `Ok(None)` means no externally authenticated identity was present on
    /// the request; that is a normal outcome, not an error. `Ok(Some(_))`
    /// carries the profile set for the identity, with credentials merged in
    /// when the store had a matching row.
    async fn authorize(
        &self,
        request: &dyn RequestParts,
    ) -> Result<Option<ProfileMap>, AuthError>;
}

/// Provider combining cached profile definitions with per-request credential
/// lookup.
///
/// Starts without a profile set; [`ShibbleAuthProvider::init`] must succeed
/// once before requests are served. Every request then revalidates the cache
/// before resolving the identity and merging its credentials.
pub struct ShibbleAuthProvider {
    cache: ProfileCache,
    store: Arc<dyn CredentialStore>,
    username_header: String,
}

impl ShibbleAuthProvider {
    /// Stable identifier under which the provider registers with its host.
    pub const IDENTIFIER: &'static str = "shibble";

    /// Creates a provider over the definition file named by the settings.
    pub fn new(settings: &Settings, store: Arc<dyn CredentialStore>) -> Self {
        Self::with_source(
            Arc::new(FileSource::new(settings.definition_file())),
            store,
            settings.username_header.clone(),
        )
    }

    /// Creates a provider over an arbitrary definition source.
    pub fn with_source(
        source: Arc<dyn DefinitionSource>,
        store: Arc<dyn CredentialStore>,
        username_header: String,
    ) -> Self {
        Self {
            cache: ProfileCache::new(source),
            store,
            username_header,
        }
    }

    /// Performs the initial definition load.
    ///
    /// Must succeed once before requests are served. Calling it again simply
    /// reloads the definitions.
    pub async fn init(&self) -> Result<(), AuthError> {
        self.cache.load().await
    }
}

#[async_trait]
impl AuthorizationProvider for ShibbleAuthProvider {
    async fn authorize(
        &self,
        request: &dyn RequestParts,
    ) -> Result<Option<ProfileMap>, AuthError> {
        let profiles = self.cache.current().await?;

        let Some(identity) = resolve_identity(request, &self.username_header) else {
            info!("no authenticated identity on request");
            return Ok(None);
        };
        info!("found remote user '{}'", identity.raw());

        let passwords = self.store.passwords_for(&identity.normalized()).await?;
        if passwords.is_empty() {
            debug!(
                "no credential row for '{}', returning profiles unmodified",
                identity.normalized()
            );
            return Ok(Some((*profiles).clone()));
        }

        Ok(Some(merge_credentials(&profiles, &identity, &passwords)))
    }
}
