//! Profile cache with modification-time invalidation.

use crate::definitions::{DefinitionSource, parse_definitions};
use crate::errors::AuthError;
use crate::types::ProfileMap;
use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Snapshot plus the source modification time observed by the load that
/// produced it. The two are only ever replaced together.
struct CacheState {
    profiles: Arc<ProfileMap>,
    loaded_at: SystemTime,
}

/// In-memory cache of the current profile set.
///
/// The cache revalidates against the definition source's modification time
/// on every access, with a double-checked reload: a shared-lock fast path
/// for the common unchanged case, and an exclusive re-check before the rare
/// reload so that concurrent callers trigger at most one. Callers receive
/// immutable snapshots; replacement is a pointer swap, so a reader holds
/// either the old set or the fully replaced one, never a mix.
pub struct ProfileCache {
    source: Arc<dyn DefinitionSource>,
    state: RwLock<Option<CacheState>>,
}

impl ProfileCache {
    pub fn new(source: Arc<dyn DefinitionSource>) -> Self {
        Self {
            source,
            state: RwLock::new(None),
        }
    }

    /// Loads the definition source and replaces the cached profile set.
    ///
    /// On failure the previously cached snapshot, if any, remains visible.
    pub async fn load(&self) -> Result<(), AuthError> {
        let fresh = load_state(self.source.as_ref())?;
        let mut guard = self.state.write().await;
        *guard = Some(fresh);
        Ok(())
    }

    /// Returns the current snapshot, reloading first if the definition
    /// source has been modified since the last load.
    ///
    /// Fails with [`AuthError::ConfigurationUnavailable`] if no load has
    /// ever succeeded, and with [`AuthError::CacheLoad`] if a needed reload
    /// fails; the previous snapshot stays in place for later callers.
    pub async fn current(&self) -> Result<Arc<ProfileMap>, AuthError> {
        // Fast path: shared lock, source unchanged.
        {
            let guard = self.state.read().await;
            let state = guard.as_ref().ok_or(AuthError::ConfigurationUnavailable)?;
            if !self.is_stale(state) {
                return Ok(Arc::clone(&state.profiles));
            }
        }

        // Slow path: exclusive lock, then re-check in case a concurrent
        // caller already reloaded.
        let mut guard = self.state.write().await;
        let state = guard.as_mut().ok_or(AuthError::ConfigurationUnavailable)?;
        if self.is_stale(state) {
            debug!(
                "definition file {:?} has been modified, reloading",
                self.source.path()
            );
            *state = load_state(self.source.as_ref())?;
        }
        Ok(Arc::clone(&state.profiles))
    }

    /// Compares the source modification time against the snapshot's.
    ///
    /// A source whose metadata cannot be read is treated as unchanged: the
    /// cached snapshot keeps serving until the source reappears.
    fn is_stale(&self, state: &CacheState) -> bool {
        match self.source.modified() {
            Ok(modified) => modified > state.loaded_at,
            Err(e) => {
                warn!("cannot check definition file, serving cached profiles: {e}");
                false
            }
        }
    }
}

/// Reads and parses the source into a fresh cache state.
///
/// The modification time is captured before the content so that a write
/// landing mid-read shows up as stale on the next check instead of being
/// masked.
fn load_state(source: &dyn DefinitionSource) -> Result<CacheState, AuthError> {
    let loaded_at = source.modified().map_err(AuthError::CacheLoad)?;
    let raw = source.read().map_err(AuthError::CacheLoad)?;
    let profiles = parse_definitions(&raw, source.path()).map_err(AuthError::CacheLoad)?;
    debug!(
        "loaded {} connection profiles from {:?}",
        profiles.len(),
        source.path()
    );
    Ok(CacheState {
        profiles: Arc::new(profiles),
        loaded_at,
    })
}
