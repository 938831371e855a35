use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Failure to read or parse the profile definition file.
#[derive(Error, Debug)]
pub enum DefinitionError {
    #[error("error reading definition file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("error parsing definition file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: quick_xml::DeError,
    },
}

/// Failure to query the credential store.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("credential store query failed: {0}")]
    Query(#[from] sqlx::Error),
    #[error("credential store query timed out after {0:?}")]
    Timeout(Duration),
}

/// Authorization request failure.
///
/// The absence of an authenticated identity is not represented here: it is a
/// normal outcome, reported as `None` by the provider.
#[derive(Error, Debug)]
pub enum AuthError {
    /// The definition source could not be loaded. A previously cached
    /// profile set, if any, remains in effect.
    #[error("failed to load connection definitions: {0}")]
    CacheLoad(#[source] DefinitionError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// No profile set has ever been loaded.
    #[error("connection definitions have never been loaded")]
    ConfigurationUnavailable,
}
