//! Session authorization from cached connection profiles.
//!
//! Remote-desktop sessions are authorized by combining a statically defined
//! set of connection profiles, read from an XML definition file and cached in
//! memory, with a per-user password resolved at request time from a MySQL
//! credential store. Each authorization request:
//!
//! 1. revalidates the profile cache against the definition file's
//!    modification time (double-checked, at most one reload in flight),
//! 2. resolves the externally authenticated identity from a configurable
//!    request header,
//! 3. looks up the password stored for the lower-cased identity,
//! 4. merges `username`/`password` into a per-request copy of every profile.
//!
//! The provider trusts an externally authenticated identity; it never
//! authenticates the remote user itself.
//!
//! # Example
//!
//! ```rust,no_run
//! use shibble_auth::credentials::MySqlCredentialStore;
//! use shibble_auth::identity::HttpRequestParts;
//! use shibble_auth::provider::{AuthorizationProvider, ShibbleAuthProvider};
//! use shibble_auth::settings::Settings;
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let settings = Settings::from_env()?;
//! let store = Arc::new(MySqlCredentialStore::connect(&settings).await?);
//! let provider = ShibbleAuthProvider::new(&settings, store);
//! provider.init().await?;
//!
//! let mut headers = http::HeaderMap::new();
//! headers.insert("remote_user", "User@Example.com".parse()?);
//! let parts = HttpRequestParts {
//!     headers,
//!     method: http::Method::GET,
//!     uri: "/session".parse()?,
//! };
//!
//! match provider.authorize(&parts).await? {
//!     Some(profiles) => println!("authorized {} profiles", profiles.len()),
//!     None => println!("no authenticated identity"),
//! }
//! # Ok(())
//! # }
//! ```

/// Profile data model
pub mod types;

/// Error taxonomy
pub mod errors;

/// Runtime key/value properties
pub mod settings;

/// Definition file parsing
pub mod definitions;

/// Profile cache with modification-time invalidation
pub mod cache;

/// Identity resolution from inbound request parts
pub mod identity;

/// Credential store lookup
pub mod credentials;

/// Credential injection into profiles
pub mod merge;

/// Authorization provider orchestration
pub mod provider;

/// Axum middleware integration
pub mod axum;

// Re-export commonly used types
pub use errors::{AuthError, DefinitionError, LookupError};
pub use provider::{AuthorizationProvider, ShibbleAuthProvider};
pub use types::{ConnectionProfile, Parameter, ProfileMap};
