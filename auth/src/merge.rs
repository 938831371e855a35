//! Credential injection into cached profiles.

use crate::identity::Identity;
use crate::types::ProfileMap;
use tracing::{debug, warn};

/// Merges the resolved credentials into a copy of every profile.
///
/// The returned map is a per-request copy; the cached profile set itself is
/// never modified. With no credential rows the copy is returned unchanged.
/// With multiple rows the merge runs once per row, so the last row's
/// password stands.
pub fn merge_credentials(
    profiles: &ProfileMap,
    identity: &Identity,
    passwords: &[String],
) -> ProfileMap {
    let username = identity.normalized();
    if passwords.len() > 1 {
        warn!(
            "credential store matched {} rows for '{}', keeping the last",
            passwords.len(),
            username
        );
    }

    let mut merged = profiles.clone();
    for password in passwords {
        for (name, profile) in merged.iter_mut() {
            debug!("adding user '{}' to profile '{}'", username, name);
            profile.set_parameter("username", &username);
            profile.set_parameter("password", password);
        }
    }
    merged
}
