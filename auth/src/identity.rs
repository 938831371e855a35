//! Identity resolution from inbound request parts.

use http::HeaderMap;

/// The externally authenticated identity carried on a request.
///
/// Holds the raw header value. [`Identity::normalized`] is the single
/// case-folding rule shared by credential lookup and merge, so that a store
/// row for `USER@x.com` matches a resolved identity of `user@x.com`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    raw: String,
}

impl Identity {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// The header value as received.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Lower-cased form used as the credential-store lookup key and as the
    /// injected `username` parameter.
    pub fn normalized(&self) -> String {
        self.raw.to_lowercase()
    }
}

/// Read access to the parts of an inbound request the authorizer needs.
pub trait RequestParts: Send + Sync {
    /// Returns the value of the named header, if present and valid UTF-8.
    fn header(&self, name: &str) -> Option<&str>;
}

/// Request parts captured from an HTTP request.
pub struct HttpRequestParts {
    pub headers: HeaderMap,
    pub method: http::Method,
    pub uri: http::Uri,
}

impl RequestParts for HttpRequestParts {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Extracts the authenticated identity from the request.
///
/// Absence of the header, or an empty value, means no identity: the request
/// was not externally authenticated. The value is returned as received;
/// normalization happens at the lookup and merge sites.
pub fn resolve_identity(request: &dyn RequestParts, header_name: &str) -> Option<Identity> {
    let value = request.header(header_name)?;
    if value.is_empty() {
        return None;
    }
    Some(Identity::new(value))
}
