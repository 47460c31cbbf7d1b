//! Validated collection endpoint URL.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// A URL that cannot serve as a collection endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid endpoint '{value}': {reason}")]
pub struct EndpointError {
    pub value: String,
    pub reason: String,
}

/// Absolute `http` or `https` URL of a JSON collection, e.g.
/// `http://localhost:3000/api/booking`.
///
/// ```
/// use innkeep_http::Endpoint;
///
/// let endpoint = Endpoint::new("http://localhost:3000/api/booking").unwrap();
/// assert_eq!(endpoint.host(), Some("localhost"));
/// assert!(Endpoint::new("ftp://example.com/rooms").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Endpoint(Url);

impl Endpoint {
    /// Parse and validate an endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse, is not absolute, uses a
    /// scheme other than `http`/`https`, or has no host.
    pub fn new(s: impl AsRef<str>) -> Result<Self, EndpointError> {
        let s = s.as_ref();
        let invalid = |reason: &str| EndpointError {
            value: s.to_string(),
            reason: reason.to_string(),
        };

        let url = Url::parse(s).map_err(|e| invalid(&e.to_string()))?;

        if url.cannot_be_a_base() {
            return Err(invalid("must be an absolute URL"));
        }
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid("must use http or https"));
        }
        if url.host_str().is_none() {
            return Err(invalid("must have a host"));
        }

        Ok(Self(url))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }

    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Endpoint {
    type Err = EndpointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Endpoint {
    type Error = EndpointError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Endpoint> for String {
    fn from(endpoint: Endpoint) -> Self {
        endpoint.0.into()
    }
}
