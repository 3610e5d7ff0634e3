//! Client configuration.
//!
//! Base URLs and timeouts are explicit constructor inputs rather than module-level
//! constants, so tests can point the client at a mock server and deployments can
//! target different gateways without rebuilding.

use crate::{Error, Result};
use std::env;
use std::time::Duration;
use url::Url;

/// Default path prefix of the document service behind the gateway.
pub const DEFAULT_DOC_PREFIX: &str = "/llmcenter/v1";

/// Default path prefix of the user-center (auth) service.
pub const DEFAULT_AUTH_PREFIX: &str = "/usercenter/v1";

/// Configuration for [`crate::DocClient`] and [`crate::auth::AuthClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the document service, e.g. `https://host/llmcenter/v1`.
    pub base_url: Url,
    /// Base URL of the user-center service, e.g. `https://host/usercenter/v1`.
    pub auth_base_url: Url,
    /// Per-request timeout for non-streaming calls. Streaming reads are bounded
    /// by the transport's own connect timeout, not this value.
    pub request_timeout: Duration,
}

impl ClientConfig {
    /// Build a config from the gateway origin, applying the default service
    /// prefixes. `LLMCENTER_HTTP_TIMEOUT_SECS` overrides the 30s default.
    pub fn from_origin(origin: &str) -> Result<Self> {
        let origin = origin.trim_end_matches('/');
        Ok(Self {
            base_url: parse_base(&format!("{origin}{DEFAULT_DOC_PREFIX}"))?,
            auth_base_url: parse_base(&format!("{origin}{DEFAULT_AUTH_PREFIX}"))?,
            request_timeout: default_timeout(),
        })
    }

    /// Build a config with explicit service URLs.
    pub fn new(base_url: &str, auth_base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: parse_base(base_url)?,
            auth_base_url: parse_base(auth_base_url)?,
            request_timeout: default_timeout(),
        })
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Join a service-relative path (`/conversations`, `/chat/edit`, ...) onto
    /// the document-service base.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    pub(crate) fn auth_endpoint(&self, path: &str) -> String {
        format!(
            "{}{}",
            self.auth_base_url.as_str().trim_end_matches('/'),
            path
        )
    }
}

fn parse_base(s: &str) -> Result<Url> {
    Url::parse(s).map_err(|e| Error::Configuration(format!("invalid base url {s:?}: {e}")))
}

fn default_timeout() -> Duration {
    let secs = env::var("LLMCENTER_HTTP_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(30);
    Duration::from_secs(secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_gets_service_prefixes() {
        let cfg = ClientConfig::from_origin("https://example.com/").unwrap();
        assert_eq!(cfg.base_url.as_str(), "https://example.com/llmcenter/v1");
        assert_eq!(
            cfg.auth_base_url.as_str(),
            "https://example.com/usercenter/v1"
        );
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let cfg = ClientConfig::from_origin("https://example.com").unwrap();
        assert_eq!(
            cfg.endpoint("/conversations"),
            "https://example.com/llmcenter/v1/conversations"
        );
    }
}
