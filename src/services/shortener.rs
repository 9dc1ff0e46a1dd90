//! URL shortening adapter
//!
//! Single round trip to a third-party shortening endpoint that answers
//! with the short URL as a plain-text body. No authentication, no retry:
//! on any failure the caller displays the unshortened affiliate URL
//! instead of an error.

use tracing::{debug, warn};

use super::http_agent;
use crate::errors::{BeanlinkError, Result};

/// Default endpoint; `{url}` is replaced with the encoded target URL.
/// Free, no key required.
pub const DEFAULT_API_TEMPLATE: &str = "https://tinyurl.com/api-create.php?url={url}";

/// Shortening endpoint client.
pub struct UrlShortener {
    api_url_template: String,
}

impl Default for UrlShortener {
    fn default() -> Self {
        Self::new(DEFAULT_API_TEMPLATE)
    }
}

impl UrlShortener {
    /// Create a shortener for an endpoint template.
    ///
    /// `api_url_template` uses `{url}` as the placeholder for the
    /// percent-encoded target URL.
    pub fn new(api_url_template: &str) -> Self {
        Self {
            api_url_template: api_url_template.to_string(),
        }
    }

    /// Build from `BEANLINK_SHORTENER_API`, defaulting to TinyURL.
    pub fn from_env() -> Self {
        match std::env::var("BEANLINK_SHORTENER_API") {
            Ok(template) if !template.trim().is_empty() => Self::new(template.trim()),
            _ => Self::default(),
        }
    }

    fn request_url(&self, url: &str) -> String {
        self.api_url_template
            .replace("{url}", &urlencoding::encode(url))
    }

    /// Shorten an absolute URL.
    ///
    /// Returns the short alias, or [`BeanlinkError::ShorteningUnavailable`]
    /// on any network failure, non-success status, or garbage body.
    pub fn shorten(&self, url: &str) -> Result<String> {
        let request_url = self.request_url(url);
        debug!("Requesting short URL via {}", request_url);

        let resp = http_agent().get(&request_url).call().map_err(|e| {
            warn!("Shortening request failed: {}", e);
            BeanlinkError::shortening_unavailable(e.to_string())
        })?;

        let body = resp.into_body().read_to_string().map_err(|e| {
            warn!("Shortening response unreadable: {}", e);
            BeanlinkError::shortening_unavailable(e.to_string())
        })?;

        let short_url = body.trim();
        if !short_url.starts_with("http") {
            warn!("Shortening endpoint returned unexpected body: {:?}", short_url);
            return Err(BeanlinkError::shortening_unavailable(
                "endpoint did not return a URL",
            ));
        }
        Ok(short_url.to_string())
    }
}
