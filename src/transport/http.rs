//! HTTP transport against a honk server.

use crate::model::{ActionSubmission, TransportError, ViewPayload};
use crate::parser::parse_payload;
use crate::transport::{Transport, DEFAULT_READ_TIMEOUT, DEFAULT_WRITE_TIMEOUT};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::COOKIE;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;

/// Endpoint serving view fragments.
pub const HYDRA_PATH: &str = "hydra";

/// Blocking reqwest transport.
///
/// One client is shared by every request; timeouts are applied per
/// request so reads and writes get separate bounds.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base: String,
    cookie: Option<String>,
    read_timeout: Duration,
    write_timeout: Duration,
}

impl HttpTransport {
    /// Build a transport for `base` (e.g. `https://honk.example`).
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Network` if the TLS backend cannot be
    /// initialized.
    pub fn new(base: impl Into<String>) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(concat!("honkview/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(classify)?;
        Ok(Self {
            client,
            base: base.into().trim_end_matches('/').to_string(),
            cookie: None,
            read_timeout: DEFAULT_READ_TIMEOUT,
            write_timeout: DEFAULT_WRITE_TIMEOUT,
        })
    }

    /// Send this `Cookie` header value with every request.
    pub fn with_cookie(mut self, cookie: Option<String>) -> Self {
        self.cookie = cookie.filter(|c| !c.is_empty());
        self
    }

    /// Override the read and write bounds.
    pub fn with_timeouts(mut self, read: Duration, write: Duration) -> Self {
        self.read_timeout = read;
        self.write_timeout = write;
        self
    }

    /// Server base URL without a trailing slash.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Absolute URL of an endpoint below the base.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base, endpoint.trim_start_matches('/'))
    }

    fn with_session(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.cookie {
            Some(cookie) => request.header(COOKIE, cookie),
            None => request,
        }
    }
}

impl Transport for HttpTransport {
    fn fetch_view(&self, args: &BTreeMap<String, String>) -> Result<ViewPayload, TransportError> {
        let url = self.endpoint_url(HYDRA_PATH);
        debug!(%url, ?args, "GET view");
        let request = self
            .client
            .get(&url)
            .query(args)
            .timeout(self.read_timeout);
        let response = self.with_session(request).send().map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Http {
                status: status.as_u16(),
            });
        }
        let body = response.text().map_err(classify)?;
        parse_payload(&body)
    }

    fn submit_action(&self, submission: &ActionSubmission) -> Result<(), TransportError> {
        let url = self.endpoint_url(&submission.endpoint);
        debug!(%url, "POST action");
        let request = self
            .client
            .post(&url)
            .form(&submission.fields)
            .timeout(self.write_timeout);
        let response = self.with_session(request).send().map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Http {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

/// Map a reqwest failure onto the transport taxonomy.
fn classify(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else if let Some(status) = err.status() {
        TransportError::Http {
            status: status.as_u16(),
        }
    } else if err.is_decode() {
        TransportError::MalformedPayload {
            reason: err.to_string(),
        }
    } else {
        TransportError::Network {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_trailing_slash_is_trimmed() {
        let transport = HttpTransport::new("https://honk.test/").unwrap();
        assert_eq!(transport.base(), "https://honk.test");
        assert_eq!(transport.endpoint_url("hydra"), "https://honk.test/hydra");
        assert_eq!(transport.endpoint_url("/zonkit"), "https://honk.test/zonkit");
    }

    #[test]
    fn empty_cookie_is_dropped() {
        let transport = HttpTransport::new("https://honk.test")
            .unwrap()
            .with_cookie(Some(String::new()));
        assert!(transport.cookie.is_none());
    }

    #[test]
    fn unreachable_server_is_network_error() {
        // Port 9 on localhost is the discard service; nothing listens there
        // in test environments, so the connection is refused.
        let transport = HttpTransport::new("http://127.0.0.1:9")
            .unwrap()
            .with_timeouts(Duration::from_secs(2), Duration::from_secs(2));
        let result = transport.fetch_view(&BTreeMap::new());
        assert!(
            matches!(
                result,
                Err(TransportError::Network { .. }) | Err(TransportError::Timeout)
            ),
            "Expected network failure, got {:?}",
            result
        );
    }
}
