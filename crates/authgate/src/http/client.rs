//! HTTP transport for the authentication service.

use reqwest::header::{AUTHORIZATION, HeaderValue, ORIGIN};
use tracing::{debug, instrument, trace};

use crate::config::ClientConfig;
use crate::error::{Error, InvalidInputError, ProtocolError, TransportError};
use crate::proxy::ProxyRule;
use crate::types::ApiUrl;

use super::request::RequestDescriptor;

/// Single-attempt HTTP client.
///
/// Holds the cookie jar, so the service's `refresh-token` cookie set on
/// login is sent back with every later request.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base: ApiUrl,
    proxy: Option<ProxyRule>,
}

impl HttpClient {
    /// Create a new HTTP client from `config`.
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        let mut builder = reqwest::Client::builder()
            .user_agent(config.user_agent())
            .cookie_store(true);

        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| TransportError::Http {
            message: format!("failed to build HTTP client: {}", e),
        })?;

        Ok(Self {
            client,
            base: config.base().clone(),
            proxy: config.proxy().cloned(),
        })
    }

    /// Returns the base URL this client is configured for.
    pub fn base(&self) -> &ApiUrl {
        &self.base
    }

    /// Send `request` once.
    ///
    /// Returns the response for 2xx statuses and a [`ProtocolError`] for
    /// every other status.
    #[instrument(skip(self, request, authorization), fields(method = %request.method(), path = request.path()))]
    pub async fn send(
        &self,
        request: &RequestDescriptor,
        authorization: Option<&HeaderValue>,
    ) -> Result<reqwest::Response, Error> {
        let (url, origin) = self.resolve(request.path());
        debug!(%url, authorized = authorization.is_some(), "Sending request");

        let mut builder = self.client.request(request.method().clone(), &url);

        if !request.query().is_empty() {
            builder = builder.query(request.query());
        }
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }
        if let Some(value) = authorization {
            builder = builder.header(AUTHORIZATION, value.clone());
        }
        if let Some(origin) = origin {
            let value = HeaderValue::from_str(&origin).map_err(|_| InvalidInputError::Other {
                message: format!("proxy origin '{}' is not a valid header value", origin),
            })?;
            builder = builder.header(ORIGIN, value);
        }

        let response = builder.send().await?;
        let status = response.status();
        trace!(status = %status, "Response received");

        if status.is_success() {
            Ok(response)
        } else {
            Err(Error::Protocol(Self::protocol_error(response).await))
        }
    }

    /// Resolve `path` to an absolute URL and an optional rewritten origin.
    ///
    /// The proxy rule sees the path the request would have on the base
    /// host, so a base of `/api/v1` puts every endpoint under `/api`.
    fn resolve(&self, path: &str) -> (String, Option<String>) {
        let full_path = self.base.endpoint_path(path);
        if let Some(forwarded) = self.proxy.as_ref().and_then(|rule| rule.forward(&full_path)) {
            trace!(url = %forwarded.url, "Forwarding through proxy rule");
            return (forwarded.url, Some(forwarded.origin));
        }
        (self.base.endpoint_url(path), None)
    }

    async fn protocol_error(response: reqwest::Response) -> ProtocolError {
        let status = response.status().as_u16();
        let body = response.text().await.ok().filter(|b| !b.is_empty());
        ProtocolError::new(status, body)
    }
}
