use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::api::{ApiRequest, McssTransport, Method, RawResponse};
use crate::error::{McssApiError, Result};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const READ_TIMEOUT: Duration = Duration::from_secs(5);

/// reqwest-backed transport with fixed 5 second connect and read deadlines.
/// No retries; exceeding a deadline surfaces as a connection error.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        Self::with_unsafe_ssl(false)
    }

    /// When `allow_unsafe_ssl` is set, certificate and hostname verification
    /// is disabled for this client only. Opt-in, never the default.
    pub fn with_unsafe_ssl(allow_unsafe_ssl: bool) -> Result<Self> {
        if allow_unsafe_ssl {
            warn!("unsafe SSL enabled: no certificates will be verified for this client");
        }

        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .read_timeout(READ_TIMEOUT)
            .danger_accept_invalid_certs(allow_unsafe_ssl)
            .build()
            .map_err(|e| McssApiError::Connection(e.to_string()))?;

        Ok(HttpTransport { client })
    }
}

#[async_trait]
impl McssTransport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };

        debug!("{:?} {}", request.method, request.url);

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| McssApiError::Connection(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| McssApiError::Connection(e.to_string()))?;

        debug!("{} returned {}", request.url, status);

        Ok(RawResponse { status, body })
    }
}
