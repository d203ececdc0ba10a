use http::{HeaderMap, HeaderValue, Method, StatusCode, header};
use log::{error, info, warn};
use reqwest::{Client, Proxy};
use serde_json::Value;
use std::time::{Duration, Instant};
use url::Url;

/// Header downstream services use to correlate log lines across calls.
pub const CORRELATION_ID_HEADER: &str = "x-request-id";
pub const TRACE_HEADER: &str = "x-amzn-trace-id";

/// Status code and parsed body of whatever the remote party answered.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceResponse {
    pub status: StatusCode,
    /// `None` when the response carried no body.
    pub body: Option<Value>,
}

impl ServiceResponse {
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }
}

/// Tracing context threaded through outbound calls.
///
/// The default carries nothing and adds no header.
#[derive(Debug, Clone, Default)]
pub struct TraceContext {
    header: Option<HeaderValue>,
}

impl TraceContext {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(trace_header: HeaderValue) -> Self {
        Self {
            header: Some(trace_header),
        }
    }

    pub fn header(&self) -> Option<&HeaderValue> {
        self.header.as_ref()
    }
}

/// Network-level failures. A response of any status is never one of these.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Failed to build HTTP client: {context}: {source}")]
    Build {
        context: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("HTTP error: {method} {url}: {source}")]
    Request {
        method: Method,
        url: Url,
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to read response body: {method} {url}: {source}")]
    ResponseBodyRead {
        method: Method,
        url: Url,
        #[source]
        source: reqwest::Error,
    },
}

/// JSON-over-HTTP transport shared by every service client.
#[derive(Clone, Debug)]
pub struct Transport {
    /// Shared Reqwest HTTP client
    client: Client,
    /// Optional request timeout
    timeout: Option<Duration>,
}

impl Transport {
    /// Builds a transport, tunnelling through `forward_proxy` when one is given.
    pub fn try_new(forward_proxy: Option<&Url>) -> Result<Self, TransportError> {
        let builder = match forward_proxy {
            Some(proxy_url) => {
                let proxy =
                    Proxy::all(proxy_url.as_str()).map_err(|e| TransportError::Build {
                        context: "Invalid forward proxy URL",
                        source: e,
                    })?;
                Client::builder().proxy(proxy)
            }
            None => Client::builder().no_proxy(),
        };
        let client = builder.build().map_err(|e| TransportError::Build {
            context: "Failed to construct reqwest client",
            source: e,
        })?;
        Ok(Self {
            client,
            timeout: None,
        })
    }

    /// Sets a timeout for all future requests.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        let mut this = self.clone();
        this.timeout = Some(timeout);
        this
    }

    /// Sends one request and hands back whatever the remote party answered.
    ///
    /// `service` and `description` only feed the log lines (e.g. `"connector"`, `"do capture"`).
    #[allow(clippy::too_many_arguments)]
    pub async fn execute(
        &self,
        service: &'static str,
        method: Method,
        url: &Url,
        payload: Option<&Value>,
        description: &str,
        correlation_id: &str,
        trace: &TraceContext,
    ) -> Result<ServiceResponse, TransportError> {
        let start = Instant::now();
        info!(
            "Calling {} to {} {}: method={} correlation_id={}",
            service, description, url, method, correlation_id
        );

        let result = self
            .send(method.clone(), url, payload, correlation_id, trace)
            .await;
        let elapsed = start.elapsed().as_millis();
        info!("{} to {} ended - total time {}ms", method, url, elapsed);

        match &result {
            Ok(response) if method == Method::GET && response.status != StatusCode::OK => {
                warn!(
                    "Calling {} to GET something returned a non http 200 response: url={} status_code={} correlation_id={}",
                    service, url, response.status, correlation_id
                );
            }
            Ok(_) => {}
            Err(e) => {
                error!(
                    "Calling {} threw exception: method={} url={} correlation_id={} error={}",
                    service, method, url, correlation_id, e
                );
            }
        }

        result
    }

    async fn send(
        &self,
        method: Method,
        url: &Url,
        payload: Option<&Value>,
        correlation_id: &str,
        trace: &TraceContext,
    ) -> Result<ServiceResponse, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        match HeaderValue::from_str(correlation_id) {
            Ok(value) => {
                headers.insert(CORRELATION_ID_HEADER, value);
            }
            Err(_) => warn!(
                "Correlation id {:?} is not a valid header value; sending {} without it",
                correlation_id, url
            ),
        }
        if let Some(value) = host_header(url).and_then(|h| HeaderValue::from_str(&h).ok()) {
            headers.insert(header::HOST, value);
        }
        if let Some(value) = trace.header() {
            headers.insert(TRACE_HEADER, value.clone());
        }

        let mut req = self.client.request(method.clone(), url.clone());
        if let Some(payload) = payload {
            req = req.json(payload);
        }
        req = req.headers(headers);
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }

        let http_response = req.send().await.map_err(|e| TransportError::Request {
            method: method.clone(),
            url: url.clone(),
            source: e,
        })?;
        let status = http_response.status();
        let bytes = http_response
            .bytes()
            .await
            .map_err(|e| TransportError::ResponseBodyRead {
                method,
                url: url.clone(),
                source: e,
            })?;

        Ok(ServiceResponse {
            status,
            body: parse_body(&bytes),
        })
    }
}

/// Final destination as it must appear in the `Host` header, port included
/// only when it differs from the scheme default.
pub fn host_header(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

// Bodies are JSON whatever the declared content type says.
fn parse_body(bytes: &[u8]) -> Option<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    Some(
        serde_json::from_slice(bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned())),
    )
}
