use http::Method;
use serde_json::Value;
use url::Url;

use crate::error::ClientError;

/// A well-known operation on a backend service.
#[derive(Debug, Clone)]
pub struct Endpoint {
    pub method: Method,
    /// Path with `{name}` placeholders, e.g. `/v1/frontend/charges/{chargeId}/capture`.
    pub template: &'static str,
    /// Used in log lines.
    pub description: &'static str,
}

/// One outbound call, built fresh per invocation.
#[derive(Debug, Clone)]
pub struct EndpointRequest<'a> {
    pub endpoint: &'a Endpoint,
    pub path_params: &'a [(&'static str, &'a str)],
    pub payload: Option<&'a Value>,
    pub correlation_id: &'a str,
}

impl EndpointRequest<'_> {
    pub fn url(&self, base_url: &Url) -> Result<Url, ClientError> {
        resolve_url(base_url, self.endpoint.template, self.path_params)
    }
}

fn placeholder(segment: &str) -> Option<&str> {
    segment.strip_prefix('{')?.strip_suffix('}')
}

/// Appends `template` to `base_url`, replacing each `{name}` segment with its
/// parameter value. Values are percent-encoded as a single segment, so `/`, `?`
/// and `#` inside a value never reach the path structure. Empty, `.` and `..`
/// values are refused.
pub fn resolve_url(
    base_url: &Url,
    template: &'static str,
    params: &[(&'static str, &str)],
) -> Result<Url, ClientError> {
    let mut url = base_url.clone();
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| ClientError::CannotBeABase(base_url.clone()))?;
        segments.pop_if_empty();
        for segment in template.split('/').filter(|s| !s.is_empty()) {
            match placeholder(segment) {
                Some(name) => {
                    let value = params
                        .iter()
                        .find(|(key, _)| *key == name)
                        .map(|(_, value)| *value)
                        .ok_or_else(|| ClientError::MissingPathParam {
                            template,
                            name: name.to_string(),
                        })?;
                    // `push` drops dot segments instead of encoding them.
                    if matches!(value, "" | "." | "..") {
                        return Err(ClientError::InvalidPathParam {
                            template,
                            name: name.to_string(),
                            value: value.to_string(),
                        });
                    }
                    segments.push(value);
                }
                None => {
                    segments.push(segment);
                }
            }
        }
    }
    Ok(url)
}
