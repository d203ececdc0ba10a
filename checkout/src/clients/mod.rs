use serde_json::Value;
use url::Url;

mod cardid;
mod connector;
mod endpoint;

pub use cardid::CardIdClient;
pub use connector::ConnectorClient;
pub use endpoint::{Endpoint, EndpointRequest, resolve_url};

use crate::{
    error::ClientError,
    transport::{ServiceResponse, TraceContext, Transport},
};

/// Base URL and correlation id bound to one backend for the lifetime of the instance.
#[derive(Clone, Debug)]
struct ServiceClient {
    service: &'static str,
    base_url: Url,
    correlation_id: String,
    transport: Transport,
}

impl ServiceClient {
    fn new(
        service: &'static str,
        base_url: Url,
        correlation_id: impl Into<String>,
        transport: Transport,
    ) -> Self {
        Self {
            service,
            base_url,
            correlation_id: correlation_id.into(),
            transport,
        }
    }

    /// Resolves the endpoint URL and sends the request, returning the response untouched.
    async fn call(
        &self,
        endpoint: &Endpoint,
        path_params: &[(&'static str, &str)],
        payload: Option<&Value>,
        trace: &TraceContext,
    ) -> Result<ServiceResponse, ClientError> {
        let request = EndpointRequest {
            endpoint,
            path_params,
            payload,
            correlation_id: &self.correlation_id,
        };
        let url = request.url(&self.base_url)?;
        let response = self
            .transport
            .execute(
                self.service,
                endpoint.method.clone(),
                &url,
                request.payload,
                endpoint.description,
                request.correlation_id,
                trace,
            )
            .await?;
        Ok(response)
    }
}
