use http::Method;
use serde_json::json;
use url::Url;

use super::{Endpoint, ServiceClient};
use crate::{
    error::ClientError,
    transport::{ServiceResponse, TraceContext, Transport},
};

const SERVICE_NAME: &str = "cardid";

static CARD_LOOKUP: Endpoint = Endpoint {
    method: Method::POST,
    template: "/v1/api/card",
    description: "check card",
};

/// Client for the card-identification service.
#[derive(Clone, Debug)]
pub struct CardIdClient {
    inner: ServiceClient,
}

impl CardIdClient {
    pub fn new(base_url: Url, correlation_id: impl Into<String>, transport: Transport) -> Self {
        Self {
            inner: ServiceClient::new(SERVICE_NAME, base_url, correlation_id, transport),
        }
    }

    /// `POST /v1/api/card` with `{"cardNumber": ...}`.
    pub async fn lookup_card(
        &self,
        card_number: &str,
        trace: &TraceContext,
    ) -> Result<ServiceResponse, ClientError> {
        let payload = json!({ "cardNumber": card_number });
        self.inner
            .call(&CARD_LOOKUP, &[], Some(&payload), trace)
            .await
    }
}
