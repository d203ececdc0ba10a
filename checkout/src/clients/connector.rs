use http::Method;
use serde_json::Value;
use url::Url;

use super::{Endpoint, ServiceClient};
use crate::{
    error::ClientError,
    transport::{ServiceResponse, TraceContext, Transport},
};

const SERVICE_NAME: &str = "connector";

static CARD_AUTH: Endpoint = Endpoint {
    method: Method::POST,
    template: "/v1/frontend/charges/{chargeId}/cards",
    description: "create charge",
};
static WALLET_AUTH: Endpoint = Endpoint {
    method: Method::POST,
    template: "/v1/frontend/charges/{chargeId}/wallets/{provider}",
    description: "create charge using e-wallet payment",
};
static CARD_3DS: Endpoint = Endpoint {
    method: Method::POST,
    template: "/v1/frontend/charges/{chargeId}/3ds",
    description: "3ds",
};
static CARD_STATUS: Endpoint = Endpoint {
    method: Method::PUT,
    template: "/v1/frontend/charges/{chargeId}/status",
    description: "update status",
};
static CARD_CAPTURE: Endpoint = Endpoint {
    method: Method::POST,
    template: "/v1/frontend/charges/{chargeId}/capture",
    description: "do capture",
};
static CARD_CANCEL: Endpoint = Endpoint {
    method: Method::POST,
    template: "/v1/frontend/charges/{chargeId}/cancel",
    description: "cancel charge",
};
static FIND_CHARGE: Endpoint = Endpoint {
    method: Method::GET,
    template: "/v1/frontend/charges/{chargeId}",
    description: "find charge",
};
static PATCH_CHARGE: Endpoint = Endpoint {
    method: Method::PATCH,
    template: "/v1/frontend/charges/{chargeId}",
    description: "patch",
};
static FIND_BY_TOKEN: Endpoint = Endpoint {
    method: Method::GET,
    template: "/v1/frontend/tokens/{chargeTokenId}",
    description: "find by token",
};
static TOKEN_USED: Endpoint = Endpoint {
    method: Method::POST,
    template: "/v1/frontend/tokens/{chargeTokenId}/used",
    description: "mark token as used",
};
static WORLDPAY_3DS_FLEX_DDC: Endpoint = Endpoint {
    method: Method::GET,
    template: "/v1/frontend/charges/{chargeId}/worldpay/3ds-flex/ddc",
    description: "get Worldpay 3DS Flex DDC JWT",
};

/// Client for the connector's frontend charge API.
///
/// Every call returns the connector's response as-is; deciding what a status
/// means is left to the caller. Transport failures are returned as errors since
/// none of these operations may be treated as having succeeded without an answer.
#[derive(Clone, Debug)]
pub struct ConnectorClient {
    inner: ServiceClient,
}

impl ConnectorClient {
    pub fn new(base_url: Url, correlation_id: impl Into<String>, transport: Transport) -> Self {
        Self {
            inner: ServiceClient::new(SERVICE_NAME, base_url, correlation_id, transport),
        }
    }

    pub fn correlation_id(&self) -> &str {
        &self.inner.correlation_id
    }

    /// `POST /charges/{chargeId}/cards`
    pub async fn charge_auth(
        &self,
        charge_id: &str,
        payload: &Value,
        trace: &TraceContext,
    ) -> Result<ServiceResponse, ClientError> {
        self.inner
            .call(&CARD_AUTH, &[("chargeId", charge_id)], Some(payload), trace)
            .await
    }

    /// `POST /charges/{chargeId}/wallets/{provider}`
    pub async fn charge_auth_with_wallet(
        &self,
        charge_id: &str,
        provider: &str,
        payload: &Value,
        trace: &TraceContext,
    ) -> Result<ServiceResponse, ClientError> {
        self.inner
            .call(
                &WALLET_AUTH,
                &[("chargeId", charge_id), ("provider", provider)],
                Some(payload),
                trace,
            )
            .await
    }

    /// `POST /charges/{chargeId}/3ds`
    pub async fn three_ds(
        &self,
        charge_id: &str,
        payload: &Value,
        trace: &TraceContext,
    ) -> Result<ServiceResponse, ClientError> {
        self.inner
            .call(&CARD_3DS, &[("chargeId", charge_id)], Some(payload), trace)
            .await
    }

    /// `PUT /charges/{chargeId}/status`
    pub async fn update_status(
        &self,
        charge_id: &str,
        payload: &Value,
        trace: &TraceContext,
    ) -> Result<ServiceResponse, ClientError> {
        self.inner
            .call(&CARD_STATUS, &[("chargeId", charge_id)], Some(payload), trace)
            .await
    }

    /// `POST /charges/{chargeId}/capture`
    pub async fn capture(
        &self,
        charge_id: &str,
        trace: &TraceContext,
    ) -> Result<ServiceResponse, ClientError> {
        self.inner
            .call(&CARD_CAPTURE, &[("chargeId", charge_id)], None, trace)
            .await
    }

    /// `POST /charges/{chargeId}/cancel`
    pub async fn cancel(
        &self,
        charge_id: &str,
        trace: &TraceContext,
    ) -> Result<ServiceResponse, ClientError> {
        self.inner
            .call(&CARD_CANCEL, &[("chargeId", charge_id)], None, trace)
            .await
    }

    /// `GET /charges/{chargeId}`
    pub async fn find_charge(
        &self,
        charge_id: &str,
        trace: &TraceContext,
    ) -> Result<ServiceResponse, ClientError> {
        self.inner
            .call(&FIND_CHARGE, &[("chargeId", charge_id)], None, trace)
            .await
    }

    /// `PATCH /charges/{chargeId}`
    pub async fn patch(
        &self,
        charge_id: &str,
        payload: &Value,
        trace: &TraceContext,
    ) -> Result<ServiceResponse, ClientError> {
        self.inner
            .call(&PATCH_CHARGE, &[("chargeId", charge_id)], Some(payload), trace)
            .await
    }

    /// `GET /tokens/{chargeTokenId}`
    pub async fn find_by_token(
        &self,
        token_id: &str,
        trace: &TraceContext,
    ) -> Result<ServiceResponse, ClientError> {
        self.inner
            .call(&FIND_BY_TOKEN, &[("chargeTokenId", token_id)], None, trace)
            .await
    }

    /// `POST /tokens/{chargeTokenId}/used`. Not de-duplicated: each call is a new POST.
    pub async fn mark_token_used(
        &self,
        token_id: &str,
        trace: &TraceContext,
    ) -> Result<ServiceResponse, ClientError> {
        self.inner
            .call(&TOKEN_USED, &[("chargeTokenId", token_id)], None, trace)
            .await
    }

    /// `GET /charges/{chargeId}/worldpay/3ds-flex/ddc`
    pub async fn get_worldpay_3ds_flex_jwt(
        &self,
        charge_id: &str,
        trace: &TraceContext,
    ) -> Result<ServiceResponse, ClientError> {
        self.inner
            .call(&WORLDPAY_3DS_FLEX_DDC, &[("chargeId", charge_id)], None, trace)
            .await
    }
}
