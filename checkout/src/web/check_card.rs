use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use checkout::{
    AcceptanceOutcome, CardChecker, ClientError, TraceContext,
    clients::{CardIdClient, ConnectorClient},
    transport::{CORRELATION_ID_HEADER, TRACE_HEADER},
};
use log::{error, info, warn};
use uuid::Uuid;

use super::{
    model::{ChargeResponse, CheckCardRequest, CheckCardResponse, LocaleQuery},
    router::AppState,
};

fn correlation_id(headers: &HeaderMap) -> String {
    headers
        .get(CORRELATION_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

pub async fn handle_check_card(
    State(state): State<AppState>,
    Path(charge_id): Path<String>,
    Query(query): Query<LocaleQuery>,
    headers: HeaderMap,
    Json(body): Json<CheckCardRequest>,
) -> Response {
    let correlation_id = correlation_id(&headers);
    let trace = headers
        .get(TRACE_HEADER)
        .cloned()
        .map(TraceContext::new)
        .unwrap_or_default();
    let locale = query.lang.as_deref().unwrap_or("en");

    let connector = ConnectorClient::new(
        state.config.services.connector_host.clone(),
        correlation_id.clone(),
        state.transport.clone(),
    );
    let charge = match connector.find_charge(&charge_id, &trace).await {
        Ok(response) if response.status == StatusCode::OK => response.body,
        Ok(response) => {
            warn!(
                "Charge {} lookup returned status {}",
                charge_id, response.status
            );
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to load charge").into_response();
        }
        Err(e @ ClientError::InvalidPathParam { .. }) => {
            warn!("Rejecting check for charge {:?}: {}", charge_id, e);
            return (StatusCode::BAD_REQUEST, "Invalid charge id").into_response();
        }
        Err(e) => {
            error!("Failed to load charge {}: {}", charge_id, e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to load charge").into_response();
        }
    };
    let charge: ChargeResponse = match charge.map(serde_json::from_value::<ChargeResponse>).transpose() {
        Ok(Some(charge)) => charge,
        Ok(None) => {
            error!("Charge {} lookup returned an empty body", charge_id);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to load charge").into_response();
        }
        Err(e) => {
            error!("Failed to parse charge {}: {}", charge_id, e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to load charge").into_response();
        }
    };
    let allowed = charge.gateway_account.allowed_cards();

    let checker = CardChecker::new(
        CardIdClient::new(
            state.config.services.cardid_host.clone(),
            correlation_id,
            state.transport.clone(),
        ),
        state.catalog.clone(),
    );
    let response = match checker
        .check_card(&body.card_no, &allowed, locale, &trace)
        .await
    {
        AcceptanceOutcome::Accepted(card) => {
            info!(
                "Card accepted for charge {}: brand={} type={:?}",
                charge_id, card.brand, card.card_type
            );
            CheckCardResponse {
                accepted: true,
                card: Some(card),
                message: None,
            }
        }
        AcceptanceOutcome::Indeterminate => CheckCardResponse {
            accepted: true,
            card: None,
            message: None,
        },
        AcceptanceOutcome::Rejected(rejection) => {
            info!(
                "Card rejected for charge {}: reason={:?}",
                charge_id, rejection.reason
            );
            CheckCardResponse {
                accepted: false,
                card: None,
                message: Some(rejection.message),
            }
        }
    };

    (StatusCode::OK, Json(response)).into_response()
}
