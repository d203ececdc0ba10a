//! Connector endpoints, methods and headers against a mock connector.

use checkout::{
    ClientError, TraceContext, Transport, TransportError, clients::ConnectorClient,
};
use http::StatusCode;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CORRELATION_ID: &str = "corr-7";

fn connector_for(server: &MockServer) -> ConnectorClient {
    ConnectorClient::new(
        server.uri().parse().unwrap(),
        CORRELATION_ID,
        Transport::try_new(None).unwrap(),
    )
}

async fn expect_call(server: &MockServer, verb: &str, route: &str, status: u16) {
    Mock::given(method(verb))
        .and(path(route))
        .and(header("x-request-id", CORRELATION_ID))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_charge_auth_posts_card_payload() {
    let server = MockServer::start().await;
    let payload = json!({"card_number": "4242424242424242", "cvc": "123"});
    Mock::given(method("POST"))
        .and(path("/v1/frontend/charges/ch_1/cards"))
        .and(header("x-request-id", CORRELATION_ID))
        .and(body_json(&payload))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "AUTHORISATION SUCCESS"})))
        .expect(1)
        .mount(&server)
        .await;

    let response = connector_for(&server)
        .charge_auth("ch_1", &payload, &TraceContext::none())
        .await
        .unwrap();

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, Some(json!({"status": "AUTHORISATION SUCCESS"})));
}

#[tokio::test]
async fn test_wallet_auth_substitutes_provider() {
    let server = MockServer::start().await;
    expect_call(&server, "POST", "/v1/frontend/charges/ch_1/wallets/google", 200).await;

    connector_for(&server)
        .charge_auth_with_wallet("ch_1", "google", &json!({}), &TraceContext::none())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_three_ds_and_status_update() {
    let server = MockServer::start().await;
    expect_call(&server, "POST", "/v1/frontend/charges/ch_1/3ds", 200).await;
    expect_call(&server, "PUT", "/v1/frontend/charges/ch_1/status", 204).await;

    let connector = connector_for(&server);
    let trace = TraceContext::none();
    connector
        .three_ds("ch_1", &json!({"pa_response": "abc"}), &trace)
        .await
        .unwrap();
    let response = connector
        .update_status("ch_1", &json!({"new_status": "ENTERING CARD DETAILS"}), &trace)
        .await
        .unwrap();
    assert_eq!(response.status_code(), 204);
}

#[tokio::test]
async fn test_capture_and_cancel_send_no_body() {
    let server = MockServer::start().await;
    expect_call(&server, "POST", "/v1/frontend/charges/ch_1/capture", 204).await;
    expect_call(&server, "POST", "/v1/frontend/charges/ch_1/cancel", 204).await;

    let connector = connector_for(&server);
    let trace = TraceContext::none();
    connector.capture("ch_1", &trace).await.unwrap();
    connector.cancel("ch_1", &trace).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(requests.iter().all(|request| request.body.is_empty()));
}

#[tokio::test]
async fn test_find_and_patch_charge() {
    let server = MockServer::start().await;
    expect_call(&server, "GET", "/v1/frontend/charges/ch_1", 200).await;
    expect_call(&server, "PATCH", "/v1/frontend/charges/ch_1", 200).await;

    let connector = connector_for(&server);
    let trace = TraceContext::none();
    let found = connector.find_charge("ch_1", &trace).await.unwrap();
    assert_eq!(found.body, Some(json!({"ok": true})));
    connector
        .patch(
            "ch_1",
            &json!({"op": "replace", "path": "email", "value": "a@b.test"}),
            &trace,
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_token_endpoints() {
    let server = MockServer::start().await;
    expect_call(&server, "GET", "/v1/frontend/tokens/tok_9", 200).await;
    expect_call(&server, "GET", "/v1/frontend/charges/ch_1/worldpay/3ds-flex/ddc", 200).await;

    let connector = connector_for(&server);
    let trace = TraceContext::none();
    connector.find_by_token("tok_9", &trace).await.unwrap();
    connector
        .get_worldpay_3ds_flex_jwt("ch_1", &trace)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_mark_token_used_twice_posts_twice() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/frontend/tokens/tok_9/used"))
        .respond_with(ResponseTemplate::new(204))
        .expect(2)
        .mount(&server)
        .await;

    let connector = connector_for(&server);
    let trace = TraceContext::none();
    connector.mark_token_used("tok_9", &trace).await.unwrap();
    connector.mark_token_used("tok_9", &trace).await.unwrap();
}

#[tokio::test]
async fn test_error_statuses_are_returned_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "not found"})))
        .mount(&server)
        .await;

    let response = connector_for(&server)
        .find_charge("missing", &TraceContext::none())
        .await
        .unwrap();

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body, Some(json!({"message": "not found"})));
}

#[tokio::test]
async fn test_unreachable_connector_surfaces_error() {
    let connector = ConnectorClient::new(
        "http://127.0.0.1:1".parse().unwrap(),
        CORRELATION_ID,
        Transport::try_new(None).unwrap(),
    );
    assert_eq!(connector.correlation_id(), CORRELATION_ID);

    let err = connector
        .capture("ch_1", &TraceContext::none())
        .await
        .unwrap_err();

    match err {
        ClientError::Transport(TransportError::Request { method, url, .. }) => {
            assert_eq!(method, http::Method::POST);
            assert_eq!(url.path(), "/v1/frontend/charges/ch_1/capture");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_charge_id_cannot_escape_its_segment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/frontend/charges/..%2Ftokens%2Fx"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    connector_for(&server)
        .find_charge("../tokens/x", &TraceContext::none())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_dot_charge_id_is_refused_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let connector = connector_for(&server);
    for charge_id in ["..", ".", ""] {
        let err = connector
            .capture(charge_id, &TraceContext::none())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidPathParam { .. }));
    }
}
