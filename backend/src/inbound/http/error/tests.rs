//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use actix_web::{App, test as actix_test, web};
use rstest::{fixture, rstest};
use serde::Deserialize;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn internal_error_case() -> Error {
    Error::internal("connection string leaked")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"secret": "x"}))
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("no auth"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("denied"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("bill not found"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("book already exists"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("pool"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

async fn response_payload(error: &Error) -> (StatusCode, Option<String>, Error) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("trace id is ASCII").to_owned());
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let payload = serde_json::from_slice(&bytes).expect("Error JSON deserialisation succeeds");
    (status, header, payload)
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted_but_keep_trace_id(internal_error_case: Error) {
    let (status, header, payload) = response_payload(&internal_error_case).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(payload.code(), ErrorCode::InternalError);
    assert_eq!(payload.message(), "Internal server error");
    assert!(payload.details().is_none());
}

#[actix_web::test]
async fn client_errors_keep_message_and_details() {
    let error = Error::conflict("reading list already exists")
        .with_details(json!({"field": "name"}));
    let (status, header, payload) = response_payload(&error).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(header, None);
    assert_eq!(payload.message(), "reading list already exists");
    assert_eq!(payload.details(), Some(&json!({"field": "name"})));
}

#[test]
fn from_actix_error_is_redacted_internal_error() {
    let err: Error = actix_web::error::ErrorBadRequest("boom").into();
    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Internal server error");
    assert_eq!(err.details(), None);
}

#[derive(Deserialize)]
struct Body {
    #[expect(dead_code, reason = "only deserialised")]
    name: String,
}

#[derive(Deserialize)]
struct Params {
    #[expect(dead_code, reason = "only deserialised")]
    days: i64,
}

#[actix_web::test]
async fn malformed_bodies_and_queries_use_the_error_envelope() {
    let app = actix_test::init_service(
        App::new()
            .app_data(json_config())
            .app_data(query_config())
            .route("/body", web::post().to(|_: web::Json<Body>| async { "ok" }))
            .route("/query", web::get().to(|_: web::Query<Params>| async { "ok" })),
    )
    .await;

    let body_res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/body")
            .set_json(json!({"title": "wrong field"}))
            .to_request(),
    )
    .await;
    assert_eq!(body_res.status(), StatusCode::BAD_REQUEST);
    let payload: serde_json::Value = actix_test::read_body_json(body_res).await;
    assert_eq!(payload["code"], "invalid_request");
    assert_eq!(payload["details"]["code"], "invalid_json");

    let query_res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/query?days=soon").to_request(),
    )
    .await;
    assert_eq!(query_res.status(), StatusCode::BAD_REQUEST);
    let payload: serde_json::Value = actix_test::read_body_json(query_res).await;
    assert_eq!(payload["details"]["code"], "invalid_query");
}
