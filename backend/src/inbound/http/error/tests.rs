//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn internal_error() -> Error {
    Error::internal("relation store query failed: column missing")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"sql": "select 1"}))
}

async fn body_of(error: &Error) -> Value {
    let response = ResponseError::error_response(error);
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    serde_json::from_slice(&bytes).expect("error envelope is JSON")
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("who"), StatusCode::UNAUTHORIZED)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::already_exists("saved"), StatusCode::CONFLICT)]
#[case(Error::duplicate_key("dup"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

#[rstest]
#[case(Error::invalid_request("bad"), 1)]
#[case(Error::not_found("missing"), 1)]
#[case(Error::already_exists("saved"), 1)]
#[case(Error::unauthorized("who"), 1)]
#[case(Error::duplicate_key("dup"), -1)]
#[case(Error::service_unavailable("down"), -1)]
#[actix_web::test]
async fn envelope_flags_business_rule_failures(#[case] err: Error, #[case] flag: i64) {
    let body = body_of(&err).await;
    assert_eq!(body["err"], flag);
    assert_eq!(body["msg"], err.message());
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted(internal_error: Error) {
    let response = ResponseError::error_response(&internal_error);
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    assert_eq!(header.as_deref(), Some(TRACE_ID));

    let body = body_of(&internal_error).await;
    assert_eq!(body["err"], -1);
    assert_eq!(body["msg"], "Internal server error");
    assert_eq!(body["code"], "internal_error");
    assert_eq!(body["traceId"], TRACE_ID);
    assert!(body.get("details").is_none());
}

#[rstest]
#[actix_web::test]
async fn business_errors_keep_details() {
    let err = Error::invalid_request("title must not be empty")
        .with_details(json!({"field": "title"}));
    let body = body_of(&err).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["field"], "title");
}

#[actix_web::test]
async fn malformed_json_uses_error_envelope() {
    use actix_web::{App, post, test as actix_test};

    #[post("/echo")]
    async fn echo(body: web::Json<Value>) -> web::Json<Value> {
        body
    }

    let app = actix_test::init_service(App::new().app_data(json_config()).service(echo)).await;
    let request = actix_test::TestRequest::post()
        .uri("/echo")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["err"], json!(1));
    assert_eq!(body["code"], json!("invalid_request"));
}
