//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into the listing API's `{err, msg}`
//! envelope with a matching status code.
//!
//! `err` is `1` for business-rule failures the caller can fix and `-1` for
//! store or server faults.

use actix_web::{HttpResponse, ResponseError, http::StatusCode, web};
use serde::Serialize;
use serde_json::Value;
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Envelope flag for failures the caller caused.
pub const ERR_BUSINESS_RULE: i8 = 1;
/// Envelope flag for failures on the server side.
pub const ERR_INTERNAL: i8 = -1;

/// JSON body written for every failed request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ErrorEnvelope {
    pub err: i8,
    pub msg: String,
    pub code: ErrorCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::AlreadyExists | ErrorCode::DuplicateKey => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn envelope_for(error: &Error) -> ErrorEnvelope {
    let trace_id = error.trace_id().map(str::to_owned);
    if matches!(error.code(), ErrorCode::InternalError) {
        return ErrorEnvelope {
            err: ERR_INTERNAL,
            msg: "Internal server error".to_owned(),
            code: ErrorCode::InternalError,
            trace_id,
            details: None,
        };
    }

    let err = if error.code().is_business_rule() {
        ERR_BUSINESS_RULE
    } else {
        ERR_INTERNAL
    };
    ErrorEnvelope {
        err,
        msg: error.message().to_owned(),
        code: error.code(),
        trace_id,
        details: error.details().cloned(),
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(envelope_for(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

/// Body extractor settings that report malformed JSON in the error envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("invalid JSON body: {err}")).into()
    })
}

/// Query extractor settings that report malformed query strings in the
/// error envelope.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("invalid query string: {err}")).into()
    })
}

#[cfg(test)]
mod tests;
