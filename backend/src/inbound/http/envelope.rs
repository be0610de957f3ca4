//! Success envelope shared by the listing endpoints.

use serde::Serialize;

/// `{err: 0, msg, response?}` body returned by successful calls.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub err: i8,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<T>,
}

impl<T> Envelope<T> {
    /// Success carrying a payload.
    pub fn ok(msg: impl Into<String>, response: T) -> Self {
        Self {
            err: 0,
            msg: msg.into(),
            response: Some(response),
        }
    }
}

impl Envelope<()> {
    /// Success with only a message.
    pub fn message(msg: impl Into<String>) -> Self {
        Self {
            err: 0,
            msg: msg.into(),
            response: None,
        }
    }
}
