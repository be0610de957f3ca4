//! Caller identity forwarded by the upstream gateway.
//!
//! Authentication happens before requests reach this service. The gateway
//! forwards the authenticated user's id in [`USER_ID_HEADER`]; handlers that
//! act on behalf of a user extract it as a [`CallerId`].

use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::{Ready, ready};

use crate::domain::{Error, UserId};

/// Header carrying the authenticated user id.
pub const USER_ID_HEADER: &str = "X-User-Id";

/// Authenticated caller of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerId(UserId);

impl CallerId {
    /// Borrow the caller's user id.
    pub fn user_id(&self) -> &UserId {
        &self.0
    }

    /// Consume the wrapper.
    pub fn into_inner(self) -> UserId {
        self.0
    }

    fn from_headers(req: &HttpRequest) -> Result<Self, Error> {
        let raw = req
            .headers()
            .get(USER_ID_HEADER)
            .ok_or_else(|| Error::unauthorized("login required"))?
            .to_str()
            .map_err(|_| Error::unauthorized("caller id header is not valid text"))?;
        UserId::new(raw.trim())
            .map(Self)
            .map_err(|_| Error::unauthorized("login required"))
    }
}

impl FromRequest for CallerId {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::from_headers(req))
    }
}
