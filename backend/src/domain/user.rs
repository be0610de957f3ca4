//! Public profile of a poster, voter or commentator.

use serde::{Deserialize, Serialize};

use crate::domain::UserId;

/// Profile fields safe to embed in listing views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
    pub phone: Option<String>,
    pub zalo: Option<String>,
    pub avatar: Option<String>,
    pub role_code: Option<String>,
}
