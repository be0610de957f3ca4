//! Satellite rows owned one-to-one by a post.
//!
//! Each satellite shares its id with the matching `*_id` column on the post
//! and is written in the same transaction as the post.

use serde::{Deserialize, Serialize};

/// Display attributes shown on listing cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    pub id: String,
    pub price: String,
    pub acreage: String,
    /// Publication date formatted `DD/MM/YYYY`.
    pub published: String,
    /// `#NNNNNN` tag shared with the overview code.
    pub hashtag: String,
}

/// Ordered list of media URLs.
///
/// Stored as JSON text; exposed as `image`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSet {
    pub id: String,
    #[serde(rename = "image")]
    pub urls: Vec<String>,
}

/// Detail panel shown on the post page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub id: String,
    pub code: String,
    pub area: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub target: Option<String>,
    pub bonus: String,
    pub created: String,
    pub expired: String,
}

/// Bonus tier given to every new post.
pub const STANDARD_BONUS: &str = "Tin thường";

/// Display price for a monthly rent expressed in millions.
///
/// Values below one million are shown in đồng, the rest in millions.
///
/// # Examples
/// ```
/// use phongtro::domain::format_price;
///
/// assert_eq!(format_price(0.5), "500000 đồng/tháng");
/// assert_eq!(format_price(5.0), "5 triệu/tháng");
/// assert_eq!(format_price(2.5), "2.5 triệu/tháng");
/// ```
#[must_use]
pub fn format_price(millions: f64) -> String {
    if millions < 1.0 {
        format!("{} đồng/tháng", (millions * 1_000_000.0).round())
    } else {
        format!("{millions} triệu/tháng")
    }
}

/// Display acreage for an area in square metres.
#[must_use]
pub fn format_acreage(square_metres: f64) -> String {
    format!("{square_metres} m2")
}
