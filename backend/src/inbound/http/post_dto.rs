//! Request DTOs for the post endpoints and their translation into domain
//! requests.
//!
//! Query strings arrive as loose text: unknown keys are ignored, numeric
//! ranges use `min,max`, and out-of-range page numbers clamp to the first
//! page. Anything unparseable is rejected with the offending field named in
//! the error details.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::{Value, json};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{ExpiredPostsRequest, ListPostsRequest};
use crate::domain::{
    Error, NumericRange, PostDraft, PostFilter, PostId, PostSort, PostStatus, UserId,
};

fn invalid_field(field: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({ "field": field }))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

/// Accept `2.5` and `"2.5"` alike; form posts send numbers as text.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumberOrText>::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(NumberOrText::Number(value)) => Ok(Some(value)),
        Some(NumberOrText::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(NumberOrText::Text(text)) => text
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Post editor payload shared by create and update.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostBody {
    pub title: Option<String>,
    /// Label text, e.g. `Cho thuê phòng trọ Hà Nội`.
    pub label: Option<String>,
    pub category_code: Option<String>,
    /// Category display text.
    pub category: Option<String>,
    /// Province name, with or without its `Thành phố `/`Tỉnh ` prefix.
    pub province: Option<String>,
    pub address: Option<String>,
    #[schema(value_type = Object)]
    pub description: Option<Value>,
    pub area_code: Option<String>,
    pub price_code: Option<String>,
    /// Monthly price in millions.
    #[serde(default, deserialize_with = "lenient_number")]
    #[schema(value_type = Option<f64>)]
    pub price_number: Option<f64>,
    /// Floor area in square metres.
    #[serde(default, deserialize_with = "lenient_number")]
    #[schema(value_type = Option<f64>)]
    pub area_number: Option<f64>,
    #[serde(default)]
    pub images: Vec<String>,
    pub target: Option<String>,
    #[schema(value_type = Option<String>, format = DateTime)]
    pub expired: Option<DateTime<Utc>>,
}

impl PostBody {
    /// Convert into a draft. Content rules are checked by the service.
    pub fn into_draft(self) -> Result<PostDraft, Error> {
        let price_number = self
            .price_number
            .ok_or_else(|| invalid_field("priceNumber", "priceNumber is required"))?;
        let area_number = self
            .area_number
            .ok_or_else(|| invalid_field("areaNumber", "areaNumber is required"))?;
        Ok(PostDraft {
            title: self.title.unwrap_or_default(),
            label: self.label.unwrap_or_default(),
            category_code: self.category_code.unwrap_or_default(),
            category: self.category,
            province: self.province.unwrap_or_default(),
            address: self.address,
            description: self.description,
            area_code: self.area_code,
            price_code: self.price_code,
            price_number,
            area_number,
            images: self.images,
            target: self.target,
            expired: self.expired,
        })
    }
}

/// Update payload: the post id plus the editor fields.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostBody {
    pub post_id: String,
    #[serde(flatten)]
    pub fields: PostBody,
}

/// Abuse report payload.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportBody {
    #[serde(default)]
    pub title: String,
    pub reason: String,
}

/// Parse a path or body post id.
pub fn parse_post_id(raw: &str, field: &str) -> Result<PostId, Error> {
    PostId::new(raw.trim()).map_err(|err| invalid_field(field, err.to_string()))
}

/// Query parameters accepted by `GET /api/v1/posts/limit`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct ListPostsQuery {
    /// 1-based page number; values below 1 select the first page.
    pub page: Option<String>,
    /// Page size; the configured default applies when unset or zero.
    pub limit_post: Option<String>,
    /// `createdAt`, `priceNumber` or `areaNumber`, optionally `:asc`/`:desc`.
    pub order: Option<String>,
    pub label_code: Option<String>,
    pub category_code: Option<String>,
    pub province_code: Option<String>,
    pub area_code: Option<String>,
    pub price_code: Option<String>,
    pub user_id: Option<String>,
    /// `active` or `archived`.
    pub status: Option<String>,
    /// Inclusive `min,max` price range in millions.
    pub price_number: Option<String>,
    /// Inclusive `min,max` area range in square metres.
    pub area_number: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

fn parse_page(raw: Option<String>) -> Result<Option<u32>, Error> {
    let Some(text) = present(raw) else {
        return Ok(None);
    };
    let page: i64 = text
        .parse()
        .map_err(|_| invalid_field("page", format!("page must be an integer, got `{text}`")))?;
    Ok(Some(u32::try_from(page.max(1)).unwrap_or(u32::MAX)))
}

fn parse_limit(raw: Option<String>) -> Result<Option<u32>, Error> {
    let Some(text) = present(raw) else {
        return Ok(None);
    };
    text.parse::<u32>().map(Some).map_err(|_| {
        invalid_field(
            "limitPost",
            format!("limitPost must be a non-negative integer, got `{text}`"),
        )
    })
}

fn parse_range(raw: Option<String>, field: &str) -> Result<Option<NumericRange>, Error> {
    let Some(text) = present(raw) else {
        return Ok(None);
    };
    let malformed = || invalid_field(field, format!("{field} must look like `min,max`"));
    let (min, max) = text.split_once(',').ok_or_else(malformed)?;
    let min: f64 = min.trim().parse().map_err(|_| malformed())?;
    let max: f64 = max.trim().parse().map_err(|_| malformed())?;
    NumericRange::new(min, max)
        .map(Some)
        .map_err(|err| invalid_field(field, err.to_string()))
}

impl ListPostsQuery {
    /// Validate and convert into a listing request.
    pub fn into_request(self) -> Result<ListPostsRequest, Error> {
        let sort = present(self.order)
            .map(|text| text.parse::<PostSort>())
            .transpose()
            .map_err(|err| invalid_field("order", err.to_string()))?;
        let status = present(self.status)
            .map(|text| text.parse::<PostStatus>())
            .transpose()
            .map_err(|err| invalid_field("status", err.to_string()))?;
        let user_id = present(self.user_id)
            .map(UserId::new)
            .transpose()
            .map_err(|err| invalid_field("userId", err.to_string()))?;

        Ok(ListPostsRequest {
            filter: PostFilter {
                label_code: present(self.label_code),
                category_code: present(self.category_code),
                province_code: present(self.province_code),
                area_code: present(self.area_code),
                price_code: present(self.price_code),
                user_id,
                status,
                price_number: parse_range(self.price_number, "priceNumber")?,
                area_number: parse_range(self.area_number, "areaNumber")?,
            },
            page: parse_page(self.page)?,
            limit: parse_limit(self.limit_post)?,
            sort,
        })
    }
}

/// Query parameters accepted by `GET /api/v1/posts/expired`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct ExpiredPostsQuery {
    /// Skip archived posts, as the notification sweep does.
    #[serde(default)]
    pub exclude_archived: bool,
}

impl From<ExpiredPostsQuery> for ExpiredPostsRequest {
    fn from(query: ExpiredPostsQuery) -> Self {
        Self {
            as_of: None,
            exclude_archived: query.exclude_archived,
        }
    }
}
