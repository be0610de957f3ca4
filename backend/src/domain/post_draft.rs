//! Validated input for creating or editing a post.

use chrono::{DateTime, Utc};
use serde_json::Value;

/// Fields submitted by the post editor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostDraft {
    pub title: String,
    /// Label text; the label code is derived from it.
    pub label: String,
    pub category_code: String,
    /// Category display text stored on the overview as its type.
    pub category: Option<String>,
    /// Province name, optionally prefixed by `Thành phố ` or `Tỉnh `.
    pub province: String,
    pub address: Option<String>,
    /// Free-form description stored as JSON text.
    pub description: Option<Value>,
    pub area_code: Option<String>,
    pub price_code: Option<String>,
    /// Monthly price in millions.
    pub price_number: f64,
    /// Floor area in square metres.
    pub area_number: f64,
    pub images: Vec<String>,
    pub target: Option<String>,
    /// Explicit expiry; the configured lifetime applies when unset.
    pub expired: Option<DateTime<Utc>>,
}

/// Reasons a draft is rejected before anything is written.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PostDraftError {
    /// A required text field was blank.
    #[error("{field} must not be empty")]
    Blank {
        /// Offending field in wire spelling.
        field: &'static str,
    },
    /// A numeric field was negative or not a number.
    #[error("{field} must be a finite, non-negative number")]
    InvalidNumber {
        /// Offending field in wire spelling.
        field: &'static str,
    },
}

impl PostDraftError {
    /// Wire name of the rejected field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Blank { field } | Self::InvalidNumber { field } => field,
        }
    }
}

fn require_text(value: &str, field: &'static str) -> Result<(), PostDraftError> {
    if value.trim().is_empty() {
        return Err(PostDraftError::Blank { field });
    }
    Ok(())
}

fn require_amount(value: f64, field: &'static str) -> Result<(), PostDraftError> {
    if !value.is_finite() || value < 0.0 {
        return Err(PostDraftError::InvalidNumber { field });
    }
    Ok(())
}

impl PostDraft {
    /// Check the fields every write depends on.
    pub fn validate(&self) -> Result<(), PostDraftError> {
        require_text(&self.title, "title")?;
        require_text(&self.label, "label")?;
        require_text(&self.category_code, "categoryCode")?;
        require_text(&self.province, "province")?;
        require_amount(self.price_number, "priceNumber")?;
        require_amount(self.area_number, "areaNumber")?;
        Ok(())
    }

    /// Description as stored: the submitted JSON rendered to text.
    pub fn description_text(&self) -> Option<String> {
        self.description.as_ref().map(Value::to_string)
    }

    /// Blank optional text collapses to `None`.
    pub fn address_text(&self) -> Option<String> {
        non_blank(self.address.as_deref())
    }
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
pub(crate) fn sample_draft() -> PostDraft {
    PostDraft {
        title: "Phòng trọ gần Đại học Bách Khoa".to_owned(),
        label: "Cho thuê phòng trọ Hà Nội".to_owned(),
        category_code: "CTPT".to_owned(),
        category: Some("Phòng trọ".to_owned()),
        province: "Thành phố Hà Nội".to_owned(),
        address: Some("12 Tạ Quang Bửu".to_owned()),
        description: Some(serde_json::json!(["Thoáng mát", "Gần chợ"])),
        area_code: Some("2UMD".to_owned()),
        price_code: Some("2U3D".to_owned()),
        price_number: 2.5,
        area_number: 20.0,
        images: vec!["https://cdn.example/a.jpg".to_owned()],
        target: Some("Tất cả".to_owned()),
        expired: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn sample_draft_is_valid() {
        assert_eq!(sample_draft().validate(), Ok(()));
    }

    #[rstest]
    #[case::title(|d: &mut PostDraft| d.title = "  ".to_owned(), "title")]
    #[case::label(|d: &mut PostDraft| d.label.clear(), "label")]
    #[case::category(|d: &mut PostDraft| d.category_code.clear(), "categoryCode")]
    #[case::province(|d: &mut PostDraft| d.province.clear(), "province")]
    #[case::price(|d: &mut PostDraft| d.price_number = -1.0, "priceNumber")]
    #[case::area(|d: &mut PostDraft| d.area_number = f64::NAN, "areaNumber")]
    fn invalid_fields_are_named(#[case] mutate: fn(&mut PostDraft), #[case] field: &str) {
        let mut draft = sample_draft();
        mutate(&mut draft);
        let err = draft.validate().expect_err("draft must be rejected");
        assert_eq!(err.field(), field);
    }

    #[rstest]
    fn zero_price_is_accepted() {
        let draft = PostDraft {
            price_number: 0.0,
            ..sample_draft()
        };
        assert!(draft.validate().is_ok());
    }

    #[rstest]
    fn description_is_stored_as_json_text() {
        assert_eq!(
            sample_draft().description_text().as_deref(),
            Some("[\"Thoáng mát\",\"Gần chợ\"]")
        );
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some("   "), None)]
    #[case(Some(" 12 Lê Lợi "), Some("12 Lê Lợi"))]
    fn blank_optional_text_collapses(#[case] raw: Option<&str>, #[case] expected: Option<&str>) {
        assert_eq!(non_blank(raw).as_deref(), expected);
    }
}
