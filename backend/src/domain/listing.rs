//! Listing filters and ordering.
//!
//! Only the fixed access patterns of the listing page are supported:
//! equality on codes, owner and status, and inclusive ranges on price and
//! area. Adapters translate [`PostFilter`] into their own query language;
//! [`PostFilter::matches`] is the reference semantics they must agree with.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{Post, PostStatus, UserId};

/// Validation errors for [`NumericRange`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NumericRangeError {
    /// A bound was NaN or infinite.
    #[error("range bounds must be finite numbers")]
    NotFinite,
    /// The lower bound exceeded the upper bound.
    #[error("range minimum {min} exceeds maximum {max}")]
    Inverted {
        /// Supplied lower bound.
        min: f64,
        /// Supplied upper bound.
        max: f64,
    },
}

/// Inclusive `[min, max]` bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    min: f64,
    max: f64,
}

impl NumericRange {
    /// Validate and build a range.
    pub fn new(min: f64, max: f64) -> Result<Self, NumericRangeError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(NumericRangeError::NotFinite);
        }
        if min > max {
            return Err(NumericRangeError::Inverted { min, max });
        }
        Ok(Self { min, max })
    }

    /// Lower bound.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Whether `value` lies within the bounds, both ends included.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Recognised listing filter keys. Unset keys match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostFilter {
    pub label_code: Option<String>,
    pub category_code: Option<String>,
    pub province_code: Option<String>,
    pub area_code: Option<String>,
    pub price_code: Option<String>,
    pub user_id: Option<UserId>,
    pub status: Option<PostStatus>,
    pub price_number: Option<NumericRange>,
    pub area_number: Option<NumericRange>,
}

fn matches_eq(expected: Option<&str>, actual: Option<&str>) -> bool {
    expected.is_none_or(|wanted| actual == Some(wanted))
}

impl PostFilter {
    /// Whether `post` satisfies every set key.
    pub fn matches(&self, post: &Post) -> bool {
        matches_eq(self.label_code.as_deref(), Some(post.label_code.as_str()))
            && matches_eq(
                self.category_code.as_deref(),
                Some(post.category_code.as_str()),
            )
            && matches_eq(self.province_code.as_deref(), post.province_code.as_deref())
            && matches_eq(self.area_code.as_deref(), post.area_code.as_deref())
            && matches_eq(self.price_code.as_deref(), post.price_code.as_deref())
            && self.user_id.as_ref().is_none_or(|uid| *uid == post.user_id)
            && self.status.is_none_or(|status| status == post.status)
            && self
                .price_number
                .is_none_or(|range| range.contains(post.price_number))
            && self
                .area_number
                .is_none_or(|range| range.contains(post.area_number))
    }
}

/// Sortable post columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    CreatedAt,
    PriceNumber,
    AreaNumber,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Requested ordering. Ties on the key break by post id ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostSort {
    pub key: SortKey,
    pub direction: SortDirection,
}

/// Error returned for unrecognised `order` parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported sort order: {0}")]
pub struct ParsePostSortError(pub String);

impl FromStr for PostSort {
    type Err = ParsePostSortError;

    /// Parse `key` or `key:asc|desc`. A bare key sorts descending.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, direction) = s.split_once(':').unwrap_or((s, "desc"));
        let key = match key.trim() {
            "createdAt" => SortKey::CreatedAt,
            "priceNumber" => SortKey::PriceNumber,
            "areaNumber" => SortKey::AreaNumber,
            _ => return Err(ParsePostSortError(s.to_owned())),
        };
        let direction = match direction.trim().to_ascii_lowercase().as_str() {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            _ => return Err(ParsePostSortError(s.to_owned())),
        };
        Ok(Self { key, direction })
    }
}

impl fmt::Display for PostSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self.key {
            SortKey::CreatedAt => "createdAt",
            SortKey::PriceNumber => "priceNumber",
            SortKey::AreaNumber => "areaNumber",
        };
        let direction = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        write!(f, "{key}:{direction}")
    }
}

impl PostSort {
    /// Newest posts first.
    pub const NEWEST: Self = Self {
        key: SortKey::CreatedAt,
        direction: SortDirection::Desc,
    };

    /// Compare two posts under this ordering.
    pub fn compare(&self, left: &Post, right: &Post) -> Ordering {
        let by_key = match self.key {
            SortKey::CreatedAt => left.created_at.cmp(&right.created_at),
            SortKey::PriceNumber => left.price_number.total_cmp(&right.price_number),
            SortKey::AreaNumber => left.area_number.total_cmp(&right.area_number),
        };
        let by_key = match self.direction {
            SortDirection::Asc => by_key,
            SortDirection::Desc => by_key.reverse(),
        };
        by_key.then_with(|| left.id.cmp(&right.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_fixtures::post_with;
    use rstest::rstest;

    #[rstest]
    #[case(1.0, 5.0, 1.0, true)]
    #[case(1.0, 5.0, 5.0, true)]
    #[case(1.0, 5.0, 3.0, true)]
    #[case(1.0, 5.0, 0.99, false)]
    #[case(1.0, 5.0, 5.01, false)]
    fn range_bounds_are_inclusive(
        #[case] min: f64,
        #[case] max: f64,
        #[case] value: f64,
        #[case] expected: bool,
    ) {
        let range = NumericRange::new(min, max).expect("valid range");
        assert_eq!(range.contains(value), expected);
    }

    #[rstest]
    fn inverted_range_is_rejected() {
        assert!(matches!(
            NumericRange::new(5.0, 1.0),
            Err(NumericRangeError::Inverted { .. })
        ));
    }

    #[rstest]
    fn non_finite_range_is_rejected() {
        assert_eq!(
            NumericRange::new(f64::NAN, 1.0),
            Err(NumericRangeError::NotFinite)
        );
    }

    #[rstest]
    fn empty_filter_matches_everything() {
        assert!(PostFilter::default().matches(&post_with("p-1", |_| {})));
    }

    #[rstest]
    fn filter_combines_equality_and_ranges() {
        let filter = PostFilter {
            category_code: Some("CTPT".to_owned()),
            price_number: Some(NumericRange::new(1.0, 5.0).expect("range")),
            ..PostFilter::default()
        };
        let inside = post_with("p-1", |post| post.price_number = 5.0);
        let too_expensive = post_with("p-2", |post| post.price_number = 6.0);
        let other_category = post_with("p-3", |post| post.category_code = "CTNC".to_owned());

        assert!(filter.matches(&inside));
        assert!(!filter.matches(&too_expensive));
        assert!(!filter.matches(&other_category));
    }

    #[rstest]
    fn equality_on_optional_column_requires_value() {
        let filter = PostFilter {
            area_code: Some("2UMD".to_owned()),
            ..PostFilter::default()
        };
        assert!(!filter.matches(&post_with("p-1", |post| post.area_code = None)));
    }

    #[rstest]
    #[case("createdAt", SortKey::CreatedAt, SortDirection::Desc)]
    #[case("priceNumber:asc", SortKey::PriceNumber, SortDirection::Asc)]
    #[case("areaNumber:DESC", SortKey::AreaNumber, SortDirection::Desc)]
    fn sort_parses_key_and_direction(
        #[case] raw: &str,
        #[case] key: SortKey,
        #[case] direction: SortDirection,
    ) {
        assert_eq!(raw.parse(), Ok(PostSort { key, direction }));
    }

    #[rstest]
    #[case("title")]
    #[case("priceNumber:sideways")]
    fn sort_rejects_unknown_values(#[case] raw: &str) {
        assert!(raw.parse::<PostSort>().is_err());
    }

    #[rstest]
    fn ties_break_by_id() {
        let sort: PostSort = "priceNumber:desc".parse().expect("sort");
        let mut posts = vec![
            post_with("p-3", |post| post.price_number = 2.0),
            post_with("p-1", |post| post.price_number = 2.0),
            post_with("p-2", |post| post.price_number = 3.0),
        ];
        posts.sort_by(|a, b| sort.compare(a, b));
        let ids: Vec<&str> = posts.iter().map(|post| post.id.as_str()).collect();
        assert_eq!(ids, vec!["p-2", "p-1", "p-3"]);
    }
}
