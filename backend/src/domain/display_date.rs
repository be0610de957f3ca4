//! Human-readable dates shown on attributes and overviews.
//!
//! Listings are read in Vietnam, so display strings are rendered in UTC+7
//! regardless of the server's zone.

use chrono::{DateTime, Datelike, FixedOffset, Offset, Timelike, Utc, Weekday};

const VIETNAM_OFFSET_SECS: i32 = 7 * 60 * 60;

fn vietnam_time(instant: DateTime<Utc>) -> DateTime<FixedOffset> {
    // 7h is always a valid offset.
    let zone = FixedOffset::east_opt(VIETNAM_OFFSET_SECS).unwrap_or_else(|| Utc.fix());
    instant.with_timezone(&zone)
}

fn weekday_name(day: Weekday) -> String {
    match day {
        Weekday::Sun => "Chủ nhật".to_owned(),
        other => format!("Thứ {}", other.number_from_sunday()),
    }
}

/// `DD/MM/YYYY`, as stored on attributes.
#[must_use]
pub fn published_date(instant: DateTime<Utc>) -> String {
    vietnam_time(instant).format("%d/%m/%Y").to_string()
}

/// `Thứ N, H:MM D/M/YYYY`, as stored on overviews.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use phongtro::domain::overview_date;
///
/// let instant = Utc.with_ymd_and_hms(2024, 5, 1, 3, 0, 0).unwrap();
/// assert_eq!(overview_date(instant), "Thứ 4, 10:00 1/5/2024");
/// ```
#[must_use]
pub fn overview_date(instant: DateTime<Utc>) -> String {
    let local = vietnam_time(instant);
    format!(
        "{}, {}:{:02} {}/{}/{}",
        weekday_name(local.weekday()),
        local.hour(),
        local.minute(),
        local.day(),
        local.month(),
        local.year()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0)
            .single()
            .expect("valid timestamp")
    }

    #[rstest]
    #[case(at(2024, 5, 1, 3, 0), "Thứ 4, 10:00 1/5/2024")]
    #[case(at(2024, 5, 11, 3, 0), "Thứ 7, 10:00 11/5/2024")]
    #[case(at(2024, 5, 4, 18, 5), "Chủ nhật, 1:05 5/5/2024")]
    #[case(at(2024, 5, 6, 0, 30), "Thứ 2, 7:30 6/5/2024")]
    fn overview_dates_use_vietnamese_weekdays(
        #[case] instant: DateTime<Utc>,
        #[case] expected: &str,
    ) {
        assert_eq!(overview_date(instant), expected);
    }

    #[rstest]
    fn published_date_rolls_over_at_local_midnight() {
        assert_eq!(published_date(at(2024, 12, 31, 17, 0)), "01/01/2025");
        assert_eq!(published_date(at(2024, 12, 31, 16, 59)), "31/12/2024");
    }
}
