use crate::utils::error::{Result, ScrapeError};
use chrono::{Duration, NaiveDate};

pub const DATE_FORMAT: &str = "%d/%m/%Y";

pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| ScrapeError::InvalidDateFormat {
        value: value.to_string(),
    })
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Expands an inclusive date range into the ordered list of days it covers.
///
/// A start date after the end date yields an empty list rather than an
/// error; callers get well-formed empty tables downstream.
pub fn expand(start: &str, end: &str) -> Result<Vec<NaiveDate>> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;

    let mut days = Vec::new();
    let mut current = start;
    while current <= end {
        days.push(current);
        current = current + Duration::days(1);
    }
    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_small_range() {
        let days = expand("01/06/2025", "03/06/2025").unwrap();
        let rendered: Vec<String> = days.into_iter().map(format_date).collect();
        assert_eq!(rendered, vec!["01/06/2025", "02/06/2025", "03/06/2025"]);
    }

    #[test]
    fn test_expand_single_day() {
        let days = expand("15/06/2025", "15/06/2025").unwrap();
        assert_eq!(days.len(), 1);
    }

    #[test]
    fn test_expand_crosses_month_boundary() {
        let days = expand("30/06/2025", "02/07/2025").unwrap();
        let rendered: Vec<String> = days.into_iter().map(format_date).collect();
        assert_eq!(rendered, vec!["30/06/2025", "01/07/2025", "02/07/2025"]);
    }

    #[test]
    fn test_expand_crosses_year_boundary() {
        let days = expand("30/12/2025", "02/01/2026").unwrap();
        assert_eq!(days.len(), 4);
        assert_eq!(format_date(days[0]), "30/12/2025");
        assert_eq!(format_date(days[3]), "02/01/2026");
    }

    #[test]
    fn test_expand_length_matches_inclusive_day_count() {
        let days = expand("01/01/2025", "31/01/2025").unwrap();
        assert_eq!(days.len(), 31);
        assert!(days.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_expand_inverted_range_is_empty() {
        let days = expand("05/06/2025", "01/06/2025").unwrap();
        assert!(days.is_empty());
    }

    #[test]
    fn test_parse_rejects_malformed_dates() {
        for value in ["2025-06-01", "32/01/2025", "01/13/2025", "junk", ""] {
            let err = parse_date(value).unwrap_err();
            assert!(matches!(err, ScrapeError::InvalidDateFormat { .. }));
        }
    }

    #[test]
    fn test_expand_rejects_malformed_endpoint() {
        assert!(expand("01/06/2025", "not-a-date").is_err());
        assert!(expand("not-a-date", "01/06/2025").is_err());
    }
}
