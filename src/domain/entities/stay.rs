use crate::domain::errors::{DomainError, DomainResult};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Half-open stay interval `[check_in, check_out)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StayInterval {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl StayInterval {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> DomainResult<Self> {
        if check_out <= check_in {
            return Err(DomainError::InvalidInterval(format!(
                "check-out {} must be after check-in {}",
                check_out, check_in
            )));
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    pub fn parse(check_in: &str, check_out: &str) -> DomainResult<Self> {
        Self::new(parse_date(check_in)?, parse_date(check_out)?)
    }

    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Every night of the stay, starting at check-in.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.check_in;
        (0..self.nights()).map(move |i| start + Duration::days(i))
    }

    /// True when the night starting on `day` belongs to the stay.
    pub fn covers_night(&self, day: NaiveDate) -> bool {
        self.check_in <= day && day < self.check_out
    }
}

/// Parse a calendar date. Accepts `YYYY-MM-DD` and ISO datetimes, whose date part is kept.
pub fn parse_date(value: &str) -> DomainResult<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::InvalidInput("date is required".to_string()));
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(datetime) = chrono::DateTime::parse_from_rfc3339(value) {
        return Ok(datetime.date_naive());
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(datetime.date());
    }

    Err(DomainError::InvalidInput(format!("invalid date: {}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_parse_plain_date() {
        assert_eq!(parse_date("2024-06-01").unwrap(), date("2024-06-01"));
    }

    #[test]
    fn test_parse_datetime_keeps_date() {
        assert_eq!(
            parse_date("2024-06-01T00:00:00.000Z").unwrap(),
            date("2024-06-01")
        );
        assert_eq!(parse_date("2024-06-01T10:30:00").unwrap(), date("2024-06-01"));
    }

    #[test]
    fn test_parse_garbage_is_invalid_input() {
        assert!(matches!(
            parse_date("June first"),
            Err(DomainError::InvalidInput(_))
        ));
        assert!(matches!(parse_date(""), Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn test_reversed_interval_rejected() {
        let result = StayInterval::parse("2024-06-04", "2024-06-01");
        assert!(matches!(result, Err(DomainError::InvalidInterval(_))));

        let same_day = StayInterval::parse("2024-06-04", "2024-06-04");
        assert!(matches!(same_day, Err(DomainError::InvalidInterval(_))));
    }

    #[test]
    fn test_nights_and_days() {
        let stay = StayInterval::parse("2024-06-01", "2024-06-04").unwrap();
        assert_eq!(stay.nights(), 3);

        let days: Vec<NaiveDate> = stay.days().collect();
        assert_eq!(
            days,
            vec![date("2024-06-01"), date("2024-06-02"), date("2024-06-03")]
        );
        assert!(stay.covers_night(date("2024-06-03")));
        assert!(!stay.covers_night(date("2024-06-04")));
    }
}
