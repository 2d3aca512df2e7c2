//! Input validation utilities.
//!
//! Date parsing and range checks shared by the meal plan, listing and grocery services.

use crate::constants::DATE_FORMAT;
use crate::error::{MealplanError, MealplanResult, ValidationReason};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parses a strict `YYYY-MM-DD` calendar date.
///
/// # Errors
///
/// Returns `MealplanError::Validation` with [`ValidationReason::InvalidDate`] otherwise.
pub fn parse_calendar_date(input: &str) -> MealplanResult<NaiveDate> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| {
        MealplanError::validation(
            ValidationReason::InvalidDate,
            format!("expected a YYYY-MM-DD date, got '{}'", trimmed),
        )
    })
}

/// Parses a meal plan date.
///
/// Accepts `YYYY-MM-DD`, an RFC 3339 timestamp (`2025-05-12T18:30:00Z`), or a naive
/// ISO-8601 date-time (`2025-05-12T18:30:00`). Only the calendar date is kept; for
/// timestamps carrying an offset that is the date in the writer's own offset.
pub fn parse_meal_plan_date(input: &str) -> MealplanResult<NaiveDate> {
    let trimmed = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Ok(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(dt.date());
        }
    }

    Err(MealplanError::validation(
        ValidationReason::InvalidDate,
        format!("expected a YYYY-MM-DD date or ISO-8601 date-time, got '{}'", trimmed),
    ))
}

/// Parses and checks an inclusive `start..=end` range.
///
/// # Errors
///
/// - [`ValidationReason::InvalidDate`] if either bound is malformed
/// - [`ValidationReason::InvalidDateRange`] if `end` is before `start`
pub fn parse_date_range(start: &str, end: &str) -> MealplanResult<(NaiveDate, NaiveDate)> {
    let start_date = parse_calendar_date(start)?;
    let end_date = parse_calendar_date(end)?;

    if end_date < start_date {
        return Err(MealplanError::validation(
            ValidationReason::InvalidDateRange,
            format!("end date {} is before start date {}", end_date, start_date),
        ));
    }

    Ok((start_date, end_date))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_calendar_date() {
        assert_eq!(
            parse_calendar_date("2025-05-12").unwrap(),
            NaiveDate::from_ymd_opt(2025, 5, 12).unwrap()
        );
        assert_eq!(
            parse_calendar_date("12/05/2025").unwrap_err().validation_reason(),
            Some(ValidationReason::InvalidDate)
        );
        assert!(parse_calendar_date("2025-02-30").is_err());
    }

    #[test]
    fn test_parse_meal_plan_date_variants() {
        let expected = NaiveDate::from_ymd_opt(2023, 6, 15).unwrap();
        assert_eq!(parse_meal_plan_date("2023-06-15").unwrap(), expected);
        assert_eq!(parse_meal_plan_date("2023-06-15T18:30:00").unwrap(), expected);
        assert_eq!(parse_meal_plan_date("2023-06-15T18:30:00Z").unwrap(), expected);
        assert_eq!(
            parse_meal_plan_date("2023-06-15T18:30:00+02:00").unwrap(),
            expected
        );
        assert_eq!(parse_meal_plan_date("2023-06-15T18:30").unwrap(), expected);
    }

    #[test]
    fn test_parse_meal_plan_date_rejects_garbage() {
        let err = parse_meal_plan_date("next tuesday").unwrap_err();
        assert_eq!(err.validation_reason(), Some(ValidationReason::InvalidDate));
    }

    #[test]
    fn test_parse_date_range() {
        let (start, end) = parse_date_range("2025-05-10", "2025-05-17").unwrap();
        assert!(start < end);

        assert!(parse_date_range("2025-05-10", "2025-05-10").is_ok());

        let err = parse_date_range("2025-05-17", "2025-05-10").unwrap_err();
        assert_eq!(
            err.validation_reason(),
            Some(ValidationReason::InvalidDateRange)
        );
    }
}
