use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::AppError;

/// Format accepted for datetime query parameters, interpreted as UTC.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn get_utc_time() -> DateTime<Utc> {
    Utc::now()
}

pub fn str_to_int_or_none(value: Option<&str>) -> Result<Option<i64>, AppError> {
    match value {
        None => Ok(None),
        Some(s) => s
            .parse::<i64>()
            .map(Some)
            .map_err(|_| AppError::validation(format!("Invalid integer value: {s}"))),
    }
}

pub fn str_to_bool_or_none(value: Option<&str>) -> Result<Option<bool>, AppError> {
    match value {
        None => Ok(None),
        Some(s) if s.eq_ignore_ascii_case("true") => Ok(Some(true)),
        Some(s) if s.eq_ignore_ascii_case("false") => Ok(Some(false)),
        Some(s) => Err(AppError::validation(format!("Invalid boolean value: {s}"))),
    }
}

pub fn str_to_datetime_or_none(value: Option<&str>) -> Result<Option<DateTime<Utc>>, AppError> {
    match value {
        None => Ok(None),
        Some(s) => NaiveDateTime::parse_from_str(s, DATETIME_FORMAT)
            .map(|dt| Some(dt.and_utc()))
            .map_err(|_| AppError::validation(format!("Invalid datetime value: {s}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn get_utc_time_returns_utc() {
        let now = get_utc_time();
        assert_eq!(now.timezone(), Utc);
    }

    #[test]
    fn int_parser_accepts_none() {
        assert_eq!(str_to_int_or_none(None).unwrap(), None);
    }

    #[test]
    fn int_parser_accepts_valid_values() {
        for input in ["0", "-100", "100", "123"] {
            let parsed = str_to_int_or_none(Some(input)).unwrap();
            assert_eq!(parsed, Some(input.parse::<i64>().unwrap()));
        }
    }

    #[test]
    fn int_parser_rejects_invalid_values() {
        assert!(str_to_int_or_none(Some("zero")).is_err());
    }

    #[test]
    fn bool_parser_accepts_none() {
        assert_eq!(str_to_bool_or_none(None).unwrap(), None);
    }

    #[test]
    fn bool_parser_is_case_insensitive() {
        for input in ["true", "TRUE", "trUE", "TRue"] {
            assert_eq!(str_to_bool_or_none(Some(input)).unwrap(), Some(true));
        }
        for input in ["false", "FALSE", "False", "fALSE", "falsE"] {
            assert_eq!(str_to_bool_or_none(Some(input)).unwrap(), Some(false));
        }
    }

    #[test]
    fn bool_parser_rejects_invalid_values() {
        assert!(str_to_bool_or_none(Some("asdbkhujab")).is_err());
    }

    #[test]
    fn datetime_parser_accepts_none() {
        assert!(str_to_datetime_or_none(None).unwrap().is_none());
    }

    #[test]
    fn datetime_parser_accepts_valid_values() {
        for input in [
            "2020-01-01 00:00:00",
            "2021-06-16 12:12:12",
            "1992-09-21 12:34:56",
        ] {
            let parsed = str_to_datetime_or_none(Some(input)).unwrap().unwrap();
            assert_eq!(parsed.timezone(), Utc);
        }
    }

    #[test]
    fn datetime_parser_keeps_time_components() {
        let parsed = str_to_datetime_or_none(Some("2021-06-16 12:34:56"))
            .unwrap()
            .unwrap();
        assert_eq!(parsed.hour(), 12);
        assert_eq!(parsed.minute(), 34);
        assert_eq!(parsed.second(), 56);
    }

    #[test]
    fn datetime_parser_rejects_invalid_values() {
        for input in [
            "20-01-01 00:00:00",
            "2020-001-16 12:12:12",
            "2022-13-01 00:00:00",
            "2022-01-50 00:00:00",
            "1992-09-21 24:34:56",
            "1992-09-21 11:60:56",
            "1992-09-21 14:34:60",
            "not a datetime",
        ] {
            assert!(str_to_datetime_or_none(Some(input)).is_err(), "accepted {input}");
        }
    }
}
