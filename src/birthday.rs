use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::BookError;

// The only accepted date format, for both input and display.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

// Birthday is a calendar date written as DD.MM.YYYY, e.g. "15.06.1990".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Birthday(NaiveDate);

impl Birthday {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    // The anniversary of this birthday in `year`.
    // A Feb 29 birthday falls on Mar 1 in non-leap years.
    pub fn in_year(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.0.month(), self.0.day())
            .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
    }

    // The first anniversary falling on or after `today`.
    pub fn next_occurrence(&self, today: NaiveDate) -> Option<NaiveDate> {
        let this_year = self.in_year(today.year())?;
        if this_year >= today {
            Some(this_year)
        } else {
            self.in_year(today.year() + 1)
        }
    }
}

impl std::fmt::Display for Birthday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for Birthday {
    type Err = BookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &dyn std::fmt::Display| {
            BookError::InvalidFormat(format!("{s}: {reason}. Use DD.MM.YYYY"))
        };
        let s = s.trim();
        // chrono's %Y also takes short, signed or space padded years.
        let year = s.rsplit_once('.').map_or("", |(_, y)| y);
        if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid(&"year must be 4 digits"));
        }
        NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(Self)
            .map_err(|e| invalid(&e))
    }
}

impl TryFrom<String> for Birthday {
    type Error = BookError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Birthday> for String {
    fn from(value: Birthday) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_parse_birthday() {
        let parse = |s: &str| s.parse::<Birthday>();
        assert_eq!(parse("15.06.1990").unwrap().date(), date("15.06.1990"));
        assert_eq!(parse("15.06.1990").unwrap().to_string(), "15.06.1990");
        assert_eq!(parse("29.02.2000").unwrap().to_string(), "29.02.2000");
        assert!(parse("1990-06-15").is_err());
        assert!(parse("31.02.1990").is_err());
        assert!(parse("29.02.2001").is_err());
        assert!(parse("15.13.1990").is_err());
        assert!(parse("yesterday").is_err());
        assert!(parse("").is_err());
    }

    #[test]
    fn test_parse_birthday_year_digits() {
        let parse = |s: &str| s.parse::<Birthday>();
        let rejected = [
            "12.06.90",
            "12.06.+1990",
            "12.06.-0001",
            "12.06. 990",
            "12.06.19900",
            "12.06.",
        ];
        for bad in rejected {
            assert!(
                matches!(parse(bad), Err(BookError::InvalidFormat(_))),
                "{bad:?} should be rejected"
            );
        }
        assert_eq!(parse("12.06.0990").unwrap().to_string(), "12.06.0990");
    }

    #[test]
    fn test_next_occurrence() {
        let next = |bday: &str, today: &str| {
            bday.parse::<Birthday>()
                .unwrap()
                .next_occurrence(date(today))
                .unwrap()
        };
        // Later this year.
        assert_eq!(next("12.06.1990", "10.06.2024"), date("12.06.2024"));
        // Today counts.
        assert_eq!(next("10.06.1990", "10.06.2024"), date("10.06.2024"));
        // Already passed, so next year.
        assert_eq!(next("09.06.1990", "10.06.2024"), date("09.06.2025"));
        assert_eq!(next("02.01.1985", "28.12.2024"), date("02.01.2025"));
    }

    #[test]
    fn test_leap_day_occurrence() {
        let bday: Birthday = "29.02.2000".parse().unwrap();
        assert_eq!(bday.in_year(2024), Some(date("29.02.2024")));
        assert_eq!(bday.in_year(2025), Some(date("01.03.2025")));
        assert_eq!(
            bday.next_occurrence(date("25.02.2025")),
            Some(date("01.03.2025"))
        );
        assert_eq!(
            bday.next_occurrence(date("02.03.2025")),
            Some(date("01.03.2026"))
        );
    }
}
