use core::fmt;
use core::str::FromStr;

use log::warn;
use thiserror::Error;

use crate::utils::StrExt;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidDate {
    #[error("\"{input}\" is not valid date. Expected format: \"YYYY-MM-DD\"")]
    ParseDateError { input: String },
    #[error("{day:02} is not a valid day for {year:04}-{month:02}")]
    InvalidDay { year: i32, month: u8, day: u8 },
}

/// Turns a `YYYY-MM-DD` date into the `M/D/YYYY` form used in the notebook.
///
/// Leading zeros of month and day are dropped, the calendar is not checked,
/// so `2024-02-31` becomes `2/31/2024`. An empty date stays empty.
pub fn normalize_date(input: &str) -> Result<String, InvalidDate> {
    if input.is_empty() {
        return Ok(String::new());
    }

    if let [Some(year), Some(month), Some(day)] = input.split_exact::<3>("-") {
        Ok(format!(
            "{}/{}/{}",
            month.trim_start_matches('0'),
            day.trim_start_matches('0'),
            year
        ))
    } else {
        Err(InvalidDate::ParseDateError {
            input: input.to_string(),
        })
    }
}

fn parse_or_err<T: FromStr>(input: &str, whole: &str) -> Result<T, InvalidDate> {
    input.parse::<T>().map_err(|_| InvalidDate::ParseDateError {
        input: whole.to_string(),
    })
}

/// The date a report section is headed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunDate(time::Date);

impl RunDate {
    #[must_use]
    pub fn new(date: time::Date) -> Self {
        Self(date)
    }

    /// Today's date in the local timezone.
    ///
    /// Falls back to UTC if the local offset can not be determined.
    #[must_use]
    pub fn today() -> Self {
        let now = time::OffsetDateTime::now_local().unwrap_or_else(|e| {
            warn!("failed to determine local offset ({}), using UTC", e);
            time::OffsetDateTime::now_utc()
        });

        Self(now.date())
    }

    #[must_use]
    pub fn date(&self) -> time::Date {
        self.0
    }
}

impl fmt::Display for RunDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            u8::from(self.0.month()),
            self.0.day(),
            self.0.year()
        )
    }
}

impl FromStr for RunDate {
    type Err = InvalidDate;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        if let [Some(year), Some(month), Some(day)] = string.split_exact::<3>("-") {
            let year: i32 = parse_or_err(year, string)?;
            let month: u8 = parse_or_err(month, string)?;
            let day: u8 = parse_or_err(day, string)?;

            let invalid_day = || InvalidDate::InvalidDay { year, month, day };
            let month = time::Month::try_from(month).map_err(|_| invalid_day())?;

            time::Date::from_calendar_date(year, month, day)
                .map(Self)
                .map_err(|_| invalid_day())
        } else {
            Err(InvalidDate::ParseDateError {
                input: string.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use time::macros::date;

    #[test]
    fn test_normalize_date() {
        assert_eq!(normalize_date("2024-03-07"), Ok("3/7/2024".to_string()));
        assert_eq!(normalize_date("2023-12-25"), Ok("12/25/2023".to_string()));
        assert_eq!(normalize_date("2024-10-01"), Ok("10/1/2024".to_string()));
    }

    #[test]
    fn test_normalize_empty_date() {
        assert_eq!(normalize_date(""), Ok(String::new()));
    }

    #[test]
    fn test_normalize_does_not_validate_calendar() {
        assert_eq!(normalize_date("2024-02-31"), Ok("2/31/2024".to_string()));
    }

    #[test]
    fn test_normalize_malformed_date() {
        assert_eq!(
            normalize_date("2024"),
            Err(InvalidDate::ParseDateError {
                input: "2024".to_string()
            })
        );
        assert!(normalize_date("03/07/2024").is_err());
    }

    #[test]
    fn test_run_date_display() {
        assert_eq!(RunDate::new(date!(2024 - 03 - 07)).to_string(), "3/7/2024");
        assert_eq!(RunDate::new(date!(2026 - 10 - 19)).to_string(), "10/19/2026");
    }

    #[test]
    fn test_run_date_from_str() {
        assert_eq!(
            "2024-03-07".parse::<RunDate>(),
            Ok(RunDate::new(date!(2024 - 03 - 07)))
        );
        assert_eq!(
            "2023-02-29".parse::<RunDate>(),
            Err(InvalidDate::InvalidDay {
                year: 2023,
                month: 2,
                day: 29
            })
        );
        assert!("yesterday".parse::<RunDate>().is_err());
    }
}
