use core::fmt;

use thiserror::Error;

use crate::project::Record;
use crate::time::{normalize_date, InvalidDate};

/// The number of fields in every row of a snapshot.
pub const ROW_WIDTH: usize = 6;

/// Separates the fields of a row. Titles and labels contain commas, a NUL
/// byte never shows up in them.
pub const FIELD_DELIMITER: char = '\0';

const STATUS_INDEX: usize = 2;

const HEADER: [&str; ROW_WIDTH] = [
    "\\textbf{\\scriptsize{Labels}}",
    "\\textbf{\\scriptsize{Title}}",
    "\\textbf{\\scriptsize{Status}}",
    "\\textbf{\\scriptsize{Start}}",
    "\\textbf{\\scriptsize{End}}",
    "\\textbf{\\scriptsize{Assignees}}",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("field {index} contains a delimiter or line break: {value:?}")]
    ForbiddenCharacter { index: usize, value: String },
    #[error("expected {} fields, found {found} in line {line:?}", ROW_WIDTH)]
    FieldCount { found: usize, line: String },
    #[error("invalid date in record \"{title}\"")]
    InvalidDate {
        title: String,
        #[source]
        source: InvalidDate,
    },
}

/// The flat projection of a [`Record`]:
/// labels, title, status, start, end and assignees.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Row([String; ROW_WIDTH]);

impl Row {
    /// Creates a row, rejecting fields that would break the line format.
    pub fn new(fields: [String; ROW_WIDTH]) -> Result<Self, RowError> {
        for (index, value) in fields.iter().enumerate() {
            if value.contains([FIELD_DELIMITER, '\n', '\r']) {
                return Err(RowError::ForbiddenCharacter {
                    index,
                    value: value.clone(),
                });
            }
        }

        Ok(Self(fields))
    }

    /// The column headings every snapshot starts with.
    #[must_use]
    pub fn header() -> Self {
        Self(HEADER.map(String::from))
    }

    #[must_use]
    pub fn is_header(&self) -> bool {
        self.0.iter().zip(HEADER).all(|(field, heading)| field == heading)
    }

    #[must_use]
    pub fn fields(&self) -> &[String; ROW_WIDTH] {
        &self.0
    }

    #[must_use]
    pub fn status(&self) -> &str {
        &self.0[STATUS_INDEX]
    }

    /// Parses a single line of a snapshot (without the line terminator).
    pub fn parse_line(line: &str) -> Result<Self, RowError> {
        let parts = line.split(FIELD_DELIMITER).collect::<Vec<_>>();

        let fields: [&str; ROW_WIDTH] =
            parts.as_slice().try_into().map_err(|_| RowError::FieldCount {
                found: parts.len(),
                line: line.to_string(),
            })?;

        Ok(Self(fields.map(String::from)))
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, field) in self.0.iter().enumerate() {
            if index != 0 {
                write!(f, "{}", FIELD_DELIMITER)?;
            }
            f.write_str(field)?;
        }

        Ok(())
    }
}

impl TryFrom<&Record> for Row {
    type Error = RowError;

    fn try_from(record: &Record) -> Result<Self, Self::Error> {
        let date = |value: &str| {
            normalize_date(value).map_err(|source| RowError::InvalidDate {
                title: record.title().to_string(),
                source,
            })
        };

        Self::new([
            record.labels().join(", "),
            record.title().to_string(),
            record.status().to_string(),
            date(record.start())?,
            date(record.end())?,
            record.assignees().join(", "),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    fn row(fields: [&str; ROW_WIDTH]) -> Row {
        Row::new(fields.map(String::from)).expect("fields should be valid")
    }

    #[test]
    fn test_row_from_record() {
        let record = Record::new(
            vec!["Bug".to_string(), "Ux".to_string()],
            "Fix login",
            "Todo",
            "2024-01-01",
            "2024-01-05",
            vec!["alice".to_string(), "bob".to_string()],
        );

        assert_eq!(
            Row::try_from(&record),
            Ok(row([
                "Bug, Ux",
                "Fix login",
                "Todo",
                "1/1/2024",
                "1/5/2024",
                "alice, bob"
            ]))
        );
    }

    #[test]
    fn test_row_with_bad_date() {
        let record = Record::new(vec![], "Broken", "Done", "yesterday", "", vec![]);

        assert!(matches!(
            Row::try_from(&record),
            Err(RowError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_line_round_trip() {
        let row = row(["Bug", "Fix login, again", "Todo", "", "1/5/2024", ""]);

        assert_eq!(Row::parse_line(&row.to_string()), Ok(row));
    }

    #[test]
    fn test_header_line() {
        let header = Row::header();

        assert!(header.is_header());
        assert_eq!(header.status(), "\\textbf{\\scriptsize{Status}}");
        assert!(!row(["", "", "Todo", "", "", ""]).is_header());
    }

    #[test]
    fn test_rejects_delimiter_in_field() {
        assert_eq!(
            Row::new(["a", "b\0c", "", "", "", ""].map(String::from)),
            Err(RowError::ForbiddenCharacter {
                index: 1,
                value: "b\0c".to_string()
            })
        );
        assert!(Row::new(["", "", "", "", "", "two\nlines"].map(String::from)).is_err());
    }

    #[test]
    fn test_parse_line_wrong_field_count() {
        assert_eq!(
            Row::parse_line("a\0b"),
            Err(RowError::FieldCount {
                found: 2,
                line: "a\0b".to_string()
            })
        );
    }
}
