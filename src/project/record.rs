use crate::input::json_input::{FieldValue, Item, MissingFieldValue};
use crate::utils::StrExt;

/// A single work item of the project, as read from the export.
///
/// Dates are kept in the `YYYY-MM-DD` form of the export, they are only
/// normalized when the record is turned into a [`Row`](crate::project::Row).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    labels: Vec<String>,
    title: String,
    status: String,
    start: String,
    end: String,
    assignees: Vec<String>,
}

impl Record {
    pub fn new(
        labels: Vec<String>,
        title: impl Into<String>,
        status: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
        assignees: Vec<String>,
    ) -> Self {
        Self {
            labels,
            title: title.into(),
            status: status.into(),
            start: start.into(),
            end: end.into(),
            assignees,
        }
    }

    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    #[must_use]
    pub fn start(&self) -> &str {
        &self.start
    }

    #[must_use]
    pub fn end(&self) -> &str {
        &self.end
    }

    #[must_use]
    pub fn assignees(&self) -> &[String] {
        &self.assignees
    }
}

impl TryFrom<&Item> for Record {
    type Error = MissingFieldValue;

    fn try_from(item: &Item) -> Result<Self, Self::Error> {
        let mut record = Record {
            labels: item.labels().map(|label| label.name().capitalize()).collect(),
            assignees: item
                .assignees()
                .map(|assignee| assignee.login().to_string())
                .collect(),
            ..Default::default()
        };

        // a field that appears more than once keeps its last value
        for node in item.field_values() {
            match node.value()? {
                Some(FieldValue::Title(title)) => record.title = title,
                Some(FieldValue::Status(status)) => record.status = status,
                Some(FieldValue::Start(start)) => record.start = start,
                Some(FieldValue::End(end)) => record.end = end,
                None => {}
            }
        }

        Ok(record)
    }
}
