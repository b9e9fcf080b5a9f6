use serde::Deserialize;
use thiserror::Error;

use crate::input::json_input::Nodes;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Label {
    name: String,
}

impl Label {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Assignee {
    login: String,
}

impl Assignee {
    #[must_use]
    pub fn login(&self) -> &str {
        &self.login
    }
}

/// The issue or pull request behind a project item.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Content {
    labels: Option<Nodes<Label>>,
    assignees: Option<Nodes<Assignee>>,
}

/// The project fields the notebook cares about. Any other field of the
/// project (iterations, numbers, custom selects) is [`FieldName::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum FieldName {
    Title,
    Status,
    Start,
    End,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct FieldRef {
    name: FieldName,
}

/// One entry of `fieldValues`. Depending on the field type the value is in
/// `text`, `date` or (for single selects) `name`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FieldValueNode {
    field: Option<FieldRef>,
    text: Option<String>,
    date: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Title(String),
    Status(String),
    Start(String),
    End(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("the {field:?} field has no `{key}` value")]
pub struct MissingFieldValue {
    field: FieldName,
    key: &'static str,
}

impl MissingFieldValue {
    #[must_use]
    pub fn field(&self) -> FieldName {
        self.field
    }
}

impl FieldValueNode {
    /// Returns the typed value of this node, or `None` for fields that are
    /// not part of a row.
    pub fn value(&self) -> Result<Option<FieldValue>, MissingFieldValue> {
        let Some(field) = &self.field else {
            return Ok(None);
        };

        let required = |value: &Option<String>, key| {
            value
                .clone()
                .ok_or(MissingFieldValue {
                    field: field.name,
                    key,
                })
        };

        Ok(Some(match field.name {
            FieldName::Title => FieldValue::Title(required(&self.text, "text")?),
            FieldName::Status => FieldValue::Status(required(&self.name, "name")?),
            FieldName::Start => FieldValue::Start(required(&self.date, "date")?),
            FieldName::End => FieldValue::End(required(&self.date, "date")?),
            FieldName::Other => return Ok(None),
        }))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Item {
    content: Option<Content>,
    #[serde(rename = "fieldValues", default)]
    field_values: Nodes<Option<FieldValueNode>>,
}

impl Item {
    pub fn labels(&self) -> impl Iterator<Item = &Label> + '_ {
        self.content
            .iter()
            .filter_map(|content| content.labels.as_ref())
            .flat_map(Nodes::iter)
    }

    pub fn assignees(&self) -> impl Iterator<Item = &Assignee> + '_ {
        self.content
            .iter()
            .filter_map(|content| content.assignees.as_ref())
            .flat_map(Nodes::iter)
    }

    /// All field values in source order, empty nodes skipped.
    pub fn field_values(&self) -> impl Iterator<Item = &FieldValueNode> + '_ {
        self.field_values.iter().filter_map(Option::as_ref)
    }
}
