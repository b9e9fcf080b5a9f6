use std::fs;
use std::path::Path;

use notebook_tex::input::Config;
use notebook_tex::time::RunDate;
use tempfile::TempDir;

/// One project item as the export job writes it.
pub struct Item<'a> {
    pub labels: &'a [&'a str],
    pub title: &'a str,
    pub status: &'a str,
    pub start: &'a str,
    pub end: &'a str,
    pub assignees: &'a [&'a str],
}

fn field_value(field: &str, key: &str, value: &str) -> serde_json::Value {
    serde_json::json!({ key: value, "field": { "name": field } })
}

#[must_use]
pub fn make_export(items: &[Item<'_>]) -> String {
    let nodes = items
        .iter()
        .map(|item| {
            let mut field_values = vec![serde_json::json!({})];
            field_values.push(field_value("Title", "text", item.title));
            field_values.push(field_value("Status", "name", item.status));
            if !item.start.is_empty() {
                field_values.push(field_value("Start", "date", item.start));
            }
            if !item.end.is_empty() {
                field_values.push(field_value("End", "date", item.end));
            }

            serde_json::json!({
                "content": {
                    "labels": {
                        "nodes": item.labels.iter().map(|name| serde_json::json!({ "name": name })).collect::<Vec<_>>()
                    },
                    "assignees": {
                        "nodes": item.assignees.iter().map(|login| serde_json::json!({ "login": login })).collect::<Vec<_>>()
                    }
                },
                "fieldValues": { "nodes": field_values }
            })
        })
        .collect::<Vec<_>>();

    serde_json::json!({
        "data": { "organization": { "projectV2": { "items": { "nodes": nodes } } } }
    })
    .to_string()
}

/// A scratch notebook with the default layout below a temporary directory.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("should be able to create a temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    #[must_use]
    pub fn config(&self, date: &str) -> Config {
        let root = self.path();
        let mut builder = Config::builder();
        builder
            .input(root.join("tmp/project-data.json"))
            .current(root.join("summary/current-project.csv"))
            .previous(root.join("tmp/previous-project.csv"))
            .output(root.join("summary/project-changes.tex"))
            .date(date.parse::<RunDate>().expect("date should be valid"));

        builder.build().expect("config should be valid")
    }

    pub fn write_export(&self, config: &Config, items: &[Item<'_>]) {
        let input = config.input();
        fs::create_dir_all(input.parent().unwrap()).unwrap();
        fs::write(input, make_export(items)).unwrap();
    }

    #[must_use]
    pub fn read_output(&self, config: &Config) -> String {
        fs::read_to_string(config.output()).unwrap_or_default()
    }
}
