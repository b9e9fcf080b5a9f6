use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::input::json_input::Item;

/// The `nodes` wrapper GraphQL puts around every connection.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Nodes<T> {
    #[serde(default = "Vec::new")]
    nodes: Vec<T>,
}

impl<T> Nodes<T> {
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.nodes.iter()
    }
}

impl<T> Default for Nodes<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

impl<T> From<Vec<T>> for Nodes<T> {
    fn from(nodes: Vec<T>) -> Self {
        Self { nodes }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Data {
    organization: Organization,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Organization {
    #[serde(rename = "projectV2")]
    project: Project,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Project {
    items: Nodes<Item>,
}

/// The response of the GitHub projects query, as saved by the export job.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProjectExport {
    data: Data,
}

impl ProjectExport {
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("failed to open project export `{}`", path.display()))?;

        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("failed to parse project export `{}`", path.display()))
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> + '_ {
        self.data.organization.project.items.iter()
    }
}
