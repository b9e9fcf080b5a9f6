use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::Path;

use anyhow::Context;
use log::info;
use thiserror::Error;

use crate::latex_string::LatexString;
use crate::map;
use crate::project::{Row, ROW_WIDTH};
use crate::time::RunDate;
use crate::utils;

pub const DEFAULT_COLUMN_WIDTHS: [u32; ROW_WIDTH] = [40, 150, 35, 33, 33, 40];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no row color is configured for status \"{status}\"")]
pub struct UnknownStatus {
    status: String,
}

impl UnknownStatus {
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }
}

/// Maps the status of a row to the `xcolor` name its table row is shaded with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusColors {
    colors: HashMap<String, String>,
    header: String,
}

impl StatusColors {
    #[must_use]
    pub fn new(colors: HashMap<String, String>, header: impl Into<String>) -> Self {
        Self {
            colors,
            header: header.into(),
        }
    }

    pub fn color_of(&self, row: &Row) -> Result<&str, UnknownStatus> {
        if row.is_header() {
            return Ok(&self.header);
        }

        self.colors
            .get(row.status())
            .map(String::as_str)
            .ok_or_else(|| UnknownStatus {
                status: row.status().to_string(),
            })
    }

    pub fn set_header(&mut self, header: impl Into<String>) -> &mut Self {
        self.header = header.into();
        self
    }
}

impl Default for StatusColors {
    fn default() -> Self {
        Self::new(
            map! {
                "Backlog".to_string() => "Ivory2".to_string(),
                "Todo".to_string() => "IndianRed1".to_string(),
                "In Progress".to_string() => "LightGoldenrod1".to_string(),
                "Done".to_string() => "DarkSeaGreen1".to_string(),
            },
            "white",
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportStyle {
    column_widths: [u32; ROW_WIDTH],
    colors: StatusColors,
}

impl ReportStyle {
    #[must_use]
    pub fn new(column_widths: [u32; ROW_WIDTH], colors: StatusColors) -> Self {
        Self {
            column_widths,
            colors,
        }
    }

    #[must_use]
    pub fn column_widths(&self) -> &[u32; ROW_WIDTH] {
        &self.column_widths
    }

    #[must_use]
    pub fn colors(&self) -> &StatusColors {
        &self.colors
    }
}

impl Default for ReportStyle {
    fn default() -> Self {
        Self::new(DEFAULT_COLUMN_WIDTHS, StatusColors::default())
    }
}

#[must_use]
fn column_spec(widths: &[u32]) -> String {
    let columns = widths
        .iter()
        .map(|width| format!("p{{{}pt}}", width))
        .collect::<Vec<_>>();

    format!("| {} |", columns.join(" | "))
}

/// Renders the rows that changed since the last run as a dated section.
pub struct ChangesReport<'a> {
    style: &'a ReportStyle,
    date: RunDate,
}

impl<'a> ChangesReport<'a> {
    pub fn new(style: &'a ReportStyle, date: RunDate) -> Self {
        Self { style, date }
    }

    /// Returns `None` if there is nothing to report.
    ///
    /// Every row color is looked up before anything is rendered, an unknown
    /// status fails the whole section.
    pub fn render(&self, differences: &[Row]) -> Result<Option<String>, UnknownStatus> {
        if differences.is_empty() {
            return Ok(None);
        }

        let colors = differences
            .iter()
            .map(|row| self.style.colors().color_of(row))
            .collect::<Result<Vec<_>, _>>()?;

        let mut result = String::new();
        // writing to a String can not fail
        let _ = write!(
            result,
            "\n\n\\section{{{} Changes}}\n\\begin{{center}}\n\\begin{{longtable}}{{{}}}\n",
            self.date,
            column_spec(self.style.column_widths()),
        );

        for (row, color) in differences.iter().zip(colors) {
            let cells = row
                .fields()
                .iter()
                .map(|field| {
                    if row.is_header() {
                        LatexString::verbatim(field.as_str())
                    } else {
                        LatexString::escape(field)
                    }
                })
                .map(|cell| cell.to_string())
                .collect::<Vec<_>>();

            let _ = write!(
                result,
                "\\hline \\rowcolor{{{}}}\n{} \\\\\n",
                color,
                cells.join(" & ").trim()
            );
        }

        result.push_str("\\hline\n\\end{longtable}\n\\end{center}\n");

        Ok(Some(result))
    }

    /// Appends the section to the document at `path`. Returns whether
    /// anything was written.
    pub fn append_to(&self, path: impl AsRef<Path>, differences: &[Row]) -> anyhow::Result<bool> {
        let path = path.as_ref();

        let Some(section) = self.render(differences)? else {
            info!("no changes since the last run, leaving `{}` as is", path.display());
            return Ok(false);
        };

        utils::create_parent_dir(path)?;
        utils::append(path, section)
            .with_context(|| format!("failed to append changes to `{}`", path.display()))?;

        info!(
            "appended {} changed rows to `{}`",
            differences.len(),
            path.display()
        );

        Ok(true)
    }
}
