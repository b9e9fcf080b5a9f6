mod latex_string;
mod utils;

pub mod input;
pub mod latex_generator;
pub mod project;
pub mod time;

use std::path::Path;

use anyhow::Context;
use log::info;

use crate::input::json_input::ProjectExport;
use crate::input::Config;
use crate::latex_generator::{ChangesReport, CodeListing, DelimitedTable};
use crate::project::Snapshot;

/// Snapshots the project export, diffs it against the last run and appends
/// the changed rows to the changes document.
///
/// Returns whether a section was appended.
pub fn generate_project_changes(config: &Config) -> anyhow::Result<bool> {
    info!("reading project export `{}`", config.input().display());
    let export = ProjectExport::from_file(config.input())?;
    let rows = project::extract_rows(&export)?;

    project::rotate(config.current(), config.previous())?;

    info!("writing snapshot `{}`", config.current().display());
    Snapshot::new(rows).write_to(config.current())?;

    let differences = project::diff_snapshots(config.current(), config.previous())?;
    info!("found {} new or changed rows", differences.len());

    ChangesReport::new(config.style(), config.date()).append_to(config.output(), &differences)
}

/// Creates an empty current snapshot if there is none yet.
pub fn seed_snapshot(config: &Config) -> anyhow::Result<bool> {
    Ok(project::seed(config.current())?)
}

pub fn generate_code_listing(
    source: impl AsRef<Path>,
    output: impl AsRef<Path>,
    listing: &CodeListing,
    extension: Option<&str>,
) -> anyhow::Result<()> {
    let (source, output) = (source.as_ref(), output.as_ref());

    info!("listing files in `{}`", source.display());
    let files = latex_generator::collect_files(source, extension)?;

    utils::create_parent_dir(output)?;
    utils::write(output, listing.render(&files))
        .with_context(|| format!("failed to write `{}`", output.display()))?;

    info!("wrote {} listings to `{}`", files.len(), output.display());

    Ok(())
}

pub fn generate_table(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    table: &DelimitedTable,
) -> anyhow::Result<()> {
    let (input, output) = (input.as_ref(), output.as_ref());

    let content = utils::read_to_string(input)
        .with_context(|| format!("failed to read `{}`", input.display()))?;

    utils::create_parent_dir(output)?;
    utils::write(output, table.render(&content))
        .with_context(|| format!("failed to write `{}`", output.display()))?;

    info!("converted `{}` to `{}`", input.display(), output.display());

    Ok(())
}
