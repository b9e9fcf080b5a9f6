mod differ;
mod record;
mod row;
mod snapshot;

pub use differ::*;
pub use record::*;
pub use row::*;
pub use snapshot::*;

use anyhow::Context;
use log::debug;

use crate::input::json_input::ProjectExport;

/// Projects every item of the export into a row, keeping the export order.
pub fn extract_rows(export: &ProjectExport) -> anyhow::Result<Vec<Row>> {
    let rows = export
        .items()
        .enumerate()
        .map(|(index, item)| {
            let record = Record::try_from(item)
                .with_context(|| format!("failed to read project item {}", index))?;

            Row::try_from(&record)
                .with_context(|| format!("failed to convert project item {}", index))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    debug!("extracted {} rows from the project export", rows.len());

    Ok(rows)
}
