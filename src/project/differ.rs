use std::collections::HashSet;
use std::path::Path;

use log::debug;

use crate::project::snapshot::{self, SnapshotError};
use crate::project::Row;
use crate::utils;

/// Returns every line of `current` that does not appear anywhere in
/// `previous`, in the order of `current`.
///
/// Only exact matches count: a row with a single changed character is new,
/// a row that only moved is not.
pub fn new_lines<'a, C, P>(current: C, previous: P) -> Vec<&'a str>
where
    C: IntoIterator<Item = &'a str>,
    P: IntoIterator<Item = &'a str>,
{
    let seen = previous.into_iter().collect::<HashSet<_>>();

    current
        .into_iter()
        .filter(|line| !seen.contains(line))
        .collect()
}

/// Diffs the two snapshot files and removes the previous one afterwards.
pub fn diff_snapshots(
    current: impl AsRef<Path>,
    previous: impl AsRef<Path>,
) -> Result<Vec<Row>, SnapshotError> {
    let (current, previous) = (current.as_ref(), previous.as_ref());

    let current_lines = snapshot::read_lines(current)?;
    let previous_lines = snapshot::read_lines(previous)?;

    let differences = new_lines(
        current_lines.iter().map(String::as_str),
        previous_lines.iter().map(String::as_str),
    );

    debug!(
        "{} of {} lines in `{}` are new",
        differences.len(),
        current_lines.len(),
        current.display()
    );

    let rows = differences
        .into_iter()
        .map(|line| {
            Row::parse_line(line).map_err(|source| SnapshotError::Malformed {
                path: current.to_path_buf(),
                line: current_lines
                    .iter()
                    .position(|candidate| candidate == line)
                    .map_or(0, |index| index + 1),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>();

    utils::remove_file(previous).map_err(|source| SnapshotError::Write {
        path: previous.to_path_buf(),
        source,
    })?;

    rows
}
