use std::fs::File;
use std::io::{self, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};
use thiserror::Error;

use crate::project::{Row, RowError};
use crate::utils;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("there is no current snapshot at `{}`, run `seed` first", .0.display())]
    MissingCurrent(PathBuf),
    #[error("failed to read snapshot `{}`", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write snapshot `{}`", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("line {line} of snapshot `{}` is malformed", path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        #[source]
        source: RowError,
    },
}

/// All rows of one run, header first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    rows: Vec<Row>,
}

impl Snapshot {
    /// Creates a snapshot, the header is added in front of the rows.
    #[must_use]
    pub fn new(rows: impl IntoIterator<Item = Row>) -> Self {
        Self {
            rows: std::iter::once(Row::header()).chain(rows).collect(),
        }
    }

    /// Every row including the header.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let path = path.as_ref();
        let write_error = |source| SnapshotError::Write {
            path: path.to_path_buf(),
            source,
        };

        utils::create_parent_dir(path).map_err(write_error)?;

        debug!("writing {} rows to `{}`", self.rows.len(), path.display());
        let mut writer = BufWriter::new(File::create(path).map_err(write_error)?);
        for row in &self.rows {
            writeln!(writer, "{}", row).map_err(write_error)?;
        }
        writer.flush().map_err(write_error)
    }

    pub fn read_from(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();

        let rows = read_lines(path)?
            .iter()
            .enumerate()
            .map(|(number, line)| {
                Row::parse_line(line).map_err(|source| SnapshotError::Malformed {
                    path: path.to_path_buf(),
                    line: number + 1,
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { rows })
    }
}

/// Reads the raw lines of a snapshot, line terminators removed.
pub fn read_lines(path: impl AsRef<Path>) -> Result<Vec<String>, SnapshotError> {
    let path = path.as_ref();
    let content = utils::read_to_string(path).map_err(|source| SnapshotError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(content.lines().map(String::from).collect())
}

/// Moves the current snapshot to the previous path, freeing the current path
/// for this run. The current snapshot has to exist.
pub fn rotate(current: impl AsRef<Path>, previous: impl AsRef<Path>) -> Result<(), SnapshotError> {
    let (current, previous) = (current.as_ref(), previous.as_ref());
    info!(
        "rotating snapshot `{}` to `{}`",
        current.display(),
        previous.display()
    );

    utils::create_parent_dir(previous).map_err(|source| SnapshotError::Write {
        path: previous.to_path_buf(),
        source,
    })?;

    utils::rename(current, previous).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            SnapshotError::MissingCurrent(current.to_path_buf())
        } else {
            SnapshotError::Write {
                path: previous.to_path_buf(),
                source,
            }
        }
    })
}

/// Creates an empty current snapshot, so the first run has something to
/// rotate. Returns `false` if there already is one.
pub fn seed(current: impl AsRef<Path>) -> Result<bool, SnapshotError> {
    let current = current.as_ref();
    if current.exists() {
        info!("snapshot `{}` already exists", current.display());
        return Ok(false);
    }

    let write_error = |source| SnapshotError::Write {
        path: current.to_path_buf(),
        source,
    };

    utils::create_parent_dir(current).map_err(write_error)?;
    utils::write(current, "").map_err(write_error)?;

    info!("seeded empty snapshot `{}`", current.display());
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn row(fields: [&str; 6]) -> Row {
        Row::new(fields.map(String::from)).expect("fields should be valid")
    }

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/current.csv");

        let snapshot = Snapshot::new([
            row(["Bug, Ux", "Fix login", "Todo", "1/1/2024", "1/5/2024", "alice, bob"]),
            row(["", "Write docs, part 2", "Done", "", "", ""]),
            row(["", "Write docs, part 2", "Done", "", "", ""]),
        ]);

        snapshot.write_to(&path).unwrap();

        assert_eq!(Snapshot::read_from(&path).unwrap(), snapshot);
        assert_eq!(read_lines(&path).unwrap().len(), 4);
    }

    #[test]
    fn test_rotate_missing_current() {
        let dir = TempDir::new().unwrap();

        let error = rotate(dir.path().join("current.csv"), dir.path().join("previous.csv"))
            .expect_err("rotation without a current snapshot should fail");

        assert!(matches!(error, SnapshotError::MissingCurrent(_)));
    }

    #[test]
    fn test_rotate_moves_file() {
        let dir = TempDir::new().unwrap();
        let current = dir.path().join("current.csv");
        let previous = dir.path().join("tmp/previous.csv");
        utils::write(&current, "A\n").unwrap();

        rotate(&current, &previous).unwrap();

        assert!(!current.exists());
        assert_eq!(utils::read_to_string(&previous).unwrap(), "A\n");
    }

    #[test]
    fn test_seed() {
        let dir = TempDir::new().unwrap();
        let current = dir.path().join("current.csv");

        assert!(seed(&current).unwrap());
        assert_eq!(utils::read_to_string(&current).unwrap(), "");

        utils::write(&current, "A\n").unwrap();
        assert!(!seed(&current).unwrap());
        assert_eq!(utils::read_to_string(&current).unwrap(), "A\n");
    }

    #[test]
    fn test_read_malformed_snapshot() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("current.csv");
        utils::write(&path, "a\0b\0c\0d\0e\0f\nnot a row\n").unwrap();

        let error = Snapshot::read_from(&path).expect_err("second line is malformed");

        assert!(matches!(error, SnapshotError::Malformed { line: 2, .. }));
    }
}
