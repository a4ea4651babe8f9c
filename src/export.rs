//! CSV export of the log table.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::ExportError;
use crate::monitor::LogEntry;

/// First line of every exported file
pub const CSV_HEADER: &str = "Heure,Température";

/// What an export request ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// No destination was chosen
    Cancelled,
    Written { path: PathBuf, rows: usize },
}

/// Write the header and one line per entry, using the displayed strings
pub fn write_csv<W: Write>(mut out: W, entries: &[LogEntry]) -> std::io::Result<()> {
    writeln!(out, "{}", CSV_HEADER)?;
    for entry in entries {
        writeln!(out, "{},{}", entry.time, entry.temperature)?;
    }
    out.flush()
}

/// Export `entries` to `destination`, overwriting any existing file.
///
/// `None` is a cancelled choice and touches nothing.
pub fn export_csv(
    destination: Option<&Path>,
    entries: &[LogEntry],
) -> Result<ExportOutcome, ExportError> {
    let Some(path) = destination else {
        tracing::debug!("export cancelled");
        return Ok(ExportOutcome::Cancelled);
    };

    let file = File::create(path).map_err(|source| ExportError::CreateFailed {
        path: path.to_path_buf(),
        source,
    })?;

    write_csv(BufWriter::new(file), entries).map_err(|source| ExportError::WriteFailed {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(path = %path.display(), rows = entries.len(), "log exported");
    Ok(ExportOutcome::Written {
        path: path.to_path_buf(),
        rows: entries.len(),
    })
}
