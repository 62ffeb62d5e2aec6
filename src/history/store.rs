use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::history::History;
use crate::model::snapshot::Snapshot;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("failed to access history file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("history file {path} is not a valid snapshot list: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode history for {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

// a missing file is an empty history
pub fn load_history(path: &Path) -> Result<History, HistoryError> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "no history file yet; starting empty");
        return Ok(History::new());
    }
    let text = fs::read_to_string(path).map_err(|source| HistoryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let snapshots: Vec<Snapshot> =
        serde_json::from_str(&text).map_err(|source| HistoryError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    let loaded = snapshots.len();
    let history = History::from_snapshots(snapshots);
    if history.len() != loaded {
        tracing::warn!(
            path = %path.display(),
            loaded,
            kept = history.len(),
            "history contained duplicate periods; kept the last entry for each"
        );
    }
    Ok(history)
}

pub fn save_history(history: &History, path: &Path) -> Result<(), HistoryError> {
    let io_err = |source| HistoryError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let file = fs::File::create(path).map_err(io_err)?;
    let mut w = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut w, history.snapshots()).map_err(|source| {
        HistoryError::Encode {
            path: path.to_path_buf(),
            source,
        }
    })?;
    w.write_all(b"\n").map_err(io_err)?;
    w.flush().map_err(io_err)?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/history/store.rs"]
mod tests;
