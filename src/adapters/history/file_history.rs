use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::core::errors::{Result, StratusError};
use crate::core::models::run_record::RunRecord;
use crate::core::traits::history::HistorySink;

/// History sink that appends records as JSON lines to a file.
///
/// Each line is one self-contained `RunRecord` object, so appends are
/// cheap and the file can be inspected with standard line tools.
pub struct FileHistory {
    log_path: PathBuf,
}

impl FileHistory {
    /// Create a sink writing to `{stratus_dir}/history.log`.
    pub fn new(stratus_dir: &Path) -> Self {
        Self {
            log_path: stratus_dir.join("history.log"),
        }
    }
}

impl HistorySink for FileHistory {
    fn record(&self, record: &RunRecord) -> Result<()> {
        let line = serde_json::to_string(record).map_err(|e| StratusError::Persistence {
            application: record.application.clone(),
            reason: format!("serializing history record: {e}"),
        })?;

        if let Some(parent) = self.log_path.parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;
        writeln!(file, "{line}")?;

        Ok(())
    }
}
