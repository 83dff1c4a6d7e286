use crate::core::errors::Result;
use crate::core::models::run_record::RunRecord;

/// Port for recording completed provisioning runs.
pub trait HistorySink: Send + Sync {
    /// Append a record to the history.
    fn record(&self, record: &RunRecord) -> Result<()>;
}
