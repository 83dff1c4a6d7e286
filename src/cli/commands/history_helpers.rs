use chrono::Utc;

use crate::adapters::history::file_history::FileHistory;
use crate::cli::output;
use crate::core::models::run_record::{RunAction, RunRecord};
use crate::core::traits::history::HistorySink;

/// Record a completed provisioning run. Warns on failure instead of
/// propagating the error, since history should not block the workflow.
pub fn record_run(
    action: RunAction,
    project: &str,
    application: &str,
    resource: &str,
    environments: Vec<String>,
    detail: Option<String>,
) {
    let history = FileHistory::new(&crate::cli::context::stratus_dir());

    let record = RunRecord {
        timestamp: Utc::now(),
        action,
        project: project.to_string(),
        application: application.to_string(),
        resource: resource.to_string(),
        environments,
        detail,
    };

    if let Err(e) = history.record(&record) {
        output::warning(&format!("Could not write history: {e}"));
    }
}
