use serde::{Deserialize, Serialize};

/// Workflows that get recorded in the provisioning history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunAction {
    DatabaseCreate,
    SecretAdd,
}

/// A single entry in the provisioning history (JSON lines format).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub action: RunAction,
    pub project: String,
    pub application: String,
    /// Database or secret name, as supplied by the user.
    pub resource: String,
    /// Environments touched by the run, in provisioning order.
    pub environments: Vec<String>,
    pub detail: Option<String>,
}
