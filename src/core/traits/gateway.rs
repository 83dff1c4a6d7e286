use crate::core::errors::Result;
use crate::core::models::resource::{DatabaseEndpoint, DatabaseSpec};

/// Port for creating managed database clusters.
pub trait DatabaseCreator: Send + Sync {
    /// Create or update the cluster identified by `spec.cluster_identifier`
    /// and return its connection identifiers.
    fn create_database(&self, spec: &DatabaseSpec) -> Result<DatabaseEndpoint>;
}

/// Port for storing encrypted secrets.
pub trait SecretCreator: Send + Sync {
    /// Create or update the secret stored under `key`, returning the
    /// reference applications use to fetch it.
    fn create_secret(&self, key: &str, value: &str) -> Result<String>;
}
