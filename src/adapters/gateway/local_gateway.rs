use std::path::PathBuf;

use serde::Serialize;

use crate::core::errors::{Result, StratusError};
use crate::core::models::resource::{DatabaseEndpoint, DatabaseSpec};
use crate::core::traits::gateway::{DatabaseCreator, SecretCreator};

/// Development and test provisioning backend.
///
/// Records each resource as a JSON document under
/// `.stratus/state/{databases,secrets}/` and synthesizes connection
/// identifiers deterministically from the provisioning key, so re-runs
/// update the same document in place. Secret values are stored in the
/// clear; real secret stores are a different gateway implementation.
pub struct LocalGateway {
    state_dir: PathBuf,
}

#[derive(Serialize)]
struct DatabaseRecord<'a> {
    cluster_identifier: &'a str,
    database_name: &'a str,
    engine: &'a str,
    username: &'a str,
    min_capacity: u32,
    max_capacity: u32,
    backup_retention_days: u32,
    endpoint: &'a str,
    port: u16,
}

#[derive(Serialize)]
struct SecretRecord<'a> {
    key: &'a str,
    value: &'a str,
}

impl LocalGateway {
    /// Create a gateway writing state under the given directory.
    pub fn new(state_dir: PathBuf) -> Self {
        Self { state_dir }
    }

    fn write_json(&self, dir: &str, file_name: &str, body: &impl Serialize) -> Result<PathBuf> {
        let target_dir = self.state_dir.join(dir);
        std::fs::create_dir_all(&target_dir)?;
        let path = target_dir.join(file_name);
        let content = serde_json::to_string_pretty(body).map_err(|e| StratusError::Validation {
            field: "state record".into(),
            detail: e.to_string(),
        })?;
        std::fs::write(&path, content)?;
        Ok(path)
    }
}

/// Turn a path-like secret key into a flat file name.
fn file_name_for_key(key: &str) -> String {
    format!("{}.json", key.trim_start_matches('/').replace('/', "_"))
}

fn port_for_engine(engine: &str) -> u16 {
    match engine {
        "mysql" => 3306,
        _ => 5432,
    }
}

impl DatabaseCreator for LocalGateway {
    fn create_database(&self, spec: &DatabaseSpec) -> Result<DatabaseEndpoint> {
        let endpoint = DatabaseEndpoint {
            endpoint: format!("{}.cluster.local", spec.cluster_identifier),
            port: port_for_engine(&spec.engine),
        };

        let record = DatabaseRecord {
            cluster_identifier: &spec.cluster_identifier,
            database_name: &spec.database_name,
            engine: &spec.engine,
            username: &spec.username,
            min_capacity: spec.min_capacity,
            max_capacity: spec.max_capacity,
            backup_retention_days: spec.backup_retention_days,
            endpoint: &endpoint.endpoint,
            port: endpoint.port,
        };
        self.write_json(
            "databases",
            &format!("{}.json", spec.cluster_identifier),
            &record,
        )?;

        Ok(endpoint)
    }
}

impl SecretCreator for LocalGateway {
    fn create_secret(&self, key: &str, value: &str) -> Result<String> {
        self.write_json("secrets", &file_name_for_key(key), &SecretRecord { key, value })?;
        Ok(key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(engine: &str) -> DatabaseSpec {
        DatabaseSpec {
            cluster_identifier: "dw-run-test-frontend-orders".into(),
            database_name: "orders".into(),
            engine: engine.into(),
            username: "admin".into(),
            password: "s3cret".into(),
            min_capacity: 2,
            max_capacity: 4,
            backup_retention_days: 7,
        }
    }

    #[test]
    fn endpoint_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = LocalGateway::new(dir.path().to_path_buf());

        let first = gateway.create_database(&spec("mysql")).unwrap();
        let second = gateway.create_database(&spec("mysql")).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.endpoint, "dw-run-test-frontend-orders.cluster.local");
    }

    #[test]
    fn port_follows_the_engine() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = LocalGateway::new(dir.path().to_path_buf());

        assert_eq!(gateway.create_database(&spec("mysql")).unwrap().port, 3306);
        assert_eq!(
            gateway.create_database(&spec("postgresql")).unwrap().port,
            5432
        );
    }

    #[test]
    fn create_database_writes_one_state_document() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = LocalGateway::new(dir.path().to_path_buf());

        gateway.create_database(&spec("mysql")).unwrap();
        gateway.create_database(&spec("mysql")).unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path().join("databases"))
            .unwrap()
            .collect();
        assert_eq!(entries.len(), 1, "re-creation overwrites, never duplicates");
    }

    #[test]
    fn create_secret_flattens_the_key() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = LocalGateway::new(dir.path().to_path_buf());

        let reference = gateway
            .create_secret("/stratus/dw-run/applications/frontend/secrets/api-token", "x")
            .unwrap();

        assert_eq!(
            reference,
            "/stratus/dw-run/applications/frontend/secrets/api-token"
        );
        assert!(
            dir.path()
                .join("secrets/stratus_dw-run_applications_frontend_secrets_api-token.json")
                .exists()
        );
    }
}
