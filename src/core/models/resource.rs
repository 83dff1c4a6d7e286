use serde::{Deserialize, Serialize};

/// Request for one database cluster in one environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseSpec {
    /// Deterministic provisioning key; see [`cluster_identifier`].
    pub cluster_identifier: String,
    pub database_name: String,
    pub engine: String,
    pub username: String,
    pub password: String,
    pub min_capacity: u32,
    pub max_capacity: u32,
    pub backup_retention_days: u32,
}

/// Connection identifiers returned by the gateway for a created cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseEndpoint {
    pub endpoint: String,
    pub port: u16,
}

/// Derive the external identifier for a database cluster.
///
/// A pure function of its inputs: equal inputs always yield an equal
/// identifier, so re-running a workflow updates the same external
/// resource instead of creating a new one.
pub fn cluster_identifier(
    project: &str,
    environment: &str,
    application: &str,
    database_name: &str,
) -> String {
    format!("{project}-{environment}-{application}-{database_name}")
}

/// Derive the path-like reference under which a secret is stored.
///
/// The secret name is lower-cased with underscores converted to hyphens;
/// an environment suffix is appended when the secret is scoped to one
/// environment.
pub fn secret_reference(
    project: &str,
    application: &str,
    secret_name: &str,
    environment: Option<&str>,
) -> String {
    let name = secret_name.to_lowercase().replace('_', "-");
    let key = format!("/stratus/{project}/applications/{application}/secrets/{name}");
    match environment {
        Some(env) => format!("{key}-{env}"),
        None => key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cluster_identifier_is_deterministic() {
        let a = cluster_identifier("dw-run", "test", "frontend", "orders");
        let b = cluster_identifier("dw-run", "test", "frontend", "orders");

        assert_eq!(a, b);
        assert_eq!(a, "dw-run-test-frontend-orders");
    }

    #[test]
    fn cluster_identifier_varies_with_environment() {
        let test = cluster_identifier("dw-run", "test", "frontend", "orders");
        let prod = cluster_identifier("dw-run", "prod", "frontend", "orders");

        assert_ne!(test, prod);
    }

    #[test]
    fn secret_reference_normalizes_name() {
        let key = secret_reference("dw-run", "frontend", "MY_SECRET", None);

        assert_eq!(key, "/stratus/dw-run/applications/frontend/secrets/my-secret");
    }

    #[test]
    fn secret_reference_appends_environment_suffix() {
        let key = secret_reference("dw-run", "frontend", "MY_SECRET", Some("prod"));

        assert_eq!(
            key,
            "/stratus/dw-run/applications/frontend/secrets/my-secret-prod"
        );
    }
}
