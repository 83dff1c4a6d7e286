use crate::core::errors::{Result, StratusError};
use crate::core::models::resource::{DatabaseSpec, cluster_identifier, secret_reference};
use crate::core::services::cancel::CancelToken;
use crate::core::traits::directory::EnvironmentReader;
use crate::core::traits::gateway::{DatabaseCreator, SecretCreator};
use crate::core::traits::manifest_store::ManifestStore;

/// Engineering defaults applied to every new cluster.
pub const DEFAULT_MIN_CAPACITY: u32 = 2;
pub const DEFAULT_MAX_CAPACITY: u32 = 4;
pub const DEFAULT_BACKUP_RETENTION_DAYS: u32 = 7;

/// User-supplied fields for a database creation run.
#[derive(Debug, Clone)]
pub struct DatabaseRequest {
    pub database_name: String,
    pub engine: String,
    pub username: String,
    pub password: String,
}

/// One environment's outcome of a database creation run.
#[derive(Debug, Clone, PartialEq)]
pub struct ProvisionedDatabase {
    pub environment: String,
    pub cluster_identifier: String,
    pub endpoint: String,
    pub port: u16,
}

/// Creates a database cluster in every environment of a project and
/// folds the returned identifiers back into the application's manifest.
///
/// Environments are provisioned sequentially, in directory order. The
/// first failure aborts the run: earlier environments keep their
/// external resources (creation is keyed deterministically, so a re-run
/// updates them in place) and the manifest is not persisted. The
/// manifest is written exactly once, after every environment succeeded.
pub struct DatabaseProvisioner<'a> {
    pub environments: &'a dyn EnvironmentReader,
    pub databases: &'a dyn DatabaseCreator,
    pub secrets: &'a dyn SecretCreator,
    pub store: &'a dyn ManifestStore,
}

impl DatabaseProvisioner<'_> {
    /// Run the workflow for one project/application.
    ///
    /// `notify` is called with the environment name as each environment
    /// begins provisioning.
    pub fn provision(
        &self,
        project: &str,
        application: &str,
        request: &DatabaseRequest,
        cancel: &CancelToken,
        mut notify: impl FnMut(&str),
    ) -> Result<Vec<ProvisionedDatabase>> {
        let mut manifest = self.store.read(application)?;
        let environments = self.environments.list_environments(project)?;

        let mut provisioned = Vec::with_capacity(environments.len());
        for environment in &environments {
            if cancel.is_cancelled() {
                return Err(StratusError::Cancelled {
                    resource: format!("database '{}'", request.database_name),
                });
            }
            notify(&environment.name);

            let spec = DatabaseSpec {
                cluster_identifier: cluster_identifier(
                    project,
                    &environment.name,
                    application,
                    &request.database_name,
                ),
                database_name: request.database_name.clone(),
                engine: request.engine.clone(),
                username: request.username.clone(),
                password: request.password.clone(),
                min_capacity: DEFAULT_MIN_CAPACITY,
                max_capacity: DEFAULT_MAX_CAPACITY,
                backup_retention_days: DEFAULT_BACKUP_RETENTION_DAYS,
            };

            let output = self.databases.create_database(&spec).map_err(|e| {
                StratusError::Provisioning {
                    resource: format!("database '{}'", request.database_name),
                    environment: environment.name.clone(),
                    reason: e.to_string(),
                }
            })?;

            // The endpoint differs per environment, the port does not.
            manifest.set_environment_variable(&environment.name, "DB_HOST", &output.endpoint);
            manifest.set_base_variable("DB_PORT", &output.port.to_string());

            provisioned.push(ProvisionedDatabase {
                environment: environment.name.clone(),
                cluster_identifier: spec.cluster_identifier,
                endpoint: output.endpoint,
                port: output.port,
            });
        }

        let password_key = secret_reference(project, application, "database", None);
        self.secrets
            .create_secret(&password_key, &request.password)
            .map_err(|e| StratusError::Provisioning {
                resource: "database password secret".to_string(),
                environment: "base".to_string(),
                reason: e.to_string(),
            })?;

        manifest.set_base_variable("DB_NAME", &request.database_name);
        manifest.set_base_variable("DB_USERNAME", &request.username);
        manifest.set_base_secret("DB_PASSWORD", &password_key);
        manifest.set_database(&request.engine, DEFAULT_MIN_CAPACITY, DEFAULT_MAX_CAPACITY);

        self.store.write(application, &manifest)?;

        Ok(provisioned)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::core::models::descriptor::Environment;
    use crate::core::models::manifest::Manifest;
    use crate::core::models::resource::DatabaseEndpoint;

    struct StaticEnvironments(Vec<&'static str>);

    impl EnvironmentReader for StaticEnvironments {
        fn get_environment(&self, project: &str, name: &str) -> Result<Environment> {
            Ok(Environment {
                project: project.into(),
                name: name.into(),
                region: String::new(),
                prod: false,
            })
        }

        fn list_environments(&self, project: &str) -> Result<Vec<Environment>> {
            Ok(self
                .0
                .iter()
                .map(|name| Environment {
                    project: project.into(),
                    name: (*name).into(),
                    region: String::new(),
                    prod: *name == "prod",
                })
                .collect())
        }
    }

    /// Gateway that records created clusters and can fail on one
    /// environment, matched by cluster identifier suffix.
    #[derive(Default)]
    struct MockGateway {
        created: Mutex<Vec<String>>,
        secrets: Mutex<Vec<(String, String)>>,
        fail_for: Option<&'static str>,
    }

    impl DatabaseCreator for MockGateway {
        fn create_database(&self, spec: &DatabaseSpec) -> Result<DatabaseEndpoint> {
            if let Some(env) = self.fail_for
                && spec.cluster_identifier.contains(env)
            {
                return Err(StratusError::Validation {
                    field: "gateway".into(),
                    detail: "simulated outage".into(),
                });
            }
            self.created
                .lock()
                .unwrap()
                .push(spec.cluster_identifier.clone());
            Ok(DatabaseEndpoint {
                endpoint: format!("{}.cluster.local", spec.cluster_identifier),
                port: 3306,
            })
        }
    }

    impl SecretCreator for MockGateway {
        fn create_secret(&self, key: &str, value: &str) -> Result<String> {
            self.secrets
                .lock()
                .unwrap()
                .push((key.to_string(), value.to_string()));
            Ok(key.to_string())
        }
    }

    /// Store with a fixed manifest, recording every write.
    struct MockStore {
        written: Mutex<Vec<Manifest>>,
    }

    impl MockStore {
        fn new() -> Self {
            Self {
                written: Mutex::new(Vec::new()),
            }
        }
    }

    impl ManifestStore for MockStore {
        fn read(&self, _application: &str) -> Result<Manifest> {
            Ok(Manifest::new("frontend", "Dockerfile", 80))
        }

        fn write(&self, _application: &str, manifest: &Manifest) -> Result<()> {
            self.written.lock().unwrap().push(manifest.clone());
            Ok(())
        }
    }

    fn request() -> DatabaseRequest {
        DatabaseRequest {
            database_name: "orders".into(),
            engine: "mysql".into(),
            username: "admin".into(),
            password: "s3cret".into(),
        }
    }

    #[test]
    fn provisions_every_environment_in_order() {
        let environments = StaticEnvironments(vec!["test", "prod"]);
        let gateway = MockGateway::default();
        let store = MockStore::new();
        let provisioner = DatabaseProvisioner {
            environments: &environments,
            databases: &gateway,
            secrets: &gateway,
            store: &store,
        };
        let mut visited = Vec::new();

        let provisioned = provisioner
            .provision("dw-run", "frontend", &request(), &CancelToken::new(), |e| {
                visited.push(e.to_string())
            })
            .unwrap();

        assert_eq!(visited, vec!["test", "prod"]);
        assert_eq!(provisioned.len(), 2);
        assert_eq!(
            provisioned[0].cluster_identifier,
            "dw-run-test-frontend-orders"
        );
        assert_eq!(
            provisioned[1].cluster_identifier,
            "dw-run-prod-frontend-orders"
        );
    }

    #[test]
    fn writes_identifiers_into_manifest_and_persists_once() {
        let environments = StaticEnvironments(vec!["test", "prod"]);
        let gateway = MockGateway::default();
        let store = MockStore::new();
        let provisioner = DatabaseProvisioner {
            environments: &environments,
            databases: &gateway,
            secrets: &gateway,
            store: &store,
        };

        provisioner
            .provision("dw-run", "frontend", &request(), &CancelToken::new(), |_| {})
            .unwrap();

        let written = store.written.lock().unwrap();
        assert_eq!(written.len(), 1, "manifest persisted exactly once");
        let mft = &written[0];

        // Endpoints land in per-environment overrides.
        assert_eq!(
            mft.environments.get("test").unwrap().variables["DB_HOST"],
            "dw-run-test-frontend-orders.cluster.local"
        );
        assert_eq!(
            mft.environments.get("prod").unwrap().variables["DB_HOST"],
            "dw-run-prod-frontend-orders.cluster.local"
        );

        // Shared values land in the base configuration.
        assert_eq!(mft.base.variables["DB_PORT"], "3306");
        assert_eq!(mft.base.variables["DB_NAME"], "orders");
        assert_eq!(mft.base.variables["DB_USERNAME"], "admin");
        assert_eq!(
            mft.base.secrets["DB_PASSWORD"],
            "/stratus/dw-run/applications/frontend/secrets/database"
        );

        let db = mft.base.database.as_ref().unwrap();
        assert_eq!(db.engine, "mysql");
        assert_eq!(db.min_capacity, DEFAULT_MIN_CAPACITY);
        assert_eq!(db.max_capacity, DEFAULT_MAX_CAPACITY);
    }

    #[test]
    fn stores_the_master_password_as_a_secret() {
        let environments = StaticEnvironments(vec!["test"]);
        let gateway = MockGateway::default();
        let store = MockStore::new();
        let provisioner = DatabaseProvisioner {
            environments: &environments,
            databases: &gateway,
            secrets: &gateway,
            store: &store,
        };

        provisioner
            .provision("dw-run", "frontend", &request(), &CancelToken::new(), |_| {})
            .unwrap();

        let secrets = gateway.secrets.lock().unwrap();
        assert_eq!(secrets.len(), 1);
        assert_eq!(
            secrets[0],
            (
                "/stratus/dw-run/applications/frontend/secrets/database".to_string(),
                "s3cret".to_string()
            )
        );
    }

    #[test]
    fn failure_mid_run_aborts_without_persisting() {
        let environments = StaticEnvironments(vec!["test", "prod"]);
        let gateway = MockGateway {
            fail_for: Some("prod"),
            ..MockGateway::default()
        };
        let store = MockStore::new();
        let provisioner = DatabaseProvisioner {
            environments: &environments,
            databases: &gateway,
            secrets: &gateway,
            store: &store,
        };

        let err = provisioner
            .provision("dw-run", "frontend", &request(), &CancelToken::new(), |_| {})
            .unwrap_err();

        assert!(err.to_string().contains("prod"), "error names the environment");
        // The test environment was provisioned and is not rolled back.
        let created = gateway.created.lock().unwrap();
        assert_eq!(created.as_slice(), ["dw-run-test-frontend-orders"]);
        // The password secret step was never reached.
        assert!(gateway.secrets.lock().unwrap().is_empty());
        // The manifest was never persisted.
        assert!(store.written.lock().unwrap().is_empty());
    }

    #[test]
    fn cancellation_stops_before_the_next_environment() {
        let environments = StaticEnvironments(vec!["test", "prod"]);
        let gateway = MockGateway::default();
        let store = MockStore::new();
        let provisioner = DatabaseProvisioner {
            environments: &environments,
            databases: &gateway,
            secrets: &gateway,
            store: &store,
        };
        let cancel = CancelToken::new();

        // Cancel after the first environment starts.
        let err = provisioner
            .provision("dw-run", "frontend", &request(), &cancel, |_| cancel.cancel())
            .unwrap_err();

        assert!(matches!(err, StratusError::Cancelled { .. }));
        let created = gateway.created.lock().unwrap();
        assert_eq!(
            created.as_slice(),
            ["dw-run-test-frontend-orders"],
            "first environment completed, second never started"
        );
        assert!(store.written.lock().unwrap().is_empty());
    }
}
