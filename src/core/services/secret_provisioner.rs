use crate::core::errors::{Result, StratusError};
use crate::core::models::resource::secret_reference;
use crate::core::traits::gateway::SecretCreator;
use crate::core::traits::manifest_store::ManifestStore;

/// Stores one secret and records its reference in the application's
/// manifest.
///
/// Without an environment selector the reference lands in the base
/// secret mapping, visible everywhere; with one, the secret key gets an
/// environment suffix and only that environment's override is touched.
/// The manifest is persisted exactly once, after the secret exists.
pub struct SecretProvisioner<'a> {
    pub secrets: &'a dyn SecretCreator,
    pub store: &'a dyn ManifestStore,
}

impl SecretProvisioner<'_> {
    /// Run the workflow; returns the stored secret's reference key.
    pub fn add(
        &self,
        project: &str,
        application: &str,
        environment: Option<&str>,
        name: &str,
        value: &str,
    ) -> Result<String> {
        let mut manifest = self.store.read(application)?;

        let key = secret_reference(project, application, name, environment);
        self.secrets
            .create_secret(&key, value)
            .map_err(|e| StratusError::Provisioning {
                resource: format!("secret '{name}'"),
                environment: environment.unwrap_or("base").to_string(),
                reason: e.to_string(),
            })?;

        match environment {
            None => manifest.set_base_secret(name, &key),
            Some(env) => manifest.set_environment_secret(env, name, &key),
        }

        self.store.write(application, &manifest)?;

        Ok(key)
    }
}
