use std::path::{Path, PathBuf};

use crate::core::errors::{Result, StratusError};
use crate::core::models::manifest::Manifest;
use crate::core::traits::manifest_store::ManifestStore;

/// Manifest store backed by one YAML file per application, at
/// `<workspace>/<application>/manifest.yml`.
pub struct YamlManifestStore {
    root: PathBuf,
}

impl YamlManifestStore {
    /// Create a store rooted at the workspace directory.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Path of the manifest file for an application.
    pub fn manifest_path(&self, application: &str) -> PathBuf {
        self.root.join(application).join("manifest.yml")
    }
}

impl ManifestStore for YamlManifestStore {
    fn read(&self, application: &str) -> Result<Manifest> {
        let path = self.manifest_path(application);
        if !path.exists() {
            return Err(StratusError::ManifestNotFound {
                application: application.to_string(),
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(&path)?;
        serde_yaml::from_str(&content).map_err(|e| StratusError::Validation {
            field: "manifest".into(),
            detail: format!("Failed to parse {}: {e}", path.display()),
        })
    }

    fn write(&self, application: &str, manifest: &Manifest) -> Result<()> {
        let path = self.manifest_path(application);
        if let Some(parent) = path.parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| persistence(application, &path, e))?;
        }

        let content =
            serde_yaml::to_string(manifest).map_err(|e| StratusError::Persistence {
                application: application.to_string(),
                reason: format!("serializing manifest: {e}"),
            })?;

        std::fs::write(&path, content).map_err(|e| persistence(application, &path, e))
    }
}

fn persistence(application: &str, path: &Path, e: std::io::Error) -> StratusError {
    StratusError::Persistence {
        application: application.to_string(),
        reason: format!("writing {}: {e}", path.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_missing_manifest_names_the_expected_path() {
        let dir = tempfile::tempdir().unwrap();
        let store = YamlManifestStore::new(dir.path().to_path_buf());

        let err = store.read("frontend").unwrap_err();

        assert!(matches!(err, StratusError::ManifestNotFound { .. }));
        assert!(err.to_string().contains("manifest.yml"));
    }

    #[test]
    fn write_then_read_preserves_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let store = YamlManifestStore::new(dir.path().to_path_buf());

        let mut mft = Manifest::new("frontend", "Dockerfile", 80);
        mft.set_environment_variable("prod", "DB_HOST", "prod-db");
        store.write("frontend", &mft).unwrap();

        let loaded = store.read("frontend").unwrap();
        assert_eq!(loaded, mft);
    }

    #[test]
    fn write_creates_the_application_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = YamlManifestStore::new(dir.path().to_path_buf());

        store
            .write("frontend", &Manifest::new("frontend", "Dockerfile", 80))
            .unwrap();

        assert!(dir.path().join("frontend/manifest.yml").exists());
    }

    #[test]
    fn read_tolerates_unknown_fields() {
        let dir = tempfile::tempdir().unwrap();
        let store = YamlManifestStore::new(dir.path().to_path_buf());
        std::fs::create_dir_all(dir.path().join("frontend")).unwrap();
        std::fs::write(
            dir.path().join("frontend/manifest.yml"),
            "name: frontend\ntype: Load Balanced Web Service\ncpu: 256\nfuture_field: ignored\n",
        )
        .unwrap();

        let mft = store.read("frontend").unwrap();

        assert_eq!(mft.base.cpu, 256);
    }
}
