use crate::core::errors::Result;
use crate::core::models::manifest::Manifest;

/// Port for loading and persisting manifest documents.
///
/// There is one document per application and it is a shared mutable
/// resource: concurrent workflow runs against the same application are
/// not safe and must be serialized by the caller.
pub trait ManifestStore: Send + Sync {
    /// Load the manifest for an application.
    fn read(&self, application: &str) -> Result<Manifest>;

    /// Persist the manifest for an application, replacing the stored
    /// document.
    fn write(&self, application: &str, manifest: &Manifest) -> Result<()>;
}
