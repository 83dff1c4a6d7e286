use crate::core::errors::Result;
use crate::core::models::descriptor::{Application, Environment, Project};

/// Port for looking up projects in the directory.
pub trait ProjectReader: Send + Sync {
    /// Look up one project by name.
    fn get_project(&self, name: &str) -> Result<Project>;

    /// List all known projects.
    fn list_projects(&self) -> Result<Vec<Project>>;
}

/// Port for looking up applications within a project.
pub trait ApplicationReader: Send + Sync {
    /// Look up one application by name.
    fn get_application(&self, project: &str, name: &str) -> Result<Application>;

    /// List all applications of a project.
    fn list_applications(&self, project: &str) -> Result<Vec<Application>>;
}

/// Port for looking up deployment environments within a project.
pub trait EnvironmentReader: Send + Sync {
    /// Look up one environment by name.
    fn get_environment(&self, project: &str, name: &str) -> Result<Environment>;

    /// List a project's environments.
    ///
    /// The returned order is the provisioning order and must be stable
    /// across calls for the same directory contents.
    fn list_environments(&self, project: &str) -> Result<Vec<Environment>>;
}
