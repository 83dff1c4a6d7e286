/// All domain errors for Stratus.
///
/// Each variant carries the project/application/environment context needed
/// to act on the failure without a debugger.
#[derive(Debug, thiserror::Error)]
pub enum StratusError {
    #[error(
        "Project '{name}' not found\n\n  \
         Available projects: {available}\n  \
         Check .stratus/directory.toml for project definitions."
    )]
    ProjectNotFound { name: String, available: String },

    #[error(
        "Application '{name}' not found in project '{project}'\n\n  \
         Run with a different --app, or add the application to \
         .stratus/directory.toml."
    )]
    ApplicationNotFound { project: String, name: String },

    #[error(
        "Environment '{name}' not found in project '{project}'\n\n  \
         Available environments: {available}\n  \
         Check .stratus/directory.toml for environment definitions."
    )]
    EnvironmentNotFound {
        project: String,
        name: String,
        available: String,
    },

    #[error(
        "No manifest found for application '{application}'\n\n  \
         Expected {path}\n  \
         Create one first, or check that --workspace points at the right directory."
    )]
    ManifestNotFound { application: String, path: String },

    #[error("Invalid {field}: {detail}")]
    Validation { field: String, detail: String },

    #[error("Input error: {detail}")]
    Input { detail: String },

    #[error(
        "Provisioning {resource} failed for environment '{environment}': {reason}\n\n  \
         Resources created for earlier environments in this run are NOT rolled back,\n  \
         and the manifest was NOT updated. Creation is keyed deterministically, so\n  \
         re-running the command updates completed environments in place rather than\n  \
         duplicating them."
    )]
    Provisioning {
        resource: String,
        environment: String,
        reason: String,
    },

    #[error(
        "Could not persist the manifest for '{application}': {reason}\n\n  \
         External resources created during this run already exist and are NOT\n  \
         rolled back. Re-run the command once the manifest is writable."
    )]
    Persistence { application: String, reason: String },

    #[error(
        "Provisioning of {resource} was cancelled\n\n  \
         Environments already provisioned in this run keep their resources;\n  \
         the manifest was not updated."
    )]
    Cancelled { resource: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StratusError>;
