use std::path::Path;

use serde::Deserialize;

use crate::core::errors::{Result, StratusError};
use crate::core::models::descriptor::{Application, Environment, Project};
use crate::core::traits::directory::{ApplicationReader, EnvironmentReader, ProjectReader};

/// Read-only directory of projects, applications and environments,
/// loaded from `.stratus/directory.toml`.
///
/// Array order in the file is authoritative: `list_environments` returns
/// environments exactly as written, and that order is the provisioning
/// order.
///
/// Example:
/// ```toml
/// [[projects]]
/// name = "dw-run"
///
/// [[projects.applications]]
/// name = "frontend"
///
/// [[projects.environments]]
/// name = "test"
/// region = "us-west-2"
///
/// [[projects.environments]]
/// name = "prod"
/// region = "us-east-1"
/// prod = true
/// ```
#[derive(Debug)]
pub struct TomlDirectory {
    projects: Vec<ProjectEntry>,
}

#[derive(Debug, Deserialize)]
struct DirectoryFile {
    #[serde(default)]
    projects: Vec<ProjectEntry>,
}

#[derive(Debug, Deserialize)]
struct ProjectEntry {
    name: String,
    #[serde(default)]
    applications: Vec<ApplicationEntry>,
    #[serde(default)]
    environments: Vec<EnvironmentEntry>,
}

#[derive(Debug, Deserialize)]
struct ApplicationEntry {
    name: String,
}

#[derive(Debug, Deserialize)]
struct EnvironmentEntry {
    name: String,
    #[serde(default)]
    region: String,
    #[serde(default)]
    prod: bool,
}

impl TomlDirectory {
    /// Load the directory from `{stratus_dir}/directory.toml`.
    ///
    /// Validates every project, application and environment name after
    /// parsing, so a malformed directory fails on load rather than in
    /// the middle of a provisioning run.
    pub fn load(stratus_dir: &Path) -> Result<Self> {
        let path = stratus_dir.join("directory.toml");
        if !path.exists() {
            return Err(StratusError::Validation {
                field: "workspace".into(),
                detail: format!(
                    "{} not found. Create it to define projects, applications and environments.",
                    path.display()
                ),
            });
        }

        let content = std::fs::read_to_string(&path)?;
        let file: DirectoryFile =
            toml::from_str(&content).map_err(|e| StratusError::Validation {
                field: "directory".into(),
                detail: format!("Failed to parse {}: {e}", path.display()),
            })?;

        for project in &file.projects {
            crate::cli::context::validate_name(&project.name, "project name")?;
            for app in &project.applications {
                crate::cli::context::validate_name(&app.name, "application name")?;
            }
            for env in &project.environments {
                crate::cli::context::validate_name(&env.name, "environment name")?;
            }
        }

        Ok(Self {
            projects: file.projects,
        })
    }

    fn project_entry(&self, name: &str) -> Result<&ProjectEntry> {
        self.projects
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| StratusError::ProjectNotFound {
                name: name.to_string(),
                available: join_names(self.projects.iter().map(|p| p.name.as_str())),
            })
    }
}

fn join_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    let joined = names.collect::<Vec<_>>().join(", ");
    if joined.is_empty() { "(none)".to_string() } else { joined }
}

impl ProjectReader for TomlDirectory {
    fn get_project(&self, name: &str) -> Result<Project> {
        self.project_entry(name).map(|p| Project {
            name: p.name.clone(),
        })
    }

    fn list_projects(&self) -> Result<Vec<Project>> {
        Ok(self
            .projects
            .iter()
            .map(|p| Project {
                name: p.name.clone(),
            })
            .collect())
    }
}

impl ApplicationReader for TomlDirectory {
    fn get_application(&self, project: &str, name: &str) -> Result<Application> {
        let entry = self.project_entry(project)?;
        entry
            .applications
            .iter()
            .find(|a| a.name == name)
            .map(|a| Application {
                project: project.to_string(),
                name: a.name.clone(),
            })
            .ok_or_else(|| StratusError::ApplicationNotFound {
                project: project.to_string(),
                name: name.to_string(),
            })
    }

    fn list_applications(&self, project: &str) -> Result<Vec<Application>> {
        let entry = self.project_entry(project)?;
        Ok(entry
            .applications
            .iter()
            .map(|a| Application {
                project: project.to_string(),
                name: a.name.clone(),
            })
            .collect())
    }
}

impl EnvironmentReader for TomlDirectory {
    fn get_environment(&self, project: &str, name: &str) -> Result<Environment> {
        let entry = self.project_entry(project)?;
        entry
            .environments
            .iter()
            .find(|e| e.name == name)
            .map(|e| Environment {
                project: project.to_string(),
                name: e.name.clone(),
                region: e.region.clone(),
                prod: e.prod,
            })
            .ok_or_else(|| StratusError::EnvironmentNotFound {
                project: project.to_string(),
                name: name.to_string(),
                available: join_names(entry.environments.iter().map(|e| e.name.as_str())),
            })
    }

    fn list_environments(&self, project: &str) -> Result<Vec<Environment>> {
        let entry = self.project_entry(project)?;
        Ok(entry
            .environments
            .iter()
            .map(|e| Environment {
                project: project.to_string(),
                name: e.name.clone(),
                region: e.region.clone(),
                prod: e.prod,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[[projects]]
name = "dw-run"

[[projects.applications]]
name = "frontend"

[[projects.environments]]
name = "test"
region = "us-west-2"

[[projects.environments]]
name = "prod"
region = "us-east-1"
prod = true
"#;

    fn load_sample() -> (tempfile::TempDir, TomlDirectory) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("directory.toml"), SAMPLE).unwrap();
        let directory = TomlDirectory::load(dir.path()).unwrap();
        (dir, directory)
    }

    #[test]
    fn missing_file_fails_with_hint() {
        let dir = tempfile::tempdir().unwrap();

        let err = TomlDirectory::load(dir.path()).unwrap_err();

        assert!(err.to_string().contains("directory.toml"));
    }

    #[test]
    fn get_project_and_application() {
        let (_dir, directory) = load_sample();

        assert_eq!(directory.get_project("dw-run").unwrap().name, "dw-run");
        let app = directory.get_application("dw-run", "frontend").unwrap();
        assert_eq!(app.project, "dw-run");
        assert_eq!(app.name, "frontend");
    }

    #[test]
    fn unknown_project_lists_available() {
        let (_dir, directory) = load_sample();

        let err = directory.get_project("nope").unwrap_err();

        assert!(err.to_string().contains("dw-run"));
    }

    #[test]
    fn unknown_environment_lists_available() {
        let (_dir, directory) = load_sample();

        let err = directory.get_environment("dw-run", "staging").unwrap_err();

        assert!(err.to_string().contains("test, prod"));
    }

    #[test]
    fn environments_keep_file_order() {
        let (_dir, directory) = load_sample();

        let envs = directory.list_environments("dw-run").unwrap();

        let names: Vec<_> = envs.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["test", "prod"]);
        assert!(envs[1].prod);
        assert_eq!(envs[0].region, "us-west-2");
    }

    #[test]
    fn invalid_name_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("directory.toml"),
            "[[projects]]\nname = \"Bad Name!\"\n",
        )
        .unwrap();

        assert!(TomlDirectory::load(dir.path()).is_err());
    }
}
