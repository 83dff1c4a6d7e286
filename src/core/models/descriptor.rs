use serde::{Deserialize, Serialize};

/// A project: the top-level grouping of applications and environments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
}

/// A deployable application within a project. Each application owns
/// exactly one manifest document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub project: String,
    pub name: String,
}

/// A named deployment target with its own resource instances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    pub project: String,
    pub name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub prod: bool,
}
