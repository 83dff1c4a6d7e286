use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Manifest type for a web service fronted by a load balancer.
pub const LOAD_BALANCED_WEB_SERVICE: &str = "Load Balanced Web Service";

/// The configuration document for one application.
///
/// Holds a default (base) configuration plus partial per-environment
/// overrides with the same shape. A zero-valued scalar or an absent
/// substructure in an override always means "inherit from base" -- the
/// document format cannot express "explicitly zero", by design.
///
/// Serialized as `<workspace>/<application>/manifest.yml`. Unknown fields
/// are ignored on read; empty and zero-valued fields are omitted on write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "ImageConfig::is_empty")]
    pub image: ImageConfig,
    #[serde(flatten)]
    pub base: ServiceConfig,
    /// Per-environment overrides, keyed by environment name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub environments: BTreeMap<String, ServiceConfig>,
}

impl Manifest {
    /// Create a manifest with engineering defaults: route everything,
    /// health-check the root path, one small task.
    pub fn new(name: &str, dockerfile: &str, port: u16) -> Self {
        Self {
            name: name.to_string(),
            kind: LOAD_BALANCED_WEB_SERVICE.to_string(),
            image: ImageConfig {
                build: dockerfile.to_string(),
                port,
            },
            base: ServiceConfig {
                http: RoutingRule { path: "*".into() },
                healthcheck: HealthCheck { path: "/".into() },
                cpu: 512,
                memory: 1024,
                count: 1,
                ..ServiceConfig::default()
            },
            environments: BTreeMap::new(),
        }
    }

    /// Resolve the full configuration for one environment.
    ///
    /// Read-only; the returned value shares no state with the manifest.
    pub fn resolve(&self, environment: &str) -> ServiceConfig {
        crate::core::services::overlay::OverlayResolver
            .resolve(&self.base, self.environments.get(environment))
    }

    /// Set a variable in the base configuration, visible to all
    /// environments unless overridden.
    pub fn set_base_variable(&mut self, name: &str, value: &str) {
        self.base.variables.insert(name.to_string(), value.to_string());
    }

    /// Set a secret reference in the base configuration.
    pub fn set_base_secret(&mut self, name: &str, key: &str) {
        self.base.secrets.insert(name.to_string(), key.to_string());
    }

    /// Set a variable in one environment's override, creating the
    /// override entry on first write.
    pub fn set_environment_variable(&mut self, environment: &str, name: &str, value: &str) {
        self.environments
            .entry(environment.to_string())
            .or_default()
            .variables
            .insert(name.to_string(), value.to_string());
    }

    /// Set a secret reference in one environment's override, creating
    /// the override entry on first write.
    pub fn set_environment_secret(&mut self, environment: &str, name: &str, key: &str) {
        self.environments
            .entry(environment.to_string())
            .or_default()
            .secrets
            .insert(name.to_string(), key.to_string());
    }

    /// Record the database parameters in the base configuration,
    /// creating the substructure on first write.
    pub fn set_database(&mut self, engine: &str, min_capacity: u32, max_capacity: u32) {
        let database = self.base.database.get_or_insert_with(DatabaseConfig::default);
        database.engine = engine.to_string();
        database.min_capacity = min_capacity;
        database.max_capacity = max_capacity;
    }
}

/// Container image with the port the service listens on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageConfig {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub build: String,
    #[serde(default, skip_serializing_if = "is_zero_u16")]
    pub port: u16,
}

impl ImageConfig {
    pub fn is_empty(&self) -> bool {
        self.build.is_empty() && self.port == 0
    }
}

/// One layer of service configuration.
///
/// Used both as the base configuration and as a partial per-environment
/// override. In an override, zero/empty means "inherit".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default, skip_serializing_if = "RoutingRule::is_empty")]
    pub http: RoutingRule,
    #[serde(default, skip_serializing_if = "HealthCheck::is_empty")]
    pub healthcheck: HealthCheck,
    #[serde(default, skip_serializing_if = "is_zero_u32")]
    pub cpu: u32,
    #[serde(default, skip_serializing_if = "is_zero_u32")]
    pub memory: u32,
    #[serde(default, skip_serializing_if = "is_zero_u32")]
    pub count: u32,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub variables: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub secrets: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<DatabaseConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaling: Option<AutoScalingConfig>,
}

/// The path pattern routed to the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutingRule {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub path: String,
}

impl RoutingRule {
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

/// Health check endpoint for the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthCheck {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub path: String,
}

impl HealthCheck {
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

/// Capacity boundaries for the backing database cluster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub engine: String,
    #[serde(rename = "minCapacity", default, skip_serializing_if = "is_zero_u32")]
    pub min_capacity: u32,
    #[serde(rename = "maxCapacity", default, skip_serializing_if = "is_zero_u32")]
    pub max_capacity: u32,
}

/// Target-tracking autoscaling boundaries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AutoScalingConfig {
    #[serde(rename = "minCount", default, skip_serializing_if = "is_zero_u32")]
    pub min_count: u32,
    #[serde(rename = "maxCount", default, skip_serializing_if = "is_zero_u32")]
    pub max_count: u32,
    #[serde(rename = "targetCPU", default, skip_serializing_if = "is_zero_f64")]
    pub target_cpu: f64,
    #[serde(rename = "targetMemory", default, skip_serializing_if = "is_zero_f64")]
    pub target_memory: f64,
}

fn is_zero_u32(n: &u32) -> bool {
    *n == 0
}

fn is_zero_u16(n: &u16) -> bool {
    *n == 0
}

fn is_zero_f64(n: &f64) -> bool {
    *n == 0.0
}
