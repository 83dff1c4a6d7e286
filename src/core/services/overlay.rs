use crate::core::models::manifest::{AutoScalingConfig, DatabaseConfig, ServiceConfig};

/// Merges a base configuration with one environment's partial override
/// into a fully resolved configuration.
///
/// The merge is a pure structural transform with no error outcomes:
/// - scalar fields: a non-zero override value wins, zero inherits;
/// - mapping fields: override keys are written over base keys one by
///   one, base-only keys are preserved;
/// - optional substructures: absent inherits wholesale, present merges
///   field-by-field (synthesized from scratch when base has none).
///
/// Neither input is mutated and the result shares no state with either.
pub struct OverlayResolver;

impl OverlayResolver {
    /// Resolve `base` with the override for one environment, if any.
    pub fn resolve(&self, base: &ServiceConfig, overlay: Option<&ServiceConfig>) -> ServiceConfig {
        let mut conf = base.clone();

        let Some(target) = overlay else {
            return conf;
        };

        if !target.http.path.is_empty() {
            conf.http.path = target.http.path.clone();
        }
        if !target.healthcheck.path.is_empty() {
            conf.healthcheck.path = target.healthcheck.path.clone();
        }
        if target.cpu != 0 {
            conf.cpu = target.cpu;
        }
        if target.memory != 0 {
            conf.memory = target.memory;
        }
        if target.count != 0 {
            conf.count = target.count;
        }

        for (name, value) in &target.variables {
            conf.variables.insert(name.clone(), value.clone());
        }
        for (name, key) in &target.secrets {
            conf.secrets.insert(name.clone(), key.clone());
        }

        if let Some(scaling) = &target.scaling {
            let merged = conf.scaling.get_or_insert_with(AutoScalingConfig::default);
            if scaling.min_count != 0 {
                merged.min_count = scaling.min_count;
            }
            if scaling.max_count != 0 {
                merged.max_count = scaling.max_count;
            }
            if scaling.target_cpu != 0.0 {
                merged.target_cpu = scaling.target_cpu;
            }
            if scaling.target_memory != 0.0 {
                merged.target_memory = scaling.target_memory;
            }
        }

        if let Some(database) = &target.database {
            let merged = conf.database.get_or_insert_with(DatabaseConfig::default);
            if !database.engine.is_empty() {
                merged.engine = database.engine.clone();
            }
            if database.min_capacity != 0 {
                merged.min_capacity = database.min_capacity;
            }
            if database.max_capacity != 0 {
                merged.max_capacity = database.max_capacity;
            }
        }

        conf
    }
}
