pub mod yaml_manifest_store;
