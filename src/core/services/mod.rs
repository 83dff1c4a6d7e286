pub mod cancel;
pub mod database_provisioner;
pub mod overlay;
pub mod secret_provisioner;
