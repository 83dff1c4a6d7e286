pub mod database_create;
pub mod history_helpers;
pub mod secret_add;
