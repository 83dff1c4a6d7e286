pub mod descriptor;
pub mod manifest;
pub mod resource;
pub mod run_record;
