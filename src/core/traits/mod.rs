pub mod directory;
pub mod gateway;
pub mod history;
pub mod manifest_store;
pub mod prompter;
