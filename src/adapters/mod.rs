pub mod directory;
pub mod gateway;
pub mod history;
pub mod prompt;
pub mod store;
