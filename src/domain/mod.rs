pub mod host;
pub mod launcher;
pub mod models;
pub mod mutations;
pub mod reorder;
pub mod settings;
pub mod store;
pub mod tree;
