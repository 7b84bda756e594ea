pub mod command_tree;
pub mod footer;
pub mod header;
pub mod modals;
