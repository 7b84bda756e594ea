pub mod clipboard;
pub mod files;
pub mod settings_file;
