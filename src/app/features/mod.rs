pub mod drag;
pub mod launcher;
pub mod navigation;
pub mod ui;
