//! UI components

pub mod command_palette;
pub mod editor;
pub mod file_tree;
pub mod notice;
pub mod preview;
pub mod settings;
pub mod tabs;
