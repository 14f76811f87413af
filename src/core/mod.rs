//! Host-side state: configuration, documents, the vault file tree and the
//! workspace of open views

pub mod config;
pub mod document;
pub mod file_system;
pub mod workspace;
