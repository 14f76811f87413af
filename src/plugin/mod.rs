//! Plugin system: host-facing API, persistent storage, the manager and the
//! built-in plugins

pub mod api;
pub mod force_read;
pub mod manager;
pub mod storage;

#[cfg(test)]
pub mod testing;
