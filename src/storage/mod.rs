//! Local storage module for task data persistence
//!
//! This module owns the SQLite connection (through SeaORM) and the schema for:
//! - Tasks
//! - Projects
//! - Contexts

pub mod db;

pub use db::{LocalStorage, MEMORY_LOCATION};
