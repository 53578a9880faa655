//! pocketgtd - a small Getting-Things-Done task list
//!
//! Tasks are free text that may carry a `<project>` tag and a `[context]`
//! tag. Tags are extracted by the [`tagger`] and stored as linked records in
//! a local SQLite database.
//!
//! # Modules
//!
//! * [`tagger`] - Tag extraction from raw task text
//! * [`tracker`] - Task operations and relationship maintenance
//! * [`storage`] - Database connection and schema
//! * [`commands`] - Command parsing and dispatch
//! * [`config`] - Application configuration management

/// Command-line definition
pub mod cli;

/// Command parsing and dispatch
pub mod commands;

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// SeaORM entity models for database tables
pub mod entities;

/// File logging setup
pub mod logger;

/// Repository layer for database operations
pub mod repositories;

/// Local storage layer
pub mod storage;

/// Tag extraction for task text
pub mod tagger;

/// Task operations on top of storage
pub mod tracker;

// Re-export entity models for convenient access
pub use entities::{context, project, task};
