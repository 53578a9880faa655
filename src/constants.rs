//! Constants used throughout the application
//!
//! User-facing messages and default names live here so the command layer and
//! its tests agree on the exact text.

/// Printed by `@` when there are no tasks. The trailing newline is part of the message.
pub const EMPTY_LIST_MESSAGE: &str = "Looks like you have nothing to do.\n";

/// Printed for any command token that is not recognized.
pub const UNKNOWN_COMMAND_MESSAGE: &str = "Que?";

// Application naming
pub const APP_NAME: &str = "pocketgtd";
pub const CONFIG_FILE_NAME: &str = "pocketgtd.toml";
pub const DATABASE_FILE_NAME: &str = "pocketgtd.db";
pub const LOG_FILE_NAME: &str = "pocketgtd.log";

pub const CONFIG_GENERATED: &str = "✅ Generated default configuration file";
