//! Command-line definition.

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "pocketgtd",
    version,
    about = "A small Getting-Things-Done task list",
    after_help = "Commands:\n  \
        setup_db            create the database schema\n  \
        + <text>            add a task; <project> and [context] tags are recognized\n  \
        @                   list all tasks\n  \
        @p <project>        list tasks for a project\n  \
        @c <context>        list tasks for a context\n  \
        - <id>              remove a task\n  \
        dump [file]         print bare descriptions, or write them to a file\n  \
        import <file>       add one untagged task per line of a file\n  \
        destroy             remove every task, project and context"
)]
pub struct Cli {
    /// Database file to use instead of the configured one
    #[arg(long, env = "POCKETGTD_DB")]
    pub db: Option<String>,

    /// Configuration file to load
    #[arg(long)]
    pub config: Option<String>,

    /// Write a default configuration file and exit
    #[arg(long)]
    pub init_config: bool,

    /// Command followed by its arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_tokens_are_kept_verbatim() {
        let cli = Cli::parse_from(["pocketgtd", "--db", "t.db", "+", "buy", "milk", "[errand]"]);
        assert_eq!(cli.db.as_deref(), Some("t.db"));
        assert_eq!(cli.command, vec!["+", "buy", "milk", "[errand]"]);
    }

    #[test]
    fn test_hyphen_command_is_not_a_flag() {
        let cli = Cli::parse_from(["pocketgtd", "-", "3"]);
        assert_eq!(cli.command, vec!["-", "3"]);
    }
}
