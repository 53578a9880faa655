//! Command dispatch.
//!
//! A command arrives as a list of tokens, `[command, arg...]`, and is parsed
//! into a closed [`Command`] before anything touches storage.

use std::io::Write;

use anyhow::Result;
use log::debug;

use crate::constants::{EMPTY_LIST_MESSAGE, UNKNOWN_COMMAND_MESSAGE};
use crate::tracker::{Tracker, TrackerError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetupDb,
    Add(String),
    List,
    ListProject(String),
    ListContext(String),
    Remove(i32),
    Dump(Option<String>),
    Destroy,
    Import(Option<String>),
    Unknown(String),
}

impl Command {
    /// Parse command tokens. Anything unrecognized becomes [`Command::Unknown`].
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Self {
        let Some((name, args)) = tokens.split_first() else {
            return Self::List;
        };
        let rest = || args.iter().map(|arg| arg.as_ref()).collect::<Vec<&str>>().join(" ");
        let first = || args.first().map(|arg| arg.as_ref().to_string());

        match name.as_ref() {
            "setup_db" => Self::SetupDb,
            "+" => Self::Add(rest()),
            "@" => Self::List,
            "@p" => Self::ListProject(rest()),
            "@c" => Self::ListContext(rest()),
            "-" => Self::Remove(first().as_deref().map(coerce_id).unwrap_or(0)),
            "dump" => Self::Dump(first()),
            "destroy" => Self::Destroy,
            "import" => Self::Import(first()),
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// Lenient integer parse: optional sign, then leading digits. Anything else is 0.
pub fn coerce_id(arg: &str) -> i32 {
    let trimmed = arg.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits.find(|c: char| !c.is_ascii_digit()).unwrap_or(digits.len());
    digits[..end].parse::<i32>().map(|n| sign * n).unwrap_or(0)
}

/// Run one command against the tracker, writing user-facing output to `out`.
pub async fn execute<W: Write>(tracker: &Tracker, command: Command, out: &mut W) -> Result<()> {
    debug!("Executing {:?}", command);
    match command {
        Command::SetupDb => tracker.setup_schema().await?,
        Command::Add(text) => {
            tracker.add_task(&text).await?;
        }
        Command::List => {
            let tasks = tracker.list_tasks().await?;
            if tasks.is_empty() {
                write!(out, "{}", EMPTY_LIST_MESSAGE)?;
            } else {
                write_lines(out, &tasks)?;
            }
        }
        Command::ListProject(name) => {
            let result = tracker.list_tasks_for_project(&name).await;
            write_lookup(out, &name, result)?;
        }
        Command::ListContext(name) => {
            let result = tracker.list_tasks_for_context(&name).await;
            write_lookup(out, &name, result)?;
        }
        Command::Remove(id) => tracker.remove_task(id).await?,
        Command::Dump(Some(path)) => {
            tracker.dump_to_file(&path).await?;
        }
        Command::Dump(None) => {
            let descriptions = tracker.dump().await?;
            write_lines(out, &descriptions)?;
        }
        Command::Destroy => tracker.destroy_all().await?,
        Command::Import(path) => {
            let path = path.ok_or_else(|| {
                TrackerError::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "import needs a file to read",
                ))
            })?;
            tracker.import_file(&path).await?;
        }
        Command::Unknown(_) => writeln!(out, "{}", UNKNOWN_COMMAND_MESSAGE)?,
    }
    Ok(())
}

fn write_lookup<W: Write>(out: &mut W, name: &str, result: Result<Vec<String>, TrackerError>) -> Result<()> {
    match result {
        Ok(lines) => write_lines(out, &lines),
        Err(e) if e.is_not_found() => {
            debug!("{}", e);
            writeln!(out, "Got nothing for {}", name)?;
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn write_lines<W: Write>(out: &mut W, lines: &[String]) -> Result<()> {
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}
