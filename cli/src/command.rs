//! Subcommands and their execution against a `Session`.

use std::io::{BufRead, Write};

use anyhow::{bail, Result};
use clap::Subcommand;

use todo_core::TodoId;

use crate::render;
use crate::session::Session;
use crate::transport::Transport;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show every todo
    List,
    /// Show one todo
    Show { id: TodoId },
    /// Create a todo
    Add {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Delete a todo
    Delete {
        id: TodoId,
        /// Skip the confirmation prompt
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
}

/// Loads the list, then runs `command`. Prompts go to `out`, answers come from `input`.
pub fn run<T: Transport>(
    session: &mut Session<T>,
    command: Command,
    out: &mut impl Write,
    input: &mut impl BufRead,
) -> Result<()> {
    session.load()?;

    match command {
        Command::List => write!(out, "{}", render::table(session.state()))?,
        Command::Show { id } => match session.state().get(id) {
            Some(todo) => write!(out, "{}", render::detail(todo))?,
            None => bail!("no todo with id {id}"),
        },
        Command::Add { title, description } => {
            match session.create(&title, &description)? {
                Some(todo) => writeln!(out, "created #{}", todo.id)?,
                None => bail!("title must not be empty"),
            }
            write!(out, "{}", render::table(session.state()))?;
        }
        Command::Delete { id, yes } => {
            session.select_for_delete(id)?;
            let prompt = format!("Delete todo {id}? This cannot be undone. [y/N] ");
            if !yes && !confirm(&prompt, out, input)? {
                session.cancel_delete();
                writeln!(out, "cancelled")?;
                return Ok(());
            }
            if let Some(id) = session.confirm_delete()? {
                writeln!(out, "deleted #{id}")?;
            }
            write!(out, "{}", render::table(session.state()))?;
        }
    }
    Ok(())
}

fn confirm(prompt: &str, out: &mut impl Write, input: &mut impl BufRead) -> Result<bool> {
    out.write_all(prompt.as_bytes())?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}
