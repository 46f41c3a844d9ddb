use std::io;

use anyhow::{bail, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use todo_core::{ClearPolicy, TodoClient, TodoListController};
use todo_cli::{command, render, Command, Session, UreqTransport};

#[derive(Parser, Debug)]
#[command(author, version, about = "Manage a remote to-do list", long_about = None)]
struct Args {
    /// Base URL of the todo service
    #[arg(long, env = "TODO_API_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    /// Keep the draft and selection until the server confirms
    #[arg(long, default_value_t = false)]
    clear_on_success: bool,

    /// Log debug output (RUST_LOG overrides)
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let policy = if args.clear_on_success {
        ClearPolicy::OnSuccess
    } else {
        ClearPolicy::OnInvoke
    };
    let controller = TodoListController::with_policy(TodoClient::new(&args.base_url), policy);
    let mut session = Session::new(controller, UreqTransport::new());

    let command = args.command.unwrap_or(Command::List);
    let result = command::run(
        &mut session,
        command,
        &mut io::stdout().lock(),
        &mut io::stdin().lock(),
    );
    if let Err(err) = result {
        // Prefer the recorded notice, it names the operation that failed.
        match session.state().last_notice() {
            Some(notice) => bail!("{}", render::notice(notice)),
            None => return Err(err),
        }
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .init();
}
