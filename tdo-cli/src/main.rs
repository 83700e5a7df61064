mod handlers;
mod render;
mod usage;

use std::env;
use std::io::{self, IsTerminal};
use std::process::ExitCode;

use anyhow::Result;
use tdo_core::{Action, Config, CsvStore, ParseError, TodoList, parse};
use tracing_subscriber::EnvFilter;

use render::Renderer;

fn main() -> ExitCode {
    init_logging();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("tdo: {e}");
            if e.downcast_ref::<ParseError>().is_some() {
                eprint!("{}", usage::plain_usage());
            }
            ExitCode::FAILURE
        }
    }
}

/// Diagnostics only, off unless `TDO_LOG` says otherwise
/// (e.g. `TDO_LOG=debug`). The CLI surface itself stays flag-free.
fn init_logging() {
    let filter = EnvFilter::try_from_env("TDO_LOG").unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let action = parse(&args)?;

    let config = Config::load()?;
    let use_color = env::var_os("NO_COLOR").is_none() && io::stdout().is_terminal();
    let renderer = Renderer::new(use_color);

    let mut list = TodoList::load(CsvStore::new(config.todo_file))?;

    match action {
        Action::Help => handlers::help(&renderer),
        Action::List => handlers::list(&renderer, &list),
        Action::Add { title, description } => handlers::add(&mut list, title, description)?,
        Action::Update {
            id,
            title,
            description,
        } => handlers::update(&mut list, &id, title, description)?,
        Action::Delete { ids } => handlers::delete(&mut list, &ids)?,
        Action::MarkComplete { ids } => handlers::mark_complete(&mut list, &ids)?,
        Action::MarkIncomplete { ids } => handlers::mark_incomplete(&mut list, &ids)?,
    }
    Ok(())
}
