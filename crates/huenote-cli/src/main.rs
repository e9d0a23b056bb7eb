//! Huenote CLI - encrypted notes unlocked by a passphrase and three colors
//!
//! Thin front end over `huenote-core`: argument parsing, prompts and
//! output live here; all cryptography and storage live in the core crate.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod logging;
mod output;
mod ui;

use clap::{CommandFactory, Parser};

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::errors::classify_error;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(&cli).await {
        if let Some(cli_error) = classify_error(&err) {
            cli_error.exit();
        }
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let ctx = AppContext::load(cli)?;
    logging::init(cli.verbose, ctx.log_level());

    match &cli.command {
        Some(Commands::Init(args)) => commands::handle_init(&ctx, args),
        Some(Commands::Write(args)) => commands::handle_write(&ctx, args).await,
        Some(Commands::List(args)) => commands::handle_list(&ctx, args),
        Some(Commands::Show(args)) => commands::handle_show(&ctx, args).await,
        Some(Commands::Edit(args)) => commands::handle_edit(&ctx, args).await,
        Some(Commands::Delete(args)) => commands::handle_delete(&ctx, args),
        Some(Commands::Export(args)) => commands::handle_export(&ctx, args),
        Some(Commands::Import(args)) => commands::handle_import(&ctx, args),
        Some(Commands::Palette) => commands::handle_palette(&ctx),
        Some(Commands::Check) => commands::handle_check(&ctx),
        Some(Commands::Completions(args)) => commands::handle_completions(args.shell),
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    }
}
