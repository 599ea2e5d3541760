//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{book, loan, member};
use crate::storage::{Config, RecordStore};

const CONFIG_HELP: &str = "\
Configuration (environment):
  SHELF_DATA_DIR               data directory holding books/members/loans files (default ./data)
  SHELF_DATE_FORMAT            loan date display format (default %d/%m/%Y; storage is always %Y-%m-%d)
  SHELF_MAX_LOANS_PER_MEMBER   open-loan cap per member (default 2)";

#[derive(Parser)]
#[command(name = "shelf")]
#[command(author, version, about = "Flat-file library management for small lending collections")]
#[command(propagate_version = true)]
#[command(after_help = CONFIG_HELP)]
pub struct Cli {
    /// Data directory holding the flat files
    #[arg(long, global = true, env = "SHELF_DATA_DIR", default_value = "./data")]
    pub data_dir: PathBuf,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage books (list, lend, return, status)
    #[command(subcommand)]
    Book(book::BookCommands),

    /// Inspect loans
    #[command(subcommand)]
    Loan(loan::LoanCommands),

    /// Inspect members
    #[command(subcommand)]
    Member(member::MemberCommands),
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    output.verbose("Shelf CLI starting");

    let config = Config::from_env()?;
    let store = RecordStore::new(&cli.data_dir);
    output.verbose_ctx(
        "config",
        &format!(
            "data_dir={}, max_loans_per_member={}",
            store.dir().display(),
            config.max_loans_per_member
        ),
    );

    match cli.command {
        Commands::Book(cmd) => book::run(cmd, &store, &config, &output)?,
        Commands::Loan(cmd) => loan::run(cmd, &store, &config, &output)?,
        Commands::Member(cmd) => member::run(cmd, &store, &output)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}
