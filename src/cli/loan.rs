//! Loan CLI commands

use anyhow::Result;
use clap::Subcommand;

use super::output::Output;
use crate::service::LibraryService;
use crate::storage::{BookRepository, Config, LoanRepository, MemberRepository, RecordStore};

#[derive(Subcommand)]
pub enum LoanCommands {
    /// List every open loan
    List,
}

pub fn run(cmd: LoanCommands, store: &RecordStore, config: &Config, output: &Output) -> Result<()> {
    match cmd {
        LoanCommands::List => list_open_loans(store, config, output),
    }
}

fn list_open_loans(store: &RecordStore, config: &Config, output: &Output) -> Result<()> {
    let svc = LibraryService::new(
        BookRepository::new(store),
        MemberRepository::new(store),
        LoanRepository::new(store),
        config.max_loans_per_member,
    );

    let open = svc.list_open_loans().map_err(anyhow::Error::from)?;
    output.verbose_ctx("loans", &format!("{} open loan(s)", open.len()));

    if output.is_json() {
        output.data(&open);
    } else {
        for line in &open {
            println!(
                "{} | {} | {} | {}",
                line.loan_id,
                line.book_id,
                line.member_id,
                line.loan_date.format(&config.date_format)
            );
        }
    }

    Ok(())
}
