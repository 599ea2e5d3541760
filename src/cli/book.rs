//! Book CLI commands

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Subcommand;

use super::output::Output;
use crate::domain::BookStatus;
use crate::service::{LibraryError, LibraryService};
use crate::storage::{BookRepository, Config, LoanRepository, MemberRepository, RecordStore};

#[derive(Subcommand)]
pub enum BookCommands {
    /// List every book with its availability
    List,

    /// Lend a book to a member
    Lend {
        /// Book ID
        book_id: String,

        /// Member ID
        member_id: String,

        /// Loan date (defaults to today)
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<NaiveDate>,
    },

    /// Register the return of a book
    Return {
        /// Book ID
        book_id: String,

        /// Return date (defaults to today)
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<NaiveDate>,
    },

    /// Show a book and, when on loan, its open loan
    Status {
        /// Book ID
        book_id: String,
    },
}

pub fn run(cmd: BookCommands, store: &RecordStore, config: &Config, output: &Output) -> Result<()> {
    match cmd {
        BookCommands::List => list_books(store, config, output),
        BookCommands::Lend {
            book_id,
            member_id,
            date,
        } => lend_book(store, config, output, &book_id, &member_id, date),
        BookCommands::Return { book_id, date } => {
            return_book(store, config, output, &book_id, date)
        }
        BookCommands::Status { book_id } => book_status(store, config, output, &book_id),
    }
}

fn service<'a>(store: &'a RecordStore, config: &Config) -> LibraryService<'a> {
    LibraryService::new(
        BookRepository::new(store),
        MemberRepository::new(store),
        LoanRepository::new(store),
        config.max_loans_per_member,
    )
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Prints a service outcome: confirmations and rejected business outcomes
/// are plain result text (exit 0), storage failures propagate.
fn report(output: &Output, result: Result<String, LibraryError>) -> Result<()> {
    match result {
        Ok(message) => {
            output.success(&message);
            Ok(())
        }
        Err(LibraryError::Storage(e)) => Err(e),
        Err(e) => {
            output.rejected(&e.to_string());
            Ok(())
        }
    }
}

fn list_books(store: &RecordStore, config: &Config, output: &Output) -> Result<()> {
    if output.is_json() {
        let books = BookRepository::new(store).find_all()?;
        output.data(&books);
    } else {
        let lines = service(store, config)
            .list_books()
            .map_err(anyhow::Error::from)?;
        for line in lines {
            println!("{}", line);
        }
    }

    Ok(())
}

fn lend_book(
    store: &RecordStore,
    config: &Config,
    output: &Output,
    book_id: &str,
    member_id: &str,
    date: Option<NaiveDate>,
) -> Result<()> {
    let date = date.unwrap_or_else(today);
    output.verbose_ctx(
        "lend",
        &format!("book={}, member={}, date={}", book_id, member_id, date),
    );

    report(output, service(store, config).lend_book(book_id, member_id, date))
}

fn return_book(
    store: &RecordStore,
    config: &Config,
    output: &Output,
    book_id: &str,
    date: Option<NaiveDate>,
) -> Result<()> {
    let date = date.unwrap_or_else(today);
    output.verbose_ctx("return", &format!("book={}, date={}", book_id, date));

    report(output, service(store, config).return_book(book_id, date))
}

fn book_status(store: &RecordStore, config: &Config, output: &Output, book_id: &str) -> Result<()> {
    match service(store, config).book_status(book_id) {
        Ok(status) => {
            if output.is_json() {
                output.data(&status);
            } else {
                println!("ID: {}", status.id);
                println!("Title: {}", status.title);
                println!("Author: {}", status.author);
                println!("Status: {}", status.status.label());
                if status.status == BookStatus::OnLoan {
                    if let Some(loan) = &status.open_loan {
                        println!("Loan ID: {}", loan.loan_id);
                        println!("Member ID: {}", loan.member_id);
                    }
                }
            }
            Ok(())
        }
        Err(LibraryError::Storage(e)) => Err(e),
        Err(e) => {
            output.rejected(&e.to_string());
            Ok(())
        }
    }
}
