//! CLI module for Shelf

mod app;
mod book;
mod loan;
mod member;
mod output;

pub use app::{run, Cli};
pub use output::{Output, OutputFormat};
