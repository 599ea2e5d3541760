//! Shelf CLI - A flat-file library management tool
//!
//! Shelf tracks books, members, and loans in a directory of flat files
//! (one JSONL file per entity kind) and enforces the loan lifecycle:
//! one open loan per book, and a configurable cap on open loans per member.

pub mod cli;
pub mod domain;
pub mod service;
pub mod storage;

pub use domain::{Book, BookStatus, Loan, Member};
pub use service::{BookStatusReport, LibraryError, LibraryService};
