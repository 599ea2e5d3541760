//! Domain models for Shelf CLI
//!
//! Contains the library entities without any I/O concerns.

mod book;
mod loan;
mod member;

pub use book::{Book, BookStatus};
pub use loan::Loan;
pub use member::Member;
