//! Library service
//!
//! The orchestration layer over the repositories; all business rules
//! (loan lifecycle, availability, the per-member cap) live here.

mod library;

pub use library::{BookStatusReport, LibraryError, LibraryService, OpenLoanLine, OpenLoanRef};
