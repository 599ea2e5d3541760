//! # Storage Layer
//!
//! Flat-file persistence for Shelf CLI.
//!
//! ## Layout
//!
//! One JSONL file per entity kind under the data directory (default
//! `./data`, overridable via `--data-dir` / `SHELF_DATA_DIR`):
//!
//! ```text
//! data/
//! ├── books.jsonl      # one book per line
//! ├── members.jsonl    # one member per line
//! └── loans.jsonl      # one loan per line
//! ```
//!
//! A missing file means zero records. Writes go through a temp file and
//! an atomic rename, under an exclusive lock (`fs2`).
//!
//! ## Key Types
//!
//! - [`RecordStore`] - generic load/save of one entity kind
//! - [`BookRepository`], [`MemberRepository`], [`LoanRepository`] - typed
//!   accessors over the store
//! - [`Config`] - environment-sourced settings

mod books;
mod config;
mod loans;
mod members;
mod store;

pub use books::BookRepository;
pub use config::{Config, ConfigError};
pub use loans::LoanRepository;
pub use members::MemberRepository;
pub use store::RecordStore;
