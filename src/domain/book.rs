//! Book domain model
//!
//! Books are seeded externally; this tool only flips their availability
//! as loans open and close.

use serde::{Deserialize, Serialize};

/// Availability of a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookStatus {
    #[default]
    Available,
    OnLoan,
}

impl BookStatus {
    /// Returns a display label for the status
    pub fn label(&self) -> &'static str {
        match self {
            BookStatus::Available => "available",
            BookStatus::OnLoan => "on loan",
        }
    }
}

/// A book in the collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub status: BookStatus,
}

impl Book {
    /// Creates an available book
    pub fn new(id: impl Into<String>, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            status: BookStatus::Available,
        }
    }

    /// Marks the book as lent out
    pub fn mark_on_loan(&mut self) {
        self.status = BookStatus::OnLoan;
    }

    /// Marks the book as back on the shelf
    pub fn mark_available(&mut self) {
        self.status = BookStatus::Available;
    }

    /// Returns true if the book can be lent
    pub fn is_available(&self) -> bool {
        self.status == BookStatus::Available
    }
}
