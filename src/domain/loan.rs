//! Loan domain model
//!
//! A loan links a book to a member. A loan with no return date is open;
//! at most one open loan may reference a given book, and a member may
//! hold at most the configured number of open loans.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single lending of a book to a member
///
/// Dates are stored in ISO `%Y-%m-%d` regardless of any display format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    pub id: u64,
    pub book_id: String,
    pub member_id: String,
    pub loan_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_date: Option<NaiveDate>,
}

impl Loan {
    /// Creates a new open loan
    pub fn open(
        id: u64,
        book_id: impl Into<String>,
        member_id: impl Into<String>,
        loan_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            book_id: book_id.into(),
            member_id: member_id.into(),
            loan_date,
            return_date: None,
        }
    }

    /// Returns true if the book has not been returned yet
    pub fn is_open(&self) -> bool {
        self.return_date.is_none()
    }

    /// Sets the return date, closing the loan
    ///
    /// A return date, once set, is never changed; closing an already
    /// closed loan is a no-op.
    pub fn close(&mut self, date: NaiveDate) {
        if self.return_date.is_none() {
            self.return_date = Some(date);
        }
    }
}
