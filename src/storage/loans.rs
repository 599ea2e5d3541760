//! Loan repository

use anyhow::Result;

use super::RecordStore;
use crate::domain::Loan;

const KIND: &str = "loans";

/// Typed accessor for loan records
pub struct LoanRepository<'a> {
    store: &'a RecordStore,
}

impl<'a> LoanRepository<'a> {
    pub fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    /// Returns all loans, open and closed, in file order
    pub fn find_all(&self) -> Result<Vec<Loan>> {
        self.store.load_all(KIND)
    }

    /// Finds the open loan for a book, if any
    ///
    /// At most one open loan per book exists; the first match is returned.
    pub fn find_open_by_book_id(&self, book_id: &str) -> Result<Option<Loan>> {
        Ok(self
            .find_all()?
            .into_iter()
            .find(|l| l.is_open() && l.book_id == book_id))
    }

    /// Counts a member's currently open loans
    pub fn count_open_by_member_id(&self, member_id: &str) -> Result<usize> {
        Ok(self
            .find_all()?
            .iter()
            .filter(|l| l.is_open() && l.member_id == member_id)
            .count())
    }

    /// Updates a loan in place by id, or appends it if new
    pub fn save(&self, loan: &Loan) -> Result<()> {
        let mut loans = self.find_all()?;
        match loans.iter_mut().find(|l| l.id == loan.id) {
            Some(existing) => *existing = loan.clone(),
            None => loans.push(loan.clone()),
        }
        self.store.save_all(KIND, &loans)
    }

    /// Allocates the next loan id: one past the current maximum, 1 if none
    ///
    /// Closed loans stay on file, so ids are never reused.
    pub fn next_id(&self) -> Result<u64> {
        Ok(self
            .find_all()?
            .iter()
            .map(|l| l.id)
            .max()
            .map_or(1, |max| max + 1))
    }
}
