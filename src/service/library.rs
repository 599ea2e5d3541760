//! Loan lifecycle orchestration
//!
//! Lending and returning touch two record sets (the loan file and the
//! book file). The two writes are not atomic with each other; each file
//! write is individually atomic. Acceptable for a single-user tool.

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::domain::{BookStatus, Loan};
use crate::storage::{BookRepository, LoanRepository, MemberRepository};

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("Book not found: {0}")]
    BookNotFound(String),

    #[error("Member not found: {0}")]
    MemberNotFound(String),

    #[error("Book {0} is already on loan")]
    BookAlreadyOnLoan(String),

    #[error("No open loan for book {0}")]
    NoOpenLoan(String),

    #[error("Member {member_id} already has {limit} open loans")]
    LoanLimitReached { member_id: String, limit: usize },

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl LibraryError {
    /// Business outcomes are printed as plain result text with a zero
    /// exit; storage failures are fatal.
    pub fn is_business(&self) -> bool {
        !matches!(self, LibraryError::Storage(_))
    }
}

/// One open loan, as shown by `loan list`
#[derive(Debug, Clone, Serialize)]
pub struct OpenLoanLine {
    pub loan_id: u64,
    pub book_id: String,
    pub member_id: String,
    pub loan_date: NaiveDate,
}

/// Result of a status lookup
#[derive(Debug, Clone, Serialize)]
pub struct BookStatusReport {
    pub id: String,
    pub title: String,
    pub author: String,
    pub status: BookStatus,
    /// Present exactly when the book is on loan
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_loan: Option<OpenLoanRef>,
}

/// The open loan attached to an on-loan book
#[derive(Debug, Clone, Serialize)]
pub struct OpenLoanRef {
    pub loan_id: u64,
    pub member_id: String,
}

/// Orchestrates the repositories; all business rules live here
pub struct LibraryService<'a> {
    books: BookRepository<'a>,
    members: MemberRepository<'a>,
    loans: LoanRepository<'a>,
    max_loans_per_member: usize,
}

impl<'a> LibraryService<'a> {
    pub fn new(
        books: BookRepository<'a>,
        members: MemberRepository<'a>,
        loans: LoanRepository<'a>,
        max_loans_per_member: usize,
    ) -> Self {
        Self {
            books,
            members,
            loans,
            max_loans_per_member,
        }
    }

    /// One display line per book: id, title, author, availability
    pub fn list_books(&self) -> Result<Vec<String>, LibraryError> {
        Ok(self
            .books
            .find_all()?
            .into_iter()
            .map(|b| format!("{} | {} | {} | {}", b.id, b.title, b.author, b.status.label()))
            .collect())
    }

    /// Every loan with no return date, in file order
    pub fn list_open_loans(&self) -> Result<Vec<OpenLoanLine>, LibraryError> {
        Ok(self
            .loans
            .find_all()?
            .into_iter()
            .filter(Loan::is_open)
            .map(|l| OpenLoanLine {
                loan_id: l.id,
                book_id: l.book_id,
                member_id: l.member_id,
                loan_date: l.loan_date,
            })
            .collect())
    }

    /// Opens a loan: the book and member must exist, the book must be
    /// available, and the member must be under the open-loan cap.
    pub fn lend_book(
        &self,
        book_id: &str,
        member_id: &str,
        date: NaiveDate,
    ) -> Result<String, LibraryError> {
        let mut book = self
            .books
            .find_by_id(book_id)?
            .ok_or_else(|| LibraryError::BookNotFound(book_id.to_string()))?;

        if self.members.find_by_id(member_id)?.is_none() {
            return Err(LibraryError::MemberNotFound(member_id.to_string()));
        }

        if book.status == BookStatus::OnLoan {
            return Err(LibraryError::BookAlreadyOnLoan(book_id.to_string()));
        }

        let open_count = self.loans.count_open_by_member_id(member_id)?;
        if open_count >= self.max_loans_per_member {
            return Err(LibraryError::LoanLimitReached {
                member_id: member_id.to_string(),
                limit: self.max_loans_per_member,
            });
        }

        let loan = Loan::open(self.loans.next_id()?, book_id, member_id, date);
        self.loans.save(&loan)?;

        book.mark_on_loan();
        self.books.save(&book)?;

        Ok(format!(
            "Loan {} opened: book {} lent to member {}",
            loan.id, book_id, member_id
        ))
    }

    /// Closes the book's open loan and puts the book back on the shelf
    pub fn return_book(&self, book_id: &str, date: NaiveDate) -> Result<String, LibraryError> {
        let mut book = self
            .books
            .find_by_id(book_id)?
            .ok_or_else(|| LibraryError::BookNotFound(book_id.to_string()))?;

        let mut loan = self
            .loans
            .find_open_by_book_id(book_id)?
            .ok_or_else(|| LibraryError::NoOpenLoan(book_id.to_string()))?;

        loan.close(date);
        self.loans.save(&loan)?;

        book.mark_available();
        self.books.save(&book)?;

        Ok(format!("Loan {} closed: book {} returned", loan.id, book_id))
    }

    /// Book detail plus, when on loan, the open loan's id and member
    pub fn book_status(&self, book_id: &str) -> Result<BookStatusReport, LibraryError> {
        let book = self
            .books
            .find_by_id(book_id)?
            .ok_or_else(|| LibraryError::BookNotFound(book_id.to_string()))?;

        let open_loan = if book.status == BookStatus::OnLoan {
            self.loans
                .find_open_by_book_id(book_id)?
                .map(|l| OpenLoanRef {
                    loan_id: l.id,
                    member_id: l.member_id,
                })
        } else {
            None
        };

        Ok(BookStatusReport {
            id: book.id,
            title: book.title,
            author: book.author,
            status: book.status,
            open_loan,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Book, Member};
    use crate::storage::RecordStore;
    use tempfile::TempDir;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn seed(store: &RecordStore, books: &[Book], members: &[Member]) {
        store.save_all("books", books).unwrap();
        store.save_all("members", members).unwrap();
    }

    fn service(store: &RecordStore, cap: usize) -> LibraryService<'_> {
        LibraryService::new(
            BookRepository::new(store),
            MemberRepository::new(store),
            LoanRepository::new(store),
            cap,
        )
    }

    #[test]
    fn lend_then_return_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::new(dir.path());
        seed(
            &store,
            &[Book::new("B1", "The Hobbit", "Tolkien")],
            &[Member::new("M1", "Ada Lovelace")],
        );
        let svc = service(&store, 2);

        let confirmation = svc.lend_book("B1", "M1", date("2024-01-10")).unwrap();
        assert!(confirmation.contains("Loan 1"));

        let books = BookRepository::new(&store).find_all().unwrap();
        assert_eq!(books[0].status, BookStatus::OnLoan);

        let confirmation = svc.return_book("B1", date("2024-01-15")).unwrap();
        assert!(confirmation.contains("Loan 1"));

        let books = BookRepository::new(&store).find_all().unwrap();
        assert_eq!(books[0].status, BookStatus::Available);

        let loans = LoanRepository::new(&store).find_all().unwrap();
        assert_eq!(loans.len(), 1);
        assert_eq!(loans[0].return_date, Some(date("2024-01-15")));
    }

    #[test]
    fn lend_unknown_book_mutates_nothing() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::new(dir.path());
        seed(&store, &[], &[Member::new("M1", "Ada Lovelace")]);
        let svc = service(&store, 2);

        let err = svc.lend_book("UNKNOWN", "M1", date("2024-01-10")).unwrap_err();
        assert!(matches!(err, LibraryError::BookNotFound(_)));
        assert!(err.is_business());
        assert!(LoanRepository::new(&store).find_all().unwrap().is_empty());
    }

    #[test]
    fn lend_unknown_member_mutates_nothing() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::new(dir.path());
        seed(&store, &[Book::new("B1", "Dune", "Herbert")], &[]);
        let svc = service(&store, 2);

        let err = svc.lend_book("B1", "M9", date("2024-01-10")).unwrap_err();
        assert!(matches!(err, LibraryError::MemberNotFound(_)));
        assert!(LoanRepository::new(&store).find_all().unwrap().is_empty());

        let books = BookRepository::new(&store).find_all().unwrap();
        assert_eq!(books[0].status, BookStatus::Available);
    }

    #[test]
    fn lend_book_already_on_loan_is_a_conflict() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::new(dir.path());
        seed(
            &store,
            &[Book::new("B1", "Dune", "Herbert")],
            &[Member::new("M1", "Ada"), Member::new("M2", "Grace")],
        );
        let svc = service(&store, 2);

        svc.lend_book("B1", "M1", date("2024-01-10")).unwrap();
        let err = svc.lend_book("B1", "M2", date("2024-01-11")).unwrap_err();
        assert!(matches!(err, LibraryError::BookAlreadyOnLoan(_)));

        // No second loan record was created
        assert_eq!(LoanRepository::new(&store).find_all().unwrap().len(), 1);
    }

    #[test]
    fn loan_cap_is_enforced_at_the_boundary() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::new(dir.path());
        seed(
            &store,
            &[
                Book::new("B1", "Dune", "Herbert"),
                Book::new("B2", "Emma", "Austen"),
                Book::new("B3", "Ubik", "Dick"),
            ],
            &[Member::new("M1", "Ada")],
        );
        let svc = service(&store, 2);

        // One open loan: still under the cap
        svc.lend_book("B1", "M1", date("2024-01-10")).unwrap();
        svc.lend_book("B2", "M1", date("2024-01-11")).unwrap();

        // At the cap: third concurrent loan is rejected
        let err = svc.lend_book("B3", "M1", date("2024-01-12")).unwrap_err();
        assert!(matches!(
            err,
            LibraryError::LoanLimitReached { limit: 2, .. }
        ));

        // The first two loans are untouched
        let loans = LoanRepository::new(&store).find_all().unwrap();
        assert_eq!(loans.len(), 2);
        assert!(loans.iter().all(Loan::is_open));
    }

    #[test]
    fn returning_frees_cap_headroom() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::new(dir.path());
        seed(
            &store,
            &[
                Book::new("B1", "Dune", "Herbert"),
                Book::new("B2", "Emma", "Austen"),
                Book::new("B3", "Ubik", "Dick"),
            ],
            &[Member::new("M1", "Ada")],
        );
        let svc = service(&store, 2);

        svc.lend_book("B1", "M1", date("2024-01-10")).unwrap();
        svc.lend_book("B2", "M1", date("2024-01-11")).unwrap();
        svc.return_book("B1", date("2024-01-12")).unwrap();
        svc.lend_book("B3", "M1", date("2024-01-13")).unwrap();

        assert_eq!(
            LoanRepository::new(&store)
                .count_open_by_member_id("M1")
                .unwrap(),
            2
        );
    }

    #[test]
    fn return_without_open_loan_is_a_conflict() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::new(dir.path());
        seed(&store, &[Book::new("B1", "Dune", "Herbert")], &[]);
        let svc = service(&store, 2);

        let err = svc.return_book("B1", date("2024-01-10")).unwrap_err();
        assert!(matches!(err, LibraryError::NoOpenLoan(_)));
    }

    #[test]
    fn loan_ids_strictly_increase_across_returns() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::new(dir.path());
        seed(
            &store,
            &[Book::new("B1", "Dune", "Herbert")],
            &[Member::new("M1", "Ada")],
        );
        let svc = service(&store, 2);

        for _ in 0..3 {
            svc.lend_book("B1", "M1", date("2024-01-10")).unwrap();
            svc.return_book("B1", date("2024-01-11")).unwrap();
        }

        let ids: Vec<_> = LoanRepository::new(&store)
            .find_all()
            .unwrap()
            .iter()
            .map(|l| l.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn status_invariant_holds_across_the_lifecycle() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::new(dir.path());
        seed(
            &store,
            &[Book::new("B1", "Dune", "Herbert"), Book::new("B2", "Emma", "Austen")],
            &[Member::new("M1", "Ada")],
        );
        let svc = service(&store, 2);

        svc.lend_book("B1", "M1", date("2024-01-10")).unwrap();

        // On loan iff exactly one open loan references the book
        let books = BookRepository::new(&store).find_all().unwrap();
        let loans = LoanRepository::new(&store).find_all().unwrap();
        for book in &books {
            let open = loans
                .iter()
                .filter(|l| l.is_open() && l.book_id == book.id)
                .count();
            match book.status {
                BookStatus::OnLoan => assert_eq!(open, 1),
                BookStatus::Available => assert_eq!(open, 0),
            }
        }
    }

    #[test]
    fn list_books_shows_availability() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::new(dir.path());
        seed(
            &store,
            &[Book::new("B1", "Dune", "Herbert"), Book::new("B2", "Emma", "Austen")],
            &[Member::new("M1", "Ada")],
        );
        let svc = service(&store, 2);

        svc.lend_book("B1", "M1", date("2024-01-10")).unwrap();

        let lines = svc.list_books().unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "B1 | Dune | Herbert | on loan");
        assert_eq!(lines[1], "B2 | Emma | Austen | available");
    }

    #[test]
    fn list_open_loans_excludes_closed() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::new(dir.path());
        seed(
            &store,
            &[Book::new("B1", "Dune", "Herbert"), Book::new("B2", "Emma", "Austen")],
            &[Member::new("M1", "Ada")],
        );
        let svc = service(&store, 2);

        svc.lend_book("B1", "M1", date("2024-01-10")).unwrap();
        svc.lend_book("B2", "M1", date("2024-01-11")).unwrap();
        svc.return_book("B1", date("2024-01-12")).unwrap();

        let open = svc.list_open_loans().unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].loan_id, 2);
        assert_eq!(open[0].book_id, "B2");
        assert_eq!(open[0].loan_date, date("2024-01-11"));
    }

    #[test]
    fn book_status_reports_open_loan_detail() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::new(dir.path());
        seed(
            &store,
            &[Book::new("B1", "Dune", "Herbert")],
            &[Member::new("M1", "Ada")],
        );
        let svc = service(&store, 2);

        let report = svc.book_status("B1").unwrap();
        assert_eq!(report.status, BookStatus::Available);
        assert!(report.open_loan.is_none());

        svc.lend_book("B1", "M1", date("2024-01-10")).unwrap();

        let report = svc.book_status("B1").unwrap();
        assert_eq!(report.status, BookStatus::OnLoan);
        let loan = report.open_loan.unwrap();
        assert_eq!(loan.loan_id, 1);
        assert_eq!(loan.member_id, "M1");

        let err = svc.book_status("B9").unwrap_err();
        assert!(matches!(err, LibraryError::BookNotFound(_)));
    }
}
