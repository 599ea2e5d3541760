//! Book repository

use anyhow::Result;

use super::RecordStore;
use crate::domain::Book;

const KIND: &str = "books";

/// Typed accessor for book records
pub struct BookRepository<'a> {
    store: &'a RecordStore,
}

impl<'a> BookRepository<'a> {
    pub fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    /// Finds a book by id
    pub fn find_by_id(&self, id: &str) -> Result<Option<Book>> {
        Ok(self.find_all()?.into_iter().find(|b| b.id == id))
    }

    /// Returns all books, in file order
    pub fn find_all(&self) -> Result<Vec<Book>> {
        self.store.load_all(KIND)
    }

    /// Updates a book in place by id, or appends it if new
    pub fn save(&self, book: &Book) -> Result<()> {
        let mut books = self.find_all()?;
        match books.iter_mut().find(|b| b.id == book.id) {
            Some(existing) => *existing = book.clone(),
            None => books.push(book.clone()),
        }
        self.store.save_all(KIND, &books)
    }
}
