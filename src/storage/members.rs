//! Member repository
//!
//! Read-only: the current command set never creates or mutates members,
//! so there is no save operation.

use anyhow::Result;

use super::RecordStore;
use crate::domain::Member;

const KIND: &str = "members";

/// Typed accessor for member records
pub struct MemberRepository<'a> {
    store: &'a RecordStore,
}

impl<'a> MemberRepository<'a> {
    pub fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    /// Finds a member by id
    pub fn find_by_id(&self, id: &str) -> Result<Option<Member>> {
        Ok(self.find_all()?.into_iter().find(|m| m.id == id))
    }

    /// Returns all members, in file order
    pub fn find_all(&self) -> Result<Vec<Member>> {
        self.store.load_all(KIND)
    }
}
