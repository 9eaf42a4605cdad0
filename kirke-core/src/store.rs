//! In-memory church record store
//!
//! The store is the only mutable state in the program. It is owned by the
//! driver and passed by reference into every operation; `church_id` is
//! unique across it and both ingest paths find-or-create by that key.

use crate::model::{Church, ChurchRow};

/// Outcome of merging one imported spreadsheet row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// An existing record with the same church id was updated
    Updated,
    /// No record existed; a new one was appended
    Added,
}

/// The in-memory collection of church records
#[derive(Debug, Default)]
pub struct Store {
    churches: Vec<Church>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.churches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.churches.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Church> {
        self.churches.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Church> {
        self.churches.iter_mut()
    }

    /// Look up a record by church id
    pub fn get(&self, church_id: u32) -> Option<&Church> {
        self.churches.iter().find(|c| c.church_id == church_id)
    }

    /// Mutable view of all records, for the reconciler
    pub fn churches_mut(&mut self) -> &mut [Church] {
        &mut self.churches
    }

    /// Records the reconciler has not assigned a status to yet
    pub fn without_account_status(&self) -> impl Iterator<Item = &Church> {
        self.churches.iter().filter(|c| !c.has_account_status())
    }

    /// Merge freshly parsed feed records into the store.
    ///
    /// Find-or-create by church id: an existing record gets its core fields
    /// refreshed and keeps its staff and account status; unknown ids are
    /// appended in feed order.
    pub fn ingest_feed(&mut self, records: Vec<Church>) {
        for record in records {
            match self
                .churches
                .iter_mut()
                .find(|c| c.church_id == record.church_id)
            {
                Some(existing) => {
                    let staff = std::mem::take(&mut existing.staff);
                    let account_status = std::mem::take(&mut existing.account_status);
                    *existing = record;
                    existing.staff = staff;
                    existing.account_status = account_status;
                }
                None => self.churches.push(record),
            }
        }
    }

    /// Merge one imported dataset row (the spreadsheet import path).
    ///
    /// Updates all core fields of an existing record, or appends a new one.
    /// Staff and account status are untouched either way.
    pub fn merge_row(&mut self, row: ChurchRow) -> MergeOutcome {
        match self
            .churches
            .iter_mut()
            .find(|c| c.church_id == row.church_id)
        {
            Some(existing) => {
                existing.update_from_row(row);
                MergeOutcome::Updated
            }
            None => {
                self.churches.push(Church::from_row(row));
                MergeOutcome::Added
            }
        }
    }
}
