//! # Popsicle Store
//!
//! Repository trait plus the in-memory implementation shared by all
//! request handlers.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;

use super::errors::{PopsicleError, PopsicleResult};
use super::model::{NewPopsicle, Popsicle, PopsiclePatch};
use super::search::FilterSet;

/// Popsicle repository trait
///
/// Abstracts storage operations for popsicle records.
pub trait PopsicleRepository: Send + Sync {
    /// Assign the next id, stamp timestamps, insert
    fn create(&self, new: NewPopsicle) -> PopsicleResult<Popsicle>;

    /// Find a record by id
    fn get_by_id(&self, id: u64) -> PopsicleResult<Option<Popsicle>>;

    /// Snapshot of every record in ascending id order
    fn get_all(&self) -> PopsicleResult<Vec<Popsicle>>;

    /// Overwrite all mutable fields of an existing record
    fn replace(&self, id: u64, new: NewPopsicle) -> PopsicleResult<Popsicle>;

    /// Overwrite only the fields present in the patch
    fn partial_update(&self, id: u64, patch: &PopsiclePatch) -> PopsicleResult<Popsicle>;

    /// Remove a record, returning whether it existed
    fn delete(&self, id: u64) -> PopsicleResult<bool>;

    /// Presence check
    fn exists(&self, id: u64) -> PopsicleResult<bool>;

    /// Records matching every filter, ascending id order
    fn search(&self, filters: &FilterSet) -> PopsicleResult<Vec<Popsicle>>;

    /// Number of stored records
    fn len(&self) -> PopsicleResult<usize>;

    fn is_empty(&self) -> PopsicleResult<bool> {
        Ok(self.len()? == 0)
    }
}

/// In-memory popsicle repository
///
/// Records live in a `BTreeMap` so iteration is already in id order.
/// Ids come from an atomic counter and are never handed out twice.
#[derive(Debug)]
pub struct InMemoryPopsicleRepository {
    popsicles: RwLock<BTreeMap<u64, Popsicle>>,
    next_id: AtomicU64,
}

impl Default for InMemoryPopsicleRepository {
    fn default() -> Self {
        Self {
            popsicles: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl InMemoryPopsicleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the sample catalogue
    pub fn with_sample_data() -> PopsicleResult<Self> {
        let repo = Self::new();
        for new in super::seed::sample_popsicles() {
            repo.create(new)?;
        }
        Ok(repo)
    }

    fn read(&self) -> PopsicleResult<RwLockReadGuard<'_, BTreeMap<u64, Popsicle>>> {
        self.popsicles
            .read()
            .map_err(|_| PopsicleError::Internal("Lock poisoned".into()))
    }

    fn write(&self) -> PopsicleResult<RwLockWriteGuard<'_, BTreeMap<u64, Popsicle>>> {
        self.popsicles
            .write()
            .map_err(|_| PopsicleError::Internal("Lock poisoned".into()))
    }
}

impl PopsicleRepository for InMemoryPopsicleRepository {
    fn create(&self, new: NewPopsicle) -> PopsicleResult<Popsicle> {
        let mut popsicles = self.write()?;

        // Taken under the write lock so ids enter the map in order
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let popsicle = Popsicle::from_new(id, new, Utc::now());
        popsicles.insert(id, popsicle.clone());
        Ok(popsicle)
    }

    fn get_by_id(&self, id: u64) -> PopsicleResult<Option<Popsicle>> {
        let popsicles = self.read()?;
        Ok(popsicles.get(&id).cloned())
    }

    fn get_all(&self) -> PopsicleResult<Vec<Popsicle>> {
        let popsicles = self.read()?;
        Ok(popsicles.values().cloned().collect())
    }

    fn replace(&self, id: u64, new: NewPopsicle) -> PopsicleResult<Popsicle> {
        let mut popsicles = self.write()?;

        let existing = popsicles.get_mut(&id).ok_or(PopsicleError::NotFound(id))?;
        existing.replace_with(new, Utc::now());
        Ok(existing.clone())
    }

    fn partial_update(&self, id: u64, patch: &PopsiclePatch) -> PopsicleResult<Popsicle> {
        let mut popsicles = self.write()?;

        let existing = popsicles.get_mut(&id).ok_or(PopsicleError::NotFound(id))?;
        existing.apply_patch(patch, Utc::now());
        Ok(existing.clone())
    }

    fn delete(&self, id: u64) -> PopsicleResult<bool> {
        let mut popsicles = self.write()?;
        Ok(popsicles.remove(&id).is_some())
    }

    fn exists(&self, id: u64) -> PopsicleResult<bool> {
        let popsicles = self.read()?;
        Ok(popsicles.contains_key(&id))
    }

    fn search(&self, filters: &FilterSet) -> PopsicleResult<Vec<Popsicle>> {
        let popsicles = self.read()?;
        Ok(popsicles
            .values()
            .filter(|p| filters.matches(p))
            .cloned()
            .collect())
    }

    fn len(&self) -> PopsicleResult<usize> {
        let popsicles = self.read()?;
        Ok(popsicles.len())
    }
}
