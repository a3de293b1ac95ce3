//! # Popsicle Service
//!
//! Validates requests, maps them onto store inputs and maps stored records
//! back to views.

use std::sync::Arc;

use super::dto::{CreatePopsicleRequest, PopsicleView, UpdatePopsicleRequest};
use super::errors::{PopsicleError, PopsicleResult};
use super::search::SearchCriteria;
use super::store::PopsicleRepository;
use super::validation::{validate_create, validate_patch};

/// Service over a shared popsicle repository
#[derive(Clone)]
pub struct PopsicleService {
    repository: Arc<dyn PopsicleRepository>,
}

impl PopsicleService {
    pub fn new(repository: Arc<dyn PopsicleRepository>) -> Self {
        Self { repository }
    }

    pub fn get_all(&self) -> PopsicleResult<Vec<PopsicleView>> {
        let popsicles = self.repository.get_all()?;
        Ok(popsicles.into_iter().map(PopsicleView::from).collect())
    }

    /// # Errors
    ///
    /// `PopsicleError::NotFound` if no record has this id.
    pub fn get_by_id(&self, id: u64) -> PopsicleResult<PopsicleView> {
        self.repository
            .get_by_id(id)?
            .map(PopsicleView::from)
            .ok_or(PopsicleError::NotFound(id))
    }

    pub fn create(&self, request: &CreatePopsicleRequest) -> PopsicleResult<PopsicleView> {
        let new = validate_create(request)?;
        let created = self.repository.create(new)?;
        tracing::info!(id = created.id, name = %created.name, "popsicle created");
        Ok(created.into())
    }

    pub fn replace(&self, id: u64, request: &CreatePopsicleRequest) -> PopsicleResult<PopsicleView> {
        let new = validate_create(request)?;
        let replaced = self.repository.replace(id, new)?;
        tracing::info!(id, "popsicle replaced");
        Ok(replaced.into())
    }

    pub fn partial_update(
        &self,
        id: u64,
        request: &UpdatePopsicleRequest,
    ) -> PopsicleResult<PopsicleView> {
        let patch = validate_patch(request)?;
        let updated = self.repository.partial_update(id, &patch)?;
        tracing::info!(id, "popsicle updated");
        Ok(updated.into())
    }

    /// Returns whether a record was removed
    pub fn delete(&self, id: u64) -> PopsicleResult<bool> {
        let removed = self.repository.delete(id)?;
        if removed {
            tracing::info!(id, "popsicle deleted");
        }
        Ok(removed)
    }

    pub fn exists(&self, id: u64) -> PopsicleResult<bool> {
        self.repository.exists(id)
    }

    pub fn search(&self, criteria: &SearchCriteria) -> PopsicleResult<Vec<PopsicleView>> {
        let filters = criteria.to_filter_set();
        let popsicles = self.repository.search(&filters)?;
        tracing::debug!(filters = filters.filters.len(), hits = popsicles.len(), "popsicle search");
        Ok(popsicles.into_iter().map(PopsicleView::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::popsicle::model::Patch;
    use crate::popsicle::store::InMemoryPopsicleRepository;
    use rust_decimal::Decimal;

    fn service() -> PopsicleService {
        PopsicleService::new(Arc::new(InMemoryPopsicleRepository::new()))
    }

    fn request(name: &str, flavor: &str, cents: i64, quantity: i64) -> CreatePopsicleRequest {
        CreatePopsicleRequest {
            name: name.to_string(),
            flavor: flavor.to_string(),
            price: Decimal::new(cents, 2),
            description: None,
            quantity,
        }
    }

    #[test]
    fn test_create_then_get_round_trips_fields() {
        let service = service();
        let created = service
            .create(&request("Test Popsicle", "Vanilla", 299, 10))
            .unwrap();

        let fetched = service.get_by_id(created.id).unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.name, "Test Popsicle");
        assert_eq!(fetched.price, Decimal::new(299, 2));
    }

    #[test]
    fn test_get_missing_is_not_found() {
        assert!(matches!(
            service().get_by_id(999),
            Err(PopsicleError::NotFound(999))
        ));
    }

    #[test]
    fn test_invalid_create_never_reaches_store() {
        let service = service();
        let result = service.create(&request("", "Vanilla", 299, 1));
        assert!(matches!(result, Err(PopsicleError::Validation(_))));
        assert!(service.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_partial_update_example() {
        let service = service();
        let created = service
            .create(&request("Original Name", "Original Flavor", 199, 5))
            .unwrap();

        let patch = UpdatePopsicleRequest {
            name: Patch::Value("Updated Name".to_string()),
            price: Patch::Value(Decimal::new(399, 2)),
            ..Default::default()
        };
        let updated = service.partial_update(created.id, &patch).unwrap();

        assert_eq!(updated.name, "Updated Name");
        assert_eq!(updated.flavor, "Original Flavor");
        assert_eq!(updated.price, Decimal::new(399, 2));
        assert_eq!(updated.quantity, 5);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[test]
    fn test_delete_reports_removal() {
        let service = service();
        let created = service.create(&request("a", "b", 100, 1)).unwrap();

        assert!(service.delete(created.id).unwrap());
        assert!(!service.exists(created.id).unwrap());
        assert!(!service.delete(created.id).unwrap());
    }

    #[test]
    fn test_search_without_filters_returns_all() {
        let service = service();
        service.create(&request("Classic Vanilla", "Vanilla", 299, 50)).unwrap();
        service.create(&request("Orange Burst", "Orange", 279, 40)).unwrap();

        assert_eq!(service.search(&SearchCriteria::new()).unwrap().len(), 2);
        let hits = service.search(&SearchCriteria::new().name("Vanilla")).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Classic Vanilla");
    }
}
