//! Pet use cases.
//!
//! [`PetServiceImpl`] implements the [`PetService`] driving port over any
//! [`PetRepository`]. It normalises list input, hides persistence detail
//! behind a generic `"db error"` and re-expresses timestamps in local time.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use tracing::{error, warn};

use crate::domain::ports::{PetRepository, PetRepositoryError, PetService};
use crate::domain::{Error, NewPet, Pet, PetChanges, PetId};

/// Client-facing message for every persistence failure.
pub const DB_ERROR_MESSAGE: &str = "db error";

/// Pet service backed by a repository.
pub struct PetServiceImpl<R> {
    repository: Arc<R>,
}

impl<R> Clone for PetServiceImpl<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R> PetServiceImpl<R> {
    /// Create a service over `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

fn map_repository_error(operation: &'static str, err: PetRepositoryError) -> Error {
    error!(operation, error = %err, "pet repository call failed");
    Error::internal(DB_ERROR_MESSAGE)
}

#[async_trait]
impl<R> PetService for PetServiceImpl<R>
where
    R: PetRepository,
{
    async fn list_pets(&self, limit: &str, offset: &str, order: &str) -> Result<Page<Pet>, Error> {
        let request = PageRequest::from_query_text(limit, offset, order);
        let pets = match self.repository.fetch_many(&request).await {
            Ok(pets) => pets,
            Err(PetRepositoryError::NotFound) => return Ok(Page::empty()),
            Err(err) => return Err(map_repository_error("list", err)),
        };
        Ok(Page::from_items(pets).map(Pet::into_local))
    }

    async fn create_pet(&self, pet: NewPet) -> Result<PetId, Error> {
        self.repository
            .insert(&pet)
            .await
            .map_err(|err| map_repository_error("create", err))
    }

    async fn update_pet(&self, changes: PetChanges) -> Result<(), Error> {
        self.repository
            .update(&changes)
            .await
            .map_err(|err| map_repository_error("update", err))
    }

    async fn delete_pet(&self, id: PetId) -> Result<(), Error> {
        self.repository
            .delete(id)
            .await
            .map_err(|err| map_repository_error("delete", err))
    }

    async fn exists_pet(&self, id: PetId) -> bool {
        match self.repository.fetch_one(id).await {
            Ok(Some(pet)) => pet.id() == id,
            Ok(None) => false,
            Err(err) => {
                warn!(pet_id = %id, error = %err, "pet lookup failed; treating as absent");
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "pet_service_tests.rs"]
mod tests;
