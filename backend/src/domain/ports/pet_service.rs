//! Driving port for pet use cases.
//!
//! HTTP handlers depend on this trait rather than on the repository, so they
//! can be exercised against a mock service.

use async_trait::async_trait;
use pagination::Page;

use crate::domain::{Error, NewPet, Pet, PetChanges, PetId};

/// Pet use cases exposed to inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PetService: Send + Sync {
    /// List one page of pets from raw query text.
    ///
    /// `limit`, `offset` and `order` are never rejected: unparseable numbers
    /// count as zero and unknown orders as "unordered".
    async fn list_pets(&self, limit: &str, offset: &str, order: &str) -> Result<Page<Pet>, Error>;

    /// Store a new pet and return its identifier.
    async fn create_pet(&self, pet: NewPet) -> Result<PetId, Error>;

    /// Rename an existing pet. Does not re-check existence.
    async fn update_pet(&self, changes: PetChanges) -> Result<(), Error>;

    /// Delete a pet. Does not re-check existence.
    async fn delete_pet(&self, id: PetId) -> Result<(), Error>;

    /// Whether a pet with this identifier is currently stored.
    ///
    /// Lookup failures count as "absent".
    async fn exists_pet(&self, id: PetId) -> bool;
}
