//! Driven port for pet persistence.
//!
//! [`PetRepository`] is the contract the domain expects from storage. The
//! PostgreSQL adapter lives in `outbound::persistence`; tests substitute the
//! generated `MockPetRepository` or [`FixturePetRepository`].

use async_trait::async_trait;
use pagination::PageRequest;
use thiserror::Error;

use crate::domain::{NewPet, Pet, PetChanges, PetId};

/// Errors raised by pet repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PetRepositoryError {
    /// No connection could be obtained, or the pool was shut down.
    #[error("pet repository connection failed: {message}")]
    Connection { message: String },
    /// A statement failed while executing.
    #[error("pet repository query failed: {message}")]
    Query { message: String },
    /// The driver reported "no rows" as a failure.
    #[error("pet repository found no rows")]
    NotFound,
}

impl PetRepositoryError {
    /// Build a [`PetRepositoryError::Connection`].
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Build a [`PetRepositoryError::Query`].
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for storing and reading pets.
///
/// Mutations match by identifier and do not report "zero rows affected":
/// callers that care about existence check it first with
/// [`PetRepository::fetch_one`]. That check and the mutation are separate
/// statements, so a concurrent delete in between goes unnoticed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PetRepository: Send + Sync {
    /// Fetch a single pet; `Ok(None)` when no row has this id.
    async fn fetch_one(&self, id: PetId) -> Result<Option<Pet>, PetRepositoryError>;

    /// Fetch one page of pets.
    ///
    /// Orders by id only when the request carries an order, applies a limit
    /// only when it is non-zero (negative limits go to the store as-is), and
    /// always applies the offset.
    async fn fetch_many(&self, page: &PageRequest) -> Result<Vec<Pet>, PetRepositoryError>;

    /// Store a new pet, stamping `created_at` with the current time and
    /// leaving `updated_at` empty. Returns the assigned identifier.
    async fn insert(&self, pet: &NewPet) -> Result<PetId, PetRepositoryError>;

    /// Overwrite the name and stamp `updated_at` with the current time.
    async fn update(&self, changes: &PetChanges) -> Result<(), PetRepositoryError>;

    /// Hard-delete a pet.
    async fn delete(&self, id: PetId) -> Result<(), PetRepositoryError>;

    /// Release the underlying connections. Safe to call more than once.
    async fn shutdown(&self);
}

/// Fixture implementation for wiring tests without a database.
///
/// Reads return nothing, inserts hand out id 1 and mutations succeed.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePetRepository;

#[async_trait]
impl PetRepository for FixturePetRepository {
    async fn fetch_one(&self, _id: PetId) -> Result<Option<Pet>, PetRepositoryError> {
        Ok(None)
    }

    async fn fetch_many(&self, _page: &PageRequest) -> Result<Vec<Pet>, PetRepositoryError> {
        Ok(Vec::new())
    }

    async fn insert(&self, _pet: &NewPet) -> Result<PetId, PetRepositoryError> {
        PetId::new(1).map_err(|err| PetRepositoryError::query(err.to_string()))
    }

    async fn update(&self, _changes: &PetChanges) -> Result<(), PetRepositoryError> {
        Ok(())
    }

    async fn delete(&self, _id: PetId) -> Result<(), PetRepositoryError> {
        Ok(())
    }

    async fn shutdown(&self) {}
}
