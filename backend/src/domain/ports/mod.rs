//! Domain ports for the hexagonal boundary.

mod pet_repository;
mod pet_service;

#[cfg(test)]
pub use pet_repository::MockPetRepository;
pub use pet_repository::{FixturePetRepository, PetRepository, PetRepositoryError};
#[cfg(test)]
pub use pet_service::MockPetService;
pub use pet_service::PetService;
