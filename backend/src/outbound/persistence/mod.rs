//! PostgreSQL persistence adapters using Diesel.
//!
//! Repository implementations only translate between Diesel rows and domain
//! types. Row structs (`models.rs`) and the table definition (`schema.rs`)
//! stay private to this module.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use pets::outbound::persistence::{DbPool, DieselPetRepository, PoolConfig};
//!
//! let pool = DbPool::connect(PoolConfig::new("postgres://localhost/pets")).await?;
//! let repo = DieselPetRepository::new(pool, Arc::new(mockable::DefaultClock));
//! ```

mod diesel_pet_repository;
mod models;
mod pool;
mod schema;

pub use diesel_pet_repository::DieselPetRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
