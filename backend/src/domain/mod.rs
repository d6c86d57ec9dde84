//! Domain primitives, services and ports.
//!
//! Nothing in here knows about actix-web or Diesel. Inbound adapters call the
//! [`ports::PetService`] driving port; outbound adapters implement
//! [`ports::PetRepository`].

pub mod error;
pub mod pet;
pub mod pet_service;
pub mod ports;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::pet::{NewPet, Pet, PetChanges, PetId, PetName, PetValidationError};
pub use self::pet_service::PetServiceImpl;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
