//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data` and depend only on
//! the [`PetService`] driving port, so they can be tested without I/O.

use std::sync::Arc;

use crate::domain::ports::PetService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub pets: Arc<dyn PetService>,
}

impl HttpState {
    /// Construct state from the pet service.
    pub fn new(pets: Arc<dyn PetService>) -> Self {
        Self { pets }
    }
}
