//! HTTP server configuration object.

use pets::outbound::persistence::DieselPetRepository;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: String,
    pub(crate) repository: Option<DieselPetRepository>,
}

impl ServerConfig {
    /// Configuration listening on `bind_addr` (`host:port`) with no
    /// persistence attached.
    #[must_use]
    pub fn new(bind_addr: impl Into<String>) -> Self {
        Self {
            bind_addr: bind_addr.into(),
            repository: None,
        }
    }

    /// Attach the PostgreSQL repository.
    ///
    /// Without one the server falls back to the fixture repository, which
    /// stores nothing.
    #[must_use]
    pub fn with_repository(mut self, repository: DieselPetRepository) -> Self {
        self.repository = Some(repository);
        self
    }
}
