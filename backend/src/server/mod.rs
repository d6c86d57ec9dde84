//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use pets::Trace;
#[cfg(debug_assertions)]
use pets::doc::ApiDoc;
use pets::domain::PetServiceImpl;
use pets::domain::ports::{FixturePetRepository, PetService};
use pets::inbound::http::health::{HealthState, live, ready};
use pets::inbound::http::pets::{create_pet, delete_pet, list_pets, update_pet};
use pets::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_pet_service(config: &ServerConfig) -> Arc<dyn PetService> {
    match &config.repository {
        Some(repository) => Arc::new(PetServiceImpl::new(Arc::new(repository.clone()))),
        None => Arc::new(PetServiceImpl::new(Arc::new(FixturePetRepository))),
    }
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api/v1")
        .service(list_pets)
        .service(create_pet)
        .service(update_pet)
        .service(delete_pet);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Bind the listener and build the server.
///
/// Actix's own signal handling is disabled; the caller owns shutdown through
/// the returned server's handle. Readiness is marked once the socket is bound.
///
/// # Errors
/// Returns [`std::io::Error`] when the socket cannot be bound.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(HttpState::new(build_pet_service(&config)));
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .disable_signals()
    .bind(config.bind_addr.as_str())?
    .run();

    health_state.mark_ready();
    Ok(server)
}
