//! OpenAPI documentation for the REST API.
//!
//! [`ApiDoc`] registers the pet routes, the health probes and the pet body
//! schemas. Swagger UI serves it in debug builds and the `openapi-dump`
//! binary prints it for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::pets::{
    CreatePetRequest, CreatedPetBody, DeletePetRequest, PetBody, PetListBody, UpdatePetRequest,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pets API",
        description = "CRUD interface over pets, plus health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::pets::list_pets,
        crate::inbound::http::pets::create_pet,
        crate::inbound::http::pets::update_pet,
        crate::inbound::http::pets::delete_pet,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        PetBody,
        PetListBody,
        CreatedPetBody,
        CreatePetRequest,
        UpdatePetRequest,
        DeletePetRequest
    )),
    tags(
        (name = "pets", description = "Pet records"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn schema<'a>(doc: &'a utoipa::openapi::OpenApi, name: &str) -> &'a RefOr<Schema> {
        doc.components
            .as_ref()
            .expect("components")
            .schemas
            .get(name)
            .unwrap_or_else(|| panic!("{name} schema registered"))
    }

    #[test]
    fn documents_every_pet_method_on_one_path() {
        let doc = ApiDoc::openapi();
        let item = doc.paths.paths.get("/api/v1/pet").expect("pet path");

        assert!(item.get.is_some());
        assert!(item.post.is_some());
        assert!(item.put.is_some());
        assert!(item.delete.is_some());
        assert!(doc.paths.paths.contains_key("/health/ready"));
        assert!(doc.paths.paths.contains_key("/health/live"));
    }

    #[test]
    fn pet_schema_lists_wire_fields() {
        let doc = ApiDoc::openapi();
        match schema(&doc, "PetBody") {
            RefOr::T(Schema::Object(obj)) => {
                for field in ["id", "name", "created_at", "updated_at"] {
                    assert!(obj.properties.contains_key(field), "missing {field}");
                }
            }
            _ => panic!("expected object schema"),
        }
    }
}
