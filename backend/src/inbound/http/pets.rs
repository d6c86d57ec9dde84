//! Pet CRUD endpoints.
//!
//! ```text
//! GET    /api/v1/pet?limit=&offset=&order=
//! POST   /api/v1/pet {"name":"Rex"}
//! PUT    /api/v1/pet {"id":1,"name":"Rex"}
//! DELETE /api/v1/pet {"id":1}
//! ```
//!
//! Bodies are read as raw bytes, so the content type is not checked. Missing
//! fields default to `""` or `0` and are rejected by the domain checks that
//! follow, which keeps field messages distinct from parse failures.

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, FixedOffset};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, NewPet, Pet, PetChanges, PetId, PetName, PetValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

const CREATE_USAGE: &str = r#"provide body params {"name":string}"#;
const UPDATE_USAGE: &str = r#"provide body params {"name":string, "id": number}"#;
const DELETE_USAGE: &str = r#"provide body params {"id": number}"#;
const PET_MISSING: &str = "pet does not exist";
const NO_PETS: &str = "pets not found";

/// Query parameters for listing pets. All are optional free text.
#[derive(Debug, Default, PartialEq, Eq, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListPetsQuery {
    /// Maximum rows; `0` or anything non-numeric means no limit.
    pub limit: Option<String>,
    /// Rows to skip; non-numeric counts as `0`.
    pub offset: Option<String>,
    /// `asc` or `desc`, case-insensitive; anything else leaves rows unordered.
    pub order: Option<String>,
}

impl ListPetsQuery {
    /// Read the parameters from a raw query string.
    ///
    /// The first occurrence of a repeated key wins and unknown keys are
    /// ignored, so listing never fails on the query alone.
    pub fn from_query_string(query: &str) -> Self {
        let pairs = web::Query::<Vec<(String, String)>>::from_query(query)
            .map(web::Query::into_inner)
            .unwrap_or_default();
        let mut parsed = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "limit" => &mut parsed.limit,
                "offset" => &mut parsed.offset,
                "order" => &mut parsed.order,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        parsed
    }
}

/// Pet as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PetBody {
    pub id: i64,
    pub name: String,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<FixedOffset>,
    #[schema(value_type = Option<String>, format = DateTime)]
    pub updated_at: Option<DateTime<FixedOffset>>,
}

impl From<Pet> for PetBody {
    fn from(pet: Pet) -> Self {
        Self {
            id: pet.id().get(),
            name: pet.name().to_string(),
            created_at: pet.created_at(),
            updated_at: pet.updated_at(),
        }
    }
}

/// One page of pets. `total` counts the pets in this page only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PetListBody {
    pub pets: Vec<PetBody>,
    pub total: usize,
}

/// Response to a successful create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreatedPetBody {
    pub id: i64,
}

/// Body of `POST /api/v1/pet`.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct CreatePetRequest {
    pub name: Option<String>,
}

/// Body of `PUT /api/v1/pet`.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdatePetRequest {
    pub id: Option<i64>,
    pub name: Option<String>,
}

/// Body of `DELETE /api/v1/pet`.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct DeletePetRequest {
    pub id: Option<i64>,
}

impl TryFrom<CreatePetRequest> for NewPet {
    type Error = PetValidationError;

    fn try_from(request: CreatePetRequest) -> Result<Self, Self::Error> {
        PetName::new(request.name.unwrap_or_default()).map(NewPet::new)
    }
}

// The name is checked before the id, so a body that is wrong on both
// reports the name.
impl TryFrom<UpdatePetRequest> for PetChanges {
    type Error = PetValidationError;

    fn try_from(request: UpdatePetRequest) -> Result<Self, Self::Error> {
        let name = PetName::new(request.name.unwrap_or_default())?;
        let id = PetId::new(request.id.unwrap_or_default())?;
        Ok(PetChanges::new(id, name))
    }
}

impl TryFrom<DeletePetRequest> for PetId {
    type Error = PetValidationError;

    fn try_from(request: DeletePetRequest) -> Result<Self, Self::Error> {
        PetId::new(request.id.unwrap_or_default())
    }
}

/// Decode the first JSON value in `body`.
///
/// A literal `null` yields the default request and anything after the first
/// value is ignored.
fn parse_body<T>(body: &[u8], usage: &'static str) -> ApiResult<T>
where
    T: DeserializeOwned + Default,
{
    match serde_json::Deserializer::from_slice(body)
        .into_iter::<Option<T>>()
        .next()
    {
        Some(Ok(request)) => Ok(request.unwrap_or_default()),
        Some(Err(err)) => {
            warn!(error = %err, "rejected malformed pet request body");
            Err(Error::invalid_request(usage))
        }
        None => {
            warn!("rejected empty pet request body");
            Err(Error::invalid_request(usage))
        }
    }
}

fn reject_invalid(err: PetValidationError) -> Error {
    warn!(error = %err, "rejected invalid pet request");
    Error::invalid_request(err.to_string())
}

async fn ensure_exists(state: &HttpState, id: PetId) -> ApiResult<()> {
    if state.pets.exists_pet(id).await {
        Ok(())
    } else {
        warn!(pet_id = %id, "pet does not exist");
        Err(Error::invalid_request(PET_MISSING))
    }
}

/// List pets, one page at a time.
#[utoipa::path(
    get,
    path = "/api/v1/pet",
    params(ListPetsQuery),
    responses(
        (status = 200, description = "Pets in the requested page", body = PetListBody),
        (status = 404, description = "The page holds no pets", body = String, content_type = "text/plain"),
        (status = 500, description = "Persistence failure", body = String, content_type = "text/plain")
    ),
    tags = ["pets"],
    operation_id = "listPets"
)]
#[get("/pet")]
pub async fn list_pets(
    state: web::Data<HttpState>,
    req: HttpRequest,
) -> ApiResult<web::Json<PetListBody>> {
    let ListPetsQuery {
        limit,
        offset,
        order,
    } = ListPetsQuery::from_query_string(req.query_string());
    let page = state
        .pets
        .list_pets(
            limit.as_deref().unwrap_or_default(),
            offset.as_deref().unwrap_or_default(),
            order.as_deref().unwrap_or_default(),
        )
        .await?;
    if page.is_empty() {
        return Err(Error::not_found(NO_PETS));
    }
    let (pets, total) = page.into_parts();
    Ok(web::Json(PetListBody {
        pets: pets.into_iter().map(PetBody::from).collect(),
        total,
    }))
}

/// Create a pet.
#[utoipa::path(
    post,
    path = "/api/v1/pet",
    request_body = CreatePetRequest,
    responses(
        (status = 201, description = "Pet created", body = CreatedPetBody),
        (status = 400, description = "Malformed body or blank name", body = String, content_type = "text/plain"),
        (status = 500, description = "Persistence failure", body = String, content_type = "text/plain")
    ),
    tags = ["pets"],
    operation_id = "createPet"
)]
#[post("/pet")]
pub async fn create_pet(state: web::Data<HttpState>, body: web::Bytes) -> ApiResult<HttpResponse> {
    let request: CreatePetRequest = parse_body(&body, CREATE_USAGE)?;
    let pet = NewPet::try_from(request).map_err(reject_invalid)?;
    let id = state.pets.create_pet(pet).await?;
    Ok(HttpResponse::Created().json(CreatedPetBody { id: id.get() }))
}

/// Rename an existing pet.
#[utoipa::path(
    put,
    path = "/api/v1/pet",
    request_body = UpdatePetRequest,
    responses(
        (status = 200, description = "Pet updated"),
        (status = 400, description = "Malformed body, invalid field or unknown pet", body = String, content_type = "text/plain"),
        (status = 500, description = "Persistence failure", body = String, content_type = "text/plain")
    ),
    tags = ["pets"],
    operation_id = "updatePet"
)]
#[put("/pet")]
pub async fn update_pet(state: web::Data<HttpState>, body: web::Bytes) -> ApiResult<HttpResponse> {
    let request: UpdatePetRequest = parse_body(&body, UPDATE_USAGE)?;
    let changes = PetChanges::try_from(request).map_err(reject_invalid)?;
    ensure_exists(&state, changes.id()).await?;
    state.pets.update_pet(changes).await?;
    Ok(HttpResponse::Ok().finish())
}

/// Delete an existing pet.
#[utoipa::path(
    delete,
    path = "/api/v1/pet",
    request_body = DeletePetRequest,
    responses(
        (status = 200, description = "Pet deleted"),
        (status = 400, description = "Malformed body, invalid id or unknown pet", body = String, content_type = "text/plain"),
        (status = 500, description = "Persistence failure", body = String, content_type = "text/plain")
    ),
    tags = ["pets"],
    operation_id = "deletePet"
)]
#[delete("/pet")]
pub async fn delete_pet(state: web::Data<HttpState>, body: web::Bytes) -> ApiResult<HttpResponse> {
    let request: DeletePetRequest = parse_body(&body, DELETE_USAGE)?;
    let id = PetId::try_from(request).map_err(reject_invalid)?;
    ensure_exists(&state, id).await?;
    state.pets.delete_pet(id).await?;
    Ok(HttpResponse::Ok().finish())
}

#[cfg(test)]
#[path = "pets_tests.rs"]
mod tests;
