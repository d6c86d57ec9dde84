//! PostgreSQL-backed `PetRepository` implementation using Diesel.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use mockable::Clock;
use pagination::{PageRequest, SortOrder};
use tracing::debug;

use crate::domain::ports::{PetRepository, PetRepositoryError};
use crate::domain::{NewPet, Pet, PetChanges, PetId, PetName};

use super::models::{NewPetRow, PetChangeset, PetRow};
use super::pool::{DbPool, PoolError};
use super::schema::pets;

/// Diesel-backed implementation of the [`PetRepository`] port.
///
/// Timestamps come from the injected clock rather than the database so tests
/// can pin them.
#[derive(Clone)]
pub struct DieselPetRepository {
    pool: DbPool,
    clock: Arc<dyn Clock>,
}

impl DieselPetRepository {
    /// Create a repository over `pool`, stamping rows with `clock`.
    pub fn new(pool: DbPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }
}

fn map_pool_error(error: PoolError) -> PetRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            PetRepositoryError::connection(message)
        }
        PoolError::Closed => PetRepositoryError::connection("connection pool is closed"),
    }
}

fn map_diesel_error(error: diesel::result::Error) -> PetRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(error = %error, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => PetRepositoryError::NotFound,
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            PetRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(_, info) => PetRepositoryError::query(info.message()),
        other => PetRepositoryError::query(other.to_string()),
    }
}

fn row_to_pet(row: PetRow) -> Result<Pet, PetRepositoryError> {
    let id = PetId::new(row.id)
        .map_err(|err| PetRepositoryError::query(format!("stored pet {}: {err}", row.id)))?;
    Ok(Pet::new(
        id,
        PetName::from_stored(row.name),
        row.created_at.fixed_offset(),
        row.updated_at.map(|at| at.fixed_offset()),
    ))
}

/// Build the list statement for one page.
///
/// `ORDER BY` only for a parsed order, `LIMIT` only for a non-zero limit and
/// `OFFSET` always.
fn list_query(page: &PageRequest) -> pets::BoxedQuery<'static, Pg> {
    let mut query = pets::table.into_boxed();
    query = match page.order() {
        Some(SortOrder::Ascending) => query.order(pets::id.asc()),
        Some(SortOrder::Descending) => query.order(pets::id.desc()),
        None => query,
    };
    if let Some(limit) = page.limit() {
        query = query.limit(limit);
    }
    query.offset(page.offset())
}

fn new_row<'a>(pet: &'a NewPet, clock: &dyn Clock) -> NewPetRow<'a> {
    NewPetRow {
        name: pet.name().as_str(),
        created_at: clock.utc(),
        updated_at: None,
    }
}

fn changeset<'a>(changes: &'a PetChanges, clock: &dyn Clock) -> PetChangeset<'a> {
    PetChangeset {
        name: changes.name().as_str(),
        updated_at: clock.utc(),
    }
}

#[async_trait]
impl PetRepository for DieselPetRepository {
    async fn fetch_one(&self, id: PetId) -> Result<Option<Pet>, PetRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = pets::table
            .find(id.get())
            .select(PetRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_pet).transpose()
    }

    async fn fetch_many(&self, page: &PageRequest) -> Result<Vec<Pet>, PetRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<PetRow> = list_query(page)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_pet).collect()
    }

    async fn insert(&self, pet: &NewPet) -> Result<PetId, PetRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id: i64 = diesel::insert_into(pets::table)
            .values(&new_row(pet, self.clock.as_ref()))
            .returning(pets::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        PetId::new(id).map_err(|err| PetRepositoryError::query(format!("assigned id {id}: {err}")))
    }

    async fn update(&self, changes: &PetChanges) -> Result<(), PetRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let affected = diesel::update(pets::table.find(changes.id().get()))
            .set(&changeset(changes, self.clock.as_ref()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if affected == 0 {
            debug!(pet_id = %changes.id(), "update matched no rows");
        }
        Ok(())
    }

    async fn delete(&self, id: PetId) -> Result<(), PetRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let affected = diesel::delete(pets::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if affected == 0 {
            debug!(pet_id = %id, "delete matched no rows");
        }
        Ok(())
    }

    async fn shutdown(&self) {
        self.pool.shutdown();
    }
}
