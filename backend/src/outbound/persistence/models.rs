//! Internal Diesel row structs for the `pets` table.
//!
//! These types never leave the persistence layer.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::pets;

/// Row struct for reading from the pets table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = pets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PetRow {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Insertable struct for new pet records.
///
/// `updated_at` is written as an explicit `NULL`, never `DEFAULT`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = pets)]
#[diesel(treat_none_as_default_value = false)]
pub(crate) struct NewPetRow<'a> {
    pub name: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Changeset for renaming a pet.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = pets)]
pub(crate) struct PetChangeset<'a> {
    pub name: &'a str,
    pub updated_at: DateTime<Utc>,
}
