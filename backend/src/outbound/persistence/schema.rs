//! Diesel table definitions for the PostgreSQL schema.
//!
//! Migrations are not managed by this service; the table must already exist
//! with this shape. `diesel print-schema` against a live database should
//! produce the same definition.

diesel::table! {
    /// Pets table.
    pets (id) {
        /// Primary key, assigned by a `BIGSERIAL` sequence.
        id -> Int8,
        /// Non-empty display name.
        name -> Text,
        /// Set once on insert.
        created_at -> Timestamptz,
        /// Null until the first update.
        updated_at -> Nullable<Timestamptz>,
    }
}
