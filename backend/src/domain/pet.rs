//! Pet entity and its validated field types.
//!
//! A persisted pet always carries a positive [`PetId`]; a pet that has not
//! been stored yet is a [`NewPet`] and has no identifier at all. Names are
//! validated when a client supplies them, so nothing blank is ever written.
//! Rows already in the store are taken as they are.

use std::fmt;

use chrono::{DateTime, FixedOffset, Local};

/// Validation failures for pet fields.
///
/// The display strings are the client-facing messages returned by the HTTP
/// adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PetValidationError {
    /// The name was the empty string.
    #[error("name cannot be blank")]
    BlankName,
    /// The identifier was zero or negative.
    #[error("id should be more than 0")]
    NonPositiveId,
}

/// Database-assigned pet identifier; always strictly positive.
///
/// # Examples
/// ```
/// use pets::domain::{PetId, PetValidationError};
///
/// assert_eq!(PetId::new(7).map(PetId::get), Ok(7));
/// assert_eq!(PetId::new(0), Err(PetValidationError::NonPositiveId));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PetId(i64);

impl PetId {
    /// Validate and wrap a raw identifier.
    pub fn new(raw: i64) -> Result<Self, PetValidationError> {
        if raw > 0 {
            Ok(Self(raw))
        } else {
            Err(PetValidationError::NonPositiveId)
        }
    }

    /// The raw identifier.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pet name; never the empty string when it comes from a client.
///
/// Only emptiness is rejected. Whitespace-only names are accepted as given.
/// Names read back from storage go through [`PetName::from_stored`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PetName(String);

impl PetName {
    /// Validate and wrap a name.
    pub fn new(name: impl Into<String>) -> Result<Self, PetValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(PetValidationError::BlankName);
        }
        Ok(Self(name))
    }

    /// Wrap a name read back from storage without checking it.
    ///
    /// The store does not forbid `''`, and a row written outside this service
    /// must still list, update and delete like any other.
    pub fn from_stored(name: String) -> Self {
        Self(name)
    }

    /// Borrow the name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PetName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for PetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stored pet.
///
/// ## Invariants
/// - `created_at` is set once on insert and never changes.
/// - `updated_at` is `None` until the first update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pet {
    id: PetId,
    name: PetName,
    created_at: DateTime<FixedOffset>,
    updated_at: Option<DateTime<FixedOffset>>,
}

impl Pet {
    /// Assemble a pet from stored values.
    pub fn new(
        id: PetId,
        name: PetName,
        created_at: DateTime<FixedOffset>,
        updated_at: Option<DateTime<FixedOffset>>,
    ) -> Self {
        Self {
            id,
            name,
            created_at,
            updated_at,
        }
    }

    /// Identifier.
    pub fn id(&self) -> PetId {
        self.id
    }

    /// Name.
    pub fn name(&self) -> &PetName {
        &self.name
    }

    /// Creation time.
    pub fn created_at(&self) -> DateTime<FixedOffset> {
        self.created_at
    }

    /// Last update time, if the pet was ever updated.
    pub fn updated_at(&self) -> Option<DateTime<FixedOffset>> {
        self.updated_at
    }

    /// Re-express both timestamps in the process's local time zone.
    ///
    /// The instants are unchanged; only the UTC offset attached to them is.
    ///
    /// # Examples
    /// ```
    /// use chrono::{DateTime, Local, Offset};
    /// use pets::domain::{Pet, PetId, PetName};
    ///
    /// let created = DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z").unwrap();
    /// let pet = Pet::new(PetId::new(1).unwrap(), PetName::new("Rex").unwrap(), created, None)
    ///     .into_local();
    /// assert_eq!(pet.created_at(), created);
    /// assert_eq!(
    ///     *pet.created_at().offset(),
    ///     created.with_timezone(&Local).offset().fix()
    /// );
    /// ```
    #[must_use]
    pub fn into_local(self) -> Self {
        Self {
            created_at: to_local(self.created_at),
            updated_at: self.updated_at.map(to_local),
            ..self
        }
    }
}

fn to_local(at: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    at.with_timezone(&Local).fixed_offset()
}

/// A pet that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPet {
    name: PetName,
}

impl NewPet {
    /// Describe a pet to create.
    pub fn new(name: PetName) -> Self {
        Self { name }
    }

    /// Name to store.
    pub fn name(&self) -> &PetName {
        &self.name
    }
}

/// Replacement values for an existing pet.
///
/// Only the name is caller-controlled; `updated_at` is stamped by the
/// repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetChanges {
    id: PetId,
    name: PetName,
}

impl PetChanges {
    /// Describe an update of `id` to `name`.
    pub fn new(id: PetId, name: PetName) -> Self {
        Self { id, name }
    }

    /// Target pet.
    pub fn id(&self) -> PetId {
        self.id
    }

    /// New name.
    pub fn name(&self) -> &PetName {
        &self.name
    }
}
