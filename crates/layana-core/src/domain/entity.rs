//! Domain Layer - Core Entity Traits
//!
//! Every managed collection (treatments, team members, FAQs, ...) is made of
//! entities with a server-assigned id and a 1-based `index` that defines the
//! persisted order inside the collection or its parent scope.

use std::fmt::{Debug, Display};
use std::hash::Hash;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::validation::{FieldError, FormValues};

/// Core trait for all domain entities
pub trait Entity: Sized + Clone + 'static {
    /// The type of the entity's unique identifier
    type Id: Copy + Eq + Hash + Debug + Display + Serialize + DeserializeOwned + 'static;

    /// Returns the entity's unique identifier
    fn id(&self) -> Self::Id;
}

/// An entity with a server-persisted position.
///
/// The reorder protocol only ever looks at `id` and `index`.
pub trait Orderable: Entity {
    /// 1-based position inside the collection (or scope)
    fn index(&self) -> u32;

    fn set_index(&mut self, index: u32);
}

/// Create/update payload for a resource.
pub trait Draft: Serialize + DeserializeOwned + Clone + Debug + Default + PartialEq {
    /// Check value rules (lengths, ranges, formats)
    fn validate(&self) -> Result<(), Vec<FieldError>>;

    /// Parse raw form input. Type errors are reported first; value rules
    /// are only checked once every field parsed.
    fn from_form(values: &FormValues) -> Result<Self, Vec<FieldError>>;

    /// Render back into form input for editing
    fn to_form(&self) -> FormValues;

    /// Parent scope this draft belongs to, for scoped collections
    fn scope_id(&self) -> Option<u32> {
        None
    }
}

/// A REST collection of orderable entities.
pub trait Resource: Orderable + Serialize + DeserializeOwned + Debug + PartialEq {
    /// Path segment of the collection, e.g. `treatments`
    const COLLECTION: &'static str;
    /// Human label used in notifications, e.g. `Treatment`
    const LABEL: &'static str;
    /// Query/body key of the parent scope, e.g. `locationId`
    const SCOPE_KEY: Option<&'static str> = None;

    type Draft: Draft;

    /// Parent scope id of this row, for scoped collections
    fn scope_id(&self) -> Option<u32> {
        None
    }

    fn from_draft(id: Self::Id, index: u32, draft: &Self::Draft) -> Self;

    /// Overwrite display fields, keeping id and index
    fn apply_draft(&mut self, draft: &Self::Draft);

    fn to_draft(&self) -> Self::Draft;
}
