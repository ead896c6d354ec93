// Copyright 2025 Cowboy AI, LLC.

//! Entity identity: typed keys and the entity capability trait

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// A typed entity key using phantom types for type safety
///
/// Keys are assigned by the persistence layer. The value `0` is the
/// "unset" sentinel carried by transient entities and by relations that
/// have not been claimed yet.
///
/// # Examples
///
/// ```rust
/// use cim_governance::EntityId;
///
/// struct Invoice;
/// struct Customer;
///
/// let invoice_id = EntityId::<Invoice>::new(42);
/// assert!(!invoice_id.is_unset());
/// assert!(EntityId::<Customer>::UNSET.is_unset());
///
/// // These are different types - won't compile if mixed up:
/// // let _: EntityId<Customer> = invoice_id; // ERROR!
/// let casted: EntityId<Customer> = invoice_id.cast();
/// assert_eq!(casted.value(), 42);
/// ```
pub struct EntityId<T> {
    value: i64,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> EntityId<T> {
    /// The unset sentinel
    pub const UNSET: Self = Self {
        value: 0,
        _phantom: PhantomData,
    };

    /// Create a key from its raw value
    pub const fn new(value: i64) -> Self {
        Self {
            value,
            _phantom: PhantomData,
        }
    }

    /// Get the raw value
    pub const fn value(&self) -> i64 {
        self.value
    }

    /// Whether this key is the unset sentinel
    pub const fn is_unset(&self) -> bool {
        self.value == 0
    }

    /// Convert to a different entity key type (use with caution)
    pub fn cast<U>(self) -> EntityId<U> {
        EntityId::new(self.value)
    }
}

// Manual impls keep the marker type free of trait bounds.
impl<T> Clone for EntityId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for EntityId<T> {}

impl<T> PartialEq for EntityId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for EntityId<T> {}

impl<T> PartialOrd for EntityId<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for EntityId<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T> Hash for EntityId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> Default for EntityId<T> {
    fn default() -> Self {
        Self::UNSET
    }
}

impl<T> fmt::Debug for EntityId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.value)
    }
}

impl<T> fmt::Display for EntityId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<i64> for EntityId<T> {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl<T> From<EntityId<T>> for i64 {
    fn from(id: EntityId<T>) -> Self {
        id.value
    }
}

impl<T> Serialize for EntityId<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.value)
    }
}

impl<'de, T> Deserialize<'de> for EntityId<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i64::deserialize(deserializer).map(Self::new)
    }
}

/// Trait for domain entities with identity
///
/// Implemented by every entity that can be the target of a relation
/// (creator, owner, segregation) or a member of an [`EntitySet`].
///
/// [`EntitySet`]: crate::EntitySet
pub trait DomainEntity: Sized + Send + Sync {
    /// The marker type for this entity
    type IdType;

    /// Get the entity's key
    fn id(&self) -> EntityId<Self::IdType>;

    /// Whether the entity has been assigned a key
    fn is_identified(&self) -> bool {
        !self.id().is_unset()
    }
}

// Marker types for entity keys
/// Marker for users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserMarker;

/// Marker for segregations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SegregationMarker;

/// Marker for dispositions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DispositionMarker;

/// Marker for disposition types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DispositionTypeMarker;

/// Marker for manager access records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ManagerAccessMarker;

/// Marker for workflow graphs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkflowGraphMarker;

/// Marker for state groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateGroupMarker;

/// Marker for workflow states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateMarker;

/// Marker for state transition records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateTransitionMarker;

/// Marker for attachments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttachmentMarker;

/// Marker for attachment contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttachmentContentMarker;

/// Marker for double-entry postings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostingMarker;

/// Marker for remittances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemittanceMarker;

/// Marker for credit systems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreditSystemMarker;

/// Marker for invoice lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvoiceLineMarker;

/// Marker for invoice line tax components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaxComponentMarker;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_unset_sentinel() {
        let id = EntityId::<UserMarker>::default();
        assert!(id.is_unset());
        assert_eq!(id, EntityId::UNSET);
        assert_eq!(id.value(), 0);

        assert!(!EntityId::<UserMarker>::new(7).is_unset());
    }

    /// Test EntityId type safety with phantom types
    ///
    /// ```mermaid
    /// graph TD
    ///     A[EntityId<UserMarker>] -->|cast| B[EntityId<DispositionMarker>]
    ///     A -->|Same value| B
    /// ```
    #[test]
    fn test_entity_id_cast_keeps_value() {
        let user_id = EntityId::<UserMarker>::new(11);
        let disposition_id: EntityId<DispositionMarker> = user_id.cast();

        assert_eq!(user_id.value(), disposition_id.value());
    }

    #[test]
    fn test_entity_id_serializes_as_plain_integer() {
        let id = EntityId::<SegregationMarker>::new(5);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "5");

        let back: EntityId<SegregationMarker> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_entity_id_display_and_ordering() {
        let a = EntityId::<StateMarker>::new(1);
        let b = EntityId::<StateMarker>::new(2);

        assert!(a < b);
        assert_eq!(format!("{b}"), "2");
        assert_eq!(format!("{a:?}"), "EntityId(1)");
    }

    #[test]
    fn test_entity_id_as_key() {
        let mut map = HashMap::new();
        map.insert(EntityId::<InvoiceLineMarker>::new(1), "first");
        map.insert(EntityId::<InvoiceLineMarker>::new(2), "second");

        assert_eq!(map.get(&EntityId::new(1)), Some(&"first"));
        assert_eq!(map.len(), 2);
    }
}
