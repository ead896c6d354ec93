// Copyright 2025 Cowboy AI, LLC.

//! Segregations: the tenant-like scope every governed entity belongs to

use crate::entity::{DomainEntity, SegregationMarker};
use crate::errors::{DomainError, DomainResult};
use crate::governance::write_once::{ensure_write_once, write_once};
use crate::identifiers::SegregationId;
use serde::{Deserialize, Serialize};

/// An isolation boundary, for example a company on a shared platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segregation {
    /// The segregation's key
    pub id: SegregationId,
    /// Display name
    pub name: String,
}

impl Segregation {
    /// Create a segregation handle
    pub fn new(id: SegregationId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl DomainEntity for Segregation {
    type IdType = SegregationMarker;

    fn id(&self) -> SegregationId {
        self.id
    }
}

/// Contract for entities belonging to a segregation
///
/// The segregation key is read-only at this level: it is fixed when the
/// entity is attached to its segregation, or derived from a parent.
pub trait SegregatedEntity {
    /// Key of the segregation the entity belongs to
    fn segregation_id(&self) -> SegregationId;

    /// Whether the entity belongs to `segregation_id`
    fn belongs_to(&self, segregation_id: SegregationId) -> bool {
        !segregation_id.is_unset() && self.segregation_id() == segregation_id
    }
}

/// The write-once link from an entity to its segregation
///
/// The reference is a navigation aid only; it must always agree with the key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SegregationBindingRecord")]
pub struct SegregationBinding {
    segregation_id: SegregationId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    segregation: Option<Segregation>,
}

#[derive(Deserialize)]
struct SegregationBindingRecord {
    segregation_id: SegregationId,
    #[serde(default)]
    segregation: Option<Segregation>,
}

impl TryFrom<SegregationBindingRecord> for SegregationBinding {
    type Error = DomainError;

    fn try_from(record: SegregationBindingRecord) -> Result<Self, Self::Error> {
        if let Some(segregation) = &record.segregation {
            if segregation.id != record.segregation_id {
                return Err(DomainError::InvalidArgument(format!(
                    "stored segregation {} does not match segregation_id {}",
                    segregation.id, record.segregation_id
                )));
            }
        }
        Ok(Self {
            segregation_id: record.segregation_id,
            segregation: record.segregation,
        })
    }
}

impl SegregationBinding {
    /// A binding fixed at construction
    pub fn bound_to(segregation_id: SegregationId) -> Self {
        Self {
            segregation_id,
            segregation: None,
        }
    }

    /// A binding not yet attached to any segregation
    pub fn unbound() -> Self {
        Self::default()
    }

    /// Key of the bound segregation, unset while unbound
    pub fn segregation_id(&self) -> SegregationId {
        self.segregation_id
    }

    /// The bound segregation, if loaded
    pub fn segregation(&self) -> Option<&Segregation> {
        self.segregation.as_ref()
    }

    /// Whether a segregation has been bound
    pub fn is_bound(&self) -> bool {
        !self.segregation_id.is_unset()
    }

    /// Bind the segregation key; once bound it cannot change
    pub fn bind(&mut self, segregation_id: SegregationId) -> DomainResult<()> {
        write_once(&mut self.segregation_id, segregation_id, "segregation_id")
    }

    /// Attach the segregation reference
    ///
    /// An unbound binding adopts the reference's key; a bound one only
    /// accepts the segregation it is already bound to.
    pub fn attach(&mut self, segregation: Segregation) -> DomainResult<()> {
        if !segregation.is_identified() {
            return Err(DomainError::invalid_argument(
                "segregation must have an identity",
            ));
        }
        ensure_write_once(&self.segregation_id, &segregation.id, "segregation_id")?;

        self.segregation_id = segregation.id;
        self.segregation = Some(segregation);
        Ok(())
    }
}

impl SegregatedEntity for SegregationBinding {
    fn segregation_id(&self) -> SegregationId {
        self.segregation_id
    }
}
