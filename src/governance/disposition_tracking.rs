// Copyright 2025 Cowboy AI, LLC.

//! Entities owned by a disposition rather than by a literal user
//!
//! Such entities are created "under a role": every user holding the owning
//! disposition shares them. They belong to the disposition's segregation and
//! carry full change tracking.

use crate::entity::DomainEntity;
use crate::errors::{DomainError, DomainResult};
use crate::governance::access::{DispositionTrackingAccess, TrackingAccess};
use crate::governance::disposition::Disposition;
use crate::governance::ownership::Ownership;
use crate::governance::segregation::{SegregatedEntity, SegregationBinding};
use crate::governance::tracking::{Tracking, TrackingEntity};
use crate::identifiers::{DispositionId, SegregationId};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Segregation, owning disposition and tracking of an entity
///
/// Entities outside this crate embed a `DispositionTracking` and govern
/// through its [`DispositionTrackingEntity`] implementation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DispositionTracking {
    segregation: SegregationBinding,
    ownership: Ownership<Disposition>,
    tracking: Tracking,
}

impl DispositionTracking {
    /// Block for a transient entity in `segregation_id`
    pub fn new(segregation_id: SegregationId) -> Self {
        Self {
            segregation: SegregationBinding::bound_to(segregation_id),
            ownership: Ownership::unowned(),
            tracking: Tracking::new(),
        }
    }

    /// Make `disposition` the owner
    ///
    /// On top of the write-once rule, the disposition must belong to the
    /// entity's segregation; an unbound entity adopts it.
    pub fn set_owning_disposition(&mut self, disposition: Option<Disposition>) -> DomainResult<()> {
        let disposition = disposition
            .ok_or_else(|| DomainError::invalid_argument("owning_disposition is required"))?;
        if !disposition.is_identified() {
            return Err(DomainError::invalid_argument(
                "owning_disposition must reference an entity with identity",
            ));
        }
        self.ownership
            .ensure_assignable(disposition.id(), "owning_disposition")?;

        let disposition_segregation = disposition.segregation_id();
        if self.segregation.is_bound()
            && !disposition_segregation.is_unset()
            && disposition_segregation != self.segregation.segregation_id()
        {
            warn!(
                entity_segregation = %self.segregation.segregation_id(),
                disposition_segregation = %disposition_segregation,
                "Rejected owning disposition from another segregation"
            );
            return Err(DomainError::access_denied(
                "owning_disposition",
                format!(
                    "disposition belongs to segregation {disposition_segregation}, entity to {}",
                    self.segregation.segregation_id()
                ),
            ));
        }

        if !disposition_segregation.is_unset() {
            self.segregation.bind(disposition_segregation)?;
        }
        self.ownership.set_owner(Some(disposition), "owning_disposition")
    }

    /// The segregation binding
    pub fn segregation_binding(&self) -> &SegregationBinding {
        &self.segregation
    }

    /// The owning disposition relation
    pub fn ownership(&self) -> &Ownership<Disposition> {
        &self.ownership
    }
}

impl SegregatedEntity for DispositionTracking {
    fn segregation_id(&self) -> SegregationId {
        self.segregation.segregation_id()
    }
}

impl TrackingEntity for DispositionTracking {
    fn tracking(&self) -> &Tracking {
        &self.tracking
    }
}

impl TrackingAccess for DispositionTracking {
    fn tracking_mut(&mut self) -> &mut Tracking {
        &mut self.tracking
    }
}

impl DispositionTrackingEntity for DispositionTracking {
    fn disposition_tracking(&self) -> &DispositionTracking {
        self
    }
}

impl DispositionTrackingAccess for DispositionTracking {
    fn disposition_tracking_mut(&mut self) -> &mut DispositionTracking {
        self
    }
}

/// Capability of entities owned by a disposition within a segregation
pub trait DispositionTrackingEntity:
    SegregatedEntity + TrackingEntity + DispositionTrackingAccess
{
    /// The embedded block
    fn disposition_tracking(&self) -> &DispositionTracking;

    /// Key of the owning disposition, unset while unowned
    fn owning_disposition_id(&self) -> DispositionId {
        self.disposition_tracking().ownership.owner_id()
    }

    /// The owning disposition, if loaded
    fn owning_disposition(&self) -> Option<&Disposition> {
        self.disposition_tracking().ownership.owner()
    }

    /// Set the owning disposition key; once set it cannot change
    fn set_owning_disposition_id(&mut self, disposition_id: DispositionId) -> DomainResult<()> {
        self.disposition_tracking_mut()
            .ownership
            .set_owner_id(disposition_id, "owning_disposition_id")
    }

    /// Set the owning disposition; once set it cannot change
    fn set_owning_disposition(&mut self, disposition: Option<Disposition>) -> DomainResult<()> {
        DispositionTracking::set_owning_disposition(self.disposition_tracking_mut(), disposition)
    }

    /// Whether the disposition with `disposition_id` owns the entity, or will once it is saved
    fn is_owned_by_disposition(&self, disposition_id: DispositionId) -> bool {
        self.disposition_tracking()
            .ownership
            .is_owned_by(disposition_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::governance::disposition::DispositionType;
    use crate::identifiers::DispositionTypeId;

    fn disposition(id: i64, segregation: i64) -> Disposition {
        let mut d = Disposition::new(
            SegregationId::new(segregation),
            DispositionType::new(DispositionTypeId::new(1), "clerk", "Clerk"),
        );
        d.id = DispositionId::new(id);
        d
    }

    #[test]
    fn test_owner_from_same_segregation() {
        let mut block = DispositionTracking::new(SegregationId::new(2));
        block.set_owning_disposition(Some(disposition(10, 2))).unwrap();

        assert_eq!(block.ownership.owner_id(), DispositionId::new(10));
    }

    #[test]
    fn test_owner_from_other_segregation_is_denied() {
        let mut block = DispositionTracking::new(SegregationId::new(2));
        let err = block
            .set_owning_disposition(Some(disposition(10, 3)))
            .unwrap_err();

        assert!(err.is_access_denied());
        assert!(block.ownership.is_unowned());
    }

    #[test]
    fn test_unbound_block_adopts_disposition_segregation() {
        let mut block = DispositionTracking::default();
        block.set_owning_disposition(Some(disposition(10, 7))).unwrap();

        assert_eq!(block.segregation.segregation_id(), SegregationId::new(7));
    }

    #[test]
    fn test_missing_or_transient_owner_is_invalid() {
        let mut block = DispositionTracking::new(SegregationId::new(2));
        assert!(block.set_owning_disposition(None).unwrap_err().is_invalid_argument());
        assert!(block
            .set_owning_disposition(Some(disposition(0, 2)))
            .unwrap_err()
            .is_invalid_argument());
    }

    #[test]
    fn test_block_governs_through_capability_trait() {
        let mut block = DispositionTracking::new(SegregationId::new(2));
        DispositionTrackingEntity::set_owning_disposition(&mut block, Some(disposition(10, 2))).unwrap();

        assert_eq!(block.owning_disposition_id(), DispositionId::new(10));
        assert!(block
            .set_owning_disposition_id(DispositionId::new(11))
            .unwrap_err()
            .is_access_denied());
        assert!(block.belongs_to(SegregationId::new(2)));
    }
}
