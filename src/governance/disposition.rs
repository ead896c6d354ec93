// Copyright 2025 Cowboy AI, LLC.

//! Dispositions: the roles users hold within segregations

use crate::entity::{DispositionMarker, DispositionTypeMarker, DomainEntity};
use crate::errors::{DomainError, DomainResult};
use crate::governance::access::{TrackingAccess, UserOwnershipAccess};
use crate::governance::ownership::{Ownership, UserTracking, UserTrackingEntity};
use crate::governance::segregation::{SegregatedEntity, Segregation, SegregationBinding};
use crate::governance::tracking::{Tracking, TrackingEntity};
use crate::identifiers::{DispositionId, DispositionTypeId, SegregationId};
use crate::user::User;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A kind of role a user can hold in a segregation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispositionType {
    /// The type's key
    pub id: DispositionTypeId,
    /// Stable code name, e.g. `accountant`
    pub code_name: String,
    /// Display name
    pub name: String,
}

impl DispositionType {
    /// Create a disposition type handle
    pub fn new(id: DispositionTypeId, code_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            code_name: code_name.into(),
            name: name.into(),
        }
    }
}

impl DomainEntity for DispositionType {
    type IdType = DispositionTypeMarker;

    fn id(&self) -> DispositionTypeId {
        self.id
    }
}

/// Lifecycle state of a disposition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DispositionStatus {
    /// Offered but not yet in effect
    Pending,
    /// In effect
    #[default]
    Active,
    /// Temporarily withheld
    Suspended,
    /// Withdrawn
    Revoked,
}

impl fmt::Display for DispositionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispositionStatus::Pending => write!(f, "Pending"),
            DispositionStatus::Active => write!(f, "Active"),
            DispositionStatus::Suspended => write!(f, "Suspended"),
            DispositionStatus::Revoked => write!(f, "Revoked"),
        }
    }
}

/// The participation of one user in one segregation
///
/// The segregation key is read-only: it is fixed at construction or bound
/// once through [`Disposition::set_segregation`]. The owning user is the
/// participant and is write-once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Disposition {
    /// The key, present once stored
    pub id: DispositionId,
    segregation: SegregationBinding,
    user_tracking: UserTracking,
    disposition_type_id: DispositionTypeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    disposition_type: Option<DispositionType>,
    status: DispositionStatus,
}

impl Disposition {
    /// Create an active disposition of the given type in a segregation
    pub fn new(segregation_id: SegregationId, disposition_type: DispositionType) -> Self {
        Self {
            id: DispositionId::UNSET,
            segregation: SegregationBinding::bound_to(segregation_id),
            user_tracking: UserTracking::new(),
            disposition_type_id: disposition_type.id,
            disposition_type: Some(disposition_type),
            status: DispositionStatus::default(),
        }
    }

    /// Create a disposition whose segregation is set later
    pub fn unbound(disposition_type: DispositionType) -> Self {
        Self::new(SegregationId::UNSET, disposition_type)
    }

    /// Attach the disposition to its segregation; once attached it cannot move
    pub fn set_segregation(&mut self, segregation: Segregation) -> DomainResult<()> {
        self.segregation.attach(segregation)
    }

    /// The segregation, if loaded
    pub fn segregation(&self) -> Option<&Segregation> {
        self.segregation.segregation()
    }

    /// Key of the role type
    pub fn disposition_type_id(&self) -> DispositionTypeId {
        self.disposition_type_id
    }

    /// The role type, if loaded
    pub fn disposition_type(&self) -> Option<&DispositionType> {
        self.disposition_type.as_ref()
    }

    /// Change the role type
    pub fn set_disposition_type(&mut self, disposition_type: DispositionType) -> DomainResult<()> {
        if !disposition_type.is_identified() {
            return Err(DomainError::invalid_argument(
                "disposition type must have an identity",
            ));
        }
        self.disposition_type_id = disposition_type.id;
        self.disposition_type = Some(disposition_type);
        Ok(())
    }

    /// Lifecycle state
    pub fn status(&self) -> DispositionStatus {
        self.status
    }

    /// Change the lifecycle state
    pub fn set_status(&mut self, status: DispositionStatus) {
        if self.status != status {
            tracing::debug!(
                disposition = %self.id,
                from = %self.status,
                to = %status,
                "Disposition status changed"
            );
        }
        self.status = status;
    }

    /// Whether the disposition is currently in effect
    pub fn is_active(&self) -> bool {
        self.status == DispositionStatus::Active
    }
}

impl DomainEntity for Disposition {
    type IdType = DispositionMarker;

    fn id(&self) -> DispositionId {
        self.id
    }
}

impl SegregatedEntity for Disposition {
    fn segregation_id(&self) -> SegregationId {
        self.segregation.segregation_id()
    }
}

impl TrackingEntity for Disposition {
    fn tracking(&self) -> &Tracking {
        self.user_tracking.tracking()
    }
}

impl TrackingAccess for Disposition {
    fn tracking_mut(&mut self) -> &mut Tracking {
        self.user_tracking.tracking_mut()
    }
}

impl UserTrackingEntity for Disposition {
    fn user_ownership(&self) -> &Ownership<User> {
        self.user_tracking.user_ownership()
    }
}

impl UserOwnershipAccess for Disposition {
    fn user_ownership_mut(&mut self) -> &mut Ownership<User> {
        self.user_tracking.user_ownership_mut()
    }
}
