// Copyright 2025 Cowboy AI, LLC.

//! Write-once ownership of an entity by a user or a disposition

use crate::entity::{DomainEntity, EntityId};
use crate::errors::{DomainError, DomainResult};
use crate::governance::access::{TrackingAccess, UserOwnershipAccess};
use crate::governance::tracking::{Tracking, TrackingEntity};
use crate::governance::write_once::{ensure_write_once, write_once};
use crate::identifiers::UserId;
use crate::user::User;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The owner relation of an entity
///
/// An unset owner key means the entity is unowned and will be claimed by the
/// acting user when it is first saved. Once the key is set it never changes.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "OwnershipRecord<R>",
    bound(serialize = "R: Serialize", deserialize = "R: Deserialize<'de>")
)]
pub struct Ownership<R: DomainEntity> {
    owner_id: EntityId<R::IdType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    owner: Option<R>,
}

/// Stored form of [`Ownership`], checked before it becomes one
#[derive(Deserialize)]
#[serde(bound(deserialize = "R: Deserialize<'de>"))]
struct OwnershipRecord<R: DomainEntity> {
    owner_id: EntityId<R::IdType>,
    #[serde(default)]
    owner: Option<R>,
}

impl<R: DomainEntity> TryFrom<OwnershipRecord<R>> for Ownership<R> {
    type Error = DomainError;

    fn try_from(record: OwnershipRecord<R>) -> Result<Self, Self::Error> {
        if let Some(owner) = &record.owner {
            if owner.id() != record.owner_id {
                return Err(DomainError::InvalidArgument(format!(
                    "stored owner {} does not match owner_id {}",
                    owner.id(),
                    record.owner_id
                )));
            }
        }
        Ok(Self {
            owner_id: record.owner_id,
            owner: record.owner,
        })
    }
}

impl<R: DomainEntity> Ownership<R> {
    /// An unowned relation
    pub fn unowned() -> Self {
        Self {
            owner_id: EntityId::UNSET,
            owner: None,
        }
    }

    /// A relation already owned by `owner_id`
    pub fn owned_by(owner_id: EntityId<R::IdType>) -> Self {
        Self {
            owner_id,
            owner: None,
        }
    }

    /// Key of the owner, unset while unowned
    pub fn owner_id(&self) -> EntityId<R::IdType> {
        self.owner_id
    }

    /// The owner, if loaded
    pub fn owner(&self) -> Option<&R> {
        self.owner.as_ref()
    }

    /// Whether no owner has been recorded yet
    pub fn is_unowned(&self) -> bool {
        self.owner_id.is_unset()
    }

    /// Set the owner key; once set it cannot change
    pub fn set_owner_id(&mut self, owner_id: EntityId<R::IdType>, field: &'static str) -> DomainResult<()> {
        if let Some(owner) = &self.owner {
            ensure_write_once(&owner.id(), &owner_id, field)?;
        }
        write_once(&mut self.owner_id, owner_id, field)
    }

    /// Set the owner reference; once set it cannot change
    ///
    /// `None` and owners without identity are rejected with
    /// [`DomainError::InvalidArgument`]. The owner key is bound to the
    /// reference's key.
    pub fn set_owner(&mut self, owner: Option<R>, field: &'static str) -> DomainResult<()> {
        let owner = owner.ok_or_else(|| DomainError::invalid_argument(format!("{field} is required")))?;
        if !owner.is_identified() {
            return Err(DomainError::invalid_argument(format!(
                "{field} must reference an entity with identity"
            )));
        }
        self.ensure_assignable(owner.id(), field)?;

        if self.owner_id.is_unset() {
            tracing::debug!(field, owner = %owner.id(), "Claimed ownership");
        }
        self.owner_id = owner.id();
        self.owner = Some(owner);
        Ok(())
    }

    /// Check that `owner_id` could become the owner without changing anything
    pub fn ensure_assignable(&self, owner_id: EntityId<R::IdType>, field: &'static str) -> DomainResult<()> {
        ensure_write_once(&self.owner_id, &owner_id, field)?;
        if let Some(owner) = &self.owner {
            ensure_write_once(&owner.id(), &owner_id, field)?;
        }
        Ok(())
    }

    /// Whether `owner_id` owns the entity, or will once it is saved
    pub fn is_owned_by(&self, owner_id: EntityId<R::IdType>) -> bool {
        // An unowned entity is claimed by the acting identity on save.
        self.owner_id.is_unset() || self.owner_id == owner_id
    }

    /// Whether `owner` owns the entity, or will once it is saved
    pub fn is_owned_by_entity(&self, owner: &R) -> bool {
        self.is_owned_by(owner.id())
    }
}

impl<R: DomainEntity> Default for Ownership<R> {
    fn default() -> Self {
        Self::unowned()
    }
}

impl<R: DomainEntity + fmt::Debug> fmt::Debug for Ownership<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ownership")
            .field("owner_id", &self.owner_id)
            .field("owner", &self.owner)
            .finish()
    }
}

/// Ownership by a user together with change tracking
///
/// Entities outside this crate embed a `UserTracking` and govern through
/// its [`UserTrackingEntity`] implementation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserTracking {
    ownership: Ownership<User>,
    tracking: Tracking,
}

impl UserTracking {
    /// Tracking block for a transient, unowned entity
    pub fn new() -> Self {
        Self::default()
    }
}

impl TrackingEntity for UserTracking {
    fn tracking(&self) -> &Tracking {
        &self.tracking
    }
}

impl TrackingAccess for UserTracking {
    fn tracking_mut(&mut self) -> &mut Tracking {
        &mut self.tracking
    }
}

impl UserTrackingEntity for UserTracking {
    fn user_ownership(&self) -> &Ownership<User> {
        &self.ownership
    }
}

impl UserOwnershipAccess for UserTracking {
    fn user_ownership_mut(&mut self) -> &mut Ownership<User> {
        &mut self.ownership
    }
}

/// Capability of entities owned by a user
pub trait UserTrackingEntity: TrackingEntity + UserOwnershipAccess {
    /// The embedded owning user relation
    fn user_ownership(&self) -> &Ownership<User>;

    /// Key of the owning user, unset while unowned
    fn owning_user_id(&self) -> UserId {
        self.user_ownership().owner_id()
    }

    /// The owning user, if loaded
    fn owning_user(&self) -> Option<&User> {
        self.user_ownership().owner()
    }

    /// Set the owning user key; once set it cannot change
    fn set_owning_user_id(&mut self, user_id: UserId) -> DomainResult<()> {
        self.user_ownership_mut().set_owner_id(user_id, "owning_user_id")
    }

    /// Set the owning user; once set it cannot change
    fn set_owning_user(&mut self, user: Option<User>) -> DomainResult<()> {
        self.user_ownership_mut().set_owner(user, "owning_user")
    }

    /// Whether the user with `user_id` owns the entity, or will once it is saved
    fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_ownership().is_owned_by(user_id)
    }

    /// Whether `user` owns the entity, or will once it is saved
    fn is_owned_by_user(&self, user: &User) -> bool {
        self.user_ownership().is_owned_by_entity(user)
    }
}
