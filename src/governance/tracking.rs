// Copyright 2025 Cowboy AI, LLC.

//! Creation and modification tracking
//!
//! [`Tracking`] is the embedded identity block. Entities compose it by field
//! and implement [`TrackingEntity`] to expose its operations, so every kind
//! of governed entity shares one implementation of the creator rules.

use crate::entity::DomainEntity;
use crate::errors::{DomainError, DomainResult};
use crate::governance::access::TrackingAccess;
use crate::governance::write_once::{ensure_write_once, write_once};
use crate::identifiers::UserId;
use crate::user::User;
use chrono::{DateTime, Offset, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Accept a timestamp only if it is expressed in UTC
pub fn require_utc<Tz: TimeZone>(time: DateTime<Tz>) -> DomainResult<DateTime<Utc>> {
    let offset = time.offset().fix().local_minus_utc();
    if offset != 0 {
        return Err(DomainError::invalid_argument(format!(
            "time must be given in UTC, got offset of {offset} seconds"
        )));
    }
    Ok(time.with_timezone(&Utc))
}

fn require_identified(user: &User) -> DomainResult<()> {
    if user.is_identified() {
        Ok(())
    } else {
        Err(DomainError::invalid_argument(format!(
            "user '{}' has no identity",
            user.user_name
        )))
    }
}

/// Creation and modification identity of an entity
///
/// Creator and creation date are write-once. The last modification fields
/// are overwritten on every recorded change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tracking {
    creation_date: Option<DateTime<Utc>>,
    creator_user_id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    creator_user: Option<User>,
    last_modification_date: Option<DateTime<Utc>>,
    last_modifier_user_id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_modifier_user: Option<User>,
}

impl Tracking {
    /// Create an empty tracking block for a transient entity
    pub fn new() -> Self {
        Self::default()
    }

    /// When the entity was created
    pub fn creation_date(&self) -> Option<DateTime<Utc>> {
        self.creation_date
    }

    /// Set the creation date; once set it cannot change
    pub fn set_creation_date(&mut self, date: DateTime<Utc>) -> DomainResult<()> {
        write_once(&mut self.creation_date, Some(date), "creation_date")
    }

    /// Key of the user who created the entity
    pub fn creator_user_id(&self) -> UserId {
        self.creator_user_id
    }

    /// Set the creator key; once set it cannot change
    pub fn set_creator_user_id(&mut self, user_id: UserId) -> DomainResult<()> {
        if let Some(creator) = &self.creator_user {
            ensure_write_once(&creator.id, &user_id, "creator_user_id")?;
        }
        write_once(&mut self.creator_user_id, user_id, "creator_user_id")
    }

    /// The user who created the entity, if loaded
    pub fn creator_user(&self) -> Option<&User> {
        self.creator_user.as_ref()
    }

    /// Set the creator reference; once set it cannot change
    ///
    /// Also binds [`Tracking::creator_user_id`] to the user's key.
    pub fn set_creator_user(&mut self, user: Option<User>) -> DomainResult<()> {
        let user = user.ok_or_else(|| DomainError::invalid_argument("creator user is required"))?;
        require_identified(&user)?;
        self.ensure_creator_assignable(&user)?;

        self.creator_user_id = user.id;
        self.creator_user = Some(user);
        Ok(())
    }

    /// When the entity was last modified
    pub fn last_modification_date(&self) -> Option<DateTime<Utc>> {
        self.last_modification_date
    }

    /// Set the last modification date
    pub fn set_last_modification_date(&mut self, date: DateTime<Utc>) {
        self.last_modification_date = Some(date);
    }

    /// Key of the user who last modified the entity
    pub fn last_modifier_user_id(&self) -> UserId {
        self.last_modifier_user_id
    }

    /// Set the last modifier key
    pub fn set_last_modifier_user_id(&mut self, user_id: UserId) {
        if self
            .last_modifier_user
            .as_ref()
            .is_some_and(|user| user.id != user_id)
        {
            self.last_modifier_user = None;
        }
        self.last_modifier_user_id = user_id;
    }

    /// The user who last modified the entity, if loaded
    pub fn last_modifier_user(&self) -> Option<&User> {
        self.last_modifier_user.as_ref()
    }

    /// Set the last modifier reference
    pub fn set_last_modifier_user(&mut self, user: Option<User>) {
        if let Some(user) = &user {
            self.last_modifier_user_id = user.id;
        }
        self.last_modifier_user = user;
    }

    /// Record the creator and the creation time
    ///
    /// Repeating the call with the same user and time is a no-op. Any call
    /// that would change an already recorded creator or creation date fails
    /// with [`DomainError::AccessDenied`] and changes nothing. The first
    /// successful call also stamps the last modification fields.
    pub fn set_creator<Tz: TimeZone>(&mut self, user: &User, time: DateTime<Tz>) -> DomainResult<()> {
        let time = require_utc(time)?;
        require_identified(user)?;
        ensure_write_once(&self.creation_date, &Some(time), "creation_date")?;
        self.ensure_creator_assignable(user)?;

        let first = self.creation_date.is_none() || self.creator_user_id.is_unset();
        self.creation_date = Some(time);
        self.creator_user_id = user.id;
        self.creator_user = Some(user.clone());

        if first {
            tracing::debug!(creator = %user.id, created_at = %time, "Recorded entity creator");
            self.stamp_change(user, time);
        }
        Ok(())
    }

    /// Record a change by a user
    pub fn record_change<Tz: TimeZone>(&mut self, user: &User, time: DateTime<Tz>) -> DomainResult<()> {
        let time = require_utc(time)?;
        self.stamp_change(user, time);
        Ok(())
    }

    /// Whether a creator has been recorded
    pub fn has_creator(&self) -> bool {
        !self.creator_user_id.is_unset()
    }

    fn stamp_change(&mut self, user: &User, time: DateTime<Utc>) {
        self.last_modification_date = Some(time);
        self.last_modifier_user_id = user.id;
        self.last_modifier_user = Some(user.clone());
    }

    fn ensure_creator_assignable(&self, user: &User) -> DomainResult<()> {
        ensure_write_once(&self.creator_user_id, &user.id, "creator_user_id")?;
        if let Some(creator) = &self.creator_user {
            ensure_write_once(&creator.id, &user.id, "creator_user")?;
        }
        Ok(())
    }
}

/// Capability of entities carrying a [`Tracking`] block
///
/// Every operation delegates to the embedded block. The block can be read
/// through [`TrackingEntity::tracking`] but never replaced from outside the
/// crate:
///
/// ```compile_fail
/// use cim_governance::{CreditSystemId, Decimal, Remittance, Tracking};
///
/// let mut remittance = Remittance::new("TX-1", CreditSystemId::new(5), Decimal::ZERO).unwrap();
/// *remittance.tracking_mut() = Tracking::new();
/// ```
pub trait TrackingEntity: TrackingAccess {
    /// The embedded tracking block
    fn tracking(&self) -> &Tracking;

    /// When the entity was created
    fn creation_date(&self) -> Option<DateTime<Utc>> {
        self.tracking().creation_date()
    }

    /// Key of the user who created the entity
    fn creator_user_id(&self) -> UserId {
        self.tracking().creator_user_id()
    }

    /// When the entity was last modified
    fn last_modification_date(&self) -> Option<DateTime<Utc>> {
        self.tracking().last_modification_date()
    }

    /// Key of the user who last modified the entity
    fn last_modifier_user_id(&self) -> UserId {
        self.tracking().last_modifier_user_id()
    }

    /// Record the creator and the creation time, see [`Tracking::set_creator`]
    fn set_creator<Tz: TimeZone>(&mut self, user: &User, time: DateTime<Tz>) -> DomainResult<()>
    where
        Self: Sized,
    {
        self.tracking_mut().set_creator(user, time)
    }

    /// Record a change by a user
    fn record_change<Tz: TimeZone>(&mut self, user: &User, time: DateTime<Tz>) -> DomainResult<()>
    where
        Self: Sized,
    {
        self.tracking_mut().record_change(user, time)
    }
}
