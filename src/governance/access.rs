// Copyright 2025 Cowboy AI, LLC.

//! Mutable access to embedded governance blocks
//!
//! These traits are reachable only inside the crate. Outside callers can
//! change a block solely through the checked setters of the capability
//! traits, never by replacing it.

use crate::governance::disposition_tracking::DispositionTracking;
use crate::governance::ownership::Ownership;
use crate::governance::tracking::Tracking;
use crate::user::User;

/// Mutable access to a [`Tracking`] block
pub trait TrackingAccess {
    /// The embedded tracking block for mutation
    fn tracking_mut(&mut self) -> &mut Tracking;
}

/// Mutable access to an owning user relation
pub trait UserOwnershipAccess {
    /// The embedded owning user relation for mutation
    fn user_ownership_mut(&mut self) -> &mut Ownership<User>;
}

/// Mutable access to a [`DispositionTracking`] block
pub trait DispositionTrackingAccess {
    /// The embedded block for mutation
    fn disposition_tracking_mut(&mut self) -> &mut DispositionTracking;
}
