// Copyright 2025 Cowboy AI, LLC.

//! Write-once governance of entity identity
//!
//! This module holds the rules every governed entity shares:
//! - **Tracking**: creator and creation date recorded once, modifications on every change
//! - **Ownership**: an owning user or disposition claimed once and never re-assigned
//! - **Segregation**: the tenant scope an entity is bound to for its whole life
//! - **Disposition**: the role a user holds in a segregation
//!
//! Each rule lives in an embedded block ([`Tracking`], [`Ownership`],
//! [`SegregationBinding`], [`DispositionTracking`]) that entity types compose
//! by field, plus a capability trait whose default methods delegate to it.
//! The blocks only change through their checked setters: the capability
//! traits expose read access, and mutable access stays inside the crate.
//! [`UserTracking`] and [`DispositionTracking`] implement their capability
//! traits themselves, so entities outside this crate embed one of them and
//! govern through it.

pub(crate) mod access;
pub mod disposition;
pub mod disposition_tracking;
pub mod ownership;
pub mod segregation;
pub mod tracking;
pub mod write_once;

pub use disposition::{Disposition, DispositionStatus, DispositionType};
pub use disposition_tracking::{DispositionTracking, DispositionTrackingEntity};
pub use ownership::{Ownership, UserTracking, UserTrackingEntity};
pub use segregation::{SegregatedEntity, Segregation, SegregationBinding};
pub use tracking::{require_utc, Tracking, TrackingEntity};
pub use write_once::{bind_to_parent, ensure_write_once, write_once, Sentinel};
