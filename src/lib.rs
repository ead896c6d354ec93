// Copyright 2025 Cowboy AI, LLC.

//! # CIM Governance
//!
//! Write-once governance of entity identity for a multi-tenant business domain.
//!
//! This crate provides the domain model shared by accounting records, workflow
//! graphs and user-owned entities:
//! - **Tracking**: who created an entity and when, recorded exactly once
//! - **Ownership**: an owning user or disposition, claimed once and never moved
//! - **Segregation**: the tenant an entity belongs to for its whole life
//! - **Dispositions**: the role a user holds within a segregation
//! - **Workflow**: graphs of state groups and states walked by an external engine
//! - **Accounting**: invoice lines with tax components, and remittances
//!
//! ## Design Principles
//!
//! 1. **Write-once identity**: an unset field may be set once; re-setting the
//!    same value is a no-op; any other change is [`DomainError::AccessDenied`]
//! 2. **Atomic checks**: every check of a compound operation runs before any write
//! 3. **Type Safety**: phantom-typed [`EntityId`]s keep keys of different kinds apart
//! 4. **Composition**: entities embed governance blocks and expose them
//!    through capability traits
//! 5. **No I/O**: persistence, authorization and transition logic live outside
//!
//! ## Example
//!
//! ```
//! use cim_governance::{TrackingEntity, Remittance, CreditSystemId, User, UserId};
//! use chrono::Utc;
//!
//! let mut remittance = Remittance::new("TX-1", CreditSystemId::new(5), "42.00".parse()?)?;
//! let clerk = User::new(UserId::new(7), "clerk");
//!
//! remittance.set_creator(&clerk, Utc::now())?;
//! assert_eq!(remittance.creator_user_id(), UserId::new(7));
//!
//! let other = User::new(UserId::new(8), "intruder");
//! assert!(remittance.set_creator(&other, Utc::now()).is_err());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]

pub mod accounting;
pub mod collections;
pub mod config;
pub mod decimal;
pub mod entity;
pub mod errors;
pub mod governance;
pub mod identifiers;
pub mod user;
pub mod validation;
pub mod workflow;

// Re-export core types
pub use collections::EntitySet;
pub use config::{DomainConfig, FieldLimits};
pub use decimal::{Decimal, DecimalParseError};
pub use entity::{DomainEntity, EntityId};
pub use errors::{DomainError, DomainResult};
pub use identifiers::*;
pub use user::{ManagerAccess, User};
pub use validation::Validate;

pub use governance::{
    Disposition, DispositionStatus, DispositionTracking, DispositionTrackingEntity,
    DispositionType, Ownership, SegregatedEntity, Segregation, SegregationBinding, Tracking,
    TrackingEntity, UserTracking, UserTrackingEntity,
};

pub use workflow::{Attachment, State, StateGroup, StateTransition, Stateful, WorkflowGraph};

pub use accounting::{CreditSystem, InvoiceLine, InvoiceLineTaxComponent, LineSettlement, Remittance};
