// Copyright 2025 Cowboy AI, LLC.

//! Key aliases for every governed entity kind
//!
//! These are convenience aliases for `EntityId<Marker>`; the phantom marker
//! keeps a user key from being passed where a segregation key is expected.

use crate::entity::{
    AttachmentContentMarker, AttachmentMarker, CreditSystemMarker, DispositionMarker,
    DispositionTypeMarker, EntityId, InvoiceLineMarker, ManagerAccessMarker, PostingMarker,
    RemittanceMarker, SegregationMarker, StateGroupMarker, StateMarker, StateTransitionMarker,
    TaxComponentMarker, UserMarker, WorkflowGraphMarker,
};

/// Key of a user
pub type UserId = EntityId<UserMarker>;

/// Key of a segregation (tenant scope)
pub type SegregationId = EntityId<SegregationMarker>;

/// Key of a disposition
pub type DispositionId = EntityId<DispositionMarker>;

/// Key of a disposition type
pub type DispositionTypeId = EntityId<DispositionTypeMarker>;

/// Key of a manager access record
pub type ManagerAccessId = EntityId<ManagerAccessMarker>;

/// Key of a workflow graph
pub type WorkflowGraphId = EntityId<WorkflowGraphMarker>;

/// Key of a state group
pub type StateGroupId = EntityId<StateGroupMarker>;

/// Key of a workflow state
pub type StateId = EntityId<StateMarker>;

/// Key of a state transition record
pub type StateTransitionId = EntityId<StateTransitionMarker>;

/// Key of an attachment
pub type AttachmentId = EntityId<AttachmentMarker>;

/// Key of the content of an attachment
pub type AttachmentContentId = EntityId<AttachmentContentMarker>;

/// Key of a double-entry posting
pub type PostingId = EntityId<PostingMarker>;

/// Key of a remittance
pub type RemittanceId = EntityId<RemittanceMarker>;

/// Key of a credit system
pub type CreditSystemId = EntityId<CreditSystemMarker>;

/// Key of an invoice line
pub type InvoiceLineId = EntityId<InvoiceLineMarker>;

/// Key of an invoice line tax component
pub type TaxComponentId = EntityId<TaxComponentMarker>;
