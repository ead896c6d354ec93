// Copyright 2025 Cowboy AI, LLC.

//! State transition records and the stateful entity contract
//!
//! The external engine decides which transitions are legal. What it leaves
//! behind is a [`StateTransition`] per executed path, recorded on the
//! [`Stateful`] entity it moved.

use crate::collections::EntitySet;
use crate::entity::{DomainEntity, StateTransitionMarker};
use crate::errors::{DomainError, DomainResult};
use crate::governance::access::{TrackingAccess, UserOwnershipAccess};
use crate::governance::ownership::{Ownership, UserTracking, UserTrackingEntity};
use crate::governance::tracking::{Tracking, TrackingEntity};
use crate::identifiers::{StateId, StateTransitionId};
use crate::user::User;
use crate::workflow::attachment::Attachment;
use crate::workflow::graph::WorkflowGraph;
use crate::workflow::state::State;
use serde::{Deserialize, Serialize};

/// One executed move of an entity between two states
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    /// The key, present once stored
    pub id: StateTransitionId,
    from_state_id: Option<StateId>,
    to_state_id: StateId,
    path_code_name: String,
    user_tracking: UserTracking,
    #[serde(default)]
    attachments: EntitySet<Attachment>,
}

impl StateTransition {
    /// Record a transition along the engine path `path_code_name`
    ///
    /// `from_state_id` is `None` when the entity enters the workflow.
    pub fn new(
        from_state_id: Option<StateId>,
        to_state_id: StateId,
        path_code_name: impl Into<String>,
    ) -> DomainResult<Self> {
        if to_state_id.is_unset() {
            return Err(DomainError::invalid_argument(
                "a transition needs a target state",
            ));
        }
        let from_state_id = from_state_id.filter(|id| !id.is_unset());

        Ok(Self {
            id: StateTransitionId::UNSET,
            from_state_id,
            to_state_id,
            path_code_name: path_code_name.into(),
            user_tracking: UserTracking::new(),
            attachments: EntitySet::new(),
        })
    }

    /// State the entity left, `None` on entry
    pub fn from_state_id(&self) -> Option<StateId> {
        self.from_state_id
    }

    /// State the entity entered
    pub fn to_state_id(&self) -> StateId {
        self.to_state_id
    }

    /// The engine path that produced the transition
    pub fn path_code_name(&self) -> &str {
        &self.path_code_name
    }

    /// Whether the entity entered the workflow with this transition
    pub fn is_entry(&self) -> bool {
        self.from_state_id.is_none()
    }

    /// The attachments; empty by default
    pub fn attachments(&self) -> &EntitySet<Attachment> {
        &self.attachments
    }

    /// Attach a note or document
    pub fn add_attachment(&mut self, attachment: Attachment) -> bool {
        self.attachments.insert(attachment)
    }

    /// Replace the attachments; `None` is rejected
    pub fn set_attachments(&mut self, attachments: Option<EntitySet<Attachment>>) -> DomainResult<()> {
        self.attachments = attachments
            .ok_or_else(|| DomainError::invalid_argument("attachments cannot be null"))?;
        Ok(())
    }
}

impl DomainEntity for StateTransition {
    type IdType = StateTransitionMarker;

    fn id(&self) -> StateTransitionId {
        self.id
    }
}

impl TrackingEntity for StateTransition {
    fn tracking(&self) -> &Tracking {
        self.user_tracking.tracking()
    }
}

impl TrackingAccess for StateTransition {
    fn tracking_mut(&mut self) -> &mut Tracking {
        self.user_tracking.tracking_mut()
    }
}

impl UserTrackingEntity for StateTransition {
    fn user_ownership(&self) -> &Ownership<User> {
        self.user_tracking.user_ownership()
    }
}

impl UserOwnershipAccess for StateTransition {
    fn user_ownership_mut(&mut self) -> &mut Ownership<User> {
        self.user_tracking.user_ownership_mut()
    }
}

/// Entities driven through a workflow graph
pub trait Stateful {
    /// Key of the current state, unset before the entity enters a workflow
    fn state_id(&self) -> StateId;

    /// Transitions recorded so far
    fn state_transitions(&self) -> &EntitySet<StateTransition>;

    /// The current state as defined in `graph`
    fn current_state<'g>(&self, graph: &'g WorkflowGraph) -> Option<&'g State> {
        graph.find_state(self.state_id())
    }

    /// Whether the entity sits in a terminal state of `graph`
    fn is_finished(&self, graph: &WorkflowGraph) -> bool {
        self.current_state(graph).is_some_and(|state| state.is_terminal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_needs_target() {
        let err = StateTransition::new(None, StateId::UNSET, "submit").unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_entry_transition() {
        let entry = StateTransition::new(Some(StateId::UNSET), StateId::new(1), "enter").unwrap();
        assert!(entry.is_entry());
        assert_eq!(entry.to_state_id(), StateId::new(1));

        let step = StateTransition::new(Some(StateId::new(1)), StateId::new(2), "submit").unwrap();
        assert!(!step.is_entry());
        assert_eq!(step.path_code_name(), "submit");
    }

    #[test]
    fn test_attachments() {
        let mut transition =
            StateTransition::new(Some(StateId::new(1)), StateId::new(2), "submit").unwrap();
        assert!(transition.attachments().is_empty());

        assert!(transition.add_attachment(Attachment::new(1).with_title("Receipt")));
        assert_eq!(transition.attachments().len(), 1);

        assert!(transition.set_attachments(None).unwrap_err().is_invalid_argument());
        assert_eq!(transition.attachments().len(), 1);
    }
}
