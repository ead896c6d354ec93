// Copyright 2025 Cowboy AI, LLC.

//! Workflow states and the groups that contain them
//!
//! States are the vertices of a workflow graph. Edges are not stored here:
//! they are implied by the transition logic of the external engine.

use crate::collections::EntitySet;
use crate::config::FieldLimits;
use crate::entity::{DomainEntity, StateGroupMarker, StateMarker};
use crate::errors::{DomainError, DomainResult};
use crate::governance::write_once::{bind_to_parent, ensure_write_once};
use crate::identifiers::{StateGroupId, StateId, WorkflowGraphId};
use crate::validation::{require_text, Validate};
use serde::{Deserialize, Serialize};

/// A state of a workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    /// The key, present once stored
    pub id: StateId,
    /// Stable code name, unique within the graph
    pub code_name: String,
    /// Display name
    pub name: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether entities may enter the workflow at this state
    pub is_initial: bool,
    /// Whether no transition may leave this state
    pub is_terminal: bool,
    group_id: StateGroupId,
}

impl State {
    /// Create a new intermediate state
    pub fn new(code_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: StateId::UNSET,
            code_name: code_name.into(),
            name: name.into(),
            description: None,
            is_initial: false,
            is_terminal: false,
            group_id: StateGroupId::UNSET,
        }
    }

    /// Create a new initial state
    pub fn initial(code_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            is_initial: true,
            ..Self::new(code_name, name)
        }
    }

    /// Create a new terminal state
    pub fn terminal(code_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            is_terminal: true,
            ..Self::new(code_name, name)
        }
    }

    /// Set the key
    pub fn with_id(mut self, id: StateId) -> Self {
        self.id = id;
        self
    }

    /// Key of the group containing the state
    pub fn group_id(&self) -> StateGroupId {
        self.group_id
    }
}

impl DomainEntity for State {
    type IdType = StateMarker;

    fn id(&self) -> StateId {
        self.id
    }
}

impl Validate for State {
    fn validate(&self, limits: &FieldLimits) -> DomainResult<()> {
        require_text("state.code_name", &self.code_name, limits.workflow_code_name)
    }
}

/// A named group of states within a workflow graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateGroup {
    /// The key, present once stored
    pub id: StateGroupId,
    /// Stable code name, unique within the graph
    pub code_name: String,
    /// Display name
    pub name: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    workflow_graph_id: WorkflowGraphId,
    #[serde(default)]
    states: EntitySet<State>,
}

impl StateGroup {
    /// Create an empty group
    pub fn new(code_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: StateGroupId::UNSET,
            code_name: code_name.into(),
            name: name.into(),
            description: None,
            workflow_graph_id: WorkflowGraphId::UNSET,
            states: EntitySet::new(),
        }
    }

    /// Set the key
    pub fn with_id(mut self, id: StateGroupId) -> Self {
        self.id = id;
        self
    }

    /// Assign the key, binding every state to it
    ///
    /// The key is write-once. Nothing changes if a state already belongs to
    /// another group.
    pub fn set_id(&mut self, id: StateGroupId) -> DomainResult<()> {
        ensure_write_once(&self.id, &id, "state_group.id")?;
        for state in self.states.iter() {
            ensure_write_once(&state.group_id, &id, "state.group_id")?;
        }
        self.id = id;
        for state in self.states.iter_mut() {
            bind_to_parent(&mut state.group_id, id, "state.group_id")?;
        }
        Ok(())
    }

    /// Key of the graph containing the group
    pub fn workflow_graph_id(&self) -> WorkflowGraphId {
        self.workflow_graph_id
    }

    /// The states of the group, empty until states are added
    pub fn states(&self) -> &EntitySet<State> {
        &self.states
    }

    /// Add a state, binding it to this group
    ///
    /// Returns `false` if the state is already present. A state that belongs
    /// to another group is rejected with [`DomainError::AccessDenied`].
    pub fn add_state(&mut self, mut state: State) -> DomainResult<bool> {
        bind_to_parent(&mut state.group_id, self.id, "state.group_id")?;
        Ok(self.states.insert(state))
    }

    /// Replace the states; `None` is rejected
    pub fn set_states(&mut self, states: Option<EntitySet<State>>) -> DomainResult<()> {
        let states = states.ok_or_else(|| DomainError::invalid_argument("states cannot be null"))?;
        let mut bound = EntitySet::new();
        for mut state in states {
            bind_to_parent(&mut state.group_id, self.id, "state.group_id")?;
            bound.insert(state);
        }
        self.states = bound;
        Ok(())
    }

    pub(crate) fn bind_to_graph(&mut self, graph_id: WorkflowGraphId) -> DomainResult<()> {
        bind_to_parent(&mut self.workflow_graph_id, graph_id, "state_group.workflow_graph_id")
    }
}

impl DomainEntity for StateGroup {
    type IdType = StateGroupMarker;

    fn id(&self) -> StateGroupId {
        self.id
    }
}

impl Validate for StateGroup {
    fn validate(&self, limits: &FieldLimits) -> DomainResult<()> {
        require_text("state_group.code_name", &self.code_name, limits.workflow_code_name)?;
        self.states.iter().try_for_each(|state| state.validate(limits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_constructors() {
        let draft = State::initial("draft", "Draft");
        assert!(draft.is_initial);
        assert!(!draft.is_terminal);

        let archived = State::terminal("archived", "Archived");
        assert!(archived.is_terminal);
        assert!(!archived.is_initial);
    }

    #[test]
    fn test_add_state_binds_group() {
        let mut group = StateGroup::new("open", "Open").with_id(StateGroupId::new(4));
        assert!(group
            .add_state(State::initial("draft", "Draft").with_id(StateId::new(1)))
            .unwrap());

        let state = group.states().get(StateId::new(1)).unwrap();
        assert_eq!(state.group_id(), StateGroupId::new(4));
    }

    #[test]
    fn test_state_cannot_move_between_groups() {
        let mut open = StateGroup::new("open", "Open").with_id(StateGroupId::new(4));
        open.add_state(State::new("review", "Review").with_id(StateId::new(2)))
            .unwrap();
        let moved = open.states().get(StateId::new(2)).cloned().unwrap();

        let mut closed = StateGroup::new("closed", "Closed").with_id(StateGroupId::new(5));
        let err = closed.add_state(moved).unwrap_err();
        assert!(err.is_access_denied());
        assert!(closed.states().is_empty());
    }

    #[test]
    fn test_duplicate_state_is_not_added() {
        let mut group = StateGroup::new("open", "Open").with_id(StateGroupId::new(4));
        let state = State::new("review", "Review").with_id(StateId::new(2));
        assert!(group.add_state(state.clone()).unwrap());
        assert!(!group.add_state(state).unwrap());
        assert_eq!(group.states().len(), 1);
    }

    #[test]
    fn test_null_states_rejected() {
        let mut group = StateGroup::new("open", "Open");
        assert!(group.set_states(None).unwrap_err().is_invalid_argument());
        group.set_states(Some(EntitySet::new())).unwrap();
        assert!(group.states().is_empty());
    }

    #[test]
    fn test_set_id_binds_states_added_before_storage() {
        let mut group = StateGroup::new("open", "Open");
        group.add_state(State::initial("draft", "Draft")).unwrap();
        group.add_state(State::new("review", "Review")).unwrap();

        group.set_id(StateGroupId::new(4)).unwrap();
        assert!(group
            .states()
            .iter()
            .all(|state| state.group_id() == StateGroupId::new(4)));
        assert!(group.set_id(StateGroupId::new(5)).unwrap_err().is_access_denied());
    }
}
