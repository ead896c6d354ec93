// Copyright 2025 Cowboy AI, LLC.

//! Workflow graphs
//!
//! A graph is a set of state groups, each a set of states. The transition
//! engine walks it through the query methods here; reachability and the
//! legality of a given transition are decided by the engine, not the graph.

use crate::collections::EntitySet;
use crate::config::FieldLimits;
use crate::entity::{DomainEntity, WorkflowGraphMarker};
use crate::errors::{DomainError, DomainResult};
use crate::governance::write_once::ensure_write_once;
use crate::identifiers::{StateId, WorkflowGraphId};
use crate::validation::{require_text, Validate};
use crate::workflow::state::{State, StateGroup};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// A workflow definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowGraph {
    /// The key, present once stored
    pub id: WorkflowGraphId,
    /// Stable code name
    pub code_name: String,
    /// Display name
    pub name: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Name of the transition type the engine uses to walk this graph
    pub state_transition_type_name: String,
    #[serde(default)]
    state_groups: EntitySet<StateGroup>,
}

impl WorkflowGraph {
    /// Create a graph with no state groups
    pub fn new(
        code_name: impl Into<String>,
        name: impl Into<String>,
        state_transition_type_name: impl Into<String>,
    ) -> Self {
        Self {
            id: WorkflowGraphId::UNSET,
            code_name: code_name.into(),
            name: name.into(),
            description: None,
            state_transition_type_name: state_transition_type_name.into(),
            state_groups: EntitySet::new(),
        }
    }

    /// Set the key
    pub fn with_id(mut self, id: WorkflowGraphId) -> Self {
        self.id = id;
        self
    }

    /// Assign the key, binding every state group to it
    ///
    /// The key is write-once. Nothing changes if a group already belongs to
    /// another graph.
    pub fn set_id(&mut self, id: WorkflowGraphId) -> DomainResult<()> {
        ensure_write_once(&self.id, &id, "workflow_graph.id")?;
        for group in self.state_groups.iter() {
            ensure_write_once(&group.workflow_graph_id(), &id, "state_group.workflow_graph_id")?;
        }
        self.id = id;
        for group in self.state_groups.iter_mut() {
            group.bind_to_graph(id)?;
        }
        Ok(())
    }

    /// The state groups; empty, never absent, on a fresh graph
    pub fn state_groups(&self) -> &EntitySet<StateGroup> {
        &self.state_groups
    }

    /// Replace the state groups; `None` is rejected
    ///
    /// Every group is bound to this graph. If any group already belongs to
    /// another graph nothing is replaced.
    pub fn set_state_groups(&mut self, groups: Option<EntitySet<StateGroup>>) -> DomainResult<()> {
        let groups =
            groups.ok_or_else(|| DomainError::invalid_argument("state_groups cannot be null"))?;
        let mut bound = EntitySet::new();
        for mut group in groups {
            group.bind_to_graph(self.id)?;
            bound.insert(group);
        }
        self.state_groups = bound;
        Ok(())
    }

    /// Add a state group, binding it to this graph
    pub fn add_state_group(&mut self, mut group: StateGroup) -> DomainResult<bool> {
        group.bind_to_graph(self.id)?;
        Ok(self.state_groups.insert(group))
    }

    /// Every state of every group
    pub fn states(&self) -> impl Iterator<Item = &State> + '_ {
        self.state_groups.iter().flat_map(|group| group.states().iter())
    }

    /// Look up a state by key
    pub fn find_state(&self, state_id: StateId) -> Option<&State> {
        if state_id.is_unset() {
            return None;
        }
        self.states().find(|state| state.id == state_id)
    }

    /// Look up a state by code name
    pub fn find_state_by_code_name(&self, code_name: &str) -> Option<&State> {
        self.states().find(|state| state.code_name == code_name)
    }

    /// Look up a group by code name
    pub fn find_group_by_code_name(&self, code_name: &str) -> Option<&StateGroup> {
        self.state_groups
            .iter()
            .find(|group| group.code_name == code_name)
    }

    /// The group containing the state with `state_id`
    pub fn group_of_state(&self, state_id: StateId) -> Option<&StateGroup> {
        if state_id.is_unset() {
            return None;
        }
        self.state_groups
            .iter()
            .find(|group| group.states().contains_id(state_id))
    }

    /// States an entity may enter the workflow at
    pub fn initial_states(&self) -> impl Iterator<Item = &State> + '_ {
        self.states().filter(|state| state.is_initial)
    }

    /// Whether the graph contains the state with `state_id`
    pub fn contains_state(&self, state_id: StateId) -> bool {
        self.find_state(state_id).is_some()
    }

    /// Check the graph is internally consistent
    ///
    /// Group code names and state code names are unique within the graph,
    /// every bound member points back at its parent, and a graph with states
    /// has at least one initial state. Members still carrying an unset parent
    /// key were added before the parent was stored and are consistent.
    pub fn validate_structure(&self) -> DomainResult<()> {
        let mut group_names = HashSet::new();
        let mut state_names = HashSet::new();
        let mut state_count = 0usize;
        let mut initial_count = 0usize;

        for group in self.state_groups.iter() {
            if !group_names.insert(group.code_name.as_str()) {
                return Err(DomainError::InvalidStructure(format!(
                    "duplicate state group code name '{}'",
                    group.code_name
                )));
            }
            let graph_id = group.workflow_graph_id();
            if !self.id.is_unset() && !graph_id.is_unset() && graph_id != self.id {
                return Err(DomainError::InvalidStructure(format!(
                    "state group '{}' belongs to graph {}, not {}",
                    group.code_name, graph_id, self.id
                )));
            }

            for state in group.states().iter() {
                if !state_names.insert(state.code_name.as_str()) {
                    return Err(DomainError::InvalidStructure(format!(
                        "duplicate state code name '{}'",
                        state.code_name
                    )));
                }
                let group_id = state.group_id();
                if !group.id.is_unset() && !group_id.is_unset() && group_id != group.id {
                    return Err(DomainError::InvalidStructure(format!(
                        "state '{}' belongs to group {}, not {}",
                        state.code_name, group_id, group.id
                    )));
                }
                state_count += 1;
                if state.is_initial {
                    initial_count += 1;
                }
            }
        }

        if state_count > 0 && initial_count == 0 {
            return Err(DomainError::InvalidStructure(format!(
                "workflow '{}' has no initial state",
                self.code_name
            )));
        }

        debug!(
            workflow = %self.code_name,
            groups = self.state_groups.len(),
            states = state_count,
            initial = initial_count,
            "Workflow graph structure is consistent"
        );
        Ok(())
    }
}

impl DomainEntity for WorkflowGraph {
    type IdType = WorkflowGraphMarker;

    fn id(&self) -> WorkflowGraphId {
        self.id
    }
}

impl Validate for WorkflowGraph {
    fn validate(&self, limits: &FieldLimits) -> DomainResult<()> {
        require_text("workflow_graph.code_name", &self.code_name, limits.workflow_code_name)?;
        require_text(
            "workflow_graph.state_transition_type_name",
            &self.state_transition_type_name,
            limits.state_transition_type_name,
        )?;
        self.state_groups
            .iter()
            .try_for_each(|group| group.validate(limits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifiers::StateGroupId;

    fn approval_graph() -> WorkflowGraph {
        let mut open = StateGroup::new("open", "Open").with_id(StateGroupId::new(1));
        open.add_state(State::initial("draft", "Draft").with_id(StateId::new(10)))
            .unwrap();
        open.add_state(State::new("review", "Review").with_id(StateId::new(11)))
            .unwrap();

        let mut closed = StateGroup::new("closed", "Closed").with_id(StateGroupId::new(2));
        closed
            .add_state(State::terminal("approved", "Approved").with_id(StateId::new(20)))
            .unwrap();

        let mut graph = WorkflowGraph::new("approval", "Approval", "ApprovalTransition")
            .with_id(WorkflowGraphId::new(7));
        graph.add_state_group(open).unwrap();
        graph.add_state_group(closed).unwrap();
        graph
    }

    #[test]
    fn test_fresh_graph_has_empty_groups() {
        let graph = WorkflowGraph::new("approval", "Approval", "ApprovalTransition");
        assert!(graph.state_groups().is_empty());
        assert_eq!(graph.states().count(), 0);
        graph.validate_structure().unwrap();
    }

    #[test]
    fn test_null_state_groups_rejected() {
        let mut graph = approval_graph();
        let err = graph.set_state_groups(None).unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(graph.state_groups().len(), 2);
    }

    #[test]
    fn test_queries() {
        let graph = approval_graph();

        assert_eq!(graph.states().count(), 3);
        assert_eq!(
            graph.find_state(StateId::new(11)).map(|s| s.code_name.as_str()),
            Some("review")
        );
        assert_eq!(
            graph.find_state_by_code_name("approved").map(|s| s.id),
            Some(StateId::new(20))
        );
        assert_eq!(
            graph.group_of_state(StateId::new(20)).map(|g| g.code_name.as_str()),
            Some("closed")
        );
        assert!(graph.find_group_by_code_name("open").is_some());
        assert!(!graph.contains_state(StateId::new(99)));
        assert!(!graph.contains_state(StateId::UNSET));

        let initial: Vec<_> = graph.initial_states().map(|s| s.id).collect();
        assert_eq!(initial, vec![StateId::new(10)]);
    }

    #[test]
    fn test_group_from_other_graph_is_denied() {
        let mut graph = approval_graph();
        let borrowed = graph.find_group_by_code_name("open").cloned().unwrap();

        let mut other = WorkflowGraph::new("other", "Other", "OtherTransition")
            .with_id(WorkflowGraphId::new(8));
        assert!(other.add_state_group(borrowed).unwrap_err().is_access_denied());
        assert!(other.state_groups().is_empty());

        graph.validate_structure().unwrap();
    }

    #[test]
    fn test_missing_initial_state_is_invalid_structure() {
        let mut group = StateGroup::new("open", "Open").with_id(StateGroupId::new(1));
        group
            .add_state(State::new("review", "Review").with_id(StateId::new(1)))
            .unwrap();
        let mut graph = WorkflowGraph::new("approval", "Approval", "ApprovalTransition");
        graph.add_state_group(group).unwrap();

        let err = graph.validate_structure().unwrap_err();
        assert!(matches!(err, DomainError::InvalidStructure(_)));
    }

    #[test]
    fn test_duplicate_state_code_name_is_invalid_structure() {
        let mut graph = approval_graph();
        let mut extra = StateGroup::new("extra", "Extra").with_id(StateGroupId::new(3));
        extra
            .add_state(State::new("review", "Review again").with_id(StateId::new(30)))
            .unwrap();
        graph.add_state_group(extra).unwrap();

        assert!(graph.validate_structure().unwrap_err().is_validation_error());
    }

    #[test]
    fn test_set_id_binds_groups_added_before_storage() {
        let mut open = StateGroup::new("open", "Open");
        open.add_state(State::initial("draft", "Draft")).unwrap();
        let mut graph = WorkflowGraph::new("approval", "Approval", "ApprovalTransition");
        graph.add_state_group(open).unwrap();

        graph.set_id(WorkflowGraphId::new(7)).unwrap();
        graph.validate_structure().unwrap();
        let group = graph.find_group_by_code_name("open").unwrap();
        assert_eq!(group.workflow_graph_id(), WorkflowGraphId::new(7));

        assert!(graph.set_id(WorkflowGraphId::new(8)).unwrap_err().is_access_denied());
        assert_eq!(graph.id, WorkflowGraphId::new(7));
    }

    #[test]
    fn test_set_id_refuses_groups_of_other_graphs() {
        let mut graph = approval_graph();
        let groups = graph.state_groups().clone();

        let mut copy = WorkflowGraph::new("copy", "Copy", "ApprovalTransition");
        assert!(copy.set_state_groups(Some(groups)).unwrap_err().is_access_denied());
        assert!(copy.state_groups().is_empty());

        graph.id = WorkflowGraphId::UNSET;
        assert!(graph.set_id(WorkflowGraphId::new(9)).unwrap_err().is_access_denied());
        assert!(graph.id.is_unset());
    }
}
