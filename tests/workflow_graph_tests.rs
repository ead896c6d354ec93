// Copyright 2025 Cowboy AI, LLC.

//! Workflow graph queries and the stateful entity contract

use cim_governance::{
    DomainError, EntitySet, State, StateGroup, StateGroupId, StateId, StateTransition, Stateful,
    WorkflowGraph, WorkflowGraphId,
};
use pretty_assertions::assert_eq;
use test_case::test_case;

fn order_workflow() -> WorkflowGraph {
    let mut open = StateGroup::new("open", "Open").with_id(StateGroupId::new(1));
    open.add_state(State::initial("placed", "Placed").with_id(StateId::new(1)))
        .unwrap();
    open.add_state(State::new("paid", "Paid").with_id(StateId::new(2)))
        .unwrap();

    let mut done = StateGroup::new("done", "Done").with_id(StateGroupId::new(2));
    done.add_state(State::terminal("shipped", "Shipped").with_id(StateId::new(3)))
        .unwrap();
    done.add_state(State::terminal("cancelled", "Cancelled").with_id(StateId::new(4)))
        .unwrap();

    let mut graph = WorkflowGraph::new("orders", "Orders", "OrderStateTransition")
        .with_id(WorkflowGraphId::new(1));
    graph.add_state_group(open).unwrap();
    graph.add_state_group(done).unwrap();
    graph
}

/// An entity the external engine moves through the order workflow
struct Order {
    state_id: StateId,
    transitions: EntitySet<StateTransition>,
}

impl Order {
    fn new() -> Self {
        Self {
            state_id: StateId::UNSET,
            transitions: EntitySet::new(),
        }
    }

    fn apply(&mut self, transition: StateTransition) {
        self.state_id = transition.to_state_id();
        self.transitions.insert(transition);
    }
}

impl Stateful for Order {
    fn state_id(&self) -> StateId {
        self.state_id
    }

    fn state_transitions(&self) -> &EntitySet<StateTransition> {
        &self.transitions
    }
}

#[test]
fn fresh_graph_has_empty_state_groups() {
    let graph = WorkflowGraph::new("orders", "Orders", "OrderStateTransition");
    assert!(graph.state_groups().is_empty());
}

#[test]
fn null_state_groups_are_rejected() {
    let mut graph = order_workflow();
    let err = graph.set_state_groups(None).unwrap_err();

    assert!(matches!(err, DomainError::InvalidArgument(_)));
    assert_eq!(graph.state_groups().len(), 2);
}

#[test]
fn state_groups_can_be_replaced() {
    let mut graph = order_workflow();
    graph.set_state_groups(Some(EntitySet::new())).unwrap();
    assert!(graph.state_groups().is_empty());
}

#[test_case("placed", Some("open") ; "initial state")]
#[test_case("paid", Some("open") ; "intermediate state")]
#[test_case("shipped", Some("done") ; "terminal state")]
#[test_case("lost", None ; "unknown state")]
fn group_lookup_by_state(code_name: &str, expected_group: Option<&str>) {
    let graph = order_workflow();
    let group = graph
        .find_state_by_code_name(code_name)
        .and_then(|state| graph.group_of_state(state.id))
        .map(|group| group.code_name.as_str());
    assert_eq!(group, expected_group);
}

#[test]
fn initial_states_for_the_engine() {
    let graph = order_workflow();
    let initial: Vec<&str> = graph
        .initial_states()
        .map(|state| state.code_name.as_str())
        .collect();
    assert_eq!(initial, vec!["placed"]);
}

#[test]
fn structure_of_well_formed_graph_is_valid() {
    order_workflow().validate_structure().unwrap();
}

#[test]
fn graph_assembled_before_storage_stays_valid() {
    let mut open = StateGroup::new("open", "Open");
    open.add_state(State::initial("placed", "Placed")).unwrap();
    let mut graph = WorkflowGraph::new("orders", "Orders", "OrderStateTransition");
    graph.add_state_group(open).unwrap();

    let mut assigned = graph.clone();
    assigned.id = WorkflowGraphId::new(7);
    assigned.validate_structure().unwrap();

    graph.set_id(WorkflowGraphId::new(7)).unwrap();
    graph.validate_structure().unwrap();
    assert_eq!(
        graph.find_group_by_code_name("open").map(|g| g.workflow_graph_id()),
        Some(WorkflowGraphId::new(7))
    );
}

#[test]
fn group_stored_after_its_states_binds_them() {
    let mut group = StateGroup::new("open", "Open");
    group.add_state(State::initial("placed", "Placed")).unwrap();
    group.set_id(StateGroupId::new(3)).unwrap();

    let mut graph = WorkflowGraph::new("orders", "Orders", "OrderStateTransition")
        .with_id(WorkflowGraphId::new(1));
    graph.add_state_group(group).unwrap();
    graph.validate_structure().unwrap();
    assert_eq!(
        graph.find_state_by_code_name("placed").map(|s| s.group_id()),
        Some(StateGroupId::new(3))
    );
}

#[test]
fn graph_without_initial_state_is_rejected() {
    let mut group = StateGroup::new("open", "Open").with_id(StateGroupId::new(1));
    group
        .add_state(State::new("paid", "Paid").with_id(StateId::new(2)))
        .unwrap();
    let mut graph = WorkflowGraph::new("orders", "Orders", "OrderStateTransition");
    graph.add_state_group(group).unwrap();

    let err = graph.validate_structure().unwrap_err();
    assert!(matches!(err, DomainError::InvalidStructure(_)));
}

#[test]
fn graph_with_duplicate_group_code_name_is_rejected() {
    let mut graph = order_workflow();
    graph
        .add_state_group(StateGroup::new("open", "Open again").with_id(StateGroupId::new(9)))
        .unwrap();

    let err = graph.validate_structure().unwrap_err();
    assert!(matches!(err, DomainError::InvalidStructure(_)));
}

#[test]
fn stateful_entity_follows_recorded_transitions() {
    let graph = order_workflow();
    let mut order = Order::new();
    assert!(order.current_state(&graph).is_none());

    order.apply(StateTransition::new(None, StateId::new(1), "place").unwrap());
    order.apply(StateTransition::new(Some(StateId::new(1)), StateId::new(2), "pay").unwrap());
    assert_eq!(
        order.current_state(&graph).map(|s| s.code_name.as_str()),
        Some("paid")
    );
    assert!(!order.is_finished(&graph));

    order.apply(StateTransition::new(Some(StateId::new(2)), StateId::new(3), "ship").unwrap());
    assert!(order.is_finished(&graph));
    assert_eq!(order.state_transitions().len(), 3);
}
