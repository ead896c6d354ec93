// Copyright 2025 Cowboy AI, LLC.

//! Entities survive a JSON persistence boundary unchanged

use anyhow::Result;
use chrono::{TimeZone, Utc};
use cim_governance::{
    CreditSystemId, Decimal, Disposition, DispositionType, DispositionTypeId, InvoiceLine,
    InvoiceLineTaxComponent, LineSettlement, Remittance, RemittanceId, SegregatedEntity,
    SegregationId, State, StateGroup, StateGroupId, StateId, TrackingEntity, User, UserId,
    UserTrackingEntity, WorkflowGraph, WorkflowGraphId,
};
use pretty_assertions::assert_eq;

#[test]
fn remittance_round_trip_keeps_every_field() -> Result<()> {
    let amount: Decimal = "12345678901234567890.123456789".parse()?;
    let mut remittance = Remittance::new("TX-1", CreditSystemId::new(5), amount)?.with_line_id("7");
    remittance.id = RemittanceId::new(31);
    let clerk = User::new(UserId::new(3), "clerk");
    remittance.set_creator(&clerk, Utc.with_ymd_and_hms(2025, 6, 30, 9, 15, 0).unwrap())?;

    let json = serde_json::to_string(&remittance)?;
    let restored: Remittance = serde_json::from_str(&json)?;

    assert_eq!(restored, remittance);
    assert_eq!(restored.transaction_id(), "TX-1");
    assert_eq!(restored.credit_system_id(), CreditSystemId::new(5));
    assert_eq!(restored.amount.to_string(), "12345678901234567890.123456789");
    assert_eq!(restored.creator_user_id(), UserId::new(3));
    Ok(())
}

#[test]
fn amounts_serialize_as_text_and_ids_as_integers() -> Result<()> {
    let remittance = Remittance::new("TX-1", CreditSystemId::new(5), "0.10".parse()?)?;
    let value = serde_json::to_value(&remittance)?;

    assert_eq!(value["amount"], serde_json::json!("0.10"));
    assert_eq!(value["credit_system_id"], serde_json::json!(5));
    assert_eq!(value["id"], serde_json::json!(0));
    Ok(())
}

#[test]
fn invoice_line_round_trip_keeps_taxes_and_settlement() -> Result<()> {
    let mut line = InvoiceLine::new("Hosting", "80.00".parse()?).with_pricing("2".parse()?, "40.00".parse()?);
    line.settlement = Some(LineSettlement::Remittance(RemittanceId::new(31)));
    line.add_tax_component(
        InvoiceLineTaxComponent::new("VAT 24%", "19.20".parse()?)
            .with_rate_percent_factor("24".parse()?),
    )?;

    let restored: InvoiceLine = serde_json::from_str(&serde_json::to_string(&line)?)?;

    assert_eq!(restored, line);
    assert_eq!(restored.gross_amount()?.to_string(), "99.20");
    Ok(())
}

#[test]
fn graph_without_groups_deserializes_empty() -> Result<()> {
    let json = r#"{
        "id": 4,
        "code_name": "orders",
        "name": "Orders",
        "state_transition_type_name": "OrderStateTransition"
    }"#;
    let graph: WorkflowGraph = serde_json::from_str(json)?;

    assert_eq!(graph.id, WorkflowGraphId::new(4));
    assert!(graph.state_groups().is_empty());
    Ok(())
}

#[test]
fn graph_round_trip_keeps_bindings() -> Result<()> {
    let mut group = StateGroup::new("open", "Open").with_id(StateGroupId::new(2));
    group.add_state(State::initial("placed", "Placed").with_id(StateId::new(8)))?;
    let mut graph = WorkflowGraph::new("orders", "Orders", "OrderStateTransition")
        .with_id(WorkflowGraphId::new(4));
    graph.add_state_group(group)?;

    let restored: WorkflowGraph = serde_json::from_str(&serde_json::to_string(&graph)?)?;

    assert_eq!(restored, graph);
    restored.validate_structure()?;
    assert_eq!(
        restored.find_state(StateId::new(8)).map(|s| s.group_id()),
        Some(StateGroupId::new(2))
    );
    Ok(())
}

#[test]
fn disposition_round_trip_keeps_segregation_and_owner() -> Result<()> {
    let mut disposition = Disposition::new(
        SegregationId::new(6),
        DispositionType::new(DispositionTypeId::new(1), "accountant", "Accountant"),
    );
    disposition.set_owning_user_id(UserId::new(12))?;

    let mut restored: Disposition = serde_json::from_str(&serde_json::to_string(&disposition)?)?;

    assert_eq!(restored, disposition);
    assert_eq!(restored.segregation_id(), SegregationId::new(6));
    assert!(restored.set_owning_user_id(UserId::new(13)).unwrap_err().is_access_denied());
    Ok(())
}
