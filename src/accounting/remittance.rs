// Copyright 2025 Cowboy AI, LLC.

//! Remittances: money received or sent through a credit system

use crate::accounting::credit_system::CreditSystem;
use crate::config::FieldLimits;
use crate::decimal::Decimal;
use crate::entity::{DomainEntity, RemittanceMarker};
use crate::errors::{DomainError, DomainResult};
use crate::governance::access::TrackingAccess;
use crate::governance::tracking::{Tracking, TrackingEntity};
use crate::identifiers::{CreditSystemId, RemittanceId};
use crate::validation::{limit_optional_text, require_text, Validate};
use serde::{Deserialize, Serialize};

/// A single-entry record of a transfer through one credit system
///
/// No balancing rule applies: a remittance stands on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Remittance {
    /// The key, present once stored
    pub id: RemittanceId,
    /// Signed amount transferred
    pub amount: Decimal,
    transaction_id: String,
    /// Line within the credit system's batch, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_id: Option<String>,
    credit_system_id: CreditSystemId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    credit_system: Option<CreditSystem>,
    tracking: Tracking,
}

impl Remittance {
    /// Record a remittance of `amount` under the external `transaction_id`
    pub fn new(
        transaction_id: impl Into<String>,
        credit_system_id: CreditSystemId,
        amount: Decimal,
    ) -> DomainResult<Self> {
        let transaction_id = transaction_id.into();
        if transaction_id.trim().is_empty() {
            return Err(DomainError::invalid_argument(
                "remittance transaction_id is required",
            ));
        }
        if credit_system_id.is_unset() {
            return Err(DomainError::invalid_argument(
                "remittance needs a credit system",
            ));
        }

        Ok(Self {
            id: RemittanceId::UNSET,
            amount,
            transaction_id,
            line_id: None,
            credit_system_id,
            credit_system: None,
            tracking: Tracking::new(),
        })
    }

    /// Set the batch line
    pub fn with_line_id(mut self, line_id: impl Into<String>) -> Self {
        self.line_id = Some(line_id.into());
        self
    }

    /// External transaction identifier
    pub fn transaction_id(&self) -> &str {
        &self.transaction_id
    }

    /// Key of the credit system
    pub fn credit_system_id(&self) -> CreditSystemId {
        self.credit_system_id
    }

    /// The credit system, if loaded
    pub fn credit_system(&self) -> Option<&CreditSystem> {
        self.credit_system.as_ref()
    }

    /// Attach the credit system reference; its key must match
    pub fn attach_credit_system(&mut self, credit_system: CreditSystem) -> DomainResult<()> {
        if credit_system.id != self.credit_system_id {
            return Err(DomainError::invalid_argument(format!(
                "credit system {} does not match {}",
                credit_system.id, self.credit_system_id
            )));
        }
        self.credit_system = Some(credit_system);
        Ok(())
    }
}

impl DomainEntity for Remittance {
    type IdType = RemittanceMarker;

    fn id(&self) -> RemittanceId {
        self.id
    }
}

impl TrackingEntity for Remittance {
    fn tracking(&self) -> &Tracking {
        &self.tracking
    }
}

impl TrackingAccess for Remittance {
    fn tracking_mut(&mut self) -> &mut Tracking {
        &mut self.tracking
    }
}

impl Validate for Remittance {
    fn validate(&self, limits: &FieldLimits) -> DomainResult<()> {
        require_text(
            "remittance.transaction_id",
            &self.transaction_id,
            limits.remittance_transaction_id,
        )?;
        limit_optional_text(
            "remittance.line_id",
            self.line_id.as_deref(),
            limits.remittance_line_id,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn amount() -> Decimal {
        "42.00".parse().unwrap()
    }

    #[test_case("", 5 ; "empty transaction id")]
    #[test_case("   ", 5 ; "blank transaction id")]
    #[test_case("TX-1", 0 ; "unset credit system")]
    fn test_constructor_rejects(transaction_id: &str, credit_system: i64) {
        let err = Remittance::new(transaction_id, CreditSystemId::new(credit_system), amount())
            .unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_valid_remittance() {
        let remittance = Remittance::new("TX-1", CreditSystemId::new(5), amount())
            .unwrap()
            .with_line_id("L-3");
        assert_eq!(remittance.transaction_id(), "TX-1");
        assert_eq!(remittance.credit_system_id(), CreditSystemId::new(5));
        remittance.validate(&FieldLimits::default()).unwrap();
    }

    #[test]
    fn test_attach_credit_system_must_match() {
        let mut remittance = Remittance::new("TX-1", CreditSystemId::new(5), amount()).unwrap();
        assert!(remittance
            .attach_credit_system(CreditSystem::new(CreditSystemId::new(6), "Card", "CRD"))
            .unwrap_err()
            .is_invalid_argument());

        remittance
            .attach_credit_system(CreditSystem::new(CreditSystemId::new(5), "Bank", "BNK"))
            .unwrap();
        assert_eq!(remittance.credit_system().map(|c| c.code.as_str()), Some("BNK"));
    }

    #[test]
    fn test_line_id_limit() {
        let limits = FieldLimits::default();
        let remittance = Remittance::new("TX-1", CreditSystemId::new(5), amount())
            .unwrap()
            .with_line_id("x".repeat(limits.remittance_line_id + 1));
        assert!(remittance.validate(&limits).unwrap_err().is_validation_error());
    }
}
