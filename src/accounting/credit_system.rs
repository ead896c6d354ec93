// Copyright 2025 Cowboy AI, LLC.

//! Credit systems: the external channels remittances flow through

use crate::config::FieldLimits;
use crate::entity::{CreditSystemMarker, DomainEntity};
use crate::errors::DomainResult;
use crate::identifiers::CreditSystemId;
use crate::validation::{require_text, Validate};
use serde::{Deserialize, Serialize};

/// A payment channel such as a bank or card processor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditSystem {
    /// The key, present once stored
    pub id: CreditSystemId,
    /// Display name
    pub name: String,
    /// Stable code
    pub code: String,
}

impl CreditSystem {
    /// Create a credit system handle
    pub fn new(id: CreditSystemId, name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            code: code.into(),
        }
    }
}

impl DomainEntity for CreditSystem {
    type IdType = CreditSystemMarker;

    fn id(&self) -> CreditSystemId {
        self.id
    }
}

impl Validate for CreditSystem {
    fn validate(&self, _limits: &FieldLimits) -> DomainResult<()> {
        require_text("credit_system.name", &self.name, usize::MAX)?;
        require_text("credit_system.code", &self.code, usize::MAX)
    }
}
