// Copyright 2025 Cowboy AI, LLC.

//! Configuration of boundary field constraints
//!
//! The limits mirror the column sizes a persistence layer declares for the
//! governed entities. They are only consulted by [`crate::validation`]; the
//! write-once invariants do not depend on configuration.

use crate::errors::{DomainError, DomainResult};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Maximum lengths, in characters, of constrained text fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldLimits {
    /// Invoice line description
    pub invoice_line_description: usize,
    /// Invoice line tax component description
    pub tax_component_description: usize,
    /// Remittance external transaction id
    pub remittance_transaction_id: usize,
    /// Remittance batch line id
    pub remittance_line_id: usize,
    /// Manager access class name
    pub manager_access_class_name: usize,
    /// Code names of workflow graphs, state groups and states
    pub workflow_code_name: usize,
    /// Workflow graph state transition type name
    pub state_transition_type_name: usize,
    /// Attachment title
    pub attachment_title: usize,
}

impl Default for FieldLimits {
    fn default() -> Self {
        Self {
            invoice_line_description: 384,
            tax_component_description: 32,
            remittance_transaction_id: 256,
            remittance_line_id: 256,
            manager_access_class_name: 1024,
            workflow_code_name: 128,
            state_transition_type_name: 256,
            attachment_title: 256,
        }
    }
}

/// Top-level configuration of the domain layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainConfig {
    /// Boundary field constraints
    pub field_limits: FieldLimits,
}

impl DomainConfig {
    /// Parse a configuration document; absent keys keep their defaults
    pub fn from_json_str(json: &str) -> DomainResult<Self> {
        serde_json::from_str(json).map_err(|e| DomainError::ConfigError(e.to_string()))
    }

    /// Read and parse a configuration file
    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading domain config {}", path.display()))?;
        let config = Self::from_json_str(&text)
            .with_context(|| format!("parsing domain config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "Loaded domain config");
        Ok(config)
    }
}
