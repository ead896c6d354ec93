// Copyright 2025 Cowboy AI, LLC.

//! Boundary validation of declared field constraints
//!
//! Length and required-field rules belong to the persistence boundary, not
//! to the governance invariants. A persistence collaborator calls
//! [`Validate::validate`] before flushing; the governance checks assume the
//! values already satisfy these constraints.

use crate::config::FieldLimits;
use crate::errors::{DomainError, DomainResult};

/// Entities with declared field constraints
pub trait Validate {
    /// Check every constrained field against `limits`
    fn validate(&self, limits: &FieldLimits) -> DomainResult<()>;
}

/// A required text field: not blank and at most `max` characters
pub fn require_text(field: &'static str, value: &str, max: usize) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(field, "is required"));
    }
    limit_text(field, value, max)
}

/// A text field of at most `max` characters
pub fn limit_text(field: &'static str, value: &str, max: usize) -> DomainResult<()> {
    let length = value.chars().count();
    if length > max {
        return Err(DomainError::validation(
            field,
            format!("has {length} characters, at most {max} allowed"),
        ));
    }
    Ok(())
}

/// An optional text field of at most `max` characters when present
pub fn limit_optional_text(field: &'static str, value: Option<&str>, max: usize) -> DomainResult<()> {
    value.map_or(Ok(()), |v| limit_text(field, v, max))
}
