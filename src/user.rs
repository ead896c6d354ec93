// Copyright 2025 Cowboy AI, LLC.

//! Users and session API access records

use crate::config::FieldLimits;
use crate::entity::{DomainEntity, ManagerAccessMarker, UserMarker};
use crate::errors::DomainResult;
use crate::identifiers::{ManagerAccessId, UserId};
use crate::validation::{require_text, Validate};
use serde::{Deserialize, Serialize};

/// A user of the system
///
/// Users are referenced by governed entities as creators, last modifiers and
/// owners. Only the identity matters to the governance rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// The user's key
    pub id: UserId,
    /// Login name
    pub user_name: String,
}

impl User {
    /// Create a user handle
    pub fn new(id: UserId, user_name: impl Into<String>) -> Self {
        Self {
            id,
            user_name: user_name.into(),
        }
    }
}

impl DomainEntity for User {
    type IdType = UserMarker;

    fn id(&self) -> UserId {
        self.id
    }
}

/// A session manager class granted API access
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerAccess {
    /// The key, present once stored
    pub id: ManagerAccessId,
    /// The session manager class serving the permission
    pub class_name: String,
}

impl ManagerAccess {
    /// Create a transient access record
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            id: ManagerAccessId::UNSET,
            class_name: class_name.into(),
        }
    }
}

impl DomainEntity for ManagerAccess {
    type IdType = ManagerAccessMarker;

    fn id(&self) -> ManagerAccessId {
        self.id
    }
}

impl Validate for ManagerAccess {
    fn validate(&self, limits: &FieldLimits) -> DomainResult<()> {
        require_text("class_name", &self.class_name, limits.manager_access_class_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_identity() {
        let user = User::new(UserId::new(9), "alice");
        assert!(user.is_identified());
        assert!(!User::new(UserId::UNSET, "transient").is_identified());
    }

    #[test]
    fn test_manager_access_class_name_is_required() {
        let limits = FieldLimits::default();
        assert!(ManagerAccess::new("Billing.SessionManager").validate(&limits).is_ok());

        let err = ManagerAccess::new("  ").validate(&limits).unwrap_err();
        assert!(err.is_validation_error());

        let err = ManagerAccess::new("x".repeat(1025)).validate(&limits).unwrap_err();
        assert!(err.is_validation_error());
    }
}
