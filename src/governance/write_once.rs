// Copyright 2025 Cowboy AI, LLC.

//! The write-once rule shared by every governed field.
//!
//! A write-once slot starts at its unset sentinel. It may move from the
//! sentinel to a value once; assigning the value it already holds is a no-op;
//! any other assignment is rejected with [`DomainError::AccessDenied`] and
//! leaves the slot untouched.

use crate::entity::EntityId;
use crate::errors::{DomainError, DomainResult};
use std::fmt::Debug;
use tracing::{debug, warn};

/// Values that have an "unset" sentinel
pub trait Sentinel {
    /// Whether this value is the sentinel
    fn is_unset(&self) -> bool;
}

impl<T> Sentinel for EntityId<T> {
    fn is_unset(&self) -> bool {
        EntityId::is_unset(self)
    }
}

impl<T> Sentinel for Option<T> {
    fn is_unset(&self) -> bool {
        self.is_none()
    }
}

/// Check that `value` may be written to a slot currently holding `current`
pub fn ensure_write_once<T>(current: &T, value: &T, field: &'static str) -> DomainResult<()>
where
    T: PartialEq + Sentinel + Debug,
{
    if current.is_unset() || current == value {
        return Ok(());
    }

    warn!(
        field,
        current = ?current,
        attempted = ?value,
        "Rejected change of write-once field"
    );
    Err(DomainError::access_denied(
        field,
        format!("already set to {current:?}, cannot change to {value:?}"),
    ))
}

/// Write `value` into a write-once slot
pub fn write_once<T>(slot: &mut T, value: T, field: &'static str) -> DomainResult<()>
where
    T: PartialEq + Sentinel + Debug,
{
    ensure_write_once(slot, &value, field)?;
    if *slot != value {
        debug!(field, value = ?value, "Bound write-once field");
        *slot = value;
    }
    Ok(())
}

/// Bind a member's parent key, refusing to move it between parents
///
/// A transient parent (unset key) accepts only members that are not yet
/// bound elsewhere; the binding happens once the parent is stored.
pub fn bind_to_parent<T>(
    slot: &mut EntityId<T>,
    parent: EntityId<T>,
    field: &'static str,
) -> DomainResult<()> {
    if parent.is_unset() {
        if slot.is_unset() {
            return Ok(());
        }
        warn!(field, current = %slot, "Rejected member bound to another parent");
        return Err(DomainError::access_denied(
            field,
            format!("already belongs to {slot}"),
        ));
    }
    write_once(slot, parent, field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::UserMarker;

    #[test]
    fn test_unset_slot_accepts_first_value() {
        let mut slot = EntityId::<UserMarker>::UNSET;
        write_once(&mut slot, EntityId::new(3), "owner").unwrap();
        assert_eq!(slot.value(), 3);
    }

    #[test]
    fn test_same_value_is_noop() {
        let mut slot = EntityId::<UserMarker>::new(3);
        write_once(&mut slot, EntityId::new(3), "owner").unwrap();
        assert_eq!(slot.value(), 3);
    }

    #[test]
    fn test_different_value_is_denied_and_slot_unchanged() {
        let mut slot = EntityId::<UserMarker>::new(3);
        let err = write_once(&mut slot, EntityId::new(4), "owner").unwrap_err();

        assert!(err.is_access_denied());
        assert_eq!(slot.value(), 3);
    }

    #[test]
    fn test_resetting_to_sentinel_is_denied() {
        let mut slot = Some(10_u32);
        let err = write_once(&mut slot, None, "count").unwrap_err();

        assert!(err.is_access_denied());
        assert_eq!(slot, Some(10));
    }
}
