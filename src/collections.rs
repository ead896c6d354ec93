// Copyright 2025 Cowboy AI, LLC.

//! Unordered, duplicate-free collections of entities

use crate::entity::{DomainEntity, EntityId};
use serde::{Deserialize, Serialize};

/// A set of entities unique by identity
///
/// Two members are duplicates when they carry the same assigned key.
/// Transient members have no identity yet and are never merged. Iteration
/// order is unspecified and equality between sets ignores order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntitySet<T> {
    items: Vec<T>,
}

impl<T> EntitySet<T> {
    /// Create an empty set
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the set has no members
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the members
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Remove every member
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Mutable iteration for rebinding members to a parent
    ///
    /// Callers must not change a member's key.
    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }
}

impl<T: DomainEntity + PartialEq> EntitySet<T> {
    /// Insert a member, returning `false` if a member with the same key is present
    ///
    /// Transient members (unset key) are always kept: two equal transient
    /// values are still two entities.
    pub fn insert(&mut self, item: T) -> bool {
        if self.contains_id(item.id()) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Whether an equivalent member is present
    ///
    /// Members with a key match by key, transient members match by value.
    pub fn contains(&self, item: &T) -> bool {
        self.items.iter().any(|existing| same_member(existing, item))
    }

    /// Whether a member with the given key is present
    pub fn contains_id(&self, id: EntityId<T::IdType>) -> bool {
        !id.is_unset() && self.items.iter().any(|item| item.id() == id)
    }

    /// Find a member by key
    pub fn get(&self, id: EntityId<T::IdType>) -> Option<&T> {
        if id.is_unset() {
            return None;
        }
        self.items.iter().find(|item| item.id() == id)
    }

    /// Remove and return the member with the given key
    pub fn remove(&mut self, id: EntityId<T::IdType>) -> Option<T> {
        if id.is_unset() {
            return None;
        }
        let index = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.swap_remove(index))
    }
}

impl<T> Default for EntitySet<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn same_member<T: DomainEntity + PartialEq>(left: &T, right: &T) -> bool {
    let id = right.id();
    if id.is_unset() {
        left.id().is_unset() && left == right
    } else {
        left.id() == id
    }
}

impl<T: DomainEntity + PartialEq> PartialEq for EntitySet<T> {
    fn eq(&self, other: &Self) -> bool {
        let count = |set: &Self, item: &T| set.items.iter().filter(|m| same_member(*m, item)).count();
        self.len() == other.len()
            && self
                .items
                .iter()
                .all(|item| count(self, item) == count(other, item))
    }
}

impl<T: DomainEntity + Eq> Eq for EntitySet<T> {}

impl<T: DomainEntity + PartialEq> FromIterator<T> for EntitySet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        for item in iter {
            set.insert(item);
        }
        set
    }
}

impl<T: DomainEntity + PartialEq> Extend<T> for EntitySet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<'a, T> IntoIterator for &'a EntitySet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> IntoIterator for EntitySet<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
