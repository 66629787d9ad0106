//! Ordered bookkeeping of registered units per scope.

use crate::unit::{unit_path, UnitId};
use std::collections::BTreeMap;
use uuid::Uuid;

/// One registered unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitEntry {
    pub id: UnitId,
    /// Registration order across the whole registry; never reused.
    pub seq: u64,
    pub scope: String,
    pub name: String,
}

impl UnitEntry {
    pub fn path(&self) -> String {
        unit_path(&self.scope, &self.name)
    }
}

/// Insertion-ordered registry of `(scope, name)` pairs.
#[derive(Debug, Default)]
pub struct ScopeRegistry {
    entries: Vec<UnitEntry>,
    next_seq: u64,
}

impl ScopeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, scope: &str, name: &str) -> bool {
        self.get(scope, name).is_some()
    }

    /// True when a unit called `name` exists in any scope.
    pub fn contains_name(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry.name == name)
    }

    pub fn get(&self, scope: &str, name: &str) -> Option<&UnitEntry> {
        self.entries
            .iter()
            .find(|entry| entry.scope == scope && entry.name == name)
    }

    /// Appends a new entry. Callers check uniqueness first.
    pub fn insert(&mut self, scope: &str, name: &str) -> UnitEntry {
        let entry = UnitEntry {
            id: Uuid::new_v4(),
            seq: self.next_seq,
            scope: scope.to_string(),
            name: name.to_string(),
        };
        self.next_seq += 1;
        self.entries.push(entry.clone());
        entry
    }

    pub fn remove(&mut self, scope: &str, name: &str) -> Option<UnitEntry> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.scope == scope && entry.name == name)?;
        Some(self.entries.remove(index))
    }

    pub fn remove_id(&mut self, id: UnitId) -> Option<UnitEntry> {
        let index = self.entries.iter().position(|entry| entry.id == id)?;
        Some(self.entries.remove(index))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in registration order.
    pub fn entries(&self) -> &[UnitEntry] {
        &self.entries
    }

    /// Paths registered under `scope`, in registration order.
    pub fn paths_in(&self, scope: &str) -> Vec<String> {
        self.entries
            .iter()
            .filter(|entry| entry.scope == scope)
            .map(UnitEntry::path)
            .collect()
    }

    /// Scope name to ordered paths. Scopes without units are absent.
    pub fn list(&self) -> BTreeMap<String, Vec<String>> {
        let mut listing = BTreeMap::<String, Vec<String>>::new();
        for entry in &self.entries {
            listing
                .entry(entry.scope.clone())
                .or_default()
                .push(entry.path());
        }
        listing
    }
}
