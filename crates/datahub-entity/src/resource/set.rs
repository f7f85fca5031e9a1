//! Sets of resource ids grouped by kind.
//!
//! This is the payload of bulk delete, move, copy and download requests:
//! a JSON object mapping kind names to id arrays, for example
//! `{"folder":["a","b"],"item":["c"]}`. Kinds without ids are omitted.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use datahub_core::AppResult;
use datahub_core::types::ResourceId;

use super::ResourceKind;

/// Ordered, duplicate-free resource ids per kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<ResourceKind, Vec<ResourceId>>")]
pub struct ResourceSet {
    entries: BTreeMap<ResourceKind, Vec<ResourceId>>,
}

impl ResourceSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an id; returns `false` if it was already present.
    pub fn insert(&mut self, kind: ResourceKind, id: ResourceId) -> bool {
        let ids = self.entries.entry(kind).or_default();
        if ids.contains(&id) {
            return false;
        }
        ids.push(id);
        true
    }

    /// Add several ids of one kind.
    pub fn extend(&mut self, kind: ResourceKind, ids: impl IntoIterator<Item = ResourceId>) {
        for id in ids {
            self.insert(kind, id);
        }
    }

    /// Merge `other` into this set. Ids already present keep their
    /// position; new ids are appended in `other`'s order.
    pub fn union(&mut self, other: &ResourceSet) {
        for (kind, ids) in &other.entries {
            self.extend(*kind, ids.iter().cloned());
        }
    }

    /// Ids of one kind, in insertion order.
    pub fn ids(&self, kind: ResourceKind) -> &[ResourceId] {
        self.entries.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of ids of one kind.
    pub fn count_of(&self, kind: ResourceKind) -> usize {
        self.ids(kind).len()
    }

    /// Total number of ids.
    pub fn count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Whether no ids are present.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Non-empty kinds with their counts, in kind order.
    pub fn counts(&self) -> Vec<(ResourceKind, usize)> {
        self.entries
            .iter()
            .filter(|(_, ids)| !ids.is_empty())
            .map(|(kind, ids)| (*kind, ids.len()))
            .collect()
    }

    /// Serialize to the JSON string sent as the `resources` parameter.
    pub fn to_param(&self) -> AppResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl From<BTreeMap<ResourceKind, Vec<ResourceId>>> for ResourceSet {
    fn from(map: BTreeMap<ResourceKind, Vec<ResourceId>>) -> Self {
        let mut set = Self::new();
        for (kind, ids) in map {
            set.extend(kind, ids);
        }
        set
    }
}

impl Serialize for ResourceSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let non_empty: Vec<_> = self
            .entries
            .iter()
            .filter(|(_, ids)| !ids.is_empty())
            .collect();
        let mut map = serializer.serialize_map(Some(non_empty.len()))?;
        for (kind, ids) in non_empty {
            map.serialize_entry(kind.as_str(), ids)?;
        }
        map.end()
    }
}
