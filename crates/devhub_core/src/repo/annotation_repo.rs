//! Boolean annotations (bookmarks, completed steps) keyed by catalog ID.
//!
//! # Invariants
//! - Unknown IDs read as not annotated.
//! - `toggle` flips absent/false to true and true to false.
//! - Dangling IDs (absent from the catalog) may persist but are never counted or listed
//!   by catalog-aware queries.

use crate::storage::{KvStore, Namespace, StorageBackend, StorageKey};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Persisted shapes accepted when reading an annotation set.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredAnnotations {
    Flags(BTreeMap<String, bool>),
    /// Older progress format: a list of IDs that are all set.
    Ids(Vec<String>),
}

/// Mapping from catalog ID to annotation flag for one namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredAnnotations", into = "BTreeMap<String, bool>")]
pub struct AnnotationSet {
    flags: BTreeMap<String, bool>,
}

impl From<StoredAnnotations> for AnnotationSet {
    fn from(value: StoredAnnotations) -> Self {
        let flags = match value {
            StoredAnnotations::Flags(flags) => flags,
            StoredAnnotations::Ids(ids) => ids.into_iter().map(|id| (id, true)).collect(),
        };
        Self { flags }
    }
}

impl From<AnnotationSet> for BTreeMap<String, bool> {
    fn from(value: AnnotationSet) -> Self {
        value.flags
    }
}

impl AnnotationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_set(&self, id: &str) -> bool {
        self.flags.get(id).copied().unwrap_or(false)
    }

    /// Flips the flag for `id` and returns the new value.
    pub fn toggle(&mut self, id: &str) -> bool {
        let next = !self.is_set(id);
        self.flags.insert(id.to_string(), next);
        next
    }

    pub fn set(&mut self, id: &str, value: bool) {
        self.flags.insert(id.to_string(), value);
    }

    /// IDs whose flag is set, in ascending order. May include dangling IDs.
    pub fn set_ids(&self) -> impl Iterator<Item = &str> {
        self.flags
            .iter()
            .filter(|(_, value)| **value)
            .map(|(id, _)| id.as_str())
    }

    /// Number of `known_ids` whose flag is set.
    pub fn count_set<'a>(&self, known_ids: impl IntoIterator<Item = &'a str>) -> usize {
        known_ids.into_iter().filter(|id| self.is_set(id)).count()
    }

    /// Number of stored entries, including false and dangling ones.
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

/// Annotation store backed by the durable key/value store.
pub struct AnnotationStore<'kv, B: StorageBackend> {
    kv: &'kv KvStore<B>,
}

impl<'kv, B: StorageBackend> AnnotationStore<'kv, B> {
    pub fn new(kv: &'kv KvStore<B>) -> Self {
        Self { kv }
    }

    /// Reads the set for `namespace`; absent or unreadable state is empty.
    pub fn load(&self, namespace: &Namespace) -> AnnotationSet {
        self.kv
            .get(&StorageKey::annotations(namespace), AnnotationSet::new())
    }

    pub fn is_annotated(&self, namespace: &Namespace, id: &str) -> bool {
        self.load(namespace).is_set(id)
    }

    /// Loads the set for `namespace`, flips the flag for `id` and writes the full set back.
    pub fn toggle(&self, namespace: &Namespace, id: &str) -> AnnotationSet {
        let mut set = self.load(namespace);
        self.toggle_in(&mut set, namespace, id);
        set
    }

    /// Flips `id` in the caller's `set`, then writes the full set back.
    ///
    /// `set` is updated even when the write is dropped, so repeated toggles
    /// alternate while storage is unavailable.
    pub fn toggle_in(&self, set: &mut AnnotationSet, namespace: &Namespace, id: &str) -> bool {
        let annotated = set.toggle(id);
        let persisted = self.kv.set(&StorageKey::annotations(namespace), &*set);
        info!(
            "event=annotation_toggle module=annotation status=ok namespace={} id={} annotated={} persisted={}",
            namespace, id, annotated, persisted
        );
        annotated
    }

    /// Loads the set for `namespace`, sets the flag for `id` to `value` and writes it back.
    pub fn set_flag(&self, namespace: &Namespace, id: &str, value: bool) -> AnnotationSet {
        let mut set = self.load(namespace);
        self.set_flag_in(&mut set, namespace, id, value);
        set
    }

    /// Sets `id` to `value` in the caller's `set`, then writes the full set back.
    pub fn set_flag_in(
        &self,
        set: &mut AnnotationSet,
        namespace: &Namespace,
        id: &str,
        value: bool,
    ) {
        set.set(id, value);
        let persisted = self.kv.set(&StorageKey::annotations(namespace), &*set);
        debug!(
            "event=annotation_set module=annotation status=ok namespace={} id={} annotated={} persisted={}",
            namespace, id, value, persisted
        );
    }

    /// Removes the persisted set for `namespace`.
    pub fn clear(&self, namespace: &Namespace) -> bool {
        let removed = self.kv.remove(&StorageKey::annotations(namespace));
        info!(
            "event=annotation_clear module=annotation status=ok namespace={} removed={}",
            namespace, removed
        );
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::AnnotationSet;

    #[test]
    fn toggle_flips_absent_true_and_false_entries() {
        let mut set = AnnotationSet::new();
        assert!(set.toggle("b1"));
        assert!(!set.toggle("b1"));
        assert_eq!(set.len(), 1);
        assert!(set.toggle("b1"));
    }

    #[test]
    fn legacy_id_list_reads_as_all_set() {
        let set: AnnotationSet = serde_json::from_str(r#"["p1","p3"]"#).unwrap();
        assert!(set.is_set("p1"));
        assert!(!set.is_set("p2"));
        assert!(set.is_set("p3"));
    }

    #[test]
    fn set_serializes_as_flag_map() {
        let mut set = AnnotationSet::new();
        set.set("b2", true);
        set.set("b1", false);
        assert_eq!(
            serde_json::to_string(&set).unwrap(),
            r#"{"b1":false,"b2":true}"#
        );
    }

    #[test]
    fn count_set_ignores_dangling_ids() {
        let mut set = AnnotationSet::new();
        set.set("p1", true);
        set.set("p99", true);
        assert_eq!(set.count_set(["p1", "p2"]), 1);
        assert_eq!(set.set_ids().collect::<Vec<_>>(), vec!["p1", "p99"]);
    }
}
