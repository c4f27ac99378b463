use crate::model::fingerprint::FileCollectionFingerprint;
use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;

/// Output fingerprints of a unit of work, keyed by output property name.
///
/// Backed by a `BTreeMap`, so iteration (and therefore storage and
/// registration order) is always sorted by property name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutputSnapshotSet(BTreeMap<String, FileCollectionFingerprint>);

impl OutputSnapshotSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, property: impl Into<String>, fingerprint: FileCollectionFingerprint) -> Self {
        self.0.insert(property.into(), fingerprint);
        self
    }

    pub fn insert(&mut self, property: impl Into<String>, fingerprint: FileCollectionFingerprint) {
        self.0.insert(property.into(), fingerprint);
    }

    pub fn get(&self, property: &str) -> Option<&FileCollectionFingerprint> {
        self.0.get(property)
    }

    /// Property names in sorted order
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Fingerprints in property-name order
    pub fn values(&self) -> btree_map::Values<'_, String, FileCollectionFingerprint> {
        self.0.values()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, FileCollectionFingerprint> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when both sets declare exactly the same property names
    pub fn has_same_properties(&self, other: &Self) -> bool {
        self.0.len() == other.0.len() && self.0.keys().eq(other.0.keys())
    }
}

impl FromIterator<(String, FileCollectionFingerprint)> for OutputSnapshotSet {
    fn from_iter<I: IntoIterator<Item = (String, FileCollectionFingerprint)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a OutputSnapshotSet {
    type Item = (&'a String, &'a FileCollectionFingerprint);
    type IntoIter = btree_map::Iter<'a, String, FileCollectionFingerprint>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
