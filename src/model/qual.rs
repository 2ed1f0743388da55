//! Predicate ("qual") descriptors and their canonical ordering.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// PostgreSQL object identifier (relation, operator, access method).
pub type Oid = u32;

/// Index access methods able to serve a predicate. Rarely more than a handful.
pub type IndexAms = SmallVec<[Oid; 4]>;

/// A single filter condition collected from the workload.
///
/// Field names follow the collector's JSON (`relid`, `attnum`, `opno`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Qual {
    pub relid: Oid,
    pub attnum: i16,
    pub opno: Oid,
    pub queryid: i64,
    #[serde(default)]
    pub indexams: IndexAms,
    #[serde(default)]
    pub relname: String,
    #[serde(default)]
    pub attname: String,
}

impl Qual {
    pub fn new(relid: Oid, attnum: i16, opno: Oid, queryid: i64) -> Self {
        Self {
            relid,
            attnum,
            opno,
            queryid,
            indexams: IndexAms::new(),
            relname: String::new(),
            attname: String::new(),
        }
    }

    pub fn with_indexams(mut self, ams: impl IntoIterator<Item = Oid>) -> Self {
        self.indexams = ams.into_iter().collect();
        self
    }

    pub fn with_names(mut self, relname: impl Into<String>, attname: impl Into<String>) -> Self {
        self.relname = relname.into();
        self.attname = attname.into();
        self
    }

    /// The `(relid, attnum, opno)` tuple every qual list is sorted by.
    pub fn sort_key(&self) -> (Oid, i16, Oid) {
        (self.relid, self.attnum, self.opno)
    }

    /// Compare two quals by their sort key only.
    pub fn canonical_cmp(&self, other: &Qual) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }

    /// True when both quals filter the same column of the same relation.
    pub fn same_attribute(&self, other: &Qual) -> bool {
        self.relid == other.relid && self.attnum == other.attnum
    }

    /// Access methods supported by both quals, in `self`'s order.
    pub fn common_indexams(&self, other: &Qual) -> IndexAms {
        self.indexams
            .iter()
            .copied()
            .filter(|am| other.indexams.contains(am))
            .collect()
    }
}

/// Quals of one node, always sorted by [`Qual::sort_key`].
///
/// The merge-join in [`crate::linker`] relies on this ordering; the only way
/// to build or grow a list is through methods that keep it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Qual>", into = "Vec<Qual>")]
pub struct QualList(Vec<Qual>);

impl QualList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert keeping the canonical order. Equal keys keep arrival order.
    pub fn insert(&mut self, qual: Qual) {
        let pos = self
            .0
            .partition_point(|q| q.canonical_cmp(&qual) != Ordering::Greater);
        self.0.insert(pos, qual);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Qual> {
        self.0.get(idx)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Qual> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Qual] {
        &self.0
    }
}

impl From<Vec<Qual>> for QualList {
    fn from(mut quals: Vec<Qual>) -> Self {
        quals.sort_by(Qual::canonical_cmp);
        Self(quals)
    }
}

impl From<QualList> for Vec<Qual> {
    fn from(list: QualList) -> Self {
        list.0
    }
}

impl FromIterator<Qual> for QualList {
    fn from_iter<I: IntoIterator<Item = Qual>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<'a> IntoIterator for &'a QualList {
    type Item = &'a Qual;
    type IntoIter = std::slice::Iter<'a, Qual>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_is_sorted_on_construction() {
        let list = QualList::from(vec![
            Qual::new(20, 1, 96, 1),
            Qual::new(10, 3, 97, 1),
            Qual::new(10, 3, 96, 1),
            Qual::new(10, 1, 521, 1),
        ]);
        let keys: Vec<_> = list.iter().map(Qual::sort_key).collect();
        assert_eq!(keys, vec![(10, 1, 521), (10, 3, 96), (10, 3, 97), (20, 1, 96)]);
    }

    #[test]
    fn test_insert_keeps_order_and_arrival_for_ties() {
        let mut list = QualList::new();
        list.insert(Qual::new(10, 2, 96, 1));
        list.insert(Qual::new(10, 1, 96, 2));
        list.insert(Qual::new(10, 2, 96, 3));
        let ids: Vec<_> = list.iter().map(|q| q.queryid).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_common_indexams_keeps_left_order() {
        let a = Qual::new(1, 1, 96, 1).with_indexams([405, 403, 783]);
        let b = Qual::new(1, 1, 96, 2).with_indexams([403, 405]);
        assert_eq!(a.common_indexams(&b).as_slice(), &[405, 403]);
        assert!(a.common_indexams(&Qual::new(1, 1, 96, 3)).is_empty());
    }

    #[test]
    fn test_deserialize_sorts() {
        let json = r#"[
            {"relid": 5, "attnum": 2, "opno": 96, "queryid": 7},
            {"relid": 5, "attnum": 1, "opno": 96, "queryid": 7, "indexams": [403]}
        ]"#;
        let list: QualList = serde_json::from_str(json).unwrap();
        assert_eq!(list.get(0).map(|q| q.attnum), Some(1));
        assert_eq!(list.get(0).map(|q| q.indexams.as_slice()), Some(&[403][..]));
    }
}
