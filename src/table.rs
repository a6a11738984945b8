use std::collections::{btree_map, BTreeMap, BTreeSet};

use serde_derive::Serialize;

use crate::bbox::{BBox, Center};
use crate::error::{Error, Result};
use crate::track::Track;

/// Live tracks keyed by id, iterated in ascending id order.
///
/// `max_id` is the largest id ever issued by this table lineage, so ids of
/// pruned tracks are never minted again.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct TrackTable {
    tracks: BTreeMap<u32, Track>,
    max_id: Option<u32>,
}

impl TrackTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// One track per box, ids `0..n` in input order
    pub fn create_initial(boxes: &[BBox]) -> Result<Self> {
        let mut table = Self::new();

        for bbox in boxes {
            bbox.validate()?;
            table.insert_new(*bbox)?;
        }

        Ok(table)
    }

    #[inline]
    pub fn max_id(&self) -> Option<u32> {
        self.max_id
    }

    pub fn ids(&self) -> BTreeSet<u32> {
        self.tracks.keys().copied().collect()
    }

    pub fn get(&self, id: u32) -> Result<&Track> {
        self.tracks.get(&id).ok_or(Error::NotFound(id))
    }

    #[inline]
    pub fn contains(&self, id: u32) -> bool {
        self.tracks.contains_key(&id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.values()
    }

    #[inline]
    pub(crate) fn next_id(&self) -> Result<u32> {
        match self.max_id {
            None => Ok(0),
            Some(id) => id.checked_add(1).ok_or(Error::IdsExhausted),
        }
    }

    pub(crate) fn insert_new(&mut self, bbox: BBox) -> Result<u32> {
        let id = self.next_id()?;

        self.tracks.insert(id, Track::new(id, bbox));
        self.max_id = Some(id);

        Ok(id)
    }

    pub(crate) fn update(&mut self, id: u32, bbox: BBox, center: Center) -> Result<()> {
        self.tracks
            .get_mut(&id)
            .ok_or(Error::NotFound(id))?
            .update(bbox, center);

        Ok(())
    }

    /// Removes every track matching `pred`, returns removed ids
    pub(crate) fn prune<F: FnMut(&Track) -> bool>(&mut self, mut pred: F) -> Vec<u32> {
        let mut removed = Vec::new();

        self.tracks.retain(|&id, t| {
            if pred(t) {
                removed.push(id);
                false
            } else {
                true
            }
        });

        removed
    }
}

impl<'a> IntoIterator for &'a TrackTable {
    type Item = (&'a u32, &'a Track);
    type IntoIter = btree_map::Iter<'a, u32, Track>;

    fn into_iter(self) -> Self::IntoIter {
        self.tracks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::center_of;
    use nalgebra as na;

    fn boxes() -> Vec<BBox> {
        vec![
            BBox::ltwh(0.0, 0.0, 20.0, 20.0),
            BBox::ltwh(100.0, 0.0, 10.0, 30.0),
            BBox::ltwh(50.0, 50.0, 4.0, 4.0),
        ]
    }

    #[test]
    fn test_create_initial() {
        let table = TrackTable::create_initial(&boxes()).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.max_id(), Some(2));
        assert_eq!(table.ids(), BTreeSet::from([0, 1, 2]));

        for (i, bbox) in boxes().iter().enumerate() {
            let t = table.get(i as u32).unwrap();
            assert_eq!(t.id(), i as u32);
            assert_eq!(t.bbox(), bbox);
            assert_eq!(t.center(), center_of(bbox));
        }
    }

    #[test]
    fn test_create_initial_empty() {
        let table = TrackTable::create_initial(&[]).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.max_id(), None);
        assert_eq!(table.next_id().unwrap(), 0);
    }

    #[test]
    fn test_create_initial_rejects_bad_box() {
        let res = TrackTable::create_initial(&[BBox::ltwh(0.0, 0.0, -2.0, 2.0)]);
        assert!(matches!(res, Err(Error::InvalidBox { .. })));
    }

    #[test]
    fn test_get_missing() {
        let table = TrackTable::create_initial(&boxes()).unwrap();
        assert!(matches!(table.get(7), Err(Error::NotFound(7))));
    }

    #[test]
    fn test_prune_keeps_max_id() {
        let mut table = TrackTable::create_initial(&boxes()).unwrap();

        let removed = table.prune(|t| t.id() == 2);
        assert_eq!(removed, vec![2]);
        assert!(!table.contains(2));
        assert_eq!(table.max_id(), Some(2));

        let id = table.insert_new(BBox::ltwh(0.0, 0.0, 1.0, 1.0)).unwrap();
        assert_eq!(id, 3);
    }

    #[test]
    fn test_ids_exhausted() {
        let mut table = TrackTable {
            tracks: BTreeMap::new(),
            max_id: Some(u32::MAX),
        };

        let res = table.insert_new(BBox::ltwh(0.0, 0.0, 1.0, 1.0));
        assert!(matches!(res, Err(Error::IdsExhausted)));
        assert!(table.is_empty());
        assert_eq!(table.max_id(), Some(u32::MAX));
    }

    #[test]
    fn test_serialize() {
        let table = TrackTable::create_initial(&boxes()[..2]).unwrap();
        let v = serde_json::to_value(&table).unwrap();

        assert_eq!(v["max_id"], serde_json::json!(1));
        assert_eq!(v["tracks"]["1"]["id"], serde_json::json!(1));
        assert_eq!(v["tracks"]["1"]["center"], serde_json::json!([105, 15]));
        assert_eq!(v["tracks"]["0"]["bbox"]["w"], serde_json::json!(20.0));
    }

    #[test]
    fn test_update() {
        let mut table = TrackTable::create_initial(&boxes()).unwrap();
        let bbox = BBox::ltwh(2.0, 1.0, 20.0, 20.0);

        table.update(0, bbox, center_of(&bbox)).unwrap();
        assert_eq!(table.get(0).unwrap().center(), na::Point2::new(12, 11));
        assert!(table.update(9, bbox, center_of(&bbox)).is_err());
    }
}
