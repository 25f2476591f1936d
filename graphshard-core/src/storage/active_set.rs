use graphshard_api::core::entities::VertexId;
use roaring::RoaringTreemap;

/// Membership set of active global vertex ids.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ActiveSet(RoaringTreemap);

impl ActiveSet {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn contains(&self, vid: VertexId) -> bool {
        self.0.contains(vid)
    }

    pub fn insert(&mut self, vid: VertexId) -> bool {
        self.0.insert(vid)
    }

    pub fn len(&self) -> u64 {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Active ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.0.iter()
    }
}

impl FromIterator<VertexId> for ActiveSet {
    fn from_iter<T: IntoIterator<Item = VertexId>>(iter: T) -> Self {
        ActiveSet(iter.into_iter().collect())
    }
}

impl Extend<VertexId> for ActiveSet {
    fn extend<T: IntoIterator<Item = VertexId>>(&mut self, iter: T) {
        self.0.extend(iter)
    }
}

#[cfg(test)]
mod test {
    use super::ActiveSet;

    #[test]
    fn duplicates_count_once() {
        let set: ActiveSet = [5, 1, 5, u64::MAX].into_iter().collect();
        assert_eq!(set.len(), 3);
        assert!(set.contains(u64::MAX));
        assert!(!set.contains(2));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![1, 5, u64::MAX]);
    }
}
