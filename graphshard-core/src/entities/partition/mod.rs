//! Columnar storage for one shard of a graph's edges.
//!
//! An [`EdgePartition`] keeps its edges as parallel columns (`local_src_ids`, `local_dst_ids`,
//! `data`) sorted by `(src, dst)`. Vertex ids referenced by the edges are compacted into a
//! dense local id space ([`IdTables`]) so per-vertex state, like the cached vertex attributes
//! or the message accumulators of a scan, lives in plain vectors indexed by local id.
//!
//! Partitions are immutable. Every transformation returns a new partition, sharing whatever
//! columns and tables it did not change.

use crate::{
    storage::{ActiveSet, ClusterIndex, IdTables},
    utils::errors::PartitionError,
};
use graphshard_api::core::entities::{VertexId, LID};
use std::{ops::Range, sync::Arc};

pub mod aggregate;
pub mod builder;
pub mod iter;
pub mod transform;

pub use builder::{EdgePartitionBuilder, ExistingEdgePartitionBuilder};

#[derive(Debug)]
pub struct EdgePartition<ED, VD> {
    local_src_ids: Arc<[LID]>,
    local_dst_ids: Arc<[LID]>,
    data: Arc<[ED]>,
    index: Arc<ClusterIndex>,
    ids: Arc<IdTables>,
    vertex_attrs: Arc<[VD]>,
    active_set: Option<Arc<ActiveSet>>,
}

impl<ED, VD> Clone for EdgePartition<ED, VD> {
    fn clone(&self) -> Self {
        Self {
            local_src_ids: self.local_src_ids.clone(),
            local_dst_ids: self.local_dst_ids.clone(),
            data: self.data.clone(),
            index: self.index.clone(),
            ids: self.ids.clone(),
            vertex_attrs: self.vertex_attrs.clone(),
            active_set: self.active_set.clone(),
        }
    }
}

impl<ED, VD: Default> Default for EdgePartition<ED, VD> {
    fn default() -> Self {
        EdgePartitionBuilder::new().to_edge_partition()
    }
}

impl<ED, VD> EdgePartition<ED, VD> {
    pub(crate) fn from_parts(
        local_src_ids: Arc<[LID]>,
        local_dst_ids: Arc<[LID]>,
        data: Arc<[ED]>,
        index: Arc<ClusterIndex>,
        ids: Arc<IdTables>,
        vertex_attrs: Arc<[VD]>,
        active_set: Option<Arc<ActiveSet>>,
    ) -> Self {
        debug_assert_eq!(local_src_ids.len(), data.len());
        debug_assert_eq!(local_dst_ids.len(), data.len());
        debug_assert_eq!(vertex_attrs.len(), ids.len());
        Self {
            local_src_ids,
            local_dst_ids,
            data,
            index,
            ids,
            vertex_attrs,
            active_set,
        }
    }

    /// Number of edges.
    #[inline]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of distinct vertices referenced by the edges (the size of the local id space).
    #[inline]
    pub fn num_local_vertices(&self) -> usize {
        self.ids.len()
    }

    /// Number of distinct source vertices, i.e. the number of clusters in the index.
    pub fn index_size(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn src_id(&self, pos: usize) -> VertexId {
        self.ids.global(self.local_src_ids[pos])
    }

    #[inline]
    pub fn dst_id(&self, pos: usize) -> VertexId {
        self.ids.global(self.local_dst_ids[pos])
    }

    #[inline]
    pub fn attr(&self, pos: usize) -> &ED {
        &self.data[pos]
    }

    #[inline]
    pub fn local_src_id(&self, pos: usize) -> LID {
        self.local_src_ids[pos]
    }

    #[inline]
    pub fn local_dst_id(&self, pos: usize) -> LID {
        self.local_dst_ids[pos]
    }

    pub fn local_src_ids(&self) -> &[LID] {
        &self.local_src_ids
    }

    pub fn local_dst_ids(&self) -> &[LID] {
        &self.local_dst_ids
    }

    pub fn data(&self) -> &[ED] {
        &self.data
    }

    pub fn id_tables(&self) -> &IdTables {
        &self.ids
    }

    pub fn local_to_global(&self) -> &[VertexId] {
        self.ids.local2global()
    }

    pub fn global_to_local(&self, vid: VertexId) -> Option<LID> {
        self.ids.local(vid)
    }

    pub fn vertex_attrs(&self) -> &[VD] {
        &self.vertex_attrs
    }

    /// Cached attribute of a vertex referenced by this partition.
    pub fn vertex_attr(&self, vid: VertexId) -> Option<&VD> {
        self.ids
            .local(vid)
            .map(|lid| &self.vertex_attrs[lid.index()])
    }

    /// The clustered index as `(source id, first edge offset)` in stored order.
    pub fn cluster_offsets(&self) -> impl Iterator<Item = (VertexId, usize)> + '_ {
        self.index.iter().map(|(&vid, &offset)| (vid, offset))
    }

    /// `(source id, edge range)` for every cluster, in stored order.
    pub(crate) fn clusters(&self) -> impl Iterator<Item = (VertexId, Range<usize>)> + '_ {
        let size = self.size();
        self.index.iter().enumerate().map(move |(i, (&vid, &start))| {
            let end = self
                .index
                .get_index(i + 1)
                .map_or(size, |(_, &next_start)| next_start);
            (vid, start..end)
        })
    }

    /// Edge positions whose source is `vid`, empty if `vid` has no outgoing edge here.
    pub fn cluster_range(&self, vid: VertexId) -> Range<usize> {
        match self.index.get_full(&vid) {
            None => 0..0,
            Some((i, _, &start)) => {
                let end = self
                    .index
                    .get_index(i + 1)
                    .map_or(self.size(), |(_, &next_start)| next_start);
                start..end
            }
        }
    }

    pub fn active_set(&self) -> Option<&ActiveSet> {
        self.active_set.as_deref()
    }

    /// Is `vid` a member of the active set?
    ///
    /// Asking without an active set is an error rather than `false`.
    pub fn is_active(&self, vid: VertexId) -> Result<bool, PartitionError> {
        self.active_set
            .as_ref()
            .map(|set| set.contains(vid))
            .ok_or(PartitionError::NoActiveSet)
    }

    /// Cardinality of the active set, `None` if no active set is configured.
    pub fn num_actives(&self) -> Option<u64> {
        self.active_set.as_ref().map(|set| set.len())
    }

    /// Replace the edge attributes by position, keeping the topology.
    pub fn with_data<ED2>(
        &self,
        data: Vec<ED2>,
    ) -> Result<EdgePartition<ED2, VD>, PartitionError> {
        PartitionError::check_len(self.size(), data.len())?;
        Ok(EdgePartition::from_parts(
            self.local_src_ids.clone(),
            self.local_dst_ids.clone(),
            data.into(),
            self.index.clone(),
            self.ids.clone(),
            self.vertex_attrs.clone(),
            self.active_set.clone(),
        ))
    }

    /// Return a partition with a fresh active set built from `active`, replacing any previous one.
    pub fn with_active_set(&self, active: impl IntoIterator<Item = VertexId>) -> Self {
        Self {
            active_set: Some(Arc::new(active.into_iter().collect())),
            ..self.clone()
        }
    }

    /// Drop the active set.
    pub fn without_active_set(&self) -> Self {
        Self {
            active_set: None,
            ..self.clone()
        }
    }

    /// Return a partition whose cached vertex attributes are reset to `VD2::default()`.
    ///
    /// The edges and id tables are shared with `self`.
    pub fn without_vertex_attributes<VD2: Default>(&self) -> EdgePartition<ED, VD2> {
        let vertex_attrs: Arc<[VD2]> = (0..self.num_local_vertices())
            .map(|_| VD2::default())
            .collect();
        EdgePartition::from_parts(
            self.local_src_ids.clone(),
            self.local_dst_ids.clone(),
            self.data.clone(),
            self.index.clone(),
            self.ids.clone(),
            vertex_attrs,
            self.active_set.clone(),
        )
    }

    pub(crate) fn shared_ids(&self) -> Arc<IdTables> {
        self.ids.clone()
    }

    pub(crate) fn shared_vertex_attrs(&self) -> Arc<[VD]> {
        self.vertex_attrs.clone()
    }

    pub(crate) fn shared_active_set(&self) -> Option<Arc<ActiveSet>> {
        self.active_set.clone()
    }
}

impl<ED, VD: Clone> EdgePartition<ED, VD> {
    /// Return a partition with updated cached vertex attributes.
    ///
    /// Every id has to be referenced by this partition, otherwise the whole update is rejected
    /// with [`PartitionError::UnknownVertex`] and nothing is written.
    pub fn update_vertices(
        &self,
        updates: impl IntoIterator<Item = (VertexId, VD)>,
    ) -> Result<Self, PartitionError> {
        let mut vertex_attrs = self.vertex_attrs.to_vec();
        for (vid, attr) in updates {
            let lid = self
                .ids
                .local(vid)
                .ok_or(PartitionError::UnknownVertex(vid))?;
            vertex_attrs[lid.index()] = attr;
        }
        Ok(Self {
            vertex_attrs: vertex_attrs.into(),
            ..self.clone()
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn small() -> EdgePartition<f64, i32> {
        [(1, 2, 1.0), (1, 3, 2.0), (2, 3, 3.0)]
            .into_iter()
            .collect()
    }

    #[test]
    fn accessors_follow_sorted_order() {
        let p: EdgePartition<&str, ()> = [(3, 1, "c"), (1, 3, "b"), (1, 2, "a")]
            .into_iter()
            .collect();
        assert_eq!(p.size(), 3);
        assert_eq!(p.num_local_vertices(), 3);
        assert_eq!(p.index_size(), 2);
        let edges: Vec<_> = (0..p.size())
            .map(|i| (p.src_id(i), p.dst_id(i), *p.attr(i)))
            .collect();
        assert_eq!(edges, vec![(1, 2, "a"), (1, 3, "b"), (3, 1, "c")]);
        assert_eq!(p.cluster_offsets().collect::<Vec<_>>(), vec![(1, 0), (3, 2)]);
        assert_eq!(p.cluster_range(1), 0..2);
        assert_eq!(p.cluster_range(3), 2..3);
        assert_eq!(p.cluster_range(2), 0..0);
    }

    #[test]
    fn with_data_checks_length() {
        let p = small();
        let q = p.with_data(vec!["x", "y", "z"]).unwrap();
        assert_eq!(q.data(), &["x", "y", "z"]);
        assert_eq!(q.local_src_ids(), p.local_src_ids());

        match p.with_data(vec![1u8]) {
            Err(PartitionError::LengthMismatch { expected, actual }) => {
                assert_eq!((expected, actual), (3, 1))
            }
            other => panic!("expected a length mismatch, got {other:?}"),
        }
    }

    #[test]
    fn is_active_without_active_set_fails() {
        let p = small();
        assert!(matches!(p.is_active(1), Err(PartitionError::NoActiveSet)));
        assert_eq!(p.num_actives(), None);

        let p = p.with_active_set([1, 9]);
        assert!(p.is_active(1).unwrap());
        assert!(!p.is_active(2).unwrap());
        assert_eq!(p.num_actives(), Some(2));

        let p = p.with_active_set([2]);
        assert!(!p.is_active(1).unwrap());
        assert_eq!(p.num_actives(), Some(1));
        assert_eq!(p.without_active_set().num_actives(), None);
    }

    #[test]
    fn update_vertices_writes_by_local_id() {
        let p = small();
        let q = p.update_vertices([(3, 30), (1, 10)]).unwrap();
        assert_eq!(q.vertex_attrs(), &[10, 0, 30]);
        assert_eq!(q.vertex_attr(3), Some(&30));
        // the original is untouched
        assert_eq!(p.vertex_attrs(), &[0, 0, 0]);
        // tables are shared, not rebuilt
        assert!(std::ptr::eq(p.id_tables(), q.id_tables()));
    }

    #[test]
    fn update_vertices_rejects_unknown_ids() {
        let p = small();
        let err = p.update_vertices([(1, 5), (42, 7)]).unwrap_err();
        assert!(matches!(err, PartitionError::UnknownVertex(42)));
        assert_eq!(p.vertex_attrs(), &[0, 0, 0]);
    }

    #[test]
    fn without_vertex_attributes_resets_to_default() {
        let p = small().update_vertices([(2, 7)]).unwrap();
        let q: EdgePartition<f64, String> = p.without_vertex_attributes();
        assert_eq!(q.vertex_attrs(), &[String::new(), String::new(), String::new()]);
        assert_eq!(q.size(), p.size());
        assert!(std::ptr::eq(p.id_tables(), q.id_tables()));
    }

    #[test]
    fn empty_partition_is_valid() {
        let p: EdgePartition<u8, u8> = EdgePartition::default();
        assert!(p.is_empty());
        assert_eq!(p.num_local_vertices(), 0);
        assert_eq!(p.index_size(), 0);
        assert_eq!(p.cluster_offsets().count(), 0);
    }
}
