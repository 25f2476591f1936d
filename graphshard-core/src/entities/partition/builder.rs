use crate::{
    entities::partition::EdgePartition,
    storage::{ActiveSet, ClusterIndex, IdTables},
};
use graphshard_api::core::entities::{Edge, VertexId, LID};
use std::{marker::PhantomData, sync::Arc};
use tracing::debug;

/// Accumulates edges in any order and turns them into a sorted, compacted [`EdgePartition`].
#[derive(Debug)]
pub struct EdgePartitionBuilder<ED, VD> {
    edges: Vec<Edge<ED>>,
    _vd: PhantomData<VD>,
}

impl<ED, VD> Default for EdgePartitionBuilder<ED, VD> {
    fn default() -> Self {
        Self::new()
    }
}

impl<ED, VD> EdgePartitionBuilder<ED, VD> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(size_hint: usize) -> Self {
        Self {
            edges: Vec::with_capacity(size_hint),
            _vd: PhantomData,
        }
    }

    pub fn add(&mut self, src_id: VertexId, dst_id: VertexId, attr: ED) {
        self.edges.push(Edge::new(src_id, dst_id, attr));
    }

    pub fn add_edge(&mut self, edge: Edge<ED>) {
        self.edges.push(edge);
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl<ED, VD: Default> EdgePartitionBuilder<ED, VD> {
    /// Sort the edges by `(src, dst)`, compact the vertex ids and build the clustered index.
    ///
    /// The sort is stable, edges sharing a `(src, dst)` pair keep the order they were added in.
    /// Cached vertex attributes start out as `VD::default()`.
    pub fn to_edge_partition(mut self) -> EdgePartition<ED, VD> {
        self.edges.sort_by(Edge::lexicographic_cmp);

        let ids = IdTables::from_ids(
            self.edges
                .iter()
                .flat_map(|e| [e.src_id, e.dst_id]),
        );

        let size = self.edges.len();
        let mut local_src_ids = Vec::with_capacity(size);
        let mut local_dst_ids = Vec::with_capacity(size);
        let mut data = Vec::with_capacity(size);
        let mut index = ClusterIndex::default();

        for (pos, edge) in self.edges.into_iter().enumerate() {
            let local_src = ids.local(edge.src_id).expect("source id should be compacted");
            let local_dst = ids.local(edge.dst_id).expect("destination id should be compacted");
            if pos == 0 || local_src_ids.last() != Some(&local_src) {
                index.insert(edge.src_id, pos);
            }
            local_src_ids.push(local_src);
            local_dst_ids.push(local_dst);
            data.push(edge.attr);
        }

        let vertex_attrs: Arc<[VD]> = (0..ids.len()).map(|_| VD::default()).collect();

        debug!(
            "Built edge partition with {} edges, {} local vertices and {} clusters",
            size,
            ids.len(),
            index.len()
        );

        EdgePartition::from_parts(
            local_src_ids.into(),
            local_dst_ids.into(),
            data.into(),
            Arc::new(index),
            Arc::new(ids),
            vertex_attrs,
            None,
        )
    }
}

impl<ED, VD> Extend<Edge<ED>> for EdgePartitionBuilder<ED, VD> {
    fn extend<T: IntoIterator<Item = Edge<ED>>>(&mut self, iter: T) {
        self.edges.extend(iter)
    }
}

impl<ED, VD: Default> FromIterator<(VertexId, VertexId, ED)> for EdgePartition<ED, VD> {
    fn from_iter<T: IntoIterator<Item = (VertexId, VertexId, ED)>>(iter: T) -> Self {
        let mut builder = EdgePartitionBuilder::new();
        for (src_id, dst_id, attr) in iter {
            builder.add(src_id, dst_id, attr);
        }
        builder.to_edge_partition()
    }
}

impl<ED, VD: Default> FromIterator<Edge<ED>> for EdgePartition<ED, VD> {
    fn from_iter<T: IntoIterator<Item = Edge<ED>>>(iter: T) -> Self {
        let mut builder = EdgePartitionBuilder::new();
        for edge in iter {
            builder.add_edge(edge);
        }
        builder.to_edge_partition()
    }
}

#[derive(Debug)]
struct EdgeWithLocalIds<ED> {
    local_src_id: LID,
    local_dst_id: LID,
    attr: ED,
}

/// Builds a partition on top of existing id tables and vertex attributes.
///
/// Callers supply local ids straight from the partition the tables came from, so nothing is
/// renumbered. Vertices that end up without edges stay in the tables.
#[derive(Debug)]
pub struct ExistingEdgePartitionBuilder<ED, VD> {
    ids: Arc<IdTables>,
    vertex_attrs: Arc<[VD]>,
    active_set: Option<Arc<ActiveSet>>,
    edges: Vec<EdgeWithLocalIds<ED>>,
}

impl<ED, VD> ExistingEdgePartitionBuilder<ED, VD> {
    pub fn new(
        ids: Arc<IdTables>,
        vertex_attrs: Arc<[VD]>,
        active_set: Option<Arc<ActiveSet>>,
        size_hint: usize,
    ) -> Self {
        assert_eq!(
            ids.len(),
            vertex_attrs.len(),
            "vertex attributes must cover the id tables"
        );
        Self {
            ids,
            vertex_attrs,
            active_set,
            edges: Vec::with_capacity(size_hint),
        }
    }

    /// Builder reusing the tables, vertex attributes and active set of `partition`.
    pub fn for_partition<ED0>(partition: &EdgePartition<ED0, VD>, size_hint: usize) -> Self {
        Self::new(
            partition.shared_ids(),
            partition.shared_vertex_attrs(),
            partition.shared_active_set(),
            size_hint,
        )
    }

    /// Add an edge by its global and local endpoint ids.
    ///
    /// # Panics
    ///
    /// If a local id is outside the id tables or does not map to the given global id.
    pub fn add(
        &mut self,
        src_id: VertexId,
        dst_id: VertexId,
        local_src_id: LID,
        local_dst_id: LID,
        attr: ED,
    ) {
        self.check_endpoint(src_id, local_src_id);
        self.check_endpoint(dst_id, local_dst_id);
        self.edges.push(EdgeWithLocalIds {
            local_src_id,
            local_dst_id,
            attr,
        });
    }

    fn check_endpoint(&self, vid: VertexId, lid: LID) {
        assert!(
            lid.index() < self.ids.len(),
            "local id {} is outside the {} known vertices",
            lid.as_u32(),
            self.ids.len()
        );
        let global = self.ids.global(lid);
        assert_eq!(
            global,
            vid,
            "local id {} belongs to vertex {global}, not {vid}",
            lid.as_u32()
        );
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Sort by `(local src, local dst)` and rebuild the clustered index.
    ///
    /// Input that is already in order (filter, group, join) skips the sort.
    pub fn to_edge_partition(mut self) -> EdgePartition<ED, VD> {
        let key = |e: &EdgeWithLocalIds<ED>| (e.local_src_id, e.local_dst_id);
        if !self.edges.is_sorted_by_key(key) {
            self.edges.sort_by_key(key);
        }

        let size = self.edges.len();
        let mut local_src_ids = Vec::with_capacity(size);
        let mut local_dst_ids = Vec::with_capacity(size);
        let mut data = Vec::with_capacity(size);
        let mut index = ClusterIndex::default();

        for (pos, edge) in self.edges.into_iter().enumerate() {
            if pos == 0 || local_src_ids.last() != Some(&edge.local_src_id) {
                index.insert(self.ids.global(edge.local_src_id), pos);
            }
            local_src_ids.push(edge.local_src_id);
            local_dst_ids.push(edge.local_dst_id);
            data.push(edge.attr);
        }

        debug!(
            "Rebuilt edge partition with {} edges over {} existing local vertices",
            size,
            self.ids.len()
        );

        EdgePartition::from_parts(
            local_src_ids.into(),
            local_dst_ids.into(),
            data.into(),
            Arc::new(index),
            self.ids,
            self.vertex_attrs,
            self.active_set,
        )
    }
}
