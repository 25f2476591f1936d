use crate::{
    entities::partition::{EdgePartition, ExistingEdgePartitionBuilder},
    utils::errors::PartitionError,
};
use graphshard_api::core::entities::{Edge, EdgeTriplet, VertexId};

impl<ED, VD> EdgePartition<ED, VD> {
    /// Swap source and destination of every edge.
    ///
    /// The vertex universe does not change, so id tables, vertex attributes and the active set
    /// are shared with `self`. The edges are re-sorted and the index rebuilt.
    pub fn reverse(&self) -> Self
    where
        ED: Clone,
    {
        let mut builder = ExistingEdgePartitionBuilder::for_partition(self, self.size());
        for pos in 0..self.size() {
            let local_src = self.local_src_ids[pos];
            let local_dst = self.local_dst_ids[pos];
            builder.add(
                self.ids.global(local_dst),
                self.ids.global(local_src),
                local_dst,
                local_src,
                self.data[pos].clone(),
            );
        }
        builder.to_edge_partition()
    }

    /// Compute a new attribute for every edge, keeping the topology.
    ///
    /// `f` receives a scratch edge that is reused from one call to the next (see
    /// [`EdgePartition::for_each_edge`]).
    pub fn map<ED2>(&self, mut f: impl FnMut(&Edge<&ED>) -> ED2) -> EdgePartition<ED2, VD> {
        let mut data = Vec::with_capacity(self.size());
        self.for_each_edge(|edge| data.push(f(edge)));
        EdgePartition::from_parts(
            self.local_src_ids.clone(),
            self.local_dst_ids.clone(),
            data.into(),
            self.index.clone(),
            self.ids.clone(),
            self.vertex_attrs.clone(),
            self.active_set.clone(),
        )
    }

    /// Replace the edge attributes by position from an external sequence.
    ///
    /// The sequence has to yield exactly one value per edge.
    pub fn map_values<ED2>(
        &self,
        values: impl IntoIterator<Item = ED2>,
    ) -> Result<EdgePartition<ED2, VD>, PartitionError> {
        self.with_data(values.into_iter().collect())
    }

    /// Keep the edges where both endpoints pass `vertex_pred` and the triplet passes
    /// `edge_pred`.
    ///
    /// Predicates are evaluated source, destination, edge, stopping at the first failure.
    /// Local ids are not renumbered, vertices left without edges stay in the tables.
    pub fn filter(
        &self,
        mut edge_pred: impl FnMut(&EdgeTriplet<&VD, &ED>) -> bool,
        mut vertex_pred: impl FnMut(VertexId, &VD) -> bool,
    ) -> Self
    where
        ED: Clone,
    {
        let mut builder = ExistingEdgePartitionBuilder::for_partition(self, 0);
        for pos in 0..self.size() {
            let local_src = self.local_src_ids[pos];
            let local_dst = self.local_dst_ids[pos];
            let src_attr = &self.vertex_attrs[local_src.index()];
            let dst_attr = &self.vertex_attrs[local_dst.index()];
            let triplet = EdgeTriplet {
                src_id: self.ids.global(local_src),
                dst_id: self.ids.global(local_dst),
                src_attr: Some(src_attr),
                dst_attr: Some(dst_attr),
                attr: &self.data[pos],
            };
            if vertex_pred(triplet.src_id, src_attr)
                && vertex_pred(triplet.dst_id, dst_attr)
                && edge_pred(&triplet)
            {
                builder.add(
                    triplet.src_id,
                    triplet.dst_id,
                    local_src,
                    local_dst,
                    self.data[pos].clone(),
                );
            }
        }
        builder.to_edge_partition()
    }

    /// Collapse runs of edges sharing the same `(src, dst)` into one edge, folding their
    /// attributes left to right with `merge`.
    ///
    /// Duplicates are adjacent because of the stored order, so this is a single pass.
    pub fn group_edges(&self, mut merge: impl FnMut(ED, ED) -> ED) -> Self
    where
        ED: Clone,
    {
        debug_assert!(self.is_sorted());
        let mut builder = ExistingEdgePartitionBuilder::for_partition(self, 0);
        let mut pos = 0;
        while pos < self.size() {
            let local_src = self.local_src_ids[pos];
            let local_dst = self.local_dst_ids[pos];
            let mut attr = self.data[pos].clone();
            pos += 1;
            while pos < self.size()
                && self.local_src_ids[pos] == local_src
                && self.local_dst_ids[pos] == local_dst
            {
                attr = merge(attr, self.data[pos].clone());
                pos += 1;
            }
            builder.add(
                self.ids.global(local_src),
                self.ids.global(local_dst),
                local_src,
                local_dst,
                attr,
            );
        }
        builder.to_edge_partition()
    }

    /// Merge-join with `other` on `(src, dst)`, keeping the edges of `self` that have a match.
    ///
    /// Both sides are walked once in stored order. For each edge of `self` the cursor into
    /// `other` stops at the first edge with the same `(src, dst)` and stays there, so when
    /// `other` holds duplicates every matching edge of `self` is paired with the first of them.
    /// Vertex tables and attributes come from `self`.
    pub fn inner_join<ED2, VD2, ED3>(
        &self,
        other: &EdgePartition<ED2, VD2>,
        mut f: impl FnMut(VertexId, VertexId, &ED, &ED2) -> ED3,
    ) -> EdgePartition<ED3, VD> {
        debug_assert!(self.is_sorted());
        debug_assert!(other.is_sorted());
        let mut builder = ExistingEdgePartitionBuilder::for_partition(self, 0);
        let mut j = 0;
        for i in 0..self.size() {
            let src_id = self.src_id(i);
            let dst_id = self.dst_id(i);
            while j < other.size() && other.src_id(j) < src_id {
                j += 1;
            }
            if j < other.size() && other.src_id(j) == src_id {
                while j < other.size() && other.src_id(j) == src_id && other.dst_id(j) < dst_id {
                    j += 1;
                }
                if j < other.size() && other.src_id(j) == src_id && other.dst_id(j) == dst_id {
                    builder.add(
                        src_id,
                        dst_id,
                        self.local_src_ids[i],
                        self.local_dst_ids[i],
                        f(src_id, dst_id, &self.data[i], &other.data[j]),
                    );
                }
            }
        }
        builder.to_edge_partition()
    }

    /// true if the edges are in `(src, dst)` order
    pub fn is_sorted(&self) -> bool {
        (1..self.size()).all(|pos| {
            (self.local_src_ids[pos - 1], self.local_dst_ids[pos - 1])
                <= (self.local_src_ids[pos], self.local_dst_ids[pos])
        })
    }
}
