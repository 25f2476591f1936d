use crate::{
    config::aggregation_config::AggregationConfig, entities::partition::EdgePartition,
    state::AggregationContext, storage::ActiveSet, utils::errors::PartitionError,
};
use graphshard_api::core::{entities::VertexId, Activeness, TripletFields};
use tracing::trace;

/// What the index scan does with a whole source cluster after one look at its source.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum ClusterScan {
    Skip,
    All,
    CheckDst,
}

/// Activeness resolved against the partition's active set.
#[derive(Debug, Copy, Clone)]
struct ActiveFilter<'a> {
    activeness: Activeness,
    active_set: Option<&'a ActiveSet>,
}

impl<'a> ActiveFilter<'a> {
    fn new(
        activeness: Activeness,
        active_set: Option<&'a ActiveSet>,
    ) -> Result<Self, PartitionError> {
        if activeness.requires_active_set() && active_set.is_none() {
            return Err(PartitionError::ActiveSetRequired(activeness));
        }
        Ok(Self {
            activeness,
            active_set,
        })
    }

    #[inline]
    fn is_active(&self, vid: VertexId) -> bool {
        self.active_set.is_some_and(|set| set.contains(vid))
    }

    #[inline]
    fn edge(&self, src_id: VertexId, dst_id: VertexId) -> bool {
        self.activeness.admits_with(|| self.is_active(src_id), || self.is_active(dst_id))
    }

    #[inline]
    fn cluster(&self, src_id: VertexId) -> ClusterScan {
        match self.activeness {
            Activeness::Neither => ClusterScan::All,
            Activeness::SrcOnly => {
                if self.is_active(src_id) {
                    ClusterScan::All
                } else {
                    ClusterScan::Skip
                }
            }
            Activeness::DstOnly => ClusterScan::CheckDst,
            Activeness::Both => {
                if self.is_active(src_id) {
                    ClusterScan::CheckDst
                } else {
                    ClusterScan::Skip
                }
            }
            Activeness::Either => {
                if self.is_active(src_id) {
                    ClusterScan::All
                } else {
                    ClusterScan::CheckDst
                }
            }
        }
    }
}

impl<ED, VD> EdgePartition<ED, VD> {
    /// Send messages along the edges and merge them per receiving vertex, visiting every edge.
    ///
    /// For each edge admitted by `activeness`, `send_msg` is called with a context positioned
    /// on that edge. Messages sent to the same vertex are combined with `merge_msg`. The result
    /// holds one `(vertex id, message)` pair per vertex that received anything, in ascending id
    /// order.
    ///
    /// Fails with [`PartitionError::ActiveSetRequired`] if `activeness` needs an active set and
    /// none is configured. Panics in the callbacks propagate and abort the scan.
    pub fn aggregate_messages_edge_scan<A, S, M>(
        &self,
        mut send_msg: S,
        merge_msg: M,
        fields: TripletFields,
        activeness: Activeness,
    ) -> Result<Vec<(VertexId, A)>, PartitionError>
    where
        S: FnMut(&mut AggregationContext<'_, VD, ED, A, M>),
        M: FnMut(A, A) -> A,
    {
        let filter = ActiveFilter::new(activeness, self.active_set())?;
        let mut ctx = AggregationContext::new(merge_msg, self.num_local_vertices());

        for pos in 0..self.size() {
            let local_src = self.local_src_ids[pos];
            let local_dst = self.local_dst_ids[pos];
            let src_id = self.ids.global(local_src);
            let dst_id = self.ids.global(local_dst);
            if !filter.edge(src_id, dst_id) {
                continue;
            }
            ctx.set(
                src_id,
                dst_id,
                local_src,
                local_dst,
                fields
                    .use_src
                    .then(|| &self.vertex_attrs[local_src.index()]),
                fields
                    .use_dst
                    .then(|| &self.vertex_attrs[local_dst.index()]),
                fields.use_edge.then(|| &self.data[pos]),
            );
            send_msg(&mut ctx);
        }

        trace!(
            "Edge scan over {} edges with activeness {} touched {} vertices",
            self.size(),
            activeness,
            ctx.num_touched()
        );
        Ok(ctx.into_messages(&self.ids))
    }

    /// Same result as [`EdgePartition::aggregate_messages_edge_scan`], walking the clustered
    /// index instead.
    ///
    /// The source side of `activeness` is checked once per source cluster, so clusters with an
    /// inactive source are skipped without looking at their edges. This pays off when few
    /// vertices are active.
    pub fn aggregate_messages_index_scan<A, S, M>(
        &self,
        mut send_msg: S,
        merge_msg: M,
        fields: TripletFields,
        activeness: Activeness,
    ) -> Result<Vec<(VertexId, A)>, PartitionError>
    where
        S: FnMut(&mut AggregationContext<'_, VD, ED, A, M>),
        M: FnMut(A, A) -> A,
    {
        let filter = ActiveFilter::new(activeness, self.active_set())?;
        let mut ctx = AggregationContext::new(merge_msg, self.num_local_vertices());
        let mut skipped = 0;

        for (src_id, range) in self.clusters() {
            let scan = filter.cluster(src_id);
            if scan == ClusterScan::Skip {
                skipped += 1;
                continue;
            }
            let local_src = self.local_src_ids[range.start];
            ctx.set_src_only(
                src_id,
                local_src,
                fields
                    .use_src
                    .then(|| &self.vertex_attrs[local_src.index()]),
            );
            for pos in range {
                let local_dst = self.local_dst_ids[pos];
                let dst_id = self.ids.global(local_dst);
                if scan == ClusterScan::CheckDst && !filter.is_active(dst_id) {
                    continue;
                }
                ctx.set_rest(
                    dst_id,
                    local_dst,
                    fields
                        .use_dst
                        .then(|| &self.vertex_attrs[local_dst.index()]),
                    fields.use_edge.then(|| &self.data[pos]),
                );
                send_msg(&mut ctx);
            }
        }

        trace!(
            "Index scan over {} clusters with activeness {} skipped {} and touched {} vertices",
            self.index_size(),
            activeness,
            skipped,
            ctx.num_touched()
        );
        Ok(ctx.into_messages(&self.ids))
    }

    /// Fraction of local vertices in the active set, `None` without an active set or vertices.
    pub fn active_fraction(&self) -> Option<f32> {
        let actives = self.num_actives()?;
        if self.num_local_vertices() == 0 {
            return None;
        }
        Some(actives as f32 / self.num_local_vertices() as f32)
    }

    /// Aggregate messages, picking the scan strategy.
    ///
    /// The index scan is used when activeness is filtering and the active fraction is below
    /// `config.index_scan_threshold`, the edge scan otherwise.
    pub fn aggregate_messages<A, S, M>(
        &self,
        send_msg: S,
        merge_msg: M,
        fields: TripletFields,
        activeness: Activeness,
        config: &AggregationConfig,
    ) -> Result<Vec<(VertexId, A)>, PartitionError>
    where
        S: FnMut(&mut AggregationContext<'_, VD, ED, A, M>),
        M: FnMut(A, A) -> A,
    {
        let use_index = activeness.requires_active_set()
            && self
                .active_fraction()
                .is_some_and(|fraction| fraction < config.index_scan_threshold);
        trace!(
            "Aggregating with activeness {} using the {} scan",
            activeness,
            if use_index { "index" } else { "edge" }
        );
        if use_index {
            self.aggregate_messages_index_scan(send_msg, merge_msg, fields, activeness)
        } else {
            self.aggregate_messages_edge_scan(send_msg, merge_msg, fields, activeness)
        }
    }
}
