use crate::{state::accumulator::MessageAccumulator, storage::IdTables};
use graphshard_api::core::entities::{VertexId, LID};

/// The view of the current edge handed to `send_msg` during a message-aggregation scan.
///
/// One context is created per scan and repositioned on every edge. Messages are routed by local
/// id into the scan's [`MessageAccumulator`] and merged there with the scan's `merge_msg`.
///
/// Vertex attributes are only present when the scan's `TripletFields` asked for them, the edge
/// attribute only when `use_edge` is set.
pub struct AggregationContext<'a, VD, ED, A, M> {
    merge_msg: M,
    acc: MessageAccumulator<A>,
    src_id: VertexId,
    dst_id: VertexId,
    local_src_id: LID,
    local_dst_id: LID,
    src_attr: Option<&'a VD>,
    dst_attr: Option<&'a VD>,
    attr: Option<&'a ED>,
}

impl<'a, VD, ED, A, M> AggregationContext<'a, VD, ED, A, M>
where
    M: FnMut(A, A) -> A,
{
    pub(crate) fn new(merge_msg: M, num_local_vertices: usize) -> Self {
        Self {
            merge_msg,
            acc: MessageAccumulator::new(num_local_vertices),
            src_id: 0,
            dst_id: 0,
            local_src_id: LID::default(),
            local_dst_id: LID::default(),
            src_attr: None,
            dst_attr: None,
            attr: None,
        }
    }

    /// Position the context on a full edge (edge scan).
    #[inline]
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn set(
        &mut self,
        src_id: VertexId,
        dst_id: VertexId,
        local_src_id: LID,
        local_dst_id: LID,
        src_attr: Option<&'a VD>,
        dst_attr: Option<&'a VD>,
        attr: Option<&'a ED>,
    ) {
        self.set_src_only(src_id, local_src_id, src_attr);
        self.set_rest(dst_id, local_dst_id, dst_attr, attr);
    }

    /// Source half, set once per cluster by the index scan.
    #[inline]
    pub(crate) fn set_src_only(
        &mut self,
        src_id: VertexId,
        local_src_id: LID,
        src_attr: Option<&'a VD>,
    ) {
        self.src_id = src_id;
        self.local_src_id = local_src_id;
        self.src_attr = src_attr;
    }

    /// Destination half, set per edge by the index scan.
    #[inline]
    pub(crate) fn set_rest(
        &mut self,
        dst_id: VertexId,
        local_dst_id: LID,
        dst_attr: Option<&'a VD>,
        attr: Option<&'a ED>,
    ) {
        self.dst_id = dst_id;
        self.local_dst_id = local_dst_id;
        self.dst_attr = dst_attr;
        self.attr = attr;
    }

    #[inline]
    pub fn src_id(&self) -> VertexId {
        self.src_id
    }

    #[inline]
    pub fn dst_id(&self) -> VertexId {
        self.dst_id
    }

    #[inline]
    pub fn src_attr(&self) -> Option<&'a VD> {
        self.src_attr
    }

    #[inline]
    pub fn dst_attr(&self) -> Option<&'a VD> {
        self.dst_attr
    }

    #[inline]
    pub fn attr(&self) -> Option<&'a ED> {
        self.attr
    }

    /// Send a message to the source of the current edge.
    #[inline]
    pub fn send_to_src(&mut self, msg: A) {
        self.acc.send(self.local_src_id, msg, &mut self.merge_msg);
    }

    /// Send a message to the destination of the current edge.
    #[inline]
    pub fn send_to_dst(&mut self, msg: A) {
        self.acc.send(self.local_dst_id, msg, &mut self.merge_msg);
    }

    pub(crate) fn into_messages(self, ids: &IdTables) -> Vec<(VertexId, A)> {
        self.acc.into_messages(ids)
    }

    pub(crate) fn num_touched(&self) -> usize {
        self.acc.num_touched()
    }
}
