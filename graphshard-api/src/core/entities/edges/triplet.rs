use crate::core::entities::{Edge, VertexId};
use serde::{Deserialize, Serialize};

/// An edge together with the cached attributes of its endpoints.
///
/// Endpoint attributes are optional because callers can ask a partition to skip the lookups
/// they do not need.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct EdgeTriplet<VD, ED> {
    pub src_id: VertexId,
    pub dst_id: VertexId,
    pub src_attr: Option<VD>,
    pub dst_attr: Option<VD>,
    pub attr: ED,
}

impl<VD, ED> EdgeTriplet<VD, ED> {
    pub fn vertex_attr(&self, vid: VertexId) -> Option<&VD> {
        if vid == self.src_id {
            self.src_attr.as_ref()
        } else if vid == self.dst_id {
            self.dst_attr.as_ref()
        } else {
            None
        }
    }

    pub fn other_vertex_attr(&self, vid: VertexId) -> Option<&VD> {
        if vid == self.src_id {
            self.dst_attr.as_ref()
        } else if vid == self.dst_id {
            self.src_attr.as_ref()
        } else {
            None
        }
    }

    pub fn into_edge(self) -> Edge<ED> {
        Edge::new(self.src_id, self.dst_id, self.attr)
    }
}
