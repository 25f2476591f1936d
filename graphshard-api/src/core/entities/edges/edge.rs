use crate::core::entities::VertexId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A directed edge between two global vertex ids carrying an attribute.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Edge<ED> {
    pub src_id: VertexId,
    pub dst_id: VertexId,
    pub attr: ED,
}

impl<ED> Edge<ED> {
    #[inline]
    pub fn new(src_id: VertexId, dst_id: VertexId, attr: ED) -> Self {
        Self {
            src_id,
            dst_id,
            attr,
        }
    }

    /// The endpoint on the other side of `vid`, `None` if `vid` is not an endpoint.
    pub fn other_vertex_id(&self, vid: VertexId) -> Option<VertexId> {
        if vid == self.src_id {
            Some(self.dst_id)
        } else if vid == self.dst_id {
            Some(self.src_id)
        } else {
            None
        }
    }

    /// Compare by `(src_id, dst_id)` only, this is the clustered order edges are stored in.
    #[inline]
    pub fn lexicographic_cmp(&self, other: &Self) -> Ordering {
        (self.src_id, self.dst_id).cmp(&(other.src_id, other.dst_id))
    }

    pub fn map<ED2>(self, f: impl FnOnce(ED) -> ED2) -> Edge<ED2> {
        Edge {
            src_id: self.src_id,
            dst_id: self.dst_id,
            attr: f(self.attr),
        }
    }
}

impl<ED> From<(VertexId, VertexId, ED)> for Edge<ED> {
    fn from((src_id, dst_id, attr): (VertexId, VertexId, ED)) -> Self {
        Edge::new(src_id, dst_id, attr)
    }
}

#[cfg(test)]
mod test {
    use super::Edge;
    use std::cmp::Ordering;

    #[test]
    fn ordering_ignores_attribute() {
        let a = Edge::new(1, 2, "z");
        let b = Edge::new(1, 2, "a");
        assert_eq!(a.lexicographic_cmp(&b), Ordering::Equal);
        assert_eq!(
            Edge::new(1, 3, ()).lexicographic_cmp(&Edge::new(2, 0, ())),
            Ordering::Less
        );
    }

    #[test]
    fn other_vertex() {
        let e = Edge::new(4, 7, 1.0);
        assert_eq!(e.other_vertex_id(4), Some(7));
        assert_eq!(e.other_vertex_id(7), Some(4));
        assert_eq!(e.other_vertex_id(5), None);
    }
}
