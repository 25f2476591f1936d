use crate::entities::partition::EdgePartition;
use graphshard_api::core::entities::{Edge, EdgeTriplet};
use std::ops::Range;

impl<ED, VD> EdgePartition<ED, VD> {
    /// Call `f` on every edge in stored order, reusing a single scratch edge.
    ///
    /// Nothing is allocated per edge. The scratch value is overwritten before each call, so
    /// it cannot be kept beyond the call it was handed to.
    pub fn for_each_edge(&self, mut f: impl FnMut(&Edge<&ED>)) {
        let Some(first) = self.data.first() else {
            return;
        };
        let mut scratch = Edge::new(0, 0, first);
        for pos in 0..self.size() {
            scratch.src_id = self.src_id(pos);
            scratch.dst_id = self.dst_id(pos);
            scratch.attr = &self.data[pos];
            f(&scratch);
        }
    }

    /// Edges in stored order, each one a fresh owned value that can be kept around.
    pub fn iter(&self) -> EdgeIter<'_, ED, VD>
    where
        ED: Clone,
    {
        EdgeIter {
            partition: self,
            range: 0..self.size(),
        }
    }

    /// Edges with their endpoints' cached attributes, in stored order.
    ///
    /// Each triplet is freshly allocated. Endpoint attributes that are not requested are left
    /// as `None` and never looked up.
    pub fn triplet_iter(&self, include_src: bool, include_dst: bool) -> TripletIter<'_, ED, VD>
    where
        ED: Clone,
        VD: Clone,
    {
        TripletIter {
            partition: self,
            range: 0..self.size(),
            include_src,
            include_dst,
        }
    }
}

pub struct EdgeIter<'a, ED, VD> {
    partition: &'a EdgePartition<ED, VD>,
    range: Range<usize>,
}

impl<ED: Clone, VD> Iterator for EdgeIter<'_, ED, VD> {
    type Item = Edge<ED>;

    fn next(&mut self) -> Option<Self::Item> {
        let pos = self.range.next()?;
        let p = self.partition;
        Some(Edge::new(p.src_id(pos), p.dst_id(pos), p.data[pos].clone()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl<ED: Clone, VD> ExactSizeIterator for EdgeIter<'_, ED, VD> {}

pub struct TripletIter<'a, ED, VD> {
    partition: &'a EdgePartition<ED, VD>,
    range: Range<usize>,
    include_src: bool,
    include_dst: bool,
}

impl<ED: Clone, VD: Clone> Iterator for TripletIter<'_, ED, VD> {
    type Item = EdgeTriplet<VD, ED>;

    fn next(&mut self) -> Option<Self::Item> {
        let pos = self.range.next()?;
        let p = self.partition;
        let local_src = p.local_src_ids[pos];
        let local_dst = p.local_dst_ids[pos];
        Some(EdgeTriplet {
            src_id: p.ids.global(local_src),
            dst_id: p.ids.global(local_dst),
            src_attr: self
                .include_src
                .then(|| p.vertex_attrs[local_src.index()].clone()),
            dst_attr: self
                .include_dst
                .then(|| p.vertex_attrs[local_dst.index()].clone()),
            attr: p.data[pos].clone(),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl<ED: Clone, VD: Clone> ExactSizeIterator for TripletIter<'_, ED, VD> {}

impl<'a, ED: Clone, VD> IntoIterator for &'a EdgePartition<ED, VD> {
    type Item = Edge<ED>;
    type IntoIter = EdgeIter<'a, ED, VD>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod test {
    use crate::entities::partition::EdgePartition;
    use graphshard_api::core::entities::{Edge, EdgeTriplet};
    use pretty_assertions::assert_eq;

    fn weighted() -> EdgePartition<String, char> {
        let p: EdgePartition<String, char> = [(2, 1, "x"), (1, 2, "y")]
            .into_iter()
            .map(|(s, d, a)| (s, d, a.to_string()))
            .collect();
        p.update_vertices([(1, 'a'), (2, 'b')]).unwrap()
    }

    #[test]
    fn iter_yields_fresh_edges() {
        let p = weighted();
        let edges: Vec<_> = p.iter().collect();
        assert_eq!(
            edges,
            vec![Edge::new(1, 2, "y".to_string()), Edge::new(2, 1, "x".to_string())]
        );
        // retained elements do not alias each other or the partition
        assert!(!std::ptr::eq(edges[0].attr.as_str(), p.attr(0).as_str()));
        assert_ne!(edges[0], edges[1]);
        // restartable
        assert_eq!(p.iter().count(), 2);
        assert_eq!((&p).into_iter().len(), 2);
    }

    #[test]
    fn for_each_edge_reuses_one_scratch() {
        let p = weighted();
        let mut addresses = Vec::new();
        let mut seen = Vec::new();
        p.for_each_edge(|e| {
            addresses.push(e as *const Edge<&String> as usize);
            seen.push((e.src_id, e.dst_id, e.attr.clone()));
        });
        assert_eq!(seen, vec![(1, 2, "y".to_string()), (2, 1, "x".to_string())]);
        assert!(addresses.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn for_each_edge_on_empty_partition() {
        let p: EdgePartition<u8, ()> = EdgePartition::default();
        let mut calls = 0;
        p.for_each_edge(|_| calls += 1);
        assert_eq!(calls, 0);
    }

    #[test]
    fn triplets_include_requested_attributes() {
        let p = weighted();
        let all: Vec<_> = p.triplet_iter(true, true).collect();
        assert_eq!(
            all[0],
            EdgeTriplet {
                src_id: 1,
                dst_id: 2,
                src_attr: Some('a'),
                dst_attr: Some('b'),
                attr: "y".to_string(),
            }
        );
        let src_only: Vec<_> = p.triplet_iter(true, false).collect();
        assert_eq!(src_only[1].src_attr, Some('b'));
        assert_eq!(src_only[1].dst_attr, None);
        let none: Vec<_> = p.triplet_iter(false, false).collect();
        assert!(none.iter().all(|t| t.src_attr.is_none() && t.dst_attr.is_none()));
    }
}
