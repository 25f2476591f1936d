#![allow(dead_code)]

use graphshard_core::prelude::*;
use proptest::prelude::*;

/// Random edges `(src, dst, weight)` over `num_vertices` vertices, duplicates and self-loops
/// included.
pub fn build_edge_list(
    len: usize,
    num_vertices: u64,
) -> impl Strategy<Value = Vec<(u64, u64, i64)>> {
    proptest::collection::vec((0..num_vertices, 0..num_vertices, -100i64..100i64), 0..=len)
}

/// Random edge list together with a random subset of vertex ids to mark active.
pub fn build_edge_list_with_actives(
    len: usize,
    num_vertices: u64,
) -> impl Strategy<Value = (Vec<(u64, u64, i64)>, Vec<u64>)> {
    (
        build_edge_list(len, num_vertices),
        proptest::collection::vec(0..num_vertices, 0..=num_vertices as usize),
    )
}

pub fn build_partition(edges: &[(u64, u64, i64)]) -> EdgePartition<i64, i64> {
    let mut builder = EdgePartitionBuilder::with_capacity(edges.len());
    for &(src, dst, weight) in edges {
        builder.add(src, dst, weight);
    }
    builder.to_edge_partition()
}

pub fn all_edges<ED: Clone, VD>(partition: &EdgePartition<ED, VD>) -> Vec<(u64, u64, ED)> {
    partition
        .iter()
        .map(|e| (e.src_id, e.dst_id, e.attr))
        .collect()
}

pub const ALL_ACTIVENESS: [Activeness; 5] = [
    Activeness::Neither,
    Activeness::SrcOnly,
    Activeness::DstOnly,
    Activeness::Both,
    Activeness::Either,
];
