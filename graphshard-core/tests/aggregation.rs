use graphshard_api::core::utils::logging::global_trace_logger;
use graphshard_core::prelude::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::collections::{BTreeMap, HashSet};

mod common;
use common::{build_edge_list_with_actives, build_partition, ALL_ACTIVENESS};

/// Brute force: walk every edge, keep the admitted ones, sum weights into both endpoints.
fn oracle(
    edges: &[(u64, u64, i64)],
    actives: &HashSet<u64>,
    activeness: Activeness,
) -> Vec<(u64, i64)> {
    let mut sums = BTreeMap::new();
    for &(src, dst, w) in edges {
        if activeness.admits(actives.contains(&src), actives.contains(&dst)) {
            *sums.entry(dst).or_insert(0) += w;
            *sums.entry(src).or_insert(0) += 10 * w;
        }
    }
    sums.into_iter().collect()
}

fn send(ctx: &mut AggregationContext<'_, i64, i64, i64, fn(i64, i64) -> i64>) {
    let w = *ctx.attr().unwrap();
    ctx.send_to_dst(w);
    ctx.send_to_src(10 * w);
}

#[test]
fn scans_match_brute_force() {
    global_trace_logger();
    let merge: fn(i64, i64) -> i64 = |a, b| a + b;
    proptest!(|((edges, actives) in build_edge_list_with_actives(200, 25))| {
        let p = build_partition(&edges).with_active_set(actives.iter().copied());
        let actives: HashSet<u64> = actives.into_iter().collect();
        for activeness in ALL_ACTIVENESS {
            let expected = oracle(&edges, &actives, activeness);
            let edge = p
                .aggregate_messages_edge_scan(send, merge, TripletFields::EDGE_ONLY, activeness)
                .unwrap();
            let index = p
                .aggregate_messages_index_scan(send, merge, TripletFields::EDGE_ONLY, activeness)
                .unwrap();
            prop_assert_eq!(&edge, &expected);
            prop_assert_eq!(&index, &expected);
        }
    });
}

#[test]
fn dispatcher_agrees_with_both_scans() {
    let merge: fn(i64, i64) -> i64 = |a, b| a + b;
    let strategy = (build_edge_list_with_actives(100, 20), 0.0f32..=1.0);
    proptest!(|(((edges, actives), threshold) in strategy)| {
        let p = build_partition(&edges).with_active_set(actives);
        let config = AggregationConfig { index_scan_threshold: threshold };
        for activeness in ALL_ACTIVENESS {
            let dispatched = p
                .aggregate_messages(send, merge, TripletFields::EDGE_ONLY, activeness, &config)
                .unwrap();
            let edge = p
                .aggregate_messages_edge_scan(send, merge, TripletFields::EDGE_ONLY, activeness)
                .unwrap();
            prop_assert_eq!(dispatched, edge);
        }
    });
}

#[test]
fn vertex_attributes_reach_the_callback() {
    let p: EdgePartition<(), f64> = [(1, 2, ()), (2, 3, ()), (3, 1, ())]
        .into_iter()
        .collect();
    let p = p.update_vertices([(1, 0.5), (2, 0.25), (3, 0.125)]).unwrap();
    // push each source's value to its destination
    let result = p
        .aggregate_messages_edge_scan(
            |ctx| ctx.send_to_dst(*ctx.src_attr().unwrap()),
            |a, b| a + b,
            TripletFields::SRC,
            Activeness::Neither,
        )
        .unwrap();
    assert_eq!(result, vec![(1, 0.125), (2, 0.5), (3, 0.25)]);
}

#[test]
fn sharded_run_matches_single_partition() {
    let strategy = (build_edge_list_with_actives(300, 40), 1usize..6);
    proptest!(|(((edges, actives), num_shards) in strategy)| {
        let single = build_partition(&edges).with_active_set(actives.iter().copied());
        let shards: Vec<_> = (0..num_shards)
            .map(|shard| {
                let shard_edges: Vec<_> = edges
                    .iter()
                    .copied()
                    .filter(|&(src, _, _)| src as usize % num_shards == shard)
                    .collect();
                build_partition(&shard_edges).with_active_set(actives.iter().copied())
            })
            .collect();
        let config = AggregationConfig::default();
        for activeness in ALL_ACTIVENESS {
            let per_shard = aggregate_shards(
                &shards,
                |ctx| ctx.send_to_dst(*ctx.attr().unwrap()),
                |a, b| a + b,
                TripletFields::EDGE_ONLY,
                activeness,
                &config,
            )
            .unwrap();
            let mut merged: Vec<_> = merge_shard_messages(per_shard, |a, b| a + b)
                .into_iter()
                .collect();
            merged.sort();
            let expected = single
                .aggregate_messages_edge_scan(
                    |ctx| ctx.send_to_dst(*ctx.attr().unwrap()),
                    |a, b| a + b,
                    TripletFields::EDGE_ONLY,
                    activeness,
                )
                .unwrap();
            prop_assert_eq!(merged, expected);
        }
    });
}

#[test]
fn missing_active_set_is_reported() {
    let p = build_partition(&[(1, 2, 1)]);
    let err = p
        .aggregate_messages(
            |ctx| ctx.send_to_dst(1),
            |a: i64, b| a + b,
            TripletFields::NONE,
            Activeness::Either,
            &AggregationConfig::default(),
        )
        .unwrap_err();
    assert!(matches!(err, PartitionError::ActiveSetRequired(Activeness::Either)));
    assert_eq!(
        err.to_string(),
        "Activeness Either requires an active set but none is configured"
    );
}
