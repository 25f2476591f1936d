use crate::{
    config::aggregation_config::AggregationConfig, entities::partition::EdgePartition,
    state::AggregationContext, utils::errors::PartitionError,
};
use graphshard_api::core::{entities::VertexId, Activeness, TripletFields};
use rayon::prelude::*;
use hashbrown::hash_map::Entry;
use rustc_hash::FxBuildHasher;
use tracing::debug;

/// One merged message per vertex.
pub type MessageMap<A> = hashbrown::HashMap<VertexId, A, FxBuildHasher>;

/// Aggregate messages on every partition in parallel.
///
/// Each partition runs its own scan (strategy picked by `config`) with its own copy of
/// `merge_msg`. The per-partition results come back in the order of `partitions`, the first
/// error aborts the whole run.
pub fn aggregate_shards<ED, VD, A, S, M>(
    partitions: &[EdgePartition<ED, VD>],
    send_msg: S,
    merge_msg: M,
    fields: TripletFields,
    activeness: Activeness,
    config: &AggregationConfig,
) -> Result<Vec<Vec<(VertexId, A)>>, PartitionError>
where
    ED: Sync + Send,
    VD: Sync + Send,
    A: Send,
    S: Fn(&mut AggregationContext<'_, VD, ED, A, M>) + Sync,
    M: Fn(A, A) -> A + Clone + Send + Sync,
{
    debug!(
        "Aggregating messages over {} partitions with activeness {}",
        partitions.len(),
        activeness
    );
    partitions
        .par_iter()
        .map(|partition| {
            partition.aggregate_messages(&send_msg, merge_msg.clone(), fields, activeness, config)
        })
        .collect()
}

/// Combine per-partition results into one message per vertex.
///
/// A vertex shared by several partitions gets its messages merged with `merge_msg`, in
/// partition order.
pub fn merge_shard_messages<A>(
    shards: impl IntoIterator<Item = Vec<(VertexId, A)>>,
    mut merge_msg: impl FnMut(A, A) -> A,
) -> MessageMap<A> {
    let mut merged = MessageMap::default();
    for (vid, msg) in shards.into_iter().flatten() {
        match merged.entry(vid) {
            Entry::Occupied(entry) => {
                entry.replace_entry_with(|_, existing| Some(merge_msg(existing, msg)));
            }
            Entry::Vacant(entry) => {
                entry.insert(msg);
            }
        }
    }
    merged
}

#[cfg(test)]
mod test {
    use super::{aggregate_shards, merge_shard_messages};
    use crate::{config::aggregation_config::AggregationConfig, entities::partition::EdgePartition};
    use graphshard_api::core::{utils::logging::global_info_logger, Activeness, TripletFields};
    use pretty_assertions::assert_eq;

    fn shards() -> Vec<EdgePartition<u32, ()>> {
        vec![
            [(1, 2, 1), (1, 3, 2)].into_iter().collect(),
            [(2, 3, 3), (4, 2, 4)].into_iter().collect(),
            EdgePartition::default(),
        ]
    }

    #[test]
    fn shards_are_aggregated_independently() {
        global_info_logger();
        let results = aggregate_shards(
            &shards(),
            |ctx| ctx.send_to_dst(*ctx.attr().unwrap()),
            |a, b| a + b,
            TripletFields::EDGE_ONLY,
            Activeness::Neither,
            &AggregationConfig::default(),
        )
        .unwrap();
        assert_eq!(
            results,
            vec![vec![(2, 1), (3, 2)], vec![(2, 4), (3, 3)], vec![]]
        );

        let mut merged: Vec<_> = merge_shard_messages(results, |a, b| a + b)
            .into_iter()
            .collect();
        merged.sort();
        assert_eq!(merged, vec![(2, 5), (3, 5)]);
    }

    #[test]
    fn first_failing_shard_fails_the_run() {
        let partitions = shards();
        let result = aggregate_shards(
            &partitions,
            |ctx| ctx.send_to_dst(1u32),
            |a, b| a + b,
            TripletFields::NONE,
            Activeness::Both,
            &AggregationConfig::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn merge_keeps_partition_order() {
        let merged = merge_shard_messages(
            vec![vec![(7, "a".to_string())], vec![(7, "b".to_string()), (8, "c".to_string())]],
            |a, b| a + &b,
        );
        assert_eq!(merged[&7], "ab");
        assert_eq!(merged[&8], "c");

        let merged = merge_shard_messages(
            (0..4).map(|shard| vec![(1, shard.to_string())]),
            |a, b| a + &b,
        );
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[&1], "0123");
    }
}
