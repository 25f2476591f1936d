//! # graphshard-core
//!
//! Columnar edge partitions for vertex-centric graph processing.
//!
//! A graph is split into shards, each one an [`EdgePartition`] holding its edges sorted by
//! `(source, destination)` together with a clustered index over the sources, a compact local
//! id space for the vertices it references, a cache of their attributes and an optional
//! active set. Partitions are immutable: transformations (`map`, `filter`, `reverse`,
//! `group_edges`, `inner_join`, ...) return new partitions that share the parts they did not
//! touch.
//!
//! The main operation is message aggregation: a `send_msg` callback is run on every edge
//! admitted by an [`Activeness`] filter, and the messages it sends are merged per receiving
//! vertex with `merge_msg`.
//!
//! ```
//! use graphshard_core::prelude::*;
//!
//! let partition: EdgePartition<f64, ()> = [(1, 2, 1.0), (1, 3, 2.0), (2, 3, 3.0)]
//!     .into_iter()
//!     .collect();
//! let in_weights = partition
//!     .aggregate_messages_edge_scan(
//!         |ctx| ctx.send_to_dst(*ctx.attr().unwrap()),
//!         |a, b| a + b,
//!         TripletFields::EDGE_ONLY,
//!         Activeness::Neither,
//!     )
//!     .unwrap();
//! assert_eq!(in_weights, vec![(2, 1.0), (3, 5.0)]);
//! ```
//!
//! [`Activeness`]: graphshard_api::core::Activeness

pub mod config;
pub mod entities;
pub mod state;
pub mod storage;
pub mod utils;

pub use entities::partition::EdgePartition;

pub mod prelude {
    pub use crate::{
        config::{aggregation_config::AggregationConfig, app_config::ShardConfig},
        entities::partition::{EdgePartition, EdgePartitionBuilder},
        state::{
            shard::{aggregate_shards, merge_shard_messages, MessageMap},
            AggregationContext,
        },
        utils::errors::PartitionError,
    };
    pub use graphshard_api::core::{
        entities::{Edge, EdgeTriplet, VertexId},
        Activeness, TripletFields,
    };
}
