//! Per-scan message state: the dense accumulator, the context handed to `send_msg`, and the
//! helpers combining the results of several partitions.

pub mod accumulator;
pub mod agg_context;
pub mod shard;

pub use accumulator::MessageAccumulator;
pub use agg_context::AggregationContext;
