//! # graphshard-api
//!
//! Shared vocabulary for `graphshard`: global and local vertex identifiers, the edge and
//! triplet values handed to user callbacks, and the knobs (`Activeness`, `TripletFields`)
//! that steer a message-aggregation scan over one edge partition.
//!
//! The partition itself lives in `graphshard-core`.

pub mod core;
