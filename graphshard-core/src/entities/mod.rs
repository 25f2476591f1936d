pub mod partition;

pub use graphshard_api::core::entities::{Edge, EdgeTriplet, VertexId, LID};
