use graphshard_api::core::{entities::VertexId, Activeness};

#[derive(thiserror::Error, Debug)]
pub enum PartitionError {
    #[error("Expected {expected} edge values for this partition but got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("No active set configured for this partition")]
    NoActiveSet,
    #[error("Activeness {0} requires an active set but none is configured")]
    ActiveSetRequired(Activeness),
    #[error("Vertex {0} is not referenced by this partition")]
    UnknownVertex(VertexId),
    #[error("Failed to load config: {source}")]
    Config {
        #[from]
        source: config::ConfigError,
    },
    #[error("Failed to serialise config: {source}")]
    Serialise {
        #[from]
        source: serde_json::Error,
    },
}

impl PartitionError {
    pub(crate) fn check_len(expected: usize, actual: usize) -> Result<(), PartitionError> {
        if expected == actual {
            Ok(())
        } else {
            Err(PartitionError::LengthMismatch { expected, actual })
        }
    }
}
