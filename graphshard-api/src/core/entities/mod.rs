use serde::{Deserialize, Serialize};

pub mod edges;

/// Global vertex identifier, unique across the whole graph and assigned before partitioning.
pub type VertexId = u64;

/// Dense, partition-local vertex identifier.
///
/// Local ids index straight into the per-partition vertex tables, so they are only meaningful
/// together with the partition (or the shared id tables) that produced them.
#[repr(transparent)]
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize, Default,
)]
pub struct LID(pub u32);

impl LID {
    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl From<u32> for LID {
    fn from(id: u32) -> Self {
        LID(id)
    }
}

impl From<LID> for usize {
    fn from(id: LID) -> Self {
        id.index()
    }
}

impl TryFrom<usize> for LID {
    type Error = std::num::TryFromIntError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Ok(LID(u32::try_from(value)?))
    }
}

pub use edges::{edge::Edge, triplet::EdgeTriplet};
