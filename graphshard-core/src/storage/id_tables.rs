use graphshard_api::core::entities::{VertexId, LID};
use indexmap::IndexMap;
use itertools::Itertools;
use rustc_hash::{FxBuildHasher, FxHashMap};

/// Clustered index: global source id -> offset of the first edge in that source's run.
///
/// Entries are kept in insertion order, which is the stored edge order, so iterating the index
/// visits the clusters front to back.
pub type ClusterIndex = IndexMap<VertexId, usize, FxBuildHasher>;

/// Compaction tables translating between global vertex ids and dense local ids.
///
/// Local ids are handed out in ascending global id order, the mapping is therefore monotone and
/// sorting edges by local ids gives the same order as sorting them by global ids.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct IdTables {
    global2local: FxHashMap<VertexId, LID>,
    local2global: Vec<VertexId>,
}

impl IdTables {
    /// Build tables for the distinct ids in `ids`, order and duplicates in the input do not matter.
    pub fn from_ids(ids: impl IntoIterator<Item = VertexId>) -> Self {
        let local2global: Vec<VertexId> = ids.into_iter().sorted_unstable().dedup().collect();
        let global2local = local2global
            .iter()
            .enumerate()
            .map(|(local, &global)| (global, LID(local as u32)))
            .collect();
        Self {
            global2local,
            local2global,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.local2global.len()
    }

    pub fn is_empty(&self) -> bool {
        self.local2global.is_empty()
    }

    #[inline]
    pub fn local(&self, vid: VertexId) -> Option<LID> {
        self.global2local.get(&vid).copied()
    }

    #[inline]
    pub fn global(&self, lid: LID) -> VertexId {
        self.local2global[lid.index()]
    }

    pub fn local2global(&self) -> &[VertexId] {
        &self.local2global
    }

    pub fn global2local(&self) -> &FxHashMap<VertexId, LID> {
        &self.global2local
    }

    /// `(global, local)` pairs in local id order
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, LID)> + '_ {
        self.local2global
            .iter()
            .enumerate()
            .map(|(local, &global)| (global, LID(local as u32)))
    }
}
