use crate::storage::IdTables;
use graphshard_api::core::entities::{VertexId, LID};

/// Dense per-local-vertex message slots, `None` until a vertex receives its first message.
///
/// Owned by a single scan and consumed when the scan finishes.
#[derive(Debug)]
pub struct MessageAccumulator<A> {
    values: Vec<Option<A>>,
    touched: usize,
}

impl<A> MessageAccumulator<A> {
    pub fn new(num_local_vertices: usize) -> Self {
        let mut values = Vec::with_capacity(num_local_vertices);
        values.resize_with(num_local_vertices, || None);
        Self { values, touched: 0 }
    }

    /// Store `msg` in the slot of `lid`, merging with what is already there.
    #[inline]
    pub fn send(&mut self, lid: LID, msg: A, merge: &mut impl FnMut(A, A) -> A) {
        let slot = &mut self.values[lid.index()];
        *slot = Some(match slot.take() {
            Some(existing) => merge(existing, msg),
            None => {
                self.touched += 1;
                msg
            }
        });
    }

    pub fn get(&self, lid: LID) -> Option<&A> {
        self.values.get(lid.index()).and_then(Option::as_ref)
    }

    pub fn is_set(&self, lid: LID) -> bool {
        self.get(lid).is_some()
    }

    /// Number of vertices that received at least one message.
    pub fn num_touched(&self) -> usize {
        self.touched
    }

    /// `(global id, message)` for every touched vertex, in local id order.
    pub fn into_messages(self, ids: &IdTables) -> Vec<(VertexId, A)> {
        let mut messages = Vec::with_capacity(self.touched);
        messages.extend(
            self.values
                .into_iter()
                .enumerate()
                .filter_map(|(local, msg)| Some((ids.global(LID(local as u32)), msg?))),
        );
        messages
    }
}
