use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

pub mod entities;
pub mod utils;

/// Restricts which edges take part in a message-aggregation scan, based on whether their
/// endpoints are members of the partition's active set.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Debug, Default, Serialize, Deserialize)]
pub enum Activeness {
    /// Every edge is scanned, the active set is not consulted.
    #[default]
    Neither,
    /// Only edges whose source is active.
    SrcOnly,
    /// Only edges whose destination is active.
    DstOnly,
    /// Only edges where both endpoints are active.
    Both,
    /// Only edges where at least one endpoint is active.
    Either,
}

impl Activeness {
    /// true if the scan needs an active set to evaluate this activeness
    #[inline]
    pub fn requires_active_set(&self) -> bool {
        !matches!(self, Activeness::Neither)
    }

    /// Per-edge predicate given the activeness of both endpoints.
    #[inline]
    pub fn admits(&self, src_active: bool, dst_active: bool) -> bool {
        self.admits_with(|| src_active, || dst_active)
    }

    /// Like [`Activeness::admits`], asking for an endpoint's activeness only when it decides
    /// the outcome.
    #[inline]
    pub fn admits_with(
        &self,
        src_active: impl FnOnce() -> bool,
        dst_active: impl FnOnce() -> bool,
    ) -> bool {
        match self {
            Activeness::Neither => true,
            Activeness::SrcOnly => src_active(),
            Activeness::DstOnly => dst_active(),
            Activeness::Both => src_active() && dst_active(),
            Activeness::Either => src_active() || dst_active(),
        }
    }
}

impl Display for Activeness {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Activeness::Neither => "Neither",
            Activeness::SrcOnly => "SrcOnly",
            Activeness::DstOnly => "DstOnly",
            Activeness::Both => "Both",
            Activeness::Either => "Either",
        };
        write!(f, "{}", name)
    }
}

/// Which parts of a triplet a `send_msg` callback is going to read.
///
/// Vertex attributes that are not requested are never looked up during a scan and show up as
/// `None` in the aggregation context.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct TripletFields {
    pub use_src: bool,
    pub use_dst: bool,
    pub use_edge: bool,
}

impl TripletFields {
    pub const NONE: TripletFields = TripletFields::new(false, false, false);
    pub const EDGE_ONLY: TripletFields = TripletFields::new(false, false, true);
    pub const SRC: TripletFields = TripletFields::new(true, false, true);
    pub const DST: TripletFields = TripletFields::new(false, true, true);
    pub const ALL: TripletFields = TripletFields::new(true, true, true);

    pub const fn new(use_src: bool, use_dst: bool, use_edge: bool) -> Self {
        Self {
            use_src,
            use_dst,
            use_edge,
        }
    }
}

impl Default for TripletFields {
    fn default() -> Self {
        TripletFields::ALL
    }
}
