//! Log targets, so that `RUST_LOG` can single out one part of the search.

pub const SEARCH: &str = "search";
pub const SCHEDULE: &str = "schedule";
pub const STORE: &str = "store";
pub const PROOF: &str = "proof";
