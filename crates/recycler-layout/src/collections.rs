//! Hash collections used across the crate.
//!
//! Keys are small integers (positions, view types), so the Fx hasher is the
//! default. The `std-hash` feature switches back to SipHash.

#[cfg(not(feature = "std-hash"))]
pub mod map {
    pub use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
}

#[cfg(feature = "std-hash")]
pub mod map {
    pub use std::collections::{HashMap, HashSet};
}
