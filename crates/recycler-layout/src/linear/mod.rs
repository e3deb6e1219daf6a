//! Linear (single-axis) list layout.
//!
//! # Architecture
//!
//! - [`OrientationHelper`] - axis-generic view of decorated item geometry
//! - [`LayoutState`] - one fill operation in progress
//! - [`AnchorInfo`] - the item that stays put across a cold layout
//! - [`AttachedScrap`] - views detached at the start of a cold layout
//! - [`PrefetchScheduler`] - positions worth realizing ahead of a scroll
//! - [`LinearLayoutManager`] - the [`LayoutAlgorithm`](crate::LayoutAlgorithm)
//!   tying them together

mod anchor_info;
mod config;
mod layout_state;
mod linear_layout_manager;
mod orientation_helper;
mod prefetch;
mod scrap;

pub use anchor_info::*;
pub use config::*;
pub use layout_state::*;
pub use linear_layout_manager::*;
pub use orientation_helper::*;
pub use prefetch::*;
pub use scrap::*;
