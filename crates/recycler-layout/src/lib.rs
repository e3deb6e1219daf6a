//! Virtualized list layout with view recycling.
//!
//! This crate decides which logical items of a scrollable list are visible,
//! where they sit along the layout axis, and which realized views get reused
//! as items scroll in and out of the viewport.
//!
//! # Architecture
//!
//! The engine never owns views. It talks to the host through a small set of
//! capabilities bundled in a [`LayoutContext`]:
//! - [`LayoutContainer`] - attach/detach/measure/position primitives and
//!   padding/edge geometry
//! - [`Recycler`] - obtains a bound view for a position and takes retired views back
//! - [`LayoutPassState`] - item count and pass kind for the current pass
//!
//! [`LinearLayoutManager`] implements [`LayoutAlgorithm`] on top of these:
//! cold layouts resolve an anchor and fill outward from it, scrolls fill the
//! leading edge while evicting views that left the trailing edge.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut manager = LinearLayoutManager::new(LinearLayoutConfig::default());
//! manager.on_layout_children(&mut host.context())?;
//! let consumed = manager.scroll_vertically_by(120, &mut host.context())?;
//! ```

pub mod adapter;
pub mod collections;
pub mod decoration;
pub mod error;
pub mod geometry;
pub mod host;
pub mod linear;
pub mod pool;
pub mod view;

pub use adapter::Adapter;
pub use decoration::{DividerItemDecoration, ItemDecoration};
pub use error::LayoutError;
pub use geometry::{Insets, Rect, Size};
pub use host::{LayoutAlgorithm, LayoutContainer, LayoutContext, LayoutPassState, Recycler};
pub use linear::*;
pub use pool::{RecycledViewPool, DEFAULT_MAX_SCRAP};
pub use view::{ViewHandle, ViewState, ViewType};
