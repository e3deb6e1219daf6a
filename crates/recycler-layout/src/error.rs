//! Contract violations reported by the layout engine.

use thiserror::Error;

use crate::view::ViewHandle;

/// Host misuse detected during a layout or scroll pass.
///
/// These are never recovered internally: the pass is abandoned as soon as one
/// is hit, and the next host-triggered layout is the retry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The container has no layout parameters (state) for a view it handed out.
    #[error("view {view:?} has no layout params; was it attached to this container?")]
    MissingLayoutParams { view: ViewHandle },

    /// The container reported a child count but could not resolve an index below it.
    #[error("child index {index} out of bounds for {child_count} attached children")]
    ChildOutOfBounds { index: usize, child_count: usize },
}
