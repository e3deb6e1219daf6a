//! Capabilities the host provides to a layout algorithm.
//!
//! A layout pass receives a [`LayoutContext`] bundling the container, the
//! recycler and the pass state. Nothing here is retained between passes.

use crate::error::LayoutError;
use crate::geometry::{Insets, Rect, Size};
use crate::view::{ViewHandle, ViewState};

/// Container geometry plus the attach/detach/measure/position primitives.
///
/// Children are ordered from the start edge to the end edge of the layout
/// axis; index 0 is the child closest to the start.
pub trait LayoutContainer {
    /// Container width in pixels, padding included.
    fn width(&self) -> i32;

    /// Container height in pixels, padding included.
    fn height(&self) -> i32;

    fn padding(&self) -> Insets;

    fn child_count(&self) -> usize;

    fn child_at(&self, index: usize) -> Option<ViewHandle>;

    /// Layout params of a view. `None` means the view is unknown to the container.
    fn view_state(&self, view: ViewHandle) -> Option<ViewState>;

    /// Attaches `view` at `index`, or after the last child when `index` is `None`.
    ///
    /// `view` is either freshly obtained from the recycler or detached scrap
    /// of the current pass.
    fn add_view(&mut self, view: ViewHandle, index: Option<usize>);

    /// Like [`add_view`](Self::add_view), for a view that is about to
    /// disappear and is only laid out so it can be animated away.
    fn add_disappearing_view(&mut self, view: ViewHandle, index: Option<usize>);

    /// Detaches the child at `index` without discarding its measurement.
    fn detach_view_at(&mut self, index: usize) -> Option<ViewHandle>;

    /// Removes the child at `index` from the container.
    fn remove_view_at(&mut self, index: usize) -> Option<ViewHandle>;

    /// Finishes removal of a view previously detached with
    /// [`detach_view_at`](Self::detach_view_at).
    fn remove_detached_view(&mut self, view: ViewHandle);

    /// Measures `view` against the container size minus padding, the used
    /// space, decoration insets and the view's margins.
    fn measure_child_with_margins(&mut self, view: ViewHandle, width_used: i32, height_used: i32);

    /// Measured size including decoration insets and margins.
    fn decorated_measured_size(&self, view: ViewHandle) -> Option<Size>;

    /// Current box including decoration insets and margins.
    fn decorated_bounds_with_margins(&self, view: ViewHandle) -> Option<Rect>;

    /// Decorated box with any pending animation translation applied.
    fn transformed_bounds_with_margins(&self, view: ViewHandle) -> Option<Rect>;

    /// Positions `view` so that its decorated, margin-inclusive box is `bounds`.
    fn layout_decorated_with_margins(&mut self, view: ViewHandle, bounds: Rect);

    fn offset_children_vertical(&mut self, dy: i32);

    fn offset_children_horizontal(&mut self, dx: i32);
}

/// Host-side source of bound views and sink of retired ones.
pub trait Recycler {
    /// Returns a view bound to `position`: reused from a pool or newly created.
    fn view_for_position(&mut self, position: usize) -> ViewHandle;

    /// Takes back a view that is no longer attached. The engine drops the
    /// handle right after this call.
    fn recycle_view(&mut self, view: ViewHandle);
}

/// Data-set facts for the current pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayoutPassState {
    /// Number of items in the data set, queried live for this pass.
    pub item_count: usize,

    /// Whether this is the pre-layout of a predictive animation run.
    pub is_pre_layout: bool,
}

impl LayoutPassState {
    pub fn new(item_count: usize) -> Self {
        Self {
            item_count,
            is_pre_layout: false,
        }
    }

    pub fn pre_layout(item_count: usize) -> Self {
        Self {
            item_count,
            is_pre_layout: true,
        }
    }
}

/// Capabilities handed to a layout algorithm for one pass.
pub struct LayoutContext<'a> {
    pub container: &'a mut dyn LayoutContainer,
    pub recycler: &'a mut dyn Recycler,
    pub state: LayoutPassState,
}

impl<'a> LayoutContext<'a> {
    pub fn new(
        container: &'a mut dyn LayoutContainer,
        recycler: &'a mut dyn Recycler,
        state: LayoutPassState,
    ) -> Self {
        Self {
            container,
            recycler,
            state,
        }
    }

    pub fn item_count(&self) -> usize {
        self.state.item_count
    }

    /// Read-only view of the container.
    pub fn container(&self) -> &dyn LayoutContainer {
        &*self.container
    }

    pub fn child_count(&self) -> usize {
        self.container.child_count()
    }

    /// Child at `index`, treating a missing child below `child_count` as a
    /// contract violation.
    pub fn child_at(&self, index: usize) -> Result<ViewHandle, LayoutError> {
        self.container
            .child_at(index)
            .ok_or(LayoutError::ChildOutOfBounds {
                index,
                child_count: self.container.child_count(),
            })
    }

    pub fn view_state(&self, view: ViewHandle) -> Result<ViewState, LayoutError> {
        self.container
            .view_state(view)
            .ok_or(LayoutError::MissingLayoutParams { view })
    }

    /// Logical position of an attached view.
    pub fn position_of(&self, view: ViewHandle) -> Result<usize, LayoutError> {
        self.view_state(view).map(|state| state.position)
    }

    /// Removes the child at `index` and hands it back to the recycler.
    pub fn remove_and_recycle_view_at(&mut self, index: usize) -> Result<ViewHandle, LayoutError> {
        let view = self
            .container
            .remove_view_at(index)
            .ok_or(LayoutError::ChildOutOfBounds {
                index,
                child_count: self.container.child_count(),
            })?;
        self.recycler.recycle_view(view);
        Ok(view)
    }
}

impl std::fmt::Debug for LayoutContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutContext")
            .field("child_count", &self.container.child_count())
            .field("state", &self.state)
            .finish()
    }
}

/// A layout algorithm driven by the host.
///
/// Calls run to completion on the caller's thread. A returned error means the
/// pass was abandoned; the host retries with a fresh
/// [`on_layout_children`](Self::on_layout_children).
pub trait LayoutAlgorithm {
    /// Lays out children from scratch.
    fn on_layout_children(&mut self, ctx: &mut LayoutContext<'_>) -> Result<(), LayoutError>;

    /// Scrolls by `dy` pixels (positive toward the bottom) and returns the
    /// amount actually consumed.
    fn scroll_vertically_by(
        &mut self,
        dy: i32,
        ctx: &mut LayoutContext<'_>,
    ) -> Result<i32, LayoutError>;

    /// Scrolls by `dx` pixels (positive toward the right) and returns the
    /// amount actually consumed.
    fn scroll_horizontally_by(
        &mut self,
        dx: i32,
        ctx: &mut LayoutContext<'_>,
    ) -> Result<i32, LayoutError>;

    fn can_scroll_vertically(&self) -> bool;

    fn can_scroll_horizontally(&self) -> bool;

    fn supports_predictive_item_animations(&self) -> bool {
        false
    }
}
