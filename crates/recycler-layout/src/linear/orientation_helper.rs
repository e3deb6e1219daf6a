//! Axis abstraction over decorated item geometry.
//!
//! Every query reads the container's current geometry; a view the container
//! has no bounds for reads as 0.

use crate::geometry::Rect;
use crate::host::LayoutContainer;
use crate::view::ViewHandle;

/// Axis items are laid out along.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

/// Reads and moves item geometry along one axis.
///
/// "Start" is the top (vertical) or left (horizontal) edge; "end" is the
/// bottom or right edge.
#[derive(Clone, Debug)]
pub struct OrientationHelper {
    orientation: Orientation,
    /// Total space recorded by the last completed layout.
    last_total_space: Option<i32>,
}

impl OrientationHelper {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            last_total_space: None,
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    fn start_of(&self, rect: Rect) -> i32 {
        match self.orientation {
            Orientation::Vertical => rect.top,
            Orientation::Horizontal => rect.left,
        }
    }

    fn end_of(&self, rect: Rect) -> i32 {
        match self.orientation {
            Orientation::Vertical => rect.bottom,
            Orientation::Horizontal => rect.right,
        }
    }

    /// Leading edge of the view's decorated, margin-inclusive box.
    pub fn decorated_start(&self, container: &dyn LayoutContainer, view: ViewHandle) -> i32 {
        container
            .decorated_bounds_with_margins(view)
            .map_or(0, |rect| self.start_of(rect))
    }

    /// Trailing edge of the view's decorated, margin-inclusive box.
    pub fn decorated_end(&self, container: &dyn LayoutContainer, view: ViewHandle) -> i32 {
        container
            .decorated_bounds_with_margins(view)
            .map_or(0, |rect| self.end_of(rect))
    }

    /// Leading edge including pending animation translation.
    pub fn transformed_start_with_decoration(
        &self,
        container: &dyn LayoutContainer,
        view: ViewHandle,
    ) -> i32 {
        container
            .transformed_bounds_with_margins(view)
            .map_or(0, |rect| self.start_of(rect))
    }

    /// Trailing edge including pending animation translation.
    pub fn transformed_end_with_decoration(
        &self,
        container: &dyn LayoutContainer,
        view: ViewHandle,
    ) -> i32 {
        container
            .transformed_bounds_with_margins(view)
            .map_or(0, |rect| self.end_of(rect))
    }

    /// Decorated extent of the view along the layout axis.
    pub fn decorated_measurement(&self, container: &dyn LayoutContainer, view: ViewHandle) -> i32 {
        container
            .decorated_measured_size(view)
            .map_or(0, |size| match self.orientation {
                Orientation::Vertical => size.height,
                Orientation::Horizontal => size.width,
            })
    }

    /// Decorated extent of the view along the cross axis.
    pub fn decorated_measurement_in_other(
        &self,
        container: &dyn LayoutContainer,
        view: ViewHandle,
    ) -> i32 {
        container
            .decorated_measured_size(view)
            .map_or(0, |size| match self.orientation {
                Orientation::Vertical => size.width,
                Orientation::Horizontal => size.height,
            })
    }

    pub fn start_after_padding(&self, container: &dyn LayoutContainer) -> i32 {
        let padding = container.padding();
        match self.orientation {
            Orientation::Vertical => padding.top,
            Orientation::Horizontal => padding.left,
        }
    }

    pub fn end_after_padding(&self, container: &dyn LayoutContainer) -> i32 {
        self.end(container) - self.end_padding(container)
    }

    /// Container extent along the layout axis, padding included.
    pub fn end(&self, container: &dyn LayoutContainer) -> i32 {
        match self.orientation {
            Orientation::Vertical => container.height(),
            Orientation::Horizontal => container.width(),
        }
    }

    pub fn end_padding(&self, container: &dyn LayoutContainer) -> i32 {
        let padding = container.padding();
        match self.orientation {
            Orientation::Vertical => padding.bottom,
            Orientation::Horizontal => padding.right,
        }
    }

    /// Space available to items between the paddings.
    pub fn total_space(&self, container: &dyn LayoutContainer) -> i32 {
        self.end_after_padding(container) - self.start_after_padding(container)
    }

    /// How much [`total_space`](Self::total_space) changed since the last
    /// completed layout. 0 before the first one.
    pub fn total_space_change(&self, container: &dyn LayoutContainer) -> i32 {
        self.last_total_space
            .map_or(0, |last| self.total_space(container) - last)
    }

    /// Records the current total space as the baseline for
    /// [`total_space_change`](Self::total_space_change).
    pub fn on_layout_complete(&mut self, container: &dyn LayoutContainer) {
        self.last_total_space = Some(self.total_space(container));
    }

    /// Translates every child by `amount` along the layout axis.
    pub fn offset_children(&self, container: &mut dyn LayoutContainer, amount: i32) {
        match self.orientation {
            Orientation::Vertical => container.offset_children_vertical(amount),
            Orientation::Horizontal => container.offset_children_horizontal(amount),
        }
    }
}
