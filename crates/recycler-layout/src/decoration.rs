//! Item decorations: extra space the container adds around items.
//!
//! Only the inset contract lives here. Drawing the decorations is up to the
//! host's renderer; the engine sees their effect through the decorated
//! measurements the container reports.

use std::fmt;
use std::rc::Rc;

use crate::geometry::Insets;
use crate::linear::Orientation;

/// Adds insets around an item. Queried by the container while measuring.
pub trait ItemDecoration {
    fn item_offsets(&self, position: usize, item_count: usize, orientation: Orientation) -> Insets;
}

/// Decides whether the divider after `position` is shown.
pub type ShowDividerController = Rc<dyn Fn(usize, usize) -> bool>;

/// Controller that hides the divider after the last item.
pub fn ignore_last_divider() -> ShowDividerController {
    Rc::new(|position, item_count| position + 1 != item_count)
}

/// A divider of fixed thickness after each item along the layout axis.
#[derive(Clone)]
pub struct DividerItemDecoration {
    /// Divider thickness in pixels.
    pub size: i32,
    /// Cross-axis margin before the divider (drawing only).
    pub margin_start: i32,
    /// Cross-axis margin after the divider (drawing only).
    pub margin_end: i32,
    show_divider: ShowDividerController,
}

impl fmt::Debug for DividerItemDecoration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DividerItemDecoration")
            .field("size", &self.size)
            .field("margin_start", &self.margin_start)
            .field("margin_end", &self.margin_end)
            .finish_non_exhaustive()
    }
}

impl Default for DividerItemDecoration {
    fn default() -> Self {
        Self {
            size: 2,
            margin_start: 0,
            margin_end: 0,
            show_divider: Rc::new(|_, _| true),
        }
    }
}

impl DividerItemDecoration {
    pub fn new(size: i32) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    pub fn size(mut self, size: i32) -> Self {
        self.size = size;
        self
    }

    pub fn margin_start(mut self, margin: i32) -> Self {
        self.margin_start = margin;
        self
    }

    pub fn margin_end(mut self, margin: i32) -> Self {
        self.margin_end = margin;
        self
    }

    pub fn show_divider_controller(mut self, controller: ShowDividerController) -> Self {
        self.show_divider = controller;
        self
    }

    /// Whether the divider after `position` is drawn and takes space.
    pub fn shows_divider(&self, position: usize, item_count: usize) -> bool {
        (self.show_divider)(position, item_count)
    }
}

impl ItemDecoration for DividerItemDecoration {
    fn item_offsets(&self, position: usize, item_count: usize, orientation: Orientation) -> Insets {
        if !self.shows_divider(position, item_count) {
            return Insets::ZERO;
        }
        match orientation {
            Orientation::Vertical => Insets::new(0, 0, 0, self.size),
            Orientation::Horizontal => Insets::new(0, 0, self.size, 0),
        }
    }
}
