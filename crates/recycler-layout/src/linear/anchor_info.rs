//! Anchor resolution for cold layouts.
//!
//! The anchor is the item that keeps its pixel coordinate across a layout
//! from scratch, so structural changes do not jump the scroll position.

use super::orientation_helper::OrientationHelper;
use crate::error::LayoutError;
use crate::host::LayoutContainer;
use crate::view::ViewHandle;

/// Logical position and pixel coordinate a cold layout fills outward from.
///
/// Only meaningful within one pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnchorInfo {
    /// `None` while the anchor is invalid.
    pub position: Option<usize>,

    /// Coordinate of the anchor's start edge, or its end edge when
    /// `layout_from_end` is set.
    pub coordinate: i32,

    pub layout_from_end: bool,
}

impl AnchorInfo {
    pub fn is_valid(&self) -> bool {
        self.position.is_some()
    }

    pub fn reset(&mut self) {
        self.position = None;
        self.coordinate = 0;
        self.layout_from_end = false;
    }

    /// Anchors to `view` at `position`, keeping the edge the layout grows from.
    pub fn assign_from_view(
        &mut self,
        container: &dyn LayoutContainer,
        helper: &OrientationHelper,
        view: ViewHandle,
        position: usize,
    ) {
        self.coordinate = if self.layout_from_end {
            helper.decorated_end(container, view) + helper.total_space_change(container)
        } else {
            helper.decorated_start(container, view)
        };
        self.position = Some(position);
    }

    /// Anchors `position` to the padded edge the layout grows from.
    pub fn assign_to_padding_edge(
        &mut self,
        container: &dyn LayoutContainer,
        helper: &OrientationHelper,
        position: usize,
    ) {
        self.coordinate = if self.layout_from_end {
            helper.end_after_padding(container)
        } else {
            helper.start_after_padding(container)
        };
        self.position = Some(position);
    }
}

/// Finds the attached child best suited as an anchor, scanning from the start
/// edge (or the end edge when `from_end`).
///
/// Preference order: an in-range, not removed child that overlaps the padded
/// viewport (returned as soon as it is seen); else the first in-range child
/// outside the viewport; else the first in-range removed child.
pub fn find_reference_child(
    container: &dyn LayoutContainer,
    helper: &OrientationHelper,
    item_count: usize,
    from_end: bool,
) -> Result<Option<(ViewHandle, usize)>, LayoutError> {
    let child_count = container.child_count();
    let bounds_start = helper.start_after_padding(container);
    let bounds_end = helper.end_after_padding(container);

    let mut invalid_match = None;
    let mut out_of_bounds_match = None;
    for step in 0..child_count {
        let index = if from_end { child_count - 1 - step } else { step };
        let view = container
            .child_at(index)
            .ok_or(LayoutError::ChildOutOfBounds { index, child_count })?;
        let state = container
            .view_state(view)
            .ok_or(LayoutError::MissingLayoutParams { view })?;
        if state.position >= item_count {
            continue;
        }
        if state.removed {
            // removed item, least preferred
            invalid_match.get_or_insert((view, state.position));
        } else if helper.decorated_start(container, view) >= bounds_end
            || helper.decorated_end(container, view) < bounds_start
        {
            // not visible, less preferred
            out_of_bounds_match.get_or_insert((view, state.position));
        } else {
            return Ok(Some((view, state.position)));
        }
    }
    Ok(out_of_bounds_match.or(invalid_match))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_invalidates() {
        let mut anchor = AnchorInfo {
            position: Some(4),
            coordinate: 120,
            layout_from_end: true,
        };
        assert!(anchor.is_valid());

        anchor.reset();
        assert!(!anchor.is_valid());
        assert_eq!(anchor, AnchorInfo::default());
    }
}
