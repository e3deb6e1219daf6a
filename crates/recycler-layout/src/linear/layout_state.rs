//! State of a single fill operation.

use smallvec::SmallVec;

use crate::view::ViewHandle;

/// Marker for "no next position" in [`LayoutState::current_position`].
pub const NO_POSITION: isize = -1;

/// Direction a fill walks in, relative to the layout axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LayoutDirection {
    ToStart,
    #[default]
    ToEnd,
}

impl LayoutDirection {
    /// Step applied to the logical position per realized item.
    pub fn item_direction(self) -> isize {
        match self {
            Self::ToStart => -1,
            Self::ToEnd => 1,
        }
    }

    /// Sign applied to pixel amounts moving in this direction.
    pub fn sign(self) -> i32 {
        match self {
            Self::ToStart => -1,
            Self::ToEnd => 1,
        }
    }
}

/// A view held outside the container during a pass, with the layout params it
/// had when it was detached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrapEntry {
    pub view: ViewHandle,
    pub position: usize,
    pub removed: bool,
}

/// Views a scrap-list fill may lay out. Usually a handful.
pub type ScrapList = SmallVec<[ScrapEntry; 8]>;

/// Bookkeeping for one fill: where the next view goes, which position it is
/// for, and how much space is left.
///
/// Constructed fresh for every fill and dropped afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutState {
    /// Pixel coordinate of the edge the next view is placed against.
    pub offset: i32,

    /// Pixels still to fill. May go negative once the last view overshoots.
    pub available: i32,

    /// Next logical position to realize in `layout_direction`.
    pub current_position: isize,

    pub layout_direction: LayoutDirection,

    /// Pixels already scrolled past the trailing edge, eligible for eviction.
    /// `None` disables eviction (cold layouts).
    pub scroll_offset: Option<i32>,

    /// When set, only these views are laid out (the predictive disappearing
    /// pass) and `current_position` hops between their positions.
    pub scrap_list: Option<ScrapList>,
}

impl LayoutState {
    /// Fill from `coordinate` toward the end edge, starting at `position`.
    pub fn fill_toward_end(position: isize, coordinate: i32, end_after_padding: i32) -> Self {
        Self {
            offset: coordinate,
            available: end_after_padding - coordinate,
            current_position: position,
            layout_direction: LayoutDirection::ToEnd,
            scroll_offset: None,
            scrap_list: None,
        }
    }

    /// Fill from `coordinate` toward the start edge, starting at `position`.
    pub fn fill_toward_start(position: isize, coordinate: i32, start_after_padding: i32) -> Self {
        Self {
            offset: coordinate,
            available: coordinate - start_after_padding,
            current_position: position,
            layout_direction: LayoutDirection::ToStart,
            scroll_offset: None,
            scrap_list: None,
        }
    }

    /// Fill for a scroll of `abs_delta` pixels.
    ///
    /// `scroll_offset` is how far the reference view's leading edge already
    /// sits beyond the viewport; that part of the scroll needs no new content.
    pub fn for_scroll(
        layout_direction: LayoutDirection,
        current_position: isize,
        offset: i32,
        scroll_offset: i32,
        abs_delta: i32,
    ) -> Self {
        let available = abs_delta.saturating_sub(scroll_offset);
        // never evict more than the scroll asks for
        let scroll_offset = if available < 0 {
            scroll_offset + available
        } else {
            scroll_offset
        };
        Self {
            offset,
            available,
            current_position,
            layout_direction,
            scroll_offset: Some(scroll_offset),
            scrap_list: None,
        }
    }

    /// Fill that lays out only `scrap_list`, beyond `offset`.
    pub fn for_scrap_list(
        layout_direction: LayoutDirection,
        position: usize,
        offset: i32,
        available: i32,
        scrap_list: impl IntoIterator<Item = ScrapEntry>,
    ) -> Self {
        let mut state = Self {
            offset,
            available,
            current_position: position as isize,
            layout_direction,
            scroll_offset: None,
            scrap_list: Some(scrap_list.into_iter().collect()),
        };
        state.assign_position_from_scrap_list();
        state
    }

    /// Whether `current_position` is inside `[0, item_count)`.
    pub fn has_more(&self, item_count: usize) -> bool {
        usize::try_from(self.current_position).is_ok_and(|position| position < item_count)
    }

    /// Moves `current_position` one item in `layout_direction`.
    pub fn advance(&mut self) {
        self.current_position += self.layout_direction.item_direction();
    }

    /// Takes the scrap-list view for `current_position`, if there is one, and
    /// moves `current_position` to the closest remaining one.
    pub fn next_view_from_scrap_list(&mut self) -> Option<ScrapEntry> {
        let current = self.current_position;
        let list = self.scrap_list.as_mut()?;
        let index = list
            .iter()
            .position(|entry| !entry.removed && entry.position as isize == current)?;
        let entry = list.remove(index);
        self.assign_position_from_scrap_list();
        Some(entry)
    }

    /// Points `current_position` at the closest scrap-list view that is not
    /// behind it, or [`NO_POSITION`] when there is none.
    pub fn assign_position_from_scrap_list(&mut self) {
        self.current_position = self
            .next_view_in_limited_list()
            .map_or(NO_POSITION, |entry| entry.position as isize);
    }

    /// Closest non-removed scrap-list view at or ahead of `current_position`.
    pub fn next_view_in_limited_list(&self) -> Option<&ScrapEntry> {
        let list = self.scrap_list.as_ref()?;
        let direction = self.layout_direction.item_direction();
        let mut closest = None;
        let mut closest_distance = isize::MAX;
        for entry in list.iter().filter(|entry| !entry.removed) {
            let distance = (entry.position as isize - self.current_position) * direction;
            if distance < 0 {
                continue; // already passed in this direction
            }
            if distance < closest_distance {
                closest = Some(entry);
                closest_distance = distance;
                if distance == 0 {
                    break;
                }
            }
        }
        closest
    }
}
