//! Views held aside during a cold layout.

use super::layout_state::ScrapEntry;
use crate::error::LayoutError;
use crate::host::LayoutContext;

/// Views detached at the start of a cold layout, still candidates for reuse.
///
/// Whatever is left at the end of the pass goes back to the recycler.
#[derive(Debug, Default)]
pub struct AttachedScrap {
    entries: Vec<ScrapEntry>,
}

impl AttachedScrap {
    /// Detaches every child of the container, keeping their layout params.
    ///
    /// Every child is resolved before the first detach, so an error leaves
    /// the container untouched.
    pub fn detach_all(ctx: &mut LayoutContext<'_>) -> Result<Self, LayoutError> {
        let child_count = ctx.child_count();
        let entries = (0..child_count)
            .map(|index| {
                let view = ctx.child_at(index)?;
                let state = ctx.view_state(view)?;
                Ok(ScrapEntry {
                    view,
                    position: state.position,
                    removed: state.removed,
                })
            })
            .collect::<Result<Vec<_>, LayoutError>>()?;

        for index in (0..child_count).rev() {
            ctx.container.detach_view_at(index);
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ScrapEntry] {
        &self.entries
    }

    /// Takes the held view bound to `position`. Views of removed items only
    /// match when `include_removed` is set (pre-layout).
    pub fn take_for_position(&mut self, position: usize, include_removed: bool) -> Option<ScrapEntry> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.position == position && (include_removed || !entry.removed))?;
        Some(self.entries.remove(index))
    }

    /// Takes every held view that can still be laid out as disappearing:
    /// not removed and bound to a position inside `[0, item_count)`.
    pub fn take_disappearing(&mut self, item_count: usize) -> Vec<ScrapEntry> {
        let (disappearing, kept): (Vec<_>, Vec<_>) = self
            .entries
            .drain(..)
            .partition(|entry| !entry.removed && entry.position < item_count);
        for entry in kept.iter().filter(|entry| entry.position >= item_count) {
            log::trace!(
                "skipping scrap {:?} bound to position {} outside 0..{}",
                entry.view,
                entry.position,
                item_count
            );
        }
        self.entries = kept;
        disappearing
    }

    /// Puts views back, e.g. the ones a disappearing fill did not use.
    pub fn restore(&mut self, entries: impl IntoIterator<Item = ScrapEntry>) {
        self.entries.extend(entries);
    }

    /// Removes every held view from the container and hands it to the
    /// recycler. Returns how many were recycled.
    pub fn recycle_all(self, ctx: &mut LayoutContext<'_>) -> usize {
        let count = self.entries.len();
        for entry in self.entries {
            ctx.container.remove_detached_view(entry.view);
            ctx.recycler.recycle_view(entry.view);
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::ViewHandle;

    fn scrap(entries: &[(u32, usize, bool)]) -> AttachedScrap {
        AttachedScrap {
            entries: entries
                .iter()
                .map(|&(view, position, removed)| ScrapEntry {
                    view: ViewHandle(view),
                    position,
                    removed,
                })
                .collect(),
        }
    }

    #[test]
    fn test_take_for_position_skips_removed() {
        let mut held = scrap(&[(1, 3, true), (2, 3, false), (3, 4, false)]);

        let taken = held.take_for_position(3, false);
        assert_eq!(taken.map(|e| e.view), Some(ViewHandle(2)));
        assert_eq!(held.take_for_position(3, false), None);
        assert_eq!(held.len(), 2);

        let taken = held.take_for_position(3, true);
        assert_eq!(taken.map(|e| e.view), Some(ViewHandle(1)));
    }

    #[test]
    fn test_take_disappearing_leaves_removed_and_out_of_range() {
        let mut held = scrap(&[(1, 0, false), (2, 1, true), (3, 9, false), (4, 5, false)]);

        let disappearing = held.take_disappearing(6);
        let views: Vec<_> = disappearing.iter().map(|e| e.view).collect();
        assert_eq!(views, vec![ViewHandle(1), ViewHandle(4)]);

        let left: Vec<_> = held.entries().iter().map(|e| e.view).collect();
        assert_eq!(left, vec![ViewHandle(2), ViewHandle(3)]);
    }
}
