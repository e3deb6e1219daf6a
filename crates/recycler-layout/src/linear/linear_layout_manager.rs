//! The linear layout engine.
//!
//! # Passes
//!
//! - **Cold layout** ([`on_layout_children`](LayoutAlgorithm::on_layout_children)):
//!   resolve an anchor from the attached children, detach everything into the
//!   held scrap, fill away from the anchor in both directions, close gaps
//!   left at the data edges, lay out disappearing views for predictive
//!   animations and recycle whatever is still held.
//! - **Scroll** ([`scroll_by`](LinearLayoutManager::scroll_by)): extend the
//!   attached range in the scroll direction, evicting children that scrolled
//!   past the trailing edge, then translate every child by the consumed
//!   amount.
//!
//! Fill state lives in a [`LayoutState`] built for one fill and dropped
//! afterwards. The only state kept between passes is the pending scroll
//! position, the last scroll delta, the position index of attached views,
//! the prefetch queue and statistics.

use super::anchor_info::{find_reference_child, AnchorInfo};
use super::config::LinearLayoutConfig;
use super::layout_state::{LayoutDirection, LayoutState, ScrapList};
use super::orientation_helper::{Orientation, OrientationHelper};
use super::prefetch::PrefetchScheduler;
use super::scrap::AttachedScrap;
use crate::collections::map::HashMap;
use crate::error::LayoutError;
use crate::geometry::Rect;
use crate::host::{LayoutAlgorithm, LayoutContainer, LayoutContext};
use crate::view::ViewHandle;

/// Counters kept by [`LinearLayoutManager`].
///
/// `obtained` and `recycled` are cumulative; as long as the host does not
/// remove children behind the engine's back, `obtained - recycled == attached`
/// at every pass boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayoutStats {
    /// Children attached at the end of the last pass.
    pub attached: usize,

    /// Views requested from the recycler.
    pub obtained: usize,

    /// Views re-attached from the held scrap instead of being requested.
    pub reused_from_scrap: usize,

    /// Views handed back to the recycler.
    pub recycled: usize,
}

/// Outcome of placing one view.
#[derive(Clone, Copy, Debug)]
struct LayoutChunkResult {
    consumed: i32,
    ignore_consumed: bool,
}

/// Lays out children in a single row or column and recycles the ones that
/// leave the viewport.
///
/// ```
/// use recycler_layout::{LayoutAlgorithm, LinearLayoutConfig, LinearLayoutManager};
///
/// let manager = LinearLayoutManager::new(LinearLayoutConfig::vertical());
/// assert!(manager.can_scroll_vertically());
/// assert!(!manager.can_scroll_horizontally());
/// ```
#[derive(Debug)]
pub struct LinearLayoutManager {
    config: LinearLayoutConfig,
    orientation_helper: OrientationHelper,
    pending_scroll_position: Option<usize>,
    last_scroll_delta: i32,
    attached_positions: HashMap<usize, ViewHandle>,
    prefetch_scheduler: PrefetchScheduler,
    stats: LayoutStats,
}

impl Default for LinearLayoutManager {
    fn default() -> Self {
        Self::new(LinearLayoutConfig::default())
    }
}

impl LinearLayoutManager {
    pub fn new(config: LinearLayoutConfig) -> Self {
        Self {
            orientation_helper: OrientationHelper::new(config.orientation),
            config,
            pending_scroll_position: None,
            last_scroll_delta: 0,
            attached_positions: HashMap::default(),
            prefetch_scheduler: PrefetchScheduler::new(),
            stats: LayoutStats::default(),
        }
    }

    pub fn config(&self) -> &LinearLayoutConfig {
        &self.config
    }

    pub fn orientation(&self) -> Orientation {
        self.config.orientation
    }

    pub fn stats(&self) -> LayoutStats {
        self.stats
    }

    /// Signed amount consumed by the last scroll that moved the children.
    pub fn last_scroll_delta(&self) -> i32 {
        self.last_scroll_delta
    }

    /// Pins `position` to the leading padded edge on the next cold layout.
    ///
    /// Clamped to the data set at layout time. Scrolls to the end padded edge
    /// instead when stacking from the end.
    pub fn scroll_to_position(&mut self, position: usize) {
        self.pending_scroll_position = Some(position);
    }

    /// Attached view bound to `position` as of the last pass.
    pub fn find_view_by_position(&self, position: usize) -> Option<ViewHandle> {
        self.attached_positions.get(&position).copied()
    }

    /// Position of the first attached child that intersects the padded
    /// viewport.
    pub fn find_first_visible_item_position(
        &self,
        container: &dyn LayoutContainer,
    ) -> Result<Option<usize>, LayoutError> {
        self.find_visible_item_position(container, false)
    }

    /// Position of the last attached child that intersects the padded
    /// viewport.
    pub fn find_last_visible_item_position(
        &self,
        container: &dyn LayoutContainer,
    ) -> Result<Option<usize>, LayoutError> {
        self.find_visible_item_position(container, true)
    }

    /// Drains the positions queued for prefetch by the last scroll, nearest
    /// first.
    pub fn take_prefetch_positions(&mut self) -> Vec<usize> {
        self.prefetch_scheduler.drain()
    }

    /// The anchor the next cold layout would fill from.
    pub fn resolve_anchor(
        &self,
        container: &dyn LayoutContainer,
        item_count: usize,
    ) -> Result<AnchorInfo, LayoutError> {
        let helper = &self.orientation_helper;
        let mut anchor = AnchorInfo {
            layout_from_end: self.config.stack_from_end,
            ..AnchorInfo::default()
        };

        if let Some(position) = self.pending_scroll_position {
            if item_count > 0 {
                anchor.assign_to_padding_edge(container, helper, position.min(item_count - 1));
                return Ok(anchor);
            }
        }

        match find_reference_child(container, helper, item_count, anchor.layout_from_end)? {
            Some((view, position)) => anchor.assign_from_view(container, helper, view, position),
            None => {
                let position = if anchor.layout_from_end {
                    item_count.saturating_sub(1)
                } else {
                    0
                };
                anchor.assign_to_padding_edge(container, helper, position);
            }
        }
        Ok(anchor)
    }

    /// Scrolls along the layout axis by `delta` pixels (positive toward the
    /// end) and returns the amount consumed.
    pub fn scroll_by(&mut self, delta: i32, ctx: &mut LayoutContext<'_>) -> Result<i32, LayoutError> {
        if ctx.child_count() == 0 || delta == 0 {
            return Ok(0);
        }
        let scrolled = self.scroll_internal(delta, ctx, &mut AttachedScrap::default())?;
        self.last_scroll_delta = scrolled;
        self.record_attached(ctx)?;

        if scrolled != 0 && ctx.child_count() > 0 {
            let first = ctx.position_of(ctx.child_at(0)?)?;
            let last = ctx.position_of(ctx.child_at(ctx.child_count() - 1)?)?;
            let direction = if scrolled < 0 {
                LayoutDirection::ToStart
            } else {
                LayoutDirection::ToEnd
            };
            self.prefetch_scheduler.update(
                first,
                last,
                ctx.item_count(),
                direction,
                &self.config.prefetch,
            );
        }
        Ok(scrolled)
    }

    fn scroll_internal(
        &mut self,
        delta: i32,
        ctx: &mut LayoutContext<'_>,
        held: &mut AttachedScrap,
    ) -> Result<i32, LayoutError> {
        let child_count = ctx.child_count();
        if child_count == 0 || delta == 0 {
            return Ok(0);
        }

        let direction = if delta < 0 {
            LayoutDirection::ToStart
        } else {
            LayoutDirection::ToEnd
        };
        let abs_delta = delta.saturating_abs();
        let mut state = {
            let helper = &self.orientation_helper;
            let container = ctx.container();
            match direction {
                LayoutDirection::ToStart => {
                    let reference = ctx.child_at(0)?;
                    let position = ctx.position_of(reference)? as isize;
                    let start = helper.decorated_start(container, reference);
                    let scroll_offset = helper.start_after_padding(container) - start;
                    LayoutState::for_scroll(direction, position - 1, start, scroll_offset, abs_delta)
                }
                LayoutDirection::ToEnd => {
                    let reference = ctx.child_at(child_count - 1)?;
                    let position = ctx.position_of(reference)? as isize;
                    let end = helper.decorated_end(container, reference);
                    let scroll_offset = end - helper.end_after_padding(container);
                    LayoutState::for_scroll(direction, position + 1, end, scroll_offset, abs_delta)
                }
            }
        };

        let scroll_offset = state.scroll_offset.unwrap_or(0);
        let consumed = scroll_offset.saturating_add(self.fill(ctx, &mut state, held)?);
        if consumed < 0 {
            log::debug!("scroll of {delta} consumed {consumed}, ignoring");
            return Ok(0);
        }

        let scrolled = if abs_delta > consumed {
            consumed * direction.sign()
        } else {
            delta
        };
        self.orientation_helper
            .offset_children(&mut *ctx.container, -scrolled);
        log::trace!("scrolled {scrolled} of {delta}");
        Ok(scrolled)
    }

    /// Places views until `state.available` is used up or the data set ends
    /// in the fill direction, evicting behind a scroll as it goes.
    ///
    /// Returns the pixels consumed.
    fn fill(
        &mut self,
        ctx: &mut LayoutContext<'_>,
        state: &mut LayoutState,
        held: &mut AttachedScrap,
    ) -> Result<i32, LayoutError> {
        let start = state.available;
        if state.scroll_offset.is_some() {
            self.recycle_by_layout_state(ctx, state)?;
        }

        let item_count = ctx.item_count();
        while state.available > 0 && state.has_more(item_count) {
            let Some(chunk) = self.layout_chunk(ctx, state, held)? else {
                break;
            };
            state.offset += chunk.consumed * state.layout_direction.sign();

            // pre-layout only: removed or changed views leave their space to
            // the views replacing them
            if !chunk.ignore_consumed || state.scrap_list.is_some() || !ctx.state.is_pre_layout {
                state.available -= chunk.consumed;
            }

            if let Some(scroll_offset) = state.scroll_offset.as_mut() {
                *scroll_offset += chunk.consumed;
                if state.available < 0 {
                    *scroll_offset += state.available;
                }
                self.recycle_by_layout_state(ctx, state)?;
            }
        }
        Ok(start - state.available)
    }

    fn layout_chunk(
        &mut self,
        ctx: &mut LayoutContext<'_>,
        state: &mut LayoutState,
        held: &mut AttachedScrap,
    ) -> Result<Option<LayoutChunkResult>, LayoutError> {
        let disappearing = state.scrap_list.is_some();
        let view = if disappearing {
            match state.next_view_from_scrap_list() {
                Some(entry) => {
                    self.stats.reused_from_scrap += 1;
                    entry.view
                }
                None => return Ok(None),
            }
        } else {
            match self.next_view(ctx, state, held) {
                Some(view) => view,
                None => return Ok(None),
            }
        };

        let index = match state.layout_direction {
            LayoutDirection::ToStart => Some(0),
            LayoutDirection::ToEnd => None,
        };
        if disappearing {
            ctx.container.add_disappearing_view(view, index);
        } else {
            ctx.container.add_view(view, index);
        }
        ctx.container.measure_child_with_margins(view, 0, 0);
        let view_state = ctx.view_state(view)?;

        let helper = &self.orientation_helper;
        let container = ctx.container();
        let consumed = helper.decorated_measurement(container, view);
        let other = helper.decorated_measurement_in_other(container, view);
        let padding = container.padding();
        let offset = state.offset;
        let (start, end) = match state.layout_direction {
            LayoutDirection::ToStart => (offset - consumed, offset),
            LayoutDirection::ToEnd => (offset, offset + consumed),
        };
        let bounds = match helper.orientation() {
            Orientation::Vertical => Rect::new(padding.left, start, padding.left + other, end),
            Orientation::Horizontal => Rect::new(start, padding.top, end, padding.top + other),
        };
        ctx.container.layout_decorated_with_margins(view, bounds);
        log::trace!(
            "placed {:?} for position {} at {}..{}{}",
            view,
            view_state.position,
            start,
            end,
            if disappearing { " (disappearing)" } else { "" }
        );

        Ok(Some(LayoutChunkResult {
            consumed,
            ignore_consumed: view_state.ignores_consumed_space(),
        }))
    }

    /// View for `state.current_position`, preferring the held scrap, and
    /// advances the position by one.
    fn next_view(
        &mut self,
        ctx: &mut LayoutContext<'_>,
        state: &mut LayoutState,
        held: &mut AttachedScrap,
    ) -> Option<ViewHandle> {
        let position = usize::try_from(state.current_position).ok()?;
        state.advance();
        if let Some(entry) = held.take_for_position(position, ctx.state.is_pre_layout) {
            self.stats.reused_from_scrap += 1;
            return Some(entry.view);
        }
        self.stats.obtained += 1;
        Some(ctx.recycler.view_for_position(position))
    }

    fn recycle_by_layout_state(
        &mut self,
        ctx: &mut LayoutContext<'_>,
        state: &LayoutState,
    ) -> Result<(), LayoutError> {
        let Some(scroll_offset) = state.scroll_offset else {
            return Ok(());
        };
        match state.layout_direction {
            LayoutDirection::ToStart => self.recycle_views_from_end(ctx, scroll_offset),
            LayoutDirection::ToEnd => self.recycle_views_from_start(ctx, scroll_offset),
        }
    }

    /// Recycles the children at the start whose trailing edges are at or
    /// before `offset`, both with and without pending translation.
    fn recycle_views_from_start(
        &mut self,
        ctx: &mut LayoutContext<'_>,
        offset: i32,
    ) -> Result<(), LayoutError> {
        let child_count = ctx.child_count();
        for index in 0..child_count {
            let child = ctx.child_at(index)?;
            let helper = &self.orientation_helper;
            let container = ctx.container();
            if helper.decorated_end(container, child) > offset
                || helper.transformed_end_with_decoration(container, child) > offset
            {
                return self.recycle_children(ctx, 0..index);
            }
        }
        Ok(())
    }

    /// Recycles the children at the end whose leading edges are at or beyond
    /// `end - offset`.
    fn recycle_views_from_end(
        &mut self,
        ctx: &mut LayoutContext<'_>,
        offset: i32,
    ) -> Result<(), LayoutError> {
        let child_count = ctx.child_count();
        let limit = self.orientation_helper.end(ctx.container()) - offset;
        for index in (0..child_count).rev() {
            let child = ctx.child_at(index)?;
            let helper = &self.orientation_helper;
            let container = ctx.container();
            if helper.decorated_start(container, child) < limit
                || helper.transformed_start_with_decoration(container, child) < limit
            {
                return self.recycle_children(ctx, index + 1..child_count);
            }
        }
        Ok(())
    }

    /// Removes and recycles the children in `indices`, highest index first.
    fn recycle_children(
        &mut self,
        ctx: &mut LayoutContext<'_>,
        indices: std::ops::Range<usize>,
    ) -> Result<(), LayoutError> {
        for index in indices.rev() {
            let view = ctx.remove_and_recycle_view_at(index)?;
            self.stats.recycled += 1;
            log::trace!("recycled {view:?} from index {index}");
        }
        Ok(())
    }

    /// Scrolls away gaps between the content and the padded edges, left when
    /// the data set ends inside the viewport.
    fn fix_layout_gaps(
        &mut self,
        ctx: &mut LayoutContext<'_>,
        held: &mut AttachedScrap,
    ) -> Result<(), LayoutError> {
        let item_count = ctx.item_count();

        let child_count = ctx.child_count();
        if child_count == 0 {
            return Ok(());
        }
        let last = ctx.child_at(child_count - 1)?;
        if ctx.position_of(last)? + 1 == item_count {
            let gap = self.orientation_helper.end_after_padding(ctx.container())
                - self.orientation_helper.decorated_end(ctx.container(), last);
            if gap > 0 {
                let fixed = self.scroll_internal(-gap, ctx, held)?;
                log::trace!("end gap {gap}, scrolled {fixed}");
            }
        }

        if ctx.child_count() == 0 {
            return Ok(());
        }
        let first = ctx.child_at(0)?;
        if ctx.position_of(first)? == 0 {
            let gap = self.orientation_helper.decorated_start(ctx.container(), first)
                - self.orientation_helper.start_after_padding(ctx.container());
            if gap > 0 {
                let fixed = self.scroll_internal(gap, ctx, held)?;
                log::trace!("start gap {gap}, scrolled {fixed}");
            }
        }
        Ok(())
    }

    /// Lays out held views that are not removed but fell outside the new
    /// layout beyond the nearest edge, attached as disappearing.
    fn layout_for_predictive_animations(
        &mut self,
        ctx: &mut LayoutContext<'_>,
        held: &mut AttachedScrap,
    ) -> Result<(), LayoutError> {
        if !self.config.predictive_animations
            || ctx.state.is_pre_layout
            || held.is_empty()
            || ctx.child_count() == 0
        {
            return Ok(());
        }

        let first = ctx.child_at(0)?;
        let first_position = ctx.position_of(first)?;
        let mut before = ScrapList::new();
        let mut after = ScrapList::new();
        let mut extent_before = 0;
        let mut extent_after = 0;
        for entry in held.take_disappearing(ctx.item_count()) {
            let extent = self
                .orientation_helper
                .decorated_measurement(ctx.container(), entry.view);
            if entry.position < first_position {
                extent_before += extent;
                before.push(entry);
            } else {
                extent_after += extent;
                after.push(entry);
            }
        }

        if !before.is_empty() {
            let offset = self.orientation_helper.decorated_start(ctx.container(), first);
            let mut state = LayoutState::for_scrap_list(
                LayoutDirection::ToStart,
                first_position,
                offset,
                extent_before,
                before,
            );
            self.fill(ctx, &mut state, held)?;
            held.restore(state.scrap_list.take().unwrap_or_default());
        }

        if !after.is_empty() {
            let last = ctx.child_at(ctx.child_count() - 1)?;
            let last_position = ctx.position_of(last)?;
            let offset = self.orientation_helper.decorated_end(ctx.container(), last);
            let mut state = LayoutState::for_scrap_list(
                LayoutDirection::ToEnd,
                last_position,
                offset,
                extent_after,
                after,
            );
            self.fill(ctx, &mut state, held)?;
            held.restore(state.scrap_list.take().unwrap_or_default());
        }
        Ok(())
    }

    fn find_visible_item_position(
        &self,
        container: &dyn LayoutContainer,
        from_end: bool,
    ) -> Result<Option<usize>, LayoutError> {
        let helper = &self.orientation_helper;
        let start = helper.start_after_padding(container);
        let end = helper.end_after_padding(container);
        let child_count = container.child_count();
        for step in 0..child_count {
            let index = if from_end { child_count - 1 - step } else { step };
            let view = container
                .child_at(index)
                .ok_or(LayoutError::ChildOutOfBounds { index, child_count })?;
            if helper.decorated_start(container, view) < end
                && helper.decorated_end(container, view) > start
            {
                let state = container
                    .view_state(view)
                    .ok_or(LayoutError::MissingLayoutParams { view })?;
                return Ok(Some(state.position));
            }
        }
        Ok(None)
    }

    /// Rebuilds the position index and the attached count from the container.
    fn record_attached(&mut self, ctx: &LayoutContext<'_>) -> Result<(), LayoutError> {
        self.attached_positions.clear();
        let child_count = ctx.child_count();
        for index in 0..child_count {
            let view = ctx.child_at(index)?;
            self.attached_positions.insert(ctx.position_of(view)?, view);
        }
        self.stats.attached = child_count;
        Ok(())
    }
}

impl LayoutAlgorithm for LinearLayoutManager {
    fn on_layout_children(&mut self, ctx: &mut LayoutContext<'_>) -> Result<(), LayoutError> {
        let item_count = ctx.item_count();
        let anchor = self.resolve_anchor(ctx.container(), item_count)?;
        let mut held = AttachedScrap::detach_all(ctx)?;
        let position = anchor.position.unwrap_or(0) as isize;
        let start_edge = self.orientation_helper.start_after_padding(ctx.container());
        let end_edge = self.orientation_helper.end_after_padding(ctx.container());

        if anchor.layout_from_end {
            let mut to_start = LayoutState::fill_toward_start(position, anchor.coordinate, start_edge);
            self.fill(ctx, &mut to_start, &mut held)?;
            let mut to_end = LayoutState::fill_toward_end(position + 1, anchor.coordinate, end_edge);
            self.fill(ctx, &mut to_end, &mut held)?;
        } else {
            let mut to_end = LayoutState::fill_toward_end(position, anchor.coordinate, end_edge);
            self.fill(ctx, &mut to_end, &mut held)?;
            let mut to_start = LayoutState::fill_toward_start(position - 1, anchor.coordinate, start_edge);
            self.fill(ctx, &mut to_start, &mut held)?;
        }

        self.fix_layout_gaps(ctx, &mut held)?;
        self.layout_for_predictive_animations(ctx, &mut held)?;
        self.stats.recycled += held.recycle_all(ctx);

        if !ctx.state.is_pre_layout {
            self.pending_scroll_position = None;
            self.orientation_helper.on_layout_complete(ctx.container());
        }
        self.prefetch_scheduler.clear();
        self.record_attached(ctx)?;

        log::debug!(
            "layout{} of {} items from anchor {:?} at {}: {} children",
            if ctx.state.is_pre_layout { " (pre)" } else { "" },
            item_count,
            anchor.position,
            anchor.coordinate,
            self.stats.attached
        );
        Ok(())
    }

    fn scroll_vertically_by(
        &mut self,
        dy: i32,
        ctx: &mut LayoutContext<'_>,
    ) -> Result<i32, LayoutError> {
        match self.config.orientation {
            Orientation::Vertical => self.scroll_by(dy, ctx),
            Orientation::Horizontal => Ok(0),
        }
    }

    fn scroll_horizontally_by(
        &mut self,
        dx: i32,
        ctx: &mut LayoutContext<'_>,
    ) -> Result<i32, LayoutError> {
        match self.config.orientation {
            Orientation::Horizontal => self.scroll_by(dx, ctx),
            Orientation::Vertical => Ok(0),
        }
    }

    fn can_scroll_vertically(&self) -> bool {
        self.config.orientation == Orientation::Vertical
    }

    fn can_scroll_horizontally(&self) -> bool {
        self.config.orientation == Orientation::Horizontal
    }

    fn supports_predictive_item_animations(&self) -> bool {
        self.config.predictive_animations
    }
}
