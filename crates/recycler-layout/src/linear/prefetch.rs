//! Positions worth realizing just ahead of a scroll.
//!
//! The engine never creates views for them itself; the host drains the
//! queue between frames and warms its pool.

use std::collections::VecDeque;

use super::layout_state::LayoutDirection;

/// How far ahead of the leading edge to prefetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrefetchStrategy {
    /// Number of positions beyond the attached range. Default is 2.
    pub prefetch_count: usize,

    pub enabled: bool,
}

impl Default for PrefetchStrategy {
    fn default() -> Self {
        Self {
            prefetch_count: 2,
            enabled: true,
        }
    }
}

impl PrefetchStrategy {
    pub fn new(prefetch_count: usize) -> Self {
        Self {
            prefetch_count,
            enabled: true,
        }
    }

    pub fn disabled() -> Self {
        Self {
            prefetch_count: 0,
            enabled: false,
        }
    }
}

/// Queue of positions just beyond the attached range, nearest first.
#[derive(Debug, Default)]
pub struct PrefetchScheduler {
    queue: VecDeque<usize>,
}

impl PrefetchScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the queue with the positions ahead of `[first, last]` in
    /// `direction`, bounded by `[0, item_count)`.
    pub fn update(
        &mut self,
        first: usize,
        last: usize,
        item_count: usize,
        direction: LayoutDirection,
        strategy: &PrefetchStrategy,
    ) {
        self.queue.clear();
        if !strategy.enabled {
            return;
        }

        match direction {
            LayoutDirection::ToEnd => {
                let ahead = (1..=strategy.prefetch_count)
                    .map(|step| last.saturating_add(step))
                    .take_while(|&position| position < item_count);
                self.queue.extend(ahead);
            }
            LayoutDirection::ToStart => {
                let behind = (1..=strategy.prefetch_count).map_while(|step| first.checked_sub(step));
                self.queue.extend(behind);
            }
        }
    }

    pub fn next_prefetch(&mut self) -> Option<usize> {
        self.queue.pop_front()
    }

    pub fn pending_prefetches(&self) -> &VecDeque<usize> {
        &self.queue
    }

    /// Drains the queue, nearest position first.
    pub fn drain(&mut self) -> Vec<usize> {
        self.queue.drain(..).collect()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
