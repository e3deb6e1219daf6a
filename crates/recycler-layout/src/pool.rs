//! Pool of retired views, bucketed by view type.
//!
//! Hosts implement [`Recycler`](crate::Recycler) on top of this: a recycled
//! view goes into the bucket for its type, and a request for a position first
//! tries to take a retired view of the item's type before creating one.

use crate::collections::map::HashMap;
use crate::view::{ViewHandle, ViewType};

/// Default number of retired views kept per view type.
pub const DEFAULT_MAX_SCRAP: usize = 5;

#[derive(Debug, Default)]
struct ScrapBucket {
    views: Vec<ViewHandle>,
    max_scrap: Option<usize>,
}

/// Retired views waiting to be rebound, grouped by view type.
#[derive(Debug)]
pub struct RecycledViewPool {
    buckets: HashMap<ViewType, ScrapBucket>,
    default_max_scrap: usize,
}

impl Default for RecycledViewPool {
    fn default() -> Self {
        Self::new()
    }
}

impl RecycledViewPool {
    /// Creates a pool keeping up to [`DEFAULT_MAX_SCRAP`] views per type.
    pub fn new() -> Self {
        Self::with_max_scrap(DEFAULT_MAX_SCRAP)
    }

    /// Creates a pool keeping up to `max_scrap` views per type.
    pub fn with_max_scrap(max_scrap: usize) -> Self {
        Self {
            buckets: HashMap::default(),
            default_max_scrap: max_scrap,
        }
    }

    /// Overrides the cap for one view type, dropping views above it.
    ///
    /// Returns the views that no longer fit.
    pub fn set_max_recycled_views(&mut self, view_type: ViewType, max: usize) -> Vec<ViewHandle> {
        let bucket = self.buckets.entry(view_type).or_default();
        bucket.max_scrap = Some(max);
        if bucket.views.len() > max {
            bucket.views.split_off(max)
        } else {
            Vec::new()
        }
    }

    fn max_for(&self, view_type: ViewType) -> usize {
        self.buckets
            .get(&view_type)
            .and_then(|bucket| bucket.max_scrap)
            .unwrap_or(self.default_max_scrap)
    }

    /// Stores a retired view.
    ///
    /// Returns `Some(view)` when the bucket is full and the view was not kept;
    /// the caller is then responsible for disposing of it.
    pub fn put(&mut self, view: ViewHandle, view_type: ViewType) -> Option<ViewHandle> {
        let max = self.max_for(view_type);
        let bucket = self.buckets.entry(view_type).or_default();
        if bucket.views.len() >= max {
            return Some(view);
        }
        debug_assert!(
            !bucket.views.contains(&view),
            "view {view:?} recycled twice"
        );
        bucket.views.push(view);
        None
    }

    /// Takes the most recently retired view of `view_type`, if any.
    pub fn take(&mut self, view_type: ViewType) -> Option<ViewHandle> {
        self.buckets
            .get_mut(&view_type)
            .and_then(|bucket| bucket.views.pop())
    }

    /// Number of retired views of `view_type`.
    pub fn recycled_view_count(&self, view_type: ViewType) -> usize {
        self.buckets
            .get(&view_type)
            .map_or(0, |bucket| bucket.views.len())
    }

    /// Number of retired views across all types.
    pub fn available_count(&self) -> usize {
        self.buckets.values().map(|bucket| bucket.views.len()).sum()
    }

    /// Drops every retired view, returning them for disposal.
    pub fn clear(&mut self) -> Vec<ViewHandle> {
        self.buckets
            .values_mut()
            .flat_map(|bucket| bucket.views.drain(..))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_then_take() {
        let mut pool = RecycledViewPool::new();

        assert_eq!(pool.put(ViewHandle(1), 0), None);
        assert_eq!(pool.put(ViewHandle(2), 0), None);
        assert_eq!(pool.available_count(), 2);

        assert_eq!(pool.take(0), Some(ViewHandle(2)));
        assert_eq!(pool.take(0), Some(ViewHandle(1)));
        assert_eq!(pool.take(0), None);
    }

    #[test]
    fn test_view_type_matching() {
        let mut pool = RecycledViewPool::new();

        pool.put(ViewHandle(1), 100);
        pool.put(ViewHandle(2), 200);

        assert_eq!(pool.take(100), Some(ViewHandle(1)));
        assert_eq!(pool.take(300), None);
        assert_eq!(pool.recycled_view_count(200), 1);
    }

    #[test]
    fn test_bucket_limit() {
        let mut pool = RecycledViewPool::with_max_scrap(2);

        let rejected: Vec<_> = (0..5)
            .filter_map(|i| pool.put(ViewHandle(i), 0))
            .collect();

        assert_eq!(pool.available_count(), 2);
        assert_eq!(rejected, vec![ViewHandle(2), ViewHandle(3), ViewHandle(4)]);
    }

    #[test]
    fn test_per_type_limit_trims_existing() {
        let mut pool = RecycledViewPool::new();
        for i in 0..4 {
            pool.put(ViewHandle(i), 7);
        }

        let dropped = pool.set_max_recycled_views(7, 1);

        assert_eq!(dropped.len(), 3);
        assert_eq!(pool.recycled_view_count(7), 1);
        assert_eq!(pool.put(ViewHandle(9), 7), Some(ViewHandle(9)));
        // other types keep the default cap
        assert_eq!(pool.put(ViewHandle(10), 8), None);
    }

    #[test]
    fn test_clear() {
        let mut pool = RecycledViewPool::new();
        pool.put(ViewHandle(1), 0);
        pool.put(ViewHandle(2), 1);

        let mut cleared = pool.clear();
        cleared.sort();

        assert_eq!(cleared, vec![ViewHandle(1), ViewHandle(2)]);
        assert_eq!(pool.available_count(), 0);
    }
}
