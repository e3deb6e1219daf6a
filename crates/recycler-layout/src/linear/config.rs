//! Configuration for [`LinearLayoutManager`](super::LinearLayoutManager).

use super::orientation_helper::Orientation;
use super::prefetch::PrefetchStrategy;

/// Behaviour switches for a linear layout.
///
/// ```
/// use recycler_layout::{LinearLayoutConfig, PrefetchStrategy};
///
/// let config = LinearLayoutConfig::horizontal()
///     .stack_from_end(true)
///     .prefetch(PrefetchStrategy::new(4));
/// assert!(config.stack_from_end);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinearLayoutConfig {
    pub orientation: Orientation,

    /// Fill from the end edge: the default anchor is the last item, pinned to
    /// the end after padding.
    pub stack_from_end: bool,

    /// Lay out views that are going away beyond the edges so the host can
    /// animate them out.
    pub predictive_animations: bool,

    pub prefetch: PrefetchStrategy,
}

impl Default for LinearLayoutConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Vertical,
            stack_from_end: false,
            predictive_animations: true,
            prefetch: PrefetchStrategy::default(),
        }
    }
}

impl LinearLayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertical() -> Self {
        Self::default()
    }

    pub fn horizontal() -> Self {
        Self::default().orientation(Orientation::Horizontal)
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn stack_from_end(mut self, stack_from_end: bool) -> Self {
        self.stack_from_end = stack_from_end;
        self
    }

    pub fn predictive_animations(mut self, enabled: bool) -> Self {
        self.predictive_animations = enabled;
        self
    }

    pub fn prefetch(mut self, strategy: PrefetchStrategy) -> Self {
        self.prefetch = strategy;
        self
    }
}
