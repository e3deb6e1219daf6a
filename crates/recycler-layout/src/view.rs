//! Handles and per-view state the host reports to the engine.

/// Opaque handle to a realized view owned by the host (an arena index).
///
/// The engine only stores handles while the view is attached or held in the
/// scrap of the current pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewHandle(pub u32);

/// View type used to bucket retired views for reuse.
pub type ViewType = u32;

/// Layout params of an attached (or scrapped) view.
///
/// The flags are set by the host between passes when the data set changes;
/// the engine reads them and never writes them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Logical position the view is currently bound to.
    pub position: usize,

    /// The item this view represents was removed from the data set.
    pub removed: bool,

    /// The item this view represents changed and will be rebound.
    pub changed: bool,

    /// View type the view was created for.
    pub view_type: ViewType,
}

impl ViewState {
    pub fn new(position: usize) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Whether the view must not count toward consumed space in a pre-layout.
    pub fn ignores_consumed_space(&self) -> bool {
        self.removed || self.changed
    }
}
