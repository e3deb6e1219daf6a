//! In-memory host for driving `recycler-layout` in tests.
//!
//! [`TestHost`] owns a container and a recycler sharing one view store. Items
//! are plain extents along the layout axis; data-set mutations flag and
//! renumber bound views the way a real host does between passes, and keep
//! the pre-mutation positions around for the next pre-layout.

use std::cell::RefCell;
use std::rc::Rc;

use recycler_layout::{
    Adapter, Insets, ItemDecoration, LayoutAlgorithm, LayoutContainer, LayoutContext, LayoutError,
    LayoutPassState, Orientation, Rect, RecycledViewPool, Recycler, Size, ViewHandle, ViewState,
    ViewType,
};
use rustc_hash::FxHashSet;

/// One item of the test data set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TestItem {
    /// Extent along the layout axis, decorations excluded.
    pub extent: i32,
    pub view_type: ViewType,
}

impl TestItem {
    pub fn new(extent: i32) -> Self {
        Self {
            extent,
            view_type: 0,
        }
    }

    pub fn with_view_type(mut self, view_type: ViewType) -> Self {
        self.view_type = view_type;
        self
    }
}

/// The test data set. Every item gets a stable id when it enters the set.
#[derive(Clone, Debug, Default)]
pub struct TestAdapter {
    pub items: Vec<TestItem>,
    ids: Vec<u64>,
    next_id: u64,
}

impl TestAdapter {
    fn fresh_ids(&mut self, count: usize) -> Vec<u64> {
        let ids = (self.next_id..self.next_id + count as u64).collect();
        self.next_id += count as u64;
        ids
    }

    fn set_items(&mut self, items: Vec<TestItem>) {
        self.ids = self.fresh_ids(items.len());
        self.items = items;
    }

    fn insert(&mut self, at: usize, count: usize, extent: i32) {
        let at = at.min(self.items.len());
        let ids = self.fresh_ids(count);
        self.ids.splice(at..at, ids);
        self.items
            .splice(at..at, (0..count).map(|_| TestItem::new(extent)));
    }

    fn remove(&mut self, at: usize, count: usize) {
        let end = (at + count).min(self.items.len());
        let range = at.min(end)..end;
        self.ids.drain(range.clone());
        self.items.drain(range);
    }
}

impl Adapter for TestAdapter {
    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn item_view_type(&self, position: usize) -> ViewType {
        self.items.get(position).map_or(0, |item| item.view_type)
    }

    fn item_id(&self, position: usize) -> u64 {
        self.ids.get(position).copied().unwrap_or(position as u64)
    }
}

#[derive(Clone, Copy, Debug)]
enum PendingUpdate {
    Insert { at: usize, count: usize },
    Remove { at: usize, count: usize },
}

impl PendingUpdate {
    /// Maps a pre-update position, `None` if the item went away.
    fn apply(self, position: usize) -> Option<usize> {
        match self {
            Self::Insert { at, count } if position >= at => Some(position + count),
            Self::Remove { at, count } if position >= at + count => Some(position - count),
            Self::Remove { at, .. } if position >= at => None,
            _ => Some(position),
        }
    }
}

#[derive(Clone, Debug, Default)]
struct ViewRecord {
    position: usize,
    pre_position: Option<usize>,
    removed: bool,
    changed: bool,
    view_type: ViewType,
    extent: i32,
    measured: Size,
    bounds: Rect,
    translation: (i32, i32),
    disappearing: bool,
    bound: bool,
    params_missing: bool,
}

#[derive(Debug, Default)]
struct HostData {
    views: Vec<ViewRecord>,
    adapter: TestAdapter,
    /// Data set as of the last layout, kept while updates are pending.
    old_adapter: Option<TestAdapter>,
    pending: Vec<PendingUpdate>,
    pre_layout: bool,
}

impl HostData {
    fn record(&self, view: ViewHandle) -> Option<&ViewRecord> {
        self.views.get(view.0 as usize).filter(|record| record.bound)
    }

    fn record_mut(&mut self, view: ViewHandle) -> Option<&mut ViewRecord> {
        self.views
            .get_mut(view.0 as usize)
            .filter(|record| record.bound)
    }

    fn item_count(&self) -> usize {
        if self.pre_layout {
            self.old_adapter.as_ref().unwrap_or(&self.adapter).item_count()
        } else {
            self.adapter.item_count()
        }
    }

    fn visible_position(&self, record: &ViewRecord) -> usize {
        if self.pre_layout {
            record.pre_position.unwrap_or(record.position)
        } else {
            record.position
        }
    }

    fn begin_update(&mut self) {
        if self.old_adapter.is_none() {
            self.old_adapter = Some(self.adapter.clone());
        }
    }

    fn apply_update(&mut self, update: PendingUpdate) {
        self.begin_update();
        for record in self.views.iter_mut().filter(|record| record.bound) {
            let position = record.position;
            record.pre_position.get_or_insert(position);
            match update.apply(position) {
                Some(mapped) => record.position = mapped,
                None => record.removed = true,
            }
        }
        self.pending.push(update);
    }

    fn commit(&mut self) {
        self.pending.clear();
        self.old_adapter = None;
        for record in &mut self.views {
            record.pre_position = None;
            record.changed = false;
        }
    }
}

/// Counters of container primitives the engine invoked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ContainerCalls {
    pub attached: usize,
    pub detached: usize,
    pub removed: usize,
}

/// Counters of recycler traffic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RecyclerCounters {
    /// Views created because the pool had none of the right type.
    pub created: usize,
    /// Views handed out, created or reused.
    pub obtained: usize,
    /// Views taken back.
    pub recycled: usize,
    /// Recycled views the pool had no room for.
    pub discarded: usize,
}

/// [`LayoutContainer`] over the shared view store.
pub struct TestContainer {
    data: Rc<RefCell<HostData>>,
    width: i32,
    height: i32,
    padding: Insets,
    orientation: Orientation,
    decorations: Vec<Rc<dyn ItemDecoration>>,
    children: Vec<ViewHandle>,
    detached: FxHashSet<ViewHandle>,
    calls: ContainerCalls,
}

impl TestContainer {
    pub fn children(&self) -> &[ViewHandle] {
        &self.children
    }

    pub fn calls(&self) -> ContainerCalls {
        self.calls
    }

    fn decoration_insets(&self, position: usize, item_count: usize) -> Insets {
        self.decorations
            .iter()
            .fold(Insets::ZERO, |insets, decoration| {
                insets + decoration.item_offsets(position, item_count, self.orientation)
            })
    }

    fn attach(&mut self, view: ViewHandle, index: Option<usize>, disappearing: bool) {
        self.detached.remove(&view);
        match index {
            Some(index) => self.children.insert(index.min(self.children.len()), view),
            None => self.children.push(view),
        }
        if let Some(record) = self.data.borrow_mut().record_mut(view) {
            record.disappearing = disappearing;
        }
        self.calls.attached += 1;
    }

    fn offset_children(&mut self, dx: i32, dy: i32) {
        let mut data = self.data.borrow_mut();
        for &view in &self.children {
            if let Some(record) = data.record_mut(view) {
                record.bounds.offset(dx, dy);
            }
        }
    }
}

impl LayoutContainer for TestContainer {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn padding(&self) -> Insets {
        self.padding
    }

    fn child_count(&self) -> usize {
        self.children.len()
    }

    fn child_at(&self, index: usize) -> Option<ViewHandle> {
        self.children.get(index).copied()
    }

    fn view_state(&self, view: ViewHandle) -> Option<ViewState> {
        let data = self.data.borrow();
        let record = data.record(view).filter(|record| !record.params_missing)?;
        Some(ViewState {
            position: data.visible_position(record),
            removed: record.removed,
            changed: record.changed,
            view_type: record.view_type,
        })
    }

    fn add_view(&mut self, view: ViewHandle, index: Option<usize>) {
        self.attach(view, index, false);
    }

    fn add_disappearing_view(&mut self, view: ViewHandle, index: Option<usize>) {
        self.attach(view, index, true);
    }

    fn detach_view_at(&mut self, index: usize) -> Option<ViewHandle> {
        if index >= self.children.len() {
            return None;
        }
        let view = self.children.remove(index);
        self.detached.insert(view);
        self.calls.detached += 1;
        Some(view)
    }

    fn remove_view_at(&mut self, index: usize) -> Option<ViewHandle> {
        if index >= self.children.len() {
            return None;
        }
        self.calls.removed += 1;
        Some(self.children.remove(index))
    }

    fn remove_detached_view(&mut self, view: ViewHandle) {
        if self.detached.remove(&view) {
            self.calls.removed += 1;
        }
    }

    fn measure_child_with_margins(&mut self, view: ViewHandle, width_used: i32, height_used: i32) {
        let (position, item_count, extent) = {
            let data = self.data.borrow();
            let Some(record) = data.record(view) else {
                return;
            };
            let extent = if data.pre_layout || record.removed {
                record.extent
            } else {
                data.adapter
                    .items
                    .get(record.position)
                    .map_or(record.extent, |item| item.extent)
            };
            (data.visible_position(record), data.item_count(), extent)
        };

        let insets = self.decoration_insets(position, item_count);
        let inner_width = self.width - self.padding.horizontal();
        let inner_height = self.height - self.padding.vertical();
        let measured = match self.orientation {
            Orientation::Vertical => Size::new(inner_width - width_used, extent + insets.vertical()),
            Orientation::Horizontal => {
                Size::new(extent + insets.horizontal(), inner_height - height_used)
            }
        };
        if let Some(record) = self.data.borrow_mut().record_mut(view) {
            record.extent = extent;
            record.measured = measured;
        }
    }

    fn decorated_measured_size(&self, view: ViewHandle) -> Option<Size> {
        self.data.borrow().record(view).map(|record| record.measured)
    }

    fn decorated_bounds_with_margins(&self, view: ViewHandle) -> Option<Rect> {
        self.data.borrow().record(view).map(|record| record.bounds)
    }

    fn transformed_bounds_with_margins(&self, view: ViewHandle) -> Option<Rect> {
        self.data.borrow().record(view).map(|record| {
            let mut bounds = record.bounds;
            bounds.offset(record.translation.0, record.translation.1);
            bounds
        })
    }

    fn layout_decorated_with_margins(&mut self, view: ViewHandle, bounds: Rect) {
        if let Some(record) = self.data.borrow_mut().record_mut(view) {
            record.bounds = bounds;
        }
    }

    fn offset_children_vertical(&mut self, dy: i32) {
        self.offset_children(0, dy);
    }

    fn offset_children_horizontal(&mut self, dx: i32) {
        self.offset_children(dx, 0);
    }
}

/// [`Recycler`] binding views from the test adapter, backed by a
/// [`RecycledViewPool`].
pub struct TestRecycler {
    data: Rc<RefCell<HostData>>,
    pool: RecycledViewPool,
    counters: RecyclerCounters,
}

impl TestRecycler {
    pub fn pool(&self) -> &RecycledViewPool {
        &self.pool
    }

    pub fn counters(&self) -> RecyclerCounters {
        self.counters
    }
}

impl Recycler for TestRecycler {
    fn view_for_position(&mut self, position: usize) -> ViewHandle {
        let mut data = self.data.borrow_mut();
        let pre_layout = data.pre_layout;
        let (item, mapped) = if pre_layout {
            let adapter = data.old_adapter.as_ref().unwrap_or(&data.adapter);
            let mapped = data
                .pending
                .iter()
                .try_fold(position, |position, update| update.apply(position));
            (adapter.items.get(position).copied(), mapped)
        } else {
            (data.adapter.items.get(position).copied(), Some(position))
        };
        let Some(item) = item else {
            panic!("requested view for position {position} outside the data set");
        };

        let view = match self.pool.take(item.view_type) {
            Some(view) => view,
            None => {
                self.counters.created += 1;
                data.views.push(ViewRecord::default());
                ViewHandle((data.views.len() - 1) as u32)
            }
        };
        data.views[view.0 as usize] = ViewRecord {
            position: mapped.unwrap_or(position),
            pre_position: pre_layout.then_some(position),
            removed: mapped.is_none(),
            view_type: item.view_type,
            extent: item.extent,
            bound: true,
            ..ViewRecord::default()
        };
        self.counters.obtained += 1;
        log::trace!("bound {view:?} to position {position}");
        view
    }

    fn recycle_view(&mut self, view: ViewHandle) {
        let mut data = self.data.borrow_mut();
        let Some(record) = data.record_mut(view) else {
            panic!("recycled unknown view {view:?}");
        };
        record.bound = false;
        let view_type = record.view_type;
        self.counters.recycled += 1;
        if let Some(rejected) = self.pool.put(view, view_type) {
            self.counters.discarded += 1;
            log::trace!("pool full, discarding {rejected:?}");
        }
    }
}

/// Container, recycler and data set wired together.
///
/// ```
/// use recycler_layout::{LinearLayoutConfig, LinearLayoutManager, Orientation};
/// use recycler_testing::TestHost;
///
/// let mut host = TestHost::new(Orientation::Vertical, 300, 500).uniform_items(30, 50);
/// let mut manager = LinearLayoutManager::new(LinearLayoutConfig::default());
/// host.layout(&mut manager).unwrap();
/// assert_eq!(host.attached_positions(), (0..10).collect::<Vec<_>>());
/// ```
pub struct TestHost {
    data: Rc<RefCell<HostData>>,
    container: TestContainer,
    recycler: TestRecycler,
}

impl TestHost {
    /// Empty data set in a `width` x `height` container without padding.
    pub fn new(orientation: Orientation, width: i32, height: i32) -> Self {
        let data = Rc::new(RefCell::new(HostData::default()));
        Self {
            container: TestContainer {
                data: Rc::clone(&data),
                width,
                height,
                padding: Insets::ZERO,
                orientation,
                decorations: Vec::new(),
                children: Vec::new(),
                detached: FxHashSet::default(),
                calls: ContainerCalls::default(),
            },
            recycler: TestRecycler {
                data: Rc::clone(&data),
                pool: RecycledViewPool::new(),
                counters: RecyclerCounters::default(),
            },
            data,
        }
    }

    pub fn uniform_items(self, count: usize, extent: i32) -> Self {
        self.items((0..count).map(|_| TestItem::new(extent)))
    }

    pub fn items(self, items: impl IntoIterator<Item = TestItem>) -> Self {
        self.data
            .borrow_mut()
            .adapter
            .set_items(items.into_iter().collect());
        self
    }

    pub fn padding(mut self, padding: Insets) -> Self {
        self.container.padding = padding;
        self
    }

    pub fn decoration(mut self, decoration: impl ItemDecoration + 'static) -> Self {
        self.container.decorations.push(Rc::new(decoration));
        self
    }

    pub fn pool(mut self, pool: RecycledViewPool) -> Self {
        self.recycler.pool = pool;
        self
    }

    pub fn resize(&mut self, width: i32, height: i32) {
        self.container.width = width;
        self.container.height = height;
    }

    /// Context for a real layout or scroll.
    pub fn context(&mut self) -> LayoutContext<'_> {
        self.data.borrow_mut().pre_layout = false;
        let state = LayoutPassState::new(self.data.borrow().item_count());
        LayoutContext::new(&mut self.container, &mut self.recycler, state)
    }

    /// Context for the pre-layout of pending updates: old positions and the
    /// old item count.
    pub fn pre_layout_context(&mut self) -> LayoutContext<'_> {
        self.data.borrow_mut().pre_layout = true;
        let state = LayoutPassState::pre_layout(self.data.borrow().item_count());
        LayoutContext::new(&mut self.container, &mut self.recycler, state)
    }

    /// Real layout; commits pending updates afterwards.
    pub fn layout(&mut self, algorithm: &mut dyn LayoutAlgorithm) -> Result<(), LayoutError> {
        let result = algorithm.on_layout_children(&mut self.context());
        self.data.borrow_mut().commit();
        result
    }

    pub fn pre_layout(&mut self, algorithm: &mut dyn LayoutAlgorithm) -> Result<(), LayoutError> {
        let result = algorithm.on_layout_children(&mut self.pre_layout_context());
        self.data.borrow_mut().pre_layout = false;
        result
    }

    pub fn scroll_vertically(
        &mut self,
        algorithm: &mut dyn LayoutAlgorithm,
        dy: i32,
    ) -> Result<i32, LayoutError> {
        algorithm.scroll_vertically_by(dy, &mut self.context())
    }

    pub fn scroll_horizontally(
        &mut self,
        algorithm: &mut dyn LayoutAlgorithm,
        dx: i32,
    ) -> Result<i32, LayoutError> {
        algorithm.scroll_horizontally_by(dx, &mut self.context())
    }

    /// Inserts `count` items of `extent` before `at`.
    pub fn insert_items(&mut self, at: usize, count: usize, extent: i32) {
        let mut data = self.data.borrow_mut();
        data.apply_update(PendingUpdate::Insert { at, count });
        data.adapter.insert(at, count, extent);
    }

    /// Removes `count` items starting at `at`, flagging their views removed.
    pub fn remove_items(&mut self, at: usize, count: usize) {
        let mut data = self.data.borrow_mut();
        data.apply_update(PendingUpdate::Remove { at, count });
        data.adapter.remove(at, count);
    }

    /// Gives the item at `position` a new extent and flags its view changed.
    pub fn change_item(&mut self, position: usize, extent: i32) {
        let mut data = self.data.borrow_mut();
        data.begin_update();
        if let Some(item) = data.adapter.items.get_mut(position) {
            item.extent = extent;
        }
        for record in data.views.iter_mut() {
            if record.bound && !record.removed && record.position == position {
                record.changed = true;
            }
        }
    }

    /// Simulates a pending animation moving `view`.
    pub fn set_translation(&mut self, view: ViewHandle, dx: i32, dy: i32) {
        if let Some(record) = self.data.borrow_mut().record_mut(view) {
            record.translation = (dx, dy);
        }
    }

    /// Makes the container forget the layout params of `view`.
    pub fn drop_layout_params(&mut self, view: ViewHandle) {
        if let Some(record) = self.data.borrow_mut().record_mut(view) {
            record.params_missing = true;
        }
    }

    pub fn container(&self) -> &TestContainer {
        &self.container
    }

    pub fn item_count(&self) -> usize {
        self.data.borrow().adapter.item_count()
    }

    /// Stable id of the item currently at `position`.
    pub fn item_id(&self, position: usize) -> u64 {
        self.data.borrow().adapter.item_id(position)
    }

    /// Current position of the item with stable id `id`.
    pub fn position_of_id(&self, id: u64) -> Option<usize> {
        self.data.borrow().adapter.position_of_id(id)
    }

    pub fn calls(&self) -> ContainerCalls {
        self.container.calls
    }

    pub fn counters(&self) -> RecyclerCounters {
        self.recycler.counters
    }

    pub fn recycled_pool(&self) -> &RecycledViewPool {
        &self.recycler.pool
    }

    pub fn children(&self) -> &[ViewHandle] {
        &self.container.children
    }

    /// Positions of the attached children, start to end.
    pub fn attached_positions(&self) -> Vec<usize> {
        let data = self.data.borrow();
        self.container
            .children
            .iter()
            .filter_map(|&view| data.record(view).map(|record| data.visible_position(record)))
            .collect()
    }

    /// Bounds of the attached child bound to `position`.
    pub fn bounds_of(&self, position: usize) -> Option<Rect> {
        let data = self.data.borrow();
        self.container.children.iter().find_map(|&view| {
            data.record(view)
                .filter(|record| data.visible_position(record) == position)
                .map(|record| record.bounds)
        })
    }

    pub fn view_bounds(&self, view: ViewHandle) -> Option<Rect> {
        self.data.borrow().record(view).map(|record| record.bounds)
    }

    pub fn is_disappearing(&self, view: ViewHandle) -> bool {
        self.data
            .borrow()
            .record(view)
            .is_some_and(|record| record.disappearing)
    }

    /// Whether no view is left detached after a pass.
    pub fn has_no_detached_views(&self) -> bool {
        self.container.detached.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_update_mapping() {
        let insert = PendingUpdate::Insert { at: 3, count: 2 };
        assert_eq!(insert.apply(2), Some(2));
        assert_eq!(insert.apply(3), Some(5));

        let remove = PendingUpdate::Remove { at: 3, count: 2 };
        assert_eq!(remove.apply(2), Some(2));
        assert_eq!(remove.apply(3), None);
        assert_eq!(remove.apply(4), None);
        assert_eq!(remove.apply(5), Some(3));
    }

    #[test]
    fn test_recycler_reuses_pooled_views() {
        let mut host = TestHost::new(Orientation::Vertical, 100, 100).uniform_items(4, 10);

        let first = host.recycler.view_for_position(0);
        host.recycler.recycle_view(first);
        let second = host.recycler.view_for_position(3);

        assert_eq!(first, second);
        assert_eq!(host.counters().created, 1);
        assert_eq!(host.counters().obtained, 2);
        let state = host.container.view_state(second);
        assert_eq!(state.map(|state| state.position), Some(3));
    }

    #[test]
    fn test_remove_flags_bound_views() {
        let mut host = TestHost::new(Orientation::Vertical, 100, 100).uniform_items(5, 10);
        let views: Vec<_> = (0..5).map(|p| host.recycler.view_for_position(p)).collect();

        host.remove_items(1, 2);

        assert_eq!(host.item_count(), 3);
        let state = host.container.view_state(views[1]).unwrap();
        assert!(state.removed);
        assert_eq!(host.container.view_state(views[4]).unwrap().position, 2);

        host.data.borrow_mut().pre_layout = true;
        assert_eq!(host.container.view_state(views[4]).unwrap().position, 4);
    }

    #[test]
    fn test_item_ids_survive_updates() {
        let mut host = TestHost::new(Orientation::Vertical, 100, 100).uniform_items(5, 10);
        let third = host.item_id(2);

        host.insert_items(0, 2, 10);
        assert_eq!(host.position_of_id(third), Some(4));
        assert_ne!(host.item_id(0), host.item_id(2));

        host.remove_items(4, 1);
        assert_eq!(host.position_of_id(third), None);
    }
}
