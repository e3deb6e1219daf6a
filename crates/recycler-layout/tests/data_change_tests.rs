/// Integration tests for layouts after data-set changes: anchor recovery,
/// pre-layout space accounting, disappearing views and gap fixing.
use recycler_layout::{LayoutAlgorithm, LinearLayoutConfig, LinearLayoutManager, Orientation};
use recycler_testing::TestHost;

fn laid_out(config: LinearLayoutConfig) -> (TestHost, LinearLayoutManager) {
    let mut host = TestHost::new(Orientation::Vertical, 300, 500).uniform_items(30, 50);
    let mut manager = LinearLayoutManager::new(config);
    host.layout(&mut manager).unwrap();
    (host, manager)
}

#[test]
fn test_insert_pushes_view_out_as_disappearing() {
    let (mut host, mut manager) = laid_out(LinearLayoutConfig::default());
    let pushed_out = host.children()[9];

    host.insert_items(5, 1, 50);
    host.layout(&mut manager).unwrap();

    assert_eq!(host.attached_positions(), (0..=10).collect::<Vec<_>>());
    assert_eq!(host.children().last(), Some(&pushed_out));
    assert!(host.is_disappearing(pushed_out));
    assert_eq!(host.bounds_of(10).map(|b| (b.top, b.bottom)), Some((500, 550)));
    assert!(host.children()[..10].iter().all(|&view| !host.is_disappearing(view)));

    let stats = manager.stats();
    assert_eq!(stats.obtained, 11);
    assert_eq!(stats.recycled, 0);
    assert_eq!(stats.attached, 11);
}

#[test]
fn test_insert_without_predictive_animations_recycles() {
    let config = LinearLayoutConfig::default().predictive_animations(false);
    let (mut host, mut manager) = laid_out(config);
    assert!(!manager.supports_predictive_item_animations());

    host.insert_items(5, 1, 50);
    host.layout(&mut manager).unwrap();

    assert_eq!(host.attached_positions(), (0..10).collect::<Vec<_>>());
    assert_eq!(manager.stats().recycled, 1);
    assert_eq!(host.counters().recycled, 1);
}

#[test]
fn test_insert_above_keeps_anchor_item_in_place() {
    let (mut host, mut manager) = laid_out(LinearLayoutConfig::default());
    host.scroll_vertically(&mut manager, 200).unwrap();
    let anchor_view = manager.find_view_by_position(4).unwrap();
    let anchor_id = host.item_id(4);

    host.insert_items(0, 2, 50);
    host.layout(&mut manager).unwrap();

    assert_eq!(host.position_of_id(anchor_id), Some(6));
    assert_eq!(manager.find_view_by_position(6), Some(anchor_view));
    assert_eq!(host.bounds_of(6).map(|b| b.top), Some(0));
    assert_eq!(host.attached_positions(), (6..16).collect::<Vec<_>>());
}

#[test]
fn test_pre_layout_ignores_removed_space() {
    let (mut host, mut manager) = laid_out(LinearLayoutConfig::default());
    let removed = host.children()[3];

    host.remove_items(3, 1);
    let mut ctx = host.pre_layout_context();
    manager.on_layout_children(&mut ctx).unwrap();
    drop(ctx);

    // the removed view keeps its slot but not its space: one extra item
    // is laid out at the old positions
    assert_eq!(host.attached_positions(), (0..=10).collect::<Vec<_>>());
    assert!(host.children().contains(&removed));
    assert_eq!(host.bounds_of(10).map(|b| b.top), Some(500));
    let appearing = manager.find_view_by_position(10).unwrap();

    host.layout(&mut manager).unwrap();

    assert_eq!(host.attached_positions(), (0..10).collect::<Vec<_>>());
    assert!(!host.children().contains(&removed));
    assert_eq!(manager.find_view_by_position(9), Some(appearing));
    assert_eq!(host.bounds_of(9).map(|b| b.top), Some(450));

    let stats = manager.stats();
    assert_eq!(stats.obtained, 11);
    assert_eq!(stats.recycled, 1);
    assert_eq!(stats.obtained - stats.recycled, stats.attached);
}

#[test]
fn test_pre_layout_ignores_changed_space() {
    let (mut host, mut manager) = laid_out(LinearLayoutConfig::default());

    host.change_item(2, 80);
    host.pre_layout(&mut manager).unwrap();
    assert_eq!(host.children().len(), 11);

    host.layout(&mut manager).unwrap();

    assert_eq!(host.bounds_of(2).map(|b| b.height()), Some(80));
    assert_eq!(host.bounds_of(9).map(|b| b.bottom), Some(530));

    // the view realized for position 10 in pre-layout no longer fits
    assert_eq!(host.attached_positions(), (0..=10).collect::<Vec<_>>());
    let last = *host.children().last().unwrap();
    assert!(host.is_disappearing(last));
    assert_eq!(host.view_bounds(last).map(|b| b.top), Some(530));
}

#[test]
fn test_removed_anchor_falls_back_to_next_visible() {
    let (mut host, mut manager) = laid_out(LinearLayoutConfig::default());
    host.scroll_vertically(&mut manager, 100).unwrap();

    host.remove_items(2, 1);
    let anchor = manager.resolve_anchor(host.container(), host.item_count()).unwrap();

    // the first child was removed; the former position 3 is now 2
    assert_eq!(anchor.position, Some(2));
    assert_eq!(anchor.coordinate, 50);

    host.layout(&mut manager).unwrap();
    assert_eq!(host.bounds_of(2).map(|b| b.top), Some(50));
    assert_eq!(host.bounds_of(1).map(|b| b.top), Some(0));
}

#[test]
fn test_removal_at_end_closes_gap() {
    let (mut host, mut manager) = laid_out(LinearLayoutConfig::default());
    assert_eq!(host.scroll_vertically(&mut manager, 1000).unwrap(), 1000);
    assert_eq!(host.attached_positions(), (20..30).collect::<Vec<_>>());

    host.remove_items(28, 2);
    host.layout(&mut manager).unwrap();

    assert_eq!(host.attached_positions(), (18..28).collect::<Vec<_>>());
    assert_eq!(host.bounds_of(18).map(|b| b.top), Some(0));
    assert_eq!(host.bounds_of(27).map(|b| b.bottom), Some(500));

    let stats = manager.stats();
    assert_eq!(stats.obtained - stats.recycled, stats.attached);
    assert!(host.has_no_detached_views());
}

#[test]
fn test_shrinking_below_viewport_pins_to_start() {
    let (mut host, mut manager) = laid_out(LinearLayoutConfig::default());
    host.scroll_vertically(&mut manager, 300).unwrap();

    host.remove_items(4, 26);
    host.layout(&mut manager).unwrap();

    assert_eq!(host.attached_positions(), vec![0, 1, 2, 3]);
    assert_eq!(host.bounds_of(0).map(|b| b.top), Some(0));
    assert_eq!(manager.stats().attached, 4);
}
