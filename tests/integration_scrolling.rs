use std::cell::RefCell;
use std::rc::Rc;

use term_widgets::{
    EventKind, InputEvent, NodeId, Point, PointerButton, Size, UiConfig, UiContext, UiError,
    UiEvent,
};

fn ctx() -> UiContext {
    UiContext::new(UiConfig::default(), Size::new(800.0, 600.0))
}

fn pane_with_items(ui: &mut UiContext, count: usize) -> (NodeId, Vec<NodeId>) {
    let pane = ui.create_scroll_pane();
    ui.attach(ui.root(), pane).unwrap();
    let items: Vec<_> = (0..count)
        .map(|i| {
            let item = ui.create_label(format!("row {i}"));
            ui.add_item(pane, item).unwrap();
            item
        })
        .collect();
    (pane, items)
}

fn scrollbar(ui: &UiContext, pane: NodeId) -> NodeId {
    ui.scroll_pane(pane).unwrap().scrollbar()
}

fn assert_in_bounds(ui: &UiContext, pane: NodeId) {
    let count = ui.scroll_pane(pane).unwrap().item_count();
    let height = ui.bounds(pane).unwrap().height;
    let per_page = (height / 30.0).floor() as usize;
    let max = count.saturating_sub(per_page);
    let position = ui.scroll_position(pane).unwrap();
    assert!(
        position <= max,
        "position {position} > max {max} (count {count}, height {height})"
    );
    assert_eq!(ui.max_scroll_position(pane), Some(max));
}

#[test]
fn thumb_is_half_the_track_for_twenty_items() {
    let mut ui = ctx();
    let (pane, _) = pane_with_items(&mut ui, 20);
    assert_eq!(ui.total_scrollable_height(pane), Some(600.0));
    let bar = ui.scrollbar(scrollbar(&ui, pane)).unwrap();
    assert_eq!(bar.thumb_length(), 150.0);
    assert!(bar.is_thumb_visible());
}

#[test]
fn thumb_hides_when_everything_fits() {
    let mut ui = ctx();
    let (pane, _) = pane_with_items(&mut ui, 9);
    assert_eq!(ui.total_scrollable_height(pane), Some(270.0));
    assert!(!ui.scrollbar(scrollbar(&ui, pane)).unwrap().is_thumb_visible());
    assert_eq!(ui.max_scroll_position(pane), Some(0));
}

#[test]
fn position_stays_in_bounds_through_any_sequence() {
    let mut ui = ctx();
    let (pane, items) = pane_with_items(&mut ui, 37);
    assert_in_bounds(&ui, pane);

    for target in [-5, 0, 3, 27, 28, 1_000, i64::MIN, i64::MAX] {
        ui.set_scroll_position(pane, target).unwrap();
        assert_in_bounds(&ui, pane);
    }
    for delta in [7, -100, 40, -3] {
        ui.scroll(pane, delta).unwrap();
        assert_in_bounds(&ui, pane);
    }
    ui.set_scroll_position(pane, 27).unwrap();
    for height in [600.0, 90.0, 29.0, 300.0, 1200.0] {
        ui.set_height(pane, height).unwrap();
        assert_in_bounds(&ui, pane);
    }
    for item in items.iter().rev().take(30) {
        ui.remove_item(pane, *item).unwrap();
        assert_in_bounds(&ui, pane);
    }
    ui.clear_items(pane).unwrap();
    assert_in_bounds(&ui, pane);
}

#[test]
fn only_the_visible_window_is_attached() {
    let mut ui = ctx();
    let (pane, items) = pane_with_items(&mut ui, 20);
    ui.set_scroll_position(pane, 4).unwrap();
    assert_eq!(ui.displayed_items(pane), &items[4..14]);
    assert!(ui.is_attached(items[4]));
    assert!(!ui.is_attached(items[3]));
    assert!(!ui.is_attached(items[14]));
    // items follow each other by item height inside the padding
    assert_eq!(ui.bounds(items[4]).unwrap().y, 2.0);
    assert_eq!(ui.bounds(items[5]).unwrap().y, 32.0);
}

#[test]
fn wheel_over_items_scrolls_by_the_step() {
    let mut ui = ctx();
    let (pane, _) = pane_with_items(&mut ui, 20);
    assert_eq!(ui.scroll_position(pane), Some(10));

    let consumed = ui.handle_input(&InputEvent::Wheel {
        pos: Point::new(50.0, 50.0),
        delta: 1,
    });
    assert!(consumed);
    assert_eq!(ui.scroll_position(pane), Some(6));

    ui.handle_input(&InputEvent::Wheel {
        pos: Point::new(50.0, 50.0),
        delta: -3,
    });
    assert_eq!(ui.scroll_position(pane), Some(10));
}

#[test]
fn dragging_the_thumb_scrolls_the_pane() {
    let mut ui = ctx();
    let (pane, _) = pane_with_items(&mut ui, 20);
    let bar = scrollbar(&ui, pane);
    let values = Rc::new(RefCell::new(Vec::new()));
    let sink = values.clone();
    let _sub = ui.subscribe(bar, EventKind::ScrollChange, move |n| {
        if let UiEvent::ScrollChange { value } = n.event {
            sink.borrow_mut().push(value);
        }
    });

    // the thumb sits at the bottom half of the 300 unit track
    let button = PointerButton::Left;
    ui.handle_input(&InputEvent::PointerDown {
        pos: Point::new(297.0, 200.0),
        button,
    });
    assert!(ui.scrollbar(bar).unwrap().is_dragging());
    ui.handle_input(&InputEvent::PointerDrag {
        pos: Point::new(297.0, 50.0),
        button,
    });
    ui.handle_input(&InputEvent::PointerUp {
        pos: Point::new(297.0, 50.0),
        button,
    });

    assert_eq!(ui.scroll_position(pane), Some(0));
    assert_eq!(ui.scroll_value(pane), Some(0.0));
    assert_eq!(*values.borrow(), vec![0.0]);
    assert!(!ui.scrollbar(bar).unwrap().is_dragging());
}

#[test]
fn pane_scroll_moves_the_thumb() {
    let mut ui = ctx();
    let (pane, _) = pane_with_items(&mut ui, 20);
    let bar = scrollbar(&ui, pane);
    ui.set_scroll_position(pane, 5).unwrap();
    assert_eq!(ui.scroll_value(pane), Some(0.5));
    assert_eq!(ui.scrollbar(bar).unwrap().thumb_offset(), 75.0);
}

#[test]
fn disposing_the_pane_leaves_foreign_items_alive() {
    let mut ui = ctx();
    let (pane, items) = pane_with_items(&mut ui, 3);
    assert!(ui.dispose(pane));
    assert!(items.iter().all(|&item| ui.contains(item)));
    assert!(items.iter().all(|&item| !ui.is_attached(item)));
}

#[test]
fn idle_scrollbar_lets_clicks_reach_the_item_beneath() {
    let mut ui = ctx();
    let pane = ui.create_scroll_pane();
    ui.attach(ui.root(), pane).unwrap();
    let button = ui.create_button("wide");
    ui.add_item(pane, button).unwrap();
    let clicks = Rc::new(RefCell::new(0));
    let sink = clicks.clone();
    let _sub = ui.subscribe(button, EventKind::Action, move |_| *sink.borrow_mut() += 1);

    // the item spans x 2..298, under where the bar would sit
    let pos = Point::new(296.0, 10.0);
    assert_eq!(ui.hit_test(pos), Some(button));
    let pointer = PointerButton::Left;
    ui.handle_input(&InputEvent::PointerDown { pos, button: pointer });
    ui.handle_input(&InputEvent::PointerUp { pos, button: pointer });
    assert_eq!(*clicks.borrow(), 1);

    for i in 0..20 {
        let row = ui.create_label(format!("row {i}"));
        ui.add_item(pane, row).unwrap();
    }
    assert_eq!(ui.hit_test(pos), Some(scrollbar(&ui, pane)));
}

#[test]
fn panes_refuse_children_that_are_not_items() {
    let mut ui = ctx();
    let (pane, items) = pane_with_items(&mut ui, 3);
    let stray = ui.create_label("stray");

    assert_eq!(
        ui.attach(pane, stray),
        Err(UiError::StateConflict("scroll panes only hold listed items"))
    );
    assert_eq!(ui.parent(stray), None);
    assert_eq!(ui.displayed_items(pane), items.as_slice());
}
