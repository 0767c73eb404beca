use std::cell::RefCell;
use std::rc::Rc;

use term_widgets::{
    CursorMode, EventKind, InputEvent, NodeId, Point, PointerButton, Rect, Size, UiConfig,
    UiContext,
};

fn ctx() -> UiContext {
    UiContext::new(UiConfig::default(), Size::new(800.0, 600.0))
}

fn attached_frame(ui: &mut UiContext, title: &str) -> NodeId {
    let frame = ui.create_frame(title);
    ui.attach(ui.root(), frame).unwrap();
    frame
}

fn record(ui: &mut UiContext, kinds: &[EventKind]) -> Rc<RefCell<Vec<(EventKind, NodeId)>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    for &kind in kinds {
        let sink = log.clone();
        let _sub = ui.subscribe_any(kind, move |n| sink.borrow_mut().push((kind, n.target)));
    }
    log
}

fn drag(ui: &mut UiContext, from: Point, to: Point) {
    let button = PointerButton::Left;
    ui.handle_input(&InputEvent::PointerDown { pos: from, button });
    ui.handle_input(&InputEvent::PointerDrag { pos: to, button });
    ui.handle_input(&InputEvent::PointerUp { pos: to, button });
}

#[test]
fn reactivation_swaps_exactly_one_pair() {
    let mut ui = ctx();
    let a = attached_frame(&mut ui, "A");
    let b = attached_frame(&mut ui, "B");
    let log = record(&mut ui, &[EventKind::Activate, EventKind::Deactivate]);

    assert_eq!(ui.activate_frame(a), Ok(true));
    assert_eq!(ui.activate_frame(b), Ok(true));
    log.borrow_mut().clear();

    assert_eq!(ui.activate_frame(a), Ok(true));
    assert_eq!(
        *log.borrow(),
        vec![(EventKind::Deactivate, b), (EventKind::Activate, a)]
    );
    assert_eq!(ui.children(ui.root()).last(), Some(&a));
    assert!(ui.frame(a).unwrap().is_active());
    assert!(!ui.frame(b).unwrap().is_active());

    log.borrow_mut().clear();
    assert_eq!(ui.activate_frame(a), Ok(false));
    assert!(log.borrow().is_empty());
}

#[test]
fn clicking_a_frame_activates_and_raises_it() {
    let mut ui = ctx();
    let a = attached_frame(&mut ui, "A");
    let b = attached_frame(&mut ui, "B");
    ui.set_position(a, 0.0, 0.0).unwrap();
    ui.set_position(b, 200.0, 200.0).unwrap();
    ui.activate_frame(b).unwrap();

    // only A covers this point
    ui.handle_input(&InputEvent::PointerDown {
        pos: Point::new(50.0, 150.0),
        button: PointerButton::Left,
    });
    assert_eq!(ui.active_frame(), Some(a));
    assert_eq!(ui.children(ui.root()).last(), Some(&a));
}

#[test]
fn bottom_right_resize_follows_the_pointer() {
    let mut ui = ctx();
    let frame = attached_frame(&mut ui, "resize");
    ui.set_manual_resize_enabled(frame, true).unwrap();
    assert_eq!(ui.bounds(frame), Some(Rect::new(100.0, 100.0, 600.0, 400.0)));
    let log = record(&mut ui, &[EventKind::ResizeStart, EventKind::ResizeComplete]);

    drag(&mut ui, Point::new(698.0, 498.0), Point::new(748.0, 548.0));

    assert_eq!(ui.bounds(frame), Some(Rect::new(100.0, 100.0, 650.0, 450.0)));
    assert_eq!(
        *log.borrow(),
        vec![
            (EventKind::ResizeStart, frame),
            (EventKind::ResizeComplete, frame)
        ]
    );
    assert!(!ui.frame(frame).unwrap().is_resizing());
}

#[test]
fn top_left_resize_keeps_the_opposite_corner() {
    let mut ui = ctx();
    let frame = attached_frame(&mut ui, "resize");
    ui.set_manual_resize_enabled(frame, true).unwrap();

    // lands on the title bar, but the corner zone wins over a title drag
    drag(&mut ui, Point::new(102.0, 102.0), Point::new(52.0, 52.0));

    let bounds = ui.bounds(frame).unwrap();
    assert_eq!(bounds, Rect::new(50.0, 50.0, 650.0, 450.0));
    assert_eq!((bounds.right(), bounds.bottom()), (700.0, 500.0));
}

#[test]
fn resize_respects_the_minimum_size() {
    let mut ui = ctx();
    let frame = attached_frame(&mut ui, "resize");
    ui.set_manual_resize_enabled(frame, true).unwrap();

    drag(&mut ui, Point::new(102.0, 102.0), Point::new(690.0, 490.0));

    let min = UiConfig::default().frame_min_size;
    let bounds = ui.bounds(frame).unwrap();
    assert_eq!((bounds.width, bounds.height), (min.width, min.height));
    assert_eq!((bounds.right(), bounds.bottom()), (700.0, 500.0));
}

#[test]
fn title_drag_moves_the_frame() {
    let mut ui = ctx();
    let frame = attached_frame(&mut ui, "move me");

    drag(&mut ui, Point::new(300.0, 110.0), Point::new(320.0, 140.0));

    assert_eq!(ui.bounds(frame), Some(Rect::new(120.0, 130.0, 600.0, 400.0)));
}

#[test]
fn locked_frame_ignores_title_drag() {
    let mut ui = ctx();
    let frame = attached_frame(&mut ui, "pinned");
    ui.set_draggable(frame, false).unwrap();

    drag(&mut ui, Point::new(300.0, 110.0), Point::new(320.0, 140.0));

    assert_eq!(ui.bounds(frame), Some(Rect::new(100.0, 100.0, 600.0, 400.0)));
}

#[test]
fn cursor_tracks_resize_zones_each_tick() {
    let mut ui = ctx();
    let frame = attached_frame(&mut ui, "zones");
    ui.set_manual_resize_enabled(frame, true).unwrap();

    ui.handle_input(&InputEvent::PointerMove {
        pos: Point::new(697.0, 300.0),
    });
    ui.tick(Default::default());
    assert!(matches!(ui.cursor(), CursorMode::Resize { .. }));
    assert!(ui.frame(frame).unwrap().hover_edge().is_some());

    ui.handle_input(&InputEvent::PointerMove {
        pos: Point::new(400.0, 300.0),
    });
    ui.tick(Default::default());
    assert_eq!(ui.cursor(), CursorMode::Idle);
    assert!(ui.frame(frame).unwrap().hover_edge().is_none());
}

#[test]
fn width_is_clamped_into_bounds() {
    let mut ui = ctx();
    let panel = ui.create_panel();
    assert_eq!(ui.set_width(panel, 37.0).unwrap().width, 37.0);
    ui.set_min_size(panel, 50.0, 0.0).unwrap();
    ui.set_max_size(panel, 90.0, 0.0).unwrap();
    assert_eq!(ui.set_width(panel, 10.0).unwrap().width, 50.0);
    assert_eq!(ui.set_width(panel, 200.0).unwrap().width, 90.0);
    assert_eq!(ui.set_width(panel, 75.0).unwrap().width, 75.0);
}

#[test]
fn disposing_the_active_frame_clears_activation() {
    let mut ui = ctx();
    let frame = attached_frame(&mut ui, "gone");
    ui.activate_frame(frame).unwrap();
    assert!(ui.dispose(frame));
    assert_eq!(ui.active_frame(), None);
    assert!(ui.frames().is_empty());
    assert!(!ui.dispose(frame));
}
