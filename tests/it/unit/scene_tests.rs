//! Unit tests for the headless scene host's public surface.

use draggable::host::{Host, ListenerScope, PointerEvent};
use draggable::{DragResult, ElementId, PointerPhase, Position, Rect, Scene};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn test_overlapping_siblings_use_paint_order() {
    let scene = Scene::new();
    let back = scene.insert(None, Rect::new(0.0, 0.0, 100.0, 100.0));
    let front = scene.insert(None, Rect::new(50.0, 50.0, 100.0, 100.0));

    assert_eq!(scene.hit_test(Position::new(10.0, 10.0)), Some(back));
    assert_eq!(scene.hit_test(Position::new(75.0, 75.0)), Some(front));
    assert_eq!(scene.hit_test(Position::new(500.0, 500.0)), None);
}

#[test]
fn test_set_rect_moves_hit_area() {
    let scene = Scene::new();
    let el = scene.insert(None, Rect::new(0.0, 0.0, 10.0, 10.0));
    scene.set_rect(el, Rect::new(100.0, 0.0, 10.0, 10.0));

    assert_eq!(scene.hit_test(Position::new(5.0, 5.0)), None);
    assert_eq!(scene.hit_test(Position::new(105.0, 5.0)), Some(el));
    assert_eq!(scene.write_count(el), 0);
}

#[test]
fn test_child_of_detached_parent_starts_detached() {
    let scene = Scene::new();
    let parent = scene.insert(None, Rect::new(0.0, 0.0, 10.0, 10.0));
    scene.detach(parent);
    let child = scene.insert(Some(parent), Rect::new(0.0, 0.0, 5.0, 5.0));

    assert!(!scene.is_attached(child));
    assert_eq!(scene.hit_test(Position::new(1.0, 1.0)), None);
    assert_eq!(scene.layout_position(child), None);
}

#[test]
fn test_explicit_target_is_kept() {
    let scene = Scene::new();
    let el = scene.insert(None, Rect::new(0.0, 0.0, 10.0, 10.0));
    let seen: Rc<RefCell<Option<ElementId>>> = Rc::new(RefCell::new(None));
    let sink = seen.clone();
    scene.add_listener(
        ListenerScope::Root(PointerPhase::Up),
        Rc::new(move |event: &PointerEvent| -> DragResult<()> {
            *sink.borrow_mut() = event.target;
            Ok(())
        }),
    );

    scene
        .dispatch(PointerEvent::new(PointerPhase::Up, Position::new(900.0, 900.0)).with_target(el))
        .unwrap();
    assert_eq!(*seen.borrow(), Some(el));
}
