//! Drag sessions: snapping, limits, thresholds and notification order.

use crate::helpers::{TestSceneBuilder, drag_card, Recorder};
use draggable::error::Hook;
use draggable::limit::AxisLimit;
use draggable::{DragOptions, DragPhase, Draggable, Limit, Position, Rect};
use std::cell::RefCell;
use std::rc::Rc;

// ============================================================================
// Snapping
// ============================================================================

#[test]
fn test_eager_snap_with_x_range() {
    let test = TestSceneBuilder::new().with_card(0.0, 50.0, 50.0, 50.0).build();
    let recorder = Recorder::new();
    let drag = Draggable::new(
        test.scene.clone(),
        test.card,
        recorder.attach(
            DragOptions::default()
                .with_grid(10.0)
                .with_smooth_drag(false)
                .with_limit(Limit::x_range(0.0, 100.0)),
        ),
    )
    .unwrap();

    test.scene.drag_path((10.0, 60.0), &[(33.0, 60.0)]).unwrap();

    assert_eq!(drag.get(), Position::new(20.0, 50.0));
    assert_eq!(recorder.hooks(), vec![Hook::DragStart, Hook::Drag, Hook::DragEnd]);
    assert_eq!(recorder.positions(Hook::DragStart), vec![(0.0, 50.0)]);
    assert_eq!(recorder.positions(Hook::Drag), vec![(20.0, 50.0)]);
    assert_eq!(recorder.positions(Hook::DragEnd), vec![(20.0, 50.0)]);
}

#[test]
fn test_grid_and_box_limit_scenario() {
    let test = TestSceneBuilder::new().with_card(5.0, 5.0, 50.0, 50.0).build();
    let drag = Draggable::new(
        test.scene.clone(),
        test.card,
        DragOptions::default()
            .with_grid(10.0)
            .with_smooth_drag(false)
            .with_limit(Limit::axes(AxisLimit::range(0.0, 100.0), AxisLimit::range(0.0, 100.0))),
    )
    .unwrap();

    // Pointer delta (18, 42) puts the raw candidate at (23, 47)
    test.scene.drag_path((10.0, 10.0), &[(28.0, 52.0)]).unwrap();
    assert_eq!(drag.get(), Position::new(20.0, 50.0));
}

#[test]
fn test_x_range_clamps_past_max() {
    let (test, drag, _) = drag_card(
        DragOptions::default()
            .with_grid(10.0)
            .with_smooth_drag(false)
            .with_limit(Limit::x_range(0.0, 100.0)),
    );
    test.scene.drag_path((10.0, 10.0), &[(500.0, 33.0)]).unwrap();
    assert_eq!(drag.get(), Position::new(100.0, 20.0));
}

#[test]
fn test_every_eager_write_is_on_grid() {
    let (test, _drag, recorder) = drag_card(DragOptions::default().with_grid(8.0).with_smooth_drag(false));
    let path: Vec<(f64, f64)> = (1..20).map(|i| (10.0 + i as f64 * 3.3, 10.0 + i as f64 * 1.7)).collect();
    test.scene.drag_path((10.0, 10.0), &path).unwrap();

    for (x, y) in recorder.positions(Hook::Drag) {
        assert_eq!(x % 8.0, 0.0, "x={x} off grid");
        assert_eq!(y % 8.0, 0.0, "y={y} off grid");
    }
}

#[test]
fn test_smooth_drag_snaps_on_release() {
    let (test, drag, recorder) = drag_card(DragOptions::default().with_grid(10.0));
    test.scene.drag_path((10.0, 10.0), &[(23.0, 17.0)]).unwrap();

    assert_eq!(recorder.positions(Hook::Drag), vec![(13.0, 7.0), (10.0, 10.0)]);
    assert_eq!(
        recorder.hooks(),
        vec![Hook::DragStart, Hook::Drag, Hook::Drag, Hook::DragEnd]
    );
    assert_eq!(drag.get(), Position::new(10.0, 10.0));
}

#[test]
fn test_release_without_grid_has_no_extra_drag() {
    let (test, drag, recorder) = drag_card(DragOptions::default());
    test.scene.drag_path((10.0, 10.0), &[(20.0, 25.0)]).unwrap();

    assert_eq!(recorder.hooks(), vec![Hook::DragStart, Hook::Drag, Hook::DragEnd]);
    assert_eq!(drag.get(), Position::new(10.0, 15.0));
}

// ============================================================================
// Limits
// ============================================================================

#[test]
fn test_fixed_axis_is_pinned() {
    let (test, drag, recorder) = drag_card(
        DragOptions::default().with_limit(Limit::axes(AxisLimit::Fixed(50.0), AxisLimit::Free)),
    );
    test.scene
        .drag_path((10.0, 10.0), &[(40.0, 70.0), (-80.0, 20.0)])
        .unwrap();

    assert_eq!(recorder.positions(Hook::Drag), vec![(50.0, 60.0), (50.0, 10.0)]);
    assert_eq!(drag.get(), Position::new(50.0, 10.0));
}

#[test]
fn test_fixed_x_with_free_y() {
    let (test, drag, _) = drag_card(
        DragOptions::default().with_limit(Limit::axes(AxisLimit::Fixed(50.0), AxisLimit::Free)),
    );
    test.scene.drag_path((10.0, 10.0), &[(210.0, 87.0)]).unwrap();
    assert_eq!(drag.get(), Position::new(50.0, 77.0));
}

#[test]
fn test_element_limit_keeps_card_inside() {
    let test = TestSceneBuilder::new().build();
    let drag = Draggable::new(
        test.scene.clone(),
        test.card,
        DragOptions::default().with_limit(Limit::within(test.container)),
    )
    .unwrap();

    test.scene.drag_path((10.0, 10.0), &[(1000.0, -100.0)]).unwrap();
    assert_eq!(drag.get(), Position::new(350.0, 0.0));
}

#[test]
fn test_element_limit_reads_bounds_each_move() {
    let test = TestSceneBuilder::new().build();
    let drag = Draggable::new(
        test.scene.clone(),
        test.card,
        DragOptions::default().with_limit(Limit::within(test.container)),
    )
    .unwrap();

    test.scene.set_rect(test.container, Rect::new(100.0, 100.0, 200.0, 200.0));
    test.scene.drag_path((10.0, 10.0), &[(20.0, 20.0)]).unwrap();
    assert_eq!(drag.get(), Position::new(100.0, 100.0));
}

#[test]
fn test_element_limit_without_bounds_is_unbounded() {
    let test = TestSceneBuilder::new().build();
    let bounds = test.scene.insert(None, Rect::new(500.0, 500.0, 100.0, 100.0));
    let drag = Draggable::new(
        test.scene.clone(),
        test.card,
        DragOptions::default().with_limit(Limit::within(bounds)),
    )
    .unwrap();

    test.scene.drag_path((10.0, 10.0), &[(20.0, 20.0)]).unwrap();
    assert_eq!(drag.get(), Position::new(500.0, 500.0));

    test.scene.detach(bounds);
    test.scene.drag_path((510.0, 510.0), &[(520.0, 530.0)]).unwrap();
    assert_eq!(drag.get(), Position::new(510.0, 520.0));
}

#[test]
fn test_custom_limit_sees_origin() {
    let (test, drag, _) = drag_card(
        DragOptions::default().with_limit(Limit::custom(|candidate, origin| {
            Position::new(candidate.x, origin.y)
        })),
    );
    test.scene.drag_path((10.0, 10.0), &[(30.0, 40.0)]).unwrap();
    assert_eq!(drag.get(), Position::new(20.0, 0.0));
}

#[test]
fn test_custom_limit_gets_snapped_candidate_when_eager() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let (test, _drag, _) = drag_card(
        DragOptions::default()
            .with_grid(10.0)
            .with_smooth_drag(false)
            .with_limit(Limit::custom(move |candidate, _| {
                sink.borrow_mut().push(candidate);
                candidate
            })),
    );
    test.scene.drag_path((10.0, 10.0), &[(23.0, 10.0)]).unwrap();
    assert_eq!(*seen.borrow(), vec![Position::new(10.0, 0.0)]);
}

// ============================================================================
// Threshold
// ============================================================================

#[test]
fn test_threshold_boundary_is_inclusive() {
    let (test, drag, recorder) = drag_card(DragOptions::default().with_threshold(5.0));
    let scene = &test.scene;

    scene.pointer_down(10.0, 10.0).unwrap();
    scene.pointer_move(13.0, 13.0).unwrap();
    assert_eq!(drag.phase(), DragPhase::Pending);
    assert!(recorder.hooks().is_empty());
    assert_eq!(drag.get(), Position::new(0.0, 0.0));

    // Exactly 5px away
    scene.pointer_move(14.0, 13.0).unwrap();
    assert!(drag.is_dragging());
    assert_eq!(recorder.hooks(), vec![Hook::DragStart, Hook::Drag]);
    assert_eq!(drag.get(), Position::new(4.0, 3.0));

    scene.pointer_up(14.0, 13.0).unwrap();
    assert_eq!(recorder.count(Hook::DragEnd), 1);
}

#[test]
fn test_release_below_threshold_is_silent() {
    let (test, drag, recorder) = drag_card(DragOptions::default().with_threshold(50.0));
    test.scene.drag_path((10.0, 10.0), &[(20.0, 20.0)]).unwrap();

    assert!(recorder.seen().is_empty());
    assert_eq!(drag.get(), Position::new(0.0, 0.0));
    assert_eq!(drag.phase(), DragPhase::Idle);
    assert_eq!(test.scene.write_count(test.card), 0);
}

#[test]
fn test_drag_start_reports_pre_move_position() {
    let (test, _drag, recorder) = drag_card(DragOptions::default());
    test.scene.drag_path((10.0, 10.0), &[(40.0, 40.0)]).unwrap();

    let seen = recorder.seen();
    assert_eq!(seen[0].hook, Hook::DragStart);
    assert_eq!(seen[0].position, Position::new(0.0, 0.0));
    assert_eq!(seen[1].position, Position::new(30.0, 30.0));
}

#[test]
fn test_consecutive_drags_accumulate() {
    let (test, drag, recorder) = drag_card(DragOptions::default());
    test.scene.drag_path((10.0, 10.0), &[(30.0, 20.0)]).unwrap();
    test.scene.drag_path((30.0, 20.0), &[(35.0, 50.0)]).unwrap();

    assert_eq!(drag.get(), Position::new(25.0, 40.0));
    assert_eq!(recorder.count(Hook::DragStart), 2);
    assert_eq!(recorder.count(Hook::DragEnd), 2);
}
