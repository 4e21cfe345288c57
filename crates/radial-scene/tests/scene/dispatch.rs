use radial_core::Point;
use radial_scene::{
    Attr, EventData, EventKind, ManualClock, PointerEvent, RecordingSurface, Scene, SceneConfig,
    ShapeOptions,
};

use crate::support::{recorded, scene, scene_with};

#[test]
fn test_click_carries_children() {
    let (mut scene, _log, _clock) = scene();
    let a = scene.circle(50.0, 50.0, 20.0, ShapeOptions::default()).unwrap();
    let b = scene.rect(200.0, 100.0, 40.0, 40.0, ShapeOptions::default()).unwrap();

    let seen = recorded();
    let sink = seen.clone();
    scene
        .on(a, EventKind::Click, move |_, event| {
            if let EventData::Click { children, .. } = &event.data {
                sink.borrow_mut().push(children.clone());
            }
        })
        .unwrap();

    scene.dispatch_pointer(PointerEvent::click(50.0, 50.0));
    scene.dispatch_pointer(PointerEvent::click(300.0, 300.0));
    assert_eq!(*seen.borrow(), vec![vec![a, b]]);
}

#[test]
fn test_drag_moves_shape() {
    let (mut scene, log, _clock) = scene();
    let id = scene
        .rect(10.0, 10.0, 50.0, 50.0, ShapeOptions::default().draggable())
        .unwrap();

    let kinds = recorded();
    for kind in [EventKind::DragStart, EventKind::Drag, EventKind::DragEnd] {
        let sink = kinds.clone();
        scene
            .on(id, kind, move |_, event| sink.borrow_mut().push(event.kind))
            .unwrap();
    }

    scene.dispatch_pointer(PointerEvent::down(20.0, 20.0));
    assert!(scene.is_dragging(id));
    scene.dispatch_pointer(PointerEvent::moved(30.0, 25.0));
    scene.dispatch_pointer(PointerEvent::up(30.0, 25.0));

    assert!(!scene.is_dragging(id));
    assert_eq!(scene.shape(id).unwrap().position(), Point::new(20.0, 15.0));
    assert_eq!(
        *kinds.borrow(),
        vec![EventKind::DragStart, EventKind::Drag, EventKind::DragEnd]
    );

    assert_eq!(scene.pending_frames(), 1);
    scene.run_frame();
    assert_eq!(log.clears(), 1);
}

#[test]
fn test_non_draggable_shape_stays_put() {
    let (mut scene, _log, _clock) = scene();
    let id = scene.rect(10.0, 10.0, 50.0, 50.0, ShapeOptions::default()).unwrap();

    scene.dispatch_pointer(PointerEvent::down(20.0, 20.0));
    scene.dispatch_pointer(PointerEvent::moved(40.0, 40.0));
    scene.dispatch_pointer(PointerEvent::up(40.0, 40.0));

    assert_eq!(scene.shape(id).unwrap().position(), Point::new(10.0, 10.0));
    assert_eq!(scene.pending_frames(), 0);
}

#[test]
fn test_drag_updates_are_throttled() {
    let (mut scene, _log, clock) = scene_with(SceneConfig::default());
    let id = scene
        .rect(10.0, 10.0, 50.0, 50.0, ShapeOptions::default().draggable())
        .unwrap();
    let drags = recorded();
    let sink = drags.clone();
    scene
        .on(id, EventKind::Drag, move |_, event| sink.borrow_mut().push(event.kind))
        .unwrap();

    scene.dispatch_pointer(PointerEvent::down(20.0, 20.0));
    scene.dispatch_pointer(PointerEvent::moved(25.0, 20.0));
    scene.dispatch_pointer(PointerEvent::moved(30.0, 20.0));
    assert_eq!(drags.borrow().len(), 1);
    assert_eq!(scene.shape(id).unwrap().position(), Point::new(15.0, 10.0));

    clock.advance_ms(16);
    scene.dispatch_pointer(PointerEvent::moved(35.0, 20.0));
    assert_eq!(drags.borrow().len(), 2);
    assert_eq!(scene.shape(id).unwrap().position(), Point::new(25.0, 10.0));
}

#[test]
fn test_leaving_surface_ends_drag() {
    let (mut scene, _log, _clock) = scene();
    let id = scene
        .circle(50.0, 50.0, 20.0, ShapeOptions::default().draggable())
        .unwrap();
    let ends = recorded();
    let sink = ends.clone();
    scene
        .on(id, EventKind::DragEnd, move |_, event| sink.borrow_mut().push(event.kind))
        .unwrap();

    scene.dispatch_pointer(PointerEvent::down(50.0, 50.0));
    scene.dispatch_pointer(PointerEvent::leave(500.0, 50.0));

    assert_eq!(ends.borrow().len(), 1);
    assert!(!scene.is_dragging(id));
}

#[test]
fn test_hover_enter_and_leave() {
    let (mut scene, _log, _clock) = scene();
    let id = scene.circle(50.0, 50.0, 20.0, ShapeOptions::default()).unwrap();
    let kinds = recorded();
    for kind in [EventKind::MouseEnter, EventKind::MouseMove, EventKind::MouseLeave] {
        let sink = kinds.clone();
        scene
            .on(id, kind, move |_, event| sink.borrow_mut().push(event.kind))
            .unwrap();
    }

    scene.dispatch_pointer(PointerEvent::moved(50.0, 50.0));
    scene.dispatch_pointer(PointerEvent::moved(55.0, 50.0));
    scene.dispatch_pointer(PointerEvent::moved(150.0, 50.0));
    scene.dispatch_pointer(PointerEvent::moved(160.0, 50.0));

    assert_eq!(
        *kinds.borrow(),
        vec![
            EventKind::MouseEnter,
            EventKind::MouseMove,
            EventKind::MouseMove,
            EventKind::MouseLeave,
        ]
    );
}

#[test]
fn test_scene_events_target_topmost_shape() {
    let (mut scene, _log, _clock) = scene();
    let below = scene.circle(50.0, 50.0, 20.0, ShapeOptions::default()).unwrap();
    let above = scene.circle(55.0, 50.0, 20.0, ShapeOptions::default()).unwrap();

    let seen = recorded();
    for kind in [EventKind::DragStart, EventKind::MouseDown] {
        let sink = seen.clone();
        scene.subscribe(kind, move |_, event| {
            sink.borrow_mut().push((event.kind, event.target));
        });
    }

    scene.dispatch_pointer(PointerEvent::down(52.0, 50.0));
    assert_eq!(
        *seen.borrow(),
        vec![
            (EventKind::DragStart, Some(above)),
            (EventKind::MouseDown, Some(above)),
        ]
    );

    seen.borrow_mut().clear();
    scene.set_attr(above, Attr::Ignored(true)).unwrap();
    scene.dispatch_pointer(PointerEvent::down(52.0, 50.0));
    assert_eq!(seen.borrow()[1], (EventKind::MouseDown, Some(below)));

    seen.borrow_mut().clear();
    scene.dispatch_pointer(PointerEvent::down(300.0, 300.0));
    assert_eq!(seen.borrow()[1], (EventKind::MouseDown, None));
}

#[test]
fn test_scene_drag_kinds_follow_button_state() {
    let (mut scene, _log, _clock) = scene();
    let seen = recorded();
    for kind in [EventKind::Drag, EventKind::DragEnd, EventKind::MouseUp] {
        let sink = seen.clone();
        scene.subscribe(kind, move |_, event| sink.borrow_mut().push(event.kind));
    }

    scene.dispatch_pointer(PointerEvent::moved(10.0, 10.0));
    scene.dispatch_pointer(PointerEvent::up(10.0, 10.0));
    assert_eq!(*seen.borrow(), vec![EventKind::MouseUp]);

    seen.borrow_mut().clear();
    scene.dispatch_pointer(PointerEvent::down(10.0, 10.0));
    scene.dispatch_pointer(PointerEvent::moved(12.0, 10.0));
    scene.dispatch_pointer(PointerEvent::up(12.0, 10.0));
    assert_eq!(
        *seen.borrow(),
        vec![EventKind::Drag, EventKind::DragEnd, EventKind::MouseUp]
    );
}

#[test]
fn test_off_and_unsubscribe() {
    let (mut scene, _log, _clock) = scene();
    let id = scene.circle(50.0, 50.0, 20.0, ShapeOptions::default()).unwrap();
    let seen = recorded();

    let sink = seen.clone();
    let handler = scene
        .on(id, EventKind::Click, move |_, event| sink.borrow_mut().push(event.kind))
        .unwrap();
    let sink = seen.clone();
    let subscription = scene.subscribe(EventKind::Click, move |_, event| {
        sink.borrow_mut().push(event.kind)
    });

    scene.dispatch_pointer(PointerEvent::click(50.0, 50.0));
    assert_eq!(seen.borrow().len(), 2);

    assert!(scene.off(id, handler));
    assert!(!scene.off(id, handler));
    assert!(scene.unsubscribe(subscription));
    assert!(!scene.unsubscribe(subscription));

    scene.dispatch_pointer(PointerEvent::click(50.0, 50.0));
    assert_eq!(seen.borrow().len(), 2);
}

#[test]
fn test_handler_may_destroy_later_shape() {
    let (mut scene, _log, _clock) = scene();
    let a = scene.circle(50.0, 50.0, 20.0, ShapeOptions::default()).unwrap();
    let b = scene.circle(55.0, 50.0, 20.0, ShapeOptions::default()).unwrap();

    scene
        .on(a, EventKind::Click, move |scene, _| {
            scene.destroy(b);
        })
        .unwrap();
    let seen = recorded();
    let sink = seen.clone();
    scene
        .on(b, EventKind::Click, move |_, event| sink.borrow_mut().push(event.kind))
        .unwrap();

    scene.dispatch_pointer(PointerEvent::click(52.0, 50.0));
    assert!(!scene.contains(b));
    assert!(seen.borrow().is_empty());
    assert_eq!(scene.order(), &[a]);
}

#[test]
fn test_hidden_shapes_receive_nothing() {
    let (mut scene, _log, _clock) = scene();
    let id = scene.circle(50.0, 50.0, 20.0, ShapeOptions::default()).unwrap();
    scene.set_attr(id, Attr::Visible(false)).unwrap();
    let seen = recorded();
    let sink = seen.clone();
    scene
        .on(id, EventKind::Click, move |_, event| sink.borrow_mut().push(event.kind))
        .unwrap();

    scene.dispatch_pointer(PointerEvent::click(50.0, 50.0));
    assert!(seen.borrow().is_empty());
    assert_eq!(scene.hit_test(Point::new(50.0, 50.0)), None);
}

#[test]
fn test_pointer_position_uses_surface_origin() {
    let surface = RecordingSurface::new(100, 100).with_origin(Point::new(10.0, 20.0));
    let scene = Scene::with_options(
        Some(Box::new(surface)),
        SceneConfig::default(),
        Box::new(ManualClock::new()),
    );
    assert_eq!(
        scene.pointer_position(Point::new(15.0, 25.0)),
        Point::new(5.0, 5.0)
    );
}
