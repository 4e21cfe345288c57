use radial_scene::{Attr, EventData, EventKind, ShapeOptions};

use crate::support::{recorded, scene};

#[test]
fn test_overlapping_shapes_collide() {
    let (mut scene, _log, _clock) = scene();
    let a = scene.circle(50.0, 50.0, 20.0, ShapeOptions::default().collision()).unwrap();
    let b = scene.circle(80.0, 50.0, 20.0, ShapeOptions::default().collision()).unwrap();

    let seen = recorded();
    for kind in [EventKind::Collision, EventKind::CollisionEnd] {
        let sink = seen.clone();
        scene
            .on(a, kind, move |_, event| {
                sink.borrow_mut().push((event.kind, event.collisions().to_vec()));
            })
            .unwrap();
    }

    scene.redraw();
    assert_eq!(*seen.borrow(), vec![(EventKind::Collision, vec![b])]);
    assert!(scene.shape(a).unwrap().collision_state().is_colliding);
    assert_eq!(scene.shape(b).unwrap().collision_state().current_collisions.as_slice(), &[a]);

    seen.borrow_mut().clear();
    scene.set_attr(b, Attr::X(300.0)).unwrap();
    scene.run_frame();
    assert_eq!(*seen.borrow(), vec![(EventKind::CollisionEnd, vec![])]);
    assert!(!scene.shape(a).unwrap().collision_state().is_colliding);

    seen.borrow_mut().clear();
    scene.redraw();
    assert!(seen.borrow().is_empty());
}

#[test]
fn test_collision_events_need_the_flag() {
    let (mut scene, _log, _clock) = scene();
    let a = scene.circle(50.0, 50.0, 20.0, ShapeOptions::default().collision()).unwrap();
    let b = scene.rect(60.0, 40.0, 30.0, 30.0, ShapeOptions::default()).unwrap();

    let on_b = recorded();
    let sink = on_b.clone();
    scene
        .on(b, EventKind::Collision, move |_, event| sink.borrow_mut().push(event.kind))
        .unwrap();

    scene.redraw();
    assert!(on_b.borrow().is_empty());
    // The sweep still records the overlap on both sides.
    assert!(scene.shape(b).unwrap().collision_state().is_colliding);
    assert!(scene.shape(a).unwrap().collision_state().is_colliding);
}

#[test]
fn test_ignored_shapes_never_collide() {
    let (mut scene, _log, _clock) = scene();
    let a = scene.circle(50.0, 50.0, 20.0, ShapeOptions::default().collision()).unwrap();
    let ghost = scene
        .circle(55.0, 50.0, 20.0, ShapeOptions::default().collision().ignored())
        .unwrap();

    scene.redraw();
    assert!(!scene.shape(a).unwrap().collision_state().is_colliding);
    assert!(!scene.shape(ghost).unwrap().collision_state().is_colliding);
}

#[test]
fn test_border_extends_collision_body() {
    let (mut scene, _log, _clock) = scene();
    let a = scene.circle(0.0, 50.0, 10.0, ShapeOptions::default()).unwrap();
    let b = scene.circle(22.0, 50.0, 10.0, ShapeOptions::default()).unwrap();

    scene.redraw();
    assert!(!scene.shape(a).unwrap().collision_state().is_colliding);

    scene
        .set_attr(b, Attr::Border(Some(radial_scene::Border::new(6.0, radial_core::Color::RED))))
        .unwrap();
    scene.redraw();
    assert!(scene.shape(a).unwrap().collision_state().is_colliding);
}

#[test]
fn test_closest_reports_nearest_neighbour() {
    let (mut scene, _log, _clock) = scene();
    let a = scene.circle(0.0, 0.0, 5.0, ShapeOptions::default().closest(100.0)).unwrap();
    let near = scene.circle(30.0, 40.0, 5.0, ShapeOptions::default()).unwrap();
    scene.circle(150.0, 150.0, 5.0, ShapeOptions::default()).unwrap();

    let seen = recorded();
    let sink = seen.clone();
    scene
        .on(a, EventKind::Closest, move |_, event| {
            if let EventData::Closest { closest, distance } = event.data {
                sink.borrow_mut().push((closest, distance));
            }
        })
        .unwrap();

    scene.redraw();
    assert_eq!(*seen.borrow(), vec![(near, 50.0)]);
}

#[test]
fn test_destroy_drops_id_from_collision_sets() {
    let (mut scene, _log, _clock) = scene();
    let a = scene.circle(50.0, 50.0, 20.0, ShapeOptions::default()).unwrap();
    let b = scene.circle(60.0, 50.0, 20.0, ShapeOptions::default()).unwrap();
    let c = scene.circle(40.0, 50.0, 20.0, ShapeOptions::default()).unwrap();

    scene.redraw();
    assert_eq!(scene.shape(a).unwrap().collision_state().current_collisions.len(), 2);

    scene.destroy(b);
    let state = scene.shape(a).unwrap().collision_state();
    assert!(!state.current_collisions.contains(&b));
    assert!(state.current_collisions.contains(&c));
}

#[test]
fn test_rejected_nan_position_keeps_sweep_running() {
    let (mut scene, _log, _clock) = scene();
    let circle = scene.circle(50.0, 50.0, 20.0, ShapeOptions::default().collision()).unwrap();
    let rect = scene
        .rect(60.0, 40.0, 40.0, 40.0, ShapeOptions::default().collision())
        .unwrap();

    assert!(scene.set_attr(rect, Attr::X(f64::NAN)).is_err());
    assert!(scene.set_attr(rect, Attr::X(65.0)).unwrap());
    scene.run_frame();

    let state = scene.shape(circle).unwrap().collision_state();
    assert!(state.is_colliding);
    assert_eq!(state.current_collisions.as_slice(), &[rect]);
}
