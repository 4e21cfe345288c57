use radial_core::{AttrKey, Error, Point, Rect, SceneError, ShapeId};
use radial_scene::{
    AnchorPosition, Attr, EventKind, PointerEvent, ResizeEvent, ResizeHandle, Scene,
    ShapeOptions, SidePosition, Transformer, TransformerConfig,
};

use crate::support::{recorded, scene};

fn position(scene: &Scene, id: ShapeId) -> Point {
    scene.shape(id).unwrap().position()
}

fn attached(scene: &mut Scene, config: TransformerConfig) -> (Transformer, ShapeId) {
    let target = scene
        .rect(10.0, 10.0, 100.0, 50.0, ShapeOptions::default().draggable())
        .unwrap();
    let transformer = Transformer::new(config);
    transformer.attach(scene, &[target]).unwrap();
    (transformer, target)
}

#[test]
fn test_attach_builds_overlay() {
    let (mut scene, _log, _clock) = scene();
    let (transformer, target) = attached(&mut scene, TransformerConfig::default());

    assert!(transformer.is_attached());
    assert_eq!(transformer.nodes(), vec![target]);
    assert_eq!(transformer.bounds(), Some(Rect::new(5.0, 5.0, 110.0, 60.0)));

    let border = transformer.border().unwrap();
    assert_eq!(scene.get_attr(border, AttrKey::Width).unwrap(), Attr::Width(110.0));
    assert_eq!(scene.get_attr(border, AttrKey::Ignored).unwrap(), Attr::Ignored(true));

    assert_eq!(transformer.anchors().len(), 4);
    let br = transformer.anchor(AnchorPosition::BottomRight).unwrap();
    assert_eq!(position(&scene, br), Point::new(115.0, 65.0));
    assert_eq!(scene.get_attr(br, AttrKey::Radius).unwrap(), Attr::Radius(5.0));

    assert_eq!(
        scene.get_attr(target, AttrKey::Draggable).unwrap(),
        Attr::Draggable(false)
    );
    // The overlay never becomes the scene-level target.
    assert_eq!(scene.hit_test(Point::new(115.0, 65.0)), None);
}

#[test]
fn test_attach_spans_all_targets() {
    let (mut scene, _log, _clock) = scene();
    let a = scene.rect(10.0, 10.0, 20.0, 20.0, ShapeOptions::default()).unwrap();
    let b = scene.circle(100.0, 100.0, 10.0, ShapeOptions::default()).unwrap();
    let config = TransformerConfig {
        padding: radial_core::Padding::uniform(0.0),
        ..TransformerConfig::default()
    };
    let transformer = Transformer::new(config);
    transformer.attach(&mut scene, &[a, b]).unwrap();
    assert_eq!(transformer.bounds(), Some(Rect::new(10.0, 10.0, 100.0, 100.0)));
}

#[test]
fn test_attach_rejects_bad_selection() {
    let (mut scene, _log, _clock) = scene();
    let transformer = Transformer::default();

    let err = transformer.attach(&mut scene, &[]).unwrap_err();
    assert!(matches!(err, Error::Scene(SceneError::Transformer { .. })));

    let err = transformer.attach(&mut scene, &[ShapeId(99)]).unwrap_err();
    assert!(err.is_unknown_shape());
    assert!(!transformer.is_attached());
    assert!(scene.is_empty());
}

#[test]
fn test_detach_restores_targets() {
    let (mut scene, _log, _clock) = scene();
    let (transformer, target) = attached(&mut scene, TransformerConfig::default());
    let border = transformer.border().unwrap();
    let anchors = transformer.anchors();

    assert!(transformer.detach(&mut scene));
    assert!(!transformer.detach(&mut scene));
    assert!(!scene.contains(border));
    assert!(anchors.iter().all(|(_, id)| !scene.contains(*id)));
    assert_eq!(
        scene.get_attr(target, AttrKey::Draggable).unwrap(),
        Attr::Draggable(true)
    );
    assert_eq!(transformer.bounds(), None);
    assert_eq!(scene.order(), &[target]);
}

#[test]
fn test_reattach_replaces_selection() {
    let (mut scene, _log, _clock) = scene();
    let (transformer, first) = attached(&mut scene, TransformerConfig::default());
    let old_border = transformer.border().unwrap();
    let second = scene.circle(200.0, 200.0, 10.0, ShapeOptions::default()).unwrap();

    transformer.attach(&mut scene, &[second]).unwrap();
    assert!(!scene.contains(old_border));
    assert_eq!(transformer.nodes(), vec![second]);
    assert_eq!(
        scene.get_attr(first, AttrKey::Draggable).unwrap(),
        Attr::Draggable(true)
    );
    assert_eq!(transformer.bounds(), Some(Rect::new(185.0, 185.0, 30.0, 30.0)));
}

#[test]
fn test_enabled_anchors_only() {
    let (mut scene, _log, _clock) = scene();
    let config = TransformerConfig {
        anchors_enabled: vec![AnchorPosition::BottomRight, AnchorPosition::BottomRight],
        ..TransformerConfig::default()
    };
    let (transformer, _) = attached(&mut scene, config);
    let anchors = transformer.anchors();
    assert_eq!(anchors.len(), 1);
    assert_eq!(anchors[0].0, AnchorPosition::BottomRight);
    assert!(transformer.anchor(AnchorPosition::TopLeft).is_none());
}

#[test]
fn test_dragging_border_moves_targets() {
    let (mut scene, _log, _clock) = scene();
    let (transformer, target) = attached(&mut scene, TransformerConfig::default());
    let border = transformer.border().unwrap();

    scene.dispatch_pointer(PointerEvent::down(60.0, 35.0));
    assert!(scene.is_dragging(border));
    assert!(!scene.is_dragging(target));

    scene.dispatch_pointer(PointerEvent::moved(80.0, 45.0));
    assert_eq!(position(&scene, target), Point::new(30.0, 20.0));
    let tl = transformer.anchor(AnchorPosition::TopLeft).unwrap();
    assert_eq!(position(&scene, tl), Point::new(25.0, 15.0));

    scene.dispatch_pointer(PointerEvent::up(80.0, 45.0));
    assert_eq!(transformer.bounds(), Some(Rect::new(25.0, 15.0, 110.0, 60.0)));
    assert_eq!(position(&scene, border), Point::new(25.0, 15.0));
}

#[test]
fn test_dragging_anchor_resizes_selection() {
    let (mut scene, _log, _clock) = scene();
    let (transformer, target) = attached(&mut scene, TransformerConfig::default());
    let border = transformer.border().unwrap();

    let resizes = recorded::<ResizeEvent>();
    let sink = resizes.clone();
    transformer.on_resize(move |_, event| sink.borrow_mut().push(event.clone()));

    scene.dispatch_pointer(PointerEvent::down(115.0, 65.0));
    assert!(!scene.is_dragging(border));
    for side in [SidePosition::Right, SidePosition::Bottom] {
        assert!(!scene.is_dragging(transformer.side(side).unwrap()));
    }
    scene.dispatch_pointer(PointerEvent::moved(135.0, 75.0));

    assert_eq!(
        *resizes.borrow(),
        vec![ResizeEvent {
            handle: ResizeHandle::Anchor(AnchorPosition::BottomRight),
            previous: Rect::new(5.0, 5.0, 110.0, 60.0),
            current: Rect::new(5.0, 5.0, 130.0, 70.0),
            targets: vec![target],
        }]
    );
    assert_eq!(scene.get_attr(border, AttrKey::Width).unwrap(), Attr::Width(130.0));
    assert_eq!(scene.get_attr(border, AttrKey::Height).unwrap(), Attr::Height(70.0));
    assert_eq!(position(&scene, border), Point::new(5.0, 5.0));
    assert_eq!(position(&scene, target), Point::new(10.0, 10.0));

    let tr = transformer.anchor(AnchorPosition::TopRight).unwrap();
    assert_eq!(position(&scene, tr), Point::new(135.0, 5.0));

    scene.dispatch_pointer(PointerEvent::up(135.0, 75.0));
    let br = transformer.anchor(AnchorPosition::BottomRight).unwrap();
    assert_eq!(position(&scene, br), Point::new(135.0, 75.0));
}

#[test]
fn test_resize_respects_min_size() {
    let (mut scene, _log, _clock) = scene();
    let config = TransformerConfig {
        min_size: Some(20.0),
        ..TransformerConfig::default()
    };
    let (transformer, _) = attached(&mut scene, config);

    scene.dispatch_pointer(PointerEvent::down(115.0, 65.0));
    scene.dispatch_pointer(PointerEvent::moved(-100.0, -100.0));
    assert_eq!(transformer.bounds(), Some(Rect::new(5.0, 5.0, 20.0, 20.0)));
}

#[test]
fn test_off_resize() {
    let (mut scene, _log, _clock) = scene();
    let (transformer, _) = attached(&mut scene, TransformerConfig::default());
    let resizes = recorded::<ResizeEvent>();
    let sink = resizes.clone();
    let handler = transformer.on_resize(move |_, event| sink.borrow_mut().push(event.clone()));

    assert!(transformer.off_resize(handler));
    assert!(!transformer.off_resize(handler));

    scene.dispatch_pointer(PointerEvent::down(115.0, 65.0));
    scene.dispatch_pointer(PointerEvent::moved(125.0, 70.0));
    assert!(resizes.borrow().is_empty());
    assert_eq!(transformer.bounds(), Some(Rect::new(5.0, 5.0, 120.0, 65.0)));
}

#[test]
fn test_resize_handler_can_resize_targets() {
    let (mut scene, _log, _clock) = scene();
    let (transformer, target) = attached(&mut scene, TransformerConfig::default());
    let padding = transformer.config().padding;

    transformer.on_resize(move |scene, event| {
        for id in &event.targets {
            let width = event.current.width - padding.width();
            scene.set_attr(*id, Attr::Width(width)).unwrap();
        }
    });

    scene.dispatch_pointer(PointerEvent::down(115.0, 65.0));
    scene.dispatch_pointer(PointerEvent::moved(145.0, 65.0));
    assert_eq!(scene.get_attr(target, AttrKey::Width).unwrap(), Attr::Width(130.0));
}

#[test]
fn test_update_follows_target_geometry() {
    let (mut scene, _log, _clock) = scene();
    let (transformer, target) = attached(&mut scene, TransformerConfig::default());

    scene.set_attr(target, Attr::Width(200.0)).unwrap();
    transformer.update(&mut scene).unwrap();
    assert_eq!(transformer.bounds(), Some(Rect::new(5.0, 5.0, 210.0, 60.0)));
    let tr = transformer.anchor(AnchorPosition::TopRight).unwrap();
    assert_eq!(position(&scene, tr), Point::new(215.0, 5.0));
}

#[test]
fn test_attach_builds_side_bars() {
    let (mut scene, _log, _clock) = scene();
    let (transformer, _) = attached(&mut scene, TransformerConfig::default());

    assert_eq!(transformer.sides().len(), 4);
    let right = transformer.side(SidePosition::Right).unwrap();
    assert_eq!(position(&scene, right), Point::new(109.0, 5.0));
    assert_eq!(scene.get_attr(right, AttrKey::Width).unwrap(), Attr::Width(12.0));
    assert_eq!(scene.get_attr(right, AttrKey::Height).unwrap(), Attr::Height(60.0));
    assert_eq!(scene.get_attr(right, AttrKey::Ignored).unwrap(), Attr::Ignored(true));
    let top = transformer.side(SidePosition::Top).unwrap();
    assert_eq!(position(&scene, top), Point::new(5.0, -1.0));
}

#[test]
fn test_dragging_side_resizes_one_axis() {
    let (mut scene, _log, _clock) = scene();
    let (transformer, target) = attached(&mut scene, TransformerConfig::default());
    let border = transformer.border().unwrap();
    let right = transformer.side(SidePosition::Right).unwrap();

    let resizes = recorded::<ResizeEvent>();
    let sink = resizes.clone();
    transformer.on_resize(move |_, event| sink.borrow_mut().push(event.clone()));

    scene.dispatch_pointer(PointerEvent::down(115.0, 35.0));
    assert!(scene.is_dragging(right));
    assert!(!scene.is_dragging(border));
    scene.dispatch_pointer(PointerEvent::moved(135.0, 50.0));

    assert_eq!(
        *resizes.borrow(),
        vec![ResizeEvent {
            handle: ResizeHandle::Side(SidePosition::Right),
            previous: Rect::new(5.0, 5.0, 110.0, 60.0),
            current: Rect::new(5.0, 5.0, 130.0, 60.0),
            targets: vec![target],
        }]
    );
    assert_eq!(scene.get_attr(border, AttrKey::Height).unwrap(), Attr::Height(60.0));
    // The bar stays on its edge instead of following the pointer down.
    assert_eq!(position(&scene, right), Point::new(129.0, 5.0));
    let br = transformer.anchor(AnchorPosition::BottomRight).unwrap();
    assert_eq!(position(&scene, br), Point::new(135.0, 65.0));

    scene.dispatch_pointer(PointerEvent::up(135.0, 50.0));
    assert_eq!(transformer.bounds(), Some(Rect::new(5.0, 5.0, 130.0, 60.0)));
}

#[test]
fn test_sides_can_be_disabled() {
    let (mut scene, _log, _clock) = scene();
    let config = TransformerConfig {
        sides_enabled: Vec::new(),
        ..TransformerConfig::default()
    };
    let (transformer, _) = attached(&mut scene, config);
    assert!(transformer.sides().is_empty());
    assert!(transformer.side(SidePosition::Left).is_none());
    // Target, border and four anchors.
    assert_eq!(scene.len(), 6);

    // Without a bar the edge press falls through to the border.
    scene.dispatch_pointer(PointerEvent::down(115.0, 35.0));
    assert!(scene.is_dragging(transformer.border().unwrap()));
}

#[test]
fn test_select_from_press_does_not_drag_target() {
    let (mut scene, _log, _clock) = scene();
    let target = scene
        .rect(10.0, 10.0, 50.0, 50.0, ShapeOptions::default().draggable())
        .unwrap();
    let transformer = Transformer::default();
    let selection = transformer.clone();
    scene
        .on(target, EventKind::MouseDown, move |scene, _| {
            selection.attach(scene, &[target]).unwrap();
        })
        .unwrap();

    scene.dispatch_pointer(PointerEvent::down(20.0, 20.0));
    assert!(transformer.is_attached());
    assert!(!scene.is_dragging(target));

    scene.dispatch_pointer(PointerEvent::moved(120.0, 20.0));
    assert_eq!(position(&scene, target), Point::new(10.0, 10.0));
    let border = transformer.border().unwrap();
    assert_eq!(position(&scene, border), Point::new(5.0, 5.0));
    assert_eq!(transformer.bounds(), Some(Rect::new(5.0, 5.0, 60.0, 60.0)));

    scene.dispatch_pointer(PointerEvent::up(120.0, 20.0));
    assert_eq!(position(&scene, target), Point::new(10.0, 10.0));
}
