use radial_core::{AttrKey, Color, Error, Point, Rect, ShapeError, ShapeId, ShapeKind};
use radial_scene::model::MAX_SIDES;
use radial_scene::{Attr, ShapeOptions};

use crate::support::scene;

#[test]
fn test_get_and_set_radius() {
    let (mut scene, _log, _clock) = scene();
    let id = scene.circle(50.0, 50.0, 20.0, ShapeOptions::default()).unwrap();

    assert_eq!(scene.get_attr(id, AttrKey::Radius).unwrap(), Attr::Radius(20.0));
    assert!(scene.set_attr(id, Attr::Radius(30.0)).unwrap());
    assert_eq!(scene.get_attr(id, AttrKey::Radius).unwrap(), Attr::Radius(30.0));
    assert!(scene.shape(id).unwrap().is_dirty());
    assert_eq!(scene.pending_frames(), 1);
}

#[test]
fn test_unchanged_value_schedules_nothing() {
    let (mut scene, _log, _clock) = scene();
    let id = scene.rect(0.0, 0.0, 10.0, 10.0, ShapeOptions::default()).unwrap();

    assert!(!scene.set_attr(id, Attr::Width(10.0)).unwrap());
    assert!(!scene.shape(id).unwrap().is_dirty());
    assert_eq!(scene.pending_frames(), 0);
}

#[test]
fn test_inapplicable_key_is_rejected() {
    let (mut scene, _log, _clock) = scene();
    let id = scene.rect(0.0, 0.0, 10.0, 10.0, ShapeOptions::default()).unwrap();

    let err = scene.get_attr(id, AttrKey::Radius).unwrap_err();
    assert!(err.is_shape_error());

    let err = scene.set_attr(id, Attr::Sides(5)).unwrap_err();
    assert!(matches!(
        err,
        Error::Shape(ShapeError::AttrNotApplicable {
            kind: ShapeKind::Rect,
            key: AttrKey::Sides
        })
    ));
}

#[test]
fn test_invalid_dimensions_leave_shape_untouched() {
    let (mut scene, _log, _clock) = scene();
    let id = scene.rect(0.0, 0.0, 10.0, 10.0, ShapeOptions::default()).unwrap();

    assert!(scene.set_attr(id, Attr::Width(-1.0)).is_err());
    assert!(scene.set_attr(id, Attr::Height(f64::NAN)).is_err());
    assert_eq!(scene.bounding_box(id).unwrap().outline(), Rect::new(0.0, 0.0, 10.0, 10.0));

    assert!(scene.circle(0.0, 0.0, -5.0, ShapeOptions::default()).is_err());
}

#[test]
fn test_polygon_sides() {
    let (mut scene, _log, _clock) = scene();
    let id = scene.polygon(50.0, 50.0, 10.0, 2, ShapeOptions::default()).unwrap();
    assert_eq!(scene.get_attr(id, AttrKey::Sides).unwrap(), Attr::Sides(3));

    let err = scene.set_attr(id, Attr::Sides(2)).unwrap_err();
    assert!(matches!(err, Error::Shape(ShapeError::TooFewSides { sides: 2 })));
    assert!(scene.set_attr(id, Attr::Sides(6)).unwrap());
}

#[test]
fn test_polygon_side_count_is_capped() {
    let (mut scene, _log, _clock) = scene();
    let id = scene.polygon(100.0, 100.0, 30.0, u32::MAX, ShapeOptions::default()).unwrap();
    assert_eq!(scene.get_attr(id, AttrKey::Sides).unwrap(), Attr::Sides(MAX_SIDES));

    let err = scene.set_attr(id, Attr::Sides(u32::MAX)).unwrap_err();
    assert!(matches!(err, Error::Shape(ShapeError::TooManySides { .. })));
    assert_eq!(scene.get_attr(id, AttrKey::Sides).unwrap(), Attr::Sides(MAX_SIDES));
}

#[test]
fn test_non_finite_position_is_rejected() {
    let (mut scene, _log, _clock) = scene();
    let id = scene.circle(50.0, 50.0, 20.0, ShapeOptions::default()).unwrap();

    let err = scene.set_attr(id, Attr::X(f64::NAN)).unwrap_err();
    assert!(matches!(err, Error::Shape(ShapeError::NotFinite { key: AttrKey::X, .. })));
    assert_eq!(scene.shape(id).unwrap().position(), Point::new(50.0, 50.0));
    assert_eq!(scene.pending_frames(), 0);

    assert!(scene.set_attr(id, Attr::Rotation(f64::INFINITY)).is_err());
    assert!(scene
        .set_attr(id, Attr::Scale(f64::NAN, 1.0))
        .unwrap_err()
        .is_shape_error());
    assert!(scene
        .circle(f64::NAN, 0.0, 5.0, ShapeOptions::default())
        .unwrap_err()
        .is_shape_error());
    assert_eq!(scene.len(), 1);
}

#[test]
fn test_set_attrs_requests_one_redraw() {
    let (mut scene, _log, _clock) = scene();
    let id = scene.circle(50.0, 50.0, 20.0, ShapeOptions::default()).unwrap();

    let changed = scene
        .set_attrs(id, [Attr::X(60.0), Attr::Y(70.0), Attr::Fill(Color::RED)])
        .unwrap();
    assert!(changed);
    assert_eq!(scene.pending_frames(), 1);
    assert_eq!(scene.shape(id).unwrap().position(), Point::new(60.0, 70.0));
}

#[test]
fn test_set_attrs_keeps_changes_before_error() {
    let (mut scene, _log, _clock) = scene();
    let id = scene.circle(50.0, 50.0, 20.0, ShapeOptions::default()).unwrap();

    let result = scene.set_attrs(id, [Attr::X(10.0), Attr::Width(5.0), Attr::Y(10.0)]);
    assert!(result.is_err());
    assert_eq!(scene.shape(id).unwrap().position(), Point::new(10.0, 50.0));
    assert_eq!(scene.pending_frames(), 1);
}

#[test]
fn test_opacity_is_clamped() {
    let (mut scene, _log, _clock) = scene();
    let id = scene.circle(50.0, 50.0, 20.0, ShapeOptions::default()).unwrap();

    scene.set_attr(id, Attr::Opacity(3.0)).unwrap();
    assert_eq!(scene.get_attr(id, AttrKey::Opacity).unwrap(), Attr::Opacity(1.0));
    scene.set_attr(id, Attr::Opacity(-1.0)).unwrap();
    assert_eq!(scene.get_attr(id, AttrKey::Opacity).unwrap(), Attr::Opacity(0.0));
}

#[test]
fn test_bounding_rect_includes_border_and_rotation() {
    let (mut scene, _log, _clock) = scene();
    let id = scene
        .rect(0.0, 0.0, 20.0, 10.0, ShapeOptions::default().with_border(2.0, Color::RED))
        .unwrap();
    assert_eq!(scene.bounding_rect(id).unwrap(), Rect::new(-1.0, -1.0, 22.0, 12.0));

    scene.set_attr(id, Attr::Rotation(90.0)).unwrap();
    let rotated = scene.bounding_rect(id).unwrap();
    assert!((rotated.width - 12.0).abs() < 1e-9);
    assert!((rotated.height - 22.0).abs() < 1e-9);
    assert!(rotated.center().distance_to(&Point::new(10.0, 5.0)) < 1e-9);
}

#[test]
fn test_unknown_shape() {
    let (mut scene, _log, _clock) = scene();
    let missing = ShapeId(42);

    assert!(scene.get_attr(missing, AttrKey::X).unwrap_err().is_unknown_shape());
    assert!(scene.set_attr(missing, Attr::X(1.0)).unwrap_err().is_unknown_shape());
    assert!(scene.bounding_box(missing).unwrap_err().is_unknown_shape());
}
