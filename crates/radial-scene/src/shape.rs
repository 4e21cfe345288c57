//! The shared shape record.
//!
//! A [`Shape`] is a position, a variant geometry and a set of style and
//! interaction options. Every successful attribute change marks it dirty;
//! only a render clears the flag again.

use radial_core::geometry::{rotated_extent, shadow_padding};
use radial_core::{
    AttrKey, BoundingBox, Color, CollisionBody, Point, Rect, SceneId, ShapeError, ShapeId,
    ShapeKind,
};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::attrs::{Attr, Border, Gradient, Shadow};
use crate::hit_test::is_point_in_shape;
use crate::model::{ShapeGeometry, ShapeModel};

/// Style, transform and interaction options common to all variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeOptions {
    pub fill: Color,
    pub border: Option<Border>,
    pub shadow: Option<Shadow>,
    pub gradient: Option<Gradient>,
    pub opacity: f64,
    /// Degrees.
    pub rotation: f64,
    pub scale: (f64, f64),
    pub visible: bool,
    pub draggable: bool,
    /// Ignored shapes take no part in collisions or scene-level targeting.
    pub ignored: bool,
    /// Emit collision events for this shape.
    pub collision: bool,
    /// Emit `Closest` when another shape is within this distance.
    pub closest: Option<f64>,
}

impl Default for ShapeOptions {
    fn default() -> Self {
        Self {
            fill: Color::BLACK,
            border: None,
            shadow: None,
            gradient: None,
            opacity: 1.0,
            rotation: 0.0,
            scale: (1.0, 1.0),
            visible: true,
            draggable: false,
            ignored: false,
            collision: false,
            closest: None,
        }
    }
}

impl ShapeOptions {
    pub fn filled(fill: Color) -> Self {
        Self {
            fill,
            ..Self::default()
        }
    }

    pub fn with_border(mut self, width: f64, color: Color) -> Self {
        self.border = Some(Border::new(width, color));
        self
    }

    pub fn with_shadow(mut self, shadow: Shadow) -> Self {
        self.shadow = Some(shadow);
        self
    }

    pub fn with_gradient(mut self, gradient: Gradient) -> Self {
        self.gradient = Some(gradient);
        self
    }

    pub fn draggable(mut self) -> Self {
        self.draggable = true;
        self
    }

    pub fn ignored(mut self) -> Self {
        self.ignored = true;
        self
    }

    pub fn collision(mut self) -> Self {
        self.collision = true;
        self
    }

    pub fn closest(mut self, threshold: f64) -> Self {
        self.closest = Some(threshold);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn has_transform(&self) -> bool {
        self.rotation != 0.0 || self.scale != (1.0, 1.0)
    }

    pub fn border_width(&self) -> f64 {
        self.border.map(|b| b.width.max(0.0)).unwrap_or(0.0)
    }
}

/// Result of the most recent collision sweep.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionState {
    pub is_colliding: bool,
    pub previous_collision: bool,
    pub current_collisions: SmallVec<[ShapeId; 4]>,
}

impl CollisionState {
    /// Collided in the previous sweep and not in this one.
    pub fn ended(&self) -> bool {
        self.previous_collision && !self.is_colliding
    }
}

#[derive(Debug, Clone)]
pub struct Shape {
    id: ShapeId,
    scene: SceneId,
    position: Point,
    geometry: ShapeGeometry,
    options: ShapeOptions,
    dirty: bool,
    collision: CollisionState,
}

impl Shape {
    pub fn new(
        id: ShapeId,
        scene: SceneId,
        position: Point,
        geometry: ShapeGeometry,
        options: ShapeOptions,
    ) -> Self {
        Self {
            id,
            scene,
            position,
            geometry,
            options: ShapeOptions {
                opacity: options.opacity.clamp(0.0, 1.0),
                ..options
            },
            dirty: true,
            collision: CollisionState::default(),
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn scene(&self) -> SceneId {
        self.scene
    }

    pub fn kind(&self) -> ShapeKind {
        self.geometry.kind()
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn geometry(&self) -> &ShapeGeometry {
        &self.geometry
    }

    pub fn options(&self) -> &ShapeOptions {
        &self.options
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_visible(&self) -> bool {
        self.options.visible
    }

    pub fn is_ignored(&self) -> bool {
        self.options.ignored
    }

    pub fn collision_state(&self) -> &CollisionState {
        &self.collision
    }

    pub(crate) fn collision_state_mut(&mut self) -> &mut CollisionState {
        &mut self.collision
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Reads an attribute. Keys the variant does not carry return `None`.
    pub fn attr(&self, key: AttrKey) -> Option<Attr> {
        let o = &self.options;
        let value = match key {
            AttrKey::X => Attr::X(self.position.x),
            AttrKey::Y => Attr::Y(self.position.y),
            AttrKey::Fill => Attr::Fill(o.fill),
            AttrKey::Border => Attr::Border(o.border),
            AttrKey::Shadow => Attr::Shadow(o.shadow),
            AttrKey::Gradient => Attr::Gradient(o.gradient),
            AttrKey::Opacity => Attr::Opacity(o.opacity),
            AttrKey::Rotation => Attr::Rotation(o.rotation),
            AttrKey::Scale => Attr::Scale(o.scale.0, o.scale.1),
            AttrKey::Visible => Attr::Visible(o.visible),
            AttrKey::Draggable => Attr::Draggable(o.draggable),
            AttrKey::Ignored => Attr::Ignored(o.ignored),
            AttrKey::Collision => Attr::Collision(o.collision),
            AttrKey::Closest => Attr::Closest(o.closest),
            geometry_key => return self.geometry.attr(geometry_key),
        };
        Some(value)
    }

    /// Applies one attribute. Returns `Ok(false)` without touching the dirty
    /// flag when the value is unchanged.
    pub fn apply_attr(&mut self, attr: Attr) -> Result<bool, ShapeError> {
        use crate::model::{finite, replace};

        let o = &mut self.options;
        let changed = match attr {
            Attr::X(x) => replace(&mut self.position.x, finite(AttrKey::X, x)?),
            Attr::Y(y) => replace(&mut self.position.y, finite(AttrKey::Y, y)?),
            Attr::Fill(c) => replace(&mut o.fill, c),
            Attr::Border(b) => replace(&mut o.border, b),
            Attr::Shadow(s) => replace(&mut o.shadow, s),
            Attr::Gradient(g) => replace(&mut o.gradient, g),
            Attr::Opacity(a) => {
                replace(&mut o.opacity, finite(AttrKey::Opacity, a)?.clamp(0.0, 1.0))
            }
            Attr::Rotation(r) => replace(&mut o.rotation, finite(AttrKey::Rotation, r)?),
            Attr::Scale(sx, sy) => replace(
                &mut o.scale,
                (finite(AttrKey::Scale, sx)?, finite(AttrKey::Scale, sy)?),
            ),
            Attr::Visible(v) => replace(&mut o.visible, v),
            Attr::Draggable(v) => replace(&mut o.draggable, v),
            Attr::Ignored(v) => replace(&mut o.ignored, v),
            Attr::Collision(v) => replace(&mut o.collision, v),
            Attr::Closest(Some(t)) => {
                replace(&mut o.closest, Some(crate::model::dimension(AttrKey::Closest, t)?))
            }
            Attr::Closest(None) => replace(&mut o.closest, None),
            geometry_attr => self.geometry.apply(&geometry_attr)?,
        };
        if changed {
            self.dirty = true;
        }
        Ok(changed)
    }

    pub(crate) fn set_position(&mut self, position: Point) {
        if self.position != position {
            self.position = position;
            self.dirty = true;
        }
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox {
            kind: self.kind(),
            x: self.position.x,
            y: self.position.y,
            extent: self.geometry.extent(self.position),
            scene: self.scene,
        }
    }

    /// Painted footprint: outline grown by half the border, rotated and
    /// scaled about its center, then padded for the shadow.
    pub fn bounding_rect(&self) -> Rect {
        let outline = self.bounding_box().outline().inflate(self.options.border_width() / 2.0);
        let transformed = if self.options.has_transform() {
            let (sx, sy) = self.options.scale;
            let (w, h) = rotated_extent(
                outline.width * sx.abs(),
                outline.height * sy.abs(),
                self.options.rotation,
            );
            let c = outline.center();
            Rect::new(c.x - w / 2.0, c.y - h / 2.0, w, h)
        } else {
            outline
        };
        match &self.options.shadow {
            Some(shadow) => transformed.pad(&shadow_padding(shadow.offset, shadow.blur)),
            None => transformed,
        }
    }

    /// Collision body grown by half the border width.
    pub fn collision_body(&self) -> CollisionBody {
        self.bounding_box()
            .collision_body()
            .with_border(self.options.border_width())
    }
}

/// What the event delegate needs to know about the shape it serves.
pub trait ShapeDelegate {
    fn id(&self) -> ShapeId;
    fn bounding_box(&self) -> BoundingBox;
    fn is_draggable(&self) -> bool;
    fn position(&self) -> Point;
    /// Moves the shape and marks it dirty.
    fn set_position(&mut self, position: Point);

    fn contains_point(&self, point: Point, epsilon: f64) -> bool {
        is_point_in_shape(point, &self.bounding_box(), epsilon)
    }
}

impl ShapeDelegate for Shape {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounding_box(&self) -> BoundingBox {
        Shape::bounding_box(self)
    }

    fn is_draggable(&self) -> bool {
        self.options.draggable
    }

    fn position(&self) -> Point {
        self.position
    }

    fn set_position(&mut self, position: Point) {
        Shape::set_position(self, position)
    }
}
