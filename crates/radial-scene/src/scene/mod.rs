//! The scene container.
//!
//! A [`Scene`] owns its shapes, their event delegates and listeners, the
//! drawing surface and the frame queue. Shapes are addressed by [`ShapeId`];
//! the paint order is the order in which shapes were first rendered and is
//! never rearranged by removals.

mod dispatch;
mod render;

use image::RgbaImage;
use radial_core::{
    AttrKey, BoundingBox, Point, Rect, Result, SceneError, SceneId, ShapeError, ShapeId,
};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use crate::attrs::{Attr, LineStyle};
use crate::clock::{Clock, SystemClock};
use crate::config::SceneConfig;
use crate::delegate::EventDelegate;
use crate::events::{EventKind, HandlerId, Listeners, SceneEvent, ShapeEvent};
use crate::frame::{FrameHandle, FrameScheduler, FrameTask};
use crate::model::{
    dimension, finite, finite_points, CircleShape, ImageShape, LineShape, PolygonShape, RectShape, ShapeGeometry,
    TriangleShape,
};
use crate::shape::{Shape, ShapeOptions};
use crate::surface::DrawingSurface;

struct ShapeEntry {
    shape: Shape,
    delegate: EventDelegate,
    listeners: Listeners<ShapeEvent>,
    redraw: Option<FrameHandle>,
    bounce: Option<FrameHandle>,
    /// Set by the first successful render; only registered shapes are painted.
    registered: bool,
}

pub struct Scene {
    id: SceneId,
    surface: Option<Box<dyn DrawingSurface>>,
    config: SceneConfig,
    clock: Box<dyn Clock>,
    frames: FrameScheduler,
    entries: HashMap<ShapeId, ShapeEntry>,
    order: Vec<ShapeId>,
    next_id: u64,
    listeners: Listeners<SceneEvent>,
    pointer_down: bool,
    repainting: bool,
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("id", &self.id)
            .field("inert", &self.is_inert())
            .field("shapes", &self.order)
            .field("pending_frames", &self.frames.pending())
            .field("config", &self.config)
            .finish()
    }
}

impl Scene {
    /// Creates a scene over `surface` with default settings and the wall clock.
    pub fn new(surface: impl DrawingSurface + 'static) -> Self {
        Self::with_options(
            Some(Box::new(surface)),
            SceneConfig::default(),
            Box::new(SystemClock::new()),
        )
    }

    pub fn with_config(surface: impl DrawingSurface + 'static, config: SceneConfig) -> Self {
        Self::with_options(Some(Box::new(surface)), config, Box::new(SystemClock::new()))
    }

    /// A missing or zero-sized surface leaves the scene inert: factories
    /// fail with [`SceneError::Inert`] and input, frames and redraws do
    /// nothing.
    pub fn with_options(
        surface: Option<Box<dyn DrawingSurface>>,
        config: SceneConfig,
        clock: Box<dyn Clock>,
    ) -> Self {
        let id = SceneId::next();
        let surface = match surface {
            None => {
                tracing::error!("{} created without a drawing surface; scene is inert", id);
                None
            }
            Some(s) if s.width() == 0 || s.height() == 0 => {
                tracing::error!(
                    "{} surface has invalid size {}x{}; scene is inert",
                    id,
                    s.width(),
                    s.height()
                );
                None
            }
            Some(s) => Some(s),
        };
        tracing::debug!("{} created", id);
        Self {
            id,
            surface,
            config,
            clock,
            frames: FrameScheduler::new(),
            entries: HashMap::new(),
            order: Vec::new(),
            next_id: 1,
            listeners: Listeners::new(),
            pointer_down: false,
            repainting: false,
        }
    }

    pub fn id(&self) -> SceneId {
        self.id
    }

    pub fn is_inert(&self) -> bool {
        self.surface.is_none()
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn surface(&self) -> Option<&(dyn DrawingSurface + 'static)> {
        self.surface.as_deref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut (dyn DrawingSurface + 'static)> {
        self.surface.as_deref_mut()
    }

    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    // ---- factories ----

    /// Circle centered on `(x, y)`.
    pub fn circle(&mut self, x: f64, y: f64, radius: f64, options: ShapeOptions) -> Result<ShapeId> {
        let radius = dimension(AttrKey::Radius, radius)?;
        self.insert(Point::new(x, y), ShapeGeometry::Circle(CircleShape::new(radius)), options)
    }

    /// Rect with its top-left corner at `(x, y)`.
    pub fn rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        options: ShapeOptions,
    ) -> Result<ShapeId> {
        self.rounded_rect(x, y, width, height, 0.0, options)
    }

    pub fn rounded_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        corner_radius: f64,
        options: ShapeOptions,
    ) -> Result<ShapeId> {
        let geometry = RectShape::rounded(
            dimension(AttrKey::Width, width)?,
            dimension(AttrKey::Height, height)?,
            dimension(AttrKey::CornerRadius, corner_radius)?,
        );
        self.insert(Point::new(x, y), ShapeGeometry::Rect(geometry), options)
    }

    /// Triangle with its apex at `(x, y)`.
    pub fn triangle(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        options: ShapeOptions,
    ) -> Result<ShapeId> {
        let radius = dimension(AttrKey::Radius, radius)?;
        self.insert(
            Point::new(x, y),
            ShapeGeometry::Triangle(TriangleShape::new(radius)),
            options,
        )
    }

    /// Open polyline through `points`, offset by `(x, y)`.
    pub fn line(
        &mut self,
        x: f64,
        y: f64,
        points: Vec<Point>,
        line_width: f64,
        options: ShapeOptions,
    ) -> Result<ShapeId> {
        self.styled_line(x, y, points, line_width, LineStyle::default(), options)
    }

    /// Polyline with explicit cap, join and dash pattern.
    pub fn styled_line(
        &mut self,
        x: f64,
        y: f64,
        points: Vec<Point>,
        line_width: f64,
        style: LineStyle,
        options: ShapeOptions,
    ) -> Result<ShapeId> {
        let line_width = dimension(AttrKey::LineWidth, line_width)?;
        finite_points(AttrKey::Points, &points)?;
        for d in &style.dash {
            dimension(AttrKey::Dash, *d)?;
        }
        self.insert(
            Point::new(x, y),
            ShapeGeometry::Line(LineShape::new(points, line_width).with_style(style)),
            options,
        )
    }

    /// Regular polygon centered on `(x, y)`. The side count is clamped into
    /// `3..=`[`MAX_SIDES`](crate::model::MAX_SIDES).
    pub fn polygon(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        sides: u32,
        options: ShapeOptions,
    ) -> Result<ShapeId> {
        let radius = dimension(AttrKey::Radius, radius)?;
        self.insert(
            Point::new(x, y),
            ShapeGeometry::Polygon(PolygonShape::new(radius, sides)),
            options,
        )
    }

    /// Bitmap with its top-left corner at `(x, y)`, stretched to `width` x `height`.
    pub fn image(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        pixels: RgbaImage,
        options: ShapeOptions,
    ) -> Result<ShapeId> {
        let geometry = ImageShape::new(
            pixels,
            dimension(AttrKey::Width, width)?,
            dimension(AttrKey::Height, height)?,
        );
        self.insert(Point::new(x, y), ShapeGeometry::Image(geometry), options)
    }

    fn insert(
        &mut self,
        position: Point,
        geometry: ShapeGeometry,
        options: ShapeOptions,
    ) -> Result<ShapeId> {
        if self.is_inert() {
            return Err(SceneError::Inert.into());
        }
        finite(AttrKey::X, position.x)?;
        finite(AttrKey::Y, position.y)?;
        let id = ShapeId(self.next_id);
        self.next_id += 1;
        let shape = Shape::new(id, self.id, position, geometry, options);
        tracing::debug!("{} created: {} at ({}, {})", id, shape.kind(), position.x, position.y);
        self.entries.insert(
            id,
            ShapeEntry {
                shape,
                delegate: EventDelegate::new(),
                listeners: Listeners::new(),
                redraw: None,
                bounce: None,
                registered: false,
            },
        );
        self.render_shape(id)?;
        Ok(id)
    }

    // ---- lookup ----

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.entries.get(&id).map(|e| &e.shape)
    }

    /// Registered shapes in paint order.
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> + '_ {
        self.order
            .iter()
            .filter_map(move |id| self.entries.get(id).map(|e| &e.shape))
    }

    pub fn order(&self) -> &[ShapeId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn is_registered(&self, id: ShapeId) -> bool {
        self.entries.get(&id).is_some_and(|e| e.registered)
    }

    pub fn is_dragging(&self, id: ShapeId) -> bool {
        self.entries.get(&id).is_some_and(|e| e.delegate.is_dragging())
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.pending()
    }

    pub fn bounding_box(&self, id: ShapeId) -> Result<BoundingBox> {
        Ok(self.shape_ref(id)?.bounding_box())
    }

    pub fn bounding_rect(&self, id: ShapeId) -> Result<Rect> {
        Ok(self.shape_ref(id)?.bounding_rect())
    }

    /// Topmost visible, non-ignored shape containing `point`.
    pub fn hit_test(&self, point: Point) -> Option<ShapeId> {
        let epsilon = self.config.hit_epsilon;
        self.order.iter().rev().copied().find(|id| {
            self.entries.get(id).is_some_and(|e| {
                e.shape.is_visible()
                    && !e.shape.is_ignored()
                    && crate::hit_test::is_point_in_shape(point, &e.shape.bounding_box(), epsilon)
            })
        })
    }

    /// Converts client coordinates to surface-local ones.
    pub fn pointer_position(&self, client: Point) -> Point {
        let origin = self.surface().map(|s| s.origin()).unwrap_or_default();
        client - origin
    }

    fn shape_ref(&self, id: ShapeId) -> Result<&Shape> {
        self.shape(id)
            .ok_or_else(|| SceneError::UnknownShape { id }.into())
    }

    fn entry_mut(&mut self, id: ShapeId) -> Result<&mut ShapeEntry> {
        self.entries
            .get_mut(&id)
            .ok_or_else(|| SceneError::UnknownShape { id }.into())
    }

    // ---- attributes ----

    pub fn get_attr(&self, id: ShapeId, key: AttrKey) -> Result<Attr> {
        let shape = self.shape_ref(id)?;
        shape.attr(key).ok_or_else(|| {
            ShapeError::AttrNotApplicable {
                kind: shape.kind(),
                key,
            }
            .into()
        })
    }

    /// Returns whether the value changed. Equal values schedule nothing.
    pub fn set_attr(&mut self, id: ShapeId, attr: Attr) -> Result<bool> {
        let changed = self.entry_mut(id)?.shape.apply_attr(attr)?;
        if changed {
            self.request_redraw(id);
        }
        Ok(changed)
    }

    /// Applies attributes in order, requesting at most one redraw. Stops at
    /// the first invalid value; earlier changes are kept.
    pub fn set_attrs(&mut self, id: ShapeId, attrs: impl IntoIterator<Item = Attr>) -> Result<bool> {
        let entry = self.entry_mut(id)?;
        let mut changed = false;
        let mut outcome = Ok(());
        for attr in attrs {
            match entry.shape.apply_attr(attr) {
                Ok(c) => changed |= c,
                Err(e) => {
                    outcome = Err(e);
                    break;
                }
            }
        }
        if changed {
            self.request_redraw(id);
        }
        outcome?;
        Ok(changed)
    }

    /// Marks the shape dirty and schedules a repaint even though no
    /// attribute changed.
    pub fn invalidate(&mut self, id: ShapeId) -> Result<()> {
        self.entry_mut(id)?.shape.mark_dirty();
        self.request_redraw(id);
        Ok(())
    }

    /// Queues a redraw callback unless one is already pending for the shape.
    fn request_redraw(&mut self, id: ShapeId) {
        if self.is_inert() {
            return;
        }
        let Some(entry) = self.entries.get_mut(&id) else {
            return;
        };
        if entry.redraw.is_some_and(|h| self.frames.is_pending(h)) {
            return;
        }
        entry.redraw = Some(self.frames.request(FrameTask::Redraw(id)));
        tracing::trace!("{} redraw requested", id);
    }

    // ---- listeners ----

    /// Subscribes to events of one shape.
    pub fn on<F>(&mut self, id: ShapeId, kind: EventKind, handler: F) -> Result<HandlerId>
    where
        F: Fn(&mut Scene, &ShapeEvent) + 'static,
    {
        let handler_id = self.entry_mut(id)?.listeners.add(kind, Rc::new(handler));
        tracing::trace!("{} subscribed to {:?} on {}", handler_id, kind, id);
        Ok(handler_id)
    }

    /// Returns true if the handler was found and removed.
    pub fn off(&mut self, id: ShapeId, handler: HandlerId) -> bool {
        self.entries
            .get_mut(&id)
            .is_some_and(|e| e.listeners.remove(handler))
    }

    /// Subscribes to scene-level pointer events.
    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F) -> HandlerId
    where
        F: Fn(&mut Scene, &SceneEvent) + 'static,
    {
        let id = self.listeners.add(kind, Rc::new(handler));
        tracing::debug!("Subscription {} added", id);
        id
    }

    pub fn unsubscribe(&mut self, id: HandlerId) -> bool {
        let removed = self.listeners.remove(id);
        if removed {
            tracing::debug!("Subscription {} removed", id);
        }
        removed
    }

    pub(crate) fn emit_shape_event(&mut self, event: &ShapeEvent) {
        let handlers = match self.entries.get(&event.target) {
            Some(entry) => entry.listeners.snapshot(event.kind),
            None => return,
        };
        for handler in handlers {
            handler(self, event);
        }
    }

    pub(crate) fn emit_scene_event(&mut self, event: &SceneEvent) {
        for handler in self.listeners.snapshot(event.kind) {
            handler(self, event);
        }
    }

    // ---- lifecycle ----

    /// Removes the shape and repaints what is left. Unknown ids return false.
    pub fn destroy(&mut self, id: ShapeId) -> bool {
        let Some(mut entry) = self.entries.remove(&id) else {
            return false;
        };
        if let Some(handle) = entry.redraw.take() {
            self.frames.cancel(handle);
        }
        if let Some(handle) = entry.bounce.take() {
            self.frames.cancel(handle);
        }
        entry.listeners.clear();
        if let Some(index) = self.order.iter().position(|s| *s == id) {
            self.order.remove(index);
        }
        for other in self.entries.values_mut() {
            other
                .shape
                .collision_state_mut()
                .current_collisions
                .retain(|s| *s != id);
        }
        tracing::debug!("{} destroyed", id);
        if entry.registered {
            // A destroy from inside a repaint is covered by that repaint.
            self.redraw();
        }
        true
    }

    /// Destroys the shape on the first frame at or after `duration` from now.
    pub fn bounce(&mut self, id: ShapeId, duration: Duration) -> Result<()> {
        let deadline = self.clock.now() + duration;
        let entry = self.entries.get_mut(&id).ok_or(SceneError::UnknownShape { id })?;
        if let Some(previous) = entry.bounce.take() {
            self.frames.cancel(previous);
        }
        entry.bounce = Some(self.frames.request(FrameTask::Bounce { shape: id, deadline }));
        tracing::trace!("{} bounce scheduled for {:?}", id, deadline);
        Ok(())
    }

    /// Drops any drag in progress on the shape without emitting `DragEnd`.
    pub fn cancel_drag(&mut self, id: ShapeId) -> Result<bool> {
        Ok(self.entry_mut(id)?.delegate.cancel_drag())
    }
}
