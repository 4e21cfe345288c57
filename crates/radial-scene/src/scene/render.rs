//! Painting, full repaints and frame callbacks.

use radial_core::geometry::gradient_line;
use radial_core::{Result, SceneError, ShapeId, SurfaceError};
use std::path::Path;

use super::Scene;
use crate::events::{EventData, EventKind, ShapeEvent};
use crate::frame::FrameTask;
use crate::model::ShapeModel;
use crate::shape::Shape;
use crate::surface::{write_png, DrawingSurface, Paint};
use crate::sweep::{sweep, SweepBody};

/// Paints one shape: style, transform about the outline center, the variant
/// hook, then the border.
pub(crate) fn paint_shape(surface: &mut dyn DrawingSurface, shape: &Shape) {
    let options = shape.options();
    let outline = shape.bounding_box().outline();

    surface.save();
    surface.set_shadow(None);
    if options.shadow.is_some() {
        surface.set_shadow(options.shadow);
    }
    if let Some(border) = options.border {
        surface.set_stroke(border.stroke_color(), border.width);
    }
    let paint = match options.gradient {
        Some(gradient) => {
            let (start, end) = gradient_line(&outline, gradient.angle);
            Paint::Linear {
                start,
                end,
                from: gradient.from,
                to: gradient.to,
            }
        }
        None => Paint::Solid(options.fill),
    };
    surface.set_fill(paint);
    surface.set_global_alpha(options.opacity);

    if options.has_transform() {
        let center = outline.center();
        surface.translate(center.x, center.y);
        surface.rotate(options.rotation);
        surface.scale(options.scale.0, options.scale.1);
        surface.translate(-center.x, -center.y);
    }

    shape
        .geometry()
        .draw(shape.position(), options.fill, surface);

    if let Some(border) = options.border.filter(|b| b.width > 0.0) {
        surface.set_shadow(None);
        surface.set_stroke(border.stroke_color(), border.width);
        surface.stroke();
    }
    surface.restore();
}

impl Scene {
    /// Paints a dirty, visible shape and registers it on first success.
    /// Returns false when there was nothing to paint.
    pub fn render_shape(&mut self, id: ShapeId) -> Result<bool> {
        let entry = self
            .entries
            .get_mut(&id)
            .ok_or(SceneError::UnknownShape { id })?;
        let Some(surface) = self.surface.as_deref_mut() else {
            return Ok(false);
        };
        if !entry.shape.is_dirty() || !entry.shape.is_visible() {
            return Ok(false);
        }
        paint_shape(surface, &entry.shape);
        entry.shape.mark_clean();
        if !entry.registered {
            entry.registered = true;
            self.order.push(id);
        }
        Ok(true)
    }

    /// Full repaint: collision sweep, clear, optional background, then every
    /// registered shape in paint order.
    pub fn redraw(&mut self) {
        if self.is_inert() || self.repainting {
            return;
        }
        self.repainting = true;
        if self.config.collision_sweep {
            self.run_collision_sweep();
        }
        if let Some(surface) = self.surface.as_deref_mut() {
            let bounds = surface.bounds();
            surface.clear_rect(bounds);
            if let Some(background) = self.config.background {
                surface.save();
                surface.set_fill(Paint::Solid(background));
                surface.begin_path();
                surface.rect(bounds);
                surface.fill();
                surface.restore();
            }
            for id in &self.order {
                let Some(entry) = self.entries.get_mut(id) else {
                    continue;
                };
                entry.shape.mark_dirty();
                if entry.shape.is_visible() {
                    paint_shape(surface, &entry.shape);
                    entry.shape.mark_clean();
                }
            }
        }
        self.repainting = false;
        tracing::trace!("{} repainted {} shapes", self.id, self.order.len());
    }

    /// Runs the callbacks queued before this frame. At most one full
    /// repaint happens per frame however many shapes asked for it.
    pub fn run_frame(&mut self) {
        if self.is_inert() {
            return;
        }
        let now = self.clock.now();
        let mut repainted = false;
        for (handle, task) in self.frames.take_due() {
            match task {
                FrameTask::Redraw(id) => {
                    let Some(entry) = self.entries.get_mut(&id) else {
                        continue;
                    };
                    if entry.redraw == Some(handle) {
                        entry.redraw = None;
                    }
                    if !entry.shape.is_dirty() {
                        continue;
                    }
                    if !entry.registered {
                        if let Err(e) = self.render_shape(id) {
                            tracing::warn!("Failed to render {}: {}", id, e);
                        }
                    }
                    if !repainted {
                        self.redraw();
                        repainted = true;
                    }
                }
                FrameTask::Bounce { shape, deadline } => {
                    if !self.entries.contains_key(&shape) {
                        continue;
                    }
                    if now >= deadline {
                        self.destroy(shape);
                    } else {
                        let handle = self.frames.request(task);
                        if let Some(entry) = self.entries.get_mut(&shape) {
                            entry.bounce = Some(handle);
                        }
                    }
                }
            }
        }
    }

    /// Writes the surface to a PNG file. Fails for surfaces that cannot be
    /// read back, such as a [`RecordingSurface`](crate::surface::RecordingSurface).
    pub fn export_png(&self, path: &Path) -> Result<()> {
        let pixels = self
            .surface
            .as_deref()
            .and_then(|s| s.snapshot())
            .ok_or_else(|| SurfaceError::Export {
                reason: format!("{} has no readable surface", self.id),
            })?;
        write_png(&pixels, path)?;
        Ok(())
    }

    fn run_collision_sweep(&mut self) {
        let bodies: Vec<SweepBody> = self
            .order
            .iter()
            .filter_map(|id| self.entries.get(id))
            .map(|entry| SweepBody::from_shape(&entry.shape))
            .collect();
        let results = sweep(&bodies);

        for result in &results {
            if let Some(entry) = self.entries.get_mut(&result.id) {
                let state = entry.shape.collision_state_mut();
                state.previous_collision = result.previous_collision;
                state.is_colliding = result.is_colliding;
                state.current_collisions = result.collisions.clone();
            }
        }

        for result in &results {
            if let Some((closest, distance)) = result.closest {
                self.emit_shape_event(&ShapeEvent {
                    kind: EventKind::Closest,
                    target: result.id,
                    data: EventData::Closest { closest, distance },
                });
            }
        }

        for result in results.iter().filter(|r| r.collision_enabled) {
            let kind = if !result.collisions.is_empty() {
                EventKind::Collision
            } else if result.collision_ended() {
                EventKind::CollisionEnd
            } else {
                continue;
            };
            tracing::trace!("{} {:?} with {:?}", result.id, kind, result.collisions);
            self.emit_shape_event(&ShapeEvent {
                kind,
                target: result.id,
                data: EventData::Collision {
                    collisions: result.collisions.to_vec(),
                },
            });
        }
    }
}
