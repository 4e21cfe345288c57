//! Pointer dispatch.
//!
//! Scene-level subscribers hear about every pointer event first, with the
//! topmost hit shape as target. Each visible shape's delegate then sees the
//! event in paint order.

use smallvec::{smallvec, SmallVec};

use super::{Scene, ShapeEntry};
use crate::delegate::DelegateContext;
use crate::events::{EventKind, PointerEvent, PointerKind, SceneEvent};

impl Scene {
    pub fn dispatch_pointer(&mut self, pointer: PointerEvent) {
        if self.is_inert() {
            return;
        }
        if !(pointer.position.x.is_finite() && pointer.position.y.is_finite()) {
            tracing::warn!("Dropping {:?} with non-finite position", pointer.kind);
            return;
        }
        let target = self.hit_test(pointer.position);
        tracing::trace!("{:?} at {:?} -> {:?}", pointer.kind, pointer.position, target);

        for kind in self.scene_event_kinds(pointer.kind) {
            self.emit_scene_event(&SceneEvent {
                kind,
                pointer,
                target,
            });
        }
        self.dispatch_to_shapes(&pointer);
    }

    fn scene_event_kinds(&mut self, kind: PointerKind) -> SmallVec<[EventKind; 2]> {
        match kind {
            PointerKind::Down => {
                self.pointer_down = true;
                smallvec![EventKind::DragStart, EventKind::MouseDown]
            }
            PointerKind::Move if self.pointer_down => {
                smallvec![EventKind::Drag, EventKind::MouseMove]
            }
            PointerKind::Move => smallvec![EventKind::MouseMove],
            PointerKind::Up => {
                if std::mem::take(&mut self.pointer_down) {
                    smallvec![EventKind::DragEnd, EventKind::MouseUp]
                } else {
                    smallvec![EventKind::MouseUp]
                }
            }
            PointerKind::Leave => {
                if std::mem::take(&mut self.pointer_down) {
                    smallvec![EventKind::DragEnd, EventKind::MouseLeave]
                } else {
                    smallvec![EventKind::MouseLeave]
                }
            }
            PointerKind::Click => smallvec![EventKind::Click],
            PointerKind::Wheel => smallvec![EventKind::Wheel],
        }
    }

    fn dispatch_to_shapes(&mut self, pointer: &PointerEvent) {
        let siblings = self.order.clone();
        let ctx = DelegateContext {
            now: self.clock.now(),
            throttle: self.config.drag_throttle(),
            epsilon: self.config.hit_epsilon,
            siblings: &siblings,
        };
        for id in &siblings {
            let output = {
                // Destroyed by an earlier handler
                let Some(entry) = self.entries.get_mut(id) else {
                    continue;
                };
                if !entry.shape.is_visible() {
                    continue;
                }
                let ShapeEntry {
                    shape, delegate, ..
                } = entry;
                delegate.handle_pointer(shape, pointer, &ctx)
            };
            if output.moved {
                self.request_redraw(*id);
            }
            for event in &output.events {
                self.emit_shape_event(event);
            }
        }
    }
}
