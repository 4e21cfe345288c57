//! Per-shape pointer routing and the drag state machine.
//!
//! The delegate turns raw pointer input into semantic [`ShapeEvent`]s for one
//! shape. It does not emit them itself; the scene delivers the returned
//! events to the shape's listeners once the delegate is done, so handlers are
//! free to mutate the scene.

use radial_core::{Point, ShapeId};
use smallvec::SmallVec;
use std::time::Duration;

use crate::events::{EventData, EventKind, PointerEvent, PointerKind, ShapeEvent};
use crate::shape::ShapeDelegate;

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragState {
    pointer_origin: Point,
    shape_start: Point,
}

/// Inputs the delegate needs from the scene for one pointer event.
#[derive(Debug, Clone, Copy)]
pub struct DelegateContext<'a> {
    pub now: Duration,
    pub throttle: Duration,
    pub epsilon: f64,
    /// Every shape of the owning scene, in paint order.
    pub siblings: &'a [ShapeId],
}

#[derive(Debug, Default)]
pub struct DelegateOutput {
    pub events: SmallVec<[ShapeEvent; 2]>,
    /// The shape position changed and a redraw is needed.
    pub moved: bool,
}

#[derive(Debug, Default)]
pub struct EventDelegate {
    drag: Option<DragState>,
    last_drag_update: Option<Duration>,
    hovered: bool,
}

impl EventDelegate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Drops drag state without emitting `DragEnd`.
    pub fn cancel_drag(&mut self) -> bool {
        self.last_drag_update = None;
        self.drag.take().is_some()
    }

    pub fn handle_pointer(
        &mut self,
        shape: &mut dyn ShapeDelegate,
        pointer: &PointerEvent,
        ctx: &DelegateContext<'_>,
    ) -> DelegateOutput {
        let mut out = DelegateOutput::default();
        let id = shape.id();
        let hit = shape.contains_point(pointer.position, ctx.epsilon);
        let emit = |out: &mut DelegateOutput, kind: EventKind, data: EventData| {
            out.events.push(ShapeEvent {
                kind,
                target: id,
                data,
            });
        };

        match pointer.kind {
            PointerKind::Down => {
                if hit {
                    if shape.is_draggable() {
                        self.drag = Some(DragState {
                            pointer_origin: pointer.position,
                            shape_start: shape.position(),
                        });
                        self.last_drag_update = None;
                        tracing::trace!("{} drag start at {:?}", id, pointer.position);
                        emit(
                            &mut out,
                            EventKind::DragStart,
                            EventData::Drag {
                                position: shape.position(),
                                pointer: *pointer,
                            },
                        );
                    }
                    emit(&mut out, EventKind::MouseDown, EventData::Pointer(*pointer));
                }
            }
            PointerKind::Move => {
                // The flag can be switched off mid-drag, e.g. by a selection.
                if self.drag.is_some() && !shape.is_draggable() {
                    tracing::trace!("{} no longer draggable, drag dropped", id);
                    self.cancel_drag();
                }
                if let Some(drag) = self.drag {
                    let due = self
                        .last_drag_update
                        .is_none_or(|last| ctx.now.saturating_sub(last) >= ctx.throttle);
                    if due {
                        self.last_drag_update = Some(ctx.now);
                        let position =
                            drag.shape_start + (pointer.position - drag.pointer_origin);
                        shape.set_position(position);
                        out.moved = true;
                        emit(
                            &mut out,
                            EventKind::Drag,
                            EventData::Drag {
                                position,
                                pointer: *pointer,
                            },
                        );
                    }
                }
                if hit {
                    if !self.hovered {
                        self.hovered = true;
                        emit(&mut out, EventKind::MouseEnter, EventData::Pointer(*pointer));
                    }
                    emit(&mut out, EventKind::MouseMove, EventData::Pointer(*pointer));
                } else if self.hovered {
                    self.hovered = false;
                    emit(&mut out, EventKind::MouseLeave, EventData::Pointer(*pointer));
                }
            }
            PointerKind::Up => {
                if self.end_drag() {
                    emit(
                        &mut out,
                        EventKind::DragEnd,
                        EventData::Drag {
                            position: shape.position(),
                            pointer: *pointer,
                        },
                    );
                }
                if hit {
                    emit(&mut out, EventKind::MouseUp, EventData::Pointer(*pointer));
                }
            }
            PointerKind::Leave => {
                if self.end_drag() {
                    emit(
                        &mut out,
                        EventKind::DragEnd,
                        EventData::Drag {
                            position: shape.position(),
                            pointer: *pointer,
                        },
                    );
                }
                if self.hovered {
                    self.hovered = false;
                    emit(&mut out, EventKind::MouseLeave, EventData::Pointer(*pointer));
                }
            }
            PointerKind::Click => {
                if hit {
                    emit(
                        &mut out,
                        EventKind::Click,
                        EventData::Click {
                            pointer: *pointer,
                            children: ctx.siblings.to_vec(),
                        },
                    );
                }
            }
            PointerKind::Wheel => {}
        }
        out
    }

    fn end_drag(&mut self) -> bool {
        self.last_drag_update = None;
        self.drag.take().is_some()
    }
}
