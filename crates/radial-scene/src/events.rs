//! Pointer input, semantic events and listener registration.
//!
//! Handlers receive the scene mutably, so they can change attributes,
//! destroy shapes or attach a transformer from inside an event. Emission
//! iterates over a snapshot of the handler list; subscribing or
//! unsubscribing during emission takes effect on the next event.

use radial_core::{Point, ShapeId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use uuid::Uuid;

use crate::scene::Scene;

/// Handle returned by `on`/`subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(Uuid);

impl HandlerId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handler({})", &self.0.to_string()[..8])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
    Click,
    MouseDown,
    MouseUp,
    MouseMove,
    MouseEnter,
    MouseLeave,
    Wheel,
    DragStart,
    Drag,
    DragEnd,
    Collision,
    CollisionEnd,
    Closest,
}

/// Raw pointer input kinds fed to [`Scene::dispatch_pointer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerKind {
    Click,
    Down,
    Up,
    Move,
    /// The pointer left the surface.
    Leave,
    Wheel,
}

/// Pointer input in surface-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub position: Point,
    #[serde(default)]
    pub wheel_delta: f64,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, x: f64, y: f64) -> Self {
        Self {
            kind,
            position: Point::new(x, y),
            wheel_delta: 0.0,
        }
    }

    pub fn down(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Down, x, y)
    }

    pub fn up(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Up, x, y)
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Move, x, y)
    }

    pub fn click(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Click, x, y)
    }

    pub fn leave(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Leave, x, y)
    }

    pub fn wheel(x: f64, y: f64, delta: f64) -> Self {
        Self {
            wheel_delta: delta,
            ..Self::new(PointerKind::Wheel, x, y)
        }
    }
}

/// Payload of a shape event.
#[derive(Debug, Clone, PartialEq)]
pub enum EventData {
    Pointer(PointerEvent),
    /// A click also carries every shape of the owning scene, in paint order.
    Click {
        pointer: PointerEvent,
        children: Vec<ShapeId>,
    },
    /// `position` is the shape position after the update.
    Drag {
        position: Point,
        pointer: PointerEvent,
    },
    Collision {
        collisions: Vec<ShapeId>,
    },
    Closest {
        closest: ShapeId,
        distance: f64,
    },
}

/// Event delivered to a shape's own listeners.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeEvent {
    pub kind: EventKind,
    pub target: ShapeId,
    pub data: EventData,
}

impl ShapeEvent {
    pub fn pointer(&self) -> Option<&PointerEvent> {
        match &self.data {
            EventData::Pointer(p)
            | EventData::Click { pointer: p, .. }
            | EventData::Drag { pointer: p, .. } => Some(p),
            _ => None,
        }
    }

    pub fn collisions(&self) -> &[ShapeId] {
        match &self.data {
            EventData::Collision { collisions } => collisions,
            _ => &[],
        }
    }
}

/// Event delivered to scene-level subscribers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneEvent {
    pub kind: EventKind,
    pub pointer: PointerEvent,
    /// Topmost non-ignored shape under the pointer.
    pub target: Option<ShapeId>,
}

pub type Handler<E> = Rc<dyn Fn(&mut Scene, &E)>;

/// Ordered multimap from event kind to handlers.
pub struct Listeners<E> {
    handlers: BTreeMap<EventKind, Vec<(HandlerId, Handler<E>)>>,
}

impl<E> Default for Listeners<E> {
    fn default() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }
}

impl<E> fmt::Debug for Listeners<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.handlers.iter().map(|(k, v)| (k, v.len())))
            .finish()
    }
}

impl<E> Listeners<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, kind: EventKind, handler: Handler<E>) -> HandlerId {
        let id = HandlerId::new();
        self.handlers.entry(kind).or_default().push((id, handler));
        id
    }

    /// Returns true if the handler was found and removed.
    pub fn remove(&mut self, id: HandlerId) -> bool {
        let mut removed = false;
        for list in self.handlers.values_mut() {
            let before = list.len();
            list.retain(|(hid, _)| *hid != id);
            removed |= list.len() != before;
        }
        self.handlers.retain(|_, list| !list.is_empty());
        removed
    }

    /// Snapshot of the handlers for `kind`, in subscription order.
    pub fn snapshot(&self, kind: EventKind) -> Vec<Handler<E>> {
        self.handlers
            .get(&kind)
            .map(|list| list.iter().map(|(_, h)| Rc::clone(h)).collect())
            .unwrap_or_default()
    }

    pub fn has(&self, kind: EventKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.handlers.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn clear(&mut self) {
        self.handlers.clear();
    }
}
