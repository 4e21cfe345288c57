//! Selection transformer.
//!
//! A [`Transformer`] draws a border around one or more target shapes, a
//! resize bar along each enabled side and a draggable anchor on each enabled
//! corner. Dragging the border moves every target by the same delta;
//! dragging an anchor or side bar resizes the border and reports the new
//! bounds to resize handlers.
//!
//! # Overlay Model
//!
//! - **Border**: an ignored, draggable rect enclosing the targets' outlines
//!   plus the configured padding
//! - **Sides**: ignored, draggable bars centered on the border edges; each
//!   resizes along one axis
//! - **Anchors**: ignored, draggable circles centered on the border corners
//! - **Targets**: their draggable flag is switched off while attached and
//!   restored on [`Transformer::detach`]
//!
//! Handles overlap near the corners, so a press can start several drags at
//! once. The last handle in paint order keeps its drag and cancels the
//! others: anchors win over sides, sides over the border.
//!
//! The overlay shapes live in the scene like any other shape. The
//! transformer keeps its state behind `Rc<RefCell<_>>` so the event handlers
//! it installs on those shapes can share it.

use radial_core::{AttrKey, Color, Point, Rect, Result, SceneError, ShapeId};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::attrs::{Attr, Border};
use crate::config::TransformerConfig;
use crate::events::{EventData, EventKind, HandlerId, ShapeEvent};
use crate::scene::Scene;
use crate::shape::ShapeOptions;

/// Corner an anchor sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnchorPosition {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl AnchorPosition {
    pub const ALL: [AnchorPosition; 4] = [
        AnchorPosition::TopLeft,
        AnchorPosition::TopRight,
        AnchorPosition::BottomRight,
        AnchorPosition::BottomLeft,
    ];

    pub fn corner(&self, rect: &Rect) -> Point {
        match self {
            AnchorPosition::TopLeft => rect.top_left(),
            AnchorPosition::TopRight => rect.top_right(),
            AnchorPosition::BottomRight => rect.bottom_right(),
            AnchorPosition::BottomLeft => rect.bottom_left(),
        }
    }

    /// The horizontal and vertical edge this corner moves.
    pub fn sides(&self) -> (SidePosition, SidePosition) {
        match self {
            AnchorPosition::TopLeft => (SidePosition::Left, SidePosition::Top),
            AnchorPosition::TopRight => (SidePosition::Right, SidePosition::Top),
            AnchorPosition::BottomRight => (SidePosition::Right, SidePosition::Bottom),
            AnchorPosition::BottomLeft => (SidePosition::Left, SidePosition::Bottom),
        }
    }
}

/// Edge a side bar sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SidePosition {
    Left,
    Top,
    Right,
    Bottom,
}

impl SidePosition {
    pub const ALL: [SidePosition; 4] = [
        SidePosition::Left,
        SidePosition::Top,
        SidePosition::Right,
        SidePosition::Bottom,
    ];

    /// Bar of the given thickness centered on this edge of `rect`.
    pub fn bar(&self, rect: &Rect, thickness: f64) -> Rect {
        let half = thickness / 2.0;
        match self {
            SidePosition::Left => Rect::new(rect.x - half, rect.y, thickness, rect.height),
            SidePosition::Top => Rect::new(rect.x, rect.y - half, rect.width, thickness),
            SidePosition::Right => Rect::new(rect.right() - half, rect.y, thickness, rect.height),
            SidePosition::Bottom => Rect::new(rect.x, rect.bottom() - half, rect.width, thickness),
        }
    }
}

/// The overlay shape a resize came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeHandle {
    Anchor(AnchorPosition),
    Side(SidePosition),
}

/// Moves one edge of `start`, keeping the opposite edge fixed and the side
/// at least `min_size` long. Left and right edges use `dx`, top and bottom
/// use `dy`.
pub fn resize_side(start: Rect, side: SidePosition, dx: f64, dy: f64, min_size: f64) -> Rect {
    let (mut left, mut top) = (start.x, start.y);
    let (mut right, mut bottom) = (start.right(), start.bottom());

    match side {
        SidePosition::Left => left = (left + dx).min(right - min_size),
        SidePosition::Right => right = (right + dx).max(left + min_size),
        SidePosition::Top => top = (top + dy).min(bottom - min_size),
        SidePosition::Bottom => bottom = (bottom + dy).max(top + min_size),
    }
    match side {
        SidePosition::Left | SidePosition::Right => {
            Rect::new(left, start.y, right - left, start.height)
        }
        SidePosition::Top | SidePosition::Bottom => {
            Rect::new(start.x, top, start.width, bottom - top)
        }
    }
}

/// Moves the two edges owned by `anchor` by `(dx, dy)`, keeping the
/// opposite edges fixed and each side at least `min_size` long.
pub fn resize_bounds(
    start: Rect,
    anchor: AnchorPosition,
    dx: f64,
    dy: f64,
    min_size: f64,
) -> Rect {
    let (horizontal, vertical) = anchor.sides();
    let resized = resize_side(start, horizontal, dx, dy, min_size);
    resize_side(resized, vertical, dx, dy, min_size)
}

/// Reported to resize handlers after each anchor or side drag step.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeEvent {
    pub handle: ResizeHandle,
    pub previous: Rect,
    pub current: Rect,
    pub targets: Vec<ShapeId>,
}

type ResizeHandler = Rc<dyn Fn(&mut Scene, &ResizeEvent)>;

#[derive(Debug, Clone)]
struct Overlay {
    border: ShapeId,
    sides: Vec<(SidePosition, ShapeId)>,
    anchors: Vec<(AnchorPosition, ShapeId)>,
}

impl Overlay {
    fn shapes(&self) -> impl Iterator<Item = ShapeId> + '_ {
        std::iter::once(self.border)
            .chain(self.sides.iter().map(|(_, id)| *id))
            .chain(self.anchors.iter().map(|(_, id)| *id))
    }
}

#[derive(Default)]
struct TransformerState {
    config: TransformerConfig,
    nodes: Vec<ShapeId>,
    draggable_before: Vec<(ShapeId, bool)>,
    overlay: Option<Overlay>,
    bounds: Option<Rect>,
    /// Border position at the previous drag step
    border_last: Point,
    /// Bounds and handle position when the current resize started
    resize_start: Option<(Rect, Point)>,
    resize_handlers: Vec<(HandlerId, ResizeHandler)>,
}

/// Multi-shape selection box with side and corner resize handles.
#[derive(Clone, Default)]
pub struct Transformer {
    state: Rc<RefCell<TransformerState>>,
}

impl fmt::Debug for Transformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Transformer")
            .field("nodes", &state.nodes)
            .field("overlay", &state.overlay)
            .field("bounds", &state.bounds)
            .finish()
    }
}

impl Transformer {
    pub fn new(config: TransformerConfig) -> Self {
        Self {
            state: Rc::new(RefCell::new(TransformerState {
                config,
                ..TransformerState::default()
            })),
        }
    }

    pub fn config(&self) -> TransformerConfig {
        self.state.borrow().config.clone()
    }

    /// Current selection bounds, `None` while detached.
    pub fn bounds(&self) -> Option<Rect> {
        self.state.borrow().bounds
    }

    pub fn border(&self) -> Option<ShapeId> {
        self.state.borrow().overlay.as_ref().map(|o| o.border)
    }

    pub fn anchors(&self) -> Vec<(AnchorPosition, ShapeId)> {
        self.state
            .borrow()
            .overlay
            .as_ref()
            .map(|o| o.anchors.clone())
            .unwrap_or_default()
    }

    pub fn anchor(&self, position: AnchorPosition) -> Option<ShapeId> {
        self.anchors()
            .into_iter()
            .find(|(p, _)| *p == position)
            .map(|(_, id)| id)
    }

    pub fn sides(&self) -> Vec<(SidePosition, ShapeId)> {
        self.state
            .borrow()
            .overlay
            .as_ref()
            .map(|o| o.sides.clone())
            .unwrap_or_default()
    }

    pub fn side(&self, position: SidePosition) -> Option<ShapeId> {
        self.sides()
            .into_iter()
            .find(|(p, _)| *p == position)
            .map(|(_, id)| id)
    }

    pub fn nodes(&self) -> Vec<ShapeId> {
        self.state.borrow().nodes.clone()
    }

    pub fn is_attached(&self) -> bool {
        self.state.borrow().overlay.is_some()
    }

    /// Registers a handler called after every resize step.
    pub fn on_resize<F>(&self, handler: F) -> HandlerId
    where
        F: Fn(&mut Scene, &ResizeEvent) + 'static,
    {
        let id = HandlerId::new();
        self.state
            .borrow_mut()
            .resize_handlers
            .push((id, Rc::new(handler)));
        id
    }

    pub fn off_resize(&self, id: HandlerId) -> bool {
        let mut state = self.state.borrow_mut();
        let before = state.resize_handlers.len();
        state.resize_handlers.retain(|(h, _)| *h != id);
        state.resize_handlers.len() != before
    }

    /// Selects `nodes`, replacing any previous selection.
    ///
    /// Any drag in progress on a target is dropped, so a selection made from
    /// a target's own pointer handler does not pull the target out of the
    /// new border.
    ///
    /// # Arguments
    ///
    /// * `scene` - The scene owning the targets; the overlay is created there
    /// * `nodes` - Target shapes, at least one
    ///
    /// # Errors
    ///
    /// [`SceneError::Transformer`] for an empty selection and
    /// [`SceneError::UnknownShape`] when a target does not exist. The
    /// previous selection is left untouched in both cases.
    pub fn attach(&self, scene: &mut Scene, nodes: &[ShapeId]) -> Result<()> {
        if nodes.is_empty() {
            return Err(SceneError::Transformer {
                reason: "no shapes to attach to".to_string(),
            }
            .into());
        }
        if let Some(missing) = nodes.iter().find(|id| !scene.contains(**id)) {
            return Err(SceneError::UnknownShape { id: *missing }.into());
        }
        self.detach(scene);

        let config = self.config();
        let mut draggable_before = Vec::with_capacity(nodes.len());
        for &id in nodes {
            let was = matches!(scene.get_attr(id, AttrKey::Draggable)?, Attr::Draggable(true));
            draggable_before.push((id, was));
            scene.set_attr(id, Attr::Draggable(false))?;
            scene.cancel_drag(id)?;
        }
        let bounds = targets_bounds(scene, nodes, &config)
            .ok_or(SceneError::UnknownShape { id: nodes[0] })?;

        let border = scene.rect(
            bounds.x,
            bounds.y,
            bounds.width,
            bounds.height,
            ShapeOptions {
                fill: Color::TRANSPARENT,
                border: Some(Border::new(config.border_width, config.border_color)),
                draggable: true,
                ignored: true,
                ..ShapeOptions::default()
            },
        )?;

        // Sides before anchors: paint order decides which handle keeps a
        // press that lands on both.
        let mut sides = Vec::new();
        for position in &config.sides_enabled {
            if sides.iter().any(|(p, _)| p == position) {
                continue;
            }
            let bar = position.bar(&bounds, config.side_thickness());
            let side = scene.rect(
                bar.x,
                bar.y,
                bar.width,
                bar.height,
                ShapeOptions {
                    fill: config.side_color,
                    draggable: true,
                    ignored: true,
                    ..ShapeOptions::default()
                },
            )?;
            sides.push((*position, side));
        }

        let mut anchors = Vec::new();
        for position in &config.anchors_enabled {
            if anchors.iter().any(|(p, _)| p == position) {
                continue;
            }
            let corner = position.corner(&bounds);
            let anchor = scene.circle(
                corner.x,
                corner.y,
                config.size / 2.0,
                ShapeOptions {
                    fill: config.color,
                    draggable: true,
                    ignored: true,
                    ..ShapeOptions::default()
                },
            )?;
            anchors.push((*position, anchor));
        }

        {
            let mut state = self.state.borrow_mut();
            state.nodes = nodes.to_vec();
            state.draggable_before = draggable_before;
            state.bounds = Some(bounds);
            state.border_last = bounds.top_left();
            state.resize_start = None;
            state.overlay = Some(Overlay {
                border,
                sides: sides.clone(),
                anchors: anchors.clone(),
            });
        }

        self.wire_border(scene, border)?;
        for (position, side) in sides {
            self.wire_handle(scene, ResizeHandle::Side(position), side)?;
        }
        for (position, anchor) in anchors {
            self.wire_handle(scene, ResizeHandle::Anchor(position), anchor)?;
        }
        tracing::debug!("Transformer attached to {} shapes, bounds {:?}", nodes.len(), bounds);
        Ok(())
    }

    /// Removes the overlay and restores the targets' draggable flags.
    /// Returns false if nothing was attached.
    pub fn detach(&self, scene: &mut Scene) -> bool {
        let (overlay, restore) = {
            let mut state = self.state.borrow_mut();
            state.nodes.clear();
            state.bounds = None;
            state.resize_start = None;
            (state.overlay.take(), std::mem::take(&mut state.draggable_before))
        };
        let Some(overlay) = overlay else {
            return false;
        };
        for id in overlay.shapes() {
            scene.destroy(id);
        }
        for (id, was) in restore {
            if scene.contains(id) {
                if let Err(e) = scene.set_attr(id, Attr::Draggable(was)) {
                    tracing::warn!("Failed to restore draggable on {}: {}", id, e);
                }
            }
        }
        tracing::debug!("Transformer detached");
        true
    }

    /// Recomputes the bounds from the targets and moves the overlay onto
    /// them. Call after changing target geometry from a resize handler.
    pub fn update(&self, scene: &mut Scene) -> Result<()> {
        let (nodes, config) = {
            let state = self.state.borrow();
            (state.nodes.clone(), state.config.clone())
        };
        let live: Vec<ShapeId> = nodes.into_iter().filter(|id| scene.contains(*id)).collect();
        let Some(bounds) = targets_bounds(scene, &live, &config) else {
            return Ok(());
        };
        self.place_overlay(scene, bounds, None)
    }

    fn place_overlay(
        &self,
        scene: &mut Scene,
        bounds: Rect,
        skip: Option<ShapeId>,
    ) -> Result<()> {
        let (overlay, thickness) = {
            let mut state = self.state.borrow_mut();
            state.bounds = Some(bounds);
            state.border_last = bounds.top_left();
            (state.overlay.clone(), state.config.side_thickness())
        };
        let Some(overlay) = overlay else {
            return Ok(());
        };
        scene.set_attrs(
            overlay.border,
            [
                Attr::X(bounds.x),
                Attr::Y(bounds.y),
                Attr::Width(bounds.width),
                Attr::Height(bounds.height),
            ],
        )?;
        for (position, side) in overlay.sides {
            if Some(side) == skip {
                continue;
            }
            let bar = position.bar(&bounds, thickness);
            scene.set_attrs(
                side,
                [
                    Attr::X(bar.x),
                    Attr::Y(bar.y),
                    Attr::Width(bar.width),
                    Attr::Height(bar.height),
                ],
            )?;
        }
        for (position, anchor) in overlay.anchors {
            if Some(anchor) == skip {
                continue;
            }
            let corner = position.corner(&bounds);
            scene.set_attrs(anchor, [Attr::X(corner.x), Attr::Y(corner.y)])?;
        }
        Ok(())
    }

    /// Drops the drag of every overlay shape except `keep`.
    fn claim_drag(&self, scene: &mut Scene, keep: ShapeId) {
        let others: Vec<ShapeId> = {
            let state = self.state.borrow();
            state
                .overlay
                .as_ref()
                .map(|o| o.shapes().filter(|id| *id != keep).collect())
                .unwrap_or_default()
        };
        for id in others {
            if let Err(e) = scene.cancel_drag(id) {
                tracing::warn!("Failed to cancel drag on {}: {}", id, e);
            }
        }
    }

    fn wire_border(&self, scene: &mut Scene, border: ShapeId) -> Result<()> {
        let state = Rc::clone(&self.state);
        scene.on(border, EventKind::DragStart, move |_, event| {
            if let EventData::Drag { position, .. } = event.data {
                state.borrow_mut().border_last = position;
            }
        })?;

        let this = self.clone();
        scene.on(border, EventKind::Drag, move |scene, event| {
            this.on_border_drag(scene, event);
        })?;

        let this = self.clone();
        scene.on(border, EventKind::DragEnd, move |scene, _| {
            if let Err(e) = this.update(scene) {
                tracing::warn!("Transformer update after drag failed: {}", e);
            }
        })?;
        Ok(())
    }

    fn on_border_drag(&self, scene: &mut Scene, event: &ShapeEvent) {
        let EventData::Drag { position, .. } = event.data else {
            return;
        };
        let (delta, nodes, bounds) = {
            let mut state = self.state.borrow_mut();
            let delta = position - state.border_last;
            state.border_last = position;
            let bounds = state.bounds.map(|b| b.translate(delta.x, delta.y));
            (delta, state.nodes.clone(), bounds)
        };
        for id in nodes {
            let Some(at) = scene.shape(id).map(|s| s.position()) else {
                tracing::warn!("Transformer target {} no longer exists", id);
                continue;
            };
            if let Err(e) = scene.set_attrs(id, [Attr::X(at.x + delta.x), Attr::Y(at.y + delta.y)]) {
                tracing::warn!("Failed to move {}: {}", id, e);
            }
        }
        if let Some(bounds) = bounds {
            if let Err(e) = self.place_overlay(scene, bounds, None) {
                tracing::warn!("Failed to move selection handles: {}", e);
            }
        }
    }

    fn wire_handle(&self, scene: &mut Scene, handle: ResizeHandle, id: ShapeId) -> Result<()> {
        let this = self.clone();
        scene.on(id, EventKind::DragStart, move |scene, event| {
            this.claim_drag(scene, event.target);
            if let EventData::Drag { position, .. } = event.data {
                let mut state = this.state.borrow_mut();
                state.resize_start = state.bounds.map(|b| (b, position));
            }
        })?;

        let this = self.clone();
        scene.on(id, EventKind::Drag, move |scene, event| {
            this.on_handle_drag(scene, handle, event);
        })?;

        let this = self.clone();
        scene.on(id, EventKind::DragEnd, move |scene, _| {
            let bounds = {
                let mut state = this.state.borrow_mut();
                state.resize_start = None;
                state.bounds
            };
            if let Some(bounds) = bounds {
                if let Err(e) = this.place_overlay(scene, bounds, None) {
                    tracing::warn!("Failed to snap handles: {}", e);
                }
            }
        })?;
        Ok(())
    }

    fn on_handle_drag(&self, scene: &mut Scene, handle: ResizeHandle, event: &ShapeEvent) {
        let EventData::Drag { position, .. } = event.data else {
            return;
        };
        let (previous, current, targets, handlers) = {
            let state = self.state.borrow();
            let (Some((start_bounds, start_pos)), Some(previous)) = (state.resize_start, state.bounds)
            else {
                return;
            };
            let delta = position - start_pos;
            let min_size = state.config.min_size();
            let current = match handle {
                ResizeHandle::Anchor(anchor) => {
                    resize_bounds(start_bounds, anchor, delta.x, delta.y, min_size)
                }
                ResizeHandle::Side(side) => {
                    resize_side(start_bounds, side, delta.x, delta.y, min_size)
                }
            };
            let handlers: Vec<ResizeHandler> =
                state.resize_handlers.iter().map(|(_, h)| Rc::clone(h)).collect();
            (previous, current, state.nodes.clone(), handlers)
        };

        // A side bar is pinned back onto its edge; an anchor follows the pointer.
        let skip = match handle {
            ResizeHandle::Anchor(_) => Some(event.target),
            ResizeHandle::Side(_) => None,
        };
        if let Err(e) = self.place_overlay(scene, current, skip) {
            tracing::warn!("Failed to resize selection: {}", e);
            return;
        }
        let resize = ResizeEvent {
            handle,
            previous,
            current,
            targets,
        };
        tracing::trace!("Transformer resize {:?}: {:?} -> {:?}", handle, previous, current);
        for handler in handlers {
            handler(scene, &resize);
        }
    }
}

/// Union of the targets' outlines, padded. `None` if no target exists.
fn targets_bounds(scene: &Scene, nodes: &[ShapeId], config: &TransformerConfig) -> Option<Rect> {
    nodes
        .iter()
        .filter_map(|id| scene.bounding_box(*id).ok())
        .map(|bbox| bbox.outline())
        .reduce(|a, b| a.union(&b))
        .map(|union| union.pad(&config.padding))
}
