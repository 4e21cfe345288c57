//! # Radial
//!
//! A retained-mode 2D scene graph for interactive drawings:
//! - Circles, rects, triangles, polylines, regular polygons and images
//! - Hit testing, hover tracking and throttled dragging
//! - Pairwise collision and proximity events
//! - A selection transformer that moves and resizes groups of shapes
//!
//! ## Architecture
//!
//! Radial is organized as a workspace with multiple crates:
//!
//! 1. **radial-core** - Ids, geometry, bounding boxes, collision tests, colors, errors
//! 2. **radial-scene** - Drawing surfaces, shapes, events, the scene and the transformer
//! 3. **radial** - This crate: logging setup, re-exports and the demo binary

pub use radial_core;
pub use radial_scene;

pub use radial_core::{
    AttrKey, BoundingBox, Color, Error, Padding, Point, Rect, Result, SceneError, SceneId,
    ShapeError, ShapeId, ShapeKind,
};

pub use radial_scene::{
    AnchorPosition, Attr, Border, Clock, DrawingSurface, EventData, EventKind, Gradient,
    HandlerId, LineCap, LineJoin, LineStyle, ManualClock, PixmapSurface, PointerEvent,
    RadialConfig, RecordingSurface, ResizeEvent, ResizeHandle, Scene, SceneConfig, SceneEvent,
    Shadow, ShapeEvent, ShapeOptions, SidePosition, SystemClock, Transformer, TransformerConfig,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
