//! Radial demo.
//!
//! Builds a scene on a raster surface, drags a circle into a rect, resizes
//! a selection with the transformer and writes the result as a PNG.
//!
//! Usage: `radial [OUTPUT.png] [CONFIG.json]`

use anyhow::Context;
use image::{Rgba, RgbaImage};
use radial::{
    init_logging, AnchorPosition, Attr, Color, EventKind, Gradient, LineCap, LineJoin, LineStyle,
    ManualClock, PixmapSurface, Point, PointerEvent, RadialConfig, Scene, ShapeOptions,
    SidePosition, Transformer,
};
use std::path::{Path, PathBuf};

const WIDTH: u32 = 640;
const HEIGHT: u32 = 480;

fn checkerboard(size: u32, cell: u32) -> RgbaImage {
    RgbaImage::from_fn(size, size, |x, y| {
        if (x / cell + y / cell) % 2 == 0 {
            Rgba([40, 40, 40, 255])
        } else {
            Rgba([220, 220, 220, 255])
        }
    })
}

/// Feeds a press-move-release gesture, advancing the clock past the drag
/// throttle between moves.
fn drag(scene: &mut Scene, clock: &ManualClock, from: Point, to: Point, steps: u32) {
    let step_ms = scene.config().drag_throttle_ms;
    scene.dispatch_pointer(PointerEvent::down(from.x, from.y));
    for i in 1..=steps {
        let t = i as f64 / steps as f64;
        clock.advance_ms(step_ms);
        scene.dispatch_pointer(PointerEvent::moved(
            from.x + (to.x - from.x) * t,
            from.y + (to.y - from.y) * t,
        ));
        scene.run_frame();
    }
    scene.dispatch_pointer(PointerEvent::up(to.x, to.y));
    scene.run_frame();
}

fn main() -> anyhow::Result<()> {
    init_logging()?;

    let mut args = std::env::args().skip(1);
    let output = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("radial-demo.png"));
    let config = match args.next() {
        Some(path) => RadialConfig::load(Path::new(&path))
            .with_context(|| format!("loading configuration from {}", path))?,
        None => RadialConfig::default(),
    };
    let mut scene_config = config.scene.clone();
    scene_config.background.get_or_insert(Color::WHITE);

    let clock = ManualClock::new();
    let surface = PixmapSurface::new(WIDTH, HEIGHT)?;
    let mut scene = Scene::with_options(
        Some(Box::new(surface)),
        scene_config,
        Box::new(clock.clone()),
    );
    tracing::info!("Radial demo v{} on {}x{}", radial::VERSION, WIDTH, HEIGHT);

    let ball = scene.circle(
        80.0,
        80.0,
        30.0,
        ShapeOptions::filled(Color::RED)
            .with_border(3.0, Color::BLACK)
            .draggable()
            .collision(),
    )?;
    let wall = scene.rounded_rect(
        260.0,
        40.0,
        120.0,
        90.0,
        12.0,
        ShapeOptions::default()
            .with_gradient(Gradient {
                from: Color::BLUE,
                to: Color::rgb(0x87, 0xce, 0xeb),
                angle: 45.0,
            })
            .collision(),
    )?;
    let triangle = scene.triangle(120.0, 260.0, 70.0, ShapeOptions::filled(Color::GREEN))?;
    let hexagon = scene.polygon(
        300.0,
        320.0,
        50.0,
        6,
        ShapeOptions::filled(Color::rgb(0xff, 0xa5, 0x00)),
    )?;
    scene.styled_line(
        420.0,
        260.0,
        vec![
            Point::new(0.0, 0.0),
            Point::new(60.0, 80.0),
            Point::new(120.0, 20.0),
            Point::new(180.0, 120.0),
        ],
        4.0,
        LineStyle {
            cap: LineCap::Round,
            join: LineJoin::Round,
            dash: vec![12.0, 6.0],
        },
        ShapeOptions::filled(Color::rgb(0x80, 0x00, 0x80)),
    )?;
    scene.image(480.0, 40.0, 96.0, 96.0, checkerboard(8, 2), ShapeOptions::default())?;

    scene.on(ball, EventKind::Collision, move |scene, event| {
        tracing::info!("{} hit {:?}", event.target, event.collisions());
        if let Err(e) = scene.set_attr(event.target, Attr::Fill(Color::rgb(0xff, 0x69, 0xb4))) {
            tracing::warn!("Failed to recolor {}: {}", event.target, e);
        }
    })?;
    scene.on(wall, EventKind::Collision, |_, event| {
        tracing::info!("{} was hit by {:?}", event.target, event.collisions());
    })?;

    drag(&mut scene, &clock, Point::new(80.0, 80.0), Point::new(250.0, 85.0), 8);

    let transformer = Transformer::new(config.transformer.clone());
    transformer.attach(&mut scene, &[triangle, hexagon])?;
    transformer.on_resize(|_, event| {
        tracing::info!(
            "Selection resized by {:?}: {:.0}x{:.0} -> {:.0}x{:.0}",
            event.handle,
            event.previous.width,
            event.previous.height,
            event.current.width,
            event.current.height
        );
    });
    if let (Some(anchor), Some(bounds)) = (
        transformer.anchor(AnchorPosition::BottomRight),
        transformer.bounds(),
    ) {
        let corner = AnchorPosition::BottomRight.corner(&bounds);
        drag(&mut scene, &clock, corner, corner + Point::new(40.0, 30.0), 4);
        tracing::debug!("Anchor {} at {:?}", anchor, scene.shape(anchor).map(|s| s.position()));
    }
    if let Some(bounds) = transformer.bounds() {
        let edge = SidePosition::Left.bar(&bounds, config.transformer.side_thickness()).center();
        drag(&mut scene, &clock, edge, edge - Point::new(30.0, 0.0), 4);
    }

    scene.redraw();
    scene
        .export_png(&output)
        .with_context(|| format!("writing {}", output.display()))?;
    tracing::info!("Wrote {} shapes to {}", scene.len(), output.display());

    Ok(())
}
