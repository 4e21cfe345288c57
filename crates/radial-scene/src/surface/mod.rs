//! Drawing surface abstraction.
//!
//! Shapes render through a small immediate-mode API modelled on a 2D canvas
//! context: a state stack, a current path, fill and stroke styles, and an
//! affine transform. The scene never touches pixels directly, so the same
//! render code drives a raster target ([`PixmapSurface`]) or a command log
//! ([`RecordingSurface`]).

mod pixmap;
mod recording;

pub use pixmap::PixmapSurface;
pub use recording::{CommandLog, DrawCommand, RecordingSurface};

use image::RgbaImage;
use radial_core::{Color, Point, Rect, SurfaceError};
use std::path::Path;

use crate::attrs::{LineStyle, Shadow};

/// Fill style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Solid(Color),
    Linear {
        start: Point,
        end: Point,
        from: Color,
        to: Color,
    },
}

impl Default for Paint {
    fn default() -> Self {
        Paint::Solid(Color::BLACK)
    }
}

pub trait DrawingSurface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Position of the surface's top-left corner in client coordinates.
    fn origin(&self) -> Point {
        Point::default()
    }

    fn save(&mut self);
    fn restore(&mut self);

    fn clear_rect(&mut self, rect: Rect);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn quad_to(&mut self, cx: f64, cy: f64, x: f64, y: f64);
    /// Circular arc; angles in radians, clockwise in screen space.
    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64);
    fn rect(&mut self, rect: Rect);
    fn close_path(&mut self);

    fn fill(&mut self);
    fn stroke(&mut self);

    fn set_fill(&mut self, paint: Paint);
    fn set_stroke(&mut self, color: Color, width: f64);
    /// Cap, join and dash pattern for subsequent strokes.
    fn set_line_style(&mut self, style: &LineStyle);
    fn set_shadow(&mut self, shadow: Option<Shadow>);
    fn set_global_alpha(&mut self, alpha: f64);

    fn translate(&mut self, dx: f64, dy: f64);
    /// Degrees.
    fn rotate(&mut self, degrees: f64);
    fn scale(&mut self, sx: f64, sy: f64);

    fn draw_image(&mut self, image: &RgbaImage, dest: Rect);

    fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width() as f64, self.height() as f64)
    }

    /// Current pixels, for surfaces that can be read back.
    fn snapshot(&self) -> Option<RgbaImage> {
        None
    }
}

pub(crate) fn write_png(pixels: &RgbaImage, path: &Path) -> Result<(), SurfaceError> {
    pixels
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| SurfaceError::Export {
            reason: e.to_string(),
        })?;
    tracing::debug!("Surface written to {}", path.display());
    Ok(())
}
