//! Raster surface backed by a tiny-skia pixmap.

use image::RgbaImage;
use radial_core::{Color, Point, Rect, SurfaceError};
use std::f64::consts::TAU;
use std::path::Path as FsPath;
use tiny_skia as skia;

use super::{DrawingSurface, Paint};
use crate::attrs::{LineCap, LineJoin, LineStyle, Shadow};

#[derive(Debug, Clone, Copy)]
enum PathOp {
    MoveTo(f32, f32),
    LineTo(f32, f32),
    QuadTo(f32, f32, f32, f32),
    Close,
}

#[derive(Debug, Clone)]
struct State {
    transform: skia::Transform,
    fill: Paint,
    stroke_color: Color,
    stroke_width: f64,
    line_style: LineStyle,
    shadow: Option<Shadow>,
    alpha: f64,
}

impl Default for State {
    fn default() -> Self {
        Self {
            transform: skia::Transform::identity(),
            fill: Paint::default(),
            stroke_color: Color::BLACK,
            stroke_width: 1.0,
            line_style: LineStyle::default(),
            shadow: None,
            alpha: 1.0,
        }
    }
}

/// Software raster surface. Shadows are drawn as an offset copy without blur.
pub struct PixmapSurface {
    pixmap: skia::Pixmap,
    origin: Point,
    state: State,
    stack: Vec<State>,
    path: Vec<PathOp>,
    has_current_point: bool,
}

impl std::fmt::Debug for PixmapSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixmapSurface")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .field("origin", &self.origin)
            .finish()
    }
}

fn to_skia_color(color: Color, alpha: f64) -> skia::Color {
    let a = color.with_alpha_factor(alpha.clamp(0.0, 1.0) as f32);
    skia::Color::from_rgba8(a.r, a.g, a.b, a.alpha_u8())
}

fn to_skia_stroke(width: f64, style: &LineStyle) -> skia::Stroke {
    let dash = style.dash_pattern().and_then(|pattern| {
        skia::StrokeDash::new(pattern.into_iter().map(|d| d as f32).collect(), 0.0)
    });
    skia::Stroke {
        width: width as f32,
        line_cap: match style.cap {
            LineCap::Butt => skia::LineCap::Butt,
            LineCap::Round => skia::LineCap::Round,
            LineCap::Square => skia::LineCap::Square,
        },
        line_join: match style.join {
            LineJoin::Miter => skia::LineJoin::Miter,
            LineJoin::Round => skia::LineJoin::Round,
            LineJoin::Bevel => skia::LineJoin::Bevel,
        },
        dash,
        ..Default::default()
    }
}

fn solid_paint(color: Color, alpha: f64) -> skia::Paint<'static> {
    let mut paint = skia::Paint::default();
    paint.anti_alias = true;
    paint.set_color(to_skia_color(color, alpha));
    paint
}

impl PixmapSurface {
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        let pixmap = skia::Pixmap::new(width, height)
            .ok_or(SurfaceError::InvalidDimensions { width, height })?;
        Ok(Self {
            pixmap,
            origin: Point::default(),
            state: State::default(),
            stack: Vec::new(),
            path: Vec::new(),
            has_current_point: false,
        })
    }

    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    /// Straight-alpha color of one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some(Color::rgba(
            c.red(),
            c.green(),
            c.blue(),
            c.alpha() as f32 / 255.0,
        ))
    }

    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.pixmap.width(), self.pixmap.height(), |x, y| {
            let c = self
                .pixmap
                .pixel(x, y)
                .map(|p| p.demultiply())
                .unwrap_or_else(|| skia::ColorU8::from_rgba(0, 0, 0, 0));
            image::Rgba([c.red(), c.green(), c.blue(), c.alpha()])
        })
    }

    pub fn save_png(&self, path: &FsPath) -> Result<(), SurfaceError> {
        super::write_png(&self.to_image(), path)
    }

    fn build_path(&self) -> Option<skia::Path> {
        let mut pb = skia::PathBuilder::new();
        for op in &self.path {
            match *op {
                PathOp::MoveTo(x, y) => pb.move_to(x, y),
                PathOp::LineTo(x, y) => pb.line_to(x, y),
                PathOp::QuadTo(cx, cy, x, y) => pb.quad_to(cx, cy, x, y),
                PathOp::Close => pb.close(),
            }
        }
        pb.finish()
    }

    fn fill_paint(&self) -> skia::Paint<'static> {
        match self.state.fill {
            Paint::Solid(color) => solid_paint(color, self.state.alpha),
            Paint::Linear {
                start,
                end,
                from,
                to,
            } => {
                let stops = vec![
                    skia::GradientStop::new(0.0, to_skia_color(from, self.state.alpha)),
                    skia::GradientStop::new(1.0, to_skia_color(to, self.state.alpha)),
                ];
                let shader = skia::LinearGradient::new(
                    skia::Point::from_xy(start.x as f32, start.y as f32),
                    skia::Point::from_xy(end.x as f32, end.y as f32),
                    stops,
                    skia::SpreadMode::Pad,
                    skia::Transform::identity(),
                );
                match shader {
                    Some(shader) => {
                        let mut paint = skia::Paint::default();
                        paint.anti_alias = true;
                        paint.shader = shader;
                        paint
                    }
                    // Degenerate gradient line
                    None => solid_paint(from, self.state.alpha),
                }
            }
        }
    }

    fn shadow_transform(&self) -> Option<(skia::Paint<'static>, skia::Transform)> {
        let shadow = self.state.shadow?;
        if shadow.color.a <= 0.0 {
            return None;
        }
        let offset =
            skia::Transform::from_translate(shadow.offset.x as f32, shadow.offset.y as f32);
        Some((
            solid_paint(shadow.color, self.state.alpha),
            offset.pre_concat(self.state.transform),
        ))
    }

    fn push_point(&mut self, x: f64, y: f64) {
        if self.has_current_point {
            self.path.push(PathOp::LineTo(x as f32, y as f32));
        } else {
            self.path.push(PathOp::MoveTo(x as f32, y as f32));
            self.has_current_point = true;
        }
    }
}

impl DrawingSurface for PixmapSurface {
    fn width(&self) -> u32 {
        self.pixmap.width()
    }

    fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn origin(&self) -> Point {
        self.origin
    }

    fn snapshot(&self) -> Option<RgbaImage> {
        Some(self.to_image())
    }

    fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn clear_rect(&mut self, rect: Rect) {
        let Some(r) =
            skia::Rect::from_xywh(rect.x as f32, rect.y as f32, rect.width as f32, rect.height as f32)
        else {
            return;
        };
        let mut paint = skia::Paint::default();
        paint.blend_mode = skia::BlendMode::Clear;
        self.pixmap.fill_rect(r, &paint, self.state.transform, None);
    }

    fn begin_path(&mut self) {
        self.path.clear();
        self.has_current_point = false;
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.path.push(PathOp::MoveTo(x as f32, y as f32));
        self.has_current_point = true;
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.push_point(x, y);
    }

    fn quad_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
        if !self.has_current_point {
            self.move_to(cx, cy);
        }
        self.path
            .push(PathOp::QuadTo(cx as f32, cy as f32, x as f32, y as f32));
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64) {
        let sweep = (end - start).clamp(-TAU, TAU);
        let steps = ((sweep.abs() * radius.max(1.0) / 2.0).ceil() as usize).clamp(8, 256);
        for i in 0..=steps {
            let angle = start + sweep * i as f64 / steps as f64;
            self.push_point(cx + radius * angle.cos(), cy + radius * angle.sin());
        }
    }

    fn rect(&mut self, rect: Rect) {
        self.path.push(PathOp::MoveTo(rect.x as f32, rect.y as f32));
        self.path.push(PathOp::LineTo(rect.right() as f32, rect.y as f32));
        self.path
            .push(PathOp::LineTo(rect.right() as f32, rect.bottom() as f32));
        self.path.push(PathOp::LineTo(rect.x as f32, rect.bottom() as f32));
        self.path.push(PathOp::Close);
        self.has_current_point = true;
    }

    fn close_path(&mut self) {
        self.path.push(PathOp::Close);
    }

    fn fill(&mut self) {
        let Some(path) = self.build_path() else {
            return;
        };
        if let Some((paint, transform)) = self.shadow_transform() {
            self.pixmap
                .fill_path(&path, &paint, skia::FillRule::Winding, transform, None);
        }
        let paint = self.fill_paint();
        self.pixmap.fill_path(
            &path,
            &paint,
            skia::FillRule::Winding,
            self.state.transform,
            None,
        );
    }

    fn stroke(&mut self) {
        if self.state.stroke_width <= 0.0 {
            return;
        }
        let Some(path) = self.build_path() else {
            return;
        };
        let stroke = to_skia_stroke(self.state.stroke_width, &self.state.line_style);
        if let Some((paint, transform)) = self.shadow_transform() {
            self.pixmap
                .stroke_path(&path, &paint, &stroke, transform, None);
        }
        let paint = solid_paint(self.state.stroke_color, self.state.alpha);
        self.pixmap
            .stroke_path(&path, &paint, &stroke, self.state.transform, None);
    }

    fn set_fill(&mut self, paint: Paint) {
        self.state.fill = paint;
    }

    fn set_stroke(&mut self, color: Color, width: f64) {
        self.state.stroke_color = color;
        self.state.stroke_width = width;
    }

    fn set_line_style(&mut self, style: &LineStyle) {
        self.state.line_style = style.clone();
    }

    fn set_shadow(&mut self, shadow: Option<Shadow>) {
        self.state.shadow = shadow;
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.state.alpha = alpha.clamp(0.0, 1.0);
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.state.transform = self
            .state
            .transform
            .pre_concat(skia::Transform::from_translate(dx as f32, dy as f32));
    }

    fn rotate(&mut self, degrees: f64) {
        self.state.transform = self
            .state
            .transform
            .pre_concat(skia::Transform::from_rotate(degrees as f32));
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.state.transform = self
            .state
            .transform
            .pre_concat(skia::Transform::from_scale(sx as f32, sy as f32));
    }

    fn draw_image(&mut self, image: &RgbaImage, dest: Rect) {
        let (w, h) = image.dimensions();
        let Some(mut src) = skia::Pixmap::new(w, h) else {
            return;
        };
        for (dst, px) in src.pixels_mut().iter_mut().zip(image.pixels()) {
            *dst = skia::ColorU8::from_rgba(px[0], px[1], px[2], px[3]).premultiply();
        }
        let transform = self
            .state
            .transform
            .pre_concat(skia::Transform::from_translate(dest.x as f32, dest.y as f32))
            .pre_concat(skia::Transform::from_scale(
                (dest.width / w as f64) as f32,
                (dest.height / h as f64) as f32,
            ));
        let paint = skia::PixmapPaint {
            opacity: self.state.alpha as f32,
            ..Default::default()
        };
        self.pixmap
            .draw_pixmap(0, 0, src.as_ref(), &paint, transform, None);
    }
}
