use image::RgbaImage;
use radial_core::{Color, Point, Rect};
use std::cell::RefCell;
use std::rc::Rc;

use super::{DrawingSurface, Paint};
use crate::attrs::{LineStyle, Shadow};

/// One call made against a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    ClearRect(Rect),
    BeginPath,
    MoveTo(Point),
    LineTo(Point),
    QuadTo { control: Point, to: Point },
    Arc {
        center: Point,
        radius: f64,
        start: f64,
        end: f64,
    },
    Rect(Rect),
    ClosePath,
    Fill,
    Stroke,
    SetFill(Paint),
    SetStroke { color: Color, width: f64 },
    SetLineStyle(LineStyle),
    SetShadow(Option<Shadow>),
    SetGlobalAlpha(f64),
    Translate(f64, f64),
    Rotate(f64),
    Scale(f64, f64),
    DrawImage { width: u32, height: u32, dest: Rect },
}

/// Shared view of the commands recorded so far.
///
/// The scene owns the surface, so tests keep one of these to inspect what
/// was drawn.
#[derive(Debug, Clone, Default)]
pub struct CommandLog {
    commands: Rc<RefCell<Vec<DrawCommand>>>,
}

impl CommandLog {
    pub fn commands(&self) -> Vec<DrawCommand> {
        self.commands.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.commands.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.commands.borrow_mut().clear();
    }

    pub fn count(&self, predicate: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.borrow().iter().filter(|c| predicate(c)).count()
    }

    /// Number of full-surface clears, i.e. repaints.
    pub fn clears(&self) -> usize {
        self.count(|c| matches!(c, DrawCommand::ClearRect(_)))
    }

    fn push(&self, command: DrawCommand) {
        self.commands.borrow_mut().push(command);
    }
}

/// Surface that records calls instead of rasterizing them.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    origin: Point,
    log: CommandLog,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            origin: Point::default(),
            log: CommandLog::default(),
        }
    }

    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    pub fn log(&self) -> CommandLog {
        self.log.clone()
    }
}

impl DrawingSurface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn origin(&self) -> Point {
        self.origin
    }

    fn save(&mut self) {
        self.log.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.log.push(DrawCommand::Restore);
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.log.push(DrawCommand::ClearRect(rect));
    }

    fn begin_path(&mut self) {
        self.log.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.log.push(DrawCommand::MoveTo(Point::new(x, y)));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.log.push(DrawCommand::LineTo(Point::new(x, y)));
    }

    fn quad_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
        self.log.push(DrawCommand::QuadTo {
            control: Point::new(cx, cy),
            to: Point::new(x, y),
        });
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64) {
        self.log.push(DrawCommand::Arc {
            center: Point::new(cx, cy),
            radius,
            start,
            end,
        });
    }

    fn rect(&mut self, rect: Rect) {
        self.log.push(DrawCommand::Rect(rect));
    }

    fn close_path(&mut self) {
        self.log.push(DrawCommand::ClosePath);
    }

    fn fill(&mut self) {
        self.log.push(DrawCommand::Fill);
    }

    fn stroke(&mut self) {
        self.log.push(DrawCommand::Stroke);
    }

    fn set_fill(&mut self, paint: Paint) {
        self.log.push(DrawCommand::SetFill(paint));
    }

    fn set_stroke(&mut self, color: Color, width: f64) {
        self.log.push(DrawCommand::SetStroke { color, width });
    }

    fn set_line_style(&mut self, style: &LineStyle) {
        self.log.push(DrawCommand::SetLineStyle(style.clone()));
    }

    fn set_shadow(&mut self, shadow: Option<Shadow>) {
        self.log.push(DrawCommand::SetShadow(shadow));
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.log.push(DrawCommand::SetGlobalAlpha(alpha));
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.log.push(DrawCommand::Translate(dx, dy));
    }

    fn rotate(&mut self, degrees: f64) {
        self.log.push(DrawCommand::Rotate(degrees));
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.log.push(DrawCommand::Scale(sx, sy));
    }

    fn draw_image(&mut self, image: &RgbaImage, dest: Rect) {
        self.log.push(DrawCommand::DrawImage {
            width: image.width(),
            height: image.height(),
            dest,
        });
    }
}
