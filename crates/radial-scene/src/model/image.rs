use ::image::RgbaImage;
use radial_core::{AttrKey, Color, Extent, Point, Rect, ShapeError, ShapeKind};
use std::rc::Rc;

use super::{dimension, replace, ShapeModel};
use crate::attrs::Attr;
use crate::surface::DrawingSurface;

/// Decoded bitmap stretched over a `width` x `height` box.
#[derive(Debug, Clone)]
pub struct ImageShape {
    pub width: f64,
    pub height: f64,
    pub pixels: Rc<RgbaImage>,
}

impl ImageShape {
    pub fn new(pixels: RgbaImage, width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            pixels: Rc::new(pixels),
        }
    }

    /// Uses the bitmap's own dimensions as the box size.
    pub fn natural(pixels: RgbaImage) -> Self {
        let (w, h) = pixels.dimensions();
        Self::new(pixels, w as f64, h as f64)
    }
}

impl ShapeModel for ImageShape {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Image
    }

    fn extent(&self, _origin: Point) -> Extent {
        Extent::Size {
            width: self.width,
            height: self.height,
        }
    }

    fn attr(&self, key: AttrKey) -> Option<Attr> {
        match key {
            AttrKey::Width => Some(Attr::Width(self.width)),
            AttrKey::Height => Some(Attr::Height(self.height)),
            _ => None,
        }
    }

    fn apply(&mut self, attr: &Attr) -> Result<bool, ShapeError> {
        match attr {
            Attr::Width(w) => Ok(replace(&mut self.width, dimension(AttrKey::Width, *w)?)),
            Attr::Height(h) => Ok(replace(&mut self.height, dimension(AttrKey::Height, *h)?)),
            other => Err(self.not_applicable(other.key())),
        }
    }

    fn draw(&self, origin: Point, _fill: Color, surface: &mut dyn DrawingSurface) {
        let dest = Rect::new(origin.x, origin.y, self.width, self.height);
        if self.pixels.width() > 0 && self.pixels.height() > 0 {
            surface.draw_image(&self.pixels, dest);
        }
        // Path for the border stroke.
        surface.begin_path();
        surface.rect(dest);
    }
}
