//! Error handling for Radial
//!
//! Provides error types for every layer of the engine:
//! - Color errors (parsing CSS-style color literals)
//! - Shape errors (attribute validation)
//! - Scene errors (unknown shapes, inert scenes)
//! - Surface errors (raster allocation, image export)
//! - Config errors (loading configuration files)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

use crate::types::{AttrKey, ShapeId, ShapeKind};

/// Color literal could not be parsed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColorError {
    /// Empty string
    #[error("Empty color literal")]
    Empty,

    /// Malformed `#rgb`, `#rrggbb` or `#rrggbbaa` literal
    #[error("Invalid hex color: {literal}")]
    InvalidHex {
        /// The offending literal.
        literal: String,
    },

    /// `rgb()`/`rgba()` called with the wrong number of components
    #[error("Color {literal} has {found} components, expected {expected}")]
    WrongArity {
        /// The offending literal.
        literal: String,
        /// Expected component count.
        expected: usize,
        /// Component count found.
        found: usize,
    },

    /// A component is not a number or is out of range
    #[error("Invalid component '{component}' in color {literal}")]
    InvalidComponent {
        /// The offending literal.
        literal: String,
        /// The component that failed to parse.
        component: String,
    },

    /// Unknown color name
    #[error("Unknown color: {literal}")]
    Unknown {
        /// The offending literal.
        literal: String,
    },
}

/// Shape attribute validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    /// The attribute does not exist on this variant (e.g. `radius` on a rect)
    #[error("Attribute {key} is not applicable to {kind}")]
    AttrNotApplicable {
        /// The shape variant.
        kind: ShapeKind,
        /// The rejected attribute key.
        key: AttrKey,
    },

    /// A size attribute received a negative or non-finite value
    #[error("Invalid value {value} for {key}")]
    InvalidDimension {
        /// The rejected attribute key.
        key: AttrKey,
        /// The rejected value.
        value: f64,
    },

    /// A position, angle, scale or point coordinate is NaN or infinite
    #[error("Non-finite value {value} for {key}")]
    NotFinite {
        /// The rejected attribute key.
        key: AttrKey,
        /// The rejected value.
        value: f64,
    },

    /// A polygon needs at least three sides
    #[error("Polygon needs at least 3 sides, got {sides}")]
    TooFewSides {
        /// The rejected side count.
        sides: u32,
    },

    /// Side count above the supported maximum
    #[error("Polygon supports at most {max} sides, got {sides}")]
    TooManySides {
        /// The rejected side count.
        sides: u32,
        /// The largest accepted side count.
        max: u32,
    },
}

/// Scene-level errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// The id does not name a live shape of this scene
    #[error("Unknown shape {id}")]
    UnknownShape {
        /// The id that was looked up.
        id: ShapeId,
    },

    /// The scene has no usable drawing surface
    #[error("Scene has no usable drawing surface")]
    Inert,

    /// The transformer was asked to attach to nothing usable
    #[error("Transformer error: {reason}")]
    Transformer {
        /// What went wrong.
        reason: String,
    },
}

/// Drawing surface errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SurfaceError {
    /// Width or height is zero or too large to allocate
    #[error("Invalid surface dimensions {width}x{height}")]
    InvalidDimensions {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },

    /// Writing the surface to an image failed
    #[error("Failed to export surface: {reason}")]
    Export {
        /// The underlying failure.
        reason: String,
    },
}

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Malformed JSON
    #[error("Invalid configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// A value parsed but is out of range
    #[error("Invalid configuration value for {field}: {reason}")]
    InvalidValue {
        /// The field name.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Main error type for Radial
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Color error
    #[error(transparent)]
    Color(#[from] ColorError),

    /// Shape error
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// Scene error
    #[error(transparent)]
    Scene(#[from] SceneError),

    /// Surface error
    #[error(transparent)]
    Surface(#[from] SurfaceError),

    /// Config error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if this error names a shape that does not exist
    pub fn is_unknown_shape(&self) -> bool {
        matches!(self, Error::Scene(SceneError::UnknownShape { .. }))
    }

    /// Check if this error comes from an inert scene
    pub fn is_inert(&self) -> bool {
        matches!(self, Error::Scene(SceneError::Inert))
    }

    /// Check if this is an attribute validation error
    pub fn is_shape_error(&self) -> bool {
        matches!(self, Error::Shape(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
