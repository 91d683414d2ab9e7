//! IconVG Core - Vector icon encoding library
//!
//! This crate serializes vector drawing commands (path construction, register
//! selection, level-of-detail hints) into the compact IconVG binary format.
//!
//! # Example
//!
//! ```ignore
//! use iconvg_core::{Encoder, Metadata};
//!
//! let mut enc = Encoder::new(Metadata::default());
//! enc.start_path(0, 0.0, 0.0);
//! enc.abs_line_to(1.0, 1.0);
//! enc.abs_line_to(2.0, 2.0);
//! enc.close_path_end_path();
//! let bytes = enc.bytes().unwrap();
//! ```

pub mod command;
pub mod encode;

pub use command::{encode_commands, Command};
pub use encode::{DrawOp, EncodeError, Encoder, Mode, OpcodeSpec, MAGIC};

use serde::{Deserialize, Serialize};

/// Rectangle of the icon's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewBox {
    /// Top-left corner (x, y)
    pub min: [f32; 2],
    /// Bottom-right corner (x, y)
    pub max: [f32; 2],
}

impl Default for ViewBox {
    fn default() -> Self {
        Self {
            min: [-32.0, -32.0],
            max: [32.0, 32.0],
        }
    }
}

impl ViewBox {
    pub fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min: [min_x, min_y],
            max: [max_x, max_y],
        }
    }

    /// Check if this is the format's default view box
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

}

/// A non-premultiplied RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const OPAQUE_BLACK: Rgba = Rgba::new(0x00, 0x00, 0x00, 0xff);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Suggested palette, passed through to consumers of the icon.
///
/// The format's palette has [`Palette::LEN`] entries. A shorter list leaves
/// the remaining entries at their default of opaque black.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette(pub Vec<Rgba>);

impl Default for Palette {
    fn default() -> Self {
        Self(vec![Rgba::OPAQUE_BLACK; Self::LEN])
    }
}

impl Palette {
    /// Number of entries in the format's palette
    pub const LEN: usize = 64;

    /// Check if every entry, explicit or implied, is opaque black
    pub fn is_default(&self) -> bool {
        self.0.len() <= Self::LEN && self.0.iter().all(|&c| c == Rgba::OPAQUE_BLACK)
    }
}

/// Icon-level metadata written in the header.
///
/// Only values that differ from the format defaults produce metadata chunks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Metadata {
    /// Coordinate space of the icon
    pub view_box: ViewBox,
    /// Suggested palette, `None` meaning the default
    pub suggested_palette: Option<Palette>,
}

impl Metadata {
    /// Create metadata with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create metadata with the given view box and no suggested palette
    pub fn with_view_box(view_box: ViewBox) -> Self {
        Self {
            view_box,
            suggested_palette: None,
        }
    }

    /// Check if a suggested palette other than the default was requested
    pub fn has_suggested_palette(&self) -> bool {
        self.suggested_palette
            .as_ref()
            .is_some_and(|palette| !palette.is_default())
    }

    /// Check if all values are at their defaults
    pub fn is_default(&self) -> bool {
        self.view_box.is_default() && !self.has_suggested_palette()
    }
}
