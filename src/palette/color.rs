//! Frame color mapping.
//!
//! Interpolates between a teal-ish and a blue end of the palette using the
//! name hash. Highlighted frames skip the hash entirely.

use super::hasher::name_hash;
use crate::utils::config::HIGHLIGHT_COLOR;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Hex form, e.g. `#E600E6`
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// ANSI truecolor foreground escape
    pub fn ansi_fg(self) -> String {
        format!("\x1b[38;2;{};{};{}m", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// The fixed color of highlighted frames
pub const HIGHLIGHT: Rgb = Rgb::new(HIGHLIGHT_COLOR.0, HIGHLIGHT_COLOR.1, HIGHLIGHT_COLOR.2);

/// A frame label as seen by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLabel<'a> {
    pub name: &'a str,
    pub highlighted: bool,
}

impl<'a> FrameLabel<'a> {
    pub fn new(name: &'a str) -> Self {
        Self {
            name,
            highlighted: false,
        }
    }

    pub fn highlighted(mut self, highlighted: bool) -> Self {
        self.highlighted = highlighted;
        self
    }
}

/// Strip the module qualifier and any parenthesized suffix from a frame name
///
/// **Public** - also used for display
///
/// `` libc.so`__futex_wait(int) `` becomes `__futex_wait`.
pub fn normalize_frame_name(name: &str) -> &str {
    let name = name.rsplit('`').next().unwrap_or(name);
    match name.find('(') {
        Some(idx) => &name[..idx],
        None => name,
    }
}

/// Map a hash vector in `[0, 1]` to a color
///
/// **Public** - lets callers color precomputed vectors
pub fn color_for_vector(v: f64) -> Rgb {
    let v = v.clamp(0.0, 1.0);
    let r = (55.0 * (1.0 - v)).round() as u8;
    let g = (230.0 * (1.0 - v)).round() as u8;
    let b = 200 + (55.0 * v).round() as u8;
    Rgb::new(r, g, b)
}

/// Color of a frame
///
/// **Public** - main entry point for renderers
pub fn frame_color(label: &FrameLabel<'_>) -> Rgb {
    if label.highlighted {
        return HIGHLIGHT;
    }
    color_for_vector(name_hash(Some(normalize_frame_name(label.name))))
}
