//! Stable per-name frame colors.
//!
//! Colors are a pure function of the frame name, so the same function keeps
//! the same color across renders and across reports.

pub mod color;
pub mod hasher;

// Re-export main types and functions
pub use color::{color_for_vector, frame_color, normalize_frame_name, FrameLabel, Rgb, HIGHLIGHT};
pub use hasher::name_hash;
