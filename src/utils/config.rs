//! Configuration and constants for the CLI.

/// Current report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

// Name hashing parameters
// Changing any of these changes every frame color, so they are fixed
pub const HASH_DECAY: f64 = 0.70;
pub const HASH_MODULUS: u32 = 10;
pub const HASH_MAX_CHARS: usize = 7;

/// Fill used for highlighted frames, bypassing the name hash
pub const HIGHLIGHT_COLOR: (u8, u8, u8) = (230, 0, 230);

// Root names of a freshly aggregated tree
pub const INVERTED_ROOT_NAME: &str = "samples";
pub const NORMAL_ROOT_NAME: &str = "processes";

/// Placeholder frame for rows whose call chain is empty
pub const NO_CALLCHAIN: &str = "[NO CALLCHAIN]";

/// Separator between frames inside a call-chain string
pub const CHAIN_DELIMITER: &str = "<br>";

// SVG geometry
pub const DEFAULT_SVG_WIDTH: usize = 1200;
pub const FRAME_HEIGHT: usize = 18;
pub const TITLE_MARGIN: usize = 30;
pub const MIN_FRAME_WIDTH: f64 = 0.5;
