//! Offcpu Flame
//!
//! Call-tree aggregation and flamegraph rendering for off-CPU
//! profiling reports.
//!
//! The core is two pure pieces:
//! - [`aggregator`] turns selected report rows (call-chain strings plus a
//!   thread label) into a weighted call tree
//! - [`palette`] maps frame names to stable colors
//!
//! Everything else feeds them or renders their output.
//!
//! ## Getting Started
//!
//! ```bash
//! offcpu-flame render --input selection.json --flamegraph offcpu.svg --summary
//! ```

pub mod aggregator;
pub mod commands;
pub mod flamegraph;
pub mod output;
pub mod palette;
pub mod parser;
pub mod session;
pub mod utils;
