//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`visualizer`]: the current scene, with highlight colors and list links
//! - [`log`]: numbered output log with scrolling
//! - [`metrics`]: exercise details, step/comparison/swap counters and outcome
//! - [`status`]: status bar with keybindings and stepper state
//!
//! Each pane module exports a `render_*` function taking the frame, its area
//! and the data to draw. Scroll offsets are passed by `&mut` and clamped while
//! rendering.

pub mod log;
pub mod metrics;
pub mod status;
pub mod visualizer;

pub use log::render_log_pane;
pub use metrics::render_metrics_pane;
pub use status::render_status_bar;
pub use visualizer::render_visualizer_pane;
