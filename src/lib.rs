//! # Introduction
//!
//! algostep runs classic data-structure and algorithm exercises one step at a
//! time. Each algorithm is instrumented with a [`engine::StepContext`]: it logs
//! what it does, highlights the elements it touches, publishes new states and
//! waits at gates. A [`engine::Stepper`] drives it on a worker thread and
//! turns those calls into a replayable step history shown in a terminal UI
//! built with [ratatui](https://docs.rs/ratatui).
//!
//! ## Execution pipeline
//!
//! ```text
//! Exercise → Inputs → Algorithm → StepContext → StepHistory → Snapshot → TUI
//! ```
//!
//! 1. [`exercise`]: the catalog, input parsing, presets and practice checks.
//! 2. [`algorithms`]: the instrumented algorithm functions.
//! 3. [`engine`]: the stepper state machine (run, step, prev, auto-play,
//!    pause, reset) and the gating protocol between controller and worker.
//! 4. [`snapshot`]: the numbered output log, the append-only step history and
//!    the observable [`snapshot::Snapshot`].
//! 5. [`visual`]: array, linked-list and pattern visualizers producing a
//!    renderer-agnostic [`visual::Scene`].
//! 6. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Exercises
//!
//! Array basics (max, sum/average, insert, delete), linear and binary search,
//! bubble sort, naive and KMP pattern matching, and singly, doubly and
//! circular linked-list operations.

pub mod algorithms;
pub mod config;
pub mod engine;
pub mod exercise;
pub mod snapshot;
pub mod ui;
pub mod visual;
