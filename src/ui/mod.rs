//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: application state, keyboard event loop, pane focus, speed presets
//! - **[`panes`]**: stateless render functions for each visible pane (visualizer,
//!   log, metrics, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with a [`Stepper`] and
//! call [`App::run`] to start the event loop. Keys are turned into stepper
//! [`Command`]s and every frame is drawn from a fresh [`Snapshot`].
//!
//! [`Stepper`]: crate::engine::Stepper
//! [`Command`]: crate::engine::Command
//! [`Snapshot`]: crate::snapshot::Snapshot
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
