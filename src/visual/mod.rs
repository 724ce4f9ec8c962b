//! Visual model driven by the stepper
//!
//! This module provides the display-side abstractions:
//! - [`Visualizer`]: the capability set the step context forwards to
//! - [`array`]: arrays, searches and sorts
//! - [`linked_list`]: singly, doubly and circular lists
//! - [`pattern`]: text, pattern and LPS rows for string matching
//!
//! # Scenes
//!
//! Visualizers do not draw anything themselves. They keep a [`Scene`], a
//! renderer-agnostic description of rows of cells with highlight marks, which
//! the TUI turns into styled spans:
//!
//! ```text
//! Delta / Highlight → Visualizer → Scene → ui::panes::visualizer
//! ```

pub mod array;
pub mod linked_list;
pub mod pattern;

pub use array::ArrayVisualizer;
pub use linked_list::LinkedListVisualizer;
pub use pattern::PatternVisualizer;

use serde::Serialize;
use std::fmt;

/// Highlight class applied to cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Highlight {
    Active,
    Comparing,
    Swapped,
    Sorted,
}

impl fmt::Display for Highlight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Highlight::Active => "active",
            Highlight::Comparing => "comparing",
            Highlight::Swapped => "swapped",
            Highlight::Sorted => "sorted",
        };
        f.write_str(name)
    }
}

/// Shape of a linked list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListShape {
    #[default]
    Singly,
    Doubly,
    Circular,
}

/// A state delta published by an algorithm through `update`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Delta {
    Array(Vec<i64>),
    List {
        nodes: Vec<i64>,
        shape: ListShape,
    },
    Pattern {
        text: String,
        pattern: String,
        lps: Option<Vec<usize>>,
    },
}

impl Delta {
    /// Rough heap footprint, used by the step history memory limit
    pub fn estimated_size(&self) -> usize {
        match self {
            Delta::Array(values) => values.len() * 8,
            Delta::List { nodes, .. } => nodes.len() * 8,
            Delta::Pattern { text, pattern, lps } => {
                text.len() + pattern.len() + lps.as_ref().map_or(0, |l| l.len() * 8)
            }
        }
    }
}

/// How consecutive cells of a track are connected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Link {
    #[default]
    None,
    Forward,
    Both,
    /// Forward links plus a link from the last cell back to the first
    Circular,
}

/// A single displayed cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    /// Small caption under the value (usually the index)
    pub caption: Option<String>,
    pub mark: Option<Highlight>,
}

impl Cell {
    pub fn new(text: impl Into<String>) -> Self {
        Cell {
            text: text.into(),
            caption: None,
            mark: None,
        }
    }

    pub fn with_caption(text: impl Into<String>, caption: impl Into<String>) -> Self {
        Cell {
            text: text.into(),
            caption: Some(caption.into()),
            mark: None,
        }
    }
}

/// A row of cells
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Track {
    pub label: Option<&'static str>,
    pub cells: Vec<Cell>,
    pub link: Link,
    /// Text shown instead of cells when the row is empty
    pub placeholder: Option<&'static str>,
}

impl Track {
    /// Remove every highlight mark in this row
    pub fn clear_marks(&mut self) {
        for cell in &mut self.cells {
            cell.mark = None;
        }
    }

    /// Mark a cell, ignoring indices outside the row
    pub fn mark(&mut self, index: usize, kind: Highlight) {
        if let Some(cell) = self.cells.get_mut(index) {
            cell.mark = Some(kind);
        }
    }

    pub fn values(&self) -> Vec<&str> {
        self.cells.iter().map(|c| c.text.as_str()).collect()
    }

    pub fn marks(&self) -> Vec<Option<Highlight>> {
        self.cells.iter().map(|c| c.mark).collect()
    }
}

/// Everything a visualizer currently displays
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Scene {
    pub tracks: Vec<Track>,
}

impl Scene {
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

/// Rendering collaborator driven by the step context.
///
/// Methods never fail: shapes a visualizer does not display and indices outside
/// the current state are ignored.
pub trait Visualizer: Send {
    /// Draw `state` from scratch, dropping all highlights
    fn render(&mut self, state: &Delta);

    /// Apply a state delta, keeping highlights where the visualizer can
    fn update(&mut self, state: &Delta);

    fn highlight(&mut self, indices: &[usize], kind: Highlight);

    fn highlight_match(&mut self, _start: usize, _len: usize, _kind: Highlight) {}

    fn highlight_comparison(&mut self, _text_index: usize, _pattern_index: usize, _kind: Highlight) {
    }

    fn clear(&mut self);

    fn scene(&self) -> Scene;
}
