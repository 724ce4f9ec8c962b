//! Pattern matching visualizer: text, pattern and LPS rows

use super::{Cell, Delta, Highlight, Scene, Track, Visualizer};

#[derive(Debug, Default)]
pub struct PatternVisualizer {
    text: Option<Track>,
    pattern: Option<Track>,
    lps: Option<Track>,
}

impl PatternVisualizer {
    pub fn new() -> Self {
        Self::default()
    }

    fn char_track(label: &'static str, s: &str) -> Track {
        Track {
            label: Some(label),
            cells: s.chars().map(|c| Cell::new(c.to_string())).collect(),
            ..Track::default()
        }
    }

    fn clear_matches(&mut self) {
        for track in [&mut self.text, &mut self.pattern].into_iter().flatten() {
            track.clear_marks();
        }
    }
}

impl Visualizer for PatternVisualizer {
    fn render(&mut self, state: &Delta) {
        let Delta::Pattern { text, pattern, lps } = state else {
            return;
        };
        if text.is_empty() || pattern.is_empty() {
            return;
        }

        self.text = Some(Self::char_track("Text", text));
        self.pattern = Some(Self::char_track("Pattern", pattern));
        self.lps = Some(Track {
            label: Some("LPS"),
            ..Track::default()
        });

        if let (Some(table), Some(row)) = (lps, &mut self.lps) {
            row.cells = table
                .iter()
                .enumerate()
                .map(|(i, v)| Cell::with_caption(v.to_string(), i.to_string()))
                .collect();
        }
    }

    fn update(&mut self, state: &Delta) {
        self.render(state);
    }

    /// Generic highlight: marks text cells, leaving existing marks alone
    fn highlight(&mut self, indices: &[usize], kind: Highlight) {
        if let Some(text) = &mut self.text {
            for &i in indices {
                text.mark(i, kind);
            }
        }
    }

    fn highlight_match(&mut self, start: usize, len: usize, kind: Highlight) {
        self.clear_matches();
        if let Some(text) = &mut self.text {
            for i in start..start.saturating_add(len) {
                text.mark(i, kind);
            }
        }
        if let Some(pattern) = &mut self.pattern {
            for i in 0..len {
                pattern.mark(i, kind);
            }
        }
    }

    fn highlight_comparison(&mut self, text_index: usize, pattern_index: usize, kind: Highlight) {
        self.clear_matches();
        if let Some(text) = &mut self.text {
            text.mark(text_index, kind);
        }
        if let Some(pattern) = &mut self.pattern {
            pattern.mark(pattern_index, kind);
        }
    }

    fn clear(&mut self) {
        self.text = None;
        self.pattern = None;
        self.lps = None;
    }

    fn scene(&self) -> Scene {
        Scene {
            tracks: [&self.text, &self.pattern, &self.lps]
                .into_iter()
                .flatten()
                .cloned()
                .collect(),
        }
    }
}
