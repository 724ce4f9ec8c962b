//! Array visualizer for array basics, searches and sorts

use super::{Cell, Delta, Highlight, Scene, Track, Visualizer};

/// Shows an array as a row of value cells captioned with their index
#[derive(Debug, Default)]
pub struct ArrayVisualizer {
    /// `None` until the first render, and again after `clear`
    row: Option<Track>,
}

impl ArrayVisualizer {
    pub fn new() -> Self {
        Self::default()
    }

    fn values(state: &Delta) -> Option<&[i64]> {
        match state {
            Delta::Array(values) => Some(values),
            Delta::List { nodes, .. } => Some(nodes),
            Delta::Pattern { .. } => None,
        }
    }

    fn draw(&mut self, values: &[i64]) {
        let cells = values
            .iter()
            .enumerate()
            .map(|(i, v)| Cell::with_caption(v.to_string(), i.to_string()))
            .collect();
        self.row = Some(Track {
            cells,
            ..Track::default()
        });
    }
}

impl Visualizer for ArrayVisualizer {
    fn render(&mut self, state: &Delta) {
        if let Some(values) = Self::values(state) {
            self.draw(values);
        }
    }

    fn update(&mut self, state: &Delta) {
        let Some(values) = Self::values(state) else {
            return;
        };
        if values.is_empty() {
            return;
        }

        match &mut self.row {
            // Same length: rewrite values in place so highlights survive
            Some(row) if row.cells.len() == values.len() => {
                for (cell, v) in row.cells.iter_mut().zip(values) {
                    cell.text = v.to_string();
                }
            }
            _ => self.draw(values),
        }
    }

    fn highlight(&mut self, indices: &[usize], kind: Highlight) {
        if let Some(row) = &mut self.row {
            row.clear_marks();
            for &i in indices {
                row.mark(i, kind);
            }
        }
    }

    fn clear(&mut self) {
        self.row = None;
    }

    fn scene(&self) -> Scene {
        Scene {
            tracks: self.row.iter().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(viz: &ArrayVisualizer) -> Track {
        viz.scene().tracks.into_iter().next().expect("no row rendered")
    }

    #[test]
    fn test_render_captions_indices() {
        let mut viz = ArrayVisualizer::new();
        viz.render(&Delta::Array(vec![64, 34, 25]));

        let row = row(&viz);
        assert_eq!(row.values(), vec!["64", "34", "25"]);
        assert_eq!(row.cells[2].caption.as_deref(), Some("2"));
    }

    #[test]
    fn test_highlight_replaces_previous_marks() {
        let mut viz = ArrayVisualizer::new();
        viz.render(&Delta::Array(vec![1, 2, 3]));
        viz.highlight(&[0, 1], Highlight::Comparing);
        viz.highlight(&[2], Highlight::Sorted);

        assert_eq!(row(&viz).marks(), vec![None, None, Some(Highlight::Sorted)]);
    }

    #[test]
    fn test_out_of_range_index_is_ignored() {
        let mut viz = ArrayVisualizer::new();
        viz.render(&Delta::Array(vec![1, 2]));
        viz.highlight(&[1, 7], Highlight::Active);

        assert_eq!(row(&viz).marks(), vec![None, Some(Highlight::Active)]);
    }

    #[test]
    fn test_update_same_length_keeps_marks() {
        let mut viz = ArrayVisualizer::new();
        viz.render(&Delta::Array(vec![2, 1]));
        viz.highlight(&[0, 1], Highlight::Swapped);
        viz.update(&Delta::Array(vec![1, 2]));

        let row = row(&viz);
        assert_eq!(row.values(), vec!["1", "2"]);
        assert_eq!(row.marks(), vec![Some(Highlight::Swapped); 2]);
    }

    #[test]
    fn test_update_new_length_rerenders() {
        let mut viz = ArrayVisualizer::new();
        viz.render(&Delta::Array(vec![1, 2]));
        viz.highlight(&[0], Highlight::Active);
        viz.update(&Delta::Array(vec![1, 2, 0]));

        let row = row(&viz);
        assert_eq!(row.values(), vec!["1", "2", "0"]);
        assert!(row.marks().iter().all(Option::is_none));
    }

    #[test]
    fn test_empty_update_and_clear() {
        let mut viz = ArrayVisualizer::new();
        viz.render(&Delta::Array(vec![5]));
        viz.update(&Delta::Array(Vec::new()));
        assert_eq!(row(&viz).values(), vec!["5"]);

        viz.clear();
        assert!(viz.scene().is_empty());
    }
}
