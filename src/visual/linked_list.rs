//! Linked list visualizer (singly, doubly, circular)

use super::{Cell, Delta, Highlight, Link, ListShape, Scene, Track, Visualizer};

#[derive(Debug, Default)]
pub struct LinkedListVisualizer {
    shape: ListShape,
    row: Option<Track>,
}

impl LinkedListVisualizer {
    pub fn new(shape: ListShape) -> Self {
        LinkedListVisualizer { shape, row: None }
    }

    pub fn shape(&self) -> ListShape {
        self.shape
    }

    fn draw(&mut self, nodes: &[i64]) {
        let link = match self.shape {
            ListShape::Singly => Link::Forward,
            ListShape::Doubly => Link::Both,
            ListShape::Circular => Link::Circular,
        };
        self.row = Some(Track {
            label: None,
            cells: nodes.iter().map(|v| Cell::new(v.to_string())).collect(),
            link,
            placeholder: Some("Empty list"),
        });
    }
}

impl Visualizer for LinkedListVisualizer {
    fn render(&mut self, state: &Delta) {
        match state {
            Delta::List { nodes, shape } => {
                self.shape = *shape;
                self.draw(nodes);
            }
            Delta::Array(values) => self.draw(values),
            Delta::Pattern { .. } => {}
        }
    }

    fn update(&mut self, state: &Delta) {
        self.render(state);
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
