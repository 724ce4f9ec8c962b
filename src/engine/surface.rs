// Display state owned by a stepper: log, metrics, visualizer and history

use crate::engine::errors::StepError;
use crate::snapshot::{OutputLog, StepHistory, StepRecord};
use crate::visual::{Delta, Highlight, Scene, Visualizer};
use serde::Serialize;

/// Counters shown next to the visualization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Metrics {
    /// Number of `log` calls applied
    pub steps: usize,
    pub comparisons: usize,
    pub swaps: usize,
}

impl Metrics {
    fn count(&mut self, kind: Highlight) {
        match kind {
            Highlight::Comparing => self.comparisons += 1,
            Highlight::Swapped => self.swaps += 1,
            Highlight::Active | Highlight::Sorted => {}
        }
    }
}

/// The sinks a record is applied to
struct Canvas {
    log: OutputLog,
    metrics: Metrics,
    visualizer: Option<Box<dyn Visualizer>>,
}

impl Canvas {
    fn apply(&mut self, record: &StepRecord) {
        match record {
            StepRecord::Log(message) => {
                self.log.push(message);
                self.metrics.steps += 1;
            }
            StepRecord::Highlight { indices, kind } => {
                if let Some(viz) = &mut self.visualizer {
                    viz.highlight(indices, *kind);
                }
                self.metrics.count(*kind);
            }
            StepRecord::HighlightMatch { start, len, kind } => {
                if let Some(viz) = &mut self.visualizer {
                    viz.highlight_match(*start, *len, *kind);
                }
                self.metrics.count(*kind);
            }
            StepRecord::HighlightComparison {
                text_index,
                pattern_index,
                kind,
            } => {
                if let Some(viz) = &mut self.visualizer {
                    viz.highlight_comparison(*text_index, *pattern_index, *kind);
                }
                self.metrics.count(*kind);
            }
            StepRecord::Update(delta) => {
                if let Some(viz) = &mut self.visualizer {
                    viz.update(delta);
                }
            }
        }
    }

    fn wipe(&mut self) {
        self.log.clear();
        self.metrics = Metrics::default();
        if let Some(viz) = &mut self.visualizer {
            viz.clear();
        }
    }
}

/// What the stepper shows, as a pure function of the initial state and
/// `history[..cursor]`
pub(crate) struct Surface {
    initial: Option<Delta>,
    canvas: Canvas,
    history: StepHistory,
    cursor: usize,
}

impl Surface {
    pub(crate) fn new(
        initial: Option<Delta>,
        visualizer: Option<Box<dyn Visualizer>>,
        history_limit: usize,
    ) -> Self {
        let mut surface = Surface {
            initial,
            canvas: Canvas {
                log: OutputLog::new(),
                metrics: Metrics::default(),
                visualizer,
            },
            history: StepHistory::new(history_limit),
            cursor: 0,
        };
        surface.show_initial();
        surface
    }

    fn show_initial(&mut self) {
        if let (Some(viz), Some(initial)) = (&mut self.canvas.visualizer, &self.initial) {
            viz.render(initial);
        }
    }

    /// Drop everything, including the initial rendering
    pub(crate) fn clear(&mut self) {
        self.history.clear();
        self.cursor = 0;
        self.canvas.wipe();
    }

    /// Start a new invocation from the initial state
    pub(crate) fn restart(&mut self) {
        self.clear();
        self.show_initial();
    }

    /// Append a live record, applying it when the display follows the live edge
    pub(crate) fn record(&mut self, record: StepRecord) -> Result<(), StepError> {
        let following = self.cursor == self.history.len();
        self.history.push(record)?;
        if following {
            self.advance();
        }
        Ok(())
    }

    /// Apply the next recorded step; false when already at the live edge
    pub(crate) fn advance(&mut self) -> bool {
        match self.history.get(self.cursor) {
            Some(record) => {
                self.canvas.apply(record);
                self.cursor += 1;
                true
            }
            None => false,
        }
    }

    /// Move back one record and replay the display up to the new cursor
    pub(crate) fn rewind(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let target = self.cursor - 1;
        self.canvas.wipe();
        self.show_initial();
        for record in &self.history.records()[..target] {
            self.canvas.apply(record);
        }
        self.cursor = target;
        true
    }

    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    pub(crate) fn recorded(&self) -> usize {
        self.history.len()
    }

    pub(crate) fn is_reviewing(&self) -> bool {
        self.cursor < self.history.len()
    }

    pub(crate) fn metrics(&self) -> Metrics {
        self.canvas.metrics
    }

    pub(crate) fn log(&self) -> &OutputLog {
        &self.canvas.log
    }

    pub(crate) fn records(&self) -> &[StepRecord] {
        self.history.records()
    }

    pub(crate) fn scene(&self) -> Scene {
        self.canvas
            .visualizer
            .as_ref()
            .map(|viz| viz.scene())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visual::ArrayVisualizer;

    fn surface() -> Surface {
        Surface::new(
            Some(Delta::Array(vec![2, 1])),
            Some(Box::new(ArrayVisualizer::new())),
            1 << 20,
        )
    }

    #[test]
    fn test_metrics_follow_records() {
        let mut s = surface();
        s.record(StepRecord::Log("compare".into())).unwrap();
        s.record(StepRecord::Highlight {
            indices: vec![0, 1],
            kind: Highlight::Comparing,
        })
        .unwrap();
        s.record(StepRecord::Update(Delta::Array(vec![1, 2]))).unwrap();
        s.record(StepRecord::Highlight {
            indices: vec![0, 1],
            kind: Highlight::Swapped,
        })
        .unwrap();

        assert_eq!(
            s.metrics(),
            Metrics {
                steps: 1,
                comparisons: 1,
                swaps: 1
            }
        );
        assert_eq!(s.scene().tracks[0].values(), vec!["1", "2"]);
    }

    #[test]
    fn test_rewind_then_advance_restores_display() {
        let mut s = surface();
        s.record(StepRecord::Log("one".into())).unwrap();
        s.record(StepRecord::Update(Delta::Array(vec![1, 2]))).unwrap();
        let scene = s.scene();

        assert!(s.rewind());
        assert_eq!(s.scene().tracks[0].values(), vec!["2", "1"]);
        assert_eq!(s.log().len(), 1);

        assert!(s.advance());
        assert_eq!(s.scene(), scene);
        assert!(!s.advance());
    }

    #[test]
    fn test_records_while_reviewing_are_not_applied() {
        let mut s = surface();
        s.record(StepRecord::Log("one".into())).unwrap();
        s.rewind();
        s.record(StepRecord::Log("two".into())).unwrap();

        assert_eq!(s.cursor(), 0);
        assert_eq!(s.recorded(), 2);
        assert!(s.log().is_empty());
    }

    #[test]
    fn test_missing_visualizer_still_logs() {
        let mut s = Surface::new(None, None, 1 << 20);
        s.record(StepRecord::Highlight {
            indices: vec![3],
            kind: Highlight::Comparing,
        })
        .unwrap();
        s.record(StepRecord::Log("still counted".into())).unwrap();

        assert_eq!(s.metrics().comparisons, 1);
        assert_eq!(s.log().len(), 1);
        assert!(s.scene().is_empty());
    }
}
