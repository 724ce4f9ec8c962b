// Step history and observable state for backward navigation

use crate::algorithms::Output;
use crate::engine::errors::{StepError, StepperError};
use crate::engine::{Metrics, Mode};
use crate::visual::{Delta, Highlight, Scene};
use std::fmt;
use std::time::Duration;

/// Numbered log sink for `log` records
#[derive(Debug, Clone, Default)]
pub struct OutputLog {
    pub lines: Vec<LogLine>,
}

impl OutputLog {
    pub fn new() -> Self {
        OutputLog { lines: Vec::new() }
    }

    /// Append a message, numbering it after the previous line
    pub fn push(&mut self, message: &str) {
        let number = self.lines.len() + 1;
        self.lines.push(LogLine {
            number,
            message: message.to_string(),
        });
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get all lines formatted as `[Step N] message`
    pub fn get_output(&self) -> Vec<String> {
        self.lines.iter().map(|l| l.to_string()).collect()
    }
}

/// A log line with its step counter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub number: usize,
    pub message: String,
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Step {}] {}", self.number, self.message)
    }
}

/// One observable event emitted through a step context
#[derive(Debug, Clone, PartialEq)]
pub enum StepRecord {
    Log(String),
    Highlight {
        indices: Vec<usize>,
        kind: Highlight,
    },
    HighlightMatch {
        start: usize,
        len: usize,
        kind: Highlight,
    },
    HighlightComparison {
        text_index: usize,
        pattern_index: usize,
        kind: Highlight,
    },
    Update(Delta),
}

impl StepRecord {
    /// Estimate the memory usage of this record in bytes
    pub fn estimated_size(&self) -> usize {
        // Rough figure: enum header plus owned payload
        let payload = match self {
            StepRecord::Log(message) => message.len(),
            StepRecord::Highlight { indices, .. } => indices.len() * 8,
            StepRecord::HighlightMatch { .. } | StepRecord::HighlightComparison { .. } => 0,
            StepRecord::Update(delta) => delta.estimated_size(),
        };
        48 + payload
    }
}

/// Append-only record of one invocation, replayed by `prev`
#[derive(Debug)]
pub struct StepHistory {
    records: Vec<StepRecord>,
    max_memory: usize,
    current_memory: usize,
}

impl StepHistory {
    pub fn new(max_memory: usize) -> Self {
        StepHistory {
            records: Vec::new(),
            max_memory,
            current_memory: 0,
        }
    }

    /// Add a record to history
    pub fn push(&mut self, record: StepRecord) -> Result<(), StepError> {
        let record_size = record.estimated_size();

        if self.current_memory + record_size > self.max_memory {
            return Err(StepError::HistoryLimitExceeded {
                current: self.current_memory,
                limit: self.max_memory,
            });
        }

        self.current_memory += record_size;
        self.records.push(record);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&StepRecord> {
        self.records.get(index)
    }

    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.current_memory = 0;
    }
}

/// Point-in-time copy of everything a control surface displays
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub mode: Mode,
    pub paused: bool,
    pub speed: f64,
    pub step_delay: Duration,
    pub metrics: Metrics,
    pub log: OutputLog,
    pub scene: Scene,
    /// Number of history records applied to the display
    pub cursor: usize,
    /// Number of history records captured so far
    pub recorded: usize,
    pub outcome: Option<Result<Output, StepperError>>,
}

impl Snapshot {
    /// Whether the display shows an earlier point than the live edge
    pub fn is_reviewing(&self) -> bool {
        self.cursor < self.recorded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_numbering() {
        let mut log = OutputLog::new();
        log.push("first");
        log.push("second");

        assert_eq!(
            log.get_output(),
            vec!["[Step 1] first".to_string(), "[Step 2] second".to_string()]
        );

        log.clear();
        log.push("again");
        assert_eq!(log.lines[0].number, 1);
    }

    #[test]
    fn test_history_memory_limit() {
        let record = StepRecord::Log("x".repeat(16));
        let size = record.estimated_size();
        let mut history = StepHistory::new(size * 2);

        assert!(history.push(record.clone()).is_ok());
        assert!(history.push(record.clone()).is_ok());
        assert_eq!(
            history.push(record),
            Err(StepError::HistoryLimitExceeded {
                current: size * 2,
                limit: size * 2,
            })
        );
        assert_eq!(history.len(), 2);

        // Clearing releases the budget
        history.clear();
        assert!(history.is_empty());
        assert!(history.push(StepRecord::Log("x".repeat(16))).is_ok());
        assert!(history.push(StepRecord::Log("x".repeat(16))).is_ok());
        assert_eq!(history.len(), 2);
    }
}
