//! Instrumented algorithm functions
//!
//! Every function has the [`AlgorithmFn`] signature: it reads [`Inputs`],
//! reports progress through a [`StepContext`] and returns an [`Output`]. The
//! context decides whether a call is instant, delayed or held for a single
//! step; the functions themselves never sleep.
//!
//! Submodules:
//! - [`array`]: maximum, sum/average, insert, delete
//! - [`search`]: linear and binary search
//! - [`sort`]: bubble sort
//! - [`pattern`]: naive and KMP string matching
//! - [`linked_list`]: singly, doubly and circular list operations
//!
//! Functions copy their input collections, publish an `update` after mutating
//! the value they return, and highlight comparisons before branching on them.

pub mod array;
pub mod linked_list;
pub mod pattern;
pub mod search;
pub mod sort;

use crate::engine::{StepContext, StepError};
use serde::Serialize;
use std::fmt;

/// Parsed exercise inputs. Fields an exercise does not use stay empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Inputs {
    pub array: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<i64>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub pattern: String,
}

impl Inputs {
    pub fn with_array(array: Vec<i64>) -> Self {
        Inputs {
            array,
            ..Inputs::default()
        }
    }
}

/// Value computed by an algorithm function
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Output {
    #[serde(rename_all = "camelCase")]
    MaxIndex { max: Option<i64>, max_index: i64 },
    SumAvg { sum: i64, avg: f64 },
    Array(Vec<i64>),
    Index(i64),
    Positions(Vec<usize>),
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

pub type AlgorithmFn = fn(&Inputs, &mut dyn StepContext) -> Result<Output, StepError>;

/// Join values for log messages
pub(crate) fn join<T: fmt::Display>(values: &[T], separator: &str) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::engine::{StepContext, StepResult};
    use crate::snapshot::StepRecord;
    use crate::visual::{Delta, Highlight};
    use std::time::Duration;

    /// Context that records every call without pacing
    #[derive(Debug, Default)]
    pub(crate) struct Recorder {
        pub(crate) records: Vec<StepRecord>,
    }

    impl Recorder {
        pub(crate) fn logs(&self) -> Vec<&str> {
            self.records
                .iter()
                .filter_map(|r| match r {
                    StepRecord::Log(message) => Some(message.as_str()),
                    _ => None,
                })
                .collect()
        }

        /// Number of highlight calls of any shape with the given kind
        pub(crate) fn count(&self, kind: Highlight) -> usize {
            self.records
                .iter()
                .filter(|r| match r {
                    StepRecord::Highlight { kind: k, .. }
                    | StepRecord::HighlightMatch { kind: k, .. }
                    | StepRecord::HighlightComparison { kind: k, .. } => *k == kind,
                    _ => false,
                })
                .count()
        }

        pub(crate) fn last_update(&self) -> Option<&Delta> {
            self.records.iter().rev().find_map(|r| match r {
                StepRecord::Update(delta) => Some(delta),
                _ => None,
            })
        }
    }

    impl StepContext for Recorder {
        fn log(&mut self, message: &str) -> StepResult {
            self.records.push(StepRecord::Log(message.to_string()));
            Ok(())
        }

        fn highlight(&mut self, indices: &[usize], kind: Highlight) -> StepResult {
            self.records.push(StepRecord::Highlight {
                indices: indices.to_vec(),
                kind,
            });
            Ok(())
        }

        fn highlight_match(&mut self, start: usize, len: usize, kind: Highlight) -> StepResult {
            self.records
                .push(StepRecord::HighlightMatch { start, len, kind });
            Ok(())
        }

        fn highlight_comparison(
            &mut self,
            text_index: usize,
            pattern_index: usize,
            kind: Highlight,
        ) -> StepResult {
            self.records.push(StepRecord::HighlightComparison {
                text_index,
                pattern_index,
                kind,
            });
            Ok(())
        }

        fn update(&mut self, delta: Delta) -> StepResult {
            self.records.push(StepRecord::Update(delta));
            Ok(())
        }

        fn wait(&mut self, _duration: Option<Duration>) -> StepResult {
            Ok(())
        }
    }
}
