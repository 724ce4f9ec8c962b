// Practice mode: literal self-check cases per exercise

use super::Exercise;
use crate::algorithms::{Inputs, Output};
use crate::engine::{NoopContext, StepError};
use serde::Serialize;

/// One input with its expected output
#[derive(Debug, Clone, PartialEq)]
pub struct PracticeCase {
    pub input: Inputs,
    pub expected: Output,
}

/// Result of running a practice case
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeReport {
    pub exercise_id: &'static str,
    pub input: Inputs,
    /// `None` when the algorithm failed
    pub output: Option<Output>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub expected: Output,
    pub passed: bool,
}

fn array(values: &[i64]) -> Inputs {
    Inputs::with_array(values.to_vec())
}

fn with_element(values: &[i64], element: i64) -> Inputs {
    Inputs {
        element: Some(element),
        ..array(values)
    }
}

fn with_position(values: &[i64], position: i64) -> Inputs {
    Inputs {
        position: Some(position),
        ..array(values)
    }
}

fn with_target(values: &[i64], target: i64) -> Inputs {
    Inputs {
        target: Some(target),
        ..array(values)
    }
}

fn text(text: &str, pattern: &str) -> Inputs {
    Inputs {
        text: text.to_string(),
        pattern: pattern.to_string(),
        ..Inputs::default()
    }
}

fn case(input: Inputs, expected: Output) -> PracticeCase {
    PracticeCase { input, expected }
}

fn list(values: &[i64]) -> Output {
    Output::Array(values.to_vec())
}

/// The two practice cases of an exercise
pub fn cases(exercise_id: &str) -> Vec<PracticeCase> {
    match exercise_id {
        "ARRAY_MAX" => vec![
            case(
                array(&[3, 7, 2, 9, 1]),
                Output::MaxIndex {
                    max: Some(9),
                    max_index: 3,
                },
            ),
            case(
                array(&[10, 5, 8, 15, 3]),
                Output::MaxIndex {
                    max: Some(15),
                    max_index: 3,
                },
            ),
        ],
        "ARRAY_SUM_AVG" => vec![
            case(array(&[10, 20, 30]), Output::SumAvg { sum: 60, avg: 20.0 }),
            case(
                array(&[5, 10, 15, 20]),
                Output::SumAvg { sum: 50, avg: 12.5 },
            ),
        ],
        "ARRAY_INSERT" => vec![
            case(
                Inputs {
                    position: Some(2),
                    ..with_element(&[1, 2, 4, 5], 3)
                },
                list(&[1, 2, 3, 4, 5]),
            ),
            case(
                Inputs {
                    position: Some(0),
                    ..with_element(&[10, 20, 30], 5)
                },
                list(&[5, 10, 20, 30]),
            ),
        ],
        "ARRAY_DELETE" => vec![
            case(with_position(&[1, 2, 3, 4, 5], 2), list(&[1, 2, 4, 5])),
            case(with_position(&[10, 20, 30, 40], 0), list(&[20, 30, 40])),
        ],
        "BUBBLE_SORT" => vec![
            case(array(&[64, 34, 25, 12, 22]), list(&[12, 22, 25, 34, 64])),
            case(array(&[5, 2, 8, 1, 9]), list(&[1, 2, 5, 8, 9])),
        ],
        "LINEAR_SEARCH" => vec![
            case(with_target(&[5, 2, 8, 1, 9], 8), Output::Index(2)),
            case(with_target(&[10, 20, 30], 25), Output::Index(-1)),
        ],
        "BINARY_SEARCH" => vec![
            case(with_target(&[1, 3, 5, 7, 9], 7), Output::Index(3)),
            case(with_target(&[1, 3, 5, 7, 9], 4), Output::Index(-1)),
        ],
        "NAIVE_PATTERN" => vec![
            case(
                text("ABABDABACDABABCABCAB", "ABABCABCAB"),
                Output::Positions(vec![10]),
            ),
            case(text("AAAAA", "AAA"), Output::Positions(vec![0, 1, 2])),
        ],
        "KMP_PATTERN" => vec![
            case(
                text("ABABDABACDABABCABCAB", "ABABCABCAB"),
                Output::Positions(vec![10]),
            ),
            case(
                text("ABC ABCDAB ABCDABCDABDE", "ABCDABD"),
                Output::Positions(vec![15]),
            ),
        ],
        "SLL_TRAVERSE" => vec![
            case(array(&[1, 2, 3, 4]), list(&[1, 2, 3, 4])),
            case(array(&[]), list(&[])),
        ],
        "SLL_INSERT_FRONT" => vec![
            case(with_element(&[2, 3], 1), list(&[1, 2, 3])),
            case(with_element(&[], 5), list(&[5])),
        ],
        "SLL_DELETE_LAST" => vec![
            case(array(&[1, 2, 3]), list(&[1, 2])),
            case(array(&[10]), list(&[])),
        ],
        "DLL_INSERT_FRONT" => vec![
            case(with_element(&[2, 3], 1), list(&[1, 2, 3])),
            case(with_element(&[], 7), list(&[7])),
        ],
        "DLL_INSERT_END" => vec![
            case(with_element(&[1, 2], 3), list(&[1, 2, 3])),
            case(with_element(&[], 4), list(&[4])),
        ],
        "DLL_DELETE_LAST" => vec![
            case(array(&[1, 2, 3]), list(&[1, 2])),
            case(array(&[5]), list(&[])),
        ],
        "DLL_DELETE_BEFORE" => vec![
            case(with_position(&[10, 20, 30, 40], 3), list(&[10, 30, 40])),
            // Position 5 deletes the node at index 3
            case(with_position(&[1, 2, 3, 4, 5], 5), list(&[1, 2, 3, 5])),
        ],
        "CLL_INSERT_END" => vec![
            case(with_element(&[1, 2], 3), list(&[1, 2, 3])),
            case(with_element(&[], 5), list(&[5])),
        ],
        "CLL_INSERT_BEFORE" => vec![
            case(
                Inputs {
                    position: Some(2),
                    ..with_element(&[10, 20, 30], 15)
                },
                list(&[10, 15, 20, 30]),
            ),
            case(
                Inputs {
                    position: Some(1),
                    ..with_element(&[1, 2, 3], 0)
                },
                list(&[0, 1, 2, 3]),
            ),
        ],
        "CLL_DELETE_FIRST" => vec![
            case(array(&[1, 2, 3]), list(&[2, 3])),
            case(array(&[7]), list(&[])),
        ],
        "CLL_DELETE_AFTER" => vec![
            case(with_position(&[1, 2, 3, 4], 2), list(&[1, 2, 4])),
            case(with_position(&[10, 20, 30], 1), list(&[10, 30])),
        ],
        _ => Vec::new(),
    }
}

/// Run one case directly, without any pacing or display
pub fn run_case(exercise: &Exercise, case: &PracticeCase) -> PracticeReport {
    let result: Result<Output, StepError> = (exercise.algorithm)(&case.input, &mut NoopContext);
    let (output, error) = match result {
        Ok(output) => (Some(output), None),
        Err(err) => (None, Some(err.to_string())),
    };
    let passed = output.as_ref() == Some(&case.expected);

    tracing::debug!(exercise = exercise.id, passed, "practice case");
    PracticeReport {
        exercise_id: exercise.id,
        input: case.input.clone(),
        output,
        error,
        expected: case.expected.clone(),
        passed,
    }
}

/// Run every practice case of an exercise
pub fn run_all(exercise: &Exercise) -> Vec<PracticeReport> {
    cases(exercise.id)
        .iter()
        .map(|case| run_case(exercise, case))
        .collect()
}
