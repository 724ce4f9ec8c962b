// Parsing raw input strings against an exercise's input schema

use super::{Exercise, Field, FieldKind, InputField};
use crate::algorithms::Inputs;
use thiserror::Error;

/// Input problems, reported before a stepper is created
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("please enter {label} (--{field})")]
    Missing {
        field: &'static str,
        label: &'static str,
    },

    #[error("invalid array value: '{0}'")]
    InvalidArrayValue(String),

    #[error("invalid number for {field}: '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("unknown preset '{name}' for {exercise}")]
    UnknownPreset { name: String, exercise: &'static str },
}

/// Unparsed field values, as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawInputs {
    pub array: Option<String>,
    pub element: Option<String>,
    pub position: Option<String>,
    pub target: Option<String>,
    pub text: Option<String>,
    pub pattern: Option<String>,
}

impl RawInputs {
    fn get(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::Array => &self.array,
            Field::Element => &self.element,
            Field::Position => &self.position,
            Field::Target => &self.target,
            Field::Text => &self.text,
            Field::Pattern => &self.pattern,
        };
        value.as_deref()
    }

    /// Fill fields the user left out from a named preset
    pub fn apply_preset(&mut self, exercise: &Exercise, name: &str) -> Result<(), InputError> {
        let preset = exercise
            .preset(name)
            .ok_or_else(|| InputError::UnknownPreset {
                name: name.to_string(),
                exercise: exercise.id,
            })?;

        self.array.get_or_insert_with(|| preset.array.to_string());
        if let Some(target) = preset.target {
            self.target.get_or_insert_with(|| target.to_string());
        }
        Ok(())
    }

    /// Parse every field the exercise requires. Other fields are ignored.
    pub fn parse(&self, exercise: &Exercise) -> Result<Inputs, InputError> {
        let mut inputs = Inputs::default();

        for &InputField { field, label } in exercise.fields {
            // Spaces are significant in text and patterns
            let value = self
                .get(field)
                .map(|v| match field.kind() {
                    FieldKind::Text => v,
                    FieldKind::IntList | FieldKind::Integer => v.trim(),
                })
                .filter(|v| !v.is_empty())
                .ok_or(InputError::Missing {
                    field: field.name(),
                    label,
                })?;

            match field.kind() {
                FieldKind::IntList => inputs.array = parse_list(value)?,
                FieldKind::Integer => {
                    let number = parse_number(field, value)?;
                    match field {
                        Field::Element => inputs.element = Some(number),
                        Field::Position => inputs.position = Some(number),
                        _ => inputs.target = Some(number),
                    }
                }
                FieldKind::Text => match field {
                    Field::Pattern => inputs.pattern = value.to_string(),
                    _ => inputs.text = value.to_string(),
                },
            }
        }

        Ok(inputs)
    }
}

/// Parse comma-separated integers
pub fn parse_list(value: &str) -> Result<Vec<i64>, InputError> {
    value
        .split(',')
        .map(|item| {
            let item = item.trim();
            item.parse::<i64>()
                .map_err(|_| InputError::InvalidArrayValue(item.to_string()))
        })
        .collect()
}

fn parse_number(field: Field, value: &str) -> Result<i64, InputError> {
    value.parse::<i64>().map_err(|_| InputError::InvalidNumber {
        field: field.name(),
        value: value.to_string(),
    })
}
