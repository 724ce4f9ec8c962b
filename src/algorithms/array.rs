// Array basics: maximum, sum/average, insert, delete

use super::{Inputs, Output};
use crate::engine::{StepContext, StepError};
use crate::visual::{Delta, Highlight};

/// Largest element and its index; `None`/-1 for an empty array
pub fn array_max(inputs: &Inputs, ctx: &mut dyn StepContext) -> Result<Output, StepError> {
    let arr = inputs.array.clone();
    if arr.is_empty() {
        ctx.log("Error: Array is empty")?;
        return Ok(Output::MaxIndex {
            max: None,
            max_index: -1,
        });
    }

    let mut max = arr[0];
    let mut max_index = 0;

    ctx.log(&format!("Starting: max = {max} at index 0"))?;
    ctx.update(Delta::Array(arr.clone()))?;
    ctx.highlight(&[0], Highlight::Active)?;

    for (i, &value) in arr.iter().enumerate().skip(1) {
        ctx.log(&format!("Comparing arr[{i}] = {value} with max = {max}"))?;
        ctx.highlight(&[i, max_index], Highlight::Comparing)?;

        if value > max {
            max = value;
            max_index = i;
            ctx.log(&format!("New max found: {max} at index {i}"))?;
            ctx.highlight(&[i], Highlight::Active)?;
        }
    }

    ctx.log(&format!(
        "Final result: Largest number = {max} at index {max_index}"
    ))?;
    Ok(Output::MaxIndex {
        max: Some(max),
        max_index: max_index as i64,
    })
}

/// Sum and average (rounded to two decimals); zero for an empty array
pub fn array_sum_avg(inputs: &Inputs, ctx: &mut dyn StepContext) -> Result<Output, StepError> {
    let arr = inputs.array.clone();
    if arr.is_empty() {
        ctx.log("Error: Array is empty")?;
        return Ok(Output::SumAvg { sum: 0, avg: 0.0 });
    }

    ctx.log(&format!(
        "Starting sum calculation on array of {} elements",
        arr.len()
    ))?;
    ctx.update(Delta::Array(arr.clone()))?;

    let mut sum: i64 = 0;
    for (i, &value) in arr.iter().enumerate() {
        ctx.log(&format!("Adding arr[{i}] = {value}, sum = {sum} + {value}"))?;
        ctx.highlight(&[i], Highlight::Active)?;
        sum = match sum.checked_add(value) {
            Some(next) => next,
            None => {
                ctx.log("Error: Sum overflows a 64-bit integer")?;
                return Err(StepError::Overflow("sum"));
            }
        };
        ctx.update(Delta::Array(arr.clone()))?;
    }

    let avg = sum as f64 / arr.len() as f64;
    ctx.log(&format!("Sum = {sum}, Average = {avg:.2}"))?;
    Ok(Output::SumAvg {
        sum,
        avg: (avg * 100.0).round() / 100.0,
    })
}

/// Insert `element` at 0-based `position`, shifting later elements right
pub fn array_insert(inputs: &Inputs, ctx: &mut dyn StepContext) -> Result<Output, StepError> {
    let mut arr = inputs.array.clone();
    let element = inputs.element.ok_or(StepError::MissingInput("element"))?;
    let position = inputs.position.ok_or(StepError::MissingInput("position"))?;
    let pos = usize::try_from(position)
        .ok()
        .filter(|&p| p <= arr.len())
        .ok_or(StepError::InvalidPosition {
            position,
            len: arr.len(),
        })?;

    ctx.log(&format!("Inserting {element} at position {pos}"))?;
    ctx.update(Delta::Array(arr.clone()))?;

    arr.push(0);
    ctx.update(Delta::Array(arr.clone()))?;

    for i in (pos + 1..arr.len()).rev() {
        arr[i] = arr[i - 1];
        ctx.log(&format!("Shifting arr[{}] to arr[{i}]", i - 1))?;
        ctx.update(Delta::Array(arr.clone()))?;
        ctx.highlight(&[i], Highlight::Active)?;
    }

    arr[pos] = element;
    ctx.log(&format!("Inserted {element} at position {pos}"))?;
    ctx.update(Delta::Array(arr.clone()))?;
    ctx.highlight(&[pos], Highlight::Active)?;

    Ok(Output::Array(arr))
}

/// Delete the element at 0-based `position`, shifting later elements left
pub fn array_delete(inputs: &Inputs, ctx: &mut dyn StepContext) -> Result<Output, StepError> {
    let mut arr = inputs.array.clone();
    let position = inputs.position.ok_or(StepError::MissingInput("position"))?;
    let pos = usize::try_from(position)
        .ok()
        .filter(|&p| p < arr.len())
        .ok_or(StepError::InvalidPosition {
            position,
            len: arr.len(),
        })?;

    ctx.log(&format!("Deleting element at position {pos}"))?;
    ctx.update(Delta::Array(arr.clone()))?;
    ctx.highlight(&[pos], Highlight::Active)?;

    for i in pos..arr.len() - 1 {
        arr[i] = arr[i + 1];
        ctx.log(&format!("Shifting arr[{}] to arr[{i}]", i + 1))?;
        ctx.update(Delta::Array(arr.clone()))?;
        ctx.highlight(&[i], Highlight::Active)?;
    }

    arr.pop();
    ctx.log(&format!(
        "Element deleted. New array length: {}",
        arr.len()
    ))?;
    ctx.update(Delta::Array(arr.clone()))?;

    Ok(Output::Array(arr))
}
