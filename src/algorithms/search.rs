// Linear and binary search

use super::{Inputs, Output};
use crate::engine::{StepContext, StepError};
use crate::visual::{Delta, Highlight};

pub fn linear_search(inputs: &Inputs, ctx: &mut dyn StepContext) -> Result<Output, StepError> {
    let arr = inputs.array.clone();
    if arr.is_empty() {
        ctx.log("Error: Array is empty")?;
        return Ok(Output::Index(-1));
    }
    let target = inputs.target.ok_or(StepError::MissingInput("target"))?;

    ctx.log(&format!("Searching for {target} using linear search"))?;
    ctx.update(Delta::Array(arr.clone()))?;

    for (i, &value) in arr.iter().enumerate() {
        ctx.log(&format!("Checking arr[{i}] = {value}"))?;
        ctx.highlight(&[i], Highlight::Comparing)?;
        ctx.update(Delta::Array(arr.clone()))?;

        if value == target {
            ctx.log(&format!("Found {target} at index {i}!"))?;
            ctx.highlight(&[i], Highlight::Active)?;
            return Ok(Output::Index(i as i64));
        }
    }

    ctx.log(&format!("{target} not found in array"))?;
    Ok(Output::Index(-1))
}

/// Binary search; an unsorted input only produces a warning in the log
pub fn binary_search(inputs: &Inputs, ctx: &mut dyn StepContext) -> Result<Output, StepError> {
    let arr = inputs.array.clone();
    if arr.is_empty() {
        ctx.log("Error: Array is empty")?;
        return Ok(Output::Index(-1));
    }
    let target = inputs.target.ok_or(StepError::MissingInput("target"))?;

    if !arr.windows(2).all(|w| w[0] <= w[1]) {
        ctx.log("Warning: Array must be sorted for binary search!")?;
    }

    ctx.log(&format!("Searching for {target} using binary search"))?;
    ctx.update(Delta::Array(arr.clone()))?;

    // Signed bounds: `right` drops below zero when the target is smaller
    // than every element
    let mut left: i64 = 0;
    let mut right: i64 = arr.len() as i64 - 1;

    while left <= right {
        let mid = left + (right - left) / 2;
        let value = arr[mid as usize];

        ctx.log(&format!(
            "Left={left}, Right={right}, Mid={mid}, arr[{mid}]={value}"
        ))?;
        ctx.highlight(
            &[left as usize, mid as usize, right as usize],
            Highlight::Comparing,
        )?;
        ctx.update(Delta::Array(arr.clone()))?;

        if value == target {
            ctx.log(&format!("Found {target} at index {mid}!"))?;
            ctx.highlight(&[mid as usize], Highlight::Active)?;
            return Ok(Output::Index(mid));
        } else if value < target {
            ctx.log(&format!("arr[{mid}] < {target}, searching right half"))?;
            left = mid + 1;
        } else {
            ctx.log(&format!("arr[{mid}] > {target}, searching left half"))?;
            right = mid - 1;
        }
    }

    ctx.log(&format!("{target} not found in array"))?;
    Ok(Output::Index(-1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::testing::Recorder;
    use crate::engine::NoopContext;

    fn inputs(array: Vec<i64>, target: i64) -> Inputs {
        Inputs {
            array,
            target: Some(target),
            ..Inputs::default()
        }
    }

    #[test]
    fn test_linear_search_found_and_missing() {
        let mut rec = Recorder::default();
        let out = linear_search(&inputs(vec![5, 8, 1], 8), &mut rec).unwrap();
        assert_eq!(out, Output::Index(1));
        assert_eq!(rec.count(Highlight::Comparing), 2);

        let out = linear_search(&inputs(vec![5, 8, 1], 4), &mut NoopContext).unwrap();
        assert_eq!(out, Output::Index(-1));
    }

    #[test]
    fn test_binary_search_hits_mid_first() {
        let mut rec = Recorder::default();
        let out = binary_search(&inputs(vec![1, 3, 5, 7, 9, 11, 13], 7), &mut rec).unwrap();

        assert_eq!(out, Output::Index(3));
        assert_eq!(rec.count(Highlight::Comparing), 1);
    }

    #[test]
    fn test_binary_search_below_minimum() {
        let out = binary_search(&inputs(vec![4, 6, 8], 1), &mut NoopContext).unwrap();
        assert_eq!(out, Output::Index(-1));
    }

    #[test]
    fn test_binary_search_warns_when_unsorted() {
        let mut rec = Recorder::default();
        binary_search(&inputs(vec![3, 1, 2], 2), &mut rec).unwrap();
        assert_eq!(
            rec.logs()[0],
            "Warning: Array must be sorted for binary search!"
        );
    }

    #[test]
    fn test_empty_array() {
        let mut rec = Recorder::default();
        let out = linear_search(&inputs(vec![], 3), &mut rec).unwrap();
        assert_eq!(out, Output::Index(-1));
        assert_eq!(rec.logs(), vec!["Error: Array is empty"]);
    }
}
