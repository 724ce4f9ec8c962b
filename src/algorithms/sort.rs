// Bubble sort with early exit

use super::{Inputs, Output};
use crate::engine::{StepContext, StepError};
use crate::visual::{Delta, Highlight};

/// Bubble sort. Stops after the first pass without swaps.
pub fn bubble_sort(inputs: &Inputs, ctx: &mut dyn StepContext) -> Result<Output, StepError> {
    let mut arr = inputs.array.clone();
    let n = arr.len();

    ctx.log(&format!("Starting bubble sort on array of size {n}"))?;
    ctx.update(Delta::Array(arr.clone()))?;

    for i in 0..n.saturating_sub(1) {
        let mut swapped = false;

        ctx.log(&format!("Pass {}: Comparing adjacent elements", i + 1))?;
        ctx.update(Delta::Array(arr.clone()))?;

        for j in 0..n - i - 1 {
            ctx.log(&format!(
                "Comparing arr[{j}]={} and arr[{}]={}",
                arr[j],
                j + 1,
                arr[j + 1]
            ))?;
            ctx.highlight(&[j, j + 1], Highlight::Comparing)?;

            if arr[j] > arr[j + 1] {
                arr.swap(j, j + 1);
                swapped = true;

                ctx.log(&format!("Swapped: {} <-> {}", arr[j + 1], arr[j]))?;
                ctx.update(Delta::Array(arr.clone()))?;
                ctx.highlight(&[j, j + 1], Highlight::Swapped)?;
            }
        }

        let last = n - i - 1;
        ctx.highlight(&[last], Highlight::Sorted)?;
        ctx.log(&format!(
            "Pass {} complete. Element at position {last} is in correct position.",
            i + 1
        ))?;

        if !swapped {
            ctx.log("No swaps in this pass. Array is sorted!")?;
            for k in 0..=last {
                ctx.highlight(&[k], Highlight::Sorted)?;
            }
            break;
        }
    }

    ctx.log("Bubble sort complete! Final sorted array.")?;
    ctx.update(Delta::Array(arr.clone()))?;

    for k in 0..arr.len() {
        ctx.highlight(&[k], Highlight::Sorted)?;
    }

    Ok(Output::Array(arr))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::testing::Recorder;
    use crate::snapshot::StepRecord;

    #[test]
    fn test_bubble_sort_counts() {
        let inputs = Inputs::with_array(vec![64, 34, 25, 12, 22, 11, 90]);
        let mut rec = Recorder::default();

        let out = bubble_sort(&inputs, &mut rec).unwrap();
        assert_eq!(out, Output::Array(vec![11, 12, 22, 25, 34, 64, 90]));
        assert_eq!(rec.count(Highlight::Comparing), 21);

        let first_swap = rec.records.iter().find_map(|r| match r {
            StepRecord::Highlight {
                indices,
                kind: Highlight::Swapped,
            } => Some(indices.clone()),
            _ => None,
        });
        assert_eq!(first_swap, Some(vec![0, 1]));
        assert!(rec.logs().contains(&"Swapped: 64 <-> 34"));
    }

    #[test]
    fn test_sorted_input_exits_after_one_pass() {
        let inputs = Inputs::with_array(vec![1, 2, 3, 4]);
        let mut rec = Recorder::default();

        bubble_sort(&inputs, &mut rec).unwrap();
        assert_eq!(rec.count(Highlight::Comparing), 3);
        assert_eq!(rec.count(Highlight::Swapped), 0);
        assert!(rec.logs().contains(&"No swaps in this pass. Array is sorted!"));
    }

    #[test]
    fn test_trivial_inputs() {
        let mut rec = Recorder::default();
        let out = bubble_sort(&Inputs::default(), &mut rec).unwrap();
        assert_eq!(out, Output::Array(vec![]));

        let out = bubble_sort(&Inputs::with_array(vec![7]), &mut rec).unwrap();
        assert_eq!(out, Output::Array(vec![7]));
    }
}
