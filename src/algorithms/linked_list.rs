// Linked list operations on singly, doubly and circular lists
//
// Positions are 1-indexed. Validation problems are reported in the log and
// leave the list unchanged.

use super::{join, Inputs, Output};
use crate::engine::{StepContext, StepError};
use crate::visual::{Delta, Highlight, ListShape};

fn show(nodes: &[i64], shape: ListShape) -> Delta {
    Delta::List {
        nodes: nodes.to_vec(),
        shape,
    }
}

fn require_element(inputs: &Inputs, ctx: &mut dyn StepContext) -> Result<Option<i64>, StepError> {
    if inputs.element.is_none() {
        ctx.log("Error: Element to insert is required")?;
    }
    Ok(inputs.element)
}

pub fn sll_traverse(inputs: &Inputs, ctx: &mut dyn StepContext) -> Result<Output, StepError> {
    let list = inputs.array.clone();

    ctx.log(&format!(
        "Traversing singly linked list with {} nodes",
        list.len()
    ))?;
    ctx.update(show(&list, ListShape::Singly))?;

    let mut visited = Vec::with_capacity(list.len());
    for (i, &value) in list.iter().enumerate() {
        ctx.log(&format!("Visiting node {i}: {value}"))?;
        ctx.highlight(&[i], Highlight::Active)?;
        visited.push(value);
    }

    ctx.log(&format!(
        "Traversal complete. Result: {}",
        join(&visited, " -> ")
    ))?;
    Ok(Output::Array(visited))
}

pub fn sll_insert_front(inputs: &Inputs, ctx: &mut dyn StepContext) -> Result<Output, StepError> {
    let Some(element) = require_element(inputs, ctx)? else {
        return Ok(Output::Array(inputs.array.clone()));
    };
    let mut list = Vec::with_capacity(inputs.array.len() + 1);
    list.push(element);
    list.extend_from_slice(&inputs.array);

    ctx.log(&format!("Inserting {element} at the front of the list"))?;
    ctx.update(show(&list, ListShape::Singly))?;
    ctx.highlight(&[0], Highlight::Active)?;

    Ok(Output::Array(list))
}

/// Shared by the singly and doubly variants, which differ only in wording
fn delete_last(
    inputs: &Inputs,
    ctx: &mut dyn StepContext,
    shape: ListShape,
) -> Result<Output, StepError> {
    let list = &inputs.array;
    let Some(&last) = list.last() else {
        ctx.log("List is empty, nothing to delete")?;
        return Ok(Output::Array(Vec::new()));
    };

    match shape {
        ListShape::Doubly => ctx.log(&format!(
            "Deleting last node from doubly linked list: {last}"
        ))?,
        _ => ctx.log(&format!("Deleting last node: {last}"))?,
    }
    ctx.update(show(list, shape))?;
    ctx.highlight(&[list.len() - 1], Highlight::Active)?;

    let shortened = list[..list.len() - 1].to_vec();
    match shape {
        ListShape::Doubly => ctx.log(&format!(
            "Node deleted. New list length: {}",
            shortened.len()
        ))?,
        _ => ctx.log(&format!(
            "Last node deleted. New list length: {}",
            shortened.len()
        ))?,
    }
    ctx.update(show(&shortened, shape))?;

    Ok(Output::Array(shortened))
}

pub fn sll_delete_last(inputs: &Inputs, ctx: &mut dyn StepContext) -> Result<Output, StepError> {
    delete_last(inputs, ctx, ListShape::Singly)
}

pub fn dll_insert_front(inputs: &Inputs, ctx: &mut dyn StepContext) -> Result<Output, StepError> {
    let Some(element) = require_element(inputs, ctx)? else {
        return Ok(Output::Array(inputs.array.clone()));
    };
    let mut list = Vec::with_capacity(inputs.array.len() + 1);
    list.push(element);
    list.extend_from_slice(&inputs.array);

    ctx.log(&format!(
        "Inserting {element} at the front of doubly linked list"
    ))?;
    ctx.update(show(&list, ListShape::Doubly))?;
    ctx.highlight(&[0], Highlight::Active)?;

    Ok(Output::Array(list))
}

pub fn dll_insert_end(inputs: &Inputs, ctx: &mut dyn StepContext) -> Result<Output, StepError> {
    let Some(element) = require_element(inputs, ctx)? else {
        return Ok(Output::Array(inputs.array.clone()));
    };
    let mut list = inputs.array.clone();
    list.push(element);

    ctx.log(&format!(
        "Inserting {element} at the end of doubly linked list"
    ))?;
    ctx.update(show(&list, ListShape::Doubly))?;
    ctx.highlight(&[list.len() - 1], Highlight::Active)?;

    Ok(Output::Array(list))
}

pub fn dll_delete_last(inputs: &Inputs, ctx: &mut dyn StepContext) -> Result<Output, StepError> {
    delete_last(inputs, ctx, ListShape::Doubly)
}

/// Delete the node just before 1-indexed `position`
pub fn dll_delete_before(inputs: &Inputs, ctx: &mut dyn StepContext) -> Result<Output, StepError> {
    let list = &inputs.array;
    let position = match inputs.position {
        Some(p) if p > 1 => p,
        _ => {
            ctx.log("Error: Position must be greater than 1 (cannot delete before first node)")?;
            return Ok(Output::Array(list.clone()));
        }
    };
    if position > list.len() as i64 {
        ctx.log(&format!(
            "Error: Position {position} is out of bounds. List has {} nodes.",
            list.len()
        ))?;
        return Ok(Output::Array(list.clone()));
    }

    let index = (position - 2) as usize;
    ctx.log(&format!(
        "Deleting node before position {position} (index {index}, value: {})",
        list[index]
    ))?;
    ctx.update(show(list, ListShape::Doubly))?;
    ctx.highlight(&[index], Highlight::Active)?;

    let mut shortened = list.clone();
    shortened.remove(index);
    ctx.log(&format!(
        "Node deleted. New list length: {}",
        shortened.len()
    ))?;
    ctx.update(show(&shortened, ListShape::Doubly))?;

    Ok(Output::Array(shortened))
}

pub fn cll_insert_end(inputs: &Inputs, ctx: &mut dyn StepContext) -> Result<Output, StepError> {
    let Some(element) = require_element(inputs, ctx)? else {
        return Ok(Output::Array(inputs.array.clone()));
    };
    let mut list = inputs.array.clone();
    list.push(element);

    ctx.log(&format!(
        "Inserting {element} at the end of circular linked list"
    ))?;
    ctx.update(show(&list, ListShape::Circular))?;
    ctx.highlight(&[list.len() - 1], Highlight::Active)?;
    ctx.log("Node inserted. List is now circular: last node connects back to first.")?;

    Ok(Output::Array(list))
}

/// Insert before 1-indexed `position`; `len + 1` appends
pub fn cll_insert_before(inputs: &Inputs, ctx: &mut dyn StepContext) -> Result<Output, StepError> {
    let list = &inputs.array;
    let Some(element) = require_element(inputs, ctx)? else {
        return Ok(Output::Array(list.clone()));
    };
    let position = match inputs.position {
        Some(p) if p >= 1 => p,
        _ => {
            ctx.log("Error: Position must be at least 1")?;
            return Ok(Output::Array(list.clone()));
        }
    };
    if position > list.len() as i64 + 1 {
        ctx.log(&format!(
            "Error: Position {position} is out of bounds. List has {} nodes.",
            list.len()
        ))?;
        return Ok(Output::Array(list.clone()));
    }

    let index = (position - 1) as usize;
    let mut extended = list.clone();
    extended.insert(index, element);

    ctx.log(&format!(
        "Inserting {element} before position {position} in circular linked list"
    ))?;
    ctx.update(show(&extended, ListShape::Circular))?;
    ctx.highlight(&[index], Highlight::Active)?;
    ctx.log(&format!(
        "Node inserted at index {index}. List is circular."
    ))?;

    Ok(Output::Array(extended))
}

pub fn cll_delete_first(inputs: &Inputs, ctx: &mut dyn StepContext) -> Result<Output, StepError> {
    let list = &inputs.array;
    let Some(&first) = list.first() else {
        ctx.log("List is empty, nothing to delete")?;
        return Ok(Output::Array(Vec::new()));
    };

    ctx.log(&format!(
        "Deleting first node from circular linked list: {first}"
    ))?;
    ctx.update(show(list, ListShape::Circular))?;
    ctx.highlight(&[0], Highlight::Active)?;

    let rest = list[1..].to_vec();
    match rest.first() {
        Some(head) => ctx.log(&format!(
            "First node deleted. New first node is {head}. List is still circular."
        ))?,
        None => ctx.log("First node deleted. List is now empty.")?,
    }
    ctx.update(show(&rest, ListShape::Circular))?;

    Ok(Output::Array(rest))
}

/// Delete the node after 1-indexed `position`; the last node has no successor
/// to delete
pub fn cll_delete_after(inputs: &Inputs, ctx: &mut dyn StepContext) -> Result<Output, StepError> {
    let list = &inputs.array;
    let position = match inputs.position {
        Some(p) if p >= 1 => p,
        _ => {
            ctx.log("Error: Position must be at least 1")?;
            return Ok(Output::Array(list.clone()));
        }
    };
    if list.is_empty() {
        ctx.log("Error: List is empty, cannot delete")?;
        return Ok(Output::Array(list.clone()));
    }
    if position >= list.len() as i64 {
        ctx.log(&format!(
            "Error: Position {position} is out of bounds. List has {} nodes. \
             Cannot delete after last node in circular list.",
            list.len()
        ))?;
        return Ok(Output::Array(list.clone()));
    }

    let index = position as usize;
    ctx.log(&format!(
        "Deleting node after position {position} (index {index}, value: {})",
        list[index]
    ))?;
    ctx.update(show(list, ListShape::Circular))?;
    ctx.highlight(&[index], Highlight::Active)?;

    let mut shortened = list.clone();
    shortened.remove(index);
    ctx.log(&format!(
        "Node deleted. New list length: {}. List is still circular.",
        shortened.len()
    ))?;
    ctx.update(show(&shortened, ListShape::Circular))?;

    Ok(Output::Array(shortened))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::testing::Recorder;
    use crate::engine::NoopContext;

    fn inputs(array: Vec<i64>, element: Option<i64>, position: Option<i64>) -> Inputs {
        Inputs {
            array,
            element,
            position,
            ..Inputs::default()
        }
    }

    #[test]
    fn test_traverse_visits_every_node() {
        let mut rec = Recorder::default();
        let out = sll_traverse(&inputs(vec![1, 2, 3], None, None), &mut rec).unwrap();

        assert_eq!(out, Output::Array(vec![1, 2, 3]));
        assert_eq!(
            rec.logs().last(),
            Some(&"Traversal complete. Result: 1 -> 2 -> 3")
        );
        assert_eq!(rec.count(Highlight::Active), 3);
    }

    #[test]
    fn test_inserts() {
        let base = || inputs(vec![2, 3], Some(1), None);
        assert_eq!(
            sll_insert_front(&base(), &mut NoopContext),
            Ok(Output::Array(vec![1, 2, 3]))
        );
        assert_eq!(
            dll_insert_front(&base(), &mut NoopContext),
            Ok(Output::Array(vec![1, 2, 3]))
        );
        assert_eq!(
            dll_insert_end(&base(), &mut NoopContext),
            Ok(Output::Array(vec![2, 3, 1]))
        );
        assert_eq!(
            cll_insert_end(&base(), &mut NoopContext),
            Ok(Output::Array(vec![2, 3, 1]))
        );
    }

    #[test]
    fn test_missing_element_leaves_list_unchanged() {
        let mut rec = Recorder::default();
        let out = sll_insert_front(&inputs(vec![4], None, None), &mut rec).unwrap();

        assert_eq!(out, Output::Array(vec![4]));
        assert_eq!(rec.logs(), vec!["Error: Element to insert is required"]);
    }

    #[test]
    fn test_delete_last_variants() {
        let mut rec = Recorder::default();
        let out = dll_delete_last(&inputs(vec![5, 6], None, None), &mut rec).unwrap();
        assert_eq!(out, Output::Array(vec![5]));
        assert_eq!(
            rec.last_update(),
            Some(&Delta::List {
                nodes: vec![5],
                shape: ListShape::Doubly
            })
        );

        let out = sll_delete_last(&inputs(vec![], None, None), &mut NoopContext).unwrap();
        assert_eq!(out, Output::Array(vec![]));
    }

    #[test]
    fn test_dll_delete_before() {
        let out = dll_delete_before(&inputs(vec![1, 2, 3, 4, 5], None, Some(5)), &mut NoopContext);
        assert_eq!(out, Ok(Output::Array(vec![1, 2, 3, 5])));

        let mut rec = Recorder::default();
        let out = dll_delete_before(&inputs(vec![1, 2], None, Some(1)), &mut rec).unwrap();
        assert_eq!(out, Output::Array(vec![1, 2]));
        assert!(rec.logs()[0].starts_with("Error: Position must be greater than 1"));
    }

    #[test]
    fn test_cll_insert_before_bounds() {
        let out = cll_insert_before(&inputs(vec![1, 2], Some(9), Some(3)), &mut NoopContext);
        assert_eq!(out, Ok(Output::Array(vec![1, 2, 9])));

        let out = cll_insert_before(&inputs(vec![1, 2], Some(9), Some(1)), &mut NoopContext);
        assert_eq!(out, Ok(Output::Array(vec![9, 1, 2])));

        let out = cll_insert_before(&inputs(vec![1, 2], Some(9), Some(4)), &mut NoopContext);
        assert_eq!(out, Ok(Output::Array(vec![1, 2])));
    }

    #[test]
    fn test_cll_deletes() {
        let mut rec = Recorder::default();
        let out = cll_delete_first(&inputs(vec![7], None, None), &mut rec).unwrap();
        assert_eq!(out, Output::Array(vec![]));
        assert!(rec.logs().contains(&"First node deleted. List is now empty."));

        let out = cll_delete_after(&inputs(vec![1, 2, 3], None, Some(1)), &mut NoopContext);
        assert_eq!(out, Ok(Output::Array(vec![1, 3])));

        let out = cll_delete_after(&inputs(vec![1, 2, 3], None, Some(3)), &mut NoopContext);
        assert_eq!(out, Ok(Output::Array(vec![1, 2, 3])));
    }
}
