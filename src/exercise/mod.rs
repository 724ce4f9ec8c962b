//! Exercise catalog
//!
//! An [`Exercise`] ties together the metadata shown to the user, the input
//! schema, the display kind and the algorithm function. The [`Catalog`]
//! resolves an exercise id plus parsed inputs into a stepper [`Binding`] and a
//! matching visualizer.
//!
//! Submodules:
//! - [`input`]: parsing raw command-line strings into [`Inputs`]
//! - [`practice`]: literal self-check cases per exercise

pub mod input;
pub mod practice;

pub use input::{InputError, RawInputs};

use crate::algorithms::{array, linked_list, pattern, search, sort, AlgorithmFn, Inputs};
use crate::engine::Binding;
use crate::visual::{
    ArrayVisualizer, Delta, LinkedListVisualizer, ListShape, PatternVisualizer, Visualizer,
};
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    ArrayBasics,
    Search,
    Sorting,
    PatternMatching,
    SinglyLinkedList,
    DoublyLinkedList,
    CircularLinkedList,
}

impl Category {
    /// Display order
    pub const ALL: [Category; 7] = [
        Category::ArrayBasics,
        Category::Search,
        Category::Sorting,
        Category::PatternMatching,
        Category::SinglyLinkedList,
        Category::DoublyLinkedList,
        Category::CircularLinkedList,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::ArrayBasics => "Array Basics",
            Category::Search => "Search",
            Category::Sorting => "Sorting",
            Category::PatternMatching => "Pattern Matching",
            Category::SinglyLinkedList => "Singly Linked List",
            Category::DoublyLinkedList => "Doubly Linked List",
            Category::CircularLinkedList => "Circular Linked List",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        })
    }
}

/// An input an exercise asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Array,
    Element,
    Position,
    Target,
    Text,
    Pattern,
}

/// How a field's raw text is parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Comma-separated integers
    IntList,
    Integer,
    Text,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::Array => "array",
            Field::Element => "element",
            Field::Position => "position",
            Field::Target => "target",
            Field::Text => "text",
            Field::Pattern => "pattern",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::Array => FieldKind::IntList,
            Field::Element | Field::Position | Field::Target => FieldKind::Integer,
            Field::Text | Field::Pattern => FieldKind::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputField {
    pub field: Field,
    pub label: &'static str,
}

const fn field(field: Field, label: &'static str) -> InputField {
    InputField { field, label }
}

/// Which visualizer an exercise uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayKind {
    Array,
    Search,
    Sort,
    LinkedList(ListShape),
    Pattern,
}

impl DisplayKind {
    pub fn visualizer(self) -> Box<dyn Visualizer> {
        match self {
            DisplayKind::Array | DisplayKind::Search | DisplayKind::Sort => {
                Box::new(ArrayVisualizer::new())
            }
            DisplayKind::LinkedList(shape) => Box::new(LinkedListVisualizer::new(shape)),
            DisplayKind::Pattern => Box::new(PatternVisualizer::new()),
        }
    }
}

/// Named input set for quick experiments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub name: &'static str,
    pub array: &'static str,
    pub target: Option<&'static str>,
}

pub const PRESET_NAMES: [&str; 3] = ["best", "average", "worst"];

const SORT_PRESETS: &[Preset] = &[
    Preset {
        name: "best",
        array: "1, 2, 3, 4, 5, 6, 7",
        target: None,
    },
    Preset {
        name: "average",
        array: "5, 1, 4, 2, 8, 3, 7",
        target: None,
    },
    Preset {
        name: "worst",
        array: "7, 6, 5, 4, 3, 2, 1",
        target: None,
    },
];

const BINARY_SEARCH_PRESETS: &[Preset] = &[
    Preset {
        name: "best",
        array: "1, 2, 3, 4, 5, 6, 7",
        target: Some("4"),
    },
    Preset {
        name: "average",
        array: "1, 3, 5, 7, 9, 11, 13",
        target: Some("9"),
    },
    Preset {
        name: "worst",
        array: "1, 3, 5, 7, 9, 11, 13",
        target: Some("2"),
    },
];

#[derive(Clone, Copy)]
pub struct Exercise {
    pub id: &'static str,
    pub title: &'static str,
    pub category: Category,
    pub difficulty: Difficulty,
    pub description: &'static str,
    pub fields: &'static [InputField],
    pub algorithm: AlgorithmFn,
    pub display: DisplayKind,
}

impl fmt::Debug for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Exercise")
            .field("id", &self.id)
            .field("category", &self.category)
            .field("display", &self.display)
            .finish_non_exhaustive()
    }
}

impl Exercise {
    pub fn requires(&self, field: Field) -> bool {
        self.fields.iter().any(|f| f.field == field)
    }

    /// State drawn before the algorithm starts; nothing for empty inputs
    pub fn initial_state(&self, inputs: &Inputs) -> Option<Delta> {
        match self.display {
            DisplayKind::Array | DisplayKind::Search | DisplayKind::Sort => {
                (!inputs.array.is_empty()).then(|| Delta::Array(inputs.array.clone()))
            }
            DisplayKind::LinkedList(shape) => {
                (!inputs.array.is_empty()).then(|| Delta::List {
                    nodes: inputs.array.clone(),
                    shape,
                })
            }
            DisplayKind::Pattern => (!inputs.text.is_empty() && !inputs.pattern.is_empty())
                .then(|| Delta::Pattern {
                    text: inputs.text.clone(),
                    pattern: inputs.pattern.clone(),
                    lps: None,
                }),
        }
    }

    pub fn binding(&self, inputs: Inputs) -> Binding {
        Binding {
            algorithm: self.algorithm,
            initial: self.initial_state(&inputs),
            inputs,
        }
    }

    pub fn visualizer(&self) -> Box<dyn Visualizer> {
        self.display.visualizer()
    }

    pub fn presets(&self) -> &'static [Preset] {
        match self.id {
            "BUBBLE_SORT" => SORT_PRESETS,
            "BINARY_SEARCH" => BINARY_SEARCH_PRESETS,
            _ => &[],
        }
    }

    pub fn preset(&self, name: &str) -> Option<&'static Preset> {
        self.presets()
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }
}

const ARRAY: InputField = field(Field::Array, "Array (comma-separated)");
const ELEMENTS: InputField = field(Field::Array, "Elements (comma-separated)");
const EXISTING: InputField = field(Field::Array, "Existing elements");
const ELEMENT: InputField = field(Field::Element, "Element to insert");
const INDEX: InputField = field(Field::Position, "Position (0-indexed)");
const ORDINAL: InputField = field(Field::Position, "Position (1-indexed)");
const TARGET: InputField = field(Field::Target, "Target value");
const TEXT: InputField = field(Field::Text, "Text");
const PATTERN: InputField = field(Field::Pattern, "Pattern");

const EXERCISES: &[Exercise] = &[
    Exercise {
        id: "ARRAY_MAX",
        title: "Find Largest Number & Index",
        category: Category::ArrayBasics,
        difficulty: Difficulty::Easy,
        description: "Find the largest number in an array and return its index.",
        fields: &[ARRAY],
        algorithm: array::array_max,
        display: DisplayKind::Array,
    },
    Exercise {
        id: "ARRAY_SUM_AVG",
        title: "Array Sum & Average",
        category: Category::ArrayBasics,
        difficulty: Difficulty::Easy,
        description: "Traverse array to calculate sum and average.",
        fields: &[ARRAY],
        algorithm: array::array_sum_avg,
        display: DisplayKind::Array,
    },
    Exercise {
        id: "ARRAY_INSERT",
        title: "Insert Element in Array",
        category: Category::ArrayBasics,
        difficulty: Difficulty::Medium,
        description: "Insert an element at a specified position in an array.",
        fields: &[ARRAY, ELEMENT, INDEX],
        algorithm: array::array_insert,
        display: DisplayKind::Array,
    },
    Exercise {
        id: "ARRAY_DELETE",
        title: "Delete Element from Array",
        category: Category::ArrayBasics,
        difficulty: Difficulty::Medium,
        description: "Delete an element at a specified position in an array.",
        fields: &[ARRAY, INDEX],
        algorithm: array::array_delete,
        display: DisplayKind::Array,
    },
    Exercise {
        id: "LINEAR_SEARCH",
        title: "Linear Search",
        category: Category::Search,
        difficulty: Difficulty::Easy,
        description: "Sequential search through an array to find a target element.",
        fields: &[ARRAY, TARGET],
        algorithm: search::linear_search,
        display: DisplayKind::Search,
    },
    Exercise {
        id: "BINARY_SEARCH",
        title: "Binary Search",
        category: Category::Search,
        difficulty: Difficulty::Medium,
        description: "Binary search on a sorted array (divide and conquer).",
        fields: &[field(Field::Array, "Sorted Array (comma-separated)"), TARGET],
        algorithm: search::binary_search,
        display: DisplayKind::Search,
    },
    Exercise {
        id: "BUBBLE_SORT",
        title: "Bubble Sort",
        category: Category::Sorting,
        difficulty: Difficulty::Medium,
        description: "Bubble sort algorithm with step-by-step visualization of passes and swaps.",
        fields: &[ARRAY],
        algorithm: sort::bubble_sort,
        display: DisplayKind::Sort,
    },
    Exercise {
        id: "NAIVE_PATTERN",
        title: "Naive Pattern Matching",
        category: Category::PatternMatching,
        difficulty: Difficulty::Medium,
        description: "Naive (brute force) pattern matching algorithm.",
        fields: &[TEXT, PATTERN],
        algorithm: pattern::naive_pattern,
        display: DisplayKind::Pattern,
    },
    Exercise {
        id: "KMP_PATTERN",
        title: "KMP Pattern Matching",
        category: Category::PatternMatching,
        difficulty: Difficulty::Hard,
        description: "Knuth-Morris-Pratt algorithm for efficient pattern matching.",
        fields: &[TEXT, PATTERN],
        algorithm: pattern::kmp_pattern,
        display: DisplayKind::Pattern,
    },
    Exercise {
        id: "SLL_TRAVERSE",
        title: "SLL: Traverse",
        category: Category::SinglyLinkedList,
        difficulty: Difficulty::Easy,
        description: "Traverse a singly linked list and print all elements.",
        fields: &[ELEMENTS],
        algorithm: linked_list::sll_traverse,
        display: DisplayKind::LinkedList(ListShape::Singly),
    },
    Exercise {
        id: "SLL_INSERT_FRONT",
        title: "SLL: Insert at Front",
        category: Category::SinglyLinkedList,
        difficulty: Difficulty::Easy,
        description: "Insert a new node at the beginning of a singly linked list.",
        fields: &[EXISTING, ELEMENT],
        algorithm: linked_list::sll_insert_front,
        display: DisplayKind::LinkedList(ListShape::Singly),
    },
    Exercise {
        id: "SLL_DELETE_LAST",
        title: "SLL: Delete Last Node",
        category: Category::SinglyLinkedList,
        difficulty: Difficulty::Medium,
        description: "Delete the last node from a singly linked list.",
        fields: &[ELEMENTS],
        algorithm: linked_list::sll_delete_last,
        display: DisplayKind::LinkedList(ListShape::Singly),
    },
    Exercise {
        id: "DLL_INSERT_FRONT",
        title: "DLL: Insert at Front",
        category: Category::DoublyLinkedList,
        difficulty: Difficulty::Easy,
        description: "Insert a new node at the beginning of a doubly linked list.",
        fields: &[EXISTING, ELEMENT],
        algorithm: linked_list::dll_insert_front,
        display: DisplayKind::LinkedList(ListShape::Doubly),
    },
    Exercise {
        id: "DLL_INSERT_END",
        title: "DLL: Insert at End",
        category: Category::DoublyLinkedList,
        difficulty: Difficulty::Easy,
        description: "Insert a new node at the end of a doubly linked list.",
        fields: &[EXISTING, ELEMENT],
        algorithm: linked_list::dll_insert_end,
        display: DisplayKind::LinkedList(ListShape::Doubly),
    },
    Exercise {
        id: "DLL_DELETE_LAST",
        title: "DLL: Delete Last",
        category: Category::DoublyLinkedList,
        difficulty: Difficulty::Medium,
        description: "Delete the last node from a doubly linked list.",
        fields: &[ELEMENTS],
        algorithm: linked_list::dll_delete_last,
        display: DisplayKind::LinkedList(ListShape::Doubly),
    },
    Exercise {
        id: "DLL_DELETE_BEFORE",
        title: "DLL: Delete Before Position",
        category: Category::DoublyLinkedList,
        difficulty: Difficulty::Hard,
        description: "Delete the node before a specified position in a doubly linked list.",
        fields: &[ELEMENTS, ORDINAL],
        algorithm: linked_list::dll_delete_before,
        display: DisplayKind::LinkedList(ListShape::Doubly),
    },
    Exercise {
        id: "CLL_INSERT_END",
        title: "CLL: Insert at End",
        category: Category::CircularLinkedList,
        difficulty: Difficulty::Medium,
        description: "Insert a new node at the end of a circular linked list.",
        fields: &[EXISTING, ELEMENT],
        algorithm: linked_list::cll_insert_end,
        display: DisplayKind::LinkedList(ListShape::Circular),
    },
    Exercise {
        id: "CLL_INSERT_BEFORE",
        title: "CLL: Insert Before Position",
        category: Category::CircularLinkedList,
        difficulty: Difficulty::Hard,
        description: "Insert a new node before a specified position in a circular linked list.",
        fields: &[EXISTING, ELEMENT, ORDINAL],
        algorithm: linked_list::cll_insert_before,
        display: DisplayKind::LinkedList(ListShape::Circular),
    },
    Exercise {
        id: "CLL_DELETE_FIRST",
        title: "CLL: Delete First Node",
        category: Category::CircularLinkedList,
        difficulty: Difficulty::Medium,
        description: "Delete the first node from a circular linked list.",
        fields: &[ELEMENTS],
        algorithm: linked_list::cll_delete_first,
        display: DisplayKind::LinkedList(ListShape::Circular),
    },
    Exercise {
        id: "CLL_DELETE_AFTER",
        title: "CLL: Delete After Position",
        category: Category::CircularLinkedList,
        difficulty: Difficulty::Hard,
        description: "Delete the node after a specified position in a circular linked list.",
        fields: &[ELEMENTS, ORDINAL],
        algorithm: linked_list::cll_delete_after,
        display: DisplayKind::LinkedList(ListShape::Circular),
    },
];

/// Every exercise, indexed by upper-case id
pub struct Catalog {
    index: FxHashMap<String, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        let index = EXERCISES
            .iter()
            .enumerate()
            .map(|(i, exercise)| (exercise.id.to_string(), i))
            .collect();
        Catalog { index }
    }

    /// Look up an exercise; ids are matched case-insensitively
    pub fn get(&self, id: &str) -> Option<&'static Exercise> {
        self.index
            .get(&id.trim().to_ascii_uppercase())
            .map(|&i| &EXERCISES[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static Exercise> {
        EXERCISES.iter()
    }

    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &'static Exercise> {
        EXERCISES.iter().filter(move |e| e.category == category)
    }

    pub fn len(&self) -> usize {
        EXERCISES.len()
    }

    pub fn is_empty(&self) -> bool {
        EXERCISES.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
