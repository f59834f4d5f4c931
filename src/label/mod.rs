//! Labels carried by host-graph nodes and edges
//!
//! A label pairs a mark with an ordered list of atoms. The coarse
//! classification of a label (its label class) keys the secondary indices
//! used to prune candidate matches during rule matching.

pub mod atom;
pub mod mark;

pub use atom::Atom;
pub use mark::Mark;

pub(crate) use atom::fmt_list;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// GP 2 limits label lists to five atoms.
pub const MAX_LIST_LENGTH: usize = 5;

/// Errors raised while classifying a label
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LabelError {
    #[error("label list length {length} exceeds the GP 2 maximum of {MAX_LIST_LENGTH}")]
    TooLong { length: usize },
}

/// A node or edge label: a mark plus an ordered list of atoms
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Label {
    /// Colour/style tag, orthogonal to the list
    pub mark: Mark,
    /// The atom list
    pub atoms: Vec<Atom>,
    /// Whether a list-typed variable occurs in the list. List variables are
    /// declared by the rule's variable list, so the front-end states this at
    /// construction; it cannot be recovered from the atoms alone.
    has_list_variable: bool,
}

impl Label {
    /// Create a label with no list variable
    pub fn new(mark: Mark, atoms: Vec<Atom>) -> Self {
        Label {
            mark,
            atoms,
            has_list_variable: false,
        }
    }

    /// Create a label whose list contains a list-typed variable
    pub fn with_list_variable(mark: Mark, atoms: Vec<Atom>) -> Self {
        Label {
            mark,
            atoms,
            has_list_variable: true,
        }
    }

    /// The blank label: empty list, no mark
    pub fn empty() -> Self {
        Label::default()
    }

    /// True for the empty list
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Number of atoms in the list
    pub fn length(&self) -> usize {
        self.atoms.len()
    }

    /// Whether the list contains a list-typed variable
    pub fn has_list_variable(&self) -> bool {
        self.has_list_variable
    }

    /// True when no atom contains a variable or a degree/length query, i.e.
    /// the label can occur in a host graph.
    pub fn is_ground(&self) -> bool {
        !self.has_list_variable && self.atoms.iter().all(Atom::is_ground)
    }

    /// Classify this label for the secondary indices.
    ///
    /// Lists longer than [`MAX_LIST_LENGTH`] are rejected; callers must
    /// refuse such a label before installing it in a graph.
    pub fn class(&self) -> Result<LabelClass, LabelError> {
        if self.has_list_variable {
            return Ok(LabelClass::ListVar);
        }
        match self.atoms.len() {
            0 => Ok(LabelClass::Empty),
            1 => Ok(match &self.atoms[0] {
                Atom::Variable(_) => LabelClass::AtomicVar,
                // Degree, length and arithmetic atoms evaluate to integers
                Atom::Integer(_)
                | Atom::Neg(_)
                | Atom::Indegree(_)
                | Atom::Outdegree(_)
                | Atom::ListLength(_)
                | Atom::StringLength(_)
                | Atom::Add(..)
                | Atom::Subtract(..)
                | Atom::Multiply(..)
                | Atom::Divide(..) => LabelClass::Int,
                Atom::Character(_) | Atom::String(_) | Atom::Concat(..) => LabelClass::String,
            }),
            2 => Ok(LabelClass::List2),
            3 => Ok(LabelClass::List3),
            4 => Ok(LabelClass::List4),
            5 => Ok(LabelClass::List5),
            length => Err(LabelError::TooLong { length }),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.atoms.is_empty() {
            write!(f, "empty")?;
        } else {
            fmt_list(f, &self.atoms)?;
        }
        if self.mark != Mark::None {
            write!(f, " # {}", self.mark)?;
        }
        Ok(())
    }
}

/// Coarse classification of a label, used purely as an index key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LabelClass {
    Empty,
    Int,
    String,
    AtomicVar,
    List2,
    List3,
    List4,
    List5,
    ListVar,
}

impl LabelClass {
    /// Every class, in a fixed order. Handy for exhaustive index walks.
    pub const ALL: [LabelClass; 9] = [
        LabelClass::Empty,
        LabelClass::Int,
        LabelClass::String,
        LabelClass::AtomicVar,
        LabelClass::List2,
        LabelClass::List3,
        LabelClass::List4,
        LabelClass::List5,
        LabelClass::ListVar,
    ];
}

impl fmt::Display for LabelClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LabelClass::Empty => "empty",
            LabelClass::Int => "int",
            LabelClass::String => "string",
            LabelClass::AtomicVar => "atomic_var",
            LabelClass::List2 => "list2",
            LabelClass::List3 => "list3",
            LabelClass::List4 => "list4",
            LabelClass::List5 => "list5",
            LabelClass::ListVar => "list_var",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(value: i64) -> Atom {
        Atom::Integer(value)
    }

    #[test]
    fn test_empty_label_class() {
        assert_eq!(Label::empty().class(), Ok(LabelClass::Empty));
        assert!(Label::empty().is_empty());
        assert!(Label::empty().is_ground());
    }

    #[test]
    fn test_singleton_classification() {
        let by_atom = [
            (int(1), LabelClass::Int),
            (Atom::Neg(Box::new(int(1))), LabelClass::Int),
            (Atom::Indegree("n0".to_string()), LabelClass::Int),
            (Atom::Outdegree("n0".to_string()), LabelClass::Int),
            (Atom::ListLength(vec![int(1)]), LabelClass::Int),
            (
                Atom::StringLength(Box::new(Atom::String("s".to_string()))),
                LabelClass::Int,
            ),
            (
                Atom::Add(Box::new(int(1)), Box::new(int(2))),
                LabelClass::Int,
            ),
            (Atom::Character("c".to_string()), LabelClass::String),
            (Atom::String("s".to_string()), LabelClass::String),
            (
                Atom::Concat(
                    Box::new(Atom::String("a".to_string())),
                    Box::new(Atom::String("b".to_string())),
                ),
                LabelClass::String,
            ),
            (Atom::Variable("x".to_string()), LabelClass::AtomicVar),
        ];

        for (atom, expected) in by_atom {
            let label = Label::new(Mark::None, vec![atom]);
            assert_eq!(label.class(), Ok(expected));
        }
    }

    #[test]
    fn test_list_classification_by_length() {
        for (length, expected) in [
            (2, LabelClass::List2),
            (3, LabelClass::List3),
            (4, LabelClass::List4),
            (5, LabelClass::List5),
        ] {
            let label = Label::new(Mark::None, (0..length).map(|i| int(i as i64)).collect());
            assert_eq!(label.class(), Ok(expected));
        }
    }

    #[test]
    fn test_list_too_long_is_rejected() {
        let label = Label::new(Mark::None, (0..6).map(int).collect());
        assert_eq!(label.class(), Err(LabelError::TooLong { length: 6 }));
    }

    #[test]
    fn test_list_variable_dominates_classification() {
        // A list variable forces the class regardless of list contents
        let label = Label::with_list_variable(Mark::None, vec![Atom::Variable("l".to_string())]);
        assert_eq!(label.class(), Ok(LabelClass::ListVar));

        let longer =
            Label::with_list_variable(Mark::None, vec![int(1), Atom::Variable("l".to_string())]);
        assert_eq!(longer.class(), Ok(LabelClass::ListVar));
        assert!(!longer.is_ground());
    }

    #[test]
    fn test_mark_does_not_affect_class() {
        let plain = Label::new(Mark::None, vec![int(1)]);
        let marked = Label::new(Mark::Red, vec![int(1)]);
        assert_eq!(plain.class(), marked.class());
    }

    #[test]
    fn test_class_preserved_by_clone() {
        let label = Label::new(Mark::Blue, vec![int(1), Atom::String("a".to_string())]);
        assert_eq!(label.clone().class(), label.class());
    }

    #[test]
    fn test_label_display() {
        assert_eq!(format!("{}", Label::empty()), "empty");

        let list = Label::new(
            Mark::None,
            vec![
                int(1),
                Atom::String("foo".to_string()),
                Atom::Variable("x".to_string()),
            ],
        );
        assert_eq!(format!("{}", list), "1 : \"foo\" : x");

        let marked = Label::new(Mark::Dashed, vec![int(2)]);
        assert_eq!(format!("{}", marked), "2 # dashed");

        let marked_empty = Label::new(Mark::Any, vec![]);
        assert_eq!(format!("{}", marked_empty), "empty # any");
    }

    #[test]
    fn test_ground_label() {
        let ground = Label::new(Mark::None, vec![int(1), Atom::String("s".to_string())]);
        assert!(ground.is_ground());

        let with_var = Label::new(Mark::None, vec![Atom::Variable("x".to_string())]);
        assert!(!with_var.is_ground());
    }
}
