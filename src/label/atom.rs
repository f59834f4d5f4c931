//! Atom expressions occurring in label lists
//!
//! An atom is either a constant, a variable reference, a degree or length
//! query, or an arithmetic/string expression over sub-atoms. Sub-expressions
//! are owned, so dropping an atom releases its whole tree.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One element of a label's list
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Atom {
    /// Variable reference by name
    Variable(String),
    /// Integer constant
    Integer(i64),
    /// Character constant (a one-character string in the concrete syntax)
    Character(String),
    /// String constant
    String(String),
    /// In-degree of the named node
    Indegree(String),
    /// Out-degree of the named node
    Outdegree(String),
    /// Length of a list
    ListLength(Vec<Atom>),
    /// Length of a string atom
    StringLength(Box<Atom>),
    /// Unary negation
    Neg(Box<Atom>),
    /// Integer addition
    Add(Box<Atom>, Box<Atom>),
    /// Integer subtraction
    Subtract(Box<Atom>, Box<Atom>),
    /// Integer multiplication
    Multiply(Box<Atom>, Box<Atom>),
    /// Integer division
    Divide(Box<Atom>, Box<Atom>),
    /// String concatenation
    Concat(Box<Atom>, Box<Atom>),
}

impl Atom {
    /// True when the atom contains no variables and no degree or length
    /// queries anywhere in its expression tree.
    pub fn is_ground(&self) -> bool {
        match self {
            Atom::Integer(_) | Atom::Character(_) | Atom::String(_) => true,
            Atom::Variable(_)
            | Atom::Indegree(_)
            | Atom::Outdegree(_)
            | Atom::ListLength(_)
            | Atom::StringLength(_) => false,
            Atom::Neg(inner) => inner.is_ground(),
            Atom::Add(left, right)
            | Atom::Subtract(left, right)
            | Atom::Multiply(left, right)
            | Atom::Divide(left, right)
            | Atom::Concat(left, right) => left.is_ground() && right.is_ground(),
        }
    }

    fn fmt_binary(
        f: &mut fmt::Formatter<'_>,
        left: &Atom,
        op: &str,
        right: &Atom,
    ) -> fmt::Result {
        write!(f, "({} {} {})", left, op, right)
    }
}

/// Writes a list of atoms in concrete syntax, colon-separated.
pub(crate) fn fmt_list(f: &mut fmt::Formatter<'_>, atoms: &[Atom]) -> fmt::Result {
    for (position, atom) in atoms.iter().enumerate() {
        if position > 0 {
            write!(f, " : ")?;
        }
        write!(f, "{}", atom)?;
    }
    Ok(())
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Variable(name) => write!(f, "{}", name),
            Atom::Integer(value) => write!(f, "{}", value),
            Atom::Character(value) | Atom::String(value) => write!(f, "\"{}\"", value),
            Atom::Indegree(node) => write!(f, "indeg({})", node),
            Atom::Outdegree(node) => write!(f, "outdeg({})", node),
            Atom::ListLength(list) => {
                write!(f, "llength(")?;
                fmt_list(f, list)?;
                write!(f, ")")
            }
            Atom::StringLength(inner) => write!(f, "slength({})", inner),
            Atom::Neg(inner) => write!(f, "- {}", inner),
            Atom::Add(left, right) => Atom::fmt_binary(f, left, "+", right),
            Atom::Subtract(left, right) => Atom::fmt_binary(f, left, "-", right),
            Atom::Multiply(left, right) => Atom::fmt_binary(f, left, "*", right),
            Atom::Divide(left, right) => Atom::fmt_binary(f, left, "/", right),
            Atom::Concat(left, right) => Atom::fmt_binary(f, left, ".", right),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_display() {
        assert_eq!(format!("{}", Atom::Integer(42)), "42");
        assert_eq!(format!("{}", Atom::Integer(-7)), "-7");
        assert_eq!(format!("{}", Atom::String("foo".to_string())), "\"foo\"");
        assert_eq!(format!("{}", Atom::Character("a".to_string())), "\"a\"");
        assert_eq!(format!("{}", Atom::Variable("x".to_string())), "x");
    }

    #[test]
    fn test_degree_and_length_display() {
        assert_eq!(format!("{}", Atom::Indegree("n1".to_string())), "indeg(n1)");
        assert_eq!(
            format!("{}", Atom::Outdegree("n2".to_string())),
            "outdeg(n2)"
        );
        let list = Atom::ListLength(vec![Atom::Integer(1), Atom::Integer(2)]);
        assert_eq!(format!("{}", list), "llength(1 : 2)");
        let slen = Atom::StringLength(Box::new(Atom::String("ab".to_string())));
        assert_eq!(format!("{}", slen), "slength(\"ab\")");
    }

    #[test]
    fn test_expression_display() {
        let neg = Atom::Neg(Box::new(Atom::Integer(3)));
        assert_eq!(format!("{}", neg), "- 3");

        let sum = Atom::Add(
            Box::new(Atom::Variable("i".to_string())),
            Box::new(Atom::Integer(1)),
        );
        assert_eq!(format!("{}", sum), "(i + 1)");

        let concat = Atom::Concat(
            Box::new(Atom::String("a".to_string())),
            Box::new(Atom::Variable("s".to_string())),
        );
        assert_eq!(format!("{}", concat), "(\"a\" . s)");
    }

    #[test]
    fn test_nested_expression_display() {
        let expr = Atom::Multiply(
            Box::new(Atom::Add(
                Box::new(Atom::Integer(1)),
                Box::new(Atom::Integer(2)),
            )),
            Box::new(Atom::Neg(Box::new(Atom::Variable("n".to_string())))),
        );
        assert_eq!(format!("{}", expr), "((1 + 2) * - n)");
    }

    #[test]
    fn test_ground_constants() {
        assert!(Atom::Integer(5).is_ground());
        assert!(Atom::String("s".to_string()).is_ground());
        assert!(Atom::Character("c".to_string()).is_ground());
    }

    #[test]
    fn test_non_ground_atoms() {
        assert!(!Atom::Variable("x".to_string()).is_ground());
        assert!(!Atom::Indegree("n0".to_string()).is_ground());
        assert!(!Atom::ListLength(vec![]).is_ground());
        assert!(!Atom::StringLength(Box::new(Atom::String("s".to_string()))).is_ground());
    }

    #[test]
    fn test_ground_propagates_through_expressions() {
        let ground = Atom::Add(Box::new(Atom::Integer(1)), Box::new(Atom::Integer(2)));
        assert!(ground.is_ground());

        let not_ground = Atom::Add(
            Box::new(Atom::Integer(1)),
            Box::new(Atom::Variable("x".to_string())),
        );
        assert!(!not_ground.is_ground());

        assert!(Atom::Neg(Box::new(Atom::Integer(1))).is_ground());
        assert!(!Atom::Neg(Box::new(Atom::Variable("x".to_string()))).is_ground());
    }
}
