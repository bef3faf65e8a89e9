//! Expression tree model
//!
//! [`Expression`] is the capability a representation needs so the parser and
//! its default reduction can build it; [`SExpr`] is the default
//! representation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::value::{Scalar, Value};

/// Factory argument: a raw atomic value or an assembled child sequence
#[derive(Debug, Clone, PartialEq)]
pub enum Content<E> {
    /// Raw value of an atom token
    Value(Value),
    /// Children of a completed list
    List(Vec<E>),
}

/// Atom-or-list node of a tree representation
pub trait Expression: Sized {
    /// Type held by atoms
    type Scalar;

    /// Construct a node from a raw value or a child sequence
    fn create(content: Content<Self>) -> Result<Self>;

    fn is_atom(&self) -> bool;

    /// Children of a list node; fails on an atom
    fn children(&self) -> Result<&[Self]>;

    /// Value of an atom node, `None` for the null atom; fails on a list
    fn value(&self) -> Result<Option<&Self::Scalar>>;

    /// Number of children of a list node; fails on an atom
    fn len(&self) -> Result<usize> {
        Ok(self.children()?.len())
    }

    /// Child at `index` of a list node
    fn child(&self, index: usize) -> Result<&Self> {
        let children = self.children()?;
        children.get(index).ok_or(Error::IndexOutOfBounds {
            index,
            length: children.len(),
        })
    }
}

/// Default tree representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SExpr<V = Value> {
    /// Leaf holding a single value, or nothing for null
    Atom(Option<V>),
    /// Ordered sequence of child nodes
    List(Vec<SExpr<V>>),
}

impl<V: Scalar> SExpr<V> {
    pub fn atom(value: impl Into<V>) -> Self {
        SExpr::Atom(Some(value.into()))
    }

    pub fn null() -> Self {
        SExpr::Atom(None)
    }

    pub fn list(children: impl IntoIterator<Item = SExpr<V>>) -> Self {
        SExpr::List(children.into_iter().collect())
    }

    /// Iterate the children of a list node
    pub fn iter(&self) -> Result<std::slice::Iter<'_, SExpr<V>>> {
        Ok(self.children()?.iter())
    }

    /// Render as notation text that parses back into the same tree
    ///
    /// Atoms render through their raw value, so the result re-parses only
    /// with a lexicon whose mappers invert that rendering.
    pub fn notation(&self) -> String {
        let mut out = String::new();
        self.write_notation(&mut out);
        out
    }

    fn write_notation(&self, out: &mut String) {
        match self {
            SExpr::Atom(Some(v)) => out.push_str(&v.to_value().to_string()),
            SExpr::Atom(None) => out.push_str("null"),
            SExpr::List(children) => {
                out.push('(');
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        out.push(' ');
                    }
                    child.write_notation(out);
                }
                out.push(')');
            }
        }
    }

    /// Nesting depth: 0 for an atom, 1 for a list of atoms (or an empty list)
    pub fn depth(&self) -> usize {
        match self {
            SExpr::Atom(_) => 0,
            SExpr::List(children) => 1 + children.iter().map(SExpr::depth).max().unwrap_or(0),
        }
    }
}

impl<V: Scalar> Expression for SExpr<V> {
    type Scalar = V;

    fn create(content: Content<Self>) -> Result<Self> {
        match content {
            Content::Value(Value::Null) => Ok(SExpr::Atom(None)),
            Content::Value(value) => Ok(SExpr::Atom(Some(V::from_value(value)?))),
            Content::List(children) => Ok(SExpr::List(children)),
        }
    }

    fn is_atom(&self) -> bool {
        matches!(self, SExpr::Atom(_))
    }

    fn children(&self) -> Result<&[Self]> {
        match self {
            SExpr::List(children) => Ok(children),
            SExpr::Atom(_) => Err(Error::NotAList),
        }
    }

    fn value(&self) -> Result<Option<&V>> {
        match self {
            SExpr::Atom(value) => Ok(value.as_ref()),
            SExpr::List(_) => Err(Error::NotAnAtom),
        }
    }
}

/// Diagnostic rendering: `( child child )` for lists, `Type{value}` for atoms
impl<V: Scalar> fmt::Display for SExpr<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SExpr::Atom(Some(v)) => write!(f, "{}{{{}}}", v.type_name(), v.to_value()),
            SExpr::Atom(None) => write!(f, "{}{{null}}", V::TYPE_NAME),
            SExpr::List(children) => {
                write!(f, "( ")?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", child)?;
                }
                write!(f, " )")
            }
        }
    }
}
