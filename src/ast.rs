//! The parsed syntax tree.
//!
//! Modelled as a proper sum type instead of the "one struct, optional
//! fields, discriminant tag" shape of the C source: each variant only
//! carries the payload it actually needs.

use std::rc::Rc;

use crate::symbol::Symbol;

/// A node in the parsed tree. Cheap to share: every subtree is reference
/// counted so a [`crate::context::Thunk`] can hold onto the expression it
/// was built from without owning (or cloning) the whole program.
pub type ExprRef = Rc<Expr>;

#[derive(Debug)]
pub enum Expr {
    /// The whole program: a sequence of top-level statements.
    Program(Vec<ExprRef>),
    /// `(head arg*)` — `head` is always the first element and is an `Id`.
    Statement(Vec<ExprRef>),
    /// `[ ... ]` — parsed, never evaluated (reserved for future use).
    List(Vec<ExprRef>),
    /// A bare identifier, resolved against the enclosing context at
    /// evaluation time.
    Id(Symbol),
    /// A literal value fixed at parse time.
    Primitive(Primitive),
}

/// Source-level literal kinds. `Char` has no literal syntax — it only ever
/// arises as a runtime [`crate::value::Value`] produced by `read_char`.
#[derive(Debug, Clone)]
pub enum Primitive {
    Any,
    True,
    False,
    Null,
    Number(i64),
    Str(Rc<str>),
}
