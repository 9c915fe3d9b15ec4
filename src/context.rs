//! Thunks and lexical contexts.
//!
//! A [`Context`] is an ordered list of thunks, not a map: names are looked
//! up by a backward linear scan so that later bindings shadow earlier ones
//! of the same name.
//!
//! Two different "copy" operations matter here, and conflating them is the
//! easiest way to get scoping wrong:
//!
//! - [`Context::clone`] is a cheap handle clone: the clone and the original
//!   still share the same underlying list, so a `let` pushed through either
//!   handle is visible through both. This is what passing "the same scope"
//!   to a sub-expression means (evaluating an argument, a condition, a
//!   match candidate — none of these should detach from the scope they were
//!   written in).
//! - [`Context::snapshot`] copies the current bindings into a brand new,
//!   independent list. `Program` and `do` each take exactly one snapshot
//!   when they start a new scope, so bindings made inside don't leak back
//!   into the parent; `let` takes a snapshot of "everything bound so far"
//!   to capture in the new thunk's own context, specifically so the new
//!   binding can't see itself, before pushing that new thunk onto the
//!   *live*, still-aliased context so later siblings do see it.

use std::cell::RefCell;
use std::rc::Rc;

use crate::ast::ExprRef;
use crate::symbol::Symbol;
use crate::value::Value;

/// A suspended computation: an expression paired with the context it
/// should be evaluated in, plus a memoisation slot filled in the first time
/// it is forced.
#[derive(Debug)]
pub struct Thunk {
    pub name: Symbol,
    pub body: ExprRef,
    pub context: Context,
    memo: RefCell<Option<Value>>,
}

impl Thunk {
    pub fn new(name: Symbol, body: ExprRef, context: Context) -> Rc<Thunk> {
        Rc::new(Thunk {
            name,
            body,
            context,
            memo: RefCell::new(None),
        })
    }

    pub fn memo(&self) -> Option<Value> {
        self.memo.borrow().clone()
    }

    /// Records the result of forcing this thunk. Called at most once per
    /// thunk, from [`crate::interpreter::Interpreter::execute`].
    pub fn set_memo(&self, value: Value) {
        *self.memo.borrow_mut() = Some(value);
    }
}

#[derive(Debug, Clone, Default)]
pub struct Context(Rc<RefCell<Vec<Rc<Thunk>>>>);

impl Context {
    pub fn new() -> Self {
        Context(Rc::new(RefCell::new(Vec::new())))
    }

    /// Appends to the shared list. Visible through every handle that still
    /// aliases this same context.
    pub fn push(&self, thunk: Rc<Thunk>) {
        self.0.borrow_mut().push(thunk);
    }

    /// Most-recently-pushed match wins: later `let`s shadow earlier ones of
    /// the same name.
    pub fn find(&self, name: Symbol) -> Option<Rc<Thunk>> {
        self.0.borrow().iter().rev().find(|t| t.name == name).cloned()
    }

    /// An independent copy of the current bindings: later pushes to either
    /// the original or the snapshot are invisible to the other side.
    pub fn snapshot(&self) -> Context {
        Context(Rc::new(RefCell::new(self.0.borrow().clone())))
    }
}
