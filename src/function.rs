//! The global function table populated by `def`.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::ast::ExprRef;
use crate::symbol::Symbol;

#[derive(Debug)]
pub struct FunctionDef {
    pub name: Symbol,
    pub params: Vec<Symbol>,
    pub body: ExprRef,
}

#[derive(Debug)]
pub struct RedefinitionError {
    pub name: String,
}

impl fmt::Display for RedefinitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "function '{}' is already defined", self.name)
    }
}

impl std::error::Error for RedefinitionError {}

/// Append-only; every `def` adds exactly one entry and redefining a name is
/// rejected rather than silently shadowing it.
#[derive(Debug, Default)]
pub struct FunctionTable {
    by_name: HashMap<Symbol, Rc<FunctionDef>>,
}

impl FunctionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, def: FunctionDef, display_name: &str) -> Result<(), RedefinitionError> {
        if self.by_name.contains_key(&def.name) {
            return Err(RedefinitionError {
                name: display_name.to_string(),
            });
        }
        self.by_name.insert(def.name, Rc::new(def));
        Ok(())
    }

    pub fn get(&self, name: Symbol) -> Option<Rc<FunctionDef>> {
        self.by_name.get(&name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expr, Primitive};
    use crate::symbol::SymbolTable;

    #[test]
    fn redefining_a_function_is_rejected() {
        let mut symbols = SymbolTable::new();
        let name = symbols.intern("square");
        let body: ExprRef = Rc::new(Expr::Primitive(Primitive::Null));

        let mut table = FunctionTable::new();
        table
            .define(
                FunctionDef {
                    name,
                    params: vec![],
                    body: body.clone(),
                },
                "square",
            )
            .unwrap();

        let err = table
            .define(
                FunctionDef {
                    name,
                    params: vec![],
                    body,
                },
                "square",
            )
            .unwrap_err();
        assert_eq!(err.name, "square");
    }
}
