//! Interning for identifiers and keywords.
//!
//! Every token the lexer produces is interned here rather than carried
//! around as an owned `String`; downstream code (the parser, the evaluator)
//! compares cheap `Symbol` values instead of byte-for-byte strings.

use std::collections::HashMap;

/// A handle into a [`SymbolTable`]. Cheap to copy and compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol(u32);

/// Append-only string interner.
///
/// Mirrors the source language's symbol table, but threaded explicitly
/// through the lexer/parser/evaluator instead of living behind a process
/// global, so a single process could in principle run more than one
/// independent interpreter without contention.
#[derive(Debug, Default)]
pub struct SymbolTable {
    by_text: HashMap<Box<str>, Symbol>,
    by_symbol: Vec<Box<str>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `text`, returning its (possibly pre-existing) `Symbol`.
    pub fn intern(&mut self, text: &str) -> Symbol {
        if let Some(&sym) = self.by_text.get(text) {
            return sym;
        }
        let sym = Symbol(self.by_symbol.len() as u32);
        self.by_symbol.push(text.into());
        self.by_text.insert(text.into(), sym);
        sym
    }

    /// Resolves a previously interned symbol back to its text.
    ///
    /// Panics if `sym` was not produced by this table — that would indicate
    /// a bug (mixing symbols from two different tables), not a recoverable
    /// runtime condition.
    pub fn resolve(&self, sym: Symbol) -> &str {
        &self.by_symbol[sym.0 as usize]
    }
}

/// Pre-seeded keys for every built-in head form and reserved spelling, so
/// the evaluator dispatches on `Symbol` equality rather than re-comparing
/// strings on every call.
#[derive(Debug, Clone, Copy)]
pub struct Builtins {
    pub def: Symbol,
    pub do_: Symbol,
    pub let_: Symbol,
    pub match_: Symbol,
    pub question: Symbol,
    pub print: Symbol,
    pub read_int: Symbol,
    pub read_char: Symbol,
    pub get: Symbol,
    pub plus: Symbol,
    pub minus: Symbol,
    pub times: Symbol,
    pub divide: Symbol,
    pub percent: Symbol,
    pub equal: Symbol,
    pub colon: Symbol,
    /// Name given to anonymous thunks created for `Program`/`do` children
    /// and for the root thunk that wraps the whole program.
    pub star: Symbol,
}

impl Builtins {
    /// Interns every built-in spelling up front. Must run before any source
    /// file is lexed so that these symbols get stable, well-known values.
    pub fn seed(symbols: &mut SymbolTable) -> Self {
        Builtins {
            def: symbols.intern("def"),
            do_: symbols.intern("do"),
            let_: symbols.intern("let"),
            match_: symbols.intern("match"),
            question: symbols.intern("?"),
            print: symbols.intern("print"),
            read_int: symbols.intern("read_int"),
            read_char: symbols.intern("read_char"),
            get: symbols.intern("get"),
            plus: symbols.intern("+"),
            minus: symbols.intern("-"),
            times: symbols.intern("*"),
            divide: symbols.intern("/"),
            percent: symbols.intern("%"),
            equal: symbols.intern("="),
            colon: symbols.intern(":"),
            star: symbols.intern("*"),
        }
    }
}
