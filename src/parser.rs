//! Recursive-descent parser with single-token backtracking.
//!
//! Grammar:
//!
//! ```text
//! program   := statement*
//! statement := "(" id expr* ")"
//! list      := "[" expr* "]"
//! expr      := primitive | id | statement | list
//! id        := [A-Za-z_+\-*/=?%:]+
//! integer   := "0" | anything atoi() would parse as non-zero
//! string    := '"' ... '"'
//! ```

use std::fmt;
use std::rc::Rc;

use crate::ast::{Expr, ExprRef, Primitive};
use crate::lexer::{LexError, Lexer};
use crate::symbol::{Symbol, SymbolTable};

#[derive(Debug)]
pub struct ParseError {
    pub message: String,
    pub offset: usize,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (byte offset {})", self.message, self.offset)
    }
}

impl std::error::Error for ParseError {}

impl From<LexError> for ParseError {
    fn from(e: LexError) -> Self {
        ParseError {
            message: e.message,
            offset: e.offset,
        }
    }
}

/// Replicates C's `atoi`: optional sign, leading decimal digits, stop at
/// the first non-digit, zero if there were none. The parser's permissive
/// integer rule ("0" or anything this would read as non-zero) comes
/// straight from the source's own `parse_primitive`.
fn c_atoi(s: &str) -> i64 {
    let bytes = s.as_bytes();
    let mut i = 0;
    let neg = match bytes.first() {
        Some(b'-') => {
            i += 1;
            true
        }
        Some(b'+') => {
            i += 1;
            false
        }
        _ => false,
    };
    let mut value: i64 = 0;
    while let Some(b) = bytes.get(i) {
        if !b.is_ascii_digit() {
            break;
        }
        value = value * 10 + i64::from(b - b'0');
        i += 1;
    }
    if neg {
        -value
    } else {
        value
    }
}

fn classify_primitive(text: &str) -> Option<Primitive> {
    if text == "0" || c_atoi(text) != 0 {
        return Some(Primitive::Number(c_atoi(text)));
    }
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        return Some(Primitive::Str(Rc::from(&text[1..text.len() - 1])));
    }
    match text {
        "ANY" => Some(Primitive::Any),
        "TRUE" => Some(Primitive::True),
        "FALSE" => Some(Primitive::False),
        "NULL" => Some(Primitive::Null),
        _ => None,
    }
}

fn is_id_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || "+-*/=?%:".contains(c)
}

pub struct Parser<'a> {
    lexer: Lexer<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Parser {
            lexer: Lexer::new(input),
        }
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError {
            message: message.into(),
            offset: self.lexer.offset(),
        }
    }

    fn try_primitive(&mut self, symbols: &mut SymbolTable) -> Result<Option<Primitive>, ParseError> {
        let Some(sym) = self.lexer.seek(symbols)? else {
            return Ok(None);
        };
        let text = symbols.resolve(sym);
        match classify_primitive(text) {
            Some(p) => Ok(Some(p)),
            None => {
                self.lexer.back()?;
                Ok(None)
            }
        }
    }

    fn try_id(&mut self, symbols: &mut SymbolTable) -> Result<Option<Symbol>, ParseError> {
        let Some(sym) = self.lexer.seek(symbols)? else {
            return Ok(None);
        };
        let text = symbols.resolve(sym);
        if !text.is_empty() && text.chars().all(is_id_char) {
            Ok(Some(sym))
        } else {
            self.lexer.back()?;
            Ok(None)
        }
    }

    fn expect_punct(&mut self, symbols: &mut SymbolTable, punct: &str) -> Result<bool, ParseError> {
        let Some(sym) = self.lexer.seek(symbols)? else {
            return Ok(false);
        };
        if symbols.resolve(sym) == punct {
            Ok(true)
        } else {
            self.lexer.back()?;
            Ok(false)
        }
    }

    fn try_list(&mut self, symbols: &mut SymbolTable) -> Result<Option<ExprRef>, ParseError> {
        if !self.expect_punct(symbols, "[")? {
            return Ok(None);
        }
        let mut children = Vec::new();
        loop {
            if let Some(child) = self.try_expr(symbols)? {
                children.push(child);
                continue;
            }
            if self.expect_punct(symbols, "]")? {
                break;
            }
            return Err(self.error("expected ']' to close list"));
        }
        Ok(Some(Rc::new(Expr::List(children))))
    }

    fn try_statement(&mut self, symbols: &mut SymbolTable) -> Result<Option<ExprRef>, ParseError> {
        if !self.expect_punct(symbols, "(")? {
            return Ok(None);
        }
        let head = self
            .try_id(symbols)?
            .ok_or_else(|| self.error("expected an identifier as statement head"))?;
        let mut children = vec![Rc::new(Expr::Id(head))];
        loop {
            if let Some(child) = self.try_expr(symbols)? {
                children.push(child);
                continue;
            }
            if self.expect_punct(symbols, ")")? {
                break;
            }
            return Err(self.error("expected ')' to close statement"));
        }
        Ok(Some(Rc::new(Expr::Statement(children))))
    }

    fn try_expr(&mut self, symbols: &mut SymbolTable) -> Result<Option<ExprRef>, ParseError> {
        if let Some(p) = self.try_primitive(symbols)? {
            return Ok(Some(Rc::new(Expr::Primitive(p))));
        }
        if let Some(id) = self.try_id(symbols)? {
            return Ok(Some(Rc::new(Expr::Id(id))));
        }
        if let Some(stmt) = self.try_statement(symbols)? {
            return Ok(Some(stmt));
        }
        if let Some(list) = self.try_list(symbols)? {
            return Ok(Some(list));
        }
        Ok(None)
    }

    /// Parses a whole source file: zero or more top-level statements,
    /// followed by end of input.
    pub fn parse_program(&mut self, symbols: &mut SymbolTable) -> Result<ExprRef, ParseError> {
        let mut statements = Vec::new();
        while let Some(stmt) = self.try_statement(symbols)? {
            statements.push(stmt);
        }
        if let Some(sym) = self.lexer.seek(symbols)? {
            return Err(self.error(format!(
                "unexpected token '{}' after program",
                symbols.resolve(sym)
            )));
        }
        Ok(Rc::new(Expr::Program(statements)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> (ExprRef, SymbolTable) {
        let mut symbols = SymbolTable::new();
        let mut parser = Parser::new(src);
        let program = parser.parse_program(&mut symbols).unwrap();
        (program, symbols)
    }

    #[test]
    fn parses_empty_program() {
        let (program, _) = parse("");
        match &*program {
            Expr::Program(stmts) => assert!(stmts.is_empty()),
            _ => panic!("expected a Program node"),
        }
    }

    #[test]
    fn parses_a_print_statement() {
        let (program, symbols) = parse("(print \"hi\")");
        let Expr::Program(stmts) = &*program else {
            panic!("expected Program")
        };
        assert_eq!(stmts.len(), 1);
        let Expr::Statement(children) = &*stmts[0] else {
            panic!("expected Statement")
        };
        assert_eq!(children.len(), 2);
        match &*children[0] {
            Expr::Id(sym) => assert_eq!(symbols.resolve(*sym), "print"),
            _ => panic!("expected head to be an Id"),
        }
        match &*children[1] {
            Expr::Primitive(Primitive::Str(s)) => assert_eq!(&**s, "hi"),
            _ => panic!("expected a string primitive"),
        }
    }

    #[test]
    fn permissive_integer_literal() {
        let (program, _) = parse("(print 12abc)");
        let Expr::Program(stmts) = &*program else {
            panic!()
        };
        let Expr::Statement(children) = &*stmts[0] else {
            panic!()
        };
        match &*children[1] {
            Expr::Primitive(Primitive::Number(n)) => assert_eq!(*n, 12),
            other => panic!("expected Number(12), got {other:?}"),
        }
    }

    #[test]
    fn missing_closing_paren_is_fatal() {
        let mut symbols = SymbolTable::new();
        let mut parser = Parser::new("(print \"hi\"");
        assert!(parser.parse_program(&mut symbols).is_err());
    }

    #[test]
    fn nested_statements_parse() {
        let (program, symbols) = parse("(def id x (do x))");
        let Expr::Program(stmts) = &*program else {
            panic!()
        };
        let Expr::Statement(children) = &*stmts[0] else {
            panic!()
        };
        match &*children[0] {
            Expr::Id(sym) => assert_eq!(symbols.resolve(*sym), "def"),
            _ => panic!(),
        }
        assert_eq!(children.len(), 4);
    }

    #[test]
    fn list_is_parsed_but_not_interpreted_here() {
        let (program, _) = parse("(print [1 2 3])");
        let Expr::Program(stmts) = &*program else {
            panic!()
        };
        let Expr::Statement(children) = &*stmts[0] else {
            panic!()
        };
        assert!(matches!(&*children[1], Expr::List(_)));
    }
}
