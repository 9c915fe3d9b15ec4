//! A single error type spanning every phase, so the CLI entry point has one
//! thing to match on regardless of where a run failed.

use std::fmt;

use crate::interpreter::EvalError;
use crate::lexer::LexError;
use crate::parser::ParseError;

#[derive(Debug)]
pub enum LazeError {
    Lex(LexError),
    Parse(ParseError),
    Eval(EvalError),
    Io(std::io::Error),
}

impl fmt::Display for LazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LazeError::Lex(e) => write!(f, "lex error: {e}"),
            LazeError::Parse(e) => write!(f, "parse error: {e}"),
            LazeError::Eval(e) => write!(f, "runtime error: {e}"),
            LazeError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for LazeError {}

impl From<LexError> for LazeError {
    fn from(e: LexError) -> Self {
        LazeError::Lex(e)
    }
}

impl From<ParseError> for LazeError {
    fn from(e: ParseError) -> Self {
        LazeError::Parse(e)
    }
}

impl From<EvalError> for LazeError {
    fn from(e: EvalError) -> Self {
        LazeError::Eval(e)
    }
}

impl From<std::io::Error> for LazeError {
    fn from(e: std::io::Error) -> Self {
        LazeError::Io(e)
    }
}
