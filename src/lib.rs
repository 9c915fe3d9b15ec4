//! A tree-walking interpreter for a tiny, lazily-evaluated s-expression
//! language.

pub mod ast;
pub mod context;
pub mod error;
pub mod function;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod symbol;
pub mod value;

use std::io::{BufRead, Write};

use context::{Context, Thunk};
use error::LazeError;
use interpreter::Interpreter;
use parser::Parser;

/// Lexes, parses and evaluates a whole program, writing `print` output to
/// `stdout` and reading `read_int`/`read_char` input from `stdin`.
///
/// The program's own top-level result is discarded, not printed — only
/// explicit `print` statements produce output.
pub fn run<W: Write, R: BufRead>(source: &str, stdout: &mut W, stdin: &mut R) -> Result<(), LazeError> {
    let mut interpreter = Interpreter::new();
    let mut parser = Parser::new(source);
    let program = parser.parse_program(&mut interpreter.symbols)?;
    let root = Thunk::new(interpreter.builtins.star, program, Context::new());
    interpreter.execute(&root, stdout, stdin)?;
    Ok(())
}
