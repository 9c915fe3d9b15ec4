//! Hand-written lexer.
//!
//! Tokens are maximal runs of bytes separated by whitespace, `#` comments,
//! or one of the fixed single-character tokens; a leading `"` instead
//! switches into string-token mode and scans to the matching closing quote.
//! Every token produced is immediately interned.

use std::collections::HashSet;
use std::fmt;

use once_cell::sync::Lazy;

use crate::symbol::{Symbol, SymbolTable};

/// Bytes that are always their own one-character token, regardless of what
/// precedes or follows them.
static SINGLE_CHAR_TOKENS: Lazy<HashSet<u8>> =
    Lazy::new(|| "()[],+-*/=?:".bytes().collect());

#[derive(Debug, Clone)]
pub struct LexError {
    pub message: String,
    pub offset: usize,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (byte offset {})", self.message, self.offset)
    }
}

impl std::error::Error for LexError {}

pub struct Lexer<'a> {
    input: &'a [u8],
    idx: usize,
    prev_idx: Option<usize>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input: input.as_bytes(),
            idx: 0,
            prev_idx: None,
        }
    }

    fn at(&self, i: usize) -> Option<u8> {
        self.input.get(i).copied()
    }

    /// Advances past whitespace and `#`-prefixed line comments.
    fn skip_trivia(&self, mut i: usize) -> usize {
        loop {
            while let Some(b) = self.at(i) {
                if b.is_ascii_whitespace() {
                    i += 1;
                } else {
                    break;
                }
            }
            if self.at(i) == Some(b'#') {
                while let Some(b) = self.at(i) {
                    i += 1;
                    if b == b'\n' {
                        break;
                    }
                }
                continue;
            }
            break;
        }
        i
    }

    /// Returns the next token, interning it, or `None` at end of input.
    pub fn seek(&mut self, symbols: &mut SymbolTable) -> Result<Option<Symbol>, LexError> {
        let start = self.skip_trivia(self.idx);

        let Some(first) = self.at(start) else {
            return Ok(None);
        };

        let (text_start, end) = if first == b'"' {
            let mut i = start + 1;
            loop {
                match self.at(i) {
                    None => {
                        return Err(LexError {
                            message: "unterminated string literal".into(),
                            offset: start,
                        })
                    }
                    Some(b'"') => {
                        i += 1;
                        break;
                    }
                    Some(_) => i += 1,
                }
            }
            (start, i)
        } else if SINGLE_CHAR_TOKENS.contains(&first) {
            (start, start + 1)
        } else {
            let mut i = start;
            while let Some(b) = self.at(i) {
                if b.is_ascii_whitespace() || b == b'#' || SINGLE_CHAR_TOKENS.contains(&b) {
                    break;
                }
                i += 1;
            }
            (start, i)
        };

        let text = std::str::from_utf8(&self.input[text_start..end])
            .expect("source must be valid UTF-8, guaranteed by &str input");
        let sym = symbols.intern(text);

        self.prev_idx = Some(self.idx);
        self.idx = end;
        Ok(Some(sym))
    }

    /// Undoes the most recent [`Lexer::seek`], including any trivia it
    /// skipped. Only a single token of lookback is supported, matching the
    /// source lexer's one-slot `prev_idx`.
    pub fn back(&mut self) -> Result<(), LexError> {
        match self.prev_idx.take() {
            Some(prev) => {
                self.idx = prev;
                Ok(())
            }
            None => Err(LexError {
                message: "lexer lookback called twice without an intervening seek".into(),
                offset: self.idx,
            }),
        }
    }

    /// Current byte offset, used for diagnostics emitted by the parser.
    pub fn offset(&self) -> usize {
        self.idx
    }
}
