//! The evaluator: `execute` forces a thunk, dispatching on the expression
//! it wraps. Every built-in form is handled here.

use std::fmt;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use crate::ast::{Expr, ExprRef, Primitive};
use crate::context::{Context, Thunk};
use crate::function::{FunctionDef, FunctionTable};
use crate::symbol::{Builtins, Symbol, SymbolTable};
use crate::value::{is_truthy, values_equal, Value};

#[derive(Debug)]
pub struct EvalError {
    pub message: String,
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for EvalError {}

fn describe_kind(value: &Value) -> &'static str {
    match value {
        Value::Any => "ANY",
        Value::True => "TRUE",
        Value::False => "FALSE",
        Value::Null => "NULL",
        Value::Number(_) => "a number",
        Value::Str(_) => "a string",
        Value::Char(_) => "a character",
    }
}

fn print_value<W: Write>(value: &Value, out: &mut W) -> io::Result<()> {
    match value {
        Value::Any => writeln!(out, "ANY"),
        Value::True => writeln!(out, "TRUE"),
        Value::False => writeln!(out, "FALSE"),
        Value::Null => writeln!(out, "NULL"),
        Value::Number(n) => writeln!(out, "{n}"),
        Value::Str(s) => writeln!(out, "{s}"),
        Value::Char(c) => {
            out.write_all(&[*c])?;
            out.write_all(b"\n")
        }
    }
}

fn peek_byte<R: BufRead>(input: &mut R) -> io::Result<Option<u8>> {
    Ok(input.fill_buf()?.first().copied())
}

fn skip_ws<R: BufRead>(input: &mut R) -> io::Result<()> {
    while let Some(b) = peek_byte(input)? {
        if b.is_ascii_whitespace() {
            input.consume(1);
        } else {
            break;
        }
    }
    Ok(())
}

/// Mirrors `scanf(" %lld", ...)`: skip whitespace, then read an optionally
/// signed run of decimal digits.
fn read_int<R: BufRead>(input: &mut R) -> io::Result<i64> {
    skip_ws(input)?;
    let mut neg = false;
    if let Some(b @ (b'-' | b'+')) = peek_byte(input)? {
        neg = b == b'-';
        input.consume(1);
    }
    let mut value: i64 = 0;
    let mut saw_digit = false;
    while let Some(b) = peek_byte(input)? {
        if !b.is_ascii_digit() {
            break;
        }
        value = value * 10 + i64::from(b - b'0');
        saw_digit = true;
        input.consume(1);
    }
    if !saw_digit {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "expected an integer on stdin",
        ));
    }
    Ok(if neg { -value } else { value })
}

/// Mirrors `scanf(" %c", ...)`: skip whitespace, then read exactly one
/// byte.
fn read_char<R: BufRead>(input: &mut R) -> io::Result<u8> {
    skip_ws(input)?;
    match peek_byte(input)? {
        Some(b) => {
            input.consume(1);
            Ok(b)
        }
        None => Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "expected a character on stdin",
        )),
    }
}

/// Owns the symbol table and the global function table, and drives
/// `execute`. Kept as an explicit value (rather than process-global
/// statics) so nothing here needs `unsafe` or a `static mut`.
pub struct Interpreter {
    pub symbols: SymbolTable,
    pub builtins: Builtins,
    pub functions: FunctionTable,
}

impl Interpreter {
    pub fn new() -> Self {
        let mut symbols = SymbolTable::new();
        let builtins = Builtins::seed(&mut symbols);
        Interpreter {
            symbols,
            builtins,
            functions: FunctionTable::new(),
        }
    }

    fn fatal(&self, message: impl Into<String>) -> EvalError {
        EvalError {
            message: message.into(),
        }
    }

    fn anon(&self, body: ExprRef, context: Context) -> Rc<Thunk> {
        Thunk::new(self.builtins.star, body, context)
    }

    /// Forces `thunk`, returning its memoised value if this is not the
    /// first time. Every variant of [`Expr`] is handled exactly once here;
    /// `Statement` fans out to one helper per built-in head.
    pub fn execute<W: Write, R: BufRead>(
        &mut self,
        thunk: &Rc<Thunk>,
        stdout: &mut W,
        stdin: &mut R,
    ) -> Result<Value, EvalError> {
        if let Some(value) = thunk.memo() {
            return Ok(value);
        }
        let value = match &*thunk.body {
            Expr::Program(children) => self.exec_scope(thunk, children, stdout, stdin)?,
            Expr::Statement(children) => self.exec_statement(thunk, children, stdout, stdin)?,
            Expr::List(_) => return Err(self.fatal("list evaluation is not implemented")),
            Expr::Id(name) => self.exec_id(thunk, *name, stdout, stdin)?,
            Expr::Primitive(p) => self.exec_primitive(p),
        };
        thunk.set_memo(value.clone());
        Ok(value)
    }

    /// Shared by `Program` (all children) and `do` (children after the
    /// head): one context snapshot taken once, reused across every child so
    /// a `let` made by an earlier sibling is visible to a later one.
    fn exec_scope<W: Write, R: BufRead>(
        &mut self,
        thunk: &Rc<Thunk>,
        children: &[ExprRef],
        stdout: &mut W,
        stdin: &mut R,
    ) -> Result<Value, EvalError> {
        let scope = thunk.context.snapshot();
        let mut result = Value::Null;
        for child in children {
            let child_thunk = self.anon(child.clone(), scope.clone());
            result = self.execute(&child_thunk, stdout, stdin)?;
        }
        Ok(result)
    }

    fn exec_statement<W: Write, R: BufRead>(
        &mut self,
        thunk: &Rc<Thunk>,
        children: &[ExprRef],
        stdout: &mut W,
        stdin: &mut R,
    ) -> Result<Value, EvalError> {
        let head = match children.first().map(|c| &**c) {
            Some(Expr::Id(sym)) => *sym,
            _ => return Err(self.fatal("a statement's head must be an identifier")),
        };
        let b = self.builtins;

        if head == b.def {
            self.exec_def(children)?;
            return Ok(Value::Null);
        }
        if head == b.do_ {
            return self.exec_scope_from(thunk, &children[1..], stdout, stdin, "do requires at least one expression");
        }
        if head == b.let_ {
            return self.exec_let(thunk, children);
        }
        if head == b.question {
            return self.exec_conditional(thunk, children, stdout, stdin);
        }
        if head == b.match_ {
            return self.exec_match(thunk, children, stdout, stdin);
        }
        if head == b.print {
            return self.exec_print(thunk, children, stdout, stdin);
        }
        if head == b.read_int {
            if children.len() != 1 {
                return Err(self.fatal("'read_int' takes no arguments"));
            }
            return read_int(stdin)
                .map(Value::Number)
                .map_err(|e| self.fatal(e.to_string()));
        }
        if head == b.read_char {
            if children.len() != 1 {
                return Err(self.fatal("'read_char' takes no arguments"));
            }
            return read_char(stdin)
                .map(Value::Char)
                .map_err(|e| self.fatal(e.to_string()));
        }
        if head == b.get {
            return Err(self.fatal("'get' is not implemented"));
        }
        if head == b.plus || head == b.minus || head == b.times || head == b.divide || head == b.percent {
            return self.exec_arith(thunk, head, children, stdout, stdin);
        }
        if head == b.equal {
            return self.exec_equal(thunk, children, stdout, stdin);
        }
        self.exec_call(thunk, head, children, stdout, stdin)
    }

    /// `do`'s body, sharing the `Program`/`do` scope-entry logic above but
    /// reported with its own arity message.
    fn exec_scope_from<W: Write, R: BufRead>(
        &mut self,
        thunk: &Rc<Thunk>,
        body: &[ExprRef],
        stdout: &mut W,
        stdin: &mut R,
        empty_message: &str,
    ) -> Result<Value, EvalError> {
        if body.is_empty() {
            return Err(self.fatal(empty_message.to_string()));
        }
        self.exec_scope(thunk, body, stdout, stdin)
    }

    fn exec_def(&mut self, children: &[ExprRef]) -> Result<(), EvalError> {
        if children.len() < 3 {
            return Err(self.fatal("'def' requires a name and a body"));
        }
        let name = match &*children[1] {
            Expr::Id(sym) => *sym,
            _ => return Err(self.fatal("'def' name must be an identifier")),
        };
        let mut params = Vec::with_capacity(children.len() - 3);
        for child in &children[2..children.len() - 1] {
            match &**child {
                Expr::Id(sym) => params.push(*sym),
                _ => return Err(self.fatal("'def' parameters must be identifiers")),
            }
        }
        let body = children[children.len() - 1].clone();
        let display_name = self.symbols.resolve(name).to_string();
        self.functions
            .define(FunctionDef { name, params, body }, &display_name)
            .map_err(|e| self.fatal(e.to_string()))
    }

    fn exec_let(&mut self, thunk: &Rc<Thunk>, children: &[ExprRef]) -> Result<Value, EvalError> {
        if children.len() != 3 {
            return Err(self.fatal("'let' requires exactly a name and an expression"));
        }
        let name = match &*children[1] {
            Expr::Id(sym) => *sym,
            _ => return Err(self.fatal("'let' name must be an identifier")),
        };
        // Captured *before* the push, so the new binding can't see itself
        // and a sibling `let` made after this one doesn't retroactively
        // appear inside it.
        let captured = thunk.context.snapshot();
        let bound = Thunk::new(name, children[2].clone(), captured);
        thunk.context.push(bound);
        Ok(Value::Null)
    }

    fn exec_conditional<W: Write, R: BufRead>(
        &mut self,
        thunk: &Rc<Thunk>,
        children: &[ExprRef],
        stdout: &mut W,
        stdin: &mut R,
    ) -> Result<Value, EvalError> {
        if children.len() != 4 {
            return Err(self.fatal("'?' requires a condition, a then-branch and an else-branch"));
        }
        let cond_thunk = self.anon(children[1].clone(), thunk.context.clone());
        let cond = self.execute(&cond_thunk, stdout, stdin)?;
        let branch = if is_truthy(&cond) { &children[2] } else { &children[3] };
        let branch_thunk = self.anon(branch.clone(), thunk.context.clone());
        self.execute(&branch_thunk, stdout, stdin)
    }

    fn exec_match<W: Write, R: BufRead>(
        &mut self,
        thunk: &Rc<Thunk>,
        children: &[ExprRef],
        stdout: &mut W,
        stdin: &mut R,
    ) -> Result<Value, EvalError> {
        if children.len() < 2 {
            return Err(self.fatal("'match' requires a value to match against"));
        }
        let given_thunk = self.anon(children[1].clone(), thunk.context.clone());
        let given = self.execute(&given_thunk, stdout, stdin)?;

        let arms = &children[2..];
        if arms.len() % 3 != 0 {
            return Err(self.fatal("'match' arms must come in candidate : result triples"));
        }
        for arm in arms.chunks(3) {
            let colon = match &*arm[1] {
                Expr::Id(sym) => *sym,
                _ => return Err(self.fatal("expected ':' between a match candidate and its result")),
            };
            if colon != self.builtins.colon {
                return Err(self.fatal("expected ':' between a match candidate and its result"));
            }
            let candidate_thunk = self.anon(arm[0].clone(), thunk.context.clone());
            let candidate = self.execute(&candidate_thunk, stdout, stdin)?;
            if values_equal(&given, &candidate) {
                let result_thunk = self.anon(arm[2].clone(), thunk.context.clone());
                return self.execute(&result_thunk, stdout, stdin);
            }
        }
        Ok(Value::Null)
    }

    fn exec_print<W: Write, R: BufRead>(
        &mut self,
        thunk: &Rc<Thunk>,
        children: &[ExprRef],
        stdout: &mut W,
        stdin: &mut R,
    ) -> Result<Value, EvalError> {
        if children.len() != 2 {
            return Err(self.fatal("'print' takes exactly one argument"));
        }
        let arg_thunk = self.anon(children[1].clone(), thunk.context.clone());
        let value = self.execute(&arg_thunk, stdout, stdin)?;
        print_value(&value, stdout).map_err(|e| self.fatal(format!("write error: {e}")))?;
        Ok(Value::Null)
    }

    fn eval_number<W: Write, R: BufRead>(
        &mut self,
        thunk: &Rc<Thunk>,
        expr: &ExprRef,
        stdout: &mut W,
        stdin: &mut R,
    ) -> Result<i64, EvalError> {
        let arg_thunk = self.anon(expr.clone(), thunk.context.clone());
        match self.execute(&arg_thunk, stdout, stdin)? {
            Value::Number(n) => Ok(n),
            other => Err(self.fatal(format!("expected a number, found {}", describe_kind(&other)))),
        }
    }

    fn exec_arith<W: Write, R: BufRead>(
        &mut self,
        thunk: &Rc<Thunk>,
        op: Symbol,
        children: &[ExprRef],
        stdout: &mut W,
        stdin: &mut R,
    ) -> Result<Value, EvalError> {
        if children.len() != 3 {
            return Err(self.fatal("arithmetic operators take exactly two arguments"));
        }
        let lhs = self.eval_number(thunk, &children[1], stdout, stdin)?;
        let rhs = self.eval_number(thunk, &children[2], stdout, stdin)?;
        let b = self.builtins;
        let result = if op == b.plus {
            lhs.wrapping_add(rhs)
        } else if op == b.minus {
            lhs.wrapping_sub(rhs)
        } else if op == b.times {
            lhs.wrapping_mul(rhs)
        } else if op == b.divide {
            if rhs == 0 {
                return Err(self.fatal("division by zero"));
            }
            lhs.wrapping_div(rhs)
        } else if op == b.percent {
            if rhs == 0 {
                return Err(self.fatal("modulo by zero"));
            }
            lhs.wrapping_rem(rhs)
        } else {
            unreachable!("exec_arith dispatched on a non-arithmetic symbol")
        };
        Ok(Value::Number(result))
    }

    fn exec_equal<W: Write, R: BufRead>(
        &mut self,
        thunk: &Rc<Thunk>,
        children: &[ExprRef],
        stdout: &mut W,
        stdin: &mut R,
    ) -> Result<Value, EvalError> {
        if children.len() != 3 {
            return Err(self.fatal("'=' takes exactly two arguments"));
        }
        let lhs_thunk = self.anon(children[1].clone(), thunk.context.clone());
        let rhs_thunk = self.anon(children[2].clone(), thunk.context.clone());
        let lhs = self.execute(&lhs_thunk, stdout, stdin)?;
        let rhs = self.execute(&rhs_thunk, stdout, stdin)?;
        Ok(if values_equal(&lhs, &rhs) { Value::True } else { Value::False })
    }

    fn exec_call<W: Write, R: BufRead>(
        &mut self,
        thunk: &Rc<Thunk>,
        name: Symbol,
        children: &[ExprRef],
        stdout: &mut W,
        stdin: &mut R,
    ) -> Result<Value, EvalError> {
        let func = self.functions.get(name).ok_or_else(|| {
            let display = self.symbols.resolve(name).to_string();
            self.fatal(format!("undefined function '{display}'"))
        })?;
        let args = &children[1..];
        if args.len() != func.params.len() {
            let display = self.symbols.resolve(name).to_string();
            return Err(self.fatal(format!(
                "function '{display}' expects {} argument(s), got {}",
                func.params.len(),
                args.len()
            )));
        }
        let call_context = Context::new();
        for (param, arg_expr) in func.params.iter().zip(args.iter()) {
            let arg_thunk = Thunk::new(*param, arg_expr.clone(), thunk.context.clone());
            call_context.push(arg_thunk);
        }
        let body_thunk = self.anon(func.body.clone(), call_context);
        self.execute(&body_thunk, stdout, stdin)
    }

    fn exec_id<W: Write, R: BufRead>(
        &mut self,
        thunk: &Rc<Thunk>,
        name: Symbol,
        stdout: &mut W,
        stdin: &mut R,
    ) -> Result<Value, EvalError> {
        let target = thunk.context.find(name).ok_or_else(|| {
            let display = self.symbols.resolve(name).to_string();
            self.fatal(format!("undefined name '{display}'"))
        })?;
        self.execute(&target, stdout, stdin)
    }

    fn exec_primitive(&self, primitive: &Primitive) -> Value {
        match primitive {
            Primitive::Any => Value::Any,
            Primitive::True => Value::True,
            Primitive::False => Value::False,
            Primitive::Null => Value::Null,
            Primitive::Number(n) => Value::Number(*n),
            Primitive::Str(s) => Value::Str(s.clone()),
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
