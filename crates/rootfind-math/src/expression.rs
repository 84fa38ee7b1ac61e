//! Scalar functions written as text.
//!
//! Rust closures passed to a solver have their arity fixed by the type
//! system. Functions that arrive as text (from a command line or a config
//! file) do not, so this module checks them once, when they are compiled:
//!
//! - text that does not parse, calls an unknown function or uses an
//!   undeclared name is rejected with [`MathError::NotCallable`]
//! - a function that does not take exactly one argument is rejected with
//!   [`MathError::ArityMismatch`]
//!
//! Evaluating a compiled [`UnaryFunction`] never fails; domain errors follow
//! IEEE 754 (`sqrt(-1)` is NaN).
//!
//! # Syntax
//!
//! ```text
//! x -> x^2 - 2          explicit parameter list
//! t -> exp(-t) - t      any identifier can be the parameter
//! x^3 + x + 1           parameters inferred from free identifiers
//! ```
//!
//! Operators are `+ - * / ^` (`**` is accepted for `^`). Powers are
//! right-associative and bind tighter than unary minus, so `-x^2` is
//! `-(x^2)`. Available functions: `sin cos tan asin acos atan sinh cosh tanh
//! exp ln log10 log2 sqrt abs`. Constants: `pi`, `e`.
//!
//! # Example
//!
//! ```rust
//! use rootfind_math::expression::compile;
//! use rootfind_math::solvers::{SecantSolver, SolverConfig};
//!
//! let f = compile("x -> x^2 - 2").unwrap();
//! let mut solver = SecantSolver::new(|x| f.eval(x), 1.0, 2.0).unwrap();
//! let root = solver.solve(&SolverConfig::new(1e-9, 100)).unwrap();
//! assert!((root - std::f64::consts::SQRT_2).abs() < 1e-8);
//! ```

use std::fmt;

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while},
    character::complete::{char, multispace0, satisfy},
    combinator::{all_consuming, cut, not, opt, peek, recognize, value, verify},
    error::ParseError,
    multi::{fold_many0, separated_list0},
    number::complete::double,
    sequence::{delimited, pair, preceded, terminated},
    IResult, Parser,
};

use crate::error::{MathError, MathResult};

/// Compiles text into a function of one variable.
pub fn compile(source: &str) -> MathResult<UnaryFunction> {
    Expression::parse(source)?.into_unary()
}

/// A parsed function of any number of parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    source: String,
    parameters: Vec<String>,
    body: Ast,
}

impl Expression {
    /// Parses `source`, resolving every identifier in the body.
    pub fn parse(source: &str) -> MathResult<Self> {
        let (declared, body) = parse_function(source)?;
        let parameters = match declared {
            Some(names) => {
                let mut parameters: Vec<String> = Vec::with_capacity(names.len());
                for name in names {
                    if parameters.iter().any(|p| p == name) {
                        return Err(MathError::not_callable(format!(
                            "duplicate parameter '{name}'"
                        )));
                    }
                    parameters.push(name.to_string());
                }
                if let Some(name) = body.free_names().find(|name| !parameters.contains(name)) {
                    return Err(MathError::not_callable(format!(
                        "unknown identifier '{name}'"
                    )));
                }
                parameters
            }
            None => {
                let mut inferred: Vec<String> = Vec::new();
                for name in body.free_names() {
                    if !inferred.contains(name) {
                        inferred.push(name.clone());
                    }
                }
                inferred
            }
        };

        Ok(Self {
            source: source.trim().to_string(),
            parameters,
            body,
        })
    }

    /// Parameter names in declaration order.
    #[must_use]
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    /// Number of parameters.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    /// Converts to a [`UnaryFunction`], failing unless the arity is one.
    pub fn into_unary(self) -> MathResult<UnaryFunction> {
        if self.arity() != 1 {
            return Err(MathError::arity_mismatch(self.arity()));
        }
        let variable = self.parameters[0].clone();
        let body = self.body.lower(&variable);
        Ok(UnaryFunction {
            source: self.source,
            variable,
            body,
        })
    }
}

/// A compiled function of one variable.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryFunction {
    source: String,
    variable: String,
    body: Node,
}

impl UnaryFunction {
    /// Evaluates the function at `x`.
    #[must_use]
    pub fn eval(&self, x: f64) -> f64 {
        self.body.eval(x)
    }

    /// Name of the variable.
    #[must_use]
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// The text this function was compiled from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for UnaryFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

// ============================================================================
// Syntax tree
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Sub => a - b,
            Self::Mul => a * b,
            Self::Div => a / b,
            Self::Pow => a.powf(b),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Builtin {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Exp,
    Ln,
    Log10,
    Log2,
    Sqrt,
    Abs,
}

impl Builtin {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "sin" => Self::Sin,
            "cos" => Self::Cos,
            "tan" => Self::Tan,
            "asin" => Self::Asin,
            "acos" => Self::Acos,
            "atan" => Self::Atan,
            "sinh" => Self::Sinh,
            "cosh" => Self::Cosh,
            "tanh" => Self::Tanh,
            "exp" => Self::Exp,
            "ln" => Self::Ln,
            "log10" => Self::Log10,
            "log2" => Self::Log2,
            "sqrt" => Self::Sqrt,
            "abs" => Self::Abs,
            _ => return None,
        })
    }

    fn apply(self, x: f64) -> f64 {
        match self {
            Self::Sin => x.sin(),
            Self::Cos => x.cos(),
            Self::Tan => x.tan(),
            Self::Asin => x.asin(),
            Self::Acos => x.acos(),
            Self::Atan => x.atan(),
            Self::Sinh => x.sinh(),
            Self::Cosh => x.cosh(),
            Self::Tanh => x.tanh(),
            Self::Exp => x.exp(),
            Self::Ln => x.ln(),
            Self::Log10 => x.log10(),
            Self::Log2 => x.log2(),
            Self::Sqrt => x.sqrt(),
            Self::Abs => x.abs(),
        }
    }
}

fn constant(name: &str) -> Option<f64> {
    match name {
        "pi" => Some(std::f64::consts::PI),
        "e" => Some(std::f64::consts::E),
        _ => None,
    }
}

/// Parsed body with identifiers still unresolved.
#[derive(Debug, Clone, PartialEq)]
enum Ast {
    Number(f64),
    Name(String),
    Neg(Box<Ast>),
    Binary(BinaryOp, Box<Ast>, Box<Ast>),
    Call(Builtin, Box<Ast>),
}

impl Ast {
    /// Names that are not constants, in order of appearance.
    fn free_names(&self) -> impl Iterator<Item = &String> {
        let mut names = Vec::new();
        self.collect_names(&mut names);
        names.into_iter()
    }

    fn collect_names<'a>(&'a self, out: &mut Vec<&'a String>) {
        match self {
            Self::Number(_) => {}
            Self::Name(name) => {
                if constant(name).is_none() {
                    out.push(name);
                }
            }
            Self::Neg(inner) | Self::Call(_, inner) => inner.collect_names(out),
            Self::Binary(_, lhs, rhs) => {
                lhs.collect_names(out);
                rhs.collect_names(out);
            }
        }
    }

    /// Resolves names against the single variable. A parameter named like
    /// a constant shadows the constant.
    fn lower(&self, variable: &str) -> Node {
        match self {
            Self::Number(value) => Node::Const(*value),
            Self::Name(name) if name == variable => Node::Var,
            // Names other than the variable were checked to be constants
            Self::Name(name) => Node::Const(constant(name).unwrap_or(f64::NAN)),
            Self::Neg(inner) => Node::Neg(Box::new(inner.lower(variable))),
            Self::Binary(op, lhs, rhs) => Node::Binary(
                *op,
                Box::new(lhs.lower(variable)),
                Box::new(rhs.lower(variable)),
            ),
            Self::Call(func, arg) => Node::Call(*func, Box::new(arg.lower(variable))),
        }
    }
}

/// Resolved body of a [`UnaryFunction`].
#[derive(Debug, Clone, PartialEq)]
enum Node {
    Const(f64),
    Var,
    Neg(Box<Node>),
    Binary(BinaryOp, Box<Node>, Box<Node>),
    Call(Builtin, Box<Node>),
}

impl Node {
    fn eval(&self, x: f64) -> f64 {
        match self {
            Self::Const(value) => *value,
            Self::Var => x,
            Self::Neg(inner) => -inner.eval(x),
            Self::Binary(op, lhs, rhs) => op.apply(lhs.eval(x), rhs.eval(x)),
            Self::Call(func, arg) => func.apply(arg.eval(x)),
        }
    }
}

// ============================================================================
// Grammar
// ============================================================================
//
//   function   := [parameters "->"] expression
//   parameters := "(" names ")" | names
//   expression := term (("+" | "-") term)*
//   term       := unary (("*" | "/") unary)*
//   unary      := ("-" | "+") unary | power
//   power      := primary [("^" | "**") unary]
//   primary    := number | name "(" expression ")" | name | "(" expression ")"

/// Deepest nesting of parentheses, signs and exponents accepted.
const MAX_DEPTH: usize = 64;

type ParseResult<'a, O> = IResult<&'a str, O, SyntaxError<'a>>;

#[derive(Debug, Clone, PartialEq)]
enum SyntaxError<'a> {
    /// Parsing stopped in front of this remaining input.
    Unexpected(&'a str),
    /// Input that is well formed but cannot be accepted.
    Rejected(String),
}

impl<'a> ParseError<&'a str> for SyntaxError<'a> {
    fn from_error_kind(input: &'a str, _kind: nom::error::ErrorKind) -> Self {
        Self::Unexpected(input)
    }

    fn append(_input: &'a str, _kind: nom::error::ErrorKind, other: Self) -> Self {
        other
    }

    fn or(self, other: Self) -> Self {
        // Report the alternative that got furthest
        match (&self, &other) {
            (Self::Unexpected(a), Self::Unexpected(b)) if a.len() < b.len() => self,
            _ => other,
        }
    }
}

impl SyntaxError<'_> {
    fn into_math_error(self, source: &str) -> MathError {
        match self {
            Self::Unexpected(rest) => {
                let rest = rest.trim_start();
                if rest.is_empty() {
                    MathError::not_callable("unexpected end of input")
                } else {
                    MathError::not_callable(format!(
                        "unexpected input at position {}",
                        source.len() - rest.len()
                    ))
                }
            }
            Self::Rejected(reason) => MathError::not_callable(reason),
        }
    }
}

fn reject<'a>(reason: impl Into<String>) -> nom::Err<SyntaxError<'a>> {
    nom::Err::Failure(SyntaxError::Rejected(reason.into()))
}

fn parse_function(source: &str) -> MathResult<(Option<Vec<&str>>, Ast)> {
    all_consuming(pair(opt(parameter_list), |i| expression(i, 0)))
        .parse(source)
        .map(|(_, parsed)| parsed)
        .map_err(|err| match err {
            nom::Err::Error(e) | nom::Err::Failure(e) => e.into_math_error(source),
            nom::Err::Incomplete(_) => MathError::not_callable("unexpected end of input"),
        })
}

fn ws<'a, P>(inner: P) -> impl Parser<&'a str, Output = P::Output, Error = SyntaxError<'a>>
where
    P: Parser<&'a str, Error = SyntaxError<'a>>,
{
    delimited(multispace0, inner, multispace0)
}

fn identifier(input: &str) -> ParseResult<'_, &str> {
    recognize(pair(
        satisfy(|c| c.is_alphabetic() || c == '_'),
        take_while(|c: char| c.is_alphanumeric() || c == '_'),
    ))
    .parse(input)
}

/// Unsigned literal; the sign is handled by `unary` so `-2^2` is `-(2^2)`.
fn number(input: &str) -> ParseResult<'_, f64> {
    ws(preceded(
        peek(satisfy(|c| c.is_ascii_digit() || c == '.')),
        double,
    ))
    .parse(input)
}

fn parameter_name(input: &str) -> ParseResult<'_, &str> {
    ws(verify(identifier, |name: &str| {
        Builtin::from_name(name).is_none()
    }))
    .parse(input)
}

fn parameter_list(input: &str) -> ParseResult<'_, Vec<&str>> {
    let names = || separated_list0(ws(char(',')), parameter_name);
    terminated(
        alt((delimited(ws(char('(')), names(), ws(char(')'))), names())),
        ws(tag("->")),
    )
    .parse(input)
}

fn additive(input: &str) -> ParseResult<'_, BinaryOp> {
    ws(alt((
        value(BinaryOp::Add, char('+')),
        value(BinaryOp::Sub, terminated(char('-'), not(char('>')))),
    )))
    .parse(input)
}

fn multiplicative(input: &str) -> ParseResult<'_, BinaryOp> {
    ws(alt((
        value(BinaryOp::Mul, terminated(char('*'), not(char('*')))),
        value(BinaryOp::Div, char('/')),
    )))
    .parse(input)
}

fn binary(lhs: Ast, (op, rhs): (BinaryOp, Ast)) -> Ast {
    Ast::Binary(op, Box::new(lhs), Box::new(rhs))
}

fn expression(input: &str, depth: usize) -> ParseResult<'_, Ast> {
    let (input, first) = term(input, depth)?;
    fold_many0(
        pair(additive, |i| term(i, depth)),
        move || first.clone(),
        binary,
    )
    .parse(input)
}

fn term(input: &str, depth: usize) -> ParseResult<'_, Ast> {
    let (input, first) = unary(input, depth)?;
    fold_many0(
        pair(multiplicative, |i| unary(i, depth)),
        move || first.clone(),
        binary,
    )
    .parse(input)
}

fn unary(input: &str, depth: usize) -> ParseResult<'_, Ast> {
    if depth > MAX_DEPTH {
        return Err(reject("expression nested too deeply"));
    }
    alt((
        preceded(ws(char('-')), |i| unary(i, depth + 1)).map(|inner| Ast::Neg(Box::new(inner))),
        preceded(ws(char('+')), |i| unary(i, depth + 1)),
        |i| power(i, depth),
    ))
    .parse(input)
}

fn power(input: &str, depth: usize) -> ParseResult<'_, Ast> {
    let (input, base) = primary(input, depth)?;
    // Right-associative; the exponent may carry its own sign
    let (input, exponent) = opt(preceded(
        ws(alt((tag("**"), tag("^")))),
        |i| unary(i, depth + 1),
    ))
    .parse(input)?;
    let ast = match exponent {
        Some(exponent) => Ast::Binary(BinaryOp::Pow, Box::new(base), Box::new(exponent)),
        None => base,
    };
    Ok((input, ast))
}

fn primary(input: &str, depth: usize) -> ParseResult<'_, Ast> {
    alt((
        number.map(Ast::Number),
        |i| call_or_name(i, depth),
        delimited(
            ws(char('(')),
            |i| expression(i, depth + 1),
            cut(ws(char(')'))),
        ),
    ))
    .parse(input)
}

fn call_or_name(input: &str, depth: usize) -> ParseResult<'_, Ast> {
    let (rest, name) = ws(identifier).parse(input)?;
    let (after_open, open) = opt(ws(char('('))).parse(rest)?;

    match (Builtin::from_name(name), open) {
        (Some(func), Some(_)) => {
            let (rest, arg) = terminated(|i| expression(i, depth + 1), cut(ws(char(')'))))
                .parse(after_open)?;
            Ok((rest, Ast::Call(func, Box::new(arg))))
        }
        (None, Some(_)) => Err(reject(format!("unknown function '{name}'"))),
        (Some(_), None) => Err(reject(format!(
            "function '{name}' used without arguments"
        ))),
        (None, None) => Ok((rest, Ast::Name(name.to_string()))),
    }
}
