//! # lattice-expr
//!
//! lattice-expr is the expression engine used to read accelerator lattice
//! description files. Attribute values in those files are arithmetic
//! expressions such as `k1 := 2*pi*b0/length`; this crate parses them into a
//! postfix instruction sequence and evaluates that sequence against the
//! element attributes supplied by the caller.
//!
//! ```
//! use std::collections::HashMap;
//!
//! let program = lattice_expr::parse("2*pi*b0/length").unwrap();
//! let element = HashMap::from([("b0", 1.5), ("length", 3.0)]);
//! let k1 = lattice_expr::evaluate(&program, &element).unwrap();
//!
//! assert!((k1 - std::f64::consts::PI).abs() < 1e-12);
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::sync::LazyLock;

use crate::{
    error::{Error, EvalError, ParseError},
    instruction::Program,
    interpreter::{ExpressionParser, variables::VariableLookup},
};

/// Provides unified error types for parsing and evaluation.
///
/// This module defines every error that can be raised while lexing, parsing
/// or evaluating an expression. Parse errors carry the byte offset of the
/// problem; evaluation errors name the offending identifier or symbol.
///
/// # Responsibilities
/// - Separates parse failures from evaluation failures.
/// - Attaches source positions and names for context.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Defines the postfix instruction model.
///
/// This module declares the `Instruction` enum and the `Program` sequence
/// that the parser produces and the evaluator consumes. The sequence is the
/// only thing passed between the two phases.
pub mod instruction;
/// Orchestrates lexing, parsing and evaluation.
///
/// This module ties together the lexer, the recursive-descent parser, the
/// registry of constants and functions, the evaluator and the diagnostics
/// side channel, and exposes [`ExpressionParser`] as the configured entry
/// point.
///
/// # Responsibilities
/// - Coordinates all core components.
/// - Provides entry points for parsing and evaluating expressions.
/// - Applies the unresolved-identifier policy.
pub mod interpreter;
/// General numeric helpers.
///
/// Parsing of real literals with legacy exponent markers and formatting of
/// results for display.
pub mod util;

static DEFAULT_PARSER: LazyLock<ExpressionParser> = LazyLock::new(ExpressionParser::new);

/// Parses an expression with the standard registry.
///
/// # Examples
/// ```
/// use lattice_expr::instruction::Instruction;
///
/// let program = lattice_expr::parse("sin(2.3)").unwrap();
/// assert_eq!(program.instructions(),
///            &[Instruction::Number(2.3), Instruction::Function("sin".to_string())]);
///
/// assert!(lattice_expr::parse("2*(3+4").is_err());
/// ```
pub fn parse(text: &str) -> Result<Program, ParseError> {
    DEFAULT_PARSER.parse(text)
}

/// Evaluates a program with the standard registry and the default policy:
/// unresolved identifiers become `0.0` and are reported through `tracing`.
///
/// # Examples
/// ```
/// let program = lattice_expr::parse("a-b").unwrap();
/// assert_eq!(lattice_expr::evaluate(&program, &[("a", 5.0), ("b", 2.0)]), Ok(3.0));
/// ```
pub fn evaluate<V>(program: &Program, variables: &V) -> Result<f64, EvalError>
    where V: VariableLookup + ?Sized
{
    DEFAULT_PARSER.evaluate(program, variables)
}

/// Parses and evaluates an expression with the standard registry and the
/// default policy.
///
/// # Examples
/// ```
/// use lattice_expr::interpreter::variables::NoVariables;
///
/// assert_eq!(lattice_expr::eval("3+4*5", &NoVariables), Ok(23.0));
/// assert_eq!(lattice_expr::eval("2^3^2", &NoVariables), Ok(512.0));
/// assert!(lattice_expr::eval("2*(3+4", &NoVariables).is_err());
/// ```
pub fn eval<V>(text: &str, variables: &V) -> Result<f64, Error>
    where V: VariableLookup + ?Sized
{
    DEFAULT_PARSER.evaluate_str(text, variables)
}
