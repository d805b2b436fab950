/// Parsing errors.
///
/// Defines all error types that can occur while lexing and parsing an
/// expression: unknown characters, unexpected tokens, unbalanced parentheses,
/// trailing input and wrong argument counts.
pub mod parse_error;
/// Evaluation errors.
///
/// Contains all error types that can be raised while running an instruction
/// sequence: unresolved identifiers under the strict policy and the defensive
/// errors for sequences that were not produced by the parser.
pub mod eval_error;

pub use eval_error::EvalError;
pub use parse_error::ParseError;

/// Any failure of the parse-then-evaluate pipeline.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The expression text could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The parsed expression could not be evaluated.
    #[error(transparent)]
    Eval(#[from] EvalError),
}
