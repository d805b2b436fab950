/// Unresolved-identifier policy.
pub mod config;
/// Structured diagnostics and the sinks that receive them.
///
/// Falling back to `0.0` for an unresolved identifier is reported here rather
/// than through the return value.
pub mod diagnostics;
/// The configured parser that ties lexing, parsing and evaluation together.
pub mod engine;
/// The evaluator runs postfix instruction sequences.
///
/// It consumes a [`Program`](crate::instruction::Program) from its tail,
/// resolves identifiers against the registry constants and the caller's
/// variables, and applies the registered operations.
///
/// # Responsibilities
/// - Reproduces the operand order of the source text for non-commutative
///   operators.
/// - Applies the unresolved-identifier policy.
/// - Rejects malformed hand-built sequences instead of panicking.
pub mod evaluator;
/// The lexer module tokenizes expression text for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens, each
/// paired with its byte offset. Numbers accept `e` and `d` exponents;
/// identifiers may contain digits, `_`, `.` and `'` after the first letter.
pub mod lexer;
/// The parser module turns tokens into a postfix instruction sequence.
///
/// A recursive-descent parser over the precedence levels `+ -`, `* /`, `^`
/// (right-associative) and atoms. Instructions are emitted as each rule
/// matches, so no tree is built.
pub mod parser;
/// The fixed tables of constants, functions and operators.
pub mod registry;
/// Caller-supplied variable tables.
pub mod variables;

pub use engine::ExpressionParser;
