/// Parser entry point, the call-local instruction emitter and the shared
/// result type.
pub mod core;

/// Binary operator rules.
///
/// Implements the additive, multiplicative and exponent levels of the
/// precedence hierarchy.
pub mod binary;

/// Atoms.
///
/// Handles unary minus, numeric literals, identifiers, function calls and
/// parenthesized groupings.
pub mod unary;
