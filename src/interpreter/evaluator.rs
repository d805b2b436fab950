/// The stack machine that runs postfix instruction sequences.
pub mod core;

/// Identifier resolution and the unresolved-identifier policy.
pub mod resolve;
