/// Represents all errors that can occur during lexing or parsing.
///
/// Every variant carries the byte offset into the source text where the
/// problem was detected, available through [`ParseError::position`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The input contained no tokens at all.
    #[error("Error at position {position}: Empty expression.")]
    EmptyInput {
        /// Length of the (blank) input.
        position: usize,
    },
    /// A character sequence that does not form any token.
    #[error("Error at position {position}: Unexpected character '{lexeme}'.")]
    UnexpectedCharacter {
        /// The offending text.
        lexeme:   String,
        /// Byte offset of the offending text.
        position: usize,
    },
    /// Found a token that cannot start or continue the expression.
    #[error("Error at position {position}: Unexpected token '{lexeme}'.")]
    UnexpectedToken {
        /// The token encountered.
        lexeme:   String,
        /// Byte offset of the token.
        position: usize,
    },
    /// Reached the end of input while an operand was still expected.
    #[error("Error at position {position}: Unexpected end of input.")]
    UnexpectedEndOfInput {
        /// Byte offset of the end of input.
        position: usize,
    },
    /// A `(` was never closed.
    #[error("Error at position {position}: Expected closing parenthesis ')' for the '(' opened here.")]
    ExpectedClosingParen {
        /// Byte offset of the unmatched opening parenthesis.
        position: usize,
    },
    /// Found extra tokens after a complete expression.
    #[error("Error at position {position}: Extra tokens after expression, starting at '{lexeme}'.")]
    UnexpectedTrailingTokens {
        /// The first extra token.
        lexeme:   String,
        /// Byte offset of the first extra token.
        position: usize,
    },
    /// A function was called with the wrong number of arguments.
    #[error("Error at position {position}: Function '{name}' takes {expected} argument(s), found {found}.")]
    ArgumentCountMismatch {
        /// The function name.
        name:     String,
        /// The number of arguments the function accepts.
        expected: usize,
        /// The number of arguments written.
        found:    usize,
        /// Byte offset of the function name.
        position: usize,
    },
    /// Parentheses or calls were nested deeper than the parser allows.
    #[error("Error at position {position}: Expression nested deeper than {limit} levels.")]
    NestingTooDeep {
        /// Byte offset of the opening that crossed the limit.
        position: usize,
        /// The maximum nesting depth.
        limit:    usize,
    },
}

impl ParseError {
    /// Byte offset into the source text where the error was detected.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::EmptyInput { position }
            | Self::UnexpectedCharacter { position, .. }
            | Self::UnexpectedToken { position, .. }
            | Self::UnexpectedEndOfInput { position }
            | Self::ExpectedClosingParen { position }
            | Self::UnexpectedTrailingTokens { position, .. }
            | Self::ArgumentCountMismatch { position, .. }
            | Self::NestingTooDeep { position, .. } => *position,
        }
    }
}
