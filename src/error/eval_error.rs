/// Represents all errors that can occur while evaluating an instruction
/// sequence.
///
/// Only [`EvalError::UndefinedVariable`] can arise from a sequence produced by
/// the parser. The remaining variants guard against hand-built or corrupted
/// sequences so that evaluation fails instead of panicking.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    /// An identifier matched neither a constant nor a variable and the parser
    /// was configured to raise on unresolved identifiers.
    #[error("Undefined variable '{name}'.")]
    UndefinedVariable {
        /// The unresolved identifier.
        name: String,
    },
    /// An operator instruction names a symbol with no registered operation.
    #[error("Unknown operator '{symbol}'.")]
    UnknownOperator {
        /// The operator symbol.
        symbol: char,
    },
    /// A function instruction names a function that is not registered.
    #[error("Unknown function '{name}'.")]
    UnknownFunction {
        /// The function name.
        name: String,
    },
    /// The sequence ran out while an operation still needed an operand.
    #[error("Instruction sequence ended while an operand was expected.")]
    MissingOperand,
    /// A complete result was produced but instructions were left over.
    #[error("Instruction sequence has {remaining} instruction(s) left after the result.")]
    UnconsumedInstructions {
        /// Number of instructions never reached.
        remaining: usize,
    },
}
