use crate::{
    error::EvalError,
    instruction::{Instruction, Program},
    interpreter::{
        evaluator::resolve::Resolver,
        registry::{BinaryFn, UnaryFn},
        variables::VariableLookup,
    },
};

/// Result type used by the evaluator.
pub type EvalResult<T> = Result<T, EvalError>;

/// An operation waiting for the value of its next operand.
enum Frame {
    /// Negate the operand.
    Negate,
    /// Apply a one-argument function to the operand.
    Apply(UnaryFn),
    /// The operand is the right-hand side of a binary operation.
    Right(BinaryFn),
    /// The right-hand side is known; the operand is the left-hand side.
    Left(BinaryFn, f64),
}

/// Evaluates a postfix program.
///
/// The sequence is consumed as a stack: the instruction at the tail is taken
/// first, and every operation takes its operands from the instructions before
/// it. For a binary operation the operand nearer the tail is evaluated first
/// and becomes the **right** operand, so `a b -` computes `a - b`.
///
/// Pending operations are kept on an explicit frame stack instead of the
/// native call stack, so the depth of an expression is limited only by
/// memory. The order in which instructions are visited, and therefore the
/// order in which identifiers are resolved, is the same as recursive
/// tail-popping evaluation.
///
/// The program itself is only read through a cursor and can be evaluated
/// again afterwards.
///
/// # Parameters
/// - `program`: The instruction sequence.
/// - `resolver`: Resolves identifiers and supplies the operation tables.
///
/// # Returns
/// The value of the expression.
///
/// # Errors
/// - `UndefinedVariable` from the resolver under the strict policy.
/// - `UnknownOperator` / `UnknownFunction` for symbols outside the registry.
/// - `MissingOperand` if the sequence runs out before an operation is
///   complete.
/// - `UnconsumedInstructions` if instructions remain after the result.
pub fn run<V>(program: &Program, resolver: &Resolver<'_, V>) -> EvalResult<f64>
    where V: VariableLookup + ?Sized
{
    let instructions = program.instructions();
    let registry = resolver.registry();
    let mut cursor = instructions.len();
    let mut frames: Vec<Frame> = Vec::new();

    loop {
        if cursor == 0 {
            return Err(EvalError::MissingOperand);
        }
        cursor -= 1;

        let mut value = match &instructions[cursor] {
            Instruction::Number(value) => *value,
            Instruction::Identifier(name) => resolver.resolve(name)?,
            Instruction::UnaryMinus => {
                frames.push(Frame::Negate);
                continue;
            },
            Instruction::Operator(symbol) => {
                let op = registry.operator(*symbol)
                                 .ok_or(EvalError::UnknownOperator { symbol: *symbol })?;
                frames.push(Frame::Right(op));
                continue;
            },
            Instruction::Function(name) => {
                if let Some(function) = registry.unary_function(name) {
                    frames.push(Frame::Apply(function));
                } else if let Some(function) = registry.binary_function(name) {
                    frames.push(Frame::Right(function));
                } else {
                    return Err(EvalError::UnknownFunction { name: name.clone() });
                }
                continue;
            },
        };

        loop {
            match frames.pop() {
                None => {
                    if cursor > 0 {
                        return Err(EvalError::UnconsumedInstructions { remaining: cursor });
                    }
                    return Ok(value);
                },
                Some(Frame::Negate) => value = -value,
                Some(Frame::Apply(function)) => value = function(value),
                Some(Frame::Right(op)) => {
                    frames.push(Frame::Left(op, value));
                    break;
                },
                Some(Frame::Left(op, right)) => value = op(value, right),
            }
        }
    }
}
