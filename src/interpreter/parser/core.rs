use std::iter::Peekable;

use crate::{
    error::ParseError,
    instruction::{Instruction, Program},
    interpreter::{lexer::Token, parser::binary::parse_additive, registry::Registry},
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Maximum depth of nested parentheses, function calls and exponent chains.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Accumulates the instructions of a single parse.
///
/// An emitter lives only as long as one call to [`parse_program`]; nothing
/// it collects is visible to anybody else until the parse has succeeded and
/// the instructions are handed back as a [`Program`].
pub struct Emitter<'r> {
    instructions: Vec<Instruction>,
    registry:     &'r Registry,
    depth:        usize,
    end:          usize,
}

impl<'r> Emitter<'r> {
    /// Creates an empty emitter for a source text of `end` bytes.
    #[must_use]
    pub const fn new(registry: &'r Registry, end: usize) -> Self {
        Self { instructions: Vec::new(),
               registry,
               depth: 0,
               end }
    }

    /// Appends an instruction to the sequence.
    pub fn push(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    /// The registry whose function tables decide call arity.
    #[must_use]
    pub const fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Byte offset of the end of the source, used for end-of-input errors.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Enters one nesting level opened at `position`.
    ///
    /// # Errors
    /// Returns [`ParseError::NestingTooDeep`] once [`MAX_NESTING_DEPTH`] is
    /// exceeded.
    pub fn enter(&mut self, position: usize) -> ParseResult<()> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::NestingTooDeep { position,
                                                    limit: MAX_NESTING_DEPTH });
        }
        self.depth += 1;
        Ok(())
    }

    /// Leaves the innermost nesting level.
    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Finishes the parse and returns the collected sequence.
    #[must_use]
    pub fn finish(self) -> Program {
        Program::from(self.instructions)
    }
}

/// Parses a complete expression into a postfix [`Program`].
///
/// The whole input must form exactly one expression; blank input and
/// tokens left after a complete expression are errors.
///
/// # Parameters
/// - `tokens`: Tokens with their byte offsets, as produced by
///   [`tokenize`](crate::interpreter::lexer::tokenize).
/// - `registry`: Function tables used to check call arity.
/// - `end`: Length of the source text.
///
/// # Returns
/// The instruction sequence in emission order.
pub fn parse_program(tokens: &[(Token, usize)], registry: &Registry, end: usize) -> ParseResult<Program> {
    if tokens.is_empty() {
        return Err(ParseError::EmptyInput { position: end });
    }

    let mut iter = tokens.iter().peekable();
    let mut emitter = Emitter::new(registry, end);

    parse_expression(&mut iter, &mut emitter)?;

    if let Some((token, position)) = iter.next() {
        return Err(ParseError::UnexpectedTrailingTokens { lexeme:   token.to_string(),
                                                          position: *position, });
    }

    Ok(emitter.finish())
}

/// Parses a full expression.
///
/// This is the entry point of the recursive descent. It begins at the
/// lowest-precedence level, addition and subtraction.
///
/// Grammar: `expr := term (("+" | "-") term)*`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, position)` pairs.
/// - `emitter`: Receives the instructions of the expression.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>, emitter: &mut Emitter<'_>) -> ParseResult<()>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_additive(tokens, emitter)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::interpreter::lexer::tokenize;

    fn parse(source: &str) -> ParseResult<Vec<Instruction>> {
        let registry = Registry::standard();
        parse_program(&tokenize(source)?, &registry, source.len()).map(Program::into_instructions)
    }

    fn num(value: f64) -> Instruction {
        Instruction::Number(value)
    }

    fn ident(name: &str) -> Instruction {
        Instruction::Identifier(name.to_string())
    }

    fn func(name: &str) -> Instruction {
        Instruction::Function(name.to_string())
    }

    #[test]
    fn precedence_is_encoded_in_emission_order() {
        assert_eq!(parse("3+4*5").unwrap(),
                   vec![num(3.0), num(4.0), num(5.0), Instruction::Operator('*'), Instruction::Operator('+')]);
        assert_eq!(parse("3*4+5").unwrap(),
                   vec![num(3.0), num(4.0), Instruction::Operator('*'), num(5.0), Instruction::Operator('+')]);
    }

    #[test]
    fn subtraction_and_division_associate_left() {
        assert_eq!(parse("8-4-2").unwrap(),
                   vec![num(8.0), num(4.0), Instruction::Operator('-'), num(2.0), Instruction::Operator('-')]);
        assert_eq!(parse("8/4/2").unwrap(),
                   vec![num(8.0), num(4.0), Instruction::Operator('/'), num(2.0), Instruction::Operator('/')]);
    }

    #[test]
    fn exponent_associates_right() {
        assert_eq!(parse("2^3^2").unwrap(),
                   vec![num(2.0), num(3.0), num(2.0), Instruction::Operator('^'), Instruction::Operator('^')]);
    }

    #[test]
    fn unary_minus_follows_its_atom() {
        assert_eq!(parse("-5+3").unwrap(),
                   vec![num(5.0), Instruction::UnaryMinus, num(3.0), Instruction::Operator('+')]);
        assert_eq!(parse("-(5+3)").unwrap(),
                   vec![num(5.0), num(3.0), Instruction::Operator('+'), Instruction::UnaryMinus]);
        assert_eq!(parse("2*-x").unwrap(),
                   vec![num(2.0), ident("x"), Instruction::UnaryMinus, Instruction::Operator('*')]);
    }

    #[test]
    fn unary_minus_binds_tighter_than_exponent() {
        assert_eq!(parse("-2^2").unwrap(),
                   vec![num(2.0), Instruction::UnaryMinus, num(2.0), Instruction::Operator('^')]);
    }

    #[test]
    fn signed_literals_fold_the_sign() {
        assert_eq!(parse("+5").unwrap(), vec![num(5.0)]);
        assert_eq!(parse("--5").unwrap(), vec![num(-5.0), Instruction::UnaryMinus]);
        assert_eq!(parse("2*+3").unwrap(), vec![num(2.0), num(3.0), Instruction::Operator('*')]);
    }

    #[test]
    fn detached_plus_is_not_a_sign() {
        assert!(matches!(parse("+ 5"), Err(ParseError::UnexpectedToken { position: 0, .. })));
        assert!(matches!(parse("+x"), Err(ParseError::UnexpectedToken { position: 0, .. })));
    }

    #[test]
    fn calls_emit_arguments_before_the_function() {
        assert_eq!(parse("sin(2.3)").unwrap(), vec![num(2.3), func("sin")]);
        assert_eq!(parse("max(a, b*2)").unwrap(),
                   vec![ident("a"), ident("b"), num(2.0), Instruction::Operator('*'), func("max")]);
    }

    #[test]
    fn unknown_single_argument_calls_still_parse() {
        assert_eq!(parse("sinh(x)").unwrap(), vec![ident("x"), func("sinh")]);
    }

    #[test]
    fn argument_count_is_checked_against_the_registry() {
        assert_eq!(parse("sin(1, 2)").unwrap_err(),
                   ParseError::ArgumentCountMismatch { name:     "sin".to_string(),
                                                       expected: 1,
                                                       found:    2,
                                                       position: 0, });
        assert_eq!(parse("1 + max(3)").unwrap_err(),
                   ParseError::ArgumentCountMismatch { name:     "max".to_string(),
                                                       expected: 2,
                                                       found:    1,
                                                       position: 4, });
    }

    #[test]
    fn groupings_emit_no_marker() {
        assert_eq!(parse("((x))").unwrap(), vec![ident("x")]);
    }

    #[test]
    fn malformed_inputs() {
        assert_eq!(parse("2*(3+4").unwrap_err(), ParseError::ExpectedClosingParen { position: 2 });
        assert_eq!(parse("").unwrap_err(), ParseError::EmptyInput { position: 0 });
        assert_eq!(parse("   ").unwrap_err(), ParseError::EmptyInput { position: 3 });
        assert_eq!(parse("2+").unwrap_err(), ParseError::UnexpectedEndOfInput { position: 2 });
        assert_eq!(parse("(2))").unwrap_err(),
                   ParseError::UnexpectedTrailingTokens { lexeme:   ")".to_string(),
                                                          position: 3, });
        assert_eq!(parse("2 3").unwrap_err(),
                   ParseError::UnexpectedTrailingTokens { lexeme:   "3".to_string(),
                                                          position: 2, });
        assert_eq!(parse("*2").unwrap_err(),
                   ParseError::UnexpectedToken { lexeme:   "*".to_string(),
                                                 position: 0, });
    }

    #[test]
    fn nesting_is_bounded() {
        let deep = format!("{}1{}", "(".repeat(MAX_NESTING_DEPTH), ")".repeat(MAX_NESTING_DEPTH));
        assert_eq!(parse(&deep).unwrap(), vec![num(1.0)]);

        let too_deep = format!("({deep})");
        assert_eq!(parse(&too_deep).unwrap_err(),
                   ParseError::NestingTooDeep { position: MAX_NESTING_DEPTH,
                                                limit:    MAX_NESTING_DEPTH, });
    }
}
