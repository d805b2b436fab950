use std::iter::Peekable;

use crate::{
    instruction::Instruction,
    interpreter::{
        lexer::Token,
        parser::{
            core::{Emitter, ParseResult},
            unary::parse_unary,
        },
    },
};

/// Parses addition and subtraction expressions.
///
/// Handles the left-associative operators `+` and `-`. Each step emits the
/// right operand after the left one and then the operator.
///
/// The rule is: `expr := term (("+" | "-") term)*`
///
/// # Parameters
/// - `tokens`: Token stream with byte offsets.
/// - `emitter`: Receives the postfix instructions.
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>, emitter: &mut Emitter<'_>) -> ParseResult<()>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_multiplicative(tokens, emitter)?;
    loop {
        if let Some((token, _)) = tokens.peek()
           && let Some(symbol) = token_to_operator(token)
           && matches!(symbol, '+' | '-')
        {
            tokens.next();
            parse_multiplicative(tokens, emitter)?;
            emitter.push(Instruction::Operator(symbol));
            continue;
        }
        break;
    }
    Ok(())
}

/// Parses multiplication and division expressions.
///
/// Handles the left-associative operators `*` and `/`.
///
/// The rule is: `term := factor (("*" | "/") factor)*`
///
/// # Parameters
/// - `tokens`: Token stream with byte offsets.
/// - `emitter`: Receives the postfix instructions.
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>, emitter: &mut Emitter<'_>) -> ParseResult<()>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_exponent(tokens, emitter)?;
    loop {
        if let Some((token, _)) = tokens.peek()
           && let Some(symbol) = token_to_operator(token)
           && matches!(symbol, '*' | '/')
        {
            tokens.next();
            parse_exponent(tokens, emitter)?;
            emitter.push(Instruction::Operator(symbol));
            continue;
        }
        break;
    }
    Ok(())
}

/// Parses exponentiation expressions.
///
/// Exponentiation is right-associative: the exponent is parsed by recursing
/// into this same rule instead of looping, so `a ^ b ^ c` parses as
/// `a ^ (b ^ c)` and emits `a b c ^ ^`.
///
/// The rule is: `factor := atom ("^" factor)?`
///
/// # Parameters
/// - `tokens`: Token stream with byte offsets.
/// - `emitter`: Receives the postfix instructions.
pub fn parse_exponent<'a, I>(tokens: &mut Peekable<I>, emitter: &mut Emitter<'_>) -> ParseResult<()>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_unary(tokens, emitter)?;
    if let Some((Token::Caret, position)) = tokens.peek() {
        emitter.enter(*position)?;
        tokens.next();
        parse_exponent(tokens, emitter)?;
        emitter.leave();
        emitter.push(Instruction::Operator('^'));
    }
    Ok(())
}

/// Maps a token to the symbol of the binary operator it spells.
///
/// # Parameters
/// - `token`: Token to convert.
///
/// # Returns
/// `Some(symbol)` for `+ - * / ^`, otherwise `None`.
///
/// # Example
/// ```
/// use lattice_expr::interpreter::{lexer::Token, parser::binary::token_to_operator};
///
/// assert_eq!(token_to_operator(&Token::Caret), Some('^'));
/// assert_eq!(token_to_operator(&Token::LParen), None);
/// ```
#[must_use]
pub const fn token_to_operator(token: &Token) -> Option<char> {
    match token {
        Token::Plus => Some('+'),
        Token::Minus => Some('-'),
        Token::Star => Some('*'),
        Token::Slash => Some('/'),
        Token::Caret => Some('^'),
        _ => None,
    }
}
