use std::iter::Peekable;

use crate::{
    error::ParseError,
    instruction::Instruction,
    interpreter::{
        lexer::Token,
        parser::core::{Emitter, ParseResult, parse_expression},
    },
};

/// Parses an atom with an optional leading unary minus.
///
/// A single `-` may precede the atom. Its instruction is emitted after the
/// whole atom, so `-(a+b)` emits `a b + unary_minus`. Because the minus
/// belongs to the atom, it binds tighter than every binary operator,
/// including `^`: `-2^2` is `(-2)^2`.
///
/// Grammar:
/// ```text
///     atom := "-"? primary
/// ```
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
/// - `emitter`: Receives the postfix instructions.
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>, emitter: &mut Emitter<'_>) -> ParseResult<()>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Minus, _)) = tokens.peek() {
        tokens.next();
        parse_primary(tokens, emitter)?;
        emitter.push(Instruction::UnaryMinus);
        Ok(())
    } else {
        parse_primary(tokens, emitter)
    }
}

/// Parses a primary expression.
///
/// Grammar:
/// ```text
///     primary := number
///              | signed_number
///              | identifier "(" expr ("," expr)* ")"
///              | identifier
///              | "(" expr ")"
/// ```
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of a primary.
/// - `emitter`: Receives the postfix instructions.
///
/// # Errors
/// - `UnexpectedEndOfInput` if the tokens run out.
/// - `UnexpectedToken` for any token that cannot start a primary.
fn parse_primary<'a, I>(tokens: &mut Peekable<I>, emitter: &mut Emitter<'_>) -> ParseResult<()>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some(peeked) = tokens.peek() else {
        return Err(ParseError::UnexpectedEndOfInput { position: emitter.end() });
    };

    match peeked {
        (Token::Number(value), _) => {
            emitter.push(Instruction::Number(*value));
            tokens.next();
            Ok(())
        },
        (Token::Plus | Token::Minus, _) => parse_signed_number(tokens, emitter),
        (Token::Identifier(_), _) => parse_identifier_or_function(tokens, emitter),
        (Token::LParen, _) => parse_grouping(tokens, emitter),
        (token, position) => Err(ParseError::UnexpectedToken { lexeme:   token.to_string(),
                                                               position: *position, }),
    }
}

/// Parses a numeric literal written with its own sign.
///
/// The sign must touch the digits (`+5`, `-5`); a sign separated by
/// whitespace or followed by anything other than a number is rejected. The
/// sign is folded into the literal, so `--5` emits `-5` followed by a unary
/// minus.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at `+` or `-`.
/// - `emitter`: Receives the literal.
fn parse_signed_number<'a, I>(tokens: &mut Peekable<I>, emitter: &mut Emitter<'_>) -> ParseResult<()>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((sign, sign_position)) = tokens.next() else {
        return Err(ParseError::UnexpectedEndOfInput { position: emitter.end() });
    };

    match tokens.peek() {
        Some((Token::Number(value), position)) if *position == sign_position + 1 => {
            let value = if *sign == Token::Minus { -*value } else { *value };
            emitter.push(Instruction::Number(value));
            tokens.next();
            Ok(())
        },
        _ => Err(ParseError::UnexpectedToken { lexeme:   sign.to_string(),
                                               position: *sign_position, }),
    }
}

/// Parses a parenthesized expression.
///
/// Expected form `( expression )`. Only the inner expression is emitted.
/// Failure to find the closing parenthesis yields
/// `ParseError::ExpectedClosingParen` pointing at the opening one.
///
/// Grammar `grouping := "(" expr ")"`
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>, emitter: &mut Emitter<'_>) -> ParseResult<()>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((_, position)) = tokens.next() else {
        return Err(ParseError::UnexpectedEndOfInput { position: emitter.end() });
    };

    emitter.enter(*position)?;
    parse_expression(tokens, emitter)?;
    match tokens.next() {
        Some((Token::RParen, _)) => {
            emitter.leave();
            Ok(())
        },
        _ => Err(ParseError::ExpectedClosingParen { position: *position }),
    }
}

/// Parses either a plain identifier or a function call.
///
/// An identifier followed by `(` is a call: the arguments are emitted in
/// order and followed by [`Instruction::Function`]. Registered binary
/// functions (`max`, `min`) take exactly two comma-separated arguments; every
/// other name takes exactly one. Calls to names that are not registered at
/// all still parse and fail during evaluation.
///
/// # Returns
/// Nothing; emits [`Instruction::Identifier`] or the call sequence.
///
/// # Errors
/// Returns a `ParseError` if:
/// - an argument fails to parse,
/// - the closing `)` is missing,
/// - the argument count does not match the function.
fn parse_identifier_or_function<'a, I>(tokens: &mut Peekable<I>, emitter: &mut Emitter<'_>) -> ParseResult<()>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (name, position) = match tokens.next() {
        Some((Token::Identifier(n), position)) => (n, *position),
        Some((token, position)) => {
            return Err(ParseError::UnexpectedToken { lexeme:   token.to_string(),
                                                     position: *position, });
        },
        None => {
            return Err(ParseError::UnexpectedEndOfInput { position: emitter.end() });
        },
    };

    let Some((Token::LParen, paren)) = tokens.peek() else {
        emitter.push(Instruction::Identifier(name.clone()));
        return Ok(());
    };
    let paren = *paren;
    tokens.next();
    emitter.enter(paren)?;

    let mut found = 0;
    loop {
        parse_expression(tokens, emitter)?;
        found += 1;
        match tokens.next() {
            Some((Token::Comma, _)) => {},
            Some((Token::RParen, _)) => break,
            _ => return Err(ParseError::ExpectedClosingParen { position: paren }),
        }
    }
    emitter.leave();

    let expected = if emitter.registry().is_binary_function(name) { 2 } else { 1 };
    if found != expected {
        return Err(ParseError::ArgumentCountMismatch { name: name.clone(),
                                                       expected,
                                                       found,
                                                       position });
    }

    emitter.push(Instruction::Function(name.clone()));
    Ok(())
}
