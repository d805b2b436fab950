use std::fmt;

use logos::Logos;

use crate::{
    error::ParseError,
    interpreter::parser::core::ParseResult,
    util::num::parse_real_literal,
};

/// Represents a lexical token in an expression.
///
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// Signs are never part of a numeric literal: `2-3` lexes as `2`, `-`, `3`,
/// and the grammar decides whether a `-` is binary or unary.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    /// Numeric literal tokens, such as `3`, `3.`, `3.14`, `.5`, `2.1e-10` or
    /// the double precision spelling `2.1d-10`.
    #[regex(r"[0-9]+(\.[0-9]*)?([eEdD][+-]?[0-9]+)?", parse_number)]
    #[regex(r"\.[0-9]+([eEdD][+-]?[0-9]+)?", parse_number)]
    Number(f64),
    /// Identifier tokens; element attributes, constants or function names such
    /// as `pi`, `quad1.k1` or `x'`.
    #[regex(r"[a-zA-Z][a-zA-Z0-9_.']*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `^`
    #[token("^")]
    Caret,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `,`
    #[token(",")]
    Comma,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Identifier(name) => f.write_str(name),
            Self::Plus => f.write_str("+"),
            Self::Minus => f.write_str("-"),
            Self::Star => f.write_str("*"),
            Self::Slash => f.write_str("/"),
            Self::Caret => f.write_str("^"),
            Self::LParen => f.write_str("("),
            Self::RParen => f.write_str(")"),
            Self::Comma => f.write_str(","),
        }
    }
}

/// Splits an expression into tokens paired with their byte offsets.
///
/// # Parameters
/// - `source`: The expression text.
///
/// # Returns
/// Every token of `source` in order, each with the byte offset where it
/// starts.
///
/// # Errors
/// Returns [`ParseError::UnexpectedCharacter`] for the first slice of input
/// that does not form a token.
///
/// # Example
/// ```
/// use lattice_expr::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("k1 * 2").unwrap();
/// assert_eq!(tokens,
///            vec![(Token::Identifier("k1".to_string()), 0),
///                 (Token::Star, 3),
///                 (Token::Number(2.0), 5)]);
/// ```
pub fn tokenize(source: &str) -> ParseResult<Vec<(Token, usize)>> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(token) = lexer.next() {
        let position = lexer.span().start;
        match token {
            Ok(tok) => tokens.push((tok, position)),
            Err(()) => {
                return Err(ParseError::UnexpectedCharacter { lexeme: lexer.slice().to_string(),
                                                             position });
            },
        }
    }

    Ok(tokens)
}

/// Parses a numeric literal from the current token slice.
///
/// # Returns
/// - `Some(f64)`: The parsed value.
/// - `None`: If the slice is not a valid number.
fn parse_number(lex: &logos::Lexer<Token>) -> Option<f64> {
    parse_real_literal(lex.slice())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source).unwrap().into_iter().map(|(tok, _)| tok).collect()
    }

    #[test]
    fn numbers_in_every_spelling() {
        assert_eq!(kinds("12 12. 12.5 .5 1e3 1.5E-2 2d2 2.D+1"),
                   vec![Token::Number(12.0),
                        Token::Number(12.0),
                        Token::Number(12.5),
                        Token::Number(0.5),
                        Token::Number(1000.0),
                        Token::Number(0.015),
                        Token::Number(200.0),
                        Token::Number(20.0)]);
    }

    #[test]
    fn signs_are_separate_tokens() {
        assert_eq!(kinds("2-3"),
                   vec![Token::Number(2.0), Token::Minus, Token::Number(3.0)]);
        assert_eq!(kinds("-1e-3"), vec![Token::Minus, Token::Number(0.001)]);
    }

    #[test]
    fn qualified_and_primed_identifiers() {
        assert_eq!(kinds("quad1.k1 x' b_0"),
                   vec![Token::Identifier("quad1.k1".to_string()),
                        Token::Identifier("x'".to_string()),
                        Token::Identifier("b_0".to_string())]);
    }

    #[test]
    fn identifiers_must_start_with_a_letter() {
        let err = tokenize("_a").unwrap_err();
        assert_eq!(err.position(), 0);
    }

    #[test]
    fn positions_are_byte_offsets() {
        let tokens = tokenize("  sin( x )").unwrap();
        let positions: Vec<usize> = tokens.iter().map(|(_, pos)| *pos).collect();
        assert_eq!(positions, vec![2, 5, 7, 9]);
    }

    #[test]
    fn unknown_character_is_reported_with_position() {
        let err = tokenize("2 % 3").unwrap_err();
        assert!(matches!(err,
                         ParseError::UnexpectedCharacter { ref lexeme, position: 2 }
                         if lexeme == "%"));
    }
}
