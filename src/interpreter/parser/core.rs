use std::iter::Peekable;

use tracing::trace;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::{Lexeme, Token},
        parser::binary::parse_additive,
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Deepest tree the parser builds, counted in nodes from the root to a leaf.
///
/// Parsing, evaluation and printing all recurse once per level.
pub const MAX_DEPTH: usize = 256;

/// Parses a complete lexeme sequence into an expression tree.
///
/// The whole input must form exactly one expression: anything left before
/// the terminating [`Token::End`] is reported as trailing input.
///
/// # Errors
/// Returns a [`ParseError`] for malformed grammar, including
/// [`ParseError::UnexpectedTrailingInput`] when tokens remain after a
/// complete expression and [`ParseError::TooDeeplyNested`] when the tree
/// would be deeper than [`MAX_DEPTH`].
///
/// # Example
/// ```
/// use fnplot::{
///     error::ParseError,
///     interpreter::{lexer::tokenize, parser::core::parse},
/// };
///
/// let lexemes = tokenize("x + 1)").unwrap();
/// assert!(matches!(parse(&lexemes),
///                  Err(ParseError::UnexpectedTrailingInput { position: 5, .. })));
/// ```
pub fn parse(lexemes: &[Lexeme]) -> ParseResult<Expr> {
    let mut tokens = lexemes.iter().peekable();
    let expr = parse_expression(&mut tokens, 0)?;

    match tokens.next() {
        Some(Lexeme { token: Token::End,
                      .. })
        | None => {
            trace!(nodes = expr.node_count(), "parsed expression");
            Ok(expr)
        },
        Some(lexeme) => Err(ParseError::UnexpectedTrailingInput { token:    lexeme.text.clone(),
                                                                  position: lexeme.position, }),
    }
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing.
/// It begins at the lowest-precedence level, addition, and recursively
/// descends through the precedence hierarchy. `depth` counts the groups,
/// calls, signs and exponents already open around this expression.
///
/// Grammar: `expression := additive`
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme>
{
    parse_additive(tokens, depth)
}

/// Fails with [`ParseError::TooDeeplyNested`] once `depth` passes
/// [`MAX_DEPTH`].
///
/// Checked before descending, so the parser's own recursion stays bounded.
pub(in crate::interpreter::parser) fn enter(depth: usize, position: usize) -> ParseResult<()> {
    if depth >= MAX_DEPTH {
        return Err(ParseError::TooDeeplyNested { limit: MAX_DEPTH,
                                                 position });
    }
    Ok(())
}

/// Returns a freshly built node, or [`ParseError::TooDeeplyNested`] if it
/// made the tree deeper than [`MAX_DEPTH`].
///
/// Chains such as `x + x + ... + x` grow the tree without recursing in the
/// parser, so every built node is checked as well.
pub(in crate::interpreter::parser) fn bounded(expr: Expr, position: usize) -> ParseResult<Expr> {
    if expr.depth() > MAX_DEPTH {
        return Err(ParseError::TooDeeplyNested { limit: MAX_DEPTH,
                                                 position });
    }
    Ok(expr)
}

/// Returns the next lexeme without consuming it.
///
/// A well-formed sequence always ends with [`Token::End`], so running out of
/// lexemes is reported as an unexpected end of input.
pub(in crate::interpreter::parser) fn peek<'a, I>(tokens: &mut Peekable<I>)
                                                  -> ParseResult<&'a Lexeme>
    where I: Iterator<Item = &'a Lexeme>
{
    tokens.peek()
          .copied()
          .ok_or(ParseError::UnexpectedEndOfInput { position: 0 })
}

/// Consumes a closing parenthesis or fails with
/// [`ParseError::ExpectedClosingParen`] at the token found instead.
pub(in crate::interpreter::parser) fn expect_closing_paren<'a, I>(tokens: &mut Peekable<I>)
                                                                  -> ParseResult<()>
    where I: Iterator<Item = &'a Lexeme>
{
    let lexeme = peek(tokens)?;
    match lexeme.token {
        Token::RParen => {
            tokens.next();
            Ok(())
        },
        _ => Err(ParseError::ExpectedClosingParen { position: lexeme.position }),
    }
}
