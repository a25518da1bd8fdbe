use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr},
    error::ParseError,
    interpreter::{
        lexer::{Lexeme, Token},
        parser::{
            core::{ParseResult, bounded, peek},
            unary::parse_unary,
        },
    },
};

/// Parses addition and subtraction expressions.
///
/// Handles left-associative binary operators: `+` and `-`.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
///
/// # Parameters
/// - `tokens`: Lexeme stream.
/// - `depth`: Nesting already open around this expression.
///
/// # Returns
/// An `Expr::BinaryOp` tree representing the parsed expression.
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme>
{
    let mut left = parse_multiplicative(tokens, depth)?;
    loop {
        let lexeme = peek(tokens)?;
        if let Some(op) = token_to_binary_operator(&lexeme.token)
           && matches!(op, BinaryOperator::Add | BinaryOperator::Sub)
        {
            tokens.next();
            let right = parse_multiplicative(tokens, depth)?;
            left = bounded(Expr::BinaryOp { left: Box::new(left),
                                            op,
                                            right: Box::new(right) },
                           lexeme.position)?;
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses multiplication-level expressions.
///
/// Handles left-associative operators `*` and `/`. An operand that directly
/// follows another operand, as in `2x` or `x(x + 1)`, is rejected: implicit
/// multiplication is not part of the grammar.
///
/// The rule is: `multiplicative := power (("*" | "/") power)*`
///
/// # Errors
/// Returns [`ParseError::ImplicitMultiplication`] when a token that starts an
/// operand follows a complete operand.
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme>
{
    let mut left = parse_power(tokens, depth)?;
    loop {
        let lexeme = peek(tokens)?;
        if let Some(op) = token_to_binary_operator(&lexeme.token)
           && matches!(op, BinaryOperator::Mul | BinaryOperator::Div)
        {
            tokens.next();
            let right = parse_power(tokens, depth)?;
            left = bounded(Expr::BinaryOp { left: Box::new(left),
                                            op,
                                            right: Box::new(right) },
                           lexeme.position)?;
            continue;
        }
        if lexeme.token.starts_operand() {
            return Err(ParseError::ImplicitMultiplication { token:    lexeme.text.clone(),
                                                            position: lexeme.position, });
        }
        break;
    }
    Ok(left)
}

/// Parses exponentiation expressions.
///
/// Exponentiation is right-associative: `a ^ b ^ c` parses as
/// `a ^ (b ^ c)`. Both the base and the exponent are unary expressions, so
/// `-x^2` parses as `(-x)^2` and `2^-x` as `2^(-x)`.
///
/// The rule is: `power := unary ("^" power)?`
///
/// # Example
/// ```
/// use fnplot::{
///     ast::{BinaryOperator, Expr},
///     compile,
/// };
///
/// let expr = compile("2^3^2").unwrap();
/// let Expr::BinaryOp { op, right, .. } = expr else { panic!("expected a power") };
/// assert_eq!(op, BinaryOperator::Pow);
/// assert!(matches!(*right, Expr::BinaryOp { op: BinaryOperator::Pow, .. }));
/// ```
pub fn parse_power<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme>
{
    let base = parse_unary(tokens, depth)?;
    let lexeme = peek(tokens)?;
    if let Some(BinaryOperator::Pow) = token_to_binary_operator(&lexeme.token) {
        tokens.next();
        let exponent = parse_power(tokens, depth + 1)?;
        return bounded(Expr::BinaryOp { left:  Box::new(base),
                                        op:    BinaryOperator::Pow,
                                        right: Box::new(exponent), },
                       lexeme.position);
    }
    Ok(base)
}

/// Maps a token to its corresponding binary operator.
///
/// Returns `Some(BinaryOperator)` when the token represents `+`, `-`, `*`,
/// `/` or `^` (including its `**` spelling), otherwise `None`.
///
/// # Example
/// ```
/// use fnplot::{
///     ast::BinaryOperator,
///     interpreter::{lexer::Token, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::Plus),
///            Some(BinaryOperator::Add));
/// assert_eq!(token_to_binary_operator(&Token::LParen), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Caret => Some(BinaryOperator::Pow),
        _ => None,
    }
}
