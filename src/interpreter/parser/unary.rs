use std::iter::Peekable;

use crate::{
    ast::{Expr, Function, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::{Lexeme, Token},
        parser::core::{ParseResult, bounded, enter, expect_closing_paren, parse_expression, peek},
    },
};

/// Parses a unary expression.
///
/// Supports prefix operators:
/// - `-`  (numeric negation)
/// - `+`  (accepted and dropped; it does not change the value)
///
/// Unary operators are right-associative, so `--x` is parsed as `-(-x)`.
/// They bind tighter than every binary operator, including `^`.
///
/// Every path through the grammar that nests one level deeper passes through
/// here, so this is where `depth` is checked against the limit.
///
/// Grammar:
/// ```text
///     unary := ("-" | "+") unary
///            | primary
/// ```
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme>
{
    let lexeme = peek(tokens)?;
    enter(depth, lexeme.position)?;

    match lexeme.token {
        Token::Minus => {
            tokens.next();
            let expr = parse_unary(tokens, depth + 1)?;
            bounded(Expr::UnaryOp { op:   UnaryOperator::Negate,
                                    expr: Box::new(expr), },
                    lexeme.position)
        },
        Token::Plus => {
            tokens.next();
            parse_unary(tokens, depth + 1)
        },
        _ => parse_primary(tokens, depth),
    }
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar and include:
/// - numeric literals
/// - the variable `x`
/// - the named constants `pi` and `e`, resolved to their values here
/// - function calls
/// - parenthesized expressions
///
/// Grammar:
/// ```text
///     primary := NUMBER
///              | "x"
///              | CONSTANT
///              | FUNCTION "(" expression ")"
///              | "(" expression ")"
/// ```
///
/// # Errors
/// - `UnexpectedEndOfInput` if the input stops where an operand is needed.
/// - `UnexpectedToken` for an operator or `)` in operand position.
/// - Errors from function call and group parsing.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme>
{
    let lexeme = peek(tokens)?;

    match &lexeme.token {
        Token::Number(value) => {
            tokens.next();
            Ok(Expr::number(*value))
        },
        Token::Variable => {
            tokens.next();
            Ok(Expr::Variable)
        },
        Token::Constant(constant) => {
            tokens.next();
            Ok(Expr::named(*constant))
        },
        Token::Function(function) => {
            tokens.next();
            parse_function_call(tokens, *function, depth)
        },
        Token::LParen => {
            tokens.next();
            parse_grouping(tokens, depth)
        },
        Token::End => Err(ParseError::UnexpectedEndOfInput { position: lexeme.position }),
        _ => Err(ParseError::UnexpectedToken { token:    lexeme.describe(),
                                               position: lexeme.position, }),
    }
}

/// Parses the parenthesized argument of a function call.
///
/// The function name has already been consumed. Exactly one argument is
/// accepted and the parentheses are mandatory.
///
/// Grammar: `call := FUNCTION "(" expression ")"`
///
/// # Errors
/// - `ExpectedOpenParen` if the name is not followed by `(`.
/// - `ExpectedClosingParen` if the argument is not followed by `)`.
fn parse_function_call<'a, I>(tokens: &mut Peekable<I>,
                               function: Function,
                               depth: usize)
                               -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme>
{
    let lexeme = peek(tokens)?;
    if lexeme.token != Token::LParen {
        return Err(ParseError::ExpectedOpenParen { function: function.name().to_string(),
                                                   position: lexeme.position, });
    }
    tokens.next();

    let argument = parse_expression(tokens, depth + 1)?;
    expect_closing_paren(tokens)?;

    bounded(Expr::Call { function,
                         argument: Box::new(argument) },
            lexeme.position)
}

/// Parses a parenthesized expression after its opening `(`.
///
/// Grammar: `group := "(" expression ")"`
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme>
{
    let expr = parse_expression(tokens, depth + 1)?;
    expect_closing_paren(tokens)?;
    Ok(expr)
}
