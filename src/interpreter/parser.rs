/// Parser entry points and shared helpers.
///
/// Holds the `ParseResult` alias, the top-level [`core::parse`] function that
/// rejects trailing input, and the lookahead helpers used by the other
/// parser modules.
pub mod core;

/// Binary operator parsing.
///
/// Implements the precedence levels for addition/subtraction,
/// multiplication/division and exponentiation.
pub mod binary;

/// Unary and primary expression parsing.
///
/// Handles prefix signs, literals, the variable, constants, function calls
/// and parenthesized groups.
pub mod unary;
