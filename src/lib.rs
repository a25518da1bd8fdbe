//! # fnplot
//!
//! fnplot plots mathematical expressions in one variable `x`.
//! It tokenizes, parses and evaluates expressions through a closed grammar,
//! never executing the input, and renders the sampled curve as SVG or PDF.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use tracing::debug;

use crate::{
    ast::Expr,
    error::SyntaxError,
    interpreter::{lexer::tokenize, parser::core::parse},
};

/// Defines the structure of parsed expressions.
///
/// This module declares the `Expr` enum and related types that represent an
/// expression as a tree. The tree is built by the parser, walked by the
/// evaluator and printed back as text or LaTeX for plot labels.
///
/// # Responsibilities
/// - Defines the node, operator, function and constant types.
/// - Provides structural equality and hashing for whole trees.
/// - Renders trees in normalized text and LaTeX notation.
pub mod ast;
/// Provides unified error types for every phase.
///
/// This module defines all errors that can be raised while tokenizing,
/// parsing, evaluating, sampling or writing a plot. Each carries enough
/// detail, such as the source position or the value of `x`, for a precise
/// message.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator,
///   range, plot).
/// - Attaches positions and values for context.
/// - Supports integration with standard error handling traits and `?`.
pub mod error;
/// Implements the expression pipeline.
///
/// This module ties together lexing, parsing and evaluation. Each phase only
/// accepts the closed vocabulary of the grammar, so no input can reach
/// anything beyond arithmetic and the built-in functions.
///
/// # Responsibilities
/// - Coordinates the lexer, parser and evaluator.
/// - Provides entry points for parsing and evaluating user input.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// Samples expressions and renders them as documents.
///
/// # Responsibilities
/// - Evaluates a tree over a range, recording undefined points as gaps.
/// - Draws the curve with grid, axes, title and legend as SVG or PDF.
/// - Writes the result without overwriting existing files.
pub mod plot;
/// General utilities for safe numeric conversion.
///
/// This module provides conversion routines used by the sampler and the
/// renderer: sample indices to floating point, and plot coordinates to the
/// precision of SVG paths.
///
/// # Responsibilities
/// - Safely convert `usize` to `f64` without silent data loss.
/// - Keep canvas coordinates finite.
pub mod util;

/// Compiles an expression string into a tree.
///
/// This runs the tokenizer and the parser. The resulting tree can be
/// evaluated any number of times with [`Expr::evaluate`].
///
/// # Errors
/// Returns [`SyntaxError::Lex`] if the input contains a character, word or
/// number outside the grammar, and [`SyntaxError::Parse`] if the tokens do
/// not form exactly one expression.
///
/// # Examples
/// ```
/// use fnplot::compile;
///
/// let expr = compile("sin(x)^2 + cos(x)^2").unwrap();
/// assert!((expr.evaluate(0.7).unwrap() - 1.0).abs() < 1e-12);
///
/// let err = compile("2 $ x").unwrap_err();
/// assert_eq!(err.position(), 2);
/// ```
pub fn compile(source: &str) -> Result<Expr, SyntaxError> {
    let lexemes = tokenize(source)?;
    debug!(lexemes = lexemes.len(), "tokenized expression");
    let expr = parse(&lexemes)?;
    debug!(%expr, "compiled expression");
    Ok(expr)
}
