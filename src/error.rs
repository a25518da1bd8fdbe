/// Lexical errors.
///
/// Raised by the tokenizer when the input contains a character, word or
/// numeric literal outside the expression grammar.
pub mod lex_error;
/// Parsing errors.
///
/// Defines all error types that can occur while building an expression tree
/// from tokens: missing parentheses, misplaced operators, implicit
/// multiplication, excessive nesting and trailing input.
pub mod parse_error;
/// Evaluation errors.
///
/// Raised when an expression is undefined at a particular value of `x`:
/// division by zero, domain violations and non-finite intermediate results.
pub mod eval_error;
/// Sampling range and configuration errors.
pub mod range_error;
/// Top-level plotting errors.
///
/// Wraps every other error family together with rendering and I/O failures so
/// a plot request can propagate any of them with `?`.
pub mod plot_error;

pub use eval_error::EvalError;
pub use lex_error::LexError;
pub use parse_error::ParseError;
pub use plot_error::{PlotError, SyntaxError};
pub use range_error::RangeError;
