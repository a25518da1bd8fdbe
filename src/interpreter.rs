/// The evaluator module computes the value of an expression tree.
///
/// The evaluator walks the tree for a given value of `x` and produces a
/// finite `f64` or an error describing why the expression is undefined there.
/// It never mutates the tree and never looks anything up outside the closed
/// set of functions and constants the parser admits.
///
/// # Responsibilities
/// - Evaluates constants, the variable, unary and binary operations and
///   function calls.
/// - Reports division by zero, domain violations and non-finite results.
pub mod evaluator;
/// The lexer module tokenizes expression strings for further parsing.
///
/// The lexer (tokenizer) reads the raw source text and produces a sequence of
/// lexemes, each corresponding to a number, the variable, a function name, a
/// constant, an operator or a parenthesis. This is the first stage of the
/// pipeline.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with source text and
///   position.
/// - Rejects stray characters, unknown words and out-of-range numbers.
pub mod lexer;
/// The parser module builds the expression tree from lexemes.
///
/// The parser processes the lexemes produced by the lexer and constructs an
/// immutable tree using precedence climbing.
///
/// # Responsibilities
/// - Converts lexemes into `Expr` nodes honoring precedence and
///   associativity.
/// - Validates the grammar, reporting errors with their position.
/// - Rejects implicit multiplication and trailing input.
pub mod parser;
