/// Core evaluation logic.
///
/// Contains the evaluation context, the tree walk that dispatches on node
/// kind, and the finiteness check applied after every primitive operation.
pub mod core;

/// Binary operator evaluation logic.
///
/// Implements the arithmetic operators, including the zero-division and
/// real-domain rules for `/` and `^`.
pub mod binary;

/// Unary operator evaluation logic.
pub mod unary;

/// Built-in function evaluation.
///
/// Applies `sin`, `cos`, `tan`, `exp` and `log`, enforcing the domain of the
/// logarithm.
pub mod function;
