use crate::{ast::Expr, error::EvalError};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or an
/// `EvalError` describing why the expression is undefined at this point.
pub type EvalResult<T> = Result<T, EvalError>;

/// Stores the binding of the variable for one evaluation.
///
/// A context is a plain value: evaluating never mutates it or the tree, so
/// any number of contexts can walk the same tree concurrently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Context {
    /// The value bound to `x`.
    pub x: f64,
}

impl Context {
    /// Creates a context that binds `x` to the given value.
    #[must_use]
    pub const fn new(x: f64) -> Self {
        Self { x }
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for evaluation. The evaluator walks the
    /// tree recursively, evaluating operands before applying the operator of
    /// each node. Every intermediate value is finite: the first operation
    /// that fails aborts the walk with its error.
    ///
    /// # Errors
    /// - [`EvalError::DivisionByZero`] for division by exactly zero.
    /// - [`EvalError::Domain`] for `log` of a non-positive value or a negative
    ///   base raised to a non-integer power.
    /// - [`EvalError::NonFinite`] when an operation yields NaN or an infinity.
    ///
    /// # Example
    /// ```
    /// use fnplot::{compile, interpreter::evaluator::core::Context};
    ///
    /// let expr = compile("x^2 + 1").unwrap();
    /// assert_eq!(Context::new(3.0).eval(&expr), Ok(10.0));
    /// ```
    pub fn eval(&self, expr: &Expr) -> EvalResult<f64> {
        match expr {
            Expr::Constant { value, .. } => Ok(value.0),
            Expr::Variable => self.finite(self.x, "x"),
            Expr::UnaryOp { op, expr } => {
                let value = self.eval(expr)?;
                self.eval_unary(*op, value)
            },
            Expr::BinaryOp { left, op, right } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                self.eval_binary(*op, left, right)
            },
            Expr::Call { function, argument } => {
                let value = self.eval(argument)?;
                self.eval_function(*function, value)
            },
        }
    }

    /// Passes `value` through if it is finite.
    ///
    /// # Errors
    /// Returns [`EvalError::NonFinite`] naming `operation` for NaN and
    /// infinities.
    pub fn finite(&self, value: f64, operation: &'static str) -> EvalResult<f64> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(EvalError::NonFinite { operation,
                                       at: self.x })
        }
    }
}

impl Expr {
    /// Evaluates the expression with `x` bound to the given value.
    ///
    /// Shorthand for `Context::new(x).eval(self)`.
    ///
    /// # Errors
    /// See [`Context::eval`].
    ///
    /// # Example
    /// ```
    /// use fnplot::{compile, error::EvalError};
    ///
    /// let expr = compile("1/x").unwrap();
    /// assert_eq!(expr.evaluate(4.0), Ok(0.25));
    /// assert_eq!(expr.evaluate(0.0), Err(EvalError::DivisionByZero { at: 0.0 }));
    /// ```
    pub fn evaluate(&self, x: f64) -> EvalResult<f64> {
        Context::new(x).eval(self)
    }
}
