use crate::{
    ast::BinaryOperator,
    error::EvalError,
    interpreter::evaluator::core::{Context, EvalResult},
};

impl Context {
    /// Evaluates a binary operation between two values.
    ///
    /// Addition, subtraction and multiplication only check that the result
    /// is finite. Division by exactly zero (either sign) is reported as
    /// [`EvalError::DivisionByZero`] rather than producing an infinity.
    /// Exponentiation delegates to [`Context::eval_pow`].
    ///
    /// # Example
    /// ```
    /// use fnplot::{
    ///     ast::BinaryOperator,
    ///     error::EvalError,
    ///     interpreter::evaluator::core::Context,
    /// };
    ///
    /// let context = Context::new(1.0);
    /// assert_eq!(context.eval_binary(BinaryOperator::Sub, 3.0, 4.0), Ok(-1.0));
    /// assert_eq!(context.eval_binary(BinaryOperator::Div, 3.0, -0.0),
    ///            Err(EvalError::DivisionByZero { at: 1.0 }));
    /// ```
    pub fn eval_binary(&self, op: BinaryOperator, left: f64, right: f64) -> EvalResult<f64> {
        match op {
            BinaryOperator::Add => self.finite(left + right, "+"),
            BinaryOperator::Sub => self.finite(left - right, "-"),
            BinaryOperator::Mul => self.finite(left * right, "*"),
            BinaryOperator::Div => {
                if right == 0.0 {
                    return Err(EvalError::DivisionByZero { at: self.x });
                }
                self.finite(left / right, "/")
            },
            BinaryOperator::Pow => self.eval_pow(left, right),
        }
    }

    /// Evaluates `base ^ exponent` over the reals.
    ///
    /// A negative base only admits integer exponents; anything else would
    /// need a complex result and is reported as a domain error. Zero raised
    /// to a negative power overflows to infinity and is reported as
    /// non-finite.
    ///
    /// # Errors
    /// - [`EvalError::Domain`] for a negative base with a fractional exponent.
    /// - [`EvalError::NonFinite`] if the power overflows.
    pub fn eval_pow(&self, base: f64, exponent: f64) -> EvalResult<f64> {
        if base < 0.0 && exponent.fract() != 0.0 {
            return Err(EvalError::Domain { details: format!("{base} ^ {exponent} has no real value"),
                                           at:      self.x, });
        }
        self.finite(base.powf(exponent), "^")
    }
}
