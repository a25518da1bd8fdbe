use crate::{
    ast::UnaryOperator,
    interpreter::evaluator::core::{Context, EvalResult},
};

impl Context {
    /// Evaluates a unary operation on a value.
    ///
    /// # Example
    /// ```
    /// use fnplot::{ast::UnaryOperator, interpreter::evaluator::core::Context};
    ///
    /// let v = Context::new(0.0).eval_unary(UnaryOperator::Negate, 5.0).unwrap();
    /// assert_eq!(v, -5.0);
    /// ```
    pub fn eval_unary(&self, op: UnaryOperator, value: f64) -> EvalResult<f64> {
        match op {
            UnaryOperator::Negate => self.finite(-value, "-"),
        }
    }
}
