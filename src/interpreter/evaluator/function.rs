use crate::{
    ast::Function,
    error::EvalError,
    interpreter::evaluator::core::{Context, EvalResult},
};

impl Context {
    /// Applies a built-in function to an evaluated argument.
    ///
    /// Trigonometric functions take radians. `log` is the natural logarithm
    /// and is only defined for strictly positive arguments.
    ///
    /// # Errors
    /// - [`EvalError::Domain`] for `log` of zero or a negative value.
    /// - [`EvalError::NonFinite`] when the result overflows, e.g. `exp(1000)`.
    ///
    /// # Example
    /// ```
    /// use fnplot::{ast::Function, interpreter::evaluator::core::Context};
    ///
    /// let context = Context::new(0.0);
    /// assert_eq!(context.eval_function(Function::Exp, 0.0), Ok(1.0));
    /// assert!(context.eval_function(Function::Log, -1.0).is_err());
    /// ```
    pub fn eval_function(&self, function: Function, value: f64) -> EvalResult<f64> {
        let result = match function {
            Function::Sin => value.sin(),
            Function::Cos => value.cos(),
            Function::Tan => value.tan(),
            Function::Exp => value.exp(),
            Function::Log => {
                if value <= 0.0 {
                    return Err(EvalError::Domain { details: format!("log({value}) is undefined"),
                                                   at:      self.x, });
                }
                value.ln()
            },
        };
        self.finite(result, function.name())
    }
}
