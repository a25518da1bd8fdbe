#[derive(Debug, Clone, PartialEq)]
/// Represents all errors that can occur while evaluating an expression at a
/// single value of `x`.
///
/// These errors are local to one sample point: the sampler turns them into
/// gaps in the plotted curve instead of aborting the plot.
pub enum EvalError {
    /// Attempted division by exactly zero.
    DivisionByZero {
        /// The value of `x` being evaluated.
        at: f64,
    },
    /// An operation was applied outside its real domain.
    Domain {
        /// Details about the violated domain, such as `log(-1)`.
        details: String,
        /// The value of `x` being evaluated.
        at:      f64,
    },
    /// An operation produced NaN or an infinity.
    NonFinite {
        /// The operation that produced the value.
        operation: &'static str,
        /// The value of `x` being evaluated.
        at:        f64,
    },
}

impl EvalError {
    /// Returns the value of `x` at which evaluation failed.
    #[must_use]
    pub const fn at(&self) -> f64 {
        match self {
            Self::DivisionByZero { at } | Self::Domain { at, .. } | Self::NonFinite { at, .. } => {
                *at
            },
        }
    }
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DivisionByZero { at } => write!(f, "division by zero at x = {at}"),
            Self::Domain { details, at } => write!(f, "domain error: {details} at x = {at}"),
            Self::NonFinite { operation, at } => {
                write!(f, "non-finite result from '{operation}' at x = {at}")
            },
        }
    }
}

impl std::error::Error for EvalError {}
