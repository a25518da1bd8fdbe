use rayon::prelude::*;
use tracing::{debug, warn};

use crate::{
    ast::Expr,
    error::{EvalError, PlotError, RangeError},
    plot::config::{MAX_SAMPLES, MIN_SAMPLES},
    util::num::usize_to_f64_checked,
};

/// A validated closed interval `[min, max]` of `x` values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleRange {
    min: f64,
    max: f64,
}

impl SampleRange {
    /// Creates a range after checking its bounds.
    ///
    /// # Errors
    /// - [`RangeError::NonFiniteBound`] if either bound is NaN or infinite.
    /// - [`RangeError::EmptyRange`] if `min >= max`.
    ///
    /// # Example
    /// ```
    /// use fnplot::{error::RangeError, plot::sampler::SampleRange};
    ///
    /// assert!(SampleRange::new(-1.0, 1.0).is_ok());
    /// assert_eq!(SampleRange::new(2.0, 2.0),
    ///            Err(RangeError::EmptyRange { min: 2.0, max: 2.0 }));
    /// ```
    pub fn new(min: f64, max: f64) -> Result<Self, RangeError> {
        if !min.is_finite() {
            return Err(RangeError::NonFiniteBound { bound: "min",
                                                    value: min, });
        }
        if !max.is_finite() {
            return Err(RangeError::NonFiniteBound { bound: "max",
                                                    value: max, });
        }
        if min >= max {
            return Err(RangeError::EmptyRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Reads a bound typed by the user.
    ///
    /// Surrounding whitespace is ignored. Returns `None` unless the text is a
    /// finite number, so `inf` and `NaN` are refused like any other
    /// non-number.
    ///
    /// # Example
    /// ```
    /// use fnplot::plot::sampler::SampleRange;
    ///
    /// assert_eq!(SampleRange::parse_bound(" -2.5 "), Some(-2.5));
    /// assert_eq!(SampleRange::parse_bound("inf"), None);
    /// assert_eq!(SampleRange::parse_bound("ten"), None);
    /// ```
    #[must_use]
    pub fn parse_bound(text: &str) -> Option<f64> {
        text.trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
    }

    /// The lower bound.
    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// The upper bound.
    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Interpolates between the bounds; `t = 0` gives `min`, `t = 1` gives
    /// `max`.
    ///
    /// Written as a weighted sum so ranges spanning most of the `f64` domain
    /// do not overflow.
    #[must_use]
    pub fn lerp(&self, t: f64) -> f64 {
        self.min.mul_add(1.0 - t, self.max * t)
    }
}

/// The outcome of evaluating the expression at one grid point.
#[derive(Debug, Clone, PartialEq)]
pub enum Sample {
    /// The expression is defined here.
    Point {
        /// The grid value of `x`.
        x: f64,
        /// The finite value of the expression.
        y: f64,
    },
    /// The expression is undefined here; the curve is broken at this point.
    Gap {
        /// The grid value of `x`.
        x:     f64,
        /// Why evaluation failed.
        error: EvalError,
    },
}

impl Sample {
    /// The grid value of `x`.
    #[must_use]
    pub const fn x(&self) -> f64 {
        match self {
            Self::Point { x, .. } | Self::Gap { x, .. } => *x,
        }
    }

    /// The value of the expression, or `None` for a gap.
    #[must_use]
    pub const fn y(&self) -> Option<f64> {
        match self {
            Self::Point { y, .. } => Some(*y),
            Self::Gap { .. } => None,
        }
    }
}

/// All samples of one expression over one range, in increasing `x`.
#[derive(Debug, Clone, PartialEq)]
pub struct Samples {
    range:   SampleRange,
    samples: Vec<Sample>,
}

impl Samples {
    /// The range the samples cover.
    #[must_use]
    pub const fn range(&self) -> SampleRange {
        self.range
    }

    /// The samples in grid order.
    #[must_use]
    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }

    /// Number of grid points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` if there are no grid points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of points where the expression is defined.
    #[must_use]
    pub fn defined_count(&self) -> usize {
        self.samples.iter().filter(|s| s.y().is_some()).count()
    }

    /// Number of gaps.
    #[must_use]
    pub fn gap_count(&self) -> usize {
        self.len() - self.defined_count()
    }

    /// The error at the first gap, if any.
    #[must_use]
    pub fn first_error(&self) -> Option<&EvalError> {
        self.samples.iter().find_map(|s| match s {
                               Sample::Gap { error, .. } => Some(error),
                               Sample::Point { .. } => None,
                           })
    }

    /// Smallest and largest defined value, or `None` if every point is a
    /// gap.
    #[must_use]
    pub fn y_bounds(&self) -> Option<(f64, f64)> {
        self.samples
            .iter()
            .filter_map(Sample::y)
            .fold(None, |bounds, y| match bounds {
                None => Some((y, y)),
                Some((lo, hi)) => Some((f64::min(lo, y), f64::max(hi, y))),
            })
    }

    /// Splits the defined points into runs uninterrupted by gaps.
    ///
    /// Each run is drawn as one polyline; a gap ends the current run.
    ///
    /// # Example
    /// ```
    /// use fnplot::{
    ///     compile,
    ///     plot::sampler::{SampleRange, sample},
    /// };
    ///
    /// let expr = compile("1/x").unwrap();
    /// let samples = sample(&expr, SampleRange::new(-1.0, 1.0).unwrap(), 5).unwrap();
    /// let segments = samples.segments();
    ///
    /// assert_eq!(samples.gap_count(), 1);
    /// assert_eq!(segments,
    ///            vec![vec![(-1.0, -1.0), (-0.5, -2.0)], vec![(0.5, 2.0), (1.0, 1.0)]]);
    /// ```
    #[must_use]
    pub fn segments(&self) -> Vec<Vec<(f64, f64)>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();

        for sample in &self.samples {
            match sample {
                Sample::Point { x, y } => current.push((*x, *y)),
                Sample::Gap { .. } => {
                    if !current.is_empty() {
                        segments.push(std::mem::take(&mut current));
                    }
                },
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }

        segments
    }

    /// Checks that at least one point is defined.
    ///
    /// # Errors
    /// Returns [`PlotError::NoDefinedPoints`] summarizing the first failure
    /// when every sample is a gap.
    pub fn require_defined(&self) -> Result<(), PlotError> {
        match self.first_error() {
            Some(first) if self.defined_count() == 0 => {
                Err(PlotError::NoDefinedPoints { samples: self.len(),
                                                 first:   first.clone(), })
            },
            _ => Ok(()),
        }
    }
}

/// Evaluates an expression at `count` evenly spaced points of `range`.
///
/// Both bounds are sampled. Points are evaluated in parallel: the tree is
/// shared immutably between worker threads and each point gets its own
/// evaluation context. A point where evaluation fails becomes a
/// [`Sample::Gap`] carrying the error; the remaining points are unaffected.
///
/// # Errors
/// Returns [`RangeError::SampleCount`] if `count` is outside
/// `MIN_SAMPLES..=MAX_SAMPLES`.
///
/// # Example
/// ```
/// use fnplot::{
///     compile,
///     plot::sampler::{Sample, SampleRange, sample},
/// };
///
/// let expr = compile("x^2").unwrap();
/// let samples = sample(&expr, SampleRange::new(0.0, 2.0).unwrap(), 3).unwrap();
///
/// assert_eq!(samples.as_slice()[2], Sample::Point { x: 2.0, y: 4.0 });
/// ```
pub fn sample(expr: &Expr, range: SampleRange, count: usize) -> Result<Samples, RangeError> {
    if !(MIN_SAMPLES..=MAX_SAMPLES).contains(&count) {
        return Err(RangeError::SampleCount { count });
    }

    let last = usize_to_f64_checked(count - 1, RangeError::SampleCount { count })?;

    let samples = (0..count).into_par_iter()
                            .map(|i| -> Result<Sample, RangeError> {
                                let index = usize_to_f64_checked(i, RangeError::SampleCount { count })?;
                                let x = range.lerp(index / last);
                                Ok(match expr.evaluate(x) {
                                    Ok(y) => Sample::Point { x, y },
                                    Err(error) => Sample::Gap { x, error },
                                })
                            })
                            .collect::<Result<Vec<_>, RangeError>>()?;

    let samples = Samples { range, samples };
    let gaps = samples.gap_count();
    debug!(count, gaps, min = range.min(), max = range.max(), "sampled expression");
    if let Some(error) = samples.first_error() {
        warn!(gaps, "expression undefined at some sample points, first: {error}");
    }

    Ok(samples)
}
