#[derive(Debug, Clone, PartialEq)]
/// Represents invalid sampling ranges and plot settings.
pub enum RangeError {
    /// A bound was NaN or infinite.
    NonFiniteBound {
        /// Which bound: `"min"` or `"max"`.
        bound: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The minimum was not strictly below the maximum.
    EmptyRange {
        /// The requested minimum.
        min: f64,
        /// The requested maximum.
        max: f64,
    },
    /// The sample count is outside the supported range.
    SampleCount {
        /// The requested sample count.
        count: usize,
    },
    /// The canvas is too small to hold the plot margins.
    InvalidCanvas {
        /// Requested width in pixels.
        width:  u32,
        /// Requested height in pixels.
        height: u32,
    },
}

impl std::fmt::Display for RangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonFiniteBound { bound, value } => {
                write!(f, "Invalid range: {bound} x value {value} is not finite.")
            },
            Self::EmptyRange { min, max } => write!(f,
                                                    "Invalid range: minimum x value {min} must be less than maximum x value {max}."),
            Self::SampleCount { count } => write!(f,
                                                  "Invalid sample count {count}: expected between {} and {}.",
                                                  crate::plot::config::MIN_SAMPLES,
                                                  crate::plot::config::MAX_SAMPLES),
            Self::InvalidCanvas { width, height } => {
                write!(f, "Invalid canvas {width}x{height}: too small to hold the plot.")
            },
        }
    }
}

impl std::error::Error for RangeError {}
