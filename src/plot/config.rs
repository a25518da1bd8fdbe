use crate::error::RangeError;

/// Smallest accepted sample count; a curve needs two points.
pub const MIN_SAMPLES: usize = 2;
/// Largest accepted sample count.
pub const MAX_SAMPLES: usize = 1_000_000;
/// Default number of sample points across the range.
pub const DEFAULT_SAMPLES: usize = 1000;

/// Room reserved beside the margin for tick labels, the title and the axis
/// labels.
const DECORATION: u32 = 40;

/// Rendering settings for one plot.
///
/// The configuration is an explicit value handed to the renderer; nothing is
/// read from or written to process-wide state. [`PlotConfig::default`]
/// mirrors a 10 × 6 inch figure at 100 pixels per inch.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    /// Canvas width in pixels.
    pub width:        u32,
    /// Canvas height in pixels.
    pub height:       u32,
    /// Number of evenly spaced sample points, bounds included.
    pub samples:      usize,
    /// Blank border around the plot, in pixels.
    pub margin:       u32,
    /// SVG colour of the curve.
    pub curve_color:  String,
    /// Stroke width of the curve, in pixels.
    pub stroke_width: f64,
    /// Draws grid lines at the tick positions.
    pub grid:         bool,
    /// Draws reference lines at `x = 0` and `y = 0` when visible.
    pub axes:         bool,
    /// Draws the legend box.
    pub legend:       bool,
    /// Font family for every label.
    pub font_family:  String,
    /// Base font size in pixels; the title is drawn larger.
    pub font_size:    f64,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self { width:        1000,
               height:       600,
               samples:      DEFAULT_SAMPLES,
               margin:       20,
               curve_color:  "blue".to_string(),
               stroke_width: 1.5,
               grid:         true,
               axes:         true,
               legend:       true,
               font_family:  "serif".to_string(),
               font_size:    14.0, }
    }
}

impl PlotConfig {
    /// Checks that the settings describe a drawable plot.
    ///
    /// # Errors
    /// - [`RangeError::SampleCount`] if `samples` is outside
    ///   `MIN_SAMPLES..=MAX_SAMPLES`.
    /// - [`RangeError::InvalidCanvas`] if the canvas cannot hold the margins
    ///   and labels.
    ///
    /// # Example
    /// ```
    /// use fnplot::{error::RangeError, plot::config::PlotConfig};
    ///
    /// assert!(PlotConfig::default().validate().is_ok());
    ///
    /// let config = PlotConfig { samples: 1,
    ///                           ..PlotConfig::default() };
    /// assert_eq!(config.validate(), Err(RangeError::SampleCount { count: 1 }));
    /// ```
    pub fn validate(&self) -> Result<(), RangeError> {
        if !(MIN_SAMPLES..=MAX_SAMPLES).contains(&self.samples) {
            return Err(RangeError::SampleCount { count: self.samples });
        }

        let reserved = self.margin.saturating_add(2 * DECORATION).saturating_mul(2);
        if self.width <= reserved || self.height <= reserved {
            return Err(RangeError::InvalidCanvas { width:  self.width,
                                                   height: self.height, });
        }

        Ok(())
    }

    /// Returns the plot area as `(left, top, width, height)` in pixels.
    ///
    /// The left side leaves room for tick labels and the vertical axis
    /// label, the top for the title and the bottom for tick labels and the
    /// horizontal axis label.
    #[must_use]
    pub fn plot_area(&self) -> (f64, f64, f64, f64) {
        let margin = f64::from(self.margin);
        let decoration = f64::from(DECORATION);
        let left = margin + 2.0 * decoration;
        let top = margin + decoration;
        let right = margin;
        let bottom = margin + 1.5 * decoration;
        (left,
         top,
         f64::from(self.width) - left - right,
         f64::from(self.height) - top - bottom)
    }
}
