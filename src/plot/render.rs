use svg::{
    Document,
    node::{
        Blob, Text as TextNode,
        element::{Circle, Description, Group, Line, Path, Rectangle, Text, path::Data},
    },
};
use tracing::debug;

use crate::{
    ast::Expr,
    plot::{config::PlotConfig, sampler::Samples},
    util::num::to_canvas,
};

/// Roughly how many ticks each axis aims for.
const TARGET_TICKS: f64 = 8.0;
/// Hard cap on ticks per axis.
const MAX_TICKS: usize = 50;
/// Fraction of the value span added above and below the curve.
const PADDING: f64 = 0.05;
/// Labels longer than this many characters move the legend out of the plot
/// area.
const INSIDE_LEGEND_CHARS: usize = 30;
/// Largest share of the plot area's width a legend outside it may take.
const OUTSIDE_LEGEND_SHARE: f64 = 0.4;
const GRID_COLOR: &str = "#b0b0b0";
const TEXT_COLOR: &str = "black";

/// The plot area on the canvas together with the data window it shows.
struct Frame {
    left:   f64,
    top:    f64,
    width:  f64,
    height: f64,
    x:      (f64, f64),
    y:      (f64, f64),
}

impl Frame {
    /// The plot area narrowed by `reserved` pixels on the right.
    fn new(config: &PlotConfig, samples: &Samples, reserved: f64) -> Self {
        let (left, top, width, height) = config.plot_area();
        let range = samples.range();
        Self { left,
               top,
               width: width - reserved,
               height,
               x: (range.min(), range.max()),
               y: value_window(samples.y_bounds()) }
    }

    fn right(&self) -> f64 {
        self.left + self.width
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }

    fn canvas_x(&self, x: f64) -> f32 {
        to_canvas(self.left + fraction(x, self.x) * self.width)
    }

    fn canvas_y(&self, y: f64) -> f32 {
        to_canvas(self.bottom() - fraction(y, self.y) * self.height)
    }
}

/// Position of `value` inside `(lo, hi)` as a number in `0.0..=1.0`.
///
/// Works on halves so spans close to the `f64` limits stay finite.
fn fraction(value: f64, (lo, hi): (f64, f64)) -> f64 {
    let span = hi.mul_add(0.5, -lo * 0.5);
    if span > 0.0 {
        (value.mul_add(0.5, -lo * 0.5) / span).clamp(0.0, 1.0)
    } else {
        0.5
    }
}

/// Computes the vertical data window from the defined values.
///
/// The span of the values is padded on both sides; a flat curve gets a window
/// of at least one unit above and below, and no defined values at all give
/// `(-1, 1)`.
///
/// # Example
/// ```
/// use fnplot::plot::render::value_window;
///
/// assert_eq!(value_window(None), (-1.0, 1.0));
/// assert_eq!(value_window(Some((3.0, 3.0))), (2.0, 4.0));
///
/// let (lo, hi) = value_window(Some((0.0, 10.0)));
/// assert!((lo + 0.5).abs() < 1e-12 && (hi - 10.5).abs() < 1e-12);
/// ```
#[must_use]
pub fn value_window(bounds: Option<(f64, f64)>) -> (f64, f64) {
    match bounds {
        Some((lo, hi)) if hi > lo => {
            let pad = hi.mul_add(0.5, -lo * 0.5) * (2.0 * PADDING);
            ((lo - pad).max(f64::MIN), (hi + pad).min(f64::MAX))
        },
        Some((value, _)) => {
            let pad = f64::max(1.0, value.abs() * PADDING);
            ((value - pad).max(f64::MIN), (value + pad).min(f64::MAX))
        },
        None => (-1.0, 1.0),
    }
}

/// Chooses a step of 1, 2 or 5 times a power of ten for the span.
fn tick_step((lo, hi): (f64, f64)) -> Option<f64> {
    let raw = hi.mul_add(0.5, -lo * 0.5) * (2.0 / TARGET_TICKS);
    if !raw.is_finite() || raw <= 0.0 {
        return None;
    }

    let magnitude = 10_f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 5.0, 10.0].into_iter()
                                    .map(|factor| factor * magnitude)
                                    .find(|step| *step >= raw)
                                    .unwrap_or(10.0 * magnitude);

    (step.is_finite() && step > 0.0).then_some(step)
}

/// Returns the tick positions for an axis showing `(lo, hi)`.
///
/// Ticks sit on multiples of a "nice" step so labels stay short; at most
/// fifty are produced.
///
/// # Example
/// ```
/// use fnplot::plot::render::ticks;
///
/// assert_eq!(ticks((0.0, 10.0)), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
/// assert_eq!(ticks((-1.0, 1.0)), vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
/// ```
#[must_use]
pub fn ticks(window: (f64, f64)) -> Vec<f64> {
    let Some(step) = tick_step(window) else {
        return Vec::new();
    };

    let first = (window.0 / step).ceil() * step;
    let mut ticks: Vec<f64> = Vec::new();
    let mut index = 0.0_f64;
    while ticks.len() < MAX_TICKS {
        let tick = index.mul_add(step, first);
        if tick > window.1 || !tick.is_finite() {
            break;
        }
        if ticks.last() != Some(&tick) {
            ticks.push(tick);
        }
        index += 1.0;
    }

    ticks
}

/// Formats a tick label with as many decimals as the step needs.
///
/// Values that are zero up to rounding print as `0`, never `-0`.
///
/// # Example
/// ```
/// use fnplot::plot::render::format_tick;
///
/// assert_eq!(format_tick(0.5, 0.5), "0.5");
/// assert_eq!(format_tick(-0.0, 1.0), "0");
/// assert_eq!(format_tick(4.0, 2.0), "4");
/// assert_eq!(format_tick(3e7, 1e7), "3e7");
/// ```
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn format_tick(value: f64, step: f64) -> String {
    let value = if value.abs() < step.abs() * 1e-9 { 0.0 } else { value };

    if !(1e-4..1e6).contains(&step.abs()) {
        return format!("{value:e}");
    }

    let decimals = (-step.log10().floor()).clamp(0.0, 10.0) as usize;
    format!("{value:.decimals$}")
}

/// Rough width of a label in pixels, used to size the legend box.
fn label_width(label: &str, font_size: f64) -> f64 {
    let chars = u32::try_from(label.chars().count()).unwrap_or(u32::MAX);
    f64::from(chars) * font_size * 0.6
}

/// Size and placement of the legend box.
struct Legend {
    /// Drawn to the right of the plot area instead of inside its corner.
    outside:   bool,
    width:     f64,
    height:    f64,
    padding:   f64,
    swatch:    f64,
    /// Font size of the label, shrunk when the label would not fit.
    font_size: f64,
}

impl Legend {
    /// Sizes the legend for `label` given the full plot area width.
    ///
    /// Labels up to thirty characters sit inside the top right corner of the
    /// plot area; longer ones go outside it, taking at most
    /// [`OUTSIDE_LEGEND_SHARE`] of the width. Either way the label's font is
    /// reduced until the text fits the box.
    fn new(label: &str, config: &PlotConfig, area_width: f64) -> Self {
        let outside = label.chars().count() > INSIDE_LEGEND_CHARS;
        let padding = config.font_size / 2.0;
        let swatch = 2.0 * config.font_size;
        let limit = if outside {
            area_width * OUTSIDE_LEGEND_SHARE
        } else {
            area_width - 2.0 * padding
        };

        let room = (limit - swatch - 3.0 * padding).max(1.0);
        let natural = label_width(label, config.font_size);
        let font_size = if natural > room {
            config.font_size * room / natural
        } else {
            config.font_size
        };

        Self { outside,
               width: label_width(label, font_size) + swatch + 3.0 * padding,
               height: config.font_size + 2.0 * padding,
               padding,
               swatch,
               font_size }
    }

    /// Width taken from the plot area to make room for the legend.
    fn reserved(&self) -> f64 {
        if self.outside { self.width + self.padding } else { 0.0 }
    }
}

/// A `<text>` element whose content is typeset math markup.
///
/// The plain label is kept as the element's `aria-label`.
fn math_text(plain: &str, markup: String) -> Text {
    Text::new("").set("aria-label", plain).add(Blob::new(markup))
}

/// `f(x) = ` with italic `f` and `x`, followed by the typeset expression.
fn typeset_label(expr: &Expr) -> String {
    format!(r#"<tspan font-style="italic">f</tspan>(<tspan font-style="italic">x</tspan>) = {}"#,
            expr.to_svg_math())
}

fn frame_border(frame: &Frame) -> Rectangle {
    Rectangle::new().set("x", to_canvas(frame.left))
                    .set("y", to_canvas(frame.top))
                    .set("width", to_canvas(frame.width))
                    .set("height", to_canvas(frame.height))
                    .set("fill", "none")
                    .set("stroke", TEXT_COLOR)
                    .set("stroke-width", 1)
}

/// Grid lines and tick labels for both axes.
fn grid_and_ticks(frame: &Frame, config: &PlotConfig) -> Group {
    let mut grid = Group::new().set("id", "grid")
                               .set("stroke", GRID_COLOR)
                               .set("stroke-width", 0.5);
    let mut labels = Group::new().set("id", "ticks")
                                 .set("fill", TEXT_COLOR)
                                 .set("font-family", config.font_family.as_str())
                                 .set("font-size", config.font_size * 0.85);

    let x_ticks = ticks(frame.x);
    let x_step = tick_step(frame.x).unwrap_or(1.0);
    for tick in &x_ticks {
        let x = frame.canvas_x(*tick);
        if config.grid {
            grid = grid.add(Line::new().set("x1", x)
                                       .set("y1", to_canvas(frame.top))
                                       .set("x2", x)
                                       .set("y2", to_canvas(frame.bottom())));
        }
        labels = labels.add(Text::new(format_tick(*tick, x_step)).set("x", x)
                                                                 .set("y", to_canvas(frame.bottom() + config.font_size + 4.0))
                                                                 .set("text-anchor", "middle"));
    }

    let y_ticks = ticks(frame.y);
    let y_step = tick_step(frame.y).unwrap_or(1.0);
    for tick in &y_ticks {
        let y = frame.canvas_y(*tick);
        if config.grid {
            grid = grid.add(Line::new().set("x1", to_canvas(frame.left))
                                       .set("y1", y)
                                       .set("x2", to_canvas(frame.right()))
                                       .set("y2", y));
        }
        labels = labels.add(Text::new(format_tick(*tick, y_step)).set("x", to_canvas(frame.left - 6.0))
                                                                 .set("y", y)
                                                                 .set("dy", "0.35em")
                                                                 .set("text-anchor", "end"));
    }

    Group::new().add(grid).add(labels)
}

/// Reference lines at `x = 0` and `y = 0` when they are inside the window.
fn reference_axes(frame: &Frame) -> Group {
    let mut axes = Group::new().set("id", "axes")
                               .set("stroke", TEXT_COLOR)
                               .set("stroke-width", 1)
                               .set("stroke-opacity", 0.3);

    if frame.y.0 <= 0.0 && 0.0 <= frame.y.1 {
        let y = frame.canvas_y(0.0);
        axes = axes.add(Line::new().set("x1", to_canvas(frame.left))
                                   .set("y1", y)
                                   .set("x2", to_canvas(frame.right()))
                                   .set("y2", y));
    }
    if frame.x.0 <= 0.0 && 0.0 <= frame.x.1 {
        let x = frame.canvas_x(0.0);
        axes = axes.add(Line::new().set("x1", x)
                                   .set("y1", to_canvas(frame.top))
                                   .set("x2", x)
                                   .set("y2", to_canvas(frame.bottom())));
    }

    axes
}

/// The curve itself: one polyline per run of defined points, a dot for a
/// point isolated between gaps.
fn curve(frame: &Frame, samples: &Samples, config: &PlotConfig) -> Group {
    let mut group = Group::new().set("id", "curve");

    for segment in samples.segments() {
        match segment.as_slice() {
            [] => {},
            [(x, y)] => {
                group = group.add(Circle::new().set("cx", frame.canvas_x(*x))
                                               .set("cy", frame.canvas_y(*y))
                                               .set("r", config.stroke_width)
                                               .set("fill", config.curve_color.as_str()));
            },
            [(x0, y0), rest @ ..] => {
                let data = rest.iter()
                               .fold(Data::new().move_to((frame.canvas_x(*x0), frame.canvas_y(*y0))),
                                     |data, (x, y)| data.line_to((frame.canvas_x(*x), frame.canvas_y(*y))));
                group = group.add(Path::new().set("d", data)
                                             .set("fill", "none")
                                             .set("stroke", config.curve_color.as_str())
                                             .set("stroke-width", config.stroke_width)
                                             .set("stroke-linejoin", "round")
                                             .set("stroke-linecap", "round"));
            },
        }
    }

    group
}

/// Title, axis labels and the legend.
fn annotations(frame: &Frame, expr: &Expr, legend: Option<&Legend>, config: &PlotConfig) -> Group {
    let label = format!("f(x) = {expr}");
    let margin = f64::from(config.margin);
    let width = f64::from(config.width);
    let height = f64::from(config.height);
    let centre_x = frame.left + frame.width / 2.0;
    let centre_y = frame.top + frame.height / 2.0;

    let title = math_text(&label, typeset_label(expr)).set("id", "title")
                                                      .set("x", to_canvas(width / 2.0))
                                                      .set("y", to_canvas(frame.top - config.font_size))
                                                      .set("font-size", config.font_size * 1.3)
                                                      .set("text-anchor", "middle");
    let x_label = Text::new("x").set("x", to_canvas(centre_x))
                                .set("y", to_canvas(height - margin - 4.0))
                                .set("text-anchor", "middle")
                                .set("font-style", "italic");
    let y_position = (to_canvas(margin + config.font_size), to_canvas(centre_y));
    let y_label = Text::new("f(x)").set("x", y_position.0)
                                   .set("y", y_position.1)
                                   .set("text-anchor", "middle")
                                   .set("font-style", "italic")
                                   .set("transform",
                                        format!("rotate(-90 {} {})", y_position.0, y_position.1));

    let mut group = Group::new().set("id", "labels")
                                .set("fill", TEXT_COLOR)
                                .set("font-family", config.font_family.as_str())
                                .set("font-size", config.font_size)
                                .add(title)
                                .add(x_label)
                                .add(y_label);

    if let Some(legend) = legend {
        group = group.add(legend_box(frame, legend, expr, &label, config));
    }

    group
}

/// A boxed sample of the curve style next to the label, in the top right
/// corner of the plot area or just right of it.
fn legend_box(frame: &Frame, legend: &Legend, expr: &Expr, label: &str, config: &PlotConfig) -> Group {
    let Legend { width,
                 height,
                 padding,
                 swatch,
                 .. } = *legend;
    let (left, top) = if legend.outside {
        (frame.right() + padding, frame.top)
    } else {
        (frame.right() - padding - width, frame.top + padding)
    };
    let middle = top + height / 2.0;

    Group::new().set("id", "legend")
                .set("class", if legend.outside { "outside" } else { "inside" })
                .add(Rectangle::new().set("x", to_canvas(left))
                                     .set("y", to_canvas(top))
                                     .set("width", to_canvas(width))
                                     .set("height", to_canvas(height))
                                     .set("fill", "white")
                                     .set("fill-opacity", 0.8)
                                     .set("stroke", GRID_COLOR))
                .add(Line::new().set("x1", to_canvas(left + padding))
                                .set("y1", to_canvas(middle))
                                .set("x2", to_canvas(left + padding + swatch))
                                .set("y2", to_canvas(middle))
                                .set("stroke", config.curve_color.as_str())
                                .set("stroke-width", config.stroke_width))
                .add(math_text(label, typeset_label(expr)).set("x", to_canvas(left + 2.0 * padding + swatch))
                                                          .set("y", to_canvas(middle))
                                                          .set("dy", "0.35em")
                                                          .set("font-size", legend.font_size))
}

/// Renders sampled values of an expression as a standalone SVG document.
///
/// The document holds, back to front: a white background, the grid with tick
/// labels, the reference axes, the curve, the frame, and the title, axis
/// labels and legend. The title and legend read `f(x) = <expr>`, typeset
/// with italic variables, raised exponents and math symbols (see
/// [`Expr::to_svg_math`]); their `aria-label` carries the normalized text
/// form and the LaTeX form is stored in the document's `<desc>` element.
///
/// The configuration is assumed to be valid (see [`PlotConfig::validate`]).
///
/// # Example
/// ```
/// use fnplot::{
///     compile,
///     plot::{
///         config::PlotConfig,
///         render::render_svg,
///         sampler::{SampleRange, sample},
///     },
/// };
///
/// let expr = compile("x^2").unwrap();
/// let samples = sample(&expr, SampleRange::new(-2.0, 2.0).unwrap(), 50).unwrap();
/// let svg = render_svg(&expr, &samples, &PlotConfig::default());
///
/// assert!(svg.starts_with("<svg"));
/// assert!(svg.contains("f(x) = x^2"));
/// ```
#[must_use]
pub fn render_svg(expr: &Expr, samples: &Samples, config: &PlotConfig) -> String {
    let legend = config.legend.then(|| {
                                  let (_, _, area_width, _) = config.plot_area();
                                  Legend::new(&format!("f(x) = {expr}"), config, area_width)
                              });
    let frame = Frame::new(config, samples, legend.as_ref().map_or(0.0, Legend::reserved));

    debug!(x_min = frame.x.0,
           x_max = frame.x.1,
           y_min = frame.y.0,
           y_max = frame.y.1,
           "rendering plot");

    let mut document = Document::new().set("xmlns", "http://www.w3.org/2000/svg")
                                      .set("width", config.width)
                                      .set("height", config.height)
                                      .set("viewBox", (0, 0, config.width, config.height))
                                      .add(Description::new().add(TextNode::new(expr.to_latex())))
                                      .add(Rectangle::new().set("width", "100%")
                                                           .set("height", "100%")
                                                           .set("fill", "white"))
                                      .add(grid_and_ticks(&frame, config));

    if config.axes {
        document = document.add(reference_axes(&frame));
    }

    document.add(curve(&frame, samples, config))
            .add(frame_border(&frame))
            .add(annotations(&frame, expr, legend.as_ref(), config))
            .to_string()
}
