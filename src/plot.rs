use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use crate::{
    ast::Expr,
    compile,
    error::PlotError,
    plot::{
        config::PlotConfig,
        output::{OutputFormat, resolve_output_path, write_document},
        sampler::{SampleRange, Samples, sample},
    },
};

/// Rendering settings.
///
/// Holds [`config::PlotConfig`], the explicit value every render call takes,
/// together with the limits on sample counts.
pub mod config;
/// PDF conversion.
///
/// Turns the SVG produced by [`render`] into a PDF document so both formats
/// share one layout.
pub mod pdf;
/// Output file handling.
///
/// Selects the output format, derives a file name that never overwrites an
/// existing file and writes the finished document.
pub mod output;
/// SVG rendering.
///
/// Maps sampled values onto the canvas and draws the grid, axes, curve and
/// labels.
///
/// # Responsibilities
/// - Chooses the visible data window and "nice" tick positions.
/// - Breaks the curve at gaps and draws isolated points as dots.
/// - Labels the plot with the typeset expression and embeds its LaTeX
///   form.
pub mod render;
/// Evaluation over a grid.
///
/// Evaluates an expression at evenly spaced points of a validated range and
/// records the points where it is undefined as gaps.
pub mod sampler;

/// Everything needed to plot one expression.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotRequest {
    /// The expression source, in terms of `x`.
    pub expression: String,
    /// The range of `x`.
    pub range:      SampleRange,
    /// The document format.
    pub format:     OutputFormat,
    /// The requested file name; `None` or empty selects the default.
    pub output:     Option<PathBuf>,
}

/// What a successful plot produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotReport {
    /// The file the document was written to.
    pub path:    PathBuf,
    /// The plot label, `f(x) = <normalized expression>`.
    pub label:   String,
    /// Number of sample points where the expression is defined.
    pub defined: usize,
    /// Number of sample points left as gaps.
    pub gaps:    usize,
}

/// Renders sampled values in the requested format.
///
/// # Errors
/// Returns [`PlotError::Render`] if PDF conversion fails.
pub fn render_document(expr: &Expr,
                       samples: &Samples,
                       format: OutputFormat,
                       config: &PlotConfig)
                       -> Result<Vec<u8>, PlotError> {
    let svg = render::render_svg(expr, samples, config);
    match format {
        OutputFormat::Svg => Ok(svg.into_bytes()),
        OutputFormat::Pdf => pdf::svg_to_pdf(&svg),
    }
}

/// Compiles, samples, renders and saves one expression.
///
/// This is the whole pipeline behind the command line tool. The configuration
/// is validated before anything else; syntax errors abort before sampling; a
/// point where the expression is undefined becomes a gap, and the request
/// only fails on evaluation if no point at all is defined. The document is
/// written to a new file chosen by [`output::resolve_output_path`]; an
/// existing file is never replaced.
///
/// # Errors
/// - [`PlotError::Range`] for an invalid configuration.
/// - [`PlotError::Syntax`] if the expression does not tokenize or parse.
/// - [`PlotError::NoDefinedPoints`] if every sample point fails.
/// - [`PlotError::Render`] or [`PlotError::Io`] if the document cannot be
///   produced or written.
///
/// # Example
/// ```
/// use fnplot::plot::{
///     PlotRequest, config::PlotConfig, output::OutputFormat, plot, sampler::SampleRange,
/// };
///
/// let dir = std::env::temp_dir().join("fnplot-doc-plot");
/// std::fs::create_dir_all(&dir).unwrap();
///
/// let request = PlotRequest { expression: "sin(x) / x".to_string(),
///                             range:      SampleRange::new(-10.0, 10.0).unwrap(),
///                             format:     OutputFormat::Svg,
///                             output:     Some(dir.join("sinc")) };
/// let report = plot(&request, &PlotConfig::default()).unwrap();
///
/// assert_eq!(report.label, "f(x) = sin(x) / x");
/// assert!(report.path.exists());
/// ```
pub fn plot(request: &PlotRequest, config: &PlotConfig) -> Result<PlotReport, PlotError> {
    config.validate()?;

    let expr = compile(&request.expression)?;
    let samples = sample(&expr, request.range, config.samples)?;
    samples.require_defined()?;

    let document = render_document(&expr, &samples, request.format, config)?;
    let path = write_fresh(request.output.as_deref(), request.format, &document)?;

    let report = PlotReport { path,
                              label: format!("f(x) = {expr}"),
                              defined: samples.defined_count(),
                              gaps: samples.gap_count() };
    info!(path = %report.path.display(),
          format = %request.format,
          defined = report.defined,
          gaps = report.gaps,
          "plot saved");

    Ok(report)
}

/// How many names are tried when the chosen file appears before it can be
/// created.
const NAME_ATTEMPTS: usize = 8;

/// Writes `document` under the first free name for `requested`.
///
/// A file created by someone else between picking the name and creating it
/// makes the next free name be picked instead.
fn write_fresh(requested: Option<&Path>,
               format: OutputFormat,
               document: &[u8])
               -> Result<PathBuf, PlotError> {
    let mut attempt = 1;
    loop {
        let path = resolve_output_path(requested, format);
        match write_document(&path, document) {
            Ok(()) => return Ok(path),
            Err(PlotError::Io { source, .. })
                if source.kind() == ErrorKind::AlreadyExists && attempt < NAME_ATTEMPTS =>
            {
                debug!(path = %path.display(), attempt, "output file appeared, picking another name");
                attempt += 1;
            },
            Err(error) => return Err(error),
        }
    }
}
