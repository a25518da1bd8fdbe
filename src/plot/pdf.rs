use svg2pdf::{ConversionOptions, PageOptions, usvg};
use tracing::debug;

use crate::error::PlotError;

/// Converts an SVG document into a single-page PDF.
///
/// Text is laid out with the fonts installed on the system; the page has the
/// size of the SVG canvas.
///
/// # Errors
/// Returns [`PlotError::Render`] if the SVG cannot be parsed or the PDF cannot
/// be produced.
///
/// # Example
/// ```
/// use fnplot::plot::pdf::svg_to_pdf;
///
/// let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"/>"#;
/// let pdf = svg_to_pdf(svg).unwrap();
///
/// assert!(pdf.starts_with(b"%PDF"));
/// ```
pub fn svg_to_pdf(svg: &str) -> Result<Vec<u8>, PlotError> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    debug!(faces = options.fontdb.len(), "loaded system fonts");

    let tree = usvg::Tree::from_str(svg, &options).map_err(|e| PlotError::Render { details: e.to_string() })?;

    svg2pdf::to_pdf(&tree, ConversionOptions::default(), PageOptions::default())
        .map_err(|e| PlotError::Render { details: e.to_string() })
}
