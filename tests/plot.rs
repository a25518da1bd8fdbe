use std::fs;

use fnplot::{
    compile,
    error::{EvalError, PlotError, RangeError, SyntaxError},
    plot::{
        PlotRequest,
        config::PlotConfig,
        output::{OutputFormat, resolve_output_path, write_document},
        pdf::svg_to_pdf,
        plot, render_document,
        render::render_svg,
        sampler::{Sample, SampleRange, sample},
    },
};
use tempfile::tempdir;

fn range(min: f64, max: f64) -> SampleRange {
    SampleRange::new(min, max).unwrap()
}

/// Reads the number in the first `name="..."` attribute after `marker`.
fn attribute_after(svg: &str, marker: &str, name: &str) -> f64 {
    let start = svg.find(marker).unwrap_or_else(|| panic!("no {marker} in the document"));
    let needle = format!(" {name}=\"");
    let offset = svg[start..].find(&needle).unwrap() + start + needle.len();
    let end = svg[offset..].find('"').unwrap() + offset;
    svg[offset..end].parse().unwrap()
}

fn request(expression: &str, format: OutputFormat, output: std::path::PathBuf) -> PlotRequest {
    PlotRequest { expression: expression.to_string(),
                  range: range(-5.0, 5.0),
                  format,
                  output: Some(output) }
}

#[test]
fn range_bounds_are_validated() {
    assert_eq!(SampleRange::new(1.0, 1.0),
               Err(RangeError::EmptyRange { min: 1.0, max: 1.0 }));
    assert_eq!(SampleRange::new(2.0, -2.0),
               Err(RangeError::EmptyRange { min: 2.0, max: -2.0 }));
    assert!(matches!(SampleRange::new(f64::NAN, 1.0),
                     Err(RangeError::NonFiniteBound { bound: "min", .. })));
    assert!(matches!(SampleRange::new(0.0, f64::INFINITY),
                     Err(RangeError::NonFiniteBound { bound: "max", .. })));
}

#[test]
fn sample_grid_includes_both_bounds() {
    let expr = compile("x").unwrap();
    let samples = sample(&expr, range(-3.0, 7.0), 11).unwrap();

    assert_eq!(samples.len(), 11);
    let xs: Vec<f64> = samples.as_slice().iter().map(Sample::x).collect();
    assert_eq!(xs.first(), Some(&-3.0));
    assert_eq!(xs.last(), Some(&7.0));
    assert!(xs.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(samples.as_slice().iter().all(|s| s.y() == Some(s.x())));
}

#[test]
fn sample_count_is_validated() {
    let expr = compile("x").unwrap();
    assert_eq!(sample(&expr, range(0.0, 1.0), 1).unwrap_err(),
               RangeError::SampleCount { count: 1 });
    assert_eq!(sample(&expr, range(0.0, 1.0), 0).unwrap_err(),
               RangeError::SampleCount { count: 0 });
}

#[test]
fn extreme_ranges_stay_finite() {
    let expr = compile("x").unwrap();
    let samples = sample(&expr, range(-f64::MAX, f64::MAX), 5).unwrap();

    assert_eq!(samples.defined_count(), 5);
    assert!(samples.as_slice().iter().all(|s| s.x().is_finite()));

    let svg = render_svg(&expr, &samples, &PlotConfig::default());
    assert!(!svg.contains("inf") && !svg.contains("NaN"));
}

#[test]
fn undefined_points_become_gaps() {
    let expr = compile("log(x)").unwrap();
    let samples = sample(&expr, range(-1.0, 1.0), 9).unwrap();

    assert_eq!(samples.gap_count(), 5);
    assert_eq!(samples.defined_count(), 4);
    assert_eq!(samples.segments().len(), 1);
    assert!(matches!(samples.first_error(), Some(EvalError::Domain { at, .. }) if *at == -1.0));
    assert!(samples.require_defined().is_ok());
}

#[test]
fn gaps_split_the_curve() {
    let expr = compile("1 / (x - 1) + 1 / (x + 1)").unwrap();
    let samples = sample(&expr, range(-2.0, 2.0), 9).unwrap();
    let segments = samples.segments();

    assert_eq!(samples.gap_count(), 2);
    assert_eq!(segments.len(), 3);
    assert_eq!(segments.iter().map(Vec::len).collect::<Vec<_>>(), [2, 3, 2]);
}

#[test]
fn nowhere_defined_is_error() {
    let expr = compile("log(-1 - x^2)").unwrap();
    let samples = sample(&expr, range(-1.0, 1.0), 10).unwrap();

    assert_eq!(samples.defined_count(), 0);
    assert!(samples.y_bounds().is_none());
    match samples.require_defined() {
        Err(PlotError::NoDefinedPoints { samples, first }) => {
            assert_eq!(samples, 10);
            assert!(matches!(first, EvalError::Domain { at, .. } if at == -1.0));
        },
        other => panic!("expected NoDefinedPoints, got {other:?}"),
    }
}

#[test]
fn svg_contains_labels_and_curve() {
    let expr = compile("x^2 - 1").unwrap();
    let samples = sample(&expr, range(-2.0, 2.0), 100).unwrap();
    let svg = render_svg(&expr, &samples, &PlotConfig::default());

    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("aria-label=\"f(x) = x^2 - 1\""));
    assert!(svg.contains("x^{2} - 1"));
    assert!(svg.contains("\nf(x)\n"));
    assert!(svg.contains("id=\"curve\""));
    assert!(svg.contains("id=\"legend\""));
    assert!(svg.contains("id=\"axes\""));
    assert_eq!(svg.matches("<path").count(), 1);
}

#[test]
fn labels_are_typeset() {
    let expr = compile("2*pi*x^2 - e").unwrap();
    let samples = sample(&expr, range(-1.0, 1.0), 20).unwrap();
    let svg = render_svg(&expr, &samples, &PlotConfig::default());

    let typeset = concat!(r#"<tspan font-style="italic">f</tspan>(<tspan font-style="italic">x</tspan>) = "#,
                          r#"2 · π · <tspan font-style="italic">x</tspan>"#,
                          r#"<tspan baseline-shift="super" font-size="70%">2</tspan>"#,
                          r#" − <tspan font-style="italic">e</tspan>"#);
    assert_eq!(svg.matches(typeset).count(), 2, "title and legend are typeset");
    assert!(svg.contains("2 \\cdot \\pi \\cdot x^{2} - e"));
}

#[test]
fn long_labels_move_the_legend_outside() {
    let config = PlotConfig::default();
    let (left, _, area_width, _) = config.plot_area();

    let short = compile("x^2").unwrap();
    let samples = sample(&short, range(-1.0, 1.0), 20).unwrap();
    let svg = render_svg(&short, &samples, &config);
    assert!(svg.contains("class=\"inside\" id=\"legend\""));
    assert_eq!(attribute_after(&svg, "id=\"legend\"", "font-size"), config.font_size);

    let long = compile(&vec!["sin(x)"; 30].join(" + ")).unwrap();
    let samples = sample(&long, range(-1.0, 1.0), 20).unwrap();
    let svg = render_svg(&long, &samples, &config);
    assert!(svg.contains("class=\"outside\" id=\"legend\""));

    let x = attribute_after(&svg, "id=\"legend\"", "x");
    let width = attribute_after(&svg, "id=\"legend\"", "width");
    assert!(x + width <= left + area_width + 0.5, "legend ends at {}", x + width);
    assert!(width <= area_width * 0.4 + 0.5);
    assert!(attribute_after(&svg, "id=\"legend\"", "font-size") < config.font_size);

    let frame_width = attribute_after(&svg, "<rect fill=\"none\"", "width");
    assert!(frame_width < area_width - width);
}

#[test]
fn config_switches_hide_decorations() {
    let expr = compile("x").unwrap();
    let samples = sample(&expr, range(1.0, 2.0), 10).unwrap();
    let config = PlotConfig { legend: false,
                              grid: false,
                              ..PlotConfig::default() };
    let svg = render_svg(&expr, &samples, &config);

    assert!(!svg.contains("id=\"legend\""));
    assert!(!svg.contains("<line"));
}

#[test]
fn isolated_points_are_dots() {
    let expr = compile("log(x - 0.02) + log(0.08 - x)").unwrap();
    let samples = sample(&expr, range(-1.0, 1.0), 41).unwrap();

    assert_eq!(samples.defined_count(), 1);
    let svg = render_svg(&expr, &samples, &PlotConfig::default());
    assert!(svg.contains("<circle"));
    assert!(!svg.contains("<path"));
}

#[test]
fn invalid_config_is_rejected() {
    let config = PlotConfig { width: 50,
                              ..PlotConfig::default() };
    assert_eq!(config.validate(),
               Err(RangeError::InvalidCanvas { width:  50,
                                               height: 600, }));

    let dir = tempdir().unwrap();
    let result = plot(&request("x", OutputFormat::Svg, dir.path().join("plot")), &config);
    assert!(matches!(result, Err(PlotError::Range(RangeError::InvalidCanvas { .. }))));
    assert!(fs::read_dir(dir.path()).unwrap().next().is_none());
}

#[test]
fn pdf_output_is_a_pdf() {
    let expr = compile("sin(x)").unwrap();
    let samples = sample(&expr, range(-3.0, 3.0), 50).unwrap();
    let bytes = render_document(&expr, &samples, OutputFormat::Pdf, &PlotConfig::default()).unwrap();

    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn malformed_svg_is_a_render_error() {
    assert!(matches!(svg_to_pdf("<svg"), Err(PlotError::Render { .. })));
}

#[test]
fn output_names_never_clobber() {
    let dir = tempdir().unwrap();
    let base = dir.path().join("curve");

    let first = resolve_output_path(Some(&base), OutputFormat::Svg);
    assert_eq!(first, dir.path().join("curve.svg"));
    write_document(&first, b"one").unwrap();

    let second = resolve_output_path(Some(&base), OutputFormat::Svg);
    assert_eq!(second, dir.path().join("curve_1.svg"));
    write_document(&second, b"two").unwrap();

    let third = resolve_output_path(Some(&dir.path().join("curve.svg")), OutputFormat::Svg);
    assert_eq!(third, dir.path().join("curve_2.svg"));

    assert_eq!(resolve_output_path(Some(&base), OutputFormat::Pdf),
               dir.path().join("curve.pdf"));
    assert_eq!(resolve_output_path(Some(&dir.path().join("curve.v2")), OutputFormat::Pdf),
               dir.path().join("curve.v2.pdf"));
    assert_eq!(fs::read(&first).unwrap(), b"one");

    match write_document(&first, b"three") {
        Err(PlotError::Io { source, .. }) => {
            assert_eq!(source.kind(), std::io::ErrorKind::AlreadyExists);
        },
        other => panic!("expected an I/O error, got {other:?}"),
    }
    assert_eq!(fs::read(&first).unwrap(), b"one");
}

#[test]
fn bounds_must_be_finite_numbers() {
    assert_eq!(SampleRange::parse_bound("-10"), Some(-10.0));
    assert_eq!(SampleRange::parse_bound(" 2.5e1 "), Some(25.0));
    for text in ["inf", "-inf", "NaN", "infinity", "", "ten", "1e999"] {
        assert_eq!(SampleRange::parse_bound(text), None, "'{text}' is not a usable bound");
    }
}

#[test]
fn empty_name_uses_default() {
    let path = resolve_output_path(Some(std::path::Path::new("")), OutputFormat::Svg);
    assert_eq!(path.extension().unwrap(), "svg");
    assert!(path.file_stem().unwrap().to_string_lossy().starts_with("output"));
}

#[test]
fn write_failure_is_io_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing").join("plot.svg");
    assert!(matches!(write_document(&path, b"data"), Err(PlotError::Io { .. })));
}

#[test]
fn plot_writes_svg_file() {
    let dir = tempdir().unwrap();
    let report = plot(&request("1/x", OutputFormat::Svg, dir.path().join("hyperbola")),
                      &PlotConfig { samples: 11,
                                    ..PlotConfig::default() }).unwrap();

    assert_eq!(report.path, dir.path().join("hyperbola.svg"));
    assert_eq!(report.label, "f(x) = 1 / x");
    assert_eq!(report.defined, 10);
    assert_eq!(report.gaps, 1);

    let content = fs::read_to_string(&report.path).unwrap();
    assert!(content.contains("aria-label=\"f(x) = 1 / x\""));
}

#[test]
fn plot_writes_pdf_file() {
    let dir = tempdir().unwrap();
    let report = plot(&request("exp(-(x^2))", OutputFormat::Pdf, dir.path().join("bell")),
                      &PlotConfig::default()).unwrap();

    assert_eq!(report.path, dir.path().join("bell.pdf"));
    assert!(fs::read(&report.path).unwrap().starts_with(b"%PDF"));
}

#[test]
fn plot_reports_syntax_errors_before_writing() {
    let dir = tempdir().unwrap();
    let result = plot(&request("sin(x", OutputFormat::Svg, dir.path().join("broken")),
                      &PlotConfig::default());

    assert!(matches!(result, Err(PlotError::Syntax(SyntaxError::Parse(_)))));
    assert!(!dir.path().join("broken.svg").exists());
}

#[test]
fn plot_fails_when_nowhere_defined() {
    let dir = tempdir().unwrap();
    let result = plot(&request("log(-exp(x))", OutputFormat::Svg, dir.path().join("empty")),
                      &PlotConfig::default());

    let error = result.unwrap_err();
    assert!(matches!(error, PlotError::NoDefinedPoints { samples: 1000, .. }));
    assert!(error.to_string().contains("undefined at all 1000 sample points"));
    assert!(!dir.path().join("empty.svg").exists());
}
