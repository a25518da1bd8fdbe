use std::path::PathBuf;

use clap::Parser;
use fnplot::{
    error::PlotError,
    plot::{
        PlotRequest,
        config::{DEFAULT_SAMPLES, PlotConfig},
        output::{DEFAULT_STEM, OutputFormat},
        plot,
        sampler::SampleRange,
    },
};
use rustyline::{DefaultEditor, error::ReadlineError};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// fnplot plots a function of `x` to an SVG or PDF file.
///
/// Inputs missing from the command line are asked for interactively.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The function to plot, e.g. "sin(x) / x".
    #[arg(allow_hyphen_values = true)]
    expression: Option<String>,

    /// Minimum x value.
    #[arg(long, allow_hyphen_values = true)]
    min: Option<f64>,

    /// Maximum x value.
    #[arg(long, allow_hyphen_values = true)]
    max: Option<f64>,

    /// Output format.
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Output filename; the extension is added when missing.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of sample points across the range.
    #[arg(long, default_value_t = DEFAULT_SAMPLES)]
    samples: usize,

    /// Canvas width in pixels.
    #[arg(long, default_value_t = PlotConfig::default().width)]
    width: u32,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = PlotConfig::default().height)]
    height: u32,

    /// Hides the grid.
    #[arg(long)]
    no_grid: bool,

    /// Hides the legend.
    #[arg(long)]
    no_legend: bool,
}

/// Asks for inputs on the terminal, repeating a question until the answer is
/// usable.
struct Prompter {
    editor: DefaultEditor,
}

impl Prompter {
    fn new() -> Result<Self, ReadlineError> {
        Ok(Self { editor: DefaultEditor::new()? })
    }

    fn line(&mut self, prompt: &str) -> Result<String, ReadlineError> {
        let line = self.editor.readline(prompt)?;
        let _ = self.editor.add_history_entry(line.as_str());
        Ok(line.trim().to_string())
    }

    fn expression(&mut self) -> Result<String, ReadlineError> {
        loop {
            let line = self.line("Enter function f(x) = ")?;
            if !line.is_empty() {
                return Ok(line);
            }
        }
    }

    fn number(&mut self, prompt: &str) -> Result<f64, ReadlineError> {
        loop {
            match SampleRange::parse_bound(&self.line(prompt)?) {
                Some(value) => return Ok(value),
                None => println!("Please enter a finite number."),
            }
        }
    }

    fn format(&mut self) -> Result<OutputFormat, ReadlineError> {
        println!("\nChoose output format:");
        println!("1. SVG");
        println!("2. PDF");
        loop {
            match self.line("Enter your choice (1 or 2): ")?.to_ascii_lowercase().as_str() {
                "1" | "svg" => return Ok(OutputFormat::Svg),
                "2" | "pdf" => return Ok(OutputFormat::Pdf),
                _ => println!("Invalid choice. Please enter 1 for SVG or 2 for PDF."),
            }
        }
    }

    fn filename(&mut self, format: OutputFormat) -> Result<Option<PathBuf>, ReadlineError> {
        let line = self.line(&format!("Enter output filename (default: {DEFAULT_STEM}.{}): ",
                                      format.extension()))?;
        Ok((!line.is_empty()).then(|| PathBuf::from(line)))
    }
}

/// The five inputs of a plot request, before validation.
struct Inputs {
    expression: String,
    min:        f64,
    max:        f64,
    format:     OutputFormat,
    output:     Option<PathBuf>,
}

/// Fills in whatever the command line left out.
///
/// The filename is only asked for in an interactive session, i.e. when at
/// least one other input was missing too.
fn complete_inputs(args: &Args) -> Result<Inputs, ReadlineError> {
    if let (Some(expression), Some(min), Some(max), Some(format)) =
        (&args.expression, args.min, args.max, args.format)
    {
        return Ok(Inputs { expression: expression.clone(),
                           min,
                           max,
                           format,
                           output: args.output.clone() });
    }

    println!("Function Plotter - SVG/PDF Export");
    println!("---------------------------------");
    let mut prompter = Prompter::new()?;

    let expression = match &args.expression {
        Some(expression) => expression.clone(),
        None => prompter.expression()?,
    };
    let min = match args.min {
        Some(min) => min,
        None => prompter.number("Enter minimum x value: ")?,
    };
    let max = match args.max {
        Some(max) => max,
        None => prompter.number("Enter maximum x value: ")?,
    };
    let format = match args.format {
        Some(format) => format,
        None => prompter.format()?,
    };
    let output = match &args.output {
        Some(output) => Some(output.clone()),
        None => prompter.filename(format)?,
    };

    Ok(Inputs { expression,
                min,
                max,
                format,
                output })
}

fn main() {
    tracing_subscriber::registry().with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "fnplot=info".into()))
                                  .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                                  .init();

    let args = Args::parse();

    let inputs = complete_inputs(&args).unwrap_or_else(|e| {
                                           match e {
                                               ReadlineError::Interrupted | ReadlineError::Eof => {
                                                   eprintln!("\nExiting...");
                                               },
                                               e => eprintln!("Failed to read input: {e}"),
                                           }
                                           std::process::exit(1);
                                       });

    let config = PlotConfig { width: args.width,
                              height: args.height,
                              samples: args.samples,
                              grid: !args.no_grid,
                              legend: !args.no_legend,
                              ..PlotConfig::default() };

    let result = SampleRange::new(inputs.min, inputs.max).map_err(PlotError::from)
                                                         .and_then(|range| {
                                                             let request = PlotRequest { expression: inputs.expression,
                                                                                         range,
                                                                                         format: inputs.format,
                                                                                         output: inputs.output };
                                                             plot(&request, &config)
                                                         });

    match result {
        Ok(report) => {
            println!("\nFunction plotted successfully and saved as '{}'",
                     report.path.display());
        },
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        },
    }
}
