use std::{
    ffi::OsString,
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
};

use clap::ValueEnum;
use tracing::debug;

use crate::error::PlotError;

/// File name used when none is given.
pub const DEFAULT_STEM: &str = "output";

/// The document formats a plot can be saved as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum OutputFormat {
    /// Scalable Vector Graphics.
    Svg,
    /// Portable Document Format.
    Pdf,
}

impl OutputFormat {
    /// The file extension for the format, without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Pdf => "pdf",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Picks the path a plot is written to without clobbering existing files.
///
/// An absent or empty name becomes [`DEFAULT_STEM`]. The format's extension is
/// appended unless the name already ends with it. If that file exists, `_1`,
/// `_2`, … is inserted before the extension until the name is free.
///
/// # Example
/// ```
/// use fnplot::plot::output::{OutputFormat, resolve_output_path};
///
/// let dir = std::env::temp_dir().join("fnplot-doc-resolve");
/// std::fs::create_dir_all(&dir).unwrap();
/// let _ = std::fs::remove_file(dir.join("curve.svg"));
///
/// assert_eq!(resolve_output_path(Some(&dir.join("curve")), OutputFormat::Svg),
///            dir.join("curve.svg"));
/// assert_eq!(resolve_output_path(None, OutputFormat::Pdf).file_name().unwrap(),
///            "output.pdf");
/// ```
#[must_use]
pub fn resolve_output_path(requested: Option<&Path>, format: OutputFormat) -> PathBuf {
    let requested = requested.filter(|path| !path.as_os_str().is_empty())
                             .unwrap_or_else(|| Path::new(DEFAULT_STEM));

    let has_extension = requested.extension()
                                 .is_some_and(|ext| ext.eq_ignore_ascii_case(format.extension()));
    let base = if has_extension {
        requested.with_extension("")
    } else {
        requested.to_path_buf()
    };

    let candidate = with_suffix(&base, None, format);
    if !candidate.exists() {
        return candidate;
    }

    let mut counter: u64 = 1;
    loop {
        let candidate = with_suffix(&base, Some(counter), format);
        if !candidate.exists() {
            debug!(path = %candidate.display(), "output file exists, using a numbered name");
            return candidate;
        }
        counter += 1;
    }
}

/// Builds `<base>[_<counter>].<extension>` without touching any dot already
/// in `base`.
fn with_suffix(base: &Path, counter: Option<u64>, format: OutputFormat) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    if let Some(counter) = counter {
        name.push(format!("_{counter}"));
    }
    name.push(".");
    name.push(format.extension());
    PathBuf::from(name)
}

/// Writes a rendered document to a new file at `path`.
///
/// The file is created exclusively: if something already exists at `path`,
/// nothing is written and the existing file is left untouched.
///
/// # Errors
/// Returns [`PlotError::Io`] if the file already exists or cannot be created
/// or written; an existing file gives [`std::io::ErrorKind::AlreadyExists`].
pub fn write_document(path: &Path, bytes: &[u8]) -> Result<(), PlotError> {
    let io_error = |source| PlotError::Io { path: path.to_path_buf(),
                                            source };
    OpenOptions::new().write(true)
                      .create_new(true)
                      .open(path)
                      .and_then(|mut file| file.write_all(bytes))
                      .map_err(io_error)?;
    debug!(path = %path.display(), bytes = bytes.len(), "wrote document");
    Ok(())
}
