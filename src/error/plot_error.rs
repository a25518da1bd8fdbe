use std::path::PathBuf;

use crate::error::{EvalError, LexError, ParseError, RangeError};

#[derive(Debug, Clone, PartialEq, Eq)]
/// An error that makes the expression itself invalid.
///
/// Returned by [`crate::compile`], which chains tokenizing and parsing.
pub enum SyntaxError {
    /// The tokenizer rejected the input.
    Lex(LexError),
    /// The parser rejected the token sequence.
    Parse(ParseError),
}

impl SyntaxError {
    /// Returns the source position the error refers to.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::Lex(e) => e.position(),
            Self::Parse(e) => e.position(),
        }
    }
}

impl From<LexError> for SyntaxError {
    fn from(value: LexError) -> Self {
        Self::Lex(value)
    }
}

impl From<ParseError> for SyntaxError {
    fn from(value: ParseError) -> Self {
        Self::Parse(value)
    }
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lex(e) => write!(f, "{e}"),
            Self::Parse(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SyntaxError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Lex(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

#[derive(Debug)]
/// Represents every way a plot request can fail.
pub enum PlotError {
    /// The expression could not be tokenized or parsed.
    Syntax(SyntaxError),
    /// The sampling range or plot configuration is invalid.
    Range(RangeError),
    /// Not a single sample point could be evaluated.
    NoDefinedPoints {
        /// Number of sample points attempted.
        samples: usize,
        /// The error raised at the first sample point.
        first:   EvalError,
    },
    /// The renderer failed to produce the document.
    Render {
        /// Details about the failure.
        details: String,
    },
    /// Writing the output file failed.
    Io {
        /// The file being written.
        path:   PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

impl From<SyntaxError> for PlotError {
    fn from(value: SyntaxError) -> Self {
        Self::Syntax(value)
    }
}

impl From<LexError> for PlotError {
    fn from(value: LexError) -> Self {
        Self::Syntax(SyntaxError::Lex(value))
    }
}

impl From<ParseError> for PlotError {
    fn from(value: ParseError) -> Self {
        Self::Syntax(SyntaxError::Parse(value))
    }
}

impl From<RangeError> for PlotError {
    fn from(value: RangeError) -> Self {
        Self::Range(value)
    }
}

impl std::fmt::Display for PlotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Syntax(e) => write!(f, "{e}"),
            Self::Range(e) => write!(f, "{e}"),
            Self::NoDefinedPoints { samples, first } => write!(f,
                                                               "The function is undefined at all {samples} sample points (first failure: {first})."),
            Self::Render { details } => write!(f, "Failed to render plot: {details}."),
            Self::Io { path, source } => {
                write!(f, "Failed to write '{}': {source}.", path.display())
            },
        }
    }
}

impl std::error::Error for PlotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Syntax(e) => Some(e),
            Self::Range(e) => Some(e),
            Self::NoDefinedPoints { first, .. } => Some(first),
            Self::Render { .. } => None,
            Self::Io { source, .. } => Some(source),
        }
    }
}
