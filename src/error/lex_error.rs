#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while tokenizing an expression.
///
/// Positions are 0-based character offsets into the source string.
pub enum LexError {
    /// Found a character that does not belong to the expression grammar.
    UnexpectedCharacter {
        /// The offending character.
        character: char,
        /// Position of the character in the source.
        position:  usize,
    },
    /// Found a word that is neither `x`, a known function nor a known
    /// constant.
    UnknownIdentifier {
        /// The unrecognized word.
        name:     String,
        /// Position of the first character of the word.
        position: usize,
    },
    /// A numeric literal could not be represented as a finite `f64`.
    InvalidNumber {
        /// The literal as written.
        text:     String,
        /// Position of the first character of the literal.
        position: usize,
    },
}

impl LexError {
    /// Returns the source position the error refers to.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::UnexpectedCharacter { position, .. }
            | Self::UnknownIdentifier { position, .. }
            | Self::InvalidNumber { position, .. } => *position,
        }
    }
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedCharacter { character, position } => write!(f,
                                                                        "Error at position {position}: Unexpected character '{character}'."),
            Self::UnknownIdentifier { name, position } => write!(f,
                                                                 "Error at position {position}: Unknown identifier '{name}'. Expected 'x', a function (sin, cos, tan, exp, log) or a constant (pi, e)."),
            Self::InvalidNumber { text, position } => write!(f,
                                                             "Error at position {position}: Number '{text}' is not a finite value."),
        }
    }
}

impl std::error::Error for LexError {}
