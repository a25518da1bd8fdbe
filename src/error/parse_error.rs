#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while parsing a token sequence.
///
/// Every variant carries the 0-based character position of the token that
/// triggered it, so the message can point at the offending spot.
pub enum ParseError {
    /// Found a token where an operand was expected.
    UnexpectedToken {
        /// The token encountered, as written in the source.
        token:    String,
        /// Position of the token.
        position: usize,
    },
    /// Reached the end of input where an operand was required.
    UnexpectedEndOfInput {
        /// Position of the end of input.
        position: usize,
    },
    /// A function name was not followed by `(`.
    ExpectedOpenParen {
        /// The function name.
        function: String,
        /// Position of the token found instead of `(`.
        position: usize,
    },
    /// A closing parenthesis `)` was expected but not found.
    ExpectedClosingParen {
        /// Position of the token found instead of `)`.
        position: usize,
    },
    /// An operand directly followed another operand, as in `2x`.
    ImplicitMultiplication {
        /// The token that started the second operand.
        token:    String,
        /// Position of that token.
        position: usize,
    },
    /// The expression nests deeper than the parser accepts.
    TooDeeplyNested {
        /// The deepest nesting allowed.
        limit:    usize,
        /// Position of the token that crossed the limit.
        position: usize,
    },
    /// Found extra tokens after a complete expression.
    UnexpectedTrailingInput {
        /// The first extra token.
        token:    String,
        /// Position of that token.
        position: usize,
    },
}

impl ParseError {
    /// Returns the source position the error refers to.
    ///
    /// # Example
    /// ```
    /// use fnplot::error::ParseError;
    ///
    /// let err = ParseError::ExpectedClosingParen { position: 5 };
    /// assert_eq!(err.position(), 5);
    /// ```
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::UnexpectedToken { position, .. }
            | Self::UnexpectedEndOfInput { position }
            | Self::ExpectedOpenParen { position, .. }
            | Self::ExpectedClosingParen { position }
            | Self::ImplicitMultiplication { position, .. }
            | Self::TooDeeplyNested { position, .. }
            | Self::UnexpectedTrailingInput { position, .. } => *position,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { token, position } => {
                write!(f, "Error at position {position}: Unexpected token: {token}.")
            },

            Self::UnexpectedEndOfInput { position } => {
                write!(f, "Error at position {position}: Unexpected end of input.")
            },

            Self::ExpectedOpenParen { function, position } => write!(f,
                                                                     "Error at position {position}: Expected '(' after function '{function}'. Example: {function}(x)"),

            Self::ExpectedClosingParen { position } => write!(f,
                                                              "Error at position {position}: Expected closing parenthesis ')' but none found."),

            Self::ImplicitMultiplication { token, position } => write!(f,
                                                                       "Error at position {position}: Missing operator before '{token}'. Implicit multiplication is not supported, write '*' explicitly."),

            Self::TooDeeplyNested { limit, position } => write!(f,
                                                                "Error at position {position}: Expression is nested more than {limit} levels deep."),

            Self::UnexpectedTrailingInput { token, position } => write!(f,
                                                                        "Error at position {position}: unexpected trailing input: {token}"),
        }
    }
}

impl std::error::Error for ParseError {}
