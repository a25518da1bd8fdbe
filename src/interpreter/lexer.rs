use logos::Logos;

use crate::{
    ast::{Function, NamedConstant},
    error::LexError,
};

/// Represents a lexical token in an expression.
///
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// Words are matched against the closed vocabulary of the grammar: the
/// variable `x`, the functions and the named constants. Any other word is
/// lexed as [`Token::Identifier`] only so [`tokenize`] can reject it with its
/// name and position.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    /// Numeric literal tokens, such as `3`, `3.14`, `.5`, `2.` or `2.1e-10`.
    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?", parse_float)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", parse_float)]
    Number(f64),
    /// The variable `x`.
    #[token("x")]
    Variable,
    /// A built-in function name.
    #[token("sin", |_| Function::Sin)]
    #[token("cos", |_| Function::Cos)]
    #[token("tan", |_| Function::Tan)]
    #[token("exp", |_| Function::Exp)]
    #[token("log", |_| Function::Log)]
    Function(Function),
    /// A named constant, `pi` or `e`.
    #[token("pi", |_| NamedConstant::Pi)]
    #[token("e", |_| NamedConstant::E)]
    Constant(NamedConstant),
    /// Any other word. Never survives [`tokenize`].
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string(), priority = 1)]
    Identifier(String),
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `^`, also written `**`
    #[token("^")]
    #[token("**")]
    Caret,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// End of input. Appended by [`tokenize`], never matched in source.
    End,
}

impl Token {
    /// Returns `true` if the token can begin an operand.
    ///
    /// Used by the parser to recognize an operand written directly after
    /// another one, as in `2x`.
    #[must_use]
    pub const fn starts_operand(&self) -> bool {
        matches!(self,
                 Self::Number(_)
                 | Self::Variable
                 | Self::Function(_)
                 | Self::Constant(_)
                 | Self::LParen)
    }
}

/// A token together with its source text and position.
#[derive(Debug, PartialEq, Clone)]
pub struct Lexeme {
    /// The kind of token, with its parsed payload.
    pub token:    Token,
    /// The exact source text of the token.
    pub text:     String,
    /// 0-based character position of the token in the source.
    pub position: usize,
}

impl Lexeme {
    /// Describes the lexeme for error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self.token {
            Token::End => "end of input".to_string(),
            _ => format!("'{}'", self.text),
        }
    }
}

/// Converts an expression string into lexemes.
///
/// Whitespace is skipped. The returned sequence always ends with a
/// [`Token::End`] lexeme positioned one past the last character.
///
/// # Errors
/// - [`LexError::UnexpectedCharacter`] for characters outside the grammar.
/// - [`LexError::UnknownIdentifier`] for words other than `x`, `sin`, `cos`,
///   `tan`, `exp`, `log`, `pi` and `e`.
/// - [`LexError::InvalidNumber`] for literals that overflow `f64`.
///
/// # Example
/// ```
/// use fnplot::{
///     error::LexError,
///     interpreter::lexer::{Token, tokenize},
/// };
///
/// let lexemes = tokenize("x ** 2").unwrap();
/// let tokens: Vec<_> = lexemes.iter().map(|l| l.token.clone()).collect();
/// assert_eq!(tokens,
///            [Token::Variable, Token::Caret, Token::Number(2.0), Token::End]);
///
/// assert_eq!(tokenize("2 $ x"),
///            Err(LexError::UnexpectedCharacter { character: '$',
///                                                position:  2, }));
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Lexeme>, LexError> {
    let mut lexemes = Vec::new();

    for (result, span) in Token::lexer(source).spanned() {
        let text = &source[span.clone()];
        let position = char_position(source, span.start);
        match result {
            Ok(Token::Identifier(name)) => {
                return Err(LexError::UnknownIdentifier { name, position });
            },
            Ok(token) => lexemes.push(Lexeme { token,
                                               text: text.to_string(),
                                               position }),
            Err(()) => return Err(classify_failure(text, position)),
        }
    }

    lexemes.push(Lexeme { token:    Token::End,
                          text:     String::new(),
                          position: source.chars().count(), });
    Ok(lexemes)
}

/// Parses a floating-point literal from the current token slice.
///
/// # Returns
/// - `Some(f64)`: The parsed value if it is finite.
/// - `None`: If the slice overflows to infinity or fails to parse.
fn parse_float(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice()
       .parse::<f64>()
       .ok()
       .filter(|value| value.is_finite())
}

/// Converts a byte offset into a character offset.
fn char_position(source: &str, byte_offset: usize) -> usize {
    source[..byte_offset].chars().count()
}

/// Builds the error for a slice the lexer could not turn into a token.
///
/// A rejected numeric literal spans several characters and starts with a
/// digit or a dot; anything else is a single stray character.
fn classify_failure(text: &str, position: usize) -> LexError {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(first), Some(_)) if first.is_ascii_digit() || first == '.' => {
            LexError::InvalidNumber { text: text.to_string(),
                                      position }
        },
        (Some(character), _) => LexError::UnexpectedCharacter { character, position },
        (None, _) => LexError::UnexpectedCharacter { character: char::REPLACEMENT_CHARACTER,
                                                     position },
    }
}
