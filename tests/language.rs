use std::fs::{self};

use fnplot::{
    ast::{Function, NamedConstant},
    compile,
    error::{EvalError, LexError, ParseError, SyntaxError},
    interpreter::{
        lexer::{Token, tokenize},
        parser::core::MAX_DEPTH,
    },
    plot::sampler::{SampleRange, sample},
};
use walkdir::WalkDir;

const TOLERANCE: f64 = 1e-9;

#[test]
fn book_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("book/src").into_iter()
                                .filter_map(Result::ok)
                                .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (i, source) in extract_expressions(&content).into_iter().enumerate() {
            count += 1;
            if let Err(e) = plots(&source) {
                panic!("Example {} in {:?} failed:\n{}\nError: {}", i + 1, path, source, e);
            }
        }
    }

    assert!(count > 0, "No fnplot examples found in book/src");
}

/// Collects every line of the ```fnplot blocks; each line is one expression.
fn extract_expressions(content: &str) -> Vec<String> {
    let mut expressions = Vec::new();
    let mut inside = false;

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("```fnplot") {
            inside = true;
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            continue;
        }
        if inside && !trimmed.is_empty() {
            expressions.push(trimmed.to_string());
        }
    }

    expressions
}

/// Compiles an expression and checks it is defined somewhere on `[-10, 10]`.
fn plots(source: &str) -> Result<(), Box<dyn std::error::Error>> {
    let expr = compile(source)?;
    let samples = sample(&expr, SampleRange::new(-10.0, 10.0)?, 201)?;
    samples.require_defined()?;
    Ok(())
}

fn assert_value(src: &str, x: f64, expected: f64) {
    let expr = compile(src).unwrap_or_else(|e| panic!("'{src}' failed to compile: {e}"));
    let value = expr.evaluate(x)
                    .unwrap_or_else(|e| panic!("'{src}' failed at x = {x}: {e}"));
    assert!((value - expected).abs() <= TOLERANCE * expected.abs().max(1.0),
            "'{src}' at x = {x}: expected {expected}, got {value}");
}

fn assert_syntax_error(src: &str) -> SyntaxError {
    match compile(src) {
        Ok(expr) => panic!("'{src}' compiled to {expr:?} but was expected to fail"),
        Err(e) => e,
    }
}

fn assert_eval_error(src: &str, x: f64) -> EvalError {
    let expr = compile(src).unwrap_or_else(|e| panic!("'{src}' failed to compile: {e}"));
    match expr.evaluate(x) {
        Ok(value) => panic!("'{src}' evaluated to {value} at x = {x} but was expected to fail"),
        Err(e) => e,
    }
}

#[test]
fn basic_arithmetic() {
    assert_value("1 + 2", 0.0, 3.0);
    assert_value("7 * 9", 0.0, 63.0);
    assert_value("8 - 5", 0.0, 3.0);
    assert_value("10 / 4", 0.0, 2.5);
    assert_value("x^2", 3.0, 9.0);
    assert_value("x^2", -2.0, 4.0);
    assert_value("x ** 3", 2.0, 8.0);
}

#[test]
fn precedence_and_associativity() {
    assert_value("2 + 3 * 4", 0.0, 14.0);
    assert_value("(2 + 3) * 4", 0.0, 20.0);
    assert_value("2 ^ 3 ^ 2", 0.0, 512.0);
    assert_value("100 / 10 / 5", 0.0, 2.0);
    assert_value("10 - 4 - 3", 0.0, 3.0);
    assert_value("2 * 3 ^ 2", 0.0, 18.0);
}

#[test]
fn unary_minus_binds_tighter_than_power() {
    assert_value("-x^2", 3.0, 9.0);
    assert_value("-(x^2)", 3.0, -9.0);
    assert_value("2^-1", 0.0, 0.5);
    assert_value("--x", 4.0, 4.0);
    assert_value("+x", 4.0, 4.0);
    assert_value("3 - -x", 1.0, 4.0);
    assert_value("exp(-(x^2))", 2.0, (-4.0_f64).exp());
    assert_value("exp(-x^2)", 2.0, 4.0_f64.exp());
}

#[test]
fn numeric_literals() {
    assert_value(".5 + 2.", 0.0, 2.5);
    assert_value("1e-3 * 1000", 0.0, 1.0);
    assert_value("6.02E23 / 1e23", 0.0, 6.02);
}

#[test]
fn functions_and_constants() {
    assert_value("sin(x)", 0.0, 0.0);
    assert_value("sin(x)", std::f64::consts::FRAC_PI_2, 1.0);
    assert_value("cos(pi)", 0.0, -1.0);
    assert_value("tan(pi / 4)", 0.0, 1.0);
    assert_value("exp(1)", 0.0, std::f64::consts::E);
    assert_value("log(e)", 0.0, 1.0);
    assert_value("log(exp(x))", 2.5, 2.5);
    assert_value("sin(x)^2 + cos(x)^2", 1.234, 1.0);
}

#[test]
fn whitespace_is_ignored() {
    assert_value("  x\t*\n2  ", 5.0, 10.0);
}

#[test]
fn single_letter_words_are_not_identifiers() {
    let tokens = |src: &str| -> Vec<Token> {
        tokenize(src).unwrap_or_else(|e| panic!("'{src}' failed to tokenize: {e}"))
                     .into_iter()
                     .map(|lexeme| lexeme.token)
                     .collect()
    };

    assert_eq!(tokens("x"), [Token::Variable, Token::End]);
    assert_eq!(tokens("e"), [Token::Constant(NamedConstant::E), Token::End]);
    assert_eq!(tokens("exp"), [Token::Function(Function::Exp), Token::End]);
    assert_eq!(tokens("e^x"),
               [Token::Constant(NamedConstant::E), Token::Caret, Token::Variable, Token::End]);

    for word in ["xx", "ex", "x2", "pie"] {
        assert_eq!(assert_syntax_error(word),
                   SyntaxError::Lex(LexError::UnknownIdentifier { name:     word.to_string(),
                                                                  position: 0, }));
    }
    assert_eq!(assert_syntax_error("2e"),
               SyntaxError::Parse(ParseError::ImplicitMultiplication { token:    "e".to_string(),
                                                                       position: 1, }));
    assert_value("1.e3", 0.0, 1000.0);
}

#[test]
fn unexpected_character_reports_position() {
    assert_eq!(assert_syntax_error("2 $ x"),
               SyntaxError::Lex(LexError::UnexpectedCharacter { character: '$',
                                                                position:  2, }));
}

#[test]
fn unknown_identifiers_are_rejected() {
    assert_eq!(assert_syntax_error("y + 1"),
               SyntaxError::Lex(LexError::UnknownIdentifier { name:     "y".to_string(),
                                                              position: 0, }));
    assert_eq!(assert_syntax_error("sqrt(x)"),
               SyntaxError::Lex(LexError::UnknownIdentifier { name:     "sqrt".to_string(),
                                                              position: 0, }));
    assert!(matches!(assert_syntax_error("__import__(x)"),
                     SyntaxError::Lex(LexError::UnknownIdentifier { .. })));
}

#[test]
fn overflowing_literal_is_rejected() {
    assert_eq!(assert_syntax_error("x + 1e999"),
               SyntaxError::Lex(LexError::InvalidNumber { text:     "1e999".to_string(),
                                                          position: 4, }));
}

#[test]
fn missing_closing_paren_is_error() {
    assert_eq!(assert_syntax_error("sin(x"),
               SyntaxError::Parse(ParseError::ExpectedClosingParen { position: 5 }));
    assert!(matches!(assert_syntax_error("(x + 1"),
                     SyntaxError::Parse(ParseError::ExpectedClosingParen { .. })));
}

#[test]
fn function_without_parens_is_error() {
    assert!(matches!(assert_syntax_error("sin x"),
                     SyntaxError::Parse(ParseError::ExpectedOpenParen { position: 4, .. })));
}

#[test]
fn trailing_input_is_error() {
    let error = assert_syntax_error("x + 1)");
    assert!(matches!(error,
                     SyntaxError::Parse(ParseError::UnexpectedTrailingInput { position: 5, .. })));
    assert!(error.to_string().contains("unexpected trailing input"));
}

#[test]
fn implicit_multiplication_is_error() {
    for src in ["2x", "2 x", "x(x + 1)", "2 pi", "(x)(x)", "x sin(x)"] {
        assert!(matches!(assert_syntax_error(src),
                         SyntaxError::Parse(ParseError::ImplicitMultiplication { .. })),
                "'{src}' should be rejected as implicit multiplication");
    }
}

#[test]
fn incomplete_input_is_error() {
    assert_eq!(assert_syntax_error(""),
               SyntaxError::Parse(ParseError::UnexpectedEndOfInput { position: 0 }));
    assert_eq!(assert_syntax_error("x +"),
               SyntaxError::Parse(ParseError::UnexpectedEndOfInput { position: 3 }));
    assert!(matches!(assert_syntax_error("* x"),
                     SyntaxError::Parse(ParseError::UnexpectedToken { position: 0, .. })));
    assert!(matches!(assert_syntax_error("()"),
                     SyntaxError::Parse(ParseError::UnexpectedToken { position: 1, .. })));
}

#[test]
fn nesting_is_limited() {
    let depth = MAX_DEPTH - 1;
    let groups = format!("{}x{}", "(".repeat(depth), ")".repeat(depth));
    assert_value(&groups, 2.0, 2.0);

    let deep = format!("{}x{}", "(".repeat(3000), ")".repeat(3000));
    assert_eq!(assert_syntax_error(&deep),
               SyntaxError::Parse(ParseError::TooDeeplyNested { limit:    MAX_DEPTH,
                                                                position: MAX_DEPTH, }));

    let signs = format!("{}x", "-".repeat(50_000));
    assert!(matches!(assert_syntax_error(&signs),
                     SyntaxError::Parse(ParseError::TooDeeplyNested { .. })));

    let chain = vec!["x"; 50_000].join(" + ");
    let error = assert_syntax_error(&chain);
    assert!(matches!(error, SyntaxError::Parse(ParseError::TooDeeplyNested { .. })));
    assert!(error.to_string().contains("nested more than 256 levels"));

    let powers = format!("{}x", "2^".repeat(1000));
    assert!(matches!(assert_syntax_error(&powers),
                     SyntaxError::Parse(ParseError::TooDeeplyNested { .. })));

    let short = vec!["x"; 200].join(" + ");
    assert_value(&short, 1.0, 200.0);
}

#[test]
fn division_by_zero_is_error() {
    assert_eq!(assert_eval_error("1/x", 0.0),
               EvalError::DivisionByZero { at: 0.0 });
    assert_eq!(assert_eval_error("1/(x - x)", 3.0),
               EvalError::DivisionByZero { at: 3.0 });
    assert!(assert_eval_error("1/x", 0.0).to_string().contains("division by zero"));
}

#[test]
fn domain_errors() {
    let error = assert_eval_error("log(x)", -1.0);
    assert!(matches!(error, EvalError::Domain { at, .. } if at == -1.0));
    assert!(error.to_string().contains("domain"));
    assert!(matches!(assert_eval_error("log(x)", 0.0), EvalError::Domain { .. }));
    assert!(matches!(assert_eval_error("x^0.5", -4.0), EvalError::Domain { .. }));
    assert_value("x^3", -2.0, -8.0);
}

#[test]
fn non_finite_results_are_errors() {
    let error = assert_eval_error("exp(x)", 1000.0);
    assert!(matches!(error, EvalError::NonFinite { operation: "exp", .. }));
    assert!(error.to_string().contains("non-finite result"));
    assert!(matches!(assert_eval_error("0^-1", 0.0), EvalError::NonFinite { .. }));
    assert!(matches!(assert_eval_error("x * 1e308 * 10", 1.0), EvalError::NonFinite { .. }));
}

#[test]
fn example_expressions_work() {
    let contents = fs::read_to_string("tests/expressions.txt").expect("missing file");
    for line in contents.lines().filter(|line| !line.trim().is_empty()) {
        if let Err(e) = plots(line) {
            panic!("Expression '{line}' failed: {e}");
        }
    }
}
