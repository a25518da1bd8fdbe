use std::fmt::{self, Write};

use crate::ast::{BinaryOperator, Expr, Function, NamedConstant, UnaryOperator};

/// Precedence of atoms: constants, `x` and function calls.
const ATOM: u8 = 5;

/// Magnitudes outside this window are written in scientific notation.
const PLAIN_RANGE: std::ops::Range<f64> = 1e-6..1e16;

impl Expr {
    /// Binding strength of the node when printed as text.
    ///
    /// Negative constants print with a leading `-`, so they bind like a unary
    /// negation.
    fn text_precedence(&self) -> u8 {
        match self {
            Self::Constant { value, .. } if value.0.is_sign_negative() => UnaryOperator::PRECEDENCE,
            Self::Constant { .. } | Self::Variable | Self::Call { .. } => ATOM,
            Self::UnaryOp { .. } => UnaryOperator::PRECEDENCE,
            Self::BinaryOp { op, .. } => op.precedence(),
        }
    }

    /// Binding strength of the node when typeset; fractions behave as atoms.
    fn latex_precedence(&self) -> u8 {
        match self {
            Self::BinaryOp { op: BinaryOperator::Div,
                             .. } => ATOM,
            _ => self.text_precedence(),
        }
    }

    /// Renders the expression as LaTeX math (without surrounding `$`).
    ///
    /// Division becomes `\frac`, multiplication `\cdot`, exponents are
    /// braced and `pi` becomes `\pi`.
    ///
    /// # Example
    /// ```
    /// use fnplot::compile;
    ///
    /// let expr = compile("sin(x^2)/(1+x^2)").unwrap();
    /// assert_eq!(expr.to_latex(),
    ///            r"\frac{\sin\left(x^{2}\right)}{1 + x^{2}}");
    /// ```
    #[must_use]
    pub fn to_latex(&self) -> String {
        let mut out = String::new();
        write_latex(&mut out, self);
        out
    }

    /// Renders the expression as inline SVG text markup for a typeset label.
    ///
    /// The result is the content of a `<text>` element: `x` and `e` are
    /// italic `<tspan>`s, exponents are raised `<tspan>`s with
    /// `baseline-shift="super"`, `pi` becomes `π`, multiplication `·` and
    /// subtraction a true minus sign `−`. Nothing else is wrapped, so the
    /// markup contains no whitespace between elements that a renderer would
    /// turn into spaces.
    ///
    /// # Example
    /// ```
    /// use fnplot::compile;
    ///
    /// let expr = compile("2*pi*x^2").unwrap();
    /// assert_eq!(expr.to_svg_math(),
    ///            r#"2 · π · <tspan font-style="italic">x</tspan><tspan baseline-shift="super" font-size="70%">2</tspan>"#);
    /// ```
    #[must_use]
    pub fn to_svg_math(&self) -> String {
        let mut out = String::new();
        write_svg_math(&mut out, self);
        out
    }
}

/// Formats a constant so the tokenizer reads back the same value.
fn format_number(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude == 0.0 || PLAIN_RANGE.contains(&magnitude) {
        format!("{value}")
    } else {
        format!("{value:e}")
    }
}

fn write_constant(f: &mut impl Write, value: f64, symbol: Option<NamedConstant>) -> fmt::Result {
    match symbol {
        Some(constant) => f.write_str(constant.name()),
        None => f.write_str(&format_number(value)),
    }
}

fn write_text_child(f: &mut fmt::Formatter<'_>, child: &Expr, parens: bool) -> fmt::Result {
    if parens {
        write!(f, "({child})")
    } else {
        write!(f, "{child}")
    }
}

/// Decides whether an operand of `op` needs parentheses to keep the tree
/// shape when re-parsed.
const fn needs_parens(op: BinaryOperator, child_precedence: u8, is_right: bool) -> bool {
    let precedence = op.precedence();
    if child_precedence != precedence {
        return child_precedence < precedence;
    }
    is_right != op.is_right_associative()
}

impl fmt::Display for Expr {
    /// Writes the normalized text form used for titles and legends.
    ///
    /// Parentheses are emitted only where precedence or associativity
    /// requires them, so `compile(&expr.to_string())` yields the same tree.
    ///
    /// # Example
    /// ```
    /// use fnplot::compile;
    ///
    /// let expr = compile("((x ** 2)) + (1/(x))").unwrap();
    /// assert_eq!(expr.to_string(), "x^2 + 1 / x");
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant { value, symbol } => write_constant(f, value.0, *symbol),
            Self::Variable => f.write_str("x"),
            Self::UnaryOp { op, expr } => {
                write!(f, "{op}")?;
                write_text_child(f, expr, expr.text_precedence() <= UnaryOperator::PRECEDENCE)
            },
            Self::BinaryOp { left, op, right } => {
                write_text_child(f, left, needs_parens(*op, left.text_precedence(), false))?;
                match op {
                    BinaryOperator::Pow => write!(f, "{op}")?,
                    _ => write!(f, " {op} ")?,
                }
                write_text_child(f, right, needs_parens(*op, right.text_precedence(), true))
            },
            Self::Call { function, argument } => write!(f, "{}({argument})", function.name()),
        }
    }
}

const fn latex_function(function: Function) -> &'static str {
    match function {
        Function::Sin => r"\sin",
        Function::Cos => r"\cos",
        Function::Tan => r"\tan",
        Function::Exp => r"\exp",
        Function::Log => r"\log",
    }
}

fn write_latex_child(out: &mut String, child: &Expr, parens: bool) {
    if parens {
        out.push_str(r"\left(");
        write_latex(out, child);
        out.push_str(r"\right)");
    } else {
        write_latex(out, child);
    }
}

fn write_latex(out: &mut String, expr: &Expr) {
    match expr {
        Expr::Constant { symbol: Some(NamedConstant::Pi),
                         .. } => out.push_str(r"\pi"),
        Expr::Constant { symbol: Some(constant),
                         .. } => out.push_str(constant.name()),
        Expr::Constant { value, .. } => {
            let text = format_number(value.0);
            match text.split_once('e') {
                Some((mantissa, exponent)) => {
                    let _ = write!(out, r"{mantissa} \times 10^{{{exponent}}}");
                },
                None => out.push_str(&text),
            }
        },
        Expr::Variable => out.push('x'),
        Expr::UnaryOp { op, expr } => {
            let _ = write!(out, "{op}");
            write_latex_child(out,
                              expr,
                              expr.latex_precedence() <= UnaryOperator::PRECEDENCE);
        },
        Expr::BinaryOp { left,
                         op: BinaryOperator::Div,
                         right, } => {
            out.push_str(r"\frac{");
            write_latex(out, left);
            out.push_str("}{");
            write_latex(out, right);
            out.push('}');
        },
        Expr::BinaryOp { left,
                         op: BinaryOperator::Pow,
                         right, } => {
            write_latex_child(out, left, left.text_precedence() < ATOM);
            out.push_str("^{");
            write_latex(out, right);
            out.push('}');
        },
        Expr::BinaryOp { left, op, right } => {
            write_latex_child(out, left, left.latex_precedence() < op.precedence());
            let symbol = match op {
                BinaryOperator::Mul => r" \cdot ",
                BinaryOperator::Sub => " - ",
                _ => " + ",
            };
            out.push_str(symbol);
            let right_precedence = right.latex_precedence();
            write_latex_child(out,
                              right,
                              right_precedence == UnaryOperator::PRECEDENCE
                              || needs_parens(*op, right_precedence, true));
        },
        Expr::Call { function, argument } => {
            out.push_str(latex_function(*function));
            write_latex_child(out, argument, true);
        },
    }
}

/// Raised `<tspan>` wrapping an exponent.
const SUPERSCRIPT: &str = r#"<tspan baseline-shift="super" font-size="70%">"#;

fn write_italic(out: &mut String, text: &str) {
    let _ = write!(out, r#"<tspan font-style="italic">{text}</tspan>"#);
}

fn write_svg_child(out: &mut String, child: &Expr, parens: bool) {
    if parens {
        out.push('(');
        write_svg_math(out, child);
        out.push(')');
    } else {
        write_svg_math(out, child);
    }
}

fn write_svg_math(out: &mut String, expr: &Expr) {
    match expr {
        Expr::Constant { symbol: Some(NamedConstant::Pi),
                         .. } => out.push('π'),
        Expr::Constant { symbol: Some(constant),
                         .. } => write_italic(out, constant.name()),
        Expr::Constant { value, .. } => {
            let text = format_number(value.0).replace('-', "−");
            match text.split_once('e') {
                Some((mantissa, exponent)) => {
                    let _ = write!(out, "{mantissa}×10{SUPERSCRIPT}{exponent}</tspan>");
                },
                None => out.push_str(&text),
            }
        },
        Expr::Variable => write_italic(out, "x"),
        Expr::UnaryOp { expr, .. } => {
            out.push('−');
            write_svg_child(out, expr, expr.text_precedence() <= UnaryOperator::PRECEDENCE);
        },
        Expr::BinaryOp { left,
                         op: BinaryOperator::Pow,
                         right, } => {
            write_svg_child(out, left, left.text_precedence() < ATOM);
            out.push_str(SUPERSCRIPT);
            write_svg_math(out, right);
            out.push_str("</tspan>");
        },
        Expr::BinaryOp { left, op, right } => {
            write_svg_child(out, left, needs_parens(*op, left.text_precedence(), false));
            let symbol = match op {
                BinaryOperator::Add => " + ",
                BinaryOperator::Sub => " − ",
                BinaryOperator::Mul => " · ",
                _ => " / ",
            };
            out.push_str(symbol);
            let right_precedence = right.text_precedence();
            write_svg_child(out,
                            right,
                            right_precedence == UnaryOperator::PRECEDENCE
                            || needs_parens(*op, right_precedence, true));
        },
        Expr::Call { function, argument } => {
            out.push_str(function.name());
            write_svg_child(out, argument, true);
        },
    }
}
