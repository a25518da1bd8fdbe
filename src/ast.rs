use ordered_float::OrderedFloat;

/// Normalized text, LaTeX and SVG math renderings of expression trees.
///
/// The text form is guaranteed to re-parse into an equivalent tree; the SVG
/// math form is what the plot title and legend show, and the LaTeX form is
/// embedded in the output document for typesetting.
pub mod notation;

/// An abstract syntax tree (AST) node representing a single-variable
/// mathematical expression.
///
/// Trees are built once by the parser and never mutated afterwards, so a tree
/// can be evaluated by shared reference from any number of threads. Equality
/// and hashing are structural; constants compare through [`OrderedFloat`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    /// A finite numeric constant.
    Constant {
        /// The value, resolved at parse time.
        value:  OrderedFloat<f64>,
        /// The named constant this value came from, kept for display.
        symbol: Option<NamedConstant>,
    },
    /// The variable `x`.
    Variable,
    /// A unary operation (e.g. negation).
    UnaryOp {
        /// The unary operator to apply.
        op:   UnaryOperator,
        /// The operand expression.
        expr: Box<Self>,
    },
    /// A binary operation (addition, subtraction, etc.).
    BinaryOp {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
    },
    /// Call of a built-in function (e.g. `sin(x)`).
    Call {
        /// The function being called.
        function: Function,
        /// The single argument.
        argument: Box<Self>,
    },
}

impl Expr {
    /// Creates a numeric constant node.
    ///
    /// ## Example
    /// ```
    /// use fnplot::ast::Expr;
    ///
    /// let two = Expr::number(2.0);
    /// assert_eq!(two.to_string(), "2");
    /// ```
    #[must_use]
    pub const fn number(value: f64) -> Self {
        Self::Constant { value:  OrderedFloat(value),
                         symbol: None, }
    }

    /// Creates a node for a named constant, resolving its value.
    #[must_use]
    pub const fn named(constant: NamedConstant) -> Self {
        Self::Constant { value:  OrderedFloat(constant.value()),
                         symbol: Some(constant), }
    }

    /// Counts the nodes in the tree.
    ///
    /// Evaluation cost at a single point is proportional to this number.
    #[must_use]
    pub fn node_count(&self) -> usize {
        match self {
            Self::Constant { .. } | Self::Variable => 1,
            Self::UnaryOp { expr, .. } => 1 + expr.node_count(),
            Self::BinaryOp { left, right, .. } => 1 + left.node_count() + right.node_count(),
            Self::Call { argument, .. } => 1 + argument.node_count(),
        }
    }

    /// Number of nodes on the longest path from the root to a leaf.
    ///
    /// Evaluating or printing the tree recurses this deep.
    ///
    /// # Example
    /// ```
    /// use fnplot::compile;
    ///
    /// assert_eq!(compile("x").unwrap().depth(), 1);
    /// assert_eq!(compile("sin(x) + 1").unwrap().depth(), 3);
    /// ```
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Constant { .. } | Self::Variable => 1,
            Self::UnaryOp { expr, .. } => 1 + expr.depth(),
            Self::BinaryOp { left, right, .. } => 1 + left.depth().max(right.depth()),
            Self::Call { argument, .. } => 1 + argument.depth(),
        }
    }
}

/// Named mathematical constants accepted in expressions.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum NamedConstant {
    /// `pi`, the ratio of a circle's circumference to its diameter.
    Pi,
    /// `e`, Euler's number.
    E,
}

impl NamedConstant {
    /// Returns the numeric value of the constant.
    #[must_use]
    pub const fn value(self) -> f64 {
        match self {
            Self::Pi => std::f64::consts::PI,
            Self::E => std::f64::consts::E,
        }
    }

    /// Returns the name used in source text.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pi => "pi",
            Self::E => "e",
        }
    }
}

/// The closed set of functions an expression may call.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Function {
    /// Sine, argument in radians.
    Sin,
    /// Cosine, argument in radians.
    Cos,
    /// Tangent, argument in radians.
    Tan,
    /// Natural exponential.
    Exp,
    /// Natural logarithm.
    Log,
}

impl Function {
    /// All callable functions, in the order they are documented.
    pub const ALL: [Self; 5] = [Self::Sin, Self::Cos, Self::Tan, Self::Exp, Self::Log];

    /// Returns the name used in source text.
    ///
    /// ## Example
    /// ```
    /// use fnplot::ast::Function;
    ///
    /// let names: Vec<_> = Function::ALL.iter().map(|f| f.name()).collect();
    /// assert_eq!(names, ["sin", "cos", "tan", "exp", "log"]);
    /// ```
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Exp => "exp",
            Self::Log => "log",
        }
    }
}

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Exponentiation (`^` or `**`)
    Pow,
}

impl BinaryOperator {
    /// Binding strength of the operator; higher binds tighter.
    ///
    /// Unary operators sit above every binary operator.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Sub => 1,
            Self::Mul | Self::Div => 2,
            Self::Pow => 3,
        }
    }

    /// Returns `true` for operators that group from the right (`^`).
    #[must_use]
    pub const fn is_right_associative(self) -> bool {
        matches!(self, Self::Pow)
    }
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    /// Arithmetic negation (e.g. `-x`).
    Negate,
}

impl UnaryOperator {
    /// Binding strength of unary operators, above every binary operator.
    pub const PRECEDENCE: u8 = 4;
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "^",
        };
        write!(f, "{operator}")
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Negate => write!(f, "-"),
        }
    }
}
