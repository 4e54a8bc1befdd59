//! Arena-based abstract syntax tree for JavaScript-like source.
//!
//! A [`Program`] owns every node in a flat arena and hands out [`NodeId`]
//! indices instead of references. Child links are indices, so there are no
//! parent/child back-links to keep consistent, and renaming an identifier
//! is an in-place update of one node's text field.

use respell_foundation::{Error, Result};

use crate::span::Span;

/// Index of a node in a [`Program`] arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Returns the raw arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node in the arena: its kind plus its source span.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    /// The type and children of this node.
    pub kind: NodeKind,
    /// Source location of this node.
    pub span: Span,
}

/// A parsed program: the node arena plus the top-level statement list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Program {
    /// All nodes, in allocation order.
    nodes: Vec<Node>,
    /// Top-level statements.
    pub body: Vec<NodeId>,
}

impl Program {
    /// Creates an empty program.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a node in the arena and returns its id.
    ///
    /// # Panics
    /// Panics if the arena exceeds `u32::MAX` nodes.
    pub fn alloc(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let id = u32::try_from(self.nodes.len()).expect("node arena overflow");
        self.nodes.push(Node { kind, span });
        NodeId(id)
    }

    /// Returns the node with the given id.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this program.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Returns a mutable reference to the node with the given id.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this program.
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Returns the number of nodes in the arena.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the arena is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the identifier text of the given node, or `None` if the
    /// node is not an identifier.
    #[must_use]
    pub fn ident_name(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::Ident { name } => Some(name),
            _ => None,
        }
    }

    /// Overwrites the identifier text of the given node.
    ///
    /// # Errors
    /// Returns an internal error if the node is not an identifier.
    pub fn set_ident_name(&mut self, id: NodeId, name: &str) -> Result<()> {
        match &mut self.node_mut(id).kind {
            NodeKind::Ident { name: current } => {
                name.clone_into(current);
                Ok(())
            }
            other => Err(Error::internal(format!(
                "expected identifier node, found {}",
                other.type_name()
            ))),
        }
    }
}

/// The type and children of an AST node.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    // ------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------
    /// `var a = 1, b;`: pairs of (identifier, optional initializer).
    VarDecl {
        /// Declarators in source order.
        declarators: Vec<(NodeId, Option<NodeId>)>,
    },
    /// `function f(a, b) { ... }` or `function (a, b) { ... }`.
    ///
    /// Used both as a declaration and as an expression; the position in
    /// the tree decides which one it is.
    Function {
        /// Optional function name (an `Ident` node).
        name: Option<NodeId>,
        /// Parameters in order (`Ident` nodes).
        params: Vec<NodeId>,
        /// Body statements.
        body: Vec<NodeId>,
    },
    /// `return;` or `return expr;`
    Return(Option<NodeId>),
    /// `if (cond) then else alt`
    If {
        /// Condition expression.
        cond: NodeId,
        /// Statement taken when the condition holds.
        then_branch: NodeId,
        /// Optional else statement.
        else_branch: Option<NodeId>,
    },
    /// `while (cond) body`
    While {
        /// Loop condition.
        cond: NodeId,
        /// Loop body statement.
        body: NodeId,
    },
    /// `for (init; test; update) body`
    For {
        /// Optional init (a `VarDecl` statement or an expression).
        init: Option<NodeId>,
        /// Optional loop condition.
        test: Option<NodeId>,
        /// Optional update expression.
        update: Option<NodeId>,
        /// Loop body statement.
        body: NodeId,
    },
    /// `{ ... }` in statement position.
    Block(Vec<NodeId>),
    /// A lone `;`.
    Empty,
    /// An expression used as a statement.
    ExprStmt(NodeId),

    // ------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------
    /// An identifier occurrence. The `name` field is the one piece of
    /// mutable state the renamer touches.
    Ident {
        /// Current identifier text.
        name: String,
    },
    /// Numeric literal.
    Number(f64),
    /// String literal (unescaped value).
    Str(String),
    /// Boolean literal.
    Bool(bool),
    /// `null`
    Null,
    /// `[a, b, c]`
    Array(Vec<NodeId>),
    /// Unary operator application like `!x` or `typeof x`.
    Unary {
        /// The operator.
        op: UnaryOp,
        /// The operand expression.
        operand: NodeId,
    },
    /// `++x`, `x++`, `--x`, `x--`
    Update {
        /// The operator.
        op: UpdateOp,
        /// True for prefix form.
        prefix: bool,
        /// The operand expression (an lvalue).
        operand: NodeId,
    },
    /// Binary operator application like `a + b`.
    Binary {
        /// The operator.
        op: BinaryOp,
        /// Left operand.
        lhs: NodeId,
        /// Right operand.
        rhs: NodeId,
    },
    /// Short-circuiting `&&` / `||`.
    Logical {
        /// The operator.
        op: LogicalOp,
        /// Left operand.
        lhs: NodeId,
        /// Right operand.
        rhs: NodeId,
    },
    /// `a = b` and compound forms.
    Assign {
        /// The operator.
        op: AssignOp,
        /// Assignment target (an lvalue).
        target: NodeId,
        /// Assigned value.
        value: NodeId,
    },
    /// `cond ? consequent : alternate`
    Conditional {
        /// Condition expression.
        cond: NodeId,
        /// Value when the condition holds.
        consequent: NodeId,
        /// Value otherwise.
        alternate: NodeId,
    },
    /// `callee(args...)`
    Call {
        /// Called expression.
        callee: NodeId,
        /// Arguments in order.
        args: Vec<NodeId>,
    },
    /// `new callee(args...)`
    New {
        /// Constructed expression.
        callee: NodeId,
        /// Arguments in order.
        args: Vec<NodeId>,
    },
    /// `a.b` or `a[b]`.
    ///
    /// For the non-computed form the property is an `Ident` node that is
    /// a name, not a variable reference; scope analysis must skip it.
    Member {
        /// Object expression.
        object: NodeId,
        /// Property: an `Ident` node (non-computed) or any expression.
        property: NodeId,
        /// True for the `a[b]` form.
        computed: bool,
    },
    /// Comma sequence `a, b, c`.
    Sequence(Vec<NodeId>),
}

impl NodeKind {
    /// A human-readable type name for this node.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::VarDecl { .. } => "var declaration",
            Self::Function { .. } => "function",
            Self::Return(_) => "return",
            Self::If { .. } => "if",
            Self::While { .. } => "while",
            Self::For { .. } => "for",
            Self::Block(_) => "block",
            Self::Empty => "empty statement",
            Self::ExprStmt(_) => "expression statement",
            Self::Ident { .. } => "identifier",
            Self::Number(_) => "number",
            Self::Str(_) => "string",
            Self::Bool(_) => "boolean",
            Self::Null => "null",
            Self::Array(_) => "array",
            Self::Unary { .. } => "unary expression",
            Self::Update { .. } => "update expression",
            Self::Binary { .. } => "binary expression",
            Self::Logical { .. } => "logical expression",
            Self::Assign { .. } => "assignment",
            Self::Conditional { .. } => "conditional expression",
            Self::Call { .. } => "call",
            Self::New { .. } => "new expression",
            Self::Member { .. } => "member expression",
            Self::Sequence(_) => "sequence",
        }
    }

    /// Returns true if this node is an identifier.
    #[must_use]
    pub const fn is_ident(&self) -> bool {
        matches!(self, Self::Ident { .. })
    }
}

/// Unary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    /// `!`
    Not,
    /// `-`
    Neg,
    /// `+`
    Plus,
    /// `~`
    BitNot,
    /// `typeof`
    Typeof,
    /// `void`
    Void,
}

impl UnaryOp {
    /// The operator's source text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Not => "!",
            Self::Neg => "-",
            Self::Plus => "+",
            Self::BitNot => "~",
            Self::Typeof => "typeof",
            Self::Void => "void",
        }
    }

    /// Returns true if the operator is a keyword and needs a space
    /// before an identifier operand.
    #[must_use]
    pub const fn is_keyword(self) -> bool {
        matches!(self, Self::Typeof | Self::Void)
    }
}

/// Update operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateOp {
    /// `++`
    Increment,
    /// `--`
    Decrement,
}

impl UpdateOp {
    /// The operator's source text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Increment => "++",
            Self::Decrement => "--",
        }
    }
}

/// Binary operators, from loosest to tightest binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    /// `|`
    BitOr,
    /// `^`
    BitXor,
    /// `&`
    BitAnd,
    /// `==`
    Eq,
    /// `!=`
    NotEq,
    /// `===`
    StrictEq,
    /// `!==`
    StrictNotEq,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    LtEq,
    /// `>=`
    GtEq,
    /// `<<`
    Shl,
    /// `>>`
    Shr,
    /// `>>>`
    UShr,
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Rem,
}

impl BinaryOp {
    /// The operator's source text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::BitAnd => "&",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::StrictEq => "===",
            Self::StrictNotEq => "!==",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::LtEq => "<=",
            Self::GtEq => ">=",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::UShr => ">>>",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
        }
    }

    /// Binding strength, higher binds tighter.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::BitOr => 6,
            Self::BitXor => 7,
            Self::BitAnd => 8,
            Self::Eq | Self::NotEq | Self::StrictEq | Self::StrictNotEq => 9,
            Self::Lt | Self::Gt | Self::LtEq | Self::GtEq => 10,
            Self::Shl | Self::Shr | Self::UShr => 11,
            Self::Add | Self::Sub => 12,
            Self::Mul | Self::Div | Self::Rem => 13,
        }
    }
}

/// Short-circuiting logical operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogicalOp {
    /// `||`
    Or,
    /// `&&`
    And,
}

impl LogicalOp {
    /// The operator's source text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Or => "||",
            Self::And => "&&",
        }
    }

    /// Binding strength, higher binds tighter.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Or => 4,
            Self::And => 5,
        }
    }
}

/// Assignment operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignOp {
    /// `=`
    Assign,
    /// `+=`
    AddAssign,
    /// `-=`
    SubAssign,
    /// `*=`
    MulAssign,
    /// `/=`
    DivAssign,
    /// `%=`
    RemAssign,
}

impl AssignOp {
    /// The operator's source text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assign => "=",
            Self::AddAssign => "+=",
            Self::SubAssign => "-=",
            Self::MulAssign => "*=",
            Self::DivAssign => "/=",
            Self::RemAssign => "%=",
        }
    }
}
