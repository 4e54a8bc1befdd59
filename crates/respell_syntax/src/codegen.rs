//! Compact code generator.
//!
//! Regenerates source text from a [`Program`] in a fixed compact format:
//! no whitespace beyond what the grammar requires, double-quoted string
//! literals, and statement separators omitted where a following `}` or the
//! end of input makes them unnecessary. The output is designed to re-parse
//! to the same tree, not to preserve the input's formatting.

use std::fmt::Write;

use crate::ast::{Node, NodeId, NodeKind, Program, UnaryOp};

/// Generates compact source text for the whole program.
#[must_use]
pub fn generate(program: &Program) -> String {
    let mut generator = Generator::new(program);
    generator.statement_list(&program.body);
    generator.out
}

/// Code generator state.
struct Generator<'p> {
    program: &'p Program,
    out: String,
}

impl<'p> Generator<'p> {
    fn new(program: &'p Program) -> Self {
        Self {
            program,
            out: String::new(),
        }
    }

    fn node(&self, id: NodeId) -> &'p Node {
        self.program.node(id)
    }

    // ------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------

    /// Emits a statement list, separating statements with `;` only where
    /// the previous statement does not already end one or close a block.
    fn statement_list(&mut self, stmts: &[NodeId]) {
        for (i, &stmt) in stmts.iter().enumerate() {
            self.statement(stmt);
            if i + 1 < stmts.len() && !matches!(self.out.chars().last(), Some(';' | '}')) {
                self.out.push(';');
            }
        }
    }

    fn statement(&mut self, id: NodeId) {
        match &self.node(id).kind {
            NodeKind::VarDecl { declarators } => self.var_decl(declarators),
            NodeKind::Function { name, params, body } => {
                self.function(name.as_ref().copied(), params, body);
            }
            NodeKind::Return(value) => {
                self.out.push_str("return");
                if let Some(value) = value {
                    let mark = self.out.len();
                    self.expression(*value, 1);
                    self.space_if_word(mark);
                }
            }
            NodeKind::If {
                cond,
                then_branch,
                else_branch,
            } => self.if_statement(*cond, *then_branch, *else_branch),
            NodeKind::While { cond, body } => {
                self.out.push_str("while(");
                self.expression(*cond, 1);
                self.out.push(')');
                self.nested_statement(*body);
            }
            NodeKind::For {
                init,
                test,
                update,
                body,
            } => {
                self.out.push_str("for(");
                if let Some(init) = init {
                    match &self.node(*init).kind {
                        NodeKind::ExprStmt(expr) => self.expression(*expr, 1),
                        _ => self.statement(*init),
                    }
                }
                self.out.push(';');
                if let Some(test) = test {
                    self.expression(*test, 1);
                }
                self.out.push(';');
                if let Some(update) = update {
                    self.expression(*update, 1);
                }
                self.out.push(')');
                self.nested_statement(*body);
            }
            NodeKind::Block(body) => {
                self.out.push('{');
                self.statement_list(body);
                self.out.push('}');
            }
            NodeKind::Empty => self.out.push(';'),
            NodeKind::ExprStmt(expr) => {
                // A leading `function` keyword would re-parse as a
                // declaration, so the whole expression gets wrapped.
                if self.starts_with_function(*expr) {
                    self.out.push('(');
                    self.expression(*expr, 1);
                    self.out.push(')');
                } else {
                    self.expression(*expr, 1);
                }
            }
            _ => {
                // Expression node in statement position (parser never
                // produces this shape).
                self.expression(id, 1);
            }
        }
    }

    /// Emits a statement as a loop or branch body.
    ///
    /// An empty body still needs its `;` so the loop does not swallow
    /// the following statement.
    fn nested_statement(&mut self, body: NodeId) {
        let mark = self.out.len();
        self.statement(body);
        if self.out.len() == mark {
            self.out.push(';');
        }
    }

    fn var_decl(&mut self, declarators: &[(NodeId, Option<NodeId>)]) {
        self.out.push_str("var ");
        for (i, (name, init)) in declarators.iter().enumerate() {
            if i > 0 {
                self.out.push(',');
            }
            self.expression(*name, 1);
            if let Some(init) = init {
                self.out.push('=');
                self.expression(*init, 2);
            }
        }
    }

    fn function(&mut self, name: Option<NodeId>, params: &[NodeId], body: &[NodeId]) {
        self.out.push_str("function");
        if let Some(name) = name {
            self.out.push(' ');
            self.expression(name, 1);
        }
        self.out.push('(');
        for (i, &param) in params.iter().enumerate() {
            if i > 0 {
                self.out.push(',');
            }
            self.expression(param, 1);
        }
        self.out.push_str("){");
        self.statement_list(body);
        self.out.push('}');
    }

    fn if_statement(&mut self, cond: NodeId, then_branch: NodeId, else_branch: Option<NodeId>) {
        self.out.push_str("if(");
        self.expression(cond, 1);
        self.out.push(')');

        if let Some(else_branch) = else_branch {
            // Brace the then branch unless it already is a block, so the
            // else cannot re-attach to a nested if.
            if matches!(self.node(then_branch).kind, NodeKind::Block(_)) {
                self.statement(then_branch);
            } else {
                self.out.push('{');
                self.statement(then_branch);
                self.out.push('}');
            }
            self.out.push_str("else");
            let mark = self.out.len();
            self.nested_statement(else_branch);
            self.space_if_word(mark);
        } else {
            self.nested_statement(then_branch);
        }
    }

    // ------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------

    /// Emits an expression, parenthesizing it when its own binding
    /// strength is below what the context requires.
    fn expression(&mut self, id: NodeId, min_precedence: u8) {
        if precedence(&self.node(id).kind) < min_precedence {
            self.out.push('(');
            self.expression_inner(id);
            self.out.push(')');
        } else {
            self.expression_inner(id);
        }
    }

    #[allow(clippy::too_many_lines)]
    fn expression_inner(&mut self, id: NodeId) {
        match &self.node(id).kind {
            NodeKind::Ident { name } => self.out.push_str(name),
            NodeKind::Number(n) => self.number(*n),
            NodeKind::Str(s) => self.string(s),
            NodeKind::Bool(true) => self.out.push_str("true"),
            NodeKind::Bool(false) => self.out.push_str("false"),
            NodeKind::Null => self.out.push_str("null"),
            NodeKind::Array(elements) => {
                self.out.push('[');
                for (i, &element) in elements.iter().enumerate() {
                    if i > 0 {
                        self.out.push(',');
                    }
                    self.expression(element, 2);
                }
                self.out.push(']');
            }
            NodeKind::Unary { op, operand } => {
                self.out.push_str(op.as_str());
                let mark = self.out.len();
                self.expression(*operand, 15);
                if op.is_keyword() {
                    self.space_if_word(mark);
                } else {
                    self.space_if_sign_clash(mark, *op);
                }
            }
            NodeKind::Update { op, prefix, operand } => {
                if *prefix {
                    self.out.push_str(op.as_str());
                    self.expression(*operand, 16);
                } else {
                    self.expression(*operand, 16);
                    self.out.push_str(op.as_str());
                }
            }
            NodeKind::Binary { op, lhs, rhs } => {
                let p = op.precedence();
                self.expression(*lhs, p);
                self.out.push_str(op.as_str());
                let mark = self.out.len();
                self.expression(*rhs, p + 1);
                // `a- -b` must not fuse into `a--b`
                if matches!(
                    op,
                    crate::ast::BinaryOp::Add | crate::ast::BinaryOp::Sub
                ) && self.out.as_bytes().get(mark)
                    == Some(&op.as_str().as_bytes()[0])
                {
                    self.out.insert(mark, ' ');
                }
            }
            NodeKind::Logical { op, lhs, rhs } => {
                let p = op.precedence();
                self.expression(*lhs, p);
                self.out.push_str(op.as_str());
                self.expression(*rhs, p + 1);
            }
            NodeKind::Assign { op, target, value } => {
                self.expression(*target, 17);
                self.out.push_str(op.as_str());
                self.expression(*value, 2);
            }
            NodeKind::Conditional {
                cond,
                consequent,
                alternate,
            } => {
                self.expression(*cond, 4);
                self.out.push('?');
                self.expression(*consequent, 2);
                self.out.push(':');
                self.expression(*alternate, 2);
            }
            NodeKind::Call { callee, args } => {
                // A `new` callee without arguments would absorb this
                // argument list, so it must keep its own parens; see
                // `new_expression` which always prints them.
                self.expression(*callee, 17);
                self.arguments(args);
            }
            NodeKind::New { callee, args } => self.new_expression(*callee, args),
            NodeKind::Member {
                object,
                property,
                computed,
            } => {
                // `1.x` is a lexical error; the literal needs parens.
                if matches!(self.node(*object).kind, NodeKind::Number(_)) {
                    self.out.push('(');
                    self.expression_inner(*object);
                    self.out.push(')');
                } else {
                    self.expression(*object, 17);
                }
                if *computed {
                    self.out.push('[');
                    self.expression(*property, 1);
                    self.out.push(']');
                } else {
                    self.out.push('.');
                    self.expression(*property, 1);
                }
            }
            NodeKind::Sequence(elements) => {
                for (i, &element) in elements.iter().enumerate() {
                    if i > 0 {
                        self.out.push(',');
                    }
                    self.expression(element, 2);
                }
            }
            NodeKind::Function { name, params, body } => {
                self.function(name.as_ref().copied(), params, body);
            }
            _ => {
                // Statement node in expression position; the parser
                // never produces this shape.
                debug_assert!(false, "statement in expression position");
            }
        }
    }

    /// Emits `new callee(args)`, always printing the argument parens so
    /// a surrounding call chain stays unambiguous.
    fn new_expression(&mut self, callee: NodeId, args: &[NodeId]) {
        self.out.push_str("new");
        let mark = self.out.len();
        if self.callee_contains_call(callee) {
            self.out.push('(');
            self.expression(callee, 1);
            self.out.push(')');
        } else {
            self.expression(callee, 17);
        }
        self.space_if_word(mark);
        self.arguments(args);
    }

    fn arguments(&mut self, args: &[NodeId]) {
        self.out.push('(');
        for (i, &arg) in args.iter().enumerate() {
            if i > 0 {
                self.out.push(',');
            }
            self.expression(arg, 2);
        }
        self.out.push(')');
    }

    /// True if a call appears along the callee's member spine, which
    /// would bind the `new` argument list to the wrong expression.
    fn callee_contains_call(&self, id: NodeId) -> bool {
        match &self.node(id).kind {
            NodeKind::Call { .. } => true,
            NodeKind::Member { object, .. } => self.callee_contains_call(*object),
            _ => false,
        }
    }

    /// True if the expression's leftmost token is the `function` keyword.
    fn starts_with_function(&self, id: NodeId) -> bool {
        match &self.node(id).kind {
            NodeKind::Function { .. } => true,
            NodeKind::Call { callee, .. } => self.starts_with_function(*callee),
            NodeKind::Member { object, .. } => self.starts_with_function(*object),
            NodeKind::Binary { lhs, .. } | NodeKind::Logical { lhs, .. } => {
                self.starts_with_function(*lhs)
            }
            NodeKind::Assign { target, .. } => self.starts_with_function(*target),
            NodeKind::Conditional { cond, .. } => self.starts_with_function(*cond),
            NodeKind::Sequence(elements) => elements
                .first()
                .is_some_and(|&first| self.starts_with_function(first)),
            NodeKind::Update {
                prefix: false,
                operand,
                ..
            } => self.starts_with_function(*operand),
            _ => false,
        }
    }

    // ------------------------------------------------------------------
    // Tokens
    // ------------------------------------------------------------------

    /// Inserts a space at `mark` if the text emitted there could fuse
    /// with the keyword before it.
    fn space_if_word(&mut self, mark: usize) {
        if let Some(&b) = self.out.as_bytes().get(mark) {
            if b.is_ascii_alphanumeric() || b == b'_' || b == b'$' || b == b'.' {
                self.out.insert(mark, ' ');
            }
        }
    }

    /// Inserts a space at `mark` if a sign operator would fuse with a
    /// same-signed operand (`- -a`, `+ +a`).
    fn space_if_sign_clash(&mut self, mark: usize, op: UnaryOp) {
        let sign = match op {
            UnaryOp::Neg => b'-',
            UnaryOp::Plus => b'+',
            _ => return,
        };
        if self.out.as_bytes().get(mark) == Some(&sign) {
            self.out.insert(mark, ' ');
        }
    }

    fn number(&mut self, n: f64) {
        // An overflowing literal like `1e999` lexes to infinity.
        if n.is_infinite() {
            self.out
                .push_str(if n > 0.0 { "1e400" } else { "-1e400" });
            return;
        }
        #[allow(clippy::cast_possible_truncation)]
        if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
            let _ = write!(self.out, "{}", n as i64);
        } else {
            let _ = write!(self.out, "{n}");
        }
    }

    fn string(&mut self, s: &str) {
        self.out.push('"');
        for c in s.chars() {
            match c {
                '"' => self.out.push_str("\\\""),
                '\\' => self.out.push_str("\\\\"),
                '\n' => self.out.push_str("\\n"),
                '\r' => self.out.push_str("\\r"),
                '\t' => self.out.push_str("\\t"),
                c if c.is_control() => {
                    let _ = write!(self.out, "\\u{:04x}", c as u32);
                }
                c => self.out.push(c),
            }
        }
        self.out.push('"');
    }
}

/// Binding strength of an expression node, higher binds tighter.
fn precedence(kind: &NodeKind) -> u8 {
    match kind {
        NodeKind::Sequence(_) => 1,
        NodeKind::Assign { .. } => 2,
        NodeKind::Conditional { .. } => 3,
        NodeKind::Logical { op, .. } => op.precedence(),
        NodeKind::Binary { op, .. } => op.precedence(),
        NodeKind::Unary { .. } => 15,
        NodeKind::Update { prefix: true, .. } => 15,
        NodeKind::Update { prefix: false, .. } => 16,
        NodeKind::Call { .. } | NodeKind::New { .. } | NodeKind::Member { .. } => 17,
        _ => 20,
    }
}
