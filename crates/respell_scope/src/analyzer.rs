//! Scope analysis walker.
//!
//! Builds a [`ScopeAnalysis`] from a parsed [`Program`]: the global scope
//! plus one scope per function in pre-order source order, every variable
//! with its declaration and reference occurrences, and the list of
//! implicit globals (names used without any declaration in scope).
//!
//! Scoping follows `var` semantics: declarations are function-scoped and
//! hoisted across nested blocks, but never across a nested function. The
//! lexical environment is an `im` persistent map, so entering a nested
//! scope is a cheap structural-sharing clone of the parent's environment.

use respell_syntax::{NodeId, NodeKind, Program};

use crate::scope::{Scope, ScopeAnalysis, ScopeId, ScopeKind};
use crate::variable::{Variable, VariableId, VariableKind};

/// The environment chain: name to variable, innermost binding wins.
type Env = im::HashMap<String, VariableId>;

/// Analyzes the program's scopes, variables, and implicit globals.
#[must_use]
pub fn analyze(program: &Program) -> ScopeAnalysis {
    let mut analyzer = Analyzer {
        program,
        analysis: ScopeAnalysis::new(),
    };
    let env = Env::new();
    analyzer.process_scope(ScopeKind::Global, None, &[], &program.body, &env);
    analyzer.analysis
}

/// Walker state.
struct Analyzer<'p> {
    program: &'p Program,
    analysis: ScopeAnalysis,
}

impl<'p> Analyzer<'p> {
    /// Creates one scope: declares its bindings, then resolves its body.
    ///
    /// `self_name` is the name identifier of a named function expression,
    /// which binds in its own scope rather than the enclosing one.
    fn process_scope(
        &mut self,
        kind: ScopeKind,
        self_name: Option<NodeId>,
        params: &[NodeId],
        body: &[NodeId],
        parent_env: &Env,
    ) {
        let scope_id = self.analysis.alloc_scope(Scope::new(kind));
        let mut env = parent_env.clone();

        if kind == ScopeKind::Function {
            let args = self
                .analysis
                .alloc_variable(Variable::new("arguments", VariableKind::ArgumentsObject));
            self.analysis.scope_mut(scope_id).variables.push(args);
            env.insert("arguments".to_string(), args);
        }
        if let Some(name) = self_name {
            self.declare(scope_id, &mut env, name, VariableKind::Function);
        }
        for &param in params {
            self.declare(scope_id, &mut env, param, VariableKind::Param);
        }

        // Hoist before resolving: a reference may precede its declaration.
        for &stmt in body {
            self.hoist_statement(scope_id, &mut env, stmt);
        }
        for &stmt in body {
            self.resolve_statement(&env, stmt);
        }
    }

    /// Declares the identifier node as a variable of `scope_id`.
    ///
    /// A redeclaration of a name already bound in this same scope merges
    /// into the existing variable.
    fn declare(&mut self, scope_id: ScopeId, env: &mut Env, node: NodeId, kind: VariableKind) {
        let Some(name) = self.program.ident_name(node) else {
            return;
        };

        if let Some(&existing) = env.get(name) {
            if self.analysis.scope(scope_id).variables.contains(&existing) {
                self.analysis.variable_mut(existing).declarations.push(node);
                return;
            }
        }

        let name = name.to_string();
        let mut variable = Variable::new(name.clone(), kind);
        variable.declarations.push(node);
        let id = self.analysis.alloc_variable(variable);
        self.analysis.scope_mut(scope_id).variables.push(id);
        env.insert(name, id);
    }

    /// Collects `var` and function-statement declarations into the
    /// current function scope, descending into blocks but not into
    /// nested functions.
    fn hoist_statement(&mut self, scope_id: ScopeId, env: &mut Env, stmt: NodeId) {
        let program = self.program;
        match &program.node(stmt).kind {
            NodeKind::VarDecl { declarators } => {
                for &(name, _) in declarators {
                    self.declare(scope_id, env, name, VariableKind::Var);
                }
            }
            NodeKind::Function { name, .. } => {
                if let Some(name) = *name {
                    self.declare(scope_id, env, name, VariableKind::Function);
                }
            }
            NodeKind::Block(body) => {
                for &inner in body {
                    self.hoist_statement(scope_id, env, inner);
                }
            }
            NodeKind::If {
                then_branch,
                else_branch,
                ..
            } => {
                self.hoist_statement(scope_id, env, *then_branch);
                if let Some(else_branch) = *else_branch {
                    self.hoist_statement(scope_id, env, else_branch);
                }
            }
            NodeKind::While { body, .. } => self.hoist_statement(scope_id, env, *body),
            NodeKind::For { init, body, .. } => {
                if let Some(init) = *init {
                    self.hoist_statement(scope_id, env, init);
                }
                self.hoist_statement(scope_id, env, *body);
            }
            _ => {}
        }
    }

    /// Resolves every identifier reference in a statement.
    fn resolve_statement(&mut self, env: &Env, stmt: NodeId) {
        let program = self.program;
        match &program.node(stmt).kind {
            NodeKind::VarDecl { declarators } => {
                // Declarator names are declaration sites, not references.
                for &(_, init) in declarators {
                    if let Some(init) = init {
                        self.resolve_expression(env, init);
                    }
                }
            }
            NodeKind::Function { params, body, .. } => {
                // Statement position: the name (if any) was hoisted into
                // the enclosing scope already.
                self.process_scope(ScopeKind::Function, None, params, body, env);
            }
            NodeKind::Return(value) => {
                if let Some(value) = *value {
                    self.resolve_expression(env, value);
                }
            }
            NodeKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                self.resolve_expression(env, *cond);
                self.resolve_statement(env, *then_branch);
                if let Some(else_branch) = *else_branch {
                    self.resolve_statement(env, else_branch);
                }
            }
            NodeKind::While { cond, body } => {
                self.resolve_expression(env, *cond);
                self.resolve_statement(env, *body);
            }
            NodeKind::For {
                init,
                test,
                update,
                body,
            } => {
                if let Some(init) = *init {
                    self.resolve_statement(env, init);
                }
                if let Some(test) = *test {
                    self.resolve_expression(env, test);
                }
                if let Some(update) = *update {
                    self.resolve_expression(env, update);
                }
                self.resolve_statement(env, *body);
            }
            NodeKind::Block(body) => {
                for &inner in body {
                    self.resolve_statement(env, inner);
                }
            }
            NodeKind::ExprStmt(expr) => self.resolve_expression(env, *expr),
            _ => {}
        }
    }

    /// Resolves every identifier reference in an expression.
    fn resolve_expression(&mut self, env: &Env, expr: NodeId) {
        let program = self.program;
        match &program.node(expr).kind {
            NodeKind::Ident { name } => {
                if let Some(&variable) = env.get(name) {
                    self.analysis.variable_mut(variable).references.push(expr);
                } else {
                    self.record_implicit_global(name);
                }
            }
            NodeKind::Array(elements) | NodeKind::Sequence(elements) => {
                for &element in elements {
                    self.resolve_expression(env, element);
                }
            }
            NodeKind::Unary { operand, .. } | NodeKind::Update { operand, .. } => {
                self.resolve_expression(env, *operand);
            }
            NodeKind::Binary { lhs, rhs, .. } | NodeKind::Logical { lhs, rhs, .. } => {
                self.resolve_expression(env, *lhs);
                self.resolve_expression(env, *rhs);
            }
            NodeKind::Assign { target, value, .. } => {
                // Writes are occurrences too: renaming must update them.
                self.resolve_expression(env, *target);
                self.resolve_expression(env, *value);
            }
            NodeKind::Conditional {
                cond,
                consequent,
                alternate,
            } => {
                self.resolve_expression(env, *cond);
                self.resolve_expression(env, *consequent);
                self.resolve_expression(env, *alternate);
            }
            NodeKind::Call { callee, args } | NodeKind::New { callee, args } => {
                self.resolve_expression(env, *callee);
                for &arg in args {
                    self.resolve_expression(env, arg);
                }
            }
            NodeKind::Member {
                object,
                property,
                computed,
            } => {
                self.resolve_expression(env, *object);
                // `a.b`: the property is a name, not a reference.
                if *computed {
                    self.resolve_expression(env, *property);
                }
            }
            NodeKind::Function { name, params, body } => {
                // Expression position: a name binds in the function's
                // own scope.
                self.process_scope(ScopeKind::Function, *name, params, body, env);
            }
            _ => {}
        }
    }

    /// Records an implicit global, keeping first-encounter order.
    fn record_implicit_global(&mut self, name: &str) {
        if !self
            .analysis
            .implicit_globals
            .iter()
            .any(|global| global == name)
        {
            self.analysis.implicit_globals.push(name.to_string());
        }
    }
}
