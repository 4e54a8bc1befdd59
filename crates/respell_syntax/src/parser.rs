//! Parser for JavaScript-like source.
//!
//! A recursive-descent parser that builds the arena [`Program`]. Binary
//! and logical operators are parsed with precedence climbing; everything
//! else is one function per grammar production.
//!
//! One deliberate extension over the standard grammar: a statement-level
//! `function` may omit its name. Minified snippets are routinely passed
//! around as bare anonymous functions, and rejecting them would make the
//! tool useless on its main diet.

use respell_foundation::{Error, Result};

use crate::ast::{AssignOp, BinaryOp, LogicalOp, NodeId, NodeKind, Program, UnaryOp, UpdateOp};
use crate::lexer::Lexer;
use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Parses source text into a [`Program`].
///
/// # Errors
/// Returns a parse error if the source is malformed.
pub fn parse(source: &str) -> Result<Program> {
    Parser::new(source).parse_program()
}

/// Parser for JavaScript-like source code.
pub struct Parser<'src> {
    /// The lexer providing tokens.
    lexer: Lexer<'src>,
    /// Current token (lookahead).
    current: Token,
    /// Span of the most recently consumed token.
    previous_span: Span,
    /// The program being built.
    program: Program,
}

impl<'src> Parser<'src> {
    /// Creates a new parser for the given source.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            previous_span: Span::default(),
            program: Program::new(),
        }
    }

    /// Parses the whole source as a program.
    ///
    /// # Errors
    /// Returns a parse error if the source is malformed.
    pub fn parse_program(mut self) -> Result<Program> {
        let mut body = Vec::new();
        while self.current.kind != TokenKind::Eof {
            body.push(self.parse_statement()?);
        }
        self.program.body = body;
        Ok(self.program)
    }

    // ------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------

    /// Parses a single statement.
    fn parse_statement(&mut self) -> Result<NodeId> {
        match &self.current.kind {
            TokenKind::Var => self.parse_var_statement(),
            TokenKind::Function => self.parse_function(),
            TokenKind::Return => self.parse_return(),
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::For => self.parse_for(),
            TokenKind::LBrace => self.parse_block(),
            TokenKind::Semicolon => {
                let span = self.current.span;
                self.advance();
                Ok(self.program.alloc(NodeKind::Empty, span))
            }
            TokenKind::Error(msg) => Err(self.error(&msg.clone())),
            _ => {
                let start = self.current.span;
                let expr = self.parse_expression()?;
                self.eat_semicolon();
                let span = start.to(self.previous_span);
                Ok(self.program.alloc(NodeKind::ExprStmt(expr), span))
            }
        }
    }

    /// Parses `var a = 1, b;` including the optional trailing semicolon.
    fn parse_var_statement(&mut self) -> Result<NodeId> {
        let id = self.parse_var_declarators()?;
        self.eat_semicolon();
        Ok(id)
    }

    /// Parses `var` plus its declarator list, without the semicolon.
    ///
    /// Shared between statement position and `for` initializers.
    fn parse_var_declarators(&mut self) -> Result<NodeId> {
        let start = self.current.span;
        self.expect(&TokenKind::Var)?;

        let mut declarators = Vec::new();
        loop {
            let name = self.parse_ident()?;
            let init = if self.current.kind == TokenKind::Assign {
                self.advance();
                Some(self.parse_assignment()?)
            } else {
                None
            };
            declarators.push((name, init));

            if self.current.kind == TokenKind::Comma {
                self.advance();
            } else {
                break;
            }
        }

        let span = start.to(self.previous_span);
        Ok(self.program.alloc(NodeKind::VarDecl { declarators }, span))
    }

    /// Parses a function declaration or expression.
    ///
    /// The name is optional in both positions.
    fn parse_function(&mut self) -> Result<NodeId> {
        let start = self.current.span;
        self.expect(&TokenKind::Function)?;

        let name = if matches!(self.current.kind, TokenKind::Ident(_)) {
            Some(self.parse_ident()?)
        } else {
            None
        };

        self.expect(&TokenKind::LParen)?;
        let mut params = Vec::new();
        if self.current.kind != TokenKind::RParen {
            loop {
                params.push(self.parse_ident()?);
                if self.current.kind == TokenKind::Comma {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RParen)?;

        self.expect(&TokenKind::LBrace)?;
        let mut body = Vec::new();
        while self.current.kind != TokenKind::RBrace {
            if self.current.kind == TokenKind::Eof {
                return Err(self.error_at(start, "unterminated function body"));
            }
            body.push(self.parse_statement()?);
        }
        self.expect(&TokenKind::RBrace)?;

        let span = start.to(self.previous_span);
        Ok(self
            .program
            .alloc(NodeKind::Function { name, params, body }, span))
    }

    /// Parses `return;` or `return expr;`.
    fn parse_return(&mut self) -> Result<NodeId> {
        let start = self.current.span;
        self.expect(&TokenKind::Return)?;

        let value = if matches!(
            self.current.kind,
            TokenKind::Semicolon | TokenKind::RBrace | TokenKind::Eof
        ) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.eat_semicolon();

        let span = start.to(self.previous_span);
        Ok(self.program.alloc(NodeKind::Return(value), span))
    }

    /// Parses `if (cond) stmt [else stmt]`.
    fn parse_if(&mut self) -> Result<NodeId> {
        let start = self.current.span;
        self.expect(&TokenKind::If)?;
        self.expect(&TokenKind::LParen)?;
        let cond = self.parse_expression()?;
        self.expect(&TokenKind::RParen)?;

        let then_branch = self.parse_statement()?;
        let else_branch = if self.current.kind == TokenKind::Else {
            self.advance();
            Some(self.parse_statement()?)
        } else {
            None
        };

        let span = start.to(self.previous_span);
        Ok(self.program.alloc(
            NodeKind::If {
                cond,
                then_branch,
                else_branch,
            },
            span,
        ))
    }

    /// Parses `while (cond) stmt`.
    fn parse_while(&mut self) -> Result<NodeId> {
        let start = self.current.span;
        self.expect(&TokenKind::While)?;
        self.expect(&TokenKind::LParen)?;
        let cond = self.parse_expression()?;
        self.expect(&TokenKind::RParen)?;
        let body = self.parse_statement()?;

        let span = start.to(self.previous_span);
        Ok(self.program.alloc(NodeKind::While { cond, body }, span))
    }

    /// Parses `for (init; test; update) stmt`.
    fn parse_for(&mut self) -> Result<NodeId> {
        let start = self.current.span;
        self.expect(&TokenKind::For)?;
        self.expect(&TokenKind::LParen)?;

        let init = match self.current.kind {
            TokenKind::Semicolon => None,
            TokenKind::Var => Some(self.parse_var_declarators()?),
            _ => {
                let expr = self.parse_expression()?;
                let span = self.program.node(expr).span;
                Some(self.program.alloc(NodeKind::ExprStmt(expr), span))
            }
        };
        self.expect(&TokenKind::Semicolon)?;

        let test = if self.current.kind == TokenKind::Semicolon {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(&TokenKind::Semicolon)?;

        let update = if self.current.kind == TokenKind::RParen {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(&TokenKind::RParen)?;

        let body = self.parse_statement()?;
        let span = start.to(self.previous_span);
        Ok(self.program.alloc(
            NodeKind::For {
                init,
                test,
                update,
                body,
            },
            span,
        ))
    }

    /// Parses `{ ... }` in statement position.
    fn parse_block(&mut self) -> Result<NodeId> {
        let start = self.current.span;
        self.expect(&TokenKind::LBrace)?;

        let mut body = Vec::new();
        while self.current.kind != TokenKind::RBrace {
            if self.current.kind == TokenKind::Eof {
                return Err(self.error_at(start, "unterminated block"));
            }
            body.push(self.parse_statement()?);
        }
        self.expect(&TokenKind::RBrace)?;

        let span = start.to(self.previous_span);
        Ok(self.program.alloc(NodeKind::Block(body), span))
    }

    // ------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------

    /// Parses a full expression, including comma sequences.
    fn parse_expression(&mut self) -> Result<NodeId> {
        let start = self.current.span;
        let first = self.parse_assignment()?;

        if self.current.kind != TokenKind::Comma {
            return Ok(first);
        }

        let mut elements = vec![first];
        while self.current.kind == TokenKind::Comma {
            self.advance();
            elements.push(self.parse_assignment()?);
        }
        let span = start.to(self.previous_span);
        Ok(self.program.alloc(NodeKind::Sequence(elements), span))
    }

    /// Parses an assignment expression (right-associative).
    fn parse_assignment(&mut self) -> Result<NodeId> {
        let start = self.current.span;
        let lhs = self.parse_conditional()?;

        let op = match self.current.kind {
            TokenKind::Assign => AssignOp::Assign,
            TokenKind::PlusAssign => AssignOp::AddAssign,
            TokenKind::MinusAssign => AssignOp::SubAssign,
            TokenKind::StarAssign => AssignOp::MulAssign,
            TokenKind::SlashAssign => AssignOp::DivAssign,
            TokenKind::PercentAssign => AssignOp::RemAssign,
            _ => return Ok(lhs),
        };

        if !self.is_lvalue(lhs) {
            return Err(self.error_at(start, "invalid assignment target"));
        }

        self.advance();
        let value = self.parse_assignment()?;
        let span = start.to(self.previous_span);
        Ok(self.program.alloc(
            NodeKind::Assign {
                op,
                target: lhs,
                value,
            },
            span,
        ))
    }

    /// Parses `cond ? a : b`.
    fn parse_conditional(&mut self) -> Result<NodeId> {
        let start = self.current.span;
        let cond = self.parse_binary(0)?;

        if self.current.kind != TokenKind::Question {
            return Ok(cond);
        }
        self.advance();
        let consequent = self.parse_assignment()?;
        self.expect(&TokenKind::Colon)?;
        let alternate = self.parse_assignment()?;

        let span = start.to(self.previous_span);
        Ok(self.program.alloc(
            NodeKind::Conditional {
                cond,
                consequent,
                alternate,
            },
            span,
        ))
    }

    /// Parses binary and logical operators by precedence climbing.
    fn parse_binary(&mut self, min_precedence: u8) -> Result<NodeId> {
        let start = self.current.span;
        let mut lhs = self.parse_unary()?;

        loop {
            let Some(op) = Infix::of(&self.current.kind) else {
                break;
            };
            if op.precedence() < min_precedence {
                break;
            }
            self.advance();

            // Left-associative: the right side must bind tighter.
            let rhs = self.parse_binary(op.precedence() + 1)?;
            let span = start.to(self.previous_span);
            lhs = match op {
                Infix::Binary(op) => self.program.alloc(NodeKind::Binary { op, lhs, rhs }, span),
                Infix::Logical(op) => self.program.alloc(NodeKind::Logical { op, lhs, rhs }, span),
            };
        }
        Ok(lhs)
    }

    /// Parses unary operators and prefix updates.
    fn parse_unary(&mut self) -> Result<NodeId> {
        let start = self.current.span;

        let op = match self.current.kind {
            TokenKind::Bang => Some(UnaryOp::Not),
            TokenKind::Minus => Some(UnaryOp::Neg),
            TokenKind::Plus => Some(UnaryOp::Plus),
            TokenKind::Tilde => Some(UnaryOp::BitNot),
            TokenKind::Typeof => Some(UnaryOp::Typeof),
            TokenKind::Void => Some(UnaryOp::Void),
            _ => None,
        };
        if let Some(op) = op {
            self.advance();
            let operand = self.parse_unary()?;
            let span = start.to(self.previous_span);
            return Ok(self.program.alloc(NodeKind::Unary { op, operand }, span));
        }

        let update = match self.current.kind {
            TokenKind::PlusPlus => Some(UpdateOp::Increment),
            TokenKind::MinusMinus => Some(UpdateOp::Decrement),
            _ => None,
        };
        if let Some(op) = update {
            self.advance();
            let operand = self.parse_unary()?;
            if !self.is_lvalue(operand) {
                return Err(self.error_at(start, "invalid update target"));
            }
            let span = start.to(self.previous_span);
            return Ok(self.program.alloc(
                NodeKind::Update {
                    op,
                    prefix: true,
                    operand,
                },
                span,
            ));
        }

        self.parse_postfix()
    }

    /// Parses postfix `++`/`--`.
    fn parse_postfix(&mut self) -> Result<NodeId> {
        let start = self.current.span;
        let expr = self.parse_call_member()?;

        let op = match self.current.kind {
            TokenKind::PlusPlus => UpdateOp::Increment,
            TokenKind::MinusMinus => UpdateOp::Decrement,
            _ => return Ok(expr),
        };
        if !self.is_lvalue(expr) {
            return Err(self.error_at(start, "invalid update target"));
        }
        self.advance();
        let span = start.to(self.previous_span);
        Ok(self.program.alloc(
            NodeKind::Update {
                op,
                prefix: false,
                operand: expr,
            },
            span,
        ))
    }

    /// Parses call, member, and `new` chains.
    fn parse_call_member(&mut self) -> Result<NodeId> {
        let start = self.current.span;
        let mut expr = if self.current.kind == TokenKind::New {
            self.parse_new()?
        } else {
            self.parse_primary()?
        };

        loop {
            match self.current.kind {
                TokenKind::Dot => {
                    self.advance();
                    let property = self.parse_property_name()?;
                    let span = start.to(self.previous_span);
                    expr = self.program.alloc(
                        NodeKind::Member {
                            object: expr,
                            property,
                            computed: false,
                        },
                        span,
                    );
                }
                TokenKind::LBracket => {
                    self.advance();
                    let property = self.parse_expression()?;
                    self.expect(&TokenKind::RBracket)?;
                    let span = start.to(self.previous_span);
                    expr = self.program.alloc(
                        NodeKind::Member {
                            object: expr,
                            property,
                            computed: true,
                        },
                        span,
                    );
                }
                TokenKind::LParen => {
                    let args = self.parse_arguments()?;
                    let span = start.to(self.previous_span);
                    expr = self
                        .program
                        .alloc(NodeKind::Call { callee: expr, args }, span);
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    /// Parses `new callee(args)`.
    ///
    /// The callee may chain member accesses but not calls; a call after
    /// the argument list belongs to the surrounding chain.
    fn parse_new(&mut self) -> Result<NodeId> {
        let start = self.current.span;
        self.expect(&TokenKind::New)?;

        let mut callee = if self.current.kind == TokenKind::New {
            self.parse_new()?
        } else {
            self.parse_primary()?
        };
        loop {
            match self.current.kind {
                TokenKind::Dot => {
                    self.advance();
                    let property = self.parse_property_name()?;
                    let span = start.to(self.previous_span);
                    callee = self.program.alloc(
                        NodeKind::Member {
                            object: callee,
                            property,
                            computed: false,
                        },
                        span,
                    );
                }
                TokenKind::LBracket => {
                    self.advance();
                    let property = self.parse_expression()?;
                    self.expect(&TokenKind::RBracket)?;
                    let span = start.to(self.previous_span);
                    callee = self.program.alloc(
                        NodeKind::Member {
                            object: callee,
                            property,
                            computed: true,
                        },
                        span,
                    );
                }
                _ => break,
            }
        }

        let args = if self.current.kind == TokenKind::LParen {
            self.parse_arguments()?
        } else {
            Vec::new()
        };
        let span = start.to(self.previous_span);
        Ok(self.program.alloc(NodeKind::New { callee, args }, span))
    }

    /// Parses a parenthesized, comma-separated argument list.
    fn parse_arguments(&mut self) -> Result<Vec<NodeId>> {
        self.expect(&TokenKind::LParen)?;
        let mut args = Vec::new();
        if self.current.kind != TokenKind::RParen {
            loop {
                args.push(self.parse_assignment()?);
                if self.current.kind == TokenKind::Comma {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RParen)?;
        Ok(args)
    }

    /// Parses a primary expression.
    fn parse_primary(&mut self) -> Result<NodeId> {
        let span = self.current.span;
        match &self.current.kind {
            TokenKind::Ident(_) => self.parse_ident(),
            TokenKind::Number(n) => {
                let n = *n;
                self.advance();
                Ok(self.program.alloc(NodeKind::Number(n), span))
            }
            TokenKind::Str(s) => {
                let s = s.clone();
                self.advance();
                Ok(self.program.alloc(NodeKind::Str(s), span))
            }
            TokenKind::True => {
                self.advance();
                Ok(self.program.alloc(NodeKind::Bool(true), span))
            }
            TokenKind::False => {
                self.advance();
                Ok(self.program.alloc(NodeKind::Bool(false), span))
            }
            TokenKind::Null => {
                self.advance();
                Ok(self.program.alloc(NodeKind::Null, span))
            }
            TokenKind::Function => self.parse_function(),
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(&TokenKind::RParen)?;
                Ok(expr)
            }
            TokenKind::LBracket => self.parse_array(),
            TokenKind::Error(msg) => Err(self.error(&msg.clone())),
            other => Err(self.error(&format!("unexpected {}", other.name()))),
        }
    }

    /// Parses an array literal.
    fn parse_array(&mut self) -> Result<NodeId> {
        let start = self.current.span;
        self.expect(&TokenKind::LBracket)?;

        let mut elements = Vec::new();
        if self.current.kind != TokenKind::RBracket {
            loop {
                elements.push(self.parse_assignment()?);
                if self.current.kind == TokenKind::Comma {
                    self.advance();
                    // Trailing comma
                    if self.current.kind == TokenKind::RBracket {
                        break;
                    }
                } else {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RBracket)?;

        let span = start.to(self.previous_span);
        Ok(self.program.alloc(NodeKind::Array(elements), span))
    }

    /// Parses an identifier into an `Ident` node.
    fn parse_ident(&mut self) -> Result<NodeId> {
        let span = self.current.span;
        if let TokenKind::Ident(name) = &self.current.kind {
            let name = name.clone();
            self.advance();
            Ok(self.program.alloc(NodeKind::Ident { name }, span))
        } else {
            Err(self.error(&format!("expected identifier, found {}", self.current.kind.name())))
        }
    }

    /// Parses a property name after `.`.
    ///
    /// Keywords are allowed as property names (`x.new`, `x.return`).
    fn parse_property_name(&mut self) -> Result<NodeId> {
        let span = self.current.span;
        let name = match &self.current.kind {
            TokenKind::Ident(name) => name.clone(),
            TokenKind::Var => "var".to_string(),
            TokenKind::Function => "function".to_string(),
            TokenKind::Return => "return".to_string(),
            TokenKind::If => "if".to_string(),
            TokenKind::Else => "else".to_string(),
            TokenKind::While => "while".to_string(),
            TokenKind::For => "for".to_string(),
            TokenKind::New => "new".to_string(),
            TokenKind::Typeof => "typeof".to_string(),
            TokenKind::Void => "void".to_string(),
            TokenKind::True => "true".to_string(),
            TokenKind::False => "false".to_string(),
            TokenKind::Null => "null".to_string(),
            other => {
                return Err(self.error(&format!(
                    "expected property name, found {}",
                    other.name()
                )));
            }
        };
        self.advance();
        Ok(self.program.alloc(NodeKind::Ident { name }, span))
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    /// Returns true if the node can be assigned to.
    fn is_lvalue(&self, id: NodeId) -> bool {
        matches!(
            self.program.node(id).kind,
            NodeKind::Ident { .. } | NodeKind::Member { .. }
        )
    }

    /// Advances to the next token.
    fn advance(&mut self) {
        self.previous_span = self.current.span;
        self.current = self.lexer.next_token();
    }

    /// Consumes the current token if it matches, errors otherwise.
    fn expect(&mut self, kind: &TokenKind) -> Result<()> {
        if &self.current.kind == kind {
            self.advance();
            Ok(())
        } else {
            Err(self.error(&format!(
                "expected {}, found {}",
                kind.name(),
                self.current.kind.name()
            )))
        }
    }

    /// Consumes an optional statement-terminating semicolon.
    fn eat_semicolon(&mut self) {
        if self.current.kind == TokenKind::Semicolon {
            self.advance();
        }
    }

    /// Creates a parse error at the current token.
    fn error(&self, message: &str) -> Error {
        self.error_at(self.current.span, message)
    }

    /// Creates a parse error at the given span.
    #[allow(clippy::unused_self)]
    fn error_at(&self, span: Span, message: &str) -> Error {
        Error::parse(message, span.line, span.column)
    }
}

/// An infix operator with its precedence, either binary or logical.
#[derive(Clone, Copy, Debug)]
enum Infix {
    Binary(BinaryOp),
    Logical(LogicalOp),
}

impl Infix {
    /// Maps a token to its infix operator, if any.
    fn of(kind: &TokenKind) -> Option<Self> {
        let op = match kind {
            TokenKind::OrOr => Self::Logical(LogicalOp::Or),
            TokenKind::AndAnd => Self::Logical(LogicalOp::And),
            TokenKind::Pipe => Self::Binary(BinaryOp::BitOr),
            TokenKind::Caret => Self::Binary(BinaryOp::BitXor),
            TokenKind::Amp => Self::Binary(BinaryOp::BitAnd),
            TokenKind::EqEq => Self::Binary(BinaryOp::Eq),
            TokenKind::NotEq => Self::Binary(BinaryOp::NotEq),
            TokenKind::EqEqEq => Self::Binary(BinaryOp::StrictEq),
            TokenKind::NotEqEq => Self::Binary(BinaryOp::StrictNotEq),
            TokenKind::Lt => Self::Binary(BinaryOp::Lt),
            TokenKind::Gt => Self::Binary(BinaryOp::Gt),
            TokenKind::LtEq => Self::Binary(BinaryOp::LtEq),
            TokenKind::GtEq => Self::Binary(BinaryOp::GtEq),
            TokenKind::Shl => Self::Binary(BinaryOp::Shl),
            TokenKind::Shr => Self::Binary(BinaryOp::Shr),
            TokenKind::UShr => Self::Binary(BinaryOp::UShr),
            TokenKind::Plus => Self::Binary(BinaryOp::Add),
            TokenKind::Minus => Self::Binary(BinaryOp::Sub),
            TokenKind::Star => Self::Binary(BinaryOp::Mul),
            TokenKind::Slash => Self::Binary(BinaryOp::Div),
            TokenKind::Percent => Self::Binary(BinaryOp::Rem),
            _ => return None,
        };
        Some(op)
    }

    /// Binding strength, higher binds tighter.
    fn precedence(self) -> u8 {
        match self {
            Self::Binary(op) => op.precedence(),
            Self::Logical(op) => op.precedence(),
        }
    }
}
