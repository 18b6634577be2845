use crate::error::{ParseError, Reporter};
use crate::expr::*;
use crate::literal::Literal;
use crate::stmt::*;
use crate::token::{Token, Type};

type ParseResult<T> = Result<T, ParseError>;

const MAX_ARGS: usize = 255;

pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    next_id: NodeId,
    /// Errors that are reported but don't abort the production they occur
    /// in (currently only the >255-arguments case). Flushed to the
    /// [`Reporter`] by [`Parser::parse_program`]/[`Parser::parse_expr`].
    soft_errors: Vec<ParseError>,
}

/// Matches the current token's type against one or more patterns, consuming
/// it on a hit. Mirrors the teacher's own `matches!`-based dispatch idiom.
macro_rules! matches_type {
    ($self:ident, $($type:pat),+ $(,)?) => {
        if matches!($self.peek().r#type, $($type)|+) {
            $self.advance();
            true
        } else {
            false
        }
    };
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Parser {
        Parser { tokens, current: 0, next_id: 0, soft_errors: Vec::new() }
    }

    fn fresh_id(&mut self) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Parses a full program: `declaration* EOF`. Never returns `Err`;
    /// failed declarations are skipped via [`Parser::synchronize`] and
    /// reported through `reporter`.
    pub fn parse_program(&mut self, reporter: &mut Reporter) -> Vec<Stmt> {
        let mut stmts = Vec::new();
        while !self.is_at_end() {
            match self.declaration() {
                Ok(stmt) => stmts.push(stmt),
                Err(error) => {
                    reporter.parse_error(&error);
                    self.synchronize();
                }
            }
        }
        self.flush_soft_errors(reporter);
        stmts
    }

    fn flush_soft_errors(&mut self, reporter: &mut Reporter) {
        for error in self.soft_errors.drain(..) {
            reporter.parse_error(&error);
        }
    }

    /// Parses a single expression for the `parse`/`evaluate` CLI commands.
    /// Anything left over besides `EOF` is a syntax error.
    pub fn parse_expr(&mut self, reporter: &mut Reporter) -> Option<Expr> {
        let expr = match self.expression() {
            Ok(expr) => expr,
            Err(error) => {
                reporter.parse_error(&error);
                return None;
            }
        };
        if !self.is_at_end() {
            reporter.parse_error(&ParseError {
                token: self.peek().clone(),
                message: "Expected end of expression.".to_string(),
            });
            return None;
        }
        self.flush_soft_errors(reporter);
        Some(expr)
    }

    // ---- declarations ----

    fn declaration(&mut self) -> ParseResult<Stmt> {
        if matches_type!(self, Type::Class) {
            return self.class_declaration();
        }
        if matches_type!(self, Type::Fun) {
            return self.function("function").map(Stmt::Function);
        }
        if matches_type!(self, Type::Var) {
            return self.var_declaration();
        }
        self.statement()
    }

    fn class_declaration(&mut self) -> ParseResult<Stmt> {
        let name = self.consume(Type::Identifier, "Expect class name.")?;
        self.consume(Type::LeftBrace, "Expect '{' before class body.")?;

        let mut methods = Vec::new();
        while !self.check(Type::RightBrace) && !self.is_at_end() {
            methods.push(self.function("method")?);
        }

        self.consume(Type::RightBrace, "Expect '}' after class body.")?;
        Ok(Stmt::Class(ClassData { name, methods }))
    }

    fn function(&mut self, kind: &str) -> ParseResult<FunctionData> {
        let name = self.consume(Type::Identifier, &format!("Expect {kind} name."))?;
        self.consume(Type::LeftParen, &format!("Expect '(' after {kind} name."))?;

        let mut params = Vec::new();
        if !self.check(Type::RightParen) {
            loop {
                if params.len() >= MAX_ARGS {
                    self.error_at_current("Can't have more than 255 parameters.");
                }
                params.push(self.consume(Type::Identifier, "Expect parameter name.")?);
                if !matches_type!(self, Type::Comma) {
                    break;
                }
            }
        }
        self.consume(Type::RightParen, "Expect ')' after parameters.")?;

        self.consume(Type::LeftBrace, &format!("Expect '{{' before {kind} body."))?;
        let body = self.block()?;
        Ok(FunctionData { name, params, body })
    }

    fn var_declaration(&mut self) -> ParseResult<Stmt> {
        let name = self.consume(Type::Identifier, "Expect variable name.")?;
        let initializer =
            if matches_type!(self, Type::Equal) { Some(self.expression()?) } else { None };
        self.consume(Type::Semicolon, "Expect ';' after variable declaration.")?;
        Ok(Stmt::Var(VarData { name, initializer }))
    }

    // ---- statements ----

    fn statement(&mut self) -> ParseResult<Stmt> {
        if matches_type!(self, Type::For) {
            return self.for_statement();
        }
        if matches_type!(self, Type::If) {
            return self.if_statement();
        }
        if matches_type!(self, Type::Print) {
            return self.print_statement();
        }
        if matches_type!(self, Type::Return) {
            return self.return_statement();
        }
        if matches_type!(self, Type::While) {
            return self.while_statement();
        }
        if matches_type!(self, Type::LeftBrace) {
            return self.block().map(Stmt::Block);
        }
        self.expression_statement()
    }

    /// Desugars `for (init; cond; incr) body` to a `while` loop wrapped in a
    /// block, so the resolver and interpreter never see a dedicated `For`
    /// node.
    fn for_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(Type::LeftParen, "Expect '(' after 'for'.")?;

        let initializer = if matches_type!(self, Type::Semicolon) {
            None
        } else if matches!(self.peek().r#type, Type::Var) {
            self.advance();
            Some(self.var_declaration()?)
        } else {
            Some(self.expression_statement()?)
        };

        let condition = if !self.check(Type::Semicolon) {
            self.expression()?
        } else {
            Expr::Literal(Literal::Bool(true))
        };
        self.consume(Type::Semicolon, "Expect ';' after loop condition.")?;

        let increment =
            if !self.check(Type::RightParen) { Some(self.expression()?) } else { None };
        self.consume(Type::RightParen, "Expect ')' after for clauses.")?;

        let mut body = self.statement()?;

        if let Some(increment) = increment {
            body = Stmt::Block(vec![body, Stmt::Expression(increment)]);
        }

        body = Stmt::While(WhileData { condition, body: Box::new(body) });

        if let Some(initializer) = initializer {
            body = Stmt::Block(vec![initializer, body]);
        }

        Ok(body)
    }

    fn if_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(Type::LeftParen, "Expect '(' after 'if'.")?;
        let condition = self.expression()?;
        self.consume(Type::RightParen, "Expect ')' after if condition.")?;

        let then_branch = Box::new(self.statement()?);
        let else_branch =
            if matches_type!(self, Type::Else) { Some(Box::new(self.statement()?)) } else { None };

        Ok(Stmt::If(IfData { condition, then_branch, else_branch }))
    }

    fn print_statement(&mut self) -> ParseResult<Stmt> {
        let value = self.expression()?;
        self.consume(Type::Semicolon, "Expect ';' after value.")?;
        Ok(Stmt::Print(value))
    }

    fn return_statement(&mut self) -> ParseResult<Stmt> {
        let keyword = self.previous().clone();
        let value = if !self.check(Type::Semicolon) { Some(self.expression()?) } else { None };
        self.consume(Type::Semicolon, "Expect ';' after return value.")?;
        Ok(Stmt::Return(ReturnData { keyword, value }))
    }

    fn while_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(Type::LeftParen, "Expect '(' after 'while'.")?;
        let condition = self.expression()?;
        self.consume(Type::RightParen, "Expect ')' after condition.")?;
        let body = Box::new(self.statement()?);
        Ok(Stmt::While(WhileData { condition, body }))
    }

    fn block(&mut self) -> ParseResult<Vec<Stmt>> {
        let mut stmts = Vec::new();
        while !self.check(Type::RightBrace) && !self.is_at_end() {
            stmts.push(self.declaration()?);
        }
        self.consume(Type::RightBrace, "Expect '}' after block.")?;
        Ok(stmts)
    }

    fn expression_statement(&mut self) -> ParseResult<Stmt> {
        let expr = self.expression()?;
        self.consume(Type::Semicolon, "Expect ';' after expression.")?;
        Ok(Stmt::Expression(expr))
    }

    // ---- expressions ----

    fn expression(&mut self) -> ParseResult<Expr> {
        self.assignment()
    }

    fn assignment(&mut self) -> ParseResult<Expr> {
        let expr = self.logic_or()?;

        if matches_type!(self, Type::Equal) {
            let equals = self.previous().clone();
            let value = self.assignment()?;

            return match expr {
                Expr::Variable(VariableData { name, .. }) => {
                    Ok(Expr::Assign(AssignData { id: self.fresh_id(), name, value: Box::new(value) }))
                }
                Expr::Get(GetData { object, name }) => {
                    Ok(Expr::Set(SetData { object, name, value: Box::new(value) }))
                }
                _ => {
                    Err(ParseError { token: equals, message: "Invalid assignment target.".to_string() })
                }
            };
        }

        Ok(expr)
    }

    fn logic_or(&mut self) -> ParseResult<Expr> {
        let mut expr = self.logic_and()?;
        while matches_type!(self, Type::Or) {
            let operator = self.previous().clone();
            let right = self.logic_and()?;
            expr = Expr::Logical(LogicalData { left: Box::new(expr), operator, right: Box::new(right) });
        }
        Ok(expr)
    }

    fn logic_and(&mut self) -> ParseResult<Expr> {
        let mut expr = self.equality()?;
        while matches_type!(self, Type::And) {
            let operator = self.previous().clone();
            let right = self.equality()?;
            expr = Expr::Logical(LogicalData { left: Box::new(expr), operator, right: Box::new(right) });
        }
        Ok(expr)
    }

    fn equality(&mut self) -> ParseResult<Expr> {
        let mut expr = self.comparison()?;
        while matches_type!(self, Type::BangEqual, Type::EqualEqual) {
            let operator = self.previous().clone();
            let right = self.comparison()?;
            expr = Expr::Binary(BinaryData { left: Box::new(expr), operator, right: Box::new(right) });
        }
        Ok(expr)
    }

    fn comparison(&mut self) -> ParseResult<Expr> {
        let mut expr = self.term()?;
        while matches_type!(self, Type::Greater, Type::GreaterEqual, Type::Less, Type::LessEqual) {
            let operator = self.previous().clone();
            let right = self.term()?;
            expr = Expr::Binary(BinaryData { left: Box::new(expr), operator, right: Box::new(right) });
        }
        Ok(expr)
    }

    fn term(&mut self) -> ParseResult<Expr> {
        let mut expr = self.factor()?;
        while matches_type!(self, Type::Minus, Type::Plus) {
            let operator = self.previous().clone();
            let right = self.factor()?;
            expr = Expr::Binary(BinaryData { left: Box::new(expr), operator, right: Box::new(right) });
        }
        Ok(expr)
    }

    fn factor(&mut self) -> ParseResult<Expr> {
        let mut expr = self.unary()?;
        while matches_type!(self, Type::Slash, Type::Star) {
            let operator = self.previous().clone();
            let right = self.unary()?;
            expr = Expr::Binary(BinaryData { left: Box::new(expr), operator, right: Box::new(right) });
        }
        Ok(expr)
    }

    fn unary(&mut self) -> ParseResult<Expr> {
        if matches_type!(self, Type::Bang, Type::Minus) {
            let operator = self.previous().clone();
            let right = self.unary()?;
            return Ok(Expr::Unary(UnaryData { operator, right: Box::new(right) }));
        }
        self.call()
    }

    fn call(&mut self) -> ParseResult<Expr> {
        let mut expr = self.primary()?;

        loop {
            if matches_type!(self, Type::LeftParen) {
                expr = self.finish_call(expr)?;
            } else if matches_type!(self, Type::Dot) {
                let name = self.consume(Type::Identifier, "Expect property name after '.'.")?;
                expr = Expr::Get(GetData { object: Box::new(expr), name });
            } else {
                break;
            }
        }

        Ok(expr)
    }

    fn finish_call(&mut self, callee: Expr) -> ParseResult<Expr> {
        let mut arguments = Vec::new();
        if !self.check(Type::RightParen) {
            loop {
                if arguments.len() >= MAX_ARGS {
                    // Reported but parsing continues: the call node is
                    // still produced with whatever arguments we have.
                    self.error_at_current("Can't have more than 255 arguments.");
                }
                arguments.push(self.expression()?);
                if !matches_type!(self, Type::Comma) {
                    break;
                }
            }
        }
        let paren = self.consume(Type::RightParen, "Expect ')' after arguments.")?;
        Ok(Expr::Call(CallData { callee: Box::new(callee), paren, arguments }))
    }

    fn primary(&mut self) -> ParseResult<Expr> {
        if matches_type!(self, Type::False) {
            return Ok(Expr::Literal(Literal::Bool(false)));
        }
        if matches_type!(self, Type::True) {
            return Ok(Expr::Literal(Literal::Bool(true)));
        }
        if matches_type!(self, Type::Nil) {
            return Ok(Expr::Literal(Literal::Nil));
        }
        if matches_type!(self, Type::Number, Type::String) {
            let literal = self.previous().literal.clone().expect("scanner always attaches a literal");
            return Ok(Expr::Literal(literal));
        }
        if matches_type!(self, Type::This) {
            let keyword = self.previous().clone();
            return Ok(Expr::This(ThisData { id: self.fresh_id(), keyword }));
        }
        if matches_type!(self, Type::Identifier) {
            let name = self.previous().clone();
            return Ok(Expr::Variable(VariableData { id: self.fresh_id(), name }));
        }
        if matches_type!(self, Type::LeftParen) {
            let expr = self.expression()?;
            self.consume(Type::RightParen, "Expect ')' after expression.")?;
            return Ok(Expr::Grouping(GroupingData { expr: Box::new(expr) }));
        }

        Err(ParseError { token: self.peek().clone(), message: "Expect expression.".to_string() })
    }

    // ---- token stream primitives ----

    fn check(&self, r#type: Type) -> bool {
        self.peek().r#type == r#type
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn is_at_end(&self) -> bool {
        self.peek().r#type == Type::EOF
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }

    fn consume(&mut self, r#type: Type, message: &str) -> ParseResult<Token> {
        if self.check(r#type) {
            return Ok(self.advance().clone());
        }
        Err(ParseError { token: self.peek().clone(), message: message.to_string() })
    }

    /// Records a non-fatal parse error without unwinding the current
    /// production (used for the >255-arguments case, which still parses
    /// the rest of the call).
    fn error_at_current(&mut self, message: &str) {
        self.soft_errors.push(ParseError { token: self.peek().clone(), message: message.to_string() });
    }

    /// Discards tokens until a plausible declaration boundary, guaranteeing
    /// forward progress even if the very next token is itself unparsable.
    fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().r#type == Type::Semicolon {
                return;
            }

            if matches!(
                self.peek().r#type,
                Type::Class
                    | Type::Fun
                    | Type::Var
                    | Type::For
                    | Type::If
                    | Type::While
                    | Type::Print
                    | Type::Return
            ) {
                return;
            }

            self.advance();
        }
    }
}
