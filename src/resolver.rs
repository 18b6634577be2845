use std::collections::HashMap;

use crate::error::{Reporter, ResolveError};
use crate::expr::*;
use crate::stmt::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VarState {
    Declared,
    Defined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FunctionType {
    None,
    Function,
    Method,
    Initializer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClassType {
    None,
    Class,
}

/// Maps each `Variable`/`Assign`/`This` node's parse-time id to its scope
/// distance. Absence means "resolve as a global at runtime".
pub type BindingDistances = HashMap<NodeId, usize>;

pub struct Resolver<'a, 'b> {
    reporter: &'a mut Reporter<'b>,
    scopes: Vec<HashMap<String, VarState>>,
    distances: BindingDistances,
    current_function: FunctionType,
    current_class: ClassType,
}

impl<'a, 'b> Resolver<'a, 'b> {
    pub fn new(reporter: &'a mut Reporter<'b>) -> Self {
        Resolver {
            reporter,
            scopes: Vec::new(),
            distances: HashMap::new(),
            current_function: FunctionType::None,
            current_class: ClassType::None,
        }
    }

    pub fn resolve(mut self, stmts: &[Stmt]) -> BindingDistances {
        self.resolve_stmts(stmts);
        self.distances
    }

    fn resolve_stmts(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            self.resolve_stmt(stmt);
        }
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        stmt.accept(self);
    }

    fn resolve_expr(&mut self, expr: &Expr) {
        expr.accept(self);
    }

    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    fn declare(&mut self, name: &crate::token::Token) {
        let Some(scope) = self.scopes.last_mut() else { return };
        if scope.contains_key(&name.lexeme) {
            self.reporter.resolve_error(&ResolveError {
                token: name.clone(),
                message: "Already a variable with this name in this scope.".to_string(),
            });
        }
        scope.insert(name.lexeme.clone(), VarState::Declared);
    }

    fn define(&mut self, name: &crate::token::Token) {
        let Some(scope) = self.scopes.last_mut() else { return };
        scope.insert(name.lexeme.clone(), VarState::Defined);
    }

    fn resolve_local(&mut self, id: NodeId, name: &str) {
        for (hop, scope) in self.scopes.iter().rev().enumerate() {
            if scope.contains_key(name) {
                self.distances.insert(id, hop);
                return;
            }
        }
        // Not found in any local scope: treated as a global at runtime.
    }

    fn resolve_function(&mut self, data: &FunctionData, kind: FunctionType) {
        let enclosing_function = self.current_function;
        self.current_function = kind;

        self.begin_scope();
        for param in &data.params {
            self.declare(param);
            self.define(param);
        }
        self.resolve_stmts(&data.body);
        self.end_scope();

        self.current_function = enclosing_function;
    }
}

impl StmtVisitor<()> for Resolver<'_, '_> {
    fn visit_expression_stmt(&mut self, expr: &Expr) {
        self.resolve_expr(expr);
    }

    fn visit_print_stmt(&mut self, expr: &Expr) {
        self.resolve_expr(expr);
    }

    fn visit_var_stmt(&mut self, data: &VarData) {
        self.declare(&data.name);
        if let Some(initializer) = &data.initializer {
            self.resolve_expr(initializer);
        }
        self.define(&data.name);
    }

    fn visit_block_stmt(&mut self, stmts: &[Stmt]) {
        self.begin_scope();
        self.resolve_stmts(stmts);
        self.end_scope();
    }

    fn visit_if_stmt(&mut self, data: &IfData) {
        self.resolve_expr(&data.condition);
        self.resolve_stmt(&data.then_branch);
        if let Some(else_branch) = &data.else_branch {
            self.resolve_stmt(else_branch);
        }
    }

    fn visit_while_stmt(&mut self, data: &WhileData) {
        self.resolve_expr(&data.condition);
        self.resolve_stmt(&data.body);
    }

    fn visit_function_stmt(&mut self, data: &FunctionData) {
        self.declare(&data.name);
        self.define(&data.name);
        self.resolve_function(data, FunctionType::Function);
    }

    fn visit_return_stmt(&mut self, data: &ReturnData) {
        if self.current_function == FunctionType::None {
            self.reporter.resolve_error(&ResolveError {
                token: data.keyword.clone(),
                message: "Can't return from top-level code.".to_string(),
            });
        }
        if let Some(value) = &data.value {
            if self.current_function == FunctionType::Initializer {
                self.reporter.resolve_error(&ResolveError {
                    token: data.keyword.clone(),
                    message: "Can't return a value from an initializer.".to_string(),
                });
            }
            self.resolve_expr(value);
        }
    }

    fn visit_class_stmt(&mut self, data: &ClassData) {
        let enclosing_class = self.current_class;
        self.current_class = ClassType::Class;

        self.declare(&data.name);
        self.define(&data.name);

        self.begin_scope();
        self.scopes.last_mut().unwrap().insert("this".to_string(), VarState::Defined);

        for method in &data.methods {
            let kind =
                if method.name.lexeme == "init" { FunctionType::Initializer } else { FunctionType::Method };
            self.resolve_function(method, kind);
        }

        self.end_scope();
        self.current_class = enclosing_class;
    }
}

impl ExprVisitor<()> for Resolver<'_, '_> {
    fn visit_literal_expr(&mut self, _literal: &crate::literal::Literal) {}

    fn visit_grouping_expr(&mut self, data: &GroupingData) {
        self.resolve_expr(&data.expr);
    }

    fn visit_unary_expr(&mut self, data: &UnaryData) {
        self.resolve_expr(&data.right);
    }

    fn visit_binary_expr(&mut self, data: &BinaryData) {
        self.resolve_expr(&data.left);
        self.resolve_expr(&data.right);
    }

    fn visit_logical_expr(&mut self, data: &LogicalData) {
        self.resolve_expr(&data.left);
        self.resolve_expr(&data.right);
    }

    fn visit_variable_expr(&mut self, data: &VariableData) {
        if let Some(scope) = self.scopes.last() {
            if scope.get(&data.name.lexeme) == Some(&VarState::Declared) {
                self.reporter.resolve_error(&ResolveError {
                    token: data.name.clone(),
                    message: "Can't read local variable in its own initializer.".to_string(),
                });
            }
        }
        self.resolve_local(data.id, &data.name.lexeme);
    }

    fn visit_assign_expr(&mut self, data: &AssignData) {
        self.resolve_expr(&data.value);
        self.resolve_local(data.id, &data.name.lexeme);
    }

    fn visit_call_expr(&mut self, data: &CallData) {
        self.resolve_expr(&data.callee);
        for argument in &data.arguments {
            self.resolve_expr(argument);
        }
    }

    fn visit_get_expr(&mut self, data: &GetData) {
        self.resolve_expr(&data.object);
    }

    fn visit_set_expr(&mut self, data: &SetData) {
        self.resolve_expr(&data.value);
        self.resolve_expr(&data.object);
    }

    fn visit_this_expr(&mut self, data: &ThisData) {
        if self.current_class == ClassType::None {
            self.reporter.resolve_error(&ResolveError {
                token: data.keyword.clone(),
                message: "Can't use 'this' outside of a class.".to_string(),
            });
            return;
        }
        self.resolve_local(data.id, "this");
    }
}
