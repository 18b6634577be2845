use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

use crate::class::{Class, Instance};
use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::expr::*;
use crate::function::{LoxFunction, NativeFunction};
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::resolver::BindingDistances;
use crate::stmt::*;
use crate::token::{Token, Type};

/// `Return` is modeled as a control-flow unwind, not a [`RuntimeError`].
/// It is expected and handled at exactly the function-call boundary rather
/// than propagating to the top level.
pub enum Unwind {
    Return(Object),
    Error(RuntimeError),
}

impl From<RuntimeError> for Unwind {
    fn from(error: RuntimeError) -> Self {
        Unwind::Error(error)
    }
}

type ExecResult = Result<(), Unwind>;
type EvalResult = Result<Object, RuntimeError>;

pub struct Interpreter<'a> {
    globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    distances: BindingDistances,
    output: &'a mut dyn Write,
}

impl<'a> Interpreter<'a> {
    pub fn new(distances: BindingDistances, output: &'a mut dyn Write) -> Interpreter<'a> {
        let globals = Environment::new_global();
        globals
            .borrow_mut()
            .define("clock".to_string(), Object::NativeFunction(Rc::new(NativeFunction::clock())));

        Interpreter { environment: Rc::clone(&globals), globals, distances, output }
    }

    /// Runs a full program (`run`); stops at the first runtime error.
    pub fn interpret(&mut self, stmts: &[Stmt]) -> Result<(), RuntimeError> {
        for stmt in stmts {
            match self.execute(stmt) {
                Ok(()) => {}
                Err(Unwind::Error(error)) => return Err(error),
                Err(Unwind::Return(_)) => unreachable!("return outside a function is a resolver error"),
            }
        }
        Ok(())
    }

    /// Evaluates a single expression (`evaluate`).
    pub fn interpret_expr(&mut self, expr: &Expr) -> EvalResult {
        self.evaluate(expr)
    }

    fn execute(&mut self, stmt: &Stmt) -> ExecResult {
        stmt.accept(self)
    }

    pub fn execute_block(&mut self, stmts: &[Stmt], env: Rc<RefCell<Environment>>) -> ExecResult {
        let previous = std::mem::replace(&mut self.environment, env);

        let result = (|| {
            for stmt in stmts {
                self.execute(stmt)?;
            }
            Ok(())
        })();

        // Guaranteed restoration on every exit path, including a propagated
        // error or return unwind.
        self.environment = previous;
        result
    }

    fn evaluate(&mut self, expr: &Expr) -> EvalResult {
        expr.accept(self)
    }

    fn lookup_variable(&self, id: NodeId, name: &Token) -> EvalResult {
        match self.distances.get(&id) {
            Some(&distance) => Ok(Environment::get_at(&self.environment, distance, &name.lexeme)),
            None => self.globals.borrow().get(name),
        }
    }
}

impl ExprVisitor<EvalResult> for Interpreter<'_> {
    fn visit_literal_expr(&mut self, literal: &Literal) -> EvalResult {
        Ok(Object::Literal(literal.clone()))
    }

    fn visit_grouping_expr(&mut self, data: &GroupingData) -> EvalResult {
        self.evaluate(&data.expr)
    }

    fn visit_unary_expr(&mut self, data: &UnaryData) -> EvalResult {
        let right = self.evaluate(&data.right)?;
        match data.operator.r#type {
            Type::Minus => match right {
                Object::Literal(Literal::Number(n)) => Ok(Object::Literal(Literal::Number(-n))),
                _ => Err(operands_must_be_numbers(&data.operator)),
            },
            Type::Bang => Ok(Object::Literal(Literal::Bool(!right.is_truthy()))),
            _ => unreachable!("parser only produces ! and - as unary operators"),
        }
    }

    fn visit_binary_expr(&mut self, data: &BinaryData) -> EvalResult {
        let left = self.evaluate(&data.left)?;
        let right = self.evaluate(&data.right)?;

        match data.operator.r#type {
            Type::EqualEqual => Ok(Object::Literal(Literal::Bool(left == right))),
            Type::BangEqual => Ok(Object::Literal(Literal::Bool(left != right))),

            Type::Greater | Type::GreaterEqual | Type::Less | Type::LessEqual => {
                let (a, b) = as_numbers(&left, &right).ok_or_else(|| operands_must_be_numbers(&data.operator))?;
                let result = match data.operator.r#type {
                    Type::Greater => a > b,
                    Type::GreaterEqual => a >= b,
                    Type::Less => a < b,
                    Type::LessEqual => a <= b,
                    _ => unreachable!(),
                };
                Ok(Object::Literal(Literal::Bool(result)))
            }

            Type::Minus => {
                let (a, b) = as_numbers(&left, &right).ok_or_else(|| operands_must_be_numbers(&data.operator))?;
                Ok(Object::Literal(Literal::Number(a - b)))
            }
            Type::Star => {
                let (a, b) = as_numbers(&left, &right).ok_or_else(|| operands_must_be_numbers(&data.operator))?;
                Ok(Object::Literal(Literal::Number(a * b)))
            }
            Type::Slash => {
                let (a, b) = as_numbers(&left, &right).ok_or_else(|| operands_must_be_numbers(&data.operator))?;
                Ok(Object::Literal(Literal::Number(a / b)))
            }

            Type::Plus => match (&left, &right) {
                (Object::Literal(Literal::Number(a)), Object::Literal(Literal::Number(b))) => {
                    Ok(Object::Literal(Literal::Number(a + b)))
                }
                (Object::Literal(Literal::String(a)), Object::Literal(Literal::String(b))) => {
                    Ok(Object::Literal(Literal::String(format!("{a}{b}"))))
                }
                _ => Err(RuntimeError {
                    token: data.operator.clone(),
                    message: "Operands must be two numbers or two strings.".to_string(),
                }),
            },

            _ => unreachable!("parser only produces comparison/arithmetic/equality operators here"),
        }
    }

    fn visit_logical_expr(&mut self, data: &LogicalData) -> EvalResult {
        let left = self.evaluate(&data.left)?;
        match data.operator.r#type {
            Type::Or if left.is_truthy() => Ok(left),
            Type::Or => self.evaluate(&data.right),
            Type::And if !left.is_truthy() => Ok(left),
            Type::And => self.evaluate(&data.right),
            _ => unreachable!("parser only produces and/or as logical operators"),
        }
    }

    fn visit_variable_expr(&mut self, data: &VariableData) -> EvalResult {
        self.lookup_variable(data.id, &data.name)
    }

    fn visit_assign_expr(&mut self, data: &AssignData) -> EvalResult {
        let value = self.evaluate(&data.value)?;
        match self.distances.get(&data.id) {
            Some(&distance) => {
                Environment::assign_at(&self.environment, distance, &data.name, value.clone());
            }
            None => self.globals.borrow_mut().assign(&data.name, value.clone())?,
        }
        Ok(value)
    }

    fn visit_call_expr(&mut self, data: &CallData) -> EvalResult {
        let callee = self.evaluate(&data.callee)?;
        let mut arguments = Vec::with_capacity(data.arguments.len());
        for argument in &data.arguments {
            arguments.push(self.evaluate(argument)?);
        }

        let arity = match &callee {
            Object::Function(function) => function.arity(),
            Object::NativeFunction(native) => native.arity(),
            Object::Class(class) => class.arity(),
            _ => {
                return Err(RuntimeError {
                    token: data.paren.clone(),
                    message: "Can only call functions and classes.".to_string(),
                });
            }
        };

        if arguments.len() != arity {
            return Err(RuntimeError {
                token: data.paren.clone(),
                message: format!("Expected {} arguments but got {}.", arity, arguments.len()),
            });
        }

        match &callee {
            Object::Function(function) => function.call(self, arguments),
            Object::NativeFunction(native) => native.call(self, arguments),
            Object::Class(class) => Class::construct(class, self, arguments),
            _ => unreachable!("already matched above"),
        }
    }

    fn visit_get_expr(&mut self, data: &GetData) -> EvalResult {
        let object = self.evaluate(&data.object)?;
        match object {
            Object::Instance(instance) => Instance::get(&instance, &data.name),
            _ => Err(RuntimeError {
                token: data.name.clone(),
                message: "Only instances have properties.".to_string(),
            }),
        }
    }

    fn visit_set_expr(&mut self, data: &SetData) -> EvalResult {
        let object = self.evaluate(&data.object)?;
        let Object::Instance(instance) = object else {
            return Err(RuntimeError {
                token: data.name.clone(),
                message: "Only instances have fields.".to_string(),
            });
        };
        let value = self.evaluate(&data.value)?;
        instance.borrow_mut().set(&data.name, value.clone());
        Ok(value)
    }

    fn visit_this_expr(&mut self, data: &ThisData) -> EvalResult {
        self.lookup_variable(data.id, &data.keyword)
    }
}

impl StmtVisitor<ExecResult> for Interpreter<'_> {
    fn visit_expression_stmt(&mut self, expr: &Expr) -> ExecResult {
        self.evaluate(expr)?;
        Ok(())
    }

    fn visit_print_stmt(&mut self, expr: &Expr) -> ExecResult {
        let value = self.evaluate(expr)?;
        let _ = writeln!(self.output, "{}", value.stringify());
        Ok(())
    }

    fn visit_var_stmt(&mut self, data: &VarData) -> ExecResult {
        let value = match &data.initializer {
            Some(initializer) => self.evaluate(initializer)?,
            None => Object::Literal(Literal::Nil),
        };
        self.environment.borrow_mut().define(data.name.lexeme.clone(), value);
        Ok(())
    }

    fn visit_block_stmt(&mut self, stmts: &[Stmt]) -> ExecResult {
        let env = Environment::new_enclosed(&self.environment);
        self.execute_block(stmts, env)
    }

    fn visit_if_stmt(&mut self, data: &IfData) -> ExecResult {
        if self.evaluate(&data.condition)?.is_truthy() {
            self.execute(&data.then_branch)
        } else if let Some(else_branch) = &data.else_branch {
            self.execute(else_branch)
        } else {
            Ok(())
        }
    }

    fn visit_while_stmt(&mut self, data: &WhileData) -> ExecResult {
        while self.evaluate(&data.condition)?.is_truthy() {
            self.execute(&data.body)?;
        }
        Ok(())
    }

    fn visit_function_stmt(&mut self, data: &FunctionData) -> ExecResult {
        let function = LoxFunction::new(data, &self.environment, false);
        self.environment.borrow_mut().define(data.name.lexeme.clone(), Object::Function(Rc::new(function)));
        Ok(())
    }

    fn visit_return_stmt(&mut self, data: &ReturnData) -> ExecResult {
        let value = match &data.value {
            Some(value) => self.evaluate(value)?,
            None => Object::Literal(Literal::Nil),
        };
        Err(Unwind::Return(value))
    }

    fn visit_class_stmt(&mut self, data: &ClassData) -> ExecResult {
        self.environment.borrow_mut().define(data.name.lexeme.clone(), Object::Literal(Literal::Nil));

        let mut methods = HashMap::new();
        for method in &data.methods {
            let is_initializer = method.name.lexeme == "init";
            let function = LoxFunction::new(method, &self.environment, is_initializer);
            methods.insert(method.name.lexeme.clone(), Rc::new(function));
        }

        let class = Object::Class(Rc::new(Class::new(data.name.lexeme.clone(), methods)));
        self.environment.borrow_mut().assign(&data.name, class)?;
        Ok(())
    }
}

fn as_numbers(left: &Object, right: &Object) -> Option<(f64, f64)> {
    match (left, right) {
        (Object::Literal(Literal::Number(a)), Object::Literal(Literal::Number(b))) => Some((*a, *b)),
        _ => None,
    }
}

fn operands_must_be_numbers(operator: &Token) -> RuntimeError {
    RuntimeError { token: operator.clone(), message: "Operands must be numbers.".to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Reporter;
    use crate::parser::Parser;
    use crate::resolver::Resolver;
    use crate::scanner::Scanner;

    fn run(source: &str) -> (String, bool, bool) {
        let mut stderr = Vec::new();
        let mut reporter = Reporter::new(&mut stderr);
        let tokens = Scanner::new(source).scan_tokens(&mut reporter);
        let stmts = Parser::new(tokens).parse_program(&mut reporter);
        let distances = Resolver::new(&mut reporter).resolve(&stmts);

        let mut output = Vec::new();
        let mut interpreter = Interpreter::new(distances, &mut output);
        let result = interpreter.interpret(&stmts);
        (String::from_utf8(output).unwrap(), result.is_err(), reporter.had_error())
    }

    #[test]
    fn arithmetic_and_string_concatenation() {
        let (output, errored, _) = run(r#"print 1 + 2 * 3; print "a" + "b";"#);
        assert!(!errored);
        assert_eq!(output, "7\nab\n");
    }

    #[test]
    fn division_by_zero_produces_infinity_not_an_error() {
        let (output, errored, _) = run("print 1 / 0; print -1 / 0; print 0 / 0;");
        assert!(!errored);
        assert_eq!(output, "inf\n-inf\nNaN\n");
    }

    #[test]
    fn adding_a_number_to_a_string_is_a_runtime_error() {
        let (_, errored, _) = run(r#"print 1 + "a";"#);
        assert!(errored);
    }

    #[test]
    fn calling_a_function_with_the_wrong_arity_does_not_run_its_body() {
        let (output, errored, _) = run(
            r#"
            fun f(a, b) { print "ran"; }
            f(1);
        "#,
        );
        assert!(errored);
        assert_eq!(output, "", "the arity check must happen before the call executes");
    }

    #[test]
    fn closures_capture_their_defining_environment() {
        let (output, errored, _) = run(
            r#"
            fun makeCounter() {
                var i = 0;
                fun count() {
                    i = i + 1;
                    print i;
                }
                return count;
            }
            var counter = makeCounter();
            counter();
            counter();
        "#,
        );
        assert!(!errored);
        assert_eq!(output, "1\n2\n");
    }

    #[test]
    fn block_scoping_restores_the_outer_environment_on_return() {
        let (output, errored, _) = run(
            r#"
            fun f() {
                var a = "outer";
                {
                    var a = "inner";
                    return a;
                }
            }
            print f();
        "#,
        );
        assert!(!errored);
        assert_eq!(output, "inner\n");
    }

    #[test]
    fn class_construction_and_method_dispatch() {
        let (output, errored, _) = run(
            r#"
            class Greeter {
                init(name) {
                    this.name = name;
                }
                greet() {
                    print "Hello, " + this.name + "!";
                }
            }
            Greeter("world").greet();
        "#,
        );
        assert!(!errored);
        assert_eq!(output, "Hello, world!\n");
    }

    #[test]
    fn undefined_variable_is_a_runtime_error() {
        let (_, errored, _) = run("print missing;");
        assert!(errored);
    }
}
