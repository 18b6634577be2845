use crate::expr::{BinaryData, CallData, Expr, ExprVisitor, GetData, GroupingData};
use crate::expr::{AssignData, LogicalData, SetData, ThisData, UnaryData, VariableData};
use crate::literal::Literal;

/// The parenthesized-notation printer used by the `parse` CLI command.
pub struct AstPrinter;

impl AstPrinter {
    pub fn print(expr: &Expr) -> String {
        let mut printer = AstPrinter;
        expr.accept(&mut printer)
    }

    fn parenthesize(&mut self, name: &str, exprs: &[&Expr]) -> String {
        let mut out = format!("({name}");
        for expr in exprs {
            out.push(' ');
            out.push_str(&expr.accept(self));
        }
        out.push(')');
        out
    }
}

impl ExprVisitor<String> for AstPrinter {
    fn visit_literal_expr(&mut self, literal: &Literal) -> String {
        match literal {
            Literal::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() {
                    format!("{n:.1}")
                } else {
                    format!("{n}")
                }
            }
            Literal::Bool(b) => b.to_string(),
            Literal::Nil => "nil".to_string(),
            Literal::String(s) => s.clone(),
        }
    }

    fn visit_grouping_expr(&mut self, data: &GroupingData) -> String {
        self.parenthesize("group", &[&data.expr])
    }

    fn visit_unary_expr(&mut self, data: &UnaryData) -> String {
        self.parenthesize(&data.operator.lexeme, &[&data.right])
    }

    fn visit_binary_expr(&mut self, data: &BinaryData) -> String {
        self.parenthesize(&data.operator.lexeme, &[&data.left, &data.right])
    }

    fn visit_logical_expr(&mut self, data: &LogicalData) -> String {
        let name = data.operator.lexeme.to_uppercase();
        self.parenthesize(&name, &[&data.left, &data.right])
    }

    fn visit_variable_expr(&mut self, data: &VariableData) -> String {
        data.name.lexeme.clone()
    }

    fn visit_assign_expr(&mut self, data: &AssignData) -> String {
        format!("(= {} {})", data.name.lexeme, data.value.accept(self))
    }

    fn visit_call_expr(&mut self, data: &CallData) -> String {
        let callee = data.callee.accept(self);
        let args: Vec<String> = data.arguments.iter().map(|arg| arg.accept(self)).collect();
        format!("{callee}({})", args.join(", "))
    }

    fn visit_get_expr(&mut self, data: &GetData) -> String {
        format!("(. {} {})", data.object.accept(self), data.name.lexeme)
    }

    fn visit_set_expr(&mut self, data: &SetData) -> String {
        format!("(= (. {} {}) {})", data.object.accept(self), data.name.lexeme, data.value.accept(self))
    }

    fn visit_this_expr(&mut self, _data: &ThisData) -> String {
        "this".to_string()
    }
}
