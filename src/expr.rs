use crate::literal::Literal;
use crate::token::Token;

/// Monotonic id assigned to every `Variable`/`Assign`/`This` node at parse
/// time. The resolver's binding-distance table keys on this rather than on
/// structural equality, since two syntactically identical `Variable("x")`
/// nodes at different source positions can resolve to different scopes.
pub type NodeId = u32;

#[derive(Debug, Clone, PartialEq)]
pub struct GroupingData {
    pub expr: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryData {
    pub operator: Token,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryData {
    pub left: Box<Expr>,
    pub operator: Token,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogicalData {
    pub left: Box<Expr>,
    pub operator: Token,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableData {
    pub id: NodeId,
    pub name: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignData {
    pub id: NodeId,
    pub name: Token,
    pub value: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallData {
    pub callee: Box<Expr>,
    pub paren: Token,
    pub arguments: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GetData {
    pub object: Box<Expr>,
    pub name: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetData {
    pub object: Box<Expr>,
    pub name: Token,
    pub value: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThisData {
    pub id: NodeId,
    pub keyword: Token,
}

/// An expression node. Every variant owns exactly the operands described in
/// the data model; `Literal` carries its value inline since it has nothing
/// else to hold.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Grouping(GroupingData),
    Unary(UnaryData),
    Binary(BinaryData),
    Logical(LogicalData),
    Variable(VariableData),
    Assign(AssignData),
    Call(CallData),
    Get(GetData),
    Set(SetData),
    This(ThisData),
}

impl Expr {
    pub fn accept<T>(&self, visitor: &mut dyn ExprVisitor<T>) -> T {
        match self {
            Expr::Literal(literal) => visitor.visit_literal_expr(literal),
            Expr::Grouping(data) => visitor.visit_grouping_expr(data),
            Expr::Unary(data) => visitor.visit_unary_expr(data),
            Expr::Binary(data) => visitor.visit_binary_expr(data),
            Expr::Logical(data) => visitor.visit_logical_expr(data),
            Expr::Variable(data) => visitor.visit_variable_expr(data),
            Expr::Assign(data) => visitor.visit_assign_expr(data),
            Expr::Call(data) => visitor.visit_call_expr(data),
            Expr::Get(data) => visitor.visit_get_expr(data),
            Expr::Set(data) => visitor.visit_set_expr(data),
            Expr::This(data) => visitor.visit_this_expr(data),
        }
    }
}

pub trait ExprVisitor<T> {
    fn visit_literal_expr(&mut self, literal: &Literal) -> T;
    fn visit_grouping_expr(&mut self, data: &GroupingData) -> T;
    fn visit_unary_expr(&mut self, data: &UnaryData) -> T;
    fn visit_binary_expr(&mut self, data: &BinaryData) -> T;
    fn visit_logical_expr(&mut self, data: &LogicalData) -> T;
    fn visit_variable_expr(&mut self, data: &VariableData) -> T;
    fn visit_assign_expr(&mut self, data: &AssignData) -> T;
    fn visit_call_expr(&mut self, data: &CallData) -> T;
    fn visit_get_expr(&mut self, data: &GetData) -> T;
    fn visit_set_expr(&mut self, data: &SetData) -> T;
    fn visit_this_expr(&mut self, data: &ThisData) -> T;
}
