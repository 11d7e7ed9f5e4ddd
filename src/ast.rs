use std::string::String;
use std::fmt;
use std::fmt::Formatter;

/// Borrowed view over anything the evaluator can reduce.
#[derive(Clone, Copy)]
pub enum Node<'a> {
    Program(&'a Program),
    Statement(&'a Statement),
    Expression(&'a Expression),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>
}

impl Program {
    pub fn token_literal(&self) -> String {
        match self.statements.first() {
            Some(stmt) => stmt.token_literal(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for stmt in self.statements.iter() {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockStatement {
    pub statements: Vec<Statement>
}

impl BlockStatement {
    pub fn new(statements: Vec<Statement>) -> Self {
        BlockStatement { statements }
    }
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for stmt in self.statements.iter() {
            write!(f, "{}", stmt)?
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    LetStatement{name: String, value: Expression},
    ReturnStatement(Option<Expression>),
    ExpressionStatement(Expression),
    BlockStatement(BlockStatement),
    /// `for (let name = init; condition; update) { body }`. `update` is
    /// always an `Expression::Assignment`.
    ForLoopStatement{
        counter: String,
        init: Expression,
        condition: Expression,
        update: Expression,
        body: BlockStatement,
    },
}

impl Statement {
    pub fn token_literal(&self) -> String {
        match self {
            Statement::LetStatement { .. } => "let".to_string(),
            Statement::ReturnStatement(_) => "return".to_string(),
            Statement::ExpressionStatement(exp) => exp.token_literal(),
            Statement::BlockStatement(_) => "{".to_string(),
            Statement::ForLoopStatement { .. } => "for".to_string(),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Statement::LetStatement { name, value } => {
                write!(f, "let {} = {}", name, value)?
            },
            Statement::ReturnStatement(ret) => match ret {
                Some(ret) => write!(f, "return {}", ret)?,
                None => write!(f, "return")?,
            },
            Statement::ExpressionStatement(exp) => {
                write!(f, "{}", exp)?
            },
            Statement::BlockStatement(block) => {
                write!(f, "{}", block)?
            },
            Statement::ForLoopStatement { counter, init, condition, update, body } => {
                write!(f, "for (let {} = {}; {}; {}) {{{}}}", counter, init, condition, update, body)?
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    Identifier(String),
    Boolean(bool),
    Integer(i64),
    String(String),
    Array(Vec<Expression>),
    Hash(Vec<(Expression, Expression)>),
    PrefixExpression{
        operation: String,
        right: Box<Expression>
    },
    InfixExpression {
        operation: String,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    IfExpression{
        condition: Box<Expression>,
        consequence: BlockStatement,
        alternative: Option<BlockStatement>,
    },
    Function{
        parameters: Vec<String>,
        body: BlockStatement,
    },
    CallExpression{
        function: Box<Expression>,
        arguments: Vec<Expression>,
    },
    IndexExpression{
        left: Box<Expression>,
        index: Box<Expression>,
    },
    IndexAssignment{
        left: Box<Expression>,
        index: Box<Expression>,
        value: Box<Expression>,
    },
    /// `receiver.method(arguments)`; both `receiver` and `method` are
    /// identifiers.
    InternalFunctionCall{
        receiver: Box<Expression>,
        method: Box<Expression>,
        arguments: Vec<Expression>,
    },
    Assignment{
        name: String,
        value: Box<Expression>,
    },
}

impl Expression {
    pub fn token_literal(&self) -> String {
        match self {
            Expression::Identifier(ident) => ident.clone(),
            Expression::Boolean(b) => b.to_string(),
            Expression::Integer(int) => int.to_string(),
            Expression::String(st) => st.clone(),
            Expression::Array(_) | Expression::IndexExpression { .. } | Expression::IndexAssignment { .. } => "[".to_string(),
            Expression::Hash(_) => "{".to_string(),
            Expression::PrefixExpression { operation, .. } => operation.clone(),
            Expression::InfixExpression { operation, .. } => operation.clone(),
            Expression::IfExpression { .. } => "if".to_string(),
            Expression::Function { .. } => "fn".to_string(),
            Expression::CallExpression { .. } => "(".to_string(),
            Expression::InternalFunctionCall { .. } => ".".to_string(),
            Expression::Assignment { .. } => "=".to_string(),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(ident) => {write!(f, "{}", ident)},
            Expression::Boolean(b) => {write!(f, "{}", b)},
            Expression::Integer(int) => {write!(f, "{}", int)},
            Expression::String(st) => {write!(f, "{}", st)},
            Expression::Array(exps) => {
                write!(f, "[{}]", join(exps))
            },
            Expression::Hash(pairs) => {
                write!(f, "{{{}}}", pairs.iter().
                    map(|(k, v)| format!("{}: {}", k, v)).
                    collect::<Vec<_>>().join(", "))
            },
            Expression::PrefixExpression { operation, right } => {
                write!(f, "({}{})", operation, right)
            },
            Expression::InfixExpression { operation, left, right } => {
                write!(f, "({} {} {})", left, operation, right)
            }
            Expression::IfExpression { condition, consequence, alternative } => {
                write!(f, "if {} {{{}}}", condition, consequence)?;
                if let Some(alt) = alternative {
                    write!(f, " else {{{}}}", alt)?;
                }
                Ok(())
            },
            Expression::Function { parameters, body } => {
                write!(f, "fn ({}) {{{}}}", parameters.join(", "), body)
            },
            Expression::CallExpression { function, arguments } => {
                write!(f, "{}({})", function, join(arguments))
            }
            Expression::IndexExpression { left, index} => {
                write!(f, "({}[{}])", left, index)
            }
            Expression::IndexAssignment { left, index, value } => {
                write!(f, "{}[{}] = {}", left, index, value)
            }
            Expression::InternalFunctionCall { receiver, method, arguments } => {
                write!(f, "{}.{}({})", receiver, method, join(arguments))
            }
            Expression::Assignment { name, value } => {
                write!(f, "{} = {}", name, value)
            }
        }
    }
}

fn join(exps: &[Expression]) -> String {
    exps.iter().map(|exp| exp.to_string()).collect::<Vec<_>>().join(", ")
}
