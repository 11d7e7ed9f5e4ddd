use core::fmt;
use std::collections::HashMap;
use std::fmt::Formatter;
use log::debug;
use crate::ast::{BlockStatement, Expression, Program, Statement};
use crate::lexer::Lexer;
use crate::token::{Token, TokenType};

#[derive(Ord, PartialOrd, Eq, PartialEq, Copy, Clone, Debug)]
enum Precedence {
    LOWEST,
    EQUALS, // ==
    LessGreater, // > <
    SUM, // +, -
    PRODUCT, // *, /
    PREFIX, // -X, !X
    ASSIGN, // x = y
    CALL, // f(x), a[i]
    InternalCall, // a.f(x)
}

impl fmt::Display for Precedence {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self {
            Precedence::LOWEST => write!(f, "LOWEST"),
            Precedence::EQUALS => write!(f, "EQUALS"),
            Precedence::LessGreater => write!(f, "LessGreater"),
            Precedence::SUM => write!(f, "SUM"),
            Precedence::PRODUCT => write!(f, "PRODUCT"),
            Precedence::PREFIX => write!(f, "PREFIX"),
            Precedence::ASSIGN => write!(f, "ASSIGN"),
            Precedence::CALL => write!(f, "CALL"),
            Precedence::InternalCall => write!(f, "InternalCall"),
        }
    }
}

fn get_precedence(token: TokenType) -> Option<Precedence> {
    match token {
        TokenType::EQ | TokenType::NotEq => Some(Precedence::EQUALS),
        TokenType::LT | TokenType::GT => Some(Precedence::LessGreater),
        TokenType::PLUS | TokenType::MINUS => Some(Precedence::SUM),
        TokenType::ASTERISK | TokenType::SLASH => Some(Precedence::PRODUCT),
        TokenType::ASSIGN => Some(Precedence::ASSIGN),
        TokenType::LPAREN | TokenType::LBRACKET => Some(Precedence::CALL),
        TokenType::DOT => Some(Precedence::InternalCall),
        _ => None
    }
}

type PrefixParseFn = fn(&mut Parser) -> Option<Expression>;
type InfixParseFn = fn(&mut Parser, Expression) -> Option<Expression>;

/// Pratt parser. Syntax errors are collected rather than returned so that a
/// single pass reports everything it can detect.
pub struct Parser {
    l: Lexer,
    errors: Vec<String>,

    cur_token: Token,
    peek_token: Token,
    /// Number of `{` opened minus `}` closed, up to and including `cur_token`.
    brace_depth: i32,

    prefix_parse_fns: HashMap<TokenType, PrefixParseFn>,
    infix_parse_fns: HashMap<TokenType, InfixParseFn>,
}

impl Parser {

    pub fn new(l: Lexer) -> Self {
        let mut p = Parser {
            l,
            errors: Vec::new(),

            cur_token: Token::new(TokenType::EOF, ""),
            peek_token: Token::new(TokenType::EOF, ""),
            brace_depth: 0,

            prefix_parse_fns: HashMap::new(),
            infix_parse_fns: HashMap::new(),
        };

        p.register_prefix(TokenType::IDENT, Parser::parse_identifier);
        p.register_prefix(TokenType::INT, Parser::parse_integer_literal);
        p.register_prefix(TokenType::STRING, Parser::parse_string_literal);
        p.register_prefix(TokenType::MINUS, Parser::parse_prefix_expression);
        p.register_prefix(TokenType::BANG, Parser::parse_prefix_expression);
        p.register_prefix(TokenType::TRUE, Parser::parse_boolean);
        p.register_prefix(TokenType::FALSE, Parser::parse_boolean);
        p.register_prefix(TokenType::LPAREN, Parser::parse_grouped_expression);
        p.register_prefix(TokenType::LBRACKET, Parser::parse_array_literal);
        p.register_prefix(TokenType::LBRACE, Parser::parse_hash_literal);
        p.register_prefix(TokenType::IF, Parser::parse_if_expression);
        p.register_prefix(TokenType::FUNCTION, Parser::parse_function_literal);

        for t in [TokenType::PLUS, TokenType::MINUS, TokenType::ASTERISK, TokenType::SLASH,
                  TokenType::EQ, TokenType::NotEq, TokenType::LT, TokenType::GT] {
            p.register_infix(t, Parser::parse_infix_expression);
        }
        p.register_infix(TokenType::LPAREN, Parser::parse_call_expression);
        p.register_infix(TokenType::LBRACKET, Parser::parse_index_expression);
        p.register_infix(TokenType::DOT, Parser::parse_internal_function_call);
        p.register_infix(TokenType::ASSIGN, Parser::parse_assignment_expression);

        // filling cur_token and peek_token
        p.next_token();
        p.next_token();

        p
    }

    fn register_prefix(&mut self, t: TokenType, f: PrefixParseFn) {
        self.prefix_parse_fns.insert(t, f);
    }

    fn register_infix(&mut self, t: TokenType, f: InfixParseFn) {
        self.infix_parse_fns.insert(t, f);
    }

    fn next_token(&mut self) {
        self.cur_token = std::mem::replace(&mut self.peek_token, self.l.next_token());
        match self.cur_token.token_type {
            TokenType::LBRACE => self.brace_depth += 1,
            TokenType::RBRACE => self.brace_depth -= 1,
            _ => {}
        }
    }

    fn cur_token_is(&self, t: TokenType) -> bool {
        self.cur_token.token_type == t
    }

    fn peek_token_is(&self, t: TokenType) -> bool {
        self.peek_token.token_type == t
    }

    fn expect_peek(&mut self, t: TokenType) -> bool {
        if self.peek_token_is(t) {
            self.next_token();
            true
        } else {
            self.peek_error(t);
            false
        }
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.clone()
    }

    fn peek_error(&mut self, t: TokenType) {
        self.errors.push(format!("expected next token to be {}, got {} instead",
            t, self.peek_token.token_type))
    }

    fn no_prefix_parse_fn_error(&mut self, t: TokenType) {
        self.errors.push(format!("no prefix parse function for {} found", t))
    }

    pub fn parse_program(&mut self) -> Program {
        let mut p = Program{
            statements: Vec::new(),
        };

        while !self.cur_token_is(TokenType::EOF) {
            let depth = self.brace_depth;
            match self.parse_statement() {
                Some(s) => p.statements.push(s),
                None => self.synchronize(depth),
            }
            self.next_token();
        }
        debug!("parsed {} statements with {} errors", p.statements.len(), self.errors.len());
        p
    }

    /// Skips the rest of a malformed statement that started at brace depth
    /// `depth`. Stops on a `;` at that depth, on the `}` closing the enclosing
    /// block, or at EOF; braces opened inside the statement are skipped whole.
    fn synchronize(&mut self, depth: i32) {
        loop {
            match self.cur_token.token_type {
                TokenType::EOF => return,
                TokenType::SEMICOLON if self.brace_depth == depth => return,
                TokenType::RBRACE if self.brace_depth < depth => return,
                _ => self.next_token(),
            }
        }
    }

    fn parse_statement(&mut self) -> Option<Statement> {
        match self.cur_token.token_type {
            TokenType::LET => self.parse_let_statement(),
            TokenType::RETURN => self.parse_return_statement(),
            TokenType::FOR => self.parse_for_loop_statement(),
            _ => self.parse_expression_statement()
        }
    }

    // `let IDENT = EXPR`, leaving the optional semicolon to the caller.
    fn parse_let_binding(&mut self) -> Option<(String, Expression)> {
        if !self.expect_peek(TokenType::IDENT) {
            return None;
        }

        let name = self.cur_token.literal.clone();

        if !self.expect_peek(TokenType::ASSIGN) {
            return None;
        }
        self.next_token();

        let value = self.parse_expression(Precedence::LOWEST)?;
        Some((name, value))
    }

    fn parse_let_statement(&mut self) -> Option<Statement> {
        let (name, value) = self.parse_let_binding()?;

        if self.peek_token_is(TokenType::SEMICOLON) {
            self.next_token();
        }
        Some(Statement::LetStatement { name, value })
    }

    fn parse_return_statement(&mut self) -> Option<Statement> {
        if self.peek_token_is(TokenType::SEMICOLON) {
            self.next_token();
            return Some(Statement::ReturnStatement(None));
        }
        if self.peek_token_is(TokenType::RBRACE) || self.peek_token_is(TokenType::EOF) {
            return Some(Statement::ReturnStatement(None));
        }

        self.next_token();
        let ret_val = self.parse_expression(Precedence::LOWEST)?;
        if self.peek_token_is(TokenType::SEMICOLON) {
            self.next_token();
        }
        Some(Statement::ReturnStatement(Some(ret_val)))
    }

    fn parse_for_loop_statement(&mut self) -> Option<Statement> {
        if !self.expect_peek(TokenType::LPAREN) {
            return None;
        }
        if !self.expect_peek(TokenType::LET) {
            return None;
        }
        let (counter, init) = self.parse_let_binding()?;
        if !self.expect_peek(TokenType::SEMICOLON) {
            return None;
        }

        self.next_token();
        let condition = self.parse_expression(Precedence::LOWEST)?;
        if !self.expect_peek(TokenType::SEMICOLON) {
            return None;
        }

        self.next_token();
        let update = self.parse_expression(Precedence::LOWEST)?;
        if !matches!(update, Expression::Assignment { .. }) {
            self.errors.push(format!("expected assignment as for loop update, got {} instead", update));
            return None;
        }

        if !self.expect_peek(TokenType::RPAREN) {
            return None;
        }
        if !self.expect_peek(TokenType::LBRACE) {
            return None;
        }
        let body = self.parse_block_statement()?;

        if self.peek_token_is(TokenType::SEMICOLON) {
            self.next_token();
        }
        Some(Statement::ForLoopStatement { counter, init, condition, update, body })
    }

    fn parse_expression_statement(&mut self) -> Option<Statement> {
        let expression = self.parse_expression(Precedence::LOWEST)?;

        if self.peek_token_is(TokenType::SEMICOLON) {
            self.next_token();
        }
        Some(Statement::ExpressionStatement(expression))
    }

    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        let prefix = match self.prefix_parse_fns.get(&self.cur_token.token_type) {
            Some(prefix) => *prefix,
            None => {
                self.no_prefix_parse_fn_error(self.cur_token.token_type);
                return None;
            }
        };
        let mut left_exp = prefix(self)?;

        while !self.peek_token_is(TokenType::SEMICOLON) && precedence < self.peek_precedence() {
            let infix = match self.infix_parse_fns.get(&self.peek_token.token_type) {
                Some(infix) => *infix,
                None => return Some(left_exp),
            };
            self.next_token();
            left_exp = infix(self, left_exp)?;
        }
        Some(left_exp)
    }

    fn peek_precedence(&self) -> Precedence {
        get_precedence(self.peek_token.token_type).unwrap_or(Precedence::LOWEST)
    }

    fn cur_precedence(&self) -> Precedence {
        get_precedence(self.cur_token.token_type).unwrap_or(Precedence::LOWEST)
    }

    fn parse_identifier(&mut self) -> Option<Expression> {
        Some(Expression::Identifier(self.cur_token.literal.clone()))
    }

    fn parse_integer_literal(&mut self) -> Option<Expression> {
        match self.cur_token.literal.parse::<i64>() {
            Ok(value) => Some(Expression::Integer(value)),
            Err(_) => {
                self.errors.push(format!("could not parse {:?} as integer", self.cur_token.literal));
                None
            }
        }
    }

    fn parse_string_literal(&mut self) -> Option<Expression> {
        Some(Expression::String(self.cur_token.literal.clone()))
    }

    fn parse_prefix_expression(&mut self) -> Option<Expression> {
        let op = self.cur_token.literal.clone();
        self.next_token();
        let right = self.parse_expression(Precedence::PREFIX)?;
        Some(Expression::PrefixExpression {
            operation: op,
            right: Box::new(right)
        })
    }

    fn parse_infix_expression(&mut self, left: Expression) -> Option<Expression> {
        let op = self.cur_token.literal.clone();

        let precedence = self.cur_precedence();
        self.next_token();
        let right = self.parse_expression(precedence)?;
        Some(Expression::InfixExpression {
            operation: op,
            left: Box::new(left),
            right: Box::new(right)
        })
    }

    fn parse_assignment_expression(&mut self, left: Expression) -> Option<Expression> {
        let name = match left {
            Expression::Identifier(name) => name,
            other => {
                self.errors.push(format!("expected identifier on the left of =, got {} instead", other));
                return None;
            }
        };
        self.next_token();
        let value = self.parse_expression(Precedence::LOWEST)?;
        Some(Expression::Assignment { name, value: Box::new(value) })
    }

    fn parse_boolean(&mut self) -> Option<Expression> {
        Some(Expression::Boolean(self.cur_token_is(TokenType::TRUE)))
    }

    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.next_token();
        let exp = self.parse_expression(Precedence::LOWEST)?;
        if !self.expect_peek(TokenType::RPAREN) {
            return None;
        }
        Some(exp)
    }

    fn parse_if_expression(&mut self) -> Option<Expression> {
        if !self.expect_peek(TokenType::LPAREN) {
            return None;
        }

        self.next_token();
        let condition = self.parse_expression(Precedence::LOWEST)?;
        if !self.expect_peek(TokenType::RPAREN) {
            return None;
        }
        if !self.expect_peek(TokenType::LBRACE) {
            return None;
        }

        let consequence = self.parse_block_statement()?;

        let alternative = if self.peek_token_is(TokenType::ELSE) {
            self.next_token();
            if !self.expect_peek(TokenType::LBRACE) {
                return None;
            }
            Some(self.parse_block_statement()?)
        } else {
            None
        };

        Some(Expression::IfExpression {
            condition: Box::new(condition),
            consequence,
            alternative,
        })
    }

    fn parse_block_statement(&mut self) -> Option<BlockStatement> {
        let mut stmts = Vec::<Statement>::new();
        self.next_token();
        while !self.cur_token_is(TokenType::RBRACE) && !self.cur_token_is(TokenType::EOF) {
            let depth = self.brace_depth;
            match self.parse_statement() {
                Some(st) => stmts.push(st),
                None => {
                    self.synchronize(depth);
                    if self.cur_token_is(TokenType::RBRACE) {
                        break;
                    }
                }
            }
            self.next_token();
        }
        if self.cur_token_is(TokenType::EOF) {
            self.errors.push(format!("expected next token to be {}, got {} instead",
                TokenType::RBRACE, TokenType::EOF));
            return None;
        }
        Some(BlockStatement::new(stmts))
    }

    fn parse_function_literal(&mut self) -> Option<Expression> {
        if !self.expect_peek(TokenType::LPAREN) {
            return None;
        }
        let parameters = self.parse_function_parameters()?;

        if !self.expect_peek(TokenType::LBRACE) {
            return None;
        }

        let body = self.parse_block_statement()?;

        Some(Expression::Function { parameters, body })
    }

    fn parse_function_parameters(&mut self) -> Option<Vec<String>> {
        let mut params = Vec::new();
        if self.peek_token_is(TokenType::RPAREN) {
            self.next_token();
            return Some(params);
        }

        if !self.expect_peek(TokenType::IDENT) {
            return None;
        }
        params.push(self.cur_token.literal.clone());

        while self.peek_token_is(TokenType::COMMA) {
            self.next_token();
            if !self.expect_peek(TokenType::IDENT) {
                return None;
            }
            params.push(self.cur_token.literal.clone());
        }

        if !self.expect_peek(TokenType::RPAREN) {
            return None;
        }
        Some(params)
    }

    fn parse_call_expression(&mut self, function: Expression) -> Option<Expression> {
        let arguments = self.parse_expression_list(TokenType::RPAREN)?;
        Some(Expression::CallExpression { function: Box::new(function), arguments })
    }

    fn parse_internal_function_call(&mut self, receiver: Expression) -> Option<Expression> {
        if !matches!(receiver, Expression::Identifier(_)) {
            self.errors.push(format!("expected identifier before ., got {} instead", receiver));
            return None;
        }
        if !self.expect_peek(TokenType::IDENT) {
            return None;
        }
        let method = Expression::Identifier(self.cur_token.literal.clone());
        if !self.expect_peek(TokenType::LPAREN) {
            return None;
        }
        let arguments = self.parse_expression_list(TokenType::RPAREN)?;
        Some(Expression::InternalFunctionCall {
            receiver: Box::new(receiver),
            method: Box::new(method),
            arguments,
        })
    }

    fn parse_expression_list(&mut self, end: TokenType) -> Option<Vec<Expression>> {
        let mut list = Vec::new();
        if self.peek_token_is(end) {
            self.next_token();
            return Some(list)
        }
        self.next_token();
        list.push(self.parse_expression(Precedence::LOWEST)?);

        while self.peek_token_is(TokenType::COMMA) {
            self.next_token();
            self.next_token();
            list.push(self.parse_expression(Precedence::LOWEST)?);
        }
        if !self.expect_peek(end) {
            return None;
        }
        Some(list)
    }

    fn parse_array_literal(&mut self) -> Option<Expression> {
        let elements = self.parse_expression_list(TokenType::RBRACKET)?;
        Some(Expression::Array(elements))
    }

    fn parse_index_expression(&mut self, left: Expression) -> Option<Expression> {
        self.next_token();
        let index = self.parse_expression(Precedence::LOWEST)?;

        if !self.expect_peek(TokenType::RBRACKET) {
            return None;
        }

        if self.peek_token_is(TokenType::ASSIGN) {
            self.next_token();
            self.next_token();
            let value = self.parse_expression(Precedence::LOWEST)?;
            return Some(Expression::IndexAssignment {
                left: Box::new(left),
                index: Box::new(index),
                value: Box::new(value),
            });
        }

        Some(Expression::IndexExpression { left: Box::new(left), index: Box::new(index) })
    }

    fn parse_hash_literal(&mut self) -> Option<Expression> {
        let mut pairs = Vec::new();

        while !self.peek_token_is(TokenType::RBRACE) {
            self.next_token();
            let key = self.parse_expression(Precedence::LOWEST)?;
            if !self.expect_peek(TokenType::COLON) {
                return None;
            }

            self.next_token();

            let value = self.parse_expression(Precedence::LOWEST)?;
            if !self.peek_token_is(TokenType::RBRACE) && !self.expect_peek(TokenType::COMMA) {
                return None;
            }

            pairs.push((key, value));
        }

        if !self.expect_peek(TokenType::RBRACE) {
            return None;
        }
        Some(Expression::Hash(pairs))
    }
}


#[cfg(test)]
mod test {
    use crate::ast::{BlockStatement, Expression, Program, Statement};
    use crate::lexer::Lexer;
    use crate::parser::Parser;

    fn parse(input: &str) -> (Program, Vec<String>) {
        let l = Lexer::new(input);
        let mut p = Parser::new(l);
        let program = p.parse_program();
        (program, p.errors())
    }

    fn parse_ok(input: &str) -> Program {
        let (program, errors) = parse(input);
        assert!(errors.is_empty(), "parser errors for {:?}: {:?}", input, errors);
        program
    }

    fn ident(name: &str) -> Box<Expression> {
        Box::new(Expression::Identifier(name.to_string()))
    }

    #[test]
    fn test_let_statement() {
        struct Test<'a> {
            input: &'a str,
            exp_name: &'a str,
            exp_value: Expression
        }
        let tests = vec![
            Test {input: "let x = 5;", exp_name: "x", exp_value: Expression::Integer(5)},
            Test {input: "let y = true;", exp_name: "y", exp_value: Expression::Boolean(true)},
            Test {input: "let foobar = y", exp_name: "foobar", exp_value: Expression::Identifier("y".to_string())}
        ];

        for test in tests {
            let program = parse_ok(test.input);

            assert_eq!(program.statements.len(), 1);

            match &program.statements[0] {
                Statement::LetStatement { name, value } => {
                    assert_eq!(name, test.exp_name);
                    assert_eq!(value, &test.exp_value);
                },
                _ => {
                    panic!("not let statement")
                }
            }
        }
    }

    #[test]
    fn test_return_statement() {
        struct Test<'a> {
            input: &'a str,
            exp_value: Option<Expression>,
        }
        let tests = vec![
            Test {input: "return true;", exp_value: Some(Expression::Boolean(true))},
            Test {input: "return 5;", exp_value: Some(Expression::Integer(5))},
            Test {input: "return foobar", exp_value: Some(Expression::Identifier("foobar".to_string()))},
            Test {input: "return;", exp_value: None},
            Test {input: "return", exp_value: None},
        ];

        for test in tests {
            let program = parse_ok(test.input);

            assert_eq!(program.statements.len(), 1);

            match &program.statements[0] {
                Statement::ReturnStatement(expression) => {
                    assert_eq!(expression, &test.exp_value);
                },
                _ => {
                    panic!("not return statement")
                }
            }
        }
    }

    #[test]
    fn test_parsing_prefix_expressions() {
        let tests = vec![
            ("!5;", "!", Expression::Integer(5)),
            ("-15;", "-", Expression::Integer(15)),
            ("!true;", "!", Expression::Boolean(true)),
        ];

        for (input, exp_operator, exp_value) in tests {
            let program = parse_ok(input);
            assert_eq!(program.statements.len(), 1);

            assert_eq!(program.statements[0], Statement::ExpressionStatement(Expression::PrefixExpression {
                operation: exp_operator.to_string(),
                right: Box::new(exp_value),
            }));
        }
    }

    #[test]
    fn test_parsing_infix_expressions() {
        struct Test<'a> {
            input: &'a str,
            exp_left: Expression,
            exp_operator: &'a str,
            exp_right: Expression,
        }
        let tests = vec![
            Test {input: "5+3;", exp_left: Expression::Integer(5), exp_operator: "+", exp_right: Expression::Integer(3)},
            Test {input: "5-3;", exp_left: Expression::Integer(5), exp_operator: "-", exp_right: Expression::Integer(3)},
            Test {input: "5*3;", exp_left: Expression::Integer(5), exp_operator: "*", exp_right: Expression::Integer(3)},
            Test {input: "5/3;", exp_left: Expression::Integer(5), exp_operator: "/", exp_right: Expression::Integer(3)},
            Test {input: "5<3;", exp_left: Expression::Integer(5), exp_operator: "<", exp_right: Expression::Integer(3)},
            Test {input: "5>3;", exp_left: Expression::Integer(5), exp_operator: ">", exp_right: Expression::Integer(3)},
            Test {input: "5==3;", exp_left: Expression::Integer(5), exp_operator: "==", exp_right: Expression::Integer(3)},
            Test {input: "5!=3;", exp_left: Expression::Integer(5), exp_operator: "!=", exp_right: Expression::Integer(3)},
            Test {input: "foo!=bar", exp_left: Expression::Identifier("foo".to_string()), exp_operator: "!=", exp_right: Expression::Identifier("bar".to_string())},
            Test {input: "true==bar", exp_left: Expression::Boolean(true), exp_operator: "==", exp_right: Expression::Identifier("bar".to_string())},
        ];

        for test in tests {
            let program = parse_ok(test.input);
            assert_eq!(program.statements.len(), 1);

            match &program.statements[0] {
                Statement::ExpressionStatement(Expression::InfixExpression {operation, left, right}) => {
                    assert_eq!(operation, test.exp_operator);
                    assert_eq!(**left, test.exp_left);
                    assert_eq!(**right, test.exp_right);
                },
                other => panic!("not infix expression statement: {}", other)
            }
        }
    }

    #[test]
    fn test_operator_precedence() {
        struct Test<'a> {
            input: &'a str,
            expected: &'a str,
        }
        let tests = vec![
            Test {input: "-a*b", expected: "((-a) * b)"},
            Test {input: "!-a", expected: "(!(-a))"},
            Test {input: "a+b+c", expected: "((a + b) + c)"},
            Test {input: "a-b-c", expected: "((a - b) - c)"},
            Test {input: "a-b*c", expected: "(a - (b * c))"},
            Test {input: "a + b * c + d / e - f", expected: "(((a + (b * c)) + (d / e)) - f)"},
            Test {input: "0 + 4; -5 / 9", expected: "(0 + 4)((-5) / 9)"},
            Test {input: "5 > 4 == 3<4", expected: "((5 > 4) == (3 < 4))"},
            Test {input: "3 + 4 * 5 == 3 * 1 + 4 * 5", expected: "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))"},
            Test {input: "(5 + 5) * 2", expected: "((5 + 5) * 2)"},
            Test {input: "2 / (5 + 5)", expected: "(2 / (5 + 5))"},
            Test {input: "(5 + 5) * 2 * (5 + 5)", expected: "(((5 + 5) * 2) * (5 + 5))"},
            Test {input: "-(5 + 5)", expected: "(-(5 + 5))"},
            Test {input: "!(true == true)", expected: "(!(true == true))"},
            Test {input: "a + add(b * c) + d", expected: "((a + add((b * c))) + d)"},
            Test {input: "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))", expected: "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)))"},
            Test {input: "add(a * b[2], b[1], 2 * [1, 2][1])", expected: "add((a * (b[2])), (b[1]), (2 * ([1, 2][1])))"},
            Test {input: "x = 1 + 2 * 3", expected: "x = (1 + (2 * 3))"},
            Test {input: "a.push(1 + 2) + 3", expected: "(a.push((1 + 2)) + 3)"},
            Test {input: "arr[1] = 2 * 3", expected: "arr[1] = (2 * 3)"},
        ];

        for test in tests {
            let program = parse_ok(test.input);
            assert_eq!(program.to_string(), test.expected);
        }
    }

    #[test]
    fn test_if_literal() {
        struct Test<'a> {
            input: &'a str,
            expected: Expression,
        }
        let condition = Box::new(Expression::InfixExpression {
            operation: "<".to_string(),
            left: ident("x"),
            right: ident("y"),
        });
        let tests = vec![
            Test {
                input: "if (x <y) {x}",
                expected: Expression::IfExpression {
                    condition: condition.clone(),
                    consequence: BlockStatement::new(vec![Statement::ExpressionStatement(*ident("x"))]),
                    alternative: None
                }
            },
            Test {
                input: "if (x <y) {x} else {y}",
                expected: Expression::IfExpression {
                    condition,
                    consequence: BlockStatement::new(vec![Statement::ExpressionStatement(*ident("x"))]),
                    alternative: Some(BlockStatement::new(vec![Statement::ExpressionStatement(*ident("y"))])),
                }
            }
        ];

        for test in tests {
            let program = parse_ok(test.input);
            assert_eq!(program.statements.len(), 1);
            assert_eq!(&program.statements[0], &Statement::ExpressionStatement(test.expected));
        }
    }

    #[test]
    fn test_function_literal() {
        let tests = vec![
            ("fn() {}", vec![]),
            ("fn(x) {}", vec!["x"]),
            ("fn(x, y, z) {}", vec!["x", "y", "z"]),
        ];
        for (input, expected) in tests {
            let program = parse_ok(input);
            match &program.statements[0] {
                Statement::ExpressionStatement(Expression::Function { parameters, body }) => {
                    assert_eq!(parameters, &expected);
                    assert!(body.statements.is_empty());
                },
                other => panic!("not function literal: {}", other)
            }
        }

        let program = parse_ok("fn(x, y) {x+y;}");
        assert_eq!(program.statements[0], Statement::ExpressionStatement(Expression::Function {
            parameters: vec!["x".to_string(), "y".to_string()],
            body: BlockStatement::new(vec![Statement::ExpressionStatement(Expression::InfixExpression {
                operation: "+".to_string(),
                left: ident("x"),
                right: ident("y"),
            })]),
        }));
    }

    #[test]
    fn test_call_expression() {
        let program = parse_ok("add(1, 2*3, 4+a)");
        assert_eq!(program.statements.len(), 1);
        assert_eq!(program.statements[0], Statement::ExpressionStatement(Expression::CallExpression {
            function: ident("add"),
            arguments: vec![
                Expression::Integer(1),
                Expression::InfixExpression {
                    operation: "*".to_string(),
                    left: Box::new(Expression::Integer(2)),
                    right: Box::new(Expression::Integer(3))
                },
                Expression::InfixExpression {
                    operation: "+".to_string(),
                    left: Box::new(Expression::Integer(4)),
                    right: ident("a"),
                },
            ]
        }));
    }

    #[test]
    fn test_string_literal() {
        let program = parse_ok("\"hello world\"");
        assert_eq!(program.statements[0],
            Statement::ExpressionStatement(Expression::String("hello world".to_string())));
    }

    #[test]
    fn test_array_literal() {
        let program = parse_ok("[1, a+2]");
        assert_eq!(program.statements[0], Statement::ExpressionStatement(Expression::Array(vec![
            Expression::Integer(1),
            Expression::InfixExpression {
                operation: "+".to_string(),
                left: ident("a"),
                right: Box::new(Expression::Integer(2))
            }
        ])));
    }

    #[test]
    fn test_index_expression() {
        let program = parse_ok("myArray[a+2]");
        match &program.statements[0] {
            Statement::ExpressionStatement(Expression::IndexExpression{left, index}) => {
                assert_eq!(left, &ident("myArray"));
                assert_eq!(index.to_string(), "(a + 2)");
            },
            other => panic!("expression is not index expression: {}", other)
        }
    }

    #[test]
    fn test_index_assignment() {
        let program = parse_ok(r#"hash["a"] = 5;"#);
        assert_eq!(program.statements[0], Statement::ExpressionStatement(Expression::IndexAssignment {
            left: ident("hash"),
            index: Box::new(Expression::String("a".to_string())),
            value: Box::new(Expression::Integer(5)),
        }));
    }

    #[test]
    fn test_hash_literal() {
        let program = parse_ok(r#"{"one": 1, "two": 2}"#);
        assert_eq!(program.statements[0], Statement::ExpressionStatement(Expression::Hash(vec![
            (Expression::String("one".to_string()), Expression::Integer(1)),
            (Expression::String("two".to_string()), Expression::Integer(2)),
        ])));

        let program = parse_ok("{}");
        assert_eq!(program.statements[0], Statement::ExpressionStatement(Expression::Hash(vec![])));

        let program = parse_ok(r#"{"one": 0 + 1, true: 10 - 8}"#);
        assert_eq!(program.to_string(), "{one: (0 + 1), true: (10 - 8)}");
    }

    #[test]
    fn test_internal_function_call() {
        let program = parse_ok("arr.slice(1, 2);");
        assert_eq!(program.statements[0], Statement::ExpressionStatement(Expression::InternalFunctionCall {
            receiver: ident("arr"),
            method: ident("slice"),
            arguments: vec![Expression::Integer(1), Expression::Integer(2)],
        }));

        let program = parse_ok("arr.pop()");
        assert_eq!(program.to_string(), "arr.pop()");
    }

    #[test]
    fn test_internal_function_call_requires_identifier() {
        let tests = vec!["[1, 2].pop()", "arr.1()", "arr.pop"];
        for input in tests {
            let (_, errors) = parse(input);
            assert!(!errors.is_empty(), "expected errors for {:?}", input);
        }
    }

    #[test]
    fn test_assignment_expression() {
        let program = parse_ok("x = 5;");
        assert_eq!(program.statements[0], Statement::ExpressionStatement(Expression::Assignment {
            name: "x".to_string(),
            value: Box::new(Expression::Integer(5)),
        }));

        let (_, errors) = parse("5 = 3");
        assert_eq!(errors, vec!["expected identifier on the left of =, got 5 instead".to_string()]);
    }

    #[test]
    fn test_for_loop_statement() {
        let program = parse_ok("for (let i = 0; i < 10; i = i + 1) { puts(i); };");
        assert_eq!(program.statements.len(), 1);
        match &program.statements[0] {
            Statement::ForLoopStatement { counter, init, condition, update, body } => {
                assert_eq!(counter, "i");
                assert_eq!(init, &Expression::Integer(0));
                assert_eq!(condition.to_string(), "(i < 10)");
                assert_eq!(update.to_string(), "i = (i + 1)");
                assert_eq!(body.to_string(), "puts(i)");
            },
            other => panic!("not for loop: {}", other)
        }
    }

    #[test]
    fn test_for_loop_update_must_be_assignment() {
        let (_, errors) = parse("for (let i = 0; i < 10; i + 1) { i }");
        assert_eq!(errors, vec!["expected assignment as for loop update, got (i + 1) instead".to_string()]);
    }

    #[test]
    fn test_parser_errors() {
        struct Test<'a> {
            input: &'a str,
            expected: Vec<&'a str>,
        }
        let tests = vec![
            Test {input: "let = 5;", expected: vec!["expected next token to be IDENT, got = instead"]},
            Test {input: "let x 5;", expected: vec!["expected next token to be =, got INT instead"]},
            Test {input: "let x = ;", expected: vec!["no prefix parse function for ; found"]},
            Test {input: "if (x { 1 }", expected: vec!["expected next token to be ), got { instead"]},
            Test {input: "fn(x, 1) {}", expected: vec!["expected next token to be IDENT, got INT instead"]},
            Test {input: "[1, 2", expected: vec!["expected next token to be ], got EOF instead"]},
            Test {input: "99999999999999999999", expected: vec!["could not parse \"99999999999999999999\" as integer"]},
        ];

        for test in tests {
            let (_, errors) = parse(test.input);
            assert_eq!(errors, test.expected, "input {:?}", test.input);
        }
    }

    #[test]
    fn test_errors_are_accumulated() {
        let (_, errors) = parse("let x = ; let y 5 =");
        assert!(errors.len() >= 2, "got {:?}", errors);
        assert_eq!(errors[0], "no prefix parse function for ; found");
        assert_eq!(errors[1], "expected next token to be =, got INT instead");
    }

    #[test]
    fn test_recovers_after_malformed_statement() {
        struct Test<'a> {
            input: &'a str,
            errors: Vec<&'a str>,
            program: &'a str,
        }
        let tests = vec![
            Test {
                input: "let = 1; let y = 2;",
                errors: vec!["expected next token to be IDENT, got = instead"],
                program: "let y = 2",
            },
            Test {
                input: "let h = {1: }; let y = 2;",
                errors: vec!["no prefix parse function for } found"],
                program: "let y = 2",
            },
            Test {
                input: "let a = [1, ]; let y = 2;",
                errors: vec!["no prefix parse function for ] found"],
                program: "let y = 2",
            },
            Test {
                input: "let f = fn() { let h = {1: }; 2 }; f",
                errors: vec!["no prefix parse function for } found"],
                program: "let f = fn () {2}f",
            },
            Test {
                input: "if (true) { let = 1; 2 } 3",
                errors: vec!["expected next token to be IDENT, got = instead"],
                program: "if true {2}3",
            },
            Test {
                input: "let h = {\"f\": fn() { x + }, \"g\": 1}; h",
                errors: vec!["no prefix parse function for } found"],
                program: "let h = {f: fn () {}, g: 1}h",
            },
        ];

        for test in tests {
            let (program, errors) = parse(test.input);
            assert_eq!(errors, test.errors, "input {:?}", test.input);
            assert_eq!(program.to_string(), test.program, "input {:?}", test.input);
        }
    }

    #[test]
    fn test_unclosed_block() {
        let (_, errors) = parse("fn(x) { x + 1");
        assert_eq!(errors, vec!["expected next token to be }, got EOF instead".to_string()]);
    }
}
