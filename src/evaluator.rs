use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use log::{debug, trace};
use crate::ast::{BlockStatement, Expression, Node, Program, Statement};
use crate::builtin::BuiltinFunction;
use crate::environment::Environment;
use crate::object::{native_bool_to_object, new_error, Function, HashKey, HashPair, Object, NULL};

/// Tree-walking evaluator bound to one scope. A REPL session keeps a single
/// `Evaluator` so bindings survive between inputs.
#[derive(Clone)]
pub struct Evaluator {
    env: Rc<RefCell<Environment>>
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Self {
            env: Rc::new(RefCell::new(Environment::new()))
        }
    }

    pub fn with_env(env: Rc<RefCell<Environment>>) -> Self {
        Self { env }
    }

    pub fn env(&self) -> Rc<RefCell<Environment>> {
        Rc::clone(&self.env)
    }

    /// `None` for nodes that produce no value, such as a bare `let`. A
    /// `return` reaching this level is unwrapped, so callers never see
    /// `Object::ReturnValue`.
    pub fn eval(&mut self, node: Node) -> Option<Object> {
        let result = match node {
            Node::Program(program) => self.eval_program(program),
            Node::Statement(stmt) => self.eval_statement(stmt),
            Node::Expression(exp) => Some(self.eval_expression(exp)),
        };
        match result {
            Some(Object::ReturnValue(ret)) => Some(*ret),
            other => other,
        }
    }

    fn eval_program(&mut self, program: &Program) -> Option<Object> {
        let mut result = None;

        for stmt in program.statements.iter() {
            match self.eval_statement(stmt) {
                Some(Object::ReturnValue(ret)) => return Some(*ret),
                Some(err @ Object::Error(_)) => return Some(err),
                other => result = other,
            }
        }
        result
    }

    // ReturnValue and Error escape the block unchanged; only calls and the
    // program unwrap them.
    fn eval_block_statement(&mut self, block: &BlockStatement) -> Option<Object> {
        let mut result = None;

        for stmt in block.statements.iter() {
            match self.eval_statement(stmt) {
                Some(obj @ (Object::ReturnValue(_) | Object::Error(_))) => return Some(obj),
                other => result = other,
            }
        }
        result
    }

    fn eval_statement(&mut self, stmt: &Statement) -> Option<Object> {
        match stmt {
            Statement::LetStatement { name, value } => {
                let val = self.eval_expression(value);
                if val.is_error() {
                    return Some(val);
                }
                self.env.borrow_mut().set(name.clone(), val);
                None
            },
            Statement::ReturnStatement(ret) => {
                let val = match ret {
                    Some(exp) => self.eval_expression(exp),
                    None => NULL,
                };
                if val.is_error() {
                    return Some(val);
                }
                Some(Object::ReturnValue(Box::new(val)))
            },
            Statement::ExpressionStatement(exp) => Some(self.eval_expression(exp)),
            Statement::BlockStatement(block) => self.eval_block_statement(block),
            Statement::ForLoopStatement { counter, init, condition, update, body } => {
                self.eval_for_loop(counter, init, condition, update, body)
            },
        }
    }

    fn eval_expression(&mut self, exp: &Expression) -> Object {
        match exp {
            Expression::Integer(i) => Object::Integer(*i),
            Expression::String(s) => Object::String(s.clone()),
            Expression::Boolean(b) => native_bool_to_object(*b),
            Expression::Identifier(name) => self.eval_identifier(name),
            Expression::PrefixExpression { operation, right } => {
                let right = self.eval_expression(right);
                if right.is_error() {
                    return right;
                }
                eval_prefix_expression(operation, right)
            },
            Expression::InfixExpression { operation, left, right } => {
                let left = self.eval_expression(left);
                if left.is_error() {
                    return left;
                }
                let right = self.eval_expression(right);
                if right.is_error() {
                    return right;
                }
                eval_infix_expression(operation, left, right)
            },
            Expression::IfExpression { condition, consequence, alternative } => {
                let condition = self.eval_expression(condition);
                if condition.is_error() {
                    return condition;
                }

                if condition.is_truthy() {
                    self.eval_block_statement(consequence).unwrap_or(NULL)
                } else {
                    match alternative {
                        Some(alt) => self.eval_block_statement(alt).unwrap_or(NULL),
                        None => NULL,
                    }
                }
            },
            Expression::Function { parameters, body } => {
                Object::Function(Rc::new(Function {
                    parameters: parameters.clone(),
                    body: body.clone(),
                    env: Rc::clone(&self.env),
                }))
            },
            Expression::CallExpression { function, arguments } => {
                let function = self.eval_expression(function);
                if function.is_error() {
                    return function;
                }
                match self.eval_expressions(arguments) {
                    Ok(args) => apply_function(function, args),
                    Err(err) => err,
                }
            },
            Expression::InternalFunctionCall { receiver, method, arguments } => {
                let receiver = self.eval_expression(receiver);
                if receiver.is_error() {
                    return receiver;
                }
                let method = self.eval_expression(method);
                if method.is_error() {
                    return method;
                }
                match self.eval_expressions(arguments) {
                    Ok(mut args) => {
                        args.insert(0, receiver);
                        apply_function(method, args)
                    },
                    Err(err) => err,
                }
            },
            Expression::Array(exps) => match self.eval_expressions(exps) {
                Ok(elements) => Object::array(elements),
                Err(err) => err,
            },
            Expression::Hash(pairs) => self.eval_hash_literal(pairs),
            Expression::IndexExpression { left, index } => {
                let left = self.eval_expression(left);
                if left.is_error() {
                    return left;
                }
                let index = self.eval_expression(index);
                if index.is_error() {
                    return index;
                }
                eval_index_expression(left, index)
            },
            Expression::IndexAssignment { left, index, value } => self.eval_index_assignment(left, index, value),
            Expression::Assignment { name, value } => self.eval_assignment(name, value),
        }
    }

    fn eval_identifier(&self, name: &str) -> Object {
        let bound = self.env.borrow().get(name);
        match bound {
            Some(obj) => obj,
            None => match BuiltinFunction::look_up(name) {
                Some(builtin) => Object::Builtin(builtin),
                None => new_error(format!("identifier not found: {}", name)),
            }
        }
    }

    /// Evaluates left to right, stopping at the first error.
    fn eval_expressions(&mut self, exps: &[Expression]) -> Result<Vec<Object>, Object> {
        let mut result = Vec::with_capacity(exps.len());

        for exp in exps {
            let evaluated = self.eval_expression(exp);
            if evaluated.is_error() {
                return Err(evaluated);
            }
            result.push(evaluated);
        }
        Ok(result)
    }

    fn eval_hash_literal(&mut self, pairs: &[(Expression, Expression)]) -> Object {
        let mut hash = BTreeMap::new();

        for (key, value) in pairs {
            let key = self.eval_expression(key);
            if key.is_error() {
                return key;
            }
            let hashed = match HashKey::from_object(&key) {
                Some(hashed) => hashed,
                None => return new_error(format!("unusable as hash key: {}", key.type_name())),
            };

            let value = self.eval_expression(value);
            if value.is_error() {
                return value;
            }
            hash.insert(hashed, HashPair { key, value });
        }
        Object::hash(hash)
    }

    fn eval_assignment(&mut self, name: &str, value: &Expression) -> Object {
        if self.env.borrow().get(name).is_none() {
            return new_error(format!("identifier not found: {}", name));
        }

        let value = self.eval_expression(value);
        if value.is_error() {
            return value;
        }
        self.env.borrow_mut().assign(name, value.clone());
        value
    }

    fn eval_index_assignment(&mut self, left: &Expression, index: &Expression, value: &Expression) -> Object {
        let target = self.eval_expression(left);
        if target.is_error() {
            return target;
        }
        let index = self.eval_expression(index);
        if index.is_error() {
            return index;
        }
        let value = self.eval_expression(value);
        if value.is_error() {
            return value;
        }

        match &target {
            Object::Array(arr) => {
                let i = match index {
                    Object::Integer(i) => i,
                    other => return new_error(format!("array index must be INTEGER, got {}", other.type_name())),
                };
                let mut arr = arr.borrow_mut();
                if i < 0 || i >= arr.len() as i64 {
                    return new_error(format!("index out of range: {} (length {})", i, arr.len()));
                }
                arr[i as usize] = value.clone();
                value
            },
            Object::Hash(hash) => {
                let hashed = match HashKey::from_object(&index) {
                    Some(hashed) => hashed,
                    None => return new_error(format!("unusable as hash key: {}", index.type_name())),
                };
                hash.borrow_mut().insert(hashed, HashPair { key: index, value: value.clone() });
                value
            },
            other => new_error(format!("index assignment not supported: {}", other.type_name())),
        }
    }

    // The counter lives in the current scope; the body does not get one of
    // its own.
    fn eval_for_loop(
        &mut self,
        counter: &str,
        init: &Expression,
        condition: &Expression,
        update: &Expression,
        body: &BlockStatement,
    ) -> Option<Object> {
        let init = self.eval_expression(init);
        if init.is_error() {
            return Some(init);
        }
        self.env.borrow_mut().set(counter.to_string(), init);

        let step = match update {
            Expression::Assignment { value, .. } => value.as_ref(),
            other => other,
        };

        let mut result = NULL;
        loop {
            match self.eval_expression(condition) {
                Object::Boolean(true) => {},
                Object::Boolean(false) => break,
                err @ Object::Error(_) => return Some(err),
                other => return Some(new_error(format!("invalid loop condition type: {}", other.type_name()))),
            }
            trace!("for loop iteration, {} = {:?}", counter, self.env.borrow().get(counter));

            match self.eval_block_statement(body) {
                Some(obj @ (Object::ReturnValue(_) | Object::Error(_))) => return Some(obj),
                Some(obj) => result = obj,
                None => result = NULL,
            }

            let next = self.eval_expression(step);
            if next.is_error() {
                return Some(next);
            }
            self.env.borrow_mut().set(counter.to_string(), next);
        }
        Some(result)
    }
}

/// Calls a user function or builtin with already evaluated arguments. A
/// `ReturnValue` stops here, so `return` never unwinds past its own call.
pub fn apply_function(function: Object, args: Vec<Object>) -> Object {
    match function {
        Object::Function(func) => {
            if func.parameters.len() != args.len() {
                return new_error(format!("wrong number of arguments. got {}, wanted {}",
                                         args.len(), func.parameters.len()));
            }
            debug!("applying fn({}) to {} arguments", func.parameters.join(", "), args.len());

            let mut env = Environment::new_enclosed(Rc::clone(&func.env));
            for (param, arg) in func.parameters.iter().zip(args) {
                env.set(param.clone(), arg);
            }

            let mut eval = Evaluator::with_env(Rc::new(RefCell::new(env)));
            match eval.eval_block_statement(&func.body) {
                Some(Object::ReturnValue(ret)) => *ret,
                Some(obj) => obj,
                None => NULL,
            }
        },
        Object::Builtin(builtin) => builtin.call(args),
        other => new_error(format!("not a function: {}", other.type_name())),
    }
}

fn eval_prefix_expression(operation: &str, right: Object) -> Object {
    match operation {
        "!" => native_bool_to_object(!right.is_truthy()),
        "-" => match right {
            Object::Integer(i) => Object::Integer(i.wrapping_neg()),
            other => new_error(format!("unknown operator: -{}", other.type_name())),
        },
        _ => new_error(format!("unknown operator: {}{}", operation, right.type_name())),
    }
}

fn eval_infix_expression(operation: &str, left: Object, right: Object) -> Object {
    match (&left, &right) {
        (Object::Integer(l), Object::Integer(r)) => eval_integer_infix_expression(operation, *l, *r),
        (Object::String(l), Object::String(r)) => eval_string_infix_expression(operation, l, r),
        _ if operation == "==" => native_bool_to_object(left.is_identical(&right)),
        _ if operation == "!=" => native_bool_to_object(!left.is_identical(&right)),
        _ if left.type_name() != right.type_name() => {
            new_error(format!("type mismatch: {} {} {}", left.type_name(), operation, right.type_name()))
        },
        _ => new_error(format!("unknown operator: {} {} {}", left.type_name(), operation, right.type_name())),
    }
}

fn eval_integer_infix_expression(operation: &str, left: i64, right: i64) -> Object {
    match operation {
        "+" => Object::Integer(left.wrapping_add(right)),
        "-" => Object::Integer(left.wrapping_sub(right)),
        "*" => Object::Integer(left.wrapping_mul(right)),
        "/" => {
            if right == 0 {
                new_error("division by zero")
            } else {
                Object::Integer(left.wrapping_div(right))
            }
        },
        "<" => native_bool_to_object(left < right),
        ">" => native_bool_to_object(left > right),
        "==" => native_bool_to_object(left == right),
        "!=" => native_bool_to_object(left != right),
        _ => new_error(format!("unknown operator: INTEGER {} INTEGER", operation)),
    }
}

fn eval_string_infix_expression(operation: &str, left: &str, right: &str) -> Object {
    match operation {
        "+" => Object::String(format!("{}{}", left, right)),
        "==" => native_bool_to_object(left == right),
        "!=" => native_bool_to_object(left != right),
        _ => new_error(format!("unknown operator: STRING {} STRING", operation)),
    }
}

fn eval_index_expression(left: Object, index: Object) -> Object {
    match (&left, &index) {
        (Object::Array(arr), Object::Integer(i)) => {
            let arr = arr.borrow();
            if *i < 0 || *i >= arr.len() as i64 {
                NULL
            } else {
                arr[*i as usize].clone()
            }
        },
        (Object::Hash(hash), _) => match HashKey::from_object(&index) {
            Some(key) => hash.borrow().get(&key).map(|pair| pair.value.clone()).unwrap_or(NULL),
            None => new_error(format!("unusable as hash key: {}", index.type_name())),
        },
        _ => new_error(format!("index operator not supported: {}", left.type_name())),
    }
}
