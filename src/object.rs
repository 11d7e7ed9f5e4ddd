use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::fmt::Formatter;
use std::rc::Rc;
use crate::ast::BlockStatement;
use crate::builtin::BuiltinFunction;
use crate::environment::Environment;

pub const TRUE: Object = Object::Boolean(true);
pub const FALSE: Object = Object::Boolean(false);
pub const NULL: Object = Object::Null;

/// Derived key for hashable objects. Two objects address the same hash
/// entry iff their keys are equal, regardless of which instance produced them.
#[derive(Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum HashKey {
    Integer(i64),
    String(String),
    Boolean(bool),
}

impl fmt::Display for HashKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            HashKey::Integer(i) => write!(f, "{}", i),
            HashKey::String(s) => write!(f, "{}", s),
            HashKey::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl HashKey {
    /// `None` when the object cannot be used as a hash key.
    pub fn from_object(obj: &Object) -> Option<Self> {
        match obj {
            Object::Integer(i) => Some(HashKey::Integer(*i)),
            Object::String(st) => Some(HashKey::String(st.clone())),
            Object::Boolean(b) => Some(HashKey::Boolean(*b)),
            _ => None,
        }
    }
}

#[derive(Clone, PartialEq)]
pub struct HashPair {
    pub key: Object,
    pub value: Object,
}

pub type HashPairs = BTreeMap<HashKey, HashPair>;

pub struct Function {
    pub parameters: Vec<String>,
    pub body: BlockStatement,
    /// Scope the literal was evaluated in; kept alive as long as the function is.
    pub env: Rc<RefCell<Environment>>,
}

/// Runtime value. Arrays, hashes and functions are reference objects: cloning
/// an `Object` aliases them rather than copying their contents.
#[derive(Clone)]
pub enum Object {
    Integer(i64),
    String(String),
    Boolean(bool),
    Null,
    ReturnValue(Box<Object>),
    Error(String),
    Function(Rc<Function>),
    Builtin(BuiltinFunction),
    Array(Rc<RefCell<Vec<Object>>>),
    Hash(Rc<RefCell<HashPairs>>),
}

impl Object {
    pub fn array(elements: Vec<Object>) -> Self {
        Object::Array(Rc::new(RefCell::new(elements)))
    }

    pub fn hash(pairs: HashPairs) -> Self {
        Object::Hash(Rc::new(RefCell::new(pairs)))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Integer(_) => "INTEGER",
            Object::String(_) => "STRING",
            Object::Boolean(_) => "BOOLEAN",
            Object::Null => "NULL",
            Object::ReturnValue(_) => "RETURN_VALUE",
            Object::Error(_) => "ERROR",
            Object::Function(_) => "FUNCTION",
            Object::Builtin(_) => "BUILTIN",
            Object::Array(_) => "ARRAY",
            Object::Hash(_) => "HASH",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Object::Error(_))
    }

    /// Everything except `null` and `false` is truthy, including `0`.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Object::Null | Object::Boolean(false))
    }

    /// Identity comparison used by `==`/`!=` for operands that are not both
    /// integers or both strings. Booleans and null have a single instance per
    /// value, so comparing them by value is comparing them by identity.
    pub fn is_identical(&self, other: &Object) -> bool {
        match (self, other) {
            (Object::Boolean(a), Object::Boolean(b)) => a == b,
            (Object::Null, Object::Null) => true,
            (Object::Array(a), Object::Array(b)) => Rc::ptr_eq(a, b),
            (Object::Hash(a), Object::Hash(b)) => Rc::ptr_eq(a, b),
            (Object::Function(a), Object::Function(b)) => Rc::ptr_eq(a, b),
            (Object::Builtin(a), Object::Builtin(b)) => a.name() == b.name(),
            _ => false,
        }
    }
}

pub fn native_bool_to_object(input: bool) -> Object {
    if input {
        TRUE
    } else {
        FALSE
    }
}

pub fn new_error(msg: impl Into<String>) -> Object {
    Object::Error(msg.into())
}

/// Structural equality, for comparing results in tests and hosts. The
/// language's own `==` goes through `is_identical` instead.
impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Object::Integer(a), Object::Integer(b)) => a == b,
            (Object::String(a), Object::String(b)) => a == b,
            (Object::Error(a), Object::Error(b)) => a == b,
            (Object::ReturnValue(a), Object::ReturnValue(b)) => a == b,
            (Object::Array(a), Object::Array(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
            (Object::Hash(a), Object::Hash(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
            _ => self.is_identical(other),
        }
    }
}

impl From<i64> for Object {
    fn from(value: i64) -> Self {
        Object::Integer(value)
    }
}

impl From<bool> for Object {
    fn from(value: bool) -> Self {
        native_bool_to_object(value)
    }
}

impl From<&str> for Object {
    fn from(value: &str) -> Self {
        Object::String(value.to_string())
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Object::Integer(i) => write!(f, "{}", i),
            Object::String(s) => write!(f, "{}", s),
            Object::Boolean(b) => write!(f, "{}", b),
            Object::Null => write!(f, "null"),
            Object::ReturnValue(obj) => write!(f, "{}", obj),
            Object::Error(msg) => write!(f, "{}", msg),
            Object::Function(func) => write!(f, "fn({}) {{\n{}\n}}", func.parameters.join(", "), func.body),
            Object::Builtin(_) => write!(f, "builtin function"),
            Object::Array(arr) => write!(f, "[{}]",
                    arr.borrow().iter().map(|p| p.to_string()).collect::<Vec<_>>().join(", ")),
            Object::Hash(hash) => write!(f, "{{{}}}",
                    hash.borrow().values().map(|pair| format!("{}: {}", pair.key, pair.value)).collect::<Vec<_>>().join(", ")),
        }
    }
}

// Functions capture environments that may refer back to them, so Debug only
// shows the rendering.
impl fmt::Debug for Object {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.type_name(), self)
    }
}
