use std::fmt;
use std::fmt::Formatter;
use log::debug;
use crate::evaluator::apply_function;
use crate::object::{new_error, HashKey, HashPairs, Object, NULL};

pub type BuiltinFn = fn(args: Vec<Object>) -> Object;

#[derive(Clone, Debug)]
pub struct BuiltinFunction {
    name: &'static str,
    func: BuiltinFn
}

impl fmt::Display for BuiltinFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

const BUILTINS: &[(&str, BuiltinFn)] = &[
    ("len", len),
    ("first", first),
    ("last", last),
    ("rest", rest),
    ("push", push),
    ("pop", pop),
    ("shift", shift),
    ("slice", slice),
    ("puts", puts),
    ("delete", delete),
    ("valuesAt", values_at),
    ("toArray", to_array),
    ("dig", dig),
    ("map", map),
];

impl BuiltinFunction {
    pub fn look_up(name: &str) -> Option<Self> {
        BUILTINS
            .iter()
            .find(|(builtin, _)| *builtin == name)
            .map(|(name, func)| Self { name: *name, func: *func })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn call(&self, args: Vec<Object>) -> Object {
        debug!("calling builtin {} with {} arguments", self.name, args.len());
        (self.func)(args)
    }
}

fn wrong_arguments(got: usize, wanted: usize) -> Object {
    new_error(format!("wrong number of arguments. got {}, wanted {}", got, wanted))
}

fn must_be(name: &str, expected: &str, got: &Object) -> Object {
    new_error(format!("argument to `{}` must be {}, got {}", name, expected, got.type_name()))
}

// Validates the single-array signature shared by first/last/rest/pop/shift.
fn single_array<'a>(name: &str, args: &'a [Object]) -> Result<&'a Object, Object> {
    if args.len() != 1 {
        return Err(wrong_arguments(args.len(), 1));
    }
    match &args[0] {
        arr @ Object::Array(_) => Ok(arr),
        other => Err(must_be(name, "ARRAY", other)),
    }
}

fn hash_key(key: &Object) -> Result<HashKey, Object> {
    HashKey::from_object(key).ok_or_else(|| new_error(format!("unusable as hash key: {}", key.type_name())))
}

fn len(args: Vec<Object>) -> Object {
    if args.len() != 1 {
        return wrong_arguments(args.len(), 1);
    }

    match &args[0] {
        Object::Array(arr) => Object::Integer(arr.borrow().len() as i64),
        Object::String(s) => Object::Integer(s.len() as i64),
        Object::Hash(hash) => Object::Integer(hash.borrow().len() as i64),
        other => new_error(format!("argument to `len` not supported, got {}", other.type_name()))
    }
}

fn first(args: Vec<Object>) -> Object {
    match single_array("first", &args) {
        Ok(Object::Array(arr)) => arr.borrow().first().cloned().unwrap_or(NULL),
        Ok(_) => NULL,
        Err(err) => err,
    }
}

fn last(args: Vec<Object>) -> Object {
    match single_array("last", &args) {
        Ok(Object::Array(arr)) => arr.borrow().last().cloned().unwrap_or(NULL),
        Ok(_) => NULL,
        Err(err) => err,
    }
}

/// A new array holding every element but the first.
fn rest(args: Vec<Object>) -> Object {
    match single_array("rest", &args) {
        Ok(Object::Array(arr)) => {
            let arr = arr.borrow();
            if arr.is_empty() {
                NULL
            } else {
                Object::array(arr[1..].to_vec())
            }
        },
        Ok(_) => NULL,
        Err(err) => err,
    }
}

/// A new array with the element appended; the argument is left untouched.
fn push(args: Vec<Object>) -> Object {
    if args.len() != 2 {
        return wrong_arguments(args.len(), 2);
    }
    match &args[0] {
        Object::Array(arr) => {
            let mut elements = arr.borrow().clone();
            elements.push(args[1].clone());
            Object::array(elements)
        },
        other => must_be("push", "ARRAY", other),
    }
}

/// Removes and returns the last element in place.
fn pop(args: Vec<Object>) -> Object {
    match single_array("pop", &args) {
        Ok(Object::Array(arr)) => arr.borrow_mut().pop().unwrap_or(NULL),
        Ok(_) => NULL,
        Err(err) => err,
    }
}

/// Removes and returns the first element in place.
fn shift(args: Vec<Object>) -> Object {
    match single_array("shift", &args) {
        Ok(Object::Array(arr)) => {
            let mut arr = arr.borrow_mut();
            if arr.is_empty() {
                NULL
            } else {
                arr.remove(0)
            }
        },
        Ok(_) => NULL,
        Err(err) => err,
    }
}

/// `slice(arr, start?, end?)`: a new array of `arr[start..end)` with both
/// bounds clamped to the array.
fn slice(args: Vec<Object>) -> Object {
    if args.is_empty() || args.len() > 3 {
        return new_error(format!("wrong number of arguments. got {}, wanted 1 to 3", args.len()));
    }
    let arr = match &args[0] {
        Object::Array(arr) => arr.borrow(),
        other => return must_be("slice", "ARRAY", other),
    };

    let mut bounds = [0, arr.len()];
    for (bound, arg) in bounds.iter_mut().zip(&args[1..]) {
        match arg {
            Object::Integer(i) => *bound = (*i).clamp(0, arr.len() as i64) as usize,
            other => return new_error(format!("slice bounds must be INTEGER, got {}", other.type_name())),
        }
    }

    let [start, end] = bounds;
    if start >= end {
        return Object::array(vec![]);
    }
    Object::array(arr[start..end].to_vec())
}

fn puts(args: Vec<Object>) -> Object {
    for arg in args {
        println!("{}", arg)
    }
    NULL
}

/// Nulls out the value of every given key that is present, in place.
fn delete(args: Vec<Object>) -> Object {
    if args.len() < 2 {
        return new_error(format!("wrong number of arguments. got {}, wanted at least 2", args.len()));
    }
    let hash = match &args[0] {
        Object::Hash(hash) => hash,
        other => return must_be("delete", "HASH", other),
    };

    let mut hash = hash.borrow_mut();
    for key in &args[1..] {
        let key = match hash_key(key) {
            Ok(key) => key,
            Err(err) => return err,
        };
        if let Some(pair) = hash.get_mut(&key) {
            pair.value = NULL;
        }
    }
    NULL
}

fn values_at(args: Vec<Object>) -> Object {
    if args.is_empty() {
        return new_error("wrong number of arguments. got 0, wanted at least 1");
    }
    let hash = match &args[0] {
        Object::Hash(hash) => hash.borrow(),
        other => return must_be("valuesAt", "HASH", other),
    };

    let mut values = Vec::with_capacity(args.len() - 1);
    for key in &args[1..] {
        match hash_key(key) {
            Ok(key) => values.push(hash.get(&key).map(|pair| pair.value.clone()).unwrap_or(NULL)),
            Err(err) => return err,
        }
    }
    Object::array(values)
}

/// Flattens a hash into `[k1, v1, k2, v2, ...]`.
fn to_array(args: Vec<Object>) -> Object {
    if args.len() != 1 {
        return wrong_arguments(args.len(), 1);
    }
    match &args[0] {
        Object::Hash(hash) => Object::array(
            hash.borrow()
                .values()
                .flat_map(|pair| [pair.key.clone(), pair.value.clone()])
                .collect(),
        ),
        other => must_be("toArray", "HASH", other),
    }
}

fn dig(args: Vec<Object>) -> Object {
    if args.len() < 2 {
        return new_error(format!("wrong number of arguments. got {}, wanted at least 2", args.len()));
    }
    if !matches!(args[0], Object::Hash(_)) {
        return must_be("dig", "HASH", &args[0]);
    }

    let mut current = args[0].clone();
    for key in &args[1..] {
        let key = match hash_key(key) {
            Ok(key) => key,
            Err(err) => return err,
        };
        let next = match &current {
            Object::Hash(hash) => lookup(&hash.borrow(), &key),
            _ => return NULL,
        };
        current = next;
    }
    current
}

fn lookup(hash: &HashPairs, key: &HashKey) -> Object {
    hash.get(key).map(|pair| pair.value.clone()).unwrap_or(NULL)
}

/// A new array of `func(element)` for every element; stops at the first error.
fn map(args: Vec<Object>) -> Object {
    if args.len() != 2 {
        return wrong_arguments(args.len(), 2);
    }
    let elements = match &args[0] {
        Object::Array(arr) => arr.borrow().clone(),
        other => return must_be("map", "ARRAY", other),
    };
    let func = &args[1];
    if !matches!(func, Object::Function(_) | Object::Builtin(_)) {
        return must_be("map", "FUNCTION", func);
    }

    let mut mapped = Vec::with_capacity(elements.len());
    for element in elements {
        let result = apply_function(func.clone(), vec![element]);
        if result.is_error() {
            return result;
        }
        mapped.push(result);
    }
    Object::array(mapped)
}
