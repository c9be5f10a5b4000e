use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Tag identifying which representation a [`Value`] holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeKind {
    /// No value
    None,
    /// 32-bit signed integer
    Int,
    /// 32-bit float
    Float,
    /// Boolean
    Bool,
    /// Unicode scalar value
    Char,
    /// Opaque address
    Pointer,
    /// Owned text
    String,
    /// Owned sequence of values
    List,
}

impl TypeKind {
    /// Lowercase name used in diagnostics
    pub fn name(self) -> &'static str {
        match self {
            TypeKind::None => "none",
            TypeKind::Int => "int",
            TypeKind::Float => "float",
            TypeKind::Bool => "bool",
            TypeKind::Char => "char",
            TypeKind::Pointer => "pointer",
            TypeKind::String => "string",
            TypeKind::List => "list",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Runtime value representation
///
/// Only `String` and `List` own heap storage. `Clone` deep-copies that storage,
/// so a cloned value never shares a buffer with its source; moving a value
/// transfers the storage without copying it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Value {
    /// No value
    #[default]
    None,
    /// 32-bit signed integer
    Int(i32),
    /// 32-bit floating-point value
    Float(f32),
    /// Boolean value
    Bool(bool),
    /// Character value
    Char(char),
    /// Opaque address, never dereferenced by the engine
    Pointer(usize),
    /// String value
    String(String),
    /// List of values
    List(Vec<Value>),
}

impl Value {
    /// Creates an integer value
    pub fn int(v: i32) -> Self {
        Value::Int(v)
    }

    /// Creates a float value
    pub fn float(v: f32) -> Self {
        Value::Float(v)
    }

    /// Creates a boolean value
    pub fn bool(v: bool) -> Self {
        Value::Bool(v)
    }

    /// Creates a character value
    pub fn char(v: char) -> Self {
        Value::Char(v)
    }

    /// Creates a pointer value
    pub fn pointer(addr: usize) -> Self {
        Value::Pointer(addr)
    }

    /// Creates a string value, taking ownership of `s`
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    /// Creates a list value, taking ownership of `values`
    pub fn list(values: Vec<Value>) -> Self {
        Value::List(values)
    }

    /// Zero or empty value of the given kind
    pub fn zeroed(kind: TypeKind) -> Self {
        match kind {
            TypeKind::None => Value::None,
            TypeKind::Int => Value::Int(0),
            TypeKind::Float => Value::Float(0.0),
            TypeKind::Bool => Value::Bool(false),
            TypeKind::Char => Value::Char('\0'),
            TypeKind::Pointer => Value::Pointer(0),
            TypeKind::String => Value::String(String::new()),
            TypeKind::List => Value::List(Vec::new()),
        }
    }

    /// The kind tag of the active representation
    pub fn kind(&self) -> TypeKind {
        match self {
            Value::None => TypeKind::None,
            Value::Int(_) => TypeKind::Int,
            Value::Float(_) => TypeKind::Float,
            Value::Bool(_) => TypeKind::Bool,
            Value::Char(_) => TypeKind::Char,
            Value::Pointer(_) => TypeKind::Pointer,
            Value::String(_) => TypeKind::String,
            Value::List(_) => TypeKind::List,
        }
    }

    /// Switches the value to `kind`
    ///
    /// Keeping the same kind leaves the payload untouched. Otherwise any owned
    /// storage is released first and the value is reinitialized to the zero or
    /// empty payload of the new kind.
    pub fn set_kind(&mut self, kind: TypeKind) -> TypeKind {
        if self.kind() != kind {
            drop(std::mem::take(self));
            *self = Value::zeroed(kind);
        }
        kind
    }

    /// Returns the type name as a string
    pub fn type_name(&self) -> &'static str {
        self.kind().name()
    }

    /// True only for `Int` and `Float`
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    /// True for the kinds that own heap storage
    pub fn is_heap(&self) -> bool {
        matches!(self, Value::String(_) | Value::List(_))
    }

    /// Integer projection of an inline scalar
    ///
    /// This is the 32-bit pattern the value occupies when read as an integer:
    /// floats project through their IEEE bits, pointers truncate to 32 bits.
    /// Heap kinds have no projection.
    pub fn int_projection(&self) -> Option<i32> {
        match self {
            Value::None => Some(0),
            Value::Int(n) => Some(*n),
            Value::Float(f) => Some(f.to_bits() as i32),
            Value::Bool(b) => Some(i32::from(*b)),
            Value::Char(c) => Some(*c as u32 as i32),
            Value::Pointer(p) => Some(*p as u32 as i32),
            Value::String(_) | Value::List(_) => None,
        }
    }

    fn mismatch(&self, expected: TypeKind) -> TypeError {
        TypeError {
            expected,
            found: self.kind(),
        }
    }

    /// Returns the integer payload
    pub fn as_int(&self) -> Result<i32, TypeError> {
        match self {
            Value::Int(n) => Ok(*n),
            _ => Err(self.mismatch(TypeKind::Int)),
        }
    }

    /// Returns the float payload
    pub fn as_float(&self) -> Result<f32, TypeError> {
        match self {
            Value::Float(f) => Ok(*f),
            _ => Err(self.mismatch(TypeKind::Float)),
        }
    }

    /// Returns the boolean payload
    pub fn as_bool(&self) -> Result<bool, TypeError> {
        match self {
            Value::Bool(b) => Ok(*b),
            _ => Err(self.mismatch(TypeKind::Bool)),
        }
    }

    /// Returns the character payload
    pub fn as_char(&self) -> Result<char, TypeError> {
        match self {
            Value::Char(c) => Ok(*c),
            _ => Err(self.mismatch(TypeKind::Char)),
        }
    }

    /// Returns the pointer payload
    pub fn as_pointer(&self) -> Result<usize, TypeError> {
        match self {
            Value::Pointer(p) => Ok(*p),
            _ => Err(self.mismatch(TypeKind::Pointer)),
        }
    }

    /// Returns a reference to the string value
    pub fn as_str(&self) -> Result<&str, TypeError> {
        match self {
            Value::String(s) => Ok(s),
            _ => Err(self.mismatch(TypeKind::String)),
        }
    }

    /// Returns the owned string storage for in-place mutation
    pub fn as_string_mut(&mut self) -> Result<&mut String, TypeError> {
        match self {
            Value::String(s) => Ok(s),
            other => Err(other.mismatch(TypeKind::String)),
        }
    }

    /// Returns the list elements in insertion order
    pub fn as_list(&self) -> Result<&[Value], TypeError> {
        match self {
            Value::List(items) => Ok(items),
            _ => Err(self.mismatch(TypeKind::List)),
        }
    }

    /// Returns the owned list storage for in-place mutation
    pub fn as_list_mut(&mut self) -> Result<&mut Vec<Value>, TypeError> {
        match self {
            Value::List(items) => Ok(items),
            other => Err(other.mismatch(TypeKind::List)),
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::Char(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::List(iter.into_iter().collect())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::None => write!(f, "none"),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Char(c) => write!(f, "{:?}", c),
            Value::Pointer(p) => write!(f, "{:#010x}", p),
            Value::String(s) => write!(f, "\"{}\"", s),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, val) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", val)?;
                }
                write!(f, "]")
            }
        }
    }
}
