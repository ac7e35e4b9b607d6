use std::fmt;

use serde::{Deserialize, Serialize};

/// Declared type of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ValueType {
    Bool,
    Float,
    Int,
    Enum {
        possible_values: &'static [&'static str],
    },
}

impl ValueType {
    pub const fn label(self) -> &'static str {
        match self {
            ValueType::Bool => "bool",
            ValueType::Float => "float",
            ValueType::Int => "int",
            ValueType::Enum { .. } => "enum",
        }
    }

    /// Value used when an input is not provided and no formula applies.
    pub fn zero(self) -> Value {
        match self {
            ValueType::Bool => Value::Bool(false),
            ValueType::Float => Value::Float(0.0),
            ValueType::Int => Value::Int(0),
            ValueType::Enum { possible_values } => {
                Value::Enum(possible_values.first().copied().unwrap_or_default().to_string())
            }
        }
    }

    pub fn admits(self, value: &Value) -> bool {
        match (self, value) {
            (ValueType::Bool, Value::Bool(_))
            | (ValueType::Float, Value::Float(_))
            | (ValueType::Int, Value::Int(_)) => true,
            (ValueType::Enum { possible_values }, Value::Enum(key)) => {
                possible_values.contains(&key.as_str())
            }
            _ => false,
        }
    }

    /// Bring a supplied value to this type. Integers are accepted where
    /// amounts are expected; nothing else is converted.
    pub fn coerce(self, value: Value) -> Option<Value> {
        let value = match (self, value) {
            (ValueType::Float, Value::Int(count)) => Value::Float(count as f64),
            (_, value) => value,
        };
        self.admits(&value).then_some(value)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A computed or supplied variable value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Enum(String),
}

impl Value {
    pub fn value_type_label(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Float(_) => "float",
            Value::Int(_) => "int",
            Value::Enum(_) => "enum",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(amount) => Some(*amount),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(count) => Some(*count),
            _ => None,
        }
    }

    pub fn as_enum_key(&self) -> Option<&str> {
        match self {
            Value::Enum(key) => Some(key),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(flag) => write!(f, "{flag}"),
            Value::Float(amount) => write!(f, "{amount:.2}"),
            Value::Int(count) => write!(f, "{count}"),
            Value::Enum(key) => f.write_str(key),
        }
    }
}

/// Enumeration whose variants are stored as string keys in `Value::Enum`.
pub trait VariableEnum: Sized + Copy {
    const KEYS: &'static [&'static str];

    fn key(self) -> &'static str;

    fn from_key(key: &str) -> Option<Self>;

    fn value_type() -> ValueType {
        ValueType::Enum {
            possible_values: Self::KEYS,
        }
    }
}

/// Schooling status of an individual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypesScolarite {
    Inconnue,
    College,
    Lycee,
}

impl VariableEnum for TypesScolarite {
    const KEYS: &'static [&'static str] = &["inconnue", "college", "lycee"];

    fn key(self) -> &'static str {
        match self {
            TypesScolarite::Inconnue => "inconnue",
            TypesScolarite::College => "college",
            TypesScolarite::Lycee => "lycee",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        match key {
            "inconnue" => Some(TypesScolarite::Inconnue),
            "college" => Some(TypesScolarite::College),
            "lycee" => Some(TypesScolarite::Lycee),
            _ => None,
        }
    }
}

/// Normal activity of an individual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypesActivite {
    Actif,
    Chomeur,
    Etudiant,
    Retraite,
    Inactif,
}

impl VariableEnum for TypesActivite {
    const KEYS: &'static [&'static str] = &["actif", "chomeur", "etudiant", "retraite", "inactif"];

    fn key(self) -> &'static str {
        match self {
            TypesActivite::Actif => "actif",
            TypesActivite::Chomeur => "chomeur",
            TypesActivite::Etudiant => "etudiant",
            TypesActivite::Retraite => "retraite",
            TypesActivite::Inactif => "inactif",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        match key {
            "actif" => Some(TypesActivite::Actif),
            "chomeur" => Some(TypesActivite::Chomeur),
            "etudiant" => Some(TypesActivite::Etudiant),
            "retraite" => Some(TypesActivite::Retraite),
            "inactif" => Some(TypesActivite::Inactif),
            _ => None,
        }
    }
}

impl From<TypesScolarite> for Value {
    fn from(value: TypesScolarite) -> Self {
        Value::Enum(value.key().to_string())
    }
}

impl From<TypesActivite> for Value {
    fn from(value: TypesActivite) -> Self {
        Value::Enum(value.key().to_string())
    }
}
