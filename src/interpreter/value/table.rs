use std::{collections::HashMap, rc::Rc};

use ordered_float::OrderedFloat;

use crate::{error::RuntimeError, interpreter::value::core::Value};

/// A hashable table key.
///
/// The key domain is the union of booleans, numbers, and strings. Numbers
/// hash by their `f64` payload, so `1` and `1.0` are the same key. `nil`
/// and NaN are not valid keys and are rejected before a `TableKey` is ever
/// built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TableKey {
    /// A boolean key.
    Bool(bool),
    /// A numeric key.
    Number(OrderedFloat<f64>),
    /// A string key.
    Str(Rc<str>),
}

impl TableKey {
    /// Converts a runtime value into a table key.
    ///
    /// # Errors
    /// - `RuntimeError::NilTableKey` if the value is `nil`.
    /// - `RuntimeError::NanTableKey` if the value is NaN.
    /// - `RuntimeError::InvalidTableKey` for values outside the key domain.
    pub fn try_from_value(value: &Value) -> Result<Self, RuntimeError> {
        match value {
            Value::Nil => Err(RuntimeError::NilTableKey),
            Value::Number(n) if n.is_nan() => Err(RuntimeError::NanTableKey),
            Value::Bool(b) => Ok(Self::Bool(*b)),
            Value::Number(n) => Ok(Self::Number(OrderedFloat(*n))),
            Value::Str(s) => Ok(Self::Str(s.clone())),
            other => Err(RuntimeError::InvalidTableKey { found: other.type_name(), }),
        }
    }
}

/// The storage behind a table value.
///
/// Iteration order is unspecified. The `#` operator reports the number of
/// entries in the map, not the Lua border.
#[derive(Debug, Default)]
pub struct Table {
    entries: HashMap<TableKey, Value>,
}

impl Table {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the value stored under `key`.
    ///
    /// Absent keys, and keys of a type the table cannot hold, read as
    /// `nil`; reading never fails.
    #[must_use]
    pub fn get(&self, key: &Value) -> Value {
        match TableKey::try_from_value(key) {
            Ok(key) => self.entries.get(&key).cloned().unwrap_or(Value::Nil),
            Err(_) => Value::Nil,
        }
    }

    /// Reads the value stored under the string key `name`.
    #[must_use]
    pub fn get_named(&self, name: &str) -> Value {
        self.entries
            .get(&TableKey::Str(Rc::from(name)))
            .cloned()
            .unwrap_or(Value::Nil)
    }

    /// Stores `value` under `key`, replacing any previous entry.
    ///
    /// # Errors
    /// Rejects `nil`, NaN, and non-key types, see
    /// [`TableKey::try_from_value`].
    pub fn set(&mut self, key: &Value, value: Value) -> Result<(), RuntimeError> {
        self.entries.insert(TableKey::try_from_value(key)?, value);
        Ok(())
    }

    /// Stores `value` under the string key `name`.
    pub fn set_named(&mut self, name: &str, value: Value) {
        self.entries.insert(TableKey::Str(Rc::from(name)), value);
    }

    /// Returns the number of entries in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
