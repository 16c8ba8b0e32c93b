use std::{cell::RefCell, rc::Rc};

use crate::{
    ast::FunctionBody,
    error::RuntimeError,
    interpreter::{evaluator::scope::Scope, value::table::Table},
};

/// The signature of a native (host-provided) function.
///
/// A native receives the evaluated argument values and returns a single
/// value, or a runtime error that aborts evaluation.
pub type NativeFn = fn(&[Value]) -> Result<Value, RuntimeError>;

/// A function defined in the language, together with the lexical scope it
/// closed over.
pub struct LuaFunction {
    /// The parameter names the call binds positionally. For a method
    /// declaration this starts with `self`.
    pub params:    Vec<String>,
    /// Whether extra arguments are collected into `...`.
    pub is_vararg: bool,
    /// The shared function body.
    pub body:      Rc<FunctionBody>,
    /// The scope that was active at the `function ... end` expression.
    pub scope:     Rc<Scope>,
}

impl std::fmt::Debug for LuaFunction {
    /// Omits the captured scope: a closure's scope can reach the closure
    /// itself, and following it would recurse forever.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LuaFunction")
         .field("params", &self.params)
         .field("is_vararg", &self.is_vararg)
         .finish_non_exhaustive()
    }
}

/// Represents a runtime value in the interpreter.
///
/// This enum models every type a program can produce. Tables and functions
/// are shared references: assignment copies the handle, not the contents.
/// [`Value::Multi`] is internal and only ever appears at multi-value
/// expansion sites (returns, varargs, call results); every other context
/// adjusts it down to its first element.
#[derive(Debug, Clone)]
pub enum Value {
    /// The absence of a value, `nil`.
    Nil,
    /// A boolean value.
    Bool(bool),
    /// A numeric value. All numbers are 64-bit floats.
    Number(f64),
    /// An immutable string.
    Str(Rc<str>),
    /// A table, shared by reference.
    Table(Rc<RefCell<Table>>),
    /// A function value with its captured scope.
    Function(Rc<LuaFunction>),
    /// A host-provided function such as `print`.
    Native(NativeFn),
    /// A list of values produced by a multi-value site.
    Multi(Rc<[Value]>),
}

impl Value {
    /// Builds a string value from anything string-like.
    #[must_use]
    pub fn string(s: impl AsRef<str>) -> Self {
        Self::Str(Rc::from(s.as_ref()))
    }

    /// Builds a fresh empty table value.
    #[must_use]
    pub fn new_table() -> Self {
        Self::Table(Rc::new(RefCell::new(Table::new())))
    }

    /// Reports whether the value counts as true in a condition.
    ///
    /// Only `nil` and `false` are falsy; everything else, including `0` and
    /// the empty string, is truthy.
    ///
    /// # Example
    /// ```
    /// use luna::interpreter::value::core::Value;
    ///
    /// assert!(Value::Number(0.0).is_truthy());
    /// assert!(!Value::Nil.is_truthy());
    /// assert!(!Value::Bool(false).is_truthy());
    /// ```
    #[must_use]
    pub const fn is_truthy(&self) -> bool {
        !matches!(self, Self::Nil | Self::Bool(false))
    }

    /// Returns the name of this value's type, as used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::Str(_) => "string",
            Self::Table(_) => "table",
            Self::Function(_) | Self::Native(_) => "function",
            Self::Multi(_) => "value list",
        }
    }

    /// Adjusts the value to a single value.
    ///
    /// A [`Value::Multi`] collapses to its first element, or `nil` when
    /// empty; every other value passes through unchanged. This is the
    /// normalization applied everywhere a multi-value site feeds a context
    /// expecting one value.
    #[must_use]
    pub fn single(self) -> Self {
        match self {
            Self::Multi(values) => values.first().cloned().unwrap_or(Self::Nil),
            other => other,
        }
    }

    /// Expands the value into a list.
    ///
    /// A [`Value::Multi`] yields its elements; any other value yields
    /// itself. Used at the expansion sites: the last argument of a call,
    /// the last field of a table constructor, the last expression of a
    /// return or assignment list.
    #[must_use]
    pub fn into_values(self) -> Vec<Self> {
        match self {
            Self::Multi(values) => values.to_vec(),
            other => vec![other],
        }
    }

    /// Packs a value list the way a `return` does: one value stays bare,
    /// anything else (including none) becomes a [`Value::Multi`].
    #[must_use]
    pub fn pack(mut values: Vec<Self>) -> Self {
        if values.len() == 1 {
            values.pop().unwrap_or(Self::Nil)
        } else {
            Self::Multi(values.into())
        }
    }
}

impl PartialEq for Value {
    /// Type-tagged equality: values of different types are unequal; numbers
    /// compare by IEEE `f64` equality (so `-0.0 == 0.0` and NaN is unequal
    /// to itself); strings compare by content; tables and functions compare
    /// by identity.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nil, Self::Nil) => true,
            (Self::Bool(l), Self::Bool(r)) => l == r,
            (Self::Number(l), Self::Number(r)) => l == r,
            (Self::Str(l), Self::Str(r)) => l == r,
            (Self::Table(l), Self::Table(r)) => Rc::ptr_eq(l, r),
            (Self::Function(l), Self::Function(r)) => Rc::ptr_eq(l, r),
            (Self::Native(l), Self::Native(r)) => std::ptr::fn_addr_eq(*l, *r),
            (Self::Multi(l), Self::Multi(r)) => l == r,
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

/// Formats a number the way `print` displays it: integral values without a
/// decimal point, non-finite values as `inf`/`-inf`/`nan`.
#[must_use]
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "nan".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "inf".to_string() } else { "-inf".to_string() }
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{n:.0}")
    } else {
        format!("{n}")
    }
}

impl std::fmt::Display for Value {
    /// Renders the display string `print` uses: `nil`, `true`/`false`,
    /// numbers via [`format_number`], string contents verbatim, and the
    /// bare tags `function` and `table` for callables and tables.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{}", format_number(*n)),
            Self::Str(s) => write!(f, "{s}"),
            Self::Table(_) => write!(f, "table"),
            Self::Function(_) | Self::Native(_) => write!(f, "function"),
            Self::Multi(values) => {
                for (index, value) in values.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value}")?;
                }
                Ok(())
            },
        }
    }
}
