use std::collections::HashMap;

use crate::{
    error::RuntimeError,
    interpreter::value::core::{NativeFn, Value},
};

/// The built-in functions installed into every root scope's globals.
pub const NATIVE_FUNCTIONS: &[(&str, NativeFn)] = &[("print", print), ("assert", assert_fn)];

/// Installs the built-in functions into a globals map.
pub fn install(globals: &mut HashMap<String, Value>) {
    for (name, function) in NATIVE_FUNCTIONS {
        globals.insert((*name).to_string(), Value::Native(*function));
    }
}

/// Prints its arguments to standard output.
///
/// Each argument is rendered with its display string; the pieces are
/// separated by a single TAB and followed by a newline. Returns no value.
fn print(args: &[Value]) -> Result<Value, RuntimeError> {
    let line = args.iter()
                   .map(ToString::to_string)
                   .collect::<Vec<_>>()
                   .join("\t");
    println!("{line}");
    Ok(Value::Nil)
}

/// Checks that its first argument is truthy.
///
/// On success the condition is returned unchanged. On failure the second
/// argument, stringified when it is not already a string, becomes the
/// error message; without one the message is `assertion failed!`.
fn assert_fn(args: &[Value]) -> Result<Value, RuntimeError> {
    let cond = args.first().cloned().unwrap_or(Value::Nil);
    if cond.is_truthy() {
        return Ok(cond);
    }

    let message = match args.get(1) {
        Some(message) => message.to_string(),
        None => "assertion failed!".to_string(),
    };
    Err(RuntimeError::AssertionFailed { message })
}
