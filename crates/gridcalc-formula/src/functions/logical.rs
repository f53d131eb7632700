//! Logical and type-inspection functions

use super::flatten;
use crate::error::{FormulaError, FormulaResult};
use crate::evaluator::Value;

fn condition(value: &Value, function: &str) -> FormulaResult<bool> {
    value
        .as_bool()
        .ok_or_else(|| FormulaError::Eval(format!("{function} expects a logical value")))
}

/// IF function
///
/// The else branch defaults to FALSE when omitted.
pub fn fn_if(args: &[Value]) -> FormulaResult<Value> {
    if condition(&args[0], "IF")? {
        Ok(args[1].clone())
    } else {
        Ok(args.get(2).cloned().unwrap_or(Value::Boolean(false)))
    }
}

/// AND function
pub fn fn_and(args: &[Value]) -> FormulaResult<Value> {
    let mut result = true;
    for value in flatten(args) {
        if matches!(value, Value::Empty) {
            continue;
        }
        result &= condition(value, "AND")?;
    }
    Ok(Value::Boolean(result))
}

/// OR function
pub fn fn_or(args: &[Value]) -> FormulaResult<Value> {
    let mut result = false;
    for value in flatten(args) {
        if matches!(value, Value::Empty) {
            continue;
        }
        result |= condition(value, "OR")?;
    }
    Ok(Value::Boolean(result))
}

/// NOT function
pub fn fn_not(args: &[Value]) -> FormulaResult<Value> {
    Ok(Value::Boolean(!condition(&args[0], "NOT")?))
}

/// ISBLANK function
pub fn fn_isblank(args: &[Value]) -> FormulaResult<Value> {
    Ok(Value::Boolean(matches!(args[0], Value::Empty)))
}

/// ISNUMBER function
pub fn fn_isnumber(args: &[Value]) -> FormulaResult<Value> {
    Ok(Value::Boolean(matches!(args[0], Value::Number(_))))
}
