//! Text functions

use crate::error::{FormulaError, FormulaResult};
use crate::evaluator::Value;

fn text(value: &Value) -> String {
    value.to_display_string()
}

fn count_arg(value: &Value, function: &str) -> FormulaResult<usize> {
    let n = value.to_number()?;
    if n < 0.0 {
        return Err(FormulaError::Eval(format!(
            "{function} expects a non-negative count"
        )));
    }
    Ok(n as usize)
}

/// CONCATENATE function
pub fn fn_concatenate(args: &[Value]) -> FormulaResult<Value> {
    let mut result = String::new();
    for arg in args {
        result.push_str(&text(arg));
    }
    Ok(Value::String(result))
}

/// UPPER function
pub fn fn_upper(args: &[Value]) -> FormulaResult<Value> {
    Ok(Value::String(text(&args[0]).to_uppercase()))
}

/// LOWER function
pub fn fn_lower(args: &[Value]) -> FormulaResult<Value> {
    Ok(Value::String(text(&args[0]).to_lowercase()))
}

/// LEN function (counts characters, not bytes)
pub fn fn_len(args: &[Value]) -> FormulaResult<Value> {
    Ok(Value::Number(text(&args[0]).chars().count() as f64))
}

/// TRIM function
pub fn fn_trim(args: &[Value]) -> FormulaResult<Value> {
    Ok(Value::String(text(&args[0]).trim().to_string()))
}

/// LEFT function (count defaults to 1)
pub fn fn_left(args: &[Value]) -> FormulaResult<Value> {
    let s = text(&args[0]);
    let n = match args.get(1) {
        Some(v) => count_arg(v, "LEFT")?,
        None => 1,
    };
    Ok(Value::String(s.chars().take(n).collect()))
}

/// RIGHT function (count defaults to 1)
pub fn fn_right(args: &[Value]) -> FormulaResult<Value> {
    let s = text(&args[0]);
    let n = match args.get(1) {
        Some(v) => count_arg(v, "RIGHT")?,
        None => 1,
    };
    let len = s.chars().count();
    Ok(Value::String(s.chars().skip(len.saturating_sub(n)).collect()))
}

/// MID function (start is 1-based)
pub fn fn_mid(args: &[Value]) -> FormulaResult<Value> {
    let s = text(&args[0]);
    let start = count_arg(&args[1], "MID")?;
    let len = count_arg(&args[2], "MID")?;

    if start == 0 {
        return Err(FormulaError::Eval("MID start position is 1-based".into()));
    }

    Ok(Value::String(s.chars().skip(start - 1).take(len).collect()))
}
