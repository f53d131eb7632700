//! Math and aggregate functions

use super::{flatten, numeric};
use crate::error::{FormulaError, FormulaResult};
use crate::evaluator::Value;

/// SUM function
pub fn fn_sum(args: &[Value]) -> FormulaResult<Value> {
    let sum: f64 = flatten(args).filter_map(numeric).sum();
    Ok(Value::Number(sum))
}

/// AVERAGE function
pub fn fn_average(args: &[Value]) -> FormulaResult<Value> {
    let mut sum = 0.0;
    let mut count: u32 = 0;

    for n in flatten(args).filter_map(numeric) {
        sum += n;
        count += 1;
    }

    if count == 0 {
        Err(FormulaError::Eval("AVERAGE of no numeric values".into()))
    } else {
        Ok(Value::Number(sum / count as f64))
    }
}

/// MIN function
pub fn fn_min(args: &[Value]) -> FormulaResult<Value> {
    let min = flatten(args).filter_map(numeric).fold(None, |acc, n| {
        Some(acc.map_or(n, |m: f64| m.min(n)))
    });
    Ok(Value::Number(min.unwrap_or(0.0)))
}

/// MAX function
pub fn fn_max(args: &[Value]) -> FormulaResult<Value> {
    let max = flatten(args).filter_map(numeric).fold(None, |acc, n| {
        Some(acc.map_or(n, |m: f64| m.max(n)))
    });
    Ok(Value::Number(max.unwrap_or(0.0)))
}

/// COUNT function (counts numeric values only)
pub fn fn_count(args: &[Value]) -> FormulaResult<Value> {
    let count = flatten(args).filter_map(numeric).count();
    Ok(Value::Number(count as f64))
}

/// PRODUCT function
pub fn fn_product(args: &[Value]) -> FormulaResult<Value> {
    let mut product = 1.0;
    let mut seen = false;

    for n in flatten(args).filter_map(numeric) {
        product *= n;
        seen = true;
    }

    Ok(Value::Number(if seen { product } else { 0.0 }))
}

/// ABS function
pub fn fn_abs(args: &[Value]) -> FormulaResult<Value> {
    Ok(Value::Number(args[0].to_number()?.abs()))
}

/// ROUND function (digits defaults to 0)
pub fn fn_round(args: &[Value]) -> FormulaResult<Value> {
    let n = args[0].to_number()?;
    let digits = match args.get(1) {
        Some(d) => d.to_number()? as i32,
        None => 0,
    };

    let factor = 10f64.powi(digits);
    Ok(Value::Number((n * factor).round() / factor))
}

/// INT function (rounds down to the nearest integer)
pub fn fn_int(args: &[Value]) -> FormulaResult<Value> {
    Ok(Value::Number(args[0].to_number()?.floor()))
}

/// MOD function (result takes the sign of the divisor)
pub fn fn_mod(args: &[Value]) -> FormulaResult<Value> {
    let a = args[0].to_number()?;
    let b = args[1].to_number()?;

    if b == 0.0 {
        return Err(FormulaError::Eval("MOD by zero".into()));
    }

    Ok(Value::Number(a - b * (a / b).floor()))
}

/// SQRT function
pub fn fn_sqrt(args: &[Value]) -> FormulaResult<Value> {
    let n = args[0].to_number()?;
    if n < 0.0 {
        return Err(FormulaError::Eval("SQRT of a negative number".into()));
    }
    Ok(Value::Number(n.sqrt()))
}

/// POWER function
pub fn fn_power(args: &[Value]) -> FormulaResult<Value> {
    let result = args[0].to_number()?.powf(args[1].to_number()?);
    if result.is_nan() || result.is_infinite() {
        return Err(FormulaError::Eval("Numeric overflow in POWER".into()));
    }
    Ok(Value::Number(result))
}
