//! Formula evaluator
//!
//! Evaluates formula ASTs to produce values, resolving cell and range
//! references through a [`Resolver`].

use crate::ast::{BinaryOperator, Expr, UnaryOperator};
use crate::error::{FormulaError, FormulaResult};
use crate::functions::FunctionRegistry;
use gridcalc_core::{CellRange, Coord};
use std::cmp::Ordering;
use std::sync::OnceLock;

/// Global function registry (lazily initialized)
static FUNCTION_REGISTRY: OnceLock<FunctionRegistry> = OnceLock::new();

fn get_function_registry() -> &'static FunctionRegistry {
    FUNCTION_REGISTRY.get_or_init(FunctionRegistry::new)
}

/// Value types during formula evaluation
///
/// The grid stores raw text, so values arriving from references are
/// `String` (or `Empty` for blank cells) and get coerced on demand:
/// arithmetic parses numeric-looking strings, logic accepts TRUE/FALSE
/// text, and blanks count as zero.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    String(String),
    Boolean(bool),
    /// Rectangular block produced by a range reference, row-major
    Array(Vec<Vec<Value>>),
    Empty,
}

impl Value {
    /// Convert to number, if possible
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Boolean(true) => Some(1.0),
            Value::Boolean(false) => Some(0.0),
            Value::String(s) => s.trim().parse().ok(),
            Value::Empty => Some(0.0),
            Value::Array(_) => None,
        }
    }

    /// Force conversion to number for arithmetic
    pub fn to_number(&self) -> FormulaResult<f64> {
        self.as_number()
            .ok_or_else(|| FormulaError::Eval(format!("Cannot convert {self:?} to number")))
    }

    /// Convert to boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            Value::Number(n) => Some(*n != 0.0),
            Value::String(s) => {
                let upper = s.to_uppercase();
                if upper == "TRUE" {
                    Some(true)
                } else if upper == "FALSE" {
                    Some(false)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Coerce to the string the widget would display
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Number(n) => {
                // No trailing ".0" on integral results
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
            Value::String(s) => s.clone(),
            Value::Boolean(true) => "TRUE".to_string(),
            Value::Boolean(false) => "FALSE".to_string(),
            Value::Empty => String::new(),
            Value::Array(_) => String::new(),
        }
    }
}

/// Reference resolution seam between the evaluator and the grid
///
/// The evaluator calls these hooks whenever the formula being evaluated
/// names a cell or range. The embedding layer implements them against its
/// value store; that is also where bounds checking and self-reference
/// detection live, which is why both hooks are fallible.
pub trait Resolver {
    /// Resolve a single cell reference to its value
    fn cell(&self, coord: Coord) -> FormulaResult<Value>;

    /// Resolve a range reference to a rectangular row-major block
    fn range(&self, range: CellRange) -> FormulaResult<Vec<Vec<Value>>>;
}

/// Resolver for reference-free evaluation: every cell reads as blank
pub struct NullResolver;

impl Resolver for NullResolver {
    fn cell(&self, _coord: Coord) -> FormulaResult<Value> {
        Ok(Value::Empty)
    }

    fn range(&self, range: CellRange) -> FormulaResult<Vec<Vec<Value>>> {
        let row = vec![Value::Empty; range.col_count() as usize];
        Ok(vec![row; range.row_count() as usize])
    }
}

/// Evaluate a formula expression
pub fn evaluate(expr: &Expr, resolver: &dyn Resolver) -> FormulaResult<Value> {
    match expr {
        // === Literals ===
        Expr::Number(n) => Ok(Value::Number(*n)),
        Expr::String(s) => Ok(Value::String(s.clone())),
        Expr::Boolean(b) => Ok(Value::Boolean(*b)),

        // === References ===
        Expr::CellRef(coord) => resolver.cell(*coord),
        Expr::RangeRef(range) => Ok(Value::Array(resolver.range(*range)?)),

        // === Operators ===
        Expr::BinaryOp { op, left, right } => evaluate_binary_op(*op, left, right, resolver),
        Expr::UnaryOp { op, operand } => evaluate_unary_op(*op, operand, resolver),

        // === Functions ===
        Expr::Function { name, args } => evaluate_function(name, args, resolver),
    }
}

/// Evaluate a binary operation
fn evaluate_binary_op(
    op: BinaryOperator,
    left: &Expr,
    right: &Expr,
    resolver: &dyn Resolver,
) -> FormulaResult<Value> {
    let left_val = evaluate(left, resolver)?;
    let right_val = evaluate(right, resolver)?;

    match op {
        // Arithmetic operators
        BinaryOperator::Add => {
            Ok(Value::Number(left_val.to_number()? + right_val.to_number()?))
        }
        BinaryOperator::Subtract => {
            Ok(Value::Number(left_val.to_number()? - right_val.to_number()?))
        }
        BinaryOperator::Multiply => {
            Ok(Value::Number(left_val.to_number()? * right_val.to_number()?))
        }
        BinaryOperator::Divide => {
            let l = left_val.to_number()?;
            let r = right_val.to_number()?;
            if r == 0.0 {
                Err(FormulaError::Eval("Division by zero".into()))
            } else {
                Ok(Value::Number(l / r))
            }
        }
        BinaryOperator::Power => {
            let result = left_val.to_number()?.powf(right_val.to_number()?);
            if result.is_nan() || result.is_infinite() {
                Err(FormulaError::Eval("Numeric overflow in exponentiation".into()))
            } else {
                Ok(Value::Number(result))
            }
        }

        // Comparison operators
        BinaryOperator::Equal => Ok(Value::Boolean(
            compare_values(&left_val, &right_val) == Ordering::Equal,
        )),
        BinaryOperator::NotEqual => Ok(Value::Boolean(
            compare_values(&left_val, &right_val) != Ordering::Equal,
        )),
        BinaryOperator::LessThan => Ok(Value::Boolean(
            compare_values(&left_val, &right_val) == Ordering::Less,
        )),
        BinaryOperator::LessEqual => Ok(Value::Boolean(
            compare_values(&left_val, &right_val) != Ordering::Greater,
        )),
        BinaryOperator::GreaterThan => Ok(Value::Boolean(
            compare_values(&left_val, &right_val) == Ordering::Greater,
        )),
        BinaryOperator::GreaterEqual => Ok(Value::Boolean(
            compare_values(&left_val, &right_val) != Ordering::Less,
        )),

        // Concatenation
        BinaryOperator::Concat => Ok(Value::String(
            left_val.to_display_string() + &right_val.to_display_string(),
        )),
    }
}

/// Compare two values for ordering (spreadsheet-style comparison)
fn compare_values(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        // Blank cells compare as zero
        (Value::Empty, Value::Empty) => Ordering::Equal,
        (Value::Empty, r) => compare_values(&Value::Number(0.0), r),
        (l, Value::Empty) => compare_values(l, &Value::Number(0.0)),

        // Numbers compare numerically
        (Value::Number(l), Value::Number(r)) => l.partial_cmp(r).unwrap_or(Ordering::Equal),

        // Numeric-looking strings compare numerically against numbers;
        // everything else follows the number < string ordering
        (Value::Number(l), Value::String(s)) => match s.trim().parse::<f64>() {
            Ok(r) => l.partial_cmp(&r).unwrap_or(Ordering::Equal),
            Err(_) => Ordering::Less,
        },
        (Value::String(s), Value::Number(r)) => match s.trim().parse::<f64>() {
            Ok(l) => l.partial_cmp(r).unwrap_or(Ordering::Equal),
            Err(_) => Ordering::Greater,
        },

        // Strings compare case-insensitively
        (Value::String(l), Value::String(r)) => l.to_lowercase().cmp(&r.to_lowercase()),

        // Booleans: FALSE < TRUE
        (Value::Boolean(l), Value::Boolean(r)) => l.cmp(r),

        // Mixed types: number < string < boolean
        (Value::Number(_), Value::Boolean(_)) => Ordering::Less,
        (Value::Boolean(_), Value::Number(_)) => Ordering::Greater,
        (Value::String(_), Value::Boolean(_)) => Ordering::Less,
        (Value::Boolean(_), Value::String(_)) => Ordering::Greater,

        _ => Ordering::Equal,
    }
}

/// Evaluate a unary operation
fn evaluate_unary_op(
    op: UnaryOperator,
    operand: &Expr,
    resolver: &dyn Resolver,
) -> FormulaResult<Value> {
    let val = evaluate(operand, resolver)?;

    match op {
        UnaryOperator::Negate => Ok(Value::Number(-val.to_number()?)),
        UnaryOperator::Percent => Ok(Value::Number(val.to_number()? / 100.0)),
    }
}

/// Evaluate a function call
fn evaluate_function(
    name: &str,
    args: &[Expr],
    resolver: &dyn Resolver,
) -> FormulaResult<Value> {
    let registry = get_function_registry();

    let func = registry
        .get(name)
        .ok_or_else(|| FormulaError::UnknownFunction(name.to_string()))?;

    // Check argument count
    if args.len() < func.min_args {
        return Err(FormulaError::ArgumentCount {
            function: name.to_string(),
            expected: format!("at least {}", func.min_args),
            actual: args.len(),
        });
    }

    if let Some(max) = func.max_args {
        if args.len() > max {
            return Err(FormulaError::ArgumentCount {
                function: name.to_string(),
                expected: format!("at most {max}"),
                actual: args.len(),
            });
        }
    }

    // Evaluate arguments
    let mut evaluated_args = Vec::with_capacity(args.len());
    for arg in args {
        evaluated_args.push(evaluate(arg, resolver)?);
    }

    // Call the function
    (func.implementation)(&evaluated_args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_expression;

    fn eval(expression: &str) -> FormulaResult<Value> {
        let expr = parse_expression(expression)?;
        evaluate(&expr, &NullResolver)
    }

    #[test]
    fn test_evaluate_literals() {
        assert_eq!(eval("42").unwrap(), Value::Number(42.0));
        assert_eq!(eval("\"Hello\"").unwrap(), Value::String("Hello".into()));
        assert_eq!(eval("TRUE").unwrap(), Value::Boolean(true));
    }

    #[test]
    fn test_evaluate_arithmetic() {
        assert_eq!(eval("1+2").unwrap(), Value::Number(3.0));
        assert_eq!(eval("10-3").unwrap(), Value::Number(7.0));
        assert_eq!(eval("4*5").unwrap(), Value::Number(20.0));
        assert_eq!(eval("20/4").unwrap(), Value::Number(5.0));
        assert_eq!(eval("2^10").unwrap(), Value::Number(1024.0));
    }

    #[test]
    fn test_evaluate_precedence() {
        assert_eq!(eval("1+2*3").unwrap(), Value::Number(7.0));
        assert_eq!(eval("(1+2)*3").unwrap(), Value::Number(9.0));
        assert_eq!(eval("2+3*4-5").unwrap(), Value::Number(9.0));
        assert_eq!(eval("2^3^2").unwrap(), Value::Number(512.0)); // Right assoc
    }

    #[test]
    fn test_evaluate_unary() {
        assert_eq!(eval("-5").unwrap(), Value::Number(-5.0));
        assert_eq!(eval("--5").unwrap(), Value::Number(5.0));
        assert_eq!(eval("50%").unwrap(), Value::Number(0.5));
    }

    #[test]
    fn test_evaluate_comparison() {
        assert_eq!(eval("1<2").unwrap(), Value::Boolean(true));
        assert_eq!(eval("1>2").unwrap(), Value::Boolean(false));
        assert_eq!(eval("5=5").unwrap(), Value::Boolean(true));
        assert_eq!(eval("5<>5").unwrap(), Value::Boolean(false));
        assert_eq!(eval("\"a\"<\"B\"").unwrap(), Value::Boolean(true));
    }

    #[test]
    fn test_evaluate_concat() {
        assert_eq!(
            eval("\"Hello \"&\"World\"").unwrap(),
            Value::String("Hello World".into())
        );
        // Integral numbers concatenate without a trailing ".0"
        assert_eq!(eval("\"n=\"&4").unwrap(), Value::String("n=4".into()));
    }

    #[test]
    fn test_evaluate_division_by_zero() {
        assert!(matches!(eval("1/0"), Err(FormulaError::Eval(_))));
    }

    #[test]
    fn test_evaluate_string_coercion() {
        // Raw cell content is text, so arithmetic coerces numeric strings
        assert_eq!(eval("\"5\"+5").unwrap(), Value::Number(10.0));
        assert!(matches!(eval("\"abc\"+5"), Err(FormulaError::Eval(_))));
    }

    #[test]
    fn test_evaluate_unknown_function() {
        assert!(matches!(
            eval("NOSUCHFN(1)"),
            Err(FormulaError::UnknownFunction(_))
        ));
    }

    #[test]
    fn test_evaluate_argument_count() {
        assert!(matches!(
            eval("ABS(1,2)"),
            Err(FormulaError::ArgumentCount { .. })
        ));
        assert!(matches!(
            eval("SUM()"),
            Err(FormulaError::ArgumentCount { .. })
        ));
    }

    #[test]
    fn test_null_resolver_blank_cells() {
        // Blank cells coerce to zero in arithmetic
        assert_eq!(eval("A1+5").unwrap(), Value::Number(5.0));
        assert_eq!(eval("SUM(A1:B2)").unwrap(), Value::Number(0.0));
    }

    #[test]
    fn test_display_string() {
        assert_eq!(Value::Number(10.0).to_display_string(), "10");
        assert_eq!(Value::Number(2.5).to_display_string(), "2.5");
        assert_eq!(Value::Boolean(true).to_display_string(), "TRUE");
        assert_eq!(Value::Empty.to_display_string(), "");
    }
}
