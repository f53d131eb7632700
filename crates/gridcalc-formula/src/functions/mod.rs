//! Built-in formula functions

pub mod logical;
pub mod math;
pub mod text;

use crate::error::FormulaResult;
use crate::evaluator::Value;
use ahash::AHashMap;

/// Function implementation signature
///
/// Arguments arrive already evaluated; range references appear as
/// [`Value::Array`] blocks.
pub type FunctionImpl = fn(&[Value]) -> FormulaResult<Value>;

/// Function definition
pub struct FunctionDef {
    /// Function name (uppercase)
    pub name: &'static str,
    /// Minimum arguments
    pub min_args: usize,
    /// Maximum arguments (None = unlimited)
    pub max_args: Option<usize>,
    /// Implementation
    pub implementation: FunctionImpl,
}

/// Function registry
pub struct FunctionRegistry {
    functions: AHashMap<String, FunctionDef>,
}

impl FunctionRegistry {
    /// Create a new registry with all built-in functions
    pub fn new() -> Self {
        let mut registry = Self {
            functions: AHashMap::new(),
        };

        registry.register_math_functions();
        registry.register_logical_functions();
        registry.register_text_functions();

        registry
    }

    /// Look up a function by name
    pub fn get(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.get(&name.to_uppercase())
    }

    /// Register a function
    pub fn register(&mut self, def: FunctionDef) {
        self.functions.insert(def.name.to_uppercase(), def);
    }

    fn register_math_functions(&mut self) {
        self.register(FunctionDef {
            name: "SUM",
            min_args: 1,
            max_args: None,
            implementation: math::fn_sum,
        });
        self.register(FunctionDef {
            name: "AVERAGE",
            min_args: 1,
            max_args: None,
            implementation: math::fn_average,
        });
        self.register(FunctionDef {
            name: "MIN",
            min_args: 1,
            max_args: None,
            implementation: math::fn_min,
        });
        self.register(FunctionDef {
            name: "MAX",
            min_args: 1,
            max_args: None,
            implementation: math::fn_max,
        });
        self.register(FunctionDef {
            name: "COUNT",
            min_args: 1,
            max_args: None,
            implementation: math::fn_count,
        });
        self.register(FunctionDef {
            name: "PRODUCT",
            min_args: 1,
            max_args: None,
            implementation: math::fn_product,
        });
        self.register(FunctionDef {
            name: "ABS",
            min_args: 1,
            max_args: Some(1),
            implementation: math::fn_abs,
        });
        self.register(FunctionDef {
            name: "ROUND",
            min_args: 1,
            max_args: Some(2),
            implementation: math::fn_round,
        });
        self.register(FunctionDef {
            name: "INT",
            min_args: 1,
            max_args: Some(1),
            implementation: math::fn_int,
        });
        self.register(FunctionDef {
            name: "MOD",
            min_args: 2,
            max_args: Some(2),
            implementation: math::fn_mod,
        });
        self.register(FunctionDef {
            name: "SQRT",
            min_args: 1,
            max_args: Some(1),
            implementation: math::fn_sqrt,
        });
        self.register(FunctionDef {
            name: "POWER",
            min_args: 2,
            max_args: Some(2),
            implementation: math::fn_power,
        });
    }

    fn register_logical_functions(&mut self) {
        self.register(FunctionDef {
            name: "IF",
            min_args: 2,
            max_args: Some(3),
            implementation: logical::fn_if,
        });
        self.register(FunctionDef {
            name: "AND",
            min_args: 1,
            max_args: None,
            implementation: logical::fn_and,
        });
        self.register(FunctionDef {
            name: "OR",
            min_args: 1,
            max_args: None,
            implementation: logical::fn_or,
        });
        self.register(FunctionDef {
            name: "NOT",
            min_args: 1,
            max_args: Some(1),
            implementation: logical::fn_not,
        });
        self.register(FunctionDef {
            name: "ISBLANK",
            min_args: 1,
            max_args: Some(1),
            implementation: logical::fn_isblank,
        });
        self.register(FunctionDef {
            name: "ISNUMBER",
            min_args: 1,
            max_args: Some(1),
            implementation: logical::fn_isnumber,
        });
    }

    fn register_text_functions(&mut self) {
        self.register(FunctionDef {
            name: "CONCATENATE",
            min_args: 1,
            max_args: None,
            implementation: text::fn_concatenate,
        });
        self.register(FunctionDef {
            name: "UPPER",
            min_args: 1,
            max_args: Some(1),
            implementation: text::fn_upper,
        });
        self.register(FunctionDef {
            name: "LOWER",
            min_args: 1,
            max_args: Some(1),
            implementation: text::fn_lower,
        });
        self.register(FunctionDef {
            name: "LEN",
            min_args: 1,
            max_args: Some(1),
            implementation: text::fn_len,
        });
        self.register(FunctionDef {
            name: "TRIM",
            min_args: 1,
            max_args: Some(1),
            implementation: text::fn_trim,
        });
        self.register(FunctionDef {
            name: "LEFT",
            min_args: 1,
            max_args: Some(2),
            implementation: text::fn_left,
        });
        self.register(FunctionDef {
            name: "RIGHT",
            min_args: 1,
            max_args: Some(2),
            implementation: text::fn_right,
        });
        self.register(FunctionDef {
            name: "MID",
            min_args: 3,
            max_args: Some(3),
            implementation: text::fn_mid,
        });
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Flatten arguments one level, expanding range blocks row-major
///
/// Aggregates treat a range argument as its member cells, so this walks
/// arrays inline while leaving scalar arguments as-is.
pub(crate) fn flatten(args: &[Value]) -> impl Iterator<Item = &Value> {
    args.iter().flat_map(|arg| match arg {
        Value::Array(rows) => Flattened::Array(rows.iter().flatten()),
        other => Flattened::Scalar(std::iter::once(other)),
    })
}

enum Flattened<'a> {
    Scalar(std::iter::Once<&'a Value>),
    Array(std::iter::Flatten<std::slice::Iter<'a, Vec<Value>>>),
}

impl<'a> Iterator for Flattened<'a> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Flattened::Scalar(iter) => iter.next(),
            Flattened::Array(iter) => iter.next(),
        }
    }
}

/// Numeric view of a flattened argument for aggregate functions
///
/// Raw cell content is text, so numeric-looking strings count as numbers.
/// Blanks and non-numeric text are skipped rather than failing the whole
/// aggregate.
pub(crate) fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => Some(*n),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
