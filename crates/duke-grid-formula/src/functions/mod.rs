//! Built-in functions

pub mod aggregate;

use crate::error::FormulaResult;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Function implementation signature
///
/// Functions receive the numeric values of their range and produce a number.
pub type FunctionImpl = fn(&[f64]) -> FormulaResult<f64>;

/// Function definition
pub struct FunctionDef {
    /// Function name (uppercase)
    pub name: &'static str,
    /// One-line description shown in suggestions
    pub description: &'static str,
    /// Example usage
    pub example: &'static str,
    /// Implementation
    pub implementation: FunctionImpl,
}

impl std::fmt::Debug for FunctionDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionDef")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Function registry
pub struct FunctionRegistry {
    /// Definitions in registration order
    functions: Vec<FunctionDef>,
    /// Uppercase name → index into `functions`
    by_name: HashMap<&'static str, usize>,
}

/// Global function registry (lazily initialized)
static FUNCTION_REGISTRY: OnceLock<FunctionRegistry> = OnceLock::new();

/// The shared registry of built-in functions
pub fn registry() -> &'static FunctionRegistry {
    FUNCTION_REGISTRY.get_or_init(FunctionRegistry::new)
}

impl FunctionRegistry {
    /// Create a new registry with all built-in functions
    pub fn new() -> Self {
        let mut registry = Self {
            functions: Vec::new(),
            by_name: HashMap::new(),
        };

        registry.register_aggregate_functions();

        registry
    }

    /// Look up a function by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&FunctionDef> {
        let name = name.to_ascii_uppercase();
        self.by_name.get(name.as_str()).map(|&i| &self.functions[i])
    }

    /// Register a function, replacing any previous one with the same name
    pub fn register(&mut self, def: FunctionDef) {
        match self.by_name.get(def.name) {
            Some(&i) => self.functions[i] = def,
            None => {
                self.by_name.insert(def.name, self.functions.len());
                self.functions.push(def);
            }
        }
    }

    /// All functions in registration order
    pub fn functions(&self) -> &[FunctionDef] {
        &self.functions
    }

    /// Functions whose name starts with what was typed after `=`
    ///
    /// Returns nothing for input that isn't a formula.
    pub fn suggestions(&self, input: &str) -> Vec<&FunctionDef> {
        let Some(typed) = input.strip_prefix('=') else {
            return Vec::new();
        };
        let typed = typed.to_ascii_uppercase();
        self.functions
            .iter()
            .filter(|def| def.name.starts_with(typed.as_str()))
            .collect()
    }

    fn register_aggregate_functions(&mut self) {
        self.register(FunctionDef {
            name: "SUM",
            description: "Adds up all numbers in the selected range",
            example: "=SUM(A1:A10)",
            implementation: aggregate::fn_sum,
        });

        self.register(FunctionDef {
            name: "AVERAGE",
            description: "Calculates the average of numbers in the selected range",
            example: "=AVERAGE(A1:A10)",
            implementation: aggregate::fn_average,
        });

        self.register(FunctionDef {
            name: "MAX",
            description: "Finds the largest number in the selected range",
            example: "=MAX(A1:A10)",
            implementation: aggregate::fn_max,
        });

        self.register(FunctionDef {
            name: "MIN",
            description: "Finds the smallest number in the selected range",
            example: "=MIN(A1:A10)",
            implementation: aggregate::fn_min,
        });

        self.register(FunctionDef {
            name: "COUNT",
            description: "Counts the number of cells with numbers in the selected range",
            example: "=COUNT(A1:A10)",
            implementation: aggregate::fn_count,
        });
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Suggestions from the built-in registry
pub fn suggestions(input: &str) -> Vec<&'static FunctionDef> {
    registry().suggestions(input)
}
