use std::{collections::HashMap, f64::consts};

/// A function of one argument.
pub type UnaryFn = fn(f64) -> f64;
/// A function of two arguments, also used for binary operators.
pub type BinaryFn = fn(f64, f64) -> f64;

/// Electron rest mass in GeV.
pub const ELECTRON_MASS: f64 = 0.510_999_06e-3;
/// Proton rest mass in GeV.
pub const PROTON_MASS: f64 = 0.938_272_31;
/// Speed of light in m/s.
pub const SPEED_OF_LIGHT: f64 = 2.997_924_58e8;

/// The named constants, functions and operators available to expressions.
///
/// A registry is assembled once, optionally extended with the consuming
/// `with_*` methods, and then shared read-only by every parse and evaluation
/// of the parser that owns it. Nothing mutates a registry after that point.
///
/// A name is never registered as both a unary and a binary function; the
/// builder methods move a name from one table to the other.
///
/// # Example
/// ```
/// use lattice_expr::interpreter::registry::Registry;
///
/// let registry = Registry::standard().with_constant("brho", 33.356)
///                                    .with_function("sinh", f64::sinh);
///
/// assert_eq!(registry.constant("brho"), Some(33.356));
/// assert!(registry.unary_function("sinh").is_some());
/// assert!(registry.is_binary_function("max"));
/// ```
#[derive(Debug, Clone)]
pub struct Registry {
    constants:        HashMap<String, f64>,
    functions:        HashMap<String, UnaryFn>,
    binary_functions: HashMap<String, BinaryFn>,
    operators:        HashMap<char, BinaryFn>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::standard()
    }
}

impl Registry {
    /// Creates the standard lattice-file environment.
    ///
    /// - Operators: `+ - * / ^`, where `^` is real exponentiation (`powf`).
    /// - Functions: `sqrt log exp sin cos tan asin abs`; `log` is the natural
    ///   logarithm.
    /// - Binary functions: `max min`.
    /// - Constants: `pi twopi degrad raddeg e emass pmass clight`.
    #[must_use]
    pub fn standard() -> Self {
        let constants = [("pi", consts::PI),
                         ("twopi", consts::TAU),
                         ("degrad", 180.0 / consts::PI),
                         ("raddeg", consts::PI / 180.0),
                         ("e", consts::E),
                         ("emass", ELECTRON_MASS),
                         ("pmass", PROTON_MASS),
                         ("clight", SPEED_OF_LIGHT)];

        let functions: [(&str, UnaryFn); 8] = [("sqrt", f64::sqrt),
                                               ("log", f64::ln),
                                               ("exp", f64::exp),
                                               ("sin", f64::sin),
                                               ("cos", f64::cos),
                                               ("tan", f64::tan),
                                               ("asin", f64::asin),
                                               ("abs", f64::abs)];

        let binary_functions: [(&str, BinaryFn); 2] = [("max", f64::max), ("min", f64::min)];

        let operators: [(char, BinaryFn); 5] = [('+', |a, b| a + b),
                                                ('-', |a, b| a - b),
                                                ('*', |a, b| a * b),
                                                ('/', |a, b| a / b),
                                                ('^', f64::powf)];

        Self { constants:        constants.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
               functions:        functions.into_iter().map(|(k, f)| (k.to_string(), f)).collect(),
               binary_functions: binary_functions.into_iter()
                                                 .map(|(k, f)| (k.to_string(), f))
                                                 .collect(),
               operators:        operators.into_iter().collect(), }
    }

    /// Adds or replaces a named constant.
    #[must_use]
    pub fn with_constant(mut self, name: impl Into<String>, value: f64) -> Self {
        self.constants.insert(name.into(), value);
        self
    }

    /// Adds or replaces a one-argument function.
    #[must_use]
    pub fn with_function(mut self, name: impl Into<String>, function: UnaryFn) -> Self {
        let name = name.into();
        self.binary_functions.remove(&name);
        self.functions.insert(name, function);
        self
    }

    /// Adds or replaces a two-argument function, callable as `name(a, b)`.
    #[must_use]
    pub fn with_binary_function(mut self, name: impl Into<String>, function: BinaryFn) -> Self {
        let name = name.into();
        self.functions.remove(&name);
        self.binary_functions.insert(name, function);
        self
    }

    /// Looks up a constant.
    #[must_use]
    pub fn constant(&self, name: &str) -> Option<f64> {
        self.constants.get(name).copied()
    }

    /// Looks up a one-argument function.
    #[must_use]
    pub fn unary_function(&self, name: &str) -> Option<UnaryFn> {
        self.functions.get(name).copied()
    }

    /// Looks up a two-argument function.
    #[must_use]
    pub fn binary_function(&self, name: &str) -> Option<BinaryFn> {
        self.binary_functions.get(name).copied()
    }

    /// Whether `name` is a registered two-argument function.
    #[must_use]
    pub fn is_binary_function(&self, name: &str) -> bool {
        self.binary_functions.contains_key(name)
    }

    /// Looks up the operation behind an operator symbol.
    #[must_use]
    pub fn operator(&self, symbol: char) -> Option<BinaryFn> {
        self.operators.get(&symbol).copied()
    }
}
