use std::{
    collections::{BTreeMap, HashMap},
    hash::BuildHasher,
};

/// Resolves identifiers that are not constants to caller-owned values.
///
/// The evaluator queries the lookup once for every identifier occurrence it
/// reaches, so a lookup backed by live element data always sees current
/// values. Nothing is cached between evaluations.
pub trait VariableLookup {
    /// Returns the value bound to `name`, if any.
    fn lookup(&self, name: &str) -> Option<f64>;
}

/// A lookup with no bindings.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoVariables;

impl VariableLookup for NoVariables {
    fn lookup(&self, _name: &str) -> Option<f64> {
        None
    }
}

/// Adapts a closure into a [`VariableLookup`].
///
/// # Example
/// ```
/// use lattice_expr::interpreter::variables::{FnLookup, VariableLookup};
///
/// let lookup = FnLookup(|name: &str| (name == "l").then_some(2.5));
/// assert_eq!(lookup.lookup("l"), Some(2.5));
/// assert_eq!(lookup.lookup("k1"), None);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FnLookup<F>(pub F);

impl<F> VariableLookup for FnLookup<F> where F: Fn(&str) -> Option<f64>
{
    fn lookup(&self, name: &str) -> Option<f64> {
        (self.0)(name)
    }
}

impl<S: BuildHasher> VariableLookup for HashMap<String, f64, S> {
    fn lookup(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

impl<S: BuildHasher> VariableLookup for HashMap<&str, f64, S> {
    fn lookup(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

impl VariableLookup for BTreeMap<String, f64> {
    fn lookup(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

impl VariableLookup for [(&str, f64)] {
    fn lookup(&self, name: &str) -> Option<f64> {
        self.iter().find(|(key, _)| *key == name).map(|(_, value)| *value)
    }
}

impl<const N: usize> VariableLookup for [(&str, f64); N] {
    fn lookup(&self, name: &str) -> Option<f64> {
        self.as_slice().lookup(name)
    }
}

impl<T: VariableLookup + ?Sized> VariableLookup for &T {
    fn lookup(&self, name: &str) -> Option<f64> {
        (**self).lookup(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_and_pairs() {
        let owned: HashMap<String, f64> = HashMap::from([("k1".to_string(), 0.5)]);
        let borrowed: HashMap<&str, f64> = HashMap::from([("k1", 0.5)]);
        let sorted: BTreeMap<String, f64> = BTreeMap::from([("k1".to_string(), 0.5)]);
        let pairs = [("k1", 0.5), ("l", 2.0)];

        assert_eq!(owned.lookup("k1"), Some(0.5));
        assert_eq!(borrowed.lookup("k1"), Some(0.5));
        assert_eq!(sorted.lookup("k1"), Some(0.5));
        assert_eq!(pairs.lookup("l"), Some(2.0));
        assert_eq!(pairs.lookup("k2"), None);
        assert_eq!(NoVariables.lookup("k1"), None);
    }
}
