use crate::{
    error::EvalError,
    interpreter::{
        config::ParserConfig,
        diagnostics::{Diagnostic, DiagnosticSink},
        evaluator::core::EvalResult,
        registry::Registry,
        variables::VariableLookup,
    },
};

/// Resolves identifiers for a single evaluation.
///
/// Resolution order is fixed: constants first, then the caller's variables,
/// then the unresolved-identifier policy of [`ParserConfig`]. A constant
/// therefore shadows a variable of the same name.
pub struct Resolver<'a, V: VariableLookup + ?Sized> {
    registry:  &'a Registry,
    variables: &'a V,
    config:    ParserConfig,
    sink:      &'a dyn DiagnosticSink,
}

impl<'a, V: VariableLookup + ?Sized> Resolver<'a, V> {
    /// Creates a resolver over one variable table.
    pub fn new(registry: &'a Registry,
               variables: &'a V,
               config: ParserConfig,
               sink: &'a dyn DiagnosticSink)
               -> Self {
        Self { registry,
               variables,
               config,
               sink }
    }

    /// The registry used for constants and operations.
    pub const fn registry(&self) -> &'a Registry {
        self.registry
    }

    /// Resolves `name` to a value.
    ///
    /// # Errors
    /// Returns [`EvalError::UndefinedVariable`] when `name` is unresolved and
    /// `raise_on_unresolved` is set. `raise_on_unresolved` takes priority over
    /// `warn_on_unresolved`; no diagnostic is emitted in that case.
    pub fn resolve(&self, name: &str) -> EvalResult<f64> {
        if let Some(value) = self.registry.constant(name) {
            return Ok(value);
        }
        if let Some(value) = self.variables.lookup(name) {
            return Ok(value);
        }
        if self.config.raise_on_unresolved {
            return Err(EvalError::UndefinedVariable { name: name.to_string() });
        }
        if self.config.warn_on_unresolved {
            self.sink.emit(&Diagnostic::UnresolvedIdentifier { name: name.to_string() });
        }
        Ok(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::diagnostics::CollectingSink;

    #[test]
    fn constants_shadow_variables() {
        let registry = Registry::standard();
        let sink = CollectingSink::new();
        let variables = [("pi", 3.0), ("k1", 0.25)];
        let resolver = Resolver::new(&registry, &variables, ParserConfig::default(), &sink);

        assert_eq!(resolver.resolve("pi").unwrap(), std::f64::consts::PI);
        assert_eq!(resolver.resolve("k1").unwrap(), 0.25);
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn policy_table() {
        let registry = Registry::standard();
        let variables: [(&str, f64); 0] = [];
        let cases = [(false, false, Ok(0.0), 0),
                     (false, true, Ok(0.0), 1),
                     (true, false, Err(EvalError::UndefinedVariable { name: "x".to_string() }), 0),
                     (true, true, Err(EvalError::UndefinedVariable { name: "x".to_string() }), 0)];

        for (raise, warn, expected, warnings) in cases {
            let sink = CollectingSink::new();
            let config = ParserConfig::default().raise_on_unresolved(raise)
                                                .warn_on_unresolved(warn);
            let resolver = Resolver::new(&registry, &variables, config, &sink);

            assert_eq!(resolver.resolve("x"), expected, "raise={raise} warn={warn}");
            assert_eq!(sink.diagnostics().len(), warnings, "raise={raise} warn={warn}");
        }
    }
}
