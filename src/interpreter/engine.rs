use std::{fmt, sync::Arc};

use crate::{
    error::{Error, ParseError},
    instruction::Program,
    interpreter::{
        config::ParserConfig,
        diagnostics::{DiagnosticSink, TracingSink},
        evaluator::{
            core::{EvalResult, run},
            resolve::Resolver,
        },
        lexer::tokenize,
        parser::core::parse_program,
        registry::Registry,
        variables::VariableLookup,
    },
};

/// A configured expression parser and evaluator.
///
/// The registry, the unresolved-identifier policy and the diagnostic sink
/// are fixed when the parser is built. Every call to [`parse`] and
/// [`evaluate`] works only on its own arguments and call-local state, so one
/// parser can be shared freely between threads.
///
/// [`parse`]: ExpressionParser::parse
/// [`evaluate`]: ExpressionParser::evaluate
///
/// # Example
/// ```
/// use std::collections::HashMap;
///
/// use lattice_expr::interpreter::ExpressionParser;
///
/// let parser = ExpressionParser::new();
/// let program = parser.parse("2*pi*b0/length").unwrap();
///
/// let element = HashMap::from([("b0", 0.5), ("length", 2.0)]);
/// let k1 = parser.evaluate(&program, &element).unwrap();
/// assert!((k1 - std::f64::consts::PI / 2.0).abs() < 1e-12);
/// ```
#[derive(Clone)]
pub struct ExpressionParser {
    registry: Arc<Registry>,
    config:   ParserConfig,
    sink:     Arc<dyn DiagnosticSink>,
}

impl fmt::Debug for ExpressionParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpressionParser")
         .field("registry", &self.registry)
         .field("config", &self.config)
         .finish_non_exhaustive()
    }
}

impl Default for ExpressionParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpressionParser {
    /// Creates a parser with the standard registry, the default policy (warn
    /// and substitute `0.0`) and diagnostics sent to `tracing`.
    #[must_use]
    pub fn new() -> Self {
        Self { registry: Arc::new(Registry::standard()),
               config:   ParserConfig::default(),
               sink:     Arc::new(TracingSink), }
    }

    /// Replaces the unresolved-identifier policy.
    #[must_use]
    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the registry.
    #[must_use]
    pub fn with_registry(mut self, registry: impl Into<Arc<Registry>>) -> Self {
        self.registry = registry.into();
        self
    }

    /// Replaces the diagnostic sink.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// The unresolved-identifier policy.
    #[must_use]
    pub const fn config(&self) -> ParserConfig {
        self.config
    }

    /// The registry shared by every parse and evaluation.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Parses `text` into a postfix instruction sequence.
    ///
    /// # Errors
    /// Returns a [`ParseError`] describing the first problem found. No state
    /// outside the returned value is touched, whether parsing succeeds or not.
    pub fn parse(&self, text: &str) -> Result<Program, ParseError> {
        let tokens = tokenize(text)?;
        let program = parse_program(&tokens, &self.registry, text.len())?;
        tracing::trace!(expression = text, instructions = program.len(), "parsed expression");
        Ok(program)
    }

    /// Evaluates a parsed program against a variable table.
    ///
    /// The program is not modified and may be evaluated again with another
    /// table.
    ///
    /// # Errors
    /// Returns an [`EvalError`](crate::error::EvalError) for unresolved
    /// identifiers under the strict policy, or for malformed hand-built
    /// programs.
    pub fn evaluate<V>(&self, program: &Program, variables: &V) -> EvalResult<f64>
        where V: VariableLookup + ?Sized
    {
        let resolver = Resolver::new(&self.registry, variables, self.config, self.sink.as_ref());
        let value = run(program, &resolver)?;
        tracing::trace!(instructions = program.len(), value, "evaluated expression");
        Ok(value)
    }

    /// Parses and evaluates `text` in one step.
    ///
    /// # Errors
    /// Returns [`Error::Parse`] or [`Error::Eval`].
    pub fn evaluate_str<V>(&self, text: &str, variables: &V) -> Result<f64, Error>
        where V: VariableLookup + ?Sized
    {
        let program = self.parse(text)?;
        Ok(self.evaluate(&program, variables)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::EvalError, interpreter::diagnostics::CollectingSink};

    #[test]
    fn parser_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ExpressionParser>();
    }

    #[test]
    fn strict_policy_wins_over_warning() {
        let sink = Arc::new(CollectingSink::new());
        let config = ParserConfig::default().raise_on_unresolved(true)
                                            .warn_on_unresolved(true);
        let parser = ExpressionParser::new().with_config(config).with_sink(sink.clone());

        assert_eq!(parser.evaluate_str("x + 1", &[("y", 1.0)]),
                   Err(Error::Eval(EvalError::UndefinedVariable { name: "x".to_string() })));
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn custom_registry_is_used_by_both_phases() {
        let registry = Registry::standard().with_binary_function("atan2", f64::atan2)
                                           .with_constant("brho", 10.0);
        let parser = ExpressionParser::new().with_registry(registry);

        let value = parser.evaluate_str("brho * atan2(1, 1)", &[("l", 1.0)]).unwrap();
        assert!((value - 10.0 * std::f64::consts::FRAC_PI_4).abs() < 1e-12);
    }
}
