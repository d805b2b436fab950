use std::{
    fmt,
    sync::{Mutex, PoisonError},
};

/// A structured event reported on the side while evaluating.
///
/// Diagnostics never change the result of an evaluation; they only tell the
/// caller that a fallback was taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// An identifier matched neither a constant nor a variable and `0.0` was
    /// used in its place.
    UnresolvedIdentifier {
        /// The unresolved name.
        name: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnresolvedIdentifier { name } => {
                write!(f, "variable \"{name}\" uninitialized, treating as 0.0")
            },
        }
    }
}

/// Receives diagnostics emitted during evaluation.
///
/// Sinks are shared by every evaluation of a parser, possibly from several
/// threads at once.
pub trait DiagnosticSink: Send + Sync {
    /// Handles one diagnostic.
    fn emit(&self, diagnostic: &Diagnostic);
}

/// The default sink: forwards every diagnostic to `tracing` at `WARN` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, diagnostic: &Diagnostic) {
        match diagnostic {
            Diagnostic::UnresolvedIdentifier { name } => {
                tracing::warn!(name = %name, "{diagnostic}");
            },
        }
    }
}

/// A sink that stores diagnostics in memory.
///
/// # Example
/// ```
/// use std::sync::Arc;
///
/// use lattice_expr::interpreter::{
///     ExpressionParser,
///     diagnostics::{CollectingSink, Diagnostic},
///     variables::NoVariables,
/// };
///
/// let sink = Arc::new(CollectingSink::new());
/// let parser = ExpressionParser::new().with_sink(sink.clone());
///
/// assert_eq!(parser.evaluate_str("cos(x)", &NoVariables).unwrap(), 1.0);
/// assert_eq!(sink.take(),
///            vec![Diagnostic::UnresolvedIdentifier { name: "x".to_string() }]);
/// ```
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of everything collected so far.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Removes and returns everything collected so far.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.diagnostics
                                 .lock()
                                 .unwrap_or_else(PoisonError::into_inner))
    }
}

impl DiagnosticSink for CollectingSink {
    fn emit(&self, diagnostic: &Diagnostic) {
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(diagnostic.clone());
    }
}
