/// Policy for identifiers that resolve to neither a constant nor a variable.
///
/// | `raise_on_unresolved` | `warn_on_unresolved` | Outcome                          |
/// |-----------------------|----------------------|----------------------------------|
/// | `true`                | any                  | `EvalError::UndefinedVariable`   |
/// | `false`               | `true`               | diagnostic emitted, `0.0` used   |
/// | `false`               | `false`              | `0.0` used silently              |
///
/// # Example
/// ```
/// use lattice_expr::interpreter::config::ParserConfig;
///
/// let config = ParserConfig::default();
/// assert!(!config.raise_on_unresolved);
/// assert!(config.warn_on_unresolved);
///
/// let strict = ParserConfig::default().raise_on_unresolved(true);
/// assert!(strict.raise_on_unresolved);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Fail evaluation with `UndefinedVariable` on an unresolved identifier.
    pub raise_on_unresolved: bool,
    /// Emit a diagnostic before substituting `0.0`. Ignored when
    /// `raise_on_unresolved` is set.
    pub warn_on_unresolved:  bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self { raise_on_unresolved: false,
               warn_on_unresolved:  true, }
    }
}

impl ParserConfig {
    /// Sets `raise_on_unresolved`.
    #[must_use]
    pub const fn raise_on_unresolved(mut self, raise: bool) -> Self {
        self.raise_on_unresolved = raise;
        self
    }

    /// Sets `warn_on_unresolved`.
    #[must_use]
    pub const fn warn_on_unresolved(mut self, warn: bool) -> Self {
        self.warn_on_unresolved = warn;
        self
    }
}
