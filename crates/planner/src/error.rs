use thiserror::Error;

/// Errors raised while translating a filter. Compilation never returns a
/// partial query.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// A `$`-prefixed key that is not a known operator appeared where an
    /// operator was expected.
    #[error(
        "invalid operator `{operator}`{}",
        .field.as_deref().map(|f| format!(" on field `{f}`")).unwrap_or_default()
    )]
    InvalidOperator {
        operator: String,
        /// `None` for unknown keywords at document level.
        field: Option<String>,
    },

    /// The filter has the wrong shape, e.g. `$and` holding a scalar.
    #[error("malformed filter: {0}")]
    MalformedFilter(String),

    /// An empty `$and`/`$or`/`$nor` list under the reject policy.
    #[error("empty `{0}` list")]
    EmptyList(&'static str),
}
