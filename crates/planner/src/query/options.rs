use serde::{Deserialize, Serialize};

/// How `$and: []`, `$or: []` and `$nor: []` compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyListPolicy {
    /// The clause is dropped, as if it were absent.
    #[default]
    Omit,
    /// The clause becomes the identity of its operator: `true` for `$and`,
    /// `false` for `$or`.
    Literal,
    /// Compilation fails with [`CompileError::EmptyList`](crate::error::CompileError::EmptyList).
    Reject,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerOptions {
    pub empty_list: EmptyListPolicy,
}

impl CompilerOptions {
    pub fn with_empty_list(mut self, policy: EmptyListPolicy) -> Self {
        self.empty_list = policy;
        self
    }
}
