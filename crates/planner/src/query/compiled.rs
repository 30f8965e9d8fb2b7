use model::records::udf::{FunctionRequirement, dedup_requirements};

/// Output of the compiler.
///
/// A query that calls no server-side function is ready to run as is. Otherwise
/// the listed functions must exist in the target container first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompiledQuery {
    Plain(String),
    WithFunctions {
        text: String,
        /// In the order the operators appear; ids may repeat.
        requirements: Vec<FunctionRequirement>,
    },
}

impl CompiledQuery {
    pub(crate) fn new(text: String, requirements: Vec<FunctionRequirement>) -> Self {
        if requirements.is_empty() {
            CompiledQuery::Plain(text)
        } else {
            CompiledQuery::WithFunctions { text, requirements }
        }
    }

    pub fn text(&self) -> &str {
        match self {
            CompiledQuery::Plain(text) | CompiledQuery::WithFunctions { text, .. } => text,
        }
    }

    pub fn requirements(&self) -> &[FunctionRequirement] {
        match self {
            CompiledQuery::Plain(_) => &[],
            CompiledQuery::WithFunctions { requirements, .. } => requirements,
        }
    }

    /// Requirements with repeated ids removed.
    pub fn unique_requirements(&self) -> Vec<FunctionRequirement> {
        dedup_requirements(self.requirements().iter().cloned())
    }

    pub fn is_plain(&self) -> bool {
        matches!(self, CompiledQuery::Plain(_))
    }
}
