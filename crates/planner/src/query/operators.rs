//! Static table of the field operators the compiler understands.

use crate::query::{
    functions::{self, FunctionDescriptor},
    template::Template,
};
use lazy_static::lazy_static;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy)]
pub enum OperatorKind {
    /// Compiled straight into the query text.
    Inline(Template),
    /// Compiled into a call to a server-side function.
    Function(FunctionDescriptor),
}

#[derive(Debug, Clone, Copy)]
pub struct OperatorDescriptor {
    pub id: &'static str,
    pub kind: OperatorKind,
}

impl OperatorDescriptor {
    const fn inline(id: &'static str, template: &'static str) -> Self {
        Self {
            id,
            kind: OperatorKind::Inline(Template::new(template)),
        }
    }

    const fn function(id: &'static str, descriptor: FunctionDescriptor) -> Self {
        Self {
            id,
            kind: OperatorKind::Function(descriptor),
        }
    }

    pub fn function_descriptor(&self) -> Option<&FunctionDescriptor> {
        match &self.kind {
            OperatorKind::Function(f) => Some(f),
            OperatorKind::Inline(_) => None,
        }
    }

    /// Template filled with the field reference and operand literal.
    pub fn template(&self) -> Template {
        match self.kind {
            OperatorKind::Inline(template) => template,
            OperatorKind::Function(f) => f.call,
        }
    }
}

const BUILTIN_OPERATORS: [OperatorDescriptor; 10] = [
    // Comparison
    OperatorDescriptor::inline("$gt", "{0} > {1}"),
    OperatorDescriptor::inline("$gte", "{0} >= {1}"),
    OperatorDescriptor::inline("$lt", "{0} < {1}"),
    OperatorDescriptor::inline("$lte", "{0} <= {1}"),
    OperatorDescriptor::inline("$ne", "{0} <> {1}"),
    // Function-backed
    OperatorDescriptor::function("$in", functions::IN_UDF),
    OperatorDescriptor::function("$all", functions::ALL_UDF),
    OperatorDescriptor::function("$size", functions::SIZE_UDF),
    OperatorDescriptor::function("$regex", functions::REGEX_UDF),
    OperatorDescriptor::function("$type", functions::TYPE_UDF),
];

/// Equality between a field and a scalar value.
pub const EQUALITY: Template = Template::new("{0}={1}");

lazy_static! {
    static ref BUILTIN_REGISTRY: OperatorRegistry = OperatorRegistry::from_descriptors(&BUILTIN_OPERATORS);
}

/// Read-only lookup of operator ids to their descriptors.
#[derive(Debug)]
pub struct OperatorRegistry {
    operators: HashMap<&'static str, OperatorDescriptor>,
}

impl OperatorRegistry {
    /// The registry with every built-in operator.
    pub fn builtin() -> &'static OperatorRegistry {
        &BUILTIN_REGISTRY
    }

    fn from_descriptors(descriptors: &[OperatorDescriptor]) -> Self {
        Self {
            operators: descriptors.iter().map(|d| (d.id, *d)).collect(),
        }
    }

    pub fn resolve(&self, id: &str) -> Option<&OperatorDescriptor> {
        self.operators.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.operators.contains_key(id)
    }

    /// Operator ids in sorted order.
    pub fn ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<_> = self.operators.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Every function a compiled query may require.
    pub fn functions(&self) -> impl Iterator<Item = &FunctionDescriptor> {
        self.operators.values().filter_map(|d| d.function_descriptor())
    }
}
