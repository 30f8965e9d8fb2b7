pub mod predicates;

use crate::query::template::Template;
use model::records::udf::FunctionRequirement;
use serde_json::Value as Json;

/// Rust evaluator with the same semantics as a function body.
pub type Predicate = fn(&Json, &Json) -> bool;

/// A predicate that runs server-side as a user-defined function.
#[derive(Debug, Clone, Copy)]
pub struct FunctionDescriptor {
    /// Catalog id of the function, e.g. `inUDF`.
    pub name: &'static str,
    /// Invocation filled with the field reference and the operand literal.
    pub call: Template,
    /// JavaScript source registered in the store.
    pub body: &'static str,
    pub predicate: Predicate,
}

impl FunctionDescriptor {
    pub fn requirement(&self) -> FunctionRequirement {
        FunctionRequirement::new(self.name, self.body)
    }

    /// Evaluates the function locally against a document value.
    pub fn evaluate(&self, value: &Json, operand: &Json) -> bool {
        (self.predicate)(value, operand)
    }
}

pub const IN_UDF: FunctionDescriptor = FunctionDescriptor {
    name: "inUDF",
    call: Template::new("udf.inUDF({0}, {1})"),
    body: include_str!("js/in_udf.js"),
    predicate: predicates::in_array,
};

pub const ALL_UDF: FunctionDescriptor = FunctionDescriptor {
    name: "allUDF",
    call: Template::new("udf.allUDF({0}, {1})"),
    body: include_str!("js/all_udf.js"),
    predicate: predicates::all_equal,
};

pub const SIZE_UDF: FunctionDescriptor = FunctionDescriptor {
    name: "sizeUDF",
    call: Template::new("udf.sizeUDF({0}, {1})"),
    body: include_str!("js/size_udf.js"),
    predicate: predicates::has_size,
};

pub const REGEX_UDF: FunctionDescriptor = FunctionDescriptor {
    name: "regexUDF",
    call: Template::new("udf.regexUDF({0}, {1})"),
    body: include_str!("js/regex_udf.js"),
    predicate: predicates::matches_regex,
};

pub const TYPE_UDF: FunctionDescriptor = FunctionDescriptor {
    name: "typeUDF",
    call: Template::new("udf.typeUDF({0}, {1})"),
    body: include_str!("js/type_udf.js"),
    predicate: predicates::has_type,
};
