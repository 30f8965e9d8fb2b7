//! Translates filter documents into query text.
//!
//! Keys are visited in insertion order and their fragments joined with `AND`.
//! `$and`/`$or` lists are grouped in parentheses when they join more than one
//! fragment, and list elements with more than one key are grouped as well.
//! `$nor` compiles exactly like `$not` over `$or`.

use crate::{
    error::CompileError,
    query::{
        compiled::CompiledQuery,
        dialect::{Dialect, DocumentDb},
        operators::{EQUALITY, OperatorKind, OperatorRegistry},
        options::{CompilerOptions, EmptyListPolicy},
    },
};
use lazy_static::lazy_static;
use model::{
    filter::{Document, Filter, Node},
    records::udf::FunctionRequirement,
};
use std::sync::Arc;
use tracing::{debug, trace};

lazy_static! {
    static ref DEFAULT_COMPILER: Compiler = Compiler::default();
}

/// Compiles `filter` with the DocumentDB dialect and default options.
pub fn compile(filter: &Filter) -> Result<CompiledQuery, CompileError> {
    DEFAULT_COMPILER.compile(filter)
}

#[derive(Clone)]
pub struct Compiler {
    dialect: Arc<dyn Dialect>,
    registry: &'static OperatorRegistry,
    options: CompilerOptions,
}

impl Compiler {
    pub fn new(dialect: Arc<dyn Dialect>, options: CompilerOptions) -> Self {
        Self {
            dialect,
            registry: OperatorRegistry::builtin(),
            options,
        }
    }

    pub fn with_options(options: CompilerOptions) -> Self {
        Self::new(Arc::new(DocumentDb::default()), options)
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    pub fn compile(&self, filter: &Filter) -> Result<CompiledQuery, CompileError> {
        let mut translation = Translation {
            compiler: self,
            requirements: Vec::new(),
        };

        let predicate = match filter {
            Filter::Raw(raw) => {
                trace!(predicate = %raw, "passing raw predicate through");
                raw.clone()
            }
            Filter::Document(doc) => translation.document(doc, false)?,
        };

        let text = self.dialect.select_where(&predicate);
        debug!(
            query = %text,
            functions = translation.requirements.len(),
            "compiled filter"
        );

        Ok(CompiledQuery::new(text, translation.requirements))
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::with_options(CompilerOptions::default())
    }
}

#[derive(Debug, Clone, Copy)]
enum Logical {
    And,
    Or,
}

impl Logical {
    fn separator(self) -> &'static str {
        match self {
            Logical::And => " AND ",
            Logical::Or => " OR ",
        }
    }

    fn identity(self) -> &'static str {
        match self {
            Logical::And => "true",
            Logical::Or => "false",
        }
    }
}

/// State of one compile pass. Function requirements are collected here in
/// the order their operators are visited.
struct Translation<'c> {
    compiler: &'c Compiler,
    requirements: Vec<FunctionRequirement>,
}

impl Translation<'_> {
    /// An empty result means the document places no constraint.
    fn document(&mut self, doc: &Document, negated: bool) -> Result<String, CompileError> {
        Ok(self.fragments(doc, negated)?.join(" AND "))
    }

    /// One non-empty fragment per constraining key, in key order.
    fn fragments(&mut self, doc: &Document, negated: bool) -> Result<Vec<String>, CompileError> {
        // `NOT(...)` already groups a lone `$and`/`$or`.
        let grouped_by_not = negated && doc.len() == 1;
        let mut fragments = Vec::with_capacity(doc.len());

        for (key, node) in doc.iter() {
            let fragment = match key {
                "$not" => self.not(node)?,
                "$nor" => negate(self.logical(Logical::Or, "$nor", node, true)?),
                "$and" => self.logical(Logical::And, "$and", node, grouped_by_not)?,
                "$or" => self.logical(Logical::Or, "$or", node, grouped_by_not)?,
                _ if key.starts_with('$') => {
                    return Err(CompileError::InvalidOperator {
                        operator: key.to_string(),
                        field: None,
                    });
                }
                field => self.field(field, node)?,
            };

            if !fragment.is_empty() {
                fragments.push(fragment);
            }
        }

        Ok(fragments)
    }

    fn not(&mut self, node: &Node) -> Result<String, CompileError> {
        let Node::Document(inner) = node else {
            return Err(CompileError::MalformedFilter(format!(
                "`$not` expects a document, found a {}",
                node.kind()
            )));
        };
        Ok(negate(self.document(inner, true)?))
    }

    fn logical(
        &mut self,
        op: Logical,
        key: &'static str,
        node: &Node,
        grouped: bool,
    ) -> Result<String, CompileError> {
        let Node::List(items) = node else {
            return Err(CompileError::MalformedFilter(format!(
                "`{key}` expects a list of documents, found a {}",
                node.kind()
            )));
        };

        if items.is_empty() {
            return match self.compiler.options.empty_list {
                EmptyListPolicy::Omit => Ok(String::new()),
                EmptyListPolicy::Literal => Ok(op.identity().to_string()),
                EmptyListPolicy::Reject => Err(CompileError::EmptyList(key)),
            };
        }

        let mut parts = Vec::with_capacity(items.len());
        for item in items {
            let Node::Document(element) = item else {
                return Err(CompileError::MalformedFilter(format!(
                    "`{key}` elements must be documents, found a {}",
                    item.kind()
                )));
            };

            let fragments = self.fragments(element, false)?;
            match fragments.len() {
                0 => match op {
                    // An unconstrained alternative makes the whole disjunction unconstrained.
                    Logical::Or => return Ok(String::new()),
                    Logical::And => continue,
                },
                1 => parts.extend(fragments),
                _ => parts.push(format!("({})", fragments.join(" AND "))),
            }
        }

        let joined = parts.join(op.separator());
        if parts.len() > 1 && !grouped {
            Ok(format!("({joined})"))
        } else {
            Ok(joined)
        }
    }

    fn field(&mut self, field: &str, node: &Node) -> Result<String, CompileError> {
        match node {
            Node::Value(value) => {
                let field_ref = self.compiler.dialect.field_ref(field);
                Ok(EQUALITY.fill(&[field_ref.as_str(), value.to_literal().as_str()]))
            }
            Node::Document(ops) => self.operators(field, ops),
            Node::List(_) => Err(CompileError::MalformedFilter(format!(
                "field `{field}` holds a list; lists are only valid under `$and`, `$or`, `$nor` or as operator arguments"
            ))),
        }
    }

    /// Several operators on one field are all applied and grouped.
    fn operators(&mut self, field: &str, ops: &Document) -> Result<String, CompileError> {
        if ops.is_empty() {
            return Err(CompileError::MalformedFilter(format!(
                "field `{field}` has an empty operator document"
            )));
        }

        let field_ref = self.compiler.dialect.field_ref(field);
        let mut parts = Vec::with_capacity(ops.len());

        for (id, argument) in ops.iter() {
            let op = self.compiler.registry.resolve(id).ok_or_else(|| {
                CompileError::InvalidOperator {
                    operator: id.to_string(),
                    field: Some(field.to_string()),
                }
            })?;

            if let OperatorKind::Function(function) = &op.kind {
                self.requirements.push(function.requirement());
            }
            parts.push(op.template().fill(&[field_ref.as_str(), literal(argument).as_str()]));
        }

        if parts.len() > 1 {
            Ok(format!("({})", parts.join(" AND ")))
        } else {
            Ok(parts.join(""))
        }
    }
}

fn negate(fragment: String) -> String {
    if fragment.is_empty() {
        fragment
    } else {
        format!("NOT({fragment})")
    }
}

fn literal(node: &Node) -> String {
    match node {
        Node::Value(value) => value.to_literal(),
        other => other.to_json().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::functions;
    use model::core::value::Value;
    use serde_json::json;
    use tracing_test::traced_test;

    const BQ: &str = "SELECT * FROM root r WHERE ";

    fn filter(json: serde_json::Value) -> Filter {
        Filter::try_from(json).unwrap()
    }

    fn text(json: serde_json::Value) -> String {
        let compiled = compile(&filter(json)).unwrap();
        assert!(compiled.is_plain(), "unexpected functions in {compiled:?}");
        compiled.text().to_string()
    }

    fn with_policy(policy: EmptyListPolicy, json: serde_json::Value) -> Result<String, CompileError> {
        let compiler = Compiler::with_options(CompilerOptions::default().with_empty_list(policy));
        compiler.compile(&filter(json)).map(|c| c.text().to_string())
    }

    #[test]
    fn empty_filter_selects_everything() {
        assert_eq!(text(json!({})), "SELECT * FROM root r");
        assert_eq!(text(json!(null)), "SELECT * FROM root r");
        assert_eq!(
            compile(&Filter::default()).unwrap(),
            CompiledQuery::Plain("SELECT * FROM root r".into())
        );
    }

    #[test]
    fn simple_equality() {
        assert_eq!(text(json!({ "a": 1, "b": 2 })), format!("{BQ}r.a=1 AND r.b=2"));
        assert_eq!(
            text(json!({ "a": 1, "b": 2, "c": 3 })),
            format!("{BQ}r.a=1 AND r.b=2 AND r.c=3")
        );
        assert_eq!(
            text(json!({ "a": "1", "b": "2", "c": "3" })),
            format!(r#"{BQ}r.a="1" AND r.b="2" AND r.c="3""#)
        );
        assert_eq!(text(json!({ "name": "foo" })), format!(r#"{BQ}r.name="foo""#));
    }

    #[test]
    fn key_order_drives_clause_order() {
        assert_eq!(text(json!({ "b": 2, "a": 1 })), format!("{BQ}r.b=2 AND r.a=1"));
    }

    #[test]
    fn equality_with_not() {
        assert_eq!(
            text(json!({ "$not": { "a": 1, "b": 2, "c": 3 } })),
            format!("{BQ}NOT(r.a=1 AND r.b=2 AND r.c=3)")
        );
        assert_eq!(
            text(json!({ "$not": { "a": "1", "b": "2", "c": "3" } })),
            format!(r#"{BQ}NOT(r.a="1" AND r.b="2" AND r.c="3")"#)
        );
    }

    #[test]
    fn not_over_or_matches_nor() {
        assert_eq!(text(json!({ "$not": { "$or": [{ "a": 1 }] } })), format!("{BQ}NOT(r.a=1)"));
        assert_eq!(
            text(json!({ "$not": { "$or": [{ "a": 1, "b": 1 }, { "c": 3 }] } })),
            format!("{BQ}NOT((r.a=1 AND r.b=1) OR r.c=3)")
        );
        assert_eq!(
            text(json!({ "$nor": [{ "a": 1, "b": 1 }, { "c": 3 }] })),
            format!("{BQ}NOT((r.a=1 AND r.b=1) OR r.c=3)")
        );
    }

    #[test]
    fn nor() {
        assert_eq!(text(json!({ "$nor": [{ "a": 1 }, { "b": 3 }] })), format!("{BQ}NOT(r.a=1 OR r.b=3)"));
        assert_eq!(
            text(json!({ "$nor": [{ "a": "1" }, { "b": "3" }] })),
            format!(r#"{BQ}NOT(r.a="1" OR r.b="3")"#)
        );
        assert_eq!(text(json!({ "$nor": [{ "a": "1" }] })), format!(r#"{BQ}NOT(r.a="1")"#));
        assert_eq!(
            text(json!({ "$nor": [{ "a": 1, "b": 2 }, { "c": 4 }] })),
            format!("{BQ}NOT((r.a=1 AND r.b=2) OR r.c=4)")
        );
    }

    #[test]
    fn de_morgan_forms_agree() {
        let nor = text(json!({ "$nor": [{ "a": 1 }, { "b": 2 }] }));
        let not_or = text(json!({ "$not": { "$or": [{ "a": 1 }, { "b": 2 }] } }));
        assert_eq!(nor, not_or);
        assert_eq!(nor, format!("{BQ}NOT(r.a=1 OR r.b=2)"));
    }

    #[test]
    fn and_or_together() {
        assert_eq!(
            text(json!({ "$and": [{ "a": 2, "b": 3 }, { "c": 3 }] })),
            format!("{BQ}((r.a=2 AND r.b=3) AND r.c=3)")
        );
        assert_eq!(
            text(json!({ "$or": [{ "a": 2, "b": 3 }, { "c": 3 }] })),
            format!("{BQ}((r.a=2 AND r.b=3) OR r.c=3)")
        );
        assert_eq!(
            text(json!({ "$or": [{ "a": 2 }, { "$and": [{ "a": 1 }, { "b": 2 }] }] })),
            format!("{BQ}(r.a=2 OR (r.a=1 AND r.b=2))")
        );
        assert_eq!(
            text(json!({ "$and": [{ "a": 2 }, { "$or": [{ "a": 1 }, { "b": 2 }] }] })),
            format!("{BQ}(r.a=2 AND (r.a=1 OR r.b=2))")
        );
    }

    #[test]
    fn recursive_logical_groups() {
        let query = json!({ "$and": [
            { "a": 1 },
            { "$or": [{ "a": 2 }, { "b": 2 }, { "$and": [{ "a": 1 }, { "b": 1 }] }] }
        ]});
        assert_eq!(
            text(query),
            format!("{BQ}(r.a=1 AND (r.a=2 OR r.b=2 OR (r.a=1 AND r.b=1)))")
        );
    }

    #[test]
    fn single_element_lists_are_not_grouped() {
        assert_eq!(text(json!({ "$and": [{ "a": 1 }] })), format!("{BQ}r.a=1"));
        assert_eq!(text(json!({ "$or": [{ "a": 1, "b": 2 }] })), format!("{BQ}(r.a=1 AND r.b=2)"));
    }

    #[test]
    fn comparison_operators() {
        assert_eq!(
            text(json!({ "$not": { "name": { "$gt": 3 }, "age": 12 } })),
            format!("{BQ}NOT(r.name > 3 AND r.age=12)")
        );
        assert_eq!(
            text(json!({ "$not": { "name": { "$ne": "bar" } } })),
            format!(r#"{BQ}NOT(r.name <> "bar")"#)
        );
        assert_eq!(
            text(json!({ "$or": [{ "$not": { "a": 2 } }, { "$not": { "b": { "$ne": 1 } } }] })),
            format!("{BQ}(NOT(r.a=2) OR NOT(r.b <> 1))")
        );
        assert_eq!(
            text(json!({ "$or": [
                { "name": { "$ne": "Ariel" } },
                { "age": { "$lte": 26 } },
                { "$and": [{ "isAdmin": { "$ne": false } }, { "isUser": { "$ne": false } }] }
            ]})),
            format!(r#"{BQ}(r.name <> "Ariel" OR r.age <= 26 OR (r.isAdmin <> false AND r.isUser <> false))"#)
        );
        assert_eq!(
            text(json!({ "$or": [
                { "$not": { "name": { "$ne": "Ariel" } } },
                { "$not": { "age": { "$lte": 26 } } },
                { "$not": { "$and": [{ "isAdmin": { "$ne": false } }, { "isUser": { "$ne": false } }] } }
            ]})),
            format!(
                r#"{BQ}(NOT(r.name <> "Ariel") OR NOT(r.age <= 26) OR NOT(r.isAdmin <> false AND r.isUser <> false))"#
            )
        );
    }

    #[test]
    fn gte_and_lt() {
        assert_eq!(
            text(json!({ "age": { "$gte": 18 }, "score": { "$lt": 9.5 } })),
            format!("{BQ}r.age >= 18 AND r.score < 9.5")
        );
    }

    #[test]
    fn several_operators_on_one_field_are_grouped() {
        assert_eq!(
            text(json!({ "age": { "$gt": 1, "$lt": 5 } })),
            format!("{BQ}(r.age > 1 AND r.age < 5)")
        );
        assert_eq!(
            text(json!({ "$or": [{ "age": { "$gt": 1, "$lt": 5 } }, { "b": 1 }] })),
            format!("{BQ}((r.age > 1 AND r.age < 5) OR r.b=1)")
        );
    }

    #[test]
    fn negated_group_keeps_parentheses_next_to_other_keys() {
        assert_eq!(
            text(json!({ "$not": { "a": 1, "$or": [{ "b": 1 }, { "c": 2 }] } })),
            format!("{BQ}NOT(r.a=1 AND (r.b=1 OR r.c=2))")
        );
    }

    #[test]
    fn raw_strings_pass_through() {
        assert_eq!(text(json!("r.a=1 AND r.b=2")), format!("{BQ}r.a=1 AND r.b=2"));
        assert_eq!(text(json!("")), "SELECT * FROM root r");
    }

    #[test]
    fn function_operators_collect_requirements() {
        let compiled = compile(&filter(json!({ "coins": { "$in": 2 } }))).unwrap();
        assert_eq!(
            compiled,
            CompiledQuery::WithFunctions {
                text: format!("{BQ}udf.inUDF(r.coins, 2)"),
                requirements: vec![functions::IN_UDF.requirement()],
            }
        );

        let compiled = compile(&filter(json!({ "$not": { "coins": { "$in": 2 } } }))).unwrap();
        assert_eq!(compiled.text(), format!("{BQ}NOT(udf.inUDF(r.coins, 2))"));
        assert_eq!(compiled.requirements(), &[functions::IN_UDF.requirement()]);

        let compiled = compile(&filter(json!({ "name": { "$type": "string" } }))).unwrap();
        assert_eq!(compiled.text(), format!(r#"{BQ}udf.typeUDF(r.name, "string")"#));
        assert_eq!(compiled.requirements(), &[functions::TYPE_UDF.requirement()]);

        let compiled = compile(&filter(json!({ "$not": { "age": { "$type": "number" } } }))).unwrap();
        assert_eq!(compiled.text(), format!(r#"{BQ}NOT(udf.typeUDF(r.age, "number"))"#));
    }

    #[test]
    fn regex_operand_uses_literal_form() {
        let doc = Document::new().with(
            "$not",
            Document::new().with("name", Document::new().with("$regex", Value::regex("d+", "g"))),
        );
        let compiled = compile(&Filter::from(doc)).unwrap();
        assert_eq!(compiled.text(), format!("{BQ}NOT(udf.regexUDF(r.name, /d+/g))"));
        assert_eq!(compiled.requirements(), &[functions::REGEX_UDF.requirement()]);
    }

    #[test]
    fn regex_literal_keeps_slashes_inside() {
        let regex = |pattern: &str| {
            let doc = Document::new().with(
                "path",
                Document::new().with("$regex", Value::regex(pattern, "")),
            );
            compile(&Filter::from(doc)).unwrap().text().to_string()
        };

        assert_eq!(regex("a/b"), format!(r"{BQ}udf.regexUDF(r.path, /a\/b/)"));
        assert_eq!(regex(""), format!("{BQ}udf.regexUDF(r.path, /(?:)/)"));
    }

    #[test]
    fn list_operands_are_structural_json() {
        let compiled = compile(&filter(json!({ "tags": { "$in": [1, "two"] } }))).unwrap();
        assert_eq!(compiled.text(), format!(r#"{BQ}udf.inUDF(r.tags, [1,"two"])"#));
    }

    #[test]
    fn repeated_functions_are_kept_until_deduplicated() {
        let compiled = compile(&filter(json!({
            "a": { "$in": 1 },
            "b": { "$size": 2 },
            "c": { "$in": 3 }
        })))
        .unwrap();
        assert_eq!(
            compiled.text(),
            format!("{BQ}udf.inUDF(r.a, 1) AND udf.sizeUDF(r.b, 2) AND udf.inUDF(r.c, 3)")
        );
        assert_eq!(compiled.requirements().len(), 3);

        let unique = compiled.unique_requirements();
        assert_eq!(
            unique.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(),
            vec!["inUDF", "sizeUDF"]
        );
    }

    #[test]
    fn compiling_twice_is_byte_identical() {
        let f = filter(json!({ "$or": [{ "a": { "$in": 2 } }, { "b": "x", "c": { "$gt": 1 } }] }));
        let first = compile(&f).unwrap();
        let second = compile(&f).unwrap();
        assert_eq!(first, second);

        let merged = model::records::udf::dedup_requirements(
            first.requirements().iter().chain(second.requirements()).cloned(),
        );
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn invalid_operator_is_rejected() {
        let err = compile(&filter(json!({ "name": { "$bogus": "x" } }))).unwrap_err();
        assert_eq!(
            err,
            CompileError::InvalidOperator {
                operator: "$bogus".into(),
                field: Some("name".into()),
            }
        );
        assert_eq!(err.to_string(), "invalid operator `$bogus` on field `name`");

        assert!(matches!(
            compile(&filter(json!({ "name": { "$foo": "bar" } }))),
            Err(CompileError::InvalidOperator { .. })
        ));
    }

    #[test]
    fn nested_document_without_operator_is_rejected() {
        assert!(matches!(
            compile(&filter(json!({ "address": { "city": "Oslo" } }))),
            Err(CompileError::InvalidOperator { operator, .. }) if operator == "city"
        ));
    }

    #[test]
    fn unknown_top_level_keyword_is_rejected() {
        let err = compile(&filter(json!({ "$where": "1 = 1" }))).unwrap_err();
        assert_eq!(err.to_string(), "invalid operator `$where`");
    }

    #[test]
    fn malformed_shapes_fail_fast() {
        for json in [
            json!({ "$and": { "a": 1 } }),
            json!({ "$or": [1, 2] }),
            json!({ "$not": 1 }),
            json!({ "$nor": "a" }),
            json!({ "tags": [1, 2] }),
            json!({ "age": {} }),
        ] {
            assert!(
                matches!(compile(&filter(json.clone())), Err(CompileError::MalformedFilter(_))),
                "{json} should be malformed"
            );
        }
    }

    #[test]
    fn empty_lists_are_omitted_by_default() {
        assert_eq!(with_policy(EmptyListPolicy::Omit, json!({ "$and": [] })).unwrap(), "SELECT * FROM root r");
        assert_eq!(
            with_policy(EmptyListPolicy::Omit, json!({ "a": 1, "$or": [] })).unwrap(),
            format!("{BQ}r.a=1")
        );
        assert_eq!(
            with_policy(EmptyListPolicy::Omit, json!({ "$nor": [], "b": 2 })).unwrap(),
            format!("{BQ}r.b=2")
        );
    }

    #[test]
    fn empty_lists_as_literals() {
        assert_eq!(with_policy(EmptyListPolicy::Literal, json!({ "$and": [] })).unwrap(), format!("{BQ}true"));
        assert_eq!(
            with_policy(EmptyListPolicy::Literal, json!({ "a": 1, "$or": [] })).unwrap(),
            format!("{BQ}r.a=1 AND false")
        );
        assert_eq!(
            with_policy(EmptyListPolicy::Literal, json!({ "$nor": [] })).unwrap(),
            format!("{BQ}NOT(false)")
        );
    }

    #[test]
    fn empty_lists_rejected() {
        assert_eq!(
            with_policy(EmptyListPolicy::Reject, json!({ "$or": [] })),
            Err(CompileError::EmptyList("$or"))
        );
        assert_eq!(
            with_policy(EmptyListPolicy::Reject, json!({ "$and": [{ "$nor": [] }] })),
            Err(CompileError::EmptyList("$nor"))
        );
    }

    #[test]
    fn unconstrained_elements() {
        assert_eq!(text(json!({ "$and": [{}, { "a": 1 }] })), format!("{BQ}r.a=1"));
        assert_eq!(text(json!({ "$or": [{}, { "a": 1 }], "b": 2 })), format!("{BQ}r.b=2"));
        assert_eq!(text(json!({ "$not": {} })), "SELECT * FROM root r");
    }

    #[test]
    fn elements_reduced_to_one_clause_are_not_grouped() {
        assert_eq!(
            with_policy(EmptyListPolicy::Omit, json!({ "$and": [{ "a": 1, "$or": [] }, { "b": 2 }] })).unwrap(),
            format!("{BQ}(r.a=1 AND r.b=2)")
        );
        assert_eq!(
            with_policy(EmptyListPolicy::Omit, json!({ "$or": [{ "a": 1, "$and": [] }, { "b": 2 }] })).unwrap(),
            format!("{BQ}(r.a=1 OR r.b=2)")
        );
        assert_eq!(
            text(json!({ "$or": [{ "a": 1, "c": 3 }, { "b": 2 }] })),
            format!("{BQ}((r.a=1 AND r.c=3) OR r.b=2)")
        );
    }

    #[test]
    fn custom_dialect_changes_field_prefix() {
        let compiler = Compiler::new(Arc::new(DocumentDb::new("c", "c")), CompilerOptions::default());
        let compiled = compiler.compile(&filter(json!({ "a": { "$gt": 1 } }))).unwrap();
        assert_eq!(compiled.text(), "SELECT * FROM c c WHERE c.a > 1");
    }

    #[traced_test]
    #[test]
    fn logs_compiled_query() {
        compile(&filter(json!({ "a": 1 }))).unwrap();
        assert!(logs_contain("compiled filter"));
    }
}
