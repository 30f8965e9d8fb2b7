//! Rust evaluators mirroring the JavaScript function bodies.
//!
//! Values follow JavaScript semantics: `===` for equality, `typeof` for type
//! names and `String(value)` coercion before regular expression matching.
//!
//! A regular expression operand is either a plain string, used verbatim as the
//! pattern like `new RegExp(string)`, or the tagged `{"$regex", "$options"}`
//! form a `Value::Regex` serializes to. Patterns are compiled with the `regex`
//! crate, which has no lookaround or backreferences; such patterns never match
//! locally even though the store accepts them.

use regex::RegexBuilder;
use serde_json::Value as Json;

pub fn in_array(value: &Json, operand: &Json) -> bool {
    match value {
        Json::Array(items) => items.iter().any(|e| strict_eq(e, operand)),
        _ => false,
    }
}

pub fn all_equal(value: &Json, operand: &Json) -> bool {
    match value {
        Json::Array(items) => items.iter().all(|e| strict_eq(e, operand)),
        _ => false,
    }
}

pub fn has_size(value: &Json, operand: &Json) -> bool {
    let length = match value {
        Json::Array(items) => Json::from(items.len()),
        Json::String(s) => Json::from(s.encode_utf16().count()),
        Json::Object(map) => match map.get("length") {
            Some(length) => length.clone(),
            None => return false,
        },
        _ => return false,
    };
    strict_eq(&length, operand)
}

pub fn matches_regex(value: &Json, operand: &Json) -> bool {
    let (pattern, flags) = match operand {
        Json::Object(tagged) => {
            let Some(pattern) = tagged.get("$regex").and_then(Json::as_str) else {
                return false;
            };
            let flags = tagged.get("$options").and_then(Json::as_str).unwrap_or("");
            (pattern.to_string(), flags)
        }
        other => (js_string(other), ""),
    };

    // Sticky matching starts at index 0 on a fresh RegExp.
    let pattern = if flags.contains('y') {
        format!(r"\A(?:{pattern})")
    } else {
        pattern
    };

    let regex = RegexBuilder::new(&pattern)
        .case_insensitive(flags.contains('i'))
        .multi_line(flags.contains('m'))
        .dot_matches_new_line(flags.contains('s'))
        .build();

    match regex {
        Ok(regex) => regex.is_match(&js_string(value)),
        Err(_) => false,
    }
}

pub fn has_type(value: &Json, operand: &Json) -> bool {
    operand.as_str() == Some(type_of(value))
}

/// JavaScript `typeof` for a JSON value.
pub fn type_of(value: &Json) -> &'static str {
    match value {
        Json::Null | Json::Array(_) | Json::Object(_) => "object",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
    }
}

fn strict_eq(a: &Json, b: &Json) -> bool {
    match (a, b) {
        (Json::Null, Json::Null) => true,
        (Json::Bool(x), Json::Bool(y)) => x == y,
        (Json::Number(x), Json::Number(y)) => x.as_f64() == y.as_f64(),
        (Json::String(x), Json::String(y)) => x == y,
        // Distinct arrays and objects are never identical.
        _ => false,
    }
}

fn js_string(value: &Json) -> String {
    match value {
        Json::Null => "null".to_string(),
        Json::Bool(b) => b.to_string(),
        Json::Number(n) => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < 1e21 => format!("{f:.0}"),
            _ => n.to_string(),
        },
        Json::String(s) => s.clone(),
        Json::Array(items) => items
            .iter()
            .map(|e| match e {
                Json::Null => String::new(),
                other => js_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Json::Object(_) => "[object Object]".to_string(),
    }
}
