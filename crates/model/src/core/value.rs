use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, hash::Hash};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Value {
    Int(i64),
    Uint(u64),
    Float(f64),
    String(String),
    Boolean(bool),
    Json(serde_json::Value),
    Uuid(Uuid),
    Bytes(Vec<u8>),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
    Regex { pattern: String, flags: String },
    Null,
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        use Value::*;
        std::mem::discriminant(self).hash(state);
        match self {
            Int(v) => v.hash(state),
            Uint(v) => v.hash(state),
            Float(v) => {
                // Hash the bits of the float to handle NaN and -0.0 correctly
                let bits = v.to_bits();
                bits.hash(state);
            }
            String(v) => v.hash(state),
            Boolean(v) => v.hash(state),
            Json(v) => v.to_string().hash(state),
            Uuid(v) => v.hash(state),
            Bytes(v) => v.hash(state),
            Date(v) => v.hash(state),
            Timestamp(v) => v.hash(state),
            Regex { pattern, flags } => {
                pattern.hash(state);
                flags.hash(state);
            }
            Null => {}
        }
    }
}

impl Value {
    pub fn regex(pattern: impl Into<String>, flags: impl Into<String>) -> Self {
        Value::Regex {
            pattern: pattern.into(),
            flags: flags.into(),
        }
    }

    /// Renders the value as it must appear inside a query predicate.
    ///
    /// Strings are JSON-quoted, dates and timestamps use their quoted ISO-8601
    /// form, regular expressions their `/source/flags` literal (see
    /// [`regex_source`]), bytes a quoted hex string. Everything else is
    /// rendered as structural JSON.
    pub fn to_literal(&self) -> String {
        match self {
            Value::Int(v) => v.to_string(),
            Value::Uint(v) => v.to_string(),
            Value::Float(v) => float_literal(*v),
            Value::String(v) => quote(v),
            Value::Boolean(v) => v.to_string(),
            Value::Json(v) => v.to_string(),
            Value::Uuid(v) => quote(&v.to_string()),
            Value::Bytes(v) => quote(&hex(v)),
            Value::Date(v) => quote(&v.format("%Y-%m-%d").to_string()),
            Value::Timestamp(v) => quote(&v.to_rfc3339_opts(SecondsFormat::Millis, true)),
            Value::Regex { pattern, flags } => format!("/{}/{flags}", regex_source(pattern)),
            Value::Null => "null".to_string(),
        }
    }

    /// Structural JSON form, used when the value is nested inside a document
    /// or list argument.
    ///
    /// A regular expression becomes `{"$regex": pattern, "$options": flags}`,
    /// which keeps it apart from a plain string.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;
        match self {
            Value::Int(v) => Json::from(*v),
            Value::Uint(v) => Json::from(*v),
            Value::Float(v) => serde_json::Number::from_f64(*v)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            Value::String(v) => Json::String(v.clone()),
            Value::Boolean(v) => Json::Bool(*v),
            Value::Json(v) => v.clone(),
            Value::Uuid(v) => Json::String(v.to_string()),
            Value::Bytes(v) => Json::String(hex(v)),
            Value::Date(v) => Json::String(v.format("%Y-%m-%d").to_string()),
            Value::Timestamp(v) => Json::String(v.to_rfc3339_opts(SecondsFormat::Millis, true)),
            Value::Regex { pattern, flags } => serde_json::json!({
                "$regex": pattern,
                "$options": flags,
            }),
            Value::Null => Json::Null,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Boolean(b),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::Uint(u)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Json::String(s) => Value::String(s),
            other => Value::Json(other),
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v.into())
                }
            }
        )*
    };
}

impl_from! {
    i32 => Int,
    i64 => Int,
    u32 => Uint,
    u64 => Uint,
    f64 => Float,
    bool => Boolean,
    String => String,
    &str => String,
    Uuid => Uuid,
    Vec<u8> => Bytes,
    NaiveDate => Date,
    DateTime<Utc> => Timestamp,
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_literal())
    }
}

/// Source text of a pattern as it appears between the slashes of a regex
/// literal.
///
/// An empty pattern becomes `(?:)`. Unescaped `/` outside a character class is
/// escaped, and line terminators are written as escapes, so the literal always
/// ends where it should. A dangling trailing backslash is doubled.
pub fn regex_source(pattern: &str) -> String {
    if pattern.is_empty() {
        return "(?:)".to_string();
    }

    let mut out = String::with_capacity(pattern.len() + 4);
    let mut escaped = false;
    let mut in_class = false;

    for c in pattern.chars() {
        if escaped {
            escaped = false;
            match line_terminator(c) {
                Some(name) => out.push_str(name),
                None => out.push(c),
            }
            continue;
        }

        match c {
            '\\' => {
                escaped = true;
                out.push(c);
            }
            '[' => {
                in_class = true;
                out.push(c);
            }
            ']' => {
                in_class = false;
                out.push(c);
            }
            '/' if !in_class => out.push_str("\\/"),
            _ => match line_terminator(c) {
                Some(name) => {
                    out.push('\\');
                    out.push_str(name);
                }
                None => out.push(c),
            },
        }
    }

    if escaped {
        out.push('\\');
    }
    out
}

fn line_terminator(c: char) -> Option<&'static str> {
    match c {
        '\n' => Some("n"),
        '\r' => Some("r"),
        '\u{2028}' => Some("u2028"),
        '\u{2029}' => Some("u2029"),
        _ => None,
    }
}

fn quote(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

// Non-finite floats have no JSON form; JSON.stringify emits `null` for them too.
fn float_literal(v: f64) -> String {
    match serde_json::Number::from_f64(v) {
        Some(n) => n.to_string(),
        None => "null".to_string(),
    }
}
