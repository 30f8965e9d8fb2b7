use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::fmt;

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"\{(\d+)\}").expect("valid placeholder regex");
}

/// A positional text template with `{0}`, `{1}`, ... placeholders.
///
/// ```
/// use planner::query::template::Template;
///
/// assert_eq!(Template::new("{0} > {1}").fill(&["r.id", "2"]), "r.id > 2");
/// assert_eq!(Template::new("{1}{0}").fill(&["foo", "bar"]), "barfoo");
/// ```
///
/// Placeholders without a matching argument are left as they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template(&'static str);

impl Template {
    pub const fn new(text: &'static str) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    pub fn fill(&self, args: &[&str]) -> String {
        PLACEHOLDER
            .replace_all(self.0, |caps: &Captures| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|i| args.get(i))
                    .map_or_else(|| caps[0].to_string(), |arg| arg.to_string())
            })
            .into_owned()
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_positional_arguments() {
        assert_eq!(Template::new("{0}").fill(&["1"]), "1");
        assert_eq!(Template::new("{1}, {0}").fill(&["world", "Hello"]), "Hello, world");
        assert_eq!(
            Template::new("udf.inUDF({0}, {1})").fill(&["r.arr", "2"]),
            "udf.inUDF(r.arr, 2)"
        );
    }

    #[test]
    fn missing_arguments_are_left_verbatim() {
        assert_eq!(Template::new("{0}{1}").fill(&["foo"]), "foo{1}");
        assert_eq!(Template::new("{x} {0}").fill(&["a"]), "{x} a");
        assert_eq!(Template::new("open { brace").fill(&[]), "open { brace");
        assert_eq!(
            Template::new("{99999999999999999999999}").fill(&["a"]),
            "{99999999999999999999999}"
        );
    }

    #[test]
    fn arguments_are_not_rescanned() {
        assert_eq!(Template::new("{0}={1}").fill(&["r.a", r#""{1}""#]), r#"r.a="{1}""#);
    }
}
