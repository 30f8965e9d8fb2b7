use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A server-side function a compiled query calls.
///
/// The body is opaque: it is forwarded to the store when the function has to
/// be created and never interpreted here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionRequirement {
    pub id: String,
    pub body: String,
}

impl FunctionRequirement {
    pub fn new(id: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            body: body.into(),
        }
    }
}

/// A function as registered in a container's remote catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UdfRecord {
    pub id: String,
    pub body: String,
    /// Remote self-link of the function resource.
    pub handle: String,
}

/// Drops repeated ids, keeping the first occurrence and the original order.
pub fn dedup_requirements<I>(requirements: I) -> Vec<FunctionRequirement>
where
    I: IntoIterator<Item = FunctionRequirement>,
{
    let mut seen = HashSet::new();
    requirements
        .into_iter()
        .filter(|req| seen.insert(req.id.clone()))
        .collect()
}
