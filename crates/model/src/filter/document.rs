use crate::core::value::Value;

/// One node of a filter expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Value(Value),
    Document(Document),
    List(Vec<Node>),
}

impl Node {
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Node>,
    {
        Node::List(items.into_iter().map(Into::into).collect())
    }

    /// Structural JSON form of the node.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Node::Value(v) => v.to_json(),
            Node::Document(doc) => doc.to_json(),
            Node::List(items) => serde_json::Value::Array(items.iter().map(Node::to_json).collect()),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Node::Value(_) => "value",
            Node::Document(_) => "document",
            Node::List(_) => "list",
        }
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Node {
                fn from(v: $ty) -> Self {
                    Node::Value(v.into())
                }
            }
        )*
    };
}

impl_from_scalar!(Value, i32, i64, u32, u64, f64, bool, String, &str);

impl From<Document> for Node {
    fn from(doc: Document) -> Self {
        Node::Document(doc)
    }
}

/// An ordered mapping from field names or logical keywords to nodes.
///
/// Key order is insertion order and is the order in which the compiled
/// predicate joins its clauses.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    entries: Vec<(String, Node)>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `node` under `key`. An existing key keeps its position and has
    /// its node replaced.
    pub fn insert(&mut self, key: impl Into<String>, node: impl Into<Node>) {
        let key = key.into();
        let node = node.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = node,
            None => self.entries.push((key, node)),
        }
    }

    pub fn with(mut self, key: impl Into<String>, node: impl Into<Node>) -> Self {
        self.insert(key, node);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, n)| n)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(k, n)| (k.as_str(), n))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .entries
            .iter()
            .map(|(k, n)| (k.clone(), n.to_json()))
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(map)
    }
}

impl<K: Into<String>, N: Into<Node>> FromIterator<(K, N)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, N)>>(iter: I) -> Self {
        let mut doc = Document::new();
        for (k, n) in iter {
            doc.insert(k, n);
        }
        doc
    }
}
