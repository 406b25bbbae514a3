use std::collections::BTreeMap;
use std::fmt;
use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::graph::Graph;
use crate::types::NodeKey;

/// The stored value of a vertex attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    Num(f64),
    Int(i64),
    Str(String),
}

/// Attributes of one vertex, keyed by attribute name.
pub type NodeAttrs = BTreeMap<String, AttrValue>;

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Num(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<usize> for AttrValue {
    fn from(value: usize) -> Self {
        AttrValue::Int(value as i64)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Str(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Str(value)
    }
}

impl Display for AttrValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Num(value) => write!(f, "{}", value),
            AttrValue::Int(value) => write!(f, "{}", value),
            AttrValue::Str(value) => write!(f, "{}", value),
        }
    }
}

/// Compute `f(vertex)` for every vertex and store it under `key`.
///
/// The input graph is left as is; the annotated copy is returned. Values
/// previously stored under `key` are overwritten, other keys are untouched.
pub fn annotate<N, V, F>(graph: &Graph<N>, key: &str, mut f: F) -> Graph<N>
where
    N: NodeKey,
    V: Into<AttrValue>,
    F: FnMut(&N) -> V,
{
    let mut annotated = graph.clone();
    for vertex in graph.vertices() {
        annotated.set_node_attr(vertex, key, f(vertex).into());
    }
    annotated
}

#[cfg(test)]
mod test_attribute {
    use crate::attribute::{annotate, AttrValue};
    use crate::graph::Graph;

    #[test]
    fn test_annotate_degree() {
        let g = Graph::from_edges(vec![(1, 2), (1, 3), (1, 4)]);
        let annotated = annotate(&g, "degree", |v| g.neighbors(v).count());

        assert_eq!(annotated.node_attr(&1, "degree"), Some(&AttrValue::Int(3)));
        assert_eq!(annotated.node_attr(&4, "degree"), Some(&AttrValue::Int(1)));
        // The source graph carries no attributes.
        assert!(g.node_attr(&1, "degree").is_none());
    }

    #[test]
    fn test_other_keys_untouched() {
        let g = Graph::from_edges(vec![("x", "y")]);
        let labelled = annotate(&g, "label", |v| format!("node-{}", v));
        let scored = annotate(&labelled, "score", |_| 0.5);
        let rescored = annotate(&scored, "score", |_| 0.75);

        assert_eq!(
            rescored.node_attr(&"x", "label"),
            Some(&AttrValue::Str("node-x".to_string()))
        );
        assert_eq!(rescored.node_attr(&"y", "score"), Some(&AttrValue::Num(0.75)));
        assert_eq!(rescored.node_attrs(&"y").map(|attrs| attrs.len()), Some(2));
    }

    #[test]
    fn test_display_value() {
        assert_eq!(AttrValue::from(3usize).to_string(), "3");
        assert_eq!(AttrValue::from("abc").to_string(), "abc");
        assert_eq!(AttrValue::from(1.5).to_string(), "1.5");
    }
}
