//! Wire types for the Overpass `[out:json]` response format.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Element `type`. Kinds the pipeline has no special handling for keep their
/// raw name so ids stay faithful to the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ElementKind {
    Node,
    Way,
    Relation,
    Other(String),
}

impl ElementKind {
    pub fn as_str(&self) -> &str {
        match self {
            ElementKind::Node => "node",
            ElementKind::Way => "way",
            ElementKind::Relation => "relation",
            ElementKind::Other(raw) => raw,
        }
    }
}

impl From<String> for ElementKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "node" => ElementKind::Node,
            "way" => ElementKind::Way,
            "relation" => ElementKind::Relation,
            _ => ElementKind::Other(raw),
        }
    }
}

impl From<ElementKind> for String {
    fn from(kind: ElementKind) -> Self {
        kind.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementCenter {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawElement {
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<ElementCenter>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<RawElement>,
}
