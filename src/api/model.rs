// src/api/model.rs
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{HarnessError, Result};
use crate::http::{ApiResponse, Cardinality};

// ================== Resources ==================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Breed,
    Fact,
    Group,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ResourceType,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<IndexMap<String, Relationship>>,
}

impl Resource {
    pub fn relationship(&self, name: &str) -> Option<&Relationship> {
        self.relationships.as_ref()?.get(name)
    }
}

/// Union of the attribute sets of breeds, facts and groups. Anything the
/// server adds later lands in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub life: Option<Bounds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub male_weight: Option<Bounds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub female_weight: Option<Bounds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hypoallergenic: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ResourceType,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(default)]
    pub data: Linkage,
}

/// Relationship data: to-many relationships carry an array, to-one
/// relationships a single reference, and an empty to-one is `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Linkage {
    Many(Vec<ResourceRef>),
    One(ResourceRef),
    #[default]
    Empty,
}

impl Linkage {
    pub fn refs(&self) -> &[ResourceRef] {
        match self {
            Linkage::Many(v) => v,
            Linkage::One(r) => std::slice::from_ref(r),
            Linkage::Empty => &[],
        }
    }
}

// ================== Envelope ==================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Links {
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationMeta>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub current: u32,
    #[serde(default)]
    pub records: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<u32>,
}

/// `data` as dictated by the endpoint, never guessed from the body.
#[derive(Debug, Clone, PartialEq)]
pub enum Data {
    Single(Resource),
    Collection(Vec<Resource>),
}

impl Data {
    pub fn cardinality(&self) -> Cardinality {
        match self {
            Data::Single(_) => Cardinality::Single,
            Data::Collection(_) => Cardinality::Collection,
        }
    }

    pub fn single(&self) -> Option<&Resource> {
        match self {
            Data::Single(r) => Some(r),
            Data::Collection(_) => None,
        }
    }

    pub fn collection(&self) -> Option<&[Resource]> {
        match self {
            Data::Collection(v) => Some(v),
            Data::Single(_) => None,
        }
    }

    /// All resources regardless of cardinality.
    pub fn resources(&self) -> &[Resource] {
        match self {
            Data::Single(r) => std::slice::from_ref(r),
            Data::Collection(v) => v,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub data: Data,
    pub links: Option<Links>,
    pub meta: Option<Meta>,
}

#[derive(Deserialize)]
struct EnvelopeWire {
    data: Value,
    #[serde(default)]
    links: Option<Links>,
    #[serde(default)]
    meta: Option<Meta>,
}

impl Envelope {
    pub fn parse(body: &[u8], cardinality: Cardinality) -> Result<Self> {
        let wire: EnvelopeWire = serde_json::from_slice(body)?;
        let found = json_kind(&wire.data);

        let data = match (cardinality, found) {
            (Cardinality::Collection, "array") => Data::Collection(serde_json::from_value(wire.data)?),
            (Cardinality::Single, "object") => Data::Single(serde_json::from_value(wire.data)?),
            (expected, found) => return Err(HarnessError::Shape { expected, found }),
        };

        Ok(Envelope {
            data,
            links: wire.links,
            meta: wire.meta,
        })
    }

    pub fn pagination(&self) -> Option<&PaginationMeta> {
        self.meta.as_ref()?.pagination.as_ref()
    }

    pub fn self_link(&self) -> Option<&str> {
        self.links.as_ref()?.self_link.as_deref()
    }
}

impl ApiResponse {
    /// Typed view of the body, shaped by the endpoint's declared cardinality.
    pub fn envelope(&self) -> Result<Envelope> {
        Envelope::parse(self.bytes(), self.cardinality())
    }
}

pub(crate) fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
