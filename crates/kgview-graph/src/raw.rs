//! Raw input model: one exported `(n)-[r]->(m)` query row per triple.
//!
//! The export is a JSON array of objects keyed `n` (source entity), `r`
//! (relation), and `m` (target entity). Records are decoded one at a time so
//! that a single bad row is rejected without aborting the whole load.

use kgview_core::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Attribute map carried by entities and relations.
pub type Attributes = Map<String, Value>;

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .as_ref()
        .and_then(value_text))
}

// ============================================================================
// RawEntity
// ============================================================================

/// A node as it appears in the export.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawEntity {
    /// Stable identifier assigned upstream.
    #[serde(rename = "elementId")]
    pub element_id: String,
    /// Label list; only the first entry is consulted.
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: Vec<String>,
    /// Entity attributes.
    #[serde(
        default,
        rename = "properties",
        alias = "attributes",
        deserialize_with = "null_as_default"
    )]
    pub attributes: Attributes,
    /// Optional precomputed display value, read by the attribute text rules.
    #[serde(
        default,
        rename = "displayValue",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub display_value: Option<String>,
}

impl RawEntity {
    /// Creates an entity with a single label and no attributes.
    pub fn new(element_id: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
            labels: vec![category.into()],
            attributes: Attributes::new(),
            display_value: None,
        }
    }

    /// Adds an attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// The raw category: the first label, or `""` when there are none.
    pub fn category(&self) -> &str {
        self.labels.first().map(String::as_str).unwrap_or("")
    }

    /// Attribute `key` rendered as display text, if usable.
    pub fn attribute_text(&self, key: &str) -> Option<String> {
        attribute_text(&self.attributes, key)
    }
}

/// Renders an attribute as display text.
///
/// Strings are used as-is, numbers and booleans by their JSON text. Null,
/// empty strings, arrays, and objects count as absent.
pub fn attribute_text(attributes: &Attributes, key: &str) -> Option<String> {
    attributes.get(key).and_then(value_text)
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

// ============================================================================
// RawRelation
// ============================================================================

/// A relationship as it appears in the export.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawRelation {
    /// Stable identifier assigned upstream.
    #[serde(rename = "elementId")]
    pub element_id: String,
    /// Relation type name; `""` when the export omits it.
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub relation_type: String,
    /// Relation attributes.
    #[serde(
        default,
        rename = "properties",
        alias = "attributes",
        deserialize_with = "null_as_default"
    )]
    pub attributes: Attributes,
}

impl RawRelation {
    /// Creates a relation with no attributes.
    pub fn new(element_id: impl Into<String>, relation_type: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
            relation_type: relation_type.into(),
            attributes: Attributes::new(),
        }
    }
}

// ============================================================================
// RawTriple
// ============================================================================

/// One `(source, relation, target)` row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawTriple {
    /// Source entity.
    #[serde(rename = "n")]
    pub source: RawEntity,
    /// Relation from source to target.
    #[serde(rename = "r")]
    pub relation: RawRelation,
    /// Target entity.
    #[serde(rename = "m")]
    pub target: RawEntity,
}

impl RawTriple {
    /// Creates a triple.
    pub fn new(source: RawEntity, relation: RawRelation, target: RawEntity) -> Self {
        Self {
            source,
            relation,
            target,
        }
    }

    /// Decodes the record at `index` of the input array.
    ///
    /// A record missing `n`, `r`, or `m` (or holding something that is not
    /// an entity/relation there) yields [`Error::Record`].
    pub fn from_value(index: usize, value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| Error::record(index, "record is not an object"))?;

        let source = decode_part::<RawEntity>(index, object, "n", "source")?;
        let relation = decode_part::<RawRelation>(index, object, "r", "relation")?;
        let target = decode_part::<RawEntity>(index, object, "m", "target")?;

        Ok(Self::new(source, relation, target))
    }
}

fn decode_part<T: for<'de> Deserialize<'de>>(
    index: usize,
    object: &Map<String, Value>,
    key: &str,
    role: &str,
) -> Result<T> {
    match object.get(key) {
        None | Some(Value::Null) => Err(Error::record(index, format!("missing {role} (`{key}`)"))),
        Some(part) => T::deserialize(part)
            .map_err(|e| Error::record(index, format!("malformed {role} (`{key}`): {e}"))),
    }
}

// ============================================================================
// Tests
// ============================================================================
