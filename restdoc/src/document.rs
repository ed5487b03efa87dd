//! In-memory document graph produced by the builders.
//!
//! Nodes serialize with `serde`; rendering them to JSON or YAML is left to
//! the caller.

use crate::config::Info;
use crate::route::CollectionFormat;
use http::Method;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Prefix of every `$ref` emitted for a named schema.
pub const DEFINITION_ROOT: &str = "#/definitions/";

/// Type name used for array schemas and array-typed headers.
pub const ARRAY_TYPE: &str = "array";

fn is_false(value: &bool) -> bool {
    !*value
}

/// Vendor extensions attached to a node, always `x-` prefixed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Extensions(BTreeMap<String, Value>);

impl Extensions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

/// A default value recovered from its string form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DefaultValue {
    #[default]
    Absent,
    Integer(i64),
    Boolean(bool),
    String(String),
}

impl DefaultValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, DefaultValue::Absent)
    }
}

impl Serialize for DefaultValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DefaultValue::Absent => serializer.serialize_none(),
            DefaultValue::Integer(i) => serializer.serialize_i64(*i),
            DefaultValue::Boolean(b) => serializer.serialize_bool(*b),
            DefaultValue::String(s) => serializer.serialize_str(s),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterIn {
    Path,
    Query,
    Header,
    Body,
    FormData,
}

/// Serialization style of a multi-value parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterStyle {
    Simple,
    SpaceDelimited,
    PipeDelimited,
    Form,
}

/// The one shape a schema has.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    /// A document type name such as `integer`, or a raw type name.
    Type(String),
    /// `type: array` with the element schema.
    Array(Box<Schema>),
    /// `$ref` to a named schema.
    Ref(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub kind: SchemaKind,
    pub pattern: Option<String>,
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub min_items: Option<u64>,
    pub max_items: Option<u64>,
    pub unique_items: bool,
    pub enum_values: Vec<String>,
}

impl Schema {
    fn with_kind(kind: SchemaKind) -> Self {
        Self {
            kind,
            pattern: None,
            min_length: None,
            max_length: None,
            minimum: None,
            maximum: None,
            min_items: None,
            max_items: None,
            unique_items: false,
            enum_values: Vec::new(),
        }
    }

    pub fn of_type(type_name: impl Into<String>) -> Self {
        Self::with_kind(SchemaKind::Type(type_name.into()))
    }

    pub fn array(items: Schema) -> Self {
        Self::with_kind(SchemaKind::Array(Box::new(items)))
    }

    /// A `$ref` to `#/definitions/<name>`.
    pub fn reference(name: &str) -> Self {
        Self::with_kind(SchemaKind::Ref(format!("{DEFINITION_ROOT}{name}")))
    }

    pub fn type_name(&self) -> Option<&str> {
        match &self.kind {
            SchemaKind::Type(t) => Some(t),
            SchemaKind::Array(_) => Some(ARRAY_TYPE),
            SchemaKind::Ref(_) => None,
        }
    }

    pub fn items(&self) -> Option<&Schema> {
        match &self.kind {
            SchemaKind::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn reference_path(&self) -> Option<&str> {
        match &self.kind {
            SchemaKind::Ref(r) => Some(r),
            _ => None,
        }
    }
}

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        match &self.kind {
            SchemaKind::Type(t) if t.is_empty() => {}
            SchemaKind::Type(t) => map.serialize_entry("type", t)?,
            SchemaKind::Array(items) => {
                map.serialize_entry("type", ARRAY_TYPE)?;
                map.serialize_entry("items", items)?;
            }
            SchemaKind::Ref(r) => map.serialize_entry("$ref", r)?,
        }
        if let Some(pattern) = &self.pattern {
            map.serialize_entry("pattern", pattern)?;
        }
        if let Some(v) = self.min_length {
            map.serialize_entry("minLength", &v)?;
        }
        if let Some(v) = self.max_length {
            map.serialize_entry("maxLength", &v)?;
        }
        if let Some(v) = self.minimum {
            map.serialize_entry("minimum", &v)?;
        }
        if let Some(v) = self.maximum {
            map.serialize_entry("maximum", &v)?;
        }
        if let Some(v) = self.min_items {
            map.serialize_entry("minItems", &v)?;
        }
        if let Some(v) = self.max_items {
            map.serialize_entry("maxItems", &v)?;
        }
        if self.unique_items {
            map.serialize_entry("uniqueItems", &true)?;
        }
        if !self.enum_values.is_empty() {
            map.serialize_entry("enum", &self.enum_values)?;
        }
        map.end()
    }
}

/// Legacy element description: parameter array items and header items.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Items {
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub type_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub format: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_format: Option<CollectionFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Items>>,
}

/// Legacy scalar/array encoding carried next to a parameter's schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleSchema {
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub type_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub format: String,
    #[serde(skip_serializing_if = "DefaultValue::is_absent")]
    pub default: DefaultValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Items>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_format: Option<CollectionFormat>,
}

impl SimpleSchema {
    pub fn is_empty(&self) -> bool {
        self == &SimpleSchema::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterIn,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "is_false")]
    pub required: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub allow_empty_value: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ParameterStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explode: Option<bool>,
    pub schema: Schema,
    #[serde(flatten)]
    pub simple: SimpleSchema,
    #[serde(flatten)]
    pub extensions: Extensions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Header {
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub type_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Items>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Response {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, Header>,
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Response {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Responses {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Response>,
    #[serde(flatten)]
    pub status_codes: BTreeMap<u16, Response>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub summary: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub operation_id: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    pub responses: Responses,
    #[serde(skip_serializing_if = "is_false")]
    pub deprecated: bool,
    #[serde(flatten)]
    pub extensions: Extensions,
}

/// Operations of one canonical path, keyed by lower-case method.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PathItem {
    operations: BTreeMap<String, Operation>,
}

impl PathItem {
    /// Registers `operation` for `method`, returning the one it replaced.
    pub fn set_operation(&mut self, method: &Method, operation: Operation) -> Option<Operation> {
        self.operations
            .insert(method.as_str().to_ascii_lowercase(), operation)
    }

    pub fn operation(&self, method: &Method) -> Option<&Operation> {
        self.operations.get(&method.as_str().to_ascii_lowercase())
    }

    pub fn operations(&self) -> impl Iterator<Item = (&str, &Operation)> {
        self.operations.iter().map(|(m, op)| (m.as_str(), op))
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Paths(BTreeMap<String, PathItem>);

impl Paths {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<&PathItem> {
        self.0.get(path)
    }

    /// The path item for `path`, created empty on first use.
    pub fn entry(&mut self, path: String) -> &mut PathItem {
        self.0.entry(path).or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &PathItem)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub info: Info,
    pub paths: Paths,
}
