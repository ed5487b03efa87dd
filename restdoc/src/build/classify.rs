use crate::document::Schema;
use crate::error::Result;
use crate::introspect::TypeDescriptor;
use crate::naming::NamingPolicy;
use tracing::trace;

/// Names documented inline instead of through a `$ref`.
pub const PRIMITIVE_TYPES: &[&str] = &[
    "int", "int8", "int16", "int32", "int64", "uint", "uint8", "uint16", "uint32", "uint64",
    "float32", "float64", "bool", "string", "byte", "rune", "datetime", "duration",
];

pub fn is_primitive_type(name: &str) -> bool {
    PRIMITIVE_TYPES.contains(&name)
}

/// Maps a primitive name onto `integer`, `number`, `boolean` or `string`.
///
/// Names outside the primitive table are returned unchanged.
pub fn json_schema_type(name: &str) -> &str {
    match name {
        "int" | "int8" | "int16" | "int32" | "int64" | "uint" | "uint8" | "uint16" | "uint32"
        | "uint64" | "byte" | "rune" | "duration" => "integer",
        "float32" | "float64" => "number",
        "bool" => "boolean",
        "string" | "datetime" => "string",
        other => other,
    }
}

/// Outcome of classifying a non-array type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeClass {
    /// A primitive, holding its raw name (e.g. `int64`).
    Primitive(String),
    /// A named schema, holding its definition name.
    Reference(String),
}

impl TypeClass {
    /// Primitives become their mapped document type, references a `$ref`.
    pub fn into_schema(self) -> Schema {
        match self {
            TypeClass::Primitive(name) => Schema::of_type(json_schema_type(&name)),
            TypeClass::Reference(name) => Schema::reference(&name),
        }
    }
}

/// Resolves the definition name of `ty` (pointers followed) and decides
/// between primitive and reference.
pub fn classify_named(ty: &TypeDescriptor, naming: &dyn NamingPolicy) -> Result<TypeClass> {
    let ty = ty.dereference();
    let name = naming.definition_name(ty)?;
    let class = if is_primitive_type(&name) {
        TypeClass::Primitive(name)
    } else {
        TypeClass::Reference(name)
    };
    trace!(ty = %ty, ?class, "classified type");
    Ok(class)
}

/// Schema for `ty`: arrays and sequences become `type: array` whose items are
/// classified one level down, everything else a primitive or a `$ref`.
pub fn classify(ty: &TypeDescriptor, naming: &dyn NamingPolicy) -> Result<Schema> {
    match ty.dereference() {
        TypeDescriptor::Array(element) | TypeDescriptor::Sequence(element) => {
            Ok(Schema::array(classify_named(element, naming)?.into_schema()))
        }
        scalar => Ok(classify_named(scalar, naming)?.into_schema()),
    }
}
