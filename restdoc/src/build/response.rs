use super::classify::{classify, classify_named, TypeClass};
use super::values::extract_vendor_extensions;
use crate::document::{Header, Items, Response, Schema, ARRAY_TYPE};
use crate::error::Result;
use crate::introspect::TypeDescriptor;
use crate::naming::NamingPolicy;
use crate::route::{HeaderDescriptor, HeaderItems, ResponseErrorDescriptor};

pub fn build_response(error: &ResponseErrorDescriptor, naming: &dyn NamingPolicy) -> Result<Response> {
    let mut response = Response::new(error.message.clone());
    if let Some(model) = &error.model {
        response.schema = Some(model_schema(model, naming)?);
    }
    response.headers = error
        .headers
        .iter()
        .map(|(name, header)| (name.clone(), build_header(header)))
        .collect();
    extract_vendor_extensions(&mut response.extensions, &error.extensions);
    Ok(response)
}

/// Unlike request bodies, a scalar primitive model keeps its raw type name
/// (`int64`, not `integer`); array elements are still mapped.
fn model_schema(model: &TypeDescriptor, naming: &dyn NamingPolicy) -> Result<Schema> {
    let model = model.dereference();
    if model.is_array_like() {
        return classify(model, naming);
    }
    Ok(match classify_named(model, naming)? {
        TypeClass::Primitive(raw) => Schema::of_type(raw),
        TypeClass::Reference(name) => Schema::reference(&name),
    })
}

pub fn build_header(header: &HeaderDescriptor) -> Header {
    let items = if header.type_name == ARRAY_TYPE {
        header.items.as_ref().map(build_header_items)
    } else {
        None
    };
    Header {
        type_name: header.type_name.clone(),
        description: header.description.clone(),
        items,
    }
}

fn build_header_items(items: &HeaderItems) -> Items {
    Items {
        type_name: items.type_name.clone(),
        format: items.format.clone(),
        default: items.default.clone(),
        collection_format: items.collection_format,
        items: items
            .items
            .as_deref()
            .map(|nested| Box::new(build_header_items(nested))),
    }
}
