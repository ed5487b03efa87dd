use super::classify::classify;
use super::values::{extract_vendor_extensions, non_negative, string_auto_type};
use crate::document::{Extensions, Items, Parameter, ParameterIn, ParameterStyle, Schema, SimpleSchema, ARRAY_TYPE};
use crate::error::Result;
use crate::naming::NamingPolicy;
use crate::route::{CollectionFormat, ParameterDescriptor, ParameterKind, RouteDescriptor};
use tracing::trace;

pub fn as_param_in(kind: ParameterKind) -> ParameterIn {
    match kind {
        ParameterKind::Path => ParameterIn::Path,
        ParameterKind::Query => ParameterIn::Query,
        ParameterKind::Header => ParameterIn::Header,
        ParameterKind::Body => ParameterIn::Body,
        ParameterKind::Form => ParameterIn::FormData,
    }
}

/// Serialization style and `explode` flag for a collection format.
///
/// There is no tab-delimited style, so `tsv` falls back to space-delimited.
pub fn collection_style(format: CollectionFormat) -> (ParameterStyle, Option<bool>) {
    match format {
        CollectionFormat::Csv => (ParameterStyle::Simple, None),
        CollectionFormat::Ssv => (ParameterStyle::SpaceDelimited, None),
        CollectionFormat::Tsv => (ParameterStyle::SpaceDelimited, None),
        CollectionFormat::Pipes => (ParameterStyle::PipeDelimited, None),
        CollectionFormat::Multi => (ParameterStyle::Form, Some(true)),
    }
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

/// Builds the document parameter for `param` of `route`.
///
/// `pattern` is the inline pattern extracted from the route path for this
/// parameter, empty when there is none.
pub fn build_parameter(
    route: &RouteDescriptor,
    param: &ParameterDescriptor,
    pattern: &str,
    naming: &dyn NamingPolicy,
) -> Result<Parameter> {
    let mut style = None;
    let mut explode = None;

    let mut schema = if param.allow_multiple {
        // validations apply to the elements
        let mut items = Schema::of_type(param.data_type.as_str());
        items.pattern = non_empty(&param.pattern);
        items.min_length = non_negative(param.min_length);
        items.max_length = non_negative(param.max_length);

        let mut schema = Schema::array(items);
        schema.min_items = non_negative(param.min_items);
        schema.max_items = non_negative(param.max_items);
        schema.unique_items = param.unique_items;
        if let Some(format) = param.collection_format {
            let (s, e) = collection_style(format);
            style = Some(s);
            explode = e;
        }
        schema
    } else {
        let mut schema = Schema::of_type(param.data_type.as_str());
        schema.min_length = non_negative(param.min_length);
        schema.max_length = non_negative(param.max_length);
        schema.minimum = param.minimum;
        schema.maximum = param.maximum;
        schema
    };

    if !param.allowable_values.is_empty() {
        let mut keys: Vec<&String> = param.allowable_values.keys().collect();
        keys.sort();
        schema.enum_values = keys
            .into_iter()
            .map(|k| param.allowable_values[k].clone())
            .collect();
    }

    if param.kind == ParameterKind::Path {
        schema.pattern = non_empty(pattern);
    } else if !param.allow_multiple {
        schema.pattern = non_empty(&param.pattern);
    }

    let body_sample = route
        .read_sample
        .as_ref()
        .filter(|sample| param.kind == ParameterKind::Body && param.data_type == sample.canonical_name());

    let simple = match body_sample {
        Some(sample) => {
            trace!(parameter = %param.name, sample = %sample, "body parameter resolved from read sample");
            let sample = sample.dereference();
            schema = if sample.is_array_like() {
                classify(sample, naming)?
            } else {
                Schema::reference(&naming.definition_name(sample)?)
            };
            SimpleSchema::default()
        }
        None if param.allow_multiple => SimpleSchema {
            type_name: ARRAY_TYPE.to_string(),
            format: param.data_format.clone(),
            default: string_auto_type(&param.default_value),
            items: Some(Box::new(Items {
                type_name: param.data_type.clone(),
                ..Items::default()
            })),
            collection_format: param.collection_format,
        },
        None => SimpleSchema {
            type_name: param.data_type.clone(),
            format: param.data_format.clone(),
            default: string_auto_type(&param.default_value),
            items: None,
            collection_format: None,
        },
    };

    let mut extensions = Extensions::new();
    extract_vendor_extensions(&mut extensions, &param.extensions);

    Ok(Parameter {
        name: param.name.clone(),
        location: as_param_in(param.kind),
        description: param.description.clone(),
        required: param.required,
        allow_empty_value: param.allow_empty_value,
        style,
        explode,
        schema,
        simple,
        extensions,
    })
}
