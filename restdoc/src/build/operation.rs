use super::parameter::build_parameter;
use super::path::PatternMap;
use super::response::build_response;
use super::values::extract_vendor_extensions;
use crate::document::{Operation, Response, Responses};
use crate::error::Result;
use crate::naming::NamingPolicy;
use crate::route::{RouteDescriptor, WebService, KEY_OPENAPI_TAGS};
use http::StatusCode;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new("<[^>]*>").expect("HTML tag pattern compiles"));

/// Returns the text content of an HTML snippet.
///
/// `<b>&lt;Hi!&gt;</b> <br>` becomes `&lt;Hi!&gt; `; entities are left as is.
pub fn strip_tags(html: &str) -> String {
    HTML_TAG.replace_all(html, "").into_owned()
}

/// Tags stored under [`KEY_OPENAPI_TAGS`]; any other shape yields none.
fn operation_tags(route: &RouteDescriptor) -> Vec<String> {
    let Some(value) = route.metadata.get(KEY_OPENAPI_TAGS) else {
        return Vec::new();
    };
    let tags = match value {
        Value::Array(values) => values
            .iter()
            .map(|v| v.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>(),
        _ => None,
    };
    tags.unwrap_or_else(|| {
        warn!(operation = %route.operation, "ignoring `{KEY_OPENAPI_TAGS}` metadata that is not a list of strings");
        Vec::new()
    })
}

pub fn build_operation(
    ws: &WebService,
    route: &RouteDescriptor,
    patterns: &PatternMap,
    naming: &dyn NamingPolicy,
) -> Result<Operation> {
    let mut operation = Operation {
        operation_id: route.operation.clone(),
        description: route.notes.clone(),
        summary: strip_tags(&route.doc),
        deprecated: route.deprecated,
        tags: operation_tags(route),
        ..Operation::default()
    };
    extract_vendor_extensions(&mut operation.extensions, &route.extensions);

    // shared path parameters first, then the route's own
    operation.parameters = ws
        .path_parameters()
        .iter()
        .chain(&route.parameters)
        .map(|param| {
            let pattern = patterns.get(&param.name).map(String::as_str).unwrap_or_default();
            build_parameter(route, param, pattern, naming)
        })
        .collect::<Result<Vec<_>>>()?;

    let mut status_codes = route
        .response_errors
        .iter()
        .map(|(code, error)| Ok((*code, build_response(error, naming)?)))
        .collect::<Result<BTreeMap<_, _>>>()?;
    let default = route
        .default_response
        .as_ref()
        .map(|error| build_response(error, naming))
        .transpose()?;
    if status_codes.is_empty() {
        status_codes.insert(
            StatusCode::OK.as_u16(),
            Response::new(StatusCode::OK.canonical_reason().unwrap_or_default()),
        );
    }
    operation.responses = Responses { default, status_codes };

    Ok(operation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::introspect::TypeDescriptor;
    use crate::naming::CanonicalNames;
    use crate::route::{ParameterDescriptor, RouteBuilder};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn build(ws: &WebService, route: &RouteDescriptor) -> Operation {
        build_operation(ws, route, &PatternMap::new(), &CanonicalNames).unwrap()
    }

    #[test]
    fn strips_tags_but_keeps_entities() {
        assert_eq!(strip_tags("<b>&lt;Hi!&gt;</b> <br>"), "&lt;Hi!&gt; ");
        assert_eq!(strip_tags("plain"), "plain");
    }

    #[test]
    fn copies_route_documentation() {
        let route = RouteBuilder::get("/books")
            .operation("listBooks")
            .doc("<em>List</em> books")
            .notes("Returns every book.")
            .deprecate()
            .tags(["books"])
            .extension("x-audience", "public")
            .build()
            .unwrap();
        let op = build(&WebService::new(), &route);

        assert_eq!(op.operation_id, "listBooks");
        assert_eq!(op.summary, "List books");
        assert_eq!(op.description, "Returns every book.");
        assert!(op.deprecated);
        assert_eq!(op.tags, vec!["books"]);
        assert_eq!(op.extensions.get("x-audience"), Some(&json!("public")));
    }

    #[test]
    fn malformed_tags_are_ignored() {
        for value in [json!("books"), json!(["books", 3]), json!({"tag": "books"})] {
            let route = RouteBuilder::get("/").metadata(KEY_OPENAPI_TAGS, value).build().unwrap();
            assert!(build(&WebService::new(), &route).tags.is_empty());
        }
    }

    #[test]
    fn shared_parameters_come_first_without_deduplication() {
        let ws = WebService::new()
            .path("/shops/{shop}")
            .param(ParameterDescriptor::path_param("shop", "shop id"));
        let route = RouteBuilder::get("/books")
            .param(ParameterDescriptor::path_param("shop", "again"))
            .param(ParameterDescriptor::query_param("q", "search"))
            .build()
            .unwrap();
        let mut patterns = PatternMap::new();
        patterns.insert("shop".to_string(), "[a-z]+".to_string());
        let op = build_operation(&ws, &route, &patterns, &CanonicalNames).unwrap();

        let names: Vec<(&str, &str)> = op
            .parameters
            .iter()
            .map(|p| (p.name.as_str(), p.description.as_str()))
            .collect();
        assert_eq!(names, vec![("shop", "shop id"), ("shop", "again"), ("q", "search")]);
        assert_eq!(op.parameters[0].schema.pattern.as_deref(), Some("[a-z]+"));
        assert_eq!(op.parameters[2].schema.pattern, None);
    }

    #[test]
    fn missing_responses_fall_back_to_ok() {
        let route = RouteBuilder::get("/").build().unwrap();
        let op = build(&WebService::new(), &route);
        assert_eq!(op.responses.status_codes.len(), 1);
        assert_eq!(op.responses.status_codes[&200].description, "OK");
        assert!(op.responses.default.is_none());
    }

    #[test]
    fn default_response_does_not_suppress_the_ok_fallback() {
        let route = RouteBuilder::get("/")
            .default_return("unexpected error", Some(TypeDescriptor::composite("Problem")))
            .build()
            .unwrap();
        let op = build(&WebService::new(), &route);
        assert_eq!(op.responses.status_codes[&200].description, "OK");
        let default = op.responses.default.unwrap();
        assert_eq!(default.description, "unexpected error");
        assert_eq!(
            default.schema.unwrap().reference_path(),
            Some("#/definitions/Problem")
        );
    }

    #[test]
    fn declared_responses_are_keyed_by_status() {
        let route = RouteBuilder::get("/")
            .returns(200, "found", Some(TypeDescriptor::composite("Book")))
            .returns(404, "missing", None)
            .build()
            .unwrap();
        let op = build(&WebService::new(), &route);
        let codes: Vec<u16> = op.responses.status_codes.keys().copied().collect();
        assert_eq!(codes, vec![200, 404]);
        assert_eq!(op.responses.status_codes[&404].description, "missing");
    }

    #[test]
    fn naming_failures_abort_the_operation() {
        let route = RouteBuilder::get("/")
            .returns(200, "found", Some(TypeDescriptor::composite("Book")))
            .build()
            .unwrap();
        let policy = |_: &TypeDescriptor| -> Option<String> { None };
        assert!(build_operation(&WebService::new(), &route, &PatternMap::new(), &policy).is_err());
    }
}
