//! The route table read by the document builders.
//!
//! A [`WebService`] groups routes under a root path together with the path
//! parameters every route shares. Routes are declared with [`RouteBuilder`];
//! the builders in [`crate::build`] only ever read the resulting descriptors.

use crate::error::{Error, Result};
use crate::introspect::TypeDescriptor;
use http::Method;
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Metadata key holding the ordered list of tags for an operation.
pub const KEY_OPENAPI_TAGS: &str = "openapi.tags";

/// Raw vendor extensions as declared on the route table.
pub type ExtensionProperties = BTreeMap<String, Value>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ParameterKind {
    Path,
    #[default]
    Query,
    Header,
    Body,
    Form,
}

/// How multiple values of one parameter are joined on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionFormat {
    Csv,
    Ssv,
    Tsv,
    Pipes,
    Multi,
}


#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterDescriptor {
    pub name: String,
    pub kind: ParameterKind,
    pub data_type: String,
    pub data_format: String,
    pub description: String,
    pub required: bool,
    pub allow_multiple: bool,
    pub allow_empty_value: bool,
    pub min_length: Option<i64>,
    pub max_length: Option<i64>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub min_items: Option<i64>,
    pub max_items: Option<i64>,
    pub unique_items: bool,
    pub collection_format: Option<CollectionFormat>,
    pub pattern: String,
    /// Untyped default, typed later by [`crate::build::string_auto_type`].
    pub default_value: String,
    /// Allowed values, keyed by value and mapped to their display text.
    pub allowable_values: HashMap<String, String>,
    pub extensions: ExtensionProperties,
}

impl ParameterDescriptor {
    pub fn new(kind: ParameterKind, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            description: description.into(),
            ..Self::default()
        }
    }

    /// A required `string` path parameter.
    pub fn path_param(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(ParameterKind::Path, name, description)
            .data_type("string")
            .required(true)
    }

    pub fn query_param(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(ParameterKind::Query, name, description).data_type("string")
    }

    pub fn header_param(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(ParameterKind::Header, name, description).data_type("string")
    }

    pub fn body_param(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(ParameterKind::Body, name, description)
    }

    pub fn form_param(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(ParameterKind::Form, name, description).data_type("string")
    }

    pub fn data_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = data_type.into();
        self
    }

    pub fn data_format(mut self, data_format: impl Into<String>) -> Self {
        self.data_format = data_format.into();
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn allow_multiple(mut self, allow_multiple: bool) -> Self {
        self.allow_multiple = allow_multiple;
        self
    }

    pub fn allow_empty_value(mut self, allow_empty_value: bool) -> Self {
        self.allow_empty_value = allow_empty_value;
        self
    }

    pub fn min_length(mut self, min_length: i64) -> Self {
        self.min_length = Some(min_length);
        self
    }

    pub fn max_length(mut self, max_length: i64) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn minimum(mut self, minimum: f64) -> Self {
        self.minimum = Some(minimum);
        self
    }

    pub fn maximum(mut self, maximum: f64) -> Self {
        self.maximum = Some(maximum);
        self
    }

    pub fn min_items(mut self, min_items: i64) -> Self {
        self.min_items = Some(min_items);
        self
    }

    pub fn max_items(mut self, max_items: i64) -> Self {
        self.max_items = Some(max_items);
        self
    }

    pub fn unique_items(mut self, unique_items: bool) -> Self {
        self.unique_items = unique_items;
        self
    }

    pub fn collection_format(mut self, format: CollectionFormat) -> Self {
        self.collection_format = Some(format);
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    pub fn default_value(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = default_value.into();
        self
    }

    pub fn allowable_values<K, V>(mut self, values: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.allowable_values = values
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    pub fn extension(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extensions.insert(key.into(), value.into());
        self
    }
}

/// Element description of an array-typed response header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderItems {
    pub type_name: String,
    pub format: String,
    pub default: Option<Value>,
    pub collection_format: Option<CollectionFormat>,
    pub items: Option<Box<HeaderItems>>,
}

impl HeaderItems {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            ..Self::default()
        }
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    pub fn default_value(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn collection_format(mut self, format: CollectionFormat) -> Self {
        self.collection_format = Some(format);
        self
    }

    pub fn items(mut self, items: HeaderItems) -> Self {
        self.items = Some(Box::new(items));
        self
    }
}

/// A response header. Only array headers carry `items`, which hold the
/// format, default and collection format of their elements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderDescriptor {
    pub type_name: String,
    pub description: String,
    pub items: Option<HeaderItems>,
}

impl HeaderDescriptor {
    pub fn new(type_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn items(mut self, items: HeaderItems) -> Self {
        self.items = Some(items);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseErrorDescriptor {
    pub code: u16,
    pub message: String,
    pub model: Option<TypeDescriptor>,
    pub headers: BTreeMap<String, HeaderDescriptor>,
    pub extensions: ExtensionProperties,
}

impl ResponseErrorDescriptor {
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn model(mut self, model: TypeDescriptor) -> Self {
        self.model = Some(model);
        self
    }

    pub fn header(mut self, name: impl Into<String>, header: HeaderDescriptor) -> Self {
        self.headers.insert(name.into(), header);
        self
    }

    pub fn extension(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extensions.insert(key.into(), value.into());
        self
    }
}

/// One method + path binding of the route table.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteDescriptor {
    pub method: Method,
    pub path: String,
    pub doc: String,
    pub notes: String,
    pub operation: String,
    pub deprecated: bool,
    pub metadata: HashMap<String, Value>,
    pub extensions: ExtensionProperties,
    pub parameters: Vec<ParameterDescriptor>,
    pub response_errors: BTreeMap<u16, ResponseErrorDescriptor>,
    pub default_response: Option<ResponseErrorDescriptor>,
    /// Expected request body type.
    pub read_sample: Option<TypeDescriptor>,
}

/// Fluent declaration of a [`RouteDescriptor`].
#[derive(Debug, Clone)]
pub struct RouteBuilder {
    method: String,
    path: String,
    doc: String,
    notes: String,
    operation: String,
    deprecated: bool,
    metadata: HashMap<String, Value>,
    extensions: ExtensionProperties,
    parameters: Vec<ParameterDescriptor>,
    response_errors: BTreeMap<u16, ResponseErrorDescriptor>,
    default_response: Option<ResponseErrorDescriptor>,
    read_sample: Option<TypeDescriptor>,
}

impl RouteBuilder {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            doc: String::new(),
            notes: String::new(),
            operation: String::new(),
            deprecated: false,
            metadata: HashMap::new(),
            extensions: ExtensionProperties::new(),
            parameters: Vec::new(),
            response_errors: BTreeMap::new(),
            default_response: None,
            read_sample: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET.as_str(), path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST.as_str(), path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT.as_str(), path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH.as_str(), path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE.as_str(), path)
    }

    pub fn head(path: impl Into<String>) -> Self {
        Self::new(Method::HEAD.as_str(), path)
    }

    pub fn options(path: impl Into<String>) -> Self {
        Self::new(Method::OPTIONS.as_str(), path)
    }

    /// Short summary; may contain HTML, which is stripped from the document.
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = operation.into();
        self
    }

    pub fn deprecate(mut self) -> Self {
        self.deprecated = true;
        self
    }

    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Stores `tags` under [`KEY_OPENAPI_TAGS`].
    pub fn tags<I, S>(self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags: Vec<Value> = tags.into_iter().map(|t| Value::String(t.into())).collect();
        self.metadata(KEY_OPENAPI_TAGS, Value::Array(tags))
    }

    pub fn extension(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extensions.insert(key.into(), value.into());
        self
    }

    pub fn param(mut self, parameter: ParameterDescriptor) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn returns(self, code: u16, message: impl Into<String>, model: Option<TypeDescriptor>) -> Self {
        let mut error = ResponseErrorDescriptor::new(code, message);
        error.model = model;
        self.returns_error(error)
    }

    /// Registers a fully described response; replaces any earlier one for the same code.
    pub fn returns_error(mut self, error: ResponseErrorDescriptor) -> Self {
        self.response_errors.insert(error.code, error);
        self
    }

    pub fn default_return(mut self, message: impl Into<String>, model: Option<TypeDescriptor>) -> Self {
        let mut error = ResponseErrorDescriptor::new(0, message);
        error.model = model;
        self.default_response = Some(error);
        self
    }

    /// Declares the request body type and adds the matching required `body` parameter.
    pub fn reads(mut self, sample: TypeDescriptor, description: impl Into<String>) -> Self {
        let parameter = ParameterDescriptor::body_param("body", description)
            .required(true)
            .data_type(sample.canonical_name());
        self.parameters.push(parameter);
        self.read_sample = Some(sample);
        self
    }

    pub fn build(self) -> Result<RouteDescriptor> {
        let method = Method::from_bytes(self.method.to_ascii_uppercase().as_bytes())
            .map_err(|_| Error::UnsupportedMethod(self.method.clone()))?;
        Ok(RouteDescriptor {
            method,
            path: self.path,
            doc: self.doc,
            notes: self.notes,
            operation: self.operation,
            deprecated: self.deprecated,
            metadata: self.metadata,
            extensions: self.extensions,
            parameters: self.parameters,
            response_errors: self.response_errors,
            default_response: self.default_response,
            read_sample: self.read_sample,
        })
    }
}

/// A group of routes sharing a root path and path-level parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WebService {
    root_path: String,
    path_parameters: Vec<ParameterDescriptor>,
    routes: Vec<RouteDescriptor>,
}

impl WebService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(mut self, root_path: impl Into<String>) -> Self {
        self.root_path = root_path.into();
        self
    }

    /// Adds a parameter documented on every route of this service.
    pub fn param(mut self, parameter: ParameterDescriptor) -> Self {
        self.path_parameters.push(parameter);
        self
    }

    /// Builds `route` and mounts it below the root path.
    pub fn route(mut self, route: RouteBuilder) -> Result<Self> {
        let mut route = route.build()?;
        route.path = join_paths(&self.root_path, &route.path);
        self.routes.push(route);
        Ok(self)
    }

    pub fn root_path(&self) -> &str {
        &self.root_path
    }

    pub fn path_parameters(&self) -> &[ParameterDescriptor] {
        &self.path_parameters
    }

    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.routes
    }
}

fn join_paths(root: &str, path: &str) -> String {
    if path.is_empty() {
        return root.to_string();
    }
    format!("{}/{}", root.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Link-time registration of a web service.
///
/// ```ignore
/// restdoc::inventory::submit! {
///     restdoc::WebServiceRegistration { factory: books_service }
/// }
/// ```
pub struct WebServiceRegistration {
    pub factory: fn() -> Result<WebService>,
}

inventory::collect!(WebServiceRegistration);

/// Instantiates every service submitted through [`WebServiceRegistration`].
pub fn registered_services() -> Result<Vec<WebService>> {
    inventory::iter::<WebServiceRegistration>
        .into_iter()
        .map(|registration| (registration.factory)())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registered() -> Result<WebService> {
        WebService::new()
            .path("/registered")
            .route(RouteBuilder::get("/ping").operation("ping"))
    }

    inventory::submit! {
        WebServiceRegistration { factory: registered }
    }

    #[test]
    fn routes_are_mounted_below_the_root_path() {
        let ws = WebService::new()
            .path("/api/v1/")
            .route(RouteBuilder::get("/books/{id}"))
            .unwrap()
            .route(RouteBuilder::post(""))
            .unwrap();

        let paths: Vec<&str> = ws.routes().iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["/api/v1/books/{id}", "/api/v1/"]);
        assert_eq!(ws.routes()[1].method, Method::POST);
    }

    #[test]
    fn extension_methods_are_accepted_and_garbage_is_not() {
        let route = RouteBuilder::new("propfind", "/dav").build().unwrap();
        assert_eq!(route.method.as_str(), "PROPFIND");

        let err = RouteBuilder::new("GE T", "/x").build().unwrap_err();
        assert!(matches!(err, Error::UnsupportedMethod(m) if m == "GE T"));
    }

    #[test]
    fn reads_adds_a_matching_body_parameter() {
        let route = RouteBuilder::post("/books")
            .reads(TypeDescriptor::composite("models.Book"), "the book")
            .build()
            .unwrap();

        let body = &route.parameters[0];
        assert_eq!(body.kind, ParameterKind::Body);
        assert_eq!(body.name, "body");
        assert_eq!(body.data_type, "models.Book");
        assert!(body.required);
        assert_eq!(route.read_sample, Some(TypeDescriptor::composite("models.Book")));
    }

    #[test]
    fn tags_are_stored_as_metadata() {
        let route = RouteBuilder::get("/").tags(["books", "catalog"]).build().unwrap();
        assert_eq!(
            route.metadata.get(KEY_OPENAPI_TAGS),
            Some(&serde_json::json!(["books", "catalog"]))
        );
    }

    #[test]
    fn path_parameters_default_to_required_strings() {
        let p = ParameterDescriptor::path_param("id", "identifier");
        assert_eq!(p.kind, ParameterKind::Path);
        assert_eq!(p.data_type, "string");
        assert!(p.required);
    }

    #[test]
    fn registered_services_are_discovered() {
        let services = registered_services().unwrap();
        assert!(services.iter().any(|ws| ws.root_path() == "/registered"));
    }
}
