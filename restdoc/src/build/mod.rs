//! Route table to document translation.
//!
//! [`build_paths`] walks the routes of a [`WebService`], normalizes every
//! path template, builds one operation per route and files it under the
//! canonical path and the route's method. Routes sharing a canonical path
//! share a path item; a later route with the same method replaces the
//! earlier operation.

mod classify;
mod operation;
mod parameter;
mod path;
mod response;
mod values;

pub use classify::{classify, classify_named, is_primitive_type, json_schema_type, TypeClass, PRIMITIVE_TYPES};
pub use operation::{build_operation, strip_tags};
pub use parameter::{as_param_in, build_parameter, collection_style};
pub use path::{sanitize_path, PatternMap};
pub use response::{build_header, build_response};
pub use values::{extract_vendor_extensions, string_auto_type, EXTENSION_PREFIX};

use crate::config::Config;
use crate::document::{Document, Paths};
use crate::error::Result;
use crate::naming::NamingPolicy;
use crate::route::{registered_services, WebService};
use tracing::{debug, warn};

/// Builds the path items of a single web service.
pub fn build_paths(ws: &WebService, config: &Config) -> Result<Paths> {
    let mut paths = Paths::new();
    add_service_paths(&mut paths, ws, config.naming_policy())?;
    Ok(paths)
}

/// Builds the path items of several web services into one collection.
pub fn build_paths_for(services: &[WebService], config: &Config) -> Result<Paths> {
    let mut paths = Paths::new();
    for ws in services {
        add_service_paths(&mut paths, ws, config.naming_policy())?;
    }
    Ok(paths)
}

pub fn build_document(services: &[WebService], config: &Config) -> Result<Document> {
    Ok(Document {
        info: config.info.clone(),
        paths: build_paths_for(services, config)?,
    })
}

/// Builds the document for every service registered through `inventory`.
pub fn build_registered_document(config: &Config) -> Result<Document> {
    build_document(&registered_services()?, config)
}

fn add_service_paths(paths: &mut Paths, ws: &WebService, naming: &dyn NamingPolicy) -> Result<()> {
    for route in ws.routes() {
        let (path, patterns) = sanitize_path(&route.path);
        let operation = build_operation(ws, route, &patterns, naming)?;
        debug!(path = %path, method = %route.method, operation = %route.operation, "registered operation");
        if paths.entry(path).set_operation(&route.method, operation).is_some() {
            warn!(
                route = %route.path,
                method = %route.method,
                "operation replaced by a later route with the same path and method"
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::RouteBuilder;
    use http::Method;

    #[test]
    fn routes_on_one_path_share_a_path_item() {
        let ws = WebService::new()
            .path("/books")
            .route(RouteBuilder::get("/{id:[0-9]+}").operation("getBook"))
            .unwrap()
            .route(RouteBuilder::delete("/{id}").operation("deleteBook"))
            .unwrap();
        let paths = build_paths(&ws, &Config::default()).unwrap();

        assert_eq!(paths.len(), 1);
        let item = paths.get("/books/{id}").unwrap();
        assert_eq!(item.len(), 2);
        assert_eq!(item.operation(&Method::GET).unwrap().operation_id, "getBook");
        assert_eq!(item.operation(&Method::DELETE).unwrap().operation_id, "deleteBook");
    }

    #[test]
    fn later_route_with_same_method_wins() {
        let ws = WebService::new()
            .route(RouteBuilder::get("/books").operation("first"))
            .unwrap()
            .route(RouteBuilder::get("/books/").operation("second"))
            .unwrap();
        let paths = build_paths(&ws, &Config::default()).unwrap();
        let item = paths.get("/books").unwrap();
        assert_eq!(item.len(), 1);
        assert_eq!(item.operation(&Method::GET).unwrap().operation_id, "second");
    }

    #[test]
    fn services_merge_into_one_collection() {
        let books = WebService::new()
            .path("/books")
            .route(RouteBuilder::get("").operation("listBooks"))
            .unwrap();
        let more = WebService::new()
            .path("/books")
            .route(RouteBuilder::post("").operation("createBook"))
            .unwrap();
        let paths = build_paths_for(&[books, more], &Config::default()).unwrap();
        let item = paths.get("/books").unwrap();
        assert_eq!(item.len(), 2);
    }

    #[test]
    fn document_carries_configured_info() {
        let config = Config::new().title("Bookstore").version("2.1.0");
        let document = build_document(&[], &config).unwrap();
        assert_eq!(document.info.title, "Bookstore");
        assert!(document.paths.is_empty());
    }
}
