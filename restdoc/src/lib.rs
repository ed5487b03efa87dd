//! # restdoc - OpenAPI path documents from route tables
//!
//! `restdoc` turns the route table of a REST web service into the `paths`
//! section of an OpenAPI document. Services describe their routes with a
//! small builder API, and the crate derives operations, parameters,
//! responses and schema references from those descriptions.
//!
//! ## Core Features:
//!
//! - **`WebService` / `RouteBuilder`**: declare routes with methods, path
//!   templates (`/books/{id:[0-9]+}`), parameters, response models and
//!   vendor extensions.
//!
//! - **`build_paths` / `build_document`**: translate one or many services
//!   into path items keyed by canonical path and HTTP method.
//!
//! - **`#[api_model]`**: an attribute macro that gives a struct or enum a
//!   [`TypeInfo`] implementation, so it can be used as a request sample or
//!   response model and referenced from `#/definitions/`.
//!
//! - **Service registration**: services submitted through `inventory` are
//!   discovered at startup by [`build_registered_document`].
//!
//! ```
//! use restdoc::{build_paths, Config, RouteBuilder, TypeDescriptor, WebService};
//!
//! let ws = WebService::new()
//!     .path("/books")
//!     .route(
//!         RouteBuilder::get("/{id:[0-9]+}")
//!             .operation("getBook")
//!             .returns(200, "the book", Some(TypeDescriptor::composite("Book"))),
//!     )
//!     .unwrap();
//! let paths = build_paths(&ws, &Config::default()).unwrap();
//! assert!(paths.get("/books/{id}").is_some());
//! ```

extern crate self as restdoc;

pub mod build;
pub mod config;
pub mod document;
pub mod error;
pub mod introspect;
pub mod naming;
pub mod route;

pub use inventory;

#[cfg(feature = "macros")]
pub use restdoc_macros::api_model;

pub use build::{build_document, build_paths, build_paths_for, build_registered_document};
pub use config::{Config, Info, NamingStrategy};
pub use document::{Document, Operation, Parameter, PathItem, Paths, Response, Schema};
pub use error::{Error, Result};
pub use introspect::{TypeDescriptor, TypeInfo, TypeKind};
pub use naming::{CanonicalNames, NamingPolicy, ShortNames};
pub use route::{
    CollectionFormat, HeaderDescriptor, HeaderItems, ParameterDescriptor, ParameterKind, ResponseErrorDescriptor,
    registered_services, RouteBuilder, RouteDescriptor, WebService, WebServiceRegistration,
};
