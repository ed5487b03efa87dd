use crate::models::{Author, Book, Order, Problem};
use restdoc::{
    CollectionFormat, HeaderDescriptor, HeaderItems, ParameterDescriptor, ResponseErrorDescriptor, Result,
    RouteBuilder, TypeDescriptor, WebService, WebServiceRegistration,
};

fn not_found(what: &str) -> ResponseErrorDescriptor {
    ResponseErrorDescriptor::new(404, format!("{what} not found")).model(TypeDescriptor::of::<Problem>())
}

pub fn books() -> Result<WebService> {
    WebService::new()
        .path("/api/v1/books")
        .route(
            RouteBuilder::get("")
                .operation("listBooks")
                .doc("List books in the <i>catalog</i>")
                .notes("Results are paged; use `offset` and `limit`.")
                .tags(["books"])
                .param(
                    ParameterDescriptor::query_param("sort", "sort order")
                        .allowable_values([("title", "title"), ("price", "price"), ("isbn", "isbn")])
                        .default_value("title"),
                )
                .param(
                    ParameterDescriptor::query_param("author", "author ids")
                        .data_type("integer")
                        .allow_multiple(true)
                        .collection_format(CollectionFormat::Multi)
                        .max_items(10),
                )
                .param(
                    ParameterDescriptor::query_param("limit", "page size")
                        .data_type("integer")
                        .data_format("int32")
                        .minimum(1.0)
                        .maximum(100.0)
                        .default_value("20"),
                )
                .returns_error(
                    ResponseErrorDescriptor::new(200, "a page of books")
                        .model(TypeDescriptor::of::<Vec<Book>>())
                        .header(
                            "X-Total-Count",
                            HeaderDescriptor::new("integer", "number of books in the catalog"),
                        )
                        .header(
                            "Link",
                            HeaderDescriptor::new("array", "pagination links")
                                .items(HeaderItems::new("string").collection_format(CollectionFormat::Csv)),
                        ),
                ),
        )?
        .route(
            RouteBuilder::get("/{isbn:[0-9-]{10,17}}")
                .operation("getBook")
                .doc("Fetch one book")
                .tags(["books"])
                .param(ParameterDescriptor::path_param("isbn", "ISBN-10 or ISBN-13"))
                .returns(200, "the book", Some(TypeDescriptor::of::<Book>()))
                .returns_error(not_found("book")),
        )?
        .route(
            RouteBuilder::post("")
                .operation("createBook")
                .doc("Add a book")
                .tags(["books"])
                .reads(TypeDescriptor::of::<Book>(), "the book to add")
                .returns(201, "created", Some(TypeDescriptor::of::<Book>()))
                .default_return("unexpected error", Some(TypeDescriptor::of::<Problem>()))
                .extension("x-required-role", "editor"),
        )?
        .route(
            RouteBuilder::delete("/{isbn}")
                .operation("deleteBook")
                .doc("Remove a book")
                .tags(["books"])
                .deprecate()
                .param(ParameterDescriptor::path_param("isbn", "ISBN-10 or ISBN-13"))
                .returns(204, "deleted", None),
        )
}

pub fn authors() -> Result<WebService> {
    WebService::new()
        .path("/api/v1/authors/{authorId}")
        .param(ParameterDescriptor::path_param("authorId", "author id").data_type("integer"))
        .route(
            RouteBuilder::get("")
                .operation("getAuthor")
                .tags(["authors"])
                .returns(200, "the author", Some(TypeDescriptor::of_schema::<Author>()))
                .returns_error(not_found("author")),
        )?
        .route(
            RouteBuilder::get("/books")
                .operation("listAuthorBooks")
                .tags(["authors", "books"])
                .returns(200, "books by the author", Some(TypeDescriptor::of::<Vec<Book>>())),
        )
}

fn orders() -> Result<WebService> {
    WebService::new()
        .path("/api/v1/orders")
        .route(
            RouteBuilder::post("")
                .operation("placeOrder")
                .tags(["orders"])
                .reads(TypeDescriptor::of::<Order>(), "the order")
                .param(
                    ParameterDescriptor::header_param("Idempotency-Key", "deduplicates retried orders")
                        .pattern("[A-Za-z0-9-]+")
                        .max_length(64)
                        .extension("x-example", "3f1c2a9e-order"),
                )
                .returns(201, "order accepted", Some(TypeDescriptor::of::<Order>())),
        )?
        .route(
            RouteBuilder::get("/{id:[0-9]+}/lines")
                .operation("listOrderLines")
                .tags(["orders"])
                .param(ParameterDescriptor::path_param("id", "order id").data_type("integer"))
                .returns(200, "ordered quantities", Some(TypeDescriptor::of::<Vec<u32>>())),
        )
}

restdoc::inventory::submit! {
    WebServiceRegistration { factory: orders }
}
