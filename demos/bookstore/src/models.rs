use restdoc::api_model;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[api_model]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub isbn: String,
    pub title: String,
    pub author_id: u64,
    pub price_cents: u32,
}

/// Described through its `utoipa` schema instead of `#[api_model]`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Author {
    pub id: u64,
    pub name: String,
}

#[api_model]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub items: Vec<OrderLine>,
}

#[api_model]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub isbn: String,
    pub quantity: u32,
}

#[api_model]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Problem {
    pub status: u16,
    pub detail: String,
}
