use chrono::{DateTime, Utc};
use keel_derive::api_model;

/// A catalogue entry kept in memory.
#[api_model(rename_all = "snake_case")]
#[derive(Clone, PartialEq)]
pub struct Item {
    /// Sequential identifier, starting at 1
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    /// Creation time (UTC)
    pub created_at: DateTime<Utc>,
}

/// Payload of `POST /items`.
#[api_model(rename_all = "snake_case")]
#[derive(Clone)]
pub struct CreateItem {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
}

/// Payload of `PUT /items/{id}`. Absent fields keep their current value.
#[api_model(rename_all = "snake_case")]
#[derive(Clone, Default)]
pub struct UpdateItem {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
}
