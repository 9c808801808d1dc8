use serde::{Deserialize, Serialize};

/// Sample structured payload cached through the object accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
}

impl Product {
    pub fn cache_key(id: i64) -> String {
        format!("product:{}", id)
    }
}

/// A single cached string or hash field.
#[derive(Debug, Serialize, Deserialize)]
pub struct ValueResponse {
    pub key: String,
    pub value: String,
}
