use crate::error::{Error, Result};

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Turns structured values into the text stored under a cache key and back.
pub trait Codec: Send + Sync + 'static {
    fn encode<T: Serialize>(&self, value: &T) -> Result<String>;

    fn decode<T: DeserializeOwned>(&self, raw: &str) -> Result<T>;
}

/// JSON via `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<String> {
        Ok(serde_json::to_string(value)?)
    }

    fn decode<T: DeserializeOwned>(&self, raw: &str) -> Result<T> {
        serde_json::from_str(raw)
            .map_err(|e| Error::Codec(format!("stored value is not valid JSON for this type: {}", e)))
    }
}
