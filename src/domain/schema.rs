//! Output schema registry for schema-constrained ("parse") requests.
//!
//! Schema references on the command line are plain string keys resolved
//! against a registry populated at startup. Each entry knows how to emit the
//! JSON schema sent with the request and how to validate the reply.

use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::Arc;

use schemars::{JsonSchema, SchemaGenerator};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use super::outputs::{BucketInventory, BucketList};

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("unknown output format '{reference}' (known formats: {known})")]
    UnknownFormat { reference: String, known: String },

    #[error("response does not conform to schema '{schema}': {reason}")]
    Validation { schema: String, reason: String },
}

/// A named output schema the model reply must conform to.
pub trait OutputSchema: Send + Sync {
    /// Registry key, also used as the wire-level schema name.
    fn key(&self) -> &'static str;

    /// JSON schema describing the expected reply shape.
    fn json_schema(&self) -> Value;

    /// Validate a decoded reply, returning its canonical representation.
    fn validate(&self, value: &Value) -> Result<Value, SchemaError>;
}

/// [`OutputSchema`] backed by a concrete Rust type: the JSON schema is
/// derived from the type and validation is a typed round trip through it.
pub struct TypedSchema<T> {
    key: &'static str,
    marker: PhantomData<fn() -> T>,
}

impl<T> TypedSchema<T> {
    pub const fn new(key: &'static str) -> Self {
        Self {
            key,
            marker: PhantomData,
        }
    }
}

impl<T> OutputSchema for TypedSchema<T>
where
    T: JsonSchema + DeserializeOwned + Serialize + Send + Sync,
{
    fn key(&self) -> &'static str {
        self.key
    }

    fn json_schema(&self) -> Value {
        let schema = SchemaGenerator::default().into_root_schema_for::<T>();
        serde_json::to_value(schema).unwrap_or(Value::Null)
    }

    fn validate(&self, value: &Value) -> Result<Value, SchemaError> {
        let typed: T =
            serde_json::from_value(value.clone()).map_err(|source| SchemaError::Validation {
                schema: self.key.to_string(),
                reason: source.to_string(),
            })?;
        serde_json::to_value(typed).map_err(|source| SchemaError::Validation {
            schema: self.key.to_string(),
            reason: source.to_string(),
        })
    }
}

/// Registry mapping output-format keys to schema validators.
#[derive(Default)]
pub struct SchemaRegistry {
    entries: BTreeMap<&'static str, Arc<dyn OutputSchema>>,
}

impl SchemaRegistry {
    /// Registry holding the schemas that ship with the client.
    pub fn builtin() -> Self {
        let mut registry = Self::default();
        registry.register(Arc::new(TypedSchema::<BucketList>::new("bucket_list")));
        registry.register(Arc::new(TypedSchema::<BucketInventory>::new(
            "bucket_inventory",
        )));
        registry
    }

    pub fn register(&mut self, schema: Arc<dyn OutputSchema>) {
        self.entries.insert(schema.key(), schema);
    }

    pub fn resolve(&self, reference: &str) -> Result<Arc<dyn OutputSchema>, SchemaError> {
        self.entries
            .get(reference)
            .cloned()
            .ok_or_else(|| SchemaError::UnknownFormat {
                reference: reference.to_string(),
                known: self.keys().join(", "),
            })
    }

    pub fn keys(&self) -> Vec<&'static str> {
        self.entries.keys().copied().collect()
    }
}
