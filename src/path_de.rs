use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::ir::TypeDescriptor;

/// Deserialize with JSON-path context in error messages.
pub fn from_value_with_path<T: DeserializeOwned>(value: Value) -> Result<T, String> {
    match serde_path_to_error::deserialize::<_, T>(value) {
        Ok(v) => Ok(v),
        Err(err) => {
            let path = err.path().to_string();
            Err(format!("at JSON path {path} → {}", err.into_inner()))
        }
    }
}

/// A descriptor document is either one descriptor or an array of them.
pub fn descriptors_from_value(value: Value) -> Result<Vec<TypeDescriptor>, String> {
    match value {
        Value::Array(_) => from_value_with_path(value),
        single => from_value_with_path::<TypeDescriptor>(single).map(|ty| vec![ty]),
    }
}
