//! Merging the environment document into the file document.
//!
//! Merge semantics:
//! - Objects: deep-merge by key (recursive)
//! - Anything else present on both sides: the environment value wins
//!   (scalars, arrays and `null` alike)

use serde_json::Value;

/// Merge `env` into `file`, with `env` taking precedence.
pub fn merge_documents(file: Value, env: Value) -> Value {
    match (file, env) {
        (Value::Object(mut file_map), Value::Object(env_map)) => {
            for (key, env_value) in env_map {
                let merged = match file_map.remove(&key) {
                    Some(file_value) => merge_documents(file_value, env_value),
                    None => env_value,
                };
                file_map.insert(key, merged);
            }
            Value::Object(file_map)
        }
        (_, env) => env,
    }
}
