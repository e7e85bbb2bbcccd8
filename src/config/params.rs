//! Generation parameter passthrough.
//!
//! `--llm-params` takes a JSON object forwarded to the completion endpoint
//! verbatim. Values are never interpreted or range-checked here.

use serde_json::{Map, Value};

use super::error::ConfigError;

/// Parse the `--llm-params` blob into an opaque parameter map.
pub fn parse_llm_params(blob: Option<&str>) -> Result<Map<String, Value>, ConfigError> {
    let Some(raw) = blob.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(Map::new());
    };

    let data: Value = serde_json::from_str(raw).map_err(|source| ConfigError::ParamsParse {
        line: source.line(),
        column: source.column(),
        source,
    })?;

    match data {
        Value::Object(map) => Ok(map),
        _ => Err(ConfigError::ParamsNotObject),
    }
}
