//! Payload types and their wire encodings.
//!
//! # Design
//! `Params` is a loosely typed, string-keyed JSON mapping so callers can
//! pass ad-hoc data the way they would to a dynamic client. Typed structs
//! can still be used through `to_params`.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::AjayError;

/// Query parameters for `get`/`del`, or the body for `post`/`put`.
pub type Params = Map<String, Value>;

/// Convert any serializable value into `Params`.
///
/// Fails with `Serialization` unless the value serializes to a JSON object.
pub fn to_params<T: Serialize + ?Sized>(value: &T) -> Result<Params, AjayError> {
    match serde_json::to_value(value).map_err(|e| AjayError::Serialization(e.to_string()))? {
        Value::Object(map) => Ok(map),
        other => Err(AjayError::Serialization(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

/// Encode `params` as an `application/x-www-form-urlencoded` query string.
///
/// Strings are written unquoted, other scalars via their JSON text, `null`
/// as an empty value, and arrays/objects as compact JSON.
pub(crate) fn encode_query(params: &Params) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        serializer.append_pair(key, &query_value(value));
    }
    serializer.finish()
}

fn query_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> Params {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn encode_query_scalars() {
        let q = encode_query(&params(json!({"id": 2, "active": true, "name": "Ervin Howell"})));
        assert_eq!(q, "active=true&id=2&name=Ervin+Howell");
    }

    #[test]
    fn encode_query_null_is_empty() {
        let q = encode_query(&params(json!({"cursor": null})));
        assert_eq!(q, "cursor=");
    }

    #[test]
    fn encode_query_nested_values_are_json() {
        let q = encode_query(&params(json!({"ids": [1, 2]})));
        assert_eq!(q, "ids=%5B1%2C2%5D");
    }

    #[test]
    fn to_params_accepts_structs() {
        #[derive(Serialize)]
        struct NewPost<'a> {
            title: &'a str,
            #[serde(rename = "userId")]
            user_id: u32,
        }
        let p = to_params(&NewPost { title: "AJAY TEST", user_id: 1 }).unwrap();
        assert_eq!(p["title"], "AJAY TEST");
        assert_eq!(p["userId"], 1);
    }

    #[test]
    fn to_params_rejects_non_objects() {
        let err = to_params(&[1, 2, 3]).unwrap_err();
        assert!(matches!(err, AjayError::Serialization(msg) if msg.contains("an array")));
    }
}
