//! Query-string flattening for GET parameters.
//!
//! Nested values use the bracket convention understood by the remote API:
//! `{"a": {"b": 1}}` becomes `a[b]=1` and `{"ids": ["x", "y"]}` becomes
//! `ids[0]=x&ids[1]=y`. Booleans encode as `1`/`0`; nulls are omitted.

use serde_json::{Map, Value};

/// Flattens a JSON object into ordered query pairs.
#[must_use]
pub fn encode(params: &Map<String, Value>) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (key, value) in params {
        push(&mut pairs, key.clone(), value);
    }
    pairs
}

fn push(pairs: &mut Vec<(String, String)>, key: String, value: &Value) {
    match value {
        Value::Null => {}
        Value::Bool(b) => pairs.push((key, if *b { "1" } else { "0" }.to_string())),
        Value::Number(n) => pairs.push((key, n.to_string())),
        Value::String(s) => pairs.push((key, s.clone())),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                push(pairs, format!("{key}[{i}]"), item);
            }
        }
        Value::Object(map) => {
            for (sub, item) in map {
                push(pairs, format!("{key}[{sub}]"), item);
            }
        }
    }
}
