//! Document-query injection neutralization.
//!
//! Untrusted JSON destined for document-store-shaped queries can smuggle
//! operators through object keys (`$gt`, `$where`) or dotted paths.
//! Stripping happens recursively before the value reaches any query
//! builder.

use serde_json::Value;

/// Recursively strips operator-shaped keys from untrusted JSON.
///
/// A key is dropped when it starts with `$` or contains a `.` path
/// separator. An object emptied purely by that stripping is dropped
/// from its parent wholesale: `{"a":1,"b":{"$gt":5}}` becomes `{"a":1}`,
/// because a `b` that only ever carried operators is itself hostile.
pub fn sanitize_object(value: &Value) -> Value {
    sanitize_inner(value).unwrap_or(Value::Null)
}

/// `None` means the value was contaminated and should vanish from its
/// parent rather than survive as an empty husk.
fn sanitize_inner(value: &Value) -> Option<Value> {
    match value {
        Value::Object(map) => {
            let mut clean = serde_json::Map::new();
            let mut stripped_any = false;

            for (key, child) in map {
                if is_operator_key(key) {
                    stripped_any = true;
                    continue;
                }
                match sanitize_inner(child) {
                    Some(clean_child) => {
                        clean.insert(key.clone(), clean_child);
                    }
                    None => stripped_any = true,
                }
            }

            if clean.is_empty() && stripped_any {
                None
            } else {
                Some(Value::Object(clean))
            }
        }
        Value::Array(items) => Some(Value::Array(
            items.iter().filter_map(sanitize_inner).collect(),
        )),
        other => Some(other.clone()),
    }
}

fn is_operator_key(key: &str) -> bool {
    key.starts_with('$') || key.contains('.')
}
