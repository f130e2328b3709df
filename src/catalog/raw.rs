// src/catalog/raw.rs
//
// Lenient accessors over raw backend JSON. The backend is inconsistent about
// field names and types, so every accessor takes a list of candidate keys and
// degrades to `None` instead of failing.

use serde_json::Value;

/// First present, non-null value among `keys`.
pub fn field<'a>(v: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| v.get(*k))
        .find(|value| !value.is_null())
}

/// First value among `keys` that `read` accepts. An empty or malformed
/// value moves on to the next key instead of ending the lookup.
pub fn first_of<'a, T>(
    v: &'a Value,
    keys: &[&str],
    read: impl Fn(&'a Value) -> Option<T>,
) -> Option<T> {
    keys.iter().filter_map(|k| v.get(*k)).find_map(read)
}

/// Non-empty trimmed string. Numbers are stringified (ids are sometimes numeric).
pub fn text(v: &Value, keys: &[&str]) -> Option<String> {
    first_of(v, keys, as_text)
}

pub fn as_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// A finite number, accepting numeric strings like "50000" or "50 000".
pub fn number(v: &Value, keys: &[&str]) -> Option<f64> {
    first_of(v, keys, as_number)
}

pub fn as_number(v: &Value) -> Option<f64> {
    let n = match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .replace(',', ".")
            .parse::<f64>()
            .ok(),
        _ => None,
    }?;

    n.is_finite().then_some(n)
}

/// Truthy flag: `true`, `"true"`, `"oui"`, `1`. Absent means false.
pub fn flag(v: &Value, keys: &[&str]) -> bool {
    first_of(v, keys, as_flag).unwrap_or(false)
}

/// `None` for values that are not recognisably a yes or a no.
pub fn as_flag(v: &Value) -> Option<bool> {
    match v {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|x| x != 0.0),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "oui" | "yes" | "1" => Some(true),
            "false" | "non" | "no" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Strings out of the first array field that yields any. Objects contribute
/// their `url` or `path`.
pub fn string_list(v: &Value, keys: &[&str]) -> Vec<String> {
    first_of(v, keys, |value| {
        let list: Vec<String> = match value {
            Value::Array(items) => items
                .iter()
                .filter_map(|item| match item {
                    Value::Object(_) => text(item, &["url", "path", "src", "lien"]),
                    other => as_text(other),
                })
                .collect(),
            single @ Value::String(_) => as_text(single).into_iter().collect(),
            _ => Vec::new(),
        };
        (!list.is_empty()).then_some(list)
    })
    .unwrap_or_default()
}

/// A level that may be a plain string or an object carrying `name`/`nom`.
pub fn name_of(v: &Value) -> Option<String> {
    match v {
        Value::Object(_) => text(v, &["name", "nom"]),
        other => as_text(other),
    }
}
