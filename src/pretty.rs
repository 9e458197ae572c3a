//! Deterministic pretty printer for details values.
//!
//! Values are first converted to a [`serde_json::Value`], then rendered with
//! map keys sorted in a pprint-like layout: a value is written on one
//! line when it fits in the width, otherwise its items are split one per line
//! and aligned under the opening bracket.

use serde::Serialize;
use serde_json::{Map, Value};

pub const DEFAULT_WIDTH: usize = 80;

/// Render any serializable value.
pub fn pformat<T: Serialize>(value: &T, width: usize) -> serde_json::Result<String> {
    let value = serde_json::to_value(value)?;
    Ok(render(&value, 0, 0, width))
}

/// `allowance` counts the closing characters the parent still writes after this
/// value on the same line (`,`, `]`, `}`).
fn render(value: &Value, indent: usize, allowance: usize, width: usize) -> String {
    let flat = render_flat(value);
    if indent + flat.chars().count() + allowance <= width {
        return flat;
    }

    match value {
        Value::Array(items) if !items.is_empty() => {
            let pad = " ".repeat(indent + 1);
            let last = items.len() - 1;
            let rendered: Vec<String> = items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    let trailing = if i == last { allowance + 1 } else { 1 };
                    render(item, indent + 1, trailing, width)
                })
                .collect();
            format!("[{}]", rendered.join(format!(",\n{}", pad).as_str()))
        }
        Value::Object(map) if !map.is_empty() => {
            let pad = " ".repeat(indent + 1);
            let entries = sorted(map);
            let last = entries.len() - 1;
            let rendered: Vec<String> = entries
                .into_iter()
                .enumerate()
                .map(|(i, (key, item))| {
                    let key = quote(key);
                    let trailing = if i == last { allowance + 1 } else { 1 };
                    // Nested value starts after "{'key': "
                    let nested = render(item, indent + 1 + key.chars().count() + 2, trailing, width);
                    format!("{}: {}", key, nested)
                })
                .collect();
            format!("{{{}}}", rendered.join(format!(",\n{}", pad).as_str()))
        }
        // Scalars cannot be split.
        _ => flat,
    }
}

fn render_flat(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(number) => render_number(number),
        Value::String(text) => quote(text),
        Value::Array(items) => {
            let rendered: Vec<String> = items.iter().map(render_flat).collect();
            format!("[{}]", rendered.join(", "))
        }
        Value::Object(map) => render_flat_map(map),
    }
}

fn render_flat_map(map: &Map<String, Value>) -> String {
    let rendered: Vec<String> = sorted(map)
        .into_iter()
        .map(|(key, item)| format!("{}: {}", quote(key), render_flat(item)))
        .collect();
    format!("{{{}}}", rendered.join(", "))
}

// serde_json only keeps keys sorted while `preserve_order` is off.
fn sorted(map: &Map<String, Value>) -> Vec<(&String, &Value)> {
    let mut entries: Vec<_> = map.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries
}

fn render_number(number: &serde_json::Number) -> String {
    match number.as_f64() {
        Some(float) if number.is_f64() && float.fract() == 0.0 && float.is_finite() => {
            format!("{:.1}", float)
        }
        _ => number.to_string(),
    }
}

fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('\'');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn short_map_stays_on_one_line_with_sorted_keys() {
        let value = json!({"shape": [1, 3], "name": "input", "index": 0});
        assert_eq!(
            pformat(&value, DEFAULT_WIDTH).unwrap(),
            "{'index': 0, 'name': 'input', 'shape': [1, 3]}"
        );
    }

    #[test]
    fn scalars_use_python_literals() {
        let value = json!([true, false, null, 0.0, 0.5, -3]);
        assert_eq!(
            pformat(&value, DEFAULT_WIDTH).unwrap(),
            "[True, False, None, 0.0, 0.5, -3]"
        );
    }

    #[test]
    fn strings_are_escaped() {
        let value = json!("it's a\\path");
        assert_eq!(pformat(&value, DEFAULT_WIDTH).unwrap(), r"'it\'s a\\path'");
    }

    #[test]
    fn wide_map_splits_one_key_per_line() {
        let value = json!({"alpha": "aaaaaaaaaa", "beta": "bbbbbbbbbb"});
        assert_eq!(
            pformat(&value, 20).unwrap(),
            "{'alpha': 'aaaaaaaaaa',\n 'beta': 'bbbbbbbbbb'}"
        );
    }

    #[test]
    fn list_of_maps_aligns_under_bracket() {
        let value = json!([{"a": 1, "b": 2}, {"a": 3, "b": 4}]);
        assert_eq!(
            pformat(&value, 20).unwrap(),
            "[{'a': 1, 'b': 2},\n {'a': 3, 'b': 4}]"
        );
    }

    #[test]
    fn nested_value_is_indented_past_its_key() {
        let value = json!({"k": [111111, 222222, 333333]});
        assert_eq!(
            pformat(&value, 16).unwrap(),
            "{'k': [111111,\n       222222,\n       333333]}"
        );
    }

    #[test]
    fn width_counts_characters_not_bytes() {
        let value = json!({"name": "ééééé"});
        assert_eq!(pformat(&value, 17).unwrap(), "{'name': 'ééééé'}");
    }

    #[test]
    fn closing_brackets_count_toward_width() {
        // "[1, 2]" fits in 7 columns at indent 1, but not with the "," after it.
        let value = json!([[1, 2], [3, 4]]);
        assert_eq!(
            pformat(&value, 7).unwrap(),
            "[[1,\n  2],\n [3,\n  4]]"
        );
    }

    #[test]
    fn empty_collections_render_flat() {
        assert_eq!(pformat(&json!([]), 0).unwrap(), "[]");
        assert_eq!(pformat(&json!({}), 0).unwrap(), "{}");
    }
}
