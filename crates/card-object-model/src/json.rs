//! Typed property readers and a small writer used by parsers and `to_json`.

use serde_json::{Map, Value};

use crate::{enums::CardEnum, errors::ParseError};

pub(crate) const COMMON_ELEMENT_KEYS: &[&str] = &["type", "id", "spacing", "separator"];
pub(crate) const COMMON_ACTION_KEYS: &[&str] = &["type", "id", "title", "iconUrl"];

pub(crate) fn string(
    map: &Map<String, Value>,
    key: &str,
    type_name: &str,
) -> Result<Option<String>, ParseError> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(Value::Number(value)) => Ok(Some(value.to_string())),
        Some(_) => Err(ParseError::invalid(type_name, key, "expected a string")),
    }
}

pub(crate) fn required_string(
    map: &Map<String, Value>,
    key: &str,
    type_name: &str,
) -> Result<String, ParseError> {
    string(map, key, type_name)?
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ParseError::missing(type_name, key))
}

pub(crate) fn boolean(
    map: &Map<String, Value>,
    key: &str,
    type_name: &str,
) -> Result<Option<bool>, ParseError> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(value)) => Ok(Some(*value)),
        Some(Value::String(value)) if value.eq_ignore_ascii_case("true") => Ok(Some(true)),
        Some(Value::String(value)) if value.eq_ignore_ascii_case("false") => Ok(Some(false)),
        Some(_) => Err(ParseError::invalid(type_name, key, "expected a boolean")),
    }
}

pub(crate) fn unsigned(
    map: &Map<String, Value>,
    key: &str,
    type_name: &str,
) -> Result<Option<u32>, ParseError> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(value)) => value
            .as_u64()
            .and_then(|value| u32::try_from(value).ok())
            .map(Some)
            .ok_or_else(|| ParseError::invalid(type_name, key, "expected a non-negative integer")),
        Some(_) => Err(ParseError::invalid(type_name, key, "expected a non-negative integer")),
    }
}

pub(crate) fn integer(
    map: &Map<String, Value>,
    key: &str,
    type_name: &str,
) -> Result<Option<i64>, ParseError> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(value)) => value
            .as_i64()
            .map(Some)
            .ok_or_else(|| ParseError::invalid(type_name, key, "expected an integer")),
        Some(_) => Err(ParseError::invalid(type_name, key, "expected an integer")),
    }
}

/// Array under `key`; a missing key reads as empty.
pub(crate) fn array<'a>(
    map: &'a Map<String, Value>,
    key: &str,
    type_name: &str,
) -> Result<&'a [Value], ParseError> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(values)) => Ok(values.as_slice()),
        Some(_) => Err(ParseError::invalid(type_name, key, "expected an array")),
    }
}

/// Properties a parser did not consume, preserved for round-tripping.
pub(crate) fn additional_properties(
    map: &Map<String, Value>,
    common: &[&str],
    known: &[&str],
) -> Map<String, Value> {
    map.iter()
        .filter(|(key, _)| !common.contains(&key.as_str()) && !known.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Builds a JSON object, skipping values equal to their schema default.
pub(crate) struct JsonWriter {
    map: Map<String, Value>,
}

impl JsonWriter {
    pub(crate) fn new(type_name: &str) -> Self {
        let mut map = Map::new();
        map.insert("type".into(), Value::String(type_name.to_string()));
        Self { map }
    }

    pub(crate) fn untyped() -> Self {
        Self { map: Map::new() }
    }

    pub(crate) fn string(&mut self, key: &str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value {
            self.map.insert(key.into(), Value::String(value.to_string()));
        }
        self
    }

    pub(crate) fn flag(&mut self, key: &str, value: bool, default: bool) -> &mut Self {
        if value != default {
            self.map.insert(key.into(), Value::Bool(value));
        }
        self
    }

    pub(crate) fn number<N: Into<serde_json::Number>>(
        &mut self,
        key: &str,
        value: Option<N>,
    ) -> &mut Self {
        if let Some(value) = value {
            self.map.insert(key.into(), Value::Number(value.into()));
        }
        self
    }

    pub(crate) fn choice<E: CardEnum + PartialEq>(&mut self, key: &str, value: E) -> &mut Self {
        if value != E::default() {
            self.map.insert(key.into(), Value::String(value.as_str().to_string()));
        }
        self
    }

    pub(crate) fn value(&mut self, key: &str, value: Value) -> &mut Self {
        self.map.insert(key.into(), value);
        self
    }

    pub(crate) fn list(&mut self, key: &str, values: Vec<Value>) -> &mut Self {
        if !values.is_empty() {
            self.map.insert(key.into(), Value::Array(values));
        }
        self
    }

    pub(crate) fn extend(&mut self, additional: &Map<String, Value>) -> &mut Self {
        for (key, value) in additional {
            self.map
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
        self
    }

    pub(crate) fn finish(&mut self) -> Value {
        Value::Object(std::mem::take(&mut self.map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::Spacing;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn reads_typed_properties() {
        let map = object(json!({"text": "hi", "wrap": true, "maxLines": 3, "min": -2}));
        assert_eq!(string(&map, "text", "TextBlock").unwrap().as_deref(), Some("hi"));
        assert_eq!(boolean(&map, "wrap", "TextBlock").unwrap(), Some(true));
        assert_eq!(unsigned(&map, "maxLines", "TextBlock").unwrap(), Some(3));
        assert_eq!(integer(&map, "min", "Input.Number").unwrap(), Some(-2));
        assert_eq!(string(&map, "missing", "TextBlock").unwrap(), None);
    }

    #[test]
    fn rejects_wrong_types() {
        let map = object(json!({"wrap": 7, "maxLines": -1, "items": {}}));
        assert!(matches!(
            boolean(&map, "wrap", "TextBlock"),
            Err(ParseError::InvalidValue { .. })
        ));
        assert!(unsigned(&map, "maxLines", "TextBlock").is_err());
        assert!(array(&map, "items", "Container").is_err());
    }

    #[test]
    fn required_string_treats_blank_as_missing() {
        let map = object(json!({"url": "  "}));
        assert!(matches!(
            required_string(&map, "url", "Image"),
            Err(ParseError::RequiredPropertyMissing { .. })
        ));
    }

    #[test]
    fn additional_properties_skip_known_keys() {
        let map = object(json!({"type": "Image", "url": "u", "x-extra": 1}));
        let extra = additional_properties(&map, COMMON_ELEMENT_KEYS, &["url"]);
        assert_eq!(Value::Object(extra), json!({"x-extra": 1}));
    }

    #[test]
    fn writer_skips_defaults() {
        let value = JsonWriter::new("TextBlock")
            .string("text", Some("hello"))
            .flag("wrap", false, false)
            .choice("spacing", Spacing::Default)
            .choice("size", Spacing::Large)
            .finish();
        assert_eq!(value, json!({"type": "TextBlock", "text": "hello", "size": "large"}));
    }
}
