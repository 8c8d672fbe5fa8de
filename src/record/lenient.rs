//! Lenient `deserialize_with` adapters for the boundary model.
//!
//! Authored records arrive in loosely typed shapes: arrays that are
//! sometimes scalars, strings that are sometimes numbers, flags that are
//! sometimes strings. These adapters degrade instead of erroring, so record
//! parsing stays total; stricter checks belong to schema validation.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// `Vec<T>` that treats non-array input as empty and drops elements that do
/// not fit `T`.
pub mod seq {
    use super::*;

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: serde::de::DeserializeOwned,
    {
        let value = Value::deserialize(deserializer)?;
        let Value::Array(entries) = value else {
            return Ok(Vec::new());
        };
        Ok(entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect())
    }
}

/// `Option<Vec<Value>>` that keeps the present/absent distinction: `null`
/// and non-array input read as absent, an array (even an empty one) as
/// present.
pub mod opt_seq {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<Value>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Array(entries) => Ok(Some(entries)),
            _ => Ok(None),
        }
    }
}

/// `Option<T>` for any deserializable `T`, reading values `T` does not fit
/// as absent.
pub mod opt {
    use super::*;

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: serde::de::DeserializeOwned,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(serde_json::from_value(value).ok())
    }
}

/// `Option<String>` that reads anything other than a string as absent.
pub mod opt_string {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(text) => Ok(Some(text)),
            _ => Ok(None),
        }
    }
}

/// `Option<bool>` that reads anything other than a boolean as absent.
pub mod opt_bool {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Bool(flag) => Ok(Some(flag)),
            _ => Ok(None),
        }
    }
}

/// `Option<i64>` that reads anything other than an integral number as
/// absent.
pub mod opt_i64 {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Number(number) => Ok(number.as_i64()),
            _ => Ok(None),
        }
    }
}

/// The truthiness rule applied to opaque authored payloads: `null`,
/// `false`, zero, and the empty string read as false; arrays and objects
/// always read as true, even when empty.
pub(crate) fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::{json, Value};

    #[derive(Debug, PartialEq, Deserialize)]
    struct Owner {
        name: String,
    }

    #[derive(Deserialize)]
    struct Host {
        #[serde(default, with = "super::seq")]
        tags: Vec<String>,
        #[serde(default, with = "super::opt_seq")]
        items: Option<Vec<Value>>,
        #[serde(default, with = "super::opt_string")]
        label: Option<String>,
        #[serde(default, with = "super::opt_bool")]
        visible: Option<bool>,
        #[serde(default, with = "super::opt_i64")]
        order: Option<i64>,
        #[serde(default, with = "super::opt")]
        owner: Option<Owner>,
    }

    #[test]
    fn non_array_sequences_read_as_empty() {
        let host: Host = serde_json::from_value(json!({ "tags": "oops" })).unwrap();
        assert!(host.tags.is_empty());
        let host: Host = serde_json::from_value(json!({ "tags": ["a", 7, "b"] })).unwrap();
        assert_eq!(host.tags, ["a", "b"]);
    }

    #[test]
    fn opt_seq_keeps_empty_arrays_present() {
        let host: Host = serde_json::from_value(json!({ "items": [] })).unwrap();
        assert_eq!(host.items, Some(Vec::new()));
        let host: Host = serde_json::from_value(json!({ "items": null })).unwrap();
        assert_eq!(host.items, None);
        let host: Host = serde_json::from_value(json!({})).unwrap();
        assert_eq!(host.items, None);
    }

    #[test]
    fn scalars_degrade_to_absent() {
        let host: Host = serde_json::from_value(json!({
            "label": 3, "visible": "yes", "order": 1.5, "owner": 7
        }))
        .unwrap();
        assert_eq!(host.label, None);
        assert_eq!(host.visible, None);
        assert_eq!(host.order, None);
        assert_eq!(host.owner, None);
    }

    #[test]
    fn well_typed_values_pass_through() {
        let host: Host = serde_json::from_value(json!({
            "label": "Hero", "visible": false, "order": 0, "owner": { "name": "mara" }
        }))
        .unwrap();
        assert_eq!(host.label.as_deref(), Some("Hero"));
        assert_eq!(host.visible, Some(false));
        assert_eq!(host.order, Some(0));
        assert_eq!(host.owner, Some(Owner { name: "mara".to_owned() }));
    }

    #[test]
    fn truthiness_follows_the_authored_value_shape() {
        for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(!super::truthy(&falsy), "{falsy} should read as false");
        }
        for truthy in [json!(true), json!(1), json!(-3), json!("x"), json!([]), json!({})] {
            assert!(super::truthy(&truthy), "{truthy} should read as true");
        }
    }
}
