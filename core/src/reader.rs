//! Stateless views over a raw JSON response body.
//!
//! Both clients hand their response bodies to these functions; nothing is
//! cached, so each call decodes the body again.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::collection::Collection;
use crate::error::ApiError;

/// Top-level field holding the payload in Statamic responses.
pub const DATA_FIELD: &str = "data";

/// The whole body as JSON. Fails only on malformed JSON.
pub fn all(body: &str) -> Result<Value, ApiError> {
    Ok(serde_json::from_str(body)?)
}

/// Items of the `data` field.
///
/// An array yields its elements in order and `null` yields nothing. A
/// single object (one entry, one global) or scalar yields one item: the
/// object is kept whole, not split into its property values as PHP's
/// `collect()` over a decoded object would.
pub fn data(body: &str) -> Result<Vec<Value>, ApiError> {
    match take_data(body)? {
        Value::Array(items) => Ok(items),
        Value::Null => Ok(Vec::new()),
        other => Ok(vec![other]),
    }
}

/// `data` items wrapped for chaining.
pub fn to_collection(body: &str) -> Result<Collection, ApiError> {
    data(body).map(Collection::new)
}

/// Decode the whole body into `T`.
pub fn json<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    Ok(serde_json::from_str(body)?)
}

/// Decode the `data` field into `T`.
pub fn data_as<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    Ok(serde_json::from_value(take_data(body)?)?)
}

fn take_data(body: &str) -> Result<Value, ApiError> {
    let mut value: Value = serde_json::from_str(body)?;
    value
        .get_mut(DATA_FIELD)
        .map(Value::take)
        .ok_or(ApiError::MissingField(DATA_FIELD))
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    const LIST: &str = r#"{"data":[{"id":1},{"id":2}],"meta":{"total":2}}"#;

    #[test]
    fn data_returns_items_in_order() {
        let items = data(LIST).unwrap();
        assert_eq!(items, vec![json!({"id": 1}), json!({"id": 2})]);
    }

    #[test]
    fn to_collection_wraps_same_items() {
        let collection = to_collection(LIST).unwrap();
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.into_vec(), data(LIST).unwrap());
    }

    #[test]
    fn all_keeps_every_top_level_key() {
        let value = all(LIST).unwrap();
        assert_eq!(value["data"].as_array().unwrap().len(), 2);
        assert_eq!(value["meta"]["total"], 2);
    }

    #[test]
    fn all_accepts_bodies_without_data() {
        let value = all(r#"{"message":"ok"}"#).unwrap();
        assert_eq!(value["message"], "ok");
    }

    #[test]
    fn all_rejects_malformed_json() {
        let err = all("<html>").unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn data_missing_field() {
        let err = data(r#"{"message":"Not found"}"#).unwrap_err();
        assert!(matches!(err, ApiError::MissingField("data")));
        let err = to_collection(r#"[]"#).unwrap_err();
        assert!(matches!(err, ApiError::MissingField("data")));
    }

    #[test]
    fn single_object_becomes_one_item() {
        let items = data(r#"{"data":{"id":"home","title":"Home"}}"#).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["title"], "Home");
    }

    #[test]
    fn single_object_is_not_split_into_property_values() {
        let items = data(r#"{"data":{"handle":"footer","copyright":"ACME"}}"#).unwrap();
        assert_eq!(items, vec![json!({"handle": "footer", "copyright": "ACME"})]);
    }

    #[test]
    fn null_data_is_empty() {
        assert!(data(r#"{"data":null}"#).unwrap().is_empty());
    }

    #[test]
    fn typed_decoding() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Item {
            id: u32,
        }
        let items: Vec<Item> = data_as(LIST).unwrap();
        assert_eq!(items, vec![Item { id: 1 }, Item { id: 2 }]);

        #[derive(Deserialize)]
        struct Meta {
            total: u32,
        }
        #[derive(Deserialize)]
        struct Page {
            meta: Meta,
        }
        let page: Page = json(LIST).unwrap();
        assert_eq!(page.meta.total, 2);
    }

    #[test]
    fn typed_decoding_shape_mismatch() {
        let err = data_as::<Vec<String>>(LIST).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }
}
