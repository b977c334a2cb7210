//! Serialization Codec
//!
//! JSON encoding of the three persisted aggregates. Sets encode as JSON arrays
//! and collapse duplicates on decode; the item list keeps insertion order.

use std::collections::HashSet;

use serde::de::{DeserializeOwned, Error as _};
use serde::Serialize;

use crate::domain::{Entity, GroceryItem, SelectionSet, StoreConfig};

pub type CodecResult<T> = Result<T, serde_json::Error>;

fn encode<T: Serialize + ?Sized>(value: &T) -> CodecResult<Vec<u8>> {
    serde_json::to_vec(value)
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> CodecResult<T> {
    serde_json::from_slice(bytes)
}

pub fn encode_items(items: &[GroceryItem]) -> CodecResult<Vec<u8>> {
    encode(items)
}

/// Decode an item list, rejecting lists that repeat an identifier
pub fn decode_items(bytes: &[u8]) -> CodecResult<Vec<GroceryItem>> {
    let items: Vec<GroceryItem> = decode(bytes)?;
    let mut seen = HashSet::with_capacity(items.len());
    for item in &items {
        if !seen.insert(item.id()) {
            return Err(serde_json::Error::custom(format!(
                "duplicate item id {}",
                item.id()
            )));
        }
    }
    Ok(items)
}

pub fn encode_selection(selection: &SelectionSet) -> CodecResult<Vec<u8>> {
    encode(selection)
}

pub fn decode_selection(bytes: &[u8]) -> CodecResult<SelectionSet> {
    decode(bytes)
}

pub fn encode_store_config(config: &StoreConfig) -> CodecResult<Vec<u8>> {
    encode(config)
}

/// Decode store labels; anything but exactly five strings is an error
pub fn decode_store_config(bytes: &[u8]) -> CodecResult<StoreConfig> {
    decode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FoodType, ItemId};
    use std::collections::BTreeSet;

    fn item(name: &str, stores: &[&str]) -> GroceryItem {
        GroceryItem::new(
            name,
            FoodType::parse("4").unwrap(),
            stores.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn test_items_round_trip_keeps_order() {
        let items = vec![item("Zucchini", &["Aldi"]), item("apple", &[]), item("Bread", &["Aldi", "Lidl"])];
        let decoded = decode_items(&encode_items(&items).unwrap()).unwrap();
        assert_eq!(decoded, items);
    }

    #[test]
    fn test_encoded_bytes_are_stable() {
        let items = vec![item("Milk", &["Lidl", "Aldi"]), item("Eggs", &[])];
        let bytes = encode_items(&items).unwrap();
        assert_eq!(encode_items(&decode_items(&bytes).unwrap()).unwrap(), bytes);

        let selection: SelectionSet = items.iter().map(Entity::id).collect();
        let bytes = encode_selection(&selection).unwrap();
        assert_eq!(encode_selection(&decode_selection(&bytes).unwrap()).unwrap(), bytes);
    }

    #[test]
    fn test_empty_aggregates_round_trip() {
        assert!(decode_items(&encode_items(&[]).unwrap()).unwrap().is_empty());
        assert!(decode_selection(&encode_selection(&SelectionSet::new()).unwrap())
            .unwrap()
            .is_empty());
        let config = StoreConfig::default();
        assert_eq!(decode_store_config(&encode_store_config(&config).unwrap()).unwrap(), config);
    }

    #[test]
    fn test_item_wire_format() {
        let json = br#"[{
            "id": "E621E1F8-C36C-495A-93FC-0C247A3E6E5F",
            "gItemValue": "Milk",
            "selectedFoodTypeValue": "7",
            "selectedStoreValue": ["Target", "Aldi", "Target"]
        }]"#;
        let items = decode_items(json).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name(), "Milk");
        assert_eq!(items[0].food_type().as_str(), "7");
        let expected: BTreeSet<String> = ["Aldi", "Target"].iter().map(|s| s.to_string()).collect();
        assert_eq!(items[0].stores(), &expected);

        let encoded = String::from_utf8(encode_items(&items).unwrap()).unwrap();
        assert!(encoded.contains("\"gItemValue\":\"Milk\""));
        assert!(encoded.contains("\"selectedFoodTypeValue\":\"7\""));
    }

    #[test]
    fn test_selection_collapses_duplicates() {
        let id = ItemId::new();
        let json = format!("[\"{}\", \"{}\"]", id, id);
        let selection = decode_selection(json.as_bytes()).unwrap();
        assert_eq!(selection.len(), 1);
        assert!(selection.contains(&id));
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(decode_items(b"not json").is_err());
        assert!(decode_items(br#"[{"id":"x","gItemValue":"a","selectedFoodTypeValue":"1","selectedStoreValue":[]}]"#).is_err());
        assert!(decode_selection(b"{}").is_err());
        assert!(decode_store_config(br#"["a","b","c","d"]"#).is_err());
        assert!(decode_store_config(br#"["a","b","c","d","e","f"]"#).is_err());
    }

    #[test]
    fn test_rejects_unknown_food_type() {
        let json = format!(
            r#"[{{"id":"{}","gItemValue":"a","selectedFoodTypeValue":"11","selectedStoreValue":[]}}]"#,
            ItemId::new()
        );
        assert!(decode_items(json.as_bytes()).is_err());
    }

    #[test]
    fn test_rejects_duplicate_item_ids() {
        let first = item("a", &[]);
        let copy = first.clone();
        let bytes = encode_items(&[first, copy]).unwrap();
        assert!(decode_items(&bytes).is_err());
    }
}
