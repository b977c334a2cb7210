//! Grocery Item Entity
//!
//! An item on the list: a name, a food-type code and the stores that carry it.
//! Items are immutable once created; the only way to change one is to delete
//! it and add a new one.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entity::{DomainError, DomainResult, Entity};

/// Stable item identifier, generated at creation and never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ItemId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ItemId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| DomainError::validation(format!("bad item id '{}': {}", s, e)))
    }
}

/// Food-type code, one of the ten labels "1".."10"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FoodType(u8);

impl FoodType {
    /// All codes in picker order
    pub const ALL: [&'static str; 10] = ["1", "2", "3", "4", "5", "6", "7", "8", "9", "10"];

    pub fn parse(code: &str) -> DomainResult<Self> {
        Self::ALL
            .iter()
            .position(|c| *c == code)
            .map(|idx| FoodType(idx as u8 + 1))
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "unknown food type '{}', expected one of 1..10",
                    code
                ))
            })
    }

    pub fn as_str(&self) -> &'static str {
        Self::ALL[(self.0 - 1) as usize]
    }

    pub fn all() -> impl Iterator<Item = FoodType> {
        (1..=Self::ALL.len() as u8).map(FoodType)
    }
}

impl Default for FoodType {
    fn default() -> Self {
        FoodType(1)
    }
}

impl fmt::Display for FoodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for FoodType {
    type Error = DomainError;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        FoodType::parse(&code)
    }
}

impl From<FoodType> for String {
    fn from(food_type: FoodType) -> Self {
        food_type.as_str().to_string()
    }
}

/// A grocery list entry.
///
/// Wire names match the list format saved by earlier releases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroceryItem {
    id: ItemId,
    #[serde(rename = "gItemValue")]
    name: String,
    #[serde(rename = "selectedFoodTypeValue")]
    food_type: FoodType,
    #[serde(rename = "selectedStoreValue")]
    stores: BTreeSet<String>,
}

impl GroceryItem {
    /// Create an item with a freshly generated identifier
    pub fn new(name: impl Into<String>, food_type: FoodType, stores: BTreeSet<String>) -> Self {
        Self::with_id(ItemId::new(), name, food_type, stores)
    }

    pub fn with_id(
        id: ItemId,
        name: impl Into<String>,
        food_type: FoodType,
        stores: BTreeSet<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            food_type,
            stores,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn food_type(&self) -> FoodType {
        self.food_type
    }

    pub fn stores(&self) -> &BTreeSet<String> {
        &self.stores
    }

    /// Check if the item can be bought at the given store
    pub fn is_available_at(&self, store: &str) -> bool {
        self.stores.contains(store)
    }

    /// Row text: `Name (code) Store A, Store B`
    pub fn summary(&self) -> String {
        let stores = self.stores.iter().map(String::as_str).collect::<Vec<_>>().join(", ");
        if stores.is_empty() {
            format!("{} ({})", self.name, self.food_type)
        } else {
            format!("{} ({}) {}", self.name, self.food_type, stores)
        }
    }
}

impl Entity for GroceryItem {
    type Id = ItemId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stores(labels: &[&str]) -> BTreeSet<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_item_creation() {
        let item = GroceryItem::new("Milk", FoodType::parse("3").unwrap(), stores(&["Aldi"]));
        assert_eq!(item.name(), "Milk");
        assert_eq!(item.food_type().as_str(), "3");
        assert!(item.is_available_at("Aldi"));
        assert!(!item.is_available_at("Target"));
    }

    #[test]
    fn test_ids_are_unique() {
        let a = GroceryItem::new("A", FoodType::default(), BTreeSet::new());
        let b = GroceryItem::new("A", FoodType::default(), BTreeSet::new());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_food_type_codes() {
        assert_eq!(FoodType::default().as_str(), "1");
        assert_eq!(FoodType::parse("10").unwrap().as_str(), "10");
        assert!(FoodType::parse("0").is_err());
        assert!(FoodType::parse("11").is_err());
        assert!(FoodType::parse("").is_err());
        assert_eq!(FoodType::all().count(), 10);
    }

    #[test]
    fn test_item_id_parse_accepts_uppercase() {
        let id: ItemId = "E621E1F8-C36C-495A-93FC-0C247A3E6E5F".parse().unwrap();
        assert_eq!(id.to_string(), "e621e1f8-c36c-495a-93fc-0c247a3e6e5f");
        assert!("not-a-uuid".parse::<ItemId>().is_err());
    }

    #[test]
    fn test_summary() {
        let item = GroceryItem::new("Eggs", FoodType::parse("2").unwrap(), stores(&["Target", "Aldi"]));
        assert_eq!(item.summary(), "Eggs (2) Aldi, Target");
        let bare = GroceryItem::new("Salt", FoodType::default(), BTreeSet::new());
        assert_eq!(bare.summary(), "Salt (1)");
    }
}
