//! Item domain model.
//!
//! This module defines the core `Item` type representing a single record in
//! the remote local-data collection (a restaurant, park, event, shop...).
//! Items are immutable once fetched; the engine never edits them, it only
//! accumulates, caches, and filters them.
//!
//! # Wire Tolerance
//!
//! The collection endpoint serves records whose id field may be spelled
//! `_id` and whose category field may be spelled `type`. Both spellings are
//! accepted on deserialization via serde aliases; the engine-internal field
//! names are `id` and `category`.

use serde::{Deserialize, Serialize};

/// A single record fetched from the remote collection.
///
/// # Fields
///
/// - `id`: unique opaque identifier assigned by the data source
/// - `name`: display name
/// - `category`: record kind, e.g. `"Restaurant"`, `"Park"`, `"Event"`
/// - `address`: free-form street address
/// - `description`: free-form description text
/// - `tags`: ordered tag list, defaults to empty when absent on the wire
/// - `created_at` / `updated_at`: optional server timestamps, opaque strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(alias = "_id")]
    pub id: String,

    pub name: String,

    #[serde(alias = "type")]
    pub category: String,

    pub address: String,

    pub description: String,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(
        default,
        rename = "createdAt",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<String>,

    #[serde(
        default,
        rename = "updatedAt",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<String>,
}

impl Item {
    /// Creates an item with the given identity fields and no tags or
    /// timestamps. Primarily useful for fixtures and tests.
    #[must_use]
    pub fn new(id: &str, name: &str, category: &str, address: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            address: address.to_string(),
            description: description.to_string(),
            tags: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Builder-style helper attaching tags to a fixture item.
    #[must_use]
    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| (*t).to_string()).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::Item;

    #[test]
    fn deserializes_mongo_style_wire_shape() {
        let json = r#"{
            "_id": "6650f1",
            "name": "Bella Italia",
            "type": "Restaurant",
            "address": "91 Olive Dr",
            "description": "Authentic Italian cuisine with a rustic ambiance.",
            "tags": ["restaurant", "italian"],
            "createdAt": "2024-05-24T10:00:00.000Z",
            "updatedAt": "2024-05-24T10:00:00.000Z"
        }"#;

        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, "6650f1");
        assert_eq!(item.category, "Restaurant");
        assert_eq!(item.tags, vec!["restaurant", "italian"]);
        assert_eq!(item.created_at.as_deref(), Some("2024-05-24T10:00:00.000Z"));
    }

    #[test]
    fn deserializes_engine_field_names() {
        let json = r#"{
            "id": "p1",
            "name": "Hikers' Point",
            "category": "Park",
            "address": "99 Trailhead Rd",
            "description": "Popular hiking spot with scenic mountain views."
        }"#;

        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, "p1");
        assert_eq!(item.category, "Park");
        assert!(item.tags.is_empty());
        assert!(item.created_at.is_none());
    }

    #[test]
    fn serializes_without_absent_timestamps() {
        let item = Item::new("x", "Fitness Hub", "Gym", "33 Muscle Ln", "Gym.");
        let json = serde_json::to_string(&item).unwrap();
        assert!(!json.contains("createdAt"));
        assert!(!json.contains("updatedAt"));
    }
}
