use crate::models::profile::ItemComponent;
use crate::models::sockets::Socket;
use crate::models::types::{InstanceId, ItemHash};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unified ownership view, keyed by item hash
pub type Inventory = HashMap<ItemHash, InventoryEntry>;

/// Physical instances grouped by item hash, in first-seen order
pub type InstancesByItem = HashMap<ItemHash, Vec<ItemInstance>>;

/// Where an owned copy of an item was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemLocation {
    /// Equipped on one of the characters
    CharacterEquipment,
    /// In a character's inventory
    CharacterInventory,
    /// In the account wide inventory (vault)
    ProfileInventory,
    /// Unlocked in a character scoped kiosk
    CharacterKiosk,
    /// Unlocked in an account scoped kiosk
    ProfileKiosk,
    /// Only known from the cloud record; the item has since been dismantled
    CloudInventory,
    /// Marked as collected by hand
    Manual,
}

impl ItemLocation {
    /// Human readable location. Cloud records have none, their entry is reported as dismantled instead.
    pub fn friendly_name(&self) -> Option<&'static str> {
        match self {
            ItemLocation::CharacterEquipment => Some("Equipped on character"),
            ItemLocation::CharacterInventory => Some("On character"),
            ItemLocation::ProfileInventory => Some("In vault"),
            ItemLocation::CharacterKiosk | ItemLocation::ProfileKiosk => Some("Unlocked in Kiosk"),
            ItemLocation::Manual => Some("Manually marked as collected"),
            ItemLocation::CloudInventory => None,
        }
    }
}

/// One owned copy of an item
#[derive(Debug, Clone, PartialEq)]
pub struct ItemInstance {
    pub item_hash: ItemHash,

    /// Absent for non-instanced items, kiosk unlocks and synthetic records
    pub instance_id: Option<InstanceId>,

    pub location: ItemLocation,

    /// `None` when no socket data was resolved for this instance. `Some(vec![])` means
    /// socket data exists but is empty.
    pub sockets: Option<Vec<Socket>>,
}

impl ItemInstance {
    pub fn from_component(component: &ItemComponent, location: ItemLocation) -> Self {
        Self {
            item_hash: component.item_hash,
            instance_id: component.item_instance_id.clone(),
            location,
            sockets: None,
        }
    }

    /// A record that stands for ownership without a physical copy behind it
    pub fn synthetic(item_hash: ItemHash, location: ItemLocation) -> Self {
        Self {
            item_hash,
            instance_id: None,
            location,
            sockets: None,
        }
    }

    pub fn with_sockets(mut self, sockets: Option<Vec<Socket>>) -> Self {
        self.sockets = sockets;
        self
    }
}

/// Ownership facts for a single item hash.
///
/// An entry exists iff at least one source (live snapshot, cloud record or
/// manual mark) considers the item owned.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryEntry {
    pub item_hash: ItemHash,
    pub instances: Vec<ItemInstance>,
    /// Reported by the live snapshot
    pub obtained: bool,
    /// Only known from the cloud record
    pub dismantled: bool,
    /// Only known from a manual mark
    pub manually_obtained: bool,
}

impl InventoryEntry {
    pub fn obtained(item_hash: ItemHash) -> Self {
        Self {
            item_hash,
            instances: Vec::new(),
            obtained: true,
            dismantled: false,
            manually_obtained: false,
        }
    }

    pub fn dismantled(item_hash: ItemHash) -> Self {
        Self {
            item_hash,
            instances: vec![ItemInstance::synthetic(item_hash, ItemLocation::CloudInventory)],
            obtained: false,
            dismantled: true,
            manually_obtained: false,
        }
    }

    pub fn manually_obtained(item_hash: ItemHash) -> Self {
        Self {
            item_hash,
            instances: vec![ItemInstance::synthetic(item_hash, ItemLocation::Manual)],
            obtained: false,
            dismantled: false,
            manually_obtained: true,
        }
    }
}

/// Secondary ownership source (cloud record or manual marks).
///
/// Values are opaque markers; only the presence of a key counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnershipMarks(HashMap<ItemHash, serde_json::Value>);

impl OwnershipMarks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, hash: ItemHash) -> bool {
        self.0.contains_key(&hash)
    }

    pub fn hashes(&self) -> impl Iterator<Item = ItemHash> + '_ {
        self.0.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Copy with `hash` marked. Marks are replaced, never edited in place.
    pub fn with(&self, hash: ItemHash) -> Self {
        let mut marks = self.0.clone();
        marks.insert(hash, serde_json::Value::Bool(true));
        Self(marks)
    }

    /// Copy with `hash` unmarked.
    pub fn without(&self, hash: ItemHash) -> Self {
        let mut marks = self.0.clone();
        marks.remove(&hash);
        Self(marks)
    }
}

impl FromIterator<ItemHash> for OwnershipMarks {
    fn from_iter<I: IntoIterator<Item = ItemHash>>(iter: I) -> Self {
        Self(iter.into_iter().map(|hash| (hash, serde_json::Value::Bool(true))).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_count_presence_not_truthiness() {
        let marks: OwnershipMarks = serde_json::from_str(r#"{"1": true, "2": 0, "3": {"at": "x"}}"#).unwrap();
        assert_eq!(marks.len(), 3);
        assert!(marks.contains(ItemHash(2)));
        assert!(!marks.contains(ItemHash(4)));
    }

    #[test]
    fn marks_are_copied_on_change() {
        let marks: OwnershipMarks = [ItemHash(1)].into_iter().collect();
        let more = marks.with(ItemHash(2));
        assert_eq!(marks.len(), 1);
        assert_eq!(more.len(), 2);
        assert!(!more.without(ItemHash(1)).contains(ItemHash(1)));
    }

    #[test]
    fn cloud_location_has_no_label() {
        assert_eq!(ItemLocation::CloudInventory.friendly_name(), None);
        assert_eq!(ItemLocation::ProfileKiosk.friendly_name(), Some("Unlocked in Kiosk"));
    }
}
