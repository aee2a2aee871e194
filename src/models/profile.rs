use crate::models::inventory::ItemLocation;
use crate::models::sockets::{ObjectiveProgress, Socket};
use crate::models::types::{CharacterId, InstanceId, ItemHash, VendorHash};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::HashMap;

/// A point-in-time profile response as handed over by the fetch layer.
///
/// Character maps keep their source order; instance aggregation depends on it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSnapshot {
    #[serde(default)]
    pub response_minted_timestamp: Option<DateTime<Utc>>,

    #[serde(default)]
    pub character_equipment: Component<IndexMap<CharacterId, ItemList>>,

    #[serde(default)]
    pub character_inventories: Component<IndexMap<CharacterId, ItemList>>,

    /// Account wide inventory (vault, consumables, ...)
    #[serde(default)]
    pub profile_inventory: Component<ItemList>,

    #[serde(default)]
    pub character_kiosks: Component<IndexMap<CharacterId, KioskList>>,

    #[serde(default)]
    pub profile_kiosks: Component<KioskList>,

    #[serde(default)]
    pub item_components: ItemComponents,
}

impl ProfileSnapshot {
    /// Every physically owned item record: equipped and per-character inventories
    /// first (characters in source order), then the account wide inventory.
    pub fn owned_items(&self) -> impl Iterator<Item = (ItemLocation, &ItemComponent)> {
        let equipped = self
            .character_equipment
            .data
            .values()
            .flat_map(|list| list.items.iter())
            .map(|item| (ItemLocation::CharacterEquipment, item));

        let carried = self
            .character_inventories
            .data
            .values()
            .flat_map(|list| list.items.iter())
            .map(|item| (ItemLocation::CharacterInventory, item));

        let account = self
            .profile_inventory
            .data
            .items
            .iter()
            .map(|item| (ItemLocation::ProfileInventory, item));

        equipped.chain(carried).chain(account)
    }

    /// Kiosk records, character kiosks first, then the account kiosk.
    pub fn kiosks(&self) -> impl Iterator<Item = (ItemLocation, &KioskList)> {
        self.character_kiosks
            .data
            .values()
            .map(|kiosk| (ItemLocation::CharacterKiosk, kiosk))
            .chain(std::iter::once((ItemLocation::ProfileKiosk, &self.profile_kiosks.data)))
    }

    pub fn sockets_for(&self, instance_id: &InstanceId) -> Option<&Vec<Socket>> {
        self.item_components
            .sockets
            .data
            .get(instance_id)
            .map(|list| &list.sockets)
    }
}

/// Bungie wraps every profile component in `{ "data": ... }`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Component<T> {
    #[serde(default)]
    pub data: T,
}

impl<T> Component<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemList {
    #[serde(default)]
    pub items: Vec<ItemComponent>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemComponent {
    pub item_hash: ItemHash,

    /// Only present for instanced items (weapons, armor, ...)
    #[serde(default)]
    pub item_instance_id: Option<InstanceId>,
}

impl ItemComponent {
    pub fn new(item_hash: ItemHash, instance_id: Option<&str>) -> Self {
        Self {
            item_hash,
            item_instance_id: instance_id.map(InstanceId::from),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KioskList {
    #[serde(default)]
    pub kiosk_items: IndexMap<VendorHash, Vec<KioskItem>>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KioskItem {
    /// Index into the vendor definition's item list
    pub index: usize,
    #[serde(default)]
    pub can_acquire: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemComponents {
    #[serde(default)]
    pub sockets: Component<HashMap<InstanceId, SocketList>>,
    #[serde(default)]
    pub objectives: Component<IndexMap<InstanceId, ObjectiveList>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SocketList {
    #[serde(default)]
    pub sockets: Vec<Socket>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObjectiveList {
    #[serde(default)]
    pub objectives: Vec<ObjectiveProgress>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_profile_response_shape() {
        let profile: ProfileSnapshot = serde_json::from_str(
            r#"{
                "responseMintedTimestamp": "2018-03-01T10:00:00Z",
                "characterEquipment": { "data": {
                    "2305843009": { "items": [ { "itemHash": 5, "itemInstanceId": "i1" } ] },
                    "2305843001": { "items": [ { "itemHash": 6, "itemInstanceId": "i3" } ] }
                } },
                "profileInventory": { "data": { "items": [ { "itemHash": 7, "quantity": 20 } ] } },
                "itemComponents": { "sockets": { "data": {
                    "i1": { "sockets": [ { "plugHash": 42, "isEnabled": true } ] }
                } } }
            }"#,
        )
        .unwrap();

        assert!(profile.response_minted_timestamp.is_some());

        let owned: Vec<(ItemLocation, u32)> = profile
            .owned_items()
            .map(|(location, item)| (location, item.item_hash.0))
            .collect();
        assert_eq!(
            owned,
            vec![
                (ItemLocation::CharacterEquipment, 5),
                (ItemLocation::CharacterEquipment, 6),
                (ItemLocation::ProfileInventory, 7),
            ]
        );

        assert_eq!(profile.sockets_for(&InstanceId::from("i1")).map(Vec::len), Some(1));
        assert!(profile.sockets_for(&InstanceId::from("i3")).is_none());
    }

    #[test]
    fn missing_components_default_to_empty() {
        let profile: ProfileSnapshot = serde_json::from_str("{}").unwrap();
        assert_eq!(profile.owned_items().count(), 0);
        assert_eq!(profile.kiosks().count(), 1);
    }
}
