use crate::models::definitions::VendorDefs;
use crate::models::inventory::{Inventory, InventoryEntry, ItemInstance};
use crate::models::profile::{KioskList, ProfileSnapshot};
use crate::models::types::ItemHash;

/// Build the live ownership view from a profile snapshot.
///
/// Owned copies come first (equipped, character inventories, vault), followed by
/// kiosk unlocks. Kiosk entries only reference a vendor's item list by index, so
/// the vendor definitions are needed to turn them into item hashes.
pub fn inventory_from_profile(profile: &ProfileSnapshot, vendor_defs: &VendorDefs) -> Inventory {
    let mut inventory = Inventory::new();

    for (location, component) in profile.owned_items() {
        add_instance(&mut inventory, ItemInstance::from_component(component, location));
    }

    for (location, kiosk) in profile.kiosks() {
        for item_hash in kiosk_unlocks(kiosk, vendor_defs) {
            add_instance(&mut inventory, ItemInstance::synthetic(item_hash, location));
        }
    }

    inventory
}

/// Item hashes a kiosk reports as acquirable. Unknown vendors and out of range
/// indexes are skipped.
pub fn kiosk_unlocks(kiosk: &KioskList, vendor_defs: &VendorDefs) -> Vec<ItemHash> {
    let mut unlocked = Vec::new();

    for (vendor_hash, kiosk_items) in &kiosk.kiosk_items {
        let Some(vendor) = vendor_defs.get(vendor_hash) else {
            tracing::debug!(%vendor_hash, "kiosk references unknown vendor");
            continue;
        };

        for kiosk_item in kiosk_items.iter().filter(|k| k.can_acquire) {
            match vendor.item_list.get(kiosk_item.index) {
                Some(vendor_item) => unlocked.push(vendor_item.item_hash),
                None => tracing::debug!(%vendor_hash, index = kiosk_item.index, "kiosk index outside vendor item list"),
            }
        }
    }

    unlocked
}

fn add_instance(inventory: &mut Inventory, instance: ItemInstance) {
    inventory
        .entry(instance.item_hash)
        .or_insert_with(|| InventoryEntry::obtained(instance.item_hash))
        .instances
        .push(instance);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::definitions::{VendorDefinition, VendorItem};
    use crate::models::inventory::ItemLocation;
    use crate::models::profile::{Component, ItemComponent, ItemList, KioskItem};
    use crate::models::types::{CharacterId, VendorHash};
    use indexmap::IndexMap;

    fn vendor_defs() -> VendorDefs {
        let vendor = VendorDefinition {
            hash: VendorHash(500),
            item_list: vec![
                VendorItem { item_hash: ItemHash(70) },
                VendorItem { item_hash: ItemHash(71) },
                VendorItem { item_hash: ItemHash(72) },
            ],
            ..VendorDefinition::default()
        };
        VendorDefs::from([(vendor.hash, vendor)])
    }

    fn kiosk(items: Vec<KioskItem>) -> KioskList {
        KioskList {
            kiosk_items: IndexMap::from([(VendorHash(500), items)]),
        }
    }

    #[test]
    fn groups_owned_copies_by_hash() {
        let mut profile = ProfileSnapshot::default();
        profile.character_equipment = Component::new(IndexMap::from([(
            CharacterId::from("c1"),
            ItemList { items: vec![ItemComponent::new(ItemHash(5), Some("i1"))] },
        )]));
        profile.profile_inventory = Component::new(ItemList {
            items: vec![ItemComponent::new(ItemHash(5), Some("i2")), ItemComponent::new(ItemHash(6), None)],
        });

        let inventory = inventory_from_profile(&profile, &VendorDefs::new());

        assert_eq!(inventory.len(), 2);
        let entry = &inventory[&ItemHash(5)];
        assert!(entry.obtained);
        assert!(!entry.dismantled);
        let locations: Vec<ItemLocation> = entry.instances.iter().map(|i| i.location).collect();
        assert_eq!(locations, vec![ItemLocation::CharacterEquipment, ItemLocation::ProfileInventory]);
    }

    #[test]
    fn kiosk_unlocks_resolve_through_vendor_item_list() {
        let mut profile = ProfileSnapshot::default();
        profile.profile_kiosks = Component::new(kiosk(vec![
            KioskItem { index: 0, can_acquire: true },
            KioskItem { index: 1, can_acquire: false },
            KioskItem { index: 2, can_acquire: true },
            KioskItem { index: 9, can_acquire: true },
        ]));

        let inventory = inventory_from_profile(&profile, &vendor_defs());

        let mut hashes: Vec<u32> = inventory.keys().map(|h| h.0).collect();
        hashes.sort();
        assert_eq!(hashes, vec![70, 72]);
        assert_eq!(inventory[&ItemHash(70)].instances[0].location, ItemLocation::ProfileKiosk);
    }

    #[test]
    fn unknown_vendor_is_skipped() {
        let list = KioskList {
            kiosk_items: IndexMap::from([(VendorHash(1), vec![KioskItem { index: 0, can_acquire: true }])]),
        };
        assert!(kiosk_unlocks(&list, &vendor_defs()).is_empty());
    }
}
