use crate::models::inventory::{Inventory, InventoryEntry, OwnershipMarks};

/// Reconcile the live inventory with the cloud record and manual marks.
///
/// The secondary sources only add entries for items the live snapshot does not
/// report; they never replace or remove a live entry. Cloud entries are inserted
/// before manual ones, so an item known to both is reported as dismantled.
///
/// An absent live inventory means the snapshot has not loaded yet and is passed
/// through as `None`.
pub fn merge_inventory(
    live: Option<&Inventory>,
    cloud: Option<&OwnershipMarks>,
    manual: &OwnershipMarks,
) -> Option<Inventory> {
    let mut inventory = live?.clone();

    if let Some(cloud) = cloud {
        for hash in cloud.hashes() {
            inventory.entry(hash).or_insert_with(|| InventoryEntry::dismantled(hash));
        }
    }

    for hash in manual.hashes() {
        inventory.entry(hash).or_insert_with(|| InventoryEntry::manually_obtained(hash));
    }

    Some(inventory)
}
