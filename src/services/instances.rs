use crate::models::inventory::{InstancesByItem, ItemInstance};
use crate::models::profile::ProfileSnapshot;

/// Flatten every owned record of the snapshot and group it by item hash.
///
/// Records keep snapshot order (equipped, character inventories, vault) inside
/// each group. Socket data is attached by instance id; records without an
/// instance id or without socket data get `sockets: None`.
pub fn aggregate_instances(profile: &ProfileSnapshot) -> InstancesByItem {
    let mut by_item = InstancesByItem::new();

    for (location, component) in profile.owned_items() {
        let sockets = component
            .item_instance_id
            .as_ref()
            .and_then(|id| profile.sockets_for(id))
            .cloned();

        by_item
            .entry(component.item_hash)
            .or_default()
            .push(ItemInstance::from_component(component, location).with_sockets(sockets));
    }

    by_item
}
