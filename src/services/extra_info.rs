use crate::models::inventory::InventoryEntry;

/// Short ownership notes for an item, one per owned copy.
///
/// Dismantled items only ever say so; everything else lists the friendly name of
/// each instance location, skipping locations without one. No entry, no notes.
pub fn item_extra_info(entry: Option<&InventoryEntry>) -> Vec<&'static str> {
    let Some(entry) = entry else {
        return Vec::new();
    };

    if entry.dismantled {
        return vec!["Dismantled"];
    }

    entry
        .instances
        .iter()
        .filter_map(|instance| instance.location.friendly_name())
        .collect()
}
