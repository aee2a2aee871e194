use crate::models::definitions::{ItemDefinition, ItemDefs};
use crate::models::types::ItemHash;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

/// One section of a collection set page
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetSection {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub items: Vec<ItemHash>,
    #[serde(default)]
    pub item_groups: Option<Vec<Vec<ItemHash>>>,
}

impl SetSection {
    pub fn item_hashes(&self) -> impl Iterator<Item = ItemHash> + '_ {
        self.items
            .iter()
            .chain(self.item_groups.iter().flatten().flatten())
            .copied()
    }
}

pub type SetItemDefs = HashMap<ItemHash, Option<Arc<ItemDefinition>>>;

/// Definitions of every item a set references. Hashes without a definition map
/// to `None`; an unloaded definitions table yields an empty map.
pub fn selected_item_defs(item_defs: Option<&ItemDefs>, sections: &[SetSection]) -> SetItemDefs {
    let Some(item_defs) = item_defs else {
        return SetItemDefs::new();
    };

    sections
        .iter()
        .flat_map(|section| section.item_hashes())
        .map(|hash| (hash, item_defs.get(&hash).cloned()))
        .collect()
}
