use crate::models::types::{ItemHash, ObjectiveHash, StatHash, VendorHash};
use crate::selectors::Shared;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// UI label the game puts on the plug that drives catalyst progression
pub const MASTERWORK_INTERACTABLE: &str = "masterwork_interactable";

pub type ItemDefs = HashMap<ItemHash, Arc<ItemDefinition>>;
pub type StatDefs = HashMap<StatHash, StatDefinition>;
pub type ObjectiveDefs = HashMap<ObjectiveHash, ObjectiveDefinition>;
pub type VendorDefs = HashMap<VendorHash, VendorDefinition>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayProperties {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: Option<String>,
}

/// Static item metadata (from DestinyInventoryItemDefinition)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDefinition {
    pub hash: ItemHash,

    #[serde(default)]
    pub display_properties: DisplayProperties,

    /// e.g. "Auto Rifle"
    #[serde(default)]
    pub item_type_display_name: Option<String>,

    #[serde(default)]
    pub stats: Option<ItemStatBlock>,

    /// Only present on items that can be socketed into other items
    #[serde(default)]
    pub plug: Option<PlugDefinition>,
}

impl ItemDefinition {
    pub fn name(&self) -> &str {
        &self.display_properties.name
    }

    /// Raw stats in ascending stat hash order.
    pub fn raw_stats(&self) -> impl Iterator<Item = &ItemStat> {
        self.stats.iter().flat_map(|block| block.stats.values())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemStatBlock {
    #[serde(default)]
    pub stats: BTreeMap<StatHash, ItemStat>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemStat {
    pub stat_hash: StatHash,
    #[serde(default)]
    pub value: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlugDefinition {
    #[serde(default)]
    pub ui_plug_label: String,
    #[serde(default)]
    pub insertion_rules: Vec<InsertionRule>,
}

impl PlugDefinition {
    pub fn is_masterwork_interactable(&self) -> bool {
        self.ui_plug_label == MASTERWORK_INTERACTABLE
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertionRule {
    #[serde(default)]
    pub failure_message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatDefinition {
    pub hash: StatHash,
    #[serde(default)]
    pub display_properties: DisplayProperties,
}

impl StatDefinition {
    /// Stats without a display name are internal and never shown
    pub fn is_displayable(&self) -> bool {
        !self.display_properties.name.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectiveDefinition {
    pub hash: ObjectiveHash,
    #[serde(default)]
    pub progress_description: String,
    #[serde(default)]
    pub completion_value: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorDefinition {
    pub hash: VendorHash,
    #[serde(default)]
    pub display_properties: DisplayProperties,
    /// Kiosk unlocks reference this list by index
    #[serde(default)]
    pub item_list: Vec<VendorItem>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorItem {
    pub item_hash: ItemHash,
}

/// The four definition tables, loaded independently for one locale.
///
/// A table is `None` until it lands. Switching locale drops every table of the
/// previous locale so a read never mixes languages.
#[derive(Debug, Clone, Default)]
pub struct Definitions {
    pub locale: Option<String>,
    pub items: Option<Shared<ItemDefs>>,
    pub stats: Option<Shared<StatDefs>>,
    pub objectives: Option<Shared<ObjectiveDefs>>,
    pub vendors: Option<Shared<VendorDefs>>,
}

impl Definitions {
    /// Returns true when the locale changed and the tables were cleared.
    pub fn switch_locale(&mut self, locale: &str) -> bool {
        if self.locale.as_deref() == Some(locale) {
            return false;
        }

        *self = Definitions {
            locale: Some(locale.to_string()),
            ..Definitions::default()
        };
        true
    }

    pub fn is_complete(&self) -> bool {
        self.items.is_some() && self.stats.is_some() && self.objectives.is_some() && self.vendors.is_some()
    }

    pub fn item(&self, hash: ItemHash) -> Option<&Arc<ItemDefinition>> {
        self.items.as_ref().and_then(|defs| defs.get(&hash))
    }

    pub fn objective(&self, hash: ObjectiveHash) -> Option<&ObjectiveDefinition> {
        self.objectives.as_ref().and_then(|defs| defs.get(&hash))
    }
}
