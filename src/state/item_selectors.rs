//! Per-item selector handles.
//!
//! Each handle owns its own single-entry cache keyed on the state it reads plus
//! the parameter it was called with. Handles are cheap to create but only pay
//! off when kept: one handle per use site, called with the same parameter.

use crate::models::definitions::{ItemDefinition, ItemDefs, StatDefs};
use crate::models::inventory::{InstancesByItem, Inventory, InventoryEntry, ItemInstance};
use crate::models::types::ItemHash;
use crate::selectors::{Selector, Shared};
use crate::services::{
    CatalystInfo, SetItemDefs, SetSection, StatEntry, StatRules, resolve_catalyst, resolve_stats, selected_item_defs,
};
use crate::state::registry::View;
use std::sync::Arc;

type ItemDefsInput = Option<Shared<ItemDefs>>;

pub struct ItemSelector {
    selector: Selector<(ItemDefsInput, ItemHash), Option<Arc<ItemDefinition>>>,
}

impl ItemSelector {
    pub(crate) fn new() -> Self {
        Self {
            selector: Selector::new("item", |(defs, hash): &(ItemDefsInput, ItemHash)| {
                defs.as_deref().and_then(|defs| defs.get(hash)).cloned()
            }),
        }
    }

    /// Definition of `hash`, or `None` while definitions are loading or when the hash is unknown
    pub fn select(&self, view: &View<'_>, hash: ItemHash) -> Shared<Option<Arc<ItemDefinition>>> {
        self.selector.select((view.state().definitions.items.clone(), hash))
    }

    pub fn recomputations(&self) -> u64 {
        self.selector.recomputations()
    }
}

pub struct ItemInventoryEntrySelector {
    selector: Selector<(Shared<Option<Inventory>>, ItemHash), Option<InventoryEntry>>,
}

impl ItemInventoryEntrySelector {
    pub(crate) fn new() -> Self {
        Self {
            selector: Selector::new(
                "item_inventory_entry",
                |(inventory, hash): &(Shared<Option<Inventory>>, ItemHash)| {
                    inventory.as_ref().as_ref().and_then(|inv| inv.get(hash)).cloned()
                },
            ),
        }
    }

    /// Entry of `hash` in the unified inventory
    pub fn select(&self, view: &View<'_>, hash: ItemHash) -> Shared<Option<InventoryEntry>> {
        self.selector.select((view.inventory(), hash))
    }

    pub fn recomputations(&self) -> u64 {
        self.selector.recomputations()
    }
}

pub struct ItemInstancesSelector {
    selector: Selector<(Shared<InstancesByItem>, ItemHash), Vec<ItemInstance>>,
}

impl ItemInstancesSelector {
    pub(crate) fn new() -> Self {
        Self {
            selector: Selector::new(
                "item_instances_for",
                |(instances, hash): &(Shared<InstancesByItem>, ItemHash)| {
                    instances.get(hash).cloned().unwrap_or_default()
                },
            ),
        }
    }

    pub fn select(&self, view: &View<'_>, hash: ItemHash) -> Shared<Vec<ItemInstance>> {
        self.selector.select((view.item_instances(), hash))
    }

    pub fn recomputations(&self) -> u64 {
        self.selector.recomputations()
    }
}

pub struct CatalystSelector {
    selector: Selector<(Shared<InstancesByItem>, ItemDefsInput, ItemHash), Option<CatalystInfo>>,
}

impl CatalystSelector {
    pub(crate) fn new() -> Self {
        Self {
            selector: Selector::new(
                "catalyst",
                |(instances, defs, hash): &(Shared<InstancesByItem>, ItemDefsInput, ItemHash)| {
                    resolve_catalyst(*hash, instances, defs.as_deref())
                },
            ),
        }
    }

    /// Catalyst status of `hash`; `None` while definitions are loading or for unknown items
    pub fn select(&self, view: &View<'_>, hash: ItemHash) -> Shared<Option<CatalystInfo>> {
        let items = view.state().definitions.items.clone();
        self.selector.select((view.item_instances(), items, hash))
    }

    pub fn recomputations(&self) -> u64 {
        self.selector.recomputations()
    }
}

pub struct ItemStatsSelector {
    selector: Selector<(ItemDefsInput, Option<Shared<StatDefs>>, ItemHash), Option<Vec<StatEntry>>>,
}

impl ItemStatsSelector {
    pub(crate) fn new(rules: Arc<StatRules>) -> Self {
        Self {
            selector: Selector::new(
                "item_stats",
                move |(items, stats, hash): &(ItemDefsInput, Option<Shared<StatDefs>>, ItemHash)| {
                    resolve_stats(*hash, items.as_deref(), stats.as_deref(), &rules)
                },
            ),
        }
    }

    pub fn select(&self, view: &View<'_>, hash: ItemHash) -> Shared<Option<Vec<StatEntry>>> {
        let defs = &view.state().definitions;
        self.selector.select((defs.items.clone(), defs.stats.clone(), hash))
    }

    pub fn recomputations(&self) -> u64 {
        self.selector.recomputations()
    }
}

/// Definitions for every item a set page references. Keyed on the identity of
/// the section list, so publish it once as a [`Shared`] and reuse it.
pub struct SetDefinitionsSelector {
    selector: Selector<(ItemDefsInput, Shared<Vec<SetSection>>), SetItemDefs>,
}

impl SetDefinitionsSelector {
    pub(crate) fn new() -> Self {
        Self {
            selector: Selector::new(
                "set_definitions",
                |(defs, sections): &(ItemDefsInput, Shared<Vec<SetSection>>)| {
                    selected_item_defs(defs.as_deref(), sections)
                },
            ),
        }
    }

    pub fn select(&self, view: &View<'_>, sections: &Shared<Vec<SetSection>>) -> Shared<SetItemDefs> {
        self.selector
            .select((view.state().definitions.items.clone(), sections.clone()))
    }

    pub fn recomputations(&self) -> u64 {
        self.selector.recomputations()
    }
}
