use crate::config::Config;
use crate::models::definitions::VendorDefs;
use crate::models::inventory::{InstancesByItem, Inventory, OwnershipMarks};
use crate::models::profile::ProfileSnapshot;
use crate::models::types::ItemHash;
use crate::selectors::{Selector, Shared};
use crate::services::{
    Classification, ObjectiveProgressMap, StatRules, aggregate_instances, classify_candidates, inventory_from_profile,
    merge_inventory, objectives_from_profile,
};
use crate::state::item_selectors::{
    CatalystSelector, ItemInstancesSelector, ItemInventoryEntrySelector, ItemSelector, ItemStatsSelector,
    SetDefinitionsSelector,
};
use crate::state::store::{AppState, Store};
use std::sync::Arc;

type ProfileInput = Option<Shared<ProfileSnapshot>>;

/// Selectors shared by every reader. One instance each, owned by the registry.
pub struct Selectors {
    pub current_inventory: Selector<(ProfileInput, Option<Shared<VendorDefs>>), Option<Inventory>>,
    pub inventory: Selector<(Shared<Option<Inventory>>, Option<Shared<OwnershipMarks>>, Shared<OwnershipMarks>), Option<Inventory>>,
    pub vendor_items: Selector<(Shared<Option<Inventory>>, Shared<Vec<ItemHash>>), Classification>,
    pub vendor_has_new_items: Selector<Shared<Classification>, bool>,
    pub objective_instances: Selector<ProfileInput, ObjectiveProgressMap>,
    pub item_instances: Selector<ProfileInput, InstancesByItem>,
}

impl Selectors {
    fn new() -> Self {
        Self {
            current_inventory: Selector::new("current_inventory", |(profile, vendors): &(ProfileInput, Option<Shared<VendorDefs>>)| {
                match (profile, vendors) {
                    (Some(profile), Some(vendors)) => Some(inventory_from_profile(profile, vendors)),
                    _ => None,
                }
            }),
            inventory: Selector::new(
                "inventory",
                |(live, cloud, manual): &(Shared<Option<Inventory>>, Option<Shared<OwnershipMarks>>, Shared<OwnershipMarks>)| {
                    merge_inventory(live.as_ref().as_ref(), cloud.as_deref(), manual)
                },
            ),
            vendor_items: Selector::new(
                "vendor_items",
                |(inventory, stock): &(Shared<Option<Inventory>>, Shared<Vec<ItemHash>>)| {
                    classify_candidates(inventory.as_ref().as_ref(), stock)
                },
            ),
            vendor_has_new_items: Selector::new("vendor_has_new_items", |items: &Shared<Classification>| items.has_new_items()),
            objective_instances: Selector::new("objective_instances", |profile: &ProfileInput| {
                profile.as_deref().map(objectives_from_profile).unwrap_or_default()
            }),
            item_instances: Selector::new("item_instances", |profile: &ProfileInput| {
                profile.as_deref().map(aggregate_instances).unwrap_or_default()
            }),
        }
    }
}

/// Owns the state store, the global selectors and the stat rules, and hands out
/// per-item selector handles.
pub struct Registry {
    pub store: Store,
    pub config: Arc<Config>,
    pub selectors: Selectors,
    stat_rules: Arc<StatRules>,
}

impl Registry {
    pub fn new(config: Arc<Config>) -> Self {
        let stat_rules = Arc::new(config.stat_rules());

        Self {
            store: Store::default(),
            config,
            selectors: Selectors::new(),
            stat_rules,
        }
    }

    /// Pin the current state. Everything read through the view sees the same
    /// snapshot, however many selectors it goes through.
    pub fn read(&self) -> View<'_> {
        View {
            registry: self,
            state: self.store.snapshot(),
        }
    }

    pub fn stat_rules(&self) -> &Arc<StatRules> {
        &self.stat_rules
    }

    // Factories for parameterized selectors. Each call creates an independent
    // cache: create one handle per use site, keep it, and pass it the item hash on
    // every read. A handle created per read never hits its cache.

    pub fn make_item_selector(&self) -> ItemSelector {
        ItemSelector::new()
    }

    pub fn make_item_inventory_entry_selector(&self) -> ItemInventoryEntrySelector {
        ItemInventoryEntrySelector::new()
    }

    pub fn make_item_instances_selector(&self) -> ItemInstancesSelector {
        ItemInstancesSelector::new()
    }

    pub fn make_catalyst_selector(&self) -> CatalystSelector {
        CatalystSelector::new()
    }

    pub fn make_item_stats_selector(&self) -> ItemStatsSelector {
        ItemStatsSelector::new(self.stat_rules.clone())
    }

    pub fn make_set_definitions_selector(&self) -> SetDefinitionsSelector {
        SetDefinitionsSelector::new()
    }
}

/// One logical read of the derived state
pub struct View<'a> {
    registry: &'a Registry,
    state: Arc<AppState>,
}

impl<'a> View<'a> {
    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    /// Live ownership straight from the snapshot; `None` until the profile and vendor definitions are loaded
    pub fn current_inventory(&self) -> Shared<Option<Inventory>> {
        let state = &self.state;
        self.registry
            .selectors
            .current_inventory
            .select((state.profile.clone(), state.definitions.vendors.clone()))
    }

    /// Unified inventory (live + cloud + manual)
    pub fn inventory(&self) -> Shared<Option<Inventory>> {
        let state = &self.state;
        self.registry.selectors.inventory.select((
            self.current_inventory(),
            state.cloud_inventory.clone(),
            state.manual_inventory.clone(),
        ))
    }

    pub fn vendor_items(&self) -> Shared<Classification> {
        self.registry
            .selectors
            .vendor_items
            .select((self.inventory(), self.state.vendor_stock.clone()))
    }

    pub fn vendor_has_new_items(&self) -> bool {
        *self.registry.selectors.vendor_has_new_items.select(self.vendor_items())
    }

    pub fn objective_instances(&self) -> Shared<ObjectiveProgressMap> {
        self.registry
            .selectors
            .objective_instances
            .select(self.state.profile.clone())
    }

    pub fn item_instances(&self) -> Shared<InstancesByItem> {
        self.registry.selectors.item_instances.select(self.state.profile.clone())
    }
}
