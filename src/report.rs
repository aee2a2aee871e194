//! Plain text reports over a [`View`].

use crate::models::inventory::InventoryEntry;
use crate::models::sockets::ObjectiveProgress;
use crate::models::types::ItemHash;
use crate::selectors::Shared;
use crate::services::{CatalystInfo, SetSection, StatEntry, item_extra_info};
use crate::state::item_selectors::{
    CatalystSelector, ItemInstancesSelector, ItemInventoryEntrySelector, ItemSelector, ItemStatsSelector,
    SetDefinitionsSelector,
};
use crate::state::registry::{Registry, View};
use chrono::{DateTime, Utc};
use std::fmt::Write;

const UNKNOWN_ITEM: &str = "<unknown item>";

/// Everything the item report shows about one item
#[derive(Debug, Clone, PartialEq)]
pub struct ItemReport {
    pub hash: ItemHash,
    pub name: Option<String>,
    pub item_type: Option<String>,
    pub owned: bool,
    pub instance_count: usize,
    pub extra_info: Vec<&'static str>,
    pub catalyst: Option<CatalystInfo>,
    /// (stat name, value), display order
    pub stats: Vec<(String, i32)>,
    /// Human readable catalyst objective lines
    pub objectives: Vec<String>,
}

/// Builds item reports. Holds one handle per derived value and reuses them for
/// every item, the way a long lived item view would.
pub struct ItemReporter {
    item: ItemSelector,
    entry: ItemInventoryEntrySelector,
    instances: ItemInstancesSelector,
    catalyst: CatalystSelector,
    stats: ItemStatsSelector,
}

impl ItemReporter {
    pub fn new(registry: &Registry) -> Self {
        Self {
            item: registry.make_item_selector(),
            entry: registry.make_item_inventory_entry_selector(),
            instances: registry.make_item_instances_selector(),
            catalyst: registry.make_catalyst_selector(),
            stats: registry.make_item_stats_selector(),
        }
    }

    pub fn report(&self, view: &View<'_>, hash: ItemHash) -> ItemReport {
        let def = self.item.select(view, hash);
        let entry = self.entry.select(view, hash);
        let catalyst = self.catalyst.select(view, hash);
        let stats = self.stats.select(view, hash);

        let objectives = catalyst
            .as_ref()
            .as_ref()
            .and_then(|info| info.objectives.as_ref())
            .map(|objectives| objectives.iter().map(|o| describe_objective(view, o)).collect())
            .unwrap_or_default();

        ItemReport {
            hash,
            name: def.as_ref().as_ref().map(|d| d.name().to_string()),
            item_type: def.as_ref().as_ref().and_then(|d| d.item_type_display_name.clone()),
            owned: entry.is_some(),
            instance_count: self.instances.select(view, hash).len(),
            extra_info: item_extra_info(entry.as_ref().as_ref()),
            catalyst: catalyst.as_ref().clone(),
            stats: stats
                .as_ref()
                .as_deref()
                .map(|stats| stats.iter().map(|s| (stat_name(view, s), s.value)).collect())
                .unwrap_or_default(),
            objectives,
        }
    }
}

fn stat_name(view: &View<'_>, stat: &StatEntry) -> String {
    view.state()
        .definitions
        .stats
        .as_ref()
        .and_then(|defs| defs.get(&stat.stat_hash))
        .map(|def| def.display_properties.name.clone())
        .unwrap_or_else(|| stat.stat_hash.to_string())
}

fn describe_objective(view: &View<'_>, objective: &ObjectiveProgress) -> String {
    let (progress, completion) = objective.fraction();
    let description = view
        .state()
        .definitions
        .objective(objective.objective_hash)
        .map(|def| def.progress_description.as_str())
        .filter(|d| !d.is_empty())
        .unwrap_or("objective");

    let mark = if objective.complete { "x" } else { " " };
    format!("[{mark}] {description}: {progress}/{completion}")
}

pub fn render_item(report: &ItemReport) -> String {
    let mut out = String::new();
    let name = report.name.as_deref().unwrap_or(UNKNOWN_ITEM);
    let _ = write!(out, "{name} ({})", report.hash);
    if let Some(item_type) = &report.item_type {
        let _ = write!(out, " - {item_type}");
    }
    out.push('\n');

    if report.owned {
        let _ = writeln!(out, "  owned, {} instance(s)", report.instance_count);
    } else {
        out.push_str("  not owned\n");
    }
    for info in &report.extra_info {
        let _ = writeln!(out, "  * {info}");
    }

    if let Some(catalyst) = &report.catalyst {
        let _ = writeln!(out, "  catalyst: {}", catalyst.status.label());
        for line in &report.objectives {
            let _ = writeln!(out, "    {line}");
        }
    }

    for (name, value) in &report.stats {
        let _ = writeln!(out, "  {name}: {value}");
    }

    out
}

fn item_name(view: &View<'_>, hash: ItemHash) -> String {
    view.state()
        .definitions
        .item(hash)
        .map(|def| def.name().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| hash.to_string())
}

pub fn render_vendor(view: &View<'_>) -> String {
    let items = view.vendor_items();
    let mut out = String::new();

    let _ = writeln!(out, "vendor stock: {} new, {} obtained", items.new.len(), items.obtained.len());
    for hash in &items.new {
        let _ = writeln!(out, "  NEW {}", item_name(view, *hash));
    }
    for hash in &items.obtained {
        let _ = writeln!(out, "      {}", item_name(view, *hash));
    }

    out
}

/// Counts over the unified inventory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub entries: usize,
    pub obtained: usize,
    pub dismantled: usize,
    pub manually_obtained: usize,
    pub instances: usize,
    pub tracked_objectives: usize,
    pub vendor_has_new_items: bool,
    /// When the profile response was minted, if it says
    pub profile_minted: Option<DateTime<Utc>>,
}

pub fn summarize(view: &View<'_>) -> Option<Summary> {
    let inventory = view.inventory();
    let inventory = inventory.as_ref().as_ref()?;

    let count = |f: fn(&InventoryEntry) -> bool| inventory.values().filter(|e| f(e)).count();
    Some(Summary {
        entries: inventory.len(),
        obtained: count(|e| e.obtained),
        dismantled: count(|e| e.dismantled),
        manually_obtained: count(|e| e.manually_obtained),
        instances: view.item_instances().values().map(Vec::len).sum(),
        tracked_objectives: view.objective_instances().len(),
        vendor_has_new_items: view.vendor_has_new_items(),
        profile_minted: view
            .state()
            .profile
            .as_ref()
            .and_then(|profile| profile.response_minted_timestamp),
    })
}

pub fn render_summary(summary: Option<&Summary>) -> String {
    let Some(s) = summary else {
        return "inventory not loaded (needs profile.json and vendor definitions)\n".to_string();
    };

    let mut out = String::new();
    if let Some(minted) = s.profile_minted {
        let _ = writeln!(out, "profile as of {}", minted.to_rfc3339());
    }
    let _ = writeln!(out, "inventory entries: {}", s.entries);
    let _ = writeln!(out, "  obtained: {}", s.obtained);
    let _ = writeln!(out, "  dismantled: {}", s.dismantled);
    let _ = writeln!(out, "  manually marked: {}", s.manually_obtained);
    let _ = writeln!(out, "item instances: {}", s.instances);
    let _ = writeln!(out, "tracked objectives: {}", s.tracked_objectives);
    if s.vendor_has_new_items {
        out.push_str("vendor has new items\n");
    }
    out
}

/// Ownership per set section
pub struct SetReporter {
    definitions: SetDefinitionsSelector,
}

impl SetReporter {
    pub fn new(registry: &Registry) -> Self {
        Self {
            definitions: registry.make_set_definitions_selector(),
        }
    }

    pub fn render(&self, view: &View<'_>, sections: &Shared<Vec<SetSection>>) -> String {
        let defs = self.definitions.select(view, sections);
        let inventory = view.inventory();
        let is_owned = |hash: ItemHash| inventory.as_ref().as_ref().is_some_and(|inv| inv.contains_key(&hash));
        let mut out = String::new();

        for section in sections.iter() {
            let rows: Vec<(ItemHash, bool)> = section.item_hashes().map(|hash| (hash, is_owned(hash))).collect();
            let owned = rows.iter().filter(|(_, owned)| *owned).count();
            let _ = writeln!(out, "{} ({owned}/{})", section.name, rows.len());

            for (hash, owned) in rows {
                let name = defs
                    .get(&hash)
                    .and_then(|def| def.as_ref())
                    .map(|def| def.name().to_string())
                    .unwrap_or_else(|| hash.to_string());
                let mark = if owned { "x" } else { " " };
                let _ = writeln!(out, "  [{mark}] {name}");
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::definitions::{DisplayProperties, ItemDefinition, ItemDefs, VendorDefs};
    use crate::models::inventory::OwnershipMarks;
    use crate::models::profile::ProfileSnapshot;
    use std::sync::Arc;

    fn named(hash: u32, name: &str) -> (ItemHash, Arc<ItemDefinition>) {
        let def = ItemDefinition {
            hash: ItemHash(hash),
            display_properties: DisplayProperties {
                name: name.to_string(),
                ..DisplayProperties::default()
            },
            ..ItemDefinition::default()
        };
        (ItemHash(hash), Arc::new(def))
    }

    fn loaded_registry() -> Registry {
        let registry = Registry::new(Arc::new(Config::default()));
        registry.store.update(|state| {
            state.set_item_defs("en", ItemDefs::from([named(1, "Ace of Spades"), named(2, "Thorn")]));
            state.set_vendor_defs("en", VendorDefs::new());
            state.set_profile(ProfileSnapshot::default());
            state.set_manual_inventory(OwnershipMarks::from_iter([ItemHash(1)]));
            state.set_vendor_stock(vec![ItemHash(1), ItemHash(2)]);
        });
        registry
    }

    #[test]
    fn item_report_for_manual_mark() {
        let registry = loaded_registry();
        let reporter = ItemReporter::new(&registry);
        let report = reporter.report(&registry.read(), ItemHash(1));

        assert_eq!(report.name.as_deref(), Some("Ace of Spades"));
        assert!(report.owned);
        assert_eq!(report.extra_info, vec!["Manually marked as collected"]);
        assert!(report.stats.is_empty());

        let text = render_item(&report);
        assert!(text.starts_with("Ace of Spades (1)"));
        assert!(text.contains("catalyst: no data"));
    }

    #[test]
    fn unknown_item_report() {
        let registry = loaded_registry();
        let reporter = ItemReporter::new(&registry);
        let report = reporter.report(&registry.read(), ItemHash(99));

        assert!(report.name.is_none());
        assert!(!report.owned);
        assert!(report.catalyst.is_none());
        assert!(render_item(&report).contains("not owned"));
    }

    #[test]
    fn vendor_lists_new_first() {
        let registry = loaded_registry();
        let text = render_vendor(&registry.read());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "vendor stock: 1 new, 1 obtained");
        assert_eq!(lines[1].trim(), "NEW Thorn");
        assert_eq!(lines[2].trim(), "Ace of Spades");
    }

    #[test]
    fn summary_counts_sources() {
        let registry = loaded_registry();
        let summary = summarize(&registry.read()).unwrap();

        assert_eq!(summary.entries, 1);
        assert_eq!(summary.manually_obtained, 1);
        assert_eq!(summary.obtained, 0);
        assert!(summary.vendor_has_new_items);
        assert!(render_summary(Some(&summary)).contains("manually marked: 1"));
        assert!(summary.profile_minted.is_none());
    }

    #[test]
    fn summary_shows_profile_timestamp() {
        let registry = loaded_registry();
        let minted: DateTime<Utc> = "2018-03-01T10:00:00Z".parse().unwrap();
        registry.store.update(|state| {
            state.set_profile(ProfileSnapshot {
                response_minted_timestamp: Some(minted),
                ..ProfileSnapshot::default()
            })
        });

        let summary = summarize(&registry.read()).unwrap();
        assert_eq!(summary.profile_minted, Some(minted));
        assert!(render_summary(Some(&summary)).starts_with("profile as of 2018-03-01T10:00:00+00:00\n"));
    }

    #[test]
    fn summary_before_load() {
        let registry = Registry::new(Arc::new(Config::default()));
        assert!(summarize(&registry.read()).is_none());
        assert!(render_summary(None).starts_with("inventory not loaded"));
    }

    #[test]
    fn set_report_marks_owned_items() {
        let registry = loaded_registry();
        let reporter = SetReporter::new(&registry);
        let sections = Shared::new(vec![SetSection {
            name: "Exotics".to_string(),
            items: vec![ItemHash(1), ItemHash(2)],
            item_groups: None,
        }]);

        let text = reporter.render(&registry.read(), &sections);
        assert!(text.starts_with("Exotics (1/2)"));
        assert!(text.contains("[x] Ace of Spades"));
        assert!(text.contains("[ ] Thorn"));

        assert_eq!(reporter.render(&registry.read(), &sections), text);
        assert_eq!(reporter.definitions.recomputations(), 1);
        assert_eq!(registry.selectors.inventory.recomputations(), 1);
    }

    #[test]
    fn set_report_counts_grouped_items_once_each() {
        let registry = loaded_registry();
        let reporter = SetReporter::new(&registry);
        let sections = Shared::new(vec![SetSection {
            name: "Armor".to_string(),
            items: vec![ItemHash(2)],
            item_groups: Some(vec![vec![ItemHash(1)], vec![ItemHash(3)]]),
        }]);

        let text = reporter.render(&registry.read(), &sections);
        assert!(text.starts_with("Armor (1/3)"));
        assert!(text.contains("[x] Ace of Spades"));
        assert!(text.contains("[ ] 3"));
    }
}
