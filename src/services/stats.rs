use crate::models::definitions::{ItemDefs, StatDefs};
use crate::models::types::{ItemHash, StatHash};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashSet;

/// Stats that are never listed (Attack, Power, Defense, Inventory Size)
pub static STAT_BLACKLIST: Lazy<HashSet<StatHash>> = Lazy::new(|| {
    [1480404414, 1935470627, 3897883278, 1931675084]
        .into_iter()
        .map(StatHash)
        .collect()
});

/// Stats shown as plain numbers, listed before the bar stats
/// (Rounds Per Minute, Magazine, Charge Time, Draw Time, Blast Radius, Velocity)
pub static NUMERICAL_STATS: Lazy<HashSet<StatHash>> = Lazy::new(|| {
    [4284893193, 3871231066, 2961396640, 447667954, 3614673599, 2523465841]
        .into_iter()
        .map(StatHash)
        .collect()
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatRules {
    pub excluded: HashSet<StatHash>,
    pub numerical: HashSet<StatHash>,
}

impl Default for StatRules {
    fn default() -> Self {
        Self {
            excluded: STAT_BLACKLIST.clone(),
            numerical: NUMERICAL_STATS.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatEntry {
    pub stat_hash: StatHash,
    pub value: i32,
}

/// Displayable stats of an item, numerical stats first.
///
/// `None` when a table is not loaded, the item is unknown, it has no stats, or
/// nothing survives the filter.
pub fn resolve_stats(
    item_hash: ItemHash,
    item_defs: Option<&ItemDefs>,
    stat_defs: Option<&StatDefs>,
    rules: &StatRules,
) -> Option<Vec<StatEntry>> {
    let (item_defs, stat_defs) = (item_defs?, stat_defs?);
    let item = item_defs.get(&item_hash)?;

    let mut stats: Vec<StatEntry> = item
        .raw_stats()
        .filter(|stat| {
            stat_defs
                .get(&stat.stat_hash)
                .is_some_and(|def| def.is_displayable())
                && !rules.excluded.contains(&stat.stat_hash)
        })
        .map(|stat| StatEntry {
            stat_hash: stat.stat_hash,
            value: stat.value,
        })
        .collect();

    // Stable: only moves numerical stats to the front, relative order is kept
    stats.sort_by_key(|stat| !rules.numerical.contains(&stat.stat_hash));

    if stats.is_empty() { None } else { Some(stats) }
}
