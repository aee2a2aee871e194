mod catalyst;
mod extra_info;
mod instances;
mod live_inventory;
mod merge;
mod objectives;
mod ownership;
mod sets;
mod stats;

pub use catalyst::{CatalystInfo, CatalystStatus, resolve_catalyst};
pub use extra_info::item_extra_info;
pub use instances::aggregate_instances;
pub use live_inventory::{inventory_from_profile, kiosk_unlocks};
pub use merge::merge_inventory;
pub use objectives::{ObjectiveProgressMap, objectives_from_profile};
pub use ownership::{Classification, classify_candidates};
pub use sets::{SetItemDefs, SetSection, selected_item_defs};
pub use stats::{NUMERICAL_STATS, STAT_BLACKLIST, StatEntry, StatRules, resolve_stats};
