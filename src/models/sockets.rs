use crate::models::types::{ItemHash, ObjectiveHash};
use serde::{Deserialize, Serialize};

/// One socket on an item instance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Socket {
    /// Candidate plugs that may be (re)inserted. `None` means the socket
    /// reports no reusable plugs at all, which is not the same as `Some(vec![])`.
    #[serde(default)]
    pub reusable_plugs: Option<Vec<Plug>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plug {
    pub plug_item_hash: ItemHash,

    #[serde(default)]
    pub can_insert: bool,

    #[serde(default)]
    pub plug_objectives: Option<Vec<ObjectiveProgress>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectiveProgress {
    pub objective_hash: ObjectiveHash,

    #[serde(default)]
    pub progress: Option<u32>,

    #[serde(default)]
    pub completion_value: u32,

    #[serde(default)]
    pub complete: bool,
}

impl ObjectiveProgress {
    pub fn fraction(&self) -> (u32, u32) {
        (self.progress.unwrap_or(0), self.completion_value)
    }
}
