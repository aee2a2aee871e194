use crate::models::definitions::ItemDefs;
use crate::models::inventory::{InstancesByItem, ItemInstance};
use crate::models::sockets::{ObjectiveProgress, Plug, Socket};
use crate::models::types::ItemHash;
use serde::Serialize;

/// Catalyst progression of an item. Variants are declared in priority order;
/// the derived `Ord` is what the fold maximises over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalystStatus {
    NoData,
    NoCatalyst,
    Inactive,
    ActiveInProgress,
    ActiveComplete,
    MasterworkUpgraded,
}

impl CatalystStatus {
    pub fn label(&self) -> &'static str {
        match self {
            CatalystStatus::NoData => "no data",
            CatalystStatus::NoCatalyst => "no catalyst",
            CatalystStatus::Inactive => "catalyst not unlocked",
            CatalystStatus::ActiveInProgress => "catalyst in progress",
            CatalystStatus::ActiveComplete => "catalyst complete",
            CatalystStatus::MasterworkUpgraded => "masterworked",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalystInfo {
    pub status: CatalystStatus,
    /// Objectives of the last in-progress catalyst plug seen, if any
    pub objectives: Option<Vec<ObjectiveProgress>>,
}

/// Resolve the catalyst status of `item_hash` from the sockets of its owned instances.
///
/// Returns `None` when item definitions are not loaded or the item is unknown;
/// callers must not confuse that with [`CatalystStatus::NoData`], which means the
/// item is known but none of its instances carry socket data.
pub fn resolve_catalyst(
    item_hash: ItemHash,
    instances: &InstancesByItem,
    item_defs: Option<&ItemDefs>,
) -> Option<CatalystInfo> {
    let item_defs = item_defs?;
    item_defs.get(&item_hash)?;

    let mut fold = CatalystFold::default();
    for instance in instances.get(&item_hash).into_iter().flatten() {
        fold.instance(instance, item_defs);
    }

    if let Some(objectives) = &fold.objectives {
        tracing::trace!(%item_hash, count = objectives.len(), "catalyst objectives");
    }

    Some(fold.finish())
}

/// Running state of the catalyst fold. Status only ever goes up.
#[derive(Debug)]
struct CatalystFold {
    status: CatalystStatus,
    objectives: Option<Vec<ObjectiveProgress>>,
}

impl Default for CatalystFold {
    fn default() -> Self {
        Self {
            status: CatalystStatus::NoData,
            objectives: None,
        }
    }
}

impl CatalystFold {
    fn raise(&mut self, status: CatalystStatus) {
        self.status = self.status.max(status);
    }

    fn instance(&mut self, instance: &ItemInstance, item_defs: &ItemDefs) {
        let Some(sockets) = &instance.sockets else {
            return;
        };

        for socket in sockets {
            self.socket(socket, item_defs);
        }
    }

    fn socket(&mut self, socket: &Socket, item_defs: &ItemDefs) {
        // A socket without a candidate list says nothing; an empty list still counts
        let Some(reusable_plugs) = &socket.reusable_plugs else {
            return;
        };

        self.raise(CatalystStatus::NoCatalyst);

        for plug in reusable_plugs {
            self.plug(plug, item_defs);
        }
    }

    fn plug(&mut self, plug: &Plug, item_defs: &ItemDefs) {
        let Some(plug_def) = item_defs.get(&plug.plug_item_hash).and_then(|def| def.plug.as_ref()) else {
            tracing::debug!(plug = %plug.plug_item_hash, "reusable plug without plug definition");
            return;
        };

        if !plug_def.is_masterwork_interactable() {
            return;
        }

        if plug_def.insertion_rules.is_empty() {
            self.raise(CatalystStatus::Inactive);
            return;
        }

        self.raise(if plug.can_insert {
            CatalystStatus::ActiveComplete
        } else {
            CatalystStatus::ActiveInProgress
        });

        // Last one wins, objectives are not accumulated across plugs
        if let Some(objectives) = &plug.plug_objectives {
            self.objectives = Some(objectives.clone());
        }
    }

    fn finish(self) -> CatalystInfo {
        CatalystInfo {
            status: self.status,
            objectives: self.objectives,
        }
    }
}
