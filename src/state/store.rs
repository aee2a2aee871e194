use crate::models::definitions::{Definitions, ItemDefs, ObjectiveDefs, StatDefs, VendorDefs};
use crate::models::inventory::OwnershipMarks;
use crate::models::profile::ProfileSnapshot;
use crate::models::types::ItemHash;
use crate::selectors::Shared;
use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Everything the derived views are computed from.
///
/// Each field is a published [`Shared`] value; setters always publish a new one
/// so selectors see the change. Nothing in here is ever edited in place.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Absent until the first profile fetch lands
    pub profile: Option<Shared<ProfileSnapshot>>,
    /// Absent until the cloud record is fetched (or when it is disabled)
    pub cloud_inventory: Option<Shared<OwnershipMarks>>,
    pub manual_inventory: Shared<OwnershipMarks>,
    pub definitions: Definitions,
    /// Current stock of the rotating vendor
    pub vendor_stock: Shared<Vec<ItemHash>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            profile: None,
            cloud_inventory: None,
            manual_inventory: Shared::new(OwnershipMarks::new()),
            definitions: Definitions::default(),
            vendor_stock: Shared::new(Vec::new()),
        }
    }
}

impl AppState {
    pub fn set_profile(&mut self, profile: ProfileSnapshot) {
        self.profile = Some(Shared::new(profile));
    }

    pub fn set_cloud_inventory(&mut self, marks: Option<OwnershipMarks>) {
        self.cloud_inventory = marks.map(Shared::new);
    }

    pub fn set_manual_inventory(&mut self, marks: OwnershipMarks) {
        self.manual_inventory = Shared::new(marks);
    }

    pub fn mark_manually_obtained(&mut self, hash: ItemHash) {
        let marks = self.manual_inventory.with(hash);
        self.set_manual_inventory(marks);
    }

    pub fn unmark_manually_obtained(&mut self, hash: ItemHash) {
        let marks = self.manual_inventory.without(hash);
        self.set_manual_inventory(marks);
    }

    pub fn set_vendor_stock(&mut self, stock: Vec<ItemHash>) {
        self.vendor_stock = Shared::new(stock);
    }

    pub fn set_item_defs(&mut self, locale: &str, defs: ItemDefs) {
        self.switch_locale(locale);
        self.definitions.items = Some(Shared::new(defs));
    }

    pub fn set_stat_defs(&mut self, locale: &str, defs: StatDefs) {
        self.switch_locale(locale);
        self.definitions.stats = Some(Shared::new(defs));
    }

    pub fn set_objective_defs(&mut self, locale: &str, defs: ObjectiveDefs) {
        self.switch_locale(locale);
        self.definitions.objectives = Some(Shared::new(defs));
    }

    pub fn set_vendor_defs(&mut self, locale: &str, defs: VendorDefs) {
        self.switch_locale(locale);
        self.definitions.vendors = Some(Shared::new(defs));
    }

    fn switch_locale(&mut self, locale: &str) {
        let previous = self.definitions.locale.clone();
        if self.definitions.switch_locale(locale) {
            tracing::debug!(?previous, locale, "definition locale changed");
        }
    }
}

/// Process wide state container.
///
/// Readers take an `Arc<AppState>` snapshot and compute everything from it.
/// Writers go through [`Store::update`], which publishes the new state in a
/// single swap, so a reader never sees half of a batch.
pub struct Store {
    state: RwLock<Arc<AppState>>,
    revision: AtomicU64,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}

impl Store {
    pub fn new(state: AppState) -> Self {
        Self {
            state: RwLock::new(Arc::new(state)),
            revision: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> Arc<AppState> {
        self.state.read().clone()
    }

    /// Apply a batch of changes to a draft of the current state and publish it.
    pub fn update<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&mut AppState) -> T,
    {
        let mut guard = self.state.write();
        let mut draft = AppState::clone(&guard);
        let out = f(&mut draft);
        *guard = Arc::new(draft);

        let revision = self.revision.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::debug!(revision, "state published");
        out
    }

    /// Number of published updates
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::Relaxed)
    }
}
