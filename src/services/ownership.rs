use crate::models::inventory::Inventory;
use crate::models::types::ItemHash;
use serde::Serialize;

/// Candidate items split into already owned and not yet owned
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub obtained: Vec<ItemHash>,
    pub new: Vec<ItemHash>,
}

impl Classification {
    pub fn has_new_items(&self) -> bool {
        !self.new.is_empty()
    }

    /// New items first, then owned ones
    pub fn new_then_obtained(&self) -> impl Iterator<Item = ItemHash> + '_ {
        self.new.iter().chain(self.obtained.iter()).copied()
    }
}

/// Partition `candidates` against the unified inventory, keeping input order.
///
/// While the inventory has not loaded every candidate counts as new.
pub fn classify_candidates(inventory: Option<&Inventory>, candidates: &[ItemHash]) -> Classification {
    let Some(inventory) = inventory else {
        return Classification {
            obtained: Vec::new(),
            new: candidates.to_vec(),
        };
    };

    let (obtained, new): (Vec<ItemHash>, Vec<ItemHash>) = candidates
        .iter()
        .copied()
        .partition(|hash| inventory.contains_key(hash));

    Classification { obtained, new }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::inventory::InventoryEntry;

    const A: ItemHash = ItemHash(1);
    const B: ItemHash = ItemHash(2);
    const C: ItemHash = ItemHash(3);

    #[test]
    fn partitions_preserving_order() {
        let inventory = Inventory::from([(A, InventoryEntry::obtained(A))]);
        let result = classify_candidates(Some(&inventory), &[A, B, C]);

        assert_eq!(result.obtained, vec![A]);
        assert_eq!(result.new, vec![B, C]);
        assert!(result.has_new_items());
        assert_eq!(result.new_then_obtained().collect::<Vec<_>>(), vec![B, C, A]);
    }

    #[test]
    fn unloaded_inventory_makes_everything_new() {
        let result = classify_candidates(None, &[C, A]);
        assert!(result.obtained.is_empty());
        assert_eq!(result.new, vec![C, A]);
    }

    #[test]
    fn dismantled_entries_count_as_owned() {
        let inventory = Inventory::from([(B, InventoryEntry::dismantled(B))]);
        let result = classify_candidates(Some(&inventory), &[B]);
        assert_eq!(result.obtained, vec![B]);
        assert!(!result.has_new_items());
    }
}
