use crate::models::profile::ProfileSnapshot;
use crate::models::sockets::ObjectiveProgress;
use crate::models::types::ObjectiveHash;
use std::collections::HashMap;

pub type ObjectiveProgressMap = HashMap<ObjectiveHash, ObjectiveProgress>;

/// Progress of every objective reported on the snapshot's item instances.
/// When several instances report the same objective the later record wins.
pub fn objectives_from_profile(profile: &ProfileSnapshot) -> ObjectiveProgressMap {
    profile
        .item_components
        .objectives
        .data
        .values()
        .flat_map(|list| list.objectives.iter())
        .map(|objective| (objective.objective_hash, objective.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::ObjectiveList;
    use crate::models::types::InstanceId;

    fn progress(hash: u32, progress: u32) -> ObjectiveProgress {
        ObjectiveProgress {
            objective_hash: ObjectiveHash(hash),
            progress: Some(progress),
            completion_value: 100,
            complete: progress >= 100,
        }
    }

    #[test]
    fn flattens_instance_objectives() {
        let mut profile = ProfileSnapshot::default();
        profile.item_components.objectives.data.insert(
            InstanceId::from("a"),
            ObjectiveList { objectives: vec![progress(1, 10), progress(2, 100)] },
        );
        profile.item_components.objectives.data.insert(
            InstanceId::from("b"),
            ObjectiveList { objectives: vec![progress(1, 40)] },
        );

        let map = objectives_from_profile(&profile);
        assert_eq!(map.len(), 2);
        assert_eq!(map[&ObjectiveHash(1)].progress, Some(40));
        assert!(map[&ObjectiveHash(2)].complete);
    }

    #[test]
    fn empty_profile_has_no_objectives() {
        assert!(objectives_from_profile(&ProfileSnapshot::default()).is_empty());
    }
}
