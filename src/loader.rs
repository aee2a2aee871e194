//! Reads already downloaded inputs from a data directory.
//!
//! Layout:
//!
//! ```text
//! <data_dir>/profile.json                 profile response (optional)
//! <data_dir>/cloud.json                   cloud ownership record (optional)
//! <data_dir>/manual.{json,yaml,yml}       manual marks (optional)
//! <data_dir>/vendor.json                  rotating vendor stock (optional)
//! <data_dir>/definitions/<locale>/{items,stats,objectives,vendors}.json
//! ```

use crate::error::{AppResult, DomainError, LoadErrorKind};
use crate::models::definitions::{ItemDefs, ObjectiveDefs, StatDefs, VendorDefs};
use crate::models::inventory::OwnershipMarks;
use crate::models::profile::ProfileSnapshot;
use crate::models::types::ItemHash;
use crate::services::SetSection;
use crate::state::store::Store;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

const MANUAL_CANDIDATES: [&str; 3] = ["manual.json", "manual.yaml", "manual.yml"];

/// Everything found on disk for one locale. Missing files stay `None`.
#[derive(Debug, Default)]
pub struct LoadedData {
    pub locale: String,
    pub profile: Option<ProfileSnapshot>,
    pub cloud: Option<OwnershipMarks>,
    pub manual: Option<OwnershipMarks>,
    pub vendor_stock: Option<Vec<ItemHash>>,
    pub items: Option<ItemDefs>,
    pub stats: Option<StatDefs>,
    pub objectives: Option<ObjectiveDefs>,
    pub vendors: Option<VendorDefs>,
}

impl LoadedData {
    /// Publish everything in a single store update
    pub fn apply(self, store: &Store) {
        store.update(|state| {
            let locale = self.locale.as_str();
            if let Some(items) = self.items {
                state.set_item_defs(locale, items);
            }
            if let Some(stats) = self.stats {
                state.set_stat_defs(locale, stats);
            }
            if let Some(objectives) = self.objectives {
                state.set_objective_defs(locale, objectives);
            }
            if let Some(vendors) = self.vendors {
                state.set_vendor_defs(locale, vendors);
            }
            if let Some(profile) = self.profile {
                state.set_profile(profile);
            }
            if self.cloud.is_some() {
                state.set_cloud_inventory(self.cloud);
            }
            if let Some(manual) = self.manual {
                state.set_manual_inventory(manual);
            }
            if let Some(stock) = self.vendor_stock {
                state.set_vendor_stock(stock);
            }
        });
    }
}

pub fn read_data_dir(dir: &Path, locale: &str) -> AppResult<LoadedData> {
    if !dir.is_dir() {
        return Err(DomainError::NotFound(format!("data directory {}", dir.display())));
    }

    let defs_dir = dir.join("definitions").join(locale);
    let data = LoadedData {
        locale: locale.to_string(),
        profile: read_optional(&dir.join("profile.json"))?,
        cloud: read_optional(&dir.join("cloud.json"))?,
        manual: read_manual_marks(dir)?,
        vendor_stock: read_optional(&dir.join("vendor.json"))?,
        items: read_optional(&defs_dir.join("items.json"))?,
        stats: read_optional(&defs_dir.join("stats.json"))?,
        objectives: read_optional(&defs_dir.join("objectives.json"))?,
        vendors: read_optional(&defs_dir.join("vendors.json"))?,
    };

    tracing::info!(
        dir = %dir.display(),
        locale,
        profile = data.profile.is_some(),
        cloud = data.cloud.is_some(),
        manual = data.manual.as_ref().map_or(0, OwnershipMarks::len),
        items = data.items.as_ref().map_or(0, ItemDefs::len),
        "loaded data directory"
    );

    Ok(data)
}

/// Read and publish a data directory in one go
pub fn load_into(store: &Store, dir: &Path, locale: &str) -> AppResult<()> {
    read_data_dir(dir, locale)?.apply(store);
    Ok(())
}

/// Collection set sections, JSON or YAML by extension
pub fn read_sets(path: &Path) -> AppResult<Vec<SetSection>> {
    let text = read_text(path)?;
    parse_by_extension(path, &text)
}

fn read_manual_marks(dir: &Path) -> AppResult<Option<OwnershipMarks>> {
    let Some(path) = MANUAL_CANDIDATES.iter().map(|name| dir.join(name)).find(|p| p.is_file()) else {
        return Ok(None);
    };

    let text = read_text(&path)?;
    parse_by_extension(&path, &text).map(Some)
}

fn read_optional<T: DeserializeOwned>(path: &Path) -> AppResult<Option<T>> {
    if !path.is_file() {
        tracing::debug!(path = %path.display(), "optional input missing");
        return Ok(None);
    }

    let text = read_text(path)?;
    parse_json(path, &text).map(Some)
}

fn read_text(path: &Path) -> AppResult<String> {
    fs::read_to_string(path).map_err(|e| DomainError::load(path, LoadErrorKind::Read(e)))
}

pub fn parse_json<T: DeserializeOwned>(path: &Path, text: &str) -> AppResult<T> {
    serde_json::from_str(text).map_err(|e| DomainError::load(path, LoadErrorKind::Json(e)))
}

pub fn parse_yaml<T: DeserializeOwned>(path: &Path, text: &str) -> AppResult<T> {
    serde_yaml::from_str(text).map_err(|e| DomainError::load(path, LoadErrorKind::Yaml(e)))
}

pub fn parse_by_extension<T: DeserializeOwned>(path: &Path, text: &str) -> AppResult<T> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => parse_json(path, text),
        Some("yaml" | "yml") => parse_yaml(path, text),
        _ => Err(DomainError::load(PathBuf::from(path), LoadErrorKind::UnsupportedFormat)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::types::{StatHash, VendorHash};

    #[test]
    fn manual_marks_from_yaml_and_json() {
        let yaml: OwnershipMarks = parse_by_extension(Path::new("manual.yaml"), "123: true\n456: 1\n").unwrap();
        let json: OwnershipMarks = parse_by_extension(Path::new("manual.json"), r#"{"123": true}"#).unwrap();

        assert_eq!(yaml.len(), 2);
        assert!(yaml.contains(ItemHash(456)));
        assert!(json.contains(ItemHash(123)));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = parse_by_extension::<OwnershipMarks>(Path::new("manual.txt"), "{}").unwrap_err();
        assert!(matches!(
            err,
            DomainError::Load {
                source: LoadErrorKind::UnsupportedFormat,
                ..
            }
        ));
    }

    #[test]
    fn json_errors_carry_the_path() {
        let err = parse_json::<ItemDefs>(Path::new("definitions/en/items.json"), "{").unwrap_err();
        assert!(err.to_string().contains("items.json"));
    }

    #[test]
    fn definition_tables_parse() {
        let items: ItemDefs = parse_json(
            Path::new("items.json"),
            r#"{"10": {"hash": 10, "displayProperties": {"name": "Ace"}, "stats": {"stats": {"4284893193": {"statHash": 4284893193, "value": 140}}}}}"#,
        )
        .unwrap();
        let vendors: VendorDefs = parse_json(
            Path::new("vendors.json"),
            r#"{"5": {"hash": 5, "itemList": [{"itemHash": 10}]}}"#,
        )
        .unwrap();

        assert_eq!(items[&ItemHash(10)].name(), "Ace");
        assert_eq!(items[&ItemHash(10)].raw_stats().next().map(|s| s.stat_hash), Some(StatHash(4284893193)));
        assert_eq!(vendors[&VendorHash(5)].item_list[0].item_hash, ItemHash(10));
    }

    #[test]
    fn apply_publishes_once() {
        let store = Store::default();
        let data = LoadedData {
            locale: "en".into(),
            profile: Some(ProfileSnapshot::default()),
            vendor_stock: Some(vec![ItemHash(1)]),
            vendors: Some(VendorDefs::new()),
            ..LoadedData::default()
        };

        data.apply(&store);

        let state = store.snapshot();
        assert_eq!(store.revision(), 1);
        assert!(state.profile.is_some());
        assert!(state.cloud_inventory.is_none());
        assert_eq!(state.definitions.locale.as_deref(), Some("en"));
        assert_eq!(*state.vendor_stock, vec![ItemHash(1)]);
    }

    #[test]
    fn unreadable_set_file_is_a_read_error() {
        let err = read_sets(Path::new("/nonexistent/sets.json")).unwrap_err();
        assert!(matches!(
            err,
            DomainError::Load {
                source: LoadErrorKind::Read(_),
                ..
            }
        ));
    }

    #[test]
    fn malformed_yaml_is_a_yaml_error() {
        let err = parse_by_extension::<OwnershipMarks>(Path::new("manual.yml"), "[unclosed").unwrap_err();
        assert!(matches!(
            err,
            DomainError::Load {
                source: LoadErrorKind::Yaml(_),
                ..
            }
        ));
    }

    #[test]
    fn missing_dir_is_not_found() {
        let err = read_data_dir(Path::new("/nonexistent/setkeeper-data"), "en").unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }
}
