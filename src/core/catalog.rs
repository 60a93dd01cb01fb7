use std::path::Path;

use indexmap::IndexMap;
use log::{info, warn};
use serde::Serialize;

use crate::error::CatalogError;
use crate::models::{CatalogInput, CatalogRecord, HistoryRecord, MIN_HISTORY_LEN};

type LocationMap = IndexMap<String, Vec<HistoryRecord>>;

/// Read-only `disease -> location -> history` lookup built once at startup.
///
/// Diseases and locations keep the order in which they first appeared in the
/// source file. Every disease has at least one location with a non-empty history.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    diseases: IndexMap<String, LocationMap>,
}

/// One row of the diagnostics listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry<'a> {
    pub disease: &'a str,
    pub location: &'a str,
    pub records: usize,
    pub predictable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub diseases: usize,
    pub locations: usize,
    pub records: usize,
    pub predictable: usize,
}

/// Index flat catalog records by disease and location.
///
/// A duplicate (disease, location) pair overwrites the earlier history.
pub fn build_catalog(records: Vec<CatalogRecord>) -> Result<Catalog, CatalogError> {
    // 1. Reject inputs the shell should show as "no data"
    let first = records.first().ok_or(CatalogError::Empty)?;
    if first.disease.is_none() {
        return Err(CatalogError::MissingDisease);
    }

    // 2. Group, last occurrence wins
    let mut diseases: IndexMap<String, LocationMap> = IndexMap::new();
    for (idx, record) in records.into_iter().enumerate() {
        let (disease, location) = match (record.disease, record.location) {
            (Some(d), Some(l)) => (d, l),
            (d, l) => {
                warn!("Catalog: skipping entry #{} (disease: {:?}, location: {:?})", idx, d, l);
                continue;
            }
        };
        diseases.entry(disease).or_default().insert(location, record.history);
    }

    // 3. Drop empty histories, then diseases left without locations
    for (disease, locations) in diseases.iter_mut() {
        locations.retain(|location, history| {
            if history.is_empty() {
                warn!("Catalog: {} ({}) has no history, dropped", disease, location);
            }
            !history.is_empty()
        });
    }
    diseases.retain(|_, locations| !locations.is_empty());

    let catalog = Catalog { diseases };
    let stats = catalog.stats();
    info!(
        "Catalog indexed: {} diseases, {} locations, {} records ({} predictable)",
        stats.diseases, stats.locations, stats.records, stats.predictable
    );
    Ok(catalog)
}

impl Catalog {
    pub fn from_input(input: CatalogInput) -> Result<Self, CatalogError> {
        build_catalog(input.into_records())
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let input: CatalogInput = serde_json::from_str(raw)?;
        Self::from_input(input)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        info!("Loading catalog from {}", path.display());
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn is_empty(&self) -> bool {
        self.diseases.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diseases.len()
    }

    pub fn diseases(&self) -> impl Iterator<Item = &str> {
        self.diseases.keys().map(String::as_str)
    }

    pub fn contains(&self, disease: &str) -> bool {
        self.diseases.contains_key(disease)
    }

    /// Locations registered for `disease`, in insertion order.
    pub fn locations(&self, disease: &str) -> Option<impl Iterator<Item = &str>> {
        self.diseases
            .get(disease)
            .map(|locations| locations.keys().map(String::as_str))
    }

    pub fn history(&self, disease: &str, location: &str) -> Option<&[HistoryRecord]> {
        self.diseases
            .get(disease)
            .and_then(|locations| locations.get(location))
            .map(Vec::as_slice)
    }

    pub fn entries(&self) -> impl Iterator<Item = CatalogEntry<'_>> {
        self.diseases.iter().flat_map(|(disease, locations)| {
            locations.iter().map(move |(location, history)| CatalogEntry {
                disease,
                location,
                records: history.len(),
                predictable: history.len() >= MIN_HISTORY_LEN,
            })
        })
    }

    pub fn stats(&self) -> CatalogStats {
        self.entries().fold(
            CatalogStats {
                diseases: self.len(),
                locations: 0,
                records: 0,
                predictable: 0,
            },
            |mut acc, entry| {
                acc.locations += 1;
                acc.records += entry.records;
                if entry.predictable {
                    acc.predictable += 1;
                }
                acc
            },
        )
    }
}
