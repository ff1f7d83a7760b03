//! The in-memory launch dataset.
//!
//! The dataset is read once at startup from a CSV file and never mutated
//! afterwards. It is shared read-only by every chart request.

use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::record::{LaunchRecord, Outcome, PayloadRange, SiteSelection};

/// Header of the launch site column.
pub const COLUMN_LAUNCH_SITE: &str = "Launch Site";

/// Header of the payload mass column.
pub const COLUMN_PAYLOAD_MASS: &str = "Payload Mass (kg)";

/// Header of the booster version column.
pub const COLUMN_BOOSTER_VERSION: &str = "Booster Version";

/// Header of the outcome class column.
pub const COLUMN_CLASS: &str = "class";

const REQUIRED_COLUMNS: [&str; 4] = [
    COLUMN_LAUNCH_SITE,
    COLUMN_PAYLOAD_MASS,
    COLUMN_BOOSTER_VERSION,
    COLUMN_CLASS,
];

/// Origin reported for datasets built from in-memory records.
const IN_MEMORY_ORIGIN: &str = "<memory>";

/// One CSV row as it appears on disk. Extra columns are ignored.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Launch Site")]
    launch_site: String,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "Booster Version")]
    booster_version: String,
    #[serde(rename = "class")]
    class: u8,
}

impl TryFrom<RawRecord> for LaunchRecord {
    type Error = String;

    fn try_from(raw: RawRecord) -> std::result::Result<Self, Self::Error> {
        let outcome = Outcome::try_from(raw.class)?;
        let record = LaunchRecord::new(
            raw.launch_site,
            raw.payload_mass_kg,
            raw.booster_version,
            outcome,
        );
        validate_record(&record)?;
        Ok(record)
    }
}

fn validate_record(record: &LaunchRecord) -> std::result::Result<(), String> {
    if record.launch_site.is_empty() {
        return Err("launch site must not be empty".to_string());
    }
    if !record.payload_mass_kg.is_finite() || record.payload_mass_kg < 0.0 {
        return Err(format!(
            "payload mass must be a non-negative number, got {}",
            record.payload_mass_kg
        ));
    }
    Ok(())
}

/// The full, immutable set of launch records.
#[derive(Debug, Clone)]
pub struct Dataset {
    origin: PathBuf,
    records: Vec<LaunchRecord>,
    sites: Vec<String>,
    payload_bounds: PayloadRange,
}

impl Dataset {
    /// Load the dataset from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, a required column is
    /// missing, any row is malformed, or the file holds no records.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Reading dataset from {}", path.display());

        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|source| Error::DatasetOpen {
                path: path.to_path_buf(),
                source,
            })?;

        let dataset = Self::from_csv(reader, path)?;
        info!(
            records = dataset.len(),
            sites = dataset.sites.len(),
            "Loaded dataset from {}",
            path.display()
        );
        Ok(dataset)
    }

    /// Parse a dataset from any CSV source.
    ///
    /// `origin` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Dataset::load`].
    pub fn from_reader<R: Read>(reader: R, origin: impl AsRef<Path>) -> Result<Self> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        Self::from_csv(reader, origin.as_ref())
    }

    /// Build a dataset from records already in memory.
    ///
    /// # Errors
    ///
    /// Returns an error if `records` is empty or any record has an empty site
    /// or an invalid payload mass.
    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self> {
        let origin = PathBuf::from(IN_MEMORY_ORIGIN);
        for (index, record) in records.iter().enumerate() {
            validate_record(record)
                .map_err(|message| Error::dataset_row(&origin, index as u64 + 1, message))?;
        }
        Self::build(records, origin)
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>, origin: &Path) -> Result<Self> {
        let headers = reader
            .headers()
            .map_err(|source| Error::DatasetOpen {
                path: origin.to_path_buf(),
                source,
            })?
            .clone();

        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|header| header == column) {
                return Err(Error::DatasetMissingColumn {
                    path: origin.to_path_buf(),
                    column,
                });
            }
        }

        let mut records = Vec::new();
        for (index, row) in reader.deserialize::<RawRecord>().enumerate() {
            let row_number = index as u64 + 1;
            let raw = row.map_err(|err| Error::dataset_row(origin, row_number, err.to_string()))?;
            let record = LaunchRecord::try_from(raw)
                .map_err(|message| Error::dataset_row(origin, row_number, message))?;
            records.push(record);
        }

        Self::build(records, origin.to_path_buf())
    }

    fn build(records: Vec<LaunchRecord>, origin: PathBuf) -> Result<Self> {
        if records.is_empty() {
            return Err(Error::DatasetEmpty { path: origin });
        }

        let mut sites: Vec<String> = Vec::new();
        let mut low = f64::INFINITY;
        let mut high = f64::NEG_INFINITY;
        for record in &records {
            if !sites.contains(&record.launch_site) {
                sites.push(record.launch_site.clone());
            }
            low = low.min(record.payload_mass_kg);
            high = high.max(record.payload_mass_kg);
        }

        Ok(Self {
            origin,
            records,
            sites,
            payload_bounds: PayloadRange::new(low, high),
        })
    }

    /// Where this dataset was loaded from.
    #[must_use]
    pub fn origin(&self) -> &Path {
        &self.origin
    }

    /// All records in file order.
    #[must_use]
    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    /// Distinct launch sites in order of first appearance.
    #[must_use]
    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    /// Check whether a site appears in the dataset.
    #[must_use]
    pub fn has_site(&self, site: &str) -> bool {
        self.sites.iter().any(|known| known == site)
    }

    /// Observed minimum and maximum payload mass.
    #[must_use]
    pub fn payload_bounds(&self) -> PayloadRange {
        self.payload_bounds
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false: an empty dataset cannot be constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Total number of successful launches across all sites.
    #[must_use]
    pub fn total_successes(&self) -> u64 {
        self.records
            .iter()
            .map(|record| u64::from(record.outcome.class()))
            .sum()
    }

    /// Per-site launch statistics.
    #[must_use]
    pub fn summary(&self) -> DatasetSummary {
        let sites = self
            .sites
            .iter()
            .map(|site| {
                let selection = SiteSelection::site(site.as_str());
                let (launches, successes) = self
                    .records
                    .iter()
                    .filter(|record| record.matches_site(&selection))
                    .fold((0_u64, 0_u64), |(launches, successes), record| {
                        (launches + 1, successes + u64::from(record.outcome.class()))
                    });
                SiteSummary {
                    site: site.clone(),
                    launches,
                    successes,
                    success_rate: successes as f64 / launches as f64,
                }
            })
            .collect();

        DatasetSummary {
            records: self.records.len(),
            successes: self.total_successes(),
            payload_min: self.payload_bounds.low,
            payload_max: self.payload_bounds.high,
            sites,
        }
    }
}

/// Aggregate statistics over the whole dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    /// Number of records.
    pub records: usize,
    /// Number of successful launches.
    pub successes: u64,
    /// Smallest payload mass in kg.
    pub payload_min: f64,
    /// Largest payload mass in kg.
    pub payload_max: f64,
    /// Per-site breakdown in first-appearance order.
    pub sites: Vec<SiteSummary>,
}

/// Launch statistics for one site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteSummary {
    /// Launch site name.
    pub site: String,
    /// Number of launches from this site.
    pub launches: u64,
    /// Number of successful launches from this site.
    pub successes: u64,
    /// `successes / launches`, in `[0, 1]`.
    pub success_rate: f64,
}
