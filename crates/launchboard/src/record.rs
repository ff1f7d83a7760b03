//! Core record and selection types.
//!
//! A [`LaunchRecord`] is one row of the launch dataset. [`SiteSelection`] and
//! [`PayloadRange`] are the two control values that drive chart
//! recomputation.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Wire value of the "all sites" sentinel.
pub const ALL_SITES: &str = "ALL";

/// Outcome class of a launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Outcome {
    /// Class 0.
    Failure,
    /// Class 1.
    Success,
}

impl Outcome {
    /// Numeric class value as stored in the dataset.
    #[must_use]
    pub fn class(self) -> u8 {
        match self {
            Self::Failure => 0,
            Self::Success => 1,
        }
    }

    /// Whether this outcome counts as a success.
    #[must_use]
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl From<Outcome> for u8 {
    fn from(outcome: Outcome) -> Self {
        outcome.class()
    }
}

impl TryFrom<u8> for Outcome {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Failure),
            1 => Ok(Self::Success),
            other => Err(format!("class must be 0 or 1, got {other}")),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.class())
    }
}

/// A single launch event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchRecord {
    /// Launch site name.
    pub launch_site: String,
    /// Payload mass in kilograms.
    pub payload_mass_kg: f64,
    /// Booster version identifier.
    pub booster_version: String,
    /// Landing outcome class.
    pub outcome: Outcome,
}

impl LaunchRecord {
    /// Create a new record.
    #[must_use]
    pub fn new(
        launch_site: impl Into<String>,
        payload_mass_kg: f64,
        booster_version: impl Into<String>,
        outcome: Outcome,
    ) -> Self {
        Self {
            launch_site: launch_site.into(),
            payload_mass_kg,
            booster_version: booster_version.into(),
            outcome,
        }
    }

    /// Whether this record was launched from the given site selection.
    #[must_use]
    pub fn matches_site(&self, site: &SiteSelection) -> bool {
        match site {
            SiteSelection::All => true,
            SiteSelection::Site(name) => self.launch_site == *name,
        }
    }
}

/// The site control value: either every site or one named site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SiteSelection {
    /// No site filter.
    #[default]
    All,
    /// Restrict to one launch site.
    Site(String),
}

impl SiteSelection {
    /// Selection for a specific site.
    #[must_use]
    pub fn site(name: impl Into<String>) -> Self {
        Self::Site(name.into())
    }

    /// The selected site name, or `None` for all sites.
    #[must_use]
    pub fn site_name(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Site(name) => Some(name),
        }
    }

    /// Whether this is the "all sites" sentinel.
    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl From<&str> for SiteSelection {
    fn from(value: &str) -> Self {
        if value == ALL_SITES {
            Self::All
        } else {
            Self::Site(value.to_string())
        }
    }
}

impl From<String> for SiteSelection {
    fn from(value: String) -> Self {
        if value == ALL_SITES {
            Self::All
        } else {
            Self::Site(value)
        }
    }
}

impl From<SiteSelection> for String {
    fn from(selection: SiteSelection) -> Self {
        match selection {
            SiteSelection::All => ALL_SITES.to_string(),
            SiteSelection::Site(name) => name,
        }
    }
}

impl FromStr for SiteSelection {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_SITES),
            Self::Site(name) => f.write_str(name),
        }
    }
}

/// Inclusive payload mass interval in kilograms.
///
/// An interval with `low > high` is valid to construct and simply matches
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayloadRange {
    /// Lower bound (inclusive).
    pub low: f64,
    /// Upper bound (inclusive).
    pub high: f64,
}

impl PayloadRange {
    /// Create a new interval.
    #[must_use]
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Check whether a payload mass falls inside the interval.
    #[must_use]
    pub fn contains(&self, payload_mass_kg: f64) -> bool {
        self.low <= payload_mass_kg && payload_mass_kg <= self.high
    }

    /// Whether no value can fall inside the interval.
    #[must_use]
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn is_empty(&self) -> bool {
        // NaN bounds fail this comparison too
        !(self.low <= self.high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_try_from() {
        assert_eq!(Outcome::try_from(0).unwrap(), Outcome::Failure);
        assert_eq!(Outcome::try_from(1).unwrap(), Outcome::Success);
        let err = Outcome::try_from(2).unwrap_err();
        assert!(err.contains("got 2"));
    }

    #[test]
    fn test_outcome_display_and_order() {
        assert_eq!(Outcome::Success.to_string(), "1");
        assert_eq!(Outcome::Failure.to_string(), "0");
        assert!(Outcome::Failure < Outcome::Success);
        assert!(Outcome::Success.is_success());
    }

    #[test]
    fn test_outcome_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&Outcome::Success).unwrap(), "1");
        let parsed: Outcome = serde_json::from_str("0").unwrap();
        assert_eq!(parsed, Outcome::Failure);
        assert!(serde_json::from_str::<Outcome>("5").is_err());
    }

    #[test]
    fn test_site_selection_sentinel() {
        assert_eq!(SiteSelection::from("ALL"), SiteSelection::All);
        assert_eq!(
            SiteSelection::from("KSC LC-39A"),
            SiteSelection::site("KSC LC-39A")
        );
        // the sentinel is case sensitive
        assert_eq!(SiteSelection::from("all"), SiteSelection::site("all"));
        assert_eq!(SiteSelection::default(), SiteSelection::All);
    }

    #[test]
    fn test_site_selection_display() {
        assert_eq!(SiteSelection::All.to_string(), "ALL");
        assert_eq!(SiteSelection::site("VAFB SLC-4E").to_string(), "VAFB SLC-4E");
    }

    #[test]
    fn test_site_selection_serde() {
        let json = serde_json::to_string(&SiteSelection::All).unwrap();
        assert_eq!(json, "\"ALL\"");
        let parsed: SiteSelection = serde_json::from_str("\"CCAFS LC-40\"").unwrap();
        assert_eq!(parsed.site_name(), Some("CCAFS LC-40"));
    }

    #[test]
    fn test_record_matches_site() {
        let record = LaunchRecord::new("siteA", 500.0, "v1", Outcome::Success);
        assert!(record.matches_site(&SiteSelection::All));
        assert!(record.matches_site(&SiteSelection::site("siteA")));
        assert!(!record.matches_site(&SiteSelection::site("siteB")));
    }

    #[test]
    fn test_payload_range_contains_is_inclusive() {
        let range = PayloadRange::new(500.0, 1500.0);
        assert!(range.contains(500.0));
        assert!(range.contains(1500.0));
        assert!(!range.contains(499.9));
        assert!(!range.contains(1500.1));
    }

    #[test]
    fn test_payload_range_inverted_is_empty() {
        let range = PayloadRange::new(2000.0, 1000.0);
        assert!(range.is_empty());
        assert!(!range.contains(1500.0));
    }

    #[test]
    fn test_payload_range_nan_is_empty() {
        let range = PayloadRange::new(f64::NAN, 1000.0);
        assert!(range.is_empty());
        assert!(!range.contains(10.0));
    }
}
