//! Chart aggregates derived from the dataset.
//!
//! Both transformations are pure: they read the dataset and the current
//! control values and return a fresh aggregate. Nothing is cached between
//! calls and no selection is ever an error. A selection that matches nothing
//! produces an empty aggregate.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::dataset::Dataset;
use crate::record::{Outcome, PayloadRange, SiteSelection};

/// Key of one slice of the proportion chart.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum SliceKey {
    /// A launch site (all-sites view).
    Site(String),
    /// An outcome class (single-site view).
    Outcome(Outcome),
}

impl fmt::Display for SliceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Site(site) => f.write_str(site),
            Self::Outcome(outcome) => write!(f, "{outcome}"),
        }
    }
}

/// One category of the proportion chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slice {
    /// Category label.
    pub key: SliceKey,
    /// Successes (all-sites view) or record count (single-site view).
    pub value: u64,
}

/// Data for the success proportion chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProportionAggregate {
    /// The site selection this aggregate was computed for.
    pub site: SiteSelection,
    /// Slices ordered by key.
    pub slices: Vec<Slice>,
}

impl ProportionAggregate {
    /// Sum of all slice values.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.slices.iter().map(|slice| slice.value).sum()
    }

    /// Look up the value for a key, if that key is present.
    #[must_use]
    pub fn value_of(&self, key: &SliceKey) -> Option<u64> {
        self.slices
            .iter()
            .find(|slice| slice.key == *key)
            .map(|slice| slice.value)
    }

    /// Whether the aggregate has no slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

/// Compute the proportion aggregate for a site selection.
///
/// For [`SiteSelection::All`] the result holds one slice per site with the
/// number of successful launches from it, zero included. For a single site
/// it holds one slice per outcome class that occurs at that site, with the
/// number of records of that class. Classes with no records are left out.
#[must_use]
pub fn proportion(dataset: &Dataset, site: &SiteSelection) -> ProportionAggregate {
    let mut groups: BTreeMap<SliceKey, u64> = BTreeMap::new();

    match site {
        SiteSelection::All => {
            for record in dataset.records() {
                *groups
                    .entry(SliceKey::Site(record.launch_site.clone()))
                    .or_default() += u64::from(record.outcome.class());
            }
        }
        SiteSelection::Site(_) => {
            for record in dataset.records().iter().filter(|r| r.matches_site(site)) {
                *groups.entry(SliceKey::Outcome(record.outcome)).or_default() += 1;
            }
        }
    }

    ProportionAggregate {
        site: site.clone(),
        slices: groups
            .into_iter()
            .map(|(key, value)| Slice { key, value })
            .collect(),
    }
}

/// One point of the payload scatter chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    /// Payload mass in kg (x axis).
    pub payload_mass_kg: f64,
    /// Outcome class (y axis).
    pub outcome: Outcome,
    /// Booster version (color).
    pub booster_version: String,
}

/// Data for the payload vs. outcome scatter chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterAggregate {
    /// The site selection this aggregate was computed for.
    pub site: SiteSelection,
    /// The payload interval this aggregate was computed for.
    pub range: PayloadRange,
    /// Matching points in dataset order.
    pub points: Vec<ScatterPoint>,
}

impl ScatterAggregate {
    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether no record matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points grouped by booster version, groups in first-appearance order.
    #[must_use]
    pub fn by_booster(&self) -> Vec<(&str, Vec<&ScatterPoint>)> {
        let mut groups: Vec<(&str, Vec<&ScatterPoint>)> = Vec::new();
        for point in &self.points {
            let version = point.booster_version.as_str();
            match groups.iter_mut().find(|(name, _)| *name == version) {
                Some((_, members)) => members.push(point),
                None => groups.push((version, vec![point])),
            }
        }
        groups
    }
}

/// Compute the scatter aggregate for a site selection and payload interval.
///
/// Keeps every record whose payload mass lies in `range` (inclusive) and, for
/// a specific site, was launched from it.
#[must_use]
pub fn scatter(dataset: &Dataset, site: &SiteSelection, range: PayloadRange) -> ScatterAggregate {
    let points = dataset
        .records()
        .iter()
        .filter(|record| range.contains(record.payload_mass_kg))
        .filter(|record| record.matches_site(site))
        .map(|record| ScatterPoint {
            payload_mass_kg: record.payload_mass_kg,
            outcome: record.outcome,
            booster_version: record.booster_version.clone(),
        })
        .collect();

    ScatterAggregate {
        site: site.clone(),
        range,
        points,
    }
}
