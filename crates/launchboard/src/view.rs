//! Dashboard page composition.
//!
//! [`DashboardLayout`] describes every control and chart region of the page.
//! It is built once from the dataset and the control configuration and is
//! served to the browser, which owns the only mutable state: the current
//! site and payload range.

use serde::Serialize;

use crate::config::ControlsConfig;
use crate::dataset::Dataset;
use crate::record::{PayloadRange, ALL_SITES};

/// Page heading.
pub const DASHBOARD_TITLE: &str = "SpaceX Launch Records Dashboard";

/// DOM id of the site dropdown.
pub const SITE_DROPDOWN_ID: &str = "site-dropdown";

/// DOM id of the payload range slider.
pub const PAYLOAD_SLIDER_ID: &str = "payload-slider";

/// DOM id of the proportion chart region.
pub const PIE_CHART_ID: &str = "success-pie-chart";

/// DOM id of the scatter chart region.
pub const SCATTER_CHART_ID: &str = "success-payload-scatter-chart";

/// One entry of the site dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteOption {
    /// Text shown to the user.
    pub label: String,
    /// Value sent back with chart requests.
    pub value: String,
}

/// The site dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dropdown {
    /// DOM id.
    pub id: &'static str,
    /// Options, the "all sites" sentinel first.
    pub options: Vec<SiteOption>,
    /// Initially selected value.
    pub value: String,
    /// Hint shown while nothing is selected.
    pub placeholder: &'static str,
}

/// A labelled tick on the range slider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderMark {
    /// Position in kg.
    pub value: f64,
    /// Text shown under the tick.
    pub label: String,
}

/// The dual-ended payload range slider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeSlider {
    /// DOM id.
    pub id: &'static str,
    /// Left end of the scale in kg.
    pub min: f64,
    /// Right end of the scale in kg.
    pub max: f64,
    /// Step in kg.
    pub step: f64,
    /// Labelled ticks.
    pub marks: Vec<SliderMark>,
    /// Initial selection: the dataset's observed payload range.
    pub value: PayloadRange,
}

/// Identifiers of the two chart regions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartRegions {
    /// Proportion chart region.
    pub pie: &'static str,
    /// Scatter chart region.
    pub scatter: &'static str,
}

/// Full description of the dashboard page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardLayout {
    /// Page heading.
    pub title: &'static str,
    /// Site selector.
    pub site_dropdown: Dropdown,
    /// Payload range selector.
    pub payload_slider: RangeSlider,
    /// Chart regions.
    pub charts: ChartRegions,
}

impl DashboardLayout {
    /// Compose the page for a dataset.
    #[must_use]
    pub fn new(dataset: &Dataset, controls: &ControlsConfig) -> Self {
        let mut options = vec![SiteOption {
            label: "All Sites".to_string(),
            value: ALL_SITES.to_string(),
        }];
        options.extend(dataset.sites().iter().map(|site| SiteOption {
            label: site.clone(),
            value: site.clone(),
        }));

        Self {
            title: DASHBOARD_TITLE,
            site_dropdown: Dropdown {
                id: SITE_DROPDOWN_ID,
                options,
                value: ALL_SITES.to_string(),
                placeholder: "Select a Launch Site here",
            },
            payload_slider: RangeSlider {
                id: PAYLOAD_SLIDER_ID,
                min: controls.slider_min,
                max: controls.slider_max,
                step: controls.slider_step,
                marks: slider_marks(controls),
                value: dataset.payload_bounds(),
            },
            charts: ChartRegions {
                pie: PIE_CHART_ID,
                scatter: SCATTER_CHART_ID,
            },
        }
    }
}

/// Marks every `mark_step` kg from `slider_min` up to and including
/// `slider_max`.
fn slider_marks(controls: &ControlsConfig) -> Vec<SliderMark> {
    let mut marks = Vec::new();
    if !(controls.mark_step > 0.0 && controls.mark_step.is_finite()) {
        return marks;
    }
    let mut index = 0_u32;
    loop {
        let value = controls.slider_min + f64::from(index) * controls.mark_step;
        if value > controls.slider_max {
            break;
        }
        marks.push(SliderMark {
            value,
            label: format!("{value}"),
        });
        index += 1;
    }
    marks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::tests::sample_dataset;

    #[test]
    fn test_site_options_start_with_all_sites() {
        let layout = DashboardLayout::new(&sample_dataset(), &ControlsConfig::default());
        let options = &layout.site_dropdown.options;

        assert_eq!(options.len(), 5);
        assert_eq!(options[0].label, "All Sites");
        assert_eq!(options[0].value, "ALL");
        assert_eq!(options[1].value, "CCAFS LC-40");
        assert_eq!(options[4].value, "CCAFS SLC-40");
        assert_eq!(layout.site_dropdown.value, "ALL");
    }

    #[test]
    fn test_slider_defaults_to_observed_range() {
        let dataset = sample_dataset();
        let layout = DashboardLayout::new(&dataset, &ControlsConfig::default());

        assert_eq!(layout.payload_slider.value, dataset.payload_bounds());
        assert!((layout.payload_slider.max - 10_000.0).abs() < f64::EPSILON);
        assert!((layout.payload_slider.step - 1000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_default_slider_marks() {
        let marks = slider_marks(&ControlsConfig::default());
        let labels: Vec<&str> = marks.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, ["0", "2500", "5000", "7500", "10000"]);
    }

    #[test]
    fn test_slider_marks_stop_before_max() {
        let controls = ControlsConfig {
            slider_min: 0.0,
            slider_max: 6000.0,
            slider_step: 500.0,
            mark_step: 2500.0,
        };
        let values: Vec<f64> = slider_marks(&controls).iter().map(|m| m.value).collect();
        assert_eq!(values, vec![0.0, 2500.0, 5000.0]);
    }

    #[test]
    fn test_slider_marks_invalid_step_yields_none() {
        let controls = ControlsConfig {
            mark_step: 0.0,
            ..ControlsConfig::default()
        };
        assert!(slider_marks(&controls).is_empty());
    }

    #[test]
    fn test_layout_json_shape() {
        let layout = DashboardLayout::new(&sample_dataset(), &ControlsConfig::default());
        let value = serde_json::to_value(&layout).unwrap();

        assert_eq!(value["title"], DASHBOARD_TITLE);
        assert_eq!(value["site_dropdown"]["id"], "site-dropdown");
        assert_eq!(value["payload_slider"]["value"]["low"], 0.0);
        assert_eq!(value["payload_slider"]["value"]["high"], 9600.0);
        assert_eq!(value["charts"]["pie"], "success-pie-chart");
        assert_eq!(value["charts"]["scatter"], "success-payload-scatter-chart");
    }
}
