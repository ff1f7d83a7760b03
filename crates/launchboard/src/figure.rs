//! Chart specifications.
//!
//! Aggregates are turned into Plotly-compatible figure JSON
//! (`{"data": [...], "layout": {...}}`) which the dashboard page hands
//! straight to the browser-side renderer.

use serde::Serialize;

use crate::aggregate::{ProportionAggregate, ScatterAggregate};
use crate::record::SiteSelection;

/// X axis title of the scatter chart.
pub const PAYLOAD_AXIS_TITLE: &str = "Payload Mass (kg)";

/// Y axis title of the scatter chart.
pub const OUTCOME_AXIS_TITLE: &str = "Launch Outcome (1=Success, 0=Failure)";

/// Legend title of the scatter chart.
pub const BOOSTER_LEGEND_TITLE: &str = "Booster Version";

/// A complete chart description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    /// Traces in drawing order.
    pub data: Vec<Trace>,
    /// Titles, axes and legend.
    pub layout: Layout,
}

/// One data series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    /// Proportion chart trace.
    Pie {
        /// Slice labels.
        labels: Vec<String>,
        /// Slice values, parallel to `labels`.
        values: Vec<u64>,
    },
    /// Marker scatter trace.
    Scatter {
        /// Series name shown in the legend.
        name: String,
        /// Always `markers`.
        mode: &'static str,
        /// Payload masses.
        x: Vec<f64>,
        /// Outcome classes.
        y: Vec<u8>,
    },
}

/// A text element with a `text` field, as the renderer expects for titles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    /// The title text.
    pub text: String,
}

impl Title {
    fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Axis settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    /// Axis title.
    pub title: Title,
}

/// Legend settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    /// Legend title.
    pub title: Title,
}

/// Figure layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    /// Chart title.
    pub title: Title,
    /// X axis, scatter charts only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    /// Y axis, scatter charts only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    /// Legend, scatter charts only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
}

impl Layout {
    fn titled(text: impl Into<String>) -> Self {
        Self {
            title: Title::new(text),
            xaxis: None,
            yaxis: None,
            legend: None,
        }
    }
}

/// Title of the proportion chart for a site selection.
#[must_use]
pub fn pie_title(site: &SiteSelection) -> String {
    match site {
        SiteSelection::All => "Total Success Launches By Site".to_string(),
        SiteSelection::Site(name) => format!("Total Success Launched for site {name}"),
    }
}

/// Title of the scatter chart for a site selection.
#[must_use]
pub fn scatter_title(site: &SiteSelection) -> String {
    match site {
        SiteSelection::All => "Payload vs. Launch Outcome (All Sites)".to_string(),
        SiteSelection::Site(name) => format!("Payload vs. Launch Outcome for {name}"),
    }
}

impl From<&ProportionAggregate> for Figure {
    fn from(aggregate: &ProportionAggregate) -> Self {
        let (labels, values) = aggregate
            .slices
            .iter()
            .map(|slice| (slice.key.to_string(), slice.value))
            .unzip();

        Self {
            data: vec![Trace::Pie { labels, values }],
            layout: Layout::titled(pie_title(&aggregate.site)),
        }
    }
}

impl From<&ScatterAggregate> for Figure {
    fn from(aggregate: &ScatterAggregate) -> Self {
        let data = aggregate
            .by_booster()
            .into_iter()
            .map(|(version, points)| Trace::Scatter {
                name: version.to_string(),
                mode: "markers",
                x: points.iter().map(|p| p.payload_mass_kg).collect(),
                y: points.iter().map(|p| p.outcome.class()).collect(),
            })
            .collect();

        let mut layout = Layout::titled(scatter_title(&aggregate.site));
        layout.xaxis = Some(Axis {
            title: Title::new(PAYLOAD_AXIS_TITLE),
        });
        layout.yaxis = Some(Axis {
            title: Title::new(OUTCOME_AXIS_TITLE),
        });
        layout.legend = Some(Legend {
            title: Title::new(BOOSTER_LEGEND_TITLE),
        });

        Self { data, layout }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::aggregate::{proportion, scatter};
    use crate::dataset::tests::sample_dataset;
    use crate::record::PayloadRange;

    #[test]
    fn test_pie_titles() {
        assert_eq!(
            pie_title(&SiteSelection::All),
            "Total Success Launches By Site"
        );
        assert_eq!(
            pie_title(&SiteSelection::site("KSC LC-39A")),
            "Total Success Launched for site KSC LC-39A"
        );
    }

    #[test]
    fn test_scatter_titles() {
        assert_eq!(
            scatter_title(&SiteSelection::All),
            "Payload vs. Launch Outcome (All Sites)"
        );
        assert_eq!(
            scatter_title(&SiteSelection::site("VAFB SLC-4E")),
            "Payload vs. Launch Outcome for VAFB SLC-4E"
        );
    }

    #[test]
    fn test_pie_figure_json() {
        let aggregate = proportion(&sample_dataset(), &SiteSelection::site("CCAFS LC-40"));
        let value = serde_json::to_value(Figure::from(&aggregate)).unwrap();

        assert_eq!(
            value,
            json!({
                "data": [{"type": "pie", "labels": ["0", "1"], "values": [2, 1]}],
                "layout": {"title": {"text": "Total Success Launched for site CCAFS LC-40"}}
            })
        );
    }

    #[test]
    fn test_pie_figure_all_sites_labels() {
        let aggregate = proportion(&sample_dataset(), &SiteSelection::All);
        let figure = Figure::from(&aggregate);

        match &figure.data[0] {
            Trace::Pie { labels, values } => {
                assert_eq!(labels.len(), 4);
                assert!(labels.contains(&"VAFB SLC-4E".to_string()));
                assert_eq!(values.iter().sum::<u64>(), 4);
            }
            Trace::Scatter { .. } => panic!("expected a pie trace"),
        }
    }

    #[test]
    fn test_scatter_figure_one_trace_per_booster() {
        let dataset = sample_dataset();
        let aggregate = scatter(&dataset, &SiteSelection::All, dataset.payload_bounds());
        let figure = Figure::from(&aggregate);

        // every booster version in the sample is distinct
        assert_eq!(figure.data.len(), 7);
        let layout = serde_json::to_value(&figure.layout).unwrap();
        assert_eq!(layout["xaxis"]["title"]["text"], PAYLOAD_AXIS_TITLE);
        assert_eq!(layout["yaxis"]["title"]["text"], OUTCOME_AXIS_TITLE);
        assert_eq!(layout["legend"]["title"]["text"], BOOSTER_LEGEND_TITLE);
    }

    #[test]
    fn test_scatter_trace_json() {
        let dataset = sample_dataset();
        let aggregate = scatter(
            &dataset,
            &SiteSelection::site("KSC LC-39A"),
            PayloadRange::new(0.0, 3000.0),
        );
        let value = serde_json::to_value(Figure::from(&aggregate)).unwrap();

        assert_eq!(
            value["data"],
            json!([{
                "type": "scatter",
                "name": "F9 FT B1031.1",
                "mode": "markers",
                "x": [2490.0],
                "y": [1]
            }])
        );
    }

    #[test]
    fn test_empty_scatter_still_has_layout() {
        let dataset = sample_dataset();
        let aggregate = scatter(&dataset, &SiteSelection::All, PayloadRange::new(5.0, 1.0));
        let figure = Figure::from(&aggregate);

        assert!(figure.data.is_empty());
        assert_eq!(
            figure.layout.title.text,
            "Payload vs. Launch Outcome (All Sites)"
        );
    }
}
