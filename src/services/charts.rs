use crate::models::ChartData;

pub const NO_DOCUMENTS_TITLE: &str = "No documents processed yet";
pub const NO_PROCESSING_TITLE: &str = "No processing data available";

/// A chart in renderable form. Degenerate inputs become the explicit
/// `NoData` placeholder, never a chart with zero categories or points.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartSeries {
    NoData {
        title: &'static str,
    },
    Distribution {
        labels: Vec<String>,
        values: Vec<u64>,
    },
    TimeSeries {
        x_values: Vec<String>,
        y_values: Vec<f64>,
        x_axis_label: &'static str,
    },
}

/// Rendering collaborator. The adapter never touches presentation itself;
/// the CLI provides a terminal implementation and tests a recording one.
pub trait ChartRenderer {
    fn render_distribution(&mut self, labels: &[String], values: &[u64]);
    fn render_time_series(&mut self, x_values: &[String], y_values: &[f64], x_axis_label: &str);
    fn render_no_data(&mut self, title: &str);
}

/// Document-type counts as a labeled category distribution.
pub fn distribution_series(chart: &ChartData) -> ChartSeries {
    if chart.document_types.is_empty() {
        return ChartSeries::NoData {
            title: NO_DOCUMENTS_TITLE,
        };
    }
    let labels = chart.document_types.keys().cloned().collect();
    let values = chart.document_types.values().copied().collect();
    ChartSeries::Distribution { labels, values }
}

/// Processing times against supplied dates, or a 1-based document index
/// when no dates came back.
pub fn time_series(chart: &ChartData) -> ChartSeries {
    if chart.processing_times.is_empty() {
        return ChartSeries::NoData {
            title: NO_PROCESSING_TITLE,
        };
    }
    let (x_values, x_axis_label) = if chart.dates.is_empty() {
        let indices = (1..=chart.processing_times.len())
            .map(|i| i.to_string())
            .collect();
        (indices, "Document Number")
    } else {
        (chart.dates.clone(), "Date")
    };
    ChartSeries::TimeSeries {
        x_values,
        y_values: chart.processing_times.clone(),
        x_axis_label,
    }
}

pub fn render(series: &ChartSeries, renderer: &mut dyn ChartRenderer) {
    match series {
        ChartSeries::NoData { title } => renderer.render_no_data(title),
        ChartSeries::Distribution { labels, values } => {
            renderer.render_distribution(labels, values)
        }
        ChartSeries::TimeSeries {
            x_values,
            y_values,
            x_axis_label,
        } => renderer.render_time_series(x_values, y_values, x_axis_label),
    }
}
