use crate::domain::models::expense::{LabeledTotal, MonthlyTotal};
use shared::ChartSeries;

/// Builds the `{labels, data}` pairs the dashboard charts consume
pub struct ChartMapper;

impl ChartMapper {
    pub fn from_labeled(totals: Vec<LabeledTotal>) -> ChartSeries {
        let (labels, data) = totals.into_iter().map(|t| (t.label, t.total)).unzip();
        ChartSeries { labels, data }
    }

    pub fn from_monthly(totals: Vec<MonthlyTotal>) -> ChartSeries {
        ChartSeries {
            labels: totals.iter().map(MonthlyTotal::label).collect(),
            data: totals.iter().map(|t| t.total).collect(),
        }
    }
}
