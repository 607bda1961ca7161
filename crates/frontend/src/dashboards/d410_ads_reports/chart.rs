use std::cmp::Ordering;

use contracts::dashboards::d410_ads_reports::{ComparisonRow, MetricKey};

/// One horizontal bar of the comparison chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    pub id: String,
    pub label: String,
    pub value: f64,
    /// Bar length relative to the largest absolute value, 0..=1
    pub fraction: f64,
}

/// Bars for `metric`, largest first, at most `max_bars`
pub fn chart_bars(rows: &[ComparisonRow], metric: MetricKey, max_bars: usize) -> Vec<ChartBar> {
    let mut bars: Vec<ChartBar> = rows
        .iter()
        .map(|row| ChartBar {
            id: row.id.clone(),
            label: row.display_name(),
            value: row.period1.get(metric).filter(|v| v.is_finite()).unwrap_or(0.0),
            fraction: 0.0,
        })
        .collect();

    bars.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));
    bars.truncate(max_bars);

    let max_abs = bars.iter().map(|b| b.value.abs()).fold(0.0, f64::max);
    if max_abs > 0.0 {
        for bar in &mut bars {
            bar.fraction = bar.value.abs() / max_abs;
        }
    }
    bars
}

/// Metric the chart plots: the first selected one
pub fn chart_metric<'a>(selected: impl IntoIterator<Item = &'a MetricKey>) -> Option<MetricKey> {
    selected.into_iter().next().copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::dashboards::d410_ads_reports::MetricsPeriod;

    fn row(id: &str, clicks: f64) -> ComparisonRow {
        ComparisonRow {
            id: id.into(),
            name: id.to_uppercase(),
            period1: MetricsPeriod {
                clicks,
                ..MetricsPeriod::default()
            },
            ..ComparisonRow::default()
        }
    }

    #[test]
    fn test_bars_sorted_and_scaled() {
        let rows = vec![row("a", 10.0), row("b", 40.0), row("c", 20.0)];
        let bars = chart_bars(&rows, MetricKey::Clicks, 20);

        let labels: Vec<_> = bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["B", "C", "A"]);
        assert_eq!(bars[0].fraction, 1.0);
        assert_eq!(bars[1].fraction, 0.5);
        assert_eq!(bars[2].fraction, 0.25);
    }

    #[test]
    fn test_bars_truncated() {
        let rows: Vec<_> = (0..30).map(|i| row(&format!("r{i}"), i as f64)).collect();
        let bars = chart_bars(&rows, MetricKey::Clicks, 5);
        assert_eq!(bars.len(), 5);
        assert_eq!(bars[0].value, 29.0);
    }

    #[test]
    fn test_null_metric_plots_as_zero() {
        // default ratios are None
        let rows = vec![row("a", 1.0), row("b", 2.0)];
        let bars = chart_bars(&rows, MetricKey::Roas, 20);
        assert!(bars.iter().all(|b| b.value == 0.0 && b.fraction == 0.0));
    }

    #[test]
    fn test_chart_metric_is_first_selected() {
        let selected = [MetricKey::Clicks, MetricKey::Spend];
        assert_eq!(chart_metric(&selected), Some(MetricKey::Clicks));
        assert_eq!(chart_metric(&[] as &[MetricKey]), None);
    }
}
