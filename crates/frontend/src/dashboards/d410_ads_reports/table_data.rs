//! Sorting and totals for the comparison table.
//!
//! Only current-period values are sortable; previous-period figures are display-only.

use std::cmp::Ordering;

use contracts::dashboards::d410_ads_reports::{ComparisonRow, MetricKey, MetricsPeriod};

use crate::shared::list_utils::{compare_numbers, compare_text, Sortable};

pub const NAME_COLUMN: &str = "name";

/// Sort key of breakdown slot `index` (0 = primary)
pub fn slot_column(index: usize) -> String {
    format!("slot{}", index)
}

impl Sortable for ComparisonRow {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        if field == NAME_COLUMN {
            return compare_text(&self.display_name(), &other.display_name());
        }
        if let Some(index) = field.strip_prefix("slot").and_then(|i| i.parse::<usize>().ok()) {
            return compare_text(
                self.slot_value(index).unwrap_or_default(),
                other.slot_value(index).unwrap_or_default(),
            );
        }
        match MetricKey::parse(field) {
            Some(metric) => compare_numbers(self.period1.get(metric), other.period1.get(metric)),
            None => Ordering::Equal,
        }
    }
}

/// Current-period totals; ratios recomputed from the summed figures
pub fn totals(rows: &[ComparisonRow]) -> MetricsPeriod {
    MetricsPeriod::total(rows.iter().map(|r| &r.period1))
}

pub fn previous_totals(rows: &[ComparisonRow]) -> MetricsPeriod {
    MetricsPeriod::total(rows.iter().map(|r| &r.period2))
}

/// Percentage change from `previous` to `current`; `None` without a non-zero base
pub fn change_between(current: Option<f64>, previous: Option<f64>) -> Option<f64> {
    match (current, previous) {
        (Some(c), Some(p)) if p != 0.0 => Some((c - p) / p.abs() * 100.0),
        _ => None,
    }
}

/// Totals are only worth a row when there is more than one row
pub fn show_totals(rows: &[ComparisonRow]) -> bool {
    rows.len() > 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_utils::{sort_list, SortState};

    fn row(id: &str, name: &str, spend: f64, cpc: Option<f64>) -> ComparisonRow {
        ComparisonRow {
            id: id.into(),
            name: name.into(),
            primary_value: Some(name.into()),
            period1: MetricsPeriod {
                spend,
                cpc,
                ..MetricsPeriod::default()
            },
            ..ComparisonRow::default()
        }
    }

    fn ids(rows: &[ComparisonRow]) -> Vec<&str> {
        rows.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_sort_by_metric() {
        let mut rows = vec![row("a", "A", 5.0, None), row("b", "B", 1.0, None), row("c", "C", 3.0, None)];
        sort_list(&mut rows, "spend", true);
        assert_eq!(ids(&rows), vec!["b", "c", "a"]);
        sort_list(&mut rows, "spend", false);
        assert_eq!(ids(&rows), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_sort_nulls_first_ascending() {
        let mut rows = vec![
            row("a", "A", 0.0, Some(2.0)),
            row("b", "B", 0.0, None),
            row("c", "C", 0.0, Some(1.0)),
        ];
        sort_list(&mut rows, "cpc", true);
        assert_eq!(ids(&rows), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_sort_by_name_is_case_insensitive() {
        let mut rows = vec![row("1", "beta", 0.0, None), row("2", "Alpha", 0.0, None), row("3", "gamma", 0.0, None)];
        sort_list(&mut rows, NAME_COLUMN, true);
        assert_eq!(ids(&rows), vec!["2", "1", "3"]);
    }

    #[test]
    fn test_sort_by_secondary_slot() {
        let mut a = row("a", "X", 0.0, None);
        a.secondary_value = Some("2024-01-02".into());
        let mut b = row("b", "X", 0.0, None);
        b.secondary_value = Some("2024-01-01".into());
        let mut rows = vec![a, b];
        sort_list(&mut rows, &slot_column(1), true);
        assert_eq!(ids(&rows), vec!["b", "a"]);
    }

    #[test]
    fn test_header_clicks_toggle_direction() {
        let mut rows = vec![row("a", "A", 1.0, None), row("b", "B", 2.0, None)];
        let mut sort = SortState::default();

        sort.toggle("spend");
        sort.apply(&mut rows);
        assert_eq!(ids(&rows), vec!["a", "b"]);

        sort.toggle("spend");
        sort.apply(&mut rows);
        assert_eq!(ids(&rows), vec!["b", "a"]);
    }

    #[test]
    fn test_unknown_column_keeps_order() {
        let mut rows = vec![row("b", "B", 2.0, None), row("a", "A", 1.0, None)];
        sort_list(&mut rows, "unknown", true);
        assert_eq!(ids(&rows), vec!["b", "a"]);
    }

    #[test]
    fn test_totals_recompute_ratios() {
        let mut a = row("a", "A", 10.0, Some(99.0));
        a.period1.clicks = 4.0;
        a.period1.impressions = 100.0;
        let mut b = row("b", "B", 30.0, Some(99.0));
        b.period1.clicks = 16.0;
        b.period1.impressions = 300.0;
        let rows = vec![a, b];

        let total = totals(&rows);
        assert_eq!(total.spend, 40.0);
        assert_eq!(total.clicks, 20.0);
        assert_eq!(total.cpc, Some(2.0));
        assert_eq!(total.ctr, Some(5.0));
        assert_eq!(total.cpa, None);
        assert!(show_totals(&rows));
        assert!(!show_totals(&rows[..1]));
    }

    #[test]
    fn test_previous_totals_of_uncompared_rows_are_zero() {
        let rows = vec![row("a", "A", 10.0, None)];
        let previous = previous_totals(&rows);
        assert_eq!(previous.spend, 0.0);
        assert_eq!(previous.cpc, None);
    }

    #[test]
    fn test_change_between() {
        assert_eq!(change_between(Some(150.0), Some(100.0)), Some(50.0));
        assert_eq!(change_between(Some(50.0), Some(100.0)), Some(-50.0));
        assert_eq!(change_between(Some(5.0), Some(0.0)), None);
        assert_eq!(change_between(None, Some(1.0)), None);
    }
}
