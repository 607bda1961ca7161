use std::collections::BTreeSet;

use contracts::dashboards::d410_ads_reports::{
    available_metrics, has_conversion_value, retain_available, BreakdownDimension, ComparisonRow,
    DateRange, EntityFilters, EntityLevel, MetricKey, ReportQuery, SelectionState, SlotMode,
};

/// Entity filters shown for a selection: one per entity dimension it contains
pub fn visible_entity_filters(selection: &SelectionState) -> Vec<EntityLevel> {
    selection
        .filled()
        .into_iter()
        .filter_map(BreakdownDimension::entity_level)
        .collect()
}

/// State of one report-builder session.
///
/// Owned by the page; mutated through chip clicks, filter edits and metric toggles.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSession {
    pub selection: SelectionState,
    pub filters: EntityFilters,
    pub metrics: BTreeSet<MetricKey>,
    mode: SlotMode,
    /// Conversion value seen in the last successful load; `None` until one happens
    conversion_value: Option<bool>,
}

impl ReportSession {
    pub fn new(mode: SlotMode) -> Self {
        Self {
            selection: SelectionState::default(),
            filters: EntityFilters::default(),
            metrics: MetricKey::DEFAULT_SELECTION.into_iter().collect(),
            mode,
            conversion_value: None,
        }
    }

    pub fn mode(&self) -> SlotMode {
        self.mode
    }

    pub fn handle_chip_click(&mut self, value: BreakdownDimension) {
        self.selection.handle_chip_click(value, self.mode);
        self.drop_hidden_filters();
    }

    /// Resets breakdowns and entity filters; metrics are kept
    pub fn clear(&mut self) {
        self.selection.clear();
        self.filters.clear();
    }

    pub fn summary(&self) -> String {
        self.selection.summary()
    }

    pub fn visible_filters(&self) -> Vec<EntityLevel> {
        visible_entity_filters(&self.selection)
    }

    /// Ignored for filters not currently shown
    pub fn set_filter(&mut self, level: EntityLevel, text: impl Into<String>) {
        if self.visible_filters().contains(&level) {
            self.filters.set(level, text);
        }
    }

    /// 1-based slot of `value`, if selected
    pub fn position(&self, value: BreakdownDimension) -> Option<usize> {
        if value.is_none() {
            return None;
        }
        self.selection
            .slots()
            .iter()
            .position(|slot| *slot == value)
            .map(|i| i + 1)
    }

    /// Whether clicking `value` would discard the current selection
    pub fn click_replaces(&self, value: BreakdownDimension) -> bool {
        !self.selection.is_empty()
            && !self.selection.contains(value)
            && !self.selection.accepts(value, self.mode)
    }

    /// Whether ROAS can be offered. Unknown before the first load, which counts as yes.
    pub fn has_conversion_value(&self) -> bool {
        self.conversion_value.unwrap_or(true)
    }

    /// Records the rows of a successful load and drops metrics they cannot support.
    ///
    /// Failed loads are never recorded, so an error does not cost the user a metric.
    pub fn record_loaded(&mut self, rows: &[ComparisonRow]) -> bool {
        self.conversion_value = Some(has_conversion_value(rows));
        self.sync_metrics()
    }

    pub fn available_metrics(&self) -> BTreeSet<MetricKey> {
        available_metrics(&self.selection, self.has_conversion_value())
    }

    /// Drops selected metrics that are no longer available. Returns whether any were dropped.
    pub fn sync_metrics(&mut self) -> bool {
        let available = self.available_metrics();
        retain_available(&mut self.metrics, &available)
    }

    /// Whether `sync_metrics` would drop anything
    pub fn has_unavailable_metrics(&self) -> bool {
        let available = self.available_metrics();
        self.metrics.iter().any(|m| !available.contains(m))
    }

    /// Toggles `metric` if it is available
    pub fn toggle_metric(&mut self, metric: MetricKey) {
        if self.metrics.remove(&metric) {
            return;
        }
        if self.available_metrics().contains(&metric) {
            self.metrics.insert(metric);
        }
    }

    pub fn query(&self, date_range: DateRange, account_id: Option<String>) -> ReportQuery {
        ReportQuery {
            date_range,
            selection: self.selection,
            filters: self.filters.clone(),
            account_id,
        }
    }

    fn drop_hidden_filters(&mut self) {
        let visible = self.visible_filters();
        for level in EntityLevel::ALL {
            if !visible.contains(&level) {
                self.filters.set(level, "");
            }
        }
    }
}
