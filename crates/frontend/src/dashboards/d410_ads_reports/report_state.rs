use contracts::dashboards::d410_ads_reports::{BreakdownDimension, ComparisonRow};

use super::api::ReportData;
use super::error::ReportsError;
use super::fetch_control::Settled;

/// What the report page currently shows
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportState {
    pub rows: Vec<ComparisonRow>,
    pub currency: Option<String>,
    pub breakdowns: Vec<BreakdownDimension>,
    pub has_comparison: bool,
    pub loading: bool,
    pub error: Option<ReportsError>,
}

impl ReportState {
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Shows `error` in place of the rows
    pub fn fail(&mut self, error: ReportsError) {
        self.loading = false;
        self.rows.clear();
        self.error = Some(error);
    }

    /// Applies a finished fetch
    pub fn settle(&mut self, settled: Settled<ReportData>) {
        match settled {
            Settled::Commit(data) => {
                self.loading = false;
                self.error = None;
                self.currency = data.currency;
                self.breakdowns = data.breakdowns;
                self.has_comparison = data.has_comparison;
                self.rows = data.rows;
            }
            Settled::Fail(error) => self.fail(error),
            Settled::Idle => self.loading = false,
            Settled::Discard => {}
        }
    }

    /// Error worth a retry button
    pub fn retryable_error(&self) -> bool {
        self.error.as_ref().is_some_and(ReportsError::is_retryable)
    }
}
