use serde::{Deserialize, Serialize};

use super::breakdown::BreakdownDimension;
use super::metrics::MetricKey;
use super::query::DateRange;
use super::row::ComparisonRow;

/// Column of an exported sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportColumn {
    pub key: String,
    pub label: String,
}

/// Body of `POST /export/excel-generic` and `POST /export/google-sheets-generic`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRequest {
    pub title: String,
    pub currency: String,
    pub date_range: DateRange,
    pub breakdowns: Vec<BreakdownDimension>,
    pub metrics: Vec<MetricKey>,
    pub columns: Vec<ExportColumn>,
    pub rows: Vec<ComparisonRow>,
}

impl ExportRequest {
    /// Breakdown columns (or a single name column) followed by one column per metric
    pub fn new(
        date_range: DateRange,
        breakdowns: Vec<BreakdownDimension>,
        metrics: Vec<MetricKey>,
        currency: impl Into<String>,
        rows: Vec<ComparisonRow>,
    ) -> Self {
        let mut columns: Vec<ExportColumn> = if breakdowns.is_empty() {
            vec![ExportColumn {
                key: "name".into(),
                label: "Name".into(),
            }]
        } else {
            breakdowns
                .iter()
                .map(|d| ExportColumn {
                    key: d.as_str().into(),
                    label: d.label().into(),
                })
                .collect()
        };
        columns.extend(metrics.iter().map(|m| ExportColumn {
            key: m.as_str().into(),
            label: m.label().into(),
        }));

        let title = if breakdowns.is_empty() {
            format!("Overview {} – {}", date_range.start, date_range.end)
        } else {
            let by = breakdowns
                .iter()
                .map(|d| d.label())
                .collect::<Vec<_>>()
                .join(" × ");
            format!("{by} {} – {}", date_range.start, date_range.end)
        };

        Self {
            title,
            currency: currency.into(),
            date_range,
            breakdowns,
            metrics,
            columns,
            rows,
        }
    }

    /// Download name of the Excel file
    pub fn file_name(&self) -> String {
        format!(
            "ads_report_{}_{}.xlsx",
            self.date_range.start, self.date_range.end
        )
    }
}

/// Response of `POST /export/google-sheets-generic`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetsExportResponse {
    pub url: String,
    #[serde(default)]
    pub spreadsheet_id: Option<String>,
}
