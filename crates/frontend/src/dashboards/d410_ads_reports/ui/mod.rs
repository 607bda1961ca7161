pub mod comparison_chart;
pub mod comparison_table;
pub mod dashboard;
pub mod filter_panel;
pub mod metric_pills;

pub use dashboard::ReportsDashboard;
