//! Ads report builder: chip-based breakdown selection, metric pills and a
//! comparison table/chart over the reports API.

pub mod api;
pub mod chart;
pub mod error;
pub mod fetch_control;
pub mod format;
pub mod report_state;
pub mod session;
pub mod table_data;
pub mod ui;
