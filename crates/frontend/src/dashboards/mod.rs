pub mod d410_ads_reports;

pub use d410_ads_reports::ui::ReportsDashboard;
