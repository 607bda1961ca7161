pub mod d410_ads_reports;
