pub mod api_utils;
pub mod components;
pub mod config;
pub mod export;
pub mod icons;
pub mod list_utils;
