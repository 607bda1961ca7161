use contracts::dashboards::d410_ads_reports::SlotMode;
use serde::Deserialize;

/// Id of the `<script type="application/toml">` element a host page can inject
const CONFIG_ELEMENT_ID: &str = "dashboard-config";

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub reports: ReportsConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    /// Prefix of every backend path, absolute or relative to the page
    pub base_url: String,
    /// Requests running longer than this are aborted
    pub timeout_ms: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ReportsConfig {
    /// Quiet period before breakdown/filter edits trigger a fetch
    pub debounce_ms: u32,
    pub slot_mode: SlotMode,
    /// Used when a response carries no currency
    pub default_currency: String,
    pub chart_max_bars: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "/api".to_string(),
            timeout_ms: 30_000,
        }
    }
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            slot_mode: SlotMode::Triple,
            default_currency: "USD".to_string(),
            chart_max_bars: 20,
        }
    }
}

/// Default configuration shipped with the bundle
pub const DEFAULT_CONFIG: &str = r#"
[api]
base_url = "/api"
timeout_ms = 30000

[reports]
debounce_ms = 500
slot_mode = "triple"
default_currency = "USD"
chart_max_bars = 20
"#;

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    if config.reports.chart_max_bars == 0 {
        anyhow::bail!("reports.chart_max_bars must be positive");
    }
    Ok(config)
}

/// Load configuration for the session
///
/// Search order:
/// 1. TOML injected by the host page in `<script id="dashboard-config">`
/// 2. Falls back to [`DEFAULT_CONFIG`]
pub fn load_config() -> Config {
    let injected = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content());

    if let Some(contents) = injected {
        match parse_config(&contents) {
            Ok(config) => {
                log::info!("Loaded dashboard config from #{}", CONFIG_ELEMENT_ID);
                return config;
            }
            Err(e) => log::warn!("Ignoring invalid dashboard config: {}", e),
        }
    }

    log::info!("Using default dashboard configuration");
    parse_config(DEFAULT_CONFIG).unwrap_or_else(|e| {
        log::error!("Built-in dashboard config is invalid: {}", e);
        Config::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.api.timeout_ms, 30_000);
        assert_eq!(config.reports.slot_mode, SlotMode::Triple);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = parse_config("[reports]\nslot_mode = \"double\"\n").unwrap();
        assert_eq!(config.reports.slot_mode, SlotMode::Double);
        assert_eq!(config.reports.debounce_ms, 500);
        assert_eq!(config.api.base_url, "/api");
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(parse_config("[reports]\nslot_mode = \"quad\"\n").is_err());
        assert!(parse_config("[reports]\nchart_max_bars = 0\n").is_err());
    }
}
