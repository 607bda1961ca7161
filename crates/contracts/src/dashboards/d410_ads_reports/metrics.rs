use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Performance metric available in reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKey {
    Spend,
    Impressions,
    Clicks,
    Ctr,
    Cpc,
    Cpm,
    Conversions,
    ConversionValue,
    Roas,
    Cpa,
    ConversionRate,
}

/// How a metric value is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Money,
    Percent,
    Ratio,
    Count,
}

impl MetricKey {
    pub const ALL: [MetricKey; 11] = [
        Self::Spend,
        Self::Impressions,
        Self::Clicks,
        Self::Ctr,
        Self::Cpc,
        Self::Cpm,
        Self::Conversions,
        Self::ConversionValue,
        Self::Roas,
        Self::Cpa,
        Self::ConversionRate,
    ];

    /// Metrics the special breakdown sources cannot provide
    pub const CONVERSION_METRICS: [MetricKey; 5] = [
        Self::Conversions,
        Self::ConversionValue,
        Self::Roas,
        Self::Cpa,
        Self::ConversionRate,
    ];

    /// Selected when a report session starts
    pub const DEFAULT_SELECTION: [MetricKey; 5] = [
        Self::Spend,
        Self::Impressions,
        Self::Clicks,
        Self::Ctr,
        Self::Cpc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Spend => "spend",
            Self::Impressions => "impressions",
            Self::Clicks => "clicks",
            Self::Ctr => "ctr",
            Self::Cpc => "cpc",
            Self::Cpm => "cpm",
            Self::Conversions => "conversions",
            Self::ConversionValue => "conversion_value",
            Self::Roas => "roas",
            Self::Cpa => "cpa",
            Self::ConversionRate => "conversion_rate",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == value)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Spend => "Spend",
            Self::Impressions => "Impressions",
            Self::Clicks => "Clicks",
            Self::Ctr => "CTR",
            Self::Cpc => "CPC",
            Self::Cpm => "CPM",
            Self::Conversions => "Conversions",
            Self::ConversionValue => "Conversion Value",
            Self::Roas => "ROAS",
            Self::Cpa => "CPA",
            Self::ConversionRate => "Conv. Rate",
        }
    }

    pub fn kind(self) -> MetricKind {
        match self {
            Self::Spend | Self::Cpc | Self::Cpm | Self::Cpa | Self::ConversionValue => {
                MetricKind::Money
            }
            Self::Ctr | Self::ConversionRate => MetricKind::Percent,
            Self::Roas => MetricKind::Ratio,
            Self::Impressions | Self::Clicks | Self::Conversions => MetricKind::Count,
        }
    }

    /// Cost metrics improve when they go down
    pub fn lower_is_better(self) -> bool {
        matches!(self, Self::Cpc | Self::Cpa | Self::Cpm)
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregated performance of one row for one period.
///
/// Additive figures default to 0 when missing; ratios are `None` when undefined.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsPeriod {
    #[serde(deserialize_with = "lenient_f64")]
    pub spend: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub impressions: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub clicks: f64,
    #[serde(deserialize_with = "lenient_opt_f64")]
    pub ctr: Option<f64>,
    #[serde(deserialize_with = "lenient_opt_f64")]
    pub cpc: Option<f64>,
    #[serde(deserialize_with = "lenient_opt_f64")]
    pub cpm: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub conversions: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub conversion_value: f64,
    #[serde(deserialize_with = "lenient_opt_f64")]
    pub roas: Option<f64>,
    #[serde(deserialize_with = "lenient_opt_f64")]
    pub cpa: Option<f64>,
    #[serde(deserialize_with = "lenient_opt_f64")]
    pub conversion_rate: Option<f64>,
}

impl MetricsPeriod {
    /// All-zero period used where no comparison data exists
    pub fn zeroed() -> Self {
        Self {
            ctr: Some(0.0),
            cpc: Some(0.0),
            cpm: Some(0.0),
            roas: Some(0.0),
            cpa: Some(0.0),
            conversion_rate: Some(0.0),
            ..Self::default()
        }
    }

    pub fn get(&self, key: MetricKey) -> Option<f64> {
        match key {
            MetricKey::Spend => Some(self.spend),
            MetricKey::Impressions => Some(self.impressions),
            MetricKey::Clicks => Some(self.clicks),
            MetricKey::Ctr => self.ctr,
            MetricKey::Cpc => self.cpc,
            MetricKey::Cpm => self.cpm,
            MetricKey::Conversions => Some(self.conversions),
            MetricKey::ConversionValue => Some(self.conversion_value),
            MetricKey::Roas => self.roas,
            MetricKey::Cpa => self.cpa,
            MetricKey::ConversionRate => self.conversion_rate,
        }
    }

    pub fn is_all_zero(&self) -> bool {
        MetricKey::ALL
            .iter()
            .all(|k| self.get(*k).map_or(true, |v| v == 0.0))
    }

    /// Sums additive figures over `periods` and derives the ratios from the sums
    pub fn total<'a>(periods: impl IntoIterator<Item = &'a MetricsPeriod>) -> Self {
        let mut total = Self::default();
        for p in periods {
            total.spend += p.spend;
            total.impressions += p.impressions;
            total.clicks += p.clicks;
            total.conversions += p.conversions;
            total.conversion_value += p.conversion_value;
        }
        total.ctr = ratio(total.clicks, total.impressions).map(|r| r * 100.0);
        total.cpc = ratio(total.spend, total.clicks);
        total.cpm = ratio(total.spend, total.impressions).map(|r| r * 1000.0);
        total.cpa = ratio(total.spend, total.conversions);
        total.roas = ratio(total.conversion_value, total.spend);
        total.conversion_rate = ratio(total.conversions, total.clicks).map(|r| r * 100.0);
        total
    }
}

/// Per-metric percentage delta between the two periods, `None` where unavailable
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangePct {
    #[serde(deserialize_with = "lenient_opt_f64")]
    pub spend: Option<f64>,
    #[serde(deserialize_with = "lenient_opt_f64")]
    pub impressions: Option<f64>,
    #[serde(deserialize_with = "lenient_opt_f64")]
    pub clicks: Option<f64>,
    #[serde(deserialize_with = "lenient_opt_f64")]
    pub ctr: Option<f64>,
    #[serde(deserialize_with = "lenient_opt_f64")]
    pub cpc: Option<f64>,
    #[serde(deserialize_with = "lenient_opt_f64")]
    pub cpm: Option<f64>,
    #[serde(deserialize_with = "lenient_opt_f64")]
    pub conversions: Option<f64>,
    #[serde(deserialize_with = "lenient_opt_f64")]
    pub conversion_value: Option<f64>,
    #[serde(deserialize_with = "lenient_opt_f64")]
    pub roas: Option<f64>,
    #[serde(deserialize_with = "lenient_opt_f64")]
    pub cpa: Option<f64>,
    #[serde(deserialize_with = "lenient_opt_f64")]
    pub conversion_rate: Option<f64>,
}

impl ChangePct {
    pub fn get(&self, key: MetricKey) -> Option<f64> {
        match key {
            MetricKey::Spend => self.spend,
            MetricKey::Impressions => self.impressions,
            MetricKey::Clicks => self.clicks,
            MetricKey::Ctr => self.ctr,
            MetricKey::Cpc => self.cpc,
            MetricKey::Cpm => self.cpm,
            MetricKey::Conversions => self.conversions,
            MetricKey::ConversionValue => self.conversion_value,
            MetricKey::Roas => self.roas,
            MetricKey::Cpa => self.cpa,
            MetricKey::ConversionRate => self.conversion_rate,
        }
    }

    pub fn is_all_none(&self) -> bool {
        MetricKey::ALL.iter().all(|k| self.get(*k).is_none())
    }
}

/// `numerator / denominator`, `None` for a zero denominator
pub fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        None
    } else {
        Some(numerator / denominator)
    }
}

/// Reads a JSON value as a finite number; strings holding numbers are accepted
pub fn number_from_value(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|v| v.is_finite())
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(number_from_value(&value).unwrap_or(0.0))
}

fn lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(number_from_value(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_metric_kinds() {
        assert_eq!(MetricKey::Spend.kind(), MetricKind::Money);
        assert_eq!(MetricKey::ConversionValue.kind(), MetricKind::Money);
        assert_eq!(MetricKey::Ctr.kind(), MetricKind::Percent);
        assert_eq!(MetricKey::Roas.kind(), MetricKind::Ratio);
        assert_eq!(MetricKey::Conversions.kind(), MetricKind::Count);
        assert!(MetricKey::Cpm.lower_is_better());
        assert!(!MetricKey::Spend.lower_is_better());
    }

    #[test]
    fn test_parse_names() {
        for key in MetricKey::ALL {
            assert_eq!(MetricKey::parse(key.as_str()), Some(key));
        }
        assert_eq!(MetricKey::parse("revenue"), None);
    }

    #[test]
    fn test_partial_period_defaults_to_zero() {
        let period: MetricsPeriod = serde_json::from_value(json!({
            "spend": "12.5",
            "clicks": null,
            "roas": null,
            "ctr": "n/a"
        }))
        .unwrap();
        assert_eq!(period.spend, 12.5);
        assert_eq!(period.clicks, 0.0);
        assert_eq!(period.impressions, 0.0);
        assert_eq!(period.roas, None);
        assert_eq!(period.ctr, None);
    }

    #[test]
    fn test_total_recomputes_ratios() {
        let a = MetricsPeriod {
            spend: 100.0,
            impressions: 10_000.0,
            clicks: 200.0,
            conversions: 10.0,
            conversion_value: 400.0,
            ..MetricsPeriod::default()
        };
        let b = MetricsPeriod {
            spend: 50.0,
            impressions: 5_000.0,
            clicks: 100.0,
            ..MetricsPeriod::default()
        };
        let total = MetricsPeriod::total([&a, &b]);
        assert_eq!(total.spend, 150.0);
        assert_eq!(total.ctr, Some(2.0));
        assert_eq!(total.cpc, Some(0.5));
        assert_eq!(total.cpm, Some(10.0));
        assert_eq!(total.cpa, Some(15.0));
        assert_eq!(total.conversion_rate, Some(10.0 / 300.0 * 100.0));
    }

    #[test]
    fn test_total_of_nothing_has_undefined_ratios() {
        let total = MetricsPeriod::total(Vec::<&MetricsPeriod>::new());
        assert_eq!(total.spend, 0.0);
        assert_eq!(total.roas, None);
        assert_eq!(total.ctr, None);
    }

    #[test]
    fn test_zeroed_period() {
        let zero = MetricsPeriod::zeroed();
        assert!(zero.is_all_zero());
        assert_eq!(zero.roas, Some(0.0));
        assert!(ChangePct::default().is_all_none());
    }
}
