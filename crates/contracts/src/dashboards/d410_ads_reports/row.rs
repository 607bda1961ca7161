use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::metrics::{ChangePct, MetricsPeriod};

/// One normalized unit of display: current and previous period for one breakdown value
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonRow {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    pub primary_value: Option<String>,
    pub secondary_value: Option<String>,
    pub tertiary_value: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub period1: MetricsPeriod,
    #[serde(deserialize_with = "null_as_default")]
    pub period2: MetricsPeriod,
    #[serde(deserialize_with = "null_as_default")]
    pub change_pct: ChangePct,
}

impl ComparisonRow {
    /// Breakdown values joined with ` · `, else `name`, else `id`
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [
            &self.primary_value,
            &self.secondary_value,
            &self.tertiary_value,
        ]
        .into_iter()
        .filter_map(|v| v.as_deref())
        .filter(|v| !v.trim().is_empty())
        .collect();

        if !parts.is_empty() {
            parts.join(" · ")
        } else if !self.name.trim().is_empty() {
            self.name.clone()
        } else {
            self.id.clone()
        }
    }

    /// Value of breakdown slot `index` (0 = primary), falling back to `name` for the primary
    pub fn slot_value(&self, index: usize) -> Option<&str> {
        match index {
            0 => self
                .primary_value
                .as_deref()
                .or_else(|| (!self.name.is_empty()).then_some(self.name.as_str())),
            1 => self.secondary_value.as_deref(),
            2 => self.tertiary_value.as_deref(),
            _ => None,
        }
    }

    /// True when the row carries no previous-period figures at all
    pub fn has_comparison(&self) -> bool {
        !(self.period2.is_all_zero() && self.change_pct.is_all_none())
    }
}

/// Response of `GET /reports/compare`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareResponse {
    #[serde(deserialize_with = "lenient_string")]
    pub dimension: String,
    #[serde(deserialize_with = "lenient_string")]
    pub period1_start: String,
    #[serde(deserialize_with = "lenient_string")]
    pub period1_end: String,
    pub overview: Option<ComparisonRow>,
    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<ComparisonRow>,
    pub currency: Option<String>,
}

/// Whether any row reports a positive conversion value for the current period
pub fn has_conversion_value(rows: &[ComparisonRow]) -> bool {
    rows.iter().any(|r| r.period1.conversion_value > 0.0)
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}
