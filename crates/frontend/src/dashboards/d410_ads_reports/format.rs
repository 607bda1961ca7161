//! Metric value formatting and change coloring

use contracts::dashboards::d410_ads_reports::{MetricKey, MetricKind};

use crate::shared::components::table::{
    format_number_int, format_number_trimmed, format_number_with_decimals,
};

pub const EMPTY_VALUE: &str = "-";

/// Detailed is used in tooltips, totals and exports; Compact in table cells.
/// Compact only drops the cents of `spend`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatStyle {
    #[default]
    Detailed,
    Compact,
}

pub fn currency_symbol(currency: &str) -> &'static str {
    match currency.trim().to_ascii_uppercase().as_str() {
        "EUR" => "€",
        "GBP" => "£",
        "ILS" => "₪",
        _ => "$",
    }
}

/// Formats one metric value; `None` and non-finite values render as `-`
pub fn format_value(
    metric: MetricKey,
    value: Option<f64>,
    currency: &str,
    style: FormatStyle,
) -> String {
    let Some(value) = value.filter(|v| v.is_finite()) else {
        return EMPTY_VALUE.to_string();
    };

    match metric.kind() {
        MetricKind::Money => {
            let amount = match (metric, style) {
                (MetricKey::Spend, FormatStyle::Compact) => format_number_int(value.abs()),
                (MetricKey::Spend | MetricKey::ConversionValue, _) => {
                    format_number_with_decimals(value.abs(), 2)
                }
                _ => format_number_trimmed(value.abs(), 2),
            };
            let sign = if value < 0.0 && amount.chars().any(|c| c.is_ascii_digit() && c != '0') {
                "-"
            } else {
                ""
            };
            format!("{}{}{}", sign, currency_symbol(currency), amount)
        }
        MetricKind::Percent => format!("{}%", format_number_with_decimals(value, 2)),
        MetricKind::Ratio => format!("{}x", format_number_with_decimals(value, 2)),
        MetricKind::Count => format_number_int(value),
    }
}

/// Direction of a period-over-period change, from the advertiser's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeTone {
    Improved,
    Worsened,
    Neutral,
}

impl ChangeTone {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Improved => "change change--positive",
            Self::Worsened => "change change--negative",
            Self::Neutral => "change change--neutral",
        }
    }
}

/// Cost metrics improve when they go down, everything else when it goes up
pub fn change_tone(metric: MetricKey, change_pct: Option<f64>) -> ChangeTone {
    match change_pct.filter(|c| c.is_finite()) {
        None => ChangeTone::Neutral,
        Some(c) if c == 0.0 => ChangeTone::Neutral,
        Some(c) if (c < 0.0) == metric.lower_is_better() => ChangeTone::Improved,
        Some(_) => ChangeTone::Worsened,
    }
}

/// Signed percentage change, e.g. `+12.5%`
pub fn format_change(change_pct: Option<f64>) -> String {
    match change_pct.filter(|c| c.is_finite()) {
        None => EMPTY_VALUE.to_string(),
        Some(c) => {
            let body = format_number_trimmed(c, 1);
            if body.starts_with('-') || body == "0" {
                format!("{}%", body)
            } else {
                format!("+{}%", body)
            }
        }
    }
}
