//! Raw breakdown records to [`ComparisonRow`].
//!
//! The special breakdown endpoints name their fields differently per breakdown type
//! (`age_group` vs `age`, `publisher_platform` vs `platform`, ...). Every lookup goes
//! through the mapping tables below, so one canonical row type comes out regardless of
//! the source.

use serde_json::{Map, Value};

use super::breakdown::{BreakdownDimension, EntityLevel};
use super::metrics::{number_from_value, ChangePct, MetricsPeriod};
use super::row::{CompareResponse, ComparisonRow};
use super::selection::SelectionState;

/// One record as returned by the breakdown endpoints
pub type RawRecord = Map<String, Value>;

pub const UNKNOWN_VALUE: &str = "Unknown";

/// Candidate field names holding the breakdown value, in lookup order
pub fn value_fields(dimension: BreakdownDimension) -> &'static [&'static str] {
    match dimension {
        BreakdownDimension::Placement => &["placement", "placement_name", "position"],
        BreakdownDimension::Platform => &["platform", "publisher_platform", "platform_name"],
        BreakdownDimension::Age => &["age", "age_group", "age_range"],
        BreakdownDimension::Gender => &["gender", "gender_name"],
        BreakdownDimension::AgeGender => &["age_gender", "segment"],
        BreakdownDimension::Country => &["country", "country_code", "country_name"],
        BreakdownDimension::CampaignName => &["campaign_name", "entity_name", "name"],
        BreakdownDimension::AdSetName => &["ad_set_name", "adset_name", "entity_name", "name"],
        BreakdownDimension::AdName => &["ad_name", "entity_name", "name"],
        BreakdownDimension::Date => &["date", "date_start", "day"],
        BreakdownDimension::Week => &["week", "week_start"],
        BreakdownDimension::Month => &["month", "month_start"],
        BreakdownDimension::None => &[],
    }
}

/// Candidate field names per metric
const SPEND_FIELDS: &[&str] = &["spend", "amount_spent"];
const IMPRESSIONS_FIELDS: &[&str] = &["impressions"];
const CLICKS_FIELDS: &[&str] = &["clicks", "link_clicks"];
const CTR_FIELDS: &[&str] = &["ctr"];
const CPC_FIELDS: &[&str] = &["cpc"];
const CPM_FIELDS: &[&str] = &["cpm"];
const CONVERSIONS_FIELDS: &[&str] = &["conversions", "results"];
const CONVERSION_VALUE_FIELDS: &[&str] = &["conversion_value", "purchase_value"];
const ROAS_FIELDS: &[&str] = &["roas"];
const CPA_FIELDS: &[&str] = &["cpa", "cost_per_result"];

fn first_present<'a>(record: &'a RawRecord, fields: &[&str]) -> Option<&'a Value> {
    fields
        .iter()
        .filter_map(|f| record.get(*f))
        .find(|v| !v.is_null())
}

fn number(record: &RawRecord, fields: &[&str]) -> f64 {
    first_present(record, fields)
        .and_then(number_from_value)
        .unwrap_or(0.0)
}

fn text(value: &Value) -> Option<String> {
    let s = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!s.is_empty()).then_some(s)
}

/// Breakdown value of `record` for `dimension`, `Unknown` when absent
pub fn dimension_value(record: &RawRecord, dimension: BreakdownDimension) -> String {
    let direct = value_fields(dimension)
        .iter()
        .filter_map(|f| record.get(*f))
        .find_map(text);
    if let Some(value) = direct {
        return value;
    }

    if dimension == BreakdownDimension::AgeGender {
        let age = dimension_value(record, BreakdownDimension::Age);
        let gender = dimension_value(record, BreakdownDimension::Gender);
        if age != UNKNOWN_VALUE || gender != UNKNOWN_VALUE {
            return format!("{age} / {gender}");
        }
    }
    UNKNOWN_VALUE.to_string()
}

/// Current-period metrics of a raw record. Missing figures are 0.
pub fn metrics_from_record(record: &RawRecord) -> MetricsPeriod {
    let clicks = number(record, CLICKS_FIELDS);
    let conversions = number(record, CONVERSIONS_FIELDS);
    let conversion_rate = if clicks > 0.0 {
        conversions / clicks * 100.0
    } else {
        0.0
    };

    MetricsPeriod {
        spend: number(record, SPEND_FIELDS),
        impressions: number(record, IMPRESSIONS_FIELDS),
        clicks,
        ctr: Some(number(record, CTR_FIELDS)),
        cpc: Some(number(record, CPC_FIELDS)),
        cpm: Some(number(record, CPM_FIELDS)),
        conversions,
        conversion_value: number(record, CONVERSION_VALUE_FIELDS),
        roas: Some(number(record, ROAS_FIELDS)),
        cpa: Some(number(record, CPA_FIELDS)),
        conversion_rate: Some(conversion_rate),
    }
}

fn uncompared_row(id: String, values: Vec<String>, record: &RawRecord) -> ComparisonRow {
    let mut values = values.into_iter();
    let primary_value = values.next();
    let secondary_value = values.next();
    let tertiary_value = values.next();
    ComparisonRow {
        id,
        name: primary_value.clone().unwrap_or_default(),
        primary_value,
        secondary_value,
        tertiary_value,
        period1: metrics_from_record(record),
        period2: MetricsPeriod::zeroed(),
        change_pct: ChangePct::default(),
    }
}

/// Rows of a special breakdown on its own: `id = "{special}-{index}"`
pub fn special_rows(records: &[RawRecord], special: BreakdownDimension) -> Vec<ComparisonRow> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            uncompared_row(
                format!("{special}-{index}"),
                vec![dimension_value(record, special)],
                record,
            )
        })
        .collect()
}

/// Rows of an entity crossed with a special breakdown.
///
/// Values follow the slot order of `selection`; `id = "{primary}-{secondary}-{index}"`.
pub fn entity_special_rows(
    records: &[RawRecord],
    selection: &SelectionState,
    entity: EntityLevel,
    special: BreakdownDimension,
) -> Vec<ComparisonRow> {
    let entity_dim = entity.dimension();
    let order: Vec<BreakdownDimension> = selection
        .filled()
        .into_iter()
        .filter(|d| *d == entity_dim || *d == special)
        .collect();
    let order = if order.len() == 2 {
        order
    } else {
        vec![entity_dim, special]
    };

    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let values = order.iter().map(|d| dimension_value(record, *d)).collect();
            uncompared_row(format!("{}-{}-{index}", order[0], order[1]), values, record)
        })
        .collect()
}

/// Records of a breakdown response: a bare list or a list under `data`/`items`/`breakdowns`.
///
/// Non-object entries are skipped.
pub fn records_from_value(value: Value) -> Vec<RawRecord> {
    let list = match value {
        Value::Array(list) => list,
        Value::Object(mut map) => ["data", "items", "breakdowns", "results"]
            .iter()
            .find_map(|key| match map.remove(*key) {
                Some(Value::Array(list)) => Some(list),
                _ => None,
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    };
    list.into_iter()
        .filter_map(|item| match item {
            Value::Object(record) => Some(record),
            _ => None,
        })
        .collect()
}

/// Rows of a compare response: the overview singleton when nothing is selected, else the items.
///
/// Previous-period figures are zeroed when the selection holds a special breakdown.
pub fn compare_rows(response: CompareResponse, selection: &SelectionState) -> Vec<ComparisonRow> {
    let rows = if selection.is_empty() {
        response.overview.into_iter().collect()
    } else {
        response.items
    };
    let uncompared = selection.has_special();
    rows.into_iter()
        .enumerate()
        .map(|(index, mut row)| {
            if row.id.trim().is_empty() {
                row.id = format!("{}-{index}", selection.primary);
            }
            if uncompared {
                row.period2 = MetricsPeriod::zeroed();
                row.change_pct = ChangePct::default();
            }
            row
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::d410_ads_reports::row::has_conversion_value;
    use serde_json::json;
    use BreakdownDimension as D;

    fn record(value: Value) -> RawRecord {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn test_field_mapping_aliases() {
        let r = record(json!({ "age_group": "25-34", "publisher_platform": "instagram" }));
        assert_eq!(dimension_value(&r, D::Age), "25-34");
        assert_eq!(dimension_value(&r, D::Platform), "instagram");
        assert_eq!(dimension_value(&r, D::Country), UNKNOWN_VALUE);
    }

    #[test]
    fn test_combined_demographics_value() {
        let r = record(json!({ "age": "18-24", "gender": "female" }));
        assert_eq!(dimension_value(&r, D::AgeGender), "18-24 / female");
        let r = record(json!({ "age_gender": "18-24 F" }));
        assert_eq!(dimension_value(&r, D::AgeGender), "18-24 F");
        assert_eq!(dimension_value(&record(json!({})), D::AgeGender), UNKNOWN_VALUE);
    }

    #[test]
    fn test_metrics_from_partial_record() {
        let r = record(json!({ "spend": "10.5", "clicks": 4, "conversions": 1, "ctr": null }));
        let m = metrics_from_record(&r);
        assert_eq!(m.spend, 10.5);
        assert_eq!(m.impressions, 0.0);
        assert_eq!(m.ctr, Some(0.0));
        assert_eq!(m.conversion_rate, Some(25.0));

        let m = metrics_from_record(&record(json!({ "conversions": 3 })));
        assert_eq!(m.conversion_rate, Some(0.0));
        assert!(!m.spend.is_nan());
    }

    #[test]
    fn test_special_rows_shape() {
        let records = vec![
            record(json!({ "placement": "feed", "spend": 12, "conversion_value": 5 })),
            record(json!({ "placement_name": "stories", "spend": 3 })),
        ];
        let rows = special_rows(&records, D::Placement);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, "placement-0");
        assert_eq!(rows[1].id, "placement-1");
        assert_eq!(rows[1].primary_value.as_deref(), Some("stories"));
        for row in &rows {
            assert!(row.period2.is_all_zero());
            assert!(row.change_pct.is_all_none());
            assert!(!row.has_comparison());
        }
        assert!(has_conversion_value(&rows));
    }

    #[test]
    fn test_entity_special_rows_follow_selection_order() {
        let records = vec![record(json!({
            "campaign_name": "Spring - Sale",
            "country": "IL",
            "spend": 7
        }))];

        let selection = SelectionState::new(D::CampaignName, D::Country, D::None);
        let rows = entity_special_rows(&records, &selection, EntityLevel::Campaign, D::Country);
        assert_eq!(rows[0].id, "campaign_name-country-0");
        assert_eq!(rows[0].primary_value.as_deref(), Some("Spring - Sale"));
        assert_eq!(rows[0].secondary_value.as_deref(), Some("IL"));
        assert_eq!(rows[0].display_name(), "Spring - Sale · IL");

        let swapped = SelectionState::new(D::Country, D::CampaignName, D::None);
        let rows = entity_special_rows(&records, &swapped, EntityLevel::Campaign, D::Country);
        assert_eq!(rows[0].id, "country-campaign_name-0");
        assert_eq!(rows[0].primary_value.as_deref(), Some("IL"));
        assert!(rows[0].period2.is_all_zero());
    }

    #[test]
    fn test_compare_rows_overview_and_items() {
        let response: CompareResponse = serde_json::from_value(json!({
            "overview": { "id": "all", "name": "All campaigns", "period1": { "spend": 9 } },
            "items": [ { "name": "A" }, { "id": "b", "name": "B" } ]
        }))
        .unwrap();

        let overview = compare_rows(response.clone(), &SelectionState::default());
        assert_eq!(overview.len(), 1);
        assert_eq!(overview[0].id, "all");

        let selection = SelectionState::new(D::CampaignName, D::None, D::None);
        let items = compare_rows(response, &selection);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "campaign_name-0");
        assert_eq!(items[1].id, "b");
    }

    #[test]
    fn test_compare_rows_with_special_drop_previous_period() {
        let response: CompareResponse = serde_json::from_value(json!({
            "items": [{
                "id": "w1",
                "primary_value": "2024-W10",
                "secondary_value": "instagram",
                "period1": { "spend": 12 },
                "period2": { "spend": 10 },
                "change_pct": { "spend": 20.0 }
            }]
        }))
        .unwrap();

        let selection = SelectionState::new(D::Week, D::Platform, D::None);
        let rows = compare_rows(response, &selection);
        assert_eq!(rows[0].period1.spend, 12.0);
        assert_eq!(rows[0].period2, MetricsPeriod::zeroed());
        assert_eq!(rows[0].change_pct, ChangePct::default());
    }

    #[test]
    fn test_compare_rows_missing_overview_is_empty() {
        let rows = compare_rows(CompareResponse::default(), &SelectionState::default());
        assert!(rows.is_empty());
    }

    #[test]
    fn test_records_from_wrapped_and_bare_lists() {
        let bare = records_from_value(json!([{ "country": "IL" }, 3, { "country": "US" }]));
        assert_eq!(bare.len(), 2);

        let wrapped = records_from_value(json!({ "data": [{ "placement": "feed" }] }));
        assert_eq!(wrapped.len(), 1);
        assert_eq!(dimension_value(&wrapped[0], D::Placement), "feed");

        assert!(records_from_value(json!({ "detail": "nothing" })).is_empty());
        assert!(records_from_value(Value::Null).is_empty());
    }
}
