use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::breakdown::{BreakdownDimension, EntityLevel};
use super::selection::SelectionState;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive reporting period, both ends in `YYYY-MM-DD`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl DateRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// The `days` days ending with `today`
    pub fn last_days(today: NaiveDate, days: i64) -> Self {
        let start = today - Duration::days(days.max(1) - 1);
        Self::new(
            start.format(DATE_FORMAT).to_string(),
            today.format(DATE_FORMAT).to_string(),
        )
    }

    /// Checks both ends parse and the range is not reversed
    pub fn validate(&self) -> Result<(NaiveDate, NaiveDate), String> {
        let start = NaiveDate::parse_from_str(&self.start, DATE_FORMAT)
            .map_err(|_| format!("Invalid start date: {}", self.start))?;
        let end = NaiveDate::parse_from_str(&self.end, DATE_FORMAT)
            .map_err(|_| format!("Invalid end date: {}", self.end))?;
        if start > end {
            return Err(format!("Start date {} is after end date {}", self.start, self.end));
        }
        Ok((start, end))
    }
}

/// Free-text name filters, one per entity level
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EntityFilters {
    pub campaign: String,
    pub ad_set: String,
    pub ad: String,
}

impl EntityFilters {
    pub fn get(&self, level: EntityLevel) -> &str {
        match level {
            EntityLevel::Campaign => &self.campaign,
            EntityLevel::AdSet => &self.ad_set,
            EntityLevel::Ad => &self.ad,
        }
    }

    pub fn set(&mut self, level: EntityLevel, value: impl Into<String>) {
        let value = value.into();
        match level {
            EntityLevel::Campaign => self.campaign = value,
            EntityLevel::AdSet => self.ad_set = value,
            EntityLevel::Ad => self.ad = value,
        }
    }

    /// Trimmed filter text, `None` when blank
    pub fn active(&self, level: EntityLevel) -> Option<String> {
        let value = self.get(level).trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        EntityLevel::ALL.iter().all(|l| self.active(*l).is_none())
    }
}

/// Everything one report fetch needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportQuery {
    pub date_range: DateRange,
    pub selection: SelectionState,
    pub filters: EntityFilters,
    pub account_id: Option<String>,
}

/// Which backend shape serves a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportSource {
    /// Generic compare endpoint (overview or entity/time breakdowns)
    Standard,
    /// Special breakdown alone
    SpecialOnly { special: BreakdownDimension },
    /// Entity crossed with a special breakdown
    EntitySpecial {
        entity: EntityLevel,
        special: BreakdownDimension,
    },
}

impl ReportSource {
    /// Entity primary with a special secondary always goes to the by-entity endpoint;
    /// a tertiary slot does not change that.
    pub fn resolve(selection: &SelectionState) -> Self {
        if let Some(entity) = selection.primary.entity_level() {
            if selection.secondary.is_special() {
                return Self::EntitySpecial {
                    entity,
                    special: selection.secondary,
                };
            }
        }

        let filled = selection.filled();
        let Some(special) = filled.iter().copied().find(|d| d.is_special()) else {
            return Self::Standard;
        };
        let entity = filled.iter().find_map(|d| d.entity_level());
        let has_time = filled.iter().any(|d| d.is_time());

        match (entity, has_time) {
            (None, false) => Self::SpecialOnly { special },
            (Some(entity), false) => Self::EntitySpecial { entity, special },
            _ => Self::Standard,
        }
    }

    /// Whether rows from this source carry previous-period figures
    pub fn has_comparison(self) -> bool {
        matches!(self, Self::Standard)
    }
}

/// Query string of `GET /reports/compare`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareParams {
    pub period1_start: String,
    pub period1_end: String,
    pub dimension: String,
    pub breakdown: BreakdownDimension,
    pub secondary_breakdown: BreakdownDimension,
    pub tertiary_breakdown: BreakdownDimension,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad_set_filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad_filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
}

/// Query string of `GET /metrics/breakdowns/{type}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownParams {
    pub start_date: String,
    pub end_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    pub group_by: BreakdownDimension,
}

/// Query string of `GET /breakdowns/{type}/by-entity`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityBreakdownParams {
    pub start_date: String,
    pub end_date: String,
    pub entity_type: EntityLevel,
    pub group_by: BreakdownDimension,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
}

impl ReportQuery {
    pub fn source(&self) -> ReportSource {
        ReportSource::resolve(&self.selection)
    }

    /// Whether rows for this query carry previous-period figures.
    ///
    /// Never true while a special breakdown is selected, whichever endpoint serves it.
    pub fn has_comparison(&self) -> bool {
        self.source().has_comparison() && !self.selection.has_special()
    }

    /// Breakdown columns the rows of this query carry, in slot order.
    ///
    /// The by-entity endpoint has no time axis, so a time slot next to an
    /// entity × special pair is not part of its rows.
    pub fn row_breakdowns(&self) -> Vec<BreakdownDimension> {
        let filled = self.selection.filled();
        match self.source() {
            ReportSource::EntitySpecial { entity, special } => filled
                .into_iter()
                .filter(|d| *d == entity.dimension() || *d == special)
                .collect(),
            _ => filled,
        }
    }

    fn account(&self) -> Option<String> {
        self.account_id
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string)
    }

    pub fn compare_params(&self) -> CompareParams {
        let primary = self.selection.primary;
        let dimension = if primary.is_none() {
            "overview".to_string()
        } else {
            primary.as_str().to_string()
        };
        CompareParams {
            period1_start: self.date_range.start.clone(),
            period1_end: self.date_range.end.clone(),
            dimension,
            breakdown: primary,
            secondary_breakdown: self.selection.secondary,
            tertiary_breakdown: self.selection.tertiary,
            campaign_filter: self.filters.active(EntityLevel::Campaign),
            ad_set_filter: self.filters.active(EntityLevel::AdSet),
            ad_filter: self.filters.active(EntityLevel::Ad),
            account_id: self.account(),
        }
    }

    pub fn breakdown_params(&self, special: BreakdownDimension) -> BreakdownParams {
        BreakdownParams {
            start_date: self.date_range.start.clone(),
            end_date: self.date_range.end.clone(),
            account_id: self.account(),
            group_by: special,
        }
    }

    pub fn entity_breakdown_params(
        &self,
        entity: EntityLevel,
        special: BreakdownDimension,
    ) -> EntityBreakdownParams {
        EntityBreakdownParams {
            start_date: self.date_range.start.clone(),
            end_date: self.date_range.end.clone(),
            entity_type: entity,
            group_by: special,
            search_query: self.filters.active(entity),
            account_id: self.account(),
        }
    }
}
