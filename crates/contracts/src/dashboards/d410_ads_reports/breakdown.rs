use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a breakdown dimension. At most one dimension per category can be selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakdownCategory {
    None,
    Entity,
    Time,
    Special,
}

/// A way to slice performance data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakdownDimension {
    #[default]
    None,
    CampaignName,
    AdSetName,
    AdName,
    Date,
    Week,
    Month,
    Placement,
    Platform,
    Age,
    Gender,
    AgeGender,
    Country,
}

/// Level of the ad hierarchy an entity dimension refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityLevel {
    Campaign,
    #[serde(rename = "adset")]
    AdSet,
    Ad,
}

impl BreakdownDimension {
    pub const ALL: [BreakdownDimension; 13] = [
        Self::None,
        Self::CampaignName,
        Self::AdSetName,
        Self::AdName,
        Self::Date,
        Self::Week,
        Self::Month,
        Self::Placement,
        Self::Platform,
        Self::Age,
        Self::Gender,
        Self::AgeGender,
        Self::Country,
    ];

    /// Dimensions offered as chips. `age_gender` stays a legal value but age and gender
    /// are offered separately.
    pub const CHIPS: [BreakdownDimension; 11] = [
        Self::CampaignName,
        Self::AdSetName,
        Self::AdName,
        Self::Date,
        Self::Week,
        Self::Month,
        Self::Placement,
        Self::Platform,
        Self::Age,
        Self::Gender,
        Self::Country,
    ];

    pub fn category(self) -> BreakdownCategory {
        match self {
            Self::None => BreakdownCategory::None,
            Self::CampaignName | Self::AdSetName | Self::AdName => BreakdownCategory::Entity,
            Self::Date | Self::Week | Self::Month => BreakdownCategory::Time,
            Self::Placement
            | Self::Platform
            | Self::Age
            | Self::Gender
            | Self::AgeGender
            | Self::Country => BreakdownCategory::Special,
        }
    }

    pub fn is_none(self) -> bool {
        self == Self::None
    }

    pub fn is_entity(self) -> bool {
        self.category() == BreakdownCategory::Entity
    }

    pub fn is_time(self) -> bool {
        self.category() == BreakdownCategory::Time
    }

    pub fn is_special(self) -> bool {
        self.category() == BreakdownCategory::Special
    }

    pub fn entity_level(self) -> Option<EntityLevel> {
        match self {
            Self::CampaignName => Some(EntityLevel::Campaign),
            Self::AdSetName => Some(EntityLevel::AdSet),
            Self::AdName => Some(EntityLevel::Ad),
            _ => None,
        }
    }

    /// Value sent in query strings (`none` when unselected)
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::CampaignName => "campaign_name",
            Self::AdSetName => "ad_set_name",
            Self::AdName => "ad_name",
            Self::Date => "date",
            Self::Week => "week",
            Self::Month => "month",
            Self::Placement => "placement",
            Self::Platform => "platform",
            Self::Age => "age",
            Self::Gender => "gender",
            Self::AgeGender => "age_gender",
            Self::Country => "country",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == value)
    }

    /// Human label shown on chips and in the selection summary
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::CampaignName => "Campaign",
            Self::AdSetName => "Ad Set",
            Self::AdName => "Ad",
            Self::Date => "Day",
            Self::Week => "Week",
            Self::Month => "Month",
            Self::Placement => "Placement",
            Self::Platform => "Platform",
            Self::Age => "Age",
            Self::Gender => "Gender",
            Self::AgeGender => "Age & Gender",
            Self::Country => "Country",
        }
    }

    /// Path segment of `/metrics/breakdowns/{..}` for special dimensions
    pub fn breakdown_endpoint(self) -> Option<&'static str> {
        match self {
            Self::Placement => Some("placement"),
            Self::Platform => Some("platform"),
            Self::Age | Self::Gender | Self::AgeGender => Some("age-gender"),
            Self::Country => Some("country"),
            _ => None,
        }
    }

    /// Path segment of `/breakdowns/{..}/by-entity` for special dimensions
    pub fn by_entity_endpoint(self) -> Option<&'static str> {
        match self {
            Self::Placement => Some("placement"),
            Self::Platform => Some("platform"),
            Self::Age | Self::Gender | Self::AgeGender => Some("demographics"),
            Self::Country => Some("country"),
            _ => None,
        }
    }
}

impl fmt::Display for BreakdownDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl EntityLevel {
    pub const ALL: [EntityLevel; 3] = [Self::Campaign, Self::AdSet, Self::Ad];

    /// `entity_type` query value of the by-entity endpoints
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Campaign => "campaign",
            Self::AdSet => "adset",
            Self::Ad => "ad",
        }
    }

    pub fn dimension(self) -> BreakdownDimension {
        match self {
            Self::Campaign => BreakdownDimension::CampaignName,
            Self::AdSet => BreakdownDimension::AdSetName,
            Self::Ad => BreakdownDimension::AdName,
        }
    }

    pub fn filter_label(self) -> &'static str {
        match self {
            Self::Campaign => "Campaign name contains",
            Self::AdSet => "Ad set name contains",
            Self::Ad => "Ad name contains",
        }
    }
}
