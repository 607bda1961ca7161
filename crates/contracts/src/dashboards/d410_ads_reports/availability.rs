use std::collections::BTreeSet;

use super::metrics::MetricKey;
use super::selection::SelectionState;

/// Metrics that can be shown for `selection`.
///
/// Any special breakdown removes the conversion family; otherwise ROAS is only offered
/// once some row has a positive conversion value.
pub fn available_metrics(
    selection: &SelectionState,
    has_conversion_value: bool,
) -> BTreeSet<MetricKey> {
    let mut available: BTreeSet<MetricKey> = MetricKey::ALL.into_iter().collect();
    if selection.has_special() {
        for key in MetricKey::CONVERSION_METRICS {
            available.remove(&key);
        }
    } else if !has_conversion_value {
        available.remove(&MetricKey::Roas);
    }
    available
}

/// Drops selected metrics that are no longer available. Returns true if anything was removed.
pub fn retain_available(selected: &mut BTreeSet<MetricKey>, available: &BTreeSet<MetricKey>) -> bool {
    let before = selected.len();
    selected.retain(|m| available.contains(m));
    selected.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::d410_ads_reports::breakdown::BreakdownDimension as D;
    use crate::dashboards::d410_ads_reports::selection::SlotMode;

    #[test]
    fn test_everything_available_with_conversion_value() {
        let selection = SelectionState::new(D::CampaignName, D::Date, D::None);
        let available = available_metrics(&selection, true);
        assert_eq!(available.len(), MetricKey::ALL.len());
    }

    #[test]
    fn test_roas_hidden_without_conversion_value() {
        let available = available_metrics(&SelectionState::default(), false);
        assert!(!available.contains(&MetricKey::Roas));
        assert!(available.contains(&MetricKey::Cpa));
        assert_eq!(available.len(), MetricKey::ALL.len() - 1);
    }

    #[test]
    fn test_special_anywhere_removes_conversion_family() {
        for selection in [
            SelectionState::new(D::Placement, D::None, D::None),
            SelectionState::new(D::AdName, D::Country, D::None),
            SelectionState::new(D::AdName, D::Week, D::Gender),
        ] {
            for has_value in [true, false] {
                let available = available_metrics(&selection, has_value);
                for key in MetricKey::CONVERSION_METRICS {
                    assert!(!available.contains(&key), "{key} for {selection:?}");
                }
                assert!(available.contains(&MetricKey::Spend));
            }
        }
    }

    #[test]
    fn test_adding_special_never_grows_available_set() {
        let bases = [
            SelectionState::default(),
            SelectionState::new(D::CampaignName, D::None, D::None),
            SelectionState::new(D::Month, D::None, D::None),
            SelectionState::new(D::AdSetName, D::Date, D::None),
        ];
        let specials = [D::Placement, D::Platform, D::Age, D::Gender, D::Country];
        for base in bases {
            for special in specials {
                let mut with_special = base;
                with_special.handle_chip_click(special, SlotMode::Triple);
                for has_value in [true, false] {
                    let baseline = available_metrics(&base, has_value);
                    let narrowed = available_metrics(&with_special, has_value);
                    assert!(narrowed.is_subset(&baseline));

                    let mut removed = with_special;
                    removed.handle_chip_click(special, SlotMode::Triple);
                    assert_eq!(available_metrics(&removed, has_value), baseline);
                }
            }
        }
    }

    #[test]
    fn test_retain_available_only_drops() {
        let mut selected: BTreeSet<MetricKey> =
            [MetricKey::Spend, MetricKey::Roas, MetricKey::Cpa].into_iter().collect();
        let available = available_metrics(&SelectionState::new(D::Country, D::None, D::None), true);
        assert!(retain_available(&mut selected, &available));
        assert_eq!(selected.into_iter().collect::<Vec<_>>(), vec![MetricKey::Spend]);

        let mut only_conversions: BTreeSet<MetricKey> = [MetricKey::Roas].into_iter().collect();
        retain_available(&mut only_conversions, &available);
        assert!(only_conversions.is_empty());
        assert!(!retain_available(&mut only_conversions, &available));
    }
}
