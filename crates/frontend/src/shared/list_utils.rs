/// Shared list helpers: single-column sort state and header indicators
use std::cmp::Ordering;

/// Types that can be ordered by a named column
pub trait Sortable {
    /// Compares two items by the given column
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering;
}

/// Sorts the list by the given column
pub fn sort_list<T: Sortable>(items: &mut [T], field: &str, ascending: bool) {
    items.sort_by(|a, b| {
        let cmp = a.compare_by_field(b, field);
        if ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });
}

/// Current sort column and direction. No column means server order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortState {
    pub field: Option<String>,
    pub ascending: bool,
}

impl SortState {
    /// Header click: same column flips direction, a new column starts ascending
    pub fn toggle(&mut self, field: &str) {
        if self.field.as_deref() == Some(field) {
            self.ascending = !self.ascending;
        } else {
            self.field = Some(field.to_string());
            self.ascending = true;
        }
    }

    pub fn apply<T: Sortable>(&self, items: &mut [T]) {
        if let Some(field) = &self.field {
            sort_list(items, field, self.ascending);
        }
    }
}

/// Sort indicator for a header
pub fn get_sort_indicator(current_field: Option<&str>, field: &str, ascending: bool) -> &'static str {
    if current_field == Some(field) {
        if ascending {
            " ▲"
        } else {
            " ▼"
        }
    } else {
        " ⇅"
    }
}

/// CSS class of the indicator span
pub fn get_sort_class(current_field: Option<&str>, field: &str) -> &'static str {
    if current_field == Some(field) {
        "table__sort-indicator table__sort-indicator--active"
    } else {
        "table__sort-indicator"
    }
}

/// Case-insensitive text ordering with a stable tiebreak on the raw text
pub fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Numeric ordering where missing values sort before every number
pub fn compare_numbers(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_same_column_flips() {
        let mut state = SortState::default();
        state.toggle("spend");
        assert_eq!(state.field.as_deref(), Some("spend"));
        assert!(state.ascending);
        state.toggle("spend");
        assert!(!state.ascending);
        state.toggle("clicks");
        assert_eq!(state.field.as_deref(), Some("clicks"));
        assert!(state.ascending);
    }

    #[test]
    fn test_indicators() {
        assert_eq!(get_sort_indicator(Some("a"), "a", true), " ▲");
        assert_eq!(get_sort_indicator(Some("a"), "a", false), " ▼");
        assert_eq!(get_sort_indicator(None, "a", true), " ⇅");
        assert!(get_sort_class(Some("a"), "a").ends_with("--active"));
    }

    #[test]
    fn test_compare_text_ignores_case() {
        assert_eq!(compare_text("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_text("Zeta", "alpha"), Ordering::Greater);
    }

    #[test]
    fn test_compare_numbers_missing_first() {
        assert_eq!(compare_numbers(None, Some(-5.0)), Ordering::Less);
        assert_eq!(compare_numbers(Some(2.0), Some(10.0)), Ordering::Less);
        assert_eq!(compare_numbers(None, None), Ordering::Equal);
    }
}
