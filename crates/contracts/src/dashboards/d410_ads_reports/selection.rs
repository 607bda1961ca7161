use serde::{Deserialize, Serialize};

use super::breakdown::{BreakdownCategory, BreakdownDimension};

/// How many breakdown slots the report builder offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotMode {
    /// Primary + secondary. A special primary locks further slots.
    Double,
    /// Primary + secondary + tertiary, one dimension per category.
    #[default]
    Triple,
}

impl SlotMode {
    pub fn max_slots(self) -> usize {
        match self {
            Self::Double => 2,
            Self::Triple => 3,
        }
    }
}

/// Up to three concurrently chosen breakdowns, filled left to right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectionState {
    pub primary: BreakdownDimension,
    pub secondary: BreakdownDimension,
    pub tertiary: BreakdownDimension,
}

impl SelectionState {
    pub fn new(
        primary: BreakdownDimension,
        secondary: BreakdownDimension,
        tertiary: BreakdownDimension,
    ) -> Self {
        Self {
            primary,
            secondary,
            tertiary,
        }
    }

    pub fn slots(&self) -> [BreakdownDimension; 3] {
        [self.primary, self.secondary, self.tertiary]
    }

    /// Non-`none` slots in order
    pub fn filled(&self) -> Vec<BreakdownDimension> {
        self.slots().into_iter().filter(|d| !d.is_none()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_none()
    }

    pub fn contains(&self, dim: BreakdownDimension) -> bool {
        !dim.is_none() && self.slots().contains(&dim)
    }

    pub fn has_category(&self, category: BreakdownCategory) -> bool {
        self.filled().iter().any(|d| d.category() == category)
    }

    pub fn has_special(&self) -> bool {
        self.has_category(BreakdownCategory::Special)
    }

    /// Chip click transition.
    ///
    /// Clicking the primary clears everything, clicking a later slot clears it and the
    /// slots to its right. A compatible value fills the next free slot; an incompatible
    /// one starts a fresh selection with itself as primary.
    pub fn handle_chip_click(&mut self, value: BreakdownDimension, mode: SlotMode) {
        if value.is_none() {
            return;
        }

        if self.primary == value {
            self.clear();
        } else if self.secondary == value {
            self.secondary = BreakdownDimension::None;
            self.tertiary = BreakdownDimension::None;
        } else if self.tertiary == value {
            self.tertiary = BreakdownDimension::None;
        } else if self.primary.is_none() {
            self.primary = value;
        } else if self.accepts(value, mode) {
            if self.secondary.is_none() {
                self.secondary = value;
            } else {
                self.tertiary = value;
            }
        } else {
            *self = Self::new(value, BreakdownDimension::None, BreakdownDimension::None);
        }
    }

    /// Whether `value` can be appended without violating exclusivity or the slot limit
    pub fn accepts(&self, value: BreakdownDimension, mode: SlotMode) -> bool {
        if value.is_none() || self.primary.is_none() {
            return !value.is_none();
        }
        if mode == SlotMode::Double && self.primary.is_special() {
            return false;
        }
        self.filled().len() < mode.max_slots() && !self.has_category(value.category())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Labels of the filled slots joined with `×`, empty when nothing is selected
    pub fn summary(&self) -> String {
        if self.primary.is_none() {
            return String::new();
        }
        self.filled()
            .iter()
            .map(|d| d.label())
            .collect::<Vec<_>>()
            .join(" × ")
    }

    /// Structural invariants: left-filled, no repeats, one dimension per category
    pub fn is_valid(&self) -> bool {
        let slots = self.slots();
        let left_filled = !(slots[0].is_none() && !slots[1].is_none())
            && !(slots[1].is_none() && !slots[2].is_none());
        let filled = self.filled();
        let distinct_categories = filled.iter().enumerate().all(|(i, a)| {
            filled[i + 1..]
                .iter()
                .all(|b| a != b && a.category() != b.category())
        });
        left_filled && distinct_categories
    }
}
