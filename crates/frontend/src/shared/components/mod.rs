pub mod date_range_picker;
pub mod filter_panel;
pub mod table;
pub mod table_totals_row;

pub use date_range_picker::DateRangePicker;
pub use filter_panel::{CollapsiblePanel, FilterTag};
pub use table_totals_row::TableTotalsRow;
