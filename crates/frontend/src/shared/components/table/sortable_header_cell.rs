//! Sortable table header cell
//!
//! ```text
//! <SortableHeaderCell
//!     label="Spend"
//!     sort_field="spend"
//!     current_sort_field=Signal::derive(move || sort.with(|s| s.field.clone()))
//!     sort_ascending=Signal::derive(move || sort.with(|s| s.ascending))
//!     on_sort=Callback::new(move |field: String| sort.update(|s| s.toggle(&field)))
//!     align="right"
//! />
//! ```

use crate::shared::list_utils::{get_sort_class, get_sort_indicator};
use leptos::prelude::*;

#[component]
pub fn SortableHeaderCell(
    /// Header text
    #[prop(into)]
    label: String,

    /// Column key passed to `on_sort`
    #[prop(into)]
    sort_field: String,

    /// Column currently sorted by
    #[prop(into)]
    current_sort_field: Signal<Option<String>>,

    /// Current direction
    #[prop(into)]
    sort_ascending: Signal<bool>,

    on_sort: Callback<String>,

    /// Header alignment (left/right)
    #[prop(optional, default = "left")]
    align: &'static str,
) -> impl IntoView {
    let sort_field_for_click = sort_field.clone();
    let sort_field_for_indicator = sort_field.clone();
    let sort_field_for_class = sort_field;

    let header_class = if align == "right" {
        "table__sortable-header table__sortable-header--right"
    } else {
        "table__sortable-header"
    };

    view! {
        <th
            class=header_class
            on:click=move |_| on_sort.run(sort_field_for_click.clone())
        >
            {label}
            <span class=move || {
                get_sort_class(current_sort_field.get().as_deref(), &sort_field_for_class)
            }>
                {move || {
                    get_sort_indicator(
                        current_sort_field.get().as_deref(),
                        &sort_field_for_indicator,
                        sort_ascending.get(),
                    )
                }}
            </span>
        </th>
    }
}
