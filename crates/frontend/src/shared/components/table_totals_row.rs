use leptos::prelude::*;

/// Totals row for report tables.
///
/// ```text
/// <TableTotalsRow>
///     <td>"Total"</td>
///     <td class="table__cell--right">{format_number_int(totals.clicks)}</td>
/// </TableTotalsRow>
/// ```
#[component]
pub fn TableTotalsRow(
    /// Row cells
    children: Children,
    /// Extra CSS classes
    #[prop(optional)]
    class: &'static str,
) -> impl IntoView {
    let row_class = if class.is_empty() {
        "table__totals-row".to_string()
    } else {
        format!("table__totals-row {}", class)
    };

    view! {
        <tr class=row_class>
            {children()}
        </tr>
    }
}
