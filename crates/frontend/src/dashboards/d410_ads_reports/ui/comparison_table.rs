use contracts::dashboards::d410_ads_reports::{
    BreakdownDimension, ComparisonRow, MetricKey, MetricsPeriod,
};
use leptos::prelude::*;

use crate::dashboards::d410_ads_reports::format::{
    change_tone, format_change, format_value, FormatStyle,
};
use crate::dashboards::d410_ads_reports::table_data::{
    change_between, previous_totals, show_totals, slot_column, totals, NAME_COLUMN,
};
use crate::shared::components::table::SortableHeaderCell;
use crate::shared::components::TableTotalsRow;
use crate::shared::list_utils::SortState;

/// Rows × selected metrics. With `show_comparison` each metric gets previous-period and change columns.
#[component]
pub fn ComparisonTable(
    #[prop(into)]
    rows: Signal<Vec<ComparisonRow>>,
    #[prop(into)]
    metrics: Signal<Vec<MetricKey>>,
    /// Filled breakdown slots, one label column each
    #[prop(into)]
    breakdowns: Signal<Vec<BreakdownDimension>>,
    #[prop(into)]
    currency: Signal<String>,
    #[prop(into)]
    show_comparison: Signal<bool>,
) -> impl IntoView {
    let sort = RwSignal::new(SortState::default());

    let sorted_rows = Memo::new(move |_| {
        let mut list = rows.get();
        sort.with(|s| s.apply(&mut list));
        list
    });

    let current_sort_field = Signal::derive(move || sort.with(|s| s.field.clone()));
    let sort_ascending = Signal::derive(move || sort.with(|s| s.ascending));
    let on_sort = Callback::new(move |field: String| sort.update(|s| s.toggle(&field)));

    let label_columns = move || {
        let dims = breakdowns.get();
        if dims.is_empty() {
            vec![(NAME_COLUMN.to_string(), "Name")]
        } else {
            dims.iter()
                .enumerate()
                .map(|(i, d)| (slot_column(i), d.label()))
                .collect()
        }
    };

    let header = move || {
        let compare = show_comparison.get();
        let labels = label_columns()
            .into_iter()
            .map(|(field, label)| {
                view! {
                    <SortableHeaderCell
                        label=label
                        sort_field=field
                        current_sort_field=current_sort_field
                        sort_ascending=sort_ascending
                        on_sort=on_sort
                    />
                }
            })
            .collect_view();
        let metric_headers = metrics
            .get()
            .into_iter()
            .map(|metric| {
                let extra = compare.then(|| {
                    view! {
                        <th class="table__header--right table__header--muted">"Previous"</th>
                        <th class="table__header--right table__header--muted">"Change"</th>
                    }
                });
                view! {
                    <SortableHeaderCell
                        label=metric.label()
                        sort_field=metric.as_str()
                        current_sort_field=current_sort_field
                        sort_ascending=sort_ascending
                        on_sort=on_sort
                        align="right"
                    />
                    {extra}
                }
            })
            .collect_view();
        view! { <tr>{labels}{metric_headers}</tr> }
    };

    let body = move || {
        let compare = show_comparison.get();
        let selected = metrics.get();
        let currency = currency.get();
        let slots = breakdowns.with(|b| b.len());
        sorted_rows
            .get()
            .into_iter()
            .map(|row| {
                let labels: Vec<String> = if slots == 0 {
                    vec![row.display_name()]
                } else {
                    (0..slots)
                        .map(|i| row.slot_value(i).unwrap_or("-").to_string())
                        .collect()
                };
                let cells = selected
                    .iter()
                    .map(|metric| {
                        let change = row.change_pct.get(*metric);
                        metric_cells(*metric, &row.period1, &row.period2, change, &currency, compare)
                    })
                    .collect_view();
                view! {
                    <tr>
                        {labels.into_iter().map(|l| view! { <td>{l}</td> }).collect_view()}
                        {cells}
                    </tr>
                }
            })
            .collect_view()
    };

    let totals_row = move || {
        let list = rows.get();
        if !show_totals(&list) {
            return None;
        }
        let compare = show_comparison.get();
        let currency = currency.get();
        let current = totals(&list);
        let previous = previous_totals(&list);
        let span = breakdowns.with(|b| b.len().max(1)).to_string();
        let cells = metrics
            .get()
            .into_iter()
            .map(|metric| {
                let change = change_between(current.get(metric), previous.get(metric));
                metric_cells(metric, &current, &previous, change, &currency, compare)
            })
            .collect_view();
        Some(view! {
            <TableTotalsRow>
                <td colspan=span>"Total"</td>
                {cells}
            </TableTotalsRow>
        })
    };

    view! {
        <div class="table-wrapper">
            <table class="table comparison-table">
                <thead>{header}</thead>
                <tbody>
                    {body}
                    {totals_row}
                </tbody>
            </table>
        </div>
    }
}

fn metric_cells(
    metric: MetricKey,
    current: &MetricsPeriod,
    previous: &MetricsPeriod,
    change: Option<f64>,
    currency: &str,
    compare: bool,
) -> AnyView {
    let value = format_value(metric, current.get(metric), currency, FormatStyle::Compact);
    if !compare {
        return view! { <td class="table__cell--right">{value}</td> }.into_any();
    }
    let before = format_value(metric, previous.get(metric), currency, FormatStyle::Compact);
    let change_class = format!("table__cell--right {}", change_tone(metric, change).css_class());
    view! {
        <td class="table__cell--right">{value}</td>
        <td class="table__cell--right table__cell--muted">{before}</td>
        <td class=change_class>{format_change(change)}</td>
    }
    .into_any()
}
