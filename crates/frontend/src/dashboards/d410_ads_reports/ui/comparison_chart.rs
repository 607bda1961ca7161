use contracts::dashboards::d410_ads_reports::{ComparisonRow, MetricKey};
use leptos::prelude::*;

use crate::dashboards::d410_ads_reports::chart::{chart_bars, chart_metric};
use crate::dashboards::d410_ads_reports::format::{format_value, FormatStyle};

/// Horizontal bar chart of one selected metric over the current period
#[component]
pub fn ComparisonChart(
    #[prop(into)]
    rows: Signal<Vec<ComparisonRow>>,
    #[prop(into)]
    metrics: Signal<Vec<MetricKey>>,
    #[prop(into)]
    currency: Signal<String>,
    max_bars: usize,
) -> impl IntoView {
    let picked = RwSignal::new(None::<MetricKey>);

    // falls back to the first selected metric when the pick is deselected
    let active = Memo::new(move |_| {
        let selected = metrics.get();
        picked
            .get()
            .filter(|m| selected.contains(m))
            .or_else(|| chart_metric(&selected))
    });

    let bars = Memo::new(move |_| match active.get() {
        Some(metric) => rows.with(|r| chart_bars(r, metric, max_bars)),
        None => Vec::new(),
    });

    view! {
        <div class="comparison-chart">
            <div class="comparison-chart__metrics">
                {move || {
                    metrics
                        .get()
                        .into_iter()
                        .map(|metric| {
                            let class = move || {
                                if active.get() == Some(metric) {
                                    "metric-pill metric-pill--selected"
                                } else {
                                    "metric-pill"
                                }
                            };
                            view! {
                                <button type="button" class=class on:click=move |_| picked.set(Some(metric))>
                                    {metric.label()}
                                </button>
                            }
                        })
                        .collect_view()
                }}
            </div>
            <div class="comparison-chart__bars">
                {move || {
                    let Some(metric) = active.get() else {
                        return view! { <></> }.into_any();
                    };
                    let currency = currency.get();
                    bars.get()
                        .into_iter()
                        .map(|bar| {
                            let width = format!("width: {:.1}%;", bar.fraction * 100.0);
                            let value = format_value(metric, Some(bar.value), &currency, FormatStyle::Detailed);
                            let title = bar.label.clone();
                            view! {
                                <div class="comparison-chart__row" title=title>
                                    <span class="comparison-chart__label">{bar.label}</span>
                                    <div class="comparison-chart__track">
                                        <div class="comparison-chart__bar" style=width></div>
                                    </div>
                                    <span class="comparison-chart__value">{value}</span>
                                </div>
                            }
                        })
                        .collect_view()
                        .into_any()
                }}
            </div>
        </div>
    }
}
