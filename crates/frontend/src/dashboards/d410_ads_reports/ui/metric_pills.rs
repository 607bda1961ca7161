use contracts::dashboards::d410_ads_reports::MetricKey;
use leptos::prelude::*;

use crate::dashboards::d410_ads_reports::session::ReportSession;

/// Metric toggles. Unavailable metrics are shown disabled with the reason as a tooltip.
#[component]
pub fn MetricPills(session: RwSignal<ReportSession>) -> impl IntoView {
    let available = Memo::new(move |_| session.with(|s| s.available_metrics()));

    let reason = move |metric: MetricKey| {
        if session.with(|s| s.selection.has_special()) {
            "Not available for placement, platform, demographic or country breakdowns"
        } else if metric == MetricKey::Roas {
            "No conversion value in this period"
        } else {
            ""
        }
    };

    view! {
        <div class="metric-pills">
            {MetricKey::ALL
                .into_iter()
                .map(|metric| {
                    let is_available = move || available.with(|a| a.contains(&metric));
                    let is_selected = move || session.with(|s| s.metrics.contains(&metric));
                    view! {
                        <button
                            type="button"
                            class=move || {
                                if !is_available() {
                                    "metric-pill metric-pill--disabled"
                                } else if is_selected() {
                                    "metric-pill metric-pill--selected"
                                } else {
                                    "metric-pill"
                                }
                            }
                            disabled=move || !is_available()
                            title=move || if is_available() { "" } else { reason(metric) }
                            on:click=move |_| session.update(|s| s.toggle_metric(metric))
                        >
                            {metric.label()}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}
