use chrono::Utc;
use contracts::dashboards::d410_ads_reports::DateRange;
use leptos::prelude::*;

use crate::dashboards::ReportsDashboard;
use crate::shared::components::DateRangePicker;
use crate::shared::config::load_config;

/// Default reporting window, in days
const DEFAULT_PERIOD_DAYS: i64 = 30;

#[component]
pub fn App() -> impl IntoView {
    let config = load_config();

    let date_range = RwSignal::new(DateRange::last_days(
        Utc::now().date_naive(),
        DEFAULT_PERIOD_DAYS,
    ));
    let account_input = RwSignal::new(String::new());
    let account_id = Signal::derive(move || {
        account_input.with(|a| {
            let trimmed = a.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
    });

    view! {
        <div class="app">
            <header class="app__header">
                <h1 class="app__title">"Ads Reports"</h1>
                <DateRangePicker
                    value=date_range
                    on_change=Callback::new(move |range: DateRange| date_range.set(range))
                />
                <input
                    type="text"
                    class="app__account"
                    placeholder="Ad account ID"
                    prop:value=account_input
                    on:change=move |ev| account_input.set(event_target_value(&ev))
                />
            </header>
            <main class="app__content">
                <ReportsDashboard config=config date_range=date_range account_id=account_id />
            </main>
        </div>
    }
}
