use chrono::Utc;
use contracts::dashboards::d410_ads_reports::DateRange;
use leptos::prelude::*;
use thaw::*;

/// Quick presets, in days
const PRESETS: [i64; 3] = [7, 30, 90];

/// Two date inputs (yyyy-mm-dd) plus "last N days" presets
#[component]
pub fn DateRangePicker(
    #[prop(into)]
    value: Signal<DateRange>,

    on_change: Callback<DateRange>,

    #[prop(optional)]
    label: Option<String>,
) -> impl IntoView {
    let on_start_change = move |start: String| {
        let end = value.get_untracked().end;
        on_change.run(DateRange::new(start, end));
    };

    let on_end_change = move |end: String| {
        let start = value.get_untracked().start;
        on_change.run(DateRange::new(start, end));
    };

    let invalid = move || value.with(|range| range.validate().err());

    view! {
        <Flex vertical=true gap=FlexGap::Small>
            {label.map(|l| view! { <Label>{l}</Label> })}

            <Flex class="date-range-picker" align=FlexAlign::Center gap=FlexGap::Small>
                <input
                    type="date"
                    class="date-range-picker__input"
                    prop:value=move || value.with(|r| r.start.clone())
                    on:input=move |ev| on_start_change(event_target_value(&ev))
                />
                <div>"—"</div>
                <input
                    type="date"
                    class="date-range-picker__input"
                    prop:value=move || value.with(|r| r.end.clone())
                    on:input=move |ev| on_end_change(event_target_value(&ev))
                />
                <ButtonGroup>
                    {PRESETS
                        .into_iter()
                        .map(|days| {
                            view! {
                                <Button
                                    size=ButtonSize::Small
                                    appearance=ButtonAppearance::Subtle
                                    on_click=move |_| {
                                        let today = Utc::now().date_naive();
                                        on_change.run(DateRange::last_days(today, days));
                                    }
                                >
                                    {format!("{}d", days)}
                                </Button>
                            }
                        })
                        .collect_view()}
                </ButtonGroup>
            </Flex>

            {move || invalid().map(|msg| view! { <span class="date-range-picker__error">{msg}</span> })}
        </Flex>
    }
}
