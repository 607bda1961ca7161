use contracts::dashboards::d410_ads_reports::{BreakdownCategory, BreakdownDimension};
use leptos::prelude::*;
use thaw::*;

use crate::dashboards::d410_ads_reports::session::ReportSession;
use crate::shared::components::{CollapsiblePanel, FilterTag};

const GROUPS: [(BreakdownCategory, &str); 3] = [
    (BreakdownCategory::Entity, "Entity"),
    (BreakdownCategory::Time, "Time"),
    (BreakdownCategory::Special, "Delivery"),
];

/// Breakdown chips grouped by category, plus name filters for the selected entity levels
#[component]
pub fn BreakdownFilterPanel(session: RwSignal<ReportSession>) -> impl IntoView {
    let is_expanded = RwSignal::new(true);
    let summary = Signal::derive(move || session.with(|s| s.summary()));
    let max_slots = session.with_untracked(|s| s.mode().max_slots());

    let clear_action = move || {
        if session.with(|s| s.selection.is_empty()) {
            view! { <></> }.into_any()
        } else {
            view! {
                <Button
                    size=ButtonSize::Small
                    appearance=ButtonAppearance::Subtle
                    on_click=move |_| session.update(|s| s.clear())
                >
                    "Clear"
                </Button>
            }
            .into_any()
        }
    };

    view! {
        <CollapsiblePanel
            title="Breakdown"
            is_expanded=is_expanded
            summary=summary
            header_actions=clear_action
        >
            <div class="breakdown-panel">
                <div class="breakdown-panel__hint">
                    {format!("Pick up to {} breakdowns, one per group", max_slots)}
                </div>
                {GROUPS
                    .into_iter()
                    .map(|(category, title)| {
                        view! {
                            <div class="breakdown-panel__group">
                                <span class="breakdown-panel__group-title">{title}</span>
                                <div class="breakdown-panel__chips">
                                    {BreakdownDimension::CHIPS
                                        .into_iter()
                                        .filter(|d| d.category() == category)
                                        .map(|dim| chip(session, dim))
                                        .collect_view()}
                                </div>
                            </div>
                        }
                    })
                    .collect_view()}
                <EntityFilterInputs session=session />
            </div>
        </CollapsiblePanel>
    }
}

fn chip(session: RwSignal<ReportSession>, dim: BreakdownDimension) -> impl IntoView {
    view! {
        <FilterTag
            label=dim.label()
            position=Signal::derive(move || session.with(|s| s.position(dim)))
            replaces_selection=Signal::derive(move || session.with(|s| s.click_replaces(dim)))
            on_click=Callback::new(move |_| session.update(|s| s.handle_chip_click(dim)))
        />
    }
}

#[component]
fn EntityFilterInputs(session: RwSignal<ReportSession>) -> impl IntoView {
    let visible = Memo::new(move |_| session.with(|s| s.visible_filters()));

    move || {
        visible
            .get()
            .into_iter()
            .map(|level| {
                view! {
                    <label class="breakdown-panel__filter">
                        <span>{level.filter_label()}</span>
                        <input
                            type="text"
                            placeholder="Contains…"
                            prop:value=move || session.with(|s| s.filters.get(level).to_string())
                            on:input=move |ev| {
                                let text = event_target_value(&ev);
                                session.update(|s| s.set_filter(level, text));
                            }
                        />
                    </label>
                }
            })
            .collect_view()
    }
}
