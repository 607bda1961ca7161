use crate::shared::icons::icon;
use leptos::prelude::*;

/// Collapsible panel with a header badge, used by report builders
#[component]
pub fn CollapsiblePanel(
    /// Panel title
    #[prop(into)]
    title: String,

    /// Whether the panel is expanded
    #[prop(into)]
    is_expanded: RwSignal<bool>,

    /// Short summary shown in the header (hidden when empty)
    #[prop(into)]
    summary: Signal<String>,

    /// Right side of the header
    #[prop(optional, into)]
    header_actions: ViewFn,

    /// Panel body
    children: ChildrenFn,
) -> impl IntoView {
    let toggle_expanded = move |_| {
        is_expanded.update(|e| *e = !*e);
    };

    view! {
        <div class="filter-panel">
            <div class="filter-panel-header">
                <div class="filter-panel-header__left" on:click=toggle_expanded>
                    <span class=move || {
                        if is_expanded.get() {
                            "filter-panel__chevron filter-panel__chevron--expanded"
                        } else {
                            "filter-panel__chevron"
                        }
                    }>
                        {icon("chevron-down")}
                    </span>
                    {icon("filter")}
                    <span class="filter-panel__title">{title}</span>
                    {move || {
                        let text = summary.get();
                        if text.is_empty() {
                            view! { <></> }.into_any()
                        } else {
                            view! { <span class="badge badge--primary">{text}</span> }.into_any()
                        }
                    }}
                </div>
                <div class="filter-panel-header__right">
                    {header_actions.run()}
                </div>
            </div>

            <div class=move || {
                if is_expanded.get() {
                    "filter-panel__collapsible filter-panel__collapsible--expanded"
                } else {
                    "filter-panel__collapsible filter-panel__collapsible--collapsed"
                }
            }>
                <div class="filter-panel-content">{children()}</div>
            </div>
        </div>
    }
}

/// Clickable chip. `position` is the 1-based slot it occupies, if any.
#[component]
pub fn FilterTag(
    #[prop(into)]
    label: String,

    #[prop(into)]
    position: Signal<Option<usize>>,

    /// Rendered dimmed when selecting it would start a fresh selection
    #[prop(into)]
    replaces_selection: Signal<bool>,

    on_click: Callback<()>,
) -> impl IntoView {
    let class = move || {
        let mut class = String::from("filter-tag");
        if position.get().is_some() {
            class.push_str(" filter-tag--selected");
        } else if replaces_selection.get() {
            class.push_str(" filter-tag--replaces");
        }
        class
    };

    view! {
        <button type="button" class=class on:click=move |_| on_click.run(())>
            {move || position.get().map(|p| view! { <span class="filter-tag__slot">{p}</span> })}
            <span>{label}</span>
        </button>
    }
}
