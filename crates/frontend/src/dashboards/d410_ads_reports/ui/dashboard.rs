use contracts::dashboards::d410_ads_reports::{DateRange, ExportRequest, MetricKey};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::comparison_chart::ComparisonChart;
use super::comparison_table::ComparisonTable;
use super::filter_panel::BreakdownFilterPanel;
use super::metric_pills::MetricPills;
use crate::dashboards::d410_ads_reports::api;
use crate::dashboards::d410_ads_reports::error::ReportsError;
use crate::dashboards::d410_ads_reports::fetch_control::{FetchCoordinator, RequestGuard, Settled};
use crate::dashboards::d410_ads_reports::report_state::ReportState;
use crate::dashboards::d410_ads_reports::session::ReportSession;
use crate::shared::config::Config;
use crate::shared::export::{download_bytes, open_in_new_tab, XLSX_MIME};
use crate::shared::icons::icon;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ViewMode {
    Table,
    Chart,
}

/// Ads report builder page.
///
/// Date range and account come from the host; everything else is session state.
#[component]
pub fn ReportsDashboard(
    config: Config,
    #[prop(into)]
    date_range: Signal<DateRange>,
    #[prop(into)]
    account_id: Signal<Option<String>>,
) -> impl IntoView {
    let session = RwSignal::new(ReportSession::new(config.reports.slot_mode));
    let report = RwSignal::new(ReportState::default());
    let api_config = StoredValue::new(config.api.clone());
    let max_bars = config.reports.chart_max_bars;
    let default_currency = config.reports.default_currency.clone();

    let connect_prompt = RwSignal::new(None::<String>);
    let export_error = RwSignal::new(None::<String>);
    let exporting = RwSignal::new(false);
    let view_mode = RwSignal::new(ViewMode::Table);

    let fetches = StoredValue::new_local(FetchCoordinator::new(config.reports.debounce_ms));
    let in_flight = StoredValue::new_local(None::<RequestGuard>);

    // Only breakdowns and filters refetch; metric toggles do not
    let query_inputs = Memo::new(move |_| session.with(|s| (s.selection, s.filters.clone())));
    let rows = Memo::new(move |_| report.with(|r| r.rows.clone()));
    let loading = Signal::derive(move || report.with(|r| r.loading));
    let currency_code = Signal::derive(move || {
        report
            .with(|r| r.currency.clone())
            .unwrap_or_else(|| default_currency.clone())
    });
    let selected_metrics =
        Signal::derive(move || session.with(|s| s.metrics.iter().copied().collect::<Vec<_>>()));
    let breakdowns = Signal::derive(move || report.with(|r| r.breakdowns.clone()));
    let show_comparison = Signal::derive(move || report.with(|r| r.has_comparison));

    let run_fetch = move || {
        let query = session.with_untracked(|s| {
            s.query(date_range.get_untracked(), account_id.get_untracked())
        });
        if let Some(previous) = in_flight.get_value() {
            previous.abort();
        }

        let ticket = match fetches.with_value(|f| f.start(&query)) {
            Ok(ticket) => ticket,
            Err(e) => {
                log::debug!("Report fetch rejected: {}", e);
                in_flight.set_value(None);
                report.update(|r| r.fail(e));
                return;
            }
        };

        let api_config = api_config.get_value();
        let guard = RequestGuard::new(api_config.timeout_ms);
        in_flight.set_value(Some(guard.clone()));
        guard.arm_timeout();

        report.update(ReportState::begin);
        log::debug!("Fetching report via {:?}, ticket {:?}", query.source(), ticket);

        spawn_local(async move {
            let result = api::fetch_report(&api_config, &query, &guard).await;
            let settled = fetches.with_value(|f| f.settle(ticket, result));
            match &settled {
                Settled::Commit(data) => {
                    log::debug!("Report loaded: {} rows", data.rows.len());
                    session.update(|s| {
                        s.record_loaded(&data.rows);
                    });
                }
                Settled::Fail(e) => log::error!("Report fetch failed: {}", e),
                Settled::Discard => {
                    log::debug!("Dropping stale report result, ticket {:?}", ticket)
                }
                Settled::Idle => {}
            }
            report.update(|r| r.settle(settled));
        });
    };

    // Mount, date range and account: immediate
    Effect::new(move |_| {
        date_range.track();
        account_id.track();
        run_fetch();
    });

    // Breakdowns and filter text: debounced
    Effect::new(move |prev: Option<()>| {
        query_inputs.track();
        if prev.is_none() {
            return;
        }
        let (ticket, mut wait) =
            fetches.with_value(|f| (f.schedule(js_sys::Date::now()), f.debounce_ms()));
        spawn_local(async move {
            loop {
                TimeoutFuture::new(wait).await;
                match fetches.with_value(|f| f.remaining_ms(ticket, js_sys::Date::now())) {
                    Some(0) => {
                        run_fetch();
                        break;
                    }
                    Some(rest) => wait = rest,
                    None => break,
                }
            }
        });
    });

    // Selected metrics follow the selection's availability
    Effect::new(move |_| {
        query_inputs.track();
        if session.with_untracked(ReportSession::has_unavailable_metrics) {
            session.update(|s| {
                s.sync_metrics();
            });
        }
    });

    let export_request = move || -> Option<ExportRequest> {
        let metrics =
            session.with_untracked(|s| s.metrics.iter().copied().collect::<Vec<MetricKey>>());
        let (breakdowns, rows) = report.with_untracked(|r| (r.breakdowns.clone(), r.rows.clone()));
        if metrics.is_empty() || rows.is_empty() {
            return None;
        }
        Some(ExportRequest::new(
            date_range.get_untracked(),
            breakdowns,
            metrics,
            currency_code.get_untracked(),
            rows,
        ))
    };

    let on_export_excel = move |_| {
        let Some(request) = export_request() else {
            return;
        };
        exporting.set(true);
        export_error.set(None);
        let api_config = api_config.get_value();
        spawn_local(async move {
            match api::export_excel(&api_config, &request).await {
                Ok(bytes) => {
                    let file_name = request.file_name();
                    match download_bytes(&bytes, &file_name, XLSX_MIME) {
                        Ok(()) => log::info!("Exported {}", file_name),
                        Err(e) => {
                            log::error!("Excel download failed: {}", e);
                            export_error.set(Some(e));
                        }
                    }
                }
                Err(e) => {
                    log::error!("Excel export failed: {}", e);
                    export_error.set(Some(e.user_message()));
                }
            }
            exporting.set(false);
        });
    };

    let on_export_sheets = move |_| {
        let Some(request) = export_request() else {
            return;
        };
        exporting.set(true);
        connect_prompt.set(None);
        export_error.set(None);
        let api_config = api_config.get_value();
        spawn_local(async move {
            match api::export_google_sheets(&api_config, &request).await {
                Ok(response) => {
                    log::info!("Exported to Google Sheets: {}", response.url);
                    if let Err(e) = open_in_new_tab(&response.url) {
                        log::error!("{}", e);
                        export_error.set(Some(e));
                    }
                }
                Err(e) if e.is_integration_auth() => {
                    log::info!("Google Sheets export needs a connected account");
                    connect_prompt.set(Some(e.user_message()));
                }
                Err(e) => {
                    log::error!("Google Sheets export failed: {}", e);
                    export_error.set(Some(e.user_message()));
                }
            }
            exporting.set(false);
        });
    };

    let export_disabled = Signal::derive(move || {
        exporting.get() || loading.get() || rows.with(|r| r.is_empty())
    });

    view! {
        <div id="d410_ads_reports--dashboard" class="reports-dashboard">
            <BreakdownFilterPanel session=session />
            <MetricPills session=session />

            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center class="reports-dashboard__toolbar">
                <ButtonGroup>
                    <Button
                        size=ButtonSize::Small
                        appearance=move || {
                            if view_mode.get() == ViewMode::Table {
                                ButtonAppearance::Primary
                            } else {
                                ButtonAppearance::Secondary
                            }
                        }
                        on_click=move |_| view_mode.set(ViewMode::Table)
                    >
                        {icon("table")}
                        " Table"
                    </Button>
                    <Button
                        size=ButtonSize::Small
                        appearance=move || {
                            if view_mode.get() == ViewMode::Chart {
                                ButtonAppearance::Primary
                            } else {
                                ButtonAppearance::Secondary
                            }
                        }
                        on_click=move |_| view_mode.set(ViewMode::Chart)
                    >
                        {icon("bar-chart")}
                        " Chart"
                    </Button>
                </ButtonGroup>
                <Space>
                    <Button
                        size=ButtonSize::Small
                        appearance=ButtonAppearance::Secondary
                        disabled=export_disabled
                        on_click=on_export_excel
                    >
                        {icon("download")}
                        " Excel"
                    </Button>
                    <Button
                        size=ButtonSize::Small
                        appearance=ButtonAppearance::Secondary
                        disabled=export_disabled
                        on_click=on_export_sheets
                    >
                        {icon("download")}
                        " Google Sheets"
                    </Button>
                </Space>
            </Flex>

            {move || connect_prompt.get().map(|msg| view! {
                <div class="reports-dashboard__notice">
                    <span>{msg}</span>
                    <Button
                        size=ButtonSize::Small
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| connect_prompt.set(None)
                    >
                        {icon("x")}
                    </Button>
                </div>
            })}

            {move || {
                let (message, retryable) = report.with(|r| {
                    (r.error.as_ref().map(ReportsError::user_message), r.retryable_error())
                });
                message.map(|msg| view! {
                    <div class="reports-dashboard__error">
                        <strong>"Error: "</strong>
                        <span>{msg}</span>
                        {retryable.then(|| view! {
                            <Button
                                size=ButtonSize::Small
                                appearance=ButtonAppearance::Secondary
                                disabled=loading
                                on_click=move |_| run_fetch()
                            >
                                {icon("refresh")}
                                " Retry"
                            </Button>
                        })}
                        <Button
                            size=ButtonSize::Small
                            appearance=ButtonAppearance::Subtle
                            on_click=move |_| report.update(|r| r.error = None)
                        >
                            {icon("x")}
                        </Button>
                    </div>
                })
            }}

            {move || export_error.get().map(|msg| view! {
                <div class="reports-dashboard__error">
                    <strong>"Export failed: "</strong>
                    <span>{msg}</span>
                    <Button
                        size=ButtonSize::Small
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| export_error.set(None)
                    >
                        {icon("x")}
                    </Button>
                </div>
            })}

            {move || {
                if loading.get() {
                    view! {
                        <Space gap=SpaceGap::Small>
                            <Spinner />
                            <span>"Loading report..."</span>
                        </Space>
                    }.into_any()
                } else if selected_metrics.with(|m| m.is_empty()) {
                    view! {
                        <div class="reports-dashboard__empty">
                            "No metrics selected. Pick at least one metric above."
                        </div>
                    }.into_any()
                } else if rows.with(|r| r.is_empty()) {
                    if report.with(|r| r.error.is_some()) {
                        view! { <></> }.into_any()
                    } else {
                        view! {
                            <div class="reports-dashboard__empty">"No data for this period."</div>
                        }.into_any()
                    }
                } else if view_mode.get() == ViewMode::Chart {
                    view! {
                        <ComparisonChart
                            rows=rows
                            metrics=selected_metrics
                            currency=currency_code
                            max_bars=max_bars
                        />
                    }.into_any()
                } else {
                    view! {
                        <ComparisonTable
                            rows=rows
                            metrics=selected_metrics
                            breakdowns=breakdowns
                            currency=currency_code
                            show_comparison=show_comparison
                        />
                    }.into_any()
                }
            }}
        </div>
    }
}
