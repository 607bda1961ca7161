use contracts::dashboards::d410_ads_reports::normalize::{
    compare_rows, entity_special_rows, records_from_value, special_rows,
};
use contracts::dashboards::d410_ads_reports::{
    BreakdownDimension, CompareResponse, ComparisonRow, ExportRequest, ReportQuery, ReportSource,
    SheetsExportResponse,
};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::error::ReportsError;
use super::fetch_control::RequestGuard;
use crate::shared::api_utils::{api_url, with_query};
use crate::shared::config::ApiConfig;

const SHEETS_PROVIDER: &str = "Google";

/// Normalized result of one report fetch
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportData {
    pub rows: Vec<ComparisonRow>,
    /// Currency reported by the backend, if any
    pub currency: Option<String>,
    /// Breakdown columns carried by `rows`, in slot order
    pub breakdowns: Vec<BreakdownDimension>,
    /// Rows carry previous-period figures
    pub has_comparison: bool,
}

/// Fetches the report for `query` from the one endpoint that serves its selection
pub async fn fetch_report(
    api: &ApiConfig,
    query: &ReportQuery,
    guard: &RequestGuard,
) -> Result<ReportData, ReportsError> {
    let breakdowns = query.row_breakdowns();
    let has_comparison = query.has_comparison();
    match query.source() {
        ReportSource::Standard => {
            let params = query.compare_params();
            let response: CompareResponse =
                get_json(&api_url(&api.base_url, "/reports/compare"), &params, guard).await?;
            let currency = response.currency.clone().filter(|c| !c.trim().is_empty());
            Ok(ReportData {
                rows: compare_rows(response, &query.selection),
                currency,
                breakdowns,
                has_comparison,
            })
        }
        ReportSource::SpecialOnly { special } => {
            let path = breakdown_path(special)?;
            let params = query.breakdown_params(special);
            let value: Value = get_json(&api_url(&api.base_url, &path), &params, guard).await?;
            Ok(ReportData {
                rows: special_rows(&records_from_value(value), special),
                currency: None,
                breakdowns,
                has_comparison,
            })
        }
        ReportSource::EntitySpecial { entity, special } => {
            let path = by_entity_path(special)?;
            let params = query.entity_breakdown_params(entity, special);
            let value: Value = get_json(&api_url(&api.base_url, &path), &params, guard).await?;
            Ok(ReportData {
                rows: entity_special_rows(
                    &records_from_value(value),
                    &query.selection,
                    entity,
                    special,
                ),
                currency: None,
                breakdowns,
                has_comparison,
            })
        }
    }
}

fn breakdown_path(special: BreakdownDimension) -> Result<String, ReportsError> {
    special
        .breakdown_endpoint()
        .map(|kind| format!("/metrics/breakdowns/{}", kind))
        .ok_or_else(|| ReportsError::Serialize(format!("{} is not a special breakdown", special)))
}

fn by_entity_path(special: BreakdownDimension) -> Result<String, ReportsError> {
    special
        .by_entity_endpoint()
        .map(|kind| format!("/breakdowns/{}/by-entity", kind))
        .ok_or_else(|| ReportsError::Serialize(format!("{} is not a special breakdown", special)))
}

/// Downloads the Excel rendition of the report bytes
pub async fn export_excel(api: &ApiConfig, request: &ExportRequest) -> Result<Vec<u8>, ReportsError> {
    let url = api_url(&api.base_url, "/export/excel-generic");
    let response = post_json(&url, request).await?;
    let response = ensure_ok(response, None, None).await?;
    response
        .binary()
        .await
        .map_err(|e| ReportsError::Parse(e.to_string()))
}

/// Creates a Google Sheets copy of the report and returns its URL
pub async fn export_google_sheets(
    api: &ApiConfig,
    request: &ExportRequest,
) -> Result<SheetsExportResponse, ReportsError> {
    let url = api_url(&api.base_url, "/export/google-sheets-generic");
    let response = post_json(&url, request).await?;
    let response = ensure_ok(response, Some(SHEETS_PROVIDER), None).await?;
    response
        .json()
        .await
        .map_err(|e| ReportsError::Parse(e.to_string()))
}

async fn get_json<T, Q>(url: &str, params: &Q, guard: &RequestGuard) -> Result<T, ReportsError>
where
    T: DeserializeOwned,
    Q: Serialize,
{
    let qs = serde_qs::to_string(params).map_err(|e| ReportsError::Serialize(e.to_string()))?;
    let url = with_query(url.to_string(), &qs);
    log::debug!("GET {}", url);

    let signal = guard.signal();
    let response = Request::get(&url)
        .abort_signal(signal.as_ref())
        .send()
        .await
        .map_err(|e| guard.transport_error(e))?;

    let parsed = match ensure_ok(response, None, Some(guard)).await {
        Ok(response) => response
            .json::<T>()
            .await
            .map_err(|e| guard.body_error(e)),
        Err(e) => Err(e),
    };
    guard.finish();
    parsed
}

async fn post_json<B: Serialize>(url: &str, body: &B) -> Result<Response, ReportsError> {
    Request::post(url)
        .json(body)
        .map_err(|e| ReportsError::Serialize(e.to_string()))?
        .send()
        .await
        .map_err(|e| ReportsError::Network(e.to_string()))
}

async fn ensure_ok(
    response: Response,
    provider: Option<&str>,
    guard: Option<&RequestGuard>,
) -> Result<Response, ReportsError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.map_err(|e| match guard {
        Some(guard) => guard.body_error(e),
        None => ReportsError::Parse(e.to_string()),
    });
    Err(error_from_body(status, body, provider))
}

/// Error for a non-2xx response; an abort or timeout while reading its body wins over the status
fn error_from_body(
    status: u16,
    body: Result<String, ReportsError>,
    provider: Option<&str>,
) -> ReportsError {
    match body {
        Ok(body) => ReportsError::from_response(status, &body, provider),
        Err(e @ (ReportsError::Timeout { .. } | ReportsError::Cancelled)) => e,
        Err(_) => ReportsError::from_response(status, "", provider),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_special_paths() {
        assert_eq!(
            breakdown_path(BreakdownDimension::Age).unwrap(),
            "/metrics/breakdowns/age-gender"
        );
        assert_eq!(
            by_entity_path(BreakdownDimension::Gender).unwrap(),
            "/breakdowns/demographics/by-entity"
        );
        assert_eq!(
            by_entity_path(BreakdownDimension::Placement).unwrap(),
            "/breakdowns/placement/by-entity"
        );
        assert!(breakdown_path(BreakdownDimension::Date).is_err());
    }

    #[test]
    fn test_error_body_read_failures() {
        let timeout = ReportsError::Timeout { after_ms: 30_000 };
        assert_eq!(error_from_body(502, Err(timeout.clone()), None), timeout);
        assert_eq!(
            error_from_body(502, Err(ReportsError::Cancelled), None),
            ReportsError::Cancelled
        );
        assert_eq!(
            error_from_body(502, Err(ReportsError::Parse("eof".into())), None),
            ReportsError::Http {
                status: 502,
                message: String::new()
            }
        );
        assert_eq!(
            error_from_body(400, Ok(r#"{"detail":"bad account"}"#.into()), None).user_message(),
            "bad account"
        );
    }
}
