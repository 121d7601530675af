// HTTP request handlers
use crate::domain::period::{PeriodOption, PeriodParseError, PeriodSelector};
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;

#[derive(Deserialize)]
pub struct PeriodQuery {
    pub period: Option<String>,
}

impl PeriodQuery {
    fn selector(&self) -> Result<PeriodSelector, ApiError> {
        match self.period.as_deref() {
            Some(raw) => Ok(raw.parse()?),
            None => Ok(PeriodSelector::default()),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    InvalidPeriod(#[from] PeriodParseError),

    #[error("unknown salesperson '{0}'")]
    UnknownSalesperson(String),

    #[error("failed to encode response")]
    Encoding(StatusCode),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidPeriod(_) => StatusCode::BAD_REQUEST,
            ApiError::UnknownSalesperson(_) => StatusCode::NOT_FOUND,
            ApiError::Encoding(status) => *status,
        };
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Period choices in menu order
pub async fn list_periods(headers: HeaderMap) -> Result<Response, ApiError> {
    let periods: Vec<PeriodOption> = PeriodSelector::all().iter().map(|p| p.option()).collect();
    json_response(&periods, StatusCode::OK, accepts_brotli(&headers))
        .await
        .map_err(ApiError::Encoding)
}

/// Funnels, conversion rates and closed sales for one period
pub async fn get_dashboard(
    Query(query): Query<PeriodQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let selector = query.selector()?;
    let dashboard = state.dashboard_service.get_dashboard(selector).await;

    json_response(&dashboard, StatusCode::OK, accepts_brotli(&headers))
        .await
        .map_err(ApiError::Encoding)
}

/// Funnel for a single salesperson
pub async fn get_salesperson_funnel(
    Path(name): Path<String>,
    Query(query): Query<PeriodQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let selector = query.selector()?;
    let funnel = state
        .dashboard_service
        .get_salesperson_funnel(&name, selector)
        .await
        .ok_or(ApiError::UnknownSalesperson(name))?;

    json_response(&funnel, StatusCode::OK, accepts_brotli(&headers))
        .await
        .map_err(ApiError::Encoding)
}

/// Drop cached spreadsheets so the next request reloads them
pub async fn refresh(State(state): State<Arc<AppState>>) -> StatusCode {
    state.dashboard_service.refresh().await;
    StatusCode::NO_CONTENT
}
