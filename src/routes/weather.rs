// SPDX-License-Identifier: MIT

//! Weather banner route.

use crate::error::{AppError, Result};
use crate::services::weather::WeatherSummary;
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

const DEFAULT_CITY: &str = "臺北市";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/weather", get(get_weather))
}

#[derive(Deserialize)]
struct WeatherQuery {
    city: Option<String>,
}

async fn get_weather(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<WeatherSummary>> {
    let weather = state
        .weather
        .as_ref()
        .ok_or(AppError::Config("CWA_API_KEY"))?;

    let city = query.city.as_deref().unwrap_or(DEFAULT_CITY);
    let summary = weather.forecast(city).await?;
    Ok(Json(summary))
}
