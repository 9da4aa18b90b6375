// SPDX-License-Identifier: MIT

//! CWA (Central Weather Administration) open-data client.
//!
//! Uses the 36-hour city forecast dataset (`F-C0032-001`) and condenses the
//! first forecast window into a single summary for the banner widget.

use crate::error::AppError;
use serde::{Deserialize, Serialize};

const CWA_BASE_URL: &str = "https://opendata.cwa.gov.tw";
const FORECAST_DATASET: &str = "F-C0032-001";

/// Condensed forecast served to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSummary {
    pub city_name: String,
    pub description: String,
    pub min_temp: String,
    pub max_temp: String,
    /// Probability of precipitation, percent
    pub rain_probability: String,
}

/// CWA open-data API client.
#[derive(Clone)]
pub struct CwaClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl CwaClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: CWA_BASE_URL.to_string(),
            api_key,
        }
    }

    /// Override the provider URL (for tests against a local stub).
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// 36-hour forecast summary for a city (e.g. "臺北市").
    pub async fn forecast(&self, city: &str) -> Result<WeatherSummary, AppError> {
        let url = format!(
            "{}/api/v1/rest/datastore/{}",
            self.base_url, FORECAST_DATASET
        );

        let response = self
            .http
            .get(&url)
            .query(&[("Authorization", self.api_key.as_str()), ("locationName", city)])
            .send()
            .await
            .map_err(|e| AppError::WeatherApi(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::WeatherApi(format!(
                "CWA returned {}",
                response.status()
            )));
        }

        let forecast: ForecastResponse = response
            .json()
            .await
            .map_err(|e| AppError::WeatherApi(format!("Invalid CWA response: {}", e)))?;

        let location = forecast
            .records
            .location
            .into_iter()
            .find(|loc| loc.location_name == city)
            .ok_or_else(|| AppError::NotFound(format!("No forecast for city {}", city)))?;

        Ok(summarize(location))
    }
}

fn summarize(location: ForecastLocation) -> WeatherSummary {
    let first_window = |name: &str| -> String {
        location
            .weather_element
            .iter()
            .find(|el| el.element_name == name)
            .and_then(|el| el.time.first())
            .map(|t| t.parameter.parameter_name.clone())
            .unwrap_or_else(|| "--".to_string())
    };

    WeatherSummary {
        description: first_window("Wx"),
        min_temp: first_window("MinT"),
        max_temp: first_window("MaxT"),
        rain_probability: first_window("PoP"),
        city_name: location.location_name,
    }
}

// ─── CWA response shapes ─────────────────────────────────────

#[derive(Deserialize)]
struct ForecastResponse {
    records: ForecastRecords,
}

#[derive(Deserialize)]
struct ForecastRecords {
    location: Vec<ForecastLocation>,
}

#[derive(Deserialize)]
struct ForecastLocation {
    #[serde(rename = "locationName")]
    location_name: String,
    #[serde(rename = "weatherElement")]
    weather_element: Vec<WeatherElement>,
}

#[derive(Deserialize)]
struct WeatherElement {
    #[serde(rename = "elementName")]
    element_name: String,
    time: Vec<TimeWindow>,
}

#[derive(Deserialize)]
struct TimeWindow {
    parameter: Parameter,
}

#[derive(Deserialize)]
struct Parameter {
    #[serde(rename = "parameterName")]
    parameter_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_from_cwa_payload() {
        let payload = serde_json::json!({
            "records": {
                "location": [{
                    "locationName": "臺北市",
                    "weatherElement": [
                        { "elementName": "Wx",   "time": [{ "parameter": { "parameterName": "多雲時晴" } }] },
                        { "elementName": "MinT", "time": [{ "parameter": { "parameterName": "18" } }] },
                        { "elementName": "MaxT", "time": [{ "parameter": { "parameterName": "24" } }] },
                        { "elementName": "PoP",  "time": [{ "parameter": { "parameterName": "30" } }] }
                    ]
                }]
            }
        });

        let forecast: ForecastResponse = serde_json::from_value(payload).unwrap();
        let location = forecast.records.location.into_iter().next().unwrap();
        let summary = summarize(location);

        assert_eq!(summary.city_name, "臺北市");
        assert_eq!(summary.description, "多雲時晴");
        assert_eq!(summary.min_temp, "18");
        assert_eq!(summary.max_temp, "24");
        assert_eq!(summary.rain_probability, "30");
    }

    #[test]
    fn test_summarize_missing_element_defaults() {
        let location = ForecastLocation {
            location_name: "臺中市".to_string(),
            weather_element: Vec::new(),
        };
        let summary = summarize(location);
        assert_eq!(summary.description, "--");
        assert_eq!(summary.rain_probability, "--");
    }
}
