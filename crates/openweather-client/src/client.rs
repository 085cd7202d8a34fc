use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;
use weather_cache::{ForecastSeries, WeatherObservation};

use crate::error::OpenWeatherError;
use crate::types::{ForecastResponse, Period};

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
const USER_AGENT: &str = "weather-cache/0.1";

/// OpenWeather API client
pub struct OpenWeatherClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    /// Create a new client against the public API
    pub fn new(api_key: &str) -> crate::Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a new client with a custom API base URL
    pub fn with_base_url(api_key: &str, base_url: &str) -> crate::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Current conditions at the given coordinates, labelled with `city`
    pub async fn current(
        &self,
        city: &str,
        latitude: f64,
        longitude: f64,
    ) -> crate::Result<WeatherObservation> {
        let period: Period = self.fetch("weather", latitude, longitude).await?;
        let obs = to_observation(city, period)?;
        debug!(city, temperature = obs.temperature, "Fetched current weather");
        Ok(obs)
    }

    /// Forecast periods at the given coordinates, oldest first
    pub async fn forecast(
        &self,
        city: &str,
        latitude: f64,
        longitude: f64,
    ) -> crate::Result<ForecastSeries> {
        let response: ForecastResponse = self.fetch("forecast", latitude, longitude).await?;
        let series = to_series(city, response)?;
        debug!(city, periods = series.len(), "Fetched forecast");
        Ok(series)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        latitude: f64,
        longitude: f64,
    ) -> crate::Result<T> {
        let url = endpoint_url(&self.base_url, endpoint, latitude, longitude, &self.api_key);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(OpenWeatherError::ApiError(format!(
                "OpenWeather {} returned status {}",
                endpoint,
                response.status()
            )));
        }

        Ok(response.json().await?)
    }
}

fn endpoint_url(base_url: &str, endpoint: &str, latitude: f64, longitude: f64, api_key: &str) -> String {
    format!(
        "{}/data/2.5/{}?lat={}&lon={}&appid={}&units=metric",
        base_url, endpoint, latitude, longitude, api_key
    )
}

fn to_observation(city: &str, period: Period) -> crate::Result<WeatherObservation> {
    let condition = period
        .weather
        .into_iter()
        .next()
        .ok_or(OpenWeatherError::MissingConditions)?;

    Ok(WeatherObservation {
        city: city.to_string(),
        temperature: period.main.temp,
        humidity: period.main.humidity,
        wind_speed: period.wind.speed,
        description: condition.description,
        icon: condition.icon,
        timestamp: period.dt,
    })
}

fn to_series(city: &str, response: ForecastResponse) -> crate::Result<ForecastSeries> {
    response
        .list
        .into_iter()
        .map(|period| to_observation(city, period))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURRENT: &str = r#"{
        "coord": {"lon": 21.1655, "lat": 42.6629},
        "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}],
        "main": {"temp": 23.4, "feels_like": 22.9, "pressure": 1016, "humidity": 38},
        "wind": {"speed": 3.6, "deg": 240},
        "dt": 1718880000,
        "name": "Pristina"
    }"#;

    const FORECAST: &str = r#"{
        "cod": "200",
        "cnt": 3,
        "list": [
            {"dt": 1718884800, "main": {"temp": 22.0, "humidity": 40}, "wind": {"speed": 3.1},
             "weather": [{"description": "few clouds", "icon": "02d"}]},
            {"dt": 1718895600, "main": {"temp": 19.5, "humidity": 52}, "wind": {"speed": 2.4},
             "weather": [{"description": "scattered clouds", "icon": "03n"}]},
            {"dt": 1718906400, "main": {"temp": 16.8, "humidity": 67}, "wind": {"speed": 1.9},
             "weather": [{"description": "light rain", "icon": "10n"}]}
        ]
    }"#;

    #[test]
    fn test_current_maps_fields() {
        let period: Period = serde_json::from_str(CURRENT).unwrap();
        let obs = to_observation("Pristina", period).unwrap();

        assert_eq!(obs.city, "Pristina");
        assert_eq!(obs.temperature, 23.4);
        assert_eq!(obs.humidity, 38);
        assert_eq!(obs.wind_speed, 3.6);
        assert_eq!(obs.description, "clear sky");
        assert_eq!(obs.icon, "01d");
        assert_eq!(obs.timestamp, 1_718_880_000);
    }

    #[test]
    fn test_city_label_comes_from_caller() {
        let period: Period = serde_json::from_str(CURRENT).unwrap();
        let obs = to_observation("Prishtina", period).unwrap();
        assert_eq!(obs.city, "Prishtina");
    }

    #[test]
    fn test_forecast_keeps_period_order() {
        let response: ForecastResponse = serde_json::from_str(FORECAST).unwrap();
        let series = to_series("Peja", response).unwrap();

        assert_eq!(series.len(), 3);
        let timestamps: Vec<i64> = series.iter().map(|o| o.timestamp).collect();
        assert_eq!(timestamps, vec![1_718_884_800, 1_718_895_600, 1_718_906_400]);
        assert_eq!(series[2].description, "light rain");
        assert!(series.iter().all(|o| o.city == "Peja"));
    }

    #[test]
    fn test_missing_conditions() {
        let raw = r#"{"dt": 1, "main": {"temp": 1.0, "humidity": 1}, "wind": {"speed": 1.0}}"#;
        let period: Period = serde_json::from_str(raw).unwrap();
        assert!(matches!(
            to_observation("Peja", period),
            Err(OpenWeatherError::MissingConditions)
        ));
    }

    #[test]
    fn test_endpoint_url() {
        let url = endpoint_url("http://localhost:9000", "forecast", 42.2139, 20.7397, "k3y");
        assert_eq!(
            url,
            "http://localhost:9000/data/2.5/forecast?lat=42.2139&lon=20.7397&appid=k3y&units=metric"
        );
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = OpenWeatherClient::with_base_url("k3y", "http://localhost:9000/").unwrap();
        assert_eq!(client.base_url, "http://localhost:9000");
    }
}
