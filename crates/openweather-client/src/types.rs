use serde::Deserialize;

/// One period of conditions. The current-weather endpoint returns a single
/// period; the forecast endpoint returns a list of them.
#[derive(Debug, Deserialize)]
pub(crate) struct Period {
    pub(crate) dt: i64,
    pub(crate) main: MainReadings,
    pub(crate) wind: Wind,
    #[serde(default)]
    pub(crate) weather: Vec<Condition>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MainReadings {
    pub(crate) temp: f64,
    pub(crate) humidity: i32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Wind {
    pub(crate) speed: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Condition {
    pub(crate) description: String,
    pub(crate) icon: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ForecastResponse {
    pub(crate) list: Vec<Period>,
}
