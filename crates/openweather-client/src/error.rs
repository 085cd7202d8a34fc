use std::fmt;

/// Errors from the OpenWeather client
#[derive(Debug)]
pub enum OpenWeatherError {
    Http(reqwest::Error),
    ApiError(String),
    /// A period carried no weather condition entry
    MissingConditions,
}

impl fmt::Display for OpenWeatherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "HTTP error: {e}"),
            Self::ApiError(msg) => write!(f, "API error: {msg}"),
            Self::MissingConditions => write!(f, "Response contained no weather conditions"),
        }
    }
}

impl std::error::Error for OpenWeatherError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for OpenWeatherError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err)
    }
}

pub type Result<T> = std::result::Result<T, OpenWeatherError>;
