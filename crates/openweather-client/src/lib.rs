//! OpenWeather Client
//!
//! Fetches current conditions and the 5 day / 3 hour forecast from the
//! [OpenWeather](https://openweathermap.org/api) 2.5 API and maps them onto
//! [`weather_cache::WeatherObservation`] records, in metric units.

mod client;
mod error;
mod types;

pub use client::OpenWeatherClient;
pub use error::{OpenWeatherError, Result};
