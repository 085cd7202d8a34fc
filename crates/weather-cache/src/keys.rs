//! Durable store key naming
//!
//! Other services read these keys directly, so the format is fixed. City names
//! are used verbatim: no case folding, trimming or escaping.

pub const OBSERVATION_PREFIX: &str = "weather:";
pub const FORECAST_PREFIX: &str = "forecast:";

pub fn observation_key(city: &str) -> String {
    format!("{OBSERVATION_PREFIX}{city}")
}

pub fn forecast_key(city: &str) -> String {
    format!("{FORECAST_PREFIX}{city}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_format() {
        assert_eq!(observation_key("Pristina"), "weather:Pristina");
        assert_eq!(forecast_key("Pristina"), "forecast:Pristina");
    }

    #[test]
    fn test_namespaces_are_distinct() {
        assert_ne!(observation_key("Ferizaj"), forecast_key("Ferizaj"));
    }

    #[test]
    fn test_city_used_verbatim() {
        assert_eq!(observation_key("new york"), "weather:new york");
        assert_ne!(observation_key("Peja"), observation_key("peja"));
        assert_eq!(forecast_key("a:b"), "forecast:a:b");
    }
}
