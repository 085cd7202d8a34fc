//! JSON encoding of cached records
//!
//! Records are stored in the durable tier as JSON so other services can read
//! the same keys.

use crate::error::CodecError;
use crate::types::WeatherObservation;

/// JSON has no representation for NaN or infinities.
fn check_finite(obs: &WeatherObservation) -> Result<(), CodecError> {
    if !obs.temperature.is_finite() {
        return Err(CodecError::NonFinite {
            field: "temperature",
        });
    }
    if !obs.wind_speed.is_finite() {
        return Err(CodecError::NonFinite {
            field: "wind_speed",
        });
    }
    Ok(())
}

pub fn encode_observation(obs: &WeatherObservation) -> Result<Vec<u8>, CodecError> {
    check_finite(obs)?;
    Ok(serde_json::to_vec(obs)?)
}

pub fn decode_observation(bytes: &[u8]) -> Result<WeatherObservation, CodecError> {
    Ok(serde_json::from_slice(bytes)?)
}

pub fn encode_forecast(series: &[WeatherObservation]) -> Result<Vec<u8>, CodecError> {
    for obs in series {
        check_finite(obs)?;
    }
    Ok(serde_json::to_vec(series)?)
}

pub fn decode_forecast(bytes: &[u8]) -> Result<Vec<WeatherObservation>, CodecError> {
    Ok(serde_json::from_slice(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation(city: &str, temperature: f64) -> WeatherObservation {
        WeatherObservation {
            city: city.to_string(),
            temperature,
            humidity: 55,
            wind_speed: 4.0,
            description: "scattered clouds".to_string(),
            icon: "03d".to_string(),
            timestamp: 1_700_000_000,
        }
    }

    #[test]
    fn test_observation_round_trip() {
        let obs = observation("Prizren", 18.25);
        let bytes = encode_observation(&obs).unwrap();
        assert_eq!(decode_observation(&bytes).unwrap(), obs);
    }

    #[test]
    fn test_encoding_is_human_readable_json() {
        let bytes = encode_observation(&observation("Peja", 10.0)).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("\"city\":\"Peja\""));
        assert!(text.contains("\"description\":\"scattered clouds\""));
    }

    #[test]
    fn test_non_finite_temperature_rejected() {
        let err = encode_observation(&observation("Peja", f64::NAN)).unwrap_err();
        assert!(matches!(
            err,
            CodecError::NonFinite {
                field: "temperature"
            }
        ));
    }

    #[test]
    fn test_forecast_rejects_any_non_finite_entry() {
        let mut bad = observation("Peja", 5.0);
        bad.wind_speed = f64::INFINITY;
        let series = vec![observation("Peja", 4.0), bad];

        let err = encode_forecast(&series).unwrap_err();
        assert!(matches!(err, CodecError::NonFinite { field: "wind_speed" }));
    }

    #[test]
    fn test_decode_accepts_records_written_by_other_services() {
        let raw = br#"{"city":"Gjakova","temperature":12.5,"humidity":81,"wind_speed":1.5,"description":"mist","icon":"50n","timestamp":1699999999}"#;
        let obs = decode_observation(raw).unwrap();
        assert_eq!(obs.city, "Gjakova");
        assert_eq!(obs.humidity, 81);
        assert_eq!(obs.timestamp, 1_699_999_999);
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(matches!(
            decode_observation(b"not json"),
            Err(CodecError::Json(_))
        ));
        assert!(decode_forecast(br#"{"city":"Peja"}"#).is_err());
    }
}
