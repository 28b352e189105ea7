//! Domain types shared across the gateway.

use serde::{Deserialize, Serialize};

// ── Forecast Types ────────────────────────────────────────────────────

/// A surf forecast snapshot for one spot.
///
/// Serialized with the gateway's wire names (`spotId`, `waveHeight`, ...,
/// and `timestamp` for the generation time).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastRecord {
    pub spot_id: String,
    pub location: String,
    pub wave_height: String,
    pub wind_speed: String,
    pub wind_direction: String,
    pub tide: String,
    /// Epoch seconds at which the record was computed.
    #[serde(rename = "timestamp")]
    pub generated_at: i64,
}

/// Static surf conditions for a known spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpotConditions {
    pub wave_height: &'static str,
    pub wind_speed: &'static str,
    pub wind_direction: &'static str,
    pub tide: &'static str,
}

impl SpotConditions {
    /// Placeholder conditions for spots missing from the registry.
    pub const UNKNOWN: SpotConditions = SpotConditions {
        wave_height: "Unknown",
        wind_speed: "Unknown",
        wind_direction: "Unknown",
        tide: "Unknown",
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn malibu() -> ForecastRecord {
        ForecastRecord {
            spot_id: "5842041f4e65fad6a7708814".into(),
            location: "Malibu, CA".into(),
            wave_height: "3.8 ft at 12 seconds 215 degrees".into(),
            wind_speed: "5 mph".into(),
            wind_direction: "Offshore".into(),
            tide: "Rising, 2.5ft at 10:30am".into(),
            generated_at: 1_700_000_000,
        }
    }

    #[test]
    fn test_wire_field_names() {
        let value = serde_json::to_value(malibu()).expect("record should serialize");

        assert_eq!(
            value,
            json!({
                "spotId": "5842041f4e65fad6a7708814",
                "location": "Malibu, CA",
                "waveHeight": "3.8 ft at 12 seconds 215 degrees",
                "windSpeed": "5 mph",
                "windDirection": "Offshore",
                "tide": "Rising, 2.5ft at 10:30am",
                "timestamp": 1_700_000_000
            })
        );
    }

    #[test]
    fn test_deserialize_from_wire() {
        let raw = r#"{
            "spotId": "abc",
            "location": "Unknown Location",
            "waveHeight": "Unknown",
            "windSpeed": "Unknown",
            "windDirection": "Unknown",
            "tide": "Unknown",
            "timestamp": 42
        }"#;
        let parsed: ForecastRecord = serde_json::from_str(raw).expect("record should deserialize");

        assert_eq!(parsed.spot_id, "abc");
        assert_eq!(parsed.generated_at, 42);
        assert_eq!(parsed.tide, SpotConditions::UNKNOWN.tide);
    }
}
