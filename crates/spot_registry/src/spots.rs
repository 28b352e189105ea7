//! Static table of known surf spots, keyed by Surfline spot id.

use common::SpotConditions;

/// Location reported for ids missing from the table.
pub const UNKNOWN_LOCATION: &str = "Unknown Location";

/// A registered spot and its canned conditions.
#[derive(Debug, Clone, Copy)]
pub struct SpotProfile {
    pub id: &'static str,
    pub location: &'static str,
    pub conditions: SpotConditions,
}

pub const SPOTS: &[SpotProfile] = &[
    SpotProfile {
        id: "5842041f4e65fad6a7708814",
        location: "Malibu, CA",
        conditions: SpotConditions {
            wave_height: "3.8 ft at 12 seconds 215 degrees",
            wind_speed: "5 mph",
            wind_direction: "Offshore",
            tide: "Rising, 2.5ft at 10:30am",
        },
    },
    SpotProfile {
        id: "5842041f4e65fad6a770883d",
        location: "Huntington Beach, CA",
        conditions: SpotConditions {
            wave_height: "2.5 ft at 10 seconds 220 degrees",
            wind_speed: "8 mph",
            wind_direction: "Cross-shore",
            tide: "Falling, 3.2ft at 9:15am",
        },
    },
    SpotProfile {
        id: "5842041f4e65fad6a7709115",
        location: "Tamarindo, CR",
        conditions: SpotConditions {
            wave_height: "4.5 ft at 14 seconds 210 degrees",
            wind_speed: "3 mph",
            wind_direction: "Offshore",
            tide: "High, 4.1ft at 11:45am",
        },
    },
    SpotProfile {
        id: "5842041f4e65fad6a7709117",
        location: "Jaco, CR",
        conditions: SpotConditions {
            wave_height: "3.7 ft at 12 seconds 205 degrees",
            wind_speed: "6 mph",
            wind_direction: "Offshore",
            tide: "Low, 1.2ft at 8:30am",
        },
    },
    SpotProfile {
        id: "5842041f4e65fad6a7709116",
        location: "Dominical, CR",
        conditions: SpotConditions {
            wave_height: "5.2 ft at 16 seconds 207 degrees",
            wind_speed: "4 mph",
            wind_direction: "Offshore",
            tide: "Mid, 2.8ft at 9:45am",
        },
    },
];

/// Find a registered spot by id.
pub fn find_spot(spot_id: &str) -> Option<&'static SpotProfile> {
    SPOTS.iter().find(|s| s.id == spot_id)
}

/// Human-readable location for a spot id, or [`UNKNOWN_LOCATION`].
pub fn lookup_location(spot_id: &str) -> &'static str {
    find_spot(spot_id).map_or(UNKNOWN_LOCATION, |s| s.location)
}

/// Canned conditions for a spot id, or placeholders for unknown ids.
pub fn lookup_conditions(spot_id: &str) -> SpotConditions {
    find_spot(spot_id).map_or(SpotConditions::UNKNOWN, |s| s.conditions)
}
