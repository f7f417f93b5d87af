//! Normalized liveboard record tree.
//!
//! Every value here is owned by whoever parsed it. A fresh tree is built on
//! each parse; nothing is shared with the upstream JSON.
//!
//! Numeric fields are `Option`: `Some` holds the coerced number, `None`
//! means the upstream text was not a number.

use serde::Serialize;

/// One station departure board at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Liveboard {
    /// Upstream API version string.
    pub version: String,

    /// When the board was generated (epoch seconds).
    pub timestamp: Option<i64>,

    /// Display name of the board station.
    pub station: String,

    /// Details of the board station.
    #[serde(rename = "stationinfo")]
    pub station_info: StationInfo,

    /// The departures, in upstream order.
    pub departures: Departures,
}

impl Liveboard {
    /// Departures in board order.
    pub fn departures(&self) -> &[Departure] {
        &self.departures.departure
    }
}

/// The departure list together with the count the upstream reported.
///
/// `number` is passed through as received and is not reconciled with
/// `departure.len()`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Departures {
    pub number: Option<i64>,
    pub departure: Vec<Departure>,
}

/// Station metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationInfo {
    /// Short station id, e.g. `BE.NMBS.008814001`.
    pub id: String,

    /// Linked-data URI for the station.
    pub external_id: String,

    /// Longitude.
    pub location_x: Option<f64>,

    /// Latitude.
    pub location_y: Option<f64>,

    pub standard_name: String,
    pub name: String,
}

/// One scheduled departure on the board.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Departure {
    /// Position of the departure on the board.
    pub id: Option<i64>,

    /// Seconds by which the actual departure trails the scheduled one.
    pub delay_seconds: Option<i64>,

    /// Destination name.
    pub station: String,

    /// Destination details.
    #[serde(rename = "stationinfo")]
    pub station_info: StationInfo,

    /// Scheduled departure (epoch seconds).
    pub time_epoch_seconds: Option<i64>,

    /// Vehicle id, e.g. `BE.NMBS.IC1832`.
    pub vehicle: String,

    #[serde(rename = "vehicleinfo")]
    pub vehicle_info: VehicleInfo,

    pub platform: String,

    #[serde(rename = "platforminfo")]
    pub platform_info: PlatformInfo,

    pub canceled: bool,
    pub has_left: bool,

    /// Not part of the regular timetable.
    pub is_extra: bool,

    /// Linked-data URI of the departure connection.
    pub departure_connection: String,
}

impl Departure {
    /// Whether the departure runs late. Unknown delays count as on time.
    pub fn is_delayed(&self) -> bool {
        self.delay_seconds.is_some_and(|d| d > 0)
    }

    /// Expected departure (scheduled time plus delay), if both are known.
    pub fn expected_epoch_seconds(&self) -> Option<i64> {
        self.time_epoch_seconds?.checked_add(self.delay_seconds?)
    }
}

/// Vehicle metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleInfo {
    pub name: String,
    pub short_name: String,
    pub number: Option<i64>,

    /// Train category, e.g. `IC`, `S`, `L`.
    #[serde(rename = "type")]
    pub vehicle_type: String,

    pub external_id: String,
}

/// Platform assignment.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformInfo {
    pub name: String,

    /// `false` when the platform was changed from the one originally assigned.
    pub is_normal_track: bool,
}
