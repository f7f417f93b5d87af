//! iRail liveboard response DTOs.
//!
//! These types map directly onto the iRail `/liveboard` JSON. iRail encodes
//! almost every scalar as a string (`"1"`, `"0"`, `"1700000000"`), so leaf
//! fields are kept as raw JSON values and coerced during conversion.
//!
//! Leaves distinguish an absent field (`None`) from an explicit `null`
//! (`Some(Value::Null)`); the two coerce differently. Nested objects and
//! lists are kept as raw values too, so the converter can report a wrong
//! shape with its full path.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Keep `null` as `Some(Value::Null)`. Absent fields fall back to `None`
/// through `#[serde(default)]`.
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

/// Top-level liveboard response.
#[derive(Debug, Clone, Deserialize)]
pub struct LiveboardDto {
    #[serde(default, deserialize_with = "present")]
    pub version: Option<Value>,

    /// Generation time, epoch seconds as text.
    #[serde(default, deserialize_with = "present")]
    pub timestamp: Option<Value>,

    /// Station display name.
    #[serde(default, deserialize_with = "present")]
    pub station: Option<Value>,

    pub stationinfo: Option<Value>,

    pub departures: Option<Value>,
}

/// The `departures` wrapper.
#[derive(Debug, Clone, Deserialize)]
pub struct DeparturesDto {
    /// Count reported by iRail.
    #[serde(default, deserialize_with = "present")]
    pub number: Option<Value>,

    /// Array of departure objects.
    pub departure: Option<Value>,
}

/// Station description, used both for the board station and destinations.
#[derive(Debug, Clone, Deserialize)]
pub struct StationInfoDto {
    #[serde(default, deserialize_with = "present")]
    pub id: Option<Value>,

    #[serde(rename = "@id", default, deserialize_with = "present")]
    pub uri: Option<Value>,

    #[serde(rename = "locationX", default, deserialize_with = "present")]
    pub location_x: Option<Value>,

    #[serde(rename = "locationY", default, deserialize_with = "present")]
    pub location_y: Option<Value>,

    #[serde(default, deserialize_with = "present")]
    pub standardname: Option<Value>,

    #[serde(default, deserialize_with = "present")]
    pub name: Option<Value>,
}

/// A single departure entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartureDto {
    #[serde(default, deserialize_with = "present")]
    pub id: Option<Value>,

    /// Delay in seconds.
    #[serde(default, deserialize_with = "present")]
    pub delay: Option<Value>,

    /// Destination name.
    #[serde(default, deserialize_with = "present")]
    pub station: Option<Value>,

    pub stationinfo: Option<Value>,

    /// Scheduled departure, epoch seconds.
    #[serde(default, deserialize_with = "present")]
    pub time: Option<Value>,

    #[serde(default, deserialize_with = "present")]
    pub vehicle: Option<Value>,

    pub vehicleinfo: Option<Value>,

    #[serde(default, deserialize_with = "present")]
    pub platform: Option<Value>,

    pub platforminfo: Option<Value>,

    /// `"0"` / `"1"` flag.
    #[serde(default, deserialize_with = "present")]
    pub canceled: Option<Value>,

    /// `"0"` / `"1"` flag.
    #[serde(default, deserialize_with = "present")]
    pub left: Option<Value>,

    /// `"0"` / `"1"` flag.
    #[serde(default, deserialize_with = "present")]
    pub is_extra: Option<Value>,

    #[serde(default, deserialize_with = "present")]
    pub departure_connection: Option<Value>,
}

/// Vehicle description.
#[derive(Debug, Clone, Deserialize)]
pub struct VehicleInfoDto {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Value>,

    #[serde(default, deserialize_with = "present")]
    pub shortname: Option<Value>,

    #[serde(default, deserialize_with = "present")]
    pub number: Option<Value>,

    #[serde(rename = "type", default, deserialize_with = "present")]
    pub vehicle_type: Option<Value>,

    #[serde(rename = "@id", default, deserialize_with = "present")]
    pub uri: Option<Value>,
}

/// Platform description.
#[derive(Debug, Clone, Deserialize)]
pub struct PlatformInfoDto {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Value>,

    /// `"1"` when the train leaves from its planned platform.
    #[serde(default, deserialize_with = "present")]
    pub normal: Option<Value>,
}
