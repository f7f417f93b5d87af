//! Conversion from iRail DTOs to the liveboard record tree.
//!
//! iRail sends numbers and flags as text. Numbers are read the way the
//! upstream clients read them: surrounding whitespace is ignored, empty text
//! is zero, and decimal, exponent and `0x`/`0o`/`0b` forms are accepted.
//! Flags are read as numbers and are true when nonzero.
//!
//! A missing nested object or list fails the parse. Missing scalar leaves
//! are coerced unless the parser is strict.
//!
//! Conversion never stops at the first problem. Every field is visited, each
//! problem is recorded with its path, and the parse fails with one
//! [`ParseError`] listing all of them.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::domain::{Departure, Departures, Liveboard, PlatformInfo, StationInfo, VehicleInfo};

use super::error::{DecodeIssue, DecodeIssues, IssueKind, ParseError};
use super::types::{
    DepartureDto, DeparturesDto, LiveboardDto, PlatformInfoDto, StationInfoDto, VehicleInfoDto,
};

/// How unusable scalar leaves are treated: numeric fields holding
/// non-numeric text, and leaves that are absent or `null`.
///
/// Absent or mistyped nested objects and lists are reported in both modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberPolicy {
    /// Non-numeric text becomes `None` (flags become `false`). Absent leaves
    /// become empty text, `None` or `false`; `null` reads as empty text or
    /// zero. Parsing continues.
    #[default]
    Lenient,

    /// Non-numeric text is a [`IssueKind::NotANumber`] issue and absent or
    /// `null` leaves are [`IssueKind::Missing`].
    Strict,
}

/// Parser configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParserConfig {
    pub numbers: NumberPolicy,
}

/// Turns raw iRail liveboard JSON into a [`Liveboard`].
///
/// # Examples
///
/// ```
/// use liveboard_server::irail::LiveboardParser;
///
/// let json = r#"{
///     "version": "1.3",
///     "timestamp": "1700000000",
///     "station": "Brussels-Central",
///     "stationinfo": {
///         "id": "BE.NMBS.008813003", "@id": "http://irail.be/stations/NMBS/008813003",
///         "locationX": "4.356801", "locationY": "50.845658",
///         "standardname": "Brussel-Centraal", "name": "Brussels-Central"
///     },
///     "departures": { "number": "0", "departure": [] }
/// }"#;
///
/// let board = LiveboardParser::default().parse_str(json).unwrap();
/// assert_eq!(board.station, "Brussels-Central");
/// assert_eq!(board.timestamp, Some(1_700_000_000));
/// assert!(board.departures().is_empty());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LiveboardParser {
    config: ParserConfig,
}

impl LiveboardParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse an already-decoded JSON tree.
    pub fn parse(&self, raw: &Value) -> Result<Liveboard, ParseError> {
        let dto = LiveboardDto::deserialize(raw)?;
        self.convert(&dto)
    }

    /// Parse JSON text.
    pub fn parse_str(&self, json: &str) -> Result<Liveboard, ParseError> {
        let dto: LiveboardDto = serde_json::from_str(json)?;
        self.convert(&dto)
    }

    /// Convert deserialized DTOs, checking every field.
    pub fn convert(&self, dto: &LiveboardDto) -> Result<Liveboard, ParseError> {
        let mut decoder = Decoder::new(self.config.numbers);
        let board = decoder.liveboard(dto);

        match DecodeIssues::new(decoder.issues) {
            Some(issues) => {
                debug!(
                    issues = issues.as_slice().len(),
                    first = %issues.as_slice()[0],
                    "rejected liveboard payload"
                );
                Err(issues.into())
            }
            None => {
                debug!(
                    station = %board.station,
                    departures = board.departures().len(),
                    "parsed liveboard"
                );
                Ok(board)
            }
        }
    }
}

/// Parse a JSON tree with the default (lenient) configuration.
pub fn parse(raw: &Value) -> Result<Liveboard, ParseError> {
    LiveboardParser::default().parse(raw)
}

/// Walks the DTO tree, building the record tree and collecting issues.
///
/// Fields with issues get placeholder values; the tree is discarded when any
/// issue was recorded.
struct Decoder {
    numbers: NumberPolicy,
    issues: Vec<DecodeIssue>,
}

impl Decoder {
    fn new(numbers: NumberPolicy) -> Self {
        Self {
            numbers,
            issues: Vec::new(),
        }
    }

    fn report(&mut self, path: String, kind: IssueKind) {
        self.issues.push(DecodeIssue { path, kind });
    }

    /// A nested object or list. Its absence is always an issue.
    fn require<'a>(&mut self, field: Option<&'a Value>, path: &str) -> Option<&'a Value> {
        if field.is_none() {
            self.report(path.to_string(), IssueKind::Missing);
        }
        field
    }

    /// A nested object, decoded into its DTO.
    fn object<T: DeserializeOwned>(&mut self, field: Option<&Value>, path: &str) -> Option<T> {
        let value = self.require(field, path)?;
        if !value.is_object() {
            self.wrong_type(path, "object", value);
            return None;
        }

        // Every DTO field is optional, so any object decodes.
        match T::deserialize(value) {
            Ok(dto) => Some(dto),
            Err(_) => {
                self.wrong_type(path, "object", value);
                None
            }
        }
    }

    /// A scalar leaf. Absent and `null` leaves are coerced in lenient mode
    /// and reported as missing in strict mode.
    fn leaf<'a>(&mut self, field: Option<&'a Value>, path: &str) -> Option<&'a Value> {
        match field {
            None | Some(Value::Null) if self.numbers == NumberPolicy::Strict => {
                self.report(path.to_string(), IssueKind::Missing);
                None
            }
            other => other,
        }
    }

    fn liveboard(&mut self, dto: &LiveboardDto) -> Liveboard {
        let version = self.text(dto.version.as_ref(), "version");
        let timestamp = self.integer(dto.timestamp.as_ref(), "timestamp");
        let station = self.text(dto.station.as_ref(), "station");
        let station_info = self.station_info(dto.stationinfo.as_ref(), "stationinfo");
        let departures = match self.object::<DeparturesDto>(dto.departures.as_ref(), "departures")
        {
            Some(d) => self.departures(&d),
            None => Departures {
                number: None,
                departure: Vec::new(),
            },
        };

        Liveboard {
            version,
            timestamp,
            station,
            station_info,
            departures,
        }
    }

    fn departures(&mut self, dto: &DeparturesDto) -> Departures {
        let number = self.integer(dto.number.as_ref(), "departures.number");

        let list_path = "departures.departure";
        let list: &[Value] = match self.require(dto.departure.as_ref(), list_path) {
            Some(Value::Array(items)) => items,
            Some(other) => {
                self.wrong_type(list_path, "array", other);
                &[]
            }
            None => &[],
        };

        let departure = list
            .iter()
            .enumerate()
            .filter_map(|(i, item)| {
                let path = format!("{list_path}[{i}]");
                let dto = self.object::<DepartureDto>(Some(item), &path)?;
                Some(self.departure(&dto, &path))
            })
            .collect();

        Departures { number, departure }
    }

    fn station_info(&mut self, field: Option<&Value>, path: &str) -> StationInfo {
        let Some(dto) = self.object::<StationInfoDto>(field, path) else {
            return StationInfo::default();
        };

        StationInfo {
            id: self.text(dto.id.as_ref(), &join(path, "id")),
            external_id: self.text(dto.uri.as_ref(), &join(path, "@id")),
            location_x: self.number(dto.location_x.as_ref(), &join(path, "locationX")),
            location_y: self.number(dto.location_y.as_ref(), &join(path, "locationY")),
            standard_name: self.text(dto.standardname.as_ref(), &join(path, "standardname")),
            name: self.text(dto.name.as_ref(), &join(path, "name")),
        }
    }

    fn departure(&mut self, dto: &DepartureDto, path: &str) -> Departure {
        Departure {
            id: self.integer(dto.id.as_ref(), &join(path, "id")),
            delay_seconds: self.integer(dto.delay.as_ref(), &join(path, "delay")),
            station: self.text(dto.station.as_ref(), &join(path, "station")),
            station_info: self.station_info(dto.stationinfo.as_ref(), &join(path, "stationinfo")),
            time_epoch_seconds: self.integer(dto.time.as_ref(), &join(path, "time")),
            vehicle: self.text(dto.vehicle.as_ref(), &join(path, "vehicle")),
            vehicle_info: self.vehicle_info(dto.vehicleinfo.as_ref(), &join(path, "vehicleinfo")),
            platform: self.text(dto.platform.as_ref(), &join(path, "platform")),
            platform_info: self
                .platform_info(dto.platforminfo.as_ref(), &join(path, "platforminfo")),
            canceled: self.flag(dto.canceled.as_ref(), &join(path, "canceled")),
            has_left: self.flag(dto.left.as_ref(), &join(path, "left")),
            is_extra: self.flag(dto.is_extra.as_ref(), &join(path, "isExtra")),
            departure_connection: self.text(
                dto.departure_connection.as_ref(),
                &join(path, "departureConnection"),
            ),
        }
    }

    fn vehicle_info(&mut self, field: Option<&Value>, path: &str) -> VehicleInfo {
        let Some(dto) = self.object::<VehicleInfoDto>(field, path) else {
            return VehicleInfo::default();
        };

        VehicleInfo {
            name: self.text(dto.name.as_ref(), &join(path, "name")),
            short_name: self.text(dto.shortname.as_ref(), &join(path, "shortname")),
            number: self.integer(dto.number.as_ref(), &join(path, "number")),
            vehicle_type: self.text(dto.vehicle_type.as_ref(), &join(path, "type")),
            external_id: self.text(dto.uri.as_ref(), &join(path, "@id")),
        }
    }

    fn platform_info(&mut self, field: Option<&Value>, path: &str) -> PlatformInfo {
        let Some(dto) = self.object::<PlatformInfoDto>(field, path) else {
            return PlatformInfo::default();
        };

        PlatformInfo {
            name: self.text(dto.name.as_ref(), &join(path, "name")),
            is_normal_track: self.flag(dto.normal.as_ref(), &join(path, "normal")),
        }
    }

    /// A text leaf. Numbers and booleans are carried over as text; absent
    /// and `null` leaves are empty.
    fn text(&mut self, field: Option<&Value>, path: &str) -> String {
        match self.leaf(field, path) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            Some(Value::Null) | None => String::new(),
            Some(other) => {
                self.wrong_type(path, "string", other);
                String::new()
            }
        }
    }

    /// A numeric leaf, read as an `f64`.
    ///
    /// `None` when the field is absent, has the wrong JSON type, or holds
    /// text that is not a number. `null` reads as zero.
    fn number(&mut self, field: Option<&Value>, path: &str) -> Option<f64> {
        let value = self.leaf(field, path)?;
        match coerce_number(value) {
            Ok(Some(n)) => Some(n),
            Ok(None) => {
                if self.numbers == NumberPolicy::Strict {
                    self.report(
                        path.to_string(),
                        IssueKind::NotANumber {
                            value: display_value(value),
                        },
                    );
                }
                None
            }
            Err(()) => {
                self.wrong_type(path, "numeric string", value);
                None
            }
        }
    }

    /// Integral values only; `"1.5"` is treated like any other non-number.
    fn integer(&mut self, field: Option<&Value>, path: &str) -> Option<i64> {
        let n = self.number(field, path)?;
        let integer = as_integer(n);
        if integer.is_none() && self.numbers == NumberPolicy::Strict {
            self.report(
                path.to_string(),
                IssueKind::NotANumber {
                    value: display_value(field?),
                },
            );
        }
        integer
    }

    /// A `"0"`/`"1"` flag: true when the numeric value is nonzero.
    fn flag(&mut self, field: Option<&Value>, path: &str) -> bool {
        self.number(field, path).is_some_and(|n| n != 0.0)
    }

    fn wrong_type(&mut self, path: &str, expected: &'static str, found: &Value) {
        self.report(
            path.to_string(),
            IssueKind::WrongType {
                expected,
                found: json_type(found),
            },
        );
    }
}

fn join(path: &str, field: &str) -> String {
    if path.is_empty() {
        field.to_string()
    } else {
        format!("{path}.{field}")
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Coerce a JSON scalar to a number.
///
/// `Ok(None)` is the not-a-number outcome; `Err` means the JSON type can
/// never hold a number (arrays, objects).
fn coerce_number(value: &Value) -> Result<Option<f64>, ()> {
    match value {
        Value::Number(n) => Ok(n.as_f64()),
        Value::String(s) => Ok(parse_number_text(s)),
        Value::Bool(b) => Ok(Some(if *b { 1.0 } else { 0.0 })),
        Value::Null => Ok(Some(0.0)),
        Value::Array(_) | Value::Object(_) => Err(()),
    }
}

/// Read number text the way the upstream's consumers do.
///
/// # Examples
///
/// ```
/// use liveboard_server::irail::parse_number_text;
///
/// assert_eq!(parse_number_text(" 42 "), Some(42.0));
/// assert_eq!(parse_number_text(""), Some(0.0));
/// assert_eq!(parse_number_text("0x1F"), Some(31.0));
/// assert_eq!(parse_number_text("1e3"), Some(1000.0));
/// assert_eq!(parse_number_text("12abc"), None);
/// assert_eq!(parse_number_text("nan"), None);
/// ```
pub fn parse_number_text(text: &str) -> Option<f64> {
    let s = text.trim();
    if s.is_empty() {
        return Some(0.0);
    }

    match s {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            if digits.starts_with(['+', '-']) {
                return None;
            }
            return u64::from_str_radix(digits, radix).ok().map(|n| n as f64);
        }
    }

    // Rust also accepts "inf" and "nan"; plain decimal text has no letters
    // other than the exponent marker.
    if s.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return None;
    }

    s.parse::<f64>().ok()
}

fn as_integer(n: f64) -> Option<i64> {
    // i64::MAX is not exactly representable; stay strictly inside the range.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if n.is_finite() && n.fract() == 0.0 && n > -LIMIT && n < LIMIT {
        Some(n as i64)
    } else {
        None
    }
}
