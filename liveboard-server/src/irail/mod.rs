//! iRail liveboard payload handling.
//!
//! iRail (the open Belgian railway API) serves a station's departure board
//! as JSON in which almost every scalar is a string. This module turns such
//! a payload into the typed [`Liveboard`](crate::domain::Liveboard) tree.
//!
//! Key characteristics of the payload:
//! - Numbers arrive as text (`"300"`), flags as `"0"` / `"1"`
//! - `departures.number` is reported separately from the list itself
//! - Linked-data ids live under `@id` keys

mod error;
mod parse;
mod types;

pub use error::{DecodeIssue, DecodeIssues, IssueKind, ParseCause, ParseError};
pub use parse::{LiveboardParser, NumberPolicy, ParserConfig, parse, parse_number_text};
pub use types::{
    DepartureDto, DeparturesDto, LiveboardDto, PlatformInfoDto, StationInfoDto, VehicleInfoDto,
};
