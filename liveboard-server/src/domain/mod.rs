//! Domain types for the liveboard.
//!
//! The record tree produced by the parser, and the display language the
//! board is rendered in.

mod language;
mod liveboard;

#[cfg(test)]
pub(crate) use liveboard::fixtures;

pub use language::{Language, LocalizedStrings, UnknownLanguage};
pub use liveboard::{Departure, Departures, Liveboard, PlatformInfo, StationInfo, VehicleInfo};
