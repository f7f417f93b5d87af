//! Belgian railway liveboard server.
//!
//! Takes iRail liveboard JSON, normalizes it into typed records and renders
//! the departures as an HTML board.

pub mod config;
pub mod domain;
pub mod format;
pub mod irail;
pub mod snapshot;
pub mod web;
