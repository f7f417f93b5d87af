//! Askama templates for the board.

use askama::Template;
use chrono::{Local, TimeZone};

use crate::domain::{Departure, Language, Liveboard};
use crate::format::{UNKNOWN_TIME, format_delay, format_time_in};

// ============================================================================
// Page Templates
// ============================================================================

/// Full page wrapping the board fragment.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub lang: Language,
    pub title: String,
    /// Web font stylesheet, linked once from the page head.
    pub font_url: Option<String>,
    /// Pre-rendered [`LiveboardTemplate`] output.
    pub board: String,
}

// ============================================================================
// Fragment Templates
// ============================================================================

/// The board itself: one item per departure, in board order.
#[derive(Template)]
#[template(path = "liveboard.html")]
pub struct LiveboardTemplate {
    pub items: Vec<DepartureView>,
}

impl LiveboardTemplate {
    /// Build the fragment with times in the host's local zone.
    pub fn from_liveboard(board: &Liveboard, lang: Language) -> Self {
        Self::from_liveboard_in(board, lang, &Local)
    }

    pub fn from_liveboard_in<Tz: TimeZone>(board: &Liveboard, lang: Language, tz: &Tz) -> Self {
        Self {
            items: board
                .departures()
                .iter()
                .map(|d| DepartureView::from_departure_in(d, lang, tz))
                .collect(),
        }
    }
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Departure view model for templates.
#[derive(Debug, Clone, PartialEq)]
pub struct DepartureView {
    /// Scheduled departure, `HH:MM`.
    pub time: String,
    pub delay: Option<DelayView>,
    /// Train category shown next to the time, e.g. `IC`.
    pub vehicle_type: String,
    pub platform: String,
    /// Platform differs from the one originally assigned.
    pub platform_changed: bool,
    pub destination: String,
    /// Localized notice shown under canceled departures.
    pub notice: Option<&'static str>,
    pub has_left: bool,
    pub canceled: bool,
    pub is_extra: bool,
}

/// Delay badges: the delay itself and the expected departure time.
#[derive(Debug, Clone, PartialEq)]
pub struct DelayView {
    /// e.g. `+5'` or `+1h30`
    pub delay: String,
    pub expected_time: String,
}

impl DepartureView {
    pub fn from_departure_in<Tz: TimeZone>(
        departure: &Departure,
        lang: Language,
        tz: &Tz,
    ) -> Self {
        let time = display_time(departure.time_epoch_seconds, tz);

        let delay = departure
            .delay_seconds
            .filter(|_| departure.is_delayed())
            .map(|d| DelayView {
                delay: format_delay(d),
                expected_time: display_time(departure.expected_epoch_seconds(), tz),
            });

        let notice = departure.canceled.then(|| lang.strings().canceled_notice);

        Self {
            time,
            delay,
            vehicle_type: departure.vehicle_info.vehicle_type.clone(),
            platform: departure.platform_info.name.clone(),
            platform_changed: !departure.platform_info.is_normal_track,
            destination: departure.station_info.name.clone(),
            notice,
            has_left: departure.has_left,
            canceled: departure.canceled,
            is_extra: departure.is_extra,
        }
    }

    /// Class list of the item container.
    pub fn item_class(&self) -> String {
        let mut classes = String::from("item");
        if self.has_left {
            classes.push_str(" item--left");
        }
        if self.canceled {
            classes.push_str(" item--canceled");
        }
        if self.is_extra {
            classes.push_str(" item--extra");
        }
        classes
    }

    /// Class list of the platform label.
    pub fn platform_class(&self) -> &'static str {
        if self.platform_changed {
            "item__platform item__platform--highlight"
        } else {
            "item__platform"
        }
    }
}

fn display_time<Tz: TimeZone>(epoch_seconds: Option<i64>, tz: &Tz) -> String {
    epoch_seconds.map_or_else(|| UNKNOWN_TIME.to_string(), |t| format_time_in(t, tz))
}
