//! Google Calendar "add event" link for the flight.

use chrono::{DateTime, Utc};
use flight_core::{FlightRecord, FLIGHT};
use serde::{Deserialize, Serialize};

const CALENDAR_BASE_URL: &str = "https://calendar.google.com/calendar/render";

/// Fields sent to the calendar template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CalendarEvent {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub description: String,
    pub location: String,
}

impl CalendarEvent {
    /// Event for the fixed flight, carrying the session confirmation code.
    pub fn for_flight(confirmation_code: &str) -> Self {
        Self::for_record(&FLIGHT, confirmation_code)
    }

    pub fn for_record(flight: &FlightRecord, confirmation_code: &str) -> Self {
        let description = [
            format!("{} Flight {}", flight.carrier, flight.flight_number),
            format!("Passenger: {}", flight.passenger),
            format!("From: {} ({})", flight.departure.name, flight.departure.code),
            format!("To: {} ({})", flight.arrival.name, flight.arrival.code),
            format!("Confirmation: {confirmation_code}"),
        ]
        .join("\n");

        Self {
            title: format!("Flight {} - Accra to Louisville", flight.flight_number),
            start: flight.departure_instant(),
            end: flight.arrival_instant(),
            description,
            location: format!("{}, {}", flight.departure.name, flight.departure.city),
        }
    }
}

/// Compact UTC form used by the calendar `dates` parameter, e.g. `20251003T114500Z`.
pub fn format_calendar_instant(instant: DateTime<Utc>) -> String {
    instant.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Build the calendar URL. No request is made.
pub fn calendar_url(event: &CalendarEvent) -> String {
    format!(
        "{CALENDAR_BASE_URL}?action=TEMPLATE&text={}&dates={}/{}&details={}&location={}",
        urlencoding::encode(&event.title),
        format_calendar_instant(event.start),
        format_calendar_instant(event.end),
        urlencoding::encode(&event.description),
        urlencoding::encode(&event.location),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instants_use_compact_utc_form() {
        assert_eq!(
            format_calendar_instant(FLIGHT.departure_instant()),
            "20251003T114500Z"
        );
        assert_eq!(
            format_calendar_instant(FLIGHT.arrival_instant()),
            "20251003T193000Z"
        );
    }

    #[test]
    fn flight_event_carries_confirmation_code() {
        let event = CalendarEvent::for_flight("QWERTYUI");
        assert_eq!(event.title, "Flight AA 8247 - Accra to Louisville");
        assert_eq!(
            event.location,
            "Kotoka International Airport, Accra, Ghana"
        );
        assert!(event.description.ends_with("Confirmation: QWERTYUI"));
        assert_eq!(event.description.lines().count(), 5);
    }
}
