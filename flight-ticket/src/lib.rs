//! E-ticket HTML renderer and calendar link builder for flight AA 8247.
//!
//! Everything here is a pure formatting function; the caller owns downloads
//! and navigation.

pub mod calendar;

use flight_core::{FlightRecord, FLIGHT};
use serde::{Deserialize, Serialize};

pub use calendar::{calendar_url, format_calendar_instant, CalendarEvent};

/// File name offered to the browser when the ticket is downloaded.
pub const TICKET_FILE_NAME: &str = "AA8247_E-Ticket_Roseanne_Ronald.html";
/// MIME type of the downloaded ticket blob.
pub const TICKET_MIME_TYPE: &str = "text/html";

const TICKET_TEMPLATE: &str = include_str!("../templates/e_ticket.html");

/// Codes embedded into the ticket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TicketParams {
    pub confirmation_code: String,
    pub booking_reference: String,
}

impl From<&flight_core::GeneratedCodes> for TicketParams {
    fn from(codes: &flight_core::GeneratedCodes) -> Self {
        Self {
            confirmation_code: codes.confirmation_code.clone(),
            booking_reference: codes.booking_reference.clone(),
        }
    }
}

/// Render the standalone e-ticket document for the fixed flight.
pub fn render_ticket(params: &TicketParams) -> String {
    render_ticket_for(&FLIGHT, params)
}

/// Render the e-ticket for an arbitrary flight record.
pub fn render_ticket_for(flight: &FlightRecord, params: &TicketParams) -> String {
    let ticket_date = flight
        .departure_instant()
        .format("%d %b %Y")
        .to_string()
        .to_uppercase();

    fill_template(TICKET_TEMPLATE, |key| {
        let value = match key {
            "carrier" => flight.carrier.to_string(),
            "carrier_upper" => flight.carrier.to_uppercase(),
            "ticket_name" => flight.ticket_name.to_string(),
            "confirmation_code" => params.confirmation_code.clone(),
            "booking_reference" => params.booking_reference.clone(),
            "flight_number" => flight.flight_number.to_string(),
            "ticket_date" => ticket_date.clone(),
            "departure_code" => flight.departure.code.to_string(),
            "departure_name" => flight.departure.name.to_string(),
            "departure_time" => flight.departure.scheduled_time.to_string(),
            "arrival_code" => flight.arrival.code.to_string(),
            "arrival_name" => flight.arrival.name.to_string(),
            "arrival_time" => flight.arrival.scheduled_time.to_string(),
            "cabin" => flight.cabin.to_string(),
            "fare" => flight.fare.to_string(),
            _ => return None,
        };
        Some(html_escape(&value))
    })
}

/// Single pass over `{{key}}` placeholders so substituted values are never
/// re-scanned. Unknown keys are left in place.
fn fill_template<F>(template: &str, mut lookup: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    let mut out = String::with_capacity(template.len() + 64);
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };

        let key = after[..end].trim();
        match lookup(key) {
            Some(value) => out.push_str(&value),
            None => out.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after[end + 2..];
    }

    out.push_str(rest);
    out
}

fn html_escape(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
