//! Bridge WASM <-> JavaScript trung lập framework.

use flight_core::{
    generate_code as core_generate_code, instant_from_millis, FlightError, GeneratedCodes,
    StatusBand, StatusItemUpdate, ToastKind, ToastPhase, TrackerConfig, FLIGHT, STATUS_TIMELINE,
};
use flight_ticket::{CalendarEvent, TicketParams};
use serde::{Deserialize, Serialize};
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

#[derive(Deserialize)]
struct JsTrackerConfig {
    #[serde(default)]
    tick_interval_ms: Option<u32>,
    #[serde(default)]
    status_refresh_ms: Option<u32>,
    #[serde(default)]
    flicker_interval_ms: Option<u32>,
    #[serde(default)]
    code_length: Option<usize>,
}

impl From<JsTrackerConfig> for TrackerConfig {
    fn from(cfg: JsTrackerConfig) -> Self {
        let mut base = TrackerConfig::default();
        if let Some(ms) = cfg.tick_interval_ms {
            base.tick_interval_ms = ms;
        }
        if let Some(ms) = cfg.status_refresh_ms {
            base.status_refresh_ms = ms;
        }
        if let Some(ms) = cfg.flicker_interval_ms {
            base.flicker_interval_ms = ms;
        }
        if let Some(length) = cfg.code_length {
            base.code_length = length;
        }
        base
    }
}

#[derive(Serialize)]
struct JsStatusSnapshot {
    band: StatusBand,
    hours_until_departure: f64,
    updates: Vec<StatusItemUpdate>,
}

#[derive(Serialize)]
struct JsToastStyle {
    kind: ToastKind,
    background: &'static str,
    leaving_at_ms: u32,
    lifetime_ms: u32,
}

impl JsToastStyle {
    fn for_tag(tag: &str) -> Self {
        let kind = ToastKind::parse(tag);
        Self {
            kind,
            background: kind.background(),
            leaving_at_ms: ToastPhase::leaving_at_ms(),
            lifetime_ms: ToastPhase::lifetime_ms(),
        }
    }
}

fn read_config(config: Option<JsValue>) -> Result<TrackerConfig, JsValue> {
    let cfg = match config {
        Some(js_cfg) => {
            let cfg: JsTrackerConfig = from_value(js_cfg)
                .map_err(|err| JsValue::from_str(&format!("Không đọc được config: {err}")))?;
            TrackerConfig::from(cfg)
        }
        None => TrackerConfig::default(),
    };
    cfg.validate().map_err(format_flight_error)?;
    Ok(cfg)
}

/// Sinh một mã ngẫu nhiên độ dài `length`.
#[wasm_bindgen]
pub fn generate_code(length: usize, include_digits: bool) -> String {
    core_generate_code(length, include_digits)
}

/// Sinh cặp mã xác nhận / mã đặt chỗ cho phiên trang.
#[wasm_bindgen]
pub fn generate_codes(config: Option<JsValue>) -> Result<JsValue, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let cfg = read_config(config)?;
    let codes = GeneratedCodes::generate(cfg.code_length);
    to_value(&codes).map_err(|err| JsValue::from_str(&format!("Không serialize mã: {err}")))
}

/// Đánh giá band trạng thái tại mốc `now_ms` (mili-giây, như `Date.now()`).
#[wasm_bindgen]
pub fn evaluate_status(now_ms: f64) -> Result<JsValue, JsValue> {
    let now = instant_from_millis(now_ms).map_err(format_flight_error)?;
    let departure = FLIGHT.departure_instant();
    let band = StatusBand::evaluate(now, departure);

    let snapshot = JsStatusSnapshot {
        band,
        hours_until_departure: flight_core::hours_until(now, departure),
        updates: band.updates(),
    };
    to_value(&snapshot)
        .map_err(|err| JsValue::from_str(&format!("Không serialize trạng thái: {err}")))
}

/// Bảng trạng thái mô phỏng cố định.
#[wasm_bindgen]
pub fn status_timeline() -> Result<JsValue, JsValue> {
    to_value(&STATUS_TIMELINE)
        .map_err(|err| JsValue::from_str(&format!("Không serialize timeline: {err}")))
}

#[wasm_bindgen]
pub fn render_ticket(confirmation_code: String, booking_reference: String) -> String {
    flight_ticket::render_ticket(&TicketParams {
        confirmation_code,
        booking_reference,
    })
}

#[wasm_bindgen]
pub fn calendar_url(confirmation_code: &str) -> String {
    flight_ticket::calendar_url(&CalendarEvent::for_flight(confirmation_code))
}

/// Kiểu hiển thị và mốc thời gian của toast theo nhãn; nhãn lạ rơi về `info`.
#[wasm_bindgen]
pub fn toast_style(tag: &str) -> Result<JsValue, JsValue> {
    to_value(&JsToastStyle::for_tag(tag))
        .map_err(|err| JsValue::from_str(&format!("Không serialize toast: {err}")))
}

fn format_flight_error(err: FlightError) -> JsValue {
    JsValue::from_str(&format!("Flight error: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_merges_over_defaults() {
        let cfg = TrackerConfig::from(JsTrackerConfig {
            tick_interval_ms: Some(500),
            status_refresh_ms: None,
            flicker_interval_ms: None,
            code_length: Some(6),
        });
        assert_eq!(cfg.tick_interval_ms, 500);
        assert_eq!(cfg.status_refresh_ms, 30_000);
        assert_eq!(cfg.code_length, 6);
    }

    #[test]
    fn toast_style_falls_back_to_info() {
        let style = JsToastStyle::for_tag("unheard-of");
        assert_eq!(style.kind, ToastKind::Info);
        assert_eq!(style.background, "#17a2b8");
        assert_eq!(style.lifetime_ms, 3_300);

        let warning = JsToastStyle::for_tag("warning");
        assert_eq!(warning.kind, ToastKind::Warning);
        assert_eq!(warning.leaving_at_ms, 3_000);
    }

    #[test]
    fn ticket_bridge_embeds_codes() {
        let html = render_ticket("ABCDEFGH".to_string(), "IJKL1234".to_string());
        assert!(html.contains("ABCDEFGH"));
        assert!(calendar_url("ABCDEFGH").contains("ABCDEFGH"));
        assert_eq!(generate_code(8, false).len(), 8);
    }
}
