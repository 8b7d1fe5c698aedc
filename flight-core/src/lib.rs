//! Logic lõi mô phỏng theo dõi chuyến bay AA 8247 (ACC → SDF).

pub mod codes;
pub mod status;
pub mod toast;
pub mod tracker;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

pub use codes::{generate_code, generate_code_with, GeneratedCodes};
pub use status::{hours_until, StatusBand, StatusItem, StatusItemUpdate};
pub use toast::{ToastKind, ToastPhase};
pub use tracker::{
    BadgeTone, LiveUpdate, StartOutcome, TickOutcome, TimelineEntry, TrackingSession,
    STATUS_TIMELINE,
};

/// Cổng được công bố khi tiến trình đạt ngưỡng `GATE_REVEAL_PERCENT`.
pub const GATE: &str = "A12";

/// Thông tin một đầu sân bay của chuyến bay.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct AirportStop {
    pub code: &'static str,
    pub name: &'static str,
    pub city: &'static str,
    pub scheduled_time: &'static str,
}

/// Bản ghi chuyến bay cố định. Không bao giờ thay đổi sau khi định nghĩa.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct FlightRecord {
    pub flight_number: &'static str,
    pub carrier: &'static str,
    pub passenger: &'static str,
    pub ticket_name: &'static str,
    pub departure: AirportStop,
    pub arrival: AirportStop,
    pub date: &'static str,
    pub cabin: &'static str,
    pub fare: &'static str,
    pub gate: &'static str,
}

pub const FLIGHT: FlightRecord = FlightRecord {
    flight_number: "AA 8247",
    carrier: "American Airlines",
    passenger: "Roseanne Ronald",
    ticket_name: "RONALD/ROSEANNE",
    departure: AirportStop {
        code: "ACC",
        name: "Kotoka International Airport",
        city: "Accra, Ghana",
        scheduled_time: "11:45 AM GMT",
    },
    arrival: AirportStop {
        code: "SDF",
        name: "Louisville International Airport",
        city: "Louisville",
        scheduled_time: "7:30 PM EST",
    },
    date: "2025-10-03",
    cabin: "Economy",
    fare: "$1,850.00",
    gate: GATE,
};

impl FlightRecord {
    /// Thời điểm cất cánh dùng để tính khoảng cách thời gian.
    pub fn departure_instant(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 3, 11, 45, 0)
            .single()
            .unwrap_or_default()
    }

    /// Thời điểm hạ cánh ghi trong sự kiện lịch.
    pub fn arrival_instant(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 3, 19, 30, 0)
            .single()
            .unwrap_or_default()
    }

    pub fn route(&self) -> String {
        format!("{} → {}", self.departure.code, self.arrival.code)
    }
}

/// Các dòng log khởi động được in ra console khi trang sẵn sàng.
pub fn startup_banner() -> [String; 5] {
    [
        format!("Flight Tracking System Initialized - {}", FLIGHT.flight_number),
        format!("Passenger: {}", FLIGHT.passenger),
        format!("Route: {}", FLIGHT.route()),
        "Date: October 3, 2025".to_string(),
        "System ready for tracking...".to_string(),
    ]
}

/// Cấu hình nhịp thời gian của trình theo dõi.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TrackerConfig {
    /// Khoảng cách (ms) giữa hai bước mô phỏng.
    pub tick_interval_ms: u32,
    /// Chu kỳ (ms) đánh giá lại trạng thái theo giờ thực.
    pub status_refresh_ms: u32,
    /// Chu kỳ (ms) hiệu ứng nhấp nháy các phần tử `.loading`.
    pub flicker_interval_ms: u32,
    /// Độ dài mã xác nhận và mã đặt chỗ.
    pub code_length: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 2_000,
            status_refresh_ms: 30_000,
            flicker_interval_ms: 5_000,
            code_length: 8,
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<(), FlightError> {
        let intervals = [
            ("tick_interval_ms", self.tick_interval_ms),
            ("status_refresh_ms", self.status_refresh_ms),
            ("flicker_interval_ms", self.flicker_interval_ms),
        ];
        match intervals.iter().find(|(_, value)| *value == 0) {
            Some((name, _)) => Err(FlightError::InvalidConfig(format!("{name} phải lớn hơn 0"))),
            None => Ok(()),
        }
    }
}

/// Lỗi chung ở lớp biên (bridge, CLI). Logic mô phỏng không bao giờ lỗi.
#[derive(Debug, thiserror::Error)]
pub enum FlightError {
    #[error("Mốc thời gian không hợp lệ: {0}")]
    InvalidTimestamp(String),
    #[error("Cấu hình không hợp lệ: {0}")]
    InvalidConfig(String),
}

/// Đọc mốc thời gian RFC 3339 do lớp ngoài truyền vào.
pub fn parse_instant(value: &str) -> Result<DateTime<Utc>, FlightError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| FlightError::InvalidTimestamp(format!("{value}: {err}")))
}

/// Chuyển mốc mili-giây (kiểu `Date.now()`) sang `DateTime<Utc>`.
pub fn instant_from_millis(millis: f64) -> Result<DateTime<Utc>, FlightError> {
    if !millis.is_finite() {
        return Err(FlightError::InvalidTimestamp(millis.to_string()));
    }
    DateTime::from_timestamp_millis(millis as i64)
        .ok_or_else(|| FlightError::InvalidTimestamp(millis.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn departure_precedes_arrival() {
        assert_eq!(
            FLIGHT.departure_instant().to_rfc3339(),
            "2025-10-03T11:45:00+00:00"
        );
        assert!(FLIGHT.departure_instant() < FLIGHT.arrival_instant());
    }

    #[test]
    fn banner_names_flight_and_route() {
        let banner = startup_banner();
        assert_eq!(banner[0], "Flight Tracking System Initialized - AA 8247");
        assert_eq!(banner[2], "Route: ACC → SDF");
        assert_eq!(banner[4], "System ready for tracking...");
    }

    #[test]
    fn zero_interval_is_rejected() {
        let config = TrackerConfig {
            tick_interval_ms: 0,
            ..TrackerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(FlightError::InvalidConfig(_))
        ));
        assert!(TrackerConfig::default().validate().is_ok());
    }

    #[test]
    fn parses_rfc3339_and_millis() {
        let parsed = parse_instant("2025-10-03T11:45:00Z").expect("phải đọc được");
        assert_eq!(parsed, FLIGHT.departure_instant());
        let from_ms = instant_from_millis(parsed.timestamp_millis() as f64).expect("hợp lệ");
        assert_eq!(from_ms, parsed);
        assert!(parse_instant("not a date").is_err());
        assert!(instant_from_millis(f64::NAN).is_err());
    }
}
