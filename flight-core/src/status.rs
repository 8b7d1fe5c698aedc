//! Đánh giá trạng thái chuyến bay theo khoảng cách tới giờ cất cánh.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Số giờ (có phần lẻ) từ `now` tới `departure`. Âm khi đã cất cánh.
pub fn hours_until(now: DateTime<Utc>, departure: DateTime<Utc>) -> f64 {
    departure.signed_duration_since(now).num_milliseconds() as f64 / MILLIS_PER_HOUR
}

/// Bốn khoảng thời gian loại trừ lẫn nhau, phủ toàn bộ trục thời gian.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StatusBand {
    /// Còn hơn 24 giờ.
    Scheduled,
    /// Còn trong khoảng (2h, 24h].
    CheckInOpen,
    /// Còn trong khoảng (0h, 2h].
    Imminent,
    /// Đã tới hoặc qua giờ cất cánh.
    Departed,
}

/// Dòng trạng thái trên trang chính.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StatusItem {
    CheckIn,
    Departure,
    Arrival,
}

impl StatusItem {
    /// Id phần tử DOM tương ứng.
    pub fn element_id(self) -> &'static str {
        match self {
            StatusItem::CheckIn => "checkinStatus",
            StatusItem::Departure => "departureStatus",
            StatusItem::Arrival => "arrivalStatus",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusItemUpdate {
    pub item: StatusItem,
    pub text: String,
    pub active: bool,
}

impl StatusItemUpdate {
    fn new(item: StatusItem, text: &str, active: bool) -> Self {
        Self {
            item,
            text: text.to_string(),
            active,
        }
    }
}

impl StatusBand {
    /// Chọn band theo giờ thực. Hàm thuần, không giữ band trước đó.
    pub fn evaluate(now: DateTime<Utc>, departure: DateTime<Utc>) -> Self {
        let hours = hours_until(now, departure);
        let band = Self::from_hours(hours);
        debug!(hours, ?band, "evaluated flight status band");
        band
    }

    pub fn from_hours(hours: f64) -> Self {
        if hours > 24.0 {
            StatusBand::Scheduled
        } else if hours > 2.0 {
            StatusBand::CheckInOpen
        } else if hours > 0.0 {
            StatusBand::Imminent
        } else {
            StatusBand::Departed
        }
    }

    /// Các cập nhật cố định cho từng band.
    pub fn updates(self) -> Vec<StatusItemUpdate> {
        use StatusItem::*;
        match self {
            StatusBand::Scheduled => vec![
                StatusItemUpdate::new(CheckIn, "Check-in Opens 24h Before", false),
                StatusItemUpdate::new(Departure, "Flight scheduled and confirmed", true),
            ],
            StatusBand::CheckInOpen => vec![
                StatusItemUpdate::new(CheckIn, "Check-in Available", true),
                StatusItemUpdate::new(Departure, "Flight scheduled and confirmed", true),
            ],
            StatusBand::Imminent => vec![
                StatusItemUpdate::new(CheckIn, "Check-in Closing Soon", true),
                StatusItemUpdate::new(Departure, "Boarding Soon", true),
            ],
            StatusBand::Departed => vec![
                StatusItemUpdate::new(Departure, "Departed", true),
                StatusItemUpdate::new(Arrival, "In Transit", true),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn departure() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 3, 11, 45, 0).unwrap()
    }

    fn band_at(offset: Duration) -> StatusBand {
        StatusBand::evaluate(departure() - offset, departure())
    }

    #[test]
    fn far_future_is_scheduled() {
        assert_eq!(band_at(Duration::days(3)), StatusBand::Scheduled);
        assert_eq!(
            band_at(Duration::hours(24) + Duration::milliseconds(1)),
            StatusBand::Scheduled
        );
    }

    #[test]
    fn boundaries_fall_into_the_lower_band() {
        assert_eq!(band_at(Duration::hours(24)), StatusBand::CheckInOpen);
        assert_eq!(band_at(Duration::hours(2)), StatusBand::Imminent);
        assert_eq!(band_at(Duration::zero()), StatusBand::Departed);
    }

    #[test]
    fn just_inside_each_band() {
        assert_eq!(
            band_at(Duration::hours(2) + Duration::milliseconds(1)),
            StatusBand::CheckInOpen
        );
        assert_eq!(band_at(Duration::milliseconds(1)), StatusBand::Imminent);
        assert_eq!(band_at(-Duration::hours(5)), StatusBand::Departed);
    }

    #[test]
    fn every_band_touches_two_rows() {
        for band in [
            StatusBand::Scheduled,
            StatusBand::CheckInOpen,
            StatusBand::Imminent,
            StatusBand::Departed,
        ] {
            assert_eq!(band.updates().len(), 2);
        }

        let scheduled = StatusBand::Scheduled.updates();
        assert_eq!(scheduled[0].item, StatusItem::CheckIn);
        assert!(!scheduled[0].active);

        let departed = StatusBand::Departed.updates();
        assert_eq!(departed[1].item.element_id(), "arrivalStatus");
        assert_eq!(departed[1].text, "In Transit");
    }

    #[test]
    fn evaluation_is_idempotent() {
        let now = departure() - Duration::minutes(90);
        assert_eq!(
            StatusBand::evaluate(now, departure()),
            StatusBand::evaluate(now, departure())
        );
        assert!((hours_until(now, departure()) - 1.5).abs() < f64::EPSILON);
    }
}
