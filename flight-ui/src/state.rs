//! Trạng thái thuần của trang: bảng trạng thái, chồng toast, vùng nền modal.
//! Không phụ thuộc web-sys nên chạy được trên mọi target.

use chrono::{DateTime, Local, Utc};
use flight_core::{StatusBand, StatusItem, ToastKind, FLIGHT};

/// Id phần tử nền của modal theo dõi.
pub const TRACKING_MODAL_ID: &str = "trackingModal";

/// Chỉ click trực tiếp lên vùng nền (không phải nội dung hộp thoại) mới đóng modal.
pub fn is_backdrop_click(target_id: Option<&str>) -> bool {
    target_id == Some(TRACKING_MODAL_ID)
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusRow {
    pub text: String,
    pub active: bool,
}

impl StatusRow {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            active: false,
        }
    }
}

/// Bảng trạng thái theo giờ thực. Mỗi lần làm mới chỉ ghi đè các dòng
/// mà band hiện tại chạm tới, các dòng khác giữ nội dung cũ.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusBoard {
    pub band: StatusBand,
    pub check_in: StatusRow,
    pub departure: StatusRow,
    pub arrival: StatusRow,
    pub last_updated: String,
}

pub enum BoardAction {
    Refresh(DateTime<Utc>),
    Touch(DateTime<Utc>),
}

impl StatusBoard {
    /// Bảng với nội dung mặc định, chưa đánh giá band.
    pub fn blank(now: DateTime<Utc>) -> Self {
        Self {
            band: StatusBand::Scheduled,
            check_in: StatusRow::new("Check-in Opens 24h Before"),
            departure: StatusRow::new("Flight scheduled and confirmed"),
            arrival: StatusRow::new("Scheduled Arrival 7:30 PM EST"),
            last_updated: format_clock(now),
        }
    }

    pub fn initial(now: DateTime<Utc>) -> Self {
        let mut board = Self::blank(now);
        board.refresh(now);
        board
    }

    pub fn apply(&mut self, action: BoardAction) {
        match action {
            BoardAction::Refresh(now) => self.refresh(now),
            BoardAction::Touch(now) => self.last_updated = format_clock(now),
        }
    }

    fn refresh(&mut self, now: DateTime<Utc>) {
        self.band = StatusBand::evaluate(now, FLIGHT.departure_instant());
        for update in self.band.updates() {
            let row = self.row_mut(update.item);
            row.text = update.text;
            row.active = update.active;
        }
        self.last_updated = format_clock(now);
    }

    fn row_mut(&mut self, item: StatusItem) -> &mut StatusRow {
        match item {
            StatusItem::CheckIn => &mut self.check_in,
            StatusItem::Departure => &mut self.departure,
            StatusItem::Arrival => &mut self.arrival,
        }
    }
}

/// Giờ cục bộ dạng `hh:mm:ss AM`.
pub fn format_clock(now: DateTime<Utc>) -> String {
    now.with_timezone(&Local).format("%I:%M:%S %p").to_string()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToastEntry {
    pub id: u32,
    pub message: String,
    pub kind: ToastKind,
    pub leaving: bool,
}

impl ToastEntry {
    /// Nhãn lạ rơi về `Info`.
    pub fn new(id: u32, message: &str, tag: &str) -> Self {
        Self {
            id,
            message: message.to_string(),
            kind: ToastKind::parse(tag),
            leaving: false,
        }
    }
}

/// Toast không xếp hàng, không gộp, không giới hạn số lượng.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastStack {
    pub items: Vec<ToastEntry>,
}

pub enum ToastAction {
    Push(ToastEntry),
    Leave(u32),
    Remove(u32),
}

impl ToastStack {
    pub fn apply(&mut self, action: ToastAction) {
        match action {
            ToastAction::Push(entry) => self.items.push(entry),
            ToastAction::Leave(id) => {
                if let Some(entry) = self.items.iter_mut().find(|entry| entry.id == id) {
                    entry.leaving = true;
                }
            }
            ToastAction::Remove(id) => self.items.retain(|entry| entry.id != id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn departed_refresh_keeps_check_in_row() {
        let departure = FLIGHT.departure_instant();
        let mut board = StatusBoard::initial(departure - Duration::days(3));
        assert_eq!(board.band, StatusBand::Scheduled);
        assert_eq!(board.check_in.text, "Check-in Opens 24h Before");
        assert!(!board.check_in.active);

        board.apply(BoardAction::Refresh(departure + Duration::hours(1)));

        assert_eq!(board.band, StatusBand::Departed);
        assert_eq!(board.check_in.text, "Check-in Opens 24h Before");
        assert!(!board.check_in.active);
        assert_eq!(board.departure.text, "Departed");
        assert_eq!(board.arrival.text, "In Transit");
        assert!(board.arrival.active);
    }

    #[test]
    fn check_in_band_survives_into_departed() {
        let departure = FLIGHT.departure_instant();
        let mut board = StatusBoard::initial(departure - Duration::hours(5));
        assert_eq!(board.check_in.text, "Check-in Available");

        board.apply(BoardAction::Refresh(departure));

        assert_eq!(board.check_in.text, "Check-in Available");
        assert!(board.check_in.active);
    }

    #[test]
    fn touch_only_updates_clock() {
        let departure = FLIGHT.departure_instant();
        let now = departure - Duration::days(3);
        let mut board = StatusBoard::initial(now);
        let before = board.clone();

        board.apply(BoardAction::Touch(now + Duration::seconds(7)));

        assert_eq!(board.band, before.band);
        assert_eq!(board.check_in, before.check_in);
        assert_eq!(board.last_updated, format_clock(now + Duration::seconds(7)));
    }

    #[test]
    fn same_message_toasts_are_independent() {
        let mut stack = ToastStack::default();
        let first = ToastEntry::new(1, "Calendar event created!", "success");
        let second = ToastEntry::new(2, "Calendar event created!", "success");
        assert_eq!(first.kind, ToastKind::Success);

        stack.apply(ToastAction::Push(first.clone()));
        stack.apply(ToastAction::Push(second.clone()));
        assert_eq!(stack.items.len(), 2);

        stack.apply(ToastAction::Leave(first.id));
        assert!(stack.items[0].leaving);
        assert!(!stack.items[1].leaving);

        stack.apply(ToastAction::Remove(first.id));
        assert_eq!(stack.items, vec![second.clone()]);

        stack.apply(ToastAction::Remove(second.id));
        assert!(stack.items.is_empty());
    }

    #[test]
    fn unknown_tag_becomes_info() {
        let entry = ToastEntry::new(7, "Heads up", "celebration");
        assert_eq!(entry.kind, ToastKind::Info);
        assert_eq!(entry.kind.background(), "#17a2b8");
    }

    #[test]
    fn only_backdrop_target_closes() {
        assert!(is_backdrop_click(Some("trackingModal")));
        assert!(!is_backdrop_click(Some("currentStatus")));
        assert!(!is_backdrop_click(Some("")));
        assert!(!is_backdrop_click(None));
    }
}
