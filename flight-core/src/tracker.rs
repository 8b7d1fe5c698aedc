//! Máy trạng thái mô phỏng theo dõi trực tiếp, độc lập với bộ định thời.
//!
//! Lớp giao diện (hoặc CLI) giữ timer và gọi `tick()` theo nhịp cấu hình;
//! phiên chỉ lưu con trỏ vào bảng `STATUS_TIMELINE`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::GATE;

/// Ngưỡng tiến trình (phần trăm) để hiển thị thông tin cổng.
pub const GATE_REVEAL_PERCENT: u8 = 20;

/// Một bước cố định trong chuỗi trạng thái mô phỏng.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct TimelineEntry {
    pub elapsed_percent: u8,
    pub label: &'static str,
    pub message: &'static str,
}

const fn entry(elapsed_percent: u8, label: &'static str, message: &'static str) -> TimelineEntry {
    TimelineEntry {
        elapsed_percent,
        label,
        message,
    }
}

pub const STATUS_TIMELINE: [TimelineEntry; 8] = [
    entry(0, "Scheduled", "Flight scheduled and confirmed"),
    entry(10, "Check-in Open", "Online check-in is now available"),
    entry(20, "Gate Assigned", "Gate A12 assigned for departure"),
    entry(30, "Boarding", "Boarding has commenced"),
    entry(40, "Departed", "Flight has departed from ACC"),
    entry(60, "In Flight", "Cruising at 35,000 feet"),
    entry(80, "Approaching", "Beginning descent to SDF"),
    entry(100, "Landed", "Flight has arrived at SDF"),
];

/// Màu của huy hiệu trạng thái, chọn theo từ khóa trong nhãn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BadgeTone {
    #[default]
    Default,
    Blue,
    Green,
    Amber,
}

impl BadgeTone {
    /// Vị từ đầu tiên khớp sẽ thắng; nhãn không khớp giữ kiểu mặc định.
    pub fn for_label(label: &str) -> Self {
        if label.contains("Departed") || label.contains("In Flight") {
            BadgeTone::Blue
        } else if label.contains("Landed") {
            BadgeTone::Green
        } else if label.contains("Boarding") {
            BadgeTone::Amber
        } else {
            BadgeTone::Default
        }
    }

    pub fn background(self) -> Option<&'static str> {
        match self {
            BadgeTone::Default => None,
            BadgeTone::Blue => Some("#007bff"),
            BadgeTone::Green => Some("#28a745"),
            BadgeTone::Amber => Some("#ffc107"),
        }
    }
}

/// Những gì giao diện cần vẽ sau một bước mô phỏng.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LiveUpdate {
    pub label: &'static str,
    pub message: &'static str,
    pub progress_percent: u8,
    pub tone: BadgeTone,
    pub gate: Option<&'static str>,
}

impl From<&TimelineEntry> for LiveUpdate {
    fn from(entry: &TimelineEntry) -> Self {
        Self {
            label: entry.label,
            message: entry.message,
            progress_percent: entry.elapsed_percent,
            tone: BadgeTone::for_label(entry.label),
            gate: (entry.elapsed_percent >= GATE_REVEAL_PERCENT).then_some(GATE),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum SessionState {
    #[default]
    Idle,
    Running {
        cursor: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    /// Phiên đang chạy; không tạo timer thứ hai.
    AlreadyRunning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Đã áp dụng một bước, phiên vẫn chạy.
    Advanced(LiveUpdate),
    /// Đã áp dụng bước cuối; phiên trở về `Idle`, người gọi huỷ timer.
    Completed(LiveUpdate),
    /// Phiên không chạy, không làm gì.
    Idle,
}

/// Phiên theo dõi: `Idle → Running → Idle`, không tạm dừng, không lùi.
#[derive(Debug, Clone)]
pub struct TrackingSession {
    state: SessionState,
    timeline: &'static [TimelineEntry],
}

impl Default for TrackingSession {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackingSession {
    pub fn new() -> Self {
        Self::with_timeline(&STATUS_TIMELINE)
    }

    pub fn with_timeline(timeline: &'static [TimelineEntry]) -> Self {
        Self {
            state: SessionState::Idle,
            timeline,
        }
    }

    pub fn is_tracking(&self) -> bool {
        matches!(self.state, SessionState::Running { .. })
    }

    /// Vị trí con trỏ khi đang chạy.
    pub fn cursor(&self) -> Option<usize> {
        match self.state {
            SessionState::Running { cursor } => Some(cursor),
            SessionState::Idle => None,
        }
    }

    pub fn start(&mut self) -> StartOutcome {
        if self.is_tracking() {
            debug!("tracking already running, start ignored");
            return StartOutcome::AlreadyRunning;
        }
        self.state = SessionState::Running { cursor: 0 };
        debug!(steps = self.timeline.len(), "tracking started");
        StartOutcome::Started
    }

    pub fn tick(&mut self) -> TickOutcome {
        let SessionState::Running { cursor } = self.state else {
            return TickOutcome::Idle;
        };

        let Some(entry) = self.timeline.get(cursor) else {
            self.stop();
            return TickOutcome::Idle;
        };

        let update = LiveUpdate::from(entry);
        let next = cursor + 1;
        if next >= self.timeline.len() {
            debug!(label = entry.label, "tracking reached final step");
            self.state = SessionState::Idle;
            TickOutcome::Completed(update)
        } else {
            self.state = SessionState::Running { cursor: next };
            TickOutcome::Advanced(update)
        }
    }

    /// Dừng vô điều kiện; gọi nhiều lần cũng được.
    pub fn stop(&mut self) {
        if self.is_tracking() {
            debug!("tracking stopped");
        }
        self.state = SessionState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(session: &mut TrackingSession) -> Vec<LiveUpdate> {
        let mut updates = Vec::new();
        loop {
            match session.tick() {
                TickOutcome::Advanced(update) => updates.push(update),
                TickOutcome::Completed(update) => {
                    updates.push(update);
                    break;
                }
                TickOutcome::Idle => break,
            }
        }
        updates
    }

    #[test]
    fn eight_ticks_return_to_idle() {
        let mut session = TrackingSession::new();
        assert_eq!(session.start(), StartOutcome::Started);

        for step in 0..7 {
            assert!(matches!(session.tick(), TickOutcome::Advanced(_)), "step {step}");
            assert!(session.is_tracking());
        }
        assert!(matches!(session.tick(), TickOutcome::Completed(_)));
        assert!(!session.is_tracking());
        assert_eq!(session.tick(), TickOutcome::Idle);
    }

    #[test]
    fn progress_follows_fixed_sequence() {
        let mut session = TrackingSession::new();
        session.start();
        let progress: Vec<u8> = drain(&mut session)
            .iter()
            .map(|update| update.progress_percent)
            .collect();
        assert_eq!(progress, vec![0, 10, 20, 30, 40, 60, 80, 100]);
        assert!(progress.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn double_start_keeps_cursor() {
        let mut session = TrackingSession::new();
        session.start();
        session.tick();
        session.tick();
        assert_eq!(session.cursor(), Some(2));
        assert_eq!(session.start(), StartOutcome::AlreadyRunning);
        assert_eq!(session.cursor(), Some(2));
    }

    #[test]
    fn stop_is_idempotent_and_restart_rewinds() {
        let mut session = TrackingSession::new();
        session.stop();
        assert!(!session.is_tracking());

        session.start();
        session.tick();
        session.stop();
        session.stop();
        assert_eq!(session.tick(), TickOutcome::Idle);

        session.start();
        assert_eq!(session.cursor(), Some(0));
    }

    #[test]
    fn gate_revealed_from_twenty_percent() {
        let mut session = TrackingSession::new();
        session.start();
        for update in drain(&mut session) {
            assert_eq!(update.gate.is_some(), update.progress_percent >= 20);
        }
    }

    #[test]
    fn badge_tone_by_keyword() {
        assert_eq!(BadgeTone::for_label("Departed"), BadgeTone::Blue);
        assert_eq!(BadgeTone::for_label("In Flight"), BadgeTone::Blue);
        assert_eq!(BadgeTone::for_label("Landed"), BadgeTone::Green);
        assert_eq!(BadgeTone::for_label("Boarding"), BadgeTone::Amber);
        assert_eq!(BadgeTone::for_label("Approaching"), BadgeTone::Default);
        assert_eq!(BadgeTone::Default.background(), None);
        assert_eq!(BadgeTone::Green.background(), Some("#28a745"));
    }

    #[test]
    fn empty_timeline_stops_on_first_tick() {
        static EMPTY: [TimelineEntry; 0] = [];
        let mut session = TrackingSession::with_timeline(&EMPTY);
        session.start();
        assert_eq!(session.tick(), TickOutcome::Idle);
        assert!(!session.is_tracking());
    }
}
