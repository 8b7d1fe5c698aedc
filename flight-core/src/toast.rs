//! Mô hình thông báo toast: loại, màu nền và dòng thời gian tự huỷ.

use serde::{Deserialize, Serialize};

/// Thời gian toast hiển thị trước khi bắt đầu trượt ra.
pub const TOAST_VISIBLE_MS: u32 = 3_000;
/// Thời lượng hoạt ảnh trượt vào / trượt ra.
pub const TOAST_ANIMATION_MS: u32 = 300;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

impl ToastKind {
    /// Nhãn lạ rơi về `Info`.
    pub fn parse(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "success" => ToastKind::Success,
            "error" => ToastKind::Error,
            "warning" => ToastKind::Warning,
            _ => ToastKind::Info,
        }
    }

    pub fn background(self) -> &'static str {
        match self {
            ToastKind::Success => "#28a745",
            ToastKind::Error => "#dc3545",
            ToastKind::Warning => "#ffc107",
            ToastKind::Info => "#17a2b8",
        }
    }
}

/// Giai đoạn của một toast tại thời điểm `elapsed_ms` kể từ khi tạo.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ToastPhase {
    Entering,
    Visible,
    Leaving,
    Removed,
}

impl ToastPhase {
    pub fn at(elapsed_ms: u32) -> Self {
        if elapsed_ms < TOAST_ANIMATION_MS {
            ToastPhase::Entering
        } else if elapsed_ms < TOAST_VISIBLE_MS {
            ToastPhase::Visible
        } else if elapsed_ms < TOAST_VISIBLE_MS + TOAST_ANIMATION_MS {
            ToastPhase::Leaving
        } else {
            ToastPhase::Removed
        }
    }

    /// Mốc bắt đầu trượt ra.
    pub const fn leaving_at_ms() -> u32 {
        TOAST_VISIBLE_MS
    }

    /// Tổng thời gian sống của toast.
    pub const fn lifetime_ms() -> u32 {
        TOAST_VISIBLE_MS + TOAST_ANIMATION_MS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_tag_falls_back_to_info() {
        assert_eq!(ToastKind::parse("celebration"), ToastKind::Info);
        assert_eq!(ToastKind::parse(""), ToastKind::Info);
        assert_eq!(ToastKind::parse("celebration").background(), "#17a2b8");
        assert_eq!(ToastKind::parse("Success"), ToastKind::Success);
    }

    #[test]
    fn every_kind_is_removed_by_lifetime() {
        for tag in ["success", "error", "warning", "info", "bogus"] {
            let kind = ToastKind::parse(tag);
            assert!(!kind.background().is_empty());
            assert_eq!(ToastPhase::at(ToastPhase::lifetime_ms()), ToastPhase::Removed);
        }
        assert_eq!(ToastPhase::lifetime_ms(), 3_300);
    }

    #[test]
    fn phases_follow_show_then_hide() {
        assert_eq!(ToastPhase::at(0), ToastPhase::Entering);
        assert_eq!(ToastPhase::at(300), ToastPhase::Visible);
        assert_eq!(ToastPhase::at(2_999), ToastPhase::Visible);
        assert_eq!(ToastPhase::at(3_000), ToastPhase::Leaving);
        assert_eq!(ToastPhase::at(3_299), ToastPhase::Leaving);
    }

    #[test]
    fn scheduling_marks_match_phases() {
        assert_eq!(ToastPhase::at(ToastPhase::leaving_at_ms() - 1), ToastPhase::Visible);
        assert_eq!(ToastPhase::at(ToastPhase::leaving_at_ms()), ToastPhase::Leaving);
        assert_eq!(ToastPhase::at(ToastPhase::lifetime_ms() - 1), ToastPhase::Leaving);
    }
}
