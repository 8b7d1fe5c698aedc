//! Sinh mã xác nhận và mã đặt chỗ ngẫu nhiên (chỉ mang tính trình bày).

use rand::Rng;
use serde::{Deserialize, Serialize};

const LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LETTERS_AND_DIGITS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Sinh chuỗi độ dài `length`, lấy mẫu đều (có hoàn lại) từ bảng chữ cái.
pub fn generate_code(length: usize, include_digits: bool) -> String {
    generate_code_with(&mut rand::thread_rng(), length, include_digits)
}

/// Như `generate_code` nhưng dùng bộ sinh do người gọi cung cấp.
pub fn generate_code_with<R: Rng>(
    rng: &mut R,
    length: usize,
    include_digits: bool,
) -> String {
    let charset = if include_digits {
        LETTERS_AND_DIGITS
    } else {
        LETTERS
    };
    (0..length)
        .map(|_| charset[rng.gen_range(0..charset.len())] as char)
        .collect()
}

/// Cặp mã được sinh một lần cho mỗi phiên trang. Có thể trùng, không kiểm tra.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneratedCodes {
    pub confirmation_code: String,
    pub booking_reference: String,
}

impl GeneratedCodes {
    pub fn generate(length: usize) -> Self {
        Self::generate_with(&mut rand::thread_rng(), length)
    }

    pub fn generate_with<R: Rng>(rng: &mut R, length: usize) -> Self {
        Self {
            confirmation_code: generate_code_with(rng, length, false),
            booking_reference: generate_code_with(rng, length, true),
        }
    }
}
