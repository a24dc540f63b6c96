pub mod app_loop;
pub mod hud_text;
pub mod launch;
pub mod stats_file;

use faculty_core::GameOverReason;

pub const APP_NAME: &str = "Faculty Survival";

/// Format a seed as an exact decimal string with no prefix or suffix.
pub fn format_seed(seed: u64) -> String {
    seed.to_string()
}

/// Format a snapshot hash as `0x` followed by exactly 16 lowercase hex digits.
pub fn format_snapshot_hash(hash: u64) -> String {
    format!("0x{hash:016x}")
}

/// Whole seconds as `m:ss`.
pub fn format_clock(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

pub fn reason_code(reason: GameOverReason) -> &'static str {
    match reason {
        GameOverReason::Overwhelmed => "STUDENTS_OVERWHELMED",
        GameOverReason::EgoCollapsed => "EGO_COLLAPSED",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_seed_is_exact_decimal() {
        assert_eq!(format_seed(0), "0");
        assert_eq!(format_seed(12345), "12345");
        assert_eq!(format_seed(u64::MAX), "18446744073709551615");
    }

    #[test]
    fn format_snapshot_hash_is_16_hex_digits() {
        assert_eq!(format_snapshot_hash(0), "0x0000000000000000");
        assert_eq!(format_snapshot_hash(255), "0x00000000000000ff");
        assert_eq!(format_snapshot_hash(0xDEADBEEF), "0x00000000deadbeef");
    }

    #[test]
    fn clock_pads_seconds() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(65), "1:05");
        assert_eq!(format_clock(600), "10:00");
    }

    #[test]
    fn reason_codes_are_correct() {
        assert_eq!(reason_code(GameOverReason::Overwhelmed), "STUDENTS_OVERWHELMED");
        assert_eq!(reason_code(GameOverReason::EgoCollapsed), "EGO_COLLAPSED");
    }
}
