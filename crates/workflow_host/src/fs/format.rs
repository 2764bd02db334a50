//! Display formatting for entry metadata (sizes and modification dates).

use chrono::DateTime;

const SIZE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Formats a byte count with 1024-based units and at most one decimal place.
///
/// Trailing `.0` is dropped, so `1024` renders as `1 KB` and `1536` as `1.5 KB`.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0usize;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{} {}", rounded as u64, SIZE_UNITS[unit])
    } else {
        format!("{rounded:.1} {}", SIZE_UNITS[unit])
    }
}

/// Formats a unix timestamp (seconds, possibly fractional) as a `YYYY-MM-DD` UTC date.
///
/// Out-of-range or non-finite timestamps render as an empty string.
pub fn format_date(unix_seconds: f64) -> String {
    if !unix_seconds.is_finite() {
        return String::new();
    }
    DateTime::from_timestamp(unix_seconds.floor() as i64, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_sizes_use_binary_units() {
        let cases = [
            (0, "0 B"),
            (120, "120 B"),
            (1024, "1 KB"),
            (1536, "1.5 KB"),
            (5 * 1024 * 1024, "5 MB"),
            (3 * 1024 * 1024 * 1024 * 1024, "3072 GB"),
        ];
        for (bytes, expected) in cases {
            assert_eq!(format_file_size(bytes), expected, "bytes={bytes}");
        }
    }

    #[test]
    fn dates_render_as_utc_calendar_days() {
        assert_eq!(format_date(0.0), "1970-01-01");
        assert_eq!(format_date(1_700_000_000.75), "2023-11-14");
        assert_eq!(format_date(f64::NAN), "");
    }
}
