// Helper functions: size formatting and filename construction

/// Units by ascending power of 1024.
const UNITS: [&str; 9] = ["Bytes", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// Default number of decimal places for the size column.
pub const DEFAULT_DECIMALS: usize = 2;

/// Render a byte count as `"<value> <unit>"`, picking the largest power of
/// 1024 not exceeding the input. Trailing zeros are trimmed, so
/// 1024 -> "1 KB" and 1536 -> "1.5 KB". Zero renders as the literal "0 Bytes".
pub fn format_bytes(bytes: u64, decimals: usize) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rendered = format!("{:.*}", decimals, value);
    // Only the fractional part is trimmed; with no decimal point the
    // integer value's own trailing zeros are significant
    let trimmed = if decimals > 0 {
        rendered.trim_end_matches('0').trim_end_matches('.')
    } else {
        rendered.as_str()
    };
    format!("{} {}", trimmed, UNITS[unit])
}

/// Characters that never make it into a saved filename.
const FORBIDDEN: [char; 10] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*', '%'];

/// Maximum length (in characters) of a sanitized title.
const MAX_TITLE_CHARS: usize = 100;

/// Replace forbidden filename characters with underscores and cap the
/// length. An empty result falls back to "video".
pub fn sanitize_title(title: &str) -> String {
    let sanitized: String = title
        .chars()
        .map(|c| if FORBIDDEN.contains(&c) { '_' } else { c })
        .take(MAX_TITLE_CHARS)
        .collect();

    if sanitized.is_empty() {
        "video".to_string()
    } else {
        sanitized
    }
}

/// Build the suggested filename sent with a download request.
pub fn build_filename(title: &str, extension: &str) -> String {
    format!("{}.{}", sanitize_title(title), extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes_zero() {
        assert_eq!(format_bytes(0, 2), "0 Bytes");
    }

    #[test]
    fn test_format_bytes_exact_units() {
        assert_eq!(format_bytes(1024, 2), "1 KB");
        assert_eq!(format_bytes(1_048_576, 2), "1 MB");
        assert_eq!(format_bytes(5_242_880, 2), "5 MB");
        assert_eq!(format_bytes(1_073_741_824, 2), "1 GB");
    }

    #[test]
    fn test_format_bytes_fractional() {
        assert_eq!(format_bytes(1536, 2), "1.5 KB");
        assert_eq!(format_bytes(1536, 0), "2 KB");
        assert_eq!(format_bytes(1234, 2), "1.21 KB");
    }

    #[test]
    fn test_format_bytes_zero_decimals_keeps_integer_zeros() {
        assert_eq!(format_bytes(102_400, 0), "100 KB");
        assert_eq!(format_bytes(10_240, 0), "10 KB");
        assert_eq!(format_bytes(102_400, 2), "100 KB");
    }

    #[test]
    fn test_format_bytes_below_one_kb() {
        assert_eq!(format_bytes(1, 2), "1 Bytes");
        assert_eq!(format_bytes(1023, 2), "1023 Bytes");
    }

    #[test]
    fn test_sanitize_title_replaces_forbidden_chars() {
        assert_eq!(
            sanitize_title(r#"a<b>c:d"e/f\g|h?i*j%k"#),
            "a_b_c_d_e_f_g_h_i_j_k"
        );
        assert_eq!(sanitize_title("Plain Title 42"), "Plain Title 42");
    }

    #[test]
    fn test_sanitize_title_truncates() {
        let long = "x".repeat(150);
        assert_eq!(sanitize_title(&long).chars().count(), 100);
    }

    #[test]
    fn test_sanitize_title_empty_falls_back() {
        assert_eq!(sanitize_title(""), "video");
    }

    #[test]
    fn test_build_filename() {
        assert_eq!(build_filename("My Clip", "mp4"), "My Clip.mp4");
        assert_eq!(build_filename("a/b", "mp3"), "a_b.mp3");
        assert_eq!(build_filename("", "mp4"), "video.mp4");
    }
}
