// URL validation against the accepted video URL shapes

use lazy_static::lazy_static;
use regex::Regex;

use super::errors::ClientError;

lazy_static! {
    // Long-form watch URL with a required video-id capture, tolerant of
    // extra query parameters after the id.
    static ref WATCH_RE: Regex =
        Regex::new(r"(?i)^https?://(?:www\.)?youtube\.com/watch\?v=([\w-]+)(?:&\S*)?$").unwrap();
    // Short-link form, tolerant of a trailing query string.
    static ref SHORT_RE: Regex =
        Regex::new(r"(?i)^https?://youtu\.be/([\w-]+)(?:\?\S*)?$").unwrap();
}

/// True iff the string matches one of the two accepted URL shapes.
pub fn is_valid_video_url(url: &str) -> bool {
    WATCH_RE.is_match(url) || SHORT_RE.is_match(url)
}

/// Gate user input before any network call. Blank input gets its own
/// error so the caller can show a distinct message.
pub fn validate_video_url(url: &str) -> Result<(), ClientError> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(ClientError::EmptyUrl);
    }
    if !is_valid_video_url(trimmed) {
        return Err(ClientError::InvalidUrl(trimmed.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_watch_urls() {
        assert!(is_valid_video_url("https://www.youtube.com/watch?v=abc123"));
        assert!(is_valid_video_url("https://youtube.com/watch?v=abc123"));
        assert!(is_valid_video_url("http://www.youtube.com/watch?v=a_b-c"));
        assert!(is_valid_video_url(
            "https://www.youtube.com/watch?v=abc123&t=42s&list=PL1"
        ));
    }

    #[test]
    fn test_accepts_short_urls() {
        assert!(is_valid_video_url("https://youtu.be/abc123"));
        assert!(is_valid_video_url("https://youtu.be/abc123?t=5"));
        assert!(is_valid_video_url("http://youtu.be/a_b-c"));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(is_valid_video_url("HTTPS://WWW.YOUTUBE.COM/watch?v=abc123"));
        assert!(is_valid_video_url("https://YouTu.Be/abc123"));
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(!is_valid_video_url("not a url"));
        assert!(!is_valid_video_url(""));
        assert!(!is_valid_video_url("https://vimeo.com/12345"));
        assert!(!is_valid_video_url("https://www.youtube.com/watch"));
        assert!(!is_valid_video_url("https://www.youtube.com/watch?v="));
        assert!(!is_valid_video_url("https://youtube.com/playlist?list=PL1"));
        assert!(!is_valid_video_url("ftp://youtu.be/abc123"));
        // Junk appended without a query separator
        assert!(!is_valid_video_url("https://youtu.be/abc123 extra"));
    }

    #[test]
    fn test_validate_distinguishes_empty_from_malformed() {
        assert!(matches!(validate_video_url(""), Err(ClientError::EmptyUrl)));
        assert!(matches!(
            validate_video_url("   "),
            Err(ClientError::EmptyUrl)
        ));
        assert!(matches!(
            validate_video_url("not a url"),
            Err(ClientError::InvalidUrl(_))
        ));
        assert!(validate_video_url(" https://youtu.be/abc123 ").is_ok());
    }
}
