use regex::Regex;
use std::sync::LazyLock;

static VIDEO_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:watch\?v=|youtu\.be/|embed/|shorts/)([A-Za-z0-9_-]{11})")
        .expect("Invalid video id regex")
});

static COMPOSITE_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:(\d+)h)?(?:(\d+)m)?(?:(\d+)s?)?$").expect("Invalid time param regex")
});

/// Pulls the standard 11-character video id out of any common YouTube URL
/// form (`watch?v=`, `youtu.be/`, `embed/`, `shorts/`).
pub fn extract_video_id(url: &str) -> Option<String> {
    VIDEO_ID
        .captures(url)
        .map(|captures| captures[1].to_string())
}

/// Parses a `t=` query value: plain seconds (`"90"`, `"90s"`) or the
/// composite `1h2m30s` form. Malformed values yield 0.
pub fn parse_time_param(value: &str) -> u32 {
    let value = value.trim();
    if value.is_empty() {
        return 0;
    }
    let Some(captures) = COMPOSITE_TIME.captures(value) else {
        return 0;
    };
    let part = |index: usize| {
        captures
            .get(index)
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .unwrap_or(0)
    };
    part(1) * 3600 + part(2) * 60 + part(3)
}

/// Seconds offset encoded in a URL's `t=` (or `start=`) query parameter.
pub fn start_seconds(url: &str) -> u32 {
    let Some((_, query)) = url.split_once('?') else {
        return 0;
    };
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "t" || *key == "start")
        .map(|(_, value)| parse_time_param(value))
        .unwrap_or(0)
}

/// Canonical watch URL at a given offset.
pub fn watch_url(video_id: &str, seconds: u32) -> String {
    format!("https://www.youtube.com/watch?v={}&t={}", video_id, seconds)
}

/// Iframe source used by the player when jumping to a timestamp.
pub fn embed_url(video_id: &str, seconds: u32) -> String {
    format!(
        "https://www.youtube.com/embed/{}?start={}&autoplay=1",
        video_id, seconds
    )
}

/// Re-derives the canonical watch URL for a raw catalog URL at `seconds`.
pub fn timestamp_url(raw_url: &str, seconds: u32) -> Option<String> {
    extract_video_id(raw_url).map(|id| watch_url(&id, seconds))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_extraction_covers_common_forms() {
        let id = Some("dQw4w9WgXcQ".to_string());
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=10"),
            id
        );
        assert_eq!(extract_video_id("https://youtu.be/dQw4w9WgXcQ"), id);
        assert_eq!(
            extract_video_id("https://www.youtube.com/embed/dQw4w9WgXcQ"),
            id
        );
        assert_eq!(extract_video_id("https://example.com/not-a-video"), None);
    }

    #[test]
    fn time_param_supports_plain_and_composite() {
        assert_eq!(parse_time_param("90"), 90);
        assert_eq!(parse_time_param("90s"), 90);
        assert_eq!(parse_time_param("1h2m30s"), 3750);
        assert_eq!(parse_time_param("2m"), 120);
        assert_eq!(parse_time_param("garbage"), 0);
    }

    #[test]
    fn start_seconds_reads_query_parameter() {
        assert_eq!(
            start_seconds("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=1h2m3s"),
            3723
        );
        assert_eq!(start_seconds("https://youtu.be/dQw4w9WgXcQ"), 0);
    }

    #[test]
    fn timestamp_url_is_canonical() {
        assert_eq!(
            timestamp_url("https://youtu.be/dQw4w9WgXcQ?t=5", 90).as_deref(),
            Some("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=90")
        );
        assert_eq!(timestamp_url("nope", 90), None);
    }
}
