use log::warn;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

pub const MATCHUP_KEY_SEPARATOR: &str = " vs ";

/// One navigable point inside a video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampRecord {
    pub time: u32,
    pub label: String,
    pub source_video_title: String,
}

/// A video record after raw-shape dispatch and timestamp conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedVideo {
    pub url: String,
    pub title: String,
    pub chara1: String,
    pub chara2: String,
    pub directory: String,
    pub matchup_key: String,
    pub upload_date: String,
    pub timestamps: Vec<TimestampRecord>,
}

/// Raw JSON record for one video. `timestamps` maps raw time strings to
/// detection metadata; older files carry a single `detect_time` scalar
/// instead.
#[derive(Debug, Clone, Deserialize)]
pub struct RawMatchupEntry {
    pub url: String,
    pub chara1: String,
    pub chara2: String,
    #[serde(default, alias = "video_title")]
    pub title: Option<String>,
    #[serde(default)]
    pub upload_date: Option<String>,
    #[serde(default)]
    pub timestamps: Option<BTreeMap<String, Value>>,
    #[serde(default)]
    pub detect_time: Option<Value>,
}

/// Extracts every parseable entry from one catalog file's `content`.
///
/// Files come in two shapes: entries nested under a `matchups` map, or
/// entries as direct top-level map values. Malformed entries are skipped
/// with a warning; a partial result is fine.
pub fn extract_entries(content: &Value, directory: &str) -> Vec<NormalizedVideo> {
    let entries = match content.get("matchups").and_then(Value::as_object) {
        Some(nested) => nested,
        None => match content.as_object() {
            Some(flat) => flat,
            None => {
                warn!("Catalog file '{}' is not a JSON object, skipping", directory);
                return Vec::new();
            }
        },
    };

    let mut videos = Vec::with_capacity(entries.len());
    for (key, raw) in entries {
        match serde_json::from_value::<RawMatchupEntry>(raw.clone()) {
            Ok(entry) => videos.push(normalize_entry(entry, directory)),
            Err(err) => {
                warn!(
                    "Skipping malformed entry '{}' in '{}': {}",
                    key, directory, err
                );
            }
        }
    }
    videos
}

pub fn normalize_entry(raw: RawMatchupEntry, directory: &str) -> NormalizedVideo {
    let title = raw.title.unwrap_or_default();
    let upload_date = raw.upload_date.unwrap_or_default();

    let mut timestamps = Vec::new();
    if let Some(entries) = &raw.timestamps {
        for (raw_time, metadata) in entries {
            timestamps.push(TimestampRecord {
                time: parse_time_seconds(raw_time),
                label: label_from_metadata(metadata, &title),
                source_video_title: title.clone(),
            });
        }
    } else if let Some(detect_time) = &raw.detect_time {
        timestamps.push(TimestampRecord {
            time: scalar_time_seconds(detect_time),
            label: title.clone(),
            source_video_title: title.clone(),
        });
    }

    timestamps.sort_by_key(|record| record.time);

    // The UI always needs at least one navigable point.
    if timestamps.is_empty() {
        timestamps.push(TimestampRecord {
            time: 0,
            label: title.clone(),
            source_video_title: title.clone(),
        });
    }

    NormalizedVideo {
        matchup_key: matchup_key(&raw.chara1, &raw.chara2),
        url: raw.url,
        title,
        chara1: raw.chara1,
        chara2: raw.chara2,
        directory: directory.to_string(),
        upload_date,
        timestamps,
    }
}

/// Order-independent pairing key: A-vs-B and B-vs-A produce the same key.
pub fn matchup_key(chara1: &str, chara2: &str) -> String {
    let (first, second) = if chara1 <= chara2 {
        (chara1, chara2)
    } else {
        (chara2, chara1)
    };
    format!("{}{}{}", first, MATCHUP_KEY_SEPARATOR, second)
}

/// Converts a raw time field to whole seconds. Colon-separated strings are
/// read as H:MM:SS or MM:SS; anything else as an integer literal. Malformed
/// input yields 0 rather than an error.
pub fn parse_time_seconds(raw: &str) -> u32 {
    let raw = raw.trim();
    if raw.contains(':') {
        let parts: Option<Vec<u32>> = raw
            .split(':')
            .map(|part| part.trim().parse::<u32>().ok())
            .collect();
        match parts.as_deref() {
            Some([hours, minutes, seconds]) => hours * 3600 + minutes * 60 + seconds,
            Some([minutes, seconds]) => minutes * 60 + seconds,
            _ => 0,
        }
    } else {
        raw.parse().unwrap_or(0)
    }
}

fn scalar_time_seconds(value: &Value) -> u32 {
    match value {
        Value::Number(number) => number.as_u64().unwrap_or(0) as u32,
        Value::String(text) => parse_time_seconds(text),
        _ => 0,
    }
}

fn label_from_metadata(metadata: &Value, fallback_title: &str) -> String {
    match metadata {
        Value::String(text) if !text.trim().is_empty() => text.clone(),
        Value::Object(map) => map
            .get("label")
            .or_else(|| map.get("comment"))
            .and_then(Value::as_str)
            .filter(|text| !text.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| fallback_title.to_string()),
        _ => fallback_title.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn time_parsing_handles_all_shapes() {
        assert_eq!(parse_time_seconds("1:02:03"), 3723);
        assert_eq!(parse_time_seconds("02:03"), 123);
        assert_eq!(parse_time_seconds("125"), 125);
        assert_eq!(parse_time_seconds("junk"), 0);
        assert_eq!(parse_time_seconds("1:xx"), 0);
        assert_eq!(parse_time_seconds(" 1:30 "), 90);
    }

    #[test]
    fn matchup_key_is_order_independent() {
        assert_eq!(matchup_key("Ryu", "Ken"), matchup_key("Ken", "Ryu"));
        assert_eq!(matchup_key("Ken", "Ryu"), "Ken vs Ryu");
    }

    #[test]
    fn nested_and_flat_shapes_both_extract() {
        let entry = json!({
            "url": "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "chara1": "Ryu",
            "chara2": "Ken",
            "video_title": "Ryu vs Ken",
            "timestamps": { "1:30": "Punish" }
        });
        let nested = json!({ "matchups": { "a": entry } });
        let flat = json!({ "a": entry });

        let from_nested = extract_entries(&nested, "2024-01");
        let from_flat = extract_entries(&flat, "2024-01");
        assert_eq!(from_nested, from_flat);
        assert_eq!(from_nested.len(), 1);
        assert_eq!(from_nested[0].timestamps[0].time, 90);
        assert_eq!(from_nested[0].timestamps[0].label, "Punish");
        assert_eq!(from_nested[0].title, "Ryu vs Ken");
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let content = json!({
            "good": {
                "url": "https://youtu.be/dQw4w9WgXcQ",
                "chara1": "Mario",
                "chara2": "Luigi"
            },
            "bad": { "chara1": "Fox" }
        });
        let videos = extract_entries(&content, "dir");
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].chara1, "Mario");
    }

    #[test]
    fn missing_timestamps_get_synthetic_zero() {
        let raw = RawMatchupEntry {
            url: "https://youtu.be/dQw4w9WgXcQ".into(),
            chara1: "Mario".into(),
            chara2: "Luigi".into(),
            title: Some("Mirrorless".into()),
            upload_date: None,
            timestamps: None,
            detect_time: None,
        };
        let video = normalize_entry(raw, "dir");
        assert_eq!(video.timestamps.len(), 1);
        assert_eq!(video.timestamps[0].time, 0);
        assert_eq!(video.timestamps[0].label, "Mirrorless");
        assert_eq!(video.upload_date, "");
    }

    #[test]
    fn detect_time_scalar_becomes_single_timestamp() {
        let raw: RawMatchupEntry = serde_json::from_value(json!({
            "url": "u",
            "chara1": "Fox",
            "chara2": "Falco",
            "title": "Lasers",
            "detect_time": 42
        }))
        .unwrap();
        let video = normalize_entry(raw, "dir");
        assert_eq!(video.timestamps.len(), 1);
        assert_eq!(video.timestamps[0].time, 42);

        let raw: RawMatchupEntry = serde_json::from_value(json!({
            "url": "u",
            "chara1": "Fox",
            "chara2": "Falco",
            "detect_time": "2:05"
        }))
        .unwrap();
        assert_eq!(normalize_entry(raw, "dir").timestamps[0].time, 125);
    }

    #[test]
    fn timestamps_are_sorted_ascending() {
        let raw: RawMatchupEntry = serde_json::from_value(json!({
            "url": "u",
            "chara1": "Ness",
            "chara2": "Lucas",
            "timestamps": { "10:00": "late", "0:05": "early", "1:00": "mid" }
        }))
        .unwrap();
        let video = normalize_entry(raw, "dir");
        let times: Vec<u32> = video.timestamps.iter().map(|t| t.time).collect();
        assert_eq!(times, vec![5, 60, 600]);
    }
}
