use crate::characters::{self, CharacterEntry};
use crate::filter::Selection;
use crate::normalize::{matchup_key, NormalizedVideo};
use chrono::NaiveDate;
use std::cmp::Ordering;

/// Key reserved for videos whose character names resolve to no catalog entry.
pub const UNRECOGNIZED_GROUP_KEY: &str = "unrecognized";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryGroup {
    pub directory: String,
    pub videos: Vec<NormalizedVideo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterGroup {
    pub key: String,
    pub icon1: Option<String>,
    pub icon2: Option<String>,
    pub videos: Vec<NormalizedVideo>,
}

/// Stable partition by source directory: directories appear in first-seen
/// order and each group keeps the input order of its videos.
pub fn group_by_directory(videos: &[NormalizedVideo]) -> Vec<DirectoryGroup> {
    let mut groups: Vec<DirectoryGroup> = Vec::new();
    for video in videos {
        match groups
            .iter_mut()
            .find(|group| group.directory == video.directory)
        {
            Some(group) => group.videos.push(video.clone()),
            None => groups.push(DirectoryGroup {
                directory: video.directory.clone(),
                videos: vec![video.clone()],
            }),
        }
    }
    groups
}

/// Groups videos by order-independent character pairing. Videos whose names
/// fail to resolve land in a shared "unrecognized" bucket with no icons.
/// When `selected` matches one side of a pair its icon is pinned to the left
/// slot regardless of alphabetical order.
pub fn group_by_character_pair(
    videos: &[NormalizedVideo],
    selected: Option<&Selection>,
) -> Vec<CharacterGroup> {
    let mut groups: Vec<CharacterGroup> = Vec::new();

    for video in videos {
        let resolved = characters::resolve(&video.chara1).zip(characters::resolve(&video.chara2));
        let (key, icon1, icon2) = match resolved {
            Some((first, second)) => {
                let (left, right) = ordered_pair(first, second, selected);
                (
                    matchup_key(left.id, right.id),
                    Some(primary_icon(left)),
                    Some(primary_icon(right)),
                )
            }
            None => (UNRECOGNIZED_GROUP_KEY.to_string(), None, None),
        };

        match groups.iter_mut().find(|group| group.key == key) {
            Some(group) => group.videos.push(video.clone()),
            None => groups.push(CharacterGroup {
                key,
                icon1,
                icon2,
                videos: vec![video.clone()],
            }),
        }
    }

    groups
}

fn ordered_pair(
    first: &'static CharacterEntry,
    second: &'static CharacterEntry,
    selected: Option<&Selection>,
) -> (&'static CharacterEntry, &'static CharacterEntry) {
    if let Some(selection) = selected {
        if selection.id == second.id && selection.id != first.id {
            return (second, first);
        }
    }
    (first, second)
}

fn primary_icon(entry: &CharacterEntry) -> String {
    entry
        .icon_candidates()
        .into_iter()
        .next()
        .unwrap_or_default()
}

/// Stable descending sort by upload date; undated entries sort after all
/// dated ones and equal dates keep their relative input order.
pub fn sort_videos_by_upload_date(videos: &mut [NormalizedVideo]) {
    videos.sort_by(|a, b| {
        match (
            parse_upload_date(&a.upload_date),
            parse_upload_date(&b.upload_date),
        ) {
            (Some(left), Some(right)) => right.cmp(&left),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
}

fn parse_upload_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y/%m/%d"))
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y%m%d"))
        .ok()
}
