use crate::characters::CharacterEntry;
use crate::matcher::is_character_matched;
use crate::normalize::NormalizedVideo;

/// A selected character carried as an explicit id plus alternate-name set,
/// passed by value to the filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub id: String,
    pub annotations: Vec<String>,
}

impl Selection {
    pub fn for_character(entry: &CharacterEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            annotations: entry.annotation_list(),
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        is_character_matched(name, &self.annotations)
    }
}

/// Scans the catalog and keeps videos whose two tagged characters satisfy
/// both the used-character and the opponent constraints. Both constraints
/// are mandatory; with either missing the result is empty rather than the
/// whole unfiltered catalog. Output keeps catalog scan order and is not
/// deduplicated.
pub fn search_matchup_videos(
    catalog: &[NormalizedVideo],
    user: Option<&Selection>,
    opponents: &[Selection],
) -> Vec<NormalizedVideo> {
    let Some(user) = user else {
        return Vec::new();
    };
    if opponents.is_empty() {
        return Vec::new();
    }

    catalog
        .iter()
        .filter(|video| {
            user_character_matched(user, video) && opponent_characters_matched(user, opponents, video)
        })
        .cloned()
        .collect()
}

fn user_character_matched(user: &Selection, video: &NormalizedVideo) -> bool {
    // For a mirror video both sides carry the same name, so this degenerates
    // to matching the shared name.
    user.matches(&video.chara1) || user.matches(&video.chara2)
}

fn opponent_characters_matched(
    user: &Selection,
    opponents: &[Selection],
    video: &NormalizedVideo,
) -> bool {
    let self_selected = opponents.iter().any(|opponent| opponent.id == user.id);

    if self_selected {
        if video.chara1 == video.chara2 {
            return true;
        }
        // Self among the opponents still surfaces non-mirror pairings: the
        // used character holds one side and any selected opponent the other,
        // so used=X, opponents={X, Y} also finds X-vs-Y.
        let paired = |own: &str, other: &str| {
            user.matches(own) && opponents.iter().any(|opponent| opponent.matches(other))
        };
        return paired(&video.chara1, &video.chara2) || paired(&video.chara2, &video.chara1);
    }

    opponents
        .iter()
        .any(|opponent| opponent.matches(&video.chara1) || opponent.matches(&video.chara2))
}
