use crate::matcher::is_character_matched;

/// One fighter in the static catalog. `id` is the canonical English name and
/// unique; `display_name` is the localized label shown in the picker;
/// `annotations` lists every alternate spelling seen in video metadata and
/// may include the id itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterEntry {
    pub id: &'static str,
    pub display_name: &'static str,
    pub icon: &'static str,
    pub annotations: &'static [&'static str],
}

impl CharacterEntry {
    /// Ordered icon locators the UI tries in sequence when an image fails to
    /// load. The last entry is a shared placeholder that always exists.
    pub fn icon_candidates(&self) -> Vec<String> {
        vec![
            format!("images/chara_icon/{}_0.png", self.icon),
            format!("images/chara_icon/{}.png", self.icon),
            "images/chara_icon/unknown.png".to_string(),
        ]
    }

    pub fn annotation_list(&self) -> Vec<String> {
        self.annotations.iter().map(|a| a.to_string()).collect()
    }
}

pub const CHARACTERS: &[CharacterEntry] = &[
    entry("Mario", "マリオ", "mario", &["mario", "マリオ"]),
    entry("Luigi", "ルイージ", "luigi", &["luigi", "ルイージ"]),
    entry("Peach", "ピーチ", "peach", &["peach", "ピーチ"]),
    entry("Bowser", "クッパ", "bowser", &["bowser", "koopa", "クッパ"]),
    entry(
        "Donkey Kong",
        "ドンキーコング",
        "donkey-kong",
        &["donkey kong", "donkeykong", "dk", "ドンキーコング", "ドンキー"],
    ),
    entry("Link", "リンク", "link", &["link", "リンク"]),
    entry("Zelda", "ゼルダ", "zelda", &["zelda", "ゼルダ"]),
    entry("Sheik", "シーク", "sheik", &["sheik", "シーク"]),
    entry(
        "Young Link",
        "こどもリンク",
        "young-link",
        &["young link", "younglink", "yink", "こどもリンク", "こどリン"],
    ),
    entry(
        "Toon Link",
        "トゥーンリンク",
        "toon-link",
        &["toon link", "toonlink", "tink", "トゥーンリンク", "トリン"],
    ),
    entry(
        "Ganondorf",
        "ガノンドロフ",
        "ganondorf",
        &["ganondorf", "ganon", "ガノンドロフ", "ガノン"],
    ),
    entry("Samus", "サムス", "samus", &["samus", "サムス"]),
    entry(
        "Zero Suit Samus",
        "ゼロスーツサムス",
        "zero-suit-samus",
        &["zero suit samus", "zss", "ゼロスーツサムス", "ゼロサム"],
    ),
    entry("Kirby", "カービィ", "kirby", &["kirby", "カービィ"]),
    entry(
        "Meta Knight",
        "メタナイト",
        "meta-knight",
        &["meta knight", "metaknight", "メタナイト"],
    ),
    entry(
        "King Dedede",
        "デデデ",
        "king-dedede",
        &["king dedede", "dedede", "デデデ"],
    ),
    entry("Fox", "フォックス", "fox", &["fox", "フォックス"]),
    entry("Falco", "ファルコ", "falco", &["falco", "ファルコ"]),
    entry("Pikachu", "ピカチュウ", "pikachu", &["pikachu", "ピカチュウ"]),
    entry("Pichu", "ピチュー", "pichu", &["pichu", "ピチュー"]),
    entry(
        "Jigglypuff",
        "プリン",
        "jigglypuff",
        &["jigglypuff", "puff", "プリン"],
    ),
    entry("Mewtwo", "ミュウツー", "mewtwo", &["mewtwo", "ミュウツー"]),
    entry("Ness", "ネス", "ness", &["ness", "ネス"]),
    entry("Lucas", "リュカ", "lucas", &["lucas", "リュカ"]),
    entry(
        "Captain Falcon",
        "キャプテン・ファルコン",
        "captain-falcon",
        &["captain falcon", "falcon", "キャプテンファルコン", "ファルコン"],
    ),
    entry("Marth", "マルス", "marth", &["marth", "マルス"]),
    entry("Lucina", "ルキナ", "lucina", &["lucina", "ルキナ"]),
    entry("Roy", "ロイ", "roy", &["roy", "ロイ"]),
    entry("Ike", "アイク", "ike", &["ike", "アイク"]),
    entry(
        "Mr. Game & Watch",
        "Mr.ゲーム&ウォッチ",
        "game-and-watch",
        &[
            "mr. game & watch",
            "game and watch",
            "game & watch",
            "gnw",
            "ゲーム&ウォッチ",
            "ゲッチ",
        ],
    ),
    entry(
        "R.O.B.",
        "ロボット",
        "rob",
        &["r.o.b.", "rob", "robot", "ロボット"],
    ),
    entry("Ryu", "リュウ", "ryu", &["ryu", "リュウ"]),
    entry("Ken", "ケン", "ken", &["ken", "ケン"]),
    entry("Cloud", "クラウド", "cloud", &["cloud", "クラウド"]),
    entry("Sonic", "ソニック", "sonic", &["sonic", "ソニック"]),
    entry("Terry", "テリー", "terry", &["terry", "テリー"]),
    entry("Joker", "ジョーカー", "joker", &["joker", "ジョーカー"]),
];

const fn entry(
    id: &'static str,
    display_name: &'static str,
    icon: &'static str,
    annotations: &'static [&'static str],
) -> CharacterEntry {
    CharacterEntry {
        id,
        display_name,
        icon,
        annotations,
    }
}

/// Exact lookup by canonical id.
pub fn find(id: &str) -> Option<&'static CharacterEntry> {
    CHARACTERS
        .iter()
        .find(|character| character.id.eq_ignore_ascii_case(id))
}

/// Resolves a free-form name from video metadata to a catalog entry.
///
/// An exact pass over every entry runs before the word-boundary pass so that
/// "Young Link" resolves to Young Link rather than boundary-matching Link's
/// short alias first.
pub fn resolve(name: &str) -> Option<&'static CharacterEntry> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return None;
    }

    let lowered = trimmed.to_lowercase();
    let exact = CHARACTERS.iter().find(|character| {
        character.id.to_lowercase() == lowered
            || character.display_name.to_lowercase() == lowered
            || character
                .annotations
                .iter()
                .any(|annotation| annotation.to_lowercase() == lowered)
    });
    if exact.is_some() {
        return exact;
    }

    CHARACTERS
        .iter()
        .find(|character| is_character_matched(trimmed, character.annotations))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        for (index, character) in CHARACTERS.iter().enumerate() {
            assert!(
                !CHARACTERS[index + 1..]
                    .iter()
                    .any(|other| other.id == character.id),
                "duplicate id {}",
                character.id
            );
        }
    }

    #[test]
    fn every_entry_has_annotations() {
        for character in CHARACTERS {
            assert!(
                !character.annotations.is_empty(),
                "{} has no annotations",
                character.id
            );
        }
    }

    #[test]
    fn resolve_prefers_exact_over_boundary() {
        assert_eq!(resolve("Young Link").map(|c| c.id), Some("Young Link"));
        assert_eq!(resolve("younglink").map(|c| c.id), Some("Young Link"));
        assert_eq!(resolve("link").map(|c| c.id), Some("Link"));
        assert_eq!(resolve("こどもリンク").map(|c| c.id), Some("Young Link"));
    }

    #[test]
    fn resolve_handles_unknown_names() {
        assert_eq!(resolve("Totally Unknown Fighter"), None);
        assert_eq!(resolve(""), None);
    }

    #[test]
    fn icon_candidates_end_with_placeholder() {
        let mario = find("Mario").unwrap();
        let candidates = mario.icon_candidates();
        assert!(candidates.len() >= 2);
        assert_eq!(candidates.last().unwrap(), "images/chara_icon/unknown.png");
    }
}
