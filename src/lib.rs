pub mod catalog;
pub mod characters;
pub mod filter;
pub mod grouping;
pub mod matcher;
pub mod normalize;
pub mod storage;
pub mod youtube;

use catalog::fetch_catalog;
use characters::{CharacterEntry, CHARACTERS};
use filter::{search_matchup_videos, Selection};
use grouping::{
    group_by_character_pair, group_by_directory, sort_videos_by_upload_date, CharacterGroup,
    DirectoryGroup, UNRECOGNIZED_GROUP_KEY,
};
use normalize::{NormalizedVideo, TimestampRecord};
use std::collections::HashMap;
use storage::{load_state, save_state, StoredAppState, Theme};
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen_futures::spawn_local;
use web_sys::window;
use yew::prelude::*;

#[derive(PartialEq, Clone)]
enum FetchStatus {
    Idle,
    Loading,
    Error(String),
}

/// Composite accordion key; a section is open unless the map says otherwise.
#[derive(Clone, PartialEq, Eq, Hash)]
struct SectionKey {
    directory: String,
    pair_key: String,
}

#[derive(Clone, PartialEq)]
struct ActiveClip {
    video: NormalizedVideo,
    start: u32,
}

#[function_component(App)]
fn app() -> Html {
    let catalog_status = use_state(|| FetchStatus::Loading);
    let catalog = use_state(Vec::<NormalizedVideo>::new);

    let selected_character = use_state(|| None::<String>);
    let selected_opponents = use_state(Vec::<String>::new);
    let open_sections = use_state(HashMap::<SectionKey, bool>::new);
    let active_clip = use_state(|| None::<ActiveClip>);
    let theme = use_state(|| load_state().theme);

    {
        let catalog_status = catalog_status.clone();
        let catalog = catalog.clone();

        use_effect_with_deps(
            move |_| {
                catalog_status.set(FetchStatus::Loading);

                let catalog_status = catalog_status.clone();
                let catalog = catalog.clone();

                spawn_local(async move {
                    match fetch_catalog().await {
                        Ok(videos) => {
                            catalog.set(videos);
                            catalog_status.set(FetchStatus::Idle);
                        }
                        Err(err) => {
                            catalog.set(Vec::new());
                            catalog_status.set(FetchStatus::Error(err.to_string()));
                        }
                    }
                });

                || ()
            },
            (),
        );
    }

    {
        use_effect_with_deps(
            move |current: &Theme| {
                if let Some(window) = window() {
                    if let Some(document) = window.document() {
                        if let Some(body) = document.body() {
                            body.set_class_name(current.body_class());
                        }
                    }
                }
                save_state(&StoredAppState { theme: *current });
                || ()
            },
            *theme,
        );
    }

    let on_toggle_theme = {
        let theme = theme.clone();
        Callback::from(move |_: MouseEvent| {
            theme.set((*theme).toggled());
        })
    };

    let on_select_character = {
        let selected_character = selected_character.clone();
        let active_clip = active_clip.clone();
        Callback::from(move |id: String| {
            let next = if selected_character.as_deref() == Some(id.as_str()) {
                None
            } else {
                Some(id)
            };
            selected_character.set(next);
            active_clip.set(None);
        })
    };

    let on_toggle_opponent = {
        let selected_opponents = selected_opponents.clone();
        let active_clip = active_clip.clone();
        Callback::from(move |id: String| {
            let mut next = (*selected_opponents).clone();
            match next.iter().position(|existing| existing == &id) {
                Some(index) => {
                    next.remove(index);
                }
                None => next.push(id),
            }
            selected_opponents.set(next);
            active_clip.set(None);
        })
    };

    let on_toggle_section = {
        let open_sections = open_sections.clone();
        Callback::from(move |key: SectionKey| {
            let mut next = (*open_sections).clone();
            let open = next.get(&key).copied().unwrap_or(true);
            next.insert(key, !open);
            open_sections.set(next);
        })
    };

    let on_play = {
        let active_clip = active_clip.clone();
        Callback::from(move |clip: ActiveClip| {
            active_clip.set(Some(clip));
        })
    };

    // Derived from scratch on every selection change; the catalog is small
    // enough that a full re-scan beats any caching scheme.
    let user_selection = selected_character
        .as_ref()
        .and_then(|id| characters::find(id))
        .map(Selection::for_character);
    let opponent_selections: Vec<Selection> = selected_opponents
        .iter()
        .filter_map(|id| characters::find(id))
        .map(Selection::for_character)
        .collect();

    let results = search_matchup_videos(&catalog, user_selection.as_ref(), &opponent_selections);
    let mut directory_groups = group_by_directory(&results);
    for group in &mut directory_groups {
        sort_videos_by_upload_date(&mut group.videos);
    }

    let results_markup = match &*catalog_status {
        FetchStatus::Loading => html! { <p class="status">{ "Loading catalog…" }</p> },
        FetchStatus::Error(message) => html! {
            <div class="status error">
                <p>{ "The video catalog failed to load." }</p>
                <p class="error-detail">{ message }</p>
            </div>
        },
        FetchStatus::Idle => {
            if user_selection.is_none() || opponent_selections.is_empty() {
                html! {
                    <p class="status hint">
                        { "Pick your character and at least one opponent to see videos." }
                    </p>
                }
            } else if results.is_empty() {
                html! { <p class="status">{ "No videos found for this matchup." }</p> }
            } else {
                render_results(
                    &directory_groups,
                    user_selection.as_ref(),
                    &open_sections,
                    &on_toggle_section,
                    &on_play,
                )
            }
        }
    };

    html! {
        <div class="app-container">
            <header class="app-header">
                <h1>{ "Matchup Finder" }</h1>
                <button class="theme-toggle" onclick={on_toggle_theme}>
                    { format!("Theme: {}", theme.label()) }
                </button>
            </header>

            <section class="pickers">
                { render_character_picker(
                    "Your character",
                    &selected_character.as_deref().map(|id| vec![id.to_string()]).unwrap_or_default(),
                    &on_select_character,
                ) }
                { render_character_picker(
                    "Opponents",
                    &selected_opponents,
                    &on_toggle_opponent,
                ) }
            </section>

            <main class="content">
                { render_player(active_clip.as_ref(), &results, &on_play) }
                { results_markup }
            </main>
        </div>
    }
}

fn render_character_picker(
    title: &str,
    selected_ids: &[String],
    on_pick: &Callback<String>,
) -> Html {
    html! {
        <div class="picker">
            <h2>{ title }</h2>
            <div class="character-grid">
                { for CHARACTERS.iter().map(|character| {
                    let active = selected_ids.iter().any(|id| id == character.id);
                    render_character_button(character, active, on_pick)
                }) }
            </div>
        </div>
    }
}

fn render_character_button(
    character: &'static CharacterEntry,
    active: bool,
    on_pick: &Callback<String>,
) -> Html {
    let id = character.id.to_string();
    let on_click = {
        let on_pick = on_pick.clone();
        let id = id.clone();
        Callback::from(move |_: MouseEvent| on_pick.emit(id.clone()))
    };
    let class = classes!("character-button", active.then_some("active"));

    html! {
        <button key={id} class={class} onclick={on_click} title={character.id}>
            <CharacterIcon
                candidates={character.icon_candidates()}
                alt={character.id.to_string()}
            />
            <span class="character-name">{ character.display_name }</span>
        </button>
    }
}

fn render_results(
    directory_groups: &[DirectoryGroup],
    selected: Option<&Selection>,
    open_sections: &HashMap<SectionKey, bool>,
    on_toggle_section: &Callback<SectionKey>,
    on_play: &Callback<ActiveClip>,
) -> Html {
    html! {
        <div class="results">
            { for directory_groups.iter().map(|group| {
                let pair_groups = group_by_character_pair(&group.videos, selected);
                html! {
                    <section class="directory-group" key={group.directory.clone()}>
                        <h2 class="directory-title">{ &group.directory }</h2>
                        { for pair_groups.iter().map(|pair_group| {
                            let key = SectionKey {
                                directory: group.directory.clone(),
                                pair_key: pair_group.key.clone(),
                            };
                            let open = open_sections.get(&key).copied().unwrap_or(true);
                            render_pair_group(pair_group, key, open, on_toggle_section, on_play)
                        }) }
                    </section>
                }
            }) }
        </div>
    }
}

fn render_pair_group(
    group: &CharacterGroup,
    key: SectionKey,
    open: bool,
    on_toggle_section: &Callback<SectionKey>,
    on_play: &Callback<ActiveClip>,
) -> Html {
    let header_label = if group.key == UNRECOGNIZED_GROUP_KEY {
        "Other videos".to_string()
    } else {
        group.key.clone()
    };

    let on_toggle = {
        let on_toggle_section = on_toggle_section.clone();
        let key = key.clone();
        Callback::from(move |_: MouseEvent| on_toggle_section.emit(key.clone()))
    };

    let icons = html! {
        <>
            { for group.icon1.iter().map(|icon| html! {
                <img class="pair-icon" src={icon.clone()} alt="" />
            }) }
            { for group.icon2.iter().map(|icon| html! {
                <img class="pair-icon" src={icon.clone()} alt="" />
            }) }
        </>
    };

    html! {
        <div class="pair-group" key={format!("{}|{}", key.directory, key.pair_key)}>
            <button class={classes!("pair-header", open.then_some("open"))} onclick={on_toggle}>
                { icons }
                <span class="pair-label">{ header_label }</span>
                <span class="pair-count">{ format!("{} videos", group.videos.len()) }</span>
                <span class="chevron">{ if open { "▾" } else { "▸" } }</span>
            </button>
            {
                if open {
                    html! {
                        <ul class="video-list">
                            { for group.videos.iter().enumerate().map(|(index, video)| {
                                render_video_row(index, video, on_play)
                            }) }
                        </ul>
                    }
                } else {
                    html! {}
                }
            }
        </div>
    }
}

fn render_video_row(index: usize, video: &NormalizedVideo, on_play: &Callback<ActiveClip>) -> Html {
    let title = if video.title.is_empty() {
        video.matchup_key.clone()
    } else {
        video.title.clone()
    };

    // The catalog is not deduplicated, so the same URL can appear twice in
    // one list; the index keeps keys unique.
    html! {
        <li class="video-row" key={format!("{}#{}", index, video.url)}>
            <div class="video-heading">
                <span class="video-title">{ title }</span>
                {
                    if video.upload_date.is_empty() {
                        html! {}
                    } else {
                        html! { <span class="video-date">{ &video.upload_date }</span> }
                    }
                }
            </div>
            <div class="timestamp-buttons">
                { for video.timestamps.iter().map(|timestamp| {
                    render_timestamp_button(video, timestamp, false, on_play)
                }) }
            </div>
        </li>
    }
}

fn render_timestamp_button(
    video: &NormalizedVideo,
    timestamp: &TimestampRecord,
    active: bool,
    on_play: &Callback<ActiveClip>,
) -> Html {
    let on_click = {
        let on_play = on_play.clone();
        let clip = ActiveClip {
            video: video.clone(),
            start: timestamp.time,
        };
        Callback::from(move |_: MouseEvent| on_play.emit(clip.clone()))
    };

    html! {
        <button
            class={classes!("timestamp-button", active.then_some("active"))}
            onclick={on_click}
            key={timestamp.time.to_string()}
        >
            <span class="timestamp-time">{ format_seconds(timestamp.time) }</span>
            <span class="timestamp-label">{ &timestamp.label }</span>
        </button>
    }
}

fn render_player(
    active: Option<&ActiveClip>,
    results: &[NormalizedVideo],
    on_play: &Callback<ActiveClip>,
) -> Html {
    let Some(clip) = active else {
        return html! {};
    };

    // A clip played from its start still honors an offset encoded in the
    // catalog URL itself.
    let start = if clip.start > 0 {
        clip.start
    } else {
        youtube::start_seconds(&clip.video.url)
    };

    let player_frame = match youtube::extract_video_id(&clip.video.url) {
        Some(id) => {
            let src = youtube::embed_url(&id, start);
            html! {
                <iframe
                    class="player-frame"
                    src={src}
                    allow="autoplay; encrypted-media; picture-in-picture"
                    allowfullscreen=true
                />
            }
        }
        None => html! {
            <p class="status error">{ "This video URL is not a recognizable YouTube link." }</p>
        },
    };

    let external_link = youtube::timestamp_url(&clip.video.url, start).map(|url| {
        html! {
            <a class="external-link" href={url} target="_blank" rel="noopener">
                { "Open on YouTube" }
            </a>
        }
    });

    let playlist = results.iter().enumerate().map(|(index, video)| {
        let is_current = video.url == clip.video.url && video.directory == clip.video.directory;
        let first_time = video.timestamps.first().map(|t| t.time).unwrap_or(0);
        let on_click = {
            let on_play = on_play.clone();
            let entry = ActiveClip {
                video: video.clone(),
                start: first_time,
            };
            Callback::from(move |_: MouseEvent| on_play.emit(entry.clone()))
        };
        let label = if video.title.is_empty() {
            video.matchup_key.clone()
        } else {
            video.title.clone()
        };
        html! {
            <li key={format!("{}#{}", index, video.url)}>
                <button
                    class={classes!("playlist-entry", is_current.then_some("current"))}
                    onclick={on_click}
                >
                    { label }
                </button>
            </li>
        }
    });

    html! {
        <div class="player">
            <div class="player-main">
                { player_frame }
                { for external_link }
            </div>
            <aside class="player-sidebar">
                <h3>{ "Timestamps" }</h3>
                <div class="timestamp-buttons vertical">
                    { for clip.video.timestamps.iter().map(|timestamp| {
                        render_timestamp_button(
                            &clip.video,
                            timestamp,
                            timestamp.time == clip.start,
                            on_play,
                        )
                    }) }
                </div>
                <h3>{ "Playlist" }</h3>
                <ul class="playlist">
                    { for playlist }
                </ul>
            </aside>
        </div>
    }
}

fn format_seconds(total: u32) -> String {
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

#[derive(Properties, PartialEq)]
struct CharacterIconProps {
    candidates: Vec<String>,
    alt: String,
}

/// Character icon with ordered fallbacks: when a candidate image fails to
/// load the next locator in the list is tried.
#[function_component(CharacterIcon)]
fn character_icon(props: &CharacterIconProps) -> Html {
    let attempt = use_state(|| 0usize);

    if props.candidates.is_empty() {
        return html! { <span class="chara-icon missing" /> };
    }

    let index = (*attempt).min(props.candidates.len() - 1);
    let on_error = {
        let attempt = attempt.clone();
        let last = props.candidates.len() - 1;
        Callback::from(move |_: Event| {
            if *attempt < last {
                attempt.set(*attempt + 1);
            }
        })
    };

    html! {
        <img
            class="chara-icon"
            src={props.candidates[index].clone()}
            alt={props.alt.clone()}
            onerror={on_error}
        />
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seconds_format_matches_clock_style() {
        assert_eq!(format_seconds(0), "0:00");
        assert_eq!(format_seconds(90), "1:30");
        assert_eq!(format_seconds(3723), "1:02:03");
    }
}
