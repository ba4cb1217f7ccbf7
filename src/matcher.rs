use log::warn;
use regex::Regex;

/// Decides whether a free-form character name from video metadata refers to
/// the catalog character described by `annotations`.
///
/// An exact case-insensitive hit on any annotation wins immediately; otherwise
/// each annotation is tried as a word-boundary pattern so that short aliases
/// do not collide with longer names ("link" must not hit "younglink").
pub fn is_character_matched<S: AsRef<str>>(candidate_name: &str, annotations: &[S]) -> bool {
    let candidate = candidate_name.trim();
    if candidate.is_empty() {
        return false;
    }

    let candidate_lower = candidate.to_lowercase();
    for annotation in annotations {
        let annotation = annotation.as_ref().trim();
        if annotation.is_empty() {
            continue;
        }
        if annotation.to_lowercase() == candidate_lower {
            return true;
        }
    }

    annotations.iter().any(|annotation| {
        let annotation = annotation.as_ref().trim();
        !annotation.is_empty() && boundary_matches(annotation, candidate)
    })
}

fn boundary_matches(annotation: &str, candidate: &str) -> bool {
    let pattern = format!(r"(?i)\b{}\b", regex::escape(annotation));
    match Regex::new(&pattern) {
        Ok(re) => re.is_match(candidate),
        Err(err) => {
            warn!("Ignoring unusable annotation '{}': {}", annotation, err);
            false
        }
    }
}
