use crate::normalize::{extract_entries, NormalizedVideo};
use gloo_net::http::Request;
use log::warn;
use serde::Deserialize;
use std::fmt;

const CATALOG_ENDPOINT: &str = "api/matchup-catalog";

#[derive(Debug)]
pub enum CatalogError {
    Unavailable(String),
    Network(String),
    Parse(String),
}

impl CatalogError {
    fn network<E: fmt::Display>(err: E) -> Self {
        Self::Network(err.to_string())
    }

    fn parse<E: fmt::Display>(err: E) -> Self {
        Self::Parse(err.to_string())
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Unavailable(message) => {
                write!(f, "Catalog unavailable: {}", message)
            }
            CatalogError::Network(message) => write!(f, "Network error: {}", message),
            CatalogError::Parse(message) => write!(f, "Invalid catalog data: {}", message),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CatalogResponse {
    success: bool,
    #[serde(default)]
    data: Vec<serde_json::Value>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    directory: String,
    content: serde_json::Value,
}

/// Loads the whole video catalog from the listing endpoint. Runs once per
/// page load; malformed files or entries inside an otherwise valid response
/// are skipped, so a partial catalog still loads successfully.
pub async fn fetch_catalog() -> Result<Vec<NormalizedVideo>, CatalogError> {
    let response = Request::get(CATALOG_ENDPOINT)
        .send()
        .await
        .map_err(CatalogError::network)?;

    if !response.ok() {
        return Err(CatalogError::Network(format!(
            "HTTP {} while fetching the matchup catalog",
            response.status()
        )));
    }

    let text = response.text().await.map_err(CatalogError::network)?;
    parse_catalog_response(&text)
}

fn parse_catalog_response(text: &str) -> Result<Vec<NormalizedVideo>, CatalogError> {
    let response: CatalogResponse = serde_json::from_str(text).map_err(CatalogError::parse)?;

    if !response.success {
        return Err(CatalogError::Unavailable(
            response
                .error
                .unwrap_or_else(|| "no error detail provided".to_string()),
        ));
    }

    let mut videos = Vec::new();
    for (index, raw_file) in response.data.into_iter().enumerate() {
        match serde_json::from_value::<CatalogFile>(raw_file) {
            Ok(file) => videos.extend(extract_entries(&file.content, &file.directory)),
            Err(err) => {
                warn!("Skipping malformed catalog file at index {}: {}", index, err);
            }
        }
    }
    Ok(videos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successful_response_flattens_all_directories() {
        let body = r#"{
            "success": true,
            "data": [
                {
                    "directory": "2024-01",
                    "content": {
                        "matchups": {
                            "a": { "url": "https://youtu.be/dQw4w9WgXcQ", "chara1": "Ryu", "chara2": "Ken" }
                        }
                    }
                },
                {
                    "directory": "2023-12",
                    "content": {
                        "b": { "url": "https://youtu.be/dQw4w9WgXcQ", "chara1": "Fox", "chara2": "Falco" }
                    }
                }
            ]
        }"#;
        let videos = parse_catalog_response(body).unwrap();
        assert_eq!(videos.len(), 2);
        assert_eq!(videos[0].directory, "2024-01");
        assert_eq!(videos[1].directory, "2023-12");
    }

    #[test]
    fn failed_response_surfaces_the_error() {
        let body = r#"{ "success": false, "error": "scan failed" }"#;
        let err = parse_catalog_response(body).unwrap_err();
        assert!(matches!(err, CatalogError::Unavailable(message) if message == "scan failed"));
    }

    #[test]
    fn invalid_envelope_is_a_parse_error() {
        let err = parse_catalog_response("not json").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn malformed_data_elements_do_not_abort_the_load() {
        let body = r#"{
            "success": true,
            "data": [
                { "bogus": true },
                "not even an object",
                {
                    "directory": "ok",
                    "content": {
                        "a": { "url": "https://youtu.be/dQw4w9WgXcQ", "chara1": "Ryu", "chara2": "Ken" }
                    }
                }
            ]
        }"#;
        let videos = parse_catalog_response(body).unwrap();
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].directory, "ok");
    }

    #[test]
    fn bad_files_do_not_abort_the_load() {
        let body = r#"{
            "success": true,
            "data": [
                { "directory": "broken", "content": 42 },
                {
                    "directory": "ok",
                    "content": {
                        "a": { "url": "https://youtu.be/dQw4w9WgXcQ", "chara1": "Ness", "chara2": "Lucas" }
                    }
                }
            ]
        }"#;
        let videos = parse_catalog_response(body).unwrap();
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].directory, "ok");
    }
}
