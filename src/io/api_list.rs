//! Reading the list of APIs produced by the export-extraction stage.

use crate::errors::{Error, IoResultExt, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

#[derive(Deserialize)]
struct ApiListFile {
    apis: Vec<String>,
}

/// Parse an API list.
///
/// Accepts the `{"apis": [...]}` document the export stage writes, a bare
/// JSON array, or one name per line (`#` starts a comment). Duplicates are
/// dropped, keeping the first occurrence.
pub fn parse_api_list(contents: &str) -> Result<Vec<String>> {
    let trimmed = contents.trim_start();
    let names: Vec<String> = if trimmed.starts_with('{') {
        serde_json::from_str::<ApiListFile>(trimmed)
            .map_err(|e| Error::ApiList(format!("expected {{\"apis\": [...]}}: {}", e)))?
            .apis
    } else if trimmed.starts_with('[') {
        serde_json::from_str::<Vec<String>>(trimmed)
            .map_err(|e| Error::ApiList(format!("expected an array of names: {}", e)))?
    } else {
        contents
            .lines()
            .map(|line| line.split('#').next().unwrap_or("").trim())
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    };

    let mut seen = HashSet::new();
    Ok(names
        .into_iter()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty() && seen.insert(name.clone()))
        .collect())
}

pub fn load_api_list(path: &Path) -> Result<Vec<String>> {
    let contents = std::fs::read_to_string(path).with_path(path)?;
    let apis = parse_api_list(&contents)?;
    if apis.is_empty() {
        return Err(Error::ApiList(format!(
            "{} does not name any API",
            path.display()
        )));
    }
    Ok(apis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_parse_export_document() {
        let apis =
            parse_api_list(r#"{"apis": ["vorbis_encode_init", "vorbis_encode_ctl"]}"#).unwrap();
        assert_eq!(apis, vec!["vorbis_encode_init", "vorbis_encode_ctl"]);
    }

    #[test]
    fn test_parse_plain_list_with_comments_and_duplicates() {
        let apis = parse_api_list(indoc! {"
            # exported from libvorbisenc
            vorbis_encode_init
            vorbis_encode_ctl   # wrapper

            vorbis_encode_init
        "})
        .unwrap();
        assert_eq!(apis, vec!["vorbis_encode_init", "vorbis_encode_ctl"]);
    }

    #[test]
    fn test_parse_bare_array() {
        assert_eq!(parse_api_list(r#"["a", "b", "a"]"#).unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        assert!(matches!(
            parse_api_list(r#"{"symbols": []}"#),
            Err(Error::ApiList(_))
        ));
    }
}
