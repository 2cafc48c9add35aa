//! Client for the Lexin Bokmål–English dictionary service.

use serde::Deserialize;
use serde_json::Value;

use super::{Dictionary, Translation};
use crate::error::LookupError;
use crate::http_client;

pub const LEXIN_ENDPOINT: &str = "https://editorportal.oslomet.no/api/v1/findwords";
const LANGUAGE: &str = "bokmål-english";

const HEADERS: [(&str, &str); 4] = [
    ("Accept", "application/json"),
    ("User-Agent", "Mozilla/5.0"),
    ("Origin", "https://lexin.oslomet.no"),
    ("Referer", "https://lexin.oslomet.no/"),
];

#[derive(Debug, Deserialize)]
struct FindWordsResponse {
    #[serde(default)]
    result: Option<Vec<Vec<Entry>>>,
}

/// One typed fragment of a dictionary article; fragments sharing an `id`
/// belong to the same article.
#[derive(Debug, Deserialize)]
struct Entry {
    #[serde(default)]
    id: Value,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LexinClient {
    endpoint: String,
}

impl Default for LexinClient {
    fn default() -> Self {
        Self::new()
    }
}

impl LexinClient {
    pub fn new() -> Self {
        Self::with_endpoint(LEXIN_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    /// Fallible lookup; [`Dictionary::lookup`] turns errors into no results.
    pub fn try_lookup(&self, word: &str, max_results: usize) -> Result<Vec<Translation>, LookupError> {
        let query = [
            ("searchWord", word),
            ("lang", LANGUAGE),
            ("page", "1"),
            ("selectLang", LANGUAGE),
            ("includeEngLang", "0"),
        ];
        let response: FindWordsResponse =
            http_client::get_json(&self.endpoint, &query, &HEADERS)?;
        let mut translations = parse_response(response);
        translations.truncate(max_results);
        Ok(translations)
    }
}

impl Dictionary for LexinClient {
    fn lookup(&self, word: &str, max_results: usize) -> Vec<Translation> {
        match self.try_lookup(word, max_results) {
            Ok(translations) => translations,
            Err(err) => {
                tracing::warn!(word, "Dictionary lookup failed: {err}");
                Vec::new()
            }
        }
    }
}

/// Parse a raw response body. Exposed for tests and diagnostics.
pub fn parse_body(body: &str) -> Result<Vec<Translation>, LookupError> {
    let response: FindWordsResponse =
        serde_json::from_str(body).map_err(|err| LookupError::Shape(err.to_string()))?;
    Ok(parse_response(response))
}

fn parse_response(response: FindWordsResponse) -> Vec<Translation> {
    let Some(entries) = response.result.and_then(|lists| lists.into_iter().next()) else {
        return Vec::new();
    };

    // Articles in first-seen order.
    let mut articles: Vec<(Value, Translation)> = Vec::new();
    for entry in entries {
        let index = match articles.iter().position(|(id, _)| *id == entry.id) {
            Some(index) => index,
            None => {
                articles.push((entry.id.clone(), Translation::default()));
                articles.len() - 1
            }
        };
        let article = &mut articles[index].1;
        let text = entry.text.unwrap_or_default();
        match entry.kind.as_deref() {
            Some("E-lem") => article.source_text = text,
            Some("B-lem") => article.target_text = text,
            Some("B-kat") => article.part_of_speech = text,
            Some("B-def") => article.definition = text,
            _ => {}
        }
    }

    articles
        .into_iter()
        .map(|(_, translation)| translation)
        .filter(|t| !t.source_text.is_empty() && !t.target_text.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HttpError;
    use crate::http_client::test_server::serve_json_once;

    const SAMPLE: &str = r#"{
      "result": [[
        {"id": 7, "type": "E-lem", "text": "hus"},
        {"id": 7, "type": "B-lem", "text": "house"},
        {"id": 7, "type": "B-kat", "text": "noun"},
        {"id": 3, "type": "E-lem", "text": "huse"},
        {"id": 3, "type": "B-lem", "text": "accommodate"},
        {"id": 3, "type": "B-def", "text": "give room to"},
        {"id": 9, "type": "E-lem", "text": "husbåt"},
        {"id": 7, "type": "E-uttale", "text": "hu:s"}
      ]]
    }"#;

    #[test]
    fn groups_by_id_in_first_seen_order() {
        let translations = parse_body(SAMPLE).unwrap();
        assert_eq!(translations.len(), 2);
        assert_eq!(translations[0].format_short(), "hus (noun) → house");
        assert_eq!(translations[1].source_text, "huse");
        assert_eq!(translations[1].definition, "give room to");
    }

    #[test]
    fn entries_without_english_are_dropped() {
        let translations =
            parse_body(r#"{"result":[[{"id":"a","type":"E-lem","text":"husbåt"}]]}"#).unwrap();
        assert!(translations.is_empty());
    }

    #[test]
    fn empty_or_missing_result_is_empty() {
        assert!(parse_body(r#"{"result": []}"#).unwrap().is_empty());
        assert!(parse_body(r#"{"result": null}"#).unwrap().is_empty());
        assert!(parse_body("{}").unwrap().is_empty());
    }

    #[test]
    fn null_text_is_tolerated() {
        let body = r#"{"result":[[{"id":1,"type":"E-lem","text":"bil"},{"id":1,"type":"B-lem","text":"car"},{"id":1,"type":"B-kat","text":null}]]}"#;
        let translations = parse_body(body).unwrap();
        assert_eq!(translations[0].format_short(), "bil → car");
    }

    #[test]
    fn malformed_body_is_a_shape_error() {
        assert!(matches!(parse_body("not json"), Err(LookupError::Shape(_))));
    }

    #[test]
    fn lookup_caps_results() {
        let client = LexinClient::with_endpoint(serve_json_once(200, SAMPLE));
        let translations = client.lookup("hus", 1);
        assert_eq!(translations.len(), 1);
        assert_eq!(translations[0].target_text, "house");
    }

    #[test]
    fn server_error_yields_no_results() {
        let client = LexinClient::with_endpoint(serve_json_once(503, "{}"));
        assert!(client.lookup("hus", 3).is_empty());
    }

    #[test]
    fn undecodable_response_is_an_http_decode_error() {
        let client = LexinClient::with_endpoint(serve_json_once(200, "<html>busy</html>"));
        let err = client.try_lookup("hus", 3).unwrap_err();
        assert!(matches!(err, LookupError::Http(HttpError::Decode(_))));
    }
}
