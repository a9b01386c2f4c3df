//! Reference material retriever backed by the DuckDuckGo Instant Answer API.
//!
//! Uses the [DuckDuckGo Instant Answer API](https://api.duckduckgo.com/)
//! which requires no API key and returns abstracts, instant answers,
//! definitions, and related topics. The query combines the participant's
//! search keywords with the debate topic, so each panel member receives
//! material slanted toward their own angle on the subject.

use async_trait::async_trait;
use rostrum_application::ports::retrieval::{
    ContextRetriever, RetrievalError, RetrievedContext,
};
use rostrum_domain::{ParticipantProfile, Topic};
use std::time::Duration;
use tracing::debug;

/// DuckDuckGo Instant Answer API endpoint (no API key required).
const DDG_API_URL: &str = "https://api.duckduckgo.com/";

/// Retriever adapter over the DuckDuckGo Instant Answer API.
pub struct DuckDuckGoRetriever {
    client: reqwest::Client,
}

impl DuckDuckGoRetriever {
    /// Build the retriever with a 30 second request timeout.
    pub fn new() -> Result<Self, RetrievalError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| RetrievalError::ConnectionError(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ContextRetriever for DuckDuckGoRetriever {
    async fn retrieve(
        &self,
        profile: &ParticipantProfile,
        topic: &Topic,
        max_items: usize,
    ) -> Result<RetrievedContext, RetrievalError> {
        let query = format!("{} {}", profile.search_keywords, topic.content());
        debug!(participant = profile.display_name, %query, "retrieval request");

        let response = self
            .client
            .get(DDG_API_URL)
            .query(&[
                ("q", query.as_str()),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
            .header("User-Agent", "Rostrum/0.1 (Debate Context)")
            .send()
            .await
            .map_err(|e| RetrievalError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(RetrievalError::RequestFailed(format!(
                "search API returned {}",
                response.status()
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| RetrievalError::MalformedResponse(e.to_string()))?;

        Ok(match format_reference_material(&body, max_items) {
            Some(text) => RetrievedContext::Found(text),
            None => RetrievedContext::Nothing,
        })
    }
}

/// Format an Instant Answer response into reference material sections.
///
/// Extracts AbstractText, Answer, Definition, and up to `max_items` related
/// topics. Returns None when no section is populated.
fn format_reference_material(data: &serde_json::Value, max_items: usize) -> Option<String> {
    let mut sections: Vec<String> = Vec::new();

    if let Some(abstract_text) = data["AbstractText"].as_str()
        && !abstract_text.is_empty()
    {
        let source = data["AbstractSource"].as_str().unwrap_or("Unknown");
        sections.push(format!("Summary ({source}): {abstract_text}"));
    }

    if let Some(answer) = data["Answer"].as_str()
        && !answer.is_empty()
    {
        sections.push(format!("Instant answer: {answer}"));
    }

    if let Some(definition) = data["Definition"].as_str()
        && !definition.is_empty()
    {
        let source = data["DefinitionSource"].as_str().unwrap_or("Unknown");
        sections.push(format!("Definition ({source}): {definition}"));
    }

    if let Some(topics) = data["RelatedTopics"].as_array() {
        let topic_texts: Vec<String> = topics
            .iter()
            .filter_map(|t| {
                let text = t["Text"].as_str()?;
                if text.is_empty() {
                    // Nested topic group
                    None
                } else {
                    Some(format!("- {text}"))
                }
            })
            .take(max_items)
            .collect();

        if !topic_texts.is_empty() {
            sections.push(format!("Related:\n{}", topic_texts.join("\n")));
        }
    }

    if sections.is_empty() {
        None
    } else {
        Some(sections.join("\n\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_with_abstract() {
        let data = serde_json::json!({
            "AbstractText": "Carbon pricing puts a cost on emissions.",
            "AbstractSource": "Wikipedia",
            "Answer": "",
            "Definition": "",
            "RelatedTopics": [],
        });

        let output = format_reference_material(&data, 3).unwrap();
        assert!(output.contains("Carbon pricing puts a cost on emissions."));
        assert!(output.contains("Wikipedia"));
    }

    #[test]
    fn test_format_empty_is_none() {
        let data = serde_json::json!({
            "AbstractText": "",
            "Answer": "",
            "Definition": "",
            "RelatedTopics": [],
        });
        assert!(format_reference_material(&data, 3).is_none());
    }

    #[test]
    fn test_related_topics_bounded_by_max_items() {
        let topics: Vec<_> = (0..8)
            .map(|i| {
                serde_json::json!({
                    "Text": format!("Topic {i}"),
                    "FirstURL": format!("https://example.com/{i}"),
                })
            })
            .collect();
        let data = serde_json::json!({
            "AbstractText": "",
            "Answer": "",
            "Definition": "",
            "RelatedTopics": topics,
        });

        let output = format_reference_material(&data, 2).unwrap();
        assert!(output.contains("Topic 0"));
        assert!(output.contains("Topic 1"));
        assert!(!output.contains("Topic 2"));
    }

    #[test]
    fn test_nested_topic_groups_are_skipped() {
        let data = serde_json::json!({
            "AbstractText": "",
            "Answer": "",
            "Definition": "",
            "RelatedTopics": [
                { "Topics": [{ "Text": "inner" }] },
                { "Text": "Flat topic", "FirstURL": "https://example.com" },
            ],
        });

        let output = format_reference_material(&data, 5).unwrap();
        assert!(output.contains("Flat topic"));
        assert!(!output.contains("inner"));
    }
}
