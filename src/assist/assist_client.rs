use crate::utils::config::AssistConfig;
use crate::utils::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

const SYSTEM_PROMPT: &str = "You help a blogger fill in post metadata. \
Read the Markdown article and answer with a single JSON object of the form \
{\"title\": string, \"summary\": string (one or two sentences), \"tags\": array of 1-3 short uppercase words}. \
Answer with JSON only.";

/// Only the head of long articles is sent upstream
const MAX_PROMPT_CHARS: usize = 4000;
const FALLBACK_SUMMARY_CHARS: usize = 120;

/// Metadata proposed for an article; `tags` is already display-joined
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AssistSuggestion {
    pub title: String,
    pub summary: String,
    pub tags: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

/// Client for an OpenAI-compatible chat completion endpoint
pub struct AssistClient {
    config: AssistConfig,
    client: reqwest::Client,
}

impl AssistClient {
    pub fn new(config: AssistConfig) -> Self {
        let client = reqwest::Client::new();
        Self { config, client }
    }

    /// Ask upstream for a title, summary and tags.
    ///
    /// The flag is `true` when the reply was not usable JSON and the degraded
    /// fallback was returned instead.
    pub async fn suggest(&self, content: &str) -> Result<(AssistSuggestion, bool), AppError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::UpstreamError("AI_API_KEY is not configured".into()))?;

        let article: String = content.chars().take(MAX_PROMPT_CHARS).collect();
        let request = json!({
            "model": self.config.model,
            "temperature": 0.3,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": article },
            ],
        });

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::UpstreamError(format!("Failed to reach AI service: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::UpstreamError(format!(
                "AI service returned {}",
                response.status()
            )));
        }

        let chat = response
            .json::<ChatResponse>()
            .await
            .map_err(|e| AppError::UpstreamError(format!("Failed to parse AI response: {}", e)))?;

        let reply = chat
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| AppError::UpstreamError("AI response contained no choices".into()))?;

        Ok(match parse_suggestion(&reply) {
            Some(suggestion) => (suggestion, false),
            None => {
                log::warn!("AI reply was not valid JSON, using degraded suggestion");
                (degraded_suggestion(&reply), true)
            }
        })
    }
}

/// Parse the model's reply, tolerating code fences and text around the object
pub fn parse_suggestion(reply: &str) -> Option<AssistSuggestion> {
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    if end < start {
        return None;
    }

    let value: Value = serde_json::from_str(&reply[start..=end]).ok()?;
    let title = value.get("title")?.as_str()?.trim().to_string();
    let summary = value
        .get("summary")
        .and_then(Value::as_str)
        .unwrap_or("")
        .trim()
        .to_string();
    let tags = match value.get("tags") {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" / "),
        _ => String::new(),
    };

    Some(AssistSuggestion {
        title,
        summary,
        tags,
    })
}

/// Fallback when the reply is free text: keep its head as the summary
pub fn degraded_suggestion(reply: &str) -> AssistSuggestion {
    AssistSuggestion {
        title: String::new(),
        summary: reply.trim().chars().take(FALLBACK_SUMMARY_CHARS).collect(),
        tags: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_json() {
        let parsed = parse_suggestion(
            r#"{"title":"Borrowing","summary":"On lifetimes.","tags":["RUST","NOTES"]}"#,
        )
        .unwrap();
        assert_eq!(parsed.title, "Borrowing");
        assert_eq!(parsed.summary, "On lifetimes.");
        assert_eq!(parsed.tags, "RUST / NOTES");
    }

    #[test]
    fn parses_fenced_json_with_string_tags() {
        let reply = "Sure!\n```json\n{\"title\": \"Trip\", \"summary\": \"A hike.\", \"tags\": \"LIFE\"}\n```";
        let parsed = parse_suggestion(reply).unwrap();
        assert_eq!(parsed.title, "Trip");
        assert_eq!(parsed.tags, "LIFE");
    }

    #[test]
    fn rejects_unstructured_replies() {
        assert!(parse_suggestion("I think this is about Rust.").is_none());
        assert!(parse_suggestion("{broken").is_none());
        assert!(parse_suggestion(r#"{"summary":"no title"}"#).is_none());
    }

    #[test]
    fn degraded_keeps_reply_head() {
        let long = "x".repeat(500);
        let fallback = degraded_suggestion(&long);
        assert_eq!(fallback.title, "");
        assert_eq!(fallback.tags, "");
        assert_eq!(fallback.summary.len(), 120);
    }

    #[actix_web::test]
    async fn missing_key_is_upstream_error() {
        let client = AssistClient::new(AssistConfig {
            api_url: "http://127.0.0.1:9/v1/chat/completions".into(),
            api_key: None,
            model: "m".into(),
        });
        let err = client.suggest("some article text").await.unwrap_err();
        assert!(matches!(err, AppError::UpstreamError(_)));
    }
}
