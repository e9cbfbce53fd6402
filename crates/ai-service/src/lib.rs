use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::config::DeepSeekConfig;
use shared::models::TokenData;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::{error, info};

pub mod error;

pub use error::{AIServiceError, Result};

/// Score used when the model forgets the `<SCORE>` marker
pub const DEFAULT_NARRATIVE_SCORE: u8 = 50;

const REQUEST_TIMEOUT_SECS: u64 = 60;

pub const SYSTEM_PROMPT: &str = r#"You are a smart-contract security analyst for the NEAR blockchain. You receive token metadata, the largest holders and recent transactions of a fungible token as JSON.

Write a concise markdown report with these sections:
1. Token overview
2. Holder distribution and concentration risk
3. Transaction activity and failure patterns
4. Red flags and positive signals
5. Verdict

Finish with a legitimacy score between 0 (certain scam) and 100 (clearly legitimate) on its own line in exactly this form: <SCORE>NN</SCORE>"#;

/// Markdown report plus the score extracted from it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NarrativeReport {
    pub report: String,
    /// 0..=100, higher is safer
    pub score: u8,
}

/// Produces a human-readable risk report for a token snapshot.
///
/// Failures surface as [`shared::Error::AnalysisService`] unless the
/// implementation has a more specific classification.
#[async_trait]
pub trait NarrativeAnalyzer: Send + Sync {
    async fn analyze(&self, data: &TokenData) -> shared::Result<NarrativeReport>;
}

/// OpenAI-compatible chat completion request
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// DeepSeek chat completion client
pub struct DeepSeekClient {
    client: Client,
    api_key: String,
    api_url: String,
    model: String,
    max_tokens: u32,
}

impl DeepSeekClient {
    pub fn new(config: &DeepSeekConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AIServiceError::ApiError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            api_url: format!("{}/chat/completions", config.api_url.trim_end_matches('/')),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        })
    }

    async fn call_chat_api(&self, user_prompt: String) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user_prompt,
                },
            ],
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AIServiceError::ApiError(format!("Failed to call DeepSeek API: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("DeepSeek API error: {} - {}", status, error_text);
            return Err(AIServiceError::ApiError(format!(
                "DeepSeek API returned error: {} - {}",
                status, error_text
            )));
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            AIServiceError::ParseError(format!("Failed to parse DeepSeek response: {}", e))
        })?;

        chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| AIServiceError::ParseError("Empty response from DeepSeek".to_string()))
    }
}

#[async_trait]
impl NarrativeAnalyzer for DeepSeekClient {
    async fn analyze(&self, data: &TokenData) -> shared::Result<NarrativeReport> {
        info!(
            "Requesting narrative analysis ({} holders, {} transactions)",
            data.holders.len(),
            data.transactions.len()
        );

        let prompt = build_user_prompt(data)?;
        let text = self.call_chat_api(prompt).await?;
        Ok(parse_report(&text))
    }
}

/// User prompt embedding the serialized token snapshot
pub fn build_user_prompt(data: &TokenData) -> Result<String> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| AIServiceError::ParseError(format!("Failed to serialize token data: {}", e)))?;

    Ok(format!(
        "Analyze this NEAR fungible token and assess whether it is legitimate.\n\n```json\n{}\n```",
        json
    ))
}

fn score_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)<SCORE>\s*(\d{1,3})\s*</SCORE>").expect("score pattern is valid")
    })
}

/// Last `<SCORE>NN</SCORE>` value in `text`, capped at 100, or
/// [`DEFAULT_NARRATIVE_SCORE`] when there is none.
pub fn extract_score(text: &str) -> u8 {
    score_pattern()
        .captures_iter(text)
        .filter_map(|caps| caps.get(1)?.as_str().parse::<u16>().ok())
        .last()
        .map(|score| score.min(100) as u8)
        .unwrap_or(DEFAULT_NARRATIVE_SCORE)
}

/// Split model output into the markdown body and its score
pub fn parse_report(text: &str) -> NarrativeReport {
    let score = extract_score(text);
    let report = score_pattern().replace_all(text, "").trim().to_string();
    NarrativeReport { report, score }
}
