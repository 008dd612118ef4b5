//! Advisory gateway.
//!
//! Translates a free-text query plus a language tag into pedagogical
//! guidance text by delegating to an external text-generation service. The
//! external capability sits behind the [`AdviceBackend`] trait; the default
//! backend speaks the OpenAI-compatible chat-completions protocol against a
//! configurable base URL.
//!
//! The gateway is best-effort by contract: callers never see an error from
//! [`Advisor::advise`]. Missing credentials, network failures, non-success
//! statuses, and empty responses all collapse into a fixed localized
//! apology.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::AdvisorConfig;
use crate::error::{Error, Result};
use crate::record::Language;

/// Fixed role instruction sent with every advisory request.
const SYSTEM_PROMPT: &str = "\
You are a senior educationist and master trainer supporting school mentors \
in improving teaching quality. The user is a school leader working in a \
rural or urban primary school who needs practical, low-resource teaching \
strategies: classroom management, multigrade teaching, student learning \
outcomes, and community engagement. If the user asks in Urdu, reply in \
Urdu; if English, reply in English. Keep answers concise, actionable, and \
encouraging.";

/// Apology returned when the advisory call fails and the language is Urdu.
pub const FALLBACK_UR: &str =
    "\u{645}\u{639}\u{627}\u{641} \u{06a9}\u{06cc}\u{62c}\u{626}\u{6d2}\u{60c} \u{627}\u{628}\u{6be}\u{6cc} \u{631}\u{627}\u{628}\u{637}\u{6c1} \u{645}\u{645}\u{6a9}\u{646} \u{646}\u{6c1}\u{6cc}\u{6ba} \u{6c1}\u{6d2}\u{6d4} \u{628}\u{631}\u{627}\u{626}\u{6d2} \u{645}\u{6c1}\u{631}\u{628}\u{627}\u{646}\u{6cc} \u{627}\u{67e}\u{646}\u{627} \u{627}\u{646}\u{679}\u{631}\u{646}\u{6cc}\u{679} \u{686}\u{6cc}\u{6a9} \u{6a9}\u{631}\u{6cc}\u{6ba}\u{6d4}";

/// Apology returned when the advisory call fails and the language is
/// English.
pub const FALLBACK_EN: &str =
    "Sorry, I cannot connect to the knowledge base right now. Please check your internet.";

/// The fixed apology string for the given language.
#[must_use]
pub fn fallback(language: Language) -> &'static str {
    match language {
        Language::Urdu => FALLBACK_UR,
        Language::English => FALLBACK_EN,
    }
}

/// An external text-generation capability.
///
/// Implementors take the fixed system instruction plus the user query and
/// return generated text. Failures are ordinary errors here; collapsing
/// them into fallback text is the [`Advisor`]'s job.
#[async_trait]
pub trait AdviceBackend: Send + Sync {
    /// Generate advisory text for the given query.
    ///
    /// # Errors
    ///
    /// Returns an error if the external call fails for any reason.
    async fn generate(&self, system_prompt: &str, query: &str) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Default backend: an OpenAI-compatible chat-completions endpoint.
#[derive(Debug)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl HttpBackend {
    /// Build a backend from the advisor configuration.
    ///
    /// No request timeout is set locally; the external service's own limits
    /// apply.
    #[must_use]
    pub fn new(config: &AdvisorConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }
}

#[async_trait]
impl AdviceBackend for HttpBackend {
    async fn generate(&self, system_prompt: &str, query: &str) -> Result<String> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(Error::advisory("no API key configured"));
        };

        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: query,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::advisory(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::advisory(format!("service returned {status}: {body}")));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::advisory(format!("undecodable response: {e}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| Error::advisory("response carried no text"))
    }
}

/// Gateway that turns queries into advisory text, never into errors.
pub struct Advisor {
    backend: Box<dyn AdviceBackend>,
}

impl std::fmt::Debug for Advisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Advisor").finish_non_exhaustive()
    }
}

impl Advisor {
    /// Create an advisor backed by the configured HTTP endpoint.
    #[must_use]
    pub fn new(config: &AdvisorConfig) -> Self {
        Self {
            backend: Box::new(HttpBackend::new(config)),
        }
    }

    /// Create an advisor with a custom backend.
    #[must_use]
    pub fn with_backend(backend: Box<dyn AdviceBackend>) -> Self {
        Self { backend }
    }

    /// Ask for pedagogical advice.
    ///
    /// Returns the external capability's text verbatim when it produced
    /// any. Every failure, including an empty response, yields the fixed
    /// apology for the requested language instead of an error.
    pub async fn advise(&self, query: &str, language: Language) -> String {
        match self.backend.generate(SYSTEM_PROMPT, query).await {
            Ok(text) if !text.trim().is_empty() => {
                debug!("advisory response of {} chars", text.len());
                text
            }
            Ok(_) => {
                warn!("advisory call returned empty text; using fallback");
                fallback(language).to_string()
            }
            Err(err) => {
                warn!("advisory call failed: {err}; using fallback");
                fallback(language).to_string()
            }
        }
    }
}
