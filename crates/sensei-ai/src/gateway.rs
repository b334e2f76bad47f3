use std::sync::Arc;

use tracing::error;

use sensei_types::models::{QuizQuestion, Translation};

use crate::client::{AiConfig, GeminiClient, ModelClient};
use crate::error::{FailureKind, ModelError};
use crate::prompts;

/// Result of an AI call. Both variants carry a payload of the same shape, so
/// callers always have something to render.
#[derive(Debug, Clone, PartialEq)]
pub enum AiOutcome<T> {
    /// The model answered and the answer validated.
    Fresh(T),
    /// The call failed; `value` is a sentinel payload describing the failure.
    Degraded { value: T, reason: FailureKind },
}

impl<T> AiOutcome<T> {
    pub fn value(&self) -> &T {
        match self {
            Self::Fresh(value) | Self::Degraded { value, .. } => value,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Self::Fresh(value) | Self::Degraded { value, .. } => value,
        }
    }

    pub fn reason(&self) -> Option<FailureKind> {
        match self {
            Self::Fresh(_) => None,
            Self::Degraded { reason, .. } => Some(*reason),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }
}

/// Translation and quiz generation on top of a [`ModelClient`].
#[derive(Clone)]
pub struct AiGateway {
    client: Arc<dyn ModelClient>,
}

impl AiGateway {
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        Self { client }
    }

    pub fn gemini(config: AiConfig) -> Self {
        Self::new(Arc::new(GeminiClient::new(config)))
    }

    pub async fn translate_text(&self, text: &str) -> AiOutcome<Translation> {
        match self.try_translate(text).await {
            Ok(translation) => AiOutcome::Fresh(translation),
            Err(e) => {
                let reason = FailureKind::classify(&e);
                error!(?reason, "Translation error: {}", e);
                AiOutcome::Degraded {
                    value: prompts::fallback_translation(reason),
                    reason,
                }
            }
        }
    }

    pub async fn generate_quiz(&self, topic: &str, difficulty: &str) -> AiOutcome<Vec<QuizQuestion>> {
        match self.try_generate_quiz(topic, difficulty).await {
            Ok(questions) => AiOutcome::Fresh(questions),
            Err(e) => {
                let reason = FailureKind::classify(&e);
                error!(?reason, "Quiz generation error: {}", e);
                AiOutcome::Degraded {
                    value: prompts::fallback_quiz(&e),
                    reason,
                }
            }
        }
    }

    async fn try_translate(&self, text: &str) -> Result<Translation, ModelError> {
        let raw = self
            .client
            .generate_json(&prompts::translation_prompt(text), &prompts::translation_schema())
            .await?;
        Ok(serde_json::from_str(&raw)?)
    }

    async fn try_generate_quiz(&self, topic: &str, difficulty: &str) -> Result<Vec<QuizQuestion>, ModelError> {
        let raw = self
            .client
            .generate_json(&prompts::quiz_prompt(topic, difficulty), &prompts::quiz_schema())
            .await?;
        let questions: Vec<QuizQuestion> = serde_json::from_str(&raw)?;

        if questions.is_empty() {
            return Err(ModelError::Invalid("no questions returned".into()));
        }
        if let Some(pos) = questions.iter().position(|q| !q.is_well_formed()) {
            return Err(ModelError::Invalid(format!(
                "question {} needs {} options and an index below {}",
                pos + 1,
                QuizQuestion::OPTION_COUNT,
                QuizQuestion::OPTION_COUNT
            )));
        }
        Ok(questions)
    }
}
