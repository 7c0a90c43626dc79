use std::sync::Arc;

use recipe_gateway_sdk::{AnalysisKind, AnalysisOutcome, ImagePayload, Recipe};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::error::DomainError;
use super::extract::extract_json;
use super::ports::{ChatCompletionPort, ChatReply, ChatRequest, TransportError};
use super::prompts;

/// Fields whose absence makes a modified recipe unusable.
const REQUIRED_RECIPE_FIELDS: [&str; 3] = ["name", "ingredients", "steps"];

/// Longest upstream error body kept in logs.
const LOGGED_BODY_LIMIT: usize = 512;

// ============================================================================
// Service Configuration
// ============================================================================

pub struct ServiceConfig {
    pub analyze_max_tokens: u32,
    pub modify_temperature: f32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            analyze_max_tokens: 2000,
            modify_temperature: 0.7,
        }
    }
}

// ============================================================================
// Service Implementation
// ============================================================================

pub struct Service {
    chat: Arc<dyn ChatCompletionPort>,
    config: ServiceConfig,
}

/// Shape the analysis prompts ask for. `recipe` is checked separately so that its
/// absence and its invalidity are both reported as malformed output.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalysisPayload {
    #[serde(default)]
    ingredients: Option<Vec<String>>,
    #[serde(default)]
    dish_name: Option<String>,
    #[serde(default)]
    confidence: Option<String>,
    #[serde(default)]
    recipe: Option<Value>,
}

impl Service {
    pub fn new(chat: Arc<dyn ChatCompletionPort>, config: ServiceConfig) -> Self {
        Self { chat, config }
    }

    #[instrument(skip_all, fields(kind = kind.as_str()))]
    pub async fn analyze_image(
        &self,
        image: &ImagePayload,
        kind: AnalysisKind,
    ) -> Result<AnalysisOutcome, DomainError> {
        if image.is_blank() {
            return Err(DomainError::validation("Imagem é obrigatória"));
        }

        let request = ChatRequest {
            system: Some(prompts::system_prompt(kind)),
            user_text: prompts::user_text(kind).to_owned(),
            image_url: Some(image.to_data_uri().into_owned()),
            max_tokens: Some(self.config.analyze_max_tokens),
            temperature: None,
        };

        let text = match self.chat.complete(request).await.map_err(transport_failure)? {
            ChatReply::Rejected {
                status,
                retry_after_secs,
                body,
            } => {
                warn!(status, body = %truncate(&body), "upstream rejected image analysis");
                return Err(DomainError::from_rejection(status, retry_after_secs, &body));
            }
            reply => assistant_text(reply)?,
        };

        let outcome = parse_analysis(kind, &text)?;
        info!(recipe = %outcome.recipe.name, "image analyzed");
        Ok(outcome)
    }

    #[instrument(skip_all, fields(recipe = %recipe.name))]
    pub async fn modify_recipe(
        &self,
        recipe: &Recipe,
        instruction: &str,
    ) -> Result<Recipe, DomainError> {
        let instruction = instruction.trim();
        if instruction.is_empty() {
            return Err(DomainError::validation("Receita e modificação são obrigatórios"));
        }

        let request = ChatRequest {
            system: None,
            user_text: prompts::modify_prompt(recipe, instruction),
            image_url: None,
            max_tokens: None,
            temperature: Some(self.config.modify_temperature),
        };

        let text = match self.chat.complete(request).await.map_err(transport_failure)? {
            ChatReply::Rejected { status, body, .. } => {
                warn!(status, body = %truncate(&body), "upstream rejected recipe modification");
                return Err(DomainError::upstream(Some(status), truncate(&body)));
            }
            reply => assistant_text(reply)?,
        };

        let value = extract_json(&text).map_err(|e| DomainError::malformed(&text, e.to_string()))?;

        let missing: Vec<String> = REQUIRED_RECIPE_FIELDS
            .iter()
            .filter(|field| value.get(**field).is_none_or(Value::is_null))
            .map(|field| (*field).to_owned())
            .collect();
        if !missing.is_empty() {
            warn!(?missing, "modified recipe is incomplete");
            return Err(DomainError::IncompleteRecipe { missing });
        }

        let modified: Recipe = serde_json::from_value(value)
            .map_err(|e| DomainError::malformed(&text, e.to_string()))?;
        info!(modified = %modified.name, "recipe modified");
        Ok(modified)
    }
}

fn transport_failure(e: TransportError) -> DomainError {
    warn!(error = %e, "upstream unreachable");
    DomainError::upstream(None, e.to_string())
}

/// Non-blank assistant text of a 2xx reply.
fn assistant_text(reply: ChatReply) -> Result<String, DomainError> {
    match reply {
        ChatReply::Completed {
            content: Some(text),
        } if !text.trim().is_empty() => Ok(text),
        ChatReply::Completed { .. } => {
            debug!("assistant message has no text");
            Err(DomainError::EmptyResponse)
        }
        ChatReply::Unreadable { body } => Err(DomainError::malformed(
            body,
            "response is not a chat-completion envelope",
        )),
        ChatReply::Rejected { status, body, .. } => {
            Err(DomainError::upstream(Some(status), truncate(&body)))
        }
    }
}

fn parse_analysis(kind: AnalysisKind, text: &str) -> Result<AnalysisOutcome, DomainError> {
    let value = extract_json(text).map_err(|e| DomainError::malformed(text, e.to_string()))?;

    let payload: AnalysisPayload = serde_json::from_value(value)
        .map_err(|e| DomainError::malformed(text, e.to_string()))?;

    let recipe_value = payload
        .recipe
        .ok_or_else(|| DomainError::malformed(text, "missing `recipe` field"))?;
    let recipe: Recipe = serde_json::from_value(recipe_value)
        .map_err(|e| DomainError::malformed(text, format!("invalid `recipe`: {e}")))?;

    let outcome = match kind {
        AnalysisKind::Fridge => AnalysisOutcome {
            ingredients: payload.ingredients,
            dish_name: None,
            confidence: None,
            recipe,
        },
        AnalysisKind::Dish => AnalysisOutcome {
            ingredients: None,
            dish_name: payload.dish_name,
            confidence: payload.confidence,
            recipe,
        },
    };
    Ok(outcome)
}

fn truncate(body: &str) -> String {
    match body.char_indices().nth(LOGGED_BODY_LIMIT) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_owned(),
    }
}
