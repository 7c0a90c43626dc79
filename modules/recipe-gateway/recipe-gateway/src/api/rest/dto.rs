use std::collections::BTreeMap;

use recipe_gateway_sdk::{Amount, AnalysisKind, AnalysisOutcome, Difficulty, Recipe};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// REST DTO for a recipe.
///
/// Optional fields and unknown keys are relayed exactly as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RecipeDto {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// `Fácil`, `Médio` or `Difícil`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    /// Number or free text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<Value>,
    /// Number or free text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<Value>,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tips: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisKindDto {
    Fridge,
    #[default]
    Dish,
}

/// Request to recognise an image.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AnalyzeImageRequest {
    /// Data URI or bare base64 (treated as JPEG).
    #[serde(default)]
    pub image: String,
    #[serde(rename = "type", default)]
    pub kind: AnalysisKindDto,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dish_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<String>,
    pub recipe: RecipeDto,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AnalyzeImageResponse {
    pub success: bool,
    pub data: AnalysisDto,
}

/// Request to rewrite a recipe.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ModifyRecipeRequest {
    pub recipe: RecipeDto,
    #[serde(default)]
    pub modification: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ModifyRecipeResponse {
    pub recipe: RecipeDto,
}

// Conversions

impl From<AnalysisKindDto> for AnalysisKind {
    fn from(k: AnalysisKindDto) -> Self {
        match k {
            AnalysisKindDto::Fridge => Self::Fridge,
            AnalysisKindDto::Dish => Self::Dish,
        }
    }
}

fn amount_to_value(amount: Amount) -> Value {
    match amount {
        Amount::Number(n) => Value::Number(n),
        Amount::Text(s) => Value::String(s),
    }
}

fn value_to_amount(value: Value) -> Option<Amount> {
    match value {
        Value::Null => None,
        Value::Number(n) => Some(Amount::Number(n)),
        Value::String(s) => Some(Amount::Text(s)),
        other => Some(Amount::Text(other.to_string())),
    }
}

impl From<Recipe> for RecipeDto {
    fn from(r: Recipe) -> Self {
        Self {
            name: r.name,
            description: r.description,
            time: r.time,
            difficulty: r.difficulty.map(String::from),
            servings: r.servings.map(amount_to_value),
            calories: r.calories.map(amount_to_value),
            ingredients: r.ingredients,
            steps: r.steps,
            tips: r.tips,
            extra: r.extra.into_iter().collect(),
        }
    }
}

impl From<RecipeDto> for Recipe {
    fn from(r: RecipeDto) -> Self {
        Self {
            name: r.name,
            description: r.description,
            time: r.time,
            difficulty: r.difficulty.map(Difficulty::from),
            servings: r.servings.and_then(value_to_amount),
            calories: r.calories.and_then(value_to_amount),
            ingredients: r.ingredients,
            steps: r.steps,
            tips: r.tips,
            extra: r.extra.into_iter().collect(),
        }
    }
}

impl From<AnalysisOutcome> for AnalysisDto {
    fn from(o: AnalysisOutcome) -> Self {
        Self {
            ingredients: o.ingredients,
            dish_name: o.dish_name,
            confidence: o.confidence,
            recipe: o.recipe.into(),
        }
    }
}
